//! Login and two-step registration forms.
//!
//! # Design
//! - Step 1 collects account credentials, step 2 the profile.
//! - Editing a field clears its message; the general message survives until resubmit.

use crate::core::errors::ApiError;
use crate::features::auth::logic::{MIN_PASSWORD_LEN, RegisterFailure, login_failure_message};
use jobboard_api_models::{FieldErrors, LoginRequest, RegistrationRequest, Role};

/// Key for messages that belong to no single field.
pub const GENERAL_ERROR_KEY: &str = "general";

/// Login form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginState {
    /// Credentials as typed.
    pub form: LoginRequest,
    /// Failure message from the last attempt.
    pub error: Option<String>,
    /// Request in flight.
    pub busy: bool,
}

impl LoginState {
    /// Start a login; `None` while one is already running.
    pub fn submit(&mut self) -> Option<LoginRequest> {
        if self.busy {
            return None;
        }
        self.busy = true;
        self.error = None;
        Some(self.form.clone())
    }

    /// Record a failed login and return the toast text.
    pub fn fail(&mut self, err: &ApiError) -> String {
        self.busy = false;
        let message = login_failure_message(err);
        self.error = Some(message.clone());
        message
    }

    /// Record a successful login.
    pub fn succeed(&mut self) {
        self.busy = false;
    }
}

/// Registration wizard step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RegisterStep {
    /// Credentials and role.
    #[default]
    Account,
    /// Personal and company details.
    Profile,
}

/// Registration wizard.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterState {
    /// Values as typed.
    pub form: RegistrationRequest,
    /// Current step.
    pub step: RegisterStep,
    /// Inline messages keyed by field, plus [`GENERAL_ERROR_KEY`].
    pub errors: FieldErrors,
    /// Request in flight.
    pub busy: bool,
}

fn put(errors: &mut FieldErrors, key: &str, message: &str) {
    errors.insert(key.to_string(), vec![message.to_string()]);
}

/// Messages for the account step, keyed by field.
#[must_use]
pub fn validate_account_step(form: &RegistrationRequest) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if form.username.is_empty() {
        put(&mut errors, "username", "Username is required");
    }
    if form.email.is_empty() {
        put(&mut errors, "email", "Email is required");
    }
    if form.password.is_empty() {
        put(&mut errors, "password", "Password is required");
    }
    if form.password.chars().count() < MIN_PASSWORD_LEN {
        put(&mut errors, "password", "Password must be at least 8 characters");
    }
    if form.password != form.password_confirmation {
        put(&mut errors, "password_confirmation", "Passwords do not match");
    }
    errors
}

/// Messages for the profile step, keyed by field.
#[must_use]
pub fn validate_profile_step(form: &RegistrationRequest) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if form.first_name.is_empty() {
        put(&mut errors, "first_name", "First name is required");
    }
    if form.last_name.is_empty() {
        put(&mut errors, "last_name", "Last name is required");
    }
    if form.role == Role::Employer && form.company.is_empty() {
        put(&mut errors, "company", "Company name is required for employers");
    }
    errors
}

impl RegisterState {
    /// Wizard preselecting `role` (from a `?role=` link); admins cannot self-register.
    #[must_use]
    pub fn with_role(role: Option<Role>) -> Self {
        let mut state = Self::default();
        if let Some(role @ (Role::Developer | Role::Employer)) = role {
            state.form.role = role;
        }
        state
    }

    /// Update a field by its form key and drop its message.
    pub fn set(&mut self, key: &str, value: &str) {
        let form = &mut self.form;
        match key {
            "username" => form.username = value.to_string(),
            "email" => form.email = value.to_string(),
            "password" => form.password = value.to_string(),
            "password_confirmation" => form.password_confirmation = value.to_string(),
            "first_name" => form.first_name = value.to_string(),
            "last_name" => form.last_name = value.to_string(),
            "phone" => form.phone = value.to_string(),
            "company" => form.company = value.to_string(),
            "role" => {
                if let Some(role) = Role::parse(value) {
                    form.role = role;
                }
            }
            _ => return,
        }
        self.errors.remove(key);
    }

    /// First message for `key`.
    #[must_use]
    pub fn error(&self, key: &str) -> Option<&str> {
        self.errors
            .get(key)
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    /// Validate the account step and advance.
    pub fn next(&mut self) -> bool {
        let errors = validate_account_step(&self.form);
        if !errors.is_empty() {
            self.errors = errors;
            return false;
        }
        self.step = RegisterStep::Profile;
        true
    }

    /// Return to the account step.
    pub fn back(&mut self) {
        self.step = RegisterStep::Account;
    }

    /// Validate the profile step and start the request.
    pub fn submit(&mut self) -> Option<RegistrationRequest> {
        if self.busy {
            return None;
        }
        let errors = validate_profile_step(&self.form);
        if !errors.is_empty() {
            self.errors = errors;
            return None;
        }
        self.errors.clear();
        self.busy = true;
        Some(self.form.clone())
    }

    /// Record a failed registration; returns the toast text.
    pub fn fail(&mut self, err: &ApiError) -> String {
        self.busy = false;
        let failure = RegisterFailure::from_error(err);
        let toast = failure.toast().to_string();
        match failure {
            RegisterFailure::Fields(fields) => self.errors = fields,
            RegisterFailure::Message(message) => put(&mut self.errors, GENERAL_ERROR_KEY, &message),
        }
        toast
    }

    /// Record a successful registration.
    pub fn succeed(&mut self) {
        self.busy = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> RegisterState {
        let mut state = RegisterState::default();
        for (key, value) in [
            ("username", "lin"),
            ("email", "lin@example.com"),
            ("password", "correct-horse"),
            ("password_confirmation", "correct-horse"),
        ] {
            state.set(key, value);
        }
        state
    }

    #[test]
    fn short_or_missing_passwords_report_length() {
        let mut state = RegisterState::default();
        assert!(!state.next());
        assert_eq!(state.error("username"), Some("Username is required"));
        assert_eq!(state.error("email"), Some("Email is required"));
        assert_eq!(state.error("password"), Some("Password must be at least 8 characters"));
        assert_eq!(state.error("password_confirmation"), None);
        state.set("password", "abc");
        assert_eq!(state.error("password"), None);
        assert!(!state.next());
        assert_eq!(state.error("password_confirmation"), Some("Passwords do not match"));
    }

    #[test]
    fn employers_need_a_company() {
        let mut state = filled();
        assert!(state.next());
        assert_eq!(state.step, RegisterStep::Profile);
        state.set("role", "employer");
        state.set("first_name", "Lin");
        state.set("last_name", "Wu");
        assert_eq!(state.submit(), None);
        assert_eq!(state.error("company"), Some("Company name is required for employers"));
        state.set("company", "Acme");
        let request = state.submit().expect("valid");
        assert_eq!(request.role, Role::Employer);
        assert!(state.busy);
    }

    #[test]
    fn server_failures_fill_fields_or_general() {
        let mut state = filled();
        state.busy = true;
        let toast = state.fail(&ApiError::from_response(
            400,
            r#"{"email":["user with this email already exists."]}"#,
        ));
        assert_eq!(toast, "Registration failed");
        assert_eq!(state.error("email"), Some("user with this email already exists."));
        let toast = state.fail(&ApiError::Network("offline".into()));
        assert_eq!(toast, "Registration failed. Please try again.");
        assert_eq!(state.error(GENERAL_ERROR_KEY), Some(toast.as_str()));
    }

    #[test]
    fn role_links_cannot_grant_admin() {
        assert_eq!(RegisterState::with_role(Some(Role::Employer)).form.role, Role::Employer);
        assert_eq!(RegisterState::with_role(Some(Role::Admin)).form.role, Role::Developer);
    }

    #[test]
    fn login_failure_is_kept_for_display() {
        let mut login = LoginState::default();
        assert!(login.submit().is_some());
        assert!(login.submit().is_none());
        let toast = login.fail(&ApiError::from_response(401, ""));
        assert_eq!(login.error.as_deref(), Some(toast.as_str()));
        assert!(!login.busy);
    }
}
