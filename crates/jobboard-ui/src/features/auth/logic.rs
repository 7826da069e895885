//! Authentication messages, failure mapping and route guards.

use crate::core::errors::ApiError;
use crate::core::store::SessionSlice;
use jobboard_api_models::{FieldErrors, Role};

/// Toast and redirect reason when a request came back 401.
pub const SESSION_EXPIRED_MESSAGE: &str = "Your session has expired. Please log in again.";
/// Toast after logout.
pub const LOGGED_OUT_MESSAGE: &str = "Logged out successfully";
/// Toast after login.
pub const LOGIN_SUCCESS_MESSAGE: &str = "Login successful!";
/// Toast after registration.
pub const REGISTER_SUCCESS_MESSAGE: &str = "Registration successful!";
/// Login failure without a server message.
pub const LOGIN_FALLBACK_MESSAGE: &str = "Unable to log in with provided credentials.";
/// Registration failure without a usable body.
pub const REGISTER_FALLBACK_MESSAGE: &str = "Registration failed. Please try again.";
/// Toast shown alongside inline registration field errors.
pub const REGISTER_FIELDS_MESSAGE: &str = "Registration failed";
/// Guard message for anonymous visitors.
pub const LOGIN_REQUIRED_MESSAGE: &str = "Please log in to access this page";
/// Employer-only page opened by another role.
pub const EMPLOYERS_ONLY_MESSAGE: &str = "Only employers can post jobs";

/// Message shown for a failed login: server `error`, else `detail`, else a fallback.
#[must_use]
pub fn login_failure_message(err: &ApiError) -> String {
    err.message_or(LOGIN_FALLBACK_MESSAGE)
}

/// Why registration failed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegisterFailure {
    /// Per-field messages rendered inline.
    Fields(FieldErrors),
    /// One general message.
    Message(String),
}

impl RegisterFailure {
    /// Classify a registration error.
    #[must_use]
    pub fn from_error(err: &ApiError) -> Self {
        if let Some(fields) = err.field_errors() {
            return Self::Fields(fields.clone());
        }
        Self::Message(err.message_or(REGISTER_FALLBACK_MESSAGE))
    }

    /// Toast accompanying the failure.
    #[must_use]
    pub fn toast(&self) -> &str {
        match self {
            Self::Fields(_) => REGISTER_FIELDS_MESSAGE,
            Self::Message(message) => message,
        }
    }
}

/// Minimum password length accepted by the registration form.
pub const MIN_PASSWORD_LEN: usize = 8;

/// What a guarded route should do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Session restoration still running; render a spinner.
    Pending,
    /// Render the page.
    Allow,
    /// Notify and redirect to the login page.
    ToLogin(String),
    /// Notify and redirect to the dashboard.
    ToDashboard(String),
}

/// Decide access to a page that needs a session and optionally a role.
#[must_use]
pub fn guard(session: &SessionSlice, required: Option<Role>) -> GuardOutcome {
    if !session.restored {
        return GuardOutcome::Pending;
    }
    let Some(role) = session.role() else {
        return GuardOutcome::ToLogin(LOGIN_REQUIRED_MESSAGE.to_string());
    };
    match required {
        Some(required) if required != role => {
            GuardOutcome::ToDashboard(format!("You need to be a {required} to access this page"))
        }
        _ => GuardOutcome::Allow,
    }
}

/// Guard for pages open to employers and admins (job editing).
#[must_use]
pub fn guard_any(session: &SessionSlice, allowed: &[Role]) -> GuardOutcome {
    match guard(session, None) {
        GuardOutcome::Allow => match session.role() {
            Some(role) if allowed.contains(&role) => GuardOutcome::Allow,
            _ => GuardOutcome::ToDashboard(JOB_EDITORS_ONLY_MESSAGE.to_string()),
        },
        other => other,
    }
}

/// Job editing opened by a role that cannot edit.
pub const JOB_EDITORS_ONLY_MESSAGE: &str = "You can only edit your own jobs";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::auth::Session;
    use jobboard_api_models::{AuthResponse, Identity};

    fn slice(role: Option<&str>) -> SessionSlice {
        let current = role.map(|role| {
            let user: Identity =
                serde_json::from_value(serde_json::json!({"id": 1, "username": "x", "role": role}))
                    .expect("identity");
            Session::from_auth(AuthResponse {
                access: "t".into(),
                refresh: String::new(),
                user,
            })
        });
        SessionSlice {
            current,
            restored: true,
        }
    }

    #[test]
    fn login_messages_prefer_error_then_detail() {
        assert_eq!(
            login_failure_message(&ApiError::from_response(401, r#"{"detail":"No active account"}"#)),
            "No active account"
        );
        assert_eq!(
            login_failure_message(&ApiError::from_response(401, "")),
            LOGIN_FALLBACK_MESSAGE
        );
        assert_eq!(
            login_failure_message(&ApiError::from_response(400, r#"{"error":"Invalid credentials"}"#)),
            "Invalid credentials"
        );
        assert_eq!(
            login_failure_message(&ApiError::from_response(400, r#"{"detail":"Disabled"}"#)),
            "Disabled"
        );
    }

    #[test]
    fn registration_failures_keep_field_maps() {
        let err = ApiError::from_response(400, r#"{"username":["A user with that username already exists."]}"#);
        let failure = RegisterFailure::from_error(&err);
        assert!(matches!(failure, RegisterFailure::Fields(ref f) if f.contains_key("username")));
        assert_eq!(failure.toast(), REGISTER_FIELDS_MESSAGE);
        let failure = RegisterFailure::from_error(&ApiError::Network("offline".into()));
        assert_eq!(failure.toast(), REGISTER_FALLBACK_MESSAGE);
    }

    #[test]
    fn guards_redirect_by_session_and_role() {
        assert_eq!(
            guard(&SessionSlice::default(), None),
            GuardOutcome::Pending
        );
        assert_eq!(
            guard(&slice(None), None),
            GuardOutcome::ToLogin(LOGIN_REQUIRED_MESSAGE.into())
        );
        assert_eq!(
            guard(&slice(Some("developer")), Some(Role::Employer)),
            GuardOutcome::ToDashboard("You need to be a employer to access this page".into())
        );
        assert_eq!(guard(&slice(Some("employer")), Some(Role::Employer)), GuardOutcome::Allow);
        assert_eq!(
            guard_any(&slice(Some("admin")), &[Role::Employer, Role::Admin]),
            GuardOutcome::Allow
        );
        assert!(matches!(
            guard_any(&slice(Some("developer")), &[Role::Employer, Role::Admin]),
            GuardOutcome::ToDashboard(_)
        ));
    }
}
