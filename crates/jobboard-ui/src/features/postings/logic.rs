//! Posting form rules, ownership checks and failure mapping.

use crate::core::errors::ApiError;
use crate::models::Notice;
use jobboard_api_models::{FieldErrors, Identity, JobPayload, JobPosting, Role};

/// What an empty rich-text editor submits.
pub const EMPTY_EDITOR_MARKUP: &str = "<p><br></p>";

/// Toast after a posting was created.
pub const JOB_POSTED_MESSAGE: &str = "Job posted successfully!";
/// Toast after a posting was saved.
pub const JOB_UPDATED_MESSAGE: &str = "Job updated successfully!";
/// Toast after a posting was deleted.
pub const JOB_DELETED_MESSAGE: &str = "Job deleted successfully!";
/// Create failed without field errors.
pub const JOB_POST_FAILED_MESSAGE: &str = "Failed to post job. Please try again.";
/// Update failed without field errors.
pub const JOB_UPDATE_FAILED_MESSAGE: &str = "Failed to update job. Please try again.";
/// Delete failed.
pub const JOB_DELETE_FAILED_MESSAGE: &str = "Failed to delete job. Please try again.";
/// Delete rejected for ownership.
pub const JOB_DELETE_FORBIDDEN_MESSAGE: &str = "You can only delete your own jobs";
/// Edit rejected for ownership.
pub const JOB_EDIT_FORBIDDEN_MESSAGE: &str = "You can only edit your own jobs";
/// Posting to edit does not exist.
pub const JOB_NOT_FOUND_MESSAGE: &str = "Job not found";
/// Posting to edit failed to load.
pub const JOB_LOAD_FAILED_MESSAGE: &str = "Failed to load job data";
/// Posting detail failed to load.
pub const JOB_DETAILS_FAILED_MESSAGE: &str = "Failed to load job details";

/// Editable posting field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JobField {
    /// Title.
    Title,
    /// Rich-text description.
    Description,
    /// Rich-text requirements.
    Requirements,
    /// Location.
    Location,
    /// Optional salary.
    Salary,
}

impl JobField {
    /// Wire and error-map key.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Requirements => "requirements",
            Self::Location => "location",
            Self::Salary => "salary",
        }
    }
}

/// Posting form as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JobForm {
    /// Title.
    pub title: String,
    /// Description markup.
    pub description: String,
    /// Requirements markup.
    pub requirements: String,
    /// Location.
    pub location: String,
    /// Salary as typed.
    pub salary: String,
}

fn rich_text_is_empty(markup: &str) -> bool {
    markup.trim().is_empty() || markup == EMPTY_EDITOR_MARKUP
}

impl JobForm {
    /// Form loaded from an existing posting.
    #[must_use]
    pub fn from_posting(job: &JobPosting) -> Self {
        Self {
            title: job.title.clone(),
            description: job.description.clone(),
            requirements: job.requirements.clone(),
            location: job.location.clone(),
            salary: job.salary.map(|value| value.to_string()).unwrap_or_default(),
        }
    }

    /// Update one field.
    pub fn set(&mut self, field: JobField, value: &str) {
        let slot = match field {
            JobField::Title => &mut self.title,
            JobField::Description => &mut self.description,
            JobField::Requirements => &mut self.requirements,
            JobField::Location => &mut self.location,
            JobField::Salary => &mut self.salary,
        };
        *slot = value.to_string();
    }

    /// Check required fields and build the request body.
    ///
    /// # Errors
    /// Returns one message per missing field, keyed like the server's map.
    pub fn validate(&self) -> Result<JobPayload, FieldErrors> {
        let mut errors = FieldErrors::new();
        let mut require = |field: JobField, missing: bool, message: &str| {
            if missing {
                errors.insert(field.key().to_string(), vec![message.to_string()]);
            }
        };
        require(JobField::Title, self.title.trim().is_empty(), "Title is required");
        require(
            JobField::Description,
            rich_text_is_empty(&self.description),
            "Description is required",
        );
        require(
            JobField::Requirements,
            rich_text_is_empty(&self.requirements),
            "Requirements are required",
        );
        require(JobField::Location, self.location.trim().is_empty(), "Location is required");
        if !errors.is_empty() {
            return Err(errors);
        }
        let salary = self.salary.trim();
        Ok(JobPayload {
            title: self.title.clone(),
            description: self.description.clone(),
            requirements: self.requirements.clone(),
            location: self.location.clone(),
            salary: (!salary.is_empty()).then(|| salary.to_string()),
        })
    }
}

/// Whether `identity` may edit or delete `job`.
#[must_use]
pub fn can_edit(job: &JobPosting, identity: &Identity) -> bool {
    identity.role == Role::Admin || job.is_owned_by(identity)
}

/// Postings owned by `identity` that are still open, in server order.
#[must_use]
pub fn owned_active_jobs(jobs: &[JobPosting], identity: &Identity) -> Vec<JobPosting> {
    jobs.iter()
        .filter(|job| job.is_active && job.is_owned_by(identity))
        .cloned()
        .collect()
}

/// How a failed posting call is surfaced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PostingFeedback {
    /// Inline field messages.
    Fields(FieldErrors),
    /// Toast.
    Notice(Notice),
    /// Toast, then leave the page.
    NoticeAndLeave(Notice),
    /// Session expired; the global policy applies.
    SessionExpired,
}

/// Which posting call failed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PostingCall {
    /// Create.
    Create,
    /// Update.
    Update,
    /// Load for editing.
    Load,
    /// Delete.
    Delete,
}

/// Map a failed posting call to user feedback.
#[must_use]
pub fn posting_feedback(call: PostingCall, err: &ApiError) -> PostingFeedback {
    if err.is_unauthorized() {
        return PostingFeedback::SessionExpired;
    }
    match (call, err) {
        (PostingCall::Create | PostingCall::Update, ApiError::Validation { fields, .. }) => {
            PostingFeedback::Fields(fields.clone())
        }
        (PostingCall::Update, ApiError::Forbidden { .. }) => {
            PostingFeedback::Notice(Notice::error(JOB_EDIT_FORBIDDEN_MESSAGE))
        }
        (PostingCall::Create, _) => PostingFeedback::Notice(Notice::error(JOB_POST_FAILED_MESSAGE)),
        (PostingCall::Update, _) => {
            PostingFeedback::Notice(Notice::error(JOB_UPDATE_FAILED_MESSAGE))
        }
        (PostingCall::Load, ApiError::NotFound { .. }) => {
            PostingFeedback::NoticeAndLeave(Notice::error(JOB_NOT_FOUND_MESSAGE))
        }
        (PostingCall::Load, _) => {
            PostingFeedback::NoticeAndLeave(Notice::error(JOB_LOAD_FAILED_MESSAGE))
        }
        (PostingCall::Delete, ApiError::Forbidden { .. }) => {
            PostingFeedback::Notice(Notice::error(JOB_DELETE_FORBIDDEN_MESSAGE))
        }
        (PostingCall::Delete, _) => {
            PostingFeedback::Notice(Notice::error(JOB_DELETE_FAILED_MESSAGE))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn posting(owner_id: i64, active: bool) -> JobPosting {
        serde_json::from_value(serde_json::json!({
            "id": owner_id * 100,
            "title": "Platform Engineer",
            "salary": "120000.50",
            "is_active": active,
            "created_at": "2024-05-01T12:00:00Z",
            "created_by": {"id": owner_id, "username": "owner", "role": "employer"}
        }))
        .expect("posting fixture")
    }

    fn identity(id: i64, role: &str) -> Identity {
        serde_json::from_value(serde_json::json!({"id": id, "username": "u", "role": role}))
            .expect("identity fixture")
    }

    #[test]
    fn empty_form_reports_every_required_field() {
        let form = JobForm {
            description: EMPTY_EDITOR_MARKUP.into(),
            ..JobForm::default()
        };
        let errors = form.validate().expect_err("invalid");
        assert_eq!(errors["title"], vec!["Title is required".to_string()]);
        assert_eq!(errors["description"], vec!["Description is required".to_string()]);
        assert_eq!(errors["requirements"], vec!["Requirements are required".to_string()]);
        assert_eq!(errors["location"], vec!["Location is required".to_string()]);
        assert!(!errors.contains_key("salary"));
    }

    #[test]
    fn blank_salary_is_sent_as_null() {
        let mut form = JobForm::default();
        form.set(JobField::Title, "SRE");
        form.set(JobField::Description, "<p>Keep it up</p>");
        form.set(JobField::Requirements, "<p>Linux</p>");
        form.set(JobField::Location, "Remote");
        form.set(JobField::Salary, "  ");
        let payload = form.validate().expect("valid");
        assert_eq!(payload.salary, None);
        let body = serde_json::to_value(&payload).expect("json");
        assert!(body["salary"].is_null());
    }

    #[test]
    fn editing_loads_decimal_salaries() {
        let form = JobForm::from_posting(&posting(1, true));
        assert_eq!(form.salary, "120000.5");
    }

    #[test]
    fn owners_and_admins_may_edit() {
        let job = posting(7, true);
        assert!(can_edit(&job, &identity(7, "employer")));
        assert!(can_edit(&job, &identity(1, "admin")));
        assert!(!can_edit(&job, &identity(8, "employer")));
    }

    #[test]
    fn my_jobs_are_owned_and_active() {
        let jobs = vec![posting(1, true), posting(1, false), posting(2, true)];
        let mine = owned_active_jobs(&jobs, &identity(1, "employer"));
        assert_eq!(mine.iter().map(|job| job.id).collect::<Vec<_>>(), vec![100]);
    }

    #[test]
    fn failures_map_per_call() {
        let forbidden = ApiError::Forbidden { message: None };
        assert_eq!(
            posting_feedback(PostingCall::Delete, &forbidden),
            PostingFeedback::Notice(Notice::error(JOB_DELETE_FORBIDDEN_MESSAGE))
        );
        assert_eq!(
            posting_feedback(PostingCall::Update, &forbidden),
            PostingFeedback::Notice(Notice::error(JOB_EDIT_FORBIDDEN_MESSAGE))
        );
        assert_eq!(
            posting_feedback(PostingCall::Load, &ApiError::NotFound { message: None }),
            PostingFeedback::NoticeAndLeave(Notice::error(JOB_NOT_FOUND_MESSAGE))
        );
        assert_eq!(
            posting_feedback(PostingCall::Create, &ApiError::Unauthorized { message: None }),
            PostingFeedback::SessionExpired
        );
        let mut fields = FieldErrors::new();
        fields.insert("salary".into(), vec!["A valid number is required.".into()]);
        assert_eq!(
            posting_feedback(
                PostingCall::Create,
                &ApiError::Validation { message: None, fields: fields.clone() }
            ),
            PostingFeedback::Fields(fields)
        );
    }
}
