//! Pure helpers for application lists and submission feedback.

use crate::core::errors::ApiError;
use jobboard_api_models::{Application, ApplicationStatus};

/// Raised by the server when the applicant has no profile resume.
pub const MISSING_PROFILE_RESUME_ERROR: &str =
    "Please upload a resume to your profile before applying for jobs";
/// Inline message shown instead of [`MISSING_PROFILE_RESUME_ERROR`].
pub const MISSING_RESUME_MESSAGE: &str = "Please upload a resume to apply for jobs";
/// Toast after a successful submission.
pub const APPLICATION_SUBMITTED_MESSAGE: &str = "Application submitted successfully!";
/// Toast when a submission failed without a usable server message.
pub const APPLICATION_FAILED_MESSAGE: &str = "Failed to submit application. Please try again.";
/// Toast after a successful status change.
pub const STATUS_UPDATED_MESSAGE: &str = "Application status updated successfully!";
/// Toast when a status change is rejected for ownership.
pub const STATUS_FORBIDDEN_MESSAGE: &str = "You can only update status for applications to your jobs";
/// Toast for any other status change failure.
pub const STATUS_FAILED_MESSAGE: &str = "Failed to update application status";

/// Status selector of the applications dashboard.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StatusFilter {
    /// Every status.
    #[default]
    All,
    /// Exactly one status.
    Only(ApplicationStatus),
}

impl StatusFilter {
    /// Parse a select value; `all` and unknown values mean every status.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        ApplicationStatus::parse(value).map_or(Self::All, Self::Only)
    }

    /// Select value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Only(status) => status.as_str(),
        }
    }

    /// Whether `status` passes the filter.
    #[must_use]
    pub fn admits(self, status: ApplicationStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => wanted == status,
        }
    }
}

/// Whether `application` matches the search term (case-insensitive).
///
/// Matches a substring of the job title or of "first last" applicant name.
#[must_use]
pub fn matches_term(application: &Application, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }
    let needle = term.to_lowercase();
    application.job.title.to_lowercase().contains(&needle)
        || application
            .applicant
            .full_name()
            .to_lowercase()
            .contains(&needle)
}

/// Applications passing both the term and the status filter, in source order.
#[must_use]
pub fn filter_applications(
    applications: &[Application],
    term: &str,
    status: StatusFilter,
) -> Vec<Application> {
    applications
        .iter()
        .filter(|application| status.admits(application.status) && matches_term(application, term))
        .cloned()
        .collect()
}

/// Statuses an application may move to: every status except the current one.
#[must_use]
pub fn status_targets(current: ApplicationStatus) -> Vec<ApplicationStatus> {
    ApplicationStatus::ALL
        .into_iter()
        .filter(|status| *status != current)
        .collect()
}

/// Display label for a status.
#[must_use]
pub const fn status_label(status: ApplicationStatus) -> &'static str {
    match status {
        ApplicationStatus::Applied => "Applied",
        ApplicationStatus::Shortlisted => "Shortlisted",
        ApplicationStatus::Rejected => "Rejected",
        ApplicationStatus::Hired => "Hired",
    }
}

/// Whether any application references `job_id`.
#[must_use]
pub fn has_applied(applications: &[Application], job_id: i64) -> bool {
    applications.iter().any(|application| application.job.id == job_id)
}

/// Number of applications in any of `statuses`.
#[must_use]
pub fn count_with_status(applications: &[Application], statuses: &[ApplicationStatus]) -> usize {
    applications
        .iter()
        .filter(|application| statuses.contains(&application.status))
        .count()
}

/// How a failed submission is shown.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmissionFeedback {
    /// Message under the resume picker.
    InlineResume(String),
    /// Toast.
    Toast(String),
    /// Session expired; the global policy applies.
    SessionExpired,
}

/// Map a submission failure to user feedback.
#[must_use]
pub fn submission_feedback(err: &ApiError) -> SubmissionFeedback {
    if err.is_unauthorized() {
        return SubmissionFeedback::SessionExpired;
    }
    if let Some(message) = err.server_message() {
        if message == MISSING_PROFILE_RESUME_ERROR {
            return SubmissionFeedback::InlineResume(MISSING_RESUME_MESSAGE.to_string());
        }
        return SubmissionFeedback::Toast(message.to_string());
    }
    if let Some(fields) = err.field_errors() {
        if let Some(resume) = fields.get("resume") {
            return SubmissionFeedback::InlineResume(resume.join(" "));
        }
        let joined = fields.values().flatten().cloned().collect::<Vec<_>>().join(" ");
        if !joined.is_empty() {
            return SubmissionFeedback::Toast(joined);
        }
    }
    SubmissionFeedback::Toast(APPLICATION_FAILED_MESSAGE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobboard_api_models::FieldErrors;

    fn application(id: i64, status: &str, title: &str, first: &str, last: &str) -> Application {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "job": {"id": id * 10, "title": title, "created_at": "2024-05-01T12:00:00Z"},
            "applicant": {"id": 99, "username": "u", "first_name": first, "last_name": last},
            "status": status,
            "applied_at": "2024-05-02T08:30:00Z"
        }))
        .expect("application fixture")
    }

    #[test]
    fn term_and_status_filters_combine() {
        let apps = vec![
            application(1, "applied", "Backend Dev", "Ana", "Lima"),
            application(2, "hired", "Frontend Dev", "Bo", "Chen"),
        ];
        let by_term = filter_applications(&apps, "frontend", StatusFilter::All);
        assert_eq!(by_term.iter().map(|a| a.id).collect::<Vec<_>>(), vec![2]);
        let by_status = filter_applications(&apps, "", StatusFilter::parse("applied"));
        assert_eq!(by_status.iter().map(|a| a.id).collect::<Vec<_>>(), vec![1]);
        assert_eq!(filter_applications(&apps, "bo ch", StatusFilter::All).len(), 1);
        assert!(filter_applications(&apps, "backend", StatusFilter::parse("hired")).is_empty());
    }

    #[test]
    fn every_other_status_is_a_target() {
        assert_eq!(
            status_targets(ApplicationStatus::Applied),
            vec![
                ApplicationStatus::Shortlisted,
                ApplicationStatus::Rejected,
                ApplicationStatus::Hired
            ]
        );
        assert!(!status_targets(ApplicationStatus::Hired).contains(&ApplicationStatus::Hired));
        assert_eq!(status_targets(ApplicationStatus::Rejected).len(), 3);
    }

    #[test]
    fn applied_check_matches_job_ids() {
        let apps = vec![application(4, "applied", "Ops", "A", "B")];
        assert!(has_applied(&apps, 40));
        assert!(!has_applied(&apps, 4));
    }

    #[test]
    fn missing_profile_resume_is_shown_inline() {
        let err = ApiError::Server {
            status: 400,
            message: Some(MISSING_PROFILE_RESUME_ERROR.into()),
        };
        assert_eq!(
            submission_feedback(&err),
            SubmissionFeedback::InlineResume(MISSING_RESUME_MESSAGE.into())
        );
        let other = ApiError::Server {
            status: 400,
            message: Some("You have already applied".into()),
        };
        assert_eq!(
            submission_feedback(&other),
            SubmissionFeedback::Toast("You have already applied".into())
        );
    }

    #[test]
    fn field_errors_map_to_inline_or_joined_toast() {
        let mut fields = FieldErrors::new();
        fields.insert("resume".into(), vec!["Bad file.".into(), "Too big.".into()]);
        let err = ApiError::Validation { message: None, fields: fields.clone() };
        assert_eq!(
            submission_feedback(&err),
            SubmissionFeedback::InlineResume("Bad file. Too big.".into())
        );

        fields.clear();
        fields.insert("cover_letter".into(), vec!["Too long.".into()]);
        fields.insert("job".into(), vec!["Closed.".into()]);
        let err = ApiError::Validation { message: None, fields };
        assert_eq!(
            submission_feedback(&err),
            SubmissionFeedback::Toast("Too long. Closed.".into())
        );
        assert_eq!(
            submission_feedback(&ApiError::Network("x".into())),
            SubmissionFeedback::Toast(APPLICATION_FAILED_MESSAGE.into())
        );
        assert_eq!(submission_feedback(&ApiError::Unauthorized { message: None }), SubmissionFeedback::SessionExpired);
    }
}
