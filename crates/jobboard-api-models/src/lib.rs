#![forbid(unsafe_code)]
#![deny(
    unused_must_use,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![warn(unused, unreachable_pub, clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]
//! Shared HTTP DTOs for the job board REST API.
//!
//! The web client decodes every response through these types so the wire
//! contract lives in one place. Response-shape differences between endpoints
//! (bare arrays, `{results: [...]}`, `{jobs: [...], current_page, ...}`) are
//! resolved here and never reach the UI layer.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Account role attached to an identity.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Job seeker.
    #[default]
    Developer,
    /// Posts jobs and reviews applications.
    Employer,
    /// Administrative account.
    Admin,
}

impl Role {
    /// Wire value of the role.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Developer => "developer",
            Self::Employer => "employer",
            Self::Admin => "admin",
        }
    }

    /// Parse the wire value; unknown values yield `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "developer" => Some(Self::Developer),
            "employer" => Some(Self::Employer),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Authenticated user profile as returned by the auth endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Identity {
    /// Primary key.
    pub id: i64,
    /// Login name.
    pub username: String,
    /// Contact email.
    #[serde(default)]
    pub email: String,
    /// Given name (may be empty).
    #[serde(default)]
    pub first_name: String,
    /// Family name (may be empty).
    #[serde(default)]
    pub last_name: String,
    /// Account role.
    #[serde(default)]
    pub role: Role,
    /// Optional phone number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Company name, set for employers.
    #[serde(default)]
    pub company: Option<String>,
    /// Storage reference of the profile resume, when one is attached.
    #[serde(default)]
    pub resume: Option<String>,
    /// File name the profile resume was uploaded with.
    #[serde(default)]
    pub resume_original_name: Option<String>,
}

impl Identity {
    /// Greeting name: first name when set, else the username.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.first_name.trim().is_empty() {
            &self.username
        } else {
            &self.first_name
        }
    }

    /// "First Last" as typed by the user.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Whether a profile resume is attached.
    #[must_use]
    pub fn has_resume(&self) -> bool {
        self.resume.as_deref().is_some_and(|value| !value.is_empty())
    }
}

/// Credentials posted to the login endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct LoginRequest {
    /// Login name.
    pub username: String,
    /// Plain password.
    pub password: String,
}

/// Registration form fields sent as multipart parts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RegistrationRequest {
    /// Login name.
    pub username: String,
    /// Contact email.
    pub email: String,
    /// Chosen password.
    pub password: String,
    /// Password repeated for confirmation.
    pub password_confirmation: String,
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
    /// Requested role.
    pub role: Role,
    /// Optional phone number.
    pub phone: String,
    /// Company name (required for employers).
    pub company: String,
}

impl RegistrationRequest {
    /// Non-empty fields in submission order; empty values are omitted from the form.
    #[must_use]
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        [
            ("username", self.username.clone()),
            ("email", self.email.clone()),
            ("password", self.password.clone()),
            ("password_confirmation", self.password_confirmation.clone()),
            ("first_name", self.first_name.clone()),
            ("last_name", self.last_name.clone()),
            ("role", self.role.as_str().to_string()),
            ("phone", self.phone.clone()),
            ("company", self.company.clone()),
        ]
        .into_iter()
        .filter(|(_, value)| !value.is_empty())
        .collect()
    }
}

/// Token pair and identity returned by login and registration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthResponse {
    /// Short-lived bearer token.
    pub access: String,
    /// Refresh token.
    pub refresh: String,
    /// Authenticated identity.
    pub user: Identity,
}

/// A job posting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct JobPosting {
    /// Primary key.
    pub id: i64,
    /// Posting title.
    pub title: String,
    /// Rich-text description (HTML).
    #[serde(default)]
    pub description: String,
    /// Rich-text requirements (HTML).
    #[serde(default)]
    pub requirements: String,
    /// Free-form location.
    #[serde(default)]
    pub location: String,
    /// Optional salary; the backend serializes decimals as strings.
    #[serde(default, deserialize_with = "de_optional_decimal")]
    pub salary: Option<f64>,
    /// Owning employer.
    #[serde(default)]
    pub created_by: Option<Identity>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    /// Whether the posting is open.
    #[serde(default = "default_true")]
    pub is_active: bool,
    /// Number of applications received.
    #[serde(default)]
    pub application_count: u32,
    /// Set on recommendation results.
    #[serde(default)]
    pub is_recommended: bool,
}

impl JobPosting {
    /// Whether `identity` owns this posting.
    #[must_use]
    pub fn is_owned_by(&self, identity: &Identity) -> bool {
        self.created_by
            .as_ref()
            .is_some_and(|owner| owner.id == identity.id)
    }

    /// Company of the owning employer, when known.
    #[must_use]
    pub fn company(&self) -> Option<&str> {
        self.created_by
            .as_ref()
            .and_then(|owner| owner.company.as_deref())
    }
}

const fn default_true() -> bool {
    true
}

fn de_optional_decimal<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(number)) => Ok(number.as_f64()),
        Some(Value::String(text)) => {
            let trimmed = text.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<f64>()
                .map(Some)
                .map_err(|_| serde::de::Error::custom(format!("invalid decimal: {trimmed}")))
        }
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected decimal, got {other}"
        ))),
    }
}

/// Create/update body for a job posting.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct JobPayload {
    /// Posting title.
    pub title: String,
    /// Rich-text description.
    pub description: String,
    /// Rich-text requirements.
    pub requirements: String,
    /// Location.
    pub location: String,
    /// Salary as typed; `None` is sent as `null`.
    pub salary: Option<String>,
}

/// Review status of an application.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    /// Submitted and awaiting review.
    Applied,
    /// Moved forward by the employer.
    Shortlisted,
    /// Declined by the employer.
    Rejected,
    /// Offer accepted.
    Hired,
}

impl ApplicationStatus {
    /// Every status in display order.
    pub const ALL: [Self; 4] = [Self::Applied, Self::Shortlisted, Self::Rejected, Self::Hired];

    /// Wire value of the status.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Applied => "applied",
            Self::Shortlisted => "shortlisted",
            Self::Rejected => "rejected",
            Self::Hired => "hired",
        }
    }

    /// Parse the wire value; unknown values yield `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == value)
    }
}

impl fmt::Display for ApplicationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A job application with its nested posting and applicant.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Application {
    /// Primary key.
    pub id: i64,
    /// Target posting.
    pub job: JobPosting,
    /// Applying developer.
    pub applicant: Identity,
    /// Review status.
    pub status: ApplicationStatus,
    /// Submission timestamp.
    pub applied_at: DateTime<Utc>,
    /// Optional cover letter.
    #[serde(default)]
    pub cover_letter: Option<String>,
    /// Per-application resume override, when one was uploaded.
    #[serde(default)]
    pub resume: Option<String>,
    /// File name of the override resume.
    #[serde(default)]
    pub resume_original_name: Option<String>,
}

/// Body of a status update request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusUpdate {
    /// Requested status.
    pub status: ApplicationStatus,
}

/// Server-reported page position.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PageMeta {
    /// 1-based page currently shown.
    pub current_page: u32,
    /// Total number of pages (at least 1).
    pub total_pages: u32,
    /// Total matching items across pages.
    pub total_items: u64,
    /// Whether a following page exists.
    pub has_next: bool,
    /// Whether a preceding page exists.
    pub has_previous: bool,
}

impl Default for PageMeta {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            total_items: 0,
            has_next: false,
            has_previous: false,
        }
    }
}

/// Normalized job list page.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct JobPage {
    /// Postings on this page in server order.
    pub jobs: Vec<JobPosting>,
    /// Page position metadata.
    pub meta: PageMeta,
}

/// Every shape the jobs endpoint is known to answer with.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum JobListResponse {
    /// Server-side paginated payload.
    Paginated {
        /// Postings on the page.
        jobs: Vec<JobPosting>,
        /// 1-based page number.
        #[serde(default = "first_page")]
        current_page: u32,
        /// Total pages.
        #[serde(default = "first_page")]
        total_pages: u32,
        /// Total postings.
        #[serde(default)]
        total_jobs: u64,
        /// Whether a next page exists.
        #[serde(default)]
        has_next: bool,
        /// Whether a previous page exists.
        #[serde(default)]
        has_previous: bool,
    },
    /// Generic `{results: [...]}` wrapper.
    Results {
        /// Postings.
        results: Vec<JobPosting>,
    },
    /// Bare array.
    Plain(Vec<JobPosting>),
}

const fn first_page() -> u32 {
    1
}

impl JobListResponse {
    /// Collapse any response shape into a single page with metadata.
    ///
    /// Unpaginated shapes are treated as one page holding every item.
    #[must_use]
    pub fn into_page(self) -> JobPage {
        match self {
            Self::Paginated {
                jobs,
                current_page,
                total_pages,
                total_jobs,
                has_next,
                has_previous,
            } => JobPage {
                jobs,
                meta: PageMeta {
                    current_page: current_page.max(1),
                    total_pages: total_pages.max(1),
                    total_items: total_jobs,
                    has_next,
                    has_previous,
                },
            },
            Self::Results { results: jobs } | Self::Plain(jobs) => {
                let meta = PageMeta {
                    total_items: jobs.len() as u64,
                    ..PageMeta::default()
                };
                JobPage { jobs, meta }
            }
        }
    }

    /// Collapse any response shape into the ordered posting sequence.
    #[must_use]
    pub fn into_jobs(self) -> Vec<JobPosting> {
        self.into_page().jobs
    }
}

/// Array or `{results: [...]}` list payload.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ListPayload<T> {
    /// Generic `{results: [...]}` wrapper.
    Results {
        /// Items.
        results: Vec<T>,
    },
    /// Bare array.
    Items(Vec<T>),
}

impl<T> ListPayload<T> {
    /// Ordered items regardless of shape.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        match self {
            Self::Results { results } => results,
            Self::Items(items) => items,
        }
    }
}

/// Body of the recommendations endpoint.
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct RecommendationsResponse {
    /// Recommended postings, best first.
    #[serde(default)]
    pub recommendations: Vec<JobPosting>,
}

/// Field name to messages map returned on validation failures.
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Decoded error body.
///
/// The backend answers errors with `{"error": "..."}`, `{"detail": "..."}` or
/// a map of field names to message lists.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorBody {
    /// Top-level `error` message.
    pub error: Option<String>,
    /// Top-level `detail` message.
    pub detail: Option<String>,
    /// Per-field validation messages.
    pub fields: FieldErrors,
}

impl ErrorBody {
    /// Parse a raw response body; non-JSON or non-object bodies yield `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        let Value::Object(map) = serde_json::from_str::<Value>(raw).ok()? else {
            return None;
        };
        let mut body = Self::default();
        for (key, value) in map {
            match (key.as_str(), value) {
                ("error", Value::String(message)) => body.error = Some(message),
                ("detail", Value::String(message)) => body.detail = Some(message),
                (_, value) => {
                    let messages = collect_messages(&value);
                    if !messages.is_empty() {
                        body.fields.insert(key, messages);
                    }
                }
            }
        }
        Some(body)
    }

    /// `error` when present, else `detail`.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.error.as_deref().or(self.detail.as_deref())
    }

    /// Every field message joined with spaces, in field order.
    #[must_use]
    pub fn joined_field_messages(&self) -> String {
        self.fields
            .values()
            .flatten()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

fn collect_messages(value: &Value) -> Vec<String> {
    match value {
        Value::String(message) => vec![message.clone()],
        Value::Array(items) => items.iter().flat_map(collect_messages).collect(),
        _ => Vec::new(),
    }
}

/// Layout used by the resume generator.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ResumeTemplate {
    /// Modern clean layout.
    #[default]
    Modern,
    /// Traditional corporate layout.
    Professional,
    /// Design-forward layout.
    Creative,
}

impl ResumeTemplate {
    /// Every template in display order.
    pub const ALL: [Self; 3] = [Self::Modern, Self::Professional, Self::Creative];

    /// Wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Modern => "modern",
            Self::Professional => "professional",
            Self::Creative => "creative",
        }
    }

    /// Display title.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Modern => "Modern Clean",
            Self::Professional => "Corporate Professional",
            Self::Creative => "Creative Design",
        }
    }
}

/// Header block of a generated resume.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PersonalInfo {
    /// Full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Phone number.
    pub phone: String,
    /// Location.
    pub location: String,
    /// Headline.
    pub title: String,
    /// Summary paragraph.
    pub summary: String,
    /// `LinkedIn` profile URL.
    pub linkedin: String,
    /// GitHub profile URL.
    pub github: String,
    /// Portfolio URL.
    pub portfolio: String,
}

/// Education entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct EducationEntry {
    /// School name.
    pub institution: String,
    /// Degree.
    pub degree: String,
    /// Field of study.
    pub field: String,
    /// Graduation year.
    pub graduation_year: String,
    /// Grade point average.
    pub gpa: String,
    /// Location.
    pub location: String,
    /// Notes.
    pub description: String,
}

/// Work experience entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ExperienceEntry {
    /// Employer.
    pub company: String,
    /// Role held.
    pub position: String,
    /// Start date as typed.
    pub start_date: String,
    /// End date as typed.
    pub end_date: String,
    /// Location.
    pub location: String,
    /// Responsibilities.
    pub description: String,
    /// Still in this role.
    pub current: bool,
}

/// Skill entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SkillEntry {
    /// Skill name.
    pub name: String,
    /// Proficiency label.
    pub level: String,
}

impl Default for SkillEntry {
    fn default() -> Self {
        Self {
            name: String::new(),
            level: "Intermediate".to_string(),
        }
    }
}

/// Project entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ProjectEntry {
    /// Project name.
    pub name: String,
    /// Summary.
    pub description: String,
    /// Technologies used.
    pub technologies: Vec<String>,
    /// Source URL.
    pub github_url: String,
    /// Deployed URL.
    pub live_url: String,
}

/// Structured resume content.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResumeContent {
    /// Header block.
    pub personal_info: PersonalInfo,
    /// Education history.
    pub education: Vec<EducationEntry>,
    /// Work history.
    pub experience: Vec<ExperienceEntry>,
    /// Skills.
    pub skills: Vec<SkillEntry>,
    /// Projects.
    pub projects: Vec<ProjectEntry>,
}

impl Default for ResumeContent {
    fn default() -> Self {
        Self {
            personal_info: PersonalInfo::default(),
            education: vec![EducationEntry::default()],
            experience: vec![ExperienceEntry::default()],
            skills: vec![SkillEntry::default()],
            projects: vec![ProjectEntry::default()],
        }
    }
}

/// Body of the resume generation request.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct GenerateResumeRequest {
    /// Resume sections, flattened into the top-level object.
    #[serde(flatten)]
    pub content: ResumeContent,
    /// Selected layout.
    pub template: ResumeTemplate,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn job_json(id: i64, title: &str) -> Value {
        json!({
            "id": id,
            "title": title,
            "description": "<p>Build things</p>",
            "requirements": "<p>Rust</p>",
            "location": "Remote",
            "salary": "85000.00",
            "created_by": {"id": 7, "username": "acme", "role": "employer", "company": "Acme"},
            "created_at": "2024-03-01T10:00:00Z",
            "is_active": true,
            "application_count": 2
        })
    }

    #[test]
    fn paginated_jobs_keep_server_metadata() {
        let payload = json!({
            "jobs": [job_json(1, "Backend Dev")],
            "current_page": 2,
            "total_pages": 5,
            "total_jobs": 41,
            "has_next": true,
            "has_previous": true
        });
        let page = serde_json::from_value::<JobListResponse>(payload)
            .expect("decode")
            .into_page();
        assert_eq!(page.jobs.len(), 1);
        assert_eq!(page.meta.current_page, 2);
        assert_eq!(page.meta.total_pages, 5);
        assert_eq!(page.meta.total_items, 41);
        assert!(page.meta.has_next && page.meta.has_previous);
    }

    #[test]
    fn bare_array_normalizes_to_single_page() {
        let payload = json!([job_json(1, "A"), job_json(2, "B"), job_json(3, "C")]);
        let page = serde_json::from_value::<JobListResponse>(payload)
            .expect("decode")
            .into_page();
        let ids: Vec<i64> = page.jobs.iter().map(|job| job.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(page.meta.current_page, 1);
        assert_eq!(page.meta.total_pages, 1);
        assert_eq!(page.meta.total_items, 3);
        assert!(!page.meta.has_next);
    }

    #[test]
    fn results_wrapper_normalizes_like_array() {
        let payload = json!({"results": [job_json(4, "D")]});
        let jobs = serde_json::from_value::<JobListResponse>(payload)
            .expect("decode")
            .into_jobs();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].id, 4);

        let apps: ListPayload<i64> = serde_json::from_value(json!({"results": [1, 2]})).expect("decode");
        assert_eq!(apps.into_items(), vec![1, 2]);
        let apps: ListPayload<i64> = serde_json::from_value(json!([3])).expect("decode");
        assert_eq!(apps.into_items(), vec![3]);
    }

    #[test]
    fn salary_accepts_strings_numbers_and_null() {
        let mut raw = job_json(1, "A");
        let job: JobPosting = serde_json::from_value(raw.clone()).expect("decode");
        assert_eq!(job.salary, Some(85_000.0));

        raw["salary"] = json!(120_000);
        let job: JobPosting = serde_json::from_value(raw.clone()).expect("decode");
        assert_eq!(job.salary, Some(120_000.0));

        raw["salary"] = Value::Null;
        let job: JobPosting = serde_json::from_value(raw.clone()).expect("decode");
        assert_eq!(job.salary, None);

        raw["salary"] = json!("lots");
        assert!(serde_json::from_value::<JobPosting>(raw).is_err());
    }

    #[test]
    fn ownership_uses_owner_id() {
        let job: JobPosting = serde_json::from_value(job_json(1, "A")).expect("decode");
        let owner: Identity =
            serde_json::from_value(json!({"id": 7, "username": "acme"})).expect("decode");
        let other: Identity =
            serde_json::from_value(json!({"id": 8, "username": "else"})).expect("decode");
        assert!(job.is_owned_by(&owner));
        assert!(!job.is_owned_by(&other));
        assert_eq!(job.company(), Some("Acme"));
    }

    #[test]
    fn error_body_prefers_error_then_detail() {
        let body = ErrorBody::parse(r#"{"error":"Bad credentials","detail":"ignored"}"#)
            .expect("object");
        assert_eq!(body.message(), Some("Bad credentials"));

        let body = ErrorBody::parse(r#"{"detail":"Not found."}"#).expect("object");
        assert_eq!(body.message(), Some("Not found."));

        assert!(ErrorBody::parse("<html>oops</html>").is_none());
        assert!(ErrorBody::parse("[1,2]").is_none());
    }

    #[test]
    fn error_body_collects_field_messages() {
        let body = ErrorBody::parse(
            r#"{"email":["Enter a valid email address."],"username":"Taken","password":["Too short.","Too common."]}"#,
        )
        .expect("object");
        assert_eq!(body.message(), None);
        assert_eq!(body.fields["password"].len(), 2);
        assert_eq!(
            body.joined_field_messages(),
            "Enter a valid email address. Too short. Too common. Taken"
        );
    }

    #[test]
    fn registration_skips_empty_fields() {
        let request = RegistrationRequest {
            username: "dev".into(),
            email: "dev@example.com".into(),
            password: "secret123".into(),
            password_confirmation: "secret123".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            role: Role::Developer,
            phone: String::new(),
            company: String::new(),
        };
        let keys: Vec<&str> = request.form_fields().into_iter().map(|(key, _)| key).collect();
        assert!(keys.contains(&"role"));
        assert!(!keys.contains(&"phone"));
        assert!(!keys.contains(&"company"));
    }

    #[test]
    fn generate_request_flattens_content() {
        let request = GenerateResumeRequest {
            content: ResumeContent::default(),
            template: ResumeTemplate::Creative,
        };
        let value = serde_json::to_value(&request).expect("encode");
        assert_eq!(value["template"], "creative");
        assert!(value["personal_info"].is_object());
        assert_eq!(value["skills"][0]["level"], "Intermediate");
    }

    #[test]
    fn status_round_trips_through_wire_names() {
        for status in ApplicationStatus::ALL {
            assert_eq!(ApplicationStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ApplicationStatus::parse("pending"), None);
        assert_eq!(Role::parse("employer"), Some(Role::Employer));
    }
}
