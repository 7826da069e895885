//! Upload and resume builder state.
//!
//! # Design
//! - One upload at a time; a second start while busy is refused.
//! - Builder sections always keep at least one entry.

use crate::core::errors::ApiError;
use crate::features::resume::logic::{
    RESUME_UPLOAD_FAILED_MESSAGE, RESUME_UPLOADED_MESSAGE, ResumeFileError, validate_resume,
};
use crate::models::Notice;
use jobboard_api_models::{
    EducationEntry, ExperienceEntry, GenerateResumeRequest, Identity, ProjectEntry, ResumeContent,
    ResumeTemplate, SkillEntry,
};

/// Profile resume upload state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UploadState {
    /// Upload in flight.
    pub busy: bool,
    /// Inline message under the picker.
    pub error: Option<String>,
}

/// How a finished upload ended.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadOutcome {
    /// Stored; the identity must be refreshed.
    Uploaded,
    /// Session expired; the global policy applies.
    SessionExpired,
    /// Rejected or failed with the shown message.
    Failed(String),
}

impl UploadOutcome {
    /// Toast for this outcome.
    #[must_use]
    pub fn notice(&self) -> Option<Notice> {
        match self {
            Self::Uploaded => Some(Notice::success(RESUME_UPLOADED_MESSAGE)),
            Self::Failed(message) => Some(Notice::error(message.clone())),
            Self::SessionExpired => None,
        }
    }
}

impl UploadState {
    /// Validate a picked file and start the upload.
    ///
    /// # Errors
    /// Returns the validation failure, which is also kept as the inline message.
    /// Nothing is started while another upload is in flight.
    pub fn begin(&mut self, name: &str, size: u64, max_bytes: u64) -> Result<bool, ResumeFileError> {
        self.error = None;
        if let Err(err) = validate_resume(name, size, max_bytes) {
            self.error = Some(err.to_string());
            return Err(err);
        }
        if self.busy {
            return Ok(false);
        }
        self.busy = true;
        Ok(true)
    }

    /// Record the upload result; the busy flag is cleared on every path.
    pub fn finish(&mut self, result: Result<(), ApiError>) -> UploadOutcome {
        self.busy = false;
        match result {
            Ok(()) => UploadOutcome::Uploaded,
            Err(ApiError::Unauthorized { .. }) => UploadOutcome::SessionExpired,
            Err(err) => {
                let message = err.message_or(RESUME_UPLOAD_FAILED_MESSAGE);
                self.error = Some(message.clone());
                UploadOutcome::Failed(message)
            }
        }
    }
}

/// Optional file picked for a single submission, already validated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResumeSelection<F> {
    /// Picked file, if any.
    pub file: Option<F>,
    /// Inline message under the picker.
    pub error: Option<String>,
}

impl<F> Default for ResumeSelection<F> {
    fn default() -> Self {
        Self {
            file: None,
            error: None,
        }
    }
}

impl<F> ResumeSelection<F> {
    /// Validate and keep `file`; a rejected file clears the previous pick.
    pub fn pick(&mut self, file: F, name: &str, size: u64, max_bytes: u64) -> bool {
        match validate_resume(name, size, max_bytes) {
            Ok(()) => {
                self.file = Some(file);
                self.error = None;
                true
            }
            Err(err) => {
                self.file = None;
                self.error = Some(err.to_string());
                false
            }
        }
    }

    /// Drop the pick and its message.
    pub fn clear(&mut self) {
        self.file = None;
        self.error = None;
    }
}

/// Repeatable builder section.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ResumeSection {
    /// Education entries.
    Education,
    /// Work history entries.
    Experience,
    /// Skills.
    Skills,
    /// Projects.
    Projects,
}

impl ResumeSection {
    /// Every repeatable section in tab order.
    pub const ALL: [Self; 4] = [Self::Education, Self::Experience, Self::Skills, Self::Projects];

    /// Tab label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Education => "Education",
            Self::Experience => "Experience",
            Self::Skills => "Skills",
            Self::Projects => "Projects",
        }
    }
}

/// Resume builder form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResumeDraft {
    /// Structured content.
    pub content: ResumeContent,
    /// Chosen layout.
    pub template: ResumeTemplate,
    /// Generation in flight.
    pub generating: bool,
}

impl ResumeDraft {
    /// Draft prefilled from the signed-in profile.
    #[must_use]
    pub fn for_identity(identity: &Identity) -> Self {
        let mut draft = Self::default();
        let info = &mut draft.content.personal_info;
        if !identity.first_name.is_empty() && !identity.last_name.is_empty() {
            info.name = identity.full_name();
        }
        info.email.clone_from(&identity.email);
        info.phone = identity.phone.clone().unwrap_or_default();
        draft
    }

    /// Entries in `section`.
    #[must_use]
    pub fn len(&self, section: ResumeSection) -> usize {
        match section {
            ResumeSection::Education => self.content.education.len(),
            ResumeSection::Experience => self.content.experience.len(),
            ResumeSection::Skills => self.content.skills.len(),
            ResumeSection::Projects => self.content.projects.len(),
        }
    }

    /// Append a blank entry to `section`.
    pub fn add_item(&mut self, section: ResumeSection) {
        match section {
            ResumeSection::Education => self.content.education.push(EducationEntry::default()),
            ResumeSection::Experience => self.content.experience.push(ExperienceEntry::default()),
            ResumeSection::Skills => self.content.skills.push(SkillEntry::default()),
            ResumeSection::Projects => self.content.projects.push(ProjectEntry::default()),
        }
    }

    /// Remove entry `index`; the last entry of a section stays.
    pub fn remove_item(&mut self, section: ResumeSection, index: usize) -> bool {
        if self.len(section) <= 1 || index >= self.len(section) {
            return false;
        }
        match section {
            ResumeSection::Education => {
                self.content.education.remove(index);
            }
            ResumeSection::Experience => {
                self.content.experience.remove(index);
            }
            ResumeSection::Skills => {
                self.content.skills.remove(index);
            }
            ResumeSection::Projects => {
                self.content.projects.remove(index);
            }
        }
        true
    }

    /// Request body for the generator.
    #[must_use]
    pub fn request(&self) -> GenerateResumeRequest {
        GenerateResumeRequest {
            content: self.content.clone(),
            template: self.template,
        }
    }
}

impl ResumeDraft {
    /// Update a personal-info field by key; unknown keys are ignored.
    pub fn set_personal(&mut self, key: &str, value: &str) {
        let info = &mut self.content.personal_info;
        let slot = match key {
            "name" => &mut info.name,
            "email" => &mut info.email,
            "phone" => &mut info.phone,
            "location" => &mut info.location,
            "title" => &mut info.title,
            "summary" => &mut info.summary,
            "linkedin" => &mut info.linkedin,
            "github" => &mut info.github,
            "portfolio" => &mut info.portfolio,
            _ => return,
        };
        *slot = value.to_string();
    }

    /// Update field `key` of entry `index` in `section`; `false` when nothing matched.
    ///
    /// Project technologies are typed comma-separated; `current` takes `"true"`.
    pub fn set_entry(&mut self, section: ResumeSection, index: usize, key: &str, value: &str) -> bool {
        let text = value.to_string();
        match section {
            ResumeSection::Education => {
                let Some(entry) = self.content.education.get_mut(index) else {
                    return false;
                };
                match key {
                    "institution" => entry.institution = text,
                    "degree" => entry.degree = text,
                    "field" => entry.field = text,
                    "graduation_year" => entry.graduation_year = text,
                    "gpa" => entry.gpa = text,
                    "location" => entry.location = text,
                    "description" => entry.description = text,
                    _ => return false,
                }
            }
            ResumeSection::Experience => {
                let Some(entry) = self.content.experience.get_mut(index) else {
                    return false;
                };
                match key {
                    "company" => entry.company = text,
                    "position" => entry.position = text,
                    "start_date" => entry.start_date = text,
                    "end_date" => entry.end_date = text,
                    "location" => entry.location = text,
                    "description" => entry.description = text,
                    "current" => {
                        entry.current = value == "true";
                        if entry.current {
                            entry.end_date.clear();
                        }
                    }
                    _ => return false,
                }
            }
            ResumeSection::Skills => {
                let Some(entry) = self.content.skills.get_mut(index) else {
                    return false;
                };
                match key {
                    "name" => entry.name = text,
                    "level" => entry.level = text,
                    _ => return false,
                }
            }
            ResumeSection::Projects => {
                let Some(entry) = self.content.projects.get_mut(index) else {
                    return false;
                };
                match key {
                    "name" => entry.name = text,
                    "description" => entry.description = text,
                    "technologies" => {
                        entry.technologies = value
                            .split(',')
                            .map(str::trim)
                            .filter(|tech| !tech.is_empty())
                            .map(str::to_string)
                            .collect();
                    }
                    "github_url" => entry.github_url = text,
                    "live_url" => entry.live_url = text,
                    _ => return false,
                }
            }
        }
        true
    }

    /// Start generation; `None` while one is already running.
    pub fn start_generation(&mut self) -> Option<GenerateResumeRequest> {
        if self.generating {
            return None;
        }
        self.generating = true;
        Some(self.request())
    }

    /// Generation settled.
    pub fn finish_generation(&mut self) {
        self.generating = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MAX_RESUME_BYTES;

    const MB: u64 = 1024 * 1024;

    #[test]
    fn invalid_files_never_start_an_upload() {
        let mut upload = UploadState::default();
        assert_eq!(
            upload.begin("cv.txt", 2 * MB, DEFAULT_MAX_RESUME_BYTES),
            Err(ResumeFileError::UnsupportedFormat)
        );
        assert!(!upload.busy);
        assert_eq!(upload.error.as_deref(), Some("Resume must be PDF, DOC, or DOCX format"));
    }

    #[test]
    fn rejection_during_upload_survives_completion() {
        let mut upload = UploadState::default();
        assert_eq!(upload.begin("cv.pdf", MB, DEFAULT_MAX_RESUME_BYTES), Ok(true));
        assert_eq!(
            upload.begin("cv.pdf", 6 * MB, DEFAULT_MAX_RESUME_BYTES),
            Err(ResumeFileError::TooLarge)
        );
        assert!(upload.busy);
        assert_eq!(upload.finish(Ok(())), UploadOutcome::Uploaded);
        assert!(!upload.busy);
        assert_eq!(upload.error.as_deref(), Some("Resume must be less than 5MB"));
    }

    #[test]
    fn upload_lifecycle_clears_busy_flag() {
        let mut upload = UploadState::default();
        assert_eq!(upload.begin("cv.pdf", MB, DEFAULT_MAX_RESUME_BYTES), Ok(true));
        assert_eq!(upload.begin("cv.pdf", MB, DEFAULT_MAX_RESUME_BYTES), Ok(false));
        assert_eq!(upload.finish(Ok(())), UploadOutcome::Uploaded);
        assert!(!upload.busy);

        upload.begin("cv.doc", MB, DEFAULT_MAX_RESUME_BYTES).expect("valid");
        let outcome = upload.finish(Err(ApiError::Server { status: 500, message: None }));
        assert_eq!(outcome, UploadOutcome::Failed(RESUME_UPLOAD_FAILED_MESSAGE.into()));
        assert!(!upload.busy);

        upload.begin("cv.doc", MB, DEFAULT_MAX_RESUME_BYTES).expect("valid");
        let outcome = upload.finish(Err(ApiError::Server {
            status: 400,
            message: Some("Virus detected".into()),
        }));
        assert_eq!(outcome, UploadOutcome::Failed("Virus detected".into()));
        assert_eq!(upload.error.as_deref(), Some("Virus detected"));
    }

    #[test]
    fn rejected_pick_clears_previous_file() {
        let mut selection = ResumeSelection::default();
        assert!(selection.pick("a", "a.pdf", MB, DEFAULT_MAX_RESUME_BYTES));
        assert!(!selection.pick("b", "b.png", MB, DEFAULT_MAX_RESUME_BYTES));
        assert_eq!(selection.file, None);
        assert!(selection.error.is_some());
        selection.clear();
        assert_eq!(selection, ResumeSelection::default());
    }

    #[test]
    fn sections_keep_their_last_entry() {
        let mut draft = ResumeDraft::default();
        for section in ResumeSection::ALL {
            assert_eq!(draft.len(section), 1);
            assert!(!draft.remove_item(section, 0));
            draft.add_item(section);
            assert!(draft.remove_item(section, 0));
            assert!(!draft.remove_item(section, 5));
            assert_eq!(draft.len(section), 1);
        }
        assert_eq!(draft.content.skills[0].level, "Intermediate");
    }

    #[test]
    fn drafts_prefill_from_profile() {
        let identity: Identity = serde_json::from_value(serde_json::json!({
            "id": 1, "username": "jd", "email": "jd@example.com",
            "first_name": "Jane", "last_name": "Doe", "phone": "555"
        }))
        .expect("identity");
        let draft = ResumeDraft::for_identity(&identity);
        assert_eq!(draft.content.personal_info.name, "Jane Doe");
        assert_eq!(draft.request().template, ResumeTemplate::Modern);
    }

    #[test]
    fn entry_edits_target_one_row() {
        let mut draft = ResumeDraft::default();
        draft.add_item(ResumeSection::Projects);
        assert!(draft.set_entry(ResumeSection::Projects, 1, "technologies", "Rust, Yew , ,wasm"));
        assert_eq!(draft.content.projects[1].technologies, vec!["Rust", "Yew", "wasm"]);
        assert!(draft.content.projects[0].technologies.is_empty());
        assert!(!draft.set_entry(ResumeSection::Skills, 3, "name", "Go"));
        assert!(!draft.set_entry(ResumeSection::Skills, 0, "colour", "red"));

        draft.set_entry(ResumeSection::Experience, 0, "end_date", "2023-01");
        draft.set_entry(ResumeSection::Experience, 0, "current", "true");
        assert!(draft.content.experience[0].current);
        assert!(draft.content.experience[0].end_date.is_empty());

        draft.set_personal("title", "Engineer");
        draft.set_personal("unknown", "ignored");
        assert_eq!(draft.content.personal_info.title, "Engineer");
    }

    #[test]
    fn generation_runs_one_at_a_time() {
        let mut draft = ResumeDraft::default();
        draft.template = ResumeTemplate::Creative;
        let request = draft.start_generation().expect("first start");
        assert_eq!(request.template, ResumeTemplate::Creative);
        assert!(draft.start_generation().is_none());
        draft.finish_generation();
        assert!(draft.start_generation().is_some());
    }
}
