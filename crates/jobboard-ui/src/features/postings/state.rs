//! Posting form and owner list state.
//!
//! # Design
//! - Editing a field clears that field's message only.
//! - The owner list is paged locally and refetched after a delete.

use crate::config::UiConfig;
use crate::core::confirm::ConfirmFlow;
use crate::core::errors::ApiError;
use crate::core::logic::{local_page_count, local_page_slice};
use crate::features::postings::logic::{
    JOB_DELETED_MESSAGE, JobField, JobForm, PostingCall, PostingFeedback, owned_active_jobs,
    posting_feedback,
};
use crate::models::Notice;
use jobboard_api_models::{FieldErrors, Identity, JobPayload, JobPosting};

/// Create/edit form with inline messages.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct JobFormState {
    /// Values as typed.
    pub form: JobForm,
    /// Inline messages keyed by field.
    pub errors: FieldErrors,
    /// Save in flight.
    pub saving: bool,
}

impl JobFormState {
    /// Form loaded from an existing posting.
    #[must_use]
    pub fn editing(job: &JobPosting) -> Self {
        Self {
            form: JobForm::from_posting(job),
            ..Self::default()
        }
    }

    /// Update a field and drop its message.
    pub fn set(&mut self, field: JobField, value: &str) {
        self.form.set(field, value);
        self.errors.remove(field.key());
    }

    /// First message for `field`.
    #[must_use]
    pub fn error(&self, field: JobField) -> Option<&str> {
        self.errors
            .get(field.key())
            .and_then(|messages| messages.first())
            .map(String::as_str)
    }

    /// Validate and mark the save in flight; `None` when invalid or already saving.
    pub fn submit(&mut self) -> Option<JobPayload> {
        if self.saving {
            return None;
        }
        self.errors.clear();
        match self.form.validate() {
            Ok(payload) => {
                self.saving = true;
                Some(payload)
            }
            Err(errors) => {
                self.errors = errors;
                None
            }
        }
    }

    /// Record a failed save, returning what still needs surfacing.
    pub fn fail(&mut self, call: PostingCall, err: &ApiError) -> PostingFeedback {
        self.saving = false;
        let feedback = posting_feedback(call, err);
        if let PostingFeedback::Fields(fields) = &feedback {
            self.errors.clone_from(fields);
        }
        feedback
    }

    /// Record a successful save.
    pub fn succeed(&mut self) {
        self.saving = false;
        self.errors.clear();
    }
}

/// "My Job Posts" list on the employer dashboard.
#[derive(Clone, Debug, PartialEq)]
pub struct MyJobsState {
    /// Every posting the server returned.
    pub all: Vec<JobPosting>,
    /// Open postings owned by the viewer.
    pub mine: Vec<JobPosting>,
    /// 1-based local page.
    pub page: usize,
    /// Rows per page.
    pub per_page: usize,
    /// Delete confirmation.
    pub delete: ConfirmFlow<i64>,
}

impl MyJobsState {
    /// Empty list paged per `config`.
    #[must_use]
    pub fn new(config: &UiConfig) -> Self {
        Self {
            all: Vec::new(),
            mine: Vec::new(),
            page: 1,
            per_page: config.dashboard_page_size,
            delete: ConfirmFlow::default(),
        }
    }

    /// Replace the fetched postings and re-derive the owner's list.
    pub fn set_jobs(&mut self, jobs: Vec<JobPosting>, viewer: &Identity) {
        self.mine = owned_active_jobs(&jobs, viewer);
        self.all = jobs;
        self.page = self.page.min(self.page_count()).max(1);
    }

    /// Open postings owned by the viewer.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.mine.len()
    }

    /// Number of local pages.
    #[must_use]
    pub const fn page_count(&self) -> usize {
        local_page_count(self.mine.len(), self.per_page)
    }

    /// Rows of the current page.
    #[must_use]
    pub fn visible(&self) -> &[JobPosting] {
        local_page_slice(&self.mine, self.page, self.per_page)
    }

    /// Move to `page`; ignored outside `[1, page_count]`.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page < 1 || page > self.page_count() {
            return false;
        }
        self.page = page;
        true
    }

    /// Record a delete result; the caller refetches on success.
    pub fn finish_delete(&mut self, result: Result<(), ApiError>) -> PostingFeedback {
        self.delete.finish();
        match result {
            Ok(()) => PostingFeedback::Notice(Notice::success(JOB_DELETED_MESSAGE)),
            Err(err) => posting_feedback(PostingCall::Delete, &err),
        }
    }
}
