//! Applications dashboard state.
//!
//! # Design
//! - `filtered` is always derived from `all`; never edit it directly.
//! - Any re-derivation resets local paging to the first page.
//! - Rows being updated are tracked as a set.

use crate::config::UiConfig;
use crate::core::errors::ApiError;
use crate::core::logic::{local_page_count, local_page_slice};
use crate::features::applications::logic::{
    STATUS_FAILED_MESSAGE, STATUS_FORBIDDEN_MESSAGE, STATUS_UPDATED_MESSAGE, StatusFilter,
    filter_applications,
};
use crate::models::Notice;
use jobboard_api_models::Application;
use std::collections::BTreeSet;

/// Result of a finished status update.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StatusUpdateOutcome {
    /// Server record replaced the local one.
    Updated,
    /// Not the owner of the posting.
    Forbidden,
    /// Session expired; the global policy applies.
    Unauthorized,
    /// Any other failure; local data untouched.
    Failed,
}

impl StatusUpdateOutcome {
    /// Toast for this outcome; `None` when the session policy takes over.
    #[must_use]
    pub fn notice(&self) -> Option<Notice> {
        match self {
            Self::Updated => Some(Notice::success(STATUS_UPDATED_MESSAGE)),
            Self::Forbidden => Some(Notice::error(STATUS_FORBIDDEN_MESSAGE)),
            Self::Failed => Some(Notice::error(STATUS_FAILED_MESSAGE)),
            Self::Unauthorized => None,
        }
    }
}

/// Fetched applications with local search, status filter and paging.
#[derive(Clone, Debug, PartialEq)]
pub struct ApplicationsState {
    /// Every fetched application in server order.
    pub all: Vec<Application>,
    /// Applications passing the current filters.
    pub filtered: Vec<Application>,
    /// Search term.
    pub search: String,
    /// Status selector.
    pub status_filter: StatusFilter,
    /// 1-based local page.
    pub page: usize,
    /// Rows per local page.
    pub per_page: usize,
    /// Applications with a status update in flight.
    pub updating: BTreeSet<i64>,
    /// Application whose details are expanded.
    pub expanded: Option<i64>,
}

impl ApplicationsState {
    /// Empty state paged per `config`.
    #[must_use]
    pub fn new(config: &UiConfig) -> Self {
        Self {
            all: Vec::new(),
            filtered: Vec::new(),
            search: String::new(),
            status_filter: StatusFilter::All,
            page: 1,
            per_page: config.dashboard_page_size,
            updating: BTreeSet::new(),
            expanded: None,
        }
    }

    /// Replace the source set.
    pub fn set_all(&mut self, applications: Vec<Application>) {
        self.all = applications;
        self.rederive();
    }

    /// Change the search term.
    pub fn set_search(&mut self, term: &str) {
        self.search = term.to_string();
        self.rederive();
    }

    /// Change the status selector.
    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.status_filter = filter;
        self.rederive();
    }

    /// Number of local pages.
    #[must_use]
    pub const fn page_count(&self) -> usize {
        local_page_count(self.filtered.len(), self.per_page)
    }

    /// Rows of the current page.
    #[must_use]
    pub fn visible(&self) -> &[Application] {
        local_page_slice(&self.filtered, self.page, self.per_page)
    }

    /// Move to `page`; ignored outside `[1, page_count]`.
    pub fn go_to_page(&mut self, page: usize) -> bool {
        if page < 1 || page > self.page_count() {
            return false;
        }
        self.page = page;
        true
    }

    /// Expand `id`, or collapse it when already expanded.
    pub fn toggle_expanded(&mut self, id: i64) {
        self.expanded = if self.expanded == Some(id) { None } else { Some(id) };
    }

    /// Whether `id` has an update in flight.
    #[must_use]
    pub fn is_updating(&self, id: i64) -> bool {
        self.updating.contains(&id)
    }

    /// Mark `id` as updating; returns `false` when it already is.
    pub fn begin_status_update(&mut self, id: i64) -> bool {
        self.updating.insert(id)
    }

    /// Finish the update of `id`, clearing its marker on every path.
    pub fn finish_status_update(
        &mut self,
        id: i64,
        result: Result<Application, ApiError>,
    ) -> StatusUpdateOutcome {
        self.updating.remove(&id);
        match result {
            Ok(updated) => {
                if let Some(slot) = self.all.iter_mut().find(|application| application.id == id) {
                    *slot = updated;
                }
                self.rederive();
                StatusUpdateOutcome::Updated
            }
            Err(ApiError::Unauthorized { .. }) => StatusUpdateOutcome::Unauthorized,
            Err(ApiError::Forbidden { .. }) => StatusUpdateOutcome::Forbidden,
            Err(_) => StatusUpdateOutcome::Failed,
        }
    }

    /// Application by id.
    #[must_use]
    pub fn get(&self, id: i64) -> Option<&Application> {
        self.all.iter().find(|application| application.id == id)
    }

    fn rederive(&mut self) {
        self.filtered = filter_applications(&self.all, &self.search, self.status_filter);
        self.page = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobboard_api_models::ApplicationStatus;

    fn application(id: i64, status: &str, title: &str) -> Application {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "job": {"id": 1, "title": title, "created_at": "2024-05-01T12:00:00Z"},
            "applicant": {"id": 2, "username": "dev", "first_name": "Dana", "last_name": "Reyes"},
            "status": status,
            "applied_at": "2024-05-02T08:30:00Z"
        }))
        .expect("application fixture")
    }

    fn state_with(count: i64) -> ApplicationsState {
        let mut state = ApplicationsState::new(&UiConfig::default());
        state.set_all((1..=count).map(|id| application(id, "applied", "Role")).collect());
        state
    }

    #[test]
    fn filter_changes_reset_to_first_page() {
        let mut state = state_with(12);
        assert_eq!(state.page_count(), 3);
        assert!(state.go_to_page(3));
        assert_eq!(state.visible().len(), 2);
        state.set_search("role");
        assert_eq!(state.page, 1);
        assert!(state.go_to_page(2));
        state.set_status_filter(StatusFilter::Only(ApplicationStatus::Hired));
        assert_eq!(state.page, 1);
        assert!(state.filtered.is_empty());
    }

    #[test]
    fn local_navigation_out_of_range_is_ignored() {
        let mut state = state_with(6);
        assert!(!state.go_to_page(0));
        assert!(!state.go_to_page(3));
        assert_eq!(state.page, 1);
    }

    #[test]
    fn successful_update_replaces_record_with_server_value() {
        let mut state = state_with(2);
        assert!(state.begin_status_update(1));
        assert!(state.is_updating(1));
        let outcome = state.finish_status_update(1, Ok(application(1, "shortlisted", "Role")));
        assert_eq!(outcome, StatusUpdateOutcome::Updated);
        assert_eq!(state.get(1).map(|a| a.status), Some(ApplicationStatus::Shortlisted));
        assert!(!state.is_updating(1));
        assert_eq!(
            outcome.notice().map(|notice| notice.message),
            Some(STATUS_UPDATED_MESSAGE.to_string())
        );
    }

    #[test]
    fn failures_clear_marker_and_keep_prior_data() {
        let mut state = state_with(2);
        let before = state.all.clone();
        state.begin_status_update(2);
        let forbidden = state.finish_status_update(2, Err(ApiError::Forbidden { message: None }));
        assert_eq!(forbidden, StatusUpdateOutcome::Forbidden);
        assert_eq!(
            forbidden.notice().map(|notice| notice.message),
            Some(STATUS_FORBIDDEN_MESSAGE.to_string())
        );
        state.begin_status_update(2);
        let failed = state.finish_status_update(2, Err(ApiError::Network("offline".into())));
        assert_eq!(failed, StatusUpdateOutcome::Failed);
        assert!(state.updating.is_empty());
        assert_eq!(state.all, before);
    }

    #[test]
    fn updates_on_different_rows_run_side_by_side() {
        let mut state = state_with(3);
        assert!(state.begin_status_update(1));
        assert!(state.begin_status_update(2));
        assert!(!state.begin_status_update(1));
        state.finish_status_update(2, Ok(application(2, "hired", "Role")));
        assert!(state.is_updating(1));
        assert_eq!(
            state.finish_status_update(1, Err(ApiError::Unauthorized { message: None })).notice(),
            None
        );
    }
}
