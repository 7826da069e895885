//! Recommendation panel state.

use crate::core::errors::ApiError;
use jobboard_api_models::JobPosting;

/// Shown when recommendations cannot be loaded.
pub const RECOMMENDATIONS_FAILED_MESSAGE: &str = "Failed to load recommendations";

/// Recommended postings with load status.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecommendationsState {
    /// Postings, best match first.
    pub jobs: Vec<JobPosting>,
    /// Fetch in flight.
    pub loading: bool,
    /// Failure message; offers a retry.
    pub error: Option<String>,
}

impl RecommendationsState {
    /// Mark a (re)fetch as started.
    pub fn start(&mut self) {
        self.loading = true;
    }

    /// Record the fetch result; returns the error when the session policy must run.
    pub fn finish(&mut self, result: Result<Vec<JobPosting>, ApiError>) -> Option<ApiError> {
        self.loading = false;
        match result {
            Ok(jobs) => {
                self.jobs = jobs;
                self.error = None;
                None
            }
            Err(err) => {
                self.jobs.clear();
                self.error = Some(RECOMMENDATIONS_FAILED_MESSAGE.to_string());
                err.is_unauthorized().then_some(err)
            }
        }
    }

    /// Nothing to show and no failure.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !self.loading && self.error.is_none() && self.jobs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failure_shows_message_and_empties_list() {
        let mut state = RecommendationsState::default();
        state.start();
        assert!(state.loading);
        assert_eq!(state.finish(Err(ApiError::Network("offline".into()))), None);
        assert_eq!(state.error.as_deref(), Some(RECOMMENDATIONS_FAILED_MESSAGE));
        assert!(!state.is_empty());

        state.start();
        assert_eq!(state.finish(Ok(Vec::new())), None);
        assert!(state.error.is_none());
        assert!(state.is_empty());
    }

    #[test]
    fn unauthorized_is_handed_back() {
        let mut state = RecommendationsState::default();
        let err = state.finish(Err(ApiError::Unauthorized { message: None }));
        assert!(err.is_some_and(|err| err.is_unauthorized()));
    }
}
