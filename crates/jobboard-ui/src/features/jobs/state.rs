//! Job list controller state.
//!
//! # Design
//! - Inputs edit a draft; the draft reaches the query only after the debounce settles.
//! - Sort changes bypass the debounce.
//! - Every fetch carries a sequence number; only the latest issued one may land.
//! - Transitions return a [`FetchTicket`] when the caller must hit the network.

use crate::config::UiConfig;
use crate::core::debounce::Debounce;
use crate::core::errors::ApiError;
use crate::core::logic::{PageToken, page_window};
use crate::features::jobs::logic::{FilterKey, JobCriteria, JobQuery, SortKey};
use jobboard_api_models::{JobPage, JobPosting, PageMeta};

/// Fetch the caller must perform and report back with [`JobListState::apply_response`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FetchTicket {
    /// Sequence number of this fetch.
    pub seq: u64,
    /// Query to send.
    pub query: JobQuery,
}

/// What happened to a completed fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FetchOutcome {
    /// Results replaced the list.
    Applied,
    /// A newer fetch was issued; the response was dropped.
    Stale,
    /// The fetch failed; the list was emptied and reset to page 1.
    Failed(ApiError),
}

/// Search, filter and paging state for the jobs page.
#[derive(Clone, Debug, PartialEq)]
pub struct JobListState {
    /// Criteria as currently typed.
    pub draft: JobCriteria,
    /// Criteria the last query was built from.
    pub applied: JobCriteria,
    /// Active ordering.
    pub sort: SortKey,
    /// Postings of the current page.
    pub jobs: Vec<JobPosting>,
    /// Server page metadata.
    pub meta: PageMeta,
    /// Whether the latest fetch is still outstanding.
    pub loading: bool,
    page_size: u32,
    debounce: Debounce<JobCriteria>,
    latest_seq: u64,
}

impl JobListState {
    /// Empty state sized from `config`.
    #[must_use]
    pub fn new(config: &UiConfig) -> Self {
        Self {
            draft: JobCriteria::default(),
            applied: JobCriteria::default(),
            sort: SortKey::default(),
            jobs: Vec::new(),
            meta: PageMeta::default(),
            loading: false,
            page_size: config.page_size,
            debounce: Debounce::new(u64::from(config.debounce_ms)),
            latest_seq: 0,
        }
    }

    /// Initial fetch of page 1.
    pub fn start(&mut self) -> FetchTicket {
        self.issue(1)
    }

    /// Edit the search term at `now_ms`.
    pub fn set_search(&mut self, term: &str, now_ms: u64) {
        self.draft.term = term.to_string();
        self.debounce.push(self.draft.clone(), now_ms);
    }

    /// Edit one field filter at `now_ms`.
    pub fn set_filter(&mut self, key: FilterKey, value: &str, now_ms: u64) {
        self.draft.filters.set(key, value);
        self.debounce.push(self.draft.clone(), now_ms);
    }

    /// Change ordering; refetches page 1 immediately when it differs.
    pub fn set_sort(&mut self, sort: SortKey) -> Option<FetchTicket> {
        if sort == self.sort {
            return None;
        }
        self.sort = sort;
        Some(self.issue(1))
    }

    /// Settle the debounce; returns a page-1 fetch when the criteria changed.
    pub fn poll(&mut self, now_ms: u64) -> Option<FetchTicket> {
        let settled = self.debounce.poll(now_ms)?;
        if settled == self.applied {
            return None;
        }
        self.applied = settled;
        Some(self.issue(1))
    }

    /// Milliseconds until the pending edit settles.
    #[must_use]
    pub fn debounce_remaining_ms(&self, now_ms: u64) -> Option<u64> {
        self.debounce.remaining_ms(now_ms)
    }

    /// Jump to `page`; ignored outside `[1, total_pages]`.
    pub fn go_to_page(&mut self, page: u32) -> Option<FetchTicket> {
        if page < 1 || page > self.meta.total_pages {
            return None;
        }
        Some(self.issue(page))
    }

    /// Reset term, filters and sort, then refetch page 1.
    pub fn clear_all(&mut self) -> FetchTicket {
        self.debounce.cancel();
        self.draft = JobCriteria::default();
        self.applied = JobCriteria::default();
        self.sort = SortKey::default();
        self.issue(1)
    }

    /// Feed the result of fetch `seq` back in.
    pub fn apply_response(&mut self, seq: u64, result: Result<JobPage, ApiError>) -> FetchOutcome {
        if seq != self.latest_seq {
            return FetchOutcome::Stale;
        }
        self.loading = false;
        match result {
            Ok(page) => {
                self.jobs = page.jobs;
                self.meta = page.meta;
                FetchOutcome::Applied
            }
            Err(err) => {
                self.jobs.clear();
                self.meta = PageMeta::default();
                FetchOutcome::Failed(err)
            }
        }
    }

    /// Page selector entries for the current metadata.
    #[must_use]
    pub fn page_tokens(&self) -> Vec<PageToken> {
        page_window(self.meta.current_page, self.meta.total_pages)
    }

    /// Active filters as typed, counting a present term as one.
    #[must_use]
    pub fn active_filter_count(&self) -> usize {
        self.draft.active_filter_count()
    }

    /// Sequence number of the most recent fetch.
    #[must_use]
    pub const fn latest_seq(&self) -> u64 {
        self.latest_seq
    }

    fn issue(&mut self, page: u32) -> FetchTicket {
        self.latest_seq += 1;
        self.loading = true;
        FetchTicket {
            seq: self.latest_seq,
            query: JobQuery {
                criteria: self.applied.clone(),
                sort: self.sort,
                page,
                page_size: self.page_size,
            },
        }
    }
}
