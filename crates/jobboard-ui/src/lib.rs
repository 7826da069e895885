#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::multiple_crate_versions)]
//! Job board web client.
//! DOM-free controllers, session handling and API error mapping, plus the Yew front-end
//! entrypoint on wasm32.

pub mod config;
pub mod core;
pub mod features;
pub mod models;

#[cfg(target_arch = "wasm32")]
pub mod services;

#[cfg(target_arch = "wasm32")]
mod app;
#[cfg(target_arch = "wasm32")]
mod components;

#[cfg(target_arch = "wasm32")]
pub use app::run_app;

#[cfg(test)]
mod tests {
    use crate::config::UiConfig;
    use crate::features::jobs::logic::{JobQuery, SortKey};
    use crate::features::jobs::state::JobListState;

    #[test]
    fn default_config_drives_first_query() {
        let mut state = JobListState::new(&UiConfig::default());
        let ticket = state.start();
        assert_eq!(ticket.query.page, 1);
        assert_eq!(ticket.query.page_size, 9);
        assert_eq!(ticket.query.sort, SortKey::Newest);
        assert_eq!(
            ticket.query.to_path(),
            JobQuery {
                criteria: Default::default(),
                sort: SortKey::Newest,
                page: 1,
                page_size: 9,
            }
            .to_path()
        );
    }
}
