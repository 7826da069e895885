//! Applications feature: review workflow, local filtering and submission.
//!
//! # Design
//! - The fetched set is filtered and paged locally; the server is asked once.
//! - Status updates are tracked per row so one update never blocks another.

pub mod logic;
pub mod state;
#[cfg(target_arch = "wasm32")]
pub(crate) mod view;
