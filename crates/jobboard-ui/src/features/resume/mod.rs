//! Resume upload, download and generation.
//!
//! # Design
//! - Files are validated locally before any request is made.
//! - Destructive actions go through the shared confirm flow.

pub mod logic;
pub mod state;
#[cfg(target_arch = "wasm32")]
pub(crate) mod view;
