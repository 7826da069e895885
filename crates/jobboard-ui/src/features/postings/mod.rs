//! Employer job postings: create, edit, delete and the owner's list.
//!
//! # Design
//! - Form inputs stay strings until a validated payload is built.
//! - Deletes always pass through the confirm flow.

pub mod logic;
pub mod state;
#[cfg(target_arch = "wasm32")]
pub(crate) mod view;
