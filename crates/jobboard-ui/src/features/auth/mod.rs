//! Sign-in, registration and route guards.
//!
//! # Design
//! - Forms validate locally; server failures map to inline or toast feedback here.
//! - Guards decide from the store's session slice alone.

pub mod logic;
pub mod state;
#[cfg(target_arch = "wasm32")]
pub(crate) mod view;
