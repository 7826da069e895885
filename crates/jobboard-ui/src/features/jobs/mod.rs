//! Job search feature wiring.
//!
//! # Design
//! - Criteria editing, debounce and page fencing live in DOM-free state.
//! - Views issue the fetches a state transition hands back and feed results in.

pub mod logic;
pub mod state;
#[cfg(target_arch = "wasm32")]
pub(crate) mod view;
