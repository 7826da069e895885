//! Core, DOM-free primitives and helpers for the web client.
pub mod auth;
pub mod confirm;
pub mod debounce;
pub mod errors;
pub mod logic;
pub mod store;
