//! Role-specific dashboard: tabs and headline stats.

pub mod logic;
#[cfg(target_arch = "wasm32")]
pub(crate) mod view;
