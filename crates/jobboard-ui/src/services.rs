//! Browser services: REST client and file downloads.

pub mod api;
pub mod download;
