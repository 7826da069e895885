//! Feature slices, one per page family.
pub mod applications;
pub mod auth;
pub mod dashboard;
pub mod jobs;
pub mod postings;
pub mod recommendations;
pub mod resume;
