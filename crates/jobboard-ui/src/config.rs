//! Build-time configuration for the web client.
//!
//! # Design
//! - Keep every tunable in one struct with documented defaults.
//! - Resolve the backend address at compile time; the bundle is static.

/// Backend address used when `JOBBOARD_BACKEND_URL` is unset at build time.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
/// Jobs requested per server page.
pub const DEFAULT_PAGE_SIZE: u32 = 9;
/// Rows per page on dashboard lists.
pub const DEFAULT_DASHBOARD_PAGE_SIZE: usize = 5;
/// Quiet period before search and filter edits produce a query.
pub const DEFAULT_DEBOUNCE_MS: u32 = 500;
/// Lifetime of the session cookies.
pub const DEFAULT_SESSION_LIFETIME_DAYS: u32 = 7;
/// Largest resume accepted for upload.
pub const DEFAULT_MAX_RESUME_BYTES: u64 = 5 * 1024 * 1024;

/// Resolved client settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UiConfig {
    /// Backend origin without a trailing slash.
    pub backend_url: String,
    /// Jobs requested per server page.
    pub page_size: u32,
    /// Rows per page on dashboard lists.
    pub dashboard_page_size: usize,
    /// Debounce quiet period in milliseconds.
    pub debounce_ms: u32,
    /// Session cookie lifetime in days.
    pub session_lifetime_days: u32,
    /// Resume size cap in bytes.
    pub max_resume_bytes: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            dashboard_page_size: DEFAULT_DASHBOARD_PAGE_SIZE,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            session_lifetime_days: DEFAULT_SESSION_LIFETIME_DAYS,
            max_resume_bytes: DEFAULT_MAX_RESUME_BYTES,
        }
    }
}

impl UiConfig {
    /// Configuration baked in by the build environment.
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::with_backend(option_env!("JOBBOARD_BACKEND_URL"))
    }

    /// Defaults with an optional backend override; blank overrides are ignored.
    #[must_use]
    pub fn with_backend(backend: Option<&str>) -> Self {
        let backend_url = backend
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map_or(DEFAULT_BACKEND_URL, |value| value.trim_end_matches('/'))
            .to_string();
        Self {
            backend_url,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_override_is_normalized() {
        let config = UiConfig::with_backend(Some(" https://api.example.com/ "));
        assert_eq!(config.backend_url, "https://api.example.com");
        assert_eq!(config.page_size, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn blank_override_falls_back_to_default() {
        assert_eq!(UiConfig::with_backend(Some("  ")).backend_url, DEFAULT_BACKEND_URL);
        assert_eq!(UiConfig::with_backend(None).backend_url, DEFAULT_BACKEND_URL);
    }
}
