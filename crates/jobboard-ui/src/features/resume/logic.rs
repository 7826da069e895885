//! Resume file rules and user-facing messages.

use crate::core::errors::ApiError;
use chrono::NaiveDate;
use thiserror::Error;

/// Extensions accepted for resume files (lowercase, with dot).
pub const RESUME_EXTENSIONS: [&str; 3] = [".pdf", ".doc", ".docx"];

/// Toast after a profile resume upload.
pub const RESUME_UPLOADED_MESSAGE: &str = "Resume uploaded successfully!";
/// Fallback when an upload fails without a server message.
pub const RESUME_UPLOAD_FAILED_MESSAGE: &str = "Failed to upload resume";
/// Toast after the profile resume was removed.
pub const RESUME_DELETED_MESSAGE: &str = "Resume deleted successfully!";
/// Toast when removing the profile resume failed.
pub const RESUME_DELETE_FAILED_MESSAGE: &str = "Failed to delete resume";
/// Toast when a resume download failed.
pub const RESUME_DOWNLOAD_FAILED_MESSAGE: &str = "Failed to download resume. Please try again.";

/// Toast for a failed resume download; `None` when the session has expired.
#[must_use]
pub const fn download_failure_message(err: &ApiError) -> Option<&'static str> {
    if err.is_unauthorized() {
        None
    } else {
        Some(RESUME_DOWNLOAD_FAILED_MESSAGE)
    }
}

/// Toast after a generated resume was downloaded.
pub const RESUME_GENERATED_MESSAGE: &str = "Resume generated successfully!";
/// Toast when generation failed.
pub const RESUME_GENERATE_FAILED_MESSAGE: &str = "Failed to generate resume. Please try again.";

/// Why a picked file was rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ResumeFileError {
    /// Larger than the configured cap.
    #[error("Resume must be less than 5MB")]
    TooLarge,
    /// Extension outside [`RESUME_EXTENSIONS`].
    #[error("Resume must be PDF, DOC, or DOCX format")]
    UnsupportedFormat,
}

/// Lowercased extension of `name` including the dot.
///
/// A name without a dot yields the whole name, so it never matches.
#[must_use]
pub fn file_extension(name: &str) -> String {
    let tail = name.rsplit('.').next().unwrap_or(name);
    format!(".{}", tail.to_lowercase())
}

/// Check a picked file; size is checked before the extension.
///
/// # Errors
/// Returns the first rule the file breaks.
pub fn validate_resume(name: &str, size: u64, max_bytes: u64) -> Result<(), ResumeFileError> {
    if size > max_bytes {
        return Err(ResumeFileError::TooLarge);
    }
    let extension = file_extension(name);
    if !RESUME_EXTENSIONS.contains(&extension.as_str()) {
        return Err(ResumeFileError::UnsupportedFormat);
    }
    Ok(())
}

/// Download name for a stored resume: `<base>.pdf`.
#[must_use]
pub fn download_filename(base: &str) -> String {
    let base = base.trim();
    if base.is_empty() {
        "resume.pdf".to_string()
    } else {
        format!("{base}.pdf")
    }
}

/// Download name for a generated resume: `resume_<Name>_<YYYY-MM-DD>.pdf`.
///
/// Each whitespace run in `name` becomes one underscore.
#[must_use]
pub fn generated_filename(name: &str, date: NaiveDate) -> String {
    let mut clean = String::with_capacity(name.len());
    let mut in_space = false;
    for ch in name.chars() {
        if ch.is_whitespace() {
            if !in_space {
                clean.push('_');
            }
            in_space = true;
        } else {
            clean.push(ch);
            in_space = false;
        }
    }
    format!("resume_{clean}_{}.pdf", date.format("%Y-%m-%d"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_MAX_RESUME_BYTES;

    const MB: u64 = 1024 * 1024;

    #[test]
    fn expired_session_downloads_defer_to_logout() {
        assert_eq!(
            download_failure_message(&ApiError::from_response(401, "")),
            None
        );
        assert_eq!(
            download_failure_message(&ApiError::from_response(404, "")),
            Some(RESUME_DOWNLOAD_FAILED_MESSAGE)
        );
        assert_eq!(
            download_failure_message(&ApiError::Network("offline".into())),
            Some(RESUME_DOWNLOAD_FAILED_MESSAGE)
        );
    }

    #[test]
    fn oversized_files_fail_on_size_first() {
        assert_eq!(
            validate_resume("cv.pdf", 6 * MB, DEFAULT_MAX_RESUME_BYTES),
            Err(ResumeFileError::TooLarge)
        );
        assert_eq!(
            validate_resume("cv.txt", 6 * MB, DEFAULT_MAX_RESUME_BYTES),
            Err(ResumeFileError::TooLarge)
        );
    }

    #[test]
    fn extensions_are_checked_case_insensitively() {
        assert_eq!(
            validate_resume("cv.txt", 2 * MB, DEFAULT_MAX_RESUME_BYTES),
            Err(ResumeFileError::UnsupportedFormat)
        );
        assert_eq!(validate_resume("cv.docx", 2 * MB, DEFAULT_MAX_RESUME_BYTES), Ok(()));
        assert_eq!(validate_resume("CV.PDF", 5 * MB, DEFAULT_MAX_RESUME_BYTES), Ok(()));
        assert_eq!(
            validate_resume("pdf", MB, DEFAULT_MAX_RESUME_BYTES),
            Err(ResumeFileError::UnsupportedFormat)
        );
    }

    #[test]
    fn error_messages_match_copy() {
        assert_eq!(ResumeFileError::TooLarge.to_string(), "Resume must be less than 5MB");
        assert_eq!(
            ResumeFileError::UnsupportedFormat.to_string(),
            "Resume must be PDF, DOC, or DOCX format"
        );
    }

    #[test]
    fn filenames_are_built_from_names_and_dates() {
        assert_eq!(download_filename("Jane Doe"), "Jane Doe.pdf");
        assert_eq!(download_filename("  "), "resume.pdf");
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).expect("date");
        assert_eq!(generated_filename("Jane  van Doe", date), "resume_Jane_van_Doe_2024-03-09.pdf");
    }
}
