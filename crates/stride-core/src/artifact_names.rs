//! Report artifact naming conventions.
//!
//! Pure string functions, no filesystem access. These define the canonical
//! names of generated files in the reports directory.

pub const REPORT_EXTENSION: &str = ".pdf";

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// File name for a freshly generated report.
///
/// The RFC 3339 generation time has `:` and `.` replaced with `-` so the
/// result is safe on every filesystem.
pub fn report_filename(assessment_id: &str, session_id: &str, generated_at: jiff::Timestamp) -> String {
    let stamp: String = generated_at
        .to_string()
        .chars()
        .map(|c| if c == ':' || c == '.' { '-' } else { c })
        .collect();
    format!("{assessment_id}_{session_id}_{stamp}{REPORT_EXTENSION}")
}

/// Whether a client-supplied name may address a report file.
///
/// Accepts ASCII letters, digits, `_`, `-` and `.`, ending in `.pdf`.
/// Anything else (path separators in particular) is rejected.
pub fn is_valid_report_filename(filename: &str) -> bool {
    let Some(stem) = filename.strip_suffix(REPORT_EXTENSION) else {
        return false;
    };
    !stem.is_empty()
        && stem
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
}
