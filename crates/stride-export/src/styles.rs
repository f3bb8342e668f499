use serde::{Deserialize, Serialize};

use stride_rubric::classify::NEUTRAL_COLOR;

/// Page and typography settings injected into report templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportStyles {
    /// CSS font stack for body text.
    pub body_font: String,

    /// CSS font stack for headings.
    pub heading_font: String,

    /// Header band and section title color.
    pub accent_color: String,

    /// Value color for fields without a classification.
    pub neutral_color: String,

    /// CSS `@page` size keyword (e.g. "A4", "Letter").
    pub page_size: String,

    /// Page margins in millimetres.
    pub margin_top_mm: u32,
    pub margin_right_mm: u32,
    pub margin_bottom_mm: u32,
    pub margin_left_mm: u32,
}

impl Default for ReportStyles {
    fn default() -> Self {
        Self {
            body_font: "'Helvetica Neue', Arial, sans-serif".to_string(),
            heading_font: "'Helvetica Neue', Arial, sans-serif".to_string(),
            accent_color: "#1e3a8a".to_string(),
            neutral_color: NEUTRAL_COLOR.to_string(),
            page_size: "A4".to_string(),
            margin_top_mm: 20,
            margin_right_mm: 15,
            margin_bottom_mm: 20,
            margin_left_mm: 15,
        }
    }
}
