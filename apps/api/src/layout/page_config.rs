//! Fixed page geometry for exported question banks.
//!
//! All distances are millimetres measured from the top-left corner of the page;
//! font sizes are points. Values reproduce an A4 portrait exam sheet.

use serde::{Deserialize, Serialize};

use crate::layout::font_metrics::FontFamily;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    pub font: FontFamily,
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    /// Uniform inset from all four edges.
    pub margin_mm: f32,

    pub title_size_pt: f32,
    pub header_size_pt: f32,
    pub footer_size_pt: f32,
    pub body_size_pt: f32,
    pub metadata_size_pt: f32,

    /// Advance after the centered title line.
    pub title_advance_mm: f32,
    /// Advance after the "Subject:" line.
    pub subject_advance_mm: f32,
    /// Advance after the "Total Questions:" line.
    pub count_advance_mm: f32,
    /// Advance after the horizontal rule, before body content.
    pub rule_advance_mm: f32,
    /// Distance of the footer baseline above the bottom edge.
    pub footer_offset_mm: f32,

    /// Cursor advance per wrapped body line.
    pub line_height_mm: f32,
    /// Indent of the metadata line relative to the question text.
    pub metadata_indent_mm: f32,
    /// Advance after the metadata line, separating questions.
    pub question_spacing_mm: f32,
    /// A new question may not start once the cursor is lower than
    /// `page_height_mm - overflow_reserve_mm`.
    pub overflow_reserve_mm: f32,

    /// Gray level (0.0 = black) of the metadata line.
    pub metadata_gray: f32,
}

/// A4 portrait, 20mm margins, Helvetica.
pub fn default_page_config() -> PageConfig {
    PageConfig {
        font: FontFamily::Helvetica,
        page_width_mm: 210.0,
        page_height_mm: 297.0,
        margin_mm: 20.0,
        title_size_pt: 16.0,
        header_size_pt: 12.0,
        footer_size_pt: 10.0,
        body_size_pt: 11.0,
        metadata_size_pt: 10.0,
        title_advance_mm: 10.0,
        subject_advance_mm: 7.0,
        count_advance_mm: 10.0,
        rule_advance_mm: 10.0,
        footer_offset_mm: 10.0,
        line_height_mm: 7.0,
        metadata_indent_mm: 5.0,
        question_spacing_mm: 15.0,
        overflow_reserve_mm: 40.0,
        metadata_gray: 100.0 / 255.0,
    }
}

impl PageConfig {
    /// Width available to body text.
    pub fn printable_width_mm(&self) -> f32 {
        self.page_width_mm - 2.0 * self.margin_mm
    }

    pub fn center_x_mm(&self) -> f32 {
        self.page_width_mm / 2.0
    }

    /// Lowest baseline a body line may occupy.
    pub fn body_bottom_mm(&self) -> f32 {
        self.page_height_mm - self.margin_mm
    }

    /// Past this cursor position no new question block may begin.
    pub fn overflow_threshold_mm(&self) -> f32 {
        self.page_height_mm - self.overflow_reserve_mm
    }

    pub fn footer_baseline_mm(&self) -> f32 {
        self.page_height_mm - self.footer_offset_mm
    }
}

#[cfg(test)]
impl PageConfig {
    /// Cursor position at which body content starts on every page.
    pub fn body_top_mm(&self) -> f32 {
        self.margin_mm
            + self.title_advance_mm
            + self.subject_advance_mm
            + self.count_advance_mm
            + self.rule_advance_mm
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_page_config_sanity() {
        let config = default_page_config();
        assert_eq!(config.font, FontFamily::Helvetica);
        assert!((config.printable_width_mm() - 170.0).abs() < 1e-4);
        assert!((config.body_top_mm() - 57.0).abs() < 1e-4);
        assert!((config.overflow_threshold_mm() - 257.0).abs() < 1e-4);
        assert!((config.body_bottom_mm() - 277.0).abs() < 1e-4);
        assert!(config.footer_baseline_mm() > config.body_bottom_mm());
    }
}
