//! Layout configuration and house style

use pdf_canvas::{Color, TextOptions, A4_HEIGHT, A4_WIDTH};

/// Alias of the built-in regular face
pub const FONT_REGULAR: &str = pdf_canvas::FONT_HELVETICA;
/// Alias of the built-in bold face
pub const FONT_BOLD: &str = pdf_canvas::FONT_HELVETICA_BOLD;
/// Alias of the built-in oblique face
pub const FONT_OBLIQUE: &str = pdf_canvas::FONT_HELVETICA_OBLIQUE;
/// Alias under which the Arabic companion face registers when deployed
pub const FONT_COMPANION: &str = "companion";
/// Alias of the bold companion face
pub const FONT_COMPANION_BOLD: &str = "companion-bold";

/// Republic heading printed beside the flag
pub const REPUBLIC_TITLE: &str = "RÉPUBLIQUE DU TCHAD";
/// National motto printed under the heading
pub const REPUBLIC_MOTTO: &str = "Unité - Travail - Progrès";

/// Flag band colors, left to right
pub const FLAG_BLUE: Color = Color::rgb(0.0, 0.149, 0.392);
pub const FLAG_YELLOW: Color = Color::rgb(0.996, 0.796, 0.0);
pub const FLAG_RED: Color = Color::rgb(0.776, 0.047, 0.188);

/// Logo candidate paths, tried in order against the working directory
pub const LOGO_CANDIDATES: &[&str] = &[
    "assets/logo.png",
    "assets/logo.jpg",
    "assets/images/logo.png",
    "public/images/logo.png",
    "public/images/logo.svg",
];

/// Candidate paths for the Arabic companion regular face
pub const COMPANION_FONT_CANDIDATES: &[&str] = &[
    "assets/fonts/NotoNaskhArabic-Regular.ttf",
    "fonts/NotoNaskhArabic-Regular.ttf",
    "assets/fonts/Amiri-Regular.ttf",
];

/// Candidate paths for the Arabic companion bold face
pub const COMPANION_BOLD_CANDIDATES: &[&str] = &[
    "assets/fonts/NotoNaskhArabic-Bold.ttf",
    "fonts/NotoNaskhArabic-Bold.ttf",
    "assets/fonts/Amiri-Bold.ttf",
];

/// Measurements and palette for certificate layout
///
/// Threaded explicitly into every render primitive so tests can tweak a
/// single value without touching global state.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Page width in points
    pub page_width: f32,
    /// Page height in points
    pub page_height: f32,
    /// Outer margin on all four sides
    pub margin: f32,
    /// Top of the header block
    pub header_top: f32,
    /// Flag glyph width
    pub flag_width: f32,
    /// Flag glyph height
    pub flag_height: f32,
    /// Logo box edge length
    pub logo_size: f32,
    /// Constant y where the body starts, whatever the header drew
    pub body_top: f32,
    /// y of the document title row
    pub title_y: f32,
    pub title_size: f32,
    pub subtitle_size: f32,
    pub section_title_size: f32,
    pub label_size: f32,
    pub value_size: f32,
    pub paragraph_size: f32,
    /// Minimum height of a field row, blank rows included
    pub min_row_height: f32,
    /// Vertical gap between field rows
    pub row_gap: f32,
    /// Gap after a rendered paragraph
    pub paragraph_gap: f32,
    /// Gap after a section
    pub section_gap: f32,
    /// Gutter between the label and value sub-columns
    pub column_gutter: f32,
    /// Cap on the label sub-column width
    pub label_width_cap: f32,
    /// Body text color
    pub text_color: Color,
    /// Field label color
    pub label_color: Color,
    /// Separator rule color
    pub rule_color: Color,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_width: A4_WIDTH,
            page_height: A4_HEIGHT,
            margin: 40.0,
            header_top: 36.0,
            flag_width: 60.0,
            flag_height: 36.0,
            logo_size: 64.0,
            body_top: 120.0,
            title_y: 125.0,
            title_size: 18.0,
            subtitle_size: 11.0,
            section_title_size: 12.0,
            label_size: 9.0,
            value_size: 10.0,
            paragraph_size: 10.0,
            min_row_height: 12.0,
            row_gap: 3.0,
            paragraph_gap: 4.0,
            section_gap: 8.0,
            column_gutter: 8.0,
            label_width_cap: 105.0,
            text_color: Color::gray(0.12),
            label_color: Color::gray(0.42),
            rule_color: Color::gray(0.6),
        }
    }
}

impl LayoutConfig {
    /// Usable width between the margins
    pub fn section_width(&self) -> f32 {
        self.page_width - 2.0 * self.margin
    }

    /// Width of one text column, halved when a companion column is present
    pub fn column_width(&self, bilingual: bool) -> f32 {
        if bilingual {
            self.section_width() / 2.0 - 6.0
        } else {
            self.section_width()
        }
    }

    /// Width of the label sub-column inside a column
    pub fn label_width(&self, column_width: f32) -> f32 {
        self.label_width_cap.min(0.4 * column_width)
    }

    /// x where the companion column starts
    pub fn right_column_x(&self) -> f32 {
        self.margin + self.section_width() / 2.0 + 6.0
    }
}

/// Shorthand for the common font/size/color combination
pub(crate) fn text_options(font: &str, size: f32, color: Color) -> TextOptions {
    TextOptions {
        font: font.to_string(),
        size,
        color,
        ..TextOptions::default()
    }
}
