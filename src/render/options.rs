//! Page geometry and typography for rendered documents.

use chrono::{DateTime, Utc};

/// English Metric Units per inch (DrawingML unit).
pub const EMU_PER_INCH: u64 = 914_400;

/// Twentieths of a point per inch (WordprocessingML page unit).
pub const TWIPS_PER_INCH: f32 = 1440.0;

/// Default logo width: 1.8 inches.
pub const DEFAULT_LOGO_WIDTH_EMU: u64 = EMU_PER_INCH * 18 / 10;

/// Convert centimeters to twips.
pub fn cm_to_twips(cm: f32) -> u32 {
    (cm * TWIPS_PER_INCH / 2.54).round() as u32
}

/// Convert inches to EMU.
pub fn inches_to_emu(inches: f32) -> u64 {
    (inches * EMU_PER_INCH as f32).round() as u64
}

/// Convert a point size to WordprocessingML half-points.
pub fn half_points(pt: f32) -> u32 {
    (pt * 2.0).round() as u32
}

/// Page size and margins, in centimeters.
#[derive(Debug, Clone, PartialEq)]
pub struct PageSetup {
    /// Page width
    pub width_cm: f32,
    /// Page height
    pub height_cm: f32,
    /// Left margin
    pub margin_left_cm: f32,
    /// Right margin
    pub margin_right_cm: f32,
    /// Top margin
    pub margin_top_cm: f32,
    /// Bottom margin
    pub margin_bottom_cm: f32,
}

impl PageSetup {
    /// A4 (21 × 29.7 cm) with 2.5 cm side/top margins and a 2 cm bottom margin.
    pub fn a4() -> Self {
        Self {
            width_cm: 21.0,
            height_cm: 29.7,
            margin_left_cm: 2.5,
            margin_right_cm: 2.5,
            margin_top_cm: 2.5,
            margin_bottom_cm: 2.0,
        }
    }

    /// US Letter (8.5 × 11 in) with the same margins as [`PageSetup::a4`].
    pub fn letter() -> Self {
        Self {
            width_cm: 21.59,
            height_cm: 27.94,
            ..Self::a4()
        }
    }

    /// Usable text width in twips.
    pub fn content_width_twips(&self) -> u32 {
        cm_to_twips(self.width_cm - self.margin_left_cm - self.margin_right_cm)
    }
}

impl Default for PageSetup {
    fn default() -> Self {
        Self::a4()
    }
}

/// Font family and sizes (points) for each element kind.
#[derive(Debug, Clone, PartialEq)]
pub struct Typography {
    /// Font used for every run
    pub font_family: String,
    /// Title size
    pub title_size: f32,
    /// Paragraph and list item size
    pub body_size: f32,
    /// Table cell size
    pub table_size: f32,
    /// Footer size
    pub footer_size: f32,
    /// Size of the separator rule under the logo
    pub header_rule_size: f32,
    /// Number of underscores in the separator rule
    pub header_rule_length: usize,
}

impl Default for Typography {
    fn default() -> Self {
        Self {
            font_family: "Arial".to_string(),
            title_size: 14.0,
            body_size: 11.0,
            table_size: 10.0,
            footer_size: 8.0,
            header_rule_size: 6.0,
            header_rule_length: 80,
        }
    }
}

/// Options for the DOCX renderer.
#[derive(Debug, Clone, Default)]
pub struct DocxOptions {
    /// Page geometry
    pub page: PageSetup,

    /// Fonts and sizes
    pub typography: Typography,

    /// Document title property (defaults to the first title rendered)
    pub title: Option<String>,

    /// Creation timestamp (defaults to the time of finalization)
    pub created: Option<DateTime<Utc>>,
}

impl DocxOptions {
    /// Create new DOCX options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the page geometry.
    pub fn with_page(mut self, page: PageSetup) -> Self {
        self.page = page;
        self
    }

    /// Set fonts and sizes.
    pub fn with_typography(mut self, typography: Typography) -> Self {
        self.typography = typography;
        self
    }

    /// Set the document title property.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Fix the creation timestamp.
    pub fn with_created(mut self, created: DateTime<Utc>) -> Self {
        self.created = Some(created);
        self
    }
}
