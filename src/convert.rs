//! Document generation facade.
//!
//! [`generate`] validates a [`DocumentRequest`], builds the document plan and
//! renders it in the format selected by [`GenerateOptions`].
//!
//! # Example
//!
//! ```
//! use contractdoc::convert::{generate, DocumentRequest, GenerateOptions};
//!
//! fn main() -> contractdoc::Result<()> {
//!     let request = DocumentRequest::new("CONTRATO\nNome: Ana").with_color("#1E40AF");
//!     let result = generate(&request, &GenerateOptions::default())?;
//!
//!     assert!(result.bytes.starts_with(b"PK"));
//!     assert_eq!(result.stats.table_count, 1);
//!     Ok(())
//! }
//! ```

use crate::assemble::{plan, AssemblyStats, DocumentPlan, DEFAULT_FOOTER_TEXT};
use crate::color::{Color, DEFAULT_PRIMARY_HEX};
use crate::error::{Error, Result};
use crate::render::{
    apply, inches_to_emu, to_json, DocxOptions, DocxRenderer, JsonFormat, MarkdownRenderer,
    PageSetup, Typography, DEFAULT_LOGO_WIDTH_EMU, DOCX_MIME_TYPE,
};
use rayon::prelude::*;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Output format for generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Word document
    #[default]
    Docx,

    /// Markdown text
    Markdown,

    /// JSON document plan
    Json,
}

impl OutputFormat {
    /// MIME type of the generated bytes.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Docx => DOCX_MIME_TYPE,
            OutputFormat::Markdown => "text/markdown",
            OutputFormat::Json => "application/json",
        }
    }

    /// File extension without the leading dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Docx => "docx",
            OutputFormat::Markdown => "md",
            OutputFormat::Json => "json",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Docx => "docx",
            OutputFormat::Markdown => "markdown",
            OutputFormat::Json => "json",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "docx" | "word" => Ok(OutputFormat::Docx),
            "md" | "markdown" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            other => Err(Error::Other(format!("unknown output format: {}", other))),
        }
    }
}

/// Input of one generation: draft text, primary color and optional logo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentRequest {
    /// Plain-text contract draft
    pub text: String,

    /// Primary color as `#RRGGBB` or `RRGGBB`
    pub primary_color: String,

    /// Logo image bytes for the page header
    pub logo: Option<Vec<u8>>,
}

impl DocumentRequest {
    /// Create a request with the default primary color and no logo.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            primary_color: DEFAULT_PRIMARY_HEX.to_string(),
            logo: None,
        }
    }

    /// Set the primary color.
    pub fn with_color(mut self, hex: impl Into<String>) -> Self {
        self.primary_color = hex.into();
        self
    }

    /// Attach a header logo.
    pub fn with_logo(mut self, logo: Vec<u8>) -> Self {
        self.logo = Some(logo);
        self
    }
}

/// Options for document generation.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Footer line text
    pub footer_text: String,

    /// Rendered logo width in EMU
    pub logo_width_emu: u64,

    /// Page geometry, typography and metadata of DOCX output
    pub docx: DocxOptions,

    /// Output format
    pub format: OutputFormat,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            footer_text: DEFAULT_FOOTER_TEXT.to_string(),
            logo_width_emu: DEFAULT_LOGO_WIDTH_EMU,
            docx: DocxOptions::default(),
            format: OutputFormat::default(),
        }
    }
}

impl GenerateOptions {
    /// Create new generation options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the footer text.
    pub fn with_footer_text(mut self, text: impl Into<String>) -> Self {
        self.footer_text = text.into();
        self
    }

    /// Set the logo width in inches.
    pub fn with_logo_width_inches(mut self, inches: f32) -> Self {
        self.logo_width_emu = inches_to_emu(inches);
        self
    }

    /// Set the page geometry.
    pub fn with_page(mut self, page: PageSetup) -> Self {
        self.docx.page = page;
        self
    }

    /// Set fonts and sizes.
    pub fn with_typography(mut self, typography: Typography) -> Self {
        self.docx.typography = typography;
        self
    }

    /// Override the document title property.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.docx.title = Some(title.into());
        self
    }

    /// Replace all DOCX options.
    pub fn with_docx_options(mut self, docx: DocxOptions) -> Self {
        self.docx = docx;
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }
}

/// Result of document generation.
#[derive(Debug, Clone)]
pub struct GenerateResult {
    /// Generated document
    pub bytes: Vec<u8>,

    /// MIME type of `bytes`
    pub mime_type: &'static str,

    /// Format of `bytes`
    pub format: OutputFormat,

    /// Counts of the assembled instructions
    pub stats: AssemblyStats,

    /// Whether the header logo was rendered
    pub logo_applied: bool,
}

impl GenerateResult {
    /// Get output length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Check if the output is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Write the generated bytes to a file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, &self.bytes)?;
        Ok(())
    }
}

/// Generate a styled document from a request.
///
/// # Errors
///
/// * `Error::EmptyInput` when the text has no non-whitespace content
/// * `Error::InvalidColorFormat` when the primary color is not a 6-digit hex
///   value; no classification happens in that case
/// * `Error::Renderer` when the output cannot be produced
///
/// An unreadable logo is not an error: the document is produced without
/// header and `logo_applied` is `false`.
pub fn generate(request: &DocumentRequest, options: &GenerateOptions) -> Result<GenerateResult> {
    if request.text.trim().is_empty() {
        return Err(Error::EmptyInput);
    }
    let color = Color::from_hex(&request.primary_color)?;

    let plan = plan(
        &request.text,
        color,
        request.logo.clone(),
        options.footer_text.as_str(),
    );
    render_plan(&plan, options)
}

/// Render an already assembled plan in the configured format.
pub fn render_plan(plan: &DocumentPlan, options: &GenerateOptions) -> Result<GenerateResult> {
    let stats = plan.stats();

    let (bytes, logo_applied) = match options.format {
        OutputFormat::Docx => {
            let mut renderer = DocxRenderer::new(options.docx.clone());
            let rendered = apply(plan, &mut renderer, options.logo_width_emu)?;
            (rendered.bytes, rendered.logo_applied)
        }
        OutputFormat::Markdown => {
            let mut renderer = MarkdownRenderer::new();
            let rendered = apply(plan, &mut renderer, options.logo_width_emu)?;
            (rendered.bytes, false)
        }
        OutputFormat::Json => (to_json(plan, JsonFormat::Pretty)?.into_bytes(), false),
    };

    log::debug!(
        "Generated {} output: {} bytes, {} elements",
        options.format,
        bytes.len(),
        stats.element_count()
    );

    Ok(GenerateResult {
        bytes,
        mime_type: options.format.mime_type(),
        format: options.format,
        stats,
        logo_applied,
    })
}

/// Generate several independent documents in parallel.
///
/// Results are returned in the order of `requests`; a failing request does not
/// affect the others.
pub fn generate_batch(
    requests: &[DocumentRequest],
    options: &GenerateOptions,
) -> Vec<Result<GenerateResult>> {
    requests
        .par_iter()
        .map(|request| generate(request, options))
        .collect()
}

/// Generate a document on tokio's blocking thread pool.
#[cfg(feature = "async")]
pub async fn generate_async(
    request: DocumentRequest,
    options: GenerateOptions,
) -> Result<GenerateResult> {
    tokio::task::spawn_blocking(move || generate(&request, &options))
        .await
        .map_err(|e| Error::Other(format!("generation task failed: {}", e)))?
}
