//! # contractdoc
//!
//! Plain-text contract drafts to styled documents.
//!
//! Each line of the draft is classified (title, list item, key/value row,
//! paragraph or blank), consecutive key/value rows are grouped into tables,
//! and the resulting plan is rendered as a DOCX file with a logo header, a
//! colored title scheme, zebra-shaded tables and a footer.
//!
//! ## Quick Start
//!
//! ```no_run
//! use contractdoc::ContractDoc;
//!
//! fn main() -> contractdoc::Result<()> {
//!     let draft = std::fs::read_to_string("contrato.txt")?;
//!     let logo = std::fs::read("logo.png")?;
//!
//!     ContractDoc::new()
//!         .with_color("#1E40AF")
//!         .with_logo(logo)
//!         .generate(&draft)?
//!         .save("contrato.docx")?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Line classification**: titles, numbered headings, bullets, `Key: Value` rows
//! - **Table grouping**: consecutive rows become one two-column table
//! - **Multiple output formats**: DOCX, Markdown, JSON plan
//! - **Pluggable rendering**: any [`Renderer`] can receive the plan
//! - **Parallel processing**: batch generation with Rayon

pub mod assemble;
pub mod classify;
pub mod color;
pub mod convert;
pub mod error;
pub mod image;
pub mod render;

// Re-export commonly used types
pub use assemble::{
    compose, plan, Assembler, AssemblyStats, DocumentPlan, RenderInstruction,
    DEFAULT_FOOTER_TEXT,
};
pub use classify::{classify, classify_text, is_title, ClassifiedLine, LineClassifier, TableRow};
pub use color::{hex_to_rgb, zebra_shade, Color, DEFAULT_PRIMARY_HEX, ZEBRA_FILL};
#[cfg(feature = "async")]
pub use convert::generate_async;
pub use convert::{
    generate, generate_batch, render_plan, DocumentRequest, GenerateOptions, GenerateResult,
    OutputFormat,
};
pub use error::{Error, Result};
pub use crate::image::{detect_image, ImageFormat, ImageInfo};
pub use render::{
    apply, DocxOptions, DocxRenderer, JsonFormat, MarkdownRenderer, PageSetup, Renderer,
    Typography,
};

use std::path::Path;

/// Generate a DOCX document from draft text with the given primary color.
///
/// # Example
///
/// ```
/// let bytes = contractdoc::to_docx("CONTRATO\nValor: R$ 100,00", "#4F46E5").unwrap();
/// assert!(bytes.starts_with(b"PK"));
/// ```
pub fn to_docx(text: &str, primary_color: &str) -> Result<Vec<u8>> {
    let request = DocumentRequest::new(text).with_color(primary_color);
    Ok(generate(&request, &GenerateOptions::default())?.bytes)
}

/// Convert draft text to Markdown.
pub fn to_markdown(text: &str) -> Result<String> {
    let result = ContractDoc::new()
        .with_format(OutputFormat::Markdown)
        .generate(text)?;
    String::from_utf8(result.bytes).map_err(|e| Error::Renderer(e.to_string()))
}

/// Convert draft text to its JSON document plan.
pub fn to_json(text: &str, format: JsonFormat) -> Result<String> {
    if text.trim().is_empty() {
        return Err(Error::EmptyInput);
    }
    let plan = plan(text, Color::default(), None, DEFAULT_FOOTER_TEXT);
    render::to_json(&plan, format)
}

/// Read a draft file and write the generated document to `output`.
///
/// # Example
///
/// ```no_run
/// use contractdoc::{convert_file, GenerateOptions};
///
/// let options = GenerateOptions::default();
/// let result = convert_file("contrato.txt", "contrato.docx", "#4F46E5", &options)?;
/// println!("{} tables", result.stats.table_count);
/// # Ok::<(), contractdoc::Error>(())
/// ```
pub fn convert_file<P: AsRef<Path>, Q: AsRef<Path>>(
    input: P,
    output: Q,
    primary_color: &str,
    options: &GenerateOptions,
) -> Result<GenerateResult> {
    let text = std::fs::read_to_string(input)?;
    let request = DocumentRequest::new(text).with_color(primary_color);
    let result = generate(&request, options)?;
    result.save(output)?;
    Ok(result)
}

/// Builder for generating contract documents.
///
/// # Example
///
/// ```
/// use contractdoc::{ContractDoc, OutputFormat};
///
/// let result = ContractDoc::new()
///     .with_color("0F766E")
///     .with_footer("Minuta para revisão")
///     .with_format(OutputFormat::Markdown)
///     .generate("CONTRATO DE LOCAÇÃO\n\nLocador: Ana")?;
///
/// let markdown = String::from_utf8(result.bytes).unwrap();
/// assert!(markdown.contains("Minuta para revisão"));
/// # Ok::<(), contractdoc::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct ContractDoc {
    primary_color: String,
    logo: Option<Vec<u8>>,
    options: GenerateOptions,
}

impl ContractDoc {
    /// Create a new builder with the default color, footer and format.
    pub fn new() -> Self {
        Self {
            primary_color: DEFAULT_PRIMARY_HEX.to_string(),
            logo: None,
            options: GenerateOptions::default(),
        }
    }

    /// Set the primary color (`#RRGGBB` or `RRGGBB`).
    pub fn with_color(mut self, hex: impl Into<String>) -> Self {
        self.primary_color = hex.into();
        self
    }

    /// Attach a header logo.
    pub fn with_logo(mut self, logo: Vec<u8>) -> Self {
        self.logo = Some(logo);
        self
    }

    /// Set the footer text.
    pub fn with_footer(mut self, text: impl Into<String>) -> Self {
        self.options = self.options.with_footer_text(text);
        self
    }

    /// Set the page geometry.
    pub fn with_page(mut self, page: PageSetup) -> Self {
        self.options = self.options.with_page(page);
        self
    }

    /// Set output format.
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.options = self.options.with_format(format);
        self
    }

    /// Set all generation options at once.
    pub fn with_options(mut self, options: GenerateOptions) -> Self {
        self.options = options;
        self
    }

    /// Generate a document from draft text.
    pub fn generate(&self, text: &str) -> Result<GenerateResult> {
        let request = DocumentRequest {
            text: text.to_string(),
            primary_color: self.primary_color.clone(),
            logo: self.logo.clone(),
        };
        generate(&request, &self.options)
    }

    /// Read a draft file and generate a document from it.
    pub fn generate_file<P: AsRef<Path>>(&self, path: P) -> Result<GenerateResult> {
        let text = std::fs::read_to_string(path)?;
        self.generate(&text)
    }
}

impl Default for ContractDoc {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder() {
        let doc = ContractDoc::new()
            .with_color("#000000")
            .with_footer("f")
            .with_format(OutputFormat::Json);

        assert_eq!(doc.primary_color, "#000000");
        assert_eq!(doc.options.footer_text, "f");
        assert_eq!(doc.options.format, OutputFormat::Json);
    }

    // ==================== Edge Case Tests ====================

    #[test]
    fn test_to_docx_empty_text() {
        let result = to_docx("", "#4F46E5");
        assert!(matches!(result, Err(Error::EmptyInput)));
    }

    #[test]
    fn test_to_docx_invalid_color() {
        let result = to_docx("Texto", "#12345");
        assert!(matches!(result, Err(Error::InvalidColorFormat(_))));
    }

    #[test]
    fn test_to_markdown() {
        let md = to_markdown("CLÁUSULA 1 - OBJETO\nTexto.").unwrap();
        assert!(md.starts_with("## CLÁUSULA 1 - OBJETO\n\nTexto.\n"));
    }

    #[test]
    fn test_to_json_empty_text() {
        assert!(matches!(
            to_json("\n\n", JsonFormat::Compact),
            Err(Error::EmptyInput)
        ));
    }

    #[test]
    fn test_generate_file_missing() {
        let result = ContractDoc::new().generate_file("/nonexistent/contrato.txt");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
