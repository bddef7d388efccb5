//! Rendering of document plans.
//!
//! [`Renderer`] is the capability the assembler's instructions are applied
//! to. [`apply`] walks a [`DocumentPlan`] in order and calls the matching
//! renderer operation for each instruction.

mod docx;
mod json;
mod markdown;
mod options;
mod recording;
mod xml;

pub use docx::{DocxRenderer, DOCX_MIME_TYPE};
pub use json::{to_json, JsonFormat};
pub use markdown::MarkdownRenderer;
pub use options::{
    cm_to_twips, half_points, inches_to_emu, DocxOptions, PageSetup, Typography,
    DEFAULT_LOGO_WIDTH_EMU, EMU_PER_INCH,
};
pub use recording::{RecordingRenderer, RendererCall};

use crate::assemble::{DocumentPlan, RenderInstruction};
use crate::classify::TableRow;
use crate::color::{Color, BODY_TEXT, ZEBRA_FILL};
use crate::error::Result;

/// Operations a rendering backend provides to the assembler.
///
/// Calls arrive in document order. A renderer owns its output document;
/// callers only see the bytes returned by [`Renderer::finalize`].
pub trait Renderer {
    /// Add a centered title.
    fn add_title(&mut self, text: &str, color: Color) -> Result<()>;

    /// Add a justified body paragraph.
    fn add_paragraph(&mut self, text: &str, color: Color) -> Result<()>;

    /// Add a bulleted list item. `text` has no marker.
    fn add_list_item(&mut self, text: &str, color: Color) -> Result<()>;

    /// Add an empty paragraph.
    fn add_blank_paragraph(&mut self) -> Result<()>;

    /// Add a two-column key/value table.
    ///
    /// Key cells are filled with `header_fill`; value cells follow the zebra
    /// rule ([`crate::color::zebra_shade`]) with `zebra_fill`.
    fn add_table(
        &mut self,
        rows: &[TableRow],
        header_fill: Color,
        zebra_fill: Color,
    ) -> Result<()>;

    /// Put a logo in the page header, `width_emu` wide, with a separator rule
    /// in `rule_color` below it.
    fn set_header_logo(&mut self, logo: &[u8], width_emu: u64, rule_color: Color) -> Result<()>;

    /// Set the page footer text.
    fn set_footer_text(&mut self, text: &str) -> Result<()>;

    /// Produce the finished document.
    fn finalize(&mut self) -> Result<Vec<u8>>;
}

/// Output of applying a plan to a renderer.
#[derive(Debug, Clone)]
pub struct Rendered {
    /// Finalized document bytes
    pub bytes: Vec<u8>,

    /// Whether the logo header made it into the document
    pub logo_applied: bool,
}

/// Apply every instruction of `plan` to `renderer` and finalize it.
///
/// A failing header logo is logged and skipped so the body still renders;
/// any other renderer error is returned as-is.
pub fn apply<R: Renderer + ?Sized>(
    plan: &DocumentPlan,
    renderer: &mut R,
    logo_width_emu: u64,
) -> Result<Rendered> {
    let mut logo_applied = false;

    for instruction in &plan.instructions {
        match instruction {
            RenderInstruction::Header { logo } => {
                match renderer.set_header_logo(logo, logo_width_emu, plan.primary_color) {
                    Ok(()) => logo_applied = true,
                    Err(e) => log::warn!("Skipping logo header: {}", e),
                }
            }
            RenderInstruction::Title { text, color } => renderer.add_title(text, *color)?,
            RenderInstruction::Paragraph { text } => renderer.add_paragraph(text, BODY_TEXT)?,
            RenderInstruction::ListItem { text } => renderer.add_list_item(text, BODY_TEXT)?,
            RenderInstruction::BlankSpacer => renderer.add_blank_paragraph()?,
            RenderInstruction::Table { rows, color } => {
                renderer.add_table(rows, *color, ZEBRA_FILL)?
            }
            RenderInstruction::Footer { text } => renderer.set_footer_text(text)?,
        }
    }

    let bytes = renderer.finalize()?;
    log::debug!(
        "Rendered {} instructions into {} bytes",
        plan.instructions.len(),
        bytes.len()
    );

    Ok(Rendered {
        bytes,
        logo_applied,
    })
}
