//! Assembly of classified lines into render instructions.
//!
//! The [`Assembler`] consumes [`ClassifiedLine`]s in input order. Consecutive
//! table rows are buffered and emitted as a single [`RenderInstruction::Table`]
//! at the first line that ends the run (or at end of input); every other line
//! maps directly to one instruction.
//!
//! # Example
//!
//! ```
//! use contractdoc::assemble::{Assembler, RenderInstruction};
//! use contractdoc::classify::classify_text;
//! use contractdoc::Color;
//!
//! let lines = classify_text("A: 1\nB: 2\n\nFim do texto");
//! let instructions = Assembler::new(Color::default()).assemble(lines);
//!
//! match &instructions[0] {
//!     RenderInstruction::Table { rows, .. } => assert_eq!(rows.len(), 2),
//!     other => panic!("expected a table, got {:?}", other),
//! }
//! assert_eq!(instructions[1], RenderInstruction::BlankSpacer);
//! ```

mod stats;

pub use stats::AssemblyStats;

use crate::classify::{classify_text, ClassifiedLine, TableRow};
use crate::color::Color;
use serde::Serialize;

/// Footer text used when the caller does not supply one.
pub const DEFAULT_FOOTER_TEXT: &str = "Documento gerado automaticamente";

/// One step of document construction, applied to a renderer in order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RenderInstruction {
    /// Centered title in the primary color
    Title {
        /// Title text
        text: String,
        /// Primary color of the document
        color: Color,
    },
    /// Bulleted list item
    ListItem {
        /// Item text without marker
        text: String,
    },
    /// Justified body paragraph
    Paragraph {
        /// Paragraph text
        text: String,
    },
    /// Empty paragraph
    BlankSpacer,
    /// Two-column key/value table
    Table {
        /// Rows in input order
        rows: Vec<TableRow>,
        /// Key cell background
        color: Color,
    },
    /// Page header with a logo image
    Header {
        /// Raw image bytes
        #[serde(skip_serializing)]
        logo: Vec<u8>,
    },
    /// Page footer line
    Footer {
        /// Footer text
        text: String,
    },
}

impl RenderInstruction {
    /// Check if this instruction puts visible content in the body.
    pub fn is_body_content(&self) -> bool {
        matches!(
            self,
            RenderInstruction::Title { .. }
                | RenderInstruction::ListItem { .. }
                | RenderInstruction::Paragraph { .. }
                | RenderInstruction::Table { .. }
        )
    }
}

/// Stateful line-to-instruction driver for one document.
///
/// An assembler is created per document and never shared; the table buffer
/// lives only as long as the document being assembled.
#[derive(Debug)]
pub struct Assembler {
    primary_color: Color,
    buffer: Vec<TableRow>,
    in_table: bool,
}

impl Assembler {
    /// Create an assembler for a document with the given primary color.
    pub fn new(primary_color: Color) -> Self {
        Self {
            primary_color,
            buffer: Vec::new(),
            in_table: false,
        }
    }

    /// Primary color carried by titles and tables.
    pub fn primary_color(&self) -> Color {
        self.primary_color
    }

    /// Check if a table block is currently open.
    pub fn in_table(&self) -> bool {
        self.in_table
    }

    /// Number of rows waiting to be flushed.
    pub fn pending_rows(&self) -> usize {
        self.buffer.len()
    }

    /// Feed one classified line, appending any resulting instructions to `out`.
    pub fn push(&mut self, line: ClassifiedLine, out: &mut Vec<RenderInstruction>) {
        match line {
            ClassifiedLine::Blank => {
                self.flush_into(out);
                out.push(RenderInstruction::BlankSpacer);
            }
            ClassifiedLine::TableRow(row) => {
                self.buffer.push(row);
                self.in_table = true;
            }
            ClassifiedLine::Title { text } => {
                self.flush_into(out);
                out.push(RenderInstruction::Title {
                    text,
                    color: self.primary_color,
                });
            }
            ClassifiedLine::ListItem { text } => {
                self.flush_into(out);
                out.push(RenderInstruction::ListItem { text });
            }
            ClassifiedLine::Paragraph { text } => {
                self.flush_into(out);
                out.push(RenderInstruction::Paragraph { text });
            }
        }
    }

    /// Emit the pending table, if any. Called implicitly at end of input.
    pub fn finish(mut self, out: &mut Vec<RenderInstruction>) {
        self.flush_into(out);
    }

    /// Assemble a whole stream of classified lines.
    pub fn assemble(
        mut self,
        lines: impl IntoIterator<Item = ClassifiedLine>,
    ) -> Vec<RenderInstruction> {
        let mut out = Vec::new();
        for line in lines {
            self.push(line, &mut out);
        }
        self.finish(&mut out);
        out
    }

    fn flush_into(&mut self, out: &mut Vec<RenderInstruction>) {
        if !self.in_table || self.buffer.is_empty() {
            return;
        }
        let rows = std::mem::take(&mut self.buffer);
        log::debug!("Flushing table with {} rows", rows.len());
        out.push(RenderInstruction::Table {
            rows,
            color: self.primary_color,
        });
        self.in_table = false;
    }
}

/// Complete, ordered instruction list for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentPlan {
    /// Primary color of the document
    pub primary_color: Color,

    /// Header, body and footer instructions in application order
    pub instructions: Vec<RenderInstruction>,
}

impl DocumentPlan {
    /// Body instructions, without header and footer.
    pub fn body(&self) -> impl Iterator<Item = &RenderInstruction> {
        self.instructions.iter().filter(|i| {
            !matches!(
                i,
                RenderInstruction::Header { .. } | RenderInstruction::Footer { .. }
            )
        })
    }

    /// Text of the first title, used as document title metadata.
    pub fn first_title(&self) -> Option<&str> {
        self.instructions.iter().find_map(|i| match i {
            RenderInstruction::Title { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Check if the plan carries a logo header.
    pub fn has_header(&self) -> bool {
        self.instructions
            .iter()
            .any(|i| matches!(i, RenderInstruction::Header { .. }))
    }

    /// Count the instructions of this plan.
    pub fn stats(&self) -> AssemblyStats {
        AssemblyStats::from_instructions(&self.instructions)
    }
}

/// Wrap body instructions with the optional logo header and the footer.
pub fn compose(
    primary_color: Color,
    body: Vec<RenderInstruction>,
    logo: Option<Vec<u8>>,
    footer_text: impl Into<String>,
) -> DocumentPlan {
    let mut instructions = Vec::with_capacity(body.len() + 2);
    if let Some(logo) = logo {
        instructions.push(RenderInstruction::Header { logo });
    }
    instructions.extend(body);
    instructions.push(RenderInstruction::Footer {
        text: footer_text.into(),
    });
    DocumentPlan {
        primary_color,
        instructions,
    }
}

/// Classify and assemble `text` into a full document plan.
pub fn plan(
    text: &str,
    primary_color: Color,
    logo: Option<Vec<u8>>,
    footer_text: impl Into<String>,
) -> DocumentPlan {
    let body = Assembler::new(primary_color).assemble(classify_text(text));
    log::debug!("Assembled {} body instructions", body.len());
    compose(primary_color, body, logo, footer_text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::classify_text;

    fn color() -> Color {
        Color::rgb(0x4F, 0x46, 0xE5)
    }

    fn body(text: &str) -> Vec<RenderInstruction> {
        Assembler::new(color()).assemble(classify_text(text))
    }

    #[test]
    fn test_rows_buffer_until_flush() {
        let mut assembler = Assembler::new(color());
        let mut out = Vec::new();

        assembler.push(ClassifiedLine::TableRow(TableRow::new("A", "1")), &mut out);
        assembler.push(ClassifiedLine::TableRow(TableRow::new("B", "2")), &mut out);
        assert!(out.is_empty());
        assert!(assembler.in_table());
        assert_eq!(assembler.pending_rows(), 2);

        assembler.push(
            ClassifiedLine::Paragraph {
                text: "fim".into(),
            },
            &mut out,
        );
        assert!(!assembler.in_table());
        assert_eq!(assembler.pending_rows(), 0);
        assert_eq!(out.len(), 2);
        assert!(matches!(&out[0], RenderInstruction::Table { rows, .. } if rows.len() == 2));
    }

    #[test]
    fn test_row_order_preserved() {
        let out = body("A: 1\nB: 2\nC: 3");
        assert_eq!(
            out,
            vec![RenderInstruction::Table {
                rows: vec![
                    TableRow::new("A", "1"),
                    TableRow::new("B", "2"),
                    TableRow::new("C", "3"),
                ],
                color: color(),
            }]
        );
    }

    #[test]
    fn test_blank_flushes_then_spaces() {
        let out = body("A: 1\n\nB: 2");
        assert_eq!(out.len(), 3);
        assert!(matches!(&out[0], RenderInstruction::Table { rows, .. } if rows.len() == 1));
        assert_eq!(out[1], RenderInstruction::BlankSpacer);
        assert!(matches!(&out[2], RenderInstruction::Table { rows, .. } if rows[0].key == "B"));
    }

    #[test]
    fn test_title_carries_primary_color() {
        let out = body("CLÁUSULA 1 - OBJETO");
        assert_eq!(
            out,
            vec![RenderInstruction::Title {
                text: "CLÁUSULA 1 - OBJETO".into(),
                color: color(),
            }]
        );
    }

    #[test]
    fn test_empty_input_yields_empty_body() {
        assert!(body("").is_empty());
        assert!(Assembler::new(color()).assemble(Vec::new()).is_empty());
    }

    #[test]
    fn test_compose_header_and_footer() {
        let plan = compose(color(), body("Texto"), Some(vec![1, 2, 3]), "Rodapé");
        assert!(plan.has_header());
        assert!(matches!(plan.instructions[0], RenderInstruction::Header { .. }));
        assert_eq!(
            plan.instructions.last(),
            Some(&RenderInstruction::Footer {
                text: "Rodapé".into()
            })
        );
        assert_eq!(plan.body().count(), 1);
    }

    #[test]
    fn test_compose_without_logo() {
        let plan = compose(color(), Vec::new(), None, DEFAULT_FOOTER_TEXT);
        assert!(!plan.has_header());
        assert_eq!(plan.instructions.len(), 1);
    }

    #[test]
    fn test_first_title() {
        let plan = plan("intro\nCONTRATO DE LOCAÇÃO\nCLÁUSULA 1", color(), None, "x");
        assert_eq!(plan.first_title(), Some("CONTRATO DE LOCAÇÃO"));
    }

    #[test]
    fn test_plan_serializes_without_logo_bytes() {
        let plan = compose(color(), body("A: 1"), Some(vec![0xFF; 4]), "f");
        let json = serde_json::to_string(&plan).unwrap();
        assert!(json.contains("\"type\":\"header\""));
        assert!(json.contains("\"type\":\"table\""));
        assert!(!json.contains("logo"));
    }
}
