//! Counts of what an assembled document contains.

use super::RenderInstruction;
use serde::{Deserialize, Serialize};

/// Statistics collected from a document plan.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssemblyStats {
    /// Number of titles
    pub title_count: u32,

    /// Number of body paragraphs
    pub paragraph_count: u32,

    /// Number of list items
    pub list_item_count: u32,

    /// Number of blank spacer paragraphs
    pub blank_count: u32,

    /// Number of flushed tables
    pub table_count: u32,

    /// Total rows across all tables
    pub table_row_count: u32,

    /// Whether a logo header was planned
    pub has_header: bool,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,
}

impl AssemblyStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count the given instructions.
    pub fn from_instructions(instructions: &[RenderInstruction]) -> Self {
        let mut stats = Self::new();
        for instruction in instructions {
            stats.add(instruction);
        }
        stats
    }

    /// Account for one instruction.
    pub fn add(&mut self, instruction: &RenderInstruction) {
        match instruction {
            RenderInstruction::Title { text, .. } => {
                self.title_count += 1;
                self.count_text(text);
            }
            RenderInstruction::Paragraph { text } => {
                self.paragraph_count += 1;
                self.count_text(text);
            }
            RenderInstruction::ListItem { text } => {
                self.list_item_count += 1;
                self.count_text(text);
            }
            RenderInstruction::BlankSpacer => self.blank_count += 1,
            RenderInstruction::Table { rows, .. } => {
                self.table_count += 1;
                self.table_row_count += rows.len() as u32;
                for row in rows {
                    self.count_text(&row.key);
                    self.count_text(&row.value);
                }
            }
            RenderInstruction::Header { .. } => self.has_header = true,
            RenderInstruction::Footer { .. } => {}
        }
    }

    /// Number of visible body elements (tables count once).
    pub fn element_count(&self) -> u32 {
        self.title_count + self.paragraph_count + self.list_item_count + self.table_count
    }

    fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
    }
}
