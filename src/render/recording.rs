//! Renderer that records the calls it receives.

use super::Renderer;
use crate::classify::TableRow;
use crate::color::Color;
use crate::error::{Error, Result};
use serde::Serialize;

/// A single renderer operation as received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "call", rename_all = "snake_case")]
pub enum RendererCall {
    /// `add_title`
    Title { text: String, color: Color },
    /// `add_paragraph`
    Paragraph { text: String, color: Color },
    /// `add_list_item`
    ListItem { text: String, color: Color },
    /// `add_blank_paragraph`
    Blank,
    /// `add_table`
    Table {
        rows: Vec<TableRow>,
        header_fill: Color,
        zebra_fill: Color,
    },
    /// `set_header_logo`
    HeaderLogo {
        size: usize,
        width_emu: u64,
        rule_color: Color,
    },
    /// `set_footer_text`
    Footer { text: String },
    /// `finalize`
    Finalize,
}

impl RendererCall {
    /// Name of the renderer operation.
    pub fn name(&self) -> &'static str {
        match self {
            RendererCall::Title { .. } => "add_title",
            RendererCall::Paragraph { .. } => "add_paragraph",
            RendererCall::ListItem { .. } => "add_list_item",
            RendererCall::Blank => "add_blank_paragraph",
            RendererCall::Table { .. } => "add_table",
            RendererCall::HeaderLogo { .. } => "set_header_logo",
            RendererCall::Footer { .. } => "set_footer_text",
            RendererCall::Finalize => "finalize",
        }
    }
}

/// In-memory renderer that keeps every call in order.
///
/// `finalize` returns the recorded calls as JSON.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    calls: Vec<RendererCall>,
    fail_header: bool,
    fail_body: bool,
}

impl RecordingRenderer {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every `set_header_logo` call.
    pub fn failing_header(mut self) -> Self {
        self.fail_header = true;
        self
    }

    /// Reject every body call (titles, paragraphs, list items, blanks, tables).
    pub fn failing_body(mut self) -> Self {
        self.fail_body = true;
        self
    }

    /// Calls received so far.
    pub fn calls(&self) -> &[RendererCall] {
        &self.calls
    }

    /// Take the recorded calls, leaving the recorder empty.
    pub fn into_calls(self) -> Vec<RendererCall> {
        self.calls
    }

    fn body(&mut self, call: RendererCall) -> Result<()> {
        if self.fail_body {
            return Err(Error::Renderer(format!("{} rejected", call.name())));
        }
        self.calls.push(call);
        Ok(())
    }
}

impl Renderer for RecordingRenderer {
    fn add_title(&mut self, text: &str, color: Color) -> Result<()> {
        self.body(RendererCall::Title {
            text: text.to_string(),
            color,
        })
    }

    fn add_paragraph(&mut self, text: &str, color: Color) -> Result<()> {
        self.body(RendererCall::Paragraph {
            text: text.to_string(),
            color,
        })
    }

    fn add_list_item(&mut self, text: &str, color: Color) -> Result<()> {
        self.body(RendererCall::ListItem {
            text: text.to_string(),
            color,
        })
    }

    fn add_blank_paragraph(&mut self) -> Result<()> {
        self.body(RendererCall::Blank)
    }

    fn add_table(
        &mut self,
        rows: &[TableRow],
        header_fill: Color,
        zebra_fill: Color,
    ) -> Result<()> {
        self.body(RendererCall::Table {
            rows: rows.to_vec(),
            header_fill,
            zebra_fill,
        })
    }

    fn set_header_logo(&mut self, logo: &[u8], width_emu: u64, rule_color: Color) -> Result<()> {
        if self.fail_header {
            return Err(Error::UnsupportedImage("header rejected".into()));
        }
        self.calls.push(RendererCall::HeaderLogo {
            size: logo.len(),
            width_emu,
            rule_color,
        });
        Ok(())
    }

    fn set_footer_text(&mut self, text: &str) -> Result<()> {
        self.calls.push(RendererCall::Footer {
            text: text.to_string(),
        });
        Ok(())
    }

    fn finalize(&mut self) -> Result<Vec<u8>> {
        self.calls.push(RendererCall::Finalize);
        serde_json::to_vec(&self.calls)
            .map_err(|e| Error::Renderer(format!("JSON serialization error: {}", e)))
    }
}
