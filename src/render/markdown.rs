//! Markdown rendering of document plans.
//!
//! Colors and fills have no Markdown counterpart and are ignored. The logo
//! header is accepted but not embedded.

use super::Renderer;
use crate::classify::TableRow;
use crate::color::Color;
use crate::error::Result;

/// Markdown renderer.
#[derive(Debug, Default)]
pub struct MarkdownRenderer {
    output: String,
    footer: Option<String>,
    raw: bool,
    last_was_item: bool,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer with escaping enabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable escaping of Markdown syntax in text.
    pub fn with_escape(mut self, escape: bool) -> Self {
        self.raw = !escape;
        self
    }

    fn text(&self, text: &str) -> String {
        if self.raw {
            text.to_string()
        } else {
            escape_markdown(text)
        }
    }

    fn ensure_block_break(&mut self) {
        self.last_was_item = false;
        if !self.output.is_empty() && !self.output.ends_with("\n\n") {
            if self.output.ends_with('\n') {
                self.output.push('\n');
            } else {
                self.output.push_str("\n\n");
            }
        }
    }
}

impl Renderer for MarkdownRenderer {
    fn add_title(&mut self, text: &str, _color: Color) -> Result<()> {
        self.ensure_block_break();
        let text = self.text(text);
        self.output.push_str(&format!("## {}\n\n", text));
        Ok(())
    }

    fn add_paragraph(&mut self, text: &str, _color: Color) -> Result<()> {
        self.ensure_block_break();
        let mut text = self.text(text);
        if !self.raw && text.starts_with(['#', '>', '+', '-', '=']) {
            text.insert(0, '\\');
        }
        self.output.push_str(&text);
        self.output.push_str("\n\n");
        Ok(())
    }

    fn add_list_item(&mut self, text: &str, _color: Color) -> Result<()> {
        // Consecutive items stay in one list.
        if self.last_was_item {
            self.output.pop();
        } else {
            self.ensure_block_break();
        }
        let text = self.text(text);
        self.output.push_str(&format!("- {}\n\n", text));
        self.last_was_item = true;
        Ok(())
    }

    fn add_blank_paragraph(&mut self) -> Result<()> {
        self.ensure_block_break();
        Ok(())
    }

    fn add_table(
        &mut self,
        rows: &[TableRow],
        _header_fill: Color,
        _zebra_fill: Color,
    ) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }
        self.ensure_block_break();

        for (i, row) in rows.iter().enumerate() {
            let key = cell_text(&row.key);
            let value = cell_text(&row.value);
            self.output.push_str(&format!("| {} | {} |\n", key, value));

            // The first row doubles as the Markdown header row.
            if i == 0 {
                self.output.push_str("| --- | --- |\n");
            }
        }
        self.output.push('\n');
        Ok(())
    }

    fn set_header_logo(&mut self, _logo: &[u8], _width_emu: u64, _rule_color: Color) -> Result<()> {
        log::debug!("Markdown output does not embed the header logo");
        Ok(())
    }

    fn set_footer_text(&mut self, text: &str) -> Result<()> {
        self.footer = Some(text.to_string());
        Ok(())
    }

    fn finalize(&mut self) -> Result<Vec<u8>> {
        let mut output = self.output.trim_end().to_string();
        if let Some(ref footer) = self.footer {
            if !output.is_empty() {
                output.push_str("\n\n");
            }
            output.push_str("---\n\n");
            output.push_str(&format!("*{}*", escape_markdown(footer)));
        }
        output.push('\n');
        Ok(output.into_bytes())
    }
}

fn cell_text(text: &str) -> String {
    escape_markdown(text).replace('\n', " ").trim().to_string()
}

/// Escape special Markdown characters.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '|' => {
                result.push('\\');
                result.push(c);
            }
            // Line-start syntax is handled by the paragraph writer.
            _ => result.push(c),
        }
    }
    result
}
