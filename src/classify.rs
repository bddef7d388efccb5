//! Line classification for plain-text contract drafts.
//!
//! Each input line is mapped to one [`ClassifiedLine`]. Rules are applied in
//! a fixed precedence order and the first match wins:
//!
//! 1. empty line → [`ClassifiedLine::Blank`]
//! 2. `key: value` split on the first colon → [`ClassifiedLine::TableRow`]
//! 3. uppercase line, `CONTRATO…`, `CLÁUSULA…` or `12.` prefix → [`ClassifiedLine::Title`]
//! 4. `- `, `• ` or `* ` prefix → [`ClassifiedLine::ListItem`] (marker stripped)
//! 5. anything else → [`ClassifiedLine::Paragraph`]

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

/// Prefixes that mark a list item. The marker is dropped from the item text.
pub const LIST_MARKERS: [&str; 3] = ["- ", "• ", "* "];

/// Prefixes that always start a title, regardless of case.
pub const TITLE_PREFIXES: [&str; 2] = ["CONTRATO", "CLÁUSULA"];

/// One key/value row of a table block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableRow {
    /// Text left of the first colon
    pub key: String,
    /// Text right of the first colon
    pub value: String,
}

impl TableRow {
    /// Create a row.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Semantic tag of one input line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClassifiedLine {
    /// Empty line, used as a separator
    Blank,
    /// `key: value` line, grouped into a table by the assembler
    TableRow(TableRow),
    /// Centered, colored heading
    Title {
        /// Title text as written
        text: String,
    },
    /// Bulleted item, marker removed
    ListItem {
        /// Item text without its marker
        text: String,
    },
    /// Justified body text
    Paragraph {
        /// Paragraph text
        text: String,
    },
}

impl ClassifiedLine {
    /// Check if this is a blank separator.
    pub fn is_blank(&self) -> bool {
        matches!(self, ClassifiedLine::Blank)
    }

    /// Check if this line belongs to a table block.
    pub fn is_table_row(&self) -> bool {
        matches!(self, ClassifiedLine::TableRow(_))
    }

    /// Short lowercase name of the tag.
    pub fn kind(&self) -> &'static str {
        match self {
            ClassifiedLine::Blank => "blank",
            ClassifiedLine::TableRow(_) => "table_row",
            ClassifiedLine::Title { .. } => "title",
            ClassifiedLine::ListItem { .. } => "list_item",
            ClassifiedLine::Paragraph { .. } => "paragraph",
        }
    }
}

/// Heuristic line classifier.
///
/// Holds the compiled numbered-heading pattern; classification itself is
/// stateless, so one classifier can be shared freely between threads.
#[derive(Debug, Clone)]
pub struct LineClassifier {
    numbered_heading: Regex,
}

impl LineClassifier {
    /// Create a new classifier.
    pub fn new() -> Self {
        Self {
            numbered_heading: Regex::new(r"^\d+\.").expect("numbered heading pattern is valid"),
        }
    }

    /// Classify a single line. Surrounding whitespace is ignored.
    pub fn classify(&self, line: &str) -> ClassifiedLine {
        let line = line.trim();

        if line.is_empty() {
            return ClassifiedLine::Blank;
        }

        if let Some(row) = split_table_row(line) {
            return ClassifiedLine::TableRow(row);
        }

        if self.is_title(line) {
            return ClassifiedLine::Title {
                text: line.to_string(),
            };
        }

        if let Some(text) = strip_list_marker(line) {
            return ClassifiedLine::ListItem {
                text: text.to_string(),
            };
        }

        ClassifiedLine::Paragraph {
            text: line.to_string(),
        }
    }

    /// Check the title rule for an already trimmed line.
    pub fn is_title(&self, line: &str) -> bool {
        is_uppercase_line(line)
            || TITLE_PREFIXES.iter().any(|p| line.starts_with(p))
            || self.numbered_heading.is_match(line)
    }

    /// Classify every line of a document, after input normalization.
    pub fn classify_text(&self, text: &str) -> Vec<ClassifiedLine> {
        normalized_lines(text)
            .iter()
            .map(|line| self.classify(line))
            .collect()
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new()
    }
}

fn shared() -> &'static LineClassifier {
    static CLASSIFIER: OnceLock<LineClassifier> = OnceLock::new();
    CLASSIFIER.get_or_init(LineClassifier::new)
}

/// Classify a single line with the shared classifier.
pub fn classify(line: &str) -> ClassifiedLine {
    shared().classify(line)
}

/// Classify every line of `text` with the shared classifier.
pub fn classify_text(text: &str) -> Vec<ClassifiedLine> {
    shared().classify_text(text)
}

/// Check the title rule with the shared classifier.
pub fn is_title(line: &str) -> bool {
    shared().is_title(line.trim())
}

/// Split a line on its first colon into a table row.
///
/// Only the first colon splits, so `10:30: reunião` yields key `10` and
/// value `30: reunião`. Returns `None` when there is no colon or when either
/// side is empty after trimming.
pub fn split_table_row(line: &str) -> Option<TableRow> {
    let (key, value) = line.split_once(':')?;
    let (key, value) = (key.trim(), value.trim());
    if key.is_empty() || value.is_empty() {
        return None;
    }
    Some(TableRow::new(key, value))
}

/// Text of a list item with its marker removed, or `None` if the line has
/// no list marker.
pub fn strip_list_marker(line: &str) -> Option<&str> {
    LIST_MARKERS
        .iter()
        .find_map(|marker| line.strip_prefix(marker))
        .map(str::trim_start)
}

/// True when the line has at least one cased letter and none in lowercase.
pub fn is_uppercase_line(line: &str) -> bool {
    let mut has_upper = false;
    for c in line.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_upper = true;
        }
    }
    has_upper
}

/// Normalize raw text and split it into trimmed lines.
///
/// Text is converted to Unicode NFC first so composed and decomposed forms of
/// accented prefixes such as `CLÁUSULA` classify the same way.
pub fn normalized_lines(text: &str) -> Vec<String> {
    let normalized: String = text.nfc().collect();
    normalized
        .lines()
        .map(|line| line.trim().to_string())
        .collect()
}
