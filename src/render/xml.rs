//! WordprocessingML fragments shared by the DOCX parts.

use crate::color::Color;

/// Namespace declarations used by document, header and footer parts.
pub(crate) const WML_NAMESPACES: &str = concat!(
    r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" "#,
    r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture""#,
);

pub(crate) const XML_DECLARATION: &str =
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n";

/// Escape text for element content and attribute values.
///
/// Control characters other than tab are dropped, as are the noncharacters
/// U+FFFE and U+FFFF. None of them are allowed in XML 1.0 and Word refuses to
/// open a part containing them.
pub(crate) fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for ch in s.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' => out.push(ch),
            '\u{FFFE}' | '\u{FFFF}' => {}
            c if c.is_control() => {}
            _ => out.push(ch),
        }
    }
    out
}

/// Paragraph alignment values (`w:jc`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Justify {
    Left,
    Center,
    Both,
}

impl Justify {
    fn as_str(&self) -> &'static str {
        match self {
            Justify::Left => "left",
            Justify::Center => "center",
            Justify::Both => "both",
        }
    }
}

/// Character formatting of a single run.
#[derive(Debug, Clone)]
pub(crate) struct RunStyle<'a> {
    pub font: &'a str,
    pub half_points: u32,
    pub color: Color,
    pub bold: bool,
}

impl RunStyle<'_> {
    fn write_properties(&self, out: &mut String) {
        let font = escape(self.font);
        out.push_str("<w:rPr>");
        out.push_str(&format!(
            r#"<w:rFonts w:ascii="{f}" w:hAnsi="{f}" w:cs="{f}"/>"#,
            f = font
        ));
        if self.bold {
            out.push_str("<w:b/><w:bCs/>");
        }
        out.push_str(&format!(r#"<w:color w:val="{}"/>"#, self.color.hex()));
        out.push_str(&format!(
            r#"<w:sz w:val="{hp}"/><w:szCs w:val="{hp}"/>"#,
            hp = self.half_points
        ));
        out.push_str("</w:rPr>");
    }
}

/// Append a `w:r` with one text node.
pub(crate) fn run(out: &mut String, text: &str, style: &RunStyle<'_>) {
    out.push_str("<w:r>");
    style.write_properties(out);
    out.push_str(r#"<w:t xml:space="preserve">"#);
    out.push_str(&escape(text));
    out.push_str("</w:t></w:r>");
}

/// Append a one-run paragraph.
///
/// `properties` is inserted verbatim into `w:pPr` before the alignment.
pub(crate) fn paragraph(
    out: &mut String,
    text: &str,
    justify: Justify,
    properties: &str,
    style: &RunStyle<'_>,
) {
    out.push_str("<w:p><w:pPr>");
    out.push_str(properties);
    out.push_str(&format!(r#"<w:jc w:val="{}"/>"#, justify.as_str()));
    out.push_str("</w:pPr>");
    run(out, text, style);
    out.push_str("</w:p>");
}

/// Append an empty paragraph.
pub(crate) fn empty_paragraph(out: &mut String) {
    out.push_str("<w:p/>");
}

/// Append a table cell holding one run, with an optional background fill.
pub(crate) fn cell(
    out: &mut String,
    text: &str,
    width_twips: u32,
    fill: Option<Color>,
    style: &RunStyle<'_>,
) {
    out.push_str("<w:tc><w:tcPr>");
    out.push_str(&format!(r#"<w:tcW w:w="{}" w:type="dxa"/>"#, width_twips));
    if let Some(fill) = fill {
        out.push_str(&format!(
            r#"<w:shd w:val="clear" w:color="auto" w:fill="{}"/>"#,
            fill.hex()
        ));
    }
    out.push_str("</w:tcPr><w:p><w:pPr><w:spacing w:before=\"40\" w:after=\"40\"/></w:pPr>");
    run(out, text, style);
    out.push_str("</w:p></w:tc>");
}
