//! DOCX (WordprocessingML) rendering.
//!
//! Elements are serialized straight into the `word/document.xml` body as the
//! renderer is called. `finalize` wraps the body with the section properties
//! and packages every part into a zip container.

use std::io::{Cursor, Write};

use chrono::Utc;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::options::{cm_to_twips, half_points, DocxOptions};
use super::xml::{self, Justify, RunStyle, WML_NAMESPACES, XML_DECLARATION};
use super::Renderer;
use crate::classify::TableRow;
use crate::color::{zebra_shade, Color, BODY_TEXT, FOOTER_TEXT, KEY_TEXT};
use crate::error::{Error, Result};
use crate::image::{detect_image, ImageFormat};

/// MIME type of the documents this renderer produces.
pub const DOCX_MIME_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

const REL_STYLES: &str = "rIdStyles";
const REL_NUMBERING: &str = "rIdNumbering";
const REL_HEADER: &str = "rIdHeader";
const REL_FOOTER: &str = "rIdFooter";
const REL_LOGO: &str = "rIdLogo";

const BULLET_NUM_ID: u32 = 1;
const TABLE_BORDER_COLOR: &str = "D1D5DB";

struct HeaderLogo {
    image: Vec<u8>,
    format: ImageFormat,
    width_emu: u64,
    height_emu: u64,
    rule_color: Color,
}

/// Renderer producing a `.docx` package.
pub struct DocxRenderer {
    options: DocxOptions,
    body: String,
    header: Option<HeaderLogo>,
    footer: Option<String>,
    first_title: Option<String>,
}

impl DocxRenderer {
    /// Create a new DOCX renderer.
    pub fn new(options: DocxOptions) -> Self {
        Self {
            options,
            body: String::new(),
            header: None,
            footer: None,
            first_title: None,
        }
    }

    fn style(&self, size: f32, color: Color, bold: bool) -> RunStyle<'_> {
        RunStyle {
            font: &self.options.typography.font_family,
            half_points: half_points(size),
            color,
            bold,
        }
    }

    fn document_xml(&self) -> String {
        let page = &self.options.page;
        let mut out = String::with_capacity(self.body.len() + 1024);
        out.push_str(XML_DECLARATION);
        out.push_str(&format!("<w:document {}><w:body>", WML_NAMESPACES));
        out.push_str(&self.body);

        out.push_str("<w:sectPr>");
        if self.header.is_some() {
            out.push_str(&format!(
                r#"<w:headerReference w:type="default" r:id="{}"/>"#,
                REL_HEADER
            ));
        }
        if self.footer.is_some() {
            out.push_str(&format!(
                r#"<w:footerReference w:type="default" r:id="{}"/>"#,
                REL_FOOTER
            ));
        }
        out.push_str(&format!(
            r#"<w:pgSz w:w="{}" w:h="{}"/>"#,
            cm_to_twips(page.width_cm),
            cm_to_twips(page.height_cm)
        ));
        out.push_str(&format!(
            r#"<w:pgMar w:top="{}" w:right="{}" w:bottom="{}" w:left="{}" w:header="708" w:footer="708" w:gutter="0"/>"#,
            cm_to_twips(page.margin_top_cm),
            cm_to_twips(page.margin_right_cm),
            cm_to_twips(page.margin_bottom_cm),
            cm_to_twips(page.margin_left_cm)
        ));
        out.push_str("</w:sectPr></w:body></w:document>");
        out
    }

    fn header_xml(&self, logo: &HeaderLogo) -> String {
        let typography = &self.options.typography;
        let mut out = String::new();
        out.push_str(XML_DECLARATION);
        out.push_str(&format!("<w:hdr {}>", WML_NAMESPACES));

        out.push_str(r#"<w:p><w:pPr><w:jc w:val="center"/></w:pPr><w:r><w:drawing>"#);
        out.push_str(&format!(
            concat!(
                r#"<wp:inline distT="0" distB="0" distL="0" distR="0">"#,
                r#"<wp:extent cx="{w}" cy="{h}"/>"#,
                r#"<wp:docPr id="1" name="Logo"/>"#,
                r#"<wp:cNvGraphicFramePr><a:graphicFrameLocks noChangeAspect="1"/></wp:cNvGraphicFramePr>"#,
                r#"<a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture">"#,
                r#"<pic:pic><pic:nvPicPr><pic:cNvPr id="0" name="logo.{ext}"/><pic:cNvPicPr/></pic:nvPicPr>"#,
                r#"<pic:blipFill><a:blip r:embed="{rel}"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill>"#,
                r#"<pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{w}" cy="{h}"/></a:xfrm>"#,
                r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr>"#,
                r#"</pic:pic></a:graphicData></a:graphic></wp:inline>"#,
            ),
            w = logo.width_emu,
            h = logo.height_emu,
            ext = logo.format.extension(),
            rel = REL_LOGO,
        ));
        out.push_str("</w:drawing></w:r></w:p>");

        let rule = "_".repeat(typography.header_rule_length);
        let style = self.style(typography.header_rule_size, logo.rule_color, false);
        xml::paragraph(&mut out, &rule, Justify::Center, "", &style);

        out.push_str("</w:hdr>");
        out
    }

    fn footer_xml(&self, text: &str) -> String {
        let mut out = String::new();
        out.push_str(XML_DECLARATION);
        out.push_str(&format!("<w:ftr {}>", WML_NAMESPACES));
        let style = self.style(self.options.typography.footer_size, FOOTER_TEXT, false);
        xml::paragraph(&mut out, text, Justify::Center, "", &style);
        out.push_str("</w:ftr>");
        out
    }

    fn styles_xml(&self) -> String {
        let font = xml::escape(&self.options.typography.font_family);
        let size = half_points(self.options.typography.body_size);
        format!(
            concat!(
                "{decl}",
                r#"<w:styles xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
                r#"<w:docDefaults><w:rPrDefault><w:rPr>"#,
                r#"<w:rFonts w:ascii="{font}" w:hAnsi="{font}" w:eastAsia="{font}" w:cs="{font}"/>"#,
                r#"<w:color w:val="{color}"/><w:sz w:val="{size}"/><w:szCs w:val="{size}"/>"#,
                r#"</w:rPr></w:rPrDefault>"#,
                r#"<w:pPrDefault><w:pPr><w:spacing w:after="120" w:line="276" w:lineRule="auto"/></w:pPr></w:pPrDefault>"#,
                r#"</w:docDefaults>"#,
                r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>"#,
                r#"<w:style w:type="paragraph" w:styleId="ListBullet"><w:name w:val="List Bullet"/>"#,
                r#"<w:basedOn w:val="Normal"/><w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr></w:style>"#,
                r#"<w:style w:type="table" w:default="1" w:styleId="TableNormal"><w:name w:val="Normal Table"/>"#,
                r#"<w:tblPr><w:tblInd w:w="0" w:type="dxa"/><w:tblCellMar>"#,
                r#"<w:top w:w="0" w:type="dxa"/><w:left w:w="108" w:type="dxa"/>"#,
                r#"<w:bottom w:w="0" w:type="dxa"/><w:right w:w="108" w:type="dxa"/>"#,
                r#"</w:tblCellMar></w:tblPr></w:style>"#,
                r#"<w:style w:type="table" w:styleId="TableGrid"><w:name w:val="Table Grid"/>"#,
                r#"<w:basedOn w:val="TableNormal"/><w:tblPr><w:tblBorders>"#,
                r#"<w:top w:val="single" w:sz="4" w:space="0" w:color="{border}"/>"#,
                r#"<w:left w:val="single" w:sz="4" w:space="0" w:color="{border}"/>"#,
                r#"<w:bottom w:val="single" w:sz="4" w:space="0" w:color="{border}"/>"#,
                r#"<w:right w:val="single" w:sz="4" w:space="0" w:color="{border}"/>"#,
                r#"<w:insideH w:val="single" w:sz="4" w:space="0" w:color="{border}"/>"#,
                r#"<w:insideV w:val="single" w:sz="4" w:space="0" w:color="{border}"/>"#,
                r#"</w:tblBorders></w:tblPr></w:style>"#,
                r#"</w:styles>"#,
            ),
            decl = XML_DECLARATION,
            font = font,
            color = BODY_TEXT.hex(),
            size = size,
            border = TABLE_BORDER_COLOR,
        )
    }

    fn numbering_xml(&self) -> String {
        let font = xml::escape(&self.options.typography.font_family);
        format!(
            concat!(
                "{decl}",
                r#"<w:numbering xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">"#,
                r#"<w:abstractNum w:abstractNumId="0"><w:multiLevelType w:val="singleLevel"/>"#,
                r#"<w:lvl w:ilvl="0"><w:start w:val="1"/><w:numFmt w:val="bullet"/>"#,
                r#"<w:lvlText w:val="•"/><w:lvlJc w:val="left"/>"#,
                r#"<w:pPr><w:ind w:left="720" w:hanging="360"/></w:pPr>"#,
                r#"<w:rPr><w:rFonts w:ascii="{font}" w:hAnsi="{font}"/></w:rPr></w:lvl>"#,
                r#"</w:abstractNum>"#,
                r#"<w:num w:numId="{num}"><w:abstractNumId w:val="0"/></w:num>"#,
                r#"</w:numbering>"#,
            ),
            decl = XML_DECLARATION,
            font = font,
            num = BULLET_NUM_ID,
        )
    }

    fn content_types_xml(&self) -> String {
        let mut out = String::new();
        out.push_str(XML_DECLARATION);
        out.push_str(
            r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
        );
        out.push_str(r#"<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>"#);
        out.push_str(r#"<Default Extension="xml" ContentType="application/xml"/>"#);
        if let Some(ref logo) = self.header {
            out.push_str(&format!(
                r#"<Default Extension="{}" ContentType="{}"/>"#,
                logo.format.extension(),
                logo.format.mime_type()
            ));
        }
        out.push_str(r#"<Override PartName="/word/document.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml"/>"#);
        out.push_str(r#"<Override PartName="/word/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml"/>"#);
        out.push_str(r#"<Override PartName="/word/numbering.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.numbering+xml"/>"#);
        if self.header.is_some() {
            out.push_str(r#"<Override PartName="/word/header1.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.header+xml"/>"#);
        }
        if self.footer.is_some() {
            out.push_str(r#"<Override PartName="/word/footer1.xml" ContentType="application/vnd.openxmlformats-officedocument.wordprocessingml.footer+xml"/>"#);
        }
        out.push_str(r#"<Override PartName="/docProps/core.xml" ContentType="application/vnd.openxmlformats-package.core-properties+xml"/>"#);
        out.push_str(r#"<Override PartName="/docProps/app.xml" ContentType="application/vnd.openxmlformats-officedocument.extended-properties+xml"/>"#);
        out.push_str("</Types>");
        out
    }

    fn package_rels_xml(&self) -> String {
        let mut out = String::new();
        out.push_str(XML_DECLARATION);
        out.push_str(r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#);
        out.push_str(r#"<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="word/document.xml"/>"#);
        out.push_str(r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>"#);
        out.push_str(r#"<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties" Target="docProps/app.xml"/>"#);
        out.push_str("</Relationships>");
        out
    }

    fn document_rels_xml(&self) -> String {
        let rel = |id: &str, kind: &str, target: &str| {
            format!(
                r#"<Relationship Id="{}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/{}" Target="{}"/>"#,
                id, kind, target
            )
        };
        let mut out = String::new();
        out.push_str(XML_DECLARATION);
        out.push_str(r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#);
        out.push_str(&rel(REL_STYLES, "styles", "styles.xml"));
        out.push_str(&rel(REL_NUMBERING, "numbering", "numbering.xml"));
        if self.header.is_some() {
            out.push_str(&rel(REL_HEADER, "header", "header1.xml"));
        }
        if self.footer.is_some() {
            out.push_str(&rel(REL_FOOTER, "footer", "footer1.xml"));
        }
        out.push_str("</Relationships>");
        out
    }

    fn header_rels_xml(&self, logo: &HeaderLogo) -> String {
        format!(
            concat!(
                "{decl}",
                r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
                r#"<Relationship Id="{rel}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/image" Target="media/logo.{ext}"/>"#,
                r#"</Relationships>"#,
            ),
            decl = XML_DECLARATION,
            rel = REL_LOGO,
            ext = logo.format.extension(),
        )
    }

    fn core_xml(&self) -> String {
        let created = self
            .options
            .created
            .unwrap_or_else(Utc::now)
            .format("%Y-%m-%dT%H:%M:%SZ")
            .to_string();
        let title = self
            .options
            .title
            .as_deref()
            .or(self.first_title.as_deref())
            .unwrap_or_default();
        format!(
            concat!(
                "{decl}",
                r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
                r#"xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" "#,
                r#"xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
                "<dc:title>{title}</dc:title>",
                "<dc:creator>{app}</dc:creator>",
                r#"<dcterms:created xsi:type="dcterms:W3CDTF">{created}</dcterms:created>"#,
                r#"<dcterms:modified xsi:type="dcterms:W3CDTF">{created}</dcterms:modified>"#,
                "</cp:coreProperties>",
            ),
            decl = XML_DECLARATION,
            title = xml::escape(title),
            app = env!("CARGO_PKG_NAME"),
            created = created,
        )
    }

    fn app_xml(&self) -> String {
        format!(
            concat!(
                "{decl}",
                r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" "#,
                r#"xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#,
                "<Application>{app} {version}</Application>",
                "</Properties>",
            ),
            decl = XML_DECLARATION,
            app = env!("CARGO_PKG_NAME"),
            version = env!("CARGO_PKG_VERSION"),
        )
    }
}

impl Default for DocxRenderer {
    fn default() -> Self {
        Self::new(DocxOptions::default())
    }
}

impl Renderer for DocxRenderer {
    fn add_title(&mut self, text: &str, color: Color) -> Result<()> {
        if self.first_title.is_none() {
            self.first_title = Some(text.to_string());
        }
        let style = self.style(self.options.typography.title_size, color, true);
        let mut out = String::new();
        xml::paragraph(
            &mut out,
            text,
            Justify::Center,
            r#"<w:spacing w:before="240" w:after="120"/>"#,
            &style,
        );
        self.body.push_str(&out);
        Ok(())
    }

    fn add_paragraph(&mut self, text: &str, color: Color) -> Result<()> {
        let style = self.style(self.options.typography.body_size, color, false);
        let mut out = String::new();
        xml::paragraph(&mut out, text, Justify::Both, "", &style);
        self.body.push_str(&out);
        Ok(())
    }

    fn add_list_item(&mut self, text: &str, color: Color) -> Result<()> {
        let style = self.style(self.options.typography.body_size, color, false);
        let properties = format!(
            r#"<w:pStyle w:val="ListBullet"/><w:numPr><w:ilvl w:val="0"/><w:numId w:val="{}"/></w:numPr>"#,
            BULLET_NUM_ID
        );
        let mut out = String::new();
        xml::paragraph(&mut out, text, Justify::Left, &properties, &style);
        self.body.push_str(&out);
        Ok(())
    }

    fn add_blank_paragraph(&mut self) -> Result<()> {
        xml::empty_paragraph(&mut self.body);
        Ok(())
    }

    fn add_table(
        &mut self,
        rows: &[TableRow],
        header_fill: Color,
        zebra_fill: Color,
    ) -> Result<()> {
        if rows.is_empty() {
            return Ok(());
        }

        let total = self.options.page.content_width_twips();
        let key_width = total / 2;
        let value_width = total - key_width;
        let size = self.options.typography.table_size;
        let key_style = self.style(size, KEY_TEXT, true);
        let value_style = self.style(size, BODY_TEXT, false);

        let mut out = String::new();
        out.push_str("<w:tbl><w:tblPr>");
        out.push_str(r#"<w:tblStyle w:val="TableGrid"/>"#);
        out.push_str(&format!(r#"<w:tblW w:w="{}" w:type="dxa"/>"#, total));
        out.push_str(r#"<w:tblLayout w:type="fixed"/>"#);
        out.push_str("</w:tblPr><w:tblGrid>");
        out.push_str(&format!(
            r#"<w:gridCol w:w="{}"/><w:gridCol w:w="{}"/>"#,
            key_width, value_width
        ));
        out.push_str("</w:tblGrid>");

        for (i, row) in rows.iter().enumerate() {
            out.push_str("<w:tr>");
            xml::cell(&mut out, &row.key, key_width, Some(header_fill), &key_style);
            xml::cell(
                &mut out,
                &row.value,
                value_width,
                zebra_shade(i, zebra_fill),
                &value_style,
            );
            out.push_str("</w:tr>");
        }

        out.push_str("</w:tbl>");
        self.body.push_str(&out);
        Ok(())
    }

    fn set_header_logo(&mut self, logo: &[u8], width_emu: u64, rule_color: Color) -> Result<()> {
        if width_emu == 0 {
            return Err(Error::Renderer("logo width must be positive".into()));
        }
        let info = detect_image(logo)?;
        log::debug!(
            "Header logo: {} {}x{} px",
            info.format,
            info.width,
            info.height
        );
        self.header = Some(HeaderLogo {
            image: logo.to_vec(),
            format: info.format,
            width_emu,
            height_emu: info.scaled_height(width_emu)?,
            rule_color,
        });
        Ok(())
    }

    fn set_footer_text(&mut self, text: &str) -> Result<()> {
        self.footer = Some(text.to_string());
        Ok(())
    }

    fn finalize(&mut self) -> Result<Vec<u8>> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let opt = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        zip.start_file("[Content_Types].xml", opt)?;
        zip.write_all(self.content_types_xml().as_bytes())?;

        zip.start_file("_rels/.rels", opt)?;
        zip.write_all(self.package_rels_xml().as_bytes())?;

        zip.start_file("docProps/core.xml", opt)?;
        zip.write_all(self.core_xml().as_bytes())?;

        zip.start_file("docProps/app.xml", opt)?;
        zip.write_all(self.app_xml().as_bytes())?;

        zip.start_file("word/document.xml", opt)?;
        zip.write_all(self.document_xml().as_bytes())?;

        zip.start_file("word/_rels/document.xml.rels", opt)?;
        zip.write_all(self.document_rels_xml().as_bytes())?;

        zip.start_file("word/styles.xml", opt)?;
        zip.write_all(self.styles_xml().as_bytes())?;

        zip.start_file("word/numbering.xml", opt)?;
        zip.write_all(self.numbering_xml().as_bytes())?;

        if let Some(ref logo) = self.header {
            zip.start_file("word/header1.xml", opt)?;
            zip.write_all(self.header_xml(logo).as_bytes())?;

            zip.start_file("word/_rels/header1.xml.rels", opt)?;
            zip.write_all(self.header_rels_xml(logo).as_bytes())?;

            // Already-compressed image data gains nothing from deflate.
            let stored = opt.compression_method(CompressionMethod::Stored);
            zip.start_file(format!("word/media/logo.{}", logo.format.extension()), stored)?;
            zip.write_all(&logo.image)?;
        }

        if let Some(ref text) = self.footer {
            zip.start_file("word/footer1.xml", opt)?;
            zip.write_all(self.footer_xml(text).as_bytes())?;
        }

        let cursor = zip.finish()?;
        Ok(cursor.into_inner())
    }
}
