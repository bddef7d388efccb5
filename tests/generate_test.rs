//! Integration tests for document generation.

use std::io::{Cursor, Read};

use contractdoc::{
    convert_file, generate, generate_batch, ContractDoc, DocumentRequest, Error, GenerateOptions,
    OutputFormat, PageSetup,
};
use zip::ZipArchive;

const CONTRACT: &str = "CONTRATO DE PRESTAÇÃO DE SERVIÇOS

CONTRATANTE: João Silva
CONTRATADO: Empresa XYZ

CLÁUSULA 1 - OBJETO
O presente contrato tem por objeto...
- Item um
- Item dois
";

fn png(width: u32, height: u32) -> Vec<u8> {
    let pixels = image::RgbaImage::from_pixel(width, height, image::Rgba([30, 64, 175, 255]));
    let mut out = Cursor::new(Vec::new());
    pixels.write_to(&mut out, image::ImageFormat::Png).unwrap();
    out.into_inner()
}

fn part_names(bytes: &[u8]) -> Vec<String> {
    let archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    archive.file_names().map(str::to_string).collect()
}

fn read_part(bytes: &[u8], name: &str) -> String {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut file = archive.by_name(name).unwrap();
    let mut content = String::new();
    file.read_to_string(&mut content).unwrap();
    content
}

#[test]
fn test_docx_package_parts() {
    let request = DocumentRequest::new(CONTRACT).with_logo(png(200, 50));
    let result = generate(&request, &GenerateOptions::default()).unwrap();

    assert!(result.logo_applied);
    assert_eq!(
        result.mime_type,
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    );

    let names = part_names(&result.bytes);
    for expected in [
        "[Content_Types].xml",
        "_rels/.rels",
        "word/document.xml",
        "word/_rels/document.xml.rels",
        "word/styles.xml",
        "word/numbering.xml",
        "word/header1.xml",
        "word/_rels/header1.xml.rels",
        "word/media/logo.png",
        "word/footer1.xml",
        "docProps/core.xml",
        "docProps/app.xml",
    ] {
        assert!(names.iter().any(|n| n == expected), "missing {}", expected);
    }
}

#[test]
fn test_docx_body_content() {
    let request = DocumentRequest::new(CONTRACT).with_color("1E40AF");
    let result = generate(&request, &GenerateOptions::default()).unwrap();
    let document = read_part(&result.bytes, "word/document.xml");

    assert!(document.contains("CONTRATO DE PRESTAÇÃO DE SERVIÇOS"));
    assert!(document.contains("João Silva"));
    assert!(document.contains("Item dois"));
    assert_eq!(document.matches("<w:tbl>").count(), 1);
    assert_eq!(document.matches("<w:tr>").count(), 2);
    assert!(document.contains(r#"w:fill="1E40AF""#));
    assert!(document.contains(r#"<w:color w:val="1E40AF"/>"#));

    let footer = read_part(&result.bytes, "word/footer1.xml");
    assert!(footer.contains("Documento gerado automaticamente"));
}

#[test]
fn test_unsupported_logo_still_renders_body() {
    let request = DocumentRequest::new(CONTRACT).with_logo(b"not an image".to_vec());
    let result = generate(&request, &GenerateOptions::default()).unwrap();

    assert!(!result.logo_applied);
    let names = part_names(&result.bytes);
    assert!(!names.iter().any(|n| n == "word/header1.xml"));
    assert!(read_part(&result.bytes, "word/document.xml").contains("Item um"));
}

#[test]
fn test_undecodable_logo_skips_header() {
    // Valid PNG header with the image data cut off.
    let logo = png(64, 64);
    let request = DocumentRequest::new(CONTRACT).with_logo(logo[..33].to_vec());
    let result = generate(&request, &GenerateOptions::default()).unwrap();

    assert!(!result.logo_applied);
    let names = part_names(&result.bytes);
    assert!(!names.iter().any(|n| n.starts_with("word/media/")));
    assert!(!read_part(&result.bytes, "word/document.xml").contains("headerReference"));
}

#[test]
fn test_zebra_restarts_for_each_table() {
    let request = DocumentRequest::new("A: 1\nB: 2\n\nC: 3\nD: 4");
    let result = generate(&request, &GenerateOptions::default()).unwrap();
    let document = read_part(&result.bytes, "word/document.xml");

    assert_eq!(document.matches("<w:tbl>").count(), 2);
    assert_eq!(document.matches(r#"w:fill="F3F4F6""#).count(), 2);

    for table in document.split("<w:tbl>").skip(1) {
        let first_row = table.split("<w:tr>").nth(1).unwrap();
        let value_cell = first_row.split("<w:tc>").nth(2).unwrap();
        assert!(!value_cell.contains("w:shd"), "first value cell is shaded");

        let second_row = table.split("<w:tr>").nth(2).unwrap();
        let value_cell = second_row.split("<w:tc>").nth(2).unwrap();
        assert!(value_cell.contains(r#"w:fill="F3F4F6""#));
    }
}

#[test]
fn test_invalid_color_aborts() {
    for color in ["ZZZZZZ", "#12345", "#1234567", ""] {
        let request = DocumentRequest::new(CONTRACT).with_color(color);
        let err = generate(&request, &GenerateOptions::default()).unwrap_err();
        assert!(
            matches!(err, Error::InvalidColorFormat(_)),
            "{} should be rejected",
            color
        );
    }
}

#[test]
fn test_whitespace_only_text_rejected() {
    let err = generate(&DocumentRequest::new("  \n \n"), &GenerateOptions::default()).unwrap_err();
    assert!(matches!(err, Error::EmptyInput));
}

#[test]
fn test_letter_page_size() {
    let options = GenerateOptions::new().with_page(PageSetup::letter());
    let result = generate(&DocumentRequest::new("Texto"), &options).unwrap();
    let document = read_part(&result.bytes, "word/document.xml");
    assert!(document.contains(r#"<w:pgSz w:w="12240" w:h="15840"/>"#));
}

#[test]
fn test_json_output() {
    let result = ContractDoc::new()
        .with_format(OutputFormat::Json)
        .generate(CONTRACT)
        .unwrap();
    let value: serde_json::Value = serde_json::from_slice(&result.bytes).unwrap();

    let instructions = value["instructions"].as_array().unwrap();
    assert_eq!(instructions[0]["type"], "title");
    assert_eq!(instructions[2]["type"], "table");
    assert_eq!(instructions[2]["rows"][1]["value"], "Empresa XYZ");
    assert_eq!(instructions.last().unwrap()["type"], "footer");
}

#[test]
fn test_batch_generation() {
    let requests: Vec<_> = (0..8)
        .map(|i| DocumentRequest::new(format!("DOCUMENTO {}\nNúmero: {}", i, i)))
        .collect();
    let options = GenerateOptions::new().with_format(OutputFormat::Markdown);
    let results = generate_batch(&requests, &options);

    for (i, result) in results.into_iter().enumerate() {
        let markdown = String::from_utf8(result.unwrap().bytes).unwrap();
        assert!(markdown.starts_with(&format!("## DOCUMENTO {}", i)));
        assert!(markdown.contains(&format!("| Número | {} |", i)));
    }
}

#[test]
fn test_convert_file() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("contrato.txt");
    let output = dir.path().join("contrato.docx");
    std::fs::write(&input, CONTRACT).unwrap();

    let result = convert_file(&input, &output, "#4F46E5", &GenerateOptions::default()).unwrap();

    assert_eq!(result.stats.table_count, 1);
    assert_eq!(std::fs::read(&output).unwrap(), result.bytes);
}

#[cfg(feature = "async")]
#[tokio::test]
async fn test_generate_async() {
    let request = DocumentRequest::new(CONTRACT);
    let result = contractdoc::generate_async(request, GenerateOptions::default())
        .await
        .unwrap();
    assert!(result.bytes.starts_with(b"PK"));
}
