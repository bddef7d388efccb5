//! Integration tests for classification and assembly.

use contractdoc::{
    classify_text, plan, zebra_shade, Assembler, ClassifiedLine, Color, RenderInstruction,
    TableRow, ZEBRA_FILL,
};

const CONTRACT: &str = "CONTRATO DE PRESTAÇÃO DE SERVIÇOS

CONTRATANTE: João Silva
CONTRATADO: Empresa XYZ

CLÁUSULA 1 - OBJETO
O presente contrato tem por objeto...
- Item um
- Item dois
";

fn primary() -> Color {
    Color::rgb(0x4F, 0x46, 0xE5)
}

#[test]
fn test_contract_scenario() {
    let instructions = Assembler::new(primary()).assemble(classify_text(CONTRACT));

    assert_eq!(
        instructions,
        vec![
            RenderInstruction::Title {
                text: "CONTRATO DE PRESTAÇÃO DE SERVIÇOS".into(),
                color: primary(),
            },
            RenderInstruction::BlankSpacer,
            RenderInstruction::Table {
                rows: vec![
                    TableRow::new("CONTRATANTE", "João Silva"),
                    TableRow::new("CONTRATADO", "Empresa XYZ"),
                ],
                color: primary(),
            },
            RenderInstruction::BlankSpacer,
            RenderInstruction::Title {
                text: "CLÁUSULA 1 - OBJETO".into(),
                color: primary(),
            },
            RenderInstruction::Paragraph {
                text: "O presente contrato tem por objeto...".into(),
            },
            RenderInstruction::ListItem {
                text: "Item um".into(),
            },
            RenderInstruction::ListItem {
                text: "Item dois".into(),
            },
        ]
    );
}

#[test]
fn test_contract_scenario_plan_wraps_body() {
    let plan = plan(CONTRACT, primary(), Some(vec![0x89]), "rodapé");

    assert!(matches!(
        plan.instructions.first(),
        Some(RenderInstruction::Header { .. })
    ));
    assert_eq!(
        plan.instructions.last(),
        Some(&RenderInstruction::Footer {
            text: "rodapé".into()
        })
    );
    assert_eq!(plan.body().count(), 8);
    assert_eq!(plan.first_title(), Some("CONTRATO DE PRESTAÇÃO DE SERVIÇOS"));

    let stats = plan.stats();
    assert_eq!(stats.title_count, 2);
    assert_eq!(stats.table_count, 1);
    assert_eq!(stats.table_row_count, 2);
    assert_eq!(stats.list_item_count, 2);
    assert!(stats.has_header);
}

#[test]
fn test_rows_kept_in_order_with_first_colon_split() {
    let instructions =
        Assembler::new(primary()).assemble(classify_text("A: 1\nB: 2\nC: 3\nHorário: 10:30"));

    match instructions.as_slice() {
        [RenderInstruction::Table { rows, .. }] => {
            let pairs: Vec<_> = rows
                .iter()
                .map(|r| (r.key.as_str(), r.value.as_str()))
                .collect();
            assert_eq!(
                pairs,
                vec![("A", "1"), ("B", "2"), ("C", "3"), ("Horário", "10:30")]
            );
        }
        other => panic!("expected a single table, got {:?}", other),
    }
}

#[test]
fn test_each_interruption_closes_the_table() {
    let text = "A: 1\nTexto\nB: 2\nTITULO\nC: 3\n- item\nD: 4\n\nE: 5";
    let instructions = Assembler::new(primary()).assemble(classify_text(text));

    let tables = instructions
        .iter()
        .filter(|i| matches!(i, RenderInstruction::Table { .. }))
        .count();
    assert_eq!(tables, 5);
    assert!(instructions.iter().all(|i| match i {
        RenderInstruction::Table { rows, .. } => rows.len() == 1,
        _ => true,
    }));
}

#[test]
fn test_streaming_push_matches_batch_assembly() {
    let lines = classify_text(CONTRACT);

    let mut assembler = Assembler::new(primary());
    let mut streamed = Vec::new();
    for line in lines.clone() {
        let opens_table = line.is_table_row();
        assembler.push(line, &mut streamed);
        if opens_table {
            assert!(assembler.in_table());
            assert!(assembler.pending_rows() > 0);
        }
    }
    assembler.finish(&mut streamed);

    assert_eq!(streamed, Assembler::new(primary()).assemble(lines));
}

#[test]
fn test_assemblers_are_independent() {
    let mut first = Assembler::new(Color::rgb(1, 1, 1));
    let mut second = Assembler::new(Color::rgb(2, 2, 2));
    let mut out_first = Vec::new();
    let mut out_second = Vec::new();

    first.push(ClassifiedLine::TableRow(TableRow::new("A", "1")), &mut out_first);
    second.push(
        ClassifiedLine::Paragraph {
            text: "Texto".into(),
        },
        &mut out_second,
    );

    assert!(first.in_table());
    assert!(!second.in_table());
    assert!(out_first.is_empty());
    assert_eq!(out_second.len(), 1);
}

#[test]
fn test_zebra_pattern() {
    let shades: Vec<_> = (0..4).map(|i| zebra_shade(i, ZEBRA_FILL)).collect();
    assert_eq!(shades, vec![None, Some(ZEBRA_FILL), None, Some(ZEBRA_FILL)]);
}

#[test]
fn test_empty_text_yields_empty_body() {
    let plan = plan("", primary(), None, "rodapé");
    assert_eq!(plan.body().count(), 0);
    assert_eq!(plan.instructions.len(), 1);
}
