//! Property tests for classification and assembly.

use contractdoc::{classify_text, Assembler, ClassifiedLine, Color, RenderInstruction};
use proptest::prelude::*;

fn line() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        "[A-Za-zÁÉç ]{1,20}",
        "[A-Z]{1,10}: [a-z0-9 ]{1,10}",
        "- [a-z ]{1,15}",
        "[0-9]{1,2}\\. [A-Za-z ]{1,15}",
        "CLÁUSULA [0-9]{1,2}",
    ]
}

fn document() -> impl Strategy<Value = String> {
    prop::collection::vec(line(), 0..40).prop_map(|lines| lines.join("\n"))
}

proptest! {
    #[test]
    fn non_blank_elements_never_exceed_non_blank_lines(text in document()) {
        let lines = classify_text(&text);
        let non_blank_lines = lines.iter().filter(|l| !l.is_blank()).count();
        let instructions = Assembler::new(Color::default()).assemble(lines);
        let non_blank_elements = instructions
            .iter()
            .filter(|i| !matches!(i, RenderInstruction::BlankSpacer))
            .count();

        prop_assert!(non_blank_elements <= non_blank_lines);
    }

    #[test]
    fn table_rows_are_preserved_in_order(text in document()) {
        let lines = classify_text(&text);
        let input_rows: Vec<_> = lines
            .iter()
            .filter_map(|l| match l {
                ClassifiedLine::TableRow(row) => Some(row.clone()),
                _ => None,
            })
            .collect();

        let instructions = Assembler::new(Color::default()).assemble(lines);
        let output_rows: Vec<_> = instructions
            .iter()
            .filter_map(|i| match i {
                RenderInstruction::Table { rows, .. } => Some(rows.clone()),
                _ => None,
            })
            .flatten()
            .collect();

        prop_assert_eq!(input_rows, output_rows);
    }

    #[test]
    fn blank_count_is_preserved(text in document()) {
        let lines = classify_text(&text);
        let blanks = lines.iter().filter(|l| l.is_blank()).count();
        let instructions = Assembler::new(Color::default()).assemble(lines);
        let spacers = instructions
            .iter()
            .filter(|i| matches!(i, RenderInstruction::BlankSpacer))
            .count();

        prop_assert_eq!(blanks, spacers);
    }

    #[test]
    fn no_empty_tables(text in document()) {
        let instructions = Assembler::new(Color::default()).assemble(classify_text(&text));
        let all_tables_non_empty = instructions.iter().all(|i| match i {
            RenderInstruction::Table { rows, .. } => !rows.is_empty(),
            _ => true,
        });
        prop_assert!(all_tables_non_empty);
    }
}
