use super::*;
use crate::error::PrepError;
use crate::table::TableKind;

const HEADER: &str = "Protein IDs\tFasta headers\tOnly identified by site\tReverse\tPotential contaminant\tIntensity\tIntensity WT_1\tLFQ intensity WT_1";

fn table(rows: &[&str]) -> RawTable {
    let text = std::iter::once(HEADER)
        .chain(rows.iter().copied())
        .collect::<Vec<_>>()
        .join("\n");
    RawTable::from_reader(std::io::Cursor::new(text), TableKind::Proteins).unwrap()
}

#[test]
fn test_contaminants_are_removed() {
    let raw = table(&[
        "P1\tsp|P1|ONE_HUMAN d GN=ONE\t\t\t+\t1\t1\t1",
        "P2\tsp|P2|TWO_HUMAN d GN=TWO\t\t\t\t2\t2\t2",
        "P3\tsp|P3|THREE_HUMAN d GN=THREE\t+\t\t\t3\t3\t3",
        "P4\tsp|P4|FOUR_HUMAN d GN=FOUR\t\t+\t\t4\t4\t4",
    ]);
    let cleaned = ProteinTableCleaner::default().clean(&raw).unwrap();

    assert_eq!(cleaned.len(), 1);
    assert_eq!(cleaned.records[0].protein_id, "P2");
    assert_eq!(cleaned.summary.contaminants_removed, 3);
}

#[test]
fn test_duplicate_genes_are_all_removed() {
    let raw = table(&[
        "P1\tsp|P1|A_HUMAN d GN=ABC\t\t\t\t1\t1\t1",
        "P2\tsp|P2|B_HUMAN d GN=abc\t\t\t\t2\t2\t2",
        "P3\tsp|P3|C_HUMAN d GN=DEF\t\t\t\t3\t3\t3",
        "P4\tsp|P4|D_HUMAN no gene\t\t\t\t4\t4\t4",
        "P5\tsp|P5|E_HUMAN no gene\t\t\t\t5\t5\t5",
    ]);
    let cleaned = ProteinTableCleaner::default().clean(&raw).unwrap();

    assert!(cleaned.by_gene("ABC").is_none());
    assert_eq!(cleaned.by_gene("DEF").unwrap().protein_id, "P3");
    let without_gene: Vec<&str> = cleaned
        .records
        .iter()
        .filter(|r| r.gene_name.is_none())
        .map(|r| r.protein_id.as_str())
        .collect();
    assert_eq!(without_gene, vec!["P4", "P5"]);
    assert_eq!(cleaned.summary.duplicate_genes_removed, 2);
    assert!(cleaned.gene_names_unique());
}

#[test]
fn test_contaminant_duplicates_do_not_count() {
    let raw = table(&[
        "P1\tsp|P1|A_HUMAN d GN=ABC\t\t\t+\t1\t1\t1",
        "P2\tsp|P2|B_HUMAN d GN=ABC\t\t\t\t2\t2\t2",
    ]);
    let cleaned = ProteinTableCleaner::default().clean(&raw).unwrap();
    assert_eq!(cleaned.by_gene("ABC").unwrap().protein_id, "P2");
}

#[test]
fn test_header_fields_and_canonical_entry() {
    let raw = table(&["P1;P9\tsp|P12345|ABCD_HUMAN Some desc GN=XYZ1 PE=1;sp|P9|Z_HUMAN GN=Z\t\t\t\t1\t1\t1"]);
    let cleaned = ProteinTableCleaner::default().clean(&raw).unwrap();
    let record = &cleaned.records[0];

    assert_eq!(record.protein_id, "P12345");
    assert_eq!(record.gene_name.as_deref(), Some("XYZ1"));
    assert_eq!(record.protein_name, "ABCD");
    assert_eq!(
        cleaned.attribute(record, "Fasta headers"),
        Some("sp|P12345|ABCD_HUMAN Some desc GN=XYZ1 PE=1")
    );
    assert_eq!(cleaned.attribute(record, "Protein IDs"), Some("P1;P9"));
}

#[test]
fn test_intensity_columns_are_coerced() {
    let raw = table(&[
        "P1\tsp|P1|A_HUMAN GN=A\t\t\t\t100\t12,34\t1.5",
        "P2\tsp|P2|B_HUMAN GN=B\t\t\t\t200\t7\t",
    ]);
    let cleaned = ProteinTableCleaner::default().clean(&raw).unwrap();

    assert_eq!(
        cleaned.intensity_columns,
        vec!["Intensity", "Intensity WT_1", "LFQ intensity WT_1"]
    );
    let first = &cleaned.records[0];
    let second = &cleaned.records[1];
    assert_eq!(cleaned.intensity(first, "Intensity"), Some(Intensity::Integer(100)));
    assert_eq!(cleaned.intensity(first, "Intensity WT_1"), Some(Intensity::Integer(1234)));
    assert_eq!(cleaned.intensity(second, "Intensity WT_1"), Some(Intensity::Integer(7)));
    assert_eq!(cleaned.intensity(first, "LFQ intensity WT_1"), Some(Intensity::Float(1.5)));
    assert_eq!(cleaned.intensity(second, "LFQ intensity WT_1"), Some(Intensity::Missing));
}

#[test]
fn test_contaminant_rows_are_not_coerced() {
    let raw = table(&[
        "P1\tsp|P1|A_HUMAN GN=A\t\t\t+\t1\tgarbage\t1",
        "P2\tsp|P2|B_HUMAN GN=B\t\t\t\t2\t12,5\t2",
    ]);
    let cleaned = ProteinTableCleaner::default().clean(&raw).unwrap();
    assert_eq!(
        cleaned.intensity(&cleaned.records[0], "Intensity WT_1"),
        Some(Intensity::Integer(125))
    );
}

#[test]
fn test_unparsable_intensity_fails() {
    let raw = table(&["P1\tsp|P1|A_HUMAN GN=A\t\t\t\t1\t12,x\t1"]);
    let err = ProteinTableCleaner::default().clean(&raw).unwrap_err();
    assert!(matches!(err, PrepError::DataFormat(_)));
}

#[test]
fn test_malformed_header_fails() {
    let raw = table(&["P1\tno pipes here\t\t\t\t1\t1\t1"]);
    let err = ProteinTableCleaner::default().clean(&raw).unwrap_err();
    assert!(matches!(err, PrepError::DataFormat(_)));
}

#[test]
fn test_missing_flag_column_fails() {
    let raw = RawTable::from_reader(
        std::io::Cursor::new("Fasta headers\tReverse\tPotential contaminant\nsp|P1|A\t\t"),
        TableKind::Proteins,
    )
    .unwrap();
    let err = ProteinTableCleaner::default().clean(&raw).unwrap_err();
    assert!(err.to_string().contains("Only identified by site"));
}
