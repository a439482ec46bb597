use std::sync::LazyLock;

use regex::Regex;

use crate::error::{PrepError, Result};

/// Gene symbol token inside a UniProt FASTA description, e.g. `GN=ACTB`
static GENE_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"GN=(\S+)").expect("gene name pattern is valid"));

/// Fields decomposed from a `Fasta headers` cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaHeader {
    /// Database tag before the first `|`, e.g. `sp` or `tr`
    pub source_tag: String,
    pub protein_id: String,
    pub description: String,
    /// Upper-cased `GN=` value, if the description carries one
    pub gene_name: Option<String>,
    /// Description up to its first `_`, e.g. `ACTB` for `ACTB_HUMAN ...`
    pub protein_name: String,
}

/// Parse the canonical (first) entry of a composite FASTA header cell.
///
/// `sp|P60709|ACTB_HUMAN Actin GN=ACTB PE=1;sp|...` yields protein id
/// `P60709`, gene name `ACTB` and protein name `ACTB`.
pub fn parse_composite_header(cell: &str) -> Result<FastaHeader> {
    let canonical = cell.split(';').next().unwrap_or_default();
    let mut fields = canonical.splitn(3, '|');
    let (Some(source_tag), Some(protein_id), Some(description)) =
        (fields.next(), fields.next(), fields.next())
    else {
        return Err(PrepError::data_format(format!(
            "FASTA header '{cell}' does not have the form <tag>|<protein id>|<description>"
        )));
    };

    let gene_name = GENE_NAME_REGEX
        .captures(description)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_uppercase());
    let protein_name = description
        .split('_')
        .next()
        .unwrap_or_default()
        .to_string();

    Ok(FastaHeader {
        source_tag: source_tag.to_string(),
        protein_id: protein_id.to_string(),
        description: description.to_string(),
        gene_name,
        protein_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_swissprot_header() {
        let header = parse_composite_header("sp|P12345|ABCD_HUMAN Some desc GN=XYZ1 PE=1").unwrap();
        assert_eq!(header.source_tag, "sp");
        assert_eq!(header.protein_id, "P12345");
        assert_eq!(header.description, "ABCD_HUMAN Some desc GN=XYZ1 PE=1");
        assert_eq!(header.gene_name.as_deref(), Some("XYZ1"));
        assert_eq!(header.protein_name, "ABCD");
    }

    #[test]
    fn test_only_first_entry_is_used() {
        let header =
            parse_composite_header("sp|P1|ONE_HUMAN a GN=one;tr|P2|TWO_HUMAN b GN=two").unwrap();
        assert_eq!(header.protein_id, "P1");
        assert_eq!(header.gene_name.as_deref(), Some("ONE"));
    }

    #[test]
    fn test_gene_name_at_end_of_description() {
        let header = parse_composite_header("tr|Q9|Q9_MOUSE Uncharacterized GN=Gm123").unwrap();
        assert_eq!(header.gene_name.as_deref(), Some("GM123"));
    }

    #[test]
    fn test_missing_gene_name_is_none() {
        let header = parse_composite_header("sp|P1|ONE_HUMAN no gene token PE=2").unwrap();
        assert_eq!(header.gene_name, None);
        assert_eq!(header.protein_name, "ONE");
    }

    #[test]
    fn test_description_without_underscore() {
        let header = parse_composite_header("sp|P1|Plain description").unwrap();
        assert_eq!(header.protein_name, "Plain description");
    }

    #[test]
    fn test_description_keeps_further_pipes() {
        let header = parse_composite_header("sp|P1|A_B|C GN=X").unwrap();
        assert_eq!(header.description, "A_B|C GN=X");
    }

    #[test]
    fn test_malformed_header_is_data_format_error() {
        let err = parse_composite_header("P12345 no pipes").unwrap_err();
        assert!(matches!(err, PrepError::DataFormat(_)));
        assert!(parse_composite_header("").is_err());
    }
}
