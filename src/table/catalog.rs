use std::collections::HashSet;

use crate::error::{PrepError, Result};

use super::RawTable;

/// Header prefix MaxQuant uses for per-sample raw intensity columns
pub const INTENSITY_PREFIX: &str = "Intensity ";

/// Extract sample identifiers from column headers.
///
/// Every header starting with `prefix` contributes its remainder once. The
/// result is ordered longest first so that clustering sees the most
/// specific labels before shorter ones; equal lengths keep column order.
pub fn extract_identifiers<S: AsRef<str>>(headers: &[S], prefix: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut identifiers: Vec<String> = headers
        .iter()
        .filter_map(|h| h.as_ref().strip_prefix(prefix))
        .filter(|id| seen.insert(*id))
        .map(str::to_string)
        .collect();

    // sort_by is stable, ties stay in column order
    identifiers.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()));
    identifiers
}

/// Sample identifier lookup for one header prefix convention
#[derive(Debug, Clone)]
pub struct ColumnCatalog {
    prefix: String,
}

impl Default for ColumnCatalog {
    fn default() -> Self {
        Self::new(INTENSITY_PREFIX)
    }
}

impl ColumnCatalog {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Identifiers of `table`, failing if it carries none
    pub fn identifiers(&self, table: &RawTable) -> Result<Vec<String>> {
        let identifiers = extract_identifiers(table.headers(), &self.prefix);
        if identifiers.is_empty() {
            return Err(PrepError::data_format(format!(
                "{} has no columns starting with '{}'",
                table.kind(),
                self.prefix
            )));
        }
        Ok(identifiers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::TableKind;
    use proptest::prelude::*;

    #[test]
    fn test_extract_strips_prefix_and_orders_by_length() {
        let headers = [
            "Protein IDs",
            "Intensity WT_1",
            "Intensity",
            "Intensity Control_10",
            "LFQ intensity WT_1",
            "Intensity KO_2",
        ];
        let ids = extract_identifiers(&headers, INTENSITY_PREFIX);
        assert_eq!(ids, vec!["Control_10", "WT_1", "KO_2"]);
    }

    #[test]
    fn test_extract_deduplicates() {
        let headers = ["Intensity A", "Intensity B", "Intensity A"];
        assert_eq!(extract_identifiers(&headers, INTENSITY_PREFIX), vec!["A", "B"]);
    }

    #[test]
    fn test_catalog_requires_identifiers() {
        let table = RawTable::new(
            TableKind::Peptides,
            vec!["Sequence".to_string(), "Intensity".to_string()],
            Vec::new(),
        );
        let err = ColumnCatalog::default().identifiers(&table).unwrap_err();
        assert!(matches!(err, PrepError::DataFormat(_)));
        assert!(err.to_string().contains("peptides.txt"));
    }

    proptest! {
        #[test]
        fn prop_extract_returns_each_suffix_once_longest_first(
            suffixes in prop::collection::vec("[A-Za-z0-9_]{1,12}", 0..20),
            noise in prop::collection::vec("[a-z ]{0,10}", 0..5),
        ) {
            let mut headers: Vec<String> = suffixes.iter().map(|s| format!("Intensity {s}")).collect();
            headers.extend(noise.iter().cloned());

            let ids = extract_identifiers(&headers, INTENSITY_PREFIX);

            let expected: HashSet<&str> = suffixes.iter().map(String::as_str).collect();
            let got: HashSet<&str> = ids.iter().map(String::as_str).collect();
            prop_assert_eq!(ids.len(), got.len());
            prop_assert_eq!(got, expected);
            for pair in ids.windows(2) {
                prop_assert!(pair[0].chars().count() >= pair[1].chars().count());
            }
        }
    }
}
