use std::fmt;

use crate::error::{PrepError, Result};

/// A quantitation cell after numeric coercion
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intensity {
    Integer(i64),
    Float(f64),
    /// Empty cell in an otherwise numeric column
    Missing,
}

impl Intensity {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Intensity::Integer(v) => Some(*v as f64),
            Intensity::Float(v) => Some(*v),
            Intensity::Missing => None,
        }
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Intensity::Integer(v) => write!(f, "{v}"),
            Intensity::Float(v) => write!(f, "{v}"),
            Intensity::Missing => Ok(()),
        }
    }
}

/// How the cells of an intensity column were interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnEncoding {
    /// Every non-empty cell is an integer
    Integer,
    /// Every non-empty cell is a decimal number with a point separator
    Float,
    /// Not numeric as written; parsed with the decimal-comma rule
    DecimalComma,
}

/// Classify a column by whether its cells already parse as numbers
pub fn column_encoding<'a, I>(cells: I) -> ColumnEncoding
where
    I: IntoIterator<Item = &'a str>,
{
    let mut encoding = ColumnEncoding::Integer;
    for cell in cells.into_iter().map(str::trim).filter(|c| !c.is_empty()) {
        if cell.parse::<i64>().is_ok() {
            continue;
        }
        if cell.parse::<f64>().is_ok() {
            encoding = ColumnEncoding::Float;
            continue;
        }
        return ColumnEncoding::DecimalComma;
    }
    encoding
}

/// Parse a decimal-comma cell as an integer.
///
/// Commas become periods and the separators are then dropped, so `"12,34"`
/// yields `1234`. Fractional parts are not rounded.
pub fn coerce_decimal_comma(cell: &str) -> Option<i64> {
    let digits: String = cell
        .trim()
        .replace(',', ".")
        .chars()
        .filter(|c| *c != '.')
        .collect();
    digits.parse().ok()
}

/// Convert every cell of one intensity column
pub fn coerce_column<'a, I>(column: &str, cells: I) -> Result<(ColumnEncoding, Vec<Intensity>)>
where
    I: IntoIterator<Item = &'a str> + Clone,
{
    let encoding = column_encoding(cells.clone());
    let values = cells
        .into_iter()
        .map(|cell| {
            let trimmed = cell.trim();
            match encoding {
                ColumnEncoding::Integer | ColumnEncoding::Float if trimmed.is_empty() => {
                    Ok(Intensity::Missing)
                }
                ColumnEncoding::Integer => trimmed
                    .parse()
                    .map(Intensity::Integer)
                    .map_err(|_| invalid_cell(column, cell)),
                ColumnEncoding::Float => trimmed
                    .parse()
                    .map(Intensity::Float)
                    .map_err(|_| invalid_cell(column, cell)),
                ColumnEncoding::DecimalComma => coerce_decimal_comma(cell)
                    .map(Intensity::Integer)
                    .ok_or_else(|| invalid_cell(column, cell)),
            }
        })
        .collect::<Result<Vec<_>>>()?;
    Ok((encoding, values))
}

fn invalid_cell(column: &str, cell: &str) -> PrepError {
    PrepError::data_format(format!(
        "value '{cell}' in column '{column}' cannot be converted to an integer"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decimal_comma_drops_separator() {
        assert_eq!(coerce_decimal_comma("12,34"), Some(1234));
        assert_eq!(coerce_decimal_comma("1.234,5"), Some(12345));
        assert_eq!(coerce_decimal_comma("0"), Some(0));
        assert_eq!(coerce_decimal_comma(""), None);
        assert_eq!(coerce_decimal_comma("n/a"), None);
    }

    #[test]
    fn test_column_encoding() {
        assert_eq!(column_encoding(["1", "", "20"]), ColumnEncoding::Integer);
        assert_eq!(column_encoding(["1", "2.5e6"]), ColumnEncoding::Float);
        assert_eq!(column_encoding(["1", "2,5"]), ColumnEncoding::DecimalComma);
    }

    #[test]
    fn test_numeric_column_is_kept() {
        let (encoding, values) = coerce_column("Intensity A", ["10", "", "1.5"]).unwrap();
        assert_eq!(encoding, ColumnEncoding::Float);
        assert_eq!(
            values,
            vec![Intensity::Float(10.0), Intensity::Missing, Intensity::Float(1.5)]
        );
    }

    #[test]
    fn test_decimal_comma_column() {
        let (encoding, values) = coerce_column("Intensity A", ["12,34", "7"]).unwrap();
        assert_eq!(encoding, ColumnEncoding::DecimalComma);
        assert_eq!(values, vec![Intensity::Integer(1234), Intensity::Integer(7)]);
    }

    #[test]
    fn test_unparsable_cell_is_data_format_error() {
        let err = coerce_column("Intensity A", ["12,34", "abc"]).unwrap_err();
        assert!(matches!(err, PrepError::DataFormat(_)));
        assert!(err.to_string().contains("abc"));
        assert!(err.to_string().contains("Intensity A"));
    }

    #[test]
    fn test_empty_cell_in_decimal_comma_column_fails() {
        assert!(coerce_column("Intensity A", ["12,34", ""]).is_err());
    }
}
