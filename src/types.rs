//! Core data model for the `snd` table format.
//!
//! An `snd` file is UTF-8 text with one [`Record`] per line and fields separated by a single tab.
//! The first field is the row identifier; the rest are numeric values. A record whose identifier
//! starts with `#` is a header/comment row.

use crate::error::{SndError, SndResult};

/// Field separator of the `snd` format.
pub const FIELD_SEPARATOR: char = '\t';

/// Prefix marking a header/comment row.
pub const HEADER_PREFIX: char = '#';

/// One line of an `snd` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    /// 1-based line number in the source stream (0 when built in memory).
    pub line: u64,
    /// Ordered fields; `fields[0]` is the identifier.
    pub fields: Vec<String>,
}

impl Record {
    /// Create a record from already split fields.
    pub fn new(fields: Vec<String>) -> Self {
        Self { line: 0, fields }
    }

    /// Split a raw line on tabs.
    pub fn from_line(line: &str) -> Self {
        Self::new(line.split(FIELD_SEPARATOR).map(str::to_owned).collect())
    }

    /// Attach the source line number, used in error messages.
    pub fn with_line(mut self, line: u64) -> Self {
        self.line = line;
        self
    }

    /// The row identifier (empty for an empty record).
    pub fn identifier(&self) -> &str {
        self.fields.first().map(String::as_str).unwrap_or("")
    }

    /// Whether this is a header/comment row.
    pub fn is_header(&self) -> bool {
        self.identifier().starts_with(HEADER_PREFIX)
    }

    /// The fields after the identifier.
    pub fn values(&self) -> &[String] {
        self.fields.get(1..).unwrap_or(&[])
    }

    /// Parse every value field as a number.
    pub fn numeric_values(&self) -> SndResult<Vec<f64>> {
        self.values()
            .iter()
            .enumerate()
            .map(|(i, raw)| parse_value(raw, self.line, i + 1))
            .collect()
    }

    /// Number of fields including the identifier.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Re-join the fields into one tab-separated line (without terminator).
    pub fn to_line(&self) -> String {
        self.fields.join("\t")
    }
}

/// Parse one numeric field.
///
/// The literal `0` is exact zero and never goes through float parsing. Surrounding whitespace
/// is ignored. `NaN` is rejected so it can never leak into rank arithmetic.
pub fn parse_value(raw: &str, line: u64, column: usize) -> SndResult<f64> {
    if raw == "0" {
        return Ok(0.0);
    }
    let parse_error = |message: String| SndError::ParseError {
        line,
        column,
        raw: raw.to_owned(),
        message,
    };
    let value = raw.trim().parse::<f64>().map_err(|e| parse_error(e.to_string()))?;
    if value.is_nan() {
        return Err(parse_error("value is not a number".to_string()));
    }
    Ok(value)
}

/// Format a number with exactly six fraction digits.
pub fn format_fixed6(value: f64) -> String {
    format!("{value:.6}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_detection_uses_identifier_prefix() {
        assert!(Record::from_line("#\tA\tB").is_header());
        assert!(Record::from_line("#sample\t1").is_header());
        assert!(!Record::from_line("id\t#1").is_header());
        assert!(!Record::from_line("").is_header());
    }

    #[test]
    fn values_skip_identifier() {
        let r = Record::from_line("id\t1\t2.5");
        assert_eq!(r.identifier(), "id");
        assert_eq!(r.values(), &["1".to_string(), "2.5".to_string()]);
        assert_eq!(r.numeric_values().unwrap(), vec![1.0, 2.5]);
        assert_eq!(r.field_count(), 3);
    }

    #[test]
    fn identifier_only_record_has_no_values() {
        let r = Record::from_line("id");
        assert!(r.values().is_empty());
        assert!(r.numeric_values().unwrap().is_empty());
    }

    #[test]
    fn parse_value_accepts_literal_zero_and_decimals() {
        assert_eq!(parse_value("0", 1, 1).unwrap(), 0.0);
        assert_eq!(parse_value("-0.25", 1, 1).unwrap(), -0.25);
        assert_eq!(parse_value("1e3", 1, 1).unwrap(), 1000.0);
        assert_eq!(parse_value(" 7 ", 1, 1).unwrap(), 7.0);
    }

    #[test]
    fn parse_value_rejects_garbage_and_nan() {
        let err = parse_value("abc", 4, 2).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("line 4 column 2"));
        assert!(msg.contains("raw='abc'"));

        assert!(parse_value("NaN", 1, 1).is_err());
        assert!(parse_value("", 1, 1).is_err());
    }

    #[test]
    fn format_fixed6_pads_fraction() {
        assert_eq!(format_fixed6(0.5), "0.500000");
        assert_eq!(format_fixed6(9.0), "9.000000");
        assert_eq!(format_fixed6(1.0 / 3.0), "0.333333");
    }
}
