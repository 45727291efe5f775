//! Type definitions for cell values and positions

use chrono::{NaiveDate, NaiveDateTime};
use std::fmt;

/// Value type of a cell, as written in `office:value-type`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellType {
    String,
    Float,
    Currency,
    Date,
    Percentage,
    Boolean,
    /// No value
    Void,
}

impl CellType {
    /// Attribute value for `office:value-type`, `None` for void cells
    pub fn attr_value(&self) -> Option<&'static str> {
        match self {
            CellType::String => Some("string"),
            CellType::Float => Some("float"),
            CellType::Currency => Some("currency"),
            CellType::Date => Some("date"),
            CellType::Percentage => Some("percentage"),
            CellType::Boolean => Some("boolean"),
            CellType::Void => None,
        }
    }
}

/// Represents a single cell value in a table
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    /// Empty cell
    #[default]
    Void,
    /// String value
    String(String),
    /// Float value
    Float(f64),
    /// Amount with an ISO 4217 currency code (e.g. "EUR")
    Currency { value: f64, currency: String },
    /// Date and time
    Date(NaiveDateTime),
    /// Ratio, 0.5 means 50%
    Percentage(f64),
    /// Boolean value
    Boolean(bool),
}

impl CellValue {
    pub fn cell_type(&self) -> CellType {
        match self {
            CellValue::Void => CellType::Void,
            CellValue::String(_) => CellType::String,
            CellValue::Float(_) => CellType::Float,
            CellValue::Currency { .. } => CellType::Currency,
            CellValue::Date(_) => CellType::Date,
            CellValue::Percentage(_) => CellType::Percentage,
            CellValue::Boolean(_) => CellType::Boolean,
        }
    }

    /// Check if cell is void
    pub fn is_void(&self) -> bool {
        matches!(self, CellValue::Void)
    }

    /// Convert cell value to the text shown in the cell paragraph
    pub fn as_string(&self) -> String {
        match self {
            CellValue::Void => String::new(),
            CellValue::String(s) => s.clone(),
            CellValue::Float(f) => f.to_string(),
            CellValue::Currency { value, currency } => format!("{} {}", value, currency),
            CellValue::Date(d) => format_date_value(d),
            CellValue::Percentage(p) => format!("{}%", p * 100.0),
            CellValue::Boolean(b) => b.to_string(),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_string())
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::String(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::String(s)
    }
}

impl From<f64> for CellValue {
    fn from(f: f64) -> Self {
        CellValue::Float(f)
    }
}

impl From<i64> for CellValue {
    fn from(i: i64) -> Self {
        CellValue::Float(i as f64)
    }
}

impl From<bool> for CellValue {
    fn from(b: bool) -> Self {
        CellValue::Boolean(b)
    }
}

impl From<NaiveDateTime> for CellValue {
    fn from(d: NaiveDateTime) -> Self {
        CellValue::Date(d)
    }
}

impl From<NaiveDate> for CellValue {
    fn from(d: NaiveDate) -> Self {
        CellValue::Date(d.and_time(chrono::NaiveTime::MIN))
    }
}

/// Format a date as `office:date-value` (e.g. "2009-02-14T00:31:31.011")
pub fn format_date_value(d: &NaiveDateTime) -> String {
    d.format("%Y-%m-%dT%H:%M:%S%.3f").to_string()
}

/// Convert column index to letters (0 -> A, 25 -> Z, 26 -> AA)
pub fn col_to_letter(col: usize) -> String {
    let mut result = String::new();
    let mut col = col + 1;

    while col > 0 {
        col -= 1;
        result.insert(0, (b'A' + (col % 26) as u8) as char);
        col /= 26;
    }

    result
}

/// Cell address inside a table, e.g. `Sheet1.B3` or `'My sheet'.B3`
pub fn cell_address(table_name: &str, row: usize, col: usize) -> String {
    format!(
        "{}.{}{}",
        quote_table_name(table_name),
        col_to_letter(col),
        row + 1
    )
}

/// Range address from (r1, c1) to (r2, c2), both inclusive
pub fn range_address(table_name: &str, r1: usize, c1: usize, r2: usize, c2: usize) -> String {
    format!(
        "{}:{}",
        cell_address(table_name, r1, c1),
        cell_address(table_name, r2, c2)
    )
}

fn quote_table_name(name: &str) -> String {
    if name.chars().all(|c| c.is_alphanumeric() || c == '_') {
        name.to_string()
    } else {
        format!("'{}'", name.replace('\'', "''"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_col_to_letter() {
        assert_eq!(col_to_letter(0), "A");
        assert_eq!(col_to_letter(25), "Z");
        assert_eq!(col_to_letter(26), "AA");
        assert_eq!(col_to_letter(701), "ZZ");
        assert_eq!(col_to_letter(702), "AAA");
    }

    #[test]
    fn test_range_address() {
        assert_eq!(range_address("Sheet1", 0, 0, 9, 2), "Sheet1.A1:Sheet1.C10");
        assert_eq!(
            range_address("My sheet", 0, 0, 1, 1),
            "'My sheet'.A1:'My sheet'.B2"
        );
        assert_eq!(cell_address("it's", 0, 0), "'it''s'.A1");
    }

    #[test]
    fn test_cell_value_types() {
        assert_eq!(CellValue::Void.cell_type(), CellType::Void);
        assert_eq!(CellValue::from("a").cell_type(), CellType::String);
        assert_eq!(CellValue::from(3i64), CellValue::Float(3.0));
        assert_eq!(CellType::Percentage.attr_value(), Some("percentage"));
        assert_eq!(CellType::Void.attr_value(), None);
    }

    #[test]
    fn test_date_format() {
        let d = NaiveDate::from_ymd_opt(2009, 2, 14)
            .and_then(|d| d.and_hms_milli_opt(0, 31, 31, 11))
            .unwrap();
        assert_eq!(format_date_value(&d), "2009-02-14T00:31:31.011");
        assert_eq!(CellValue::Date(d).as_string(), "2009-02-14T00:31:31.011");
    }
}
