//! A single table cell

use crate::types::{CellType, CellValue};
use chrono::NaiveDateTime;

/// Cell of a row, created on first access to its column
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    row: usize,
    col: usize,
    value: CellValue,
    style: Option<String>,
    row_span: u32,
    col_span: u32,
    covered: bool,
    tooltip: Option<String>,
}

impl Cell {
    pub(crate) fn new(row: usize, col: usize) -> Self {
        Cell {
            row,
            col,
            value: CellValue::Void,
            style: None,
            row_span: 0,
            col_span: 0,
            covered: false,
            tooltip: None,
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn value(&self) -> &CellValue {
        &self.value
    }

    pub fn cell_type(&self) -> CellType {
        self.value.cell_type()
    }

    /// Name of the cell style, if any
    pub fn style_name(&self) -> Option<&str> {
        self.style.as_deref()
    }

    pub fn row_span(&self) -> u32 {
        self.row_span
    }

    pub fn col_span(&self) -> u32 {
        self.col_span
    }

    /// True if the cell lies inside the merge region of another cell
    pub fn is_covered(&self) -> bool {
        self.covered
    }

    pub fn tooltip(&self) -> Option<&str> {
        self.tooltip.as_deref()
    }

    /// A void cell without style or tooltip renders like an absent one
    pub fn has_value(&self) -> bool {
        !(self.value.is_void() && self.style.is_none() && self.tooltip.is_none())
    }

    /// True if the cell needs its own tag: it has a value, or it anchors a span
    pub fn is_renderable(&self) -> bool {
        self.has_value() || (!self.covered && (self.col_span > 1 || self.row_span > 1))
    }

    pub fn set_value<V: Into<CellValue>>(&mut self, value: V) {
        self.value = value.into();
    }

    pub fn set_string<S: Into<String>>(&mut self, value: S) {
        self.value = CellValue::String(value.into());
    }

    pub fn set_float(&mut self, value: f64) {
        self.value = CellValue::Float(value);
    }

    pub fn set_currency<S: Into<String>>(&mut self, value: f64, currency: S) {
        self.value = CellValue::Currency {
            value,
            currency: currency.into(),
        };
    }

    pub fn set_date(&mut self, value: NaiveDateTime) {
        self.value = CellValue::Date(value);
    }

    pub fn set_percentage(&mut self, value: f64) {
        self.value = CellValue::Percentage(value);
    }

    pub fn set_boolean(&mut self, value: bool) {
        self.value = CellValue::Boolean(value);
    }

    pub fn set_tooltip<S: Into<String>>(&mut self, tooltip: S) {
        self.tooltip = Some(tooltip.into());
    }

    /// Remove value and tooltip. Style and span state are kept.
    pub fn clear(&mut self) {
        self.value = CellValue::Void;
        self.tooltip = None;
    }

    pub(crate) fn set_style_name(&mut self, name: String) {
        self.style = Some(name);
    }

    pub(crate) fn mark_columns_spanned(&mut self, n: u32) {
        self.col_span = n;
    }

    pub(crate) fn mark_rows_spanned(&mut self, n: u32) {
        self.row_span = n;
    }

    pub(crate) fn set_covered(&mut self) {
        self.covered = true;
        self.row_span = 0;
        self.col_span = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_has_value() {
        let mut cell = Cell::new(0, 0);
        assert!(!cell.has_value());

        cell.set_style_name("ce1".to_string());
        assert!(cell.has_value());

        let mut cell = Cell::new(0, 1);
        cell.set_tooltip("note");
        assert!(cell.has_value());
        cell.clear();
        assert!(!cell.has_value());
    }

    #[test]
    fn test_typed_setters() {
        let mut cell = Cell::new(2, 3);
        cell.set_currency(10.5, "EUR");
        assert_eq!(cell.cell_type(), CellType::Currency);

        let date = NaiveDate::from_ymd_opt(2024, 1, 31)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        cell.set_date(date);
        assert_eq!(cell.value(), &CellValue::Date(date));

        cell.set_value(42i64);
        assert_eq!(cell.value(), &CellValue::Float(42.0));
        assert_eq!((cell.row(), cell.col()), (2, 3));
    }

    #[test]
    fn test_covered_cell_drops_spans() {
        let mut cell = Cell::new(0, 0);
        cell.mark_columns_spanned(3);
        cell.set_covered();
        assert!(cell.is_covered());
        assert_eq!(cell.col_span(), 0);
    }

    #[test]
    fn test_void_span_anchor_is_renderable() {
        let mut cell = Cell::new(0, 0);
        assert!(!cell.is_renderable());

        cell.mark_rows_spanned(2);
        assert!(!cell.has_value());
        assert!(cell.is_renderable());

        cell.set_covered();
        assert!(!cell.is_renderable());

        let mut cell = Cell::new(0, 1);
        cell.mark_columns_spanned(1);
        assert!(!cell.is_renderable());
    }
}
