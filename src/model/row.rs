//! Table row: a sparse list of cells plus row-level styles

use super::cell::Cell;
use crate::error::{OdsError, Result};
use crate::slot_list::SlotList;
use crate::styles::{CellStyle, RowStyle, SharedStyles, Style};
use crate::types::CellValue;
use log::warn;

/// Row of a table.
///
/// Cells are created on first access to their column; the column count is
/// one past the highest column ever touched.
#[derive(Debug, Clone)]
pub struct Row {
    index: usize,
    cells: SlotList<Cell>,
    row_style: Option<String>,
    default_cell_style: Option<String>,
    styles: SharedStyles,
}

impl Row {
    pub(crate) fn new(index: usize, column_capacity: usize, styles: SharedStyles) -> Self {
        Row {
            index,
            cells: SlotList::with_capacity(column_capacity),
            row_style: None,
            default_cell_style: None,
            styles,
        }
    }

    /// Position of the row in its table
    pub fn index(&self) -> usize {
        self.index
    }

    /// Cell at `col`, `None` if it was never touched
    pub fn cell(&self, col: usize) -> Option<&Cell> {
        self.cells.get(col)
    }

    /// Cell at `col`, created if needed
    pub fn cell_mut(&mut self, col: usize) -> &mut Cell {
        let row = self.index;
        self.cells.get_or_insert_with(col, || Cell::new(row, col))
    }

    /// Shortcut for `cell_mut(col).set_value(value)`
    pub fn set_value<V: Into<CellValue>>(&mut self, col: usize, value: V) -> &mut Cell {
        let cell = self.cell_mut(col);
        cell.set_value(value);
        cell
    }

    pub fn cells(&self) -> &SlotList<Cell> {
        &self.cells
    }

    pub fn column_count(&self) -> usize {
        self.cells.used_size()
    }

    pub fn is_covered(&self, col: usize) -> bool {
        self.cells.get(col).map_or(false, Cell::is_covered)
    }

    pub fn row_style_name(&self) -> Option<&str> {
        self.row_style.as_deref()
    }

    pub fn default_cell_style_name(&self) -> Option<&str> {
        self.default_cell_style.as_deref()
    }

    /// Assign a cell style. Returns `false` if the style could not be
    /// registered, in which case the cell is left untouched.
    pub fn set_cell_style(&mut self, col: usize, style: &CellStyle) -> bool {
        if !self.register(Style::Cell(style.clone())) {
            return false;
        }
        self.cell_mut(col).set_style_name(style.name().to_string());
        true
    }

    /// Assign the row style, and its default cell style if it has one
    pub fn set_row_style(&mut self, style: &RowStyle) -> bool {
        if !self.register(Style::Row(style.clone())) {
            return false;
        }
        self.row_style = Some(style.name().to_string());
        if let Some(cell_style) = style.get_default_cell_style() {
            self.default_cell_style = Some(cell_style.name().to_string());
        }
        true
    }

    pub fn set_default_cell_style(&mut self, style: &CellStyle) -> bool {
        if !self.register(Style::Cell(style.clone())) {
            return false;
        }
        self.default_cell_style = Some(style.name().to_string());
        true
    }

    /// Merge `n` cells of this row, starting at `col`.
    ///
    /// No-op for `n <= 1`. Fails for a negative `n` or if the anchor is
    /// itself covered.
    pub fn set_columns_spanned(&mut self, col: usize, n: i32) -> Result<()> {
        if n < 0 {
            return Err(OdsError::invalid_argument(format!(
                "can't span a negative number of columns ({})",
                n
            )));
        }
        if n <= 1 {
            return Ok(());
        }
        if self.is_covered(col) {
            return Err(OdsError::invalid_argument(format!(
                "can't span from covered cell ({}, {})",
                self.index, col
            )));
        }
        self.cell_mut(col).mark_columns_spanned(n as u32);
        self.cover_right_cells(col, n as usize);
        Ok(())
    }

    /// Mark cells `col+1 .. col+n-1` as covered
    pub(crate) fn cover_right_cells(&mut self, col: usize, n: usize) {
        for c in col + 1..col + n {
            self.cell_mut(c).set_covered();
        }
    }

    fn register(&self, style: Style) -> bool {
        let accepted = self.styles.register(&style);
        if !accepted {
            warn!(
                "style '{}' dropped on row {}: style registry is frozen",
                style.name(),
                self.index
            );
        }
        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_row() -> Row {
        Row::new(0, 8, SharedStyles::new())
    }

    #[test]
    fn test_cells_created_lazily() {
        let mut row = new_row();
        assert!(row.cell(3).is_none());
        row.set_value(3, "x");
        assert_eq!(row.column_count(), 4);
        assert!(row.cell(1).is_none());
        assert_eq!(row.cell(3).map(|c| c.col()), Some(3));
    }

    #[test]
    fn test_columns_spanned_no_op() {
        let mut row = new_row();
        row.set_columns_spanned(10, 1).unwrap();
        row.set_columns_spanned(10, 0).unwrap();
        assert_eq!(row.column_count(), 0);
        assert!(!row.is_covered(11));
    }

    #[test]
    fn test_columns_spanned_negative() {
        let mut row = new_row();
        let err = row.set_columns_spanned(10, -1).unwrap_err();
        assert!(matches!(err, OdsError::InvalidArgument(_)));
    }

    #[test]
    fn test_columns_spanned() {
        let mut row = new_row();
        row.set_columns_spanned(10, 3).unwrap();

        assert_eq!(row.cell(10).map(Cell::col_span), Some(3));
        assert!(!row.is_covered(10));
        assert!(row.is_covered(11));
        assert!(row.is_covered(12));
        assert!(!row.is_covered(13));
        assert_eq!(row.column_count(), 13);
    }

    #[test]
    fn test_span_from_covered_cell() {
        let mut row = new_row();
        row.set_columns_spanned(10, 3).unwrap();
        assert!(row.set_columns_spanned(11, 2).is_err());
        assert_eq!(row.cell(11).map(Cell::col_span), Some(0));
    }

    #[test]
    fn test_styles_rejected_once_frozen() {
        let styles = SharedStyles::new();
        let known = CellStyle::new("known");
        assert!(styles.register(&Style::Cell(known.clone())));
        styles.freeze();

        let mut row = Row::new(0, 0, styles);
        assert!(row.set_cell_style(0, &known));
        assert!(!row.set_cell_style(1, &CellStyle::new("late")));
        assert_eq!(row.cell(0).and_then(Cell::style_name), Some("known"));
        assert!(row.cell(1).is_none());
    }

    #[test]
    fn test_row_style_sets_default_cell_style() {
        let mut row = new_row();
        let style = RowStyle::new("ro1").default_cell_style(CellStyle::new("ce1"));
        assert!(row.set_row_style(&style));
        assert_eq!(row.row_style_name(), Some("ro1"));
        assert_eq!(row.default_cell_style_name(), Some("ce1"));
    }
}
