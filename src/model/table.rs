//! Named table: rows, column styles and flush bookkeeping

use super::row::Row;
use crate::error::{OdsError, Result};
use crate::flush::{RowBatch, TableColumn, TableHeader};
use crate::slot_list::SlotList;
use crate::styles::{ColumnStyle, SharedStyles, Style, TableStyle};
use log::warn;

/// How far the table got in the output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableState {
    /// Nothing written yet, the header can still change
    Pending,
    /// Header written, rows may follow
    Open,
    /// Closing tag written
    Closed,
}

/// A table of the document
#[derive(Debug)]
pub struct Table {
    name: String,
    rows: SlotList<Row>,
    column_capacity: usize,
    columns: SlotList<TableColumn>,
    style: Option<String>,
    styles: SharedStyles,
    flushed_rows: usize,
    state: TableState,
}

impl Table {
    pub(crate) fn new(
        name: String,
        row_capacity: usize,
        column_capacity: usize,
        styles: SharedStyles,
    ) -> Self {
        Table {
            name,
            rows: SlotList::with_capacity(row_capacity),
            column_capacity,
            columns: SlotList::new(),
            style: None,
            styles,
            flushed_rows: 0,
            state: TableState::Pending,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> TableState {
        self.state
    }

    /// One past the highest row index ever created
    pub fn row_count(&self) -> usize {
        self.rows.used_size()
    }

    /// Index of the last row handed to the writer
    pub fn last_flushed_row(&self) -> Option<usize> {
        self.flushed_rows.checked_sub(1)
    }

    /// Row at `index` if it exists and was not flushed yet
    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Row at `index`, created if needed
    pub fn row_mut(&mut self, index: usize) -> Result<&mut Row> {
        self.check_writable_row(index)?;
        let column_capacity = self.column_capacity;
        let styles = &self.styles;
        Ok(self
            .rows
            .get_or_insert_with(index, || Row::new(index, column_capacity, styles.clone())))
    }

    /// Create the row after the last one
    pub fn append_row(&mut self) -> Result<&mut Row> {
        let index = self.rows.used_size();
        self.row_mut(index)
    }

    /// Set the style of column `col`. Must be called before the table
    /// header is written.
    pub fn set_column_style(&mut self, col: usize, style: &ColumnStyle) -> Result<bool> {
        self.check_header_pending()?;
        if !self.register(Style::Column(style.clone())) {
            return Ok(false);
        }
        self.columns.set(
            col,
            TableColumn {
                style_name: Some(style.name().to_string()),
                default_cell_style: style
                    .get_default_cell_style()
                    .map(|s| s.name().to_string()),
            },
        );
        Ok(true)
    }

    pub fn set_style(&mut self, style: &TableStyle) -> Result<bool> {
        self.check_header_pending()?;
        if !self.register(Style::Table(style.clone())) {
            return Ok(false);
        }
        self.style = Some(style.name().to_string());
        Ok(true)
    }

    /// Merge `n` rows at column `col`, starting at row `row`.
    ///
    /// Cells at `col` in the following rows are covered; those rows are
    /// created if needed.
    pub fn set_rows_spanned(&mut self, row: usize, col: usize, n: i32) -> Result<()> {
        if n < 0 {
            return Err(OdsError::invalid_argument(format!(
                "can't span a negative number of rows ({})",
                n
            )));
        }
        if n <= 1 {
            return Ok(());
        }
        let n = n as usize;
        self.check_anchor(row, col, n)?;

        self.row_mut(row)?.cell_mut(col).mark_rows_spanned(n as u32);
        for r in row + 1..row + n {
            self.row_mut(r)?.cell_mut(col).set_covered();
        }
        Ok(())
    }

    /// Merge a block of `row_merge` rows by `col_merge` columns anchored at
    /// (`row`, `col`).
    ///
    /// A negative component is treated as 0; the call is a no-op when both
    /// components are at most 1.
    pub fn set_cell_merge(&mut self, row: usize, col: usize, row_merge: i32, col_merge: i32) -> Result<()> {
        let row_merge = row_merge.max(0) as usize;
        let col_merge = col_merge.max(0) as usize;
        if row_merge <= 1 && col_merge <= 1 {
            return Ok(());
        }
        self.check_anchor(row, col, row_merge.max(1))?;

        let anchor_row = self.row_mut(row)?;
        let anchor = anchor_row.cell_mut(col);
        anchor.mark_rows_spanned(row_merge as u32);
        anchor.mark_columns_spanned(col_merge as u32);
        anchor_row.cover_right_cells(col, col_merge);

        let width = col_merge.max(1);
        for r in row + 1..row + row_merge {
            let sibling = self.row_mut(r)?;
            for c in col..col + width {
                sibling.cell_mut(c).set_covered();
            }
        }
        Ok(())
    }

    /// Rows that are safe to write, moved out of the table
    pub(crate) fn take_available_rows(&mut self) -> Option<RowBatch> {
        let first_index = self.flushed_rows;
        let end = self.rows.used_size();
        if first_index >= end {
            return None;
        }
        let rows = (first_index..end).map(|i| self.rows.take(i)).collect();
        self.flushed_rows = end;
        Some(RowBatch {
            table: self.name.clone(),
            first_index,
            rows,
        })
    }

    pub(crate) fn header(&self) -> TableHeader {
        TableHeader {
            name: self.name.clone(),
            style_name: self.style.clone(),
            columns: self
                .columns
                .iter()
                .map(|column| column.cloned().unwrap_or_default())
                .collect(),
        }
    }

    pub(crate) fn mark_open(&mut self) {
        self.state = TableState::Open;
    }

    pub(crate) fn mark_closed(&mut self) {
        self.state = TableState::Closed;
    }

    fn check_writable_row(&self, index: usize) -> Result<()> {
        if self.state == TableState::Closed {
            return Err(OdsError::TableClosed(self.name.clone()));
        }
        if index < self.flushed_rows {
            return Err(OdsError::RowAlreadyFlushed {
                table: self.name.clone(),
                row: index,
            });
        }
        Ok(())
    }

    fn check_header_pending(&self) -> Result<()> {
        if self.state == TableState::Pending {
            Ok(())
        } else {
            Err(OdsError::TableHeaderWritten(self.name.clone()))
        }
    }

    /// Validate a merge anchor before any row is touched
    fn check_anchor(&self, row: usize, col: usize, rows_spanned: usize) -> Result<()> {
        for r in row..row + rows_spanned {
            self.check_writable_row(r)?;
        }
        if self.rows.get(row).map_or(false, |r| r.is_covered(col)) {
            return Err(OdsError::invalid_argument(format!(
                "can't span from covered cell ({}, {})",
                row, col
            )));
        }
        Ok(())
    }

    fn register(&self, style: Style) -> bool {
        let accepted = self.styles.register(&style);
        if !accepted {
            warn!(
                "style '{}' dropped on table '{}': style registry is frozen",
                style.name(),
                self.name
            );
        }
        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Cell;

    fn new_table() -> Table {
        Table::new("Sheet1".to_string(), 16, 16, SharedStyles::new())
    }

    fn spans(table: &Table, row: usize, col: usize) -> (u32, u32) {
        let cell = table.row(row).and_then(|r| r.cell(col)).unwrap();
        (cell.row_span(), cell.col_span())
    }

    fn covered(table: &Table, row: usize, col: usize) -> bool {
        table.row(row).map_or(false, |r| r.is_covered(col))
    }

    #[test]
    fn test_append_row() {
        let mut table = new_table();
        assert_eq!(table.append_row().unwrap().index(), 0);
        table.row_mut(5).unwrap();
        assert_eq!(table.append_row().unwrap().index(), 6);
        assert_eq!(table.row_count(), 7);
        assert!(table.row(3).is_none());
    }

    #[test]
    fn test_rows_spanned() {
        let mut table = new_table();
        table.set_rows_spanned(2, 7, 3).unwrap();

        assert_eq!(spans(&table, 2, 7), (3, 0));
        assert!(covered(&table, 3, 7));
        assert!(covered(&table, 4, 7));
        assert!(!covered(&table, 5, 7));
        assert!(table.set_rows_spanned(3, 7, 2).is_err());
        assert!(table.set_rows_spanned(0, 0, -2).is_err());
    }

    #[test]
    fn test_cell_merge() {
        let mut table = new_table();
        table.set_cell_merge(0, 7, 10, 8).unwrap();

        assert_eq!(spans(&table, 0, 7), (10, 8));
        assert!(covered(&table, 0, 8));
        assert!(covered(&table, 0, 14));
        assert!(!covered(&table, 0, 15));
        assert!(covered(&table, 9, 7));
        assert!(covered(&table, 9, 14));
        assert!(!covered(&table, 10, 7));
    }

    #[test]
    fn test_cell_merge_negative_components() {
        let mut table = new_table();
        table.set_cell_merge(0, 7, -1, 8).unwrap();
        assert_eq!(spans(&table, 0, 7), (0, 8));
        assert!(covered(&table, 0, 14));
        assert_eq!(table.row_count(), 1);

        let mut table = new_table();
        table.set_cell_merge(0, 7, 10, -1).unwrap();
        assert_eq!(spans(&table, 0, 7), (10, 0));
        assert!(!covered(&table, 0, 8));
        assert!(covered(&table, 9, 7));
        assert!(!covered(&table, 9, 8));
    }

    #[test]
    fn test_cell_merge_no_op() {
        let mut table = new_table();
        table.set_cell_merge(0, 7, -1, -1).unwrap();
        table.set_cell_merge(0, 7, 1, 1).unwrap();
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_take_available_rows() {
        let mut table = new_table();
        table.row_mut(0).unwrap().set_value(0, "a");
        table.row_mut(2).unwrap().set_value(0, "c");

        let batch = table.take_available_rows().unwrap();
        assert_eq!(batch.first_index, 0);
        assert_eq!(batch.rows.len(), 3);
        assert!(batch.rows[1].is_none());
        assert_eq!(batch.last_index(), Some(2));
        assert_eq!(table.last_flushed_row(), Some(2));
        assert!(table.take_available_rows().is_none());

        let err = table.row_mut(1).unwrap_err();
        assert!(matches!(err, OdsError::RowAlreadyFlushed { row: 1, .. }));
        assert!(table.set_rows_spanned(2, 0, 2).is_err());
        assert_eq!(table.append_row().unwrap().index(), 3);
    }

    #[test]
    fn test_header_locked_once_open() {
        let mut table = new_table();
        assert!(table.set_column_style(2, &ColumnStyle::new("co1")).unwrap());
        let header = table.header();
        assert_eq!(header.columns.len(), 3);
        assert_eq!(header.columns[0], TableColumn::default());
        assert_eq!(header.columns[2].style_name.as_deref(), Some("co1"));

        table.mark_open();
        assert!(matches!(
            table.set_column_style(0, &ColumnStyle::new("co2")),
            Err(OdsError::TableHeaderWritten(_))
        ));

        table.mark_closed();
        assert!(matches!(table.append_row(), Err(OdsError::TableClosed(_))));
    }

    #[test]
    fn test_span_anchor_keeps_value() {
        let mut table = new_table();
        table.row_mut(0).unwrap().set_value(1, 5.0);
        table.set_cell_merge(0, 1, 2, 2).unwrap();
        let cell: &Cell = table.row(0).and_then(|r| r.cell(1)).unwrap();
        assert!(cell.has_value());
        assert_eq!(cell.col_span(), 2);
    }
}
