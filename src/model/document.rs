//! The document: tables in creation order, shared styles, flush planning

use super::table::Table;
use crate::error::{OdsError, Result};
use crate::flush::{FlushCursor, FlushOperation, FlushPlanner};
use crate::styles::{DataStyle, SharedStyles, Style};
use crate::types::range_address;
use indexmap::IndexMap;

/// In-memory part of a spreadsheet being written.
///
/// Only rows that were not flushed yet are kept; see
/// [`OdsFileWriter`](crate::OdsFileWriter) for the output side.
#[derive(Debug, Default)]
pub struct OdsDocument {
    tables: IndexMap<String, Table>,
    styles: SharedStyles,
    planner: FlushPlanner,
    autofilters: Vec<String>,
}

impl OdsDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry shared by every table and row of this document
    pub fn styles(&self) -> &SharedStyles {
        &self.styles
    }

    /// Register a style up front, before the first flush freezes the registry
    pub fn register_style(&self, style: &Style) -> bool {
        self.styles.register(style)
    }

    pub fn register_data_style(&self, data_style: &DataStyle) -> bool {
        self.styles.register_data_style(data_style)
    }

    /// Add a table, or return the existing one with that name.
    ///
    /// Capacities are hints for the row and cell lists.
    pub fn add_table(&mut self, name: &str, row_capacity: usize, column_capacity: usize) -> Result<&mut Table> {
        self.check_not_finalized()?;
        let styles = self.styles.clone();
        Ok(self
            .tables
            .entry(name.to_string())
            .or_insert_with(|| Table::new(name.to_string(), row_capacity, column_capacity, styles)))
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Table names in creation order
    pub fn table_names(&self) -> Vec<String> {
        self.tables.keys().cloned().collect()
    }

    pub fn table(&self, name: &str) -> Result<&Table> {
        self.tables.get(name).ok_or_else(|| self.not_found(name))
    }

    pub fn table_mut(&mut self, name: &str) -> Result<&mut Table> {
        if !self.tables.contains_key(name) {
            return Err(self.not_found(name));
        }
        self.check_not_finalized()?;
        self.tables.get_mut(name).ok_or_else(|| OdsError::invalid_state("table vanished"))
    }

    /// Table by creation position
    pub fn table_at(&self, index: usize) -> Result<&Table> {
        self.tables
            .get_index(index)
            .map(|(_, table)| table)
            .ok_or_else(|| self.not_found(&format!("#{}", index)))
    }

    pub fn table_mut_at(&mut self, index: usize) -> Result<&mut Table> {
        if index >= self.tables.len() {
            return Err(self.not_found(&format!("#{}", index)));
        }
        self.check_not_finalized()?;
        self.tables
            .get_index_mut(index)
            .map(|(_, table)| table)
            .ok_or_else(|| OdsError::invalid_state("table vanished"))
    }

    /// Add an autofilter over a cell range of `table`
    pub fn add_autofilter(
        &mut self,
        table: &str,
        first_row: usize,
        first_col: usize,
        last_row: usize,
        last_col: usize,
    ) -> Result<()> {
        self.check_not_finalized()?;
        let name = self.table(table)?.name().to_string();
        self.autofilters
            .push(range_address(&name, first_row, first_col, last_row, last_col));
        Ok(())
    }

    pub fn cursor(&self) -> FlushCursor {
        self.planner.cursor()
    }

    pub fn is_finalized(&self) -> bool {
        self.planner.cursor().is_finished()
    }

    /// Plan the output of every row available so far
    pub fn plan_flush_rows(&mut self) -> Result<Vec<FlushOperation>> {
        self.planner.plan_rows(&mut self.tables, &self.styles)
    }

    /// Plan the rest of the document. No mutation or flush is allowed after this.
    pub fn plan_finalize(&mut self) -> Result<Vec<FlushOperation>> {
        let autofilters = self.autofilters.clone();
        self.planner
            .plan_finalize(&mut self.tables, &self.styles, autofilters)
    }

    fn check_not_finalized(&self) -> Result<()> {
        if self.is_finalized() {
            Err(OdsError::DocumentFinalized)
        } else {
            Ok(())
        }
    }

    fn not_found(&self, table: &str) -> OdsError {
        OdsError::TableNotFound {
            table: table.to_string(),
            available: self.table_names().join(", "),
        }
    }
}
