//! Decides which part of the document can be written now

use super::cursor::FlushCursor;
use super::operation::FlushOperation;
use crate::error::{OdsError, Result};
use crate::model::{Table, TableState};
use crate::styles::SharedStyles;
use indexmap::IndexMap;
use log::{debug, info};

/// Turns the current document state into flush operations and keeps the
/// cursor of what was already planned.
///
/// Tables are written in creation order. The last table stays open since
/// rows may still be appended to it; every table before it is drained and
/// closed as soon as a later table exists.
#[derive(Debug, Default)]
pub struct FlushPlanner {
    cursor: FlushCursor,
}

impl FlushPlanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> FlushCursor {
        self.cursor
    }

    /// Plan every row available so far
    pub fn plan_rows(
        &mut self,
        tables: &mut IndexMap<String, Table>,
        styles: &SharedStyles,
    ) -> Result<Vec<FlushOperation>> {
        let mut ops = Vec::new();
        let first = self.begin(styles, &mut ops)?;
        let Some(last) = tables.len().checked_sub(1) else {
            return Ok(ops);
        };

        for index in first..last {
            self.drain_table(tables, index, true, &mut ops)?;
        }
        self.drain_table(tables, last, false, &mut ops)?;
        Ok(ops)
    }

    /// Plan the rest of the document, postamble included
    pub fn plan_finalize(
        &mut self,
        tables: &mut IndexMap<String, Table>,
        styles: &SharedStyles,
        autofilters: Vec<String>,
    ) -> Result<Vec<FlushOperation>> {
        let mut ops = Vec::new();
        let first = self.begin(styles, &mut ops)?;
        for index in first..tables.len() {
            self.drain_table(tables, index, true, &mut ops)?;
        }

        ops.push(FlushOperation::EndDocument { autofilters });
        self.cursor.advance(FlushCursor::Finished)?;
        info!("document finalized: {} table(s)", tables.len());
        Ok(ops)
    }

    /// Plan the preamble on the first call. Returns the cursor's table.
    fn begin(&mut self, styles: &SharedStyles, ops: &mut Vec<FlushOperation>) -> Result<usize> {
        match self.cursor {
            FlushCursor::Finished => Err(OdsError::DocumentFinalized),
            FlushCursor::InProgress { table, .. } => Ok(table),
            FlushCursor::Undefined => {
                styles.freeze();
                ops.push(FlushOperation::Begin(styles.snapshot()));
                self.cursor.advance(FlushCursor::InProgress {
                    table: 0,
                    last_row: None,
                })?;
                debug!("flush started, style registry frozen");
                Ok(0)
            }
        }
    }

    fn drain_table(
        &mut self,
        tables: &mut IndexMap<String, Table>,
        index: usize,
        close: bool,
        ops: &mut Vec<FlushOperation>,
    ) -> Result<()> {
        let (_, table) = tables
            .get_index_mut(index)
            .ok_or_else(|| OdsError::invalid_state(format!("no table at index {}", index)))?;

        match table.state() {
            TableState::Closed => {
                return Err(OdsError::invalid_state(format!(
                    "table '{}' is already closed",
                    table.name()
                )))
            }
            TableState::Pending => {
                ops.push(FlushOperation::OpenTable(table.header()));
                table.mark_open();
            }
            TableState::Open => {}
        }

        if let Some(batch) = table.take_available_rows() {
            debug!(
                "flush rows {}..={:?} of table '{}'",
                batch.first_index,
                batch.last_index(),
                table.name()
            );
            self.cursor.advance(FlushCursor::InProgress {
                table: index,
                last_row: batch.last_index(),
            })?;
            ops.push(FlushOperation::Rows(batch));
        }

        if close {
            ops.push(FlushOperation::CloseTable(table.name().to_string()));
            table.mark_closed();
            self.cursor.advance(FlushCursor::InProgress {
                table: index + 1,
                last_row: None,
            })?;
            info!("table '{}' closed", table.name());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(names: &[&str]) -> (IndexMap<String, Table>, SharedStyles) {
        let styles = SharedStyles::new();
        let tables = names
            .iter()
            .map(|name| {
                let table = Table::new(name.to_string(), 8, 8, styles.clone());
                (name.to_string(), table)
            })
            .collect();
        (tables, styles)
    }

    fn kinds(ops: &[FlushOperation]) -> Vec<&'static str> {
        ops.iter().map(FlushOperation::kind).collect()
    }

    #[test]
    fn test_first_flush_begins_once() {
        let (mut tables, styles) = document(&[]);
        let mut planner = FlushPlanner::new();

        let ops = planner.plan_rows(&mut tables, &styles).unwrap();
        assert_eq!(kinds(&ops), vec!["begin"]);
        assert!(styles.is_frozen());
        assert_eq!(planner.cursor().position(), (0, -1));

        let ops = planner.plan_rows(&mut tables, &styles).unwrap();
        assert!(ops.is_empty());
    }

    #[test]
    fn test_last_table_stays_open() {
        let (mut tables, styles) = document(&["a"]);
        let mut planner = FlushPlanner::new();
        tables[0].append_row().unwrap();
        tables[0].append_row().unwrap();

        let ops = planner.plan_rows(&mut tables, &styles).unwrap();
        assert_eq!(kinds(&ops), vec!["begin", "open-table", "rows"]);
        assert_eq!(planner.cursor().position(), (0, 1));

        tables[0].append_row().unwrap();
        let ops = planner.plan_rows(&mut tables, &styles).unwrap();
        assert_eq!(kinds(&ops), vec!["rows"]);
        match &ops[0] {
            FlushOperation::Rows(batch) => assert_eq!(batch.first_index, 2),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_new_table_closes_previous_ones() {
        let (mut tables, styles) = document(&["a"]);
        let mut planner = FlushPlanner::new();
        tables[0].append_row().unwrap();
        planner.plan_rows(&mut tables, &styles).unwrap();

        tables[0].append_row().unwrap();
        for name in ["b", "c"] {
            let mut table = Table::new(name.to_string(), 8, 8, styles.clone());
            table.append_row().unwrap();
            tables.insert(name.to_string(), table);
        }

        let ops = planner.plan_rows(&mut tables, &styles).unwrap();
        assert_eq!(
            kinds(&ops),
            vec![
                "rows",
                "close-table",
                "open-table",
                "rows",
                "close-table",
                "open-table",
                "rows"
            ]
        );
        assert_eq!(planner.cursor().position(), (2, 0));
        assert_eq!(tables[0].state(), TableState::Closed);
        assert_eq!(tables[2].state(), TableState::Open);
    }

    #[test]
    fn test_finalize_is_terminal() {
        let (mut tables, styles) = document(&["a", "b"]);
        let mut planner = FlushPlanner::new();

        let ops = planner
            .plan_finalize(&mut tables, &styles, vec!["a.A1:a.B2".to_string()])
            .unwrap();
        assert_eq!(
            kinds(&ops),
            vec![
                "begin",
                "open-table",
                "close-table",
                "open-table",
                "close-table",
                "end-document"
            ]
        );
        assert!(planner.cursor().is_finished());
        assert!(matches!(
            planner.plan_rows(&mut tables, &styles),
            Err(OdsError::DocumentFinalized)
        ));
        assert!(matches!(
            planner.plan_finalize(&mut tables, &styles, Vec::new()),
            Err(OdsError::DocumentFinalized)
        ));
    }
}
