//! Position of the output in the document

use crate::error::{OdsError, Result};

/// How much of the document was already serialized
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlushCursor {
    /// Nothing written yet
    #[default]
    Undefined,
    /// Preamble written; `last_row` is the last row written in `table`
    InProgress {
        table: usize,
        last_row: Option<usize>,
    },
    /// Postamble written
    Finished,
}

impl FlushCursor {
    /// `(table, row)` with `-1` for "none"; `Finished` sorts after everything
    pub fn position(&self) -> (i64, i64) {
        match *self {
            FlushCursor::Undefined => (-1, -1),
            FlushCursor::InProgress { table, last_row } => {
                (table as i64, last_row.map_or(-1, |r| r as i64))
            }
            FlushCursor::Finished => (i64::MAX, i64::MAX),
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, FlushCursor::Finished)
    }

    pub fn table_index(&self) -> Option<usize> {
        match *self {
            FlushCursor::InProgress { table, .. } => Some(table),
            _ => None,
        }
    }

    /// Move to `next`, refusing to go backwards
    pub fn advance(&mut self, next: FlushCursor) -> Result<()> {
        if next.position() < self.position() {
            return Err(OdsError::invalid_state(format!(
                "flush cursor can't move back from {:?} to {:?}",
                self, next
            )));
        }
        if self.is_finished() {
            return Err(OdsError::DocumentFinalized);
        }
        *self = next;
        Ok(())
    }
}
