//! Units of work handed from the planner to the emitter

use crate::model::Row;
use crate::styles::AutomaticStyles;

/// One `<table:table-column>` of a table header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableColumn {
    pub style_name: Option<String>,
    pub default_cell_style: Option<String>,
}

/// Everything written before the first row of a table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableHeader {
    pub name: String,
    pub style_name: Option<String>,
    pub columns: Vec<TableColumn>,
}

/// Consecutive rows of one table, moved out of the model.
///
/// `rows[i]` is the row at index `first_index + i`, `None` if it was never
/// created.
#[derive(Debug, Clone)]
pub struct RowBatch {
    pub table: String,
    pub first_index: usize,
    pub rows: Vec<Option<Row>>,
}

impl RowBatch {
    /// Index of the last row of the batch
    pub fn last_index(&self) -> Option<usize> {
        self.rows.len().checked_sub(1).map(|n| self.first_index + n)
    }
}

/// Ordered step of the document output.
///
/// A valid stream is `Begin`, then for each table in creation order
/// `OpenTable`, any number of `Rows`, `CloseTable`, and finally
/// `EndDocument`. The last table may stay open across several flushes.
#[derive(Debug, Clone)]
pub enum FlushOperation {
    /// Write the package entries and the `content.xml` preamble
    Begin(AutomaticStyles),
    OpenTable(TableHeader),
    Rows(RowBatch),
    CloseTable(String),
    /// Write the postamble with these autofilter ranges, then the
    /// remaining entries, and finish the archive
    EndDocument { autofilters: Vec<String> },
}

impl FlushOperation {
    pub fn kind(&self) -> &'static str {
        match self {
            FlushOperation::Begin(_) => "begin",
            FlushOperation::OpenTable(_) => "open-table",
            FlushOperation::Rows(_) => "rows",
            FlushOperation::CloseTable(_) => "close-table",
            FlushOperation::EndDocument { .. } => "end-document",
        }
    }
}
