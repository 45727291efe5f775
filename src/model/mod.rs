//! In-memory document model: cells, rows, tables

mod cell;
mod document;
mod row;
mod table;

pub use cell::Cell;
pub use document::OdsDocument;
pub use row::Row;
pub use table::{Table, TableState};
