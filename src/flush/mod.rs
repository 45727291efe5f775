//! Flush protocol: what is safe to write, and in which order

mod cursor;
mod operation;
mod planner;

pub use cursor::FlushCursor;
pub use operation::{FlushOperation, RowBatch, TableColumn, TableHeader};
pub use planner::FlushPlanner;
