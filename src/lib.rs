//! # odsstream
//!
//! A Rust library for writing large OpenDocument spreadsheets (`.ods`) in
//! a streaming fashion.
//!
//! ## Features
//!
//! - **Streaming Write**: rows are written and released while the document
//!   is still being built, so memory stays bounded
//! - **Run-length compression**: runs of empty cells and absent rows are
//!   written as a single repeated tag
//! - **Style interning**: each style is declared once, however many cells use it
//! - **Queued mode**: model construction and ZIP compression on separate threads
//! - **Type Safety**: typed cell values (float, currency, date, percentage, boolean)
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use odsstream::styles::{CellStyle, DataStyle};
//! use odsstream::{OdsFileWriter, WriterConfig, WriterMode};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = WriterConfig::from_env().mode(WriterMode::Queued);
//! let mut writer = OdsFileWriter::create_with_config("report.ods", config)?;
//!
//! let money = CellStyle::new("money").data_style(DataStyle::currency("eur", "€", 2));
//! let table = writer.add_table("Sales", 1024, 8)?;
//!
//! let header = table.append_row()?;
//! header.set_value(0, "Item");
//! header.set_value(1, "Amount");
//!
//! for i in 0..10_000 {
//!     let row = table.append_row()?;
//!     row.set_value(0, format!("item {}", i));
//!     row.cell_mut(1).set_currency(i as f64 * 1.5, "EUR");
//!     row.set_cell_style(1, &money);
//! }
//! writer.document_mut().add_autofilter("Sales", 0, 0, 10_000, 1)?;
//!
//! writer.close()?;
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod fast_writer;
pub mod flush;
pub mod model;
pub mod slot_list;
pub mod styles;
pub mod types;
pub mod writer;

pub use error::{OdsError, Result};
pub use fast_writer::{ArchiveSink, MemoryArchive, MemoryProfile, ZipArchive};
pub use model::{Cell, OdsDocument, Row, Table};
pub use types::{CellType, CellValue};
pub use writer::{OdsFileWriter, WriterConfig, WriterMode};
