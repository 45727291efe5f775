//! Style objects and the interner that deduplicates them

mod data_style;
mod interner;
mod registry;
mod style;

pub use data_style::{DataStyle, DataStyleKind};
pub use interner::{Mode, StyleInterner};
pub use registry::{AutomaticStyles, SharedStyles, StyleRegistry};
pub use style::{
    CellStyle, ColumnStyle, RowStyle, Style, StyleFamily, StyleKey, TableStyle,
    DEFAULT_CELL_STYLE_NAME, DEFAULT_MASTER_PAGE_NAME,
};
