//! Document-wide style registry shared by tables, rows and cells

use super::data_style::DataStyle;
use super::interner::{Mode, StyleInterner};
use super::style::{Style, StyleKey};
use crate::error::Result;
use crate::fast_writer::xml_writer::XmlWriter;
use parking_lot::Mutex;
use std::io::Write;
use std::sync::Arc;

/// Registry of the automatic styles of one document
#[derive(Debug, Default)]
pub struct StyleRegistry {
    styles: StyleInterner<StyleKey, Style>,
    data_styles: StyleInterner<String, DataStyle>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `style` and the styles it refers to.
    ///
    /// The first style registered under a name wins: registering another
    /// style with the same family and name is accepted and reuses the
    /// stored one. Returns `false` only if the style is new and the
    /// registry is frozen.
    pub fn register(&mut self, style: &Style) -> bool {
        let nested_ok = match style {
            Style::Cell(cell_style) => match cell_style.get_data_style() {
                Some(data_style) => self.register_data_style(data_style),
                None => true,
            },
            Style::Row(row_style) => match row_style.get_default_cell_style() {
                Some(cell_style) => self.register(&Style::Cell(cell_style.clone())),
                None => true,
            },
            Style::Column(column_style) => match column_style.get_default_cell_style() {
                Some(cell_style) => self.register(&Style::Cell(cell_style.clone())),
                None => true,
            },
            Style::Table(_) => true,
        };
        if !nested_ok {
            return false;
        }

        let key = style.key();
        if self.styles.contains_key(&key) {
            return true;
        }
        self.styles.add(key, style.clone(), Mode::Create)
    }

    /// Register a data style on its own
    pub fn register_data_style(&mut self, data_style: &DataStyle) -> bool {
        let key = data_style.name().to_string();
        if self.data_styles.contains_key(&key) {
            return true;
        }
        self.data_styles.add(key, data_style.clone(), Mode::Create)
    }

    pub fn contains(&self, key: &StyleKey) -> bool {
        self.styles.contains_key(key)
    }

    pub fn freeze(&mut self) {
        self.styles.freeze();
        self.data_styles.freeze();
    }

    pub fn is_frozen(&self) -> bool {
        self.styles.is_frozen()
    }

    /// Copy of every registered style, in registration order
    pub fn snapshot(&self) -> AutomaticStyles {
        AutomaticStyles {
            data_styles: self.data_styles.values().cloned().collect(),
            styles: self.styles.values().cloned().collect(),
        }
    }
}

/// Registry handle cloned into every table and row of a document
#[derive(Debug, Clone, Default)]
pub struct SharedStyles(Arc<Mutex<StyleRegistry>>);

impl SharedStyles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, style: &Style) -> bool {
        self.0.lock().register(style)
    }

    pub fn register_data_style(&self, data_style: &DataStyle) -> bool {
        self.0.lock().register_data_style(data_style)
    }

    pub fn contains(&self, key: &StyleKey) -> bool {
        self.0.lock().contains(key)
    }

    pub fn freeze(&self) {
        self.0.lock().freeze();
    }

    pub fn is_frozen(&self) -> bool {
        self.0.lock().is_frozen()
    }

    pub fn snapshot(&self) -> AutomaticStyles {
        self.0.lock().snapshot()
    }
}

/// Frozen content of the `<office:automatic-styles>` block
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AutomaticStyles {
    pub data_styles: Vec<DataStyle>,
    pub styles: Vec<Style>,
}

impl AutomaticStyles {
    /// Data styles first, since cell styles refer to them
    pub fn write<W: Write>(&self, xml: &mut XmlWriter<W>) -> Result<()> {
        if self.data_styles.is_empty() && self.styles.is_empty() {
            return xml.empty_element("office:automatic-styles");
        }
        xml.start_element("office:automatic-styles")?;
        xml.close_start_tag()?;
        for data_style in &self.data_styles {
            data_style.write_declaration(xml)?;
        }
        for style in &self.styles {
            style.write_declaration(xml)?;
        }
        xml.end_element("office:automatic-styles")
    }
}
