//! Automatic styles referenced by cells, rows, columns and tables

use super::data_style::DataStyle;
use crate::error::Result;
use crate::fast_writer::xml_writer::XmlWriter;
use std::io::Write;

/// Name of the common cell style declared in `styles.xml`
pub const DEFAULT_CELL_STYLE_NAME: &str = "Default";
/// Name of the master page declared in `styles.xml`
pub const DEFAULT_MASTER_PAGE_NAME: &str = "DefaultMasterPage";

/// `style:family` of a style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleFamily {
    TableCell,
    TableRow,
    TableColumn,
    Table,
}

impl StyleFamily {
    pub fn attr_value(&self) -> &'static str {
        match self {
            StyleFamily::TableCell => "table-cell",
            StyleFamily::TableRow => "table-row",
            StyleFamily::TableColumn => "table-column",
            StyleFamily::Table => "table",
        }
    }
}

/// Identity of a style: two styles of different families may share a name
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StyleKey {
    pub family: StyleFamily,
    pub name: String,
}

/// Cell formatting
///
/// ```
/// use odsstream::styles::{CellStyle, DataStyle};
///
/// let style = CellStyle::new("header")
///     .bold(true)
///     .background_color("#dddddd")
///     .data_style(DataStyle::number("num2", 2, true));
/// assert_eq!(style.name(), "header");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CellStyle {
    name: String,
    bold: bool,
    italic: bool,
    font_color: Option<String>,
    background_color: Option<String>,
    border: Option<String>,
    wrap: bool,
    data_style: Option<DataStyle>,
}

impl CellStyle {
    pub fn new<S: Into<String>>(name: S) -> Self {
        CellStyle {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = italic;
        self
    }

    /// Font color as `#rrggbb`
    pub fn font_color<S: Into<String>>(mut self, color: S) -> Self {
        self.font_color = Some(color.into());
        self
    }

    /// Background color as `#rrggbb`
    pub fn background_color<S: Into<String>>(mut self, color: S) -> Self {
        self.background_color = Some(color.into());
        self
    }

    /// Border on all sides, e.g. `0.5pt solid #000000`
    pub fn border<S: Into<String>>(mut self, border: S) -> Self {
        self.border = Some(border.into());
        self
    }

    pub fn wrap(mut self, wrap: bool) -> Self {
        self.wrap = wrap;
        self
    }

    pub fn data_style(mut self, data_style: DataStyle) -> Self {
        self.data_style = Some(data_style);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get_data_style(&self) -> Option<&DataStyle> {
        self.data_style.as_ref()
    }

    fn write_declaration<W: Write>(&self, xml: &mut XmlWriter<W>) -> Result<()> {
        open_style(xml, &self.name, StyleFamily::TableCell)?;
        xml.attribute("style:parent-style-name", DEFAULT_CELL_STYLE_NAME)?;
        if let Some(data_style) = &self.data_style {
            xml.attribute("style:data-style-name", data_style.name())?;
        }
        xml.close_start_tag()?;

        if self.background_color.is_some() || self.border.is_some() || self.wrap {
            xml.start_element("style:table-cell-properties")?;
            if let Some(color) = &self.background_color {
                xml.attribute("fo:background-color", color)?;
            }
            if let Some(border) = &self.border {
                xml.attribute("fo:border", border)?;
            }
            if self.wrap {
                xml.attribute("fo:wrap-option", "wrap")?;
            }
            xml.close_empty()?;
        }

        if self.bold || self.italic || self.font_color.is_some() {
            xml.start_element("style:text-properties")?;
            if self.bold {
                xml.attribute("fo:font-weight", "bold")?;
            }
            if self.italic {
                xml.attribute("fo:font-style", "italic")?;
            }
            if let Some(color) = &self.font_color {
                xml.attribute("fo:color", color)?;
            }
            xml.close_empty()?;
        }

        xml.end_element("style:style")
    }
}

/// Row formatting
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RowStyle {
    name: String,
    height: Option<String>,
    default_cell_style: Option<CellStyle>,
}

impl RowStyle {
    pub fn new<S: Into<String>>(name: S) -> Self {
        RowStyle {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Fixed height, e.g. `0.5cm`. Without it, the optimal height is used.
    pub fn height<S: Into<String>>(mut self, height: S) -> Self {
        self.height = Some(height.into());
        self
    }

    /// Cell style applied to the cells of the row that have none
    pub fn default_cell_style(mut self, style: CellStyle) -> Self {
        self.default_cell_style = Some(style);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get_default_cell_style(&self) -> Option<&CellStyle> {
        self.default_cell_style.as_ref()
    }

    fn write_declaration<W: Write>(&self, xml: &mut XmlWriter<W>) -> Result<()> {
        open_style(xml, &self.name, StyleFamily::TableRow)?;
        xml.close_start_tag()?;
        xml.start_element("style:table-row-properties")?;
        xml.attribute("fo:break-before", "auto")?;
        match &self.height {
            Some(height) => xml.attribute("style:row-height", height)?,
            None => xml.attribute("style:use-optimal-row-height", "true")?,
        }
        xml.close_empty()?;
        xml.end_element("style:style")
    }
}

/// Column formatting
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnStyle {
    name: String,
    width: String,
    default_cell_style: Option<CellStyle>,
}

impl ColumnStyle {
    pub fn new<S: Into<String>>(name: S) -> Self {
        ColumnStyle {
            name: name.into(),
            width: "2.5cm".to_string(),
            default_cell_style: None,
        }
    }

    pub fn width<S: Into<String>>(mut self, width: S) -> Self {
        self.width = width.into();
        self
    }

    pub fn default_cell_style(mut self, style: CellStyle) -> Self {
        self.default_cell_style = Some(style);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn get_width(&self) -> &str {
        &self.width
    }

    pub fn get_default_cell_style(&self) -> Option<&CellStyle> {
        self.default_cell_style.as_ref()
    }

    fn write_declaration<W: Write>(&self, xml: &mut XmlWriter<W>) -> Result<()> {
        open_style(xml, &self.name, StyleFamily::TableColumn)?;
        xml.close_start_tag()?;
        xml.start_element("style:table-column-properties")?;
        xml.attribute("fo:break-before", "auto")?;
        xml.attribute("style:column-width", &self.width)?;
        xml.close_empty()?;
        xml.end_element("style:style")
    }
}

/// Table formatting
#[derive(Debug, Clone, PartialEq)]
pub struct TableStyle {
    name: String,
}

impl TableStyle {
    pub fn new<S: Into<String>>(name: S) -> Self {
        TableStyle { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn write_declaration<W: Write>(&self, xml: &mut XmlWriter<W>) -> Result<()> {
        open_style(xml, &self.name, StyleFamily::Table)?;
        xml.attribute("style:master-page-name", DEFAULT_MASTER_PAGE_NAME)?;
        xml.close_start_tag()?;
        xml.start_element("style:table-properties")?;
        xml.attribute("table:display", "true")?;
        xml.attribute("style:writing-mode", "lr-tb")?;
        xml.close_empty()?;
        xml.end_element("style:style")
    }
}

/// Any style that lands in the automatic styles of `content.xml`
#[derive(Debug, Clone, PartialEq)]
pub enum Style {
    Cell(CellStyle),
    Row(RowStyle),
    Column(ColumnStyle),
    Table(TableStyle),
}

impl Style {
    pub fn family(&self) -> StyleFamily {
        match self {
            Style::Cell(_) => StyleFamily::TableCell,
            Style::Row(_) => StyleFamily::TableRow,
            Style::Column(_) => StyleFamily::TableColumn,
            Style::Table(_) => StyleFamily::Table,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Style::Cell(s) => s.name(),
            Style::Row(s) => s.name(),
            Style::Column(s) => s.name(),
            Style::Table(s) => s.name(),
        }
    }

    pub fn key(&self) -> StyleKey {
        StyleKey {
            family: self.family(),
            name: self.name().to_string(),
        }
    }

    /// Write the `<style:style>` declaration
    pub fn write_declaration<W: Write>(&self, xml: &mut XmlWriter<W>) -> Result<()> {
        match self {
            Style::Cell(s) => s.write_declaration(xml),
            Style::Row(s) => s.write_declaration(xml),
            Style::Column(s) => s.write_declaration(xml),
            Style::Table(s) => s.write_declaration(xml),
        }
    }
}

fn open_style<W: Write>(xml: &mut XmlWriter<W>, name: &str, family: StyleFamily) -> Result<()> {
    xml.start_element("style:style")?;
    xml.attribute("style:name", name)?;
    xml.attribute("style:family", family.attr_value())
}
