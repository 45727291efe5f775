//! Data styles: how numbers, dates and booleans are displayed

use crate::error::Result;
use crate::fast_writer::xml_writer::XmlWriter;
use std::io::Write;

/// Display grammar of a data style
#[derive(Debug, Clone, PartialEq)]
pub enum DataStyleKind {
    Number { decimal_places: u8, grouping: bool },
    Percentage { decimal_places: u8 },
    Currency { symbol: String, decimal_places: u8 },
    /// ISO-like `YYYY-MM-DD`
    Date,
    Boolean,
}

/// Named data style, referenced by cell styles through `style:data-style-name`
#[derive(Debug, Clone, PartialEq)]
pub struct DataStyle {
    name: String,
    kind: DataStyleKind,
}

impl DataStyle {
    pub fn new<S: Into<String>>(name: S, kind: DataStyleKind) -> Self {
        DataStyle {
            name: name.into(),
            kind,
        }
    }

    pub fn number<S: Into<String>>(name: S, decimal_places: u8, grouping: bool) -> Self {
        Self::new(
            name,
            DataStyleKind::Number {
                decimal_places,
                grouping,
            },
        )
    }

    pub fn percentage<S: Into<String>>(name: S, decimal_places: u8) -> Self {
        Self::new(name, DataStyleKind::Percentage { decimal_places })
    }

    pub fn currency<S: Into<String>, C: Into<String>>(name: S, symbol: C, decimal_places: u8) -> Self {
        Self::new(
            name,
            DataStyleKind::Currency {
                symbol: symbol.into(),
                decimal_places,
            },
        )
    }

    pub fn date<S: Into<String>>(name: S) -> Self {
        Self::new(name, DataStyleKind::Date)
    }

    pub fn boolean<S: Into<String>>(name: S) -> Self {
        Self::new(name, DataStyleKind::Boolean)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &DataStyleKind {
        &self.kind
    }

    /// Write the `number:*-style` declaration
    pub fn write_declaration<W: Write>(&self, xml: &mut XmlWriter<W>) -> Result<()> {
        let tag = match self.kind {
            DataStyleKind::Number { .. } => "number:number-style",
            DataStyleKind::Percentage { .. } => "number:percentage-style",
            DataStyleKind::Currency { .. } => "number:currency-style",
            DataStyleKind::Date => "number:date-style",
            DataStyleKind::Boolean => "number:boolean-style",
        };
        xml.start_element(tag)?;
        xml.attribute("style:name", &self.name)?;
        xml.close_start_tag()?;

        match &self.kind {
            DataStyleKind::Number {
                decimal_places,
                grouping,
            } => {
                write_number(xml, *decimal_places, *grouping)?;
            }
            DataStyleKind::Percentage { decimal_places } => {
                write_number(xml, *decimal_places, false)?;
                xml.text_element("number:text", "%")?;
            }
            DataStyleKind::Currency {
                symbol,
                decimal_places,
            } => {
                write_number(xml, *decimal_places, true)?;
                xml.text_element("number:text", " ")?;
                xml.text_element("number:currency-symbol", symbol)?;
            }
            DataStyleKind::Date => {
                for (i, part) in ["number:year", "number:month", "number:day"].iter().enumerate() {
                    if i > 0 {
                        xml.text_element("number:text", "-")?;
                    }
                    xml.start_element(part)?;
                    xml.attribute("number:style", "long")?;
                    xml.close_empty()?;
                }
            }
            DataStyleKind::Boolean => {
                xml.empty_element("number:boolean")?;
            }
        }

        xml.end_element(tag)
    }
}

fn write_number<W: Write>(xml: &mut XmlWriter<W>, decimal_places: u8, grouping: bool) -> Result<()> {
    xml.start_element("number:number")?;
    xml.attribute_int("number:decimal-places", decimal_places)?;
    xml.attribute_int("number:min-integer-digits", 1u8)?;
    if grouping {
        xml.attribute("number:grouping", "true")?;
    }
    xml.close_empty()
}
