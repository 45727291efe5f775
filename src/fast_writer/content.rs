//! Rendering of `content.xml`: preamble, tables, rows, cells, postamble

use super::package::{write_document_namespaces, XML_DECLARATION};
use crate::error::Result;
use crate::fast_writer::xml_writer::XmlWriter;
use crate::flush::{RowBatch, TableColumn, TableHeader};
use crate::model::{Cell, Row};
use crate::styles::{AutomaticStyles, DEFAULT_CELL_STYLE_NAME};
use crate::types::{format_date_value, CellValue};
use std::io::Write;

/// Everything before the first table
pub fn write_preamble<W: Write>(xml: &mut XmlWriter<W>, styles: &AutomaticStyles) -> Result<()> {
    xml.write_str(XML_DECLARATION)?;
    xml.start_element("office:document-content")?;
    write_document_namespaces(xml)?;
    xml.close_start_tag()?;
    xml.empty_element("office:scripts")?;

    xml.start_element("office:font-face-decls")?;
    xml.close_start_tag()?;
    xml.start_element("style:font-face")?;
    xml.attribute("style:name", "Arial")?;
    xml.attribute("svg:font-family", "Arial")?;
    xml.attribute("style:font-family-generic", "swiss")?;
    xml.attribute("style:font-pitch", "variable")?;
    xml.close_empty()?;
    xml.end_element("office:font-face-decls")?;

    styles.write(xml)?;

    xml.write_str("<office:body><office:spreadsheet>")
}

/// Autofilters and closing tags
pub fn write_postamble<W: Write>(xml: &mut XmlWriter<W>, autofilters: &[String]) -> Result<()> {
    if !autofilters.is_empty() {
        xml.start_element("table:database-ranges")?;
        xml.close_start_tag()?;
        for range in autofilters {
            xml.start_element("table:database-range")?;
            xml.attribute("table:display-filter-buttons", "true")?;
            xml.attribute("table:target-range-address", range)?;
            xml.close_empty()?;
        }
        xml.end_element("table:database-ranges")?;
    }
    xml.write_str("</office:spreadsheet></office:body></office:document-content>")
}

/// Opening tag of a table and its columns.
///
/// Consecutive identical columns are written once with
/// `table:number-columns-repeated`.
pub fn write_table_header<W: Write>(xml: &mut XmlWriter<W>, header: &TableHeader) -> Result<()> {
    xml.start_element("table:table")?;
    xml.attribute("table:name", &header.name)?;
    if let Some(style) = &header.style_name {
        xml.attribute("table:style-name", style)?;
    }
    xml.close_start_tag()?;

    if header.columns.is_empty() {
        return write_column(xml, &TableColumn::default(), 1);
    }

    let mut columns = header.columns.iter();
    let mut current = columns.next();
    let mut count = 1usize;
    for column in columns {
        if Some(column) == current {
            count += 1;
            continue;
        }
        if let Some(previous) = current {
            write_column(xml, previous, count)?;
        }
        current = Some(column);
        count = 1;
    }
    if let Some(previous) = current {
        write_column(xml, previous, count)?;
    }
    Ok(())
}

fn write_column<W: Write>(xml: &mut XmlWriter<W>, column: &TableColumn, count: usize) -> Result<()> {
    xml.start_element("table:table-column")?;
    if let Some(style) = &column.style_name {
        xml.attribute("table:style-name", style)?;
    }
    if count >= 2 {
        xml.attribute_int("table:number-columns-repeated", count)?;
    }
    xml.attribute(
        "table:default-cell-style-name",
        column
            .default_cell_style
            .as_deref()
            .unwrap_or(DEFAULT_CELL_STYLE_NAME),
    )?;
    xml.close_empty()
}

pub fn write_table_close<W: Write>(xml: &mut XmlWriter<W>) -> Result<()> {
    xml.end_element("table:table")
}

/// Rows of a batch, runs of absent rows compressed
pub fn write_row_batch<W: Write>(xml: &mut XmlWriter<W>, batch: &RowBatch) -> Result<()> {
    let mut absent = 0usize;
    for row in &batch.rows {
        match row {
            None => absent += 1,
            Some(row) => {
                write_absent_rows(xml, absent)?;
                absent = 0;
                write_row(xml, row)?;
            }
        }
    }
    write_absent_rows(xml, absent)
}

fn write_absent_rows<W: Write>(xml: &mut XmlWriter<W>, count: usize) -> Result<()> {
    if count == 0 {
        return Ok(());
    }
    xml.start_element("table:table-row")?;
    if count >= 2 {
        xml.attribute_int("table:number-rows-repeated", count)?;
    }
    xml.close_start_tag()?;
    xml.end_element("table:table-row")
}

/// One row, runs of empty cells compressed.
///
/// A row without cells is written as an empty `table:table-row`, the same
/// shape used for a run of absent rows.
pub fn write_row<W: Write>(xml: &mut XmlWriter<W>, row: &Row) -> Result<()> {
    xml.start_element("table:table-row")?;
    if let Some(style) = row.row_style_name() {
        xml.attribute("table:style-name", style)?;
    }
    if let Some(style) = row.default_cell_style_name() {
        xml.attribute("table:default-cell-style-name", style)?;
    }
    xml.close_start_tag()?;

    let mut empty = 0usize;
    for cell in row.cells().iter() {
        match cell {
            Some(cell) if cell.is_renderable() => {
                write_empty_cells(xml, empty)?;
                empty = 0;
                write_cell(xml, cell)?;
            }
            _ => empty += 1,
        }
    }
    write_empty_cells(xml, empty)?;

    xml.end_element("table:table-row")
}

fn write_empty_cells<W: Write>(xml: &mut XmlWriter<W>, count: usize) -> Result<()> {
    if count == 0 {
        return Ok(());
    }
    xml.start_element("table:table-cell")?;
    if count >= 2 {
        xml.attribute_int("table:number-columns-repeated", count)?;
    }
    xml.close_empty()
}

/// One cell with a value, a style, a tooltip or a span
pub fn write_cell<W: Write>(xml: &mut XmlWriter<W>, cell: &Cell) -> Result<()> {
    let tag = if cell.is_covered() {
        "table:covered-table-cell"
    } else {
        "table:table-cell"
    };
    xml.start_element(tag)?;
    if let Some(style) = cell.style_name() {
        xml.attribute("table:style-name", style)?;
    }
    write_value_attributes(xml, cell.value())?;
    if !cell.is_covered() {
        if cell.col_span() > 1 {
            xml.attribute_int("table:number-columns-spanned", cell.col_span())?;
        }
        if cell.row_span() > 1 {
            xml.attribute_int("table:number-rows-spanned", cell.row_span())?;
        }
    }

    if cell.value().is_void() && cell.tooltip().is_none() {
        return xml.close_empty();
    }
    xml.close_start_tag()?;

    if let Some(tooltip) = cell.tooltip() {
        xml.write_str("<office:annotation>")?;
        xml.text_element("text:p", tooltip)?;
        xml.write_str("</office:annotation>")?;
    }
    if !cell.value().is_void() {
        xml.text_element("text:p", &cell.value().as_string())?;
    }
    xml.end_element(tag)
}

fn write_value_attributes<W: Write>(xml: &mut XmlWriter<W>, value: &CellValue) -> Result<()> {
    if let Some(value_type) = value.cell_type().attr_value() {
        xml.attribute("office:value-type", value_type)?;
    }
    match value {
        CellValue::Void | CellValue::String(_) => Ok(()),
        CellValue::Float(v) | CellValue::Percentage(v) => {
            xml.attribute("office:value", &format_double(*v))
        }
        CellValue::Currency { value, currency } => {
            xml.attribute("office:currency", currency)?;
            xml.attribute("office:value", &format_double(*value))
        }
        CellValue::Date(d) => xml.attribute("office:date-value", &format_date_value(d)),
        CellValue::Boolean(b) => xml.attribute("office:boolean-value", if *b { "true" } else { "false" }),
    }
}

/// `xsd:double` lexical form
fn format_double(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "INF" } else { "-INF" }.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::styles::{CellStyle, SharedStyles};

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut XmlWriter<Vec<u8>>) -> Result<()>,
    {
        let mut xml = XmlWriter::new(Vec::new());
        f(&mut xml).unwrap();
        String::from_utf8(xml.into_inner().unwrap()).unwrap()
    }

    fn new_row(index: usize) -> Row {
        Row::new(index, 16, SharedStyles::new())
    }

    #[test]
    fn test_row_run_length() {
        let mut row = new_row(0);
        row.set_value(0, "a");
        row.set_value(1, "b");
        row.set_value(2, "c");
        row.cell_mut(999);

        let xml = render(|xml| write_row(xml, &row));
        assert_eq!(
            xml,
            "<table:table-row>\
             <table:table-cell office:value-type=\"string\"><text:p>a</text:p></table:table-cell>\
             <table:table-cell office:value-type=\"string\"><text:p>b</text:p></table:table-cell>\
             <table:table-cell office:value-type=\"string\"><text:p>c</text:p></table:table-cell>\
             <table:table-cell table:number-columns-repeated=\"997\"/>\
             </table:table-row>"
        );
    }

    #[test]
    fn test_run_of_one_has_no_repeat() {
        let mut row = new_row(0);
        row.set_value(1, 2.5);
        let xml = render(|xml| write_row(xml, &row));
        assert_eq!(
            xml,
            "<table:table-row><table:table-cell/>\
             <table:table-cell office:value-type=\"float\" office:value=\"2.5\"><text:p>2.5</text:p></table:table-cell>\
             </table:table-row>"
        );
    }

    #[test]
    fn test_run_tag_count() {
        let positions = [2usize, 3, 7, 20];
        let mut row = new_row(0);
        for &p in &positions {
            row.set_value(p, true);
        }
        row.cell_mut(25);

        let xml = render(|xml| write_row(xml, &row));
        assert_eq!(xml.matches("office:boolean-value").count(), positions.len());
        assert_eq!(xml.matches("<table:table-cell/>").count(), 0);
        let repeats: Vec<&str> = xml
            .split("table:number-columns-repeated=\"")
            .skip(1)
            .map(|s| &s[..s.find('"').unwrap()])
            .collect();
        assert_eq!(repeats, vec!["2", "3", "12", "5"]);
    }

    #[test]
    fn test_styled_void_cell() {
        let mut row = new_row(0);
        row.set_cell_style(0, &CellStyle::new("ce1"));
        let xml = render(|xml| write_row(xml, &row));
        assert_eq!(
            xml,
            "<table:table-row><table:table-cell table:style-name=\"ce1\"/></table:table-row>"
        );
    }

    #[test]
    fn test_cell_values() {
        let mut row = new_row(0);
        row.cell_mut(0).set_currency(1.5, "EUR");
        row.cell_mut(1).set_percentage(0.25);
        row.cell_mut(2).set_string("x & y");
        row.cell_mut(2).set_tooltip("note");

        let xml = render(|xml| write_row(xml, &row));
        assert!(xml.contains(
            "<table:table-cell office:value-type=\"currency\" office:currency=\"EUR\" office:value=\"1.5\">"
        ));
        assert!(xml.contains("office:value-type=\"percentage\" office:value=\"0.25\""));
        assert!(xml.contains(
            "<office:annotation><text:p>note</text:p></office:annotation><text:p>x &amp; y</text:p>"
        ));
    }

    #[test]
    fn test_covered_cells() {
        let mut row = new_row(0);
        row.set_value(0, "anchor");
        row.set_columns_spanned(0, 3).unwrap();
        row.set_value(2, "hidden");

        let xml = render(|xml| write_row(xml, &row));
        assert!(xml.contains(
            "<table:table-cell office:value-type=\"string\" table:number-columns-spanned=\"3\">"
        ));
        assert!(xml.contains("<table:table-cell/><table:covered-table-cell office:value-type=\"string\">"));
    }

    #[test]
    fn test_absent_rows() {
        let mut row = new_row(3);
        row.set_value(0, 1.0);
        let batch = RowBatch {
            table: "t".to_string(),
            first_index: 0,
            rows: vec![None, None, None, Some(row), None],
        };
        let xml = render(|xml| write_row_batch(xml, &batch));
        assert!(xml.starts_with(
            "<table:table-row table:number-rows-repeated=\"3\"></table:table-row>"
        ));
        assert!(xml.ends_with("</table:table-row><table:table-row></table:table-row>"));
    }

    #[test]
    fn test_empty_row_matches_absent_row() {
        let batch = RowBatch {
            table: "t".to_string(),
            first_index: 0,
            rows: vec![Some(new_row(0)), None],
        };
        let xml = render(|xml| write_row_batch(xml, &batch));
        assert_eq!(
            xml,
            "<table:table-row></table:table-row><table:table-row></table:table-row>"
        );
    }

    #[test]
    fn test_void_span_anchor_keeps_spans() {
        let mut row = new_row(0);
        row.set_columns_spanned(2, 3).unwrap();

        let xml = render(|xml| write_row(xml, &row));
        assert_eq!(
            xml,
            "<table:table-row>\
             <table:table-cell table:number-columns-repeated=\"2\"/>\
             <table:table-cell table:number-columns-spanned=\"3\"/>\
             <table:table-cell table:number-columns-repeated=\"2\"/>\
             </table:table-row>"
        );
    }

    #[test]
    fn test_non_finite_values() {
        let mut row = new_row(0);
        row.set_value(0, f64::NAN);
        row.set_value(1, f64::INFINITY);
        row.cell_mut(2).set_currency(f64::NEG_INFINITY, "EUR");

        let xml = render(|xml| write_row(xml, &row));
        assert!(xml.contains("office:value=\"NaN\""));
        assert!(xml.contains("office:value=\"INF\""));
        assert!(xml.contains("office:value=\"-INF\""));
        assert!(!xml.contains("office:value=\"inf\""));
    }

    #[test]
    fn test_table_header_columns() {
        let styled = TableColumn {
            style_name: Some("co1".to_string()),
            default_cell_style: None,
        };
        let header = TableHeader {
            name: "Sheet <1>".to_string(),
            style_name: Some("ta1".to_string()),
            columns: vec![TableColumn::default(), styled.clone(), styled],
        };
        let xml = render(|xml| write_table_header(xml, &header));
        assert_eq!(
            xml,
            "<table:table table:name=\"Sheet &lt;1&gt;\" table:style-name=\"ta1\">\
             <table:table-column table:default-cell-style-name=\"Default\"/>\
             <table:table-column table:style-name=\"co1\" table:number-columns-repeated=\"2\" \
             table:default-cell-style-name=\"Default\"/>"
        );
    }

    #[test]
    fn test_postamble_autofilters() {
        let xml = render(|xml| write_postamble(xml, &["t.A1:t.B3".to_string()]));
        assert_eq!(
            xml,
            "<table:database-ranges><table:database-range table:display-filter-buttons=\"true\" \
             table:target-range-address=\"t.A1:t.B3\"/></table:database-ranges>\
             </office:spreadsheet></office:body></office:document-content>"
        );
    }
}
