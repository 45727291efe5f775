//! Fixed entries of an ODS package

use crate::error::Result;
use crate::fast_writer::xml_writer::XmlWriter;
use crate::styles::{DEFAULT_CELL_STYLE_NAME, DEFAULT_MASTER_PAGE_NAME};
use std::io::Write;

pub const MIMETYPE: &str = "application/vnd.oasis.opendocument.spreadsheet";

pub const XML_DECLARATION: &str = "<?xml version=\"1.0\" encoding=\"UTF-8\"?>";

const NS_OFFICE: &str = "urn:oasis:names:tc:opendocument:xmlns:office:1.0";
const NS_STYLE: &str = "urn:oasis:names:tc:opendocument:xmlns:style:1.0";
const NS_TEXT: &str = "urn:oasis:names:tc:opendocument:xmlns:text:1.0";
const NS_TABLE: &str = "urn:oasis:names:tc:opendocument:xmlns:table:1.0";
const NS_FO: &str = "urn:oasis:names:tc:opendocument:xmlns:xsl-fo-compatible:1.0";
const NS_NUMBER: &str = "urn:oasis:names:tc:opendocument:xmlns:datastyle:1.0";
const NS_SVG: &str = "urn:oasis:names:tc:opendocument:xmlns:svg-compatible:1.0";
const NS_META: &str = "urn:oasis:names:tc:opendocument:xmlns:meta:1.0";
const NS_DC: &str = "http://purl.org/dc/elements/1.1/";
const NS_CONFIG: &str = "urn:oasis:names:tc:opendocument:xmlns:config:1.0";
const NS_MANIFEST: &str = "urn:oasis:names:tc:opendocument:xmlns:manifest:1.0";

const OFFICE_VERSION: &str = "1.2";

/// Entries listed in the manifest, besides the package root
const MANIFEST_ENTRIES: [&str; 4] = ["content.xml", "styles.xml", "meta.xml", "settings.xml"];

/// Namespaces declared on `office:document-content` and `office:document-styles`
pub fn write_document_namespaces<W: Write>(xml: &mut XmlWriter<W>) -> Result<()> {
    xml.attribute("xmlns:office", NS_OFFICE)?;
    xml.attribute("xmlns:style", NS_STYLE)?;
    xml.attribute("xmlns:text", NS_TEXT)?;
    xml.attribute("xmlns:table", NS_TABLE)?;
    xml.attribute("xmlns:fo", NS_FO)?;
    xml.attribute("xmlns:number", NS_NUMBER)?;
    xml.attribute("xmlns:svg", NS_SVG)?;
    xml.attribute("office:version", OFFICE_VERSION)
}

pub fn write_manifest<W: Write>(xml: &mut XmlWriter<W>) -> Result<()> {
    xml.write_str(XML_DECLARATION)?;
    xml.start_element("manifest:manifest")?;
    xml.attribute("xmlns:manifest", NS_MANIFEST)?;
    xml.attribute("manifest:version", OFFICE_VERSION)?;
    xml.close_start_tag()?;

    xml.start_element("manifest:file-entry")?;
    xml.attribute("manifest:full-path", "/")?;
    xml.attribute("manifest:version", OFFICE_VERSION)?;
    xml.attribute("manifest:media-type", MIMETYPE)?;
    xml.close_empty()?;
    for entry in MANIFEST_ENTRIES {
        xml.start_element("manifest:file-entry")?;
        xml.attribute("manifest:full-path", entry)?;
        xml.attribute("manifest:media-type", "text/xml")?;
        xml.close_empty()?;
    }

    xml.end_element("manifest:manifest")
}

/// `meta.xml` with the generator and creation date
pub fn write_meta<W: Write>(xml: &mut XmlWriter<W>, generator: &str, creation_date: &str) -> Result<()> {
    xml.write_str(XML_DECLARATION)?;
    xml.start_element("office:document-meta")?;
    xml.attribute("xmlns:office", NS_OFFICE)?;
    xml.attribute("xmlns:meta", NS_META)?;
    xml.attribute("xmlns:dc", NS_DC)?;
    xml.attribute("office:version", OFFICE_VERSION)?;
    xml.close_start_tag()?;
    xml.start_element("office:meta")?;
    xml.close_start_tag()?;
    xml.text_element("meta:generator", generator)?;
    xml.text_element("meta:creation-date", creation_date)?;
    xml.text_element("dc:date", creation_date)?;
    xml.end_element("office:meta")?;
    xml.end_element("office:document-meta")
}

/// `styles.xml`: the common cell style and the master page used by tables
pub fn write_styles<W: Write>(xml: &mut XmlWriter<W>) -> Result<()> {
    xml.write_str(XML_DECLARATION)?;
    xml.start_element("office:document-styles")?;
    write_document_namespaces(xml)?;
    xml.close_start_tag()?;

    xml.start_element("office:styles")?;
    xml.close_start_tag()?;
    xml.start_element("style:style")?;
    xml.attribute("style:name", DEFAULT_CELL_STYLE_NAME)?;
    xml.attribute("style:family", "table-cell")?;
    xml.close_start_tag()?;
    xml.start_element("style:text-properties")?;
    xml.attribute("style:font-name", "Arial")?;
    xml.close_empty()?;
    xml.end_element("style:style")?;
    xml.end_element("office:styles")?;

    xml.start_element("office:automatic-styles")?;
    xml.close_start_tag()?;
    xml.start_element("style:page-layout")?;
    xml.attribute("style:name", "pm1")?;
    xml.close_empty()?;
    xml.end_element("office:automatic-styles")?;

    xml.start_element("office:master-styles")?;
    xml.close_start_tag()?;
    xml.start_element("style:master-page")?;
    xml.attribute("style:name", DEFAULT_MASTER_PAGE_NAME)?;
    xml.attribute("style:page-layout-name", "pm1")?;
    xml.close_empty()?;
    xml.end_element("office:master-styles")?;

    xml.end_element("office:document-styles")
}

/// `settings.xml` with one view entry per table
pub fn write_settings<W: Write>(xml: &mut XmlWriter<W>, tables: &[String]) -> Result<()> {
    xml.write_str(XML_DECLARATION)?;
    xml.start_element("office:document-settings")?;
    xml.attribute("xmlns:office", NS_OFFICE)?;
    xml.attribute("xmlns:config", NS_CONFIG)?;
    xml.attribute("office:version", OFFICE_VERSION)?;
    xml.close_start_tag()?;
    xml.start_element("office:settings")?;
    xml.close_start_tag()?;

    xml.start_element("config:config-item-set")?;
    xml.attribute("config:name", "ooo:view-settings")?;
    xml.close_start_tag()?;
    xml.start_element("config:config-item-map-indexed")?;
    xml.attribute("config:name", "Views")?;
    xml.close_start_tag()?;
    xml.start_element("config:config-item-map-entry")?;
    xml.close_start_tag()?;
    config_item(xml, "ViewId", "string", "view1")?;

    xml.start_element("config:config-item-map-named")?;
    xml.attribute("config:name", "Tables")?;
    xml.close_start_tag()?;
    for table in tables {
        xml.start_element("config:config-item-map-entry")?;
        xml.attribute("config:name", table)?;
        xml.close_start_tag()?;
        config_item(xml, "CursorPositionX", "int", "0")?;
        config_item(xml, "CursorPositionY", "int", "0")?;
        config_item(xml, "HorizontalSplitMode", "short", "0")?;
        config_item(xml, "VerticalSplitMode", "short", "0")?;
        xml.end_element("config:config-item-map-entry")?;
    }
    xml.end_element("config:config-item-map-named")?;

    if let Some(active) = tables.first() {
        config_item(xml, "ActiveTable", "string", active)?;
    }
    xml.end_element("config:config-item-map-entry")?;
    xml.end_element("config:config-item-map-indexed")?;
    xml.end_element("config:config-item-set")?;

    xml.end_element("office:settings")?;
    xml.end_element("office:document-settings")
}

fn config_item<W: Write>(xml: &mut XmlWriter<W>, name: &str, kind: &str, value: &str) -> Result<()> {
    xml.start_element("config:config-item")?;
    xml.attribute("config:name", name)?;
    xml.attribute("config:type", kind)?;
    xml.close_start_tag()?;
    xml.write_escaped(value)?;
    xml.end_element("config:config-item")
}
