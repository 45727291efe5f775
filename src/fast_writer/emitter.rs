//! Applies flush operations to an archive

use super::archive::ArchiveSink;
use super::content;
use super::package;
use super::xml_writer::{XmlWriter, DEFAULT_BUFFER_SIZE};
use crate::error::{OdsError, Result};
use crate::flush::FlushOperation;
use chrono::Local;
use log::debug;

/// Progress of the emitter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitterState {
    /// Nothing written
    Undefined,
    /// `content.xml` is open
    InProgress,
    /// Archive finished
    Finished,
}

/// Serializes flush operations into the entries of an ODS archive.
///
/// Operations must arrive in the order produced by
/// [`FlushPlanner`](crate::flush::FlushPlanner); anything else is rejected
/// with [`OdsError::InvalidState`].
pub struct StreamingEmitter<A: ArchiveSink> {
    xml: XmlWriter<A>,
    state: EmitterState,
    open_table: Option<String>,
    closed_tables: Vec<String>,
    generator: String,
    comment: Option<String>,
}

impl<A: ArchiveSink> StreamingEmitter<A> {
    pub fn new(archive: A) -> Self {
        Self::with_buffer_size(archive, DEFAULT_BUFFER_SIZE)
    }

    /// Push XML into the archive every `buffer_size` bytes
    pub fn with_buffer_size(archive: A, buffer_size: usize) -> Self {
        StreamingEmitter {
            xml: XmlWriter::with_threshold(archive, buffer_size),
            state: EmitterState::Undefined,
            open_table: None,
            closed_tables: Vec::new(),
            generator: concat!("odsstream/", env!("CARGO_PKG_VERSION")).to_string(),
            comment: None,
        }
    }

    /// Generator written into `meta.xml`
    pub fn with_generator<S: Into<String>>(mut self, generator: S) -> Self {
        self.generator = generator.into();
        self
    }

    /// Archive comment, set when the output begins
    pub fn with_comment(mut self, comment: Option<String>) -> Self {
        self.comment = comment;
        self
    }

    pub fn state(&self) -> EmitterState {
        self.state
    }

    /// Names of the tables whose closing tag was written
    pub fn closed_tables(&self) -> &[String] {
        &self.closed_tables
    }

    /// Apply one operation
    pub fn apply(&mut self, operation: FlushOperation) -> Result<()> {
        match operation {
            FlushOperation::Begin(styles) => {
                self.expect_state(EmitterState::Undefined, "begin")?;
                if let Some(comment) = &self.comment {
                    self.xml.get_mut().set_comment(comment);
                }
                self.write_package_head()?;
                self.open_entry("content.xml")?;
                content::write_preamble(&mut self.xml, &styles)?;
                self.state = EmitterState::InProgress;
            }
            FlushOperation::OpenTable(header) => {
                self.expect_state(EmitterState::InProgress, "open-table")?;
                if let Some(open) = &self.open_table {
                    return Err(OdsError::invalid_state(format!(
                        "can't open table '{}' while '{}' is open",
                        header.name, open
                    )));
                }
                content::write_table_header(&mut self.xml, &header)?;
                self.open_table = Some(header.name);
            }
            FlushOperation::Rows(batch) => {
                self.expect_state(EmitterState::InProgress, "rows")?;
                self.expect_open_table(&batch.table)?;
                content::write_row_batch(&mut self.xml, &batch)?;
                self.xml.flush()?;
            }
            FlushOperation::CloseTable(name) => {
                self.expect_state(EmitterState::InProgress, "close-table")?;
                self.expect_open_table(&name)?;
                content::write_table_close(&mut self.xml)?;
                self.xml.flush()?;
                self.open_table = None;
                self.closed_tables.push(name);
            }
            FlushOperation::EndDocument { autofilters } => {
                self.expect_state(EmitterState::InProgress, "end-document")?;
                if let Some(open) = &self.open_table {
                    return Err(OdsError::invalid_state(format!(
                        "can't end the document while table '{}' is open",
                        open
                    )));
                }
                content::write_postamble(&mut self.xml, &autofilters)?;
                self.close_entry()?;

                self.open_entry("settings.xml")?;
                package::write_settings(&mut self.xml, &self.closed_tables)?;
                self.close_entry()?;

                self.xml.get_mut().finish()?;
                self.state = EmitterState::Finished;
                debug!("archive finished");
            }
        }
        Ok(())
    }

    fn write_package_head(&mut self) -> Result<()> {
        self.open_entry("mimetype")?;
        self.xml.write_str(package::MIMETYPE)?;
        self.close_entry()?;

        self.open_entry("META-INF/manifest.xml")?;
        package::write_manifest(&mut self.xml)?;
        self.close_entry()?;

        let creation_date = Local::now().format("%Y-%m-%dT%H:%M:%S").to_string();
        self.open_entry("meta.xml")?;
        package::write_meta(&mut self.xml, &self.generator, &creation_date)?;
        self.close_entry()?;

        self.open_entry("styles.xml")?;
        package::write_styles(&mut self.xml)?;
        self.close_entry()
    }

    fn open_entry(&mut self, name: &str) -> Result<()> {
        self.xml.flush()?;
        self.xml.get_mut().open_entry(name)?;
        debug!("entry '{}' opened", name);
        Ok(())
    }

    fn close_entry(&mut self) -> Result<()> {
        self.xml.flush()?;
        self.xml.get_mut().close_entry()?;
        Ok(())
    }

    fn expect_state(&self, expected: EmitterState, operation: &str) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(OdsError::invalid_state(format!(
                "{} operation received in state {:?}",
                operation, self.state
            )))
        }
    }

    fn expect_open_table(&self, name: &str) -> Result<()> {
        match &self.open_table {
            Some(open) if open == name => Ok(()),
            Some(open) => Err(OdsError::invalid_state(format!(
                "operation for table '{}' while '{}' is open",
                name, open
            ))),
            None => Err(OdsError::invalid_state(format!(
                "operation for table '{}' while no table is open",
                name
            ))),
        }
    }
}
