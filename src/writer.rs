//! ODS file writer with direct or queued output
//!
//! The writer owns the [`OdsDocument`] being built and a backend that
//! applies flush operations to the archive. The direct backend writes on
//! the caller's thread; the queued backend hands operations to a single
//! consumer thread through a bounded queue, so building the next rows and
//! compressing the previous ones overlap.

use crate::error::{OdsError, Result};
use crate::fast_writer::{ArchiveSink, MemoryProfile, StreamingEmitter, ZipArchive};
use crate::flush::FlushOperation;
use crate::model::{OdsDocument, Table};
use log::{debug, error, info};
use std::io;
use std::path::Path;
use std::sync::mpsc::{sync_channel, Receiver, SyncSender};
use std::thread::{self, JoinHandle};

/// Where flush operations are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriterMode {
    /// On the caller's thread
    #[default]
    Direct,
    /// On a dedicated writer thread, in FIFO order
    Queued,
}

/// Writer settings
#[derive(Debug, Clone)]
pub struct WriterConfig {
    pub mode: WriterMode,
    pub profile: MemoryProfile,
    /// ZIP compression level, 0..=9
    pub compression_level: u32,
    pub comment: Option<String>,
    pub generator: String,
}

impl Default for WriterConfig {
    fn default() -> Self {
        WriterConfig {
            mode: WriterMode::Direct,
            profile: MemoryProfile::default(),
            compression_level: 6,
            comment: None,
            generator: concat!("odsstream/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl WriterConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Default settings with the memory profile read from the environment
    pub fn from_env() -> Self {
        WriterConfig {
            profile: MemoryProfile::from_env(),
            ..Self::default()
        }
    }

    pub fn mode(mut self, mode: WriterMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn profile(mut self, profile: MemoryProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Clamped to 9
    pub fn compression_level(mut self, level: u32) -> Self {
        self.compression_level = level.min(9);
        self
    }

    pub fn comment<S: Into<String>>(mut self, comment: S) -> Self {
        self.comment = Some(comment.into());
        self
    }

    pub fn generator<S: Into<String>>(mut self, generator: S) -> Self {
        self.generator = generator.into();
        self
    }
}

enum WriterBackend<A: ArchiveSink + 'static> {
    Direct(StreamingEmitter<A>),
    Queued {
        sender: SyncSender<FlushOperation>,
        handle: JoinHandle<Result<()>>,
    },
    /// Queue closed and writer thread joined
    Stopped,
}

/// Streaming ODS writer
///
/// # Examples
///
/// ```no_run
/// use odsstream::OdsFileWriter;
///
/// let mut writer = OdsFileWriter::create("output.ods")?;
/// let table = writer.add_table("Sheet1", 1024, 16)?;
///
/// for i in 0..100_000 {
///     let row = table.append_row()?;
///     row.set_value(0, format!("item {}", i));
///     row.set_value(1, i as f64);
/// }
/// // rows already written are released from memory
/// writer.flush()?;
///
/// writer.close()?;
/// # Ok::<(), odsstream::OdsError>(())
/// ```
pub struct OdsFileWriter<A: ArchiveSink + 'static> {
    document: OdsDocument,
    backend: WriterBackend<A>,
    fault: Option<String>,
}

impl OdsFileWriter<ZipArchive> {
    /// Create an `.ods` file with the default settings
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::create_with_config(path, WriterConfig::default())
    }

    /// Create an `.ods` file. In queued mode the file is created, and
    /// owned, by the writer thread.
    pub fn create_with_config<P: AsRef<Path>>(path: P, config: WriterConfig) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let compression_level = config.compression_level;
        info!("writing ODS file {}", path.display());
        Self::open_with_config(move || ZipArchive::with_compression(&path, compression_level), config)
    }
}

impl<A: ArchiveSink + 'static> OdsFileWriter<A> {
    /// Writer applying operations on the caller's thread
    pub fn direct(archive: A) -> Self {
        let emitter = StreamingEmitter::new(archive);
        OdsFileWriter {
            document: OdsDocument::new(),
            backend: WriterBackend::Direct(emitter),
            fault: None,
        }
    }

    /// Writer applying operations on a dedicated thread
    pub fn queued(archive: A) -> Result<Self>
    where
        A: Send,
    {
        Self::with_config(archive, WriterConfig::default().mode(WriterMode::Queued))
    }

    /// Writer over an archive that is already open
    pub fn with_config(archive: A, config: WriterConfig) -> Result<Self>
    where
        A: Send,
    {
        Self::open_with_config(move || Ok(archive), config)
    }

    /// Writer over an archive opened by `open_archive`.
    ///
    /// In queued mode `open_archive` runs on the writer thread, so the
    /// archive itself never crosses threads. An error opening it is
    /// returned here in both modes.
    pub fn open_with_config<F>(open_archive: F, config: WriterConfig) -> Result<Self>
    where
        F: FnOnce() -> io::Result<A> + Send + 'static,
    {
        let WriterConfig {
            mode,
            profile,
            comment,
            generator,
            ..
        } = config;
        let buffer_size = profile.xml_buffer_size();
        let build_emitter = move || -> Result<StreamingEmitter<A>> {
            let archive = open_archive()?;
            Ok(StreamingEmitter::with_buffer_size(archive, buffer_size)
                .with_generator(generator)
                .with_comment(comment))
        };

        let backend = match mode {
            WriterMode::Direct => WriterBackend::Direct(build_emitter()?),
            WriterMode::Queued => {
                let capacity = profile.queue_capacity();
                let (sender, receiver) = sync_channel(capacity);
                let (ready_sender, ready_receiver) = sync_channel(1);
                let handle = thread::Builder::new()
                    .name("odsstream-writer".to_string())
                    .spawn(move || match build_emitter() {
                        Ok(emitter) => {
                            let _ = ready_sender.send(Ok(()));
                            run_consumer(emitter, receiver)
                        }
                        Err(err) => {
                            let _ = ready_sender.send(Err(err));
                            Ok(())
                        }
                    })?;

                match ready_receiver.recv() {
                    Ok(Ok(())) => {}
                    Ok(Err(err)) => {
                        join_consumer(handle)?;
                        return Err(err);
                    }
                    Err(_) => {
                        join_consumer(handle)?;
                        return Err(OdsError::WriterStopped(
                            "writer thread exited before opening the archive".to_string(),
                        ));
                    }
                }
                debug!("writer thread started, queue capacity {}", capacity);
                WriterBackend::Queued { sender, handle }
            }
        };

        Ok(OdsFileWriter {
            document: OdsDocument::new(),
            backend,
            fault: None,
        })
    }

    pub fn document(&self) -> &OdsDocument {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut OdsDocument {
        &mut self.document
    }

    /// Shortcut for `document_mut().add_table(..)`
    pub fn add_table(&mut self, name: &str, row_capacity: usize, column_capacity: usize) -> Result<&mut Table> {
        self.document.add_table(name, row_capacity, column_capacity)
    }

    /// Apply, or enqueue, one operation.
    ///
    /// In queued mode this blocks while the queue is full. A fault of the
    /// writer thread is returned here once the thread has stopped. After a
    /// fault, every further call fails with [`OdsError::WriterStopped`].
    pub fn update(&mut self, operation: FlushOperation) -> Result<()> {
        self.check_healthy()?;
        let result = self.apply(operation);
        self.record(result)
    }

    fn apply(&mut self, operation: FlushOperation) -> Result<()> {
        match &mut self.backend {
            WriterBackend::Direct(emitter) => emitter.apply(operation),
            WriterBackend::Queued { sender, .. } => {
                if sender.send(operation).is_ok() {
                    return Ok(());
                }
                // the receiver is gone: the thread stopped on a fault
                match self.stop_consumer() {
                    Ok(()) => Err(OdsError::WriterStopped(
                        "writer thread exited before the end of the document".to_string(),
                    )),
                    Err(err) => Err(err),
                }
            }
            WriterBackend::Stopped => Err(OdsError::WriterStopped(
                "writer already closed".to_string(),
            )),
        }
    }

    /// Write every row available so far
    pub fn flush(&mut self) -> Result<()> {
        let operations = self.document.plan_flush_rows()?;
        self.apply_all(operations)
    }

    /// Write the rest of the document, postamble included
    pub fn flush_all(&mut self) -> Result<()> {
        let operations = self.document.plan_finalize()?;
        self.apply_all(operations)
    }

    /// Finalize the document and wait until it is fully written
    pub fn save(&mut self) -> Result<()> {
        self.check_healthy()?;
        if !self.document.is_finalized() {
            self.flush_all()?;
        }
        let result = self.stop_consumer();
        self.record(result)
    }

    /// Save if needed, then release the archive
    pub fn close(mut self) -> Result<()> {
        self.save()
    }

    fn apply_all(&mut self, operations: Vec<FlushOperation>) -> Result<()> {
        for operation in operations {
            self.update(operation)?;
        }
        Ok(())
    }

    fn check_healthy(&self) -> Result<()> {
        match &self.fault {
            Some(fault) => Err(OdsError::WriterStopped(format!("earlier fault: {}", fault))),
            None => Ok(()),
        }
    }

    fn record(&mut self, result: Result<()>) -> Result<()> {
        if let Err(err) = &result {
            self.fault = Some(err.to_string());
        }
        result
    }

    /// Close the queue and join the writer thread, surfacing its error
    fn stop_consumer(&mut self) -> Result<()> {
        if !matches!(self.backend, WriterBackend::Queued { .. }) {
            return Ok(());
        }
        match std::mem::replace(&mut self.backend, WriterBackend::Stopped) {
            WriterBackend::Queued { sender, handle } => {
                drop(sender);
                join_consumer(handle)
            }
            _ => Ok(()),
        }
    }
}

impl<A: ArchiveSink + 'static> Drop for OdsFileWriter<A> {
    fn drop(&mut self) {
        // pending operations are still applied before the thread exits
        if let Err(err) = self.stop_consumer() {
            error!("writer dropped after a fault: {}", err);
        }
    }
}

fn run_consumer<A: ArchiveSink>(
    mut emitter: StreamingEmitter<A>,
    receiver: Receiver<FlushOperation>,
) -> Result<()> {
    for operation in receiver {
        let kind = operation.kind();
        if let Err(err) = emitter.apply(operation) {
            error!("writer thread stopped on {} operation: {}", kind, err);
            return Err(err);
        }
    }
    debug!("writer thread finished");
    Ok(())
}

fn join_consumer(handle: JoinHandle<Result<()>>) -> Result<()> {
    handle
        .join()
        .unwrap_or_else(|_| Err(OdsError::WriterStopped("writer thread panicked".to_string())))
}
