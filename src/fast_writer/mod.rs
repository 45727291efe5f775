//! Low-level streaming output
//!
//! This module holds the pieces that turn flush operations into bytes:
//! - Buffered XML generation with minimal allocations
//! - Run-length compression of empty cells and absent rows
//! - Archive sinks (s-zip on disk, or in memory)

pub mod archive;
pub mod content;
pub mod emitter;
pub mod memory;
pub mod package;
pub mod xml_writer;

pub use archive::{ArchiveSink, MemoryArchive, ZipArchive};
pub use emitter::{EmitterState, StreamingEmitter};
pub use memory::MemoryProfile;
