//! Memory profiles: how much the writer may buffer

/// Environment variable read by [`MemoryProfile::from_env`]
pub const MEMORY_ENV_VAR: &str = "ODSSTREAM_MEMORY_MB";

/// Memory profile for different deployment sizes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MemoryProfile {
    /// Small pods (< 512MB): 16KB XML buffer, 4 pending flushes
    Low,
    /// Medium pods (512MB-1GB): 64KB XML buffer, 16 pending flushes
    Medium,
    /// Large pods (> 1GB): 256KB XML buffer, 64 pending flushes (default)
    High,
    /// Custom profile
    Custom {
        xml_buffer_size: usize,
        queue_capacity: usize,
    },
}

impl Default for MemoryProfile {
    fn default() -> Self {
        MemoryProfile::High
    }
}

impl MemoryProfile {
    /// Create a profile from a memory limit in MB
    pub fn from_memory_mb(memory_mb: usize) -> Self {
        if memory_mb < 512 {
            MemoryProfile::Low
        } else if memory_mb < 1024 {
            MemoryProfile::Medium
        } else {
            MemoryProfile::High
        }
    }

    /// Detect from the `ODSSTREAM_MEMORY_MB` environment variable
    pub fn from_env() -> Self {
        std::env::var(MEMORY_ENV_VAR)
            .ok()
            .and_then(|s| s.trim().parse::<usize>().ok())
            .map(Self::from_memory_mb)
            .unwrap_or_default()
    }

    /// Bytes of XML buffered before they are pushed into the archive
    pub fn xml_buffer_size(&self) -> usize {
        match self {
            MemoryProfile::Low => 16 * 1024,
            MemoryProfile::Medium => 64 * 1024,
            MemoryProfile::High => 256 * 1024,
            MemoryProfile::Custom {
                xml_buffer_size, ..
            } => *xml_buffer_size,
        }
    }

    /// Flush operations that may wait in the queue of the queued writer
    pub fn queue_capacity(&self) -> usize {
        match self {
            MemoryProfile::Low => 4,
            MemoryProfile::Medium => 16,
            MemoryProfile::High => 64,
            MemoryProfile::Custom { queue_capacity, .. } => (*queue_capacity).max(1),
        }
    }
}
