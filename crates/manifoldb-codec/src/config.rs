//! Buffer configuration.

/// Default number of bytes reserved by a fresh encode or key buffer.
pub const DEFAULT_INITIAL_CAPACITY: usize = 64;

/// Default upper bound for a single length-prefixed field (64MB).
pub const DEFAULT_MAX_FIELD_LEN: usize = 64 * 1024 * 1024;

/// Configuration shared by the put, get and key buffers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Bytes reserved up front by encode and key buffers (default: 64)
    pub initial_capacity: usize,

    /// Largest string, byte field or count a put buffer will write and a get
    /// buffer will accept (default: 64MB)
    ///
    /// Guards against corrupt length prefixes asking for huge allocations.
    pub max_field_len: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self { initial_capacity: DEFAULT_INITIAL_CAPACITY, max_field_len: DEFAULT_MAX_FIELD_LEN }
    }
}

impl CodecConfig {
    /// Sets the initial buffer capacity.
    #[must_use]
    pub const fn with_initial_capacity(mut self, capacity: usize) -> Self {
        self.initial_capacity = capacity;
        self
    }

    /// Sets the maximum accepted field length.
    #[must_use]
    pub const fn with_max_field_len(mut self, max: usize) -> Self {
        self.max_field_len = max;
        self
    }
}
