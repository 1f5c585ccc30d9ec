//! Store configuration.

/// Configuration for opening a store.
#[derive(Debug, Clone)]
pub struct Config {
    /// Whether to create the store directory if it doesn't exist.
    pub create_if_missing: bool,

    /// Whether to sync the backend after every durable write (safer but slower).
    pub sync_on_write: bool,

    /// Whether a corrupt stored value may be overwritten with seed data during
    /// hydration.
    ///
    /// When false (the default), a value that exists but fails to parse is left
    /// untouched on disk and the collection falls back to its seed in memory,
    /// so a transient read failure can never clobber recoverable data. Only a
    /// confirmed-absent key is ever seeded.
    pub reseed_on_corrupt: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            create_if_missing: true,
            sync_on_write: true,
            reseed_on_corrupt: false,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets whether to create the store directory if missing.
    #[must_use]
    pub const fn create_if_missing(mut self, value: bool) -> Self {
        self.create_if_missing = value;
        self
    }

    /// Sets whether to sync after every durable write.
    #[must_use]
    pub const fn sync_on_write(mut self, value: bool) -> Self {
        self.sync_on_write = value;
        self
    }

    /// Sets whether corrupt values may be overwritten with seed data.
    #[must_use]
    pub const fn reseed_on_corrupt(mut self, value: bool) -> Self {
        self.reseed_on_corrupt = value;
        self
    }
}
