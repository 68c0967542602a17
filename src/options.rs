//! Store options.
//!
//! Options can be set on [`DatabaseBuilder`](crate::DatabaseBuilder) or read
//! from a TOML document:
//!
//! ```toml
//! auto_persist = false
//! initial_load = true
//! ```
//!
//! Missing keys take their defaults; unknown keys are rejected.

use chronolog_core::{Error, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Options consumed when opening a store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseOptions {
    /// Persist synchronously after every mutation (default `true`)
    pub auto_persist: bool,
    /// Load existing records on open (default `true`)
    pub initial_load: bool,
}

impl Default for DatabaseOptions {
    fn default() -> Self {
        Self {
            auto_persist: true,
            initial_load: true,
        }
    }
}

impl DatabaseOptions {
    /// Default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the auto-persist flag.
    pub fn auto_persist(mut self, enabled: bool) -> Self {
        self.auto_persist = enabled;
        self
    }

    /// Set the initial-load flag.
    pub fn initial_load(mut self, enabled: bool) -> Self {
        self.initial_load = enabled;
        self
    }

    /// Parse options from a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(Error::config)
    }

    /// Read options from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}
