// src/config/mod.rs
pub mod io;
pub mod types;

pub use self::types::{Features, ViewConfig, ViewSettings};

use crate::error::Result;
use crate::grouping::GroupingMode;
use std::path::Path;

/// Config file looked up in the working directory.
pub const CONFIG_FILE: &str = "scanlens.toml";

impl ViewConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `scanlens.toml` from the working directory, falling back to defaults.
    #[must_use]
    pub fn load() -> Self {
        io::load_or_default(Path::new(CONFIG_FILE))
    }

    /// Loads an explicitly requested config file.
    ///
    /// # Errors
    /// Returns error if the file is missing or invalid.
    pub fn from_path(path: &Path) -> Result<Self> {
        io::load_from_path(path)
    }

    /// Parses config text.
    ///
    /// # Errors
    /// Returns error if the TOML is invalid.
    pub fn parse_toml(content: &str) -> Result<Self> {
        io::parse(content)
    }

    /// Grouping to start with; `None` when grouping is switched off.
    #[must_use]
    pub fn initial_grouping(&self) -> GroupingMode {
        if self.features.grouping {
            self.view.default_grouping
        } else {
            GroupingMode::None
        }
    }
}
