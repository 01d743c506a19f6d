//! Configuration for addressdb
//!
//! The only tunables are the two table creation parameters.

use crate::error::{DbError, Result};

/// Table creation parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Bytes reserved for each name/email buffer, terminator included
    pub field_width: u32,

    /// Number of preallocated rows
    pub row_count: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            field_width: 512,
            row_count: 100,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Reject parameters that cannot describe a table
    pub fn validate(&self) -> Result<()> {
        if self.field_width == 0 {
            return Err(DbError::InvalidParameters(
                "field width must be greater than zero".to_string(),
            ));
        }
        if self.row_count == 0 {
            return Err(DbError::InvalidParameters(
                "row count must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the width of each text field (in bytes)
    pub fn field_width(mut self, width: u32) -> Self {
        self.config.field_width = width;
        self
    }

    /// Set the number of rows
    pub fn row_count(mut self, count: u32) -> Self {
        self.config.row_count = count;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}
