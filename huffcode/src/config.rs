//! Codec configuration
//!
//! With the `serde` feature enabled, configuration can be read from and
//! written to TOML:
//!
//! ```toml
//! unknown_symbols = "skip"
//! single_symbol_bit = 1
//! ```

use crate::bits::Bit;

#[cfg(feature = "serde")]
use crate::{Error, Result};
#[cfg(feature = "serde")]
use std::fs;
#[cfg(feature = "serde")]
use std::path::Path;

/// What the encoder does with a symbol missing from the frequency table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum UnknownSymbolPolicy {
    /// Abort encoding with an encoding error
    #[default]
    Fail,
    /// Drop the symbol and keep going (logged at warn level)
    Skip,
}

/// Configuration for a [`HuffmanCodec`](crate::HuffmanCodec)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct CodecConfig {
    /// Handling of symbols the frequency table has never seen
    pub unknown_symbols: UnknownSymbolPolicy,

    /// Code given to the only symbol of a single-symbol alphabet
    pub single_symbol_bit: Bit,
}

impl CodecConfig {
    /// Default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the unknown symbol policy
    pub fn with_unknown_symbols(mut self, policy: UnknownSymbolPolicy) -> Self {
        self.unknown_symbols = policy;
        self
    }

    /// Set the single-symbol code digit
    pub fn with_single_symbol_bit(mut self, bit: Bit) -> Self {
        self.single_symbol_bit = bit;
        self
    }

    /// Parse configuration from a TOML document
    #[cfg(feature = "serde")]
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| Error::config(e.to_string()))
    }

    /// Render configuration as a TOML document
    #[cfg(feature = "serde")]
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(e.to_string()))
    }

    /// Load configuration from a TOML file
    #[cfg(feature = "serde")]
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Save configuration to a TOML file, creating parent directories
    #[cfg(feature = "serde")]
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let contents = self.to_toml_string()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(path, contents)?;
        Ok(())
    }
}
