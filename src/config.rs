//! File front-end: load a raw pin map definition from a TOML file.
//!
//! The file holds one table per pin name:
//!
//! ```toml
//! [PA13]
//! name = "foo"
//! mode = "out"
//! invert = true
//!
//! [PA9]
//! name = "baz"
//! mode = "analog"
//! ```
//!
//! Loading only deserializes; all structural validation happens in
//! [`PinMap::new`](crate::pinmap::PinMap::new).

use std::fs::File;
use std::io::Read;
use std::path::Path;

use thiserror::Error;

use crate::pinmap::RawPinMap;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Read a raw pin map definition from a TOML file.
pub fn load_pin_definitions(path: impl AsRef<Path>) -> Result<RawPinMap, ConfigError> {
    let mut file = File::open(path)?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;
    Ok(toml::from_str(&contents)?)
}
