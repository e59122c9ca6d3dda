//! Run configuration.
//!
//! Everything has a default, so an empty JSON object (or no file at all)
//! reproduces the stock layout:
//!
//! ```text
//! WholeMaps/{Z}_{N}_6D_Whole_Map.txt  ──▶  MiniMaps/{Z}_{N}_*_MiniMap*.txt
//! ```

pub mod reference;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::filter::SubspaceBounds;
use crate::{Error, Result};

pub use reference::{ReferenceEntry, ReferenceTable};

/// Records per read chunk.
pub const DEFAULT_READ_CHUNK: usize = 100_000;
/// Rows per write piece.
pub const DEFAULT_WRITE_CHUNK: usize = 10_000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinderConfig {
    /// Directory holding the input WholeMaps.
    pub whole_map_dir: PathBuf,
    /// Directory the MiniMaps are written to. Created when missing.
    pub minimap_dir: PathBuf,
    pub read_chunk: usize,
    pub write_chunk: usize,
    pub bounds: SubspaceBounds,
    /// Replaces the built-in reference table when present.
    pub references: Option<Vec<ReferenceEntry>>,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            whole_map_dir: PathBuf::from("WholeMaps"),
            minimap_dir: PathBuf::from("MiniMaps"),
            read_chunk: DEFAULT_READ_CHUNK,
            write_chunk: DEFAULT_WRITE_CHUNK,
            bounds: SubspaceBounds::default(),
            references: None,
        }
    }
}

impl FinderConfig {
    pub fn validate(&self) -> Result<()> {
        if self.read_chunk == 0 {
            return Err(Error::ConfigError("read_chunk must be at least 1".into()));
        }
        if self.write_chunk == 0 {
            return Err(Error::ConfigError("write_chunk must be at least 1".into()));
        }
        let b = &self.bounds;
        if !(b.b20_min <= b.b20_max) || !(b.b30_min <= b.b30_max) {
            return Err(Error::ConfigError(format!(
                "empty subspace window: B20 [{}, {}], B30 [{}, {}]",
                b.b20_min, b.b20_max, b.b30_min, b.b30_max
            )));
        }
        Ok(())
    }

    /// The configured table, or the built-in one.
    pub fn reference_table(&self) -> ReferenceTable {
        match &self.references {
            Some(entries) => ReferenceTable::from_entries(entries.iter().copied()),
            None => ReferenceTable::builtin(),
        }
    }
}

/// Load and validate a JSON config file.
pub fn load_config(path: &Path) -> Result<FinderConfig> {
    let contents = fs::read_to_string(path).map_err(|e| {
        Error::ConfigError(format!("failed to read config {}: {e}", path.display()))
    })?;
    let config: FinderConfig = serde_json::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}
