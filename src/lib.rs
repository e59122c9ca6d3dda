//! # minimap-finder: MiniMaps from nuclear deformation WholeMaps
//!
//! Reduces a six-dimensional deformation-energy table (the WholeMap) to the
//! small projections used for fission-path analysis.
//!
//! ## Design Principles
//!
//! 1. **Store-agnostic**: `MapStore` is the contract between the pipeline and the data
//! 2. **Plain DTOs**: `Point`, `MiniMap`, `Nucleus` cross all boundaries
//! 3. **Pure stages**: filtering, reduction, partitioning and snapping own no I/O
//! 4. **Chunk-invariant**: reading in pieces never changes a result
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use minimap_finder::{FileStore, MiniMapFinder, Nucleus};
//!
//! # fn example() -> minimap_finder::Result<()> {
//! let finder = MiniMapFinder::with_store(FileStore::new("WholeMaps", "MiniMaps"));
//! let report = finder.run(Nucleus::new(102, 154))?;
//!
//! for map in &report.maps {
//!     println!("{} ({} rows)", map.name, map.rows);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Outputs
//!
//! | Map | Source | Contents |
//! |-----|--------|----------|
//! | `B20B30` | 6D, 4D | Minimum E per (B20, B30) |
//! | `B10const` | 6D, 4D | Minimum E per (B20, B30) at each B10 |
//! | `Starting` | 6D, 4D | Rows at the snapped starting point |
//! | `Fusion` | 6D, 4D | Rows at the snapped B10 with B40 = B50 = B60 = 0 |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod filter;
pub mod reduce;
pub mod partition;
pub mod snap;
pub mod export;
pub mod storage;
pub mod config;
pub mod pipeline;

// ============================================================================
// Re-exports: Model (the DTOs)
// ============================================================================

pub use model::{
    Point, Axis, Nucleus, MiniMap, MapKind, Dimensionality, FIELD_COUNT,
};

// ============================================================================
// Re-exports: Stages
// ============================================================================

pub use filter::{SubspaceBounds, SubspaceFilter, Subsets};
pub use reduce::{GridReducer, GroupBy, GridKey};
pub use partition::{Partition, Partitions};
pub use snap::{ReferencePoint, snap};

// ============================================================================
// Re-exports: Storage, configuration, pipeline
// ============================================================================

pub use storage::{MapStore, ReadSummary, FileStore, MemoryStore};
pub use export::RowFormat;
pub use config::{FinderConfig, ReferenceTable, ReferenceEntry, load_config};
pub use pipeline::{MiniMapFinder, RunReport, WrittenMap, build_minimaps};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("WholeMap not found: {0}")]
    InputNotFound(String),

    #[error("Malformed record at line {line}: {message}")]
    MalformedRecord { line: usize, message: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
