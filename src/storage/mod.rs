//! # Map Store Trait
//!
//! The contract between the MiniMap pipeline and wherever the data lives:
//! "read all records of a named dataset" and "write an ordered sequence of
//! records to a named destination".
//!
//! ## Implementations
//!
//! | Store | Module | Description |
//! |-------|--------|-------------|
//! | `FileStore` | `file` | WholeMap / MiniMap directories on disk |
//! | `MemoryStore` | `memory` | In-memory datasets for testing/embedding |

pub mod file;
pub mod memory;

use std::io::{BufRead, ErrorKind};

use crate::export::RowFormat;
use crate::model::Point;
use crate::{Error, Result};

pub use file::FileStore;
pub use memory::MemoryStore;

// ============================================================================
// MapStore Trait
// ============================================================================

/// Dataset source and MiniMap sink.
///
/// Reads are chunked purely to bound memory: a store must hand over every
/// record exactly once, in file order, regardless of `chunk_size`.
pub trait MapStore {
    /// Stream the named WholeMap to `on_chunk`, at most `chunk_size` records
    /// per call. Returns how many records were read and how the `M` column
    /// was typed.
    ///
    /// Fails with `Error::InputNotFound` when the dataset does not exist or
    /// cannot be opened, and with `Error::MalformedRecord` on the first
    /// unparsable line.
    fn read_whole_map(
        &self,
        name: &str,
        chunk_size: usize,
        on_chunk: &mut dyn FnMut(&[Point]) -> Result<()>,
    ) -> Result<ReadSummary>;

    /// Write one MiniMap, rows in the given order. Readers of `name` see
    /// either the previous content or the complete new map, never a mix.
    fn write_minimap(
        &self,
        name: &str,
        points: &[Point],
        format: RowFormat,
        write_chunk: usize,
    ) -> Result<()>;
}

/// Outcome of reading a whole dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadSummary {
    pub records: usize,
    /// `integer_m` is set when every `M` token was an integer literal.
    pub format: RowFormat,
}

/// `[+-]digits`, the only spelling that keeps the `M` column integral.
fn is_integer_literal(token: &str) -> bool {
    let digits = token.strip_prefix(['+', '-']).unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

// ============================================================================
// Shared record reader
// ============================================================================

/// Parse `reader` line by line into chunks of at most `chunk_size` points.
///
/// Blank lines are skipped. Line numbers in errors are 1-based and count
/// blank lines. A line that is not valid UTF-8 is a malformed record.
pub fn read_records<R: BufRead>(
    reader: R,
    chunk_size: usize,
    on_chunk: &mut dyn FnMut(&[Point]) -> Result<()>,
) -> Result<ReadSummary> {
    let chunk_size = chunk_size.max(1);
    let mut chunk: Vec<Point> = Vec::with_capacity(chunk_size.min(1 << 16));
    let mut total = 0;
    let mut integer_m = true;

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| match e.kind() {
            ErrorKind::InvalidData => Error::MalformedRecord {
                line: idx + 1,
                message: e.to_string(),
            },
            _ => Error::Io(e),
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let point = line.parse::<Point>().map_err(|e| Error::MalformedRecord {
            line: idx + 1,
            message: e.0,
        })?;
        integer_m = integer_m && line.split_whitespace().next().is_some_and(is_integer_literal);
        chunk.push(point);
        if chunk.len() == chunk_size {
            total += chunk.len();
            on_chunk(&chunk)?;
            chunk.clear();
        }
    }

    if !chunk.is_empty() {
        total += chunk.len();
        on_chunk(&chunk)?;
    }
    Ok(ReadSummary {
        records: total,
        format: RowFormat { integer_m },
    })
}
