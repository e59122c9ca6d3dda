//! In-memory map store.
//!
//! Datasets and written maps are held as text, so reads go through the same
//! parser and writes through the same formatter as the on-disk store. Each
//! collection is protected by its own `RwLock`.
//!
//! Use this store for:
//! - Testing the pipeline without touching the filesystem
//! - Embedding the finder where the WholeMap is already in memory

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::export::{self, RowFormat};
use crate::model::Point;
use crate::{Error, Result};
use super::{MapStore, ReadSummary, read_records};

/// In-memory [`MapStore`]. Clones share the same contents.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<MemoryInner>,
}

#[derive(Default)]
struct MemoryInner {
    whole_maps: RwLock<HashMap<String, String>>,
    minimaps: RwLock<HashMap<String, String>>,
    /// Output names in first-write order.
    write_order: RwLock<Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a WholeMap from raw text.
    pub fn insert_whole_map(&self, name: impl Into<String>, text: impl Into<String>) {
        self.inner.whole_maps.write().insert(name.into(), text.into());
    }

    /// Register a WholeMap from points, rendered with three decimals.
    pub fn insert_points(&self, name: impl Into<String>, points: &[Point]) {
        self.insert_whole_map(name, export::render(points, RowFormat::DECIMAL));
    }

    /// Text of a written MiniMap.
    pub fn minimap(&self, name: &str) -> Option<String> {
        self.inner.minimaps.read().get(name).cloned()
    }

    /// A written MiniMap parsed back into points.
    pub fn minimap_points(&self, name: &str) -> Result<Vec<Point>> {
        let text = self
            .minimap(name)
            .ok_or_else(|| Error::StorageError(format!("no MiniMap named '{name}'")))?;
        let mut points = Vec::new();
        read_records(Cursor::new(text), usize::MAX, &mut |chunk| {
            points.extend_from_slice(chunk);
            Ok(())
        })?;
        Ok(points)
    }

    /// Names of all written MiniMaps, in the order they were first written.
    pub fn minimap_names(&self) -> Vec<String> {
        self.inner.write_order.read().clone()
    }
}

impl MapStore for MemoryStore {
    fn read_whole_map(
        &self,
        name: &str,
        chunk_size: usize,
        on_chunk: &mut dyn FnMut(&[Point]) -> Result<()>,
    ) -> Result<ReadSummary> {
        let text = self
            .inner
            .whole_maps
            .read()
            .get(name)
            .cloned()
            .ok_or_else(|| Error::InputNotFound(name.to_string()))?;
        read_records(Cursor::new(text), chunk_size, on_chunk)
    }

    fn write_minimap(
        &self,
        name: &str,
        points: &[Point],
        format: RowFormat,
        write_chunk: usize,
    ) -> Result<()> {
        let mut buf = Vec::new();
        export::write_points(&mut buf, points, format, write_chunk)?;
        let text = String::from_utf8(buf)
            .map_err(|e| Error::StorageError(format!("non-UTF-8 MiniMap output: {e}")))?;

        let previous = self.inner.minimaps.write().insert(name.to_string(), text);
        if previous.is_none() {
            self.inner.write_order.write().push(name.to_string());
        }
        Ok(())
    }
}
