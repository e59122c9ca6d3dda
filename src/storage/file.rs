//! On-disk store: WholeMaps are read from one directory, MiniMaps written to
//! another.
//!
//! Each MiniMap is written to a hidden sibling temp file and renamed into
//! place once every row is flushed.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::PathBuf;

use tracing::debug;

use crate::export::{self, RowFormat};
use crate::model::Point;
use crate::{Error, Result};
use super::{MapStore, ReadSummary, read_records};

/// Directory-backed [`MapStore`].
#[derive(Debug, Clone)]
pub struct FileStore {
    whole_map_dir: PathBuf,
    minimap_dir: PathBuf,
}

impl FileStore {
    pub fn new(whole_map_dir: impl Into<PathBuf>, minimap_dir: impl Into<PathBuf>) -> Self {
        Self {
            whole_map_dir: whole_map_dir.into(),
            minimap_dir: minimap_dir.into(),
        }
    }

    pub fn whole_map_path(&self, name: &str) -> PathBuf {
        self.whole_map_dir.join(name)
    }

    pub fn minimap_path(&self, name: &str) -> PathBuf {
        self.minimap_dir.join(name)
    }
}

impl MapStore for FileStore {
    fn read_whole_map(
        &self,
        name: &str,
        chunk_size: usize,
        on_chunk: &mut dyn FnMut(&[Point]) -> Result<()>,
    ) -> Result<ReadSummary> {
        let path = self.whole_map_path(name);
        let file = File::open(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::InputNotFound(path.display().to_string()),
            _ => Error::InputNotFound(format!("{} ({e})", path.display())),
        })?;
        debug!(path = %path.display(), chunk_size, "reading WholeMap");
        read_records(BufReader::new(file), chunk_size, on_chunk)
    }

    fn write_minimap(
        &self,
        name: &str,
        points: &[Point],
        format: RowFormat,
        write_chunk: usize,
    ) -> Result<()> {
        fs::create_dir_all(&self.minimap_dir)?;
        let target = self.minimap_path(name);
        let staging = self.minimap_dir.join(format!(".{name}.partial"));

        let written = File::create(&staging).map_err(Error::from).and_then(|file| {
            let mut writer = BufWriter::new(file);
            export::write_points(&mut writer, points, format, write_chunk)
        });
        if let Err(e) = written {
            let _ = fs::remove_file(&staging);
            return Err(e);
        }

        fs::rename(&staging, &target).map_err(|e| {
            let _ = fs::remove_file(&staging);
            Error::StorageError(format!("failed to move {} into place: {e}", target.display()))
        })?;
        debug!(path = %target.display(), rows = points.len(), "wrote MiniMap");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_input_is_input_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path(), dir.path().join("out"));
        let err = store.read_whole_map("nope.txt", 10, &mut |_| Ok(())).unwrap_err();
        assert!(matches!(err, Error::InputNotFound(_)), "got {err}");
    }

    #[test]
    fn test_unopenable_input_is_input_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let not_a_dir = dir.path().join("WholeMaps");
        fs::write(&not_a_dir, "").unwrap();
        let store = FileStore::new(&not_a_dir, dir.path().join("out"));
        let err = store.read_whole_map("102_154_6D_Whole_Map.txt", 10, &mut |_| Ok(())).unwrap_err();
        assert!(matches!(err, Error::InputNotFound(_)), "got {err}");
    }

    #[test]
    fn test_write_creates_dir_and_leaves_no_staging_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("MiniMaps");
        let store = FileStore::new(dir.path(), &out);
        let p = Point { m: 1.0, e: -2.0, ..Point::default() };

        store.write_minimap("a.txt", &[p, p], RowFormat::DECIMAL, 1).unwrap();

        let text = fs::read_to_string(out.join("a.txt")).unwrap();
        assert_eq!(text.lines().count(), 2);
        let names: Vec<_> = fs::read_dir(&out).unwrap().map(|e| e.unwrap().file_name()).collect();
        assert_eq!(names.len(), 1);
    }

    #[test]
    fn test_write_replaces_existing_map() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path(), dir.path());
        let p = Point::default();
        store.write_minimap("a.txt", &[p, p, p], RowFormat::DECIMAL, 10).unwrap();
        store.write_minimap("a.txt", &[p], RowFormat::DECIMAL, 10).unwrap();
        let text = fs::read_to_string(dir.path().join("a.txt")).unwrap();
        assert_eq!(text.lines().count(), 1);
    }
}
