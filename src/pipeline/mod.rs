//! MiniMap pipeline: drives one run from WholeMap to written MiniMaps.
//!
//! ```text
//! read (chunked) ─▶ SubspaceFilter ─▶ {6D, 4D}
//!                                       ├─▶ GridReducer ──────▶ B20B30 maps
//!                                       ├─▶ Partitioner ──────▶ B10const maps
//!                                       └─▶ GridSnapper ──────▶ Starting / Fusion maps
//! ```

use serde::Serialize;
use tracing::{debug, info};

use crate::config::{FinderConfig, ReferenceTable};
use crate::export::RowFormat;
use crate::filter::{SubspaceFilter, Subsets};
use crate::model::{Dimensionality, MapKind, MiniMap, Nucleus};
use crate::partition::{Partition, partition_b10};
use crate::reduce::{GroupBy, reduce};
use crate::snap::{ReferencePoint, fusion_neighborhood, starting_neighborhood};
use crate::storage::{MapStore, ReadSummary};
use crate::Result;

/// One map written during a run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WrittenMap {
    pub name: String,
    pub dim: Dimensionality,
    pub kind: MapKind,
    pub rows: usize,
}

/// Summary of a completed run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    pub nucleus: Nucleus,
    pub records_read: usize,
    pub six_d_points: usize,
    pub four_d_points: usize,
    pub b10_values: usize,
    /// Column typing carried from the WholeMap into every written map.
    pub row_format: RowFormat,
    /// Whether a reference point was registered for the nucleus.
    pub reference_found: bool,
    pub maps: Vec<WrittenMap>,
}

impl RunReport {
    pub fn map(&self, name: &str) -> Option<&WrittenMap> {
        self.maps.iter().find(|m| m.name == name)
    }
}

const DIMS: [Dimensionality; 2] = [Dimensionality::SixD, Dimensionality::FourD];

/// Every MiniMap of a run, in write order: the two base maps, the
/// B10-constant maps (6D then 4D per value), then, when a reference point
/// is known, starting 6D/4D and fusion 6D/4D.
///
/// Maps are built on demand as the iterator advances.
pub fn build_minimaps<'a>(
    subsets: &'a Subsets,
    reference: Option<&'a ReferencePoint>,
) -> impl Iterator<Item = MiniMap> + 'a {
    let base = DIMS.into_iter().map(move |dim| {
        MiniMap::new(dim, MapKind::B20B30, reduce(subsets.get(dim), &GroupBy::b20_b30()))
    });
    let b10 = partition_b10(subsets).flat_map(Partition::into_minimaps);
    let starting = reference.into_iter().flat_map(move |r| {
        DIMS.into_iter().map(move |dim| {
            MiniMap::new(dim, MapKind::Starting, starting_neighborhood(subsets.get(dim), r, dim))
        })
    });
    let fusion = reference.into_iter().flat_map(move |r| {
        DIMS.into_iter().map(move |dim| {
            MiniMap::new(dim, MapKind::Fusion, fusion_neighborhood(subsets.get(dim), r))
        })
    });
    base.chain(b10).chain(starting).chain(fusion)
}

/// The entry point: a store plus the configuration of a run.
pub struct MiniMapFinder<S: MapStore> {
    store: S,
    config: FinderConfig,
    references: ReferenceTable,
}

impl<S: MapStore> MiniMapFinder<S> {
    /// Finder with the default configuration and built-in reference table.
    pub fn with_store(store: S) -> Self {
        Self::with_config(store, FinderConfig::default())
    }

    pub fn with_config(store: S, config: FinderConfig) -> Self {
        let references = config.reference_table();
        Self { store, config, references }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    /// Read the WholeMap for `nucleus` into the 6D / 4D subsets.
    pub fn load_subsets(&self, nucleus: Nucleus) -> Result<(ReadSummary, Subsets)> {
        self.config.validate()?;
        let name = nucleus.whole_map_name();
        info!(%nucleus, dataset = %name, chunk = self.config.read_chunk, "reading WholeMap");

        let mut filter = SubspaceFilter::new(self.config.bounds);
        let mut chunks = 0usize;
        let summary = self.store.read_whole_map(&name, self.config.read_chunk, &mut |chunk| {
            filter.absorb(chunk);
            chunks += 1;
            debug!(chunk = chunks, rows = chunk.len(), total = filter.seen(), "absorbed chunk");
            Ok(())
        })?;

        let subsets = filter.finish();
        info!(
            records = summary.records,
            integer_m = summary.format.integer_m,
            chunks,
            six_d = subsets.six_d.len(),
            four_d = subsets.four_d.len(),
            "filtered WholeMap"
        );
        Ok((summary, subsets))
    }

    /// Run the whole pipeline for `nucleus` and write every MiniMap.
    pub fn run(&self, nucleus: Nucleus) -> Result<RunReport> {
        let (summary, subsets) = self.load_subsets(nucleus)?;

        let reference = self.references.get(nucleus);
        if reference.is_none() {
            info!(%nucleus, "no reference point registered; skipping starting and fusion maps");
        }

        let mut written = Vec::new();
        let mut b10_values = 0;
        for map in build_minimaps(&subsets, reference) {
            if matches!(map.kind, MapKind::B10Const(_)) && map.dim == Dimensionality::SixD {
                b10_values += 1;
            }
            let name = map.file_name(nucleus);
            self.store
                .write_minimap(&name, &map.points, summary.format, self.config.write_chunk)?;
            info!(map = %name, rows = map.len(), "MiniMap saved");
            written.push(WrittenMap {
                name,
                dim: map.dim,
                kind: map.kind,
                rows: map.len(),
            });
        }

        info!(%nucleus, maps = written.len(), b10_values, "run complete");
        Ok(RunReport {
            nucleus,
            records_read: summary.records,
            six_d_points: subsets.six_d.len(),
            four_d_points: subsets.four_d.len(),
            b10_values,
            row_format: summary.format,
            reference_found: reference.is_some(),
            maps: written,
        })
    }
}
