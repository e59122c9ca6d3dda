//! MiniMap: a reduced or filtered view of a WholeMap, ready for output.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Nucleus, Point};

/// Which working subset a map was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimensionality {
    /// `0 <= B20 <= 2`, `-0.5 <= B30 <= 0.5`, all six axes free.
    SixD,
    /// The 6D subspace with `B50 == B60 == 0`.
    FourD,
}

impl Dimensionality {
    pub fn label(&self) -> &'static str {
        match self {
            Dimensionality::SixD => "6D",
            Dimensionality::FourD => "4D",
        }
    }
}

impl fmt::Display for Dimensionality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What a MiniMap represents.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum MapKind {
    /// Minimum energy per (B20, B30) over the whole subset.
    B20B30,
    /// Neighborhood of the snapped starting point.
    Starting,
    /// Neighborhood of the snapped fusion configuration.
    Fusion,
    /// Minimum energy per (B20, B30) with B10 held at the given value.
    B10Const(f64),
}

/// An ordered set of output rows plus the tags that name its file.
#[derive(Debug, Clone, PartialEq)]
pub struct MiniMap {
    pub dim: Dimensionality,
    pub kind: MapKind,
    pub points: Vec<Point>,
}

impl MiniMap {
    pub fn new(dim: Dimensionality, kind: MapKind, points: Vec<Point>) -> Self {
        Self { dim, kind, points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Output file name for this map within a run for `nucleus`.
    pub fn file_name(&self, nucleus: Nucleus) -> String {
        let dim = self.dim.label();
        match self.kind {
            MapKind::B20B30 => format!("{nucleus}_{dim}_B20B30_MiniMap.txt"),
            MapKind::Starting => format!("{nucleus}_{dim}_Starting_MiniMap.txt"),
            MapKind::Fusion => format!("{nucleus}_{dim}_Fusion_MiniMap.txt"),
            MapKind::B10Const(b10) => {
                format!("{nucleus}_{dim}_B10const_MiniMap_B10_{b10:.3}.txt")
            }
        }
    }
}
