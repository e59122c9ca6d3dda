//! Reference-point table: known starting configurations per nucleus.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::model::Nucleus;
use crate::snap::ReferencePoint;

/// Built-in starting points, `(Z, N) -> (B10, B20, B30, B40, B50, B60)`.
const BUILTIN: [((u32, u32), [f64; 6]); 6] = [
    ((102, 154), [0.942, 1.754, 0.002, -0.291, -0.001, 0.076]),
    ((104, 154), [0.917, 1.754, 0.002, -0.291, -0.001, 0.076]),
    ((106, 156), [0.869, 1.754, 0.002, -0.291, -0.001, 0.076]),
    ((108, 158), [0.824, 1.754, 0.002, -0.291, -0.001, 0.076]),
    ((110, 162), [0.763, 1.754, 0.002, -0.291, -0.001, 0.076]),
    ((112, 166), [0.706, 1.755, 0.002, -0.292, -0.001, 0.077]),
];

/// One table row as it appears in a JSON config file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferenceEntry {
    pub protons: u32,
    pub neutrons: u32,
    #[serde(flatten)]
    pub point: ReferencePoint,
}

/// Immutable `Nucleus -> ReferencePoint` lookup, built once per run.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceTable {
    points: HashMap<Nucleus, ReferencePoint>,
}

impl ReferenceTable {
    /// The compiled-in table.
    pub fn builtin() -> Self {
        Self::from_entries(BUILTIN.iter().map(|&((protons, neutrons), c)| ReferenceEntry {
            protons,
            neutrons,
            point: ReferencePoint::new(c),
        }))
    }

    /// Later entries for the same nucleus replace earlier ones.
    pub fn from_entries(entries: impl IntoIterator<Item = ReferenceEntry>) -> Self {
        let points = entries
            .into_iter()
            .map(|e| (Nucleus::new(e.protons, e.neutrons), e.point))
            .collect();
        Self { points }
    }

    pub fn get(&self, nucleus: Nucleus) -> Option<&ReferencePoint> {
        self.points.get(&nucleus)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl Default for ReferenceTable {
    fn default() -> Self {
        Self::builtin()
    }
}
