//! Subspace filter: carve the 6D and 4D working subsets out of a WholeMap.
//!
//! ```text
//! WholeMap ──(B20, B30 bounds)──▶ 6D subset ──(B50 == B60 == 0)──▶ 4D subset
//! ```
//!
//! The filter is an accumulator so the WholeMap can be fed to it in chunks;
//! the subsets it produces do not depend on how the input was split.

use serde::{Deserialize, Serialize};

use crate::model::{Dimensionality, Point};

/// Inclusive B20 / B30 window of the physically relevant subspace.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubspaceBounds {
    pub b20_min: f64,
    pub b20_max: f64,
    pub b30_min: f64,
    pub b30_max: f64,
}

impl Default for SubspaceBounds {
    fn default() -> Self {
        Self {
            b20_min: 0.0,
            b20_max: 2.0,
            b30_min: -0.5,
            b30_max: 0.5,
        }
    }
}

impl SubspaceBounds {
    /// Membership in the 6D subset. NaN coordinates never match.
    pub fn contains_6d(&self, p: &Point) -> bool {
        p.b20 >= self.b20_min
            && p.b20 <= self.b20_max
            && p.b30 >= self.b30_min
            && p.b30 <= self.b30_max
    }

    /// 4D test for a point already known to be in the 6D subset.
    pub fn is_4d(p: &Point) -> bool {
        p.b50 == 0.0 && p.b60 == 0.0
    }
}

/// The two working subsets. Immutable once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Subsets {
    pub six_d: Vec<Point>,
    pub four_d: Vec<Point>,
}

impl Subsets {
    pub fn get(&self, dim: Dimensionality) -> &[Point] {
        match dim {
            Dimensionality::SixD => &self.six_d,
            Dimensionality::FourD => &self.four_d,
        }
    }
}

/// Chunk-wise builder for [`Subsets`]. Input order is preserved.
#[derive(Debug, Clone, Default)]
pub struct SubspaceFilter {
    bounds: SubspaceBounds,
    subsets: Subsets,
    seen: usize,
}

impl SubspaceFilter {
    pub fn new(bounds: SubspaceBounds) -> Self {
        Self {
            bounds,
            subsets: Subsets::default(),
            seen: 0,
        }
    }

    /// Filter one chunk and append its survivors to the running subsets.
    pub fn absorb(&mut self, chunk: &[Point]) {
        self.seen += chunk.len();
        let first_new = self.subsets.six_d.len();
        self.subsets
            .six_d
            .extend(chunk.iter().filter(|p| self.bounds.contains_6d(p)));
        self.subsets.four_d.extend(
            self.subsets.six_d[first_new..]
                .iter()
                .filter(|p| SubspaceBounds::is_4d(p)),
        );
    }

    /// Number of raw points absorbed so far.
    pub fn seen(&self) -> usize {
        self.seen
    }

    pub fn finish(self) -> Subsets {
        self.subsets
    }
}

/// Filter a whole in-memory dataset in one go.
pub fn split(points: &[Point], bounds: SubspaceBounds) -> Subsets {
    let mut filter = SubspaceFilter::new(bounds);
    filter.absorb(points);
    filter.finish()
}
