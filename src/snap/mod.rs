//! Grid snapper: map continuous reference points onto the 0.05 grid and
//! pull exact-match neighborhoods out of a subset.
//!
//! Snapping is `round_ties_even(x * 20) / 20`, applied to the floating-point
//! product. Ties only occur when `x * 20` lands exactly on a half-integer,
//! and those go to the even multiple (`0.025 -> 0.0`, `0.075 -> 0.1`).
//! Values that already sit on the grid snap to themselves.

use serde::{Deserialize, Serialize};

use crate::model::{Dimensionality, Point};
use crate::reduce::sort_by_grid;

/// Grid steps per unit of deformation.
pub const STEPS_PER_UNIT: f64 = 20.0;

/// Nearest multiple of 0.05, ties to even.
pub fn snap(x: f64) -> f64 {
    (x * STEPS_PER_UNIT).round_ties_even() / STEPS_PER_UNIT
}

/// Continuous deformation `(B10, B20, B30, B40, B50, B60)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReferencePoint {
    pub b10: f64,
    pub b20: f64,
    pub b30: f64,
    pub b40: f64,
    pub b50: f64,
    pub b60: f64,
}

impl ReferencePoint {
    pub const fn new(c: [f64; 6]) -> Self {
        Self { b10: c[0], b20: c[1], b30: c[2], b40: c[3], b50: c[4], b60: c[5] }
    }

    /// Every coordinate snapped to the grid.
    pub fn snapped(&self) -> Self {
        Self {
            b10: snap(self.b10),
            b20: snap(self.b20),
            b30: snap(self.b30),
            b40: snap(self.b40),
            b50: snap(self.b50),
            b60: snap(self.b60),
        }
    }
}

/// Points of `subset` sharing the snapped starting point's B10 and B40
/// (and, for the 6D subset, B50 and B60), sorted by (B20, B30).
pub fn starting_neighborhood(
    subset: &[Point],
    reference: &ReferencePoint,
    dim: Dimensionality,
) -> Vec<Point> {
    let target = reference.snapped();
    let mut out: Vec<Point> = subset
        .iter()
        .filter(|p| p.b10 == target.b10 && p.b40 == target.b40)
        .filter(|p| match dim {
            Dimensionality::SixD => p.b50 == target.b50 && p.b60 == target.b60,
            Dimensionality::FourD => true,
        })
        .copied()
        .collect();
    sort_by_grid(&mut out);
    out
}

/// Points of `subset` at the snapped B10 with B40, B50 and B60 all zero,
/// sorted by (B20, B30).
pub fn fusion_neighborhood(subset: &[Point], reference: &ReferencePoint) -> Vec<Point> {
    let b10 = snap(reference.b10);
    let mut out: Vec<Point> = subset
        .iter()
        .filter(|p| p.b10 == b10 && p.b40 == 0.0 && p.b50 == 0.0 && p.b60 == 0.0)
        .copied()
        .collect();
    sort_by_grid(&mut out);
    out
}
