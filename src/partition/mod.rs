//! Partitioner: B10-constant slices of the working subsets.
//!
//! The distinct B10 values are taken from the 6D subset in order of first
//! occurrence. Every value gets its own (B20, B30) reduction on each side;
//! a side with no points for that value is skipped, so the 4D partitions are
//! the subset of 6D values that actually occur in the 4D subset.
//!
//! Partitions are produced lazily, one value at a time, so only the maps of
//! the current value are held alongside the subsets.

use hashbrown::HashSet;

use crate::filter::Subsets;
use crate::model::{Axis, Dimensionality, MapKind, MiniMap, Point};
use crate::reduce::{GridKey, GridReducer, GroupBy};

/// Reduced maps for one constant value of the partition axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    pub value: f64,
    /// `None` when the 6D subset has no point at this value.
    pub six_d: Option<Vec<Point>>,
    /// `None` when the 4D subset has no point at this value.
    pub four_d: Option<Vec<Point>>,
}

impl Partition {
    /// The non-empty sides as B10-constant MiniMaps, 6D first.
    pub fn into_minimaps(self) -> impl Iterator<Item = MiniMap> {
        let kind = MapKind::B10Const(self.value);
        let six = self.six_d.map(|pts| MiniMap::new(Dimensionality::SixD, kind, pts));
        let four = self.four_d.map(|pts| MiniMap::new(Dimensionality::FourD, kind, pts));
        six.into_iter().chain(four)
    }
}

/// Distinct values of `axis` in first-occurrence order. NaN is not a value;
/// `-0.0` and `0.0` count once.
pub fn distinct_values(points: &[Point], axis: Axis) -> Vec<f64> {
    let key_axis = GroupBy::single(axis);
    let mut seen: HashSet<GridKey> = HashSet::new();
    let mut values = Vec::new();
    for p in points {
        if let Some(key) = GridKey::of(p, &key_axis) {
            if seen.insert(key) {
                values.push(p.get(axis));
            }
        }
    }
    values
}

/// (B20, B30) reduction of the points of `side` lying at `value` on `axis`,
/// or `None` when there are none.
fn reduce_slice(side: &[Point], axis: Axis, value: f64) -> Option<Vec<Point>> {
    let mut reducer = GridReducer::new(GroupBy::b20_b30());
    let mut members = 0usize;
    for p in side.iter().filter(|p| p.get(axis) == value) {
        members += 1;
        reducer.push(*p);
    }
    (members > 0).then(|| reducer.finish())
}

/// Lazy sequence of [`Partition`]s, in first-occurrence order of the value.
#[derive(Debug, Clone)]
pub struct Partitions<'a> {
    subsets: &'a Subsets,
    axis: Axis,
    values: std::vec::IntoIter<f64>,
}

impl Iterator for Partitions<'_> {
    type Item = Partition;

    fn next(&mut self) -> Option<Partition> {
        let value = self.values.next()?;
        Some(Partition {
            value,
            six_d: reduce_slice(&self.subsets.six_d, self.axis, value),
            four_d: reduce_slice(&self.subsets.four_d, self.axis, value),
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl ExactSizeIterator for Partitions<'_> {}

/// Split both subsets along `axis` and reduce each slice on (B20, B30).
pub fn partition_by(subsets: &Subsets, axis: Axis) -> Partitions<'_> {
    Partitions {
        subsets,
        axis,
        values: distinct_values(&subsets.six_d, axis).into_iter(),
    }
}

/// B10-constant partitions, the only partitioning the pipeline writes.
pub fn partition_b10(subsets: &Subsets) -> Partitions<'_> {
    partition_by(subsets, Axis::B10)
}
