//! Grid reducer: minimum-energy representative per grid cell.
//!
//! Points are grouped by a key of one or two axes (default `B20, B30`) and the
//! lowest-`E` point of every group is kept. One pass, one hash map:
//!
//! ```text
//! for p in input:
//!     best[key(p)] = p   if no candidate yet, or p.E < candidate.E
//! ```
//!
//! Ties go to the point seen first: a later point only replaces the stored
//! candidate when its energy is strictly lower. A NaN energy never beats a
//! number, and a NaN candidate is displaced by the first numeric one.
//!
//! Key components compare by exact float equality as stored; `-0.0` and
//! `0.0` are one key. Points with a NaN key component belong to no group.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use hashbrown::HashMap;
use hashbrown::hash_map::Entry;
use smallvec::{SmallVec, smallvec};

use crate::model::{Axis, Point};

// ============================================================================
// Grouping axes
// ============================================================================

/// Axes forming a grid key, major axis first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupBy(SmallVec<[Axis; 2]>);

impl GroupBy {
    pub fn single(axis: Axis) -> Self {
        Self(smallvec![axis])
    }

    pub fn pair(major: Axis, minor: Axis) -> Self {
        Self(smallvec![major, minor])
    }

    /// The `(B20, B30)` plane every MiniMap is projected onto.
    pub fn b20_b30() -> Self {
        Self::pair(Axis::B20, Axis::B30)
    }

    pub fn axes(&self) -> &[Axis] {
        &self.0
    }
}

impl Default for GroupBy {
    fn default() -> Self {
        Self::b20_b30()
    }
}

// ============================================================================
// Grid key
// ============================================================================

/// Exact-match grouping key built from a point's axis values.
#[derive(Debug, Clone)]
pub struct GridKey(SmallVec<[f64; 2]>);

/// Fold `-0.0` into `0.0` so both hash and compare as one key.
fn canonical(x: f64) -> f64 {
    if x == 0.0 { 0.0 } else { x }
}

impl GridKey {
    /// Key of `p` under `group_by`, or `None` when any component is NaN.
    pub fn of(p: &Point, group_by: &GroupBy) -> Option<Self> {
        let mut values = SmallVec::new();
        for &axis in group_by.axes() {
            let v = p.get(axis);
            if v.is_nan() {
                return None;
            }
            values.push(canonical(v));
        }
        Some(Self(values))
    }
}

impl PartialEq for GridKey {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len()
            && self.0.iter().zip(&other.0).all(|(a, b)| a.to_bits() == b.to_bits())
    }
}

impl Eq for GridKey {}

impl Hash for GridKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for v in &self.0 {
            v.to_bits().hash(state);
        }
    }
}

impl Ord for GridKey {
    fn cmp(&self, other: &Self) -> Ordering {
        for (a, b) in self.0.iter().zip(&other.0) {
            match a.total_cmp(b) {
                Ordering::Equal => continue,
                ord => return ord,
            }
        }
        self.0.len().cmp(&other.0.len())
    }
}

impl PartialOrd for GridKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Ascending order of two points under `group_by`, major axis first.
pub fn compare_by(a: &Point, b: &Point, group_by: &GroupBy) -> Ordering {
    for &axis in group_by.axes() {
        match canonical(a.get(axis)).total_cmp(&canonical(b.get(axis))) {
            Ordering::Equal => continue,
            ord => return ord,
        }
    }
    Ordering::Equal
}

/// Stable sort by `(B20, B30)`; equal keys keep their input order.
pub fn sort_by_grid(points: &mut [Point]) {
    let group_by = GroupBy::b20_b30();
    points.sort_by(|a, b| compare_by(a, b, &group_by));
}

// ============================================================================
// Reducer
// ============================================================================

/// Accumulates the best point per grid key across any number of chunks.
#[derive(Debug, Clone)]
pub struct GridReducer {
    group_by: GroupBy,
    best: HashMap<GridKey, Point>,
}

impl GridReducer {
    pub fn new(group_by: GroupBy) -> Self {
        Self {
            group_by,
            best: HashMap::new(),
        }
    }

    pub fn push(&mut self, p: Point) {
        let Some(key) = GridKey::of(&p, &self.group_by) else {
            return;
        };
        match self.best.entry(key) {
            Entry::Vacant(slot) => {
                slot.insert(p);
            }
            Entry::Occupied(mut slot) => {
                if beats(&p, slot.get()) {
                    slot.insert(p);
                }
            }
        }
    }

    pub fn absorb(&mut self, chunk: &[Point]) {
        for p in chunk {
            self.push(*p);
        }
    }

    /// Number of distinct keys seen so far.
    pub fn len(&self) -> usize {
        self.best.len()
    }

    pub fn is_empty(&self) -> bool {
        self.best.is_empty()
    }

    /// One point per key, sorted ascending by key.
    pub fn finish(self) -> Vec<Point> {
        let mut cells: Vec<(GridKey, Point)> = self.best.into_iter().collect();
        cells.sort_unstable_by(|a, b| a.0.cmp(&b.0));
        cells.into_iter().map(|(_, p)| p).collect()
    }
}

/// Strictly-lower energy wins; NaN loses to any number.
fn beats(candidate: &Point, incumbent: &Point) -> bool {
    candidate.e < incumbent.e || (incumbent.e.is_nan() && !candidate.e.is_nan())
}

/// Reduce an in-memory subset in one call.
pub fn reduce(points: &[Point], group_by: &GroupBy) -> Vec<Point> {
    let mut reducer = GridReducer::new(group_by.clone());
    reducer.absorb(points);
    reducer.finish()
}
