//! # Record Model
//!
//! Plain DTOs shared by every stage: the ten-field [`Point`], the [`Axis`]
//! names used to address its fields, the run identifier [`Nucleus`], and the
//! tagged output [`MiniMap`].
//!
//! This module is pure data: no I/O, no state.

pub mod point;
pub mod nucleus;
pub mod minimap;

pub use point::{Point, Axis, ParsePointError, FIELD_COUNT};
pub use nucleus::Nucleus;
pub use minimap::{MiniMap, MapKind, Dimensionality};
