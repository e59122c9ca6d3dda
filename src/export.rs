//! MiniMap text export.
//!
//! One line per point, ten space-separated fields, three decimals each:
//!
//! ```text
//! M E ELD ESH B10 B20 B30 B40 B50 B60
//! 1.000 -10.000 0.000 0.000 0.050 1.000 0.000 0.000 0.000 0.000
//! ```
//!
//! The `M` column is the exception: when every `M` in the source WholeMap was
//! written as an integer, it is written back as an integer (`1 -10.000 ...`).
//!
//! No header. NaN is written as an empty field. Rows are written in the order
//! given; large maps are rendered and flushed in bounded pieces.

use std::fmt::Write as _;
use std::io::Write;

use serde::Serialize;

use crate::model::Point;
use crate::Result;

/// Column typing of a written map, carried over from the WholeMap it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct RowFormat {
    /// Write `M` without decimals.
    pub integer_m: bool,
}

impl RowFormat {
    /// Every field with three decimals.
    pub const DECIMAL: Self = Self { integer_m: false };
    /// `M` as an integer, the rest with three decimals.
    pub const INTEGER_M: Self = Self { integer_m: true };
}

/// Format one field with three decimals.
fn format_value(out: &mut String, v: f64) {
    if !v.is_nan() {
        // Writing into a String cannot fail.
        let _ = write!(out, "{v:.3}");
    }
}

fn format_integer(out: &mut String, v: f64) {
    let v = if v == 0.0 { 0.0 } else { v };
    let _ = write!(out, "{v:.0}");
}

/// Append one record line (with trailing newline) to `out`.
pub fn format_point_into(out: &mut String, p: &Point, format: RowFormat) {
    for (i, v) in p.fields().into_iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        if i == 0 && format.integer_m && !v.is_nan() {
            format_integer(out, v);
        } else {
            format_value(out, v);
        }
    }
    out.push('\n');
}

/// One record line, newline-terminated.
pub fn format_point(p: &Point, format: RowFormat) -> String {
    let mut line = String::with_capacity(80);
    format_point_into(&mut line, p, format);
    line
}

/// Write `points` to `writer`, rendering at most `chunk` rows at a time.
///
/// Returns the number of rows written. A `chunk` of zero is treated as one.
pub fn write_points(
    writer: &mut dyn Write,
    points: &[Point],
    format: RowFormat,
    chunk: usize,
) -> Result<usize> {
    let mut buf = String::new();
    for piece in points.chunks(chunk.max(1)) {
        buf.clear();
        for p in piece {
            format_point_into(&mut buf, p, format);
        }
        writer.write_all(buf.as_bytes())?;
    }
    writer.flush()?;
    Ok(points.len())
}

/// Render a whole map to a string.
pub fn render(points: &[Point], format: RowFormat) -> String {
    let mut out = String::with_capacity(points.len() * 64);
    for p in points {
        format_point_into(&mut out, p, format);
    }
    out
}
