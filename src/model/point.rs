//! Point: one row of a WholeMap.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Number of fields in every WholeMap / MiniMap record.
pub const FIELD_COUNT: usize = 10;

/// Named field of a [`Point`], in on-disk column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    M,
    E,
    Eld,
    Esh,
    B10,
    B20,
    B30,
    B40,
    B50,
    B60,
}

impl Axis {
    /// All columns in the order they are read and written.
    pub const COLUMNS: [Axis; FIELD_COUNT] = [
        Axis::M, Axis::E, Axis::Eld, Axis::Esh,
        Axis::B10, Axis::B20, Axis::B30, Axis::B40, Axis::B50, Axis::B60,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Axis::M => "M",
            Axis::E => "E",
            Axis::Eld => "ELD",
            Axis::Esh => "ESH",
            Axis::B10 => "B10",
            Axis::B20 => "B20",
            Axis::B30 => "B30",
            Axis::B40 => "B40",
            Axis::B50 => "B50",
            Axis::B60 => "B60",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single deformation-grid point with its energies.
///
/// Field order matches the file layout: `M E ELD ESH B10 B20 B30 B40 B50 B60`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub m: f64,
    pub e: f64,
    pub eld: f64,
    pub esh: f64,
    pub b10: f64,
    pub b20: f64,
    pub b30: f64,
    pub b40: f64,
    pub b50: f64,
    pub b60: f64,
}

impl Point {
    pub fn from_fields(f: [f64; FIELD_COUNT]) -> Self {
        Self {
            m: f[0], e: f[1], eld: f[2], esh: f[3],
            b10: f[4], b20: f[5], b30: f[6], b40: f[7], b50: f[8], b60: f[9],
        }
    }

    pub fn fields(&self) -> [f64; FIELD_COUNT] {
        [
            self.m, self.e, self.eld, self.esh,
            self.b10, self.b20, self.b30, self.b40, self.b50, self.b60,
        ]
    }

    /// Read a field by axis name.
    pub fn get(&self, axis: Axis) -> f64 {
        match axis {
            Axis::M => self.m,
            Axis::E => self.e,
            Axis::Eld => self.eld,
            Axis::Esh => self.esh,
            Axis::B10 => self.b10,
            Axis::B20 => self.b20,
            Axis::B30 => self.b30,
            Axis::B40 => self.b40,
            Axis::B50 => self.b50,
            Axis::B60 => self.b60,
        }
    }
}

/// Parse failure for a single record line. Carries no line number; the
/// reader attaches it when converting into [`crate::Error::MalformedRecord`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsePointError(pub String);

impl fmt::Display for ParsePointError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ParsePointError {}

impl FromStr for Point {
    type Err = ParsePointError;

    /// Parse a whitespace-separated line of exactly ten numbers.
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut fields = [0.0; FIELD_COUNT];
        let mut count = 0;
        for token in line.split_whitespace() {
            if count == FIELD_COUNT {
                return Err(ParsePointError(format!(
                    "expected {FIELD_COUNT} fields, found more"
                )));
            }
            fields[count] = token.parse::<f64>().map_err(|_| {
                ParsePointError(format!(
                    "field {} ({}) is not numeric: '{}'",
                    count + 1,
                    Axis::COLUMNS[count],
                    token
                ))
            })?;
            count += 1;
        }
        if count != FIELD_COUNT {
            return Err(ParsePointError(format!(
                "expected {FIELD_COUNT} fields, found {count}"
            )));
        }
        Ok(Point::from_fields(fields))
    }
}
