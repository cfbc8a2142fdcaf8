use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::IdentifiedObject;
use crate::unit::Unit;

/// Direction of a coordinate system axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisDirection {
    North,
    South,
    East,
    West,
    Up,
    Down,
    GeocentricX,
    GeocentricY,
    GeocentricZ,
}

impl AxisDirection {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::South => "south",
            Self::East => "east",
            Self::West => "west",
            Self::Up => "up",
            Self::Down => "down",
            Self::GeocentricX => "geocentricX",
            Self::GeocentricY => "geocentricY",
            Self::GeocentricZ => "geocentricZ",
        }
    }

    /// Whether the direction is vertical (up or down).
    pub const fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }
}

impl fmt::Display for AxisDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CsKind {
    Ellipsoidal,
    Cartesian,
    Vertical,
    Spherical,
}

impl CsKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ellipsoidal => "ellipsoidal",
            Self::Cartesian => "Cartesian",
            Self::Vertical => "vertical",
            Self::Spherical => "spherical",
        }
    }
}

impl fmt::Display for CsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single axis of a coordinate system.
pub trait CoordinateSystemAxis: IdentifiedObject {
    fn abbreviation(&self) -> &str;
    fn direction(&self) -> AxisDirection;
    fn unit(&self) -> &Unit;
}

/// An ordered sequence of axes.
pub trait CoordinateSystem: IdentifiedObject {
    fn kind(&self) -> CsKind;

    /// Number of axes.
    fn dimension(&self) -> usize;

    /// Axis at `index`, or `None` when `index >= dimension()`.
    fn axis(&self, index: usize) -> Option<Arc<dyn CoordinateSystemAxis>>;
}
