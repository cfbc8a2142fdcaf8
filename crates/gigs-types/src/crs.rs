use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::IdentifiedObject;
use crate::cs::CoordinateSystem;
use crate::datum::{GeodeticDatum, VerticalDatum};

/// Kind of geodetic CRS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrsKind {
    Geographic2D,
    Geographic3D,
    Geocentric,
}

impl CrsKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Geographic2D => "geographic 2D",
            Self::Geographic3D => "geographic 3D",
            Self::Geocentric => "geocentric",
        }
    }
}

impl fmt::Display for CrsKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Geographic or geocentric coordinate reference system.
pub trait GeodeticCrs: IdentifiedObject {
    fn kind(&self) -> CrsKind;
    fn datum(&self) -> Arc<dyn GeodeticDatum>;
    fn coordinate_system(&self) -> Arc<dyn CoordinateSystem>;
}

/// Coordinate reference system for gravity-related heights or depths.
pub trait VerticalCrs: IdentifiedObject {
    fn datum(&self) -> Arc<dyn VerticalDatum>;
    fn coordinate_system(&self) -> Arc<dyn CoordinateSystem>;
}
