//! Tests of objects fetched from authority factories by EPSG code.
//!
//! Each test holds the expected EPSG definition of one object in public
//! fields. Expected sub-objects (the ellipsoid of a datum, the datum of a
//! CRS, ...) are themselves tests, run as dependency checks on the
//! sub-object returned by the parent.

mod crs;
mod cs;
mod datum;
mod ellipsoid;
mod operation;
mod prime_meridian;

pub use crs::{GeodeticCrsTest, VerticalCrsTest};
pub use cs::CoordinateSystemTest;
pub use datum::{GeodeticDatumTest, VerticalDatumTest};
pub use ellipsoid::EllipsoidTest;
pub use operation::CoordinateOperationTest;
pub use prime_meridian::PrimeMeridianTest;
