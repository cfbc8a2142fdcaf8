use gigs_error::Result;

use crate::crs::{GeodeticCrs, VerticalCrs};
use crate::cs::{CoordinateSystem, CoordinateSystemAxis};
use crate::datum::{Ellipsoid, GeodeticDatum, PrimeMeridian, VerticalDatum};
use crate::operation::CoordinateOperation;

/// Independent sanity checks of an object's internal consistency.
///
/// The harness invokes the matching method after every construction and
/// before any comparison against expected values.
pub trait Validators {
    fn validate_axis(&self, object: &dyn CoordinateSystemAxis) -> Result<()>;
    fn validate_coordinate_system(&self, object: &dyn CoordinateSystem) -> Result<()>;
    fn validate_ellipsoid(&self, object: &dyn Ellipsoid) -> Result<()>;
    fn validate_prime_meridian(&self, object: &dyn PrimeMeridian) -> Result<()>;
    fn validate_geodetic_datum(&self, object: &dyn GeodeticDatum) -> Result<()>;
    fn validate_vertical_datum(&self, object: &dyn VerticalDatum) -> Result<()>;
    fn validate_geodetic_crs(&self, object: &dyn GeodeticCrs) -> Result<()>;
    fn validate_vertical_crs(&self, object: &dyn VerticalCrs) -> Result<()>;
    fn validate_operation(&self, object: &dyn CoordinateOperation) -> Result<()>;
}

/// Dispatches an object to the matching [`Validators`] method.
pub trait Validate {
    /// # Errors
    ///
    /// Whatever the validator reports for this object.
    fn validate_with(&self, validators: &dyn Validators) -> Result<()>;
}

macro_rules! impl_validate {
    ($($ty:ident => $method:ident),* $(,)?) => {
        $(
            impl Validate for dyn $ty {
                fn validate_with(&self, validators: &dyn Validators) -> Result<()> {
                    validators.$method(self)
                }
            }
        )*
    };
}

impl_validate! {
    CoordinateSystemAxis => validate_axis,
    CoordinateSystem => validate_coordinate_system,
    Ellipsoid => validate_ellipsoid,
    PrimeMeridian => validate_prime_meridian,
    GeodeticDatum => validate_geodetic_datum,
    VerticalDatum => validate_vertical_datum,
    GeodeticCrs => validate_geodetic_crs,
    VerticalCrs => validate_vertical_crs,
    CoordinateOperation => validate_operation,
}
