use std::sync::Arc;

use crate::IdentifiedObject;
use crate::unit::Unit;

/// Geometric figure approximating the shape of the earth.
pub trait Ellipsoid: IdentifiedObject {
    fn semi_major_axis(&self) -> f64;
    fn semi_minor_axis(&self) -> f64;

    /// Inverse flattening; infinite for a sphere.
    fn inverse_flattening(&self) -> f64;

    /// Whether the inverse flattening, rather than the semi-minor axis, is
    /// the defining parameter.
    fn is_ivf_definitive(&self) -> bool;

    #[allow(clippy::float_cmp)]
    fn is_sphere(&self) -> bool {
        self.semi_major_axis() == self.semi_minor_axis()
    }

    /// Unit of both axis lengths.
    fn axis_unit(&self) -> &Unit;
}

/// Origin from which longitudes are counted.
pub trait PrimeMeridian: IdentifiedObject {
    fn greenwich_longitude(&self) -> f64;
    fn angular_unit(&self) -> &Unit;
}

/// Relationship of a coordinate system to the earth.
pub trait Datum: IdentifiedObject {
    fn anchor_point(&self) -> Option<&str> {
        None
    }
}

/// Datum describing the relationship of an ellipsoidal or Cartesian
/// coordinate system to the earth.
pub trait GeodeticDatum: Datum {
    fn ellipsoid(&self) -> Arc<dyn Ellipsoid>;
    fn prime_meridian(&self) -> Arc<dyn PrimeMeridian>;
}

/// Datum describing the relationship of gravity-related heights or depths
/// to the earth.
pub trait VerticalDatum: Datum {}
