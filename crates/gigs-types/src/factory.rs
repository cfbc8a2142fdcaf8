//! Factory interfaces implemented by the referencing library under test.
//!
//! Authority factories look an object up by its stringified EPSG code and
//! fail with [`FactoryError::NoSuchAuthorityCode`] when the code is not
//! implemented. Constructive factories build a new object from a
//! [`Properties`] bag and typed sub-components.

use std::sync::Arc;

use gigs_error::FactoryError;

use crate::Properties;
use crate::crs::{GeodeticCrs, VerticalCrs};
use crate::cs::{AxisDirection, CoordinateSystem, CoordinateSystemAxis};
use crate::datum::{Ellipsoid, GeodeticDatum, PrimeMeridian, VerticalDatum};
use crate::operation::CoordinateOperation;
use crate::parameter::ParameterValue;
use crate::unit::Unit;

pub type FactoryResult<T> = Result<T, FactoryError>;

/// Common supertrait of every factory.
pub trait Factory {
    /// Implementer of the factory, recorded in run configurations.
    fn vendor(&self) -> &str;
}

// ── Authority factories ──────────────────────────────────────────────────

pub trait DatumAuthorityFactory: Factory {
    fn create_ellipsoid(&self, code: &str) -> FactoryResult<Arc<dyn Ellipsoid>>;
    fn create_prime_meridian(&self, code: &str) -> FactoryResult<Arc<dyn PrimeMeridian>>;
    fn create_geodetic_datum(&self, code: &str) -> FactoryResult<Arc<dyn GeodeticDatum>>;
    fn create_vertical_datum(&self, code: &str) -> FactoryResult<Arc<dyn VerticalDatum>>;
}

pub trait CsAuthorityFactory: Factory {
    fn create_coordinate_system(&self, code: &str) -> FactoryResult<Arc<dyn CoordinateSystem>>;
    fn create_coordinate_system_axis(
        &self,
        code: &str,
    ) -> FactoryResult<Arc<dyn CoordinateSystemAxis>>;
}

pub trait CrsAuthorityFactory: Factory {
    fn create_geographic_crs(&self, code: &str) -> FactoryResult<Arc<dyn GeodeticCrs>>;
    fn create_geocentric_crs(&self, code: &str) -> FactoryResult<Arc<dyn GeodeticCrs>>;
    fn create_vertical_crs(&self, code: &str) -> FactoryResult<Arc<dyn VerticalCrs>>;
}

pub trait CoordinateOperationAuthorityFactory: Factory {
    fn create_coordinate_operation(
        &self,
        code: &str,
    ) -> FactoryResult<Arc<dyn CoordinateOperation>>;
}

// ── Constructive factories ───────────────────────────────────────────────

pub trait DatumFactory: Factory {
    /// Ellipsoid defined by its two semi-axes.
    fn create_ellipsoid(
        &self,
        properties: &Properties,
        semi_major_axis: f64,
        semi_minor_axis: f64,
        unit: &Unit,
    ) -> FactoryResult<Arc<dyn Ellipsoid>>;

    /// Ellipsoid defined by its semi-major axis and inverse flattening.
    fn create_flattened_sphere(
        &self,
        properties: &Properties,
        semi_major_axis: f64,
        inverse_flattening: f64,
        unit: &Unit,
    ) -> FactoryResult<Arc<dyn Ellipsoid>>;

    fn create_prime_meridian(
        &self,
        properties: &Properties,
        longitude: f64,
        unit: &Unit,
    ) -> FactoryResult<Arc<dyn PrimeMeridian>>;

    fn create_geodetic_datum(
        &self,
        properties: &Properties,
        ellipsoid: Arc<dyn Ellipsoid>,
        prime_meridian: Arc<dyn PrimeMeridian>,
    ) -> FactoryResult<Arc<dyn GeodeticDatum>>;

    fn create_vertical_datum(&self, properties: &Properties)
    -> FactoryResult<Arc<dyn VerticalDatum>>;
}

pub trait CsFactory: Factory {
    fn create_coordinate_system_axis(
        &self,
        properties: &Properties,
        abbreviation: &str,
        direction: AxisDirection,
        unit: &Unit,
    ) -> FactoryResult<Arc<dyn CoordinateSystemAxis>>;

    fn create_ellipsoidal_cs(
        &self,
        properties: &Properties,
        axes: &[Arc<dyn CoordinateSystemAxis>],
    ) -> FactoryResult<Arc<dyn CoordinateSystem>>;

    fn create_cartesian_cs(
        &self,
        properties: &Properties,
        axes: &[Arc<dyn CoordinateSystemAxis>],
    ) -> FactoryResult<Arc<dyn CoordinateSystem>>;

    fn create_vertical_cs(
        &self,
        properties: &Properties,
        axis: Arc<dyn CoordinateSystemAxis>,
    ) -> FactoryResult<Arc<dyn CoordinateSystem>>;
}

pub trait CrsFactory: Factory {
    fn create_geographic_crs(
        &self,
        properties: &Properties,
        datum: Arc<dyn GeodeticDatum>,
        cs: Arc<dyn CoordinateSystem>,
    ) -> FactoryResult<Arc<dyn GeodeticCrs>>;

    fn create_geocentric_crs(
        &self,
        properties: &Properties,
        datum: Arc<dyn GeodeticDatum>,
        cs: Arc<dyn CoordinateSystem>,
    ) -> FactoryResult<Arc<dyn GeodeticCrs>>;

    fn create_vertical_crs(
        &self,
        properties: &Properties,
        datum: Arc<dyn VerticalDatum>,
        cs: Arc<dyn CoordinateSystem>,
    ) -> FactoryResult<Arc<dyn VerticalCrs>>;
}

pub trait CoordinateOperationFactory: Factory {
    /// Conversion defined by a method name and its parameter values.
    fn create_defining_conversion(
        &self,
        properties: &Properties,
        method_name: &str,
        parameters: Vec<ParameterValue>,
    ) -> FactoryResult<Arc<dyn CoordinateOperation>>;
}
