use std::sync::Arc;

use gigs_error::FactoryError;
use gigs_types::factory::{
    CoordinateOperationFactory, CrsFactory, CsFactory, DatumFactory, Factory, FactoryResult,
};
use gigs_types::{
    AxisDirection, CoordinateOperation, CoordinateSystem, CoordinateSystemAxis, CrsKind, CsKind,
    Ellipsoid, GeodeticCrs, GeodeticDatum, OperationKind, ParameterValue, PrimeMeridian,
    Properties, Unit, UnitKind, VerticalCrs, VerticalDatum,
};
use tracing::debug;

use crate::objects::{
    Identification, MemoryAxis, MemoryCs, MemoryEllipsoid, MemoryGeodeticCrs,
    MemoryGeodeticDatum, MemoryOperation, MemoryPrimeMeridian, MemoryVerticalCrs,
    MemoryVerticalDatum,
};

/// Constructive factory building plain in-memory objects.
///
/// Implements every constructive factory trait so one instance can be
/// handed to the harness for all factory roles.
#[derive(Debug, Clone)]
pub struct MemoryFactory {
    vendor: String,
}

impl Default for MemoryFactory {
    fn default() -> Self {
        Self::new("gigs-memory")
    }
}

impl MemoryFactory {
    pub fn new(vendor: impl Into<String>) -> Self {
        Self {
            vendor: vendor.into(),
        }
    }
}

fn require_name(properties: &Properties) -> FactoryResult<Identification> {
    if properties.name.trim().is_empty() {
        return Err(FactoryError::invalid("missing mandatory \"name\" property"));
    }
    Ok(Identification::from(properties))
}

fn require_unit(unit: &Unit, kind: UnitKind, role: &str) -> FactoryResult<()> {
    if unit.kind() != kind {
        return Err(FactoryError::invalid(format!(
            "{role} unit must measure {}, got {unit}",
            kind.as_str()
        )));
    }
    Ok(())
}

impl Factory for MemoryFactory {
    fn vendor(&self) -> &str {
        &self.vendor
    }
}

impl DatumFactory for MemoryFactory {
    fn create_ellipsoid(
        &self,
        properties: &Properties,
        semi_major_axis: f64,
        semi_minor_axis: f64,
        unit: &Unit,
    ) -> FactoryResult<Arc<dyn Ellipsoid>> {
        require_unit(unit, UnitKind::Length, "axis")?;
        if !(semi_minor_axis > 0.0 && semi_minor_axis <= semi_major_axis) {
            return Err(FactoryError::invalid(format!(
                "illegal semi-axes a={semi_major_axis} b={semi_minor_axis}"
            )));
        }
        #[allow(clippy::float_cmp)]
        let inverse_flattening = if semi_major_axis == semi_minor_axis {
            f64::INFINITY
        } else {
            semi_major_axis / (semi_major_axis - semi_minor_axis)
        };
        Ok(Arc::new(MemoryEllipsoid {
            id: require_name(properties)?,
            semi_major_axis,
            semi_minor_axis,
            inverse_flattening,
            ivf_definitive: false,
            unit: unit.clone(),
        }))
    }

    fn create_flattened_sphere(
        &self,
        properties: &Properties,
        semi_major_axis: f64,
        inverse_flattening: f64,
        unit: &Unit,
    ) -> FactoryResult<Arc<dyn Ellipsoid>> {
        require_unit(unit, UnitKind::Length, "axis")?;
        if !(semi_major_axis > 0.0 && inverse_flattening > 1.0) {
            return Err(FactoryError::invalid(format!(
                "illegal flattened sphere a={semi_major_axis} 1/f={inverse_flattening}"
            )));
        }
        let semi_minor_axis = if inverse_flattening.is_infinite() {
            semi_major_axis
        } else {
            semi_major_axis * (1.0 - 1.0 / inverse_flattening)
        };
        Ok(Arc::new(MemoryEllipsoid {
            id: require_name(properties)?,
            semi_major_axis,
            semi_minor_axis,
            inverse_flattening,
            ivf_definitive: true,
            unit: unit.clone(),
        }))
    }

    fn create_prime_meridian(
        &self,
        properties: &Properties,
        longitude: f64,
        unit: &Unit,
    ) -> FactoryResult<Arc<dyn PrimeMeridian>> {
        require_unit(unit, UnitKind::Angle, "longitude")?;
        Ok(Arc::new(MemoryPrimeMeridian {
            id: require_name(properties)?,
            greenwich_longitude: longitude,
            unit: unit.clone(),
        }))
    }

    fn create_geodetic_datum(
        &self,
        properties: &Properties,
        ellipsoid: Arc<dyn Ellipsoid>,
        prime_meridian: Arc<dyn PrimeMeridian>,
    ) -> FactoryResult<Arc<dyn GeodeticDatum>> {
        Ok(Arc::new(MemoryGeodeticDatum {
            id: require_name(properties)?,
            anchor_point: None,
            ellipsoid,
            prime_meridian,
        }))
    }

    fn create_vertical_datum(
        &self,
        properties: &Properties,
    ) -> FactoryResult<Arc<dyn VerticalDatum>> {
        Ok(Arc::new(MemoryVerticalDatum {
            id: require_name(properties)?,
            anchor_point: None,
        }))
    }
}

impl CsFactory for MemoryFactory {
    fn create_coordinate_system_axis(
        &self,
        properties: &Properties,
        abbreviation: &str,
        direction: AxisDirection,
        unit: &Unit,
    ) -> FactoryResult<Arc<dyn CoordinateSystemAxis>> {
        if abbreviation.is_empty() {
            return Err(FactoryError::invalid("missing axis abbreviation"));
        }
        Ok(Arc::new(MemoryAxis {
            id: require_name(properties)?,
            abbreviation: abbreviation.to_owned(),
            direction,
            unit: unit.clone(),
        }))
    }

    fn create_ellipsoidal_cs(
        &self,
        properties: &Properties,
        axes: &[Arc<dyn CoordinateSystemAxis>],
    ) -> FactoryResult<Arc<dyn CoordinateSystem>> {
        if !(2..=3).contains(&axes.len()) {
            return Err(FactoryError::invalid(format!(
                "ellipsoidal CS needs 2 or 3 axes, got {}",
                axes.len()
            )));
        }
        build_cs(properties, CsKind::Ellipsoidal, axes)
    }

    fn create_cartesian_cs(
        &self,
        properties: &Properties,
        axes: &[Arc<dyn CoordinateSystemAxis>],
    ) -> FactoryResult<Arc<dyn CoordinateSystem>> {
        if !(2..=3).contains(&axes.len()) {
            return Err(FactoryError::invalid(format!(
                "Cartesian CS needs 2 or 3 axes, got {}",
                axes.len()
            )));
        }
        build_cs(properties, CsKind::Cartesian, axes)
    }

    fn create_vertical_cs(
        &self,
        properties: &Properties,
        axis: Arc<dyn CoordinateSystemAxis>,
    ) -> FactoryResult<Arc<dyn CoordinateSystem>> {
        if !axis.direction().is_vertical() {
            return Err(FactoryError::invalid(format!(
                "vertical CS axis must point up or down, got {}",
                axis.direction()
            )));
        }
        build_cs(properties, CsKind::Vertical, &[axis])
    }
}

fn build_cs(
    properties: &Properties,
    kind: CsKind,
    axes: &[Arc<dyn CoordinateSystemAxis>],
) -> FactoryResult<Arc<dyn CoordinateSystem>> {
    debug!(name = %properties.name, %kind, dimension = axes.len(), "memory CS");
    Ok(Arc::new(MemoryCs {
        id: require_name(properties)?,
        kind,
        axes: axes.to_vec(),
    }))
}

impl CrsFactory for MemoryFactory {
    fn create_geographic_crs(
        &self,
        properties: &Properties,
        datum: Arc<dyn GeodeticDatum>,
        cs: Arc<dyn CoordinateSystem>,
    ) -> FactoryResult<Arc<dyn GeodeticCrs>> {
        if cs.kind() != CsKind::Ellipsoidal {
            return Err(FactoryError::invalid(format!(
                "geographic CRS needs an ellipsoidal CS, got {}",
                cs.kind()
            )));
        }
        let kind = if cs.dimension() == 3 {
            CrsKind::Geographic3D
        } else {
            CrsKind::Geographic2D
        };
        Ok(Arc::new(MemoryGeodeticCrs {
            id: require_name(properties)?,
            kind,
            datum,
            cs,
        }))
    }

    fn create_geocentric_crs(
        &self,
        properties: &Properties,
        datum: Arc<dyn GeodeticDatum>,
        cs: Arc<dyn CoordinateSystem>,
    ) -> FactoryResult<Arc<dyn GeodeticCrs>> {
        if cs.kind() != CsKind::Cartesian || cs.dimension() != 3 {
            return Err(FactoryError::invalid(
                "geocentric CRS needs a three-dimensional Cartesian CS",
            ));
        }
        Ok(Arc::new(MemoryGeodeticCrs {
            id: require_name(properties)?,
            kind: CrsKind::Geocentric,
            datum,
            cs,
        }))
    }

    fn create_vertical_crs(
        &self,
        properties: &Properties,
        datum: Arc<dyn VerticalDatum>,
        cs: Arc<dyn CoordinateSystem>,
    ) -> FactoryResult<Arc<dyn VerticalCrs>> {
        if cs.kind() != CsKind::Vertical {
            return Err(FactoryError::invalid(format!(
                "vertical CRS needs a vertical CS, got {}",
                cs.kind()
            )));
        }
        Ok(Arc::new(MemoryVerticalCrs {
            id: require_name(properties)?,
            datum,
            cs,
        }))
    }
}

impl CoordinateOperationFactory for MemoryFactory {
    fn create_defining_conversion(
        &self,
        properties: &Properties,
        method_name: &str,
        parameters: Vec<ParameterValue>,
    ) -> FactoryResult<Arc<dyn CoordinateOperation>> {
        if method_name.trim().is_empty() {
            return Err(FactoryError::invalid("missing operation method"));
        }
        Ok(Arc::new(MemoryOperation {
            id: require_name(properties)?,
            kind: OperationKind::Conversion,
            method_name: method_name.to_owned(),
            parameters,
            version: None,
        }))
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn flattened_sphere_derives_semi_minor_axis() {
        let factory = MemoryFactory::default();
        let e = factory
            .create_flattened_sphere(
                &Properties::named("WGS 84"),
                6_378_137.0,
                298.257_223_563,
                &Unit::METRE,
            )
            .unwrap();
        assert!((e.semi_minor_axis() - 6_356_752.314_245).abs() < 1e-3);
        assert!(e.is_ivf_definitive());
        assert!(!e.is_sphere());
    }

    #[test]
    fn sphere_has_infinite_ivf() {
        let factory = MemoryFactory::default();
        let e = factory
            .create_ellipsoid(&Properties::named("Sphere"), 6_371_000.0, 6_371_000.0, &Unit::METRE)
            .unwrap();
        assert!(e.inverse_flattening().is_infinite());
        assert!(e.is_sphere());
    }

    #[test]
    fn rejects_missing_name() {
        let factory = MemoryFactory::default();
        let err = factory
            .create_vertical_datum(&Properties::named("  "))
            .err()
            .unwrap();
        assert!(matches!(err, FactoryError::InvalidArguments(_)));
    }

    #[test]
    fn vertical_cs_requires_vertical_axis() {
        let factory = MemoryFactory::default();
        let axis = factory
            .create_coordinate_system_axis(
                &Properties::named("Easting"),
                "E",
                AxisDirection::East,
                &Unit::METRE,
            )
            .unwrap();
        assert!(
            factory
                .create_vertical_cs(&Properties::named("bad"), axis)
                .is_err()
        );
    }
}
