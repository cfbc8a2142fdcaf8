//! Default internal-consistency checks.

use gigs_error::{GigsError, Result};
use gigs_types::{
    CoordinateOperation, CoordinateSystem, CoordinateSystemAxis, CrsKind, CsKind, Ellipsoid,
    GeodeticCrs, GeodeticDatum, IdentifiedObject, PrimeMeridian, UnitKind, Validators, VerticalCrs,
    VerticalDatum,
};

use crate::structure::{LINEAR_TOLERANCE, axes};

/// Relative tolerance between the semi-minor axis and the one implied by
/// the inverse flattening.
const FLATTENING_TOLERANCE: f64 = 1e-9;

/// Validators checking the invariants every referencing object must hold
/// regardless of its EPSG definition.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardValidators;

fn require_name(path: &str, object: &(impl IdentifiedObject + ?Sized)) -> Result<()> {
    if object.name().trim().is_empty() {
        return Err(GigsError::validation(format!("{path}.name()"), "missing name"));
    }
    Ok(())
}

fn require_unit(path: &str, kind: UnitKind, actual: UnitKind) -> Result<()> {
    if kind != actual {
        return Err(GigsError::validation(
            path,
            format!("expected a unit of {}, got {}", kind.as_str(), actual.as_str()),
        ));
    }
    Ok(())
}

impl Validators for StandardValidators {
    fn validate_axis(&self, axis: &dyn CoordinateSystemAxis) -> Result<()> {
        require_name("Axis", axis)?;
        if axis.abbreviation().trim().is_empty() {
            return Err(GigsError::validation("Axis.abbreviation()", "missing abbreviation"));
        }
        Ok(())
    }

    fn validate_coordinate_system(&self, cs: &dyn CoordinateSystem) -> Result<()> {
        require_name("CoordinateSystem", cs)?;
        let axes = axes(cs)?;
        if axes.is_empty() {
            return Err(GigsError::validation("CoordinateSystem.dimension()", "no axis"));
        }
        for axis in &axes {
            self.validate_axis(axis.as_ref())?;
        }
        match cs.kind() {
            CsKind::Vertical if axes.len() != 1 || !axes[0].direction().is_vertical() => Err(
                GigsError::validation("CoordinateSystem.axis(0)", "vertical CS needs one up or down axis"),
            ),
            CsKind::Ellipsoidal => {
                for (i, axis) in axes.iter().take(2).enumerate() {
                    require_unit(&format!("CoordinateSystem.axis({i}).unit()"), UnitKind::Angle, axis.unit().kind())?;
                }
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn validate_ellipsoid(&self, ellipsoid: &dyn Ellipsoid) -> Result<()> {
        require_name("Ellipsoid", ellipsoid)?;
        require_unit("Ellipsoid.axis_unit()", UnitKind::Length, ellipsoid.axis_unit().kind())?;
        let a = ellipsoid.semi_major_axis();
        let b = ellipsoid.semi_minor_axis();
        if !(b > 0.0 && b <= a) {
            return Err(GigsError::validation(
                "Ellipsoid.semi_minor_axis()",
                format!("semi-axes out of order: a={a} b={b}"),
            ));
        }
        let ivf = ellipsoid.inverse_flattening();
        if ivf.is_infinite() {
            if (a - b).abs() > a * LINEAR_TOLERANCE {
                return Err(GigsError::validation("Ellipsoid.inverse_flattening()", "infinite for a non-sphere"));
            }
        } else {
            let computed = a * (1.0 - 1.0 / ivf);
            if (computed - b).abs() > a * FLATTENING_TOLERANCE {
                return Err(GigsError::validation(
                    "Ellipsoid.inverse_flattening()",
                    format!("1/f={ivf} inconsistent with a={a} b={b}"),
                ));
            }
        }
        Ok(())
    }

    fn validate_prime_meridian(&self, meridian: &dyn PrimeMeridian) -> Result<()> {
        require_name("PrimeMeridian", meridian)?;
        require_unit("PrimeMeridian.angular_unit()", UnitKind::Angle, meridian.angular_unit().kind())
    }

    fn validate_geodetic_datum(&self, datum: &dyn GeodeticDatum) -> Result<()> {
        require_name("GeodeticDatum", datum)?;
        self.validate_ellipsoid(datum.ellipsoid().as_ref())?;
        self.validate_prime_meridian(datum.prime_meridian().as_ref())
    }

    fn validate_vertical_datum(&self, datum: &dyn VerticalDatum) -> Result<()> {
        require_name("VerticalDatum", datum)
    }

    fn validate_geodetic_crs(&self, crs: &dyn GeodeticCrs) -> Result<()> {
        require_name("GeodeticCRS", crs)?;
        let cs = crs.coordinate_system();
        self.validate_coordinate_system(cs.as_ref())?;
        let expected = match crs.kind() {
            CrsKind::Geographic2D | CrsKind::Geographic3D => CsKind::Ellipsoidal,
            CrsKind::Geocentric => CsKind::Cartesian,
        };
        if cs.kind() != expected {
            return Err(GigsError::validation(
                "GeodeticCRS.coordinate_system()",
                format!("{} CRS with a {} CS", crs.kind(), cs.kind()),
            ));
        }
        self.validate_geodetic_datum(crs.datum().as_ref())
    }

    fn validate_vertical_crs(&self, crs: &dyn VerticalCrs) -> Result<()> {
        require_name("VerticalCRS", crs)?;
        let cs = crs.coordinate_system();
        if cs.kind() != CsKind::Vertical {
            return Err(GigsError::validation(
                "VerticalCRS.coordinate_system()",
                format!("vertical CRS with a {} CS", cs.kind()),
            ));
        }
        self.validate_coordinate_system(cs.as_ref())?;
        self.validate_vertical_datum(crs.datum().as_ref())
    }

    fn validate_operation(&self, operation: &dyn CoordinateOperation) -> Result<()> {
        require_name("CoordinateOperation", operation)?;
        if operation.method_name().trim().is_empty() {
            return Err(GigsError::validation("CoordinateOperation.method()", "missing method name"));
        }
        for (i, parameter) in operation.parameter_values().iter().enumerate() {
            if parameter.name().trim().is_empty() {
                return Err(GigsError::validation(
                    format!("CoordinateOperation.parameter({i})"),
                    "missing parameter name",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use gigs_memory::MemoryFactory;
    use gigs_memory::objects::MemoryEllipsoid;
    use gigs_types::factory::{CsFactory, DatumFactory};
    use gigs_types::{AxisDirection, Properties, Unit};

    use super::*;

    #[test]
    fn accepts_consistent_ellipsoid() {
        let e = MemoryFactory::default()
            .create_flattened_sphere(&Properties::named("GRS 1980"), 6_378_137.0, 298.257_222_101, &Unit::METRE)
            .unwrap();
        StandardValidators.validate_ellipsoid(e.as_ref()).unwrap();
    }

    #[test]
    fn rejects_inconsistent_flattening() {
        let e = MemoryEllipsoid {
            id: gigs_memory::Identification {
                name: "broken".to_owned(),
                ..Default::default()
            },
            semi_major_axis: 6_378_137.0,
            semi_minor_axis: 6_356_752.314_245,
            inverse_flattening: 297.0,
            ivf_definitive: true,
            unit: Unit::METRE,
        };
        let err = StandardValidators.validate_ellipsoid(&e).unwrap_err();
        assert_eq!(err.path(), Some("Ellipsoid.inverse_flattening()"));
    }

    #[test]
    fn rejects_degrees_on_ellipsoid_axes() {
        let e = MemoryEllipsoid {
            id: gigs_memory::Identification {
                name: "x".to_owned(),
                ..Default::default()
            },
            semi_major_axis: 1.0,
            semi_minor_axis: 1.0,
            inverse_flattening: f64::INFINITY,
            ivf_definitive: false,
            unit: Unit::DEGREE,
        };
        assert!(StandardValidators.validate_ellipsoid(&e).is_err());
    }

    #[test]
    fn geographic_cs_needs_angular_axes() {
        let factory = MemoryFactory::default();
        let axes: Vec<_> = [("Easting", "E", AxisDirection::East), ("Northing", "N", AxisDirection::North)]
            .into_iter()
            .map(|(name, abbr, dir)| {
                factory
                    .create_coordinate_system_axis(&Properties::named(name), abbr, dir, &Unit::METRE)
                    .unwrap()
            })
            .collect();
        let cs: Arc<dyn CoordinateSystem> = factory
            .create_ellipsoidal_cs(&Properties::named("bad"), &axes)
            .unwrap();
        let err = StandardValidators.validate_coordinate_system(cs.as_ref()).unwrap_err();
        assert_eq!(err.path(), Some("CoordinateSystem.axis(0).unit()"));
    }
}
