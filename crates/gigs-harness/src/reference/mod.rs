//! Reference factory for user-defined tests.
//!
//! User-defined tests need sub-objects (a vertical CS, a prime meridian...)
//! that are not themselves under test. The reference factory builds them
//! with the constructive factories of the library under test from a small
//! table of EPSG definitions, then checks that what came back matches the
//! table before handing it out.

pub mod tables;

use std::sync::Arc;

use gigs_error::{GigsError, Result};
use gigs_types::factory::{CsFactory, DatumFactory};
use gigs_types::{
    CoordinateSystem, CoordinateSystemAxis, CsKind, Ellipsoid, Identifier, ParameterValue, PrimeMeridian,
    Properties, Validate, Validators, VerticalDatum,
};
use tracing::debug;

use crate::ascii::{NameMatch, names_match};
use crate::authority::CoordinateSystemTest;
use crate::context::TestContext;
use crate::structure::{ExpectedAxis, assert_axes, assert_quantity, assert_value};

use self::tables::{
    AxisDefinition, CONVERSIONS, COORDINATE_SYSTEMS, CsDefinition, ELLIPSOIDS, PRIME_MERIDIANS,
    SecondParameter, VERTICAL_DATUMS,
};

fn find<T>(table: &'static [T], name: &'static str, code: i32, key: impl Fn(&T) -> i32) -> Result<&'static T> {
    table
        .iter()
        .find(|entry| key(entry) == code)
        .ok_or(GigsError::MissingTableEntry { table: name, code })
}

fn properties(name: &str, code: i32) -> Properties {
    Properties::named(name).with_identifier(Identifier::epsg(code))
}

pub(crate) fn expected_axes(axes: &[AxisDefinition]) -> Vec<ExpectedAxis> {
    axes.iter()
        .map(|a| ExpectedAxis {
            name: a.name.to_owned(),
            abbreviation: a.abbreviation.to_owned(),
            direction: a.direction,
            unit: a.unit.clone(),
        })
        .collect()
}

fn check_name(path: &str, expected: &str, actual: &str) -> Result<()> {
    if names_match(expected, actual, NameMatch::Exact) {
        Ok(())
    } else {
        Err(GigsError::mismatch(format!("{path}.name()"), expected, actual))
    }
}

/// Table definition of the coordinate system `code`.
///
/// # Errors
///
/// [`GigsError::MissingTableEntry`] for an unknown code.
pub fn coordinate_system_definition(code: i32) -> Result<&'static CsDefinition> {
    find(COORDINATE_SYSTEMS, "coordinate system", code, |d| d.code)
}

/// Authority-tier expectation of the coordinate system `code`.
///
/// # Errors
///
/// [`GigsError::MissingTableEntry`] for an unknown code.
pub fn coordinate_system_expectation(context: &TestContext, code: i32) -> Result<CoordinateSystemTest> {
    let definition = coordinate_system_definition(code)?;
    let mut test = CoordinateSystemTest::expecting(context, code, definition.name);
    test.kind = Some(definition.kind);
    test.axes = expected_axes(definition.axes);
    Ok(test)
}

/// Builds EPSG sub-objects through the factories of the library under test.
pub struct ReferenceFactory {
    datum: Option<Arc<dyn DatumFactory>>,
    cs: Option<Arc<dyn CsFactory>>,
    validators: Arc<dyn Validators>,
}

impl ReferenceFactory {
    pub fn new(
        datum: Option<Arc<dyn DatumFactory>>,
        cs: Option<Arc<dyn CsFactory>>,
        validators: Arc<dyn Validators>,
    ) -> Self {
        Self { datum, cs, validators }
    }

    /// A reference factory using the constructive factories of `context`.
    pub fn from_context(context: &TestContext) -> Self {
        Self::new(
            context.factories.datum.clone(),
            context.factories.cs.clone(),
            Arc::clone(&context.validators),
        )
    }

    fn cs_factory(&self) -> Result<&dyn CsFactory> {
        self.cs
            .as_deref()
            .ok_or_else(|| GigsError::IllegalState("reference factory has no CS factory".to_owned()))
    }

    fn datum_factory(&self) -> Result<&dyn DatumFactory> {
        self.datum
            .as_deref()
            .ok_or_else(|| GigsError::IllegalState("reference factory has no datum factory".to_owned()))
    }

    pub fn create_coordinate_system_axis(
        &self,
        definition: &AxisDefinition,
    ) -> Result<Arc<dyn CoordinateSystemAxis>> {
        let axis = self.cs_factory()?.create_coordinate_system_axis(
            &Properties::named(definition.name),
            definition.abbreviation,
            definition.direction,
            &definition.unit,
        )?;
        axis.validate_with(&*self.validators)?;
        Ok(axis)
    }

    /// Build the coordinate system `code` with the constructor of its kind.
    ///
    /// # Errors
    ///
    /// [`GigsError::MissingTableEntry`] for an unknown code, any factory
    /// error, or a mismatch between the built CS and its definition.
    pub fn create_coordinate_system(&self, code: i32) -> Result<Arc<dyn CoordinateSystem>> {
        let definition: &CsDefinition = find(COORDINATE_SYSTEMS, "coordinate system", code, |d| d.code)?;
        debug!(code, kind = %definition.kind, "reference coordinate system");
        let axes = definition
            .axes
            .iter()
            .map(|a| self.create_coordinate_system_axis(a))
            .collect::<Result<Vec<_>>>()?;
        let factory = self.cs_factory()?;
        let props = properties(definition.name, code);
        let cs = match definition.kind {
            CsKind::Vertical => {
                let [axis] = <[_; 1]>::try_from(axes)
                    .map_err(|_| GigsError::internal(format!("vertical CS {code} must have one axis")))?;
                factory.create_vertical_cs(&props, axis)?
            }
            CsKind::Ellipsoidal => factory.create_ellipsoidal_cs(&props, &axes)?,
            CsKind::Cartesian => factory.create_cartesian_cs(&props, &axes)?,
            CsKind::Spherical => {
                return Err(GigsError::UnsupportedOperation(format!("spherical CS {code}")));
            }
        };
        cs.validate_with(&*self.validators)?;
        let path = format!("ReferenceFactory.create_coordinate_system({code})");
        assert_value(&format!("{path}.kind()"), definition.kind, cs.kind())?;
        assert_axes(&path, cs.as_ref(), &expected_axes(definition.axes), true)?;
        Ok(cs)
    }

    /// Build a vertical coordinate system.
    ///
    /// # Errors
    ///
    /// As [`Self::create_coordinate_system`], or a mismatch if `code` is not
    /// a vertical CS.
    pub fn create_vertical_cs(&self, code: i32) -> Result<Arc<dyn CoordinateSystem>> {
        self.create_of_kind(code, CsKind::Vertical)
    }

    pub fn create_ellipsoidal_cs(&self, code: i32) -> Result<Arc<dyn CoordinateSystem>> {
        self.create_of_kind(code, CsKind::Ellipsoidal)
    }

    pub fn create_cartesian_cs(&self, code: i32) -> Result<Arc<dyn CoordinateSystem>> {
        self.create_of_kind(code, CsKind::Cartesian)
    }

    fn create_of_kind(&self, code: i32, kind: CsKind) -> Result<Arc<dyn CoordinateSystem>> {
        let definition = find(COORDINATE_SYSTEMS, "coordinate system", code, |d| d.code)?;
        if definition.kind != kind {
            return Err(GigsError::internal(format!("EPSG:{code} is a {} CS, not {kind}", definition.kind)));
        }
        self.create_coordinate_system(code)
    }

    /// # Errors
    ///
    /// [`GigsError::MissingTableEntry`], factory errors, or a mismatch.
    pub fn create_ellipsoid(&self, code: i32) -> Result<Arc<dyn Ellipsoid>> {
        let definition = find(ELLIPSOIDS, "ellipsoid", code, |d| d.code)?;
        let factory = self.datum_factory()?;
        let props = properties(definition.name, code);
        let a = definition.semi_major_axis;
        let ellipsoid = match definition.second {
            SecondParameter::SemiMinorAxis(b) => factory.create_ellipsoid(&props, a, b, &definition.unit)?,
            SecondParameter::InverseFlattening(ivf) => {
                factory.create_flattened_sphere(&props, a, ivf, &definition.unit)?
            }
        };
        ellipsoid.validate_with(&*self.validators)?;
        let path = format!("ReferenceFactory.create_ellipsoid({code})");
        check_name(&path, definition.name, ellipsoid.name())?;
        assert_quantity(
            &format!("{path}.semi_major_axis()"),
            a,
            &definition.unit,
            ellipsoid.semi_major_axis(),
            ellipsoid.axis_unit(),
        )?;
        Ok(ellipsoid)
    }

    /// # Errors
    ///
    /// [`GigsError::MissingTableEntry`], factory errors, or a mismatch.
    pub fn create_prime_meridian(&self, code: i32) -> Result<Arc<dyn PrimeMeridian>> {
        let definition = find(PRIME_MERIDIANS, "prime meridian", code, |d| d.code)?;
        let meridian = self.datum_factory()?.create_prime_meridian(
            &properties(definition.name, code),
            definition.greenwich_longitude,
            &definition.unit,
        )?;
        meridian.validate_with(&*self.validators)?;
        let path = format!("ReferenceFactory.create_prime_meridian({code})");
        check_name(&path, definition.name, meridian.name())?;
        assert_quantity(
            &format!("{path}.greenwich_longitude()"),
            definition.greenwich_longitude,
            &definition.unit,
            meridian.greenwich_longitude(),
            meridian.angular_unit(),
        )?;
        Ok(meridian)
    }

    /// # Errors
    ///
    /// [`GigsError::MissingTableEntry`], factory errors, or a mismatch.
    pub fn create_vertical_datum(&self, code: i32) -> Result<Arc<dyn VerticalDatum>> {
        let definition = find(VERTICAL_DATUMS, "vertical datum", code, |d| d.code)?;
        let datum = self
            .datum_factory()?
            .create_vertical_datum(&properties(definition.name, code))?;
        datum.validate_with(&*self.validators)?;
        check_name(&format!("ReferenceFactory.create_vertical_datum({code})"), definition.name, datum.name())?;
        Ok(datum)
    }

    /// Method name and parameter values of the conversion `code`.
    ///
    /// # Errors
    ///
    /// [`GigsError::MissingTableEntry`] for an unknown code.
    pub fn conversion_parameters(&self, code: i32) -> Result<(&'static str, Vec<ParameterValue>)> {
        let definition = find(CONVERSIONS, "conversion", code, |d| d.code)?;
        let parameters = definition
            .parameters
            .iter()
            .map(|p| ParameterValue::real(p.name, p.value, p.unit.clone()))
            .collect();
        Ok((definition.method, parameters))
    }

    /// Name of the conversion `code`.
    ///
    /// # Errors
    ///
    /// [`GigsError::MissingTableEntry`] for an unknown code.
    pub fn conversion_name(&self, code: i32) -> Result<&'static str> {
        Ok(find(CONVERSIONS, "conversion", code, |d| d.code)?.name)
    }
}
