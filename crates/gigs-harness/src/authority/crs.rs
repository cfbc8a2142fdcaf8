use std::sync::Arc;

use gigs_error::Result;
use gigs_types::factory::{CrsAuthorityFactory, FactoryResult};
use gigs_types::{AxisDirection, CrsKind, GeodeticCrs, Unit, VerticalCrs};

use crate::authority::{CoordinateSystemTest, GeodeticDatumTest, VerticalDatumTest};
use crate::configuration::{ConfigurationKey, TestConfiguration};
use crate::context::TestContext;
use crate::outcome::{Lookup, Verdict};
use crate::structure::{Directions, assert_value, axes};
use crate::verifier::{AuthorityTestCase, Verifier, authority_verifier, passed, prepared, verify_dependency};

fn create_geodetic_crs(
    factory: &dyn CrsAuthorityFactory,
    kind: Option<CrsKind>,
    code: &str,
) -> FactoryResult<Arc<dyn GeodeticCrs>> {
    if kind == Some(CrsKind::Geocentric) {
        factory.create_geocentric_crs(code)
    } else {
        factory.create_geographic_crs(code)
    }
}

/// Test of a geographic or geocentric CRS created from its EPSG code.
///
/// A geocentric CRS is requested when `kind` is [`CrsKind::Geocentric`],
/// a geographic one otherwise.
pub struct GeodeticCrsTest {
    pub case: AuthorityTestCase<dyn GeodeticCrs>,
    pub kind: Option<CrsKind>,
    /// Expected axis directions in order; empty to skip.
    pub axis_directions: Vec<AxisDirection>,
    pub datum: Option<GeodeticDatumTest>,
    pub coordinate_system: Option<CoordinateSystemTest>,
    factory: Option<Arc<dyn CrsAuthorityFactory>>,
}

impl GeodeticCrsTest {
    pub fn new(context: &TestContext) -> Self {
        Self {
            case: AuthorityTestCase::new("GeodeticCRS", ConfigurationKey::CrsAuthorityFactory, context),
            kind: None,
            axis_directions: Vec::new(),
            datum: None,
            coordinate_system: None,
            factory: context.factories.crs_authority.clone(),
        }
    }

    pub fn expecting(context: &TestContext, code: i32, name: &str) -> Self {
        let mut test = Self::new(context);
        test.case.expect(code, name);
        test
    }

    fn verify_structure(&mut self, crs: &Arc<dyn GeodeticCrs>) -> Result<Verdict> {
        let path = self.case.path().to_owned();
        if let Some(kind) = self.kind {
            assert_value(&format!("{path}.kind()"), kind, crs.kind())?;
        }
        let cs = crs.coordinate_system();
        if !self.axis_directions.is_empty() {
            let actual = axes(cs.as_ref())?.iter().map(|a| a.direction()).collect();
            assert_value(
                &format!("{path}.coordinate_system().axis(*).direction()"),
                Directions(self.axis_directions.clone()),
                Directions(actual),
            )?;
        }
        let parent = self.case.configuration();
        if let Some(datum) = &mut self.datum {
            passed!(verify_dependency(parent, &format!("{path}.datum()"), datum, crs.datum()));
        }
        if let Some(expected) = &mut self.coordinate_system {
            passed!(verify_dependency(parent, &format!("{path}.coordinate_system()"), expected, cs));
        }
        Ok(Verdict::Passed)
    }
}

impl Verifier for GeodeticCrsTest {
    type Object = dyn GeodeticCrs;

    fn get_identified_object(&mut self) -> Result<Lookup<Arc<dyn GeodeticCrs>>> {
        let kind = self.kind;
        self.case.get_identified_object(self.factory.as_deref(), |f, code| {
            create_geodetic_crs(f, kind, code)
        })
    }

    fn configure_as_dependency(&mut self, parent: &TestConfiguration, path: &str) {
        self.case.configure_as_dependency(parent, path);
    }

    fn inject(&mut self, object: Arc<dyn GeodeticCrs>) -> Result<()> {
        self.case.inject(object)
    }

    fn verify(&mut self) -> Result<Verdict> {
        let kind = self.kind;
        let object = prepared!(self.case, self.factory.as_deref(), |f, code| {
            create_geodetic_crs(f, kind, code)
        });
        self.verify_structure(&object)
    }

    fn configuration(&self) -> &TestConfiguration {
        self.case.configuration()
    }
}

/// Test of a vertical CRS created from its EPSG code.
pub struct VerticalCrsTest {
    pub case: AuthorityTestCase<dyn VerticalCrs>,
    pub axis_direction: Option<AxisDirection>,
    pub axis_unit: Option<Unit>,
    pub datum: Option<VerticalDatumTest>,
    pub coordinate_system: Option<CoordinateSystemTest>,
    factory: Option<Arc<dyn CrsAuthorityFactory>>,
}

impl VerticalCrsTest {
    pub fn new(context: &TestContext) -> Self {
        Self {
            case: AuthorityTestCase::new("VerticalCRS", ConfigurationKey::CrsAuthorityFactory, context),
            axis_direction: None,
            axis_unit: None,
            datum: None,
            coordinate_system: None,
            factory: context.factories.crs_authority.clone(),
        }
    }

    pub fn expecting(context: &TestContext, code: i32, name: &str) -> Self {
        let mut test = Self::new(context);
        test.case.expect(code, name);
        test
    }

    fn verify_structure(&mut self, crs: &Arc<dyn VerticalCrs>) -> Result<Verdict> {
        let path = self.case.path().to_owned();
        let cs = crs.coordinate_system();
        let axis_path = format!("{path}.coordinate_system().axis(0)");
        assert_value(&format!("{path}.coordinate_system().dimension()"), 1, cs.dimension())?;
        let axis = axes(cs.as_ref())?.remove(0);
        if let Some(direction) = self.axis_direction {
            assert_value(&format!("{axis_path}.direction()"), direction, axis.direction())?;
        }
        if let Some(unit) = &self.axis_unit {
            assert_value(&format!("{axis_path}.unit()"), unit, axis.unit())?;
        }
        let parent = self.case.configuration();
        if let Some(datum) = &mut self.datum {
            passed!(verify_dependency(parent, &format!("{path}.datum()"), datum, crs.datum()));
        }
        if let Some(expected) = &mut self.coordinate_system {
            passed!(verify_dependency(parent, &format!("{path}.coordinate_system()"), expected, cs));
        }
        Ok(Verdict::Passed)
    }
}

authority_verifier!(VerticalCrsTest, dyn VerticalCrs, |f, code| f.create_vertical_crs(code));
