use std::sync::Arc;

use gigs_error::{FactoryError, Result};
use gigs_types::factory::CrsFactory;
use gigs_types::{CoordinateSystem, CrsKind, GeodeticCrs, Properties, VerticalCrs};

use crate::authority::{GeodeticCrsTest, VerticalCrsTest};
use crate::configuration::ConfigurationKey;
use crate::context::TestContext;
use crate::outcome::Verdict;
use crate::reference::{
    ReferenceFactory, coordinate_system_definition, coordinate_system_expectation, expected_axes,
};
use crate::structure::assert_axes;
use crate::user::{UserGeodeticDatumTest, UserTestCase, UserVerticalDatumTest, user_verifier};
use crate::verifier::{passed, verify_dependency};

const ROLES: &[ConfigurationKey] = &[
    ConfigurationKey::CrsFactory,
    ConfigurationKey::CsFactory,
    ConfigurationKey::DatumFactory,
];

/// Ellipsoidal 2D CS used by default: latitude, longitude in degrees.
pub const DEFAULT_ELLIPSOIDAL_CS: i32 = 6422;

/// Vertical CS used by default: gravity-related height in metres.
pub const DEFAULT_VERTICAL_CS: i32 = 6499;

/// Check every axis of `cs`, names and abbreviations included, against the
/// reference definition `code`. Narrowed dependency checks skip axis names.
fn verify_round_trip_axes(path: &str, cs: &dyn CoordinateSystem, code: i32) -> Result<()> {
    let definition = coordinate_system_definition(code)?;
    assert_axes(
        &format!("{path}.coordinate_system()"),
        cs,
        &expected_axes(definition.axes),
        true,
    )
}

/// Test of a geographic CRS built from a user-defined datum and an EPSG
/// ellipsoidal coordinate system.
pub struct UserGeographicCrsTest {
    pub case: UserTestCase<dyn GeodeticCrs>,
    pub datum: UserGeodeticDatumTest,
    /// EPSG code of the ellipsoidal CS built by the reference factory.
    pub cs_code: i32,
    reference: ReferenceFactory,
    factory: Option<Arc<dyn CrsFactory>>,
}

impl UserGeographicCrsTest {
    pub fn new(context: &TestContext, properties: Properties, datum: UserGeodeticDatumTest) -> Self {
        Self {
            case: UserTestCase::new("GeodeticCRS", properties, ROLES, context),
            datum,
            cs_code: DEFAULT_ELLIPSOIDAL_CS,
            reference: ReferenceFactory::from_context(context),
            factory: context.factories.crs.clone(),
        }
    }

    /// Build the CRS and its components, once each.
    ///
    /// # Errors
    ///
    /// The first factory or reference-table error.
    pub fn build(&mut self) -> Result<Arc<dyn GeodeticCrs>> {
        if let Some(crs) = self.case.cached() {
            return Ok(crs);
        }
        let datum = self.datum.build()?;
        let cs = self.reference.create_ellipsoidal_cs(self.cs_code)?;
        let factory = self.factory.clone();
        let properties = self.case.properties.clone();
        self.case.get_or_build(|| {
            factory
                .ok_or_else(|| FactoryError::Unsupported("no CRS factory".to_owned()))?
                .create_geographic_crs(&properties, datum, cs)
        })
    }

    /// Authority-tier expectation matching this definition.
    ///
    /// # Errors
    ///
    /// If `cs_code` is not in the reference tables.
    pub fn expectation(&self) -> Result<GeodeticCrsTest> {
        let definition = coordinate_system_definition(self.cs_code)?;
        let mut test = GeodeticCrsTest::new(self.case.context());
        self.case.properties.name.clone_into(&mut test.case.name);
        test.kind = Some(if definition.axes.len() == 3 {
            CrsKind::Geographic3D
        } else {
            CrsKind::Geographic2D
        });
        test.axis_directions = definition.axes.iter().map(|a| a.direction).collect();
        test.datum = Some(self.datum.expectation());
        test.coordinate_system = Some(coordinate_system_expectation(self.case.context(), self.cs_code)?);
        Ok(test)
    }

    fn verify_built(&mut self, crs: &Arc<dyn GeodeticCrs>) -> Result<Verdict> {
        let mut expected = self.expectation()?;
        passed!(verify_dependency(
            self.case.configuration(),
            self.case.path(),
            &mut expected,
            Arc::clone(crs)
        ));
        verify_round_trip_axes(self.case.path(), crs.coordinate_system().as_ref(), self.cs_code)?;
        Ok(Verdict::Passed)
    }
}

user_verifier!(UserGeographicCrsTest, dyn GeodeticCrs);

/// Test of a vertical CRS built from a user-defined vertical datum and an
/// EPSG vertical coordinate system.
pub struct UserVerticalCrsTest {
    pub case: UserTestCase<dyn VerticalCrs>,
    pub datum: UserVerticalDatumTest,
    /// EPSG code of the vertical CS built by the reference factory.
    pub cs_code: i32,
    reference: ReferenceFactory,
    factory: Option<Arc<dyn CrsFactory>>,
}

impl UserVerticalCrsTest {
    pub fn new(context: &TestContext, properties: Properties, datum: UserVerticalDatumTest) -> Self {
        Self {
            case: UserTestCase::new("VerticalCRS", properties, ROLES, context),
            datum,
            cs_code: DEFAULT_VERTICAL_CS,
            reference: ReferenceFactory::from_context(context),
            factory: context.factories.crs.clone(),
        }
    }

    /// Build the CRS and its components, once each.
    ///
    /// # Errors
    ///
    /// The first factory or reference-table error.
    pub fn build(&mut self) -> Result<Arc<dyn VerticalCrs>> {
        if let Some(crs) = self.case.cached() {
            return Ok(crs);
        }
        let datum = self.datum.build()?;
        let cs = self.reference.create_vertical_cs(self.cs_code)?;
        let factory = self.factory.clone();
        let properties = self.case.properties.clone();
        self.case.get_or_build(|| {
            factory
                .ok_or_else(|| FactoryError::Unsupported("no CRS factory".to_owned()))?
                .create_vertical_crs(&properties, datum, cs)
        })
    }

    /// Authority-tier expectation matching this definition.
    ///
    /// # Errors
    ///
    /// If `cs_code` is not in the reference tables.
    pub fn expectation(&self) -> Result<VerticalCrsTest> {
        let definition = coordinate_system_definition(self.cs_code)?;
        let mut test = VerticalCrsTest::new(self.case.context());
        self.case.properties.name.clone_into(&mut test.case.name);
        if let Some(axis) = definition.axes.first() {
            test.axis_direction = Some(axis.direction);
            test.axis_unit = Some(axis.unit.clone());
        }
        test.datum = Some(self.datum.expectation());
        test.coordinate_system = Some(coordinate_system_expectation(self.case.context(), self.cs_code)?);
        Ok(test)
    }

    fn verify_built(&mut self, crs: &Arc<dyn VerticalCrs>) -> Result<Verdict> {
        let mut expected = self.expectation()?;
        passed!(verify_dependency(
            self.case.configuration(),
            self.case.path(),
            &mut expected,
            Arc::clone(crs)
        ));
        verify_round_trip_axes(self.case.path(), crs.coordinate_system().as_ref(), self.cs_code)?;
        Ok(Verdict::Passed)
    }
}

user_verifier!(UserVerticalCrsTest, dyn VerticalCrs);
