use std::sync::Arc;

use gigs_error::{FactoryError, Result};
use gigs_types::factory::DatumFactory;
use gigs_types::{GeodeticDatum, Properties, VerticalDatum};

use crate::authority::{GeodeticDatumTest, VerticalDatumTest};
use crate::configuration::ConfigurationKey;
use crate::context::TestContext;
use crate::outcome::Verdict;
use crate::user::{UserEllipsoidTest, UserPrimeMeridianTest, UserTestCase, user_verifier};
use crate::verifier::verify_dependency;

const ROLES: &[ConfigurationKey] = &[ConfigurationKey::DatumFactory];

/// Test of a geodetic datum built from a user-defined ellipsoid and prime
/// meridian.
pub struct UserGeodeticDatumTest {
    pub case: UserTestCase<dyn GeodeticDatum>,
    pub ellipsoid: UserEllipsoidTest,
    pub prime_meridian: UserPrimeMeridianTest,
    factory: Option<Arc<dyn DatumFactory>>,
}

impl UserGeodeticDatumTest {
    pub fn new(
        context: &TestContext,
        properties: Properties,
        ellipsoid: UserEllipsoidTest,
        prime_meridian: UserPrimeMeridianTest,
    ) -> Self {
        Self {
            case: UserTestCase::new("GeodeticDatum", properties, ROLES, context),
            ellipsoid,
            prime_meridian,
            factory: context.factories.datum.clone(),
        }
    }

    /// Build the datum and its components, once each.
    ///
    /// # Errors
    ///
    /// The first factory error.
    pub fn build(&mut self) -> Result<Arc<dyn GeodeticDatum>> {
        if let Some(datum) = self.case.cached() {
            return Ok(datum);
        }
        let ellipsoid = self.ellipsoid.build()?;
        let meridian = self.prime_meridian.build()?;
        let factory = self.factory.clone();
        let properties = self.case.properties.clone();
        self.case.get_or_build(|| {
            factory
                .ok_or_else(|| FactoryError::Unsupported("no datum factory".to_owned()))?
                .create_geodetic_datum(&properties, ellipsoid, meridian)
        })
    }

    pub fn expectation(&self) -> GeodeticDatumTest {
        let mut test = GeodeticDatumTest::new(self.case.context());
        self.case.properties.name.clone_into(&mut test.case.name);
        test.ellipsoid = Some(self.ellipsoid.expectation());
        test.prime_meridian = Some(self.prime_meridian.expectation());
        test
    }

    fn verify_built(&mut self, datum: &Arc<dyn GeodeticDatum>) -> Result<Verdict> {
        let mut expected = self.expectation();
        verify_dependency(self.case.configuration(), self.case.path(), &mut expected, Arc::clone(datum))
    }
}

user_verifier!(UserGeodeticDatumTest, dyn GeodeticDatum);

/// Test of a vertical datum built by the datum factory.
pub struct UserVerticalDatumTest {
    pub case: UserTestCase<dyn VerticalDatum>,
    factory: Option<Arc<dyn DatumFactory>>,
}

impl UserVerticalDatumTest {
    pub fn new(context: &TestContext, properties: Properties) -> Self {
        Self {
            case: UserTestCase::new("VerticalDatum", properties, ROLES, context),
            factory: context.factories.datum.clone(),
        }
    }

    /// Build the datum, once.
    ///
    /// # Errors
    ///
    /// The factory error.
    pub fn build(&mut self) -> Result<Arc<dyn VerticalDatum>> {
        let factory = self.factory.clone();
        let properties = self.case.properties.clone();
        self.case.get_or_build(|| {
            factory
                .ok_or_else(|| FactoryError::Unsupported("no datum factory".to_owned()))?
                .create_vertical_datum(&properties)
        })
    }

    pub fn expectation(&self) -> VerticalDatumTest {
        let mut test = VerticalDatumTest::new(self.case.context());
        self.case.properties.name.clone_into(&mut test.case.name);
        test
    }

    fn verify_built(&mut self, datum: &Arc<dyn VerticalDatum>) -> Result<Verdict> {
        let mut expected = self.expectation();
        verify_dependency(self.case.configuration(), self.case.path(), &mut expected, Arc::clone(datum))
    }
}

user_verifier!(UserVerticalDatumTest, dyn VerticalDatum);
