use std::sync::Arc;

use gigs_error::{FactoryError, Result};
use gigs_types::factory::DatumFactory;
use gigs_types::{PrimeMeridian, Properties, Unit};

use crate::authority::PrimeMeridianTest;
use crate::configuration::ConfigurationKey;
use crate::context::TestContext;
use crate::outcome::Verdict;
use crate::user::{UserTestCase, user_verifier};
use crate::verifier::verify_dependency;

const ROLES: &[ConfigurationKey] = &[ConfigurationKey::DatumFactory];

/// Test of a prime meridian built by the datum factory.
pub struct UserPrimeMeridianTest {
    pub case: UserTestCase<dyn PrimeMeridian>,
    pub greenwich_longitude: f64,
    pub angular_unit: Unit,
    factory: Option<Arc<dyn DatumFactory>>,
}

impl UserPrimeMeridianTest {
    pub fn new(context: &TestContext, properties: Properties, greenwich_longitude: f64, angular_unit: Unit) -> Self {
        Self {
            case: UserTestCase::new("PrimeMeridian", properties, ROLES, context),
            greenwich_longitude,
            angular_unit,
            factory: context.factories.datum.clone(),
        }
    }

    /// Build the prime meridian, once.
    ///
    /// # Errors
    ///
    /// The factory error.
    pub fn build(&mut self) -> Result<Arc<dyn PrimeMeridian>> {
        let factory = self.factory.clone();
        let properties = self.case.properties.clone();
        let (longitude, unit) = (self.greenwich_longitude, self.angular_unit.clone());
        self.case.get_or_build(|| {
            factory
                .ok_or_else(|| FactoryError::Unsupported("no datum factory".to_owned()))?
                .create_prime_meridian(&properties, longitude, &unit)
        })
    }

    pub fn expectation(&self) -> PrimeMeridianTest {
        let mut test = PrimeMeridianTest::new(self.case.context());
        self.case.properties.name.clone_into(&mut test.case.name);
        test.greenwich_longitude = Some(self.greenwich_longitude);
        test.angular_unit = self.angular_unit.clone();
        test
    }

    fn verify_built(&mut self, meridian: &Arc<dyn PrimeMeridian>) -> Result<Verdict> {
        let mut expected = self.expectation();
        verify_dependency(self.case.configuration(), self.case.path(), &mut expected, Arc::clone(meridian))
    }
}

user_verifier!(UserPrimeMeridianTest, dyn PrimeMeridian);
