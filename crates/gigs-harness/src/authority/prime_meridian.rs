use std::sync::Arc;

use gigs_error::Result;
use gigs_types::factory::DatumAuthorityFactory;
use gigs_types::{PrimeMeridian, Unit};

use crate::configuration::ConfigurationKey;
use crate::context::TestContext;
use crate::outcome::Verdict;
use crate::structure::assert_quantity;
use crate::verifier::{AuthorityTestCase, authority_verifier};

/// Test of a prime meridian created from its EPSG code.
pub struct PrimeMeridianTest {
    pub case: AuthorityTestCase<dyn PrimeMeridian>,
    /// Expected longitude from Greenwich, in `angular_unit`.
    pub greenwich_longitude: Option<f64>,
    pub angular_unit: Unit,
    factory: Option<Arc<dyn DatumAuthorityFactory>>,
}

impl PrimeMeridianTest {
    pub fn new(context: &TestContext) -> Self {
        Self {
            case: AuthorityTestCase::new(
                "PrimeMeridian",
                ConfigurationKey::DatumAuthorityFactory,
                context,
            ),
            greenwich_longitude: None,
            angular_unit: Unit::DEGREE,
            factory: context.factories.datum_authority.clone(),
        }
    }

    pub fn expecting(context: &TestContext, code: i32, name: &str) -> Self {
        let mut test = Self::new(context);
        test.case.expect(code, name);
        test
    }

    fn verify_structure(&mut self, meridian: &Arc<dyn PrimeMeridian>) -> Result<Verdict> {
        if let Some(longitude) = self.greenwich_longitude {
            assert_quantity(
                &format!("{}.greenwich_longitude()", self.case.path()),
                longitude,
                &self.angular_unit,
                meridian.greenwich_longitude(),
                meridian.angular_unit(),
            )?;
        }
        Ok(Verdict::Passed)
    }
}

authority_verifier!(PrimeMeridianTest, dyn PrimeMeridian, |f, code| f.create_prime_meridian(code));
