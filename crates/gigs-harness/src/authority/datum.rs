use std::sync::Arc;

use gigs_error::Result;
use gigs_types::factory::DatumAuthorityFactory;
use gigs_types::{GeodeticDatum, VerticalDatum};

use crate::authority::{EllipsoidTest, PrimeMeridianTest};
use crate::configuration::ConfigurationKey;
use crate::context::TestContext;
use crate::outcome::Verdict;
use crate::structure::assert_value;
use crate::verifier::{AuthorityTestCase, authority_verifier, passed, verify_dependency};

fn verify_anchor(path: &str, expected: Option<&str>, actual: Option<&str>) -> Result<()> {
    match expected {
        Some(anchor) => assert_value(&format!("{path}.anchor_point()"), anchor, actual.unwrap_or("<none>")),
        None => Ok(()),
    }
}

/// Test of a geodetic datum created from its EPSG code.
///
/// The ellipsoid and prime meridian are checked by dependency tests.
pub struct GeodeticDatumTest {
    pub case: AuthorityTestCase<dyn GeodeticDatum>,
    pub anchor_point: Option<String>,
    pub ellipsoid: Option<EllipsoidTest>,
    pub prime_meridian: Option<PrimeMeridianTest>,
    factory: Option<Arc<dyn DatumAuthorityFactory>>,
}

impl GeodeticDatumTest {
    pub fn new(context: &TestContext) -> Self {
        Self {
            case: AuthorityTestCase::new(
                "GeodeticDatum",
                ConfigurationKey::DatumAuthorityFactory,
                context,
            ),
            anchor_point: None,
            ellipsoid: None,
            prime_meridian: None,
            factory: context.factories.datum_authority.clone(),
        }
    }

    pub fn expecting(context: &TestContext, code: i32, name: &str) -> Self {
        let mut test = Self::new(context);
        test.case.expect(code, name);
        test
    }

    fn verify_structure(&mut self, datum: &Arc<dyn GeodeticDatum>) -> Result<Verdict> {
        let path = self.case.path().to_owned();
        verify_anchor(&path, self.anchor_point.as_deref(), datum.anchor_point())?;
        let parent = self.case.configuration();
        if let Some(ellipsoid) = &mut self.ellipsoid {
            passed!(verify_dependency(parent, &format!("{path}.ellipsoid()"), ellipsoid, datum.ellipsoid()));
        }
        if let Some(meridian) = &mut self.prime_meridian {
            passed!(verify_dependency(
                parent,
                &format!("{path}.prime_meridian()"),
                meridian,
                datum.prime_meridian()
            ));
        }
        Ok(Verdict::Passed)
    }
}

authority_verifier!(GeodeticDatumTest, dyn GeodeticDatum, |f, code| f.create_geodetic_datum(code));

/// Test of a vertical datum created from its EPSG code.
pub struct VerticalDatumTest {
    pub case: AuthorityTestCase<dyn VerticalDatum>,
    pub anchor_point: Option<String>,
    factory: Option<Arc<dyn DatumAuthorityFactory>>,
}

impl VerticalDatumTest {
    pub fn new(context: &TestContext) -> Self {
        Self {
            case: AuthorityTestCase::new(
                "VerticalDatum",
                ConfigurationKey::DatumAuthorityFactory,
                context,
            ),
            anchor_point: None,
            factory: context.factories.datum_authority.clone(),
        }
    }

    pub fn expecting(context: &TestContext, code: i32, name: &str) -> Self {
        let mut test = Self::new(context);
        test.case.expect(code, name);
        test
    }

    fn verify_structure(&mut self, datum: &Arc<dyn VerticalDatum>) -> Result<Verdict> {
        verify_anchor(self.case.path(), self.anchor_point.as_deref(), datum.anchor_point())?;
        Ok(Verdict::Passed)
    }
}

authority_verifier!(VerticalDatumTest, dyn VerticalDatum, |f, code| f.create_vertical_datum(code));
