use std::sync::Arc;

use gigs_error::Result;
use gigs_types::factory::CsAuthorityFactory;
use gigs_types::{CoordinateSystem, CsKind};

use crate::configuration::ConfigurationKey;
use crate::context::TestContext;
use crate::outcome::Verdict;
use crate::structure::{ExpectedAxis, assert_axes, assert_value};
use crate::verifier::{AuthorityTestCase, authority_verifier};

/// Test of a coordinate system created from its EPSG code.
///
/// Axis names and abbreviations are compared only while standard names are
/// checked; directions and units always are.
pub struct CoordinateSystemTest {
    pub case: AuthorityTestCase<dyn CoordinateSystem>,
    pub kind: Option<CsKind>,
    /// Expected axes in order; empty to skip axis checks.
    pub axes: Vec<ExpectedAxis>,
    factory: Option<Arc<dyn CsAuthorityFactory>>,
}

impl CoordinateSystemTest {
    pub fn new(context: &TestContext) -> Self {
        Self {
            case: AuthorityTestCase::new(
                "CoordinateSystem",
                ConfigurationKey::CsAuthorityFactory,
                context,
            ),
            kind: None,
            axes: Vec::new(),
            factory: context.factories.cs_authority.clone(),
        }
    }

    pub fn expecting(context: &TestContext, code: i32, name: &str) -> Self {
        let mut test = Self::new(context);
        test.case.expect(code, name);
        test
    }

    fn verify_structure(&mut self, cs: &Arc<dyn CoordinateSystem>) -> Result<Verdict> {
        let path = self.case.path();
        if let Some(kind) = self.kind {
            assert_value(&format!("{path}.kind()"), kind, cs.kind())?;
        }
        if !self.axes.is_empty() {
            let names = self.case.is_enabled(ConfigurationKey::StandardNameSupported);
            assert_axes(path, cs.as_ref(), &self.axes, names)?;
        }
        Ok(Verdict::Passed)
    }
}

authority_verifier!(CoordinateSystemTest, dyn CoordinateSystem, |f, code| f
    .create_coordinate_system(code));
