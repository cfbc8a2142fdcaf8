use std::sync::Arc;

use gigs_error::Result;
use gigs_types::factory::DatumAuthorityFactory;
use gigs_types::{Ellipsoid, Unit};

use crate::configuration::ConfigurationKey;
use crate::context::TestContext;
use crate::outcome::Verdict;
use crate::structure::{assert_close, assert_quantity, assert_value};
use crate::verifier::{AuthorityTestCase, authority_verifier};

/// Relative tolerance on the inverse flattening, which EPSG publishes
/// rounded for ellipsoids defined by their two semi-axes.
const IVF_TOLERANCE: f64 = 1e-9;

/// Test of an ellipsoid created from its EPSG code.
pub struct EllipsoidTest {
    pub case: AuthorityTestCase<dyn Ellipsoid>,
    /// Unit of the expected axis lengths.
    pub axis_unit: Unit,
    pub semi_major_axis: Option<f64>,
    pub semi_minor_axis: Option<f64>,
    /// `f64::INFINITY` for a sphere.
    pub inverse_flattening: Option<f64>,
    pub is_ivf_definitive: Option<bool>,
    pub is_sphere: Option<bool>,
    factory: Option<Arc<dyn DatumAuthorityFactory>>,
}

impl EllipsoidTest {
    pub fn new(context: &TestContext) -> Self {
        Self {
            case: AuthorityTestCase::new(
                "Ellipsoid",
                ConfigurationKey::DatumAuthorityFactory,
                context,
            ),
            axis_unit: Unit::METRE,
            semi_major_axis: None,
            semi_minor_axis: None,
            inverse_flattening: None,
            is_ivf_definitive: None,
            is_sphere: None,
            factory: context.factories.datum_authority.clone(),
        }
    }

    /// An ellipsoid test expecting `code` and `name`.
    pub fn expecting(context: &TestContext, code: i32, name: &str) -> Self {
        let mut test = Self::new(context);
        test.case.expect(code, name);
        test
    }

    fn verify_structure(&mut self, ellipsoid: &Arc<dyn Ellipsoid>) -> Result<Verdict> {
        let path = self.case.path();
        let unit = ellipsoid.axis_unit();
        if let Some(a) = self.semi_major_axis {
            assert_quantity(&format!("{path}.semi_major_axis()"), a, &self.axis_unit, ellipsoid.semi_major_axis(), unit)?;
        }
        if let Some(b) = self.semi_minor_axis {
            assert_quantity(&format!("{path}.semi_minor_axis()"), b, &self.axis_unit, ellipsoid.semi_minor_axis(), unit)?;
        }
        if let Some(ivf) = self.inverse_flattening {
            let actual = ellipsoid.inverse_flattening();
            let ivf_path = format!("{path}.inverse_flattening()");
            if ivf.is_infinite() {
                assert_value(&ivf_path, ivf, actual)?;
            } else {
                assert_close(&ivf_path, ivf, actual, ivf.abs() * IVF_TOLERANCE)?;
            }
        }
        if let Some(definitive) = self.is_ivf_definitive {
            assert_value(&format!("{path}.is_ivf_definitive()"), definitive, ellipsoid.is_ivf_definitive())?;
        }
        if let Some(sphere) = self.is_sphere {
            assert_value(&format!("{path}.is_sphere()"), sphere, ellipsoid.is_sphere())?;
        }
        Ok(Verdict::Passed)
    }
}

authority_verifier!(EllipsoidTest, dyn Ellipsoid, |f, code| f.create_ellipsoid(code));
