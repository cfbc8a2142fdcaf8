use std::sync::Arc;

use gigs_error::{FactoryError, Result};
use gigs_types::factory::DatumFactory;
use gigs_types::{Ellipsoid, Properties, Unit};

use crate::authority::EllipsoidTest;
use crate::configuration::ConfigurationKey;
use crate::context::TestContext;
use crate::outcome::Verdict;
use crate::reference::tables::SecondParameter;
use crate::user::{UserTestCase, user_verifier};
use crate::verifier::verify_dependency;

const ROLES: &[ConfigurationKey] = &[ConfigurationKey::DatumFactory];

/// Test of an ellipsoid built by the datum factory.
pub struct UserEllipsoidTest {
    pub case: UserTestCase<dyn Ellipsoid>,
    pub semi_major_axis: f64,
    pub second: SecondParameter,
    pub unit: Unit,
    factory: Option<Arc<dyn DatumFactory>>,
}

impl UserEllipsoidTest {
    pub fn new(
        context: &TestContext,
        properties: Properties,
        semi_major_axis: f64,
        second: SecondParameter,
        unit: Unit,
    ) -> Self {
        Self {
            case: UserTestCase::new("Ellipsoid", properties, ROLES, context),
            semi_major_axis,
            second,
            unit,
            factory: context.factories.datum.clone(),
        }
    }

    /// Build the ellipsoid, once.
    ///
    /// # Errors
    ///
    /// The factory error, or [`FactoryError::Unsupported`] when no datum
    /// factory was supplied.
    pub fn build(&mut self) -> Result<Arc<dyn Ellipsoid>> {
        let factory = self.factory.clone();
        let (a, second, unit) = (self.semi_major_axis, self.second, self.unit.clone());
        let properties = self.case.properties.clone();
        self.case.get_or_build(|| {
            let factory = factory.ok_or_else(|| FactoryError::Unsupported("no datum factory".to_owned()))?;
            match second {
                SecondParameter::SemiMinorAxis(b) => factory.create_ellipsoid(&properties, a, b, &unit),
                SecondParameter::InverseFlattening(ivf) => {
                    factory.create_flattened_sphere(&properties, a, ivf, &unit)
                }
            }
        })
    }

    /// Authority-tier expectation matching this definition.
    pub fn expectation(&self) -> EllipsoidTest {
        let mut test = EllipsoidTest::new(self.case.context());
        self.case.properties.name.clone_into(&mut test.case.name);
        test.axis_unit = self.unit.clone();
        test.semi_major_axis = Some(self.semi_major_axis);
        match self.second {
            SecondParameter::SemiMinorAxis(b) => {
                test.semi_minor_axis = Some(b);
                #[allow(clippy::float_cmp)]
                let sphere = b == self.semi_major_axis;
                test.is_sphere = Some(sphere);
            }
            SecondParameter::InverseFlattening(ivf) => {
                test.inverse_flattening = Some(ivf);
                test.is_ivf_definitive = Some(true);
            }
        }
        test
    }

    fn verify_built(&mut self, ellipsoid: &Arc<dyn Ellipsoid>) -> Result<Verdict> {
        let mut expected = self.expectation();
        verify_dependency(self.case.configuration(), self.case.path(), &mut expected, Arc::clone(ellipsoid))
    }
}

user_verifier!(UserEllipsoidTest, dyn Ellipsoid);
