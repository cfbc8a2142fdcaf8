use std::sync::Arc;

use gigs_error::{FactoryError, Result};
use gigs_types::factory::CoordinateOperationFactory;
use gigs_types::{CoordinateOperation, OperationKind, ParameterValue, Properties};

use crate::ascii::NameMatch;
use crate::authority::CoordinateOperationTest;
use crate::configuration::ConfigurationKey;
use crate::context::TestContext;
use crate::identification::assert_name_equals;
use crate::outcome::Verdict;
use crate::reference::ReferenceFactory;
use crate::user::{UserTestCase, user_verifier};
use crate::verifier::{passed, verify_dependency};

const ROLES: &[ConfigurationKey] = &[ConfigurationKey::CoordinateOperationFactory];

/// Test of a defining conversion built from a method name and parameter
/// values.
pub struct UserConversionTest {
    pub case: UserTestCase<dyn CoordinateOperation>,
    pub method: String,
    pub parameters: Vec<ParameterValue>,
    factory: Option<Arc<dyn CoordinateOperationFactory>>,
}

impl UserConversionTest {
    pub fn new(
        context: &TestContext,
        properties: Properties,
        method: impl Into<String>,
        parameters: Vec<ParameterValue>,
    ) -> Self {
        Self {
            case: UserTestCase::new("Conversion", properties, ROLES, context),
            method: method.into(),
            parameters,
            factory: context.factories.operation.clone(),
        }
    }

    /// A conversion with the method and parameters of EPSG conversion `code`.
    ///
    /// # Errors
    ///
    /// If `code` is not in the reference tables.
    pub fn from_reference(context: &TestContext, properties: Properties, code: i32) -> Result<Self> {
        let (method, parameters) = ReferenceFactory::from_context(context).conversion_parameters(code)?;
        Ok(Self::new(context, properties, method, parameters))
    }

    /// Build the conversion, once.
    ///
    /// # Errors
    ///
    /// The factory error.
    pub fn build(&mut self) -> Result<Arc<dyn CoordinateOperation>> {
        let factory = self.factory.clone();
        let properties = self.case.properties.clone();
        let (method, parameters) = (self.method.clone(), self.parameters.clone());
        self.case.get_or_build(|| {
            factory
                .ok_or_else(|| FactoryError::Unsupported("no coordinate operation factory".to_owned()))?
                .create_defining_conversion(&properties, &method, parameters)
        })
    }

    pub fn expectation(&self) -> CoordinateOperationTest {
        let mut test = CoordinateOperationTest::new(self.case.context());
        self.case.properties.name.clone_into(&mut test.case.name);
        test.kind = Some(OperationKind::Conversion);
        test.method_name = Some(self.method.clone());
        test.parameters.clone_from(&self.parameters);
        test
    }

    fn verify_built(&mut self, conversion: &Arc<dyn CoordinateOperation>) -> Result<Verdict> {
        let mut expected = self.expectation();
        passed!(verify_dependency(
            self.case.configuration(),
            self.case.path(),
            &mut expected,
            Arc::clone(conversion)
        ));
        // narrowed dependency checks skip the method name
        let key = ConfigurationKey::StandardNameSupported;
        if self.case.configuration().is_enabled(key) {
            assert_name_equals(
                key,
                &format!("{}.method().name()", self.case.path()),
                &self.method,
                conversion.method_name(),
                NameMatch::Exact,
            )?;
        }
        Ok(Verdict::Passed)
    }
}

user_verifier!(UserConversionTest, dyn CoordinateOperation);
