use std::sync::Arc;

use gigs_error::Result;
use gigs_types::factory::CoordinateOperationAuthorityFactory;
use gigs_types::{CoordinateOperation, OperationKind, ParameterValue};
use tracing::debug;

use crate::ascii::NameMatch;
use crate::configuration::ConfigurationKey;
use crate::context::TestContext;
use crate::outcome::Verdict;
use crate::identification::assert_name_equals;
use crate::structure::{assert_parameters, assert_value};
use crate::verifier::{AuthorityTestCase, authority_verifier};

/// Test of a conversion or transformation created from its EPSG code.
pub struct CoordinateOperationTest {
    pub case: AuthorityTestCase<dyn CoordinateOperation>,
    pub kind: Option<OperationKind>,
    pub method_name: Option<String>,
    /// Expected parameter values; actual ones are matched by name.
    pub parameters: Vec<ParameterValue>,
    /// Checked only while operation versions are enabled.
    pub operation_version: Option<String>,
    factory: Option<Arc<dyn CoordinateOperationAuthorityFactory>>,
}

impl CoordinateOperationTest {
    pub fn new(context: &TestContext) -> Self {
        Self {
            case: AuthorityTestCase::new(
                "CoordinateOperation",
                ConfigurationKey::CoordinateOperationAuthorityFactory,
                context,
            ),
            kind: None,
            method_name: None,
            parameters: Vec::new(),
            operation_version: None,
            factory: context.factories.operation_authority.clone(),
        }
    }

    pub fn expecting(context: &TestContext, code: i32, name: &str) -> Self {
        let mut test = Self::new(context);
        test.case.expect(code, name);
        test
    }

    fn verify_structure(&mut self, operation: &Arc<dyn CoordinateOperation>) -> Result<Verdict> {
        let path = self.case.path();
        if let Some(kind) = self.kind {
            assert_value(&format!("{path}.kind()"), kind, operation.kind())?;
        }
        let key = ConfigurationKey::StandardNameSupported;
        match &self.method_name {
            // method names are EPSG names too, some libraries truncate them
            Some(method) if self.case.is_enabled(key) => {
                assert_name_equals(
                    key,
                    &format!("{path}.method().name()"),
                    method,
                    operation.method_name(),
                    NameMatch::Prefix,
                )?;
            }
            Some(_) => debug!(%key, "method name not checked"),
            None => {}
        }
        assert_parameters(path, &self.parameters, operation.parameter_values())?;
        let key = ConfigurationKey::OperationVersionSupported;
        match &self.operation_version {
            Some(version) if self.case.is_enabled(key) => {
                assert_value(
                    &format!("{path}.operation_version()"),
                    version.as_str(),
                    operation.operation_version().unwrap_or("<none>"),
                )?;
            }
            Some(_) => debug!(%key, "operation version not checked"),
            None => {}
        }
        Ok(Verdict::Passed)
    }
}

authority_verifier!(CoordinateOperationTest, dyn CoordinateOperation, |f, code| f
    .create_coordinate_operation(code));
