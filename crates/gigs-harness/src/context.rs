//! Collaborators shared by every test of a run.

use std::sync::Arc;

use gigs_types::factory::{
    CoordinateOperationAuthorityFactory, CoordinateOperationFactory, CrsAuthorityFactory,
    CrsFactory, CsAuthorityFactory, CsFactory, DatumAuthorityFactory, DatumFactory, Factory,
};
use gigs_types::Validators;

use crate::configuration::{ConfigurationKey, TestConfiguration, TestEnvironment};
use crate::validators::StandardValidators;

/// Factories of the library under test. Any of them may be absent; tests
/// needing an absent factory are skipped.
#[derive(Clone, Default)]
pub struct Factories {
    pub crs_authority: Option<Arc<dyn CrsAuthorityFactory>>,
    pub cs_authority: Option<Arc<dyn CsAuthorityFactory>>,
    pub datum_authority: Option<Arc<dyn DatumAuthorityFactory>>,
    pub operation_authority: Option<Arc<dyn CoordinateOperationAuthorityFactory>>,
    pub crs: Option<Arc<dyn CrsFactory>>,
    pub cs: Option<Arc<dyn CsFactory>>,
    pub datum: Option<Arc<dyn DatumFactory>>,
    pub operation: Option<Arc<dyn CoordinateOperationFactory>>,
}

impl Factories {
    /// Vendor of the factory supplied for `role`, `None` if absent.
    pub fn vendor(&self, role: ConfigurationKey) -> Option<&str> {
        fn name<F: Factory + ?Sized>(factory: Option<&Arc<F>>) -> Option<&str> {
            factory.map(|f| f.vendor())
        }
        match role {
            ConfigurationKey::CrsAuthorityFactory => name(self.crs_authority.as_ref()),
            ConfigurationKey::CsAuthorityFactory => name(self.cs_authority.as_ref()),
            ConfigurationKey::DatumAuthorityFactory => name(self.datum_authority.as_ref()),
            ConfigurationKey::CoordinateOperationAuthorityFactory => {
                name(self.operation_authority.as_ref())
            }
            ConfigurationKey::CrsFactory => name(self.crs.as_ref()),
            ConfigurationKey::CsFactory => name(self.cs.as_ref()),
            ConfigurationKey::DatumFactory => name(self.datum.as_ref()),
            ConfigurationKey::CoordinateOperationFactory => name(self.operation.as_ref()),
            _ => None,
        }
    }
}

/// Environment, factories and validators handed to every test.
#[derive(Clone)]
pub struct TestContext {
    pub environment: TestEnvironment,
    pub factories: Factories,
    pub validators: Arc<dyn Validators>,
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new(TestEnvironment::default())
    }
}

impl TestContext {
    /// A context with no factory and the [`StandardValidators`].
    pub fn new(environment: TestEnvironment) -> Self {
        Self {
            environment,
            factories: Factories::default(),
            validators: Arc::new(StandardValidators),
        }
    }

    #[must_use]
    pub fn with_factories(mut self, factories: Factories) -> Self {
        self.factories = factories;
        self
    }

    #[must_use]
    pub fn with_validators(mut self, validators: Arc<dyn Validators>) -> Self {
        self.validators = validators;
        self
    }

    /// Fresh per-test configuration recording the factories of `roles`.
    pub fn configuration(&self, roles: &[ConfigurationKey]) -> TestConfiguration {
        let mut configuration = TestConfiguration::resolved(&self.environment);
        for &role in roles {
            configuration.record_factory(role, self.factories.vendor(role));
        }
        configuration
    }
}
