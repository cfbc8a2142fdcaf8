//! Tests of objects built from user-supplied definitions.
//!
//! Where the authority tests ask a factory for an EPSG code, these tests
//! hand a definition to the constructive factories and check that the built
//! object echoes it. Built sub-objects are then checked by the matching
//! authority test run as a dependency check, so both tiers share one set of
//! structural comparisons.

mod conversion;
mod crs;
mod datum;
mod ellipsoid;
mod prime_meridian;

use std::sync::Arc;

use gigs_error::{FactoryError, GigsError, Result};
use gigs_types::factory::FactoryResult;
use gigs_types::{IdentifiedObject, Properties, Validate};
use tracing::debug;

use crate::cache::ObjectCache;
use crate::configuration::{ComparisonFlags, ConfigurationKey, ConfigurationMap, TestConfiguration};
use crate::context::TestContext;
use crate::identification::{assert_aliases_equal, assert_name_equals};
use crate::outcome::{Lookup, SkipReason};
use crate::ascii::NameMatch;

pub use conversion::UserConversionTest;
pub use crs::{UserGeographicCrsTest, UserVerticalCrsTest};
pub use datum::{UserGeodeticDatumTest, UserVerticalDatumTest};
pub use ellipsoid::UserEllipsoidTest;
pub use prime_meridian::UserPrimeMeridianTest;

/// State shared by every user-defined test.
pub struct UserTestCase<T: ?Sized> {
    /// Properties given to the factory and expected back.
    pub properties: Properties,
    path: String,
    roles: &'static [ConfigurationKey],
    context: TestContext,
    configuration: TestConfiguration,
    cache: ObjectCache<T>,
}

impl<T: ?Sized + IdentifiedObject + Validate> UserTestCase<T> {
    /// A test of `entity` objects needing the factories of `roles`.
    pub fn new(
        entity: &str,
        properties: Properties,
        roles: &'static [ConfigurationKey],
        context: &TestContext,
    ) -> Self {
        let mut configuration = context.configuration(roles);
        // built objects carry no EPSG identifier
        configuration.suppress(
            ComparisonFlags::STANDARD_IDENTIFIER | ComparisonFlags::DEPENDENCY_IDENTIFICATION,
        );
        Self {
            properties,
            path: entity.to_owned(),
            roles,
            context: context.clone(),
            configuration,
            cache: ObjectCache::default(),
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub const fn context(&self) -> &TestContext {
        &self.context
    }

    pub const fn configuration(&self) -> &TestConfiguration {
        &self.configuration
    }

    /// # Errors
    ///
    /// [`GigsError::ConfigurationConflict`] on a duplicated key.
    pub fn snapshot(&self) -> Result<ConfigurationMap> {
        self.configuration.snapshot()
    }

    pub const fn factory_calls(&self) -> usize {
        self.cache.factory_calls()
    }

    /// First required factory role with no factory supplied.
    pub fn missing_role(&self) -> Option<SkipReason> {
        self.roles
            .iter()
            .find(|&&role| self.context.factories.vendor(role).is_none())
            .map(|&role| SkipReason::FactoryAbsent { role })
    }

    pub fn configure_as_dependency(&mut self, parent: &TestConfiguration, path: &str) {
        self.configuration.narrow_for_dependency(parent);
        path.clone_into(&mut self.path);
    }

    /// # Errors
    ///
    /// If another object was already built or injected.
    pub fn inject(&mut self, object: Arc<T>) -> Result<()> {
        if self.cache.get().is_some_and(|cached| Arc::ptr_eq(cached, &object)) {
            return Ok(());
        }
        self.cache.inject(object)
    }

    /// The object built or injected so far.
    pub fn cached(&self) -> Option<Arc<T>> {
        self.cache.get().cloned()
    }

    /// Build the object with `build` on first call, return it afterwards.
    ///
    /// # Errors
    ///
    /// The factory error, replayed on every call.
    pub fn get_or_build(&mut self, build: impl FnOnce() -> FactoryResult<Arc<T>>) -> Result<Arc<T>> {
        let name = self.properties.name.clone();
        match self.cache.get_or_create(&name, |_| build())? {
            Lookup::Found(object) => Ok(object),
            Lookup::Unsupported { authority, code } => {
                Err(GigsError::Factory(FactoryError::no_such_code(authority, code)))
            }
        }
    }

    /// Validate `object` and check that it echoes the given properties.
    ///
    /// # Errors
    ///
    /// The first validation or identification failure.
    pub fn verify_echo(&self, object: &T) -> Result<()> {
        let path = &self.path;
        debug!(path = %path, name = %self.properties.name, "echo check");
        object.validate_with(&*self.context.validators)?;
        let key = ConfigurationKey::StandardNameSupported;
        if self.configuration.is_enabled(key) {
            assert_name_equals(key, &format!("{path}.name()"), &self.properties.name, object.name(), NameMatch::Exact)?;
        }
        let key = ConfigurationKey::StandardAliasSupported;
        if self.configuration.is_enabled(key) {
            assert_aliases_equal(key, &format!("{path}.aliases()"), &self.properties.aliases, object.aliases())?;
        }
        Ok(())
    }
}

/// Implement the [`crate::verifier::Verifier`] plumbing of a user test
/// holding a [`UserTestCase`] in `case` and exposing `build` and
/// `verify_built`.
macro_rules! user_verifier {
    ($test:ty, $object:ty) => {
        impl $crate::verifier::Verifier for $test {
            type Object = $object;

            fn get_identified_object(
                &mut self,
            ) -> gigs_error::Result<$crate::outcome::Lookup<std::sync::Arc<$object>>> {
                self.build().map($crate::outcome::Lookup::Found)
            }

            fn configure_as_dependency(
                &mut self,
                parent: &$crate::configuration::TestConfiguration,
                path: &str,
            ) {
                self.case.configure_as_dependency(parent, path);
            }

            fn inject(&mut self, object: std::sync::Arc<$object>) -> gigs_error::Result<()> {
                self.case.inject(object)
            }

            fn verify(&mut self) -> gigs_error::Result<$crate::outcome::Verdict> {
                if let Some(reason) = self.case.missing_role() {
                    tracing::info!(path = %self.case.path(), %reason, "skipping user-defined test");
                    return Ok($crate::outcome::Verdict::Skipped(reason));
                }
                let object = self.build()?;
                self.case.verify_echo(&*object)?;
                self.verify_built(&object)
            }

            fn configuration(&self) -> &$crate::configuration::TestConfiguration {
                self.case.configuration()
            }
        }
    };
}

pub(crate) use user_verifier;
