//! The verification contract and its library-defined base.
//!
//! A [`Verifier`] obtains one object under test, validates it, then compares
//! it against expected EPSG values. Library-defined tests fetch their object
//! from an authority factory through an [`AuthorityTestCase`]; a test can
//! also be reused to check a sub-object already built by another test, see
//! [`verify_dependency`].

use std::sync::Arc;

use gigs_error::{FactoryError, Result};
use gigs_types::factory::FactoryResult;
use gigs_types::{EPSG, IdentifiedObject, Validate, Validators};
use tracing::{debug, info};

use crate::ascii::{NameMatch, to_ascii};
use crate::cache::ObjectCache;
use crate::configuration::{ConfigurationKey, ConfigurationMap, TestConfiguration};
use crate::context::TestContext;
use crate::identification::{assert_aliases_equal, assert_contains_code, assert_name_equals};
use crate::outcome::{Lookup, SkipReason, Verdict};

/// A conformance test of one kind of object.
pub trait Verifier {
    type Object: ?Sized;

    /// Create (once) and return the object under test.
    ///
    /// # Errors
    ///
    /// Factory failures other than an unknown code.
    fn get_identified_object(&mut self) -> Result<Lookup<Arc<Self::Object>>>;

    /// Turn this test into a check of a sub-object of `parent`. Comparison
    /// flags are narrowed by the parent's and failures are reported under
    /// `path`.
    fn configure_as_dependency(&mut self, parent: &TestConfiguration, path: &str);

    /// Supply the object under test instead of creating it.
    ///
    /// # Errors
    ///
    /// If another object was already created or injected.
    fn inject(&mut self, object: Arc<Self::Object>) -> Result<()>;

    /// Run every check.
    ///
    /// # Errors
    ///
    /// The first failed check.
    fn verify(&mut self) -> Result<Verdict>;

    fn configuration(&self) -> &TestConfiguration;
}

/// Verify `object` as a sub-object of the test configured by `parent`.
///
/// # Errors
///
/// Whatever `dependency` reports, with paths rooted at `path`.
pub fn verify_dependency<V: Verifier + ?Sized>(
    parent: &TestConfiguration,
    path: &str,
    dependency: &mut V,
    object: Arc<V::Object>,
) -> Result<Verdict> {
    dependency.configure_as_dependency(parent, path);
    dependency.inject(object)?;
    dependency.verify()
}

/// Outcome of [`AuthorityTestCase::prepare`].
pub enum Subject<T: ?Sized> {
    /// Object validated and identified; structural checks may proceed.
    Ready(Arc<T>),
    Skip(SkipReason),
}

/// State shared by every library-defined test.
///
/// `code`, `name`, `aliases` and `deprecated` describe the expected EPSG
/// object and are read by `verify`.
pub struct AuthorityTestCase<T: ?Sized> {
    pub code: i32,
    pub name: String,
    pub aliases: Vec<String>,
    pub deprecated: bool,
    pub name_match: NameMatch,
    verifiable_name: fn(&str) -> String,
    path: String,
    role: ConfigurationKey,
    configuration: TestConfiguration,
    cache: ObjectCache<T>,
    validators: Arc<dyn Validators>,
}

fn ascii_name(name: &str) -> String {
    to_ascii(name).into_owned()
}

impl<T: ?Sized + IdentifiedObject + Validate> AuthorityTestCase<T> {
    /// A test of the `entity` objects created by the factory of `role`.
    pub fn new(entity: &str, role: ConfigurationKey, context: &TestContext) -> Self {
        Self {
            code: 0,
            name: String::new(),
            aliases: Vec::new(),
            deprecated: false,
            name_match: NameMatch::Exact,
            verifiable_name: ascii_name,
            path: entity.to_owned(),
            role,
            configuration: context.configuration(&[role]),
            cache: ObjectCache::default(),
            validators: Arc::clone(&context.validators),
        }
    }

    /// Set the expected code and name.
    pub fn expect(&mut self, code: i32, name: &str) -> &mut Self {
        self.code = code;
        self.name = name.to_owned();
        self
    }

    /// Replace the transform applied to the actual name before comparison.
    pub fn with_verifiable_name(&mut self, transform: fn(&str) -> String) -> &mut Self {
        self.verifiable_name = transform;
        self
    }

    /// Root of the property paths reported by this test.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub const fn configuration(&self) -> &TestConfiguration {
        &self.configuration
    }

    pub fn is_enabled(&self, key: ConfigurationKey) -> bool {
        self.configuration.is_enabled(key)
    }

    /// Freeze the configuration of this test.
    ///
    /// # Errors
    ///
    /// [`gigs_error::GigsError::ConfigurationConflict`] on a duplicated key.
    pub fn snapshot(&self) -> Result<ConfigurationMap> {
        self.configuration.snapshot()
    }

    /// Number of factory calls made by this test.
    pub const fn factory_calls(&self) -> usize {
        self.cache.factory_calls()
    }

    pub fn configure_as_dependency(&mut self, parent: &TestConfiguration, path: &str) {
        self.configuration.narrow_for_dependency(parent);
        path.clone_into(&mut self.path);
    }

    /// # Errors
    ///
    /// If the cache already holds another object.
    pub fn inject(&mut self, object: Arc<T>) -> Result<()> {
        if self.cache.get().is_some_and(|cached| Arc::ptr_eq(cached, &object)) {
            return Ok(());
        }
        self.cache.inject(object)
    }

    /// Create the object with `create` on first call; replay afterwards.
    ///
    /// # Errors
    ///
    /// Factory failures other than an unknown code.
    pub fn get_identified_object<F: ?Sized>(
        &mut self,
        factory: Option<&F>,
        create: impl FnOnce(&F, &str) -> FactoryResult<Arc<T>>,
    ) -> Result<Lookup<Arc<T>>> {
        let role = self.role;
        let code = self.code.to_string();
        self.cache.get_or_create(&code, |code| match factory {
            Some(factory) => create(factory, code),
            None => Err(FactoryError::Unsupported(format!("no {role} supplied"))),
        })
    }

    /// Apply the skip rules, fetch, validate and identify the object.
    ///
    /// # Errors
    ///
    /// The first failing factory call, validation or identification check.
    pub fn prepare<F: ?Sized>(
        &mut self,
        factory: Option<&F>,
        create: impl FnOnce(&F, &str) -> FactoryResult<Arc<T>>,
    ) -> Result<Subject<T>> {
        if self.deprecated && !self.is_enabled(ConfigurationKey::DeprecatedObjectCreationSupported) {
            info!(path = %self.path, code = self.code, "skipping deprecated object");
            return Ok(Subject::Skip(SkipReason::DeprecatedObject { code: self.code }));
        }
        if !self.cache.is_started() && factory.is_none() {
            return Ok(Subject::Skip(SkipReason::FactoryAbsent { role: self.role }));
        }
        let object = match self.get_identified_object(factory, create)? {
            Lookup::Found(object) => object,
            Lookup::Unsupported { authority, code } => {
                info!(path = %self.path, %authority, %code, "code not supported");
                return Ok(Subject::Skip(SkipReason::UnsupportedCode { authority, code }));
            }
        };
        object.validate_with(&*self.validators)?;
        self.verify_identification(&*object)?;
        Ok(Subject::Ready(object))
    }

    /// Check the identifier, name and aliases enabled for this test.
    ///
    /// # Errors
    ///
    /// The first identification mismatch.
    pub fn verify_identification(&self, object: &T) -> Result<()> {
        let path = &self.path;
        debug!(path = %path, code = self.code, flags = ?self.configuration.flags(), "identification");
        let key = ConfigurationKey::StandardIdentifierSupported;
        if self.is_enabled(key) {
            assert_contains_code(key, &format!("{path}.identifiers()"), EPSG, self.code, object.identifiers())?;
        }
        let key = ConfigurationKey::StandardNameSupported;
        if self.is_enabled(key) && !self.name.is_empty() {
            let actual = (self.verifiable_name)(object.name());
            assert_name_equals(key, &format!("{path}.name()"), &self.name, &actual, self.name_match)?;
        }
        let key = ConfigurationKey::StandardAliasSupported;
        if self.is_enabled(key) {
            assert_aliases_equal(key, &format!("{path}.aliases()"), &self.aliases, object.aliases())?;
        }
        Ok(())
    }
}

/// Run `$body` on the object prepared by `$case`, or return its skip verdict.
macro_rules! prepared {
    ($case:expr, $factory:expr, $create:expr) => {
        match $case.prepare($factory, $create)? {
            $crate::verifier::Subject::Ready(object) => object,
            $crate::verifier::Subject::Skip(reason) => {
                return Ok($crate::outcome::Verdict::Skipped(reason));
            }
        }
    };
}

pub(crate) use prepared;

/// Evaluate a dependency verdict; a skipped dependency skips the enclosing
/// test with the same reason.
macro_rules! passed {
    ($verdict:expr) => {
        if let $crate::outcome::Verdict::Skipped(reason) = $verdict? {
            tracing::info!(%reason, "dependency skipped");
            return Ok($crate::outcome::Verdict::Skipped(reason));
        }
    };
}

pub(crate) use passed;

/// Implement [`Verifier`] for a test wrapping an [`AuthorityTestCase`] in
/// its `case` field and calling `$factory` through `$create`.
macro_rules! authority_verifier {
    ($test:ty, $object:ty, |$f:ident, $code:ident| $create:expr) => {
        impl $crate::verifier::Verifier for $test {
            type Object = $object;

            fn get_identified_object(
                &mut self,
            ) -> gigs_error::Result<$crate::outcome::Lookup<std::sync::Arc<$object>>> {
                self.case
                    .get_identified_object(self.factory.as_deref(), |$f, $code| $create)
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
                let object = $crate::verifier::prepared!(
                    self.case,
                    self.factory.as_deref(),
                    |$f, $code| $create
                );
                self.verify_structure(&object)
            }

            fn configuration(&self) -> &$crate::configuration::TestConfiguration {
                self.case.configuration()
            }
        }
    };
}

pub(crate) use authority_verifier;
