//! Comparison configuration of a test run.
//!
//! A [`TestEnvironment`] says which comparison features the environment
//! enables. Each test instance resolves its [`ComparisonFlags`] from the
//! environment exactly once, at construction, into a [`TestConfiguration`].
//! When a test is used only to verify a sub-object of another test, its
//! flags are narrowed by the parent's flags (bitwise AND, never widened).
//! At the end of a run [`TestConfiguration::snapshot`] freezes what was
//! active into a [`ConfigurationMap`].

use std::collections::BTreeMap;
use std::fmt;

use bitflags::bitflags;
use gigs_error::{GigsError, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Environment variable listing disabled configuration keys.
pub const DISABLE_ENV_VAR: &str = "GIGS_DISABLE";


bitflags! {
    /// Comparison features active for a test.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct ComparisonFlags: u8 {
        /// Objects carry their EPSG identifier.
        const STANDARD_IDENTIFIER = 1 << 0;
        /// Object names match the EPSG names.
        const STANDARD_NAME = 1 << 1;
        /// Object aliases include the EPSG aliases.
        const STANDARD_ALIAS = 1 << 2;
        /// Sub-objects (datum of a CRS, ...) carry their EPSG identifier.
        const DEPENDENCY_IDENTIFICATION = 1 << 3;
        /// Deprecated EPSG objects can be created.
        const DEPRECATED_OBJECT_CREATION = 1 << 4;
        /// Coordinate operations report their EPSG version.
        const OPERATION_VERSION = 1 << 5;
    }
}

impl ComparisonFlags {
    /// Flags suppressed on a test used only to verify a dependency. Naming
    /// mismatches of the sub-object are reported by its own test.
    pub const DEPENDENCY_SUPPRESSED: Self = Self::STANDARD_NAME.union(Self::STANDARD_ALIAS);

    /// Flags of a dependency test after inheriting from `parent`.
    ///
    /// The result is a subset of both `self` and `parent`.
    #[must_use]
    pub fn narrowed_for_dependency(self, parent: Self) -> Self {
        let mut flags = (self & parent).difference(Self::DEPENDENCY_SUPPRESSED);
        if !parent.contains(Self::DEPENDENCY_IDENTIFICATION) {
            flags.remove(Self::STANDARD_IDENTIFIER);
        }
        flags
    }
}

impl Default for ComparisonFlags {
    fn default() -> Self {
        Self::all()
    }
}

// ---------------------------------------------------------------------------
// Configuration keys
// ---------------------------------------------------------------------------

/// Enumerated key of a [`ConfigurationMap`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigurationKey {
    StandardIdentifierSupported,
    StandardNameSupported,
    StandardAliasSupported,
    DependencyIdentificationSupported,
    DeprecatedObjectCreationSupported,
    OperationVersionSupported,
    CrsAuthorityFactory,
    CsAuthorityFactory,
    DatumAuthorityFactory,
    CoordinateOperationAuthorityFactory,
    CrsFactory,
    CsFactory,
    DatumFactory,
    CoordinateOperationFactory,
    Validators,
}

impl ConfigurationKey {
    /// Every boolean key, in canonical order.
    pub const FLAGS: [Self; 6] = [
        Self::StandardIdentifierSupported,
        Self::StandardNameSupported,
        Self::StandardAliasSupported,
        Self::DependencyIdentificationSupported,
        Self::DeprecatedObjectCreationSupported,
        Self::OperationVersionSupported,
    ];

    /// Every factory-role key, in canonical order.
    pub const FACTORY_ROLES: [Self; 9] = [
        Self::CrsAuthorityFactory,
        Self::CsAuthorityFactory,
        Self::DatumAuthorityFactory,
        Self::CoordinateOperationAuthorityFactory,
        Self::CrsFactory,
        Self::CsFactory,
        Self::DatumFactory,
        Self::CoordinateOperationFactory,
        Self::Validators,
    ];

    /// The comparison flag controlled by this key, if it is a boolean key.
    pub const fn flag(self) -> Option<ComparisonFlags> {
        match self {
            Self::StandardIdentifierSupported => Some(ComparisonFlags::STANDARD_IDENTIFIER),
            Self::StandardNameSupported => Some(ComparisonFlags::STANDARD_NAME),
            Self::StandardAliasSupported => Some(ComparisonFlags::STANDARD_ALIAS),
            Self::DependencyIdentificationSupported => {
                Some(ComparisonFlags::DEPENDENCY_IDENTIFICATION)
            }
            Self::DeprecatedObjectCreationSupported => {
                Some(ComparisonFlags::DEPRECATED_OBJECT_CREATION)
            }
            Self::OperationVersionSupported => Some(ComparisonFlags::OPERATION_VERSION),
            _ => None,
        }
    }

    pub const fn is_factory_role(self) -> bool {
        self.flag().is_none()
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StandardIdentifierSupported => "standard_identifier_supported",
            Self::StandardNameSupported => "standard_name_supported",
            Self::StandardAliasSupported => "standard_alias_supported",
            Self::DependencyIdentificationSupported => "dependency_identification_supported",
            Self::DeprecatedObjectCreationSupported => "deprecated_object_creation_supported",
            Self::OperationVersionSupported => "operation_version_supported",
            Self::CrsAuthorityFactory => "crs_authority_factory",
            Self::CsAuthorityFactory => "cs_authority_factory",
            Self::DatumAuthorityFactory => "datum_authority_factory",
            Self::CoordinateOperationAuthorityFactory => "coordinate_operation_authority_factory",
            Self::CrsFactory => "crs_factory",
            Self::CsFactory => "cs_factory",
            Self::DatumFactory => "datum_factory",
            Self::CoordinateOperationFactory => "coordinate_operation_factory",
            Self::Validators => "validators",
        }
    }

    /// Look a key up by its `snake_case` name.
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::FLAGS
            .into_iter()
            .chain(Self::FACTORY_ROLES)
            .find(|key| key.as_str().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for ConfigurationKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

/// Comparison features enabled by the environment running the tests.
///
/// Every feature is enabled unless the environment narrows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestEnvironment {
    pub enabled: ComparisonFlags,
}

impl Default for TestEnvironment {
    fn default() -> Self {
        Self {
            enabled: ComparisonFlags::all(),
        }
    }
}

impl TestEnvironment {
    /// Read overrides from [`DISABLE_ENV_VAR`].
    ///
    /// Unknown key names are logged and ignored.
    #[must_use]
    pub fn from_env() -> Self {
        let mut environment = Self::default();
        if let Ok(disabled) = std::env::var(DISABLE_ENV_VAR) {
            for name in disabled.split(',').filter(|s| !s.trim().is_empty()) {
                match ConfigurationKey::from_name(name).and_then(ConfigurationKey::flag) {
                    Some(flag) => environment.enabled.remove(flag),
                    None => warn!(key = name.trim(), "ignoring unknown configuration key"),
                }
            }
        }
        debug!(enabled = ?environment.enabled, "test environment");
        environment
    }

    #[must_use]
    pub fn with_disabled(mut self, key: ConfigurationKey) -> Self {
        if let Some(flag) = key.flag() {
            self.enabled.remove(flag);
        }
        self
    }

    #[must_use]
    pub fn with_enabled(mut self, key: ConfigurationKey) -> Self {
        if let Some(flag) = key.flag() {
            self.enabled.insert(flag);
        }
        self
    }

    pub fn is_enabled(&self, key: ConfigurationKey) -> bool {
        key.flag().is_some_and(|flag| self.enabled.contains(flag))
    }
}

// ---------------------------------------------------------------------------
// Frozen map
// ---------------------------------------------------------------------------

/// Value stored under a [`ConfigurationKey`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigValue {
    Flag(bool),
    /// Vendor of the factory exercised for a role, `None` if absent.
    Factory(Option<String>),
}

/// Frozen record of which comparison behaviours were active in a run and
/// which factories participated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationMap {
    entries: BTreeMap<ConfigurationKey, ConfigValue>,
}

impl ConfigurationMap {
    /// Insert a value.
    ///
    /// # Errors
    ///
    /// [`GigsError::ConfigurationConflict`] if `key` was already written.
    pub fn insert(&mut self, key: ConfigurationKey, value: ConfigValue) -> Result<()> {
        if self.entries.contains_key(&key) {
            warn!(%key, "duplicated configuration key");
            return Err(GigsError::ConfigurationConflict {
                key: key.to_string(),
            });
        }
        self.entries.insert(key, value);
        Ok(())
    }

    pub fn get(&self, key: ConfigurationKey) -> Option<&ConfigValue> {
        self.entries.get(&key)
    }

    /// Boolean value of `key`, `None` if absent or not a flag.
    pub fn flag(&self, key: ConfigurationKey) -> Option<bool> {
        match self.entries.get(&key) {
            Some(ConfigValue::Flag(enabled)) => Some(*enabled),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (ConfigurationKey, &ConfigValue)> {
        self.entries.iter().map(|(key, value)| (*key, value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Per-test configuration
// ---------------------------------------------------------------------------

/// Configuration owned by a single test instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestConfiguration {
    flags: ComparisonFlags,
    resolved: bool,
    dependency: bool,
    factories: Vec<(ConfigurationKey, Option<String>)>,
}

impl TestConfiguration {
    /// A configuration whose every flag was resolved from `environment`.
    #[must_use]
    pub fn resolved(environment: &TestEnvironment) -> Self {
        let mut configuration = Self::unresolved();
        configuration.apply(environment, &ConfigurationKey::FLAGS);
        configuration
    }

    /// A configuration with no flag enabled yet.
    #[must_use]
    pub fn unresolved() -> Self {
        Self {
            flags: ComparisonFlags::empty(),
            resolved: false,
            dependency: false,
            factories: Vec::new(),
        }
    }

    /// Resolve whether each of `keys` is enabled by `environment`.
    ///
    /// # Errors
    ///
    /// [`GigsError::FlagsAlreadyResolved`] when called a second time.
    pub fn resolve_flags(
        &mut self,
        environment: &TestEnvironment,
        keys: &[ConfigurationKey],
    ) -> Result<Vec<bool>> {
        if self.resolved {
            return Err(GigsError::FlagsAlreadyResolved);
        }
        Ok(self.apply(environment, keys))
    }

    fn apply(&mut self, environment: &TestEnvironment, keys: &[ConfigurationKey]) -> Vec<bool> {
        self.resolved = true;
        keys.iter()
            .map(|&key| {
                let enabled = environment.is_enabled(key);
                if let Some(flag) = key.flag() {
                    self.flags.set(flag, enabled);
                }
                enabled
            })
            .collect()
    }

    pub const fn flags(&self) -> ComparisonFlags {
        self.flags
    }

    pub fn is_enabled(&self, key: ConfigurationKey) -> bool {
        key.flag().is_some_and(|flag| self.flags.contains(flag))
    }

    /// Whether this test only verifies a sub-object of another test.
    pub const fn is_dependency(&self) -> bool {
        self.dependency
    }

    /// Narrow the flags by `parent` and mark this test as a dependency check.
    pub fn narrow_for_dependency(&mut self, parent: &Self) {
        let narrowed = self.flags.narrowed_for_dependency(parent.flags);
        debug!(before = ?self.flags, parent = ?parent.flags, after = ?narrowed, "dependency narrowing");
        self.flags = narrowed;
        self.dependency = true;
    }

    /// Disable `flags` for the rest of this test.
    pub fn suppress(&mut self, flags: ComparisonFlags) {
        self.flags.remove(flags);
    }

    /// Record the factory exercised for `role`.
    pub fn record_factory(&mut self, role: ConfigurationKey, vendor: Option<&str>) {
        self.factories.push((role, vendor.map(ToOwned::to_owned)));
    }

    /// Freeze the configuration of the current run.
    ///
    /// # Errors
    ///
    /// [`GigsError::ConfigurationConflict`] if a key was recorded twice.
    pub fn snapshot(&self) -> Result<ConfigurationMap> {
        let mut map = ConfigurationMap::default();
        for key in ConfigurationKey::FLAGS {
            map.insert(key, ConfigValue::Flag(self.is_enabled(key)))?;
        }
        for (role, vendor) in &self.factories {
            map.insert(*role, ConfigValue::Factory(vendor.clone()))?;
        }
        Ok(map)
    }
}
