//! GIGS conformance verification engine.
//!
//! Each test in [`authority`] asks a referencing library for one EPSG
//! object by code and compares what comes back with the dataset: names,
//! aliases, identifiers and the type-specific structure. Tests in [`user`]
//! build objects from definitions through the constructive factories and
//! reuse the same comparisons. Composite objects are checked by delegating
//! each component to the test of its type, see [`verifier::verify_dependency`].
//!
//! A run is driven by a [`TestContext`]: the factories of the library under
//! test, the [`TestEnvironment`] switches, and the [`Validators`] used for
//! general well-formedness checks. Every test resolves its own
//! [`TestConfiguration`] and returns a [`Verdict`]; failures carry the
//! dotted path of the property that differed.
//!
//! [`Validators`]: gigs_types::Validators

pub mod ascii;
pub mod authority;
pub mod cache;
pub mod configuration;
pub mod context;
pub mod identification;
pub mod logging;
pub mod outcome;
pub mod reference;
pub mod structure;
pub mod user;
pub mod validators;
pub mod verifier;

pub use ascii::{NameMatch, names_match, to_ascii};
pub use authority::{
    CoordinateOperationTest, CoordinateSystemTest, EllipsoidTest, GeodeticCrsTest, GeodeticDatumTest,
    PrimeMeridianTest, VerticalCrsTest, VerticalDatumTest,
};
pub use cache::ObjectCache;
pub use configuration::{
    ComparisonFlags, ConfigValue, ConfigurationKey, ConfigurationMap, TestConfiguration, TestEnvironment,
};
pub use context::{Factories, TestContext};
pub use logging::{LogFormat, init_logging, log_verification};
pub use outcome::{Lookup, ReportOutcome, SkipReason, TestReport, Verdict};
pub use reference::ReferenceFactory;
pub use reference::tables::SecondParameter;
pub use user::{
    UserConversionTest, UserEllipsoidTest, UserGeodeticDatumTest, UserGeographicCrsTest, UserPrimeMeridianTest,
    UserTestCase, UserVerticalCrsTest, UserVerticalDatumTest,
};
pub use validators::StandardValidators;
pub use verifier::{AuthorityTestCase, Verifier, verify_dependency};
