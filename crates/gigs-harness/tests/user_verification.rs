//! User-defined verification through the in-memory constructive factories.

use std::sync::Arc;

use gigs_error::GigsError;
use gigs_harness::{
    ConfigurationKey, Factories, SecondParameter, SkipReason, TestContext, TestEnvironment, UserConversionTest,
    UserEllipsoidTest, UserGeodeticDatumTest, UserGeographicCrsTest, UserPrimeMeridianTest, UserVerticalCrsTest,
    UserVerticalDatumTest, Verdict, Verifier,
};
use gigs_harness::logging::init_test_logging;
use gigs_memory::MemoryFactory;
use gigs_types::factory::{CrsFactory, CsFactory, Factory, FactoryResult};
use gigs_types::{
    AxisDirection, CoordinateSystem, GeodeticCrs, GeodeticDatum, Properties, Unit, VerticalCrs, VerticalDatum,
};

fn context() -> TestContext {
    init_test_logging();
    let factory = Arc::new(MemoryFactory::default());
    TestContext::new(TestEnvironment::default()).with_factories(Factories {
        crs: Some(factory.clone()),
        cs: Some(factory.clone()),
        datum: Some(factory.clone()),
        operation: Some(factory),
        ..Factories::default()
    })
}

/// CRS factory replacing the first axis of every coordinate system it is
/// given with one of the same direction and unit but another name.
struct RenamingCrsFactory {
    inner: MemoryFactory,
}

impl RenamingCrsFactory {
    fn renamed(&self, cs: &Arc<dyn CoordinateSystem>) -> FactoryResult<Arc<dyn CoordinateSystem>> {
        let first = cs.axis(0).unwrap();
        let bogus = self.inner.create_coordinate_system_axis(
            &Properties::named("Bogus axis"),
            "Z",
            first.direction(),
            first.unit(),
        )?;
        match cs.dimension() {
            1 => self.inner.create_vertical_cs(&Properties::named(cs.name()), bogus),
            _ => {
                let mut axes = vec![bogus];
                axes.extend((1..cs.dimension()).map(|i| cs.axis(i).unwrap()));
                self.inner.create_ellipsoidal_cs(&Properties::named(cs.name()), &axes)
            }
        }
    }
}

impl Factory for RenamingCrsFactory {
    fn vendor(&self) -> &str {
        "renaming"
    }
}

impl CrsFactory for RenamingCrsFactory {
    fn create_geographic_crs(
        &self,
        properties: &Properties,
        datum: Arc<dyn GeodeticDatum>,
        cs: Arc<dyn CoordinateSystem>,
    ) -> FactoryResult<Arc<dyn GeodeticCrs>> {
        let cs = self.renamed(&cs)?;
        self.inner.create_geographic_crs(properties, datum, cs)
    }

    fn create_geocentric_crs(
        &self,
        properties: &Properties,
        datum: Arc<dyn GeodeticDatum>,
        cs: Arc<dyn CoordinateSystem>,
    ) -> FactoryResult<Arc<dyn GeodeticCrs>> {
        self.inner.create_geocentric_crs(properties, datum, cs)
    }

    fn create_vertical_crs(
        &self,
        properties: &Properties,
        datum: Arc<dyn VerticalDatum>,
        cs: Arc<dyn CoordinateSystem>,
    ) -> FactoryResult<Arc<dyn VerticalCrs>> {
        let cs = self.renamed(&cs)?;
        self.inner.create_vertical_crs(properties, datum, cs)
    }
}

fn renaming_context() -> TestContext {
    init_test_logging();
    let factory = Arc::new(MemoryFactory::default());
    TestContext::new(TestEnvironment::default()).with_factories(Factories {
        crs: Some(Arc::new(RenamingCrsFactory {
            inner: MemoryFactory::default(),
        })),
        cs: Some(factory.clone()),
        datum: Some(factory),
        ..Factories::default()
    })
}

fn bessel(context: &TestContext) -> UserEllipsoidTest {
    UserEllipsoidTest::new(
        context,
        Properties::named("GIGS ellipsoid A").with_alias("Bessel 1841"),
        6_377_397.155,
        SecondParameter::InverseFlattening(299.152_812_8),
        Unit::METRE,
    )
}

fn greenwich(context: &TestContext) -> UserPrimeMeridianTest {
    UserPrimeMeridianTest::new(context, Properties::named("GIGS PM A"), 0.0, Unit::DEGREE)
}

fn geodetic_datum(context: &TestContext) -> UserGeodeticDatumTest {
    UserGeodeticDatumTest::new(
        context,
        Properties::named("GIGS geodetic datum A"),
        bessel(context),
        greenwich(context),
    )
}

#[test]
fn user_vertical_depth_crs_round_trips() {
    let context = context();
    let datum = UserVerticalDatumTest::new(&context, Properties::named("GIGS vertical datum A"));
    let mut test = UserVerticalCrsTest::new(&context, Properties::named("GIGS vertCRS U1 depth"), datum);
    test.cs_code = 6498;

    assert_eq!(test.verify().unwrap(), Verdict::Passed);

    let crs = test.get_identified_object().unwrap().found().unwrap();
    assert_eq!(crs.name(), "GIGS vertCRS U1 depth");
    let axis = crs.coordinate_system().axis(0).unwrap();
    assert_eq!(axis.name(), "Gravity-related depth");
    assert_eq!(axis.abbreviation(), "D");
    assert_eq!(axis.direction(), AxisDirection::Down);
    assert_eq!(axis.unit(), &Unit::METRE);
    assert_eq!(test.case.factory_calls(), 1);
}

#[test]
fn renamed_vertical_axis_fails_round_trip() {
    let context = renaming_context();
    let datum = UserVerticalDatumTest::new(&context, Properties::named("GIGS vertical datum A"));
    let mut test = UserVerticalCrsTest::new(&context, Properties::named("GIGS vertCRS U1 depth"), datum);
    test.cs_code = 6498;

    let err = test.verify().unwrap_err();
    assert!(err.is_mismatch(), "{err}");
    assert_eq!(err.path(), Some("VerticalCRS.coordinate_system().axis(0).name()"));
    assert!(err.to_string().contains("Bogus axis"), "{err}");
}

#[test]
fn renamed_geographic_axis_fails_round_trip() {
    let context = renaming_context();
    let mut test = UserGeographicCrsTest::new(
        &context,
        Properties::named("GIGS geogCRS A"),
        geodetic_datum(&context),
    );

    let err = test.verify().unwrap_err();
    assert!(err.is_mismatch(), "{err}");
    assert_eq!(err.path(), Some("GeodeticCRS.coordinate_system().axis(0).name()"));
}

#[test]
fn user_geographic_crs_delegates_to_components() {
    let context = context();
    let mut test = UserGeographicCrsTest::new(
        &context,
        Properties::named("GIGS geogCRS A").with_alias("GIGS A"),
        geodetic_datum(&context),
    );

    assert!(test.verify().unwrap().is_passed());
    let crs = test.build().unwrap();
    assert_eq!(crs.datum().name(), "GIGS geodetic datum A");
    assert_eq!(crs.datum().ellipsoid().aliases(), &["Bessel 1841".to_owned()]);
    assert_eq!(test.datum.case.factory_calls(), 1);
    assert_eq!(test.datum.ellipsoid.case.factory_calls(), 1);
}

#[test]
fn user_ellipsoid_from_semi_axes() {
    let context = context();
    let mut test = UserEllipsoidTest::new(
        &context,
        Properties::named("GIGS ellipsoid B"),
        6_378_137.0,
        SecondParameter::SemiMinorAxis(6_356_752.314),
        Unit::METRE,
    );
    assert!(test.verify().unwrap().is_passed());
    let ellipsoid = test.build().unwrap();
    assert!(!ellipsoid.is_ivf_definitive());
}

#[test]
fn user_sphere_is_recognised() {
    let context = context();
    let mut test = UserEllipsoidTest::new(
        &context,
        Properties::named("GIGS sphere"),
        6_371_007.0,
        SecondParameter::SemiMinorAxis(6_371_007.0),
        Unit::METRE,
    );
    assert!(test.verify().unwrap().is_passed());
    assert!(test.expectation().is_sphere.unwrap());
}

#[test]
fn user_conversion_from_reference_table() {
    let context = context();
    let mut test =
        UserConversionTest::from_reference(&context, Properties::named("GIGS conversion A"), 16032).unwrap();
    assert_eq!(test.method, "Transverse Mercator");
    assert!(test.verify().unwrap().is_passed());
    let conversion = test.build().unwrap();
    assert_eq!(conversion.parameter_values().len(), test.parameters.len());

    let missing = UserConversionTest::from_reference(&context, Properties::named("GIGS conversion X"), 1);
    assert!(matches!(missing, Err(GigsError::MissingTableEntry { code: 1, .. })));
}

#[test]
fn missing_constructive_factory_skips() {
    let factory = Arc::new(MemoryFactory::default());
    let context = TestContext::default().with_factories(Factories {
        datum: Some(factory.clone()),
        cs: Some(factory),
        ..Factories::default()
    });
    let datum = UserVerticalDatumTest::new(&context, Properties::named("GIGS vertical datum A"));
    let mut test = UserVerticalCrsTest::new(&context, Properties::named("GIGS vertCRS A"), datum);

    assert_eq!(
        test.verify().unwrap(),
        Verdict::Skipped(SkipReason::FactoryAbsent {
            role: ConfigurationKey::CrsFactory
        })
    );
    assert_eq!(test.case.factory_calls(), 0);
}

#[test]
fn rejected_definition_is_a_failure() {
    let context = context();
    let mut test = UserEllipsoidTest::new(
        &context,
        Properties::named("GIGS ellipsoid bad"),
        6_356_752.0,
        SecondParameter::SemiMinorAxis(6_378_137.0),
        Unit::METRE,
    );
    let err = test.verify().unwrap_err();
    assert!(matches!(err, GigsError::Factory(_)), "{err}");
    // replayed without a second construction
    assert_eq!(test.verify().unwrap_err(), err);
    assert_eq!(test.case.factory_calls(), 1);
}

#[test]
fn user_objects_skip_identifier_checks() {
    let context = context();
    let test = UserVerticalDatumTest::new(&context, Properties::named("GIGS vertical datum A"));
    let snapshot = test.case.snapshot().unwrap();
    assert_eq!(snapshot.flag(ConfigurationKey::StandardIdentifierSupported), Some(false));
    assert_eq!(snapshot.flag(ConfigurationKey::DependencyIdentificationSupported), Some(false));
    assert_eq!(snapshot.flag(ConfigurationKey::StandardNameSupported), Some(true));
}
