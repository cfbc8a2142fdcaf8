//! Library-defined verification against the in-memory EPSG sample.
//!
//! Each test wires `MemoryAuthority` into a `TestContext` as the library
//! under test and runs one authority test end to end.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use gigs_error::{FailureKind, GigsError};
use gigs_harness::{
    ConfigValue, ConfigurationKey, CoordinateOperationTest, EllipsoidTest, Factories, GeodeticCrsTest,
    GeodeticDatumTest, PrimeMeridianTest, ReportOutcome, SkipReason, TestContext, TestEnvironment, TestReport,
    Verdict, Verifier, VerticalCrsTest, VerticalDatumTest, reference::coordinate_system_expectation,
};
use gigs_harness::logging::init_test_logging;
use gigs_memory::{MemoryAuthority, MemoryFactory};
use gigs_types::factory::{
    CrsAuthorityFactory, CsFactory, CrsFactory, DatumAuthorityFactory, DatumFactory, Factory, FactoryResult,
};
use gigs_types::{
    AxisDirection, CrsKind, GeodeticCrs, Identifier, OperationKind, ParameterValue, Properties, Unit, VerticalCrs,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn sample() -> MemoryAuthority {
    MemoryAuthority::epsg_sample().unwrap()
}

fn context_for(authority: MemoryAuthority) -> TestContext {
    init_test_logging();
    let authority = Arc::new(authority);
    TestContext::new(TestEnvironment::default()).with_factories(Factories {
        crs_authority: Some(authority.clone()),
        cs_authority: Some(authority.clone()),
        datum_authority: Some(authority.clone()),
        operation_authority: Some(authority),
        ..Factories::default()
    })
}

fn wgs84_test(context: &TestContext) -> GeodeticCrsTest {
    let mut test = GeodeticCrsTest::expecting(context, 4326, "WGS 84");
    test.kind = Some(CrsKind::Geographic2D);
    test.axis_directions = vec![AxisDirection::North, AxisDirection::East];
    test.datum = Some(GeodeticDatumTest::expecting(context, 6326, "World Geodetic System 1984"));
    test
}

fn epsg(name: &str, code: i32) -> Properties {
    Properties::named(name).with_identifier(Identifier::epsg(code))
}

/// CRS authority counting how often it is asked for an object.
struct CountingAuthority {
    inner: MemoryAuthority,
    calls: AtomicUsize,
}

impl Factory for CountingAuthority {
    fn vendor(&self) -> &str {
        "counting"
    }
}

impl CrsAuthorityFactory for CountingAuthority {
    fn create_geographic_crs(&self, code: &str) -> FactoryResult<Arc<dyn GeodeticCrs>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.create_geographic_crs(code)
    }

    fn create_geocentric_crs(&self, code: &str) -> FactoryResult<Arc<dyn GeodeticCrs>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.create_geocentric_crs(code)
    }

    fn create_vertical_crs(&self, code: &str) -> FactoryResult<Arc<dyn VerticalCrs>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.inner.create_vertical_crs(code)
    }
}

// ---------------------------------------------------------------------------
// End-to-end scenarios
// ---------------------------------------------------------------------------

#[test]
fn wgs84_geographic_crs_passes() {
    let context = context_for(sample());
    let mut test = wgs84_test(&context);
    test.case.aliases = vec!["WGS 84 (lat-lon)".to_owned()];
    test.coordinate_system = Some(coordinate_system_expectation(&context, 6422).unwrap());

    assert_eq!(test.verify().unwrap(), Verdict::Passed);
}

#[test]
fn unknown_code_is_skipped_not_failed() {
    let context = context_for(MemoryAuthority::default());
    let mut test = wgs84_test(&context);

    let verdict = test.verify().unwrap();
    assert_eq!(
        verdict.skip_reason(),
        Some(&SkipReason::UnsupportedCode {
            authority: "EPSG".to_owned(),
            code: "4326".to_owned(),
        })
    );
}

#[test]
fn swapped_axis_order_fails_with_axis_path() {
    let mut authority = sample();
    let f = MemoryFactory::default();
    let lon = f
        .create_coordinate_system_axis(&epsg("Geodetic longitude", 107), "Lon", AxisDirection::East, &Unit::DEGREE)
        .unwrap();
    let lat = f
        .create_coordinate_system_axis(&epsg("Geodetic latitude", 106), "Lat", AxisDirection::North, &Unit::DEGREE)
        .unwrap();
    let cs = f.create_ellipsoidal_cs(&epsg("Ellipsoidal 2D CS", 6424), &[lon, lat]).unwrap();
    let datum = authority.create_geodetic_datum("6326").unwrap();
    let crs = f.create_geographic_crs(&epsg("WGS 84", 4326), datum, cs).unwrap();
    authority.insert_geodetic_crs(4326, crs);

    let context = context_for(authority);
    let err = wgs84_test(&context).verify().unwrap_err();

    assert!(err.is_mismatch());
    assert_eq!(err.path(), Some("GeodeticCRS.coordinate_system().axis(*).direction()"));
    let message = err.to_string();
    assert!(message.contains("[north, east]"), "{message}");
    assert!(message.contains("[east, north]"), "{message}");
}

#[test]
fn alias_comparison_ignores_case() {
    let mut authority = MemoryAuthority::default();
    let f = MemoryFactory::default();
    let bessel = f
        .create_flattened_sphere(
            &epsg("Bessel 1841", 7004).with_alias("rd bessel"),
            6_377_397.155,
            299.152_812_8,
            &Unit::METRE,
        )
        .unwrap();
    authority.insert_ellipsoid(7004, bessel);
    let context = context_for(authority);

    let mut test = EllipsoidTest::expecting(&context, 7004, "Bessel 1841");
    test.case.aliases = vec!["RD Bessel".to_owned()];
    test.inverse_flattening = Some(299.152_812_8);
    assert_eq!(test.verify().unwrap(), Verdict::Passed);

    let mut test = EllipsoidTest::expecting(&context, 7004, "Bessel 1841");
    test.case.aliases = vec!["RD Bessel".to_owned(), "Bessel Amersfoort".to_owned()];
    let err = test.verify().unwrap_err();
    assert!(matches!(err, GigsError::AliasNotFound { ref alias, .. } if alias == "Bessel Amersfoort"));
}

// ---------------------------------------------------------------------------
// Identification and skip rules
// ---------------------------------------------------------------------------

#[test]
fn duplicated_identifier_fails() {
    let mut authority = MemoryAuthority::default();
    let f = MemoryFactory::default();
    let properties = epsg("Greenwich", 8901).with_identifier(Identifier::epsg(8901));
    let meridian = f.create_prime_meridian(&properties, 0.0, &Unit::DEGREE).unwrap();
    authority.insert_prime_meridian(8901, meridian);
    let context = context_for(authority);

    let mut test = PrimeMeridianTest::expecting(&context, 8901, "Greenwich");
    let err = test.verify().unwrap_err();
    assert!(matches!(err, GigsError::IdentifierCount { count: 2, .. }), "{err}");
}

#[test]
fn disabled_identifier_check_accepts_duplicates() {
    let mut authority = MemoryAuthority::default();
    let f = MemoryFactory::default();
    let properties = epsg("Greenwich", 8901).with_identifier(Identifier::epsg(8901));
    let meridian = f.create_prime_meridian(&properties, 0.0, &Unit::DEGREE).unwrap();
    authority.insert_prime_meridian(8901, meridian);
    let environment = TestEnvironment::default().with_disabled(ConfigurationKey::StandardIdentifierSupported);
    let context = TestContext {
        environment,
        ..context_for(authority)
    };

    let mut test = PrimeMeridianTest::expecting(&context, 8901, "Greenwich");
    test.greenwich_longitude = Some(0.0);
    assert!(test.verify().unwrap().is_passed());
    assert_eq!(
        test.case.snapshot().unwrap().flag(ConfigurationKey::StandardIdentifierSupported),
        Some(false)
    );
}

#[test]
fn absent_factory_is_skipped_before_any_comparison() {
    let context = TestContext::default();
    let mut test = PrimeMeridianTest::expecting(&context, 8901, "Greenwich");
    assert_eq!(
        test.verify().unwrap(),
        Verdict::Skipped(SkipReason::FactoryAbsent {
            role: ConfigurationKey::DatumAuthorityFactory
        })
    );
    assert_eq!(test.case.factory_calls(), 0);
    assert_eq!(
        test.case.snapshot().unwrap().get(ConfigurationKey::DatumAuthorityFactory),
        Some(&ConfigValue::Factory(None))
    );
}

#[test]
fn deprecated_object_is_skipped_when_disabled() {
    let context = context_for(sample());
    let mut test = wgs84_test(&context);
    test.case.deprecated = true;
    assert!(test.verify().unwrap().is_passed());

    let context = TestContext {
        environment: TestEnvironment::default()
            .with_disabled(ConfigurationKey::DeprecatedObjectCreationSupported),
        ..context
    };
    let mut test = wgs84_test(&context);
    test.case.deprecated = true;
    assert_eq!(
        test.verify().unwrap(),
        Verdict::Skipped(SkipReason::DeprecatedObject { code: 4326 })
    );
    assert_eq!(test.case.factory_calls(), 0);
}

#[test]
fn skipped_dependency_skips_parent() {
    let context = context_for(sample());
    let context = TestContext {
        environment: TestEnvironment::default()
            .with_disabled(ConfigurationKey::DeprecatedObjectCreationSupported),
        ..context
    };
    let mut test = wgs84_test(&context);
    if let Some(datum) = &mut test.datum {
        datum.case.deprecated = true;
    }
    assert_eq!(
        test.verify().unwrap(),
        Verdict::Skipped(SkipReason::DeprecatedObject { code: 6326 })
    );
    assert_eq!(test.case.factory_calls(), 1);

    let mut test = VerticalCrsTest::expecting(&context, 5714, "MSL height");
    let mut datum = VerticalDatumTest::expecting(&context, 5100, "Mean Sea Level");
    datum.case.deprecated = true;
    test.datum = Some(datum);
    assert_eq!(
        test.verify().unwrap(),
        Verdict::Skipped(SkipReason::DeprecatedObject { code: 5100 })
    );
}

#[test]
fn factory_is_called_at_most_once() {
    let authority = Arc::new(CountingAuthority {
        inner: sample(),
        calls: AtomicUsize::new(0),
    });
    let context = TestContext::default().with_factories(Factories {
        crs_authority: Some(authority.clone()),
        ..Factories::default()
    });
    let mut test = wgs84_test(&context);
    test.datum = None;

    let first = test.get_identified_object().unwrap().found().unwrap();
    let second = test.get_identified_object().unwrap().found().unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert!(test.verify().unwrap().is_passed());
    assert_eq!(authority.calls.load(Ordering::SeqCst), 1);
    assert_eq!(test.case.factory_calls(), 1);
}

#[test]
fn geocentric_crs_requested_by_kind() {
    let context = context_for(sample());
    let mut test = GeodeticCrsTest::expecting(&context, 4978, "WGS 84");
    test.kind = Some(CrsKind::Geocentric);
    test.axis_directions = vec![
        AxisDirection::GeocentricX,
        AxisDirection::GeocentricY,
        AxisDirection::GeocentricZ,
    ];
    test.coordinate_system = Some(coordinate_system_expectation(&context, 6500).unwrap());
    assert!(test.verify().unwrap().is_passed());
}

#[test]
fn vertical_crs_checks_datum_and_axis() {
    let context = context_for(sample());
    let mut test = VerticalCrsTest::expecting(&context, 5715, "MSL depth");
    test.axis_direction = Some(AxisDirection::Down);
    test.axis_unit = Some(Unit::METRE);
    test.datum = Some(VerticalDatumTest::expecting(&context, 5100, "Mean Sea Level"));
    test.coordinate_system = Some(coordinate_system_expectation(&context, 6498).unwrap());
    assert!(test.verify().unwrap().is_passed());

    let mut test = VerticalCrsTest::expecting(&context, 5714, "MSL height");
    test.axis_direction = Some(AxisDirection::Down);
    let err = test.verify().unwrap_err();
    assert_eq!(err.path(), Some("VerticalCRS.coordinate_system().axis(0).direction()"));
}

#[test]
fn wrong_dependency_code_names_datum_path() {
    let context = context_for(sample());
    let mut test = wgs84_test(&context);
    test.datum = Some(GeodeticDatumTest::expecting(&context, 6258, "European Terrestrial Reference System 1989"));
    let err = test.verify().unwrap_err();
    assert!(matches!(err, GigsError::IdentifierCount { count: 0, .. }), "{err}");
    assert_eq!(err.path(), Some("GeodeticCRS.datum().identifiers()"));

    // without dependency identification the datum identifier is not compared
    let environment = TestEnvironment::default().with_disabled(ConfigurationKey::DependencyIdentificationSupported);
    let context = TestContext { environment, ..context };
    let mut test = wgs84_test(&context);
    test.datum = Some(GeodeticDatumTest::expecting(&context, 6258, "European Terrestrial Reference System 1989"));
    assert!(test.verify().unwrap().is_passed());
}

#[test]
fn utm_conversion_parameters_compared() {
    let context = context_for(sample());
    let mut test = CoordinateOperationTest::expecting(&context, 16031, "UTM zone 31N");
    test.kind = Some(OperationKind::Conversion);
    test.method_name = Some("Transverse Mercator".to_owned());
    test.parameters = vec![
        ParameterValue::real("Longitude of natural origin", 3.0, Unit::DEGREE),
        ParameterValue::real("False easting", 500.0, Unit::KILOMETRE),
    ];
    assert!(test.verify().unwrap().is_passed());

    let mut test = CoordinateOperationTest::expecting(&context, 16031, "UTM zone 31N");
    test.parameters = vec![ParameterValue::real("Longitude of natural origin", 9.0, Unit::DEGREE)];
    let err = test.verify().unwrap_err();
    assert!(err.is_mismatch(), "{err}");
}

#[test]
fn method_name_checked_only_with_standard_names() {
    let context = context_for(sample());
    let mut test = CoordinateOperationTest::expecting(&context, 16031, "UTM zone 31N");
    test.method_name = Some("Lambert Conic Conformal (1SP)".to_owned());
    let err = test.verify().unwrap_err();
    assert_eq!(err.path(), Some("CoordinateOperation.method().name()"));

    let context = TestContext {
        environment: TestEnvironment::default().with_disabled(ConfigurationKey::StandardNameSupported),
        ..context
    };
    let mut test = CoordinateOperationTest::expecting(&context, 16031, "UTM zone 31N");
    test.method_name = Some("Lambert Conic Conformal (1SP)".to_owned());
    test.parameters = vec![ParameterValue::real("Longitude of natural origin", 3.0, Unit::DEGREE)];
    assert!(test.verify().unwrap().is_passed());
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

#[test]
fn report_records_configuration_and_outcome() {
    let context = context_for(sample());
    let mut test = wgs84_test(&context);
    let result = test.verify();
    let snapshot = test.case.snapshot().unwrap();
    assert_eq!(
        snapshot.get(ConfigurationKey::CrsAuthorityFactory),
        Some(&ConfigValue::Factory(Some("gigs-memory".to_owned())))
    );
    assert_eq!(snapshot.flag(ConfigurationKey::DeprecatedObjectCreationSupported), Some(true));

    let report = TestReport::from_result("GeodeticCRS", Some(4326), &result, Some(snapshot));
    assert_eq!(report.outcome, ReportOutcome::Passed);
    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["outcome"], "passed");
    assert_eq!(json["epsg_code"], 4326);

    let context = context_for(MemoryAuthority::default());
    let mut test = wgs84_test(&context);
    let report = TestReport::from_result("GeodeticCRS", Some(4326), &test.verify(), None);
    assert!(!report.is_failure());
    let json: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
    assert_eq!(json["outcome"], "skipped");
    assert_eq!(json["reason"], "unsupported_code");
}

#[test]
fn factory_failure_is_reported_as_failure() {
    struct BrokenAuthority;

    impl Factory for BrokenAuthority {
        fn vendor(&self) -> &str {
            "broken"
        }
    }

    impl CrsAuthorityFactory for BrokenAuthority {
        fn create_geographic_crs(&self, _: &str) -> FactoryResult<Arc<dyn GeodeticCrs>> {
            Err(gigs_error::FactoryError::Failure("database offline".to_owned()))
        }

        fn create_geocentric_crs(&self, code: &str) -> FactoryResult<Arc<dyn GeodeticCrs>> {
            self.create_geographic_crs(code)
        }

        fn create_vertical_crs(&self, _: &str) -> FactoryResult<Arc<dyn VerticalCrs>> {
            Err(gigs_error::FactoryError::Failure("database offline".to_owned()))
        }
    }

    let context = TestContext::default().with_factories(Factories {
        crs_authority: Some(Arc::new(BrokenAuthority)),
        ..Factories::default()
    });
    let mut test = wgs84_test(&context);
    let result = test.verify();
    let report = TestReport::from_result("GeodeticCRS", Some(4326), &result, None);
    assert!(report.is_failure());
    assert!(matches!(
        report.outcome,
        ReportOutcome::Failed {
            kind: FailureKind::Failure,
            ..
        }
    ));
    // replayed, not retried
    assert_eq!(test.verify().unwrap_err(), result.unwrap_err());
    assert_eq!(test.case.factory_calls(), 1);
}
