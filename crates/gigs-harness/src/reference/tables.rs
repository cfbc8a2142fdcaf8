//! EPSG definitions of the objects the reference factory can build.

use gigs_types::{AxisDirection, CsKind, Unit};

pub struct AxisDefinition {
    pub name: &'static str,
    pub abbreviation: &'static str,
    pub direction: AxisDirection,
    pub unit: Unit,
}

pub struct CsDefinition {
    pub code: i32,
    pub name: &'static str,
    pub kind: CsKind,
    pub axes: &'static [AxisDefinition],
}

/// Second defining parameter of an ellipsoid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SecondParameter {
    SemiMinorAxis(f64),
    InverseFlattening(f64),
}

pub struct EllipsoidDefinition {
    pub code: i32,
    pub name: &'static str,
    pub semi_major_axis: f64,
    pub second: SecondParameter,
    pub unit: Unit,
}

pub struct PrimeMeridianDefinition {
    pub code: i32,
    pub name: &'static str,
    pub greenwich_longitude: f64,
    pub unit: Unit,
}

pub struct VerticalDatumDefinition {
    pub code: i32,
    pub name: &'static str,
}

pub struct ParameterDefinition {
    pub name: &'static str,
    pub value: f64,
    pub unit: Unit,
}

pub struct ConversionDefinition {
    pub code: i32,
    pub name: &'static str,
    pub method: &'static str,
    pub parameters: &'static [ParameterDefinition],
}

const fn axis(
    name: &'static str,
    abbreviation: &'static str,
    direction: AxisDirection,
    unit: Unit,
) -> AxisDefinition {
    AxisDefinition {
        name,
        abbreviation,
        direction,
        unit,
    }
}

const fn param(name: &'static str, value: f64, unit: Unit) -> ParameterDefinition {
    ParameterDefinition { name, value, unit }
}

pub static COORDINATE_SYSTEMS: &[CsDefinition] = &[
    CsDefinition {
        code: 1030,
        name: "Vertical CS. Axis: height (H). Orientation: up. UoM: ft.",
        kind: CsKind::Vertical,
        axes: &[axis("Gravity-related height", "H", AxisDirection::Up, Unit::FOOT)],
    },
    CsDefinition {
        code: 4400,
        name: "Cartesian 2D CS. Axes: easting, northing (E,N). Orientations: E,N. UoM: m.",
        kind: CsKind::Cartesian,
        axes: &[
            axis("Easting", "E", AxisDirection::East, Unit::METRE),
            axis("Northing", "N", AxisDirection::North, Unit::METRE),
        ],
    },
    CsDefinition {
        code: 6422,
        name: "Ellipsoidal 2D CS. Axes: latitude, longitude. Orientations: north, east. UoM: degree",
        kind: CsKind::Ellipsoidal,
        axes: &[
            axis("Geodetic latitude", "Lat", AxisDirection::North, Unit::DEGREE),
            axis("Geodetic longitude", "Lon", AxisDirection::East, Unit::DEGREE),
        ],
    },
    CsDefinition {
        code: 6423,
        name: "Ellipsoidal 3D CS. Axes: latitude, longitude, ellipsoidal height. Orientations: north, east, up. UoM: degree, degree, metre.",
        kind: CsKind::Ellipsoidal,
        axes: &[
            axis("Geodetic latitude", "Lat", AxisDirection::North, Unit::DEGREE),
            axis("Geodetic longitude", "Lon", AxisDirection::East, Unit::DEGREE),
            axis("Ellipsoidal height", "h", AxisDirection::Up, Unit::METRE),
        ],
    },
    CsDefinition {
        code: 6495,
        name: "Vertical CS. Axis: depth (D). Orientation: down. UoM: ft.",
        kind: CsKind::Vertical,
        axes: &[axis("Gravity-related depth", "D", AxisDirection::Down, Unit::FOOT)],
    },
    CsDefinition {
        code: 6497,
        name: "Vertical CS. Axis: height (H). Orientation: up. UoM: ftUS.",
        kind: CsKind::Vertical,
        axes: &[axis("Gravity-related height", "H", AxisDirection::Up, Unit::US_SURVEY_FOOT)],
    },
    CsDefinition {
        code: 6498,
        name: "Vertical CS. Axis: depth (D). Orientation: down. UoM: m.",
        kind: CsKind::Vertical,
        axes: &[axis("Gravity-related depth", "D", AxisDirection::Down, Unit::METRE)],
    },
    CsDefinition {
        code: 6499,
        name: "Vertical CS. Axis: height (H). Orientation: up. UoM: m.",
        kind: CsKind::Vertical,
        axes: &[axis("Gravity-related height", "H", AxisDirection::Up, Unit::METRE)],
    },
    CsDefinition {
        code: 6500,
        name: "Earth centred, earth fixed, righthanded 3D coordinate system, consisting of 3 orthogonal axes with X and Y axes in the equatorial plane, positive Z-axis parallel to mean earth rotation axis and pointing towards North Pole. UoM: m.",
        kind: CsKind::Cartesian,
        axes: &[
            axis("Geocentric X", "X", AxisDirection::GeocentricX, Unit::METRE),
            axis("Geocentric Y", "Y", AxisDirection::GeocentricY, Unit::METRE),
            axis("Geocentric Z", "Z", AxisDirection::GeocentricZ, Unit::METRE),
        ],
    },
];

pub static ELLIPSOIDS: &[EllipsoidDefinition] = &[
    EllipsoidDefinition {
        code: 7004,
        name: "Bessel 1841",
        semi_major_axis: 6_377_397.155,
        second: SecondParameter::InverseFlattening(299.152_812_8),
        unit: Unit::METRE,
    },
    EllipsoidDefinition {
        code: 7019,
        name: "GRS 1980",
        semi_major_axis: 6_378_137.0,
        second: SecondParameter::InverseFlattening(298.257_222_101),
        unit: Unit::METRE,
    },
    EllipsoidDefinition {
        code: 7022,
        name: "International 1924",
        semi_major_axis: 6_378_388.0,
        second: SecondParameter::InverseFlattening(297.0),
        unit: Unit::METRE,
    },
    EllipsoidDefinition {
        code: 7030,
        name: "WGS 84",
        semi_major_axis: 6_378_137.0,
        second: SecondParameter::InverseFlattening(298.257_223_563),
        unit: Unit::METRE,
    },
    EllipsoidDefinition {
        code: 7035,
        name: "Sphere",
        semi_major_axis: 6_371_000.0,
        second: SecondParameter::SemiMinorAxis(6_371_000.0),
        unit: Unit::METRE,
    },
];

pub static PRIME_MERIDIANS: &[PrimeMeridianDefinition] = &[
    PrimeMeridianDefinition {
        code: 8901,
        name: "Greenwich",
        greenwich_longitude: 0.0,
        unit: Unit::DEGREE,
    },
    PrimeMeridianDefinition {
        code: 8903,
        name: "Paris",
        greenwich_longitude: 2.596_921_3,
        unit: Unit::GRAD,
    },
    PrimeMeridianDefinition {
        code: 8909,
        name: "Ferro",
        greenwich_longitude: -17.666_666_666_666_668,
        unit: Unit::DEGREE,
    },
];

pub static VERTICAL_DATUMS: &[VerticalDatumDefinition] = &[
    VerticalDatumDefinition {
        code: 5100,
        name: "Mean Sea Level",
    },
    VerticalDatumDefinition {
        code: 5101,
        name: "Ordnance Datum Newlyn",
    },
    VerticalDatumDefinition {
        code: 5109,
        name: "Normaal Amsterdams Peil",
    },
];

pub static CONVERSIONS: &[ConversionDefinition] = &[
    ConversionDefinition {
        code: 16031,
        name: "UTM zone 31N",
        method: "Transverse Mercator",
        parameters: &[
            param("Latitude of natural origin", 0.0, Unit::DEGREE),
            param("Longitude of natural origin", 3.0, Unit::DEGREE),
            param("Scale factor at natural origin", 0.9996, Unit::UNITY),
            param("False easting", 500_000.0, Unit::METRE),
            param("False northing", 0.0, Unit::METRE),
        ],
    },
    ConversionDefinition {
        code: 16032,
        name: "UTM zone 32N",
        method: "Transverse Mercator",
        parameters: &[
            param("Latitude of natural origin", 0.0, Unit::DEGREE),
            param("Longitude of natural origin", 9.0, Unit::DEGREE),
            param("Scale factor at natural origin", 0.9996, Unit::UNITY),
            param("False easting", 500_000.0, Unit::METRE),
            param("False northing", 0.0, Unit::METRE),
        ],
    },
    ConversionDefinition {
        code: 19916,
        name: "British National Grid",
        method: "Transverse Mercator",
        parameters: &[
            param("Latitude of natural origin", 49.0, Unit::DEGREE),
            param("Longitude of natural origin", -2.0, Unit::DEGREE),
            param("Scale factor at natural origin", 0.999_601_271_7, Unit::UNITY),
            param("False easting", 400_000.0, Unit::METRE),
            param("False northing", -100_000.0, Unit::METRE),
        ],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted<T>(table: &[T], code: impl Fn(&T) -> i32) -> bool {
        table.windows(2).all(|w| code(&w[0]) < code(&w[1]))
    }

    #[test]
    fn tables_sorted_by_unique_code() {
        assert!(sorted(COORDINATE_SYSTEMS, |d| d.code));
        assert!(sorted(ELLIPSOIDS, |d| d.code));
        assert!(sorted(PRIME_MERIDIANS, |d| d.code));
        assert!(sorted(VERTICAL_DATUMS, |d| d.code));
        assert!(sorted(CONVERSIONS, |d| d.code));
    }

    #[test]
    fn vertical_systems_have_one_vertical_axis() {
        for cs in COORDINATE_SYSTEMS.iter().filter(|cs| cs.kind == CsKind::Vertical) {
            assert_eq!(cs.axes.len(), 1, "{}", cs.code);
            assert!(cs.axes[0].direction.is_vertical(), "{}", cs.code);
        }
    }

    #[test]
    fn depth_axes_are_gravity_related() {
        for code in [6495, 6498] {
            let cs = COORDINATE_SYSTEMS.iter().find(|cs| cs.code == code).unwrap();
            assert_eq!(cs.axes[0].name, "Gravity-related depth");
            assert_eq!(cs.axes[0].abbreviation, "D");
            assert_eq!(cs.axes[0].direction, AxisDirection::Down);
        }
        let metre = COORDINATE_SYSTEMS.iter().find(|cs| cs.code == 6498).unwrap();
        assert_eq!(metre.axes[0].unit, Unit::METRE);
    }
}
