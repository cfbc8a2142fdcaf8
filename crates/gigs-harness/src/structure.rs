//! Comparisons of structural properties against expected values.

use std::fmt::{self, Display};

use gigs_error::{GigsError, Result};
use gigs_types::{
    AxisDirection, CoordinateSystem, CoordinateSystemAxis, ParameterValue, Unit, UnitKind, Value,
};

use crate::ascii::{NameMatch, names_match};

/// Relative tolerance on lengths and other linear quantities.
pub const LINEAR_TOLERANCE: f64 = 1e-10;

/// Absolute tolerance on angles, in degrees.
pub const ANGULAR_TOLERANCE: f64 = 1e-7;

/// Absolute tolerance on scale factors.
pub const SCALE_TOLERANCE: f64 = 1e-10;

/// Assert equality of two values of the same type.
pub fn assert_value<T: PartialEq + Display>(path: &str, expected: T, actual: T) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(GigsError::mismatch(path, expected, actual))
    }
}

/// Assert `|expected - actual| <= tolerance`.
pub fn assert_close(path: &str, expected: f64, actual: f64, tolerance: f64) -> Result<()> {
    #[allow(clippy::float_cmp)]
    let equal = expected == actual || (expected - actual).abs() <= tolerance;
    if equal {
        Ok(())
    } else {
        Err(GigsError::mismatch(path, expected, actual))
    }
}

/// Tolerance appropriate for a quantity of `unit` with magnitude `value`.
pub fn tolerance_for(unit: &Unit, value: f64) -> Result<f64> {
    Ok(match unit.kind() {
        UnitKind::Angle => Unit::DEGREE.convert(ANGULAR_TOLERANCE, unit)?,
        UnitKind::Scale => SCALE_TOLERANCE,
        UnitKind::Length | UnitKind::Time => {
            value.abs().max(1.0) * LINEAR_TOLERANCE
        }
    })
}

/// Compare a quantity after converting `actual` into the expected unit.
///
/// # Errors
///
/// [`GigsError::IncompatibleUnits`] when the units measure different
/// quantities, [`GigsError::Mismatch`] when the values differ.
pub fn assert_quantity(
    path: &str,
    expected: f64,
    expected_unit: &Unit,
    actual: f64,
    actual_unit: &Unit,
) -> Result<()> {
    let converted = actual_unit.convert(actual, expected_unit)?;
    let tolerance = tolerance_for(expected_unit, expected)?;
    assert_close(path, expected, converted, tolerance)
}

/// A list of axis directions, displayed as `[north, east]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directions(pub Vec<AxisDirection>);

impl Display for Directions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (i, d) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            f.write_str(d.as_str())?;
        }
        f.write_str("]")
    }
}

/// All axes of `cs`, in order.
///
/// # Errors
///
/// [`GigsError::IllegalState`] if an index below the dimension has no axis.
pub fn axes(cs: &dyn CoordinateSystem) -> Result<Vec<std::sync::Arc<dyn CoordinateSystemAxis>>> {
    (0..cs.dimension())
        .map(|i| {
            cs.axis(i)
                .ok_or_else(|| GigsError::IllegalState(format!("no axis at index {i} of {}", cs.name())))
        })
        .collect()
}

/// Expected definition of one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpectedAxis {
    pub name: String,
    pub abbreviation: String,
    pub direction: AxisDirection,
    pub unit: Unit,
}

/// Check the dimension, directions and units of `cs` against `expected`.
///
/// Axis names and abbreviations are compared only when `check_names` is set.
pub fn assert_axes(
    path: &str,
    cs: &dyn CoordinateSystem,
    expected: &[ExpectedAxis],
    check_names: bool,
) -> Result<()> {
    assert_value(&format!("{path}.dimension()"), expected.len(), cs.dimension())?;
    let actual = axes(cs)?;
    assert_value(
        &format!("{path}.axis(*).direction()"),
        Directions(expected.iter().map(|a| a.direction).collect()),
        Directions(actual.iter().map(|a| a.direction()).collect()),
    )?;
    for (i, (want, axis)) in expected.iter().zip(&actual).enumerate() {
        let unit = axis.unit();
        let same_unit = unit
            .converter_to(&want.unit)
            .is_ok_and(|factor| (factor - 1.0).abs() <= 1e-12);
        if !same_unit {
            return Err(GigsError::mismatch(format!("{path}.axis({i}).unit()"), &want.unit, unit));
        }
        if check_names {
            if !names_match(&want.name, axis.name(), NameMatch::Exact) {
                return Err(GigsError::mismatch(format!("{path}.axis({i}).name()"), &want.name, axis.name()));
            }
            assert_value(
                &format!("{path}.axis({i}).abbreviation()"),
                want.abbreviation.as_str(),
                axis.abbreviation(),
            )?;
        }
    }
    Ok(())
}

/// Compare operation parameters. Each expected parameter must be present,
/// matched by name, with an equal value (reals after unit conversion).
pub fn assert_parameters(path: &str, expected: &[ParameterValue], actual: &[ParameterValue]) -> Result<()> {
    for want in expected {
        let Some(got) = actual
            .iter()
            .find(|p| names_match(want.name(), p.name(), NameMatch::Exact))
        else {
            return Err(GigsError::mismatch(
                format!("{path}.parameter(\"{}\")", want.name()),
                want,
                "<absent>",
            ));
        };
        let param_path = format!("{path}.parameter(\"{}\")", want.name());
        match (want.value(), want.unit()) {
            (Value::Real(expected), Some(unit)) => {
                let value = got.double_value_in(unit)?;
                assert_close(&param_path, *expected, value, tolerance_for(unit, *expected)?)?;
            }
            (Value::Real(expected), None) => {
                assert_close(&param_path, *expected, got.double_value()?, SCALE_TOLERANCE)?;
            }
            (value, _) => assert_value(&param_path, value, got.value())?,
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quantity_converted_before_comparison() {
        assert!(assert_quantity("PrimeMeridian.greenwich_longitude()", 2.337_229_17, &Unit::DEGREE, 2.596_921_3, &Unit::GRAD).is_ok());
        let err = assert_quantity("p", 1.0, &Unit::METRE, 1.0, &Unit::DEGREE).unwrap_err();
        assert!(matches!(err, GigsError::IncompatibleUnits { .. }));
    }

    #[test]
    fn close_uses_tolerance() {
        assert!(assert_close("x", 1.0, 1.0 + 1e-12, 1e-10).is_ok());
        let err = assert_close("Ellipsoid.semi_major_axis()", 6_378_137.0, 6_378_388.0, 1e-3).unwrap_err();
        assert_eq!(err.to_string(), "Ellipsoid.semi_major_axis(): expected <6378137> but was <6378388>");
    }

    #[test]
    fn directions_display() {
        let d = Directions(vec![AxisDirection::North, AxisDirection::East]);
        assert_eq!(d.to_string(), "[north, east]");
    }

    #[test]
    fn parameters_matched_by_name_with_units() {
        let expected = vec![
            ParameterValue::real("Longitude of natural origin", 3.0, Unit::DEGREE),
            ParameterValue::real("False easting", 500_000.0, Unit::METRE),
        ];
        let actual = vec![
            ParameterValue::real("false easting", 500.0, Unit::KILOMETRE),
            ParameterValue::real("Longitude of natural origin", 3.0, Unit::DEGREE),
        ];
        assert!(assert_parameters("Conversion", &expected, &actual).is_ok());
        let err = assert_parameters("Conversion", &expected, &actual[..1]).unwrap_err();
        assert_eq!(err.path(), Some("Conversion.parameter(\"Longitude of natural origin\")"));
    }
}
