use std::borrow::Cow;
use std::fmt;

use gigs_error::{GigsError, Result};
use serde::{Deserialize, Serialize};

/// Physical quantity measured by a [`Unit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Length,
    Angle,
    Scale,
    Time,
}

impl UnitKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Length => "length",
            Self::Angle => "angle",
            Self::Scale => "scale",
            Self::Time => "time",
        }
    }
}

/// A unit of measure with a linear conversion to the SI base of its kind.
///
/// Base units are metre, radian, unity and second.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    name: Cow<'static, str>,
    symbol: Cow<'static, str>,
    kind: UnitKind,
    to_base: f64,
}

impl Unit {
    pub const METRE: Self = Self::builtin("metre", "m", UnitKind::Length, 1.0);
    pub const KILOMETRE: Self = Self::builtin("kilometre", "km", UnitKind::Length, 1000.0);
    pub const FOOT: Self = Self::builtin("foot", "ft", UnitKind::Length, 0.3048);
    pub const US_SURVEY_FOOT: Self =
        Self::builtin("US survey foot", "ftUS", UnitKind::Length, 1200.0 / 3937.0);
    pub const RADIAN: Self = Self::builtin("radian", "rad", UnitKind::Angle, 1.0);
    pub const DEGREE: Self =
        Self::builtin("degree", "°", UnitKind::Angle, std::f64::consts::PI / 180.0);
    pub const GRAD: Self = Self::builtin("grad", "grad", UnitKind::Angle, std::f64::consts::PI / 200.0);
    pub const ARC_SECOND: Self = Self::builtin(
        "arc-second",
        "″",
        UnitKind::Angle,
        std::f64::consts::PI / 648_000.0,
    );
    pub const UNITY: Self = Self::builtin("unity", "", UnitKind::Scale, 1.0);
    pub const PARTS_PER_MILLION: Self =
        Self::builtin("parts per million", "ppm", UnitKind::Scale, 1.0e-6);
    pub const SECOND: Self = Self::builtin("second", "s", UnitKind::Time, 1.0);

    const fn builtin(name: &'static str, symbol: &'static str, kind: UnitKind, to_base: f64) -> Self {
        Self {
            name: Cow::Borrowed(name),
            symbol: Cow::Borrowed(symbol),
            kind,
            to_base,
        }
    }

    /// Create a custom unit.
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        symbol: impl Into<Cow<'static, str>>,
        kind: UnitKind,
        to_base: f64,
    ) -> Self {
        Self {
            name: name.into(),
            symbol: symbol.into(),
            kind,
            to_base,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub const fn kind(&self) -> UnitKind {
        self.kind
    }

    /// Factor converting a value in this unit to the base unit of its kind.
    pub const fn to_base(&self) -> f64 {
        self.to_base
    }

    /// Multiplicative factor converting values from `self` to `target`.
    ///
    /// # Errors
    ///
    /// Returns [`GigsError::IncompatibleUnits`] when the units measure
    /// different quantities.
    pub fn converter_to(&self, target: &Self) -> Result<f64> {
        if self.kind != target.kind {
            return Err(GigsError::IncompatibleUnits {
                from: self.name.to_string(),
                to: target.name.to_string(),
            });
        }
        Ok(self.to_base / target.to_base)
    }

    /// Convert `value` expressed in `self` into `target`.
    ///
    /// # Errors
    ///
    /// Same as [`Unit::converter_to`].
    pub fn convert(&self, value: f64, target: &Self) -> Result<f64> {
        if self == target {
            return Ok(value);
        }
        Ok(value * self.converter_to(target)?)
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn same_unit_is_identity() {
        assert_eq!(Unit::METRE.convert(12.5, &Unit::METRE).unwrap(), 12.5);
    }

    #[test]
    fn grad_to_degree() {
        let deg = Unit::GRAD.convert(2.596_921_3, &Unit::DEGREE).unwrap();
        assert!((deg - 2.337_229_17).abs() < 1e-8, "got {deg}");
    }

    #[test]
    fn foot_to_metre() {
        let m = Unit::FOOT.convert(1.0, &Unit::METRE).unwrap();
        assert!((m - 0.3048).abs() < 1e-12);
    }

    #[test]
    fn incompatible_kinds_fail() {
        let err = Unit::METRE.converter_to(&Unit::DEGREE).unwrap_err();
        assert_eq!(
            err,
            GigsError::IncompatibleUnits {
                from: "metre".to_owned(),
                to: "degree".to_owned()
            }
        );
    }
}
