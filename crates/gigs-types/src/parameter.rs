//! Immutable, self-describing parameter value.
//!
//! A [`ParameterValue`] carries both the value and the descriptor metadata
//! (name, occurrence bounds, value class and unit) of a single operation or
//! coordinate-system parameter, so that definitions can be assembled without
//! a full parameter-group model. Once constructed it never changes: every
//! `set_*` method fails with [`GigsError::UnsupportedOperation`].

use std::fmt;
use std::hash::{Hash, Hasher};

use gigs_error::{GigsError, Result};
use serde::{Deserialize, Serialize};

use crate::unit::Unit;

/// The value held by a parameter.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Value {
    Real(f64),
    Integer(i64),
    Boolean(bool),
    Text(String),
}

impl Value {
    /// Name of the value class, used in type-mismatch messages.
    pub const fn class_name(&self) -> &'static str {
        match self {
            Self::Real(_) => "double",
            Self::Integer(_) => "integer",
            Self::Boolean(_) => "boolean",
            Self::Text(_) => "string",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Real(a), Self::Real(b)) => a.to_bits() == b.to_bits(),
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Text(a), Self::Text(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Self::Real(v) => v.to_bits().hash(state),
            Self::Integer(v) => v.hash(state),
            Self::Boolean(v) => v.hash(state),
            Self::Text(v) => v.hash(state),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real(v) => write!(f, "{v}"),
            Self::Integer(v) => write!(f, "{v}"),
            Self::Boolean(v) => write!(f, "{v}"),
            Self::Text(v) => write!(f, "\"{v}\""),
        }
    }
}

/// A named parameter value that is also its own descriptor.
///
/// Equality and hashing are structural over `(name, value, unit)`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ParameterValue {
    name: String,
    value: Value,
    unit: Option<Unit>,
}

impl ParameterValue {
    /// A textual parameter without unit.
    pub fn text(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: Value::Text(value.into()),
            unit: None,
        }
    }

    /// A numeric parameter with its unit of measure.
    pub fn real(name: impl Into<String>, value: f64, unit: Unit) -> Self {
        Self {
            name: name.into(),
            value: Value::Real(value),
            unit: Some(unit),
        }
    }

    pub fn integer(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value: Value::Integer(value),
            unit: None,
        }
    }

    pub fn boolean(name: impl Into<String>, value: bool) -> Self {
        Self {
            name: name.into(),
            value: Value::Boolean(value),
            unit: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn value(&self) -> &Value {
        &self.value
    }

    pub const fn unit(&self) -> Option<&Unit> {
        self.unit.as_ref()
    }

    // ── Descriptor metadata ──────────────────────────────────────────────

    pub const fn min_occurs(&self) -> u32 {
        1
    }

    pub const fn max_occurs(&self) -> u32 {
        1
    }

    pub const fn value_class(&self) -> &'static str {
        self.value.class_name()
    }

    // ── Typed accessors ──────────────────────────────────────────────────

    /// Numeric value in the parameter's own unit.
    ///
    /// # Errors
    ///
    /// [`GigsError::TypeMismatch`] if the value is not numeric.
    #[allow(clippy::cast_precision_loss)]
    pub fn double_value(&self) -> Result<f64> {
        match &self.value {
            Value::Real(v) => Ok(*v),
            Value::Integer(v) => Ok(*v as f64),
            other => Err(GigsError::type_mismatch("double", other.class_name())),
        }
    }

    /// Numeric value converted to `target`.
    ///
    /// # Errors
    ///
    /// [`GigsError::TypeMismatch`] if the value is not numeric,
    /// [`GigsError::IllegalState`] if no unit is attached and
    /// [`GigsError::IncompatibleUnits`] if the units measure different
    /// quantities.
    pub fn double_value_in(&self, target: &Unit) -> Result<f64> {
        let value = self.double_value()?;
        let Some(unit) = &self.unit else {
            return Err(GigsError::IllegalState(format!(
                "parameter \"{}\" has no unit to convert to {target}",
                self.name
            )));
        };
        unit.convert(value, target)
    }

    /// # Errors
    ///
    /// [`GigsError::TypeMismatch`] if the value is not an integer.
    pub fn int_value(&self) -> Result<i64> {
        match &self.value {
            Value::Integer(v) => Ok(*v),
            other => Err(GigsError::type_mismatch("integer", other.class_name())),
        }
    }

    /// # Errors
    ///
    /// [`GigsError::TypeMismatch`] if the value is not a boolean.
    pub fn boolean_value(&self) -> Result<bool> {
        match &self.value {
            Value::Boolean(v) => Ok(*v),
            other => Err(GigsError::type_mismatch("boolean", other.class_name())),
        }
    }

    /// # Errors
    ///
    /// [`GigsError::TypeMismatch`] if the value is not a string.
    pub fn string_value(&self) -> Result<&str> {
        match &self.value {
            Value::Text(v) => Ok(v),
            other => Err(GigsError::type_mismatch("string", other.class_name())),
        }
    }

    // ── Mutators (always rejected) ───────────────────────────────────────

    /// # Errors
    ///
    /// Always fails: parameter values are immutable.
    pub fn set_value(&self, _value: Value) -> Result<()> {
        Err(self.immutable())
    }

    /// # Errors
    ///
    /// Always fails: parameter values are immutable.
    pub fn set_double_value(&self, _value: f64, _unit: Option<&Unit>) -> Result<()> {
        Err(self.immutable())
    }

    /// # Errors
    ///
    /// Always fails: parameter values are immutable.
    pub fn set_int_value(&self, _value: i64) -> Result<()> {
        Err(self.immutable())
    }

    /// # Errors
    ///
    /// Always fails: parameter values are immutable.
    pub fn set_boolean_value(&self, _value: bool) -> Result<()> {
        Err(self.immutable())
    }

    /// # Errors
    ///
    /// Always fails: parameter values are immutable.
    pub fn set_string_value(&self, _value: &str) -> Result<()> {
        Err(self.immutable())
    }

    fn immutable(&self) -> GigsError {
        GigsError::UnsupportedOperation(format!("parameter \"{}\" is immutable", self.name))
    }
}

impl PartialEq for ParameterValue {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.value == other.value
            && match (&self.unit, &other.unit) {
                (None, None) => true,
                (Some(a), Some(b)) => {
                    a.name() == b.name() && a.to_base().to_bits() == b.to_base().to_bits()
                }
                _ => false,
            }
    }
}

impl Eq for ParameterValue {}

impl Hash for ParameterValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.value.hash(state);
        if let Some(unit) = &self.unit {
            unit.name().hash(state);
            unit.to_base().to_bits().hash(state);
        }
    }
}

impl fmt::Display for ParameterValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.name, self.value)?;
        if let Some(unit) = &self.unit {
            write!(f, " {}", unit.symbol())?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn real_accessors() {
        let p = ParameterValue::real("Longitude of natural origin", 3.0, Unit::DEGREE);
        assert_eq!(p.name(), "Longitude of natural origin");
        assert_eq!(p.double_value().unwrap(), 3.0);
        assert_eq!(p.unit(), Some(&Unit::DEGREE));
        assert_eq!(p.value_class(), "double");
        assert_eq!((p.min_occurs(), p.max_occurs()), (1, 1));
        let rad = p.double_value_in(&Unit::RADIAN).unwrap();
        assert!((rad - 3.0_f64.to_radians()).abs() < 1e-15);
    }

    #[test]
    fn text_rejects_numeric_access() {
        let p = ParameterValue::text("Method", "Transverse Mercator");
        assert_eq!(p.string_value().unwrap(), "Transverse Mercator");
        assert_eq!(
            p.double_value().unwrap_err(),
            GigsError::type_mismatch("double", "string")
        );
        assert!(matches!(
            p.int_value(),
            Err(GigsError::TypeMismatch { .. })
        ));
        assert!(matches!(
            p.boolean_value(),
            Err(GigsError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn conversion_without_unit_is_illegal_state() {
        let p = ParameterValue::integer("Zone", 31);
        assert_eq!(p.double_value().unwrap(), 31.0);
        assert!(matches!(
            p.double_value_in(&Unit::METRE),
            Err(GigsError::IllegalState(_))
        ));
    }

    #[test]
    fn conversion_between_kinds_fails() {
        let p = ParameterValue::real("False easting", 500_000.0, Unit::METRE);
        assert!(matches!(
            p.double_value_in(&Unit::DEGREE),
            Err(GigsError::IncompatibleUnits { .. })
        ));
        let ft = p.double_value_in(&Unit::FOOT).unwrap();
        assert!((ft - 1_640_419.947_506_561_7).abs() < 1e-6);
    }

    #[test]
    fn setters_fail_and_leave_value_unchanged() {
        let p = ParameterValue::real("Scale factor at natural origin", 0.9996, Unit::UNITY);
        let before = p.clone();
        assert!(matches!(
            p.set_double_value(1.0, None),
            Err(GigsError::UnsupportedOperation(_))
        ));
        assert!(p.set_value(Value::Integer(1)).is_err());
        assert!(p.set_int_value(1).is_err());
        assert!(p.set_boolean_value(true).is_err());
        assert!(p.set_string_value("x").is_err());
        assert_eq!(p, before);
        assert_eq!(p.double_value().unwrap(), 0.9996);
    }

    #[test]
    fn structural_equality_and_hash() {
        let a = ParameterValue::real("False northing", 0.0, Unit::METRE);
        let b = ParameterValue::real("False northing", 0.0, Unit::METRE);
        let c = ParameterValue::real("False northing", 0.0, Unit::FOOT);
        let d = ParameterValue::real("False easting", 0.0, Unit::METRE);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);

        let set: HashSet<_> = [a, b, c, d].into_iter().collect();
        assert_eq!(set.len(), 3);
    }

    #[test]
    fn display() {
        let p = ParameterValue::real("False easting", 500_000.0, Unit::METRE);
        assert_eq!(p.to_string(), "False easting = 500000 m");
        let t = ParameterValue::text("Name", "UTM");
        assert_eq!(t.to_string(), "Name = \"UTM\"");
    }
}
