//! Referencing object model consumed by the GIGS harness.
//!
//! The referencing library under test owns every concrete object; this
//! crate only names the capabilities the harness reads (names, aliases,
//! identifiers and the type-specific structural accessors) and the
//! factories it calls. Sub-objects are handed out as `Arc<dyn ...>` so that
//! a verifier can keep them for dependency checks without copying.

pub mod crs;
pub mod cs;
pub mod datum;
pub mod factory;
pub mod operation;
pub mod parameter;
pub mod unit;
pub mod validators;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use crs::{CrsKind, GeodeticCrs, VerticalCrs};
pub use cs::{AxisDirection, CoordinateSystem, CoordinateSystemAxis, CsKind};
pub use datum::{Datum, Ellipsoid, GeodeticDatum, PrimeMeridian, VerticalDatum};
pub use operation::{CoordinateOperation, OperationKind};
pub use parameter::{ParameterValue, Value};
pub use unit::{Unit, UnitKind};
pub use validators::{Validate, Validators};

/// Codespace of the EPSG dataset.
pub const EPSG: &str = "EPSG";

/// A `(codespace, code)` pair identifying an object within an authority.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identifier {
    pub codespace: String,
    pub code: String,
    pub version: Option<String>,
}

impl Identifier {
    /// Create an identifier in an arbitrary codespace.
    pub fn new(codespace: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            codespace: codespace.into(),
            code: code.into(),
            version: None,
        }
    }

    /// Create an identifier in the EPSG codespace.
    #[must_use]
    pub fn epsg(code: i32) -> Self {
        Self::new(EPSG, code.to_string())
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.codespace, self.code)
    }
}

/// Properties shared by every referencing object.
pub trait IdentifiedObject {
    /// Primary name.
    fn name(&self) -> &str;

    /// Alternative names, possibly empty.
    fn aliases(&self) -> &[String];

    /// Authority identifiers, possibly empty.
    fn identifiers(&self) -> &[Identifier];

    fn remarks(&self) -> Option<&str> {
        None
    }

    /// Whether the authority has deprecated this object.
    fn is_deprecated(&self) -> bool {
        false
    }
}

/// Property bag given to constructive factories.
///
/// Only `name` is mandatory; the other properties are echoed back by a
/// conforming implementation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Properties {
    pub name: String,
    pub aliases: Vec<String>,
    pub identifiers: Vec<Identifier>,
    pub remarks: Option<String>,
}

impl Properties {
    /// Properties carrying only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    #[must_use]
    pub fn with_identifier(mut self, identifier: Identifier) -> Self {
        self.identifiers.push(identifier);
        self
    }

    #[must_use]
    pub fn with_remarks(mut self, remarks: impl Into<String>) -> Self {
        self.remarks = Some(remarks.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epsg_identifier_display() {
        let id = Identifier::epsg(4326);
        assert_eq!(id.to_string(), "EPSG:4326");
        assert_eq!(id.codespace, EPSG);
        assert_eq!(id.version, None);
    }

    #[test]
    fn properties_builder() {
        let props = Properties::named("GIGS ellipsoid A")
            .with_alias("WGS 84")
            .with_identifier(Identifier::new("GIGS", "67030"))
            .with_remarks("test");
        assert_eq!(props.name, "GIGS ellipsoid A");
        assert_eq!(props.aliases, vec!["WGS 84".to_owned()]);
        assert_eq!(props.identifiers[0].to_string(), "GIGS:67030");
        assert_eq!(props.remarks.as_deref(), Some("test"));
    }
}
