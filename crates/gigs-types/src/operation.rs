use std::fmt;

use serde::{Deserialize, Serialize};

use crate::IdentifiedObject;
use crate::parameter::ParameterValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationKind {
    /// Operation whose parameters are defined rather than measured.
    Conversion,
    /// Operation between two datums; carries accuracy and version.
    Transformation,
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Conversion => "conversion",
            Self::Transformation => "transformation",
        })
    }
}

/// A coordinate conversion or transformation.
pub trait CoordinateOperation: IdentifiedObject {
    fn kind(&self) -> OperationKind;

    /// Name of the operation method, e.g. "Transverse Mercator".
    fn method_name(&self) -> &str;

    fn parameter_values(&self) -> &[ParameterValue];

    fn operation_version(&self) -> Option<&str> {
        None
    }
}
