use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error raised by a factory of the referencing library under test.
///
/// The harness never constructs these for its own failures; they are the
/// vocabulary external factories use to report why an object could not be
/// produced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FactoryError {
    /// The authority factory does not know the requested code.
    #[error("no such authority code: {authority}:{code}")]
    NoSuchAuthorityCode { authority: String, code: String },

    /// The arguments given to a constructive factory are inconsistent.
    #[error("invalid factory arguments: {0}")]
    InvalidArguments(String),

    /// The factory does not implement the requested kind of object.
    #[error("unsupported factory operation: {0}")]
    Unsupported(String),

    /// Any other failure inside the factory.
    #[error("factory failure: {0}")]
    Failure(String),
}

impl FactoryError {
    /// Create a no-such-code error.
    pub fn no_such_code(authority: impl Into<String>, code: impl Into<String>) -> Self {
        Self::NoSuchAuthorityCode {
            authority: authority.into(),
            code: code.into(),
        }
    }

    /// Create an invalid-arguments error.
    pub fn invalid(detail: impl Into<String>) -> Self {
        Self::InvalidArguments(detail.into())
    }
}

/// Primary error type for the conformance harness.
///
/// Every variant propagates straight to the enclosing test. The harness
/// performs no retries; see [`GigsError::kind`] for how a report classifies
/// each variant.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GigsError {
    // === Collaborator errors ===
    /// A factory of the library under test failed.
    #[error(transparent)]
    Factory(#[from] FactoryError),

    /// The validators collaborator rejected an object.
    #[error("{path}: inconsistent object: {detail}")]
    Validation { path: String, detail: String },

    // === Structural mismatches ===
    /// A property differs from the expected EPSG value.
    #[error("{path}: expected <{expected}> but was <{actual}>")]
    Mismatch {
        path: String,
        expected: String,
        actual: String,
    },

    /// An expected alias is absent from the object's alias collection.
    #[error("{path}: alias \"{alias}\" not found in {actual:?}")]
    AliasNotFound {
        path: String,
        alias: String,
        actual: Vec<String>,
    },

    /// The object does not carry exactly one identifier with the expected code.
    #[error("{path}: expected exactly one {codespace}:{code} identifier but found {count}")]
    IdentifierCount {
        path: String,
        codespace: String,
        code: i32,
        count: usize,
    },

    /// An identifier code in the expected codespace is not an integer.
    #[error("{path}: unparsable {codespace} code \"{code}\"")]
    MalformedIdentifier {
        path: String,
        codespace: String,
        code: String,
    },

    // === Parameter value errors ===
    /// A typed accessor was used on a value of another kind.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// The operation is not valid in the current state of the object.
    #[error("illegal state: {0}")]
    IllegalState(String),

    /// The operation is never supported by this type.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(String),

    /// A unit conversion was requested between incompatible units.
    #[error("cannot convert from {from} to {to}")]
    IncompatibleUnits { from: String, to: String },

    // === Programming errors ===
    /// A configuration key was written twice in one snapshot.
    #[error("duplicated configuration key: {key}")]
    ConfigurationConflict { key: String },

    /// Comparison flags were resolved a second time for the same test.
    #[error("configuration flags already resolved for this test")]
    FlagsAlreadyResolved,

    /// The reference tables have no entry for the requested code.
    #[error("no {table} entry for EPSG code {code}")]
    MissingTableEntry { table: &'static str, code: i32 },

    /// Internal logic error in the harness itself.
    #[error("internal error: {0}")]
    Internal(String),
}

/// How a report should classify an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The implementation does not provide the requested object.
    Unsupported,
    /// The implementation produced a wrong object or failed outright.
    Failure,
    /// The harness or the generated test is used incorrectly.
    ProgrammingError,
}

impl GigsError {
    /// Classify this error for reporting.
    #[allow(clippy::match_same_arms)]
    pub const fn kind(&self) -> FailureKind {
        match self {
            Self::Factory(FactoryError::NoSuchAuthorityCode { .. } | FactoryError::Unsupported(_)) => {
                FailureKind::Unsupported
            }
            Self::Factory(_)
            | Self::Validation { .. }
            | Self::Mismatch { .. }
            | Self::AliasNotFound { .. }
            | Self::IdentifierCount { .. }
            | Self::MalformedIdentifier { .. }
            | Self::TypeMismatch { .. }
            | Self::IllegalState(_)
            | Self::UnsupportedOperation(_)
            | Self::IncompatibleUnits { .. } => FailureKind::Failure,
            Self::ConfigurationConflict { .. }
            | Self::FlagsAlreadyResolved
            | Self::MissingTableEntry { .. }
            | Self::Internal(_) => FailureKind::ProgrammingError,
        }
    }

    /// Whether this error is a structural mismatch against expected EPSG data.
    pub const fn is_mismatch(&self) -> bool {
        matches!(
            self,
            Self::Mismatch { .. }
                | Self::AliasNotFound { .. }
                | Self::IdentifierCount { .. }
                | Self::MalformedIdentifier { .. }
        )
    }

    /// Dotted path of the mismatched property, when the error carries one.
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Validation { path, .. }
            | Self::Mismatch { path, .. }
            | Self::AliasNotFound { path, .. }
            | Self::IdentifierCount { path, .. }
            | Self::MalformedIdentifier { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Create a mismatch error.
    pub fn mismatch(
        path: impl Into<String>,
        expected: impl ToString,
        actual: impl ToString,
    ) -> Self {
        Self::Mismatch {
            path: path.into(),
            expected: expected.to_string(),
            actual: actual.to_string(),
        }
    }

    /// Create a type-mismatch error.
    pub fn type_mismatch(expected: impl Into<String>, actual: impl Into<String>) -> Self {
        Self::TypeMismatch {
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Create a validation error.
    pub fn validation(path: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Validation {
            path: path.into(),
            detail: detail.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}

/// Result type alias using `GigsError`.
pub type Result<T> = std::result::Result<T, GigsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mismatch_display_carries_path() {
        let err = GigsError::mismatch("GeodeticCRS.datum().identifiers()", 6326, 6258);
        assert_eq!(
            err.to_string(),
            "GeodeticCRS.datum().identifiers(): expected <6326> but was <6258>"
        );
        assert_eq!(err.path(), Some("GeodeticCRS.datum().identifiers()"));
        assert!(err.is_mismatch());
    }

    #[test]
    fn factory_error_is_transparent() {
        let err = GigsError::from(FactoryError::no_such_code("EPSG", "4326"));
        assert_eq!(err.to_string(), "no such authority code: EPSG:4326");
        assert_eq!(err.kind(), FailureKind::Unsupported);
    }

    #[test]
    fn identifier_count_display() {
        let err = GigsError::IdentifierCount {
            path: "Ellipsoid.identifiers()".to_owned(),
            codespace: "EPSG".to_owned(),
            code: 7030,
            count: 2,
        };
        assert_eq!(
            err.to_string(),
            "Ellipsoid.identifiers(): expected exactly one EPSG:7030 identifier but found 2"
        );
    }

    #[test]
    fn classification() {
        assert_eq!(
            GigsError::ConfigurationConflict {
                key: "standard_name_supported".to_owned()
            }
            .kind(),
            FailureKind::ProgrammingError
        );
        assert_eq!(
            GigsError::type_mismatch("double", "string").kind(),
            FailureKind::Failure
        );
        assert_eq!(
            GigsError::from(FactoryError::Failure("boom".to_owned())).kind(),
            FailureKind::Failure
        );
        assert!(!GigsError::FlagsAlreadyResolved.is_mismatch());
        assert_eq!(GigsError::internal("x").path(), None);
    }
}
