//! Outcomes of a verification: lookups, verdicts and reports.

use std::fmt;

use gigs_error::{FailureKind, GigsError, Result};
use serde::{Deserialize, Serialize};

use crate::configuration::{ConfigurationKey, ConfigurationMap};

/// Result of asking a factory for the object under test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup<T> {
    Found(T),
    /// The factory does not know the code.
    Unsupported { authority: String, code: String },
}

impl<T> Lookup<T> {
    pub fn found(self) -> Option<T> {
        match self {
            Self::Found(value) => Some(value),
            Self::Unsupported { .. } => None,
        }
    }

    pub const fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Why a verification was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum SkipReason {
    /// The implementation does not support this code.
    UnsupportedCode { authority: String, code: String },
    /// No factory was supplied for a required role.
    FactoryAbsent { role: ConfigurationKey },
    /// The object is deprecated and deprecated-object creation is disabled.
    DeprecatedObject { code: i32 },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnsupportedCode { authority, code } => write!(f, "unsupported code {authority}:{code}"),
            Self::FactoryAbsent { role } => write!(f, "no {role} supplied"),
            Self::DeprecatedObject { code } => write!(f, "EPSG:{code} is deprecated"),
        }
    }
}

/// Non-failing outcome of a verification. Failures are `Err(GigsError)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Passed,
    Skipped(SkipReason),
}

impl Verdict {
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    pub const fn skip_reason(&self) -> Option<&SkipReason> {
        match self {
            Self::Passed => None,
            Self::Skipped(reason) => Some(reason),
        }
    }
}

/// Outcome as recorded in a [`TestReport`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum ReportOutcome {
    Passed,
    Skipped {
        #[serde(flatten)]
        reason: SkipReason,
    },
    Failed {
        kind: FailureKind,
        message: String,
        path: Option<String>,
    },
}

/// Serializable record of one verification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestReport {
    pub test: String,
    #[serde(rename = "epsg_code")]
    pub code: Option<i32>,
    #[serde(flatten)]
    pub outcome: ReportOutcome,
    pub configuration: Option<ConfigurationMap>,
}

impl TestReport {
    /// Build a report from the result of a verification.
    pub fn from_result(
        test: impl Into<String>,
        code: Option<i32>,
        result: &Result<Verdict>,
        configuration: Option<ConfigurationMap>,
    ) -> Self {
        let outcome = match result {
            Ok(Verdict::Passed) => ReportOutcome::Passed,
            Ok(Verdict::Skipped(reason)) => ReportOutcome::Skipped {
                reason: reason.clone(),
            },
            Err(e) => ReportOutcome::Failed {
                kind: e.kind(),
                message: e.to_string(),
                path: e.path().map(ToOwned::to_owned),
            },
        };
        Self {
            test: test.into(),
            code,
            outcome,
            configuration,
        }
    }

    pub const fn is_failure(&self) -> bool {
        matches!(self.outcome, ReportOutcome::Failed { .. })
    }

    /// Render as a single JSON line.
    ///
    /// # Errors
    ///
    /// [`GigsError::Internal`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).map_err(|e| GigsError::internal(format!("report serialization: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configuration::{TestConfiguration, TestEnvironment};

    #[test]
    fn lookup_accessors() {
        assert_eq!(Lookup::Found(3).found(), Some(3));
        let missing: Lookup<i32> = Lookup::Unsupported {
            authority: "EPSG".to_owned(),
            code: "1".to_owned(),
        };
        assert!(!missing.is_found());
        assert_eq!(missing.found(), None);
    }

    #[test]
    fn failed_report_carries_kind_and_path() {
        let err = GigsError::mismatch("GeodeticCRS.coordinate_system().axis(*).direction()", "[north, east]", "[east, north]");
        let report = TestReport::from_result("geodetic_crs", Some(4326), &Err(err), None);
        assert!(report.is_failure());
        match &report.outcome {
            ReportOutcome::Failed { kind, path, .. } => {
                assert_eq!(*kind, FailureKind::Failure);
                assert_eq!(path.as_deref(), Some("GeodeticCRS.coordinate_system().axis(*).direction()"));
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[test]
    fn skipped_report_serializes_reason() {
        let verdict = Verdict::Skipped(SkipReason::FactoryAbsent {
            role: ConfigurationKey::CrsFactory,
        });
        let config = TestConfiguration::resolved(&TestEnvironment::default()).snapshot().unwrap();
        let report = TestReport::from_result("user_vertical_crs", None, &Ok(verdict), Some(config));
        let json = report.to_json().unwrap();
        assert!(json.contains("\"outcome\":\"skipped\""), "{json}");
        assert!(json.contains("\"reason\":\"factory_absent\""), "{json}");
        assert!(json.contains("\"role\":\"crs_factory\""), "{json}");
        let back: TestReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
