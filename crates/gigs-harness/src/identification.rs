//! Assertions on names, aliases and identifiers.
//!
//! Each assertion takes the [`ConfigurationKey`] controlling it so that a
//! failure can be attributed to the feature that was being checked. The
//! caller decides whether the key is enabled.

use gigs_error::{GigsError, Result};
use gigs_types::Identifier;
use tracing::{trace, warn};

use crate::ascii::{NameMatch, names_match, to_ascii};
use crate::configuration::ConfigurationKey;

/// Assert that `actual` matches the expected EPSG name.
///
/// # Errors
///
/// [`GigsError::Mismatch`] carrying the unfolded names.
pub fn assert_name_equals(
    key: ConfigurationKey,
    path: &str,
    expected: &str,
    actual: &str,
    mode: NameMatch,
) -> Result<()> {
    trace!(%key, path, expected, actual, "name check");
    if names_match(expected, actual, mode) {
        return Ok(());
    }
    warn!(%key, path, expected, actual, "name mismatch");
    Err(GigsError::mismatch(path, expected, actual))
}

/// Assert that every expected alias appears among `actual`.
///
/// Implementations may carry additional aliases; only inclusion is checked.
///
/// # Errors
///
/// [`GigsError::AliasNotFound`] naming the first missing alias.
pub fn assert_aliases_equal(
    key: ConfigurationKey,
    path: &str,
    expected: &[String],
    actual: &[String],
) -> Result<()> {
    for alias in expected {
        if !actual.iter().any(|a| names_match(alias, a, NameMatch::Exact)) {
            warn!(%key, path, alias = %alias, "alias not found");
            return Err(GigsError::AliasNotFound {
                path: path.to_owned(),
                alias: alias.clone(),
                actual: actual.iter().map(|a| to_ascii(a).into_owned()).collect(),
            });
        }
    }
    Ok(())
}

/// Assert that exactly one identifier of `codespace` carries `code`.
///
/// Codespaces are compared ignoring case and surrounding whitespace.
/// Identifiers of other codespaces are ignored.
///
/// # Errors
///
/// [`GigsError::MalformedIdentifier`] when a code of `codespace` is not an
/// integer, [`GigsError::IdentifierCount`] when zero or several identifiers
/// match.
pub fn assert_contains_code(
    key: ConfigurationKey,
    path: &str,
    codespace: &str,
    code: i32,
    identifiers: &[Identifier],
) -> Result<()> {
    let mut count = 0;
    for identifier in identifiers {
        if !identifier.codespace.trim().eq_ignore_ascii_case(codespace.trim()) {
            continue;
        }
        let parsed: i32 = identifier.code.trim().parse().map_err(|_| {
            warn!(%key, path, code = %identifier.code, "malformed identifier");
            GigsError::MalformedIdentifier {
                path: path.to_owned(),
                codespace: codespace.to_owned(),
                code: identifier.code.clone(),
            }
        })?;
        if parsed == code {
            count += 1;
        }
    }
    if count == 1 {
        return Ok(());
    }
    warn!(%key, path, code, count, "identifier count");
    Err(GigsError::IdentifierCount {
        path: path.to_owned(),
        codespace: codespace.to_owned(),
        code,
        count,
    })
}
