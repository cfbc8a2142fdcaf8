//! ASCII folding of object names.
//!
//! Implementations are free to render EPSG names with or without
//! diacritics, typographic quotes or compatibility glyphs. Names are
//! folded to ASCII before comparison so that `"Réseau"` matches
//! `"Reseau"` and `"30′"` matches `"30'"`.

use std::borrow::Cow;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Characters with no useful compatibility decomposition.
fn replacement(c: char) -> Option<&'static str> {
    Some(match c {
        '\u{2018}' | '\u{2019}' | '\u{201A}' | '\u{2032}' | '\u{02B9}' | '\u{02BC}' | '\u{00B4}' => "'",
        '\u{201C}' | '\u{201D}' | '\u{201E}' | '\u{2033}' | '\u{02BA}' => "\"",
        '\u{2010}' | '\u{2011}' | '\u{2012}' | '\u{2013}' | '\u{2014}' | '\u{2212}' => "-",
        'ß' => "ss",
        'æ' => "ae",
        'Æ' => "AE",
        'œ' => "oe",
        'Œ' => "OE",
        'ø' => "o",
        'Ø' => "O",
        'ł' => "l",
        'Ł' => "L",
        'đ' => "d",
        'Đ' => "D",
        'ı' => "i",
        _ => return None,
    })
}

/// Fold `text` to ASCII where a faithful ASCII rendering exists.
///
/// Diacritics are dropped, compatibility forms are expanded (`㎞` becomes
/// `km`), typographic quotes, dashes, minute and second marks become their
/// ASCII counterparts. Characters with no such rendering are kept. The
/// function is idempotent and borrows when `text` is already ASCII.
pub fn to_ascii(text: &str) -> Cow<'_, str> {
    if text.is_ascii() {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if c.is_ascii() {
            out.push(c);
        } else if let Some(rep) = replacement(c) {
            out.push_str(rep);
        } else {
            for d in std::iter::once(c).nfkd() {
                if is_combining_mark(d) {
                    continue;
                }
                match replacement(d) {
                    Some(rep) => out.push_str(rep),
                    None => out.push(d),
                }
            }
        }
    }
    Cow::Owned(out)
}

/// How an actual name is matched against the expected one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NameMatch {
    /// Whole names must be equal.
    #[default]
    Exact,
    /// The actual name may be a non-empty truncation of the expected one.
    Prefix,
}

fn lowercase_chars(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars().flat_map(char::to_lowercase)
}

/// Compare two names after folding both to ASCII, ignoring case.
pub fn names_match(expected: &str, actual: &str, mode: NameMatch) -> bool {
    let expected = to_ascii(expected.trim());
    let actual = to_ascii(actual.trim());
    match mode {
        NameMatch::Exact => lowercase_chars(&expected).eq(lowercase_chars(&actual)),
        NameMatch::Prefix => {
            if actual.is_empty() {
                return false;
            }
            let mut expected = lowercase_chars(&expected);
            lowercase_chars(&actual).all(|c| expected.next() == Some(c))
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn ascii_input_is_borrowed() {
        assert!(matches!(to_ascii("WGS 84"), Cow::Borrowed("WGS 84")));
    }

    #[test]
    fn strips_diacritics() {
        assert_eq!(to_ascii("Nouvelle Triangulation Française"), "Nouvelle Triangulation Francaise");
        assert_eq!(to_ascii("Réseau Géodésique"), "Reseau Geodesique");
        assert_eq!(to_ascii("Tananarive (Paris) / Laborde Grille"), "Tananarive (Paris) / Laborde Grille");
    }

    #[test]
    fn replaces_typographic_marks() {
        assert_eq!(to_ascii("30\u{2032} 15\u{2033}"), "30' 15\"");
        assert_eq!(to_ascii("\u{2018}x\u{2019}"), "'x'");
        assert_eq!(to_ascii("Amersfoort \u{2013} RD"), "Amersfoort - RD");
    }

    #[test]
    fn expands_compatibility_forms() {
        assert_eq!(to_ascii("10 \u{339E}"), "10 km");
        assert_eq!(to_ascii("m\u{00B2}"), "m2");
        assert_eq!(to_ascii("Stra\u{00DF}e"), "Strasse");
    }

    #[test]
    fn keeps_unfoldable_characters() {
        assert_eq!(to_ascii("Пулково"), "Пулково");
    }

    #[test]
    fn exact_match_ignores_case_and_accents() {
        assert!(names_match("NTF (Paris)", "ntf (paris)", NameMatch::Exact));
        assert!(names_match("Réunion 1947", "Reunion 1947", NameMatch::Exact));
        assert!(!names_match("WGS 84", "WGS 72", NameMatch::Exact));
        assert!(!names_match("WGS 84", "WGS 8", NameMatch::Exact));
    }

    #[test]
    fn prefix_match_accepts_truncation() {
        assert!(names_match("Transverse Mercator (South Orientated)", "Transverse Mercator", NameMatch::Prefix));
        assert!(names_match("WGS 84", "wgs 84", NameMatch::Prefix));
        assert!(!names_match("WGS 84", "WGS 84 / UTM", NameMatch::Prefix));
        assert!(!names_match("WGS 84", "", NameMatch::Prefix));
    }

    proptest! {
        #[test]
        fn folding_is_idempotent(text in "\\PC{0,24}") {
            let once = to_ascii(&text).into_owned();
            let twice = to_ascii(&once).into_owned();
            prop_assert_eq!(twice, once);
        }

        #[test]
        fn folded_name_matches_original(text in "[a-zA-Zàéîõüç ]{1,16}") {
            let folded = to_ascii(&text).into_owned();
            prop_assert!(names_match(&text, &folded, NameMatch::Exact));
        }
    }
}
