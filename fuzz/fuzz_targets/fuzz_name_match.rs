#![no_main]

//! Fuzz name comparison.
//!
//! Comparison must never panic, and every name matches itself exactly.

use gigs_harness::{NameMatch, names_match};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    if input.len() > 4096 {
        return;
    }

    let (expected, actual) = input.split_once('\0').unwrap_or((input, input));
    let _ = names_match(expected, actual, NameMatch::Exact);
    let _ = names_match(expected, actual, NameMatch::Prefix);
    assert!(names_match(expected, expected, NameMatch::Exact));
});
