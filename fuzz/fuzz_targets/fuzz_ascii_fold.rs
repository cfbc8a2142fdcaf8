#![no_main]

//! Fuzz ASCII folding of object names.
//!
//! Folding must never panic, must be idempotent, and must leave plain
//! ASCII input untouched.

use gigs_harness::to_ascii;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(input) = std::str::from_utf8(data) else {
        return;
    };

    if input.len() > 4096 {
        return;
    }

    let folded = to_ascii(input);
    assert_eq!(to_ascii(&folded), folded);
    if input.is_ascii() {
        assert_eq!(folded, input);
    }
});
