//! Fuzz target for the streaming input parser.
//!
//! Arbitrary terminal bytes, split into arbitrary reads, must never panic,
//! and every decoded event must consume at least one byte.

#![no_main]

use emojipick::input::{InputParser, ParseError};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|chunks: Vec<Vec<u8>>| {
    let mut parser = InputParser::new();
    for chunk in &chunks {
        let _ = parser.feed(chunk);
    }
    let _ = parser.flush();

    let data: Vec<u8> = chunks.concat();
    let mut remaining = data.as_slice();
    while !remaining.is_empty() {
        match parser.parse(remaining) {
            Ok((_, consumed)) => {
                assert!(consumed > 0 && consumed <= remaining.len());
                remaining = &remaining[consumed..];
            }
            Err(ParseError::Unrecognized(len)) => {
                remaining = &remaining[len.clamp(1, remaining.len())..];
            }
            Err(_) => break,
        }
    }
});
