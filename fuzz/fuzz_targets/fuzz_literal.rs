//! Fuzz testing for the array literal scanner.
//!
//! This fuzz target drives parse_literal with arbitrary input to ensure the
//! scanner never panics, and round-trips rendered element sequences to ensure
//! parse(render(x)) == x for quoted rendering.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use sqlarray::array::literal::{parse_literal, render_literal};

#[derive(Debug, Arbitrary)]
enum LiteralInput {
    Raw(String),
    Elements(Vec<Option<String>>),
}

fuzz_target!(|input: LiteralInput| {
    match input {
        LiteralInput::Raw(text) => {
            // must never panic, errors are fine
            let _ = parse_literal(&text);
        }
        LiteralInput::Elements(elements) => {
            let refs: Vec<Option<&str>> = elements.iter().map(|e| e.as_deref()).collect();
            let rendered = render_literal(&refs, true);
            let parsed = parse_literal(&rendered)
                .expect("rendered literal must parse")
                .expect("rendered literal is never the absent array");
            assert_eq!(parsed, elements);
        }
    }
});
