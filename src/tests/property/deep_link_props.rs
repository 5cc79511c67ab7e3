//! Property-based tests for deep link parsing
//!
//! Tests invariants:
//! - Bare codes, fragments, routes, and full URLs all yield the code
//! - `route_for` output parses back to the upper-cased code
//! - Codes with punctuation are rejected

use proptest::prelude::*;

use crate::core::deep_link::{parse, route_for};

fn arb_code() -> impl Strategy<Value = String> {
    "[A-Za-z0-9]{1,16}"
}

proptest! {
    /// Property: Every accepted link form points at the same code
    #[test]
    fn prop_link_forms_yield_code(code in arb_code(), form in 0u8..5) {
        let link = match form {
            0 => code.clone(),
            1 => format!("#{code}"),
            2 => format!("/error/{code}"),
            3 => format!("https://guide.example.com/error/{code}?ref=mail"),
            _ => format!("https://guide.example.com/#/error/{code}"),
        };

        prop_assert_eq!(parse(&link), Some(code));
    }

    /// Property: Routes round-trip through the parser
    #[test]
    fn prop_route_parses_back(code in arb_code()) {
        prop_assert_eq!(parse(&route_for(&code)), Some(code.to_uppercase()));
    }

    /// Property: Surrounding whitespace is ignored
    #[test]
    fn prop_whitespace_is_trimmed(code in arb_code(), pad in "[ \t]{0,3}") {
        let padded = format!("{pad}{code}{pad}");

        prop_assert_eq!(parse(&padded), Some(code));
    }

    /// Property: A code with punctuation is never accepted
    #[test]
    fn prop_punctuated_code_rejected(
        head in "[A-Z]{1,4}",
        sep in "[-_.!@$%]",
        tail in "[0-9]{1,4}",
    ) {
        let code = format!("{head}{sep}{tail}");

        prop_assert_eq!(parse(&code), None);
    }
}
