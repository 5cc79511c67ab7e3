//! Property-based tests for explanation generation
//!
//! Tests invariants:
//! - No `{...}` placeholder survives for records with brace-free fields
//! - Both audiences always see the error code
//! - Generation is a pure function of the record

use proptest::prelude::*;

use crate::core::catalog::{Category, Severity};
use crate::core::explain::{explain, PLACEHOLDERS};
use crate::tests::common::make_described_record;

fn text() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9 .,'-]{0,40}"
}

proptest! {
    /// Property: Substitution leaves no placeholder behind
    #[test]
    fn prop_no_placeholder_survives(
        code in "[A-Z]{2}[0-9]{2}",
        name in text(),
        short in text(),
        detailed in text(),
        cause in text(),
        fix in text(),
        category in proptest::sample::select(Category::ALL.to_vec()),
        severity in proptest::sample::select(Severity::ALL.to_vec()),
    ) {
        let mut record = make_described_record(&code, &name, &short, &detailed, &cause, &fix);
        record.category = category;
        record.severity = severity;

        let explanation = explain(&record);

        for text in [&explanation.for_operations, &explanation.for_developers] {
            for placeholder in PLACEHOLDERS {
                prop_assert!(!text.contains(placeholder), "{} left in {:?}", placeholder, text);
            }
            prop_assert!(!text.contains('{'), "unexpanded brace in {:?}", text);
            prop_assert!(text.contains(&code));
        }
    }

    /// Property: The same record always yields the same text
    #[test]
    fn prop_explanation_is_deterministic(
        code in "[A-Z]{2}[0-9]{2}",
        name in text(),
        category in proptest::sample::select(Category::ALL.to_vec()),
    ) {
        let mut record = make_described_record(&code, &name, "", "", "", "");
        record.category = category;

        prop_assert_eq!(explain(&record), explain(&record));
    }
}
