//! Property-based tests for reference guide lookup
//!
//! Tests invariants:
//! - Case and version suffixes never change which guide a tag opens
//! - Any tag in a catalog either resolves or is reported
//! - Every code with a known prefix maps to a family listing that prefix

use proptest::prelude::*;

use crate::core::catalog::{Catalog, Category, Severity};
use crate::core::guides::{
    family_guide_for_code, message_guide, unresolved_message_types, FAMILY_GUIDES, MESSAGE_GUIDES,
};
use crate::tests::common::make_record;

fn arb_guide_id() -> impl Strategy<Value = &'static str> {
    prop::sample::select(MESSAGE_GUIDES.iter().map(|g| g.id).collect::<Vec<_>>())
}

fn arb_tag() -> impl Strategy<Value = String> {
    prop_oneof![
        arb_guide_id().prop_map(str::to_string),
        "(pacs|camt|pain)\\.0[0-9]{2}(\\.001\\.[0-9]{2})?",
    ]
}

proptest! {
    /// Property: Upper-casing and version suffixes open the same guide
    #[test]
    fn prop_tag_variants_open_same_guide(
        id in arb_guide_id(),
        upper in any::<bool>(),
        version in prop::option::of("[0-9]{3}\\.[0-9]{2}"),
    ) {
        let mut tag = if upper { id.to_uppercase() } else { id.to_string() };
        if let Some(version) = version {
            tag = format!("{tag}.{version}");
        }

        prop_assert_eq!(message_guide(&tag).map(|g| g.id), Some(id));
    }

    /// Property: Each tag is either resolvable or listed as unresolved
    #[test]
    fn prop_tags_resolve_or_are_reported(tags in prop::collection::vec(arb_tag(), 0..6)) {
        let mut record = make_record("ZZ01", "Tagged", Category::Other, Severity::Fatal);
        record.message_types = tags.clone();
        let catalog = Catalog::from_records(vec![record]).unwrap();
        let unresolved = unresolved_message_types(&catalog);

        let expected: Vec<&String> = tags.iter().filter(|t| message_guide(t).is_none()).collect();
        let reported: Vec<&String> = unresolved.iter().map(|u| &u.tag).collect();
        prop_assert_eq!(reported, expected);
    }

    /// Property: A prefix match names a family that lists the prefix
    #[test]
    fn prop_code_family_lists_prefix(code in "[A-Z]{2}[0-9]{2}") {
        if let Some(family) = family_guide_for_code(&code) {
            prop_assert!(family.prefixes.contains(&&code[..2]));
        } else {
            let prefix = &code[..2];
            prop_assert!(FAMILY_GUIDES.iter().all(|g| !g.prefixes.contains(&prefix)));
        }
    }
}
