//! Property-based tests for name derivation and key normalization
//!
//! Derived identifiers must be deterministic, never empty, never start with a digit and only
//! contain identifier-safe characters, whatever the authoring of the path looks like.

use proptest::prelude::*;
use tokn_core::{derive, normalize_reference_key};

fn segment_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z][a-zA-Z0-9]{0,10}",
        "[0-9]{1,3}[A-Za-z]{0,4}",
        "[A-Za-z0-9 _/-]{0,12}",
        "[a-z]+[A-Z][a-z]+",
        ".{0,8}",
    ]
}

fn path_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(segment_strategy(), 1..5)
}

proptest! {
    #[test]
    fn derivation_is_deterministic(path in path_strategy()) {
        prop_assert_eq!(derive(&path), derive(&path));
    }

    #[test]
    fn identifiers_are_safe(path in path_strategy()) {
        let names = derive(&path);
        prop_assert!(!names.camel.is_empty());
        prop_assert!(!names.kebab.is_empty());
        prop_assert!(!names.camel.starts_with(|c: char| c.is_ascii_digit()));
        prop_assert!(!names.kebab.starts_with(|c: char| c.is_ascii_digit()));
        prop_assert!(names.camel.chars().all(|c| c.is_ascii_alphanumeric()));
        prop_assert!(names.kebab.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'));
        prop_assert!(!names.kebab.contains("--"));
    }

    #[test]
    fn both_forms_agree_on_words(path in path_strategy()) {
        let names = derive(&path);
        let kebab_letters: String = names.kebab.chars().filter(|c| *c != '-').collect();
        prop_assert_eq!(names.camel.to_ascii_lowercase(), kebab_letters);
    }

    #[test]
    fn normalization_is_idempotent(key in "[ -~\t]{0,24}") {
        let once = normalize_reference_key(&key);
        prop_assert_eq!(normalize_reference_key(&once), once.clone());
    }
}
