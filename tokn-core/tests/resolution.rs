//! End-to-end resolution over parsed token documents

use rstest::rstest;
use tokn_core::quoting::{quote, should_quote_alias};
use tokn_core::{
    naming, parse_document, resolve_alias, AliasValue, ReferenceIndex, ResolutionCache,
    ResolveError, TokenEntry,
};

const SHORT_ROOTS: &[&str] = &["Foundations", "Theme", "Spacing"];

fn load(source: &str) -> Vec<TokenEntry> {
    parse_document(source).expect("document to parse")
}

fn find<'a>(tokens: &'a [TokenEntry], dotted: &str) -> &'a TokenEntry {
    tokens
        .iter()
        .find(|t| t.dotted_path() == dotted)
        .unwrap_or_else(|| panic!("token {} not found", dotted))
}

const PALETTE: &str = r##"{
    "Foundations": {
        "Blue": { "500": { "$value": "#335CFF", "$type": "color" } },
        "Font": { "Sans": { "$value": "Inter Display", "$type": "fontFamilies" } }
    },
    "Theme": {
        "Primary": { "$value": "{Blue.500}", "$type": "color" },
        "Focus": { "$value": "{Theme.Primary}" },
        "Ring": { "$value": "0 0 0 2px {Theme.Focus}" },
        "Heading": { "$value": "{Font.Sans}", "$type": "fontFamilies" }
    },
    "Spacing": { "Small": { "$value": "4", "$type": "spacing" } }
}"##;

#[test]
fn test_reference_free_values_share_one_literal() {
    let tokens = load(PALETTE);
    let index = ReferenceIndex::build(&tokens, SHORT_ROOTS);
    let mut cache = ResolutionCache::new();

    for dotted in ["Foundations.Blue.500", "Foundations.Font.Sans", "Spacing.Small"] {
        let token = find(&tokens, dotted);
        let raw = token.value.to_string();
        let literal = cache.resolve(token, &index).unwrap().to_string();
        assert_eq!(literal, raw);

        let alias = resolve_alias(token, &index).unwrap();
        let expected = if should_quote_alias(&raw, token.type_tag()) {
            quote(&raw)
        } else {
            raw.clone()
        };
        assert_eq!(alias, AliasValue::Literal(expected));
    }
}

#[rstest]
#[case("Theme.Primary", "Foundations.Blue.500")]
#[case("Theme.Focus", "Theme.Primary")]
#[case("Theme.Heading", "Foundations.Font.Sans")]
fn test_whole_value_reference_becomes_alias(#[case] alias: &str, #[case] target: &str) {
    let tokens = load(PALETTE);
    let index = ReferenceIndex::build(&tokens, SHORT_ROOTS);
    let mut cache = ResolutionCache::new();

    let alias_token = find(&tokens, alias);
    let target_token = find(&tokens, target);

    assert_eq!(
        resolve_alias(alias_token, &index).unwrap(),
        AliasValue::Alias(naming::alias_variable(&target_token.path))
    );
    assert_eq!(
        cache.resolve(alias_token, &index).unwrap(),
        cache.resolve(target_token, &index).unwrap()
    );
}

#[test]
fn test_transitive_literal_resolution() {
    let tokens = load(PALETTE);
    let index = ReferenceIndex::build(&tokens, SHORT_ROOTS);
    let mut cache = ResolutionCache::new();

    let ring = find(&tokens, "Theme.Ring");
    assert_eq!(cache.resolve(ring, &index).unwrap().to_string(), "0 0 0 2px #335CFF");
    assert_eq!(
        resolve_alias(ring, &index).unwrap().as_str(),
        r#""0 0 0 2px #{$focus}""#
    );
}

#[test]
fn test_two_token_cycle_fails_with_a_path() {
    let tokens = load(r#"{ "Theme": { "A": { "$value": "{Theme.B}" }, "B": { "$value": "{Theme.A}" } } }"#);
    let index = ReferenceIndex::build(&tokens, SHORT_ROOTS);
    let mut cache = ResolutionCache::new();

    for token in &tokens {
        match cache.resolve(token, &index) {
            Err(ResolveError::Circular { path }) => {
                assert!(path == "Theme.A" || path == "Theme.B", "unexpected path {}", path)
            }
            other => panic!("expected a circular reference error, got {:?}", other),
        }
    }
}

/// `{ "Theme": { "T0": ..., "T1": ..., ... } }` where `T{i}` refers to `target(i)`.
fn chain_document(len: usize, target: impl Fn(usize) -> Option<usize>) -> String {
    let mut source = String::from(r#"{ "Theme": {"#);
    for i in 0..len {
        if i > 0 {
            source.push(',');
        }
        let value = match target(i) {
            Some(next) => format!("{{Theme.T{}}}", next),
            None => "4px".to_string(),
        };
        source.push_str(&format!(r#""T{}": {{ "$value": "{}" }}"#, i, value));
    }
    source.push_str("} }");
    source
}

#[test]
fn test_long_cycle_terminates() {
    let len = 10_000;
    let tokens = load(&chain_document(len, |i| Some((i + 1) % len)));
    let index = ReferenceIndex::build(&tokens, SHORT_ROOTS);
    let err = ResolutionCache::new().resolve(&tokens[0], &index).unwrap_err();
    assert_eq!(
        err,
        ResolveError::Circular {
            path: "Theme.T0".into()
        }
    );
}

#[test]
fn test_long_chain_resolves() {
    let len = 20_000;
    let tokens = load(&chain_document(len, |i| (i + 1 < len).then_some(i + 1)));
    let index = ReferenceIndex::build(&tokens, SHORT_ROOTS);
    let mut cache = ResolutionCache::new();

    assert_eq!(cache.resolve(&tokens[0], &index).unwrap().to_string(), "4px");
    assert_eq!(cache.len(), len);
    assert_eq!(
        cache.resolve(&tokens[len / 2], &index).unwrap().to_string(),
        "4px"
    );
    assert_eq!(cache.hits(), 1);
}

#[test]
fn test_missing_key_names_the_reference() {
    let tokens = load(r#"{ "Theme": { "A": { "$value": "1px {Spacing.Huge}" } } }"#);
    let index = ReferenceIndex::build(&tokens, SHORT_ROOTS);

    let expected = ResolveError::Unresolvable {
        reference: "Spacing.Huge".into(),
    };
    assert_eq!(resolve_alias(&tokens[0], &index).unwrap_err(), expected);
    assert_eq!(
        ResolutionCache::new().resolve(&tokens[0], &index).unwrap_err(),
        expected
    );
}

#[rstest]
#[case("spacing.small", true)]
#[case("small", true)]
#[case("SMALL", true)]
#[case("tokens/light.bg", true)]
#[case("bg", false)]
fn test_short_key_lookup(#[case] key: &str, #[case] found: bool) {
    let tokens = load(
        r##"{ "Spacing": { "Small": { "$value": "4" } },
             "Tokens/Light": { "Bg": { "$value": "#fff" } } }"##,
    );
    let index = ReferenceIndex::build(&tokens, SHORT_ROOTS);
    assert_eq!(index.contains(key), found);
}
