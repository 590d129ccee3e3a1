//! Name derivation
//!
//!     Every token gets two identifiers derived from its path alone:
//!
//!     - camel form, used by the alias-preserving format: `$bgWeak50`
//!     - kebab form, used by the flattened format: `--bg-weak-50`
//!
//!     The root segment is dropped (unless it is the only segment). Each remaining segment is
//!     split into words on `/`, whitespace, `_` and `-`, and before an uppercase letter that
//!     follows a lowercase letter or digit. Non-alphanumeric characters are stripped and empty
//!     words discarded. An empty word list falls back to the single word `token`.
//!
//!     Identifiers must not start with a digit: camel names get an `n` prefix (`n2xl`) and kebab
//!     names an `n-` prefix (`n-2xl`).
//!
//!     Derivation is a pure function of the path, so the two output formats always agree on
//!     which token a name refers to.

/// Both identifier forms of a token path. Neither carries its sigil (`$` / `--`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DerivedNames {
    pub camel: String,
    pub kebab: String,
}

impl DerivedNames {
    /// The alias-preserving variable, e.g. `$bgWeak50`.
    pub fn alias_variable(&self) -> String {
        format!("${}", self.camel)
    }

    /// The flattened custom property, e.g. `--bg-weak-50`.
    pub fn flat_property(&self) -> String {
        format!("--{}", self.kebab)
    }
}

const FALLBACK_WORD: &str = "token";

/// Derive both identifier forms for `path`.
pub fn derive<S: AsRef<str>>(path: &[S]) -> DerivedNames {
    let words = path_words(path);
    DerivedNames {
        camel: guard_leading_digit(camel_case(&words), "n"),
        kebab: guard_leading_digit(kebab_case(&words), "n-"),
    }
}

/// Shortcut for `derive(path).alias_variable()`.
pub fn alias_variable<S: AsRef<str>>(path: &[S]) -> String {
    derive(path).alias_variable()
}

/// Shortcut for `derive(path).flat_property()`.
pub fn flat_property<S: AsRef<str>>(path: &[S]) -> String {
    derive(path).flat_property()
}

fn path_words<S: AsRef<str>>(path: &[S]) -> Vec<String> {
    let significant = if path.len() <= 1 { path } else { &path[1..] };
    let words: Vec<String> = significant
        .iter()
        .flat_map(|segment| segment_words(segment.as_ref()))
        .collect();
    if words.is_empty() {
        vec![FALLBACK_WORD.to_string()]
    } else {
        words
    }
}

/// Split one path segment into cleaned words.
pub fn segment_words(segment: &str) -> Vec<String> {
    segment
        .split(|c: char| c == '/' || c == '_' || c == '-' || c.is_whitespace())
        .flat_map(split_case_boundaries)
        .map(|part| {
            part.chars()
                .filter(char::is_ascii_alphanumeric)
                .collect::<String>()
        })
        .filter(|word| !word.is_empty())
        .collect()
}

/// Split before an uppercase ASCII letter preceded by a lowercase letter or digit.
fn split_case_boundaries(part: &str) -> Vec<&str> {
    let mut pieces = Vec::new();
    let mut start = 0;
    let mut prev: Option<char> = None;
    for (idx, c) in part.char_indices() {
        if let Some(p) = prev {
            if c.is_ascii_uppercase() && (p.is_ascii_lowercase() || p.is_ascii_digit()) {
                pieces.push(&part[start..idx]);
                start = idx;
            }
        }
        prev = Some(c);
    }
    pieces.push(&part[start..]);
    pieces
}

fn camel_case(words: &[String]) -> String {
    let mut out = String::new();
    for (index, word) in words.iter().enumerate() {
        let lower = word.to_ascii_lowercase();
        if index == 0 {
            out.push_str(&lower);
            continue;
        }
        let mut chars = lower.chars();
        if let Some(first) = chars.next() {
            out.push(first.to_ascii_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

fn kebab_case(words: &[String]) -> String {
    words
        .iter()
        .map(|word| word.to_ascii_lowercase())
        .collect::<Vec<_>>()
        .join("-")
}

fn guard_leading_digit(name: String, prefix: &str) -> String {
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        format!("{}{}", prefix, name)
    } else {
        name
    }
}
