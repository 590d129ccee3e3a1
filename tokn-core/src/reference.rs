//! Reference syntax
//!
//! A reference is any non-empty text wrapped in braces: `{Theme.Primary.Base}`. A value may hold
//! several references mixed with literal text (`{Spacing.Md} {Spacing.Lg}`).

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::convert::Infallible;

pub(crate) static REFERENCE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^}]+)\}").unwrap());

/// Raw reference keys in order of appearance.
pub fn references(value: &str) -> Vec<&str> {
    REFERENCE_REGEX
        .captures_iter(value)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

/// The key of a value that is exactly one reference once trimmed, such as `" {Theme.Base} "`.
pub fn sole_reference(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    let caps = REFERENCE_REGEX.captures(trimmed)?;
    let whole = caps.get(0)?;
    if whole.start() == 0 && whole.end() == trimmed.len() {
        caps.get(1).map(|m| m.as_str())
    } else {
        None
    }
}

/// Replace every reference in `value` with the result of `replace`, stopping at the first error.
pub fn try_replace_references<E, F>(value: &str, mut replace: F) -> Result<String, E>
where
    F: FnMut(&str) -> Result<String, E>,
{
    let mut out = String::with_capacity(value.len());
    let mut last = 0;
    for caps in REFERENCE_REGEX.captures_iter(value) {
        let (whole, key) = split_captures(&caps);
        out.push_str(&value[last..whole.0]);
        out.push_str(&replace(key)?);
        last = whole.1;
    }
    out.push_str(&value[last..]);
    Ok(out)
}

/// Infallible form of [try_replace_references].
pub fn replace_references<F>(value: &str, mut replace: F) -> String
where
    F: FnMut(&str) -> String,
{
    match try_replace_references::<Infallible, _>(value, |key| Ok(replace(key))) {
        Ok(out) => out,
        Err(never) => match never {},
    }
}

fn split_captures<'h>(caps: &Captures<'h>) -> ((usize, usize), &'h str) {
    let whole = caps.get(0).map(|m| (m.start(), m.end())).unwrap_or_default();
    let key = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
    (whole, key)
}
