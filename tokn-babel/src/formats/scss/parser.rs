//! Alias-format reader
//!
//!     Reads emitted alias-preserving text (typically the `_all` concatenation) back into a
//!     [TokenCatalog]. Every trimmed line is classified first, then a two-state machine (current
//!     section, current group) consumes the classified lines:
//!
//!     | line                                     | class          | effect                       |
//!     |------------------------------------------|----------------|------------------------------|
//!     | empty                                    | Blank          | none                         |
//!     | `// <banner> - Title (SCSS)`             | SectionHeader  | section = Title, group reset |
//!     | `// <banner>...` otherwise               | Banner         | none                         |
//!     | `// words` without digits                | GroupHeader    | group = Words                |
//!     | `// ...` with digits (timestamps, notes) | Comment        | none                         |
//!     | `$name: value;`                          | Declaration    | entry added                  |
//!     | anything else                            | Other          | none                         |
//!
//!     The reader is best-effort and never fails: a declaration whose alias cannot be resolved
//!     keeps the alias text as its value, and a self-referencing chain stops at the repeated name.

use crate::catalog::{CatalogEntry, TokenCatalog};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::{HashMap, HashSet};

static GROUP_HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^//\s*([^/].*)$").unwrap());
static DECLARATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\$([A-Za-z0-9_]+):\s*(.+);$").unwrap());
static DIRECT_ALIAS: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\$([A-Za-z0-9_]+)$").unwrap());
static INTERPOLATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#\{\$([A-Za-z0-9_]+)\}").unwrap());
static VARIABLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\$([A-Za-z0-9_]+)").unwrap());

const DEFAULT_SECTION: &str = "Uncategorized";
const DEFAULT_GROUP: &str = "General";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line<'a> {
    Blank,
    SectionHeader(&'a str),
    Banner,
    GroupHeader(&'a str),
    Comment,
    Declaration { name: &'a str, raw: &'a str },
    Other,
}

/// Classifies single lines for one banner.
pub struct LineClassifier {
    banner_prefix: String,
    section_header: Regex,
}

impl LineClassifier {
    pub fn new(banner: &str) -> Self {
        let pattern = format!(
            r"(?i)^// {} -\s+(.+?)(?:\s*\(SCSS\))?$",
            regex::escape(banner)
        );
        Self {
            banner_prefix: format!("// {}", banner),
            // The banner is escaped, so the pattern is always valid.
            section_header: Regex::new(&pattern).unwrap(),
        }
    }

    pub fn classify<'a>(&self, line: &'a str) -> Line<'a> {
        let line = line.trim();
        if line.is_empty() {
            return Line::Blank;
        }

        if line.starts_with("//") {
            if let Some(title) = capture(&self.section_header, line) {
                return Line::SectionHeader(title.trim());
            }
            if line.starts_with(&self.banner_prefix) {
                return Line::Banner;
            }
            return match capture(&GROUP_HEADER, line).map(str::trim) {
                Some(candidate) if is_group_header(candidate) => Line::GroupHeader(candidate),
                _ => Line::Comment,
            };
        }

        match DECLARATION.captures(line) {
            Some(caps) => match (caps.get(1), caps.get(2)) {
                (Some(name), Some(raw)) => Line::Declaration {
                    name: name.as_str(),
                    raw: raw.as_str().trim(),
                },
                _ => Line::Other,
            },
            None => Line::Other,
        }
    }
}

fn capture<'a>(regex: &Regex, line: &'a str) -> Option<&'a str> {
    regex
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Comment text counts as a group header unless it is empty or contains a digit.
fn is_group_header(candidate: &str) -> bool {
    !candidate.is_empty() && !candidate.chars().any(|c| c.is_ascii_digit())
}

/// Capitalize the first letter of every whitespace-separated word.
pub fn title_case(value: &str) -> String {
    value
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Raw declarations seen so far and their memoized resolutions.
#[derive(Default)]
struct ValueStore {
    raw: HashMap<String, String>,
    resolved: HashMap<String, String>,
}

impl ValueStore {
    fn set_raw(&mut self, name: &str, raw: &str) {
        self.raw.insert(name.to_string(), raw.to_string());
        self.resolved.remove(name);
    }

    fn resolve(&mut self, name: &str, seen: &mut HashSet<String>) -> String {
        if let Some(done) = self.resolved.get(name) {
            return done.clone();
        }
        let raw = match self.raw.get(name) {
            Some(raw) if !raw.is_empty() => raw.clone(),
            _ => return format!("${}", name),
        };
        if !seen.insert(name.to_string()) {
            return format!("${}", name);
        }

        let resolved = self.resolve_value(&raw, name, seen);
        self.resolved.insert(name.to_string(), resolved.clone());
        resolved
    }

    fn resolve_value(&mut self, value: &str, name: &str, seen: &mut HashSet<String>) -> String {
        let trimmed = value.trim();
        if let Some(alias) = capture(&DIRECT_ALIAS, trimmed) {
            return self.resolve(alias, seen);
        }

        let interpolated = INTERPOLATION
            .replace_all(trimmed, |caps: &Captures| self.resolve(&caps[1], seen))
            .into_owned();
        VARIABLE
            .replace_all(&interpolated, |caps: &Captures| {
                if &caps[1] == name {
                    caps[0].to_string()
                } else {
                    self.resolve(&caps[1], seen)
                }
            })
            .into_owned()
    }
}

/// Read alias-format text into a catalog.
pub fn read_catalog(source: &str, banner: &str) -> TokenCatalog {
    let classifier = LineClassifier::new(banner);
    let mut store = ValueStore::default();
    let mut catalog = TokenCatalog::default();
    let mut section = DEFAULT_SECTION.to_string();
    let mut group = DEFAULT_GROUP.to_string();

    for line in source.lines() {
        match classifier.classify(line) {
            Line::SectionHeader(title) => {
                section = title_case(title);
                group = DEFAULT_GROUP.to_string();
            }
            Line::GroupHeader(name) => group = title_case(name),
            Line::Declaration { name, raw } => {
                store.set_raw(name, raw);
                let value = store.resolve(name, &mut HashSet::new());
                catalog.push(CatalogEntry {
                    section: section.clone(),
                    group: group.clone(),
                    name: name.to_string(),
                    variable: format!("${}", name),
                    value,
                    raw_value: raw.to_string(),
                });
            }
            Line::Blank | Line::Banner | Line::Comment | Line::Other => {}
        }
    }

    catalog
}
