//! Number-prefix parsing for file and directory names.
//!
//! Content authors order entries manually by prefixing names with a number:
//! `01-intro.md`, `02-setup/`, `10 - Appendix/`. The prefix is used for
//! ordering only and never reaches a display label.
//!
//! The grammar is pluggable. The generator only depends on the
//! [`NumberPrefixParser`] contract; [`DefaultNumberPrefixParser`] implements the
//! usual `NN-name` convention and [`DisabledNumberPrefixParser`] turns the
//! feature off. Any `Fn(&str) -> ParsedName` closure also works.
//!
//! ## Default grammar
//!
//! - `"01-Intro"` → number=Some(1), name="Intro"
//! - `"10 - Appendix"` → number=Some(10), name="Appendix"
//! - `"1.5-setup"` → number=Some(1.5), name="setup"
//! - `"3.guide"` → number=Some(3), name="guide"
//! - `"007_agents"` → number=Some(7), name="agents"
//! - `"001"` → number=None, name="001" (a bare number is a name)
//! - `"2024-01-15-release"` → number=None (dates are not prefixes)
//! - `"1.2.3-notes"` → number=None (versions are not prefixes)

use regex::Regex;
use std::sync::LazyLock;

/// Result of parsing an entry name like `020-Getting-Started`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedName {
    /// Number prefix if present (e.g., `20` from `020-Getting-Started`,
    /// `1.5` from `1.5-setup`).
    pub number: Option<f64>,
    /// Name with the prefix and its separator removed.
    /// For unnumbered entries, this is the full input.
    pub name: String,
}

impl ParsedName {
    /// A name without any number prefix.
    pub fn unnumbered(name: &str) -> Self {
        Self {
            number: None,
            name: name.to_string(),
        }
    }
}

/// Strategy for splitting an ordering prefix off a file or directory name.
pub trait NumberPrefixParser {
    fn parse(&self, name: &str) -> ParsedName;
}

impl<F> NumberPrefixParser for F
where
    F: Fn(&str) -> ParsedName,
{
    fn parse(&self, name: &str) -> ParsedName {
        self(name)
    }
}

static NUMBER_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<number>\d+(?:\.\d+)?)(?:\s*[-_.]+\s*|\s+)(?P<name>[^-_.\s].*)$")
        .expect("number prefix pattern must compile")
});

// Dates (2024-01-15) and versions (1.2.3) look numbered but are names.
static IGNORED_PREFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:\d{4}[-_.]\d{1,2}[-_.]\d{1,2}|\d+\.\d+\.\d+)(?:[-_.\s]|$)")
        .expect("ignored prefix pattern must compile")
});

/// The `NN-name` convention: an integer or decimal, then `-`, `_`, `.` or
/// whitespace.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultNumberPrefixParser;

impl NumberPrefixParser for DefaultNumberPrefixParser {
    fn parse(&self, name: &str) -> ParsedName {
        if IGNORED_PREFIX.is_match(name) {
            return ParsedName::unnumbered(name);
        }
        let Some(caps) = NUMBER_PREFIX.captures(name) else {
            return ParsedName::unnumbered(name);
        };
        match caps["number"].parse::<f64>() {
            Ok(number) => ParsedName {
                number: Some(number),
                name: caps["name"].to_string(),
            },
            Err(_) => ParsedName::unnumbered(name),
        }
    }
}

/// Never strips anything. Used when number prefixes are turned off.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledNumberPrefixParser;

impl NumberPrefixParser for DisabledNumberPrefixParser {
    fn parse(&self, name: &str) -> ParsedName {
        ParsedName::unnumbered(name)
    }
}

/// Format a clean (prefix-stripped) directory name as a human title.
///
/// Dashes and underscores become spaces and each word is capitalized:
/// `getting-started` → "Getting Started", `api_reference` → "Api Reference".
pub fn title_case(name: &str) -> String {
    name.split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
