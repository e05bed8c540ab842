//! Display-name extraction from a single segment.

use std::sync::LazyLock;

use regex::Regex;

/// A quote pair that opens at a word boundary and closes before whitespace,
/// `<` or the end, so apostrophes inside names never pair up.
static SINGLE_QUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?:^|\s)'([^'<>]*)'(?:\s|<|$)").unwrap());

/// Optionally quoted or bare text in front of the first `<...>` span.
static BEFORE_BRACKET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*(?:"([^"]*)"|([^<]*?))\s*<[^<>]*>"#).unwrap()
});

static INSIDE_BRACKET: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<([^<>]*)>").unwrap());

type Matcher = fn(&str) -> Option<String>;

/// Tried in order, first hit wins.
const MATCHERS: [Matcher; 3] = [single_quoted, before_bracket, inside_bracket];

/// Extract a display name from one segment, or `None` if nothing plausible
/// is found. Never falls back to the segment text itself.
pub fn extract_name(segment: &str) -> Option<String> {
    MATCHERS.iter().find_map(|matcher| matcher(segment))
}

/// Text strictly between a pair of single quotes.
fn single_quoted(segment: &str) -> Option<String> {
    let caps = SINGLE_QUOTED.captures(segment)?;
    non_blank(caps.get(1)?.as_str())
}

/// `"Name" <addr>` or `Name <addr>`.
fn before_bracket(segment: &str) -> Option<String> {
    let caps = BEFORE_BRACKET.captures(segment)?;
    let name = caps.get(1).or_else(|| caps.get(2))?.as_str().replace('"', "");
    non_blank(name.trim().trim_matches('\''))
}

/// `<Name>` with nothing usable in front.
fn inside_bracket(segment: &str) -> Option<String> {
    let caps = INSIDE_BRACKET.captures(segment)?;
    non_blank(caps.get(1)?.as_str())
}

fn non_blank(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
