//! Segment splitting for legacy address-list values.
//!
//! Two strategies are tried in order; the first whose segment count equals
//! the number of target addresses wins. Nothing is ever truncated or padded
//! to force alignment.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Free text followed by one `<...>` span, then an optional separator run.
static BRACKETED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([^<>]*<[^<>]*>)[,\s]*").unwrap());

/// Which splitting strategy produced an aligned split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Comma split that respects double-quoted spans.
    Quoted,
    /// One segment per angle-bracketed address.
    Bracketed,
}

/// Result of strategy selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Split {
    Quoted(Vec<String>),
    Bracketed(Vec<String>),
    /// Neither strategy matched the address count.
    Unusable,
}

impl Split {
    /// The winning strategy, if any.
    pub fn strategy(&self) -> Option<Strategy> {
        match self {
            Self::Quoted(_) => Some(Strategy::Quoted),
            Self::Bracketed(_) => Some(Strategy::Bracketed),
            Self::Unusable => None,
        }
    }

    /// Aligned segments, empty when unusable.
    pub fn segments(&self) -> &[String] {
        match self {
            Self::Quoted(segments) | Self::Bracketed(segments) => segments,
            Self::Unusable => &[],
        }
    }
}

/// Split on commas that are not inside an open double-quoted span.
pub fn split_quoted(value: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;

    for (i, ch) in value.char_indices() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                push_segment(&mut segments, &value[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    push_segment(&mut segments, &value[start..]);

    segments
}

/// Split into runs of "text then `<address>`", walking an explicit cursor.
///
/// Text that is not followed by a bracketed address (a trailing bare name,
/// for instance) does not form a segment.
pub fn split_bracketed(value: &str) -> Vec<String> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    while cursor < value.len() {
        let Some(caps) = BRACKETED.captures_at(value, cursor) else {
            break;
        };
        let (Some(whole), Some(run)) = (caps.get(0), caps.get(1)) else {
            break;
        };
        push_segment(&mut segments, run.as_str().trim_start_matches([',', ' ', '\t']));
        // Every match consumes at least `<>`, so the cursor always advances.
        cursor = whole.end();
    }

    segments
}

/// Choose the split whose segment count equals `expected`.
pub fn split_segments(value: &str, expected: usize) -> Split {
    if expected == 0 {
        return Split::Unusable;
    }

    let quoted = split_quoted(value);
    if quoted.len() == expected {
        return Split::Quoted(quoted);
    }

    let bracketed = split_bracketed(value);
    if bracketed.len() == expected {
        debug!(
            expected,
            quoted = quoted.len(),
            "Quoted split misaligned, using bracketed split"
        );
        return Split::Bracketed(bracketed);
    }

    debug!(
        expected,
        quoted = quoted.len(),
        bracketed = bracketed.len(),
        "No split matches the address count"
    );
    Split::Unusable
}

fn push_segment(segments: &mut Vec<String>, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        segments.push(trimmed.to_string());
    }
}
