//! Header-line cleanup ahead of splitting.

use std::sync::LazyLock;

use regex::Regex;

use crate::address::AddressKind;
use crate::error::ReconcileError;

/// RFC 822 folding: a line break followed by indentation.
static FOLDING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\r?\n[ \t]+").unwrap());

/// Adjacent mixed quotes (`"'` or `'"`) left behind by legacy exporters.
static MIXED_QUOTES: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#""'|'""#).unwrap());

/// Clean a raw `X-<Kind>: value` line into a value ready for splitting.
///
/// Returns `Ok(None)` when nothing but whitespace follows the prefix. The
/// prefix must be the kind's own X-header key; anything else is a caller
/// mistake and is reported rather than guessed around.
pub fn normalize(kind: AddressKind, line: &str) -> Result<Option<String>, ReconcileError> {
    let Some((prefix, value)) = line.split_once(':') else {
        return Err(ReconcileError::MalformedLine {
            line: line.to_string(),
        });
    };

    let prefix = prefix.trim();
    if !prefix.eq_ignore_ascii_case(kind.x_header_key()) {
        return Err(ReconcileError::KeyMismatch {
            key: kind.x_header_key().to_string(),
            prefix: prefix.to_string(),
        });
    }

    let value = FOLDING.replace_all(value, " ");
    let value = value.replace("\"\"", "\"");
    let value = MIXED_QUOTES.replace_all(&value, "\"");
    let value = value.trim();

    if value.is_empty() {
        Ok(None)
    } else {
        Ok(Some(value.to_string()))
    }
}
