//! Address and header-line types shared by the decoder adapter and the
//! name reconciliation engine.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// One mailbox from a decoded address header.
///
/// `id` is the lowercased email address and is never rewritten by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    /// Lowercased email address.
    pub id: String,
    /// Display name, if the decoder or the X-header reconciliation found one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Address {
    /// Create an address without a display name. The id is lowercased.
    pub fn new(id: impl AsRef<str>) -> Self {
        Self {
            id: id.as_ref().trim().to_lowercase(),
            name: None,
        }
    }

    /// Builder-style display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Whether the address already carries a usable display name.
    pub fn has_name(&self) -> bool {
        self.name.as_deref().is_some_and(|n| !n.trim().is_empty())
    }
}

/// Which address header a list (and its legacy X-header) belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressKind {
    From,
    To,
    Cc,
    Bcc,
}

impl AddressKind {
    /// All kinds, in the order a message is reconciled.
    pub const ALL: [AddressKind; 4] = [Self::From, Self::To, Self::Cc, Self::Bcc];

    /// Lowercase kind name (`from`, `to`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            Self::From => "from",
            Self::To => "to",
            Self::Cc => "cc",
            Self::Bcc => "bcc",
        }
    }

    /// The legacy header key carrying display names for this kind.
    pub fn x_header_key(self) -> &'static str {
        match self {
            Self::From => "x-from",
            Self::To => "x-to",
            Self::Cc => "x-cc",
            Self::Bcc => "x-bcc",
        }
    }

    /// Recover the kind from an `x-<kind>` header key (case-insensitive).
    pub fn from_x_header_key(key: &str) -> Option<Self> {
        let key = key.trim();
        Self::ALL
            .into_iter()
            .find(|k| k.x_header_key().eq_ignore_ascii_case(key))
    }
}

impl fmt::Display for AddressKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AddressKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown address kind '{s}'"))
    }
}

/// A decoded header as it appeared in the message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderLine {
    /// Lowercased header name.
    pub key: String,
    /// Raw header text including the `Name:` prefix and any folding.
    pub line: String,
}

impl HeaderLine {
    pub fn new(key: impl AsRef<str>, line: impl Into<String>) -> Self {
        Self {
            key: key.as_ref().trim().to_lowercase(),
            line: line.into(),
        }
    }
}
