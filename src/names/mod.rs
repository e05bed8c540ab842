//! Display-name recovery from legacy `X-From`/`X-To`/`X-Cc`/`X-Bcc` lines.
//!
//! One header line flows through:
//! 1. `normalize()`: strip the `X-<Kind>:` prefix, unfold, fix quoting
//! 2. `split_segments()`: quoted-aware or bracket-anchored split, whichever
//!    yields exactly one segment per address
//! 3. `extract_name()`: first matching pattern per segment
//! 4. `apply_names()`: fill blank names, never overwrite
//!
//! Every heuristic miss leaves the address list untouched.

pub mod extract;
pub mod normalize;
pub mod reconcile;
pub mod split;

use serde::Serialize;
use tracing::debug;

use crate::address::{Address, AddressKind, HeaderLine};
use crate::error::ReconcileError;

pub use extract::extract_name;
pub use normalize::normalize;
pub use reconcile::apply_names;
pub use split::{Split, Strategy, split_bracketed, split_quoted, split_segments};

/// What a single `reconcile_names` call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Outcome {
    /// The header carried no value.
    Empty,
    /// No strategy produced one segment per address.
    Unaligned { addresses: usize },
    /// Names were extracted and merged; `filled` may be zero.
    Applied { strategy: Strategy, filled: usize },
}

impl Outcome {
    /// Number of names written.
    pub fn filled(&self) -> usize {
        match self {
            Self::Applied { filled, .. } => *filled,
            _ => 0,
        }
    }
}

/// Fill blank display names in `addresses` from one `X-<kind>` header line.
///
/// The kind comes from the line's key. Positions are the only link between
/// segments and addresses, so a split that does not yield exactly
/// `addresses.len()` segments changes nothing.
pub fn reconcile_names(
    line: &HeaderLine,
    addresses: &mut [Address],
) -> Result<Outcome, ReconcileError> {
    let kind = AddressKind::from_x_header_key(&line.key).ok_or_else(|| {
        ReconcileError::UnsupportedKey {
            key: line.key.clone(),
        }
    })?;

    let Some(value) = normalize(kind, &line.line)? else {
        debug!(%kind, "X-header is empty");
        return Ok(Outcome::Empty);
    };

    let split = split_segments(&value, addresses.len());
    let Some(strategy) = split.strategy() else {
        return Ok(Outcome::Unaligned {
            addresses: addresses.len(),
        });
    };

    let names: Vec<Option<String>> = split.segments().iter().map(|s| extract_name(s)).collect();
    let filled = apply_names(addresses, &names);

    debug!(%kind, ?strategy, filled, "Reconciled X-header names");
    Ok(Outcome::Applied { strategy, filled })
}
