//! mail-xnames: display-name recovery from legacy X-address headers.

pub mod address;
pub mod config;
pub mod error;
pub mod message;
pub mod names;

pub use address::{Address, AddressKind, HeaderLine};
pub use config::ReconcileConfig;
pub use error::{Error, Result};
pub use message::{ParsedMessage, parse_message};
pub use names::{Outcome, reconcile_names};
