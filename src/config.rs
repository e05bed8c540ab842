//! Configuration types.

use crate::address::AddressKind;
use crate::error::ConfigError;

/// Reconciliation configuration, built from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileConfig {
    /// Whether X-header names are merged at all.
    pub enabled: bool,
    /// Address kinds whose X-header is consulted.
    pub kinds: Vec<AddressKind>,
    /// Fallback tracing filter when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for ReconcileConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            kinds: AddressKind::ALL.to_vec(),
            log_filter: "info".to_string(),
        }
    }
}

impl ReconcileConfig {
    /// Build config from environment variables, defaulting anything unset.
    ///
    /// - `MAIL_XNAMES_ENABLED`: `true`/`false`/`1`/`0`
    /// - `MAIL_XNAMES_KINDS`: comma list of `from,to,cc,bcc`
    /// - `MAIL_XNAMES_LOG`: tracing filter directive
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let enabled = match lookup("MAIL_XNAMES_ENABLED") {
            Some(raw) => parse_bool("MAIL_XNAMES_ENABLED", &raw)?,
            None => defaults.enabled,
        };

        let kinds = match lookup("MAIL_XNAMES_KINDS") {
            Some(raw) => parse_kinds(&raw)?,
            None => defaults.kinds,
        };

        let log_filter = lookup("MAIL_XNAMES_LOG")
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or(defaults.log_filter);

        Ok(Self {
            enabled,
            kinds,
            log_filter,
        })
    }

    /// Whether the given kind should be reconciled.
    pub fn reconciles(&self, kind: AddressKind) -> bool {
        self.enabled && self.kinds.contains(&kind)
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            key: key.to_string(),
            message: format!("expected a boolean, got '{other}'"),
        }),
    }
}

fn parse_kinds(raw: &str) -> Result<Vec<AddressKind>, ConfigError> {
    let mut kinds = Vec::new();
    for part in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let kind: AddressKind = part.parse().map_err(|message| ConfigError::InvalidValue {
            key: "MAIL_XNAMES_KINDS".to_string(),
            message,
        })?;
        if !kinds.contains(&kind) {
            kinds.push(kind);
        }
    }
    Ok(kinds)
}
