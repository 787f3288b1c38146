//! Pipeline configuration.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::{ConfigError, TableName, WindowOrder, WindowSize};

/// Default market-data endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://www.alphavantage.co/query";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// API credential. Redacted from `Debug` output.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Credential(String);

impl Credential {
    /// Wraps a credential.
    #[must_use]
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Returns the secret value.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns true if the credential is empty or whitespace.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Which rows a refresh deletes before reloading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DeleteScope {
    /// Delete every row in the table.
    #[default]
    Table,
    /// Delete only the rows of the symbol being loaded.
    Symbol,
}

impl DeleteScope {
    /// Returns the scope as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Symbol => "symbol",
        }
    }
}

impl std::fmt::Display for DeleteScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeleteScope {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "table" | "all" => Ok(Self::Table),
            "symbol" => Ok(Self::Symbol),
            _ => Err(ConfigError::UnknownDeleteScope(s.to_string())),
        }
    }
}

/// Everything one pipeline run needs besides the symbol and the warehouse handle.
///
/// Constructed explicitly and handed to the fetcher and replacer; nothing is
/// read from ambient global state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Market-data endpoint URL.
    pub endpoint: String,
    /// API credential.
    pub credential: Credential,
    /// Target table.
    pub table_name: TableName,
    /// Number of daily records kept.
    pub window_size: WindowSize,
    /// Ordering applied before the window is cut.
    pub window_order: WindowOrder,
    /// Rows deleted before reloading.
    pub delete_scope: DeleteScope,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            credential: Credential::default(),
            table_name: TableName::default(),
            window_size: WindowSize::default(),
            window_order: WindowOrder::default(),
            delete_scope: DeleteScope::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl PipelineConfig {
    /// Creates a configuration with defaults and the given credential.
    #[must_use]
    pub fn with_credential(credential: impl Into<String>) -> Self {
        Self {
            credential: Credential::new(credential),
            ..Self::default()
        }
    }

    /// Loads a configuration from a JSON document. Missing fields take defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is not valid JSON or a field is invalid.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Checks the fields that cannot be enforced by their types.
    ///
    /// The table name and window size are checked when they are parsed, so a
    /// `PipelineConfig` never holds an invalid one.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint or credential is empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.endpoint.trim().is_empty() {
            return Err(ConfigError::EmptyEndpoint);
        }
        if self.credential.is_empty() {
            return Err(ConfigError::EmptyCredential);
        }
        Ok(())
    }
}
