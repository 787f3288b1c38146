//! Warehouse table identifiers.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::ConfigError;

/// Default target table.
pub const DEFAULT_TABLE: &str = "stock_prices";

/// A validated, possibly qualified, table identifier such as
/// `stock_prices`, `main.stock_prices` or `DEV.RAW.stock_prices`.
///
/// Table names are spliced into SQL text (identifiers cannot be bound as
/// parameters), so every dot-separated part must be a plain identifier:
/// an ASCII letter or `_` followed by ASCII alphanumerics or `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TableName(String);

impl TableName {
    /// Creates a table name after validating each identifier part.
    ///
    /// # Errors
    ///
    /// Returns an error if any part is empty or not a plain identifier, or if
    /// there are more than three parts.
    pub fn new(raw: &str) -> Result<Self, ConfigError> {
        let parts: Vec<&str> = raw.split('.').collect();
        let valid = parts.len() <= 3 && parts.iter().all(|part| is_identifier(part));

        if !valid {
            return Err(ConfigError::InvalidTableName(raw.to_string()));
        }
        Ok(Self(raw.to_string()))
    }

    /// Returns the identifier as it appears in SQL.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the unqualified table name (the last part).
    #[must_use]
    pub fn base_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }
}

fn is_identifier(part: &str) -> bool {
    let mut chars = part.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl Default for TableName {
    fn default() -> Self {
        Self(DEFAULT_TABLE.to_string())
    }
}

impl std::fmt::Display for TableName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TableName {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for TableName {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<TableName> for String {
    fn from(table: TableName) -> Self {
        table.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_name_qualified() {
        let table = TableName::new("DEV.RAW.stock_prices").unwrap();
        assert_eq!(table.as_str(), "DEV.RAW.stock_prices");
        assert_eq!(table.base_name(), "stock_prices");
    }

    #[test]
    fn test_table_name_default() {
        assert_eq!(TableName::default().as_str(), DEFAULT_TABLE);
    }

    #[test]
    fn test_table_name_rejects_bad_identifiers() {
        assert!(TableName::new("").is_err());
        assert!(TableName::new("a..b").is_err());
        assert!(TableName::new("1table").is_err());
        assert!(TableName::new("prices; DROP TABLE x").is_err());
        assert!(TableName::new("a.b.c.d").is_err());
        assert!(TableName::new("stock-prices").is_err());
    }
}
