//! Ticker symbols.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::ConfigError;

/// Maximum accepted symbol length.
const MAX_LEN: usize = 32;

/// A normalized ticker symbol.
///
/// Symbols are upper-cased on construction and may contain ASCII letters,
/// digits, `.`, `-` and `_` (e.g. `FIVE`, `BRK.B`, `TSCO.LON`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Symbol(String);

impl Symbol {
    /// Creates a symbol, normalizing it to upper case.
    ///
    /// # Errors
    ///
    /// Returns an error if the symbol is empty, too long, or contains
    /// characters other than ASCII alphanumerics, `.`, `-` and `_`.
    pub fn new(raw: &str) -> Result<Self, ConfigError> {
        let trimmed = raw.trim();
        let valid = !trimmed.is_empty()
            && trimmed.len() <= MAX_LEN
            && trimmed
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'));

        if !valid {
            return Err(ConfigError::InvalidSymbol(raw.to_string()));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    /// Returns the symbol as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Symbol {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for Symbol {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Symbol> for String {
    fn from(symbol: Symbol) -> Self {
        symbol.0
    }
}

impl AsRef<str> for Symbol {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_uppercases() {
        let symbol = Symbol::new("five").unwrap();
        assert_eq!(symbol.as_str(), "FIVE");
    }

    #[test]
    fn test_symbol_with_exchange_suffix() {
        let symbol: Symbol = "tsco.lon".parse().unwrap();
        assert_eq!(symbol.to_string(), "TSCO.LON");
    }

    #[test]
    fn test_symbol_rejects_empty_and_injection() {
        assert!(Symbol::new("").is_err());
        assert!(Symbol::new("   ").is_err());
        assert!(Symbol::new("FIVE'; DROP TABLE x;--").is_err());
        assert!(Symbol::new("A/B").is_err());
    }

    #[test]
    fn test_symbol_serde() {
        let symbol: Symbol = serde_json::from_str("\"ibm\"").unwrap();
        assert_eq!(symbol.as_str(), "IBM");
        assert_eq!(serde_json::to_string(&symbol).unwrap(), "\"IBM\"");
        assert!(serde_json::from_str::<Symbol>("\"\"").is_err());
    }
}
