//! Window size and ordering policy.

use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::str::FromStr;

use crate::ConfigError;

/// Default number of trading days kept per run.
pub const DEFAULT_WINDOW_SIZE: usize = 90;

/// Number of most recent daily records to keep. Always positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "usize", into = "usize")]
pub struct WindowSize(NonZeroUsize);

impl WindowSize {
    /// Creates a window size.
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is zero.
    pub const fn new(size: usize) -> Result<Self, ConfigError> {
        match NonZeroUsize::new(size) {
            Some(size) => Ok(Self(size)),
            None => Err(ConfigError::InvalidWindowSize(size)),
        }
    }

    /// Returns the size as a plain integer.
    #[must_use]
    pub const fn get(&self) -> usize {
        self.0.get()
    }
}

impl Default for WindowSize {
    fn default() -> Self {
        Self(NonZeroUsize::new(DEFAULT_WINDOW_SIZE).unwrap_or(NonZeroUsize::MIN))
    }
}

impl TryFrom<usize> for WindowSize {
    type Error = ConfigError;

    fn try_from(value: usize) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<WindowSize> for usize {
    fn from(size: WindowSize) -> Self {
        size.get()
    }
}

impl std::fmt::Display for WindowSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// How daily records are ordered before the window is cut.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum WindowOrder {
    /// Sort by date, newest first, then keep the first N records.
    #[default]
    MostRecent,
    /// Keep the key order of the upstream response and take its first N entries.
    Upstream,
}

impl WindowOrder {
    /// Returns the order as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MostRecent => "most-recent",
            Self::Upstream => "upstream",
        }
    }
}

impl std::fmt::Display for WindowOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WindowOrder {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "most-recent" | "recent" | "desc" => Ok(Self::MostRecent),
            "upstream" | "as-is" => Ok(Self::Upstream),
            _ => Err(ConfigError::UnknownWindowOrder(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_size_default() {
        assert_eq!(WindowSize::default().get(), DEFAULT_WINDOW_SIZE);
    }

    #[test]
    fn test_window_size_rejects_zero() {
        assert_eq!(WindowSize::new(0), Err(ConfigError::InvalidWindowSize(0)));
        assert!(serde_json::from_str::<WindowSize>("0").is_err());
        assert_eq!(serde_json::from_str::<WindowSize>("30").unwrap().get(), 30);
    }

    #[test]
    fn test_window_order_parse() {
        assert_eq!("most-recent".parse::<WindowOrder>(), Ok(WindowOrder::MostRecent));
        assert_eq!("Upstream".parse::<WindowOrder>(), Ok(WindowOrder::Upstream));
        assert!("sideways".parse::<WindowOrder>().is_err());
    }
}
