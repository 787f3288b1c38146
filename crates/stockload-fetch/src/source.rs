//! Sources of raw daily series.

use async_trait::async_trait;
use std::path::Path;
use stockload_types::{RawSeriesResponse, Symbol};

use crate::{FetchClient, FetchError};

/// Something that can produce the raw daily series for a symbol.
#[async_trait]
pub trait SeriesSource: Send + Sync {
    /// Returns the raw series for `symbol`.
    ///
    /// # Errors
    ///
    /// Returns an error if the series cannot be obtained or decoded.
    async fn fetch(&self, symbol: &Symbol) -> Result<RawSeriesResponse, FetchError>;
}

#[async_trait]
impl SeriesSource for FetchClient {
    async fn fetch(&self, symbol: &Symbol) -> Result<RawSeriesResponse, FetchError> {
        Self::fetch(self, symbol).await
    }
}

/// Serves one fixed response for every symbol.
///
/// Used to replay a saved API response through the pipeline without a
/// network call.
#[derive(Debug, Clone)]
pub struct StaticSource {
    response: RawSeriesResponse,
}

impl StaticSource {
    /// Creates a source that always returns `response`.
    #[must_use]
    pub const fn new(response: RawSeriesResponse) -> Self {
        Self { response }
    }

    /// Loads a saved JSON response from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid JSON.
    pub fn from_file(path: &Path) -> Result<Self, FetchError> {
        let bytes = std::fs::read(path)?;
        Ok(Self::new(RawSeriesResponse::from_slice(&bytes)?))
    }
}

#[async_trait]
impl SeriesSource for StaticSource {
    async fn fetch(&self, symbol: &Symbol) -> Result<RawSeriesResponse, FetchError> {
        tracing::debug!(%symbol, "serving saved daily series");
        Ok(self.response.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn test_static_source_returns_response() {
        let raw = RawSeriesResponse::from_slice(br#"{"Time Series (Daily)": {}}"#).unwrap();
        let source = StaticSource::new(raw.clone());

        let fetched = source.fetch(&Symbol::new("FIVE").unwrap()).await.unwrap();
        assert_eq!(fetched, raw);
    }

    #[test]
    fn test_static_source_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{"Time Series (Daily)": {"2024-01-02": {}}}"#)
            .unwrap();

        let source = StaticSource::from_file(file.path()).unwrap();
        assert!(source.response.time_series().is_some());
    }

    #[test]
    fn test_static_source_from_file_rejects_non_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"not json").unwrap();

        let result = StaticSource::from_file(file.path());
        assert!(matches!(result, Err(FetchError::Decode(_))));
    }
}
