//! Request URL construction.

use ::url::{ParseError, Url};
use stockload_types::{Credential, Symbol};

/// API function requested for every run.
pub const FUNCTION: &str = "TIME_SERIES_DAILY";

/// Placeholder substituted for the credential in logged URLs.
const REDACTED: &str = "***";

/// Builds the request URL for a symbol's daily series.
///
/// URL format: `{endpoint}?function=TIME_SERIES_DAILY&symbol={SYMBOL}&apikey={KEY}`
///
/// The same inputs always produce the same URL.
///
/// # Errors
///
/// Returns the parse error if `endpoint` is not an absolute URL.
///
/// # Example
///
/// ```
/// use stockload_fetch::url::series_url;
/// use stockload_types::{Credential, Symbol};
///
/// let symbol = Symbol::new("five").unwrap();
/// let url = series_url("https://www.alphavantage.co/query", &symbol, &Credential::new("demo")).unwrap();
/// assert_eq!(
///     url.as_str(),
///     "https://www.alphavantage.co/query?function=TIME_SERIES_DAILY&symbol=FIVE&apikey=demo"
/// );
/// ```
pub fn series_url(
    endpoint: &str,
    symbol: &Symbol,
    credential: &Credential,
) -> Result<Url, ParseError> {
    Url::parse_with_params(
        endpoint,
        &[
            ("function", FUNCTION),
            ("symbol", symbol.as_str()),
            ("apikey", credential.expose()),
        ],
    )
}

/// Returns the URL as text with the `apikey` parameter masked, for logging.
#[must_use]
pub fn redacted(url: &Url) -> String {
    let mut masked = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(key, value)| {
            let value = if key == "apikey" {
                REDACTED.to_string()
            } else {
                value.into_owned()
            };
            (key.into_owned(), value)
        })
        .collect();

    masked.query_pairs_mut().clear().extend_pairs(pairs);
    masked.to_string()
}
