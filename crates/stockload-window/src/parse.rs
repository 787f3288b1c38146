//! Parsing of single dated entries.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::{Map, Value};
use std::str::FromStr;
use stockload_types::{DailyRecord, ShapeError};

/// Key of the opening price.
pub const OPEN_KEY: &str = "1. open";
/// Key of the highest price.
pub const HIGH_KEY: &str = "2. high";
/// Key of the lowest price.
pub const LOW_KEY: &str = "3. low";
/// Key of the closing price.
pub const CLOSE_KEY: &str = "4. close";
/// Key of the traded volume.
pub const VOLUME_KEY: &str = "5. volume";

/// Builds a daily record from a date key and its field mapping.
///
/// Each entry looks like:
///
/// ```json
/// {"1. open": "117.3500", "2. high": "119.6600", "3. low": "117.2500",
///  "4. close": "117.8700", "5. volume": "286038878"}
/// ```
///
/// # Errors
///
/// Returns an error if the date is not `YYYY-MM-DD`, `fields` is not an
/// object, or any of the five values is missing or not numeric.
pub fn parse_entry(date: &str, fields: &Value) -> Result<DailyRecord, ShapeError> {
    let parsed_date = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| ShapeError::InvalidDate(date.to_string()))?;

    let fields = fields
        .as_object()
        .ok_or_else(|| ShapeError::NotAnObject(format!("entry {date}")))?;

    let volume_raw = field_text(fields, date, VOLUME_KEY)?;
    let volume = volume_raw
        .parse::<u64>()
        .map_err(|_| ShapeError::InvalidNumber {
            date: date.to_string(),
            field: VOLUME_KEY,
            value: volume_raw.to_string(),
        })?;

    Ok(DailyRecord::new(
        parsed_date,
        field_decimal(fields, date, OPEN_KEY)?,
        field_decimal(fields, date, HIGH_KEY)?,
        field_decimal(fields, date, LOW_KEY)?,
        field_decimal(fields, date, CLOSE_KEY)?,
        volume,
    ))
}

fn field_text<'a>(
    fields: &'a Map<String, Value>,
    date: &str,
    field: &'static str,
) -> Result<&'a str, ShapeError> {
    let value = fields.get(field).ok_or_else(|| ShapeError::MissingField {
        date: date.to_string(),
        field,
    })?;
    value
        .as_str()
        .map(str::trim)
        .ok_or_else(|| ShapeError::InvalidNumber {
            date: date.to_string(),
            field,
            value: value.to_string(),
        })
}

fn field_decimal(
    fields: &Map<String, Value>,
    date: &str,
    field: &'static str,
) -> Result<Decimal, ShapeError> {
    let raw = field_text(fields, date, field)?;
    Decimal::from_str(raw).map_err(|_| ShapeError::InvalidNumber {
        date: date.to_string(),
        field,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn test_parse_entry_field_mapping() {
        let fields = json!({
            "1. open": "10.5",
            "2. high": "11.0",
            "3. low": "10.0",
            "4. close": "10.8",
            "5. volume": "1000"
        });

        let record = parse_entry("2024-01-02", &fields).unwrap();
        assert_eq!(
            record,
            DailyRecord::new(
                NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
                dec!(10.5),
                dec!(11.0),
                dec!(10.0),
                dec!(10.8),
                1000,
            )
        );
    }

    #[test]
    fn test_parse_entry_keeps_precision() {
        let fields = json!({
            "1. open": "117.3500",
            "2. high": "119.6600",
            "3. low": "117.2500",
            "4. close": "117.8700",
            "5. volume": "286038878"
        });

        let record = parse_entry("2024-09-20", &fields).unwrap();
        assert_eq!(record.close(), dec!(117.87));
        assert_eq!(record.close().to_string(), "117.8700");
        assert_eq!(record.volume(), 286_038_878);
    }

    #[test]
    fn test_parse_entry_invalid_date() {
        let result = parse_entry("01/02/2024", &json!({}));
        assert_eq!(result, Err(ShapeError::InvalidDate("01/02/2024".to_string())));
    }

    #[test]
    fn test_parse_entry_missing_field() {
        let fields = json!({
            "1. open": "10.5",
            "2. high": "11.0",
            "3. low": "10.0",
            "5. volume": "1000"
        });

        let result = parse_entry("2024-01-02", &fields);
        assert_eq!(
            result,
            Err(ShapeError::MissingField {
                date: "2024-01-02".to_string(),
                field: CLOSE_KEY,
            })
        );
    }

    #[test]
    fn test_parse_entry_non_numeric() {
        let fields = json!({
            "1. open": "n/a",
            "2. high": "11.0",
            "3. low": "10.0",
            "4. close": "10.8",
            "5. volume": "1000"
        });

        let result = parse_entry("2024-01-02", &fields);
        assert!(matches!(
            result,
            Err(ShapeError::InvalidNumber { field: OPEN_KEY, .. })
        ));
    }

    #[test]
    fn test_parse_entry_fractional_volume_rejected() {
        let fields = json!({
            "1. open": "10.5",
            "2. high": "11.0",
            "3. low": "10.0",
            "4. close": "10.8",
            "5. volume": "1000.5"
        });

        let result = parse_entry("2024-01-02", &fields);
        assert!(matches!(
            result,
            Err(ShapeError::InvalidNumber { field: VOLUME_KEY, .. })
        ));
    }

    #[test]
    fn test_parse_entry_not_an_object() {
        let result = parse_entry("2024-01-02", &json!("10.5"));
        assert!(matches!(result, Err(ShapeError::NotAnObject(_))));
    }
}
