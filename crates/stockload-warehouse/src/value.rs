//! Statement parameter values.

use chrono::NaiveDateTime;

/// Format used when a timestamp has to be rendered as text.
pub(crate) const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A value bound to a statement placeholder.
///
/// Values always travel as bound parameters, never spliced into SQL text.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    /// Text value.
    Text(String),
    /// 64-bit integer.
    Integer(i64),
    /// Double precision float.
    Real(f64),
    /// Timestamp without time zone.
    Timestamp(NaiveDateTime),
}

impl std::fmt::Display for SqlValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => write!(f, "'{text}'"),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Real(value) => write!(f, "{value}"),
            Self::Timestamp(ts) => write!(f, "'{}'", ts.format(TIMESTAMP_FORMAT)),
        }
    }
}

impl From<&str> for SqlValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<i64> for SqlValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for SqlValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<NaiveDateTime> for SqlValue {
    fn from(value: NaiveDateTime) -> Self {
        Self::Timestamp(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_sql_value_display() {
        let ts = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();

        assert_eq!(SqlValue::from("FIVE").to_string(), "'FIVE'");
        assert_eq!(SqlValue::from(1000_i64).to_string(), "1000");
        assert_eq!(SqlValue::from(10.5).to_string(), "10.5");
        assert_eq!(SqlValue::from(ts).to_string(), "'2024-01-02 00:00:00'");
    }
}
