use crate::{
    stmt::{Type, Value},
    Error, Result,
};

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

impl Type {
    pub(crate) fn cast_chrono(&self, value: &Value) -> Result<Option<Value>> {
        Ok(Some(match (value, self) {
            // String -> chrono
            (Value::String(value), Type::TimestampTz) => match value.parse::<DateTime<Utc>>() {
                Ok(value) => Value::TimestampTz(value),
                // Zone-less text is read as UTC
                Err(_) => Value::TimestampTz(parse_naive(value)?.and_utc()),
            },
            (Value::String(value), Type::Timestamp) => Value::Timestamp(parse_naive(value)?),
            (Value::String(value), Type::Date) => Value::Date(value.parse()?),
            (Value::String(value), Type::Time) => Value::Time(value.parse()?),

            // Unix seconds
            (Value::I64(value), Type::TimestampTz) => match DateTime::from_timestamp(*value, 0) {
                Some(value) => Value::TimestampTz(value),
                None => return Ok(None),
            },

            // Widening between timestamp flavors
            (Value::Timestamp(value), Type::TimestampTz) => Value::TimestampTz(value.and_utc()),
            (Value::TimestampTz(value), Type::Timestamp) => Value::Timestamp(value.naive_utc()),
            (Value::Date(value), Type::Timestamp) => match value.and_hms_opt(0, 0, 0) {
                Some(value) => Value::Timestamp(value),
                None => return Ok(None),
            },
            (Value::Timestamp(value), Type::Date) => Value::Date(value.date()),

            // chrono -> String
            (Value::TimestampTz(value), Type::String) => Value::String(value.to_rfc3339()),
            (Value::Timestamp(value), Type::String) => {
                Value::String(value.format("%Y-%m-%dT%H:%M:%S%.f").to_string())
            }
            (Value::Date(value), Type::String) => Value::String(value.to_string()),
            (Value::Time(value), Type::String) => Value::String(value.to_string()),

            _ => return Ok(None),
        }))
    }
}

/// Accepts the ISO `T` separator, the space separator SQL databases commonly
/// emit, and bare dates.
fn parse_naive(value: &str) -> Result<NaiveDateTime> {
    if let Ok(value) = value.parse::<NaiveDateTime>() {
        return Ok(value);
    }

    if let Ok(value) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f") {
        return Ok(value);
    }

    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")?;
    date.and_hms_opt(0, 0, 0)
        .ok_or_else(|| Error::type_conversion(Value::Date(date), "Timestamp"))
}
