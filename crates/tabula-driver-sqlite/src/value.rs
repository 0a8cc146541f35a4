use rusqlite::types::{Value as SqlValue, ValueRef};
use tabula_core::{stmt::Value, Error, Result};

/// Reads the column at `index` in its storage class.
pub(crate) fn read(row: &rusqlite::Row<'_>, index: usize) -> Result<Value> {
    Ok(match row.get_ref(index).map_err(Error::driver)? {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(v) => Value::I64(v),
        ValueRef::Real(v) => Value::F64(v),
        ValueRef::Text(v) => match std::str::from_utf8(v) {
            Ok(v) => Value::String(v.to_string()),
            Err(err) => return Err(Error::driver(err)),
        },
        ValueRef::Blob(v) => Value::Bytes(v.to_vec()),
    })
}

/// Converts a bound parameter into a SQLite value. Temporal values are
/// stored as ISO-8601 text.
pub(crate) fn to_sql(value: &Value) -> Result<SqlValue> {
    Ok(match value {
        Value::Bool(v) => SqlValue::Integer((*v).into()),
        Value::I32(v) => SqlValue::Integer((*v).into()),
        Value::I64(v) => SqlValue::Integer(*v),
        Value::F64(v) => SqlValue::Real(*v),
        Value::Decimal(v) => SqlValue::Text(v.to_string()),
        Value::String(v) => SqlValue::Text(v.clone()),
        Value::Bytes(v) => SqlValue::Blob(v.clone()),
        Value::Uuid(v) => SqlValue::Text(v.to_string()),
        Value::Date(v) => SqlValue::Text(v.to_string()),
        Value::Time(v) => SqlValue::Text(v.to_string()),
        Value::Timestamp(v) => SqlValue::Text(v.to_string()),
        Value::TimestampTz(v) => SqlValue::Text(v.to_rfc3339()),
        Value::Null => SqlValue::Null,
        Value::List(_) => {
            return Err(Error::usage(
                "a list parameter must be referenced directly, e.g. `IN (:ids)`",
            ))
        }
    })
}
