use super::Value;
use crate::{Error, Result};

use rust_decimal::Decimal;

/// The semantic type of a record property.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    /// Boolean value
    Bool,

    /// Signed 32-bit integer
    I32,

    /// Signed 64-bit integer
    I64,

    /// 64-bit floating point number
    F64,

    /// Fixed-point decimal number
    Decimal,

    /// String type
    String,

    /// Binary type
    Bytes,

    /// UUID
    Uuid,

    /// Calendar date
    Date,

    /// Time of day
    Time,

    /// Timestamp without a time zone
    Timestamp,

    /// Timestamp in UTC
    TimestampTz,

    /// A list of a single type
    List(Box<Type>),
}

impl Type {
    pub fn list(ty: impl Into<Self>) -> Self {
        Self::List(Box::new(ty.into()))
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Self::I32 | Self::I64)
    }

    /// Date and timestamp types; the types that can carry created-on and
    /// updated-on roles.
    pub fn is_temporal(&self) -> bool {
        matches!(self, Self::Date | Self::Timestamp | Self::TimestampTz)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Bool => "Bool",
            Self::I32 => "I32",
            Self::I64 => "I64",
            Self::F64 => "F64",
            Self::Decimal => "Decimal",
            Self::String => "String",
            Self::Bytes => "Bytes",
            Self::Uuid => "Uuid",
            Self::Date => "Date",
            Self::Time => "Time",
            Self::Timestamp => "Timestamp",
            Self::TimestampTz => "TimestampTz",
            Self::List(_) => "List",
        }
    }

    /// Converts `value` to this type.
    ///
    /// Drivers hand back the loosest representation their wire format has
    /// (SQLite stores booleans as integers and timestamps as text, for
    /// example); this applies the widening and parsing rules needed to turn
    /// those into the property's type. Null values pass through.
    pub fn cast(&self, value: Value) -> Result<Value> {
        if value.is_null() || value.is_a(self) {
            return Ok(value);
        }

        if let Some(value) = self.cast_chrono(&value)? {
            return Ok(value);
        }

        Ok(match (value, self) {
            // Integers
            (Value::I64(v), Self::I32) => match i32::try_from(v) {
                Ok(v) => Value::I32(v),
                Err(_) => return Err(Error::type_conversion(Value::I64(v), "I32")),
            },
            (Value::I32(v), Self::I64) => Value::I64(v.into()),
            (Value::Bool(v), Self::I32) => Value::I32(v.into()),
            (Value::Bool(v), Self::I64) => Value::I64(v.into()),

            // Booleans stored as integers
            (Value::I64(v), Self::Bool) => Value::Bool(v != 0),
            (Value::I32(v), Self::Bool) => Value::Bool(v != 0),

            // Floating point
            (Value::I64(v), Self::F64) => Value::F64(v as f64),
            (Value::I32(v), Self::F64) => Value::F64(v.into()),
            (Value::Decimal(v), Self::F64) => match f64::try_from(v) {
                Ok(v) => Value::F64(v),
                Err(_) => return Err(Error::type_conversion(Value::Decimal(v), "F64")),
            },

            // Decimals
            (Value::I64(v), Self::Decimal) => Value::Decimal(v.into()),
            (Value::I32(v), Self::Decimal) => Value::Decimal(v.into()),
            (Value::F64(v), Self::Decimal) => match Decimal::try_from(v) {
                Ok(v) => Value::Decimal(v),
                Err(_) => return Err(Error::type_conversion(Value::F64(v), "Decimal")),
            },
            (Value::String(v), Self::Decimal) => Value::Decimal(v.parse()?),

            // UUIDs stored as text or 16 bytes
            (Value::String(v), Self::Uuid) => Value::Uuid(v.parse()?),
            (Value::Bytes(v), Self::Uuid) => Value::Uuid(uuid::Uuid::from_slice(&v)?),

            // Text stored as a blob
            (Value::Bytes(v), Self::String) => match String::from_utf8(v) {
                Ok(v) => Value::String(v),
                Err(err) => return Err(Error::type_conversion(Value::Bytes(err.into_bytes()), "String")),
            },

            (Value::List(items), Self::List(item)) => Value::List(
                items
                    .into_iter()
                    .map(|v| item.cast(v))
                    .collect::<Result<_>>()?,
            ),

            (value, ty) => return Err(Error::type_conversion(value, ty.name())),
        })
    }
}

impl From<&Self> for Type {
    fn from(value: &Self) -> Self {
        value.clone()
    }
}
