use crate::stmt;

/// Storage type of a column as declared in the database.
///
/// Parsed leniently from the declared SQL type name: unknown names are kept
/// as [`Type::Custom`] rather than rejected, since the engine only needs the
/// storage type for diagnostics and for the driver's value conversion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Type {
    /// A boolean value
    Boolean,

    /// A signed integer of `n` bytes
    Integer(u8),

    /// A floating point number of `n` bytes
    Float(u8),

    /// Decimal number with optional precision and scale.
    Numeric(Option<(u32, u32)>),

    /// Unconstrained text type
    Text,

    /// Text type with an explicit maximum length
    VarChar(u64),

    /// Unconstrained binary type
    Blob,

    /// 128-bit universally unique identifier (UUID)
    Uuid,

    /// A civil date
    Date,

    /// A civil time of day
    Time,

    /// A civil date and time without zone
    Timestamp,

    /// An instant in time, stored with its zone
    TimestampTz,

    /// Unrecognized type name, kept verbatim
    Custom(String),
}

impl Type {
    /// Parses a declared SQL type name such as `BIGINT`, `VARCHAR(20)` or
    /// `NUMERIC(10, 2)`.
    pub fn from_sql(name: &str) -> Type {
        let name = name.trim();
        let upper = name.to_ascii_uppercase();

        let (base, args) = match upper.split_once('(') {
            Some((base, rest)) => (base.trim(), rest.trim_end_matches(')').trim()),
            None => (upper.as_str(), ""),
        };

        let args: Vec<u64> = args
            .split(',')
            .filter_map(|arg| arg.trim().parse().ok())
            .collect();

        match base {
            "BOOL" | "BOOLEAN" | "BIT" => Type::Boolean,
            "TINYINT" => Type::Integer(1),
            "SMALLINT" | "INT2" => Type::Integer(2),
            "INT" | "INT4" | "MEDIUMINT" => Type::Integer(4),
            "INTEGER" | "BIGINT" | "INT8" => Type::Integer(8),
            "REAL" | "FLOAT4" => Type::Float(4),
            "FLOAT" | "FLOAT8" | "DOUBLE" | "DOUBLE PRECISION" => Type::Float(8),
            "NUMERIC" | "DECIMAL" => match args[..] {
                [precision, scale] => Type::Numeric(Some((precision as u32, scale as u32))),
                [precision] => Type::Numeric(Some((precision as u32, 0))),
                _ => Type::Numeric(None),
            },
            "TEXT" | "CLOB" | "STRING" => Type::Text,
            "VARCHAR" | "CHARACTER VARYING" | "CHAR" | "CHARACTER" | "NVARCHAR" | "NCHAR" => {
                match args[..] {
                    [len, ..] => Type::VarChar(len),
                    _ => Type::Text,
                }
            }
            "BLOB" | "BYTEA" | "BINARY" | "VARBINARY" => Type::Blob,
            "UUID" => Type::Uuid,
            "DATE" => Type::Date,
            "TIME" => Type::Time,
            "TIMESTAMP" | "DATETIME" => Type::Timestamp,
            "TIMESTAMPTZ" | "TIMESTAMP WITH TIME ZONE" => Type::TimestampTz,
            _ => Type::Custom(name.to_string()),
        }
    }

    /// The semantic type a value of this column naturally reads as.
    pub fn to_app(&self) -> Option<stmt::Type> {
        Some(match self {
            Type::Boolean => stmt::Type::Bool,
            Type::Integer(1..=4) => stmt::Type::I32,
            Type::Integer(_) => stmt::Type::I64,
            Type::Float(_) => stmt::Type::F64,
            Type::Numeric(_) => stmt::Type::Decimal,
            Type::Text | Type::VarChar(_) => stmt::Type::String,
            Type::Blob => stmt::Type::Bytes,
            Type::Uuid => stmt::Type::Uuid,
            Type::Date => stmt::Type::Date,
            Type::Time => stmt::Type::Time,
            Type::Timestamp => stmt::Type::Timestamp,
            Type::TimestampTz => stmt::Type::TimestampTz,
            Type::Custom(_) => return None,
        })
    }
}
