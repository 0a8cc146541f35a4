use super::Error;
use crate::stmt::Value;

/// Error when a value cannot be converted to the requested type.
#[derive(Debug)]
pub(super) struct TypeConversionError {
    value: Box<str>,
    to: &'static str,
}

impl std::error::Error for TypeConversionError {}

impl core::fmt::Display for TypeConversionError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "cannot convert {} to {}", self.value, self.to)
    }
}

impl Error {
    /// Creates a type conversion error for `value` and the named target type.
    pub fn type_conversion(value: Value, to: &'static str) -> Error {
        Error::from(super::ErrorKind::TypeConversion(TypeConversionError {
            value: value.variant_name().into(),
            to,
        }))
    }

    /// Returns `true` if this error is a type conversion error.
    pub fn is_type_conversion(&self) -> bool {
        self.chain()
            .any(|err| matches!(err.kind(), super::ErrorKind::TypeConversion(_)))
    }
}
