use super::Error;

/// Error when a builder is given an argument it cannot use, such as a blank
/// where clause or a join column on a relationship kind that has none.
#[derive(Debug)]
pub(super) struct UsageError {
    message: Box<str>,
}

impl std::error::Error for UsageError {}

impl core::fmt::Display for UsageError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid usage: {}", self.message)
    }
}

impl Error {
    /// Creates a usage error.
    pub fn usage(message: impl Into<String>) -> Error {
        Error::from(super::ErrorKind::Usage(UsageError {
            message: message.into().into(),
        }))
    }

    /// Returns `true` if this error is a usage error.
    pub fn is_usage(&self) -> bool {
        self.chain()
            .any(|err| matches!(err.kind(), super::ErrorKind::Usage(_)))
    }
}
