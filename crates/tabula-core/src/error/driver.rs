use super::Error;

/// Error reported by the execution boundary (the database driver).
#[derive(Debug)]
pub(super) struct DriverError {
    inner: Box<dyn std::error::Error + Send + Sync>,
}

impl std::error::Error for DriverError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.inner)
    }
}

impl core::fmt::Display for DriverError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "driver operation failed: {}", self.inner)
    }
}

impl Error {
    /// Wraps an error raised by a driver while fetching metadata or rows.
    pub fn driver(err: impl std::error::Error + Send + Sync + 'static) -> Error {
        Error::from(super::ErrorKind::Driver(DriverError {
            inner: Box::new(err),
        }))
    }

    /// Returns `true` if this error was raised by a driver.
    pub fn is_driver(&self) -> bool {
        self.chain()
            .any(|err| matches!(err.kind(), super::ErrorKind::Driver(_)))
    }
}
