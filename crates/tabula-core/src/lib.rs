pub mod driver;
pub use driver::{ColumnMetadata, Executor, Row};

mod error;
pub use error::{Error, IntoError, MappingViolation, RelationshipViolation};

pub mod record;
pub use record::{Record, RelationField, RelationMut};

pub mod schema;

pub mod stmt;

/// A Result type alias that uses Tabula's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
