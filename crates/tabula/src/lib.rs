//! Relationship queries over mapped records.
//!
//! A [`Mapper`] owns the mapping and SQL caches. Record types describe
//! themselves with `#[derive(Record)]`; the mapper reconciles that
//! description with the live table columns once per type, then builds and
//! caches SQL per query shape.
//!
//! ```ignore
//! let mapper = Mapper::new(db.clone());
//!
//! let orders = Query::<Order>::new(&mapper)
//!     .has_many::<OrderLine>()
//!     .join_column_many_side("order_id")
//!     .populate_property("lines")
//!     .where_clause("orders.status = :status")
//!     .param("status", "open")
//!     .execute(&db)?;
//! ```

extern crate self as tabula;

mod mapper;
pub use mapper::{Builder, CacheStats, Config, Mapper, ShapeCacheStats};

pub mod query;
pub use query::{Query, QueryCount, QueryMerge};

pub mod relation;
pub use relation::{Kind, Relationship};

mod select_mapper;
pub use select_mapper::SelectMapper;

mod shape;

pub use tabula_core::{
    driver::{ColumnMetadata, Executor, Row},
    schema::{self, mapping::TableMapping},
    stmt::{self, Params, Primitive, Type, Value},
    Error, MappingViolation, Record, RelationField, RelationMut, RelationshipViolation, Result,
};

pub use tabula_macros::Record;

#[doc(hidden)]
pub mod codegen_support {
    pub use tabula_core::{
        schema::app,
        stmt::{Primitive, Value},
        Error, Record, RelationField, RelationMut, Result,
    };

    pub fn unknown_property(record: &str, property: &str) -> Error {
        Error::usage(format!("`{record}` has no mapped property `{property}`"))
    }

    pub fn property_error(err: Error, record: &str, property: &str) -> Error {
        err.context(format!("failed to set `{record}.{property}`"))
    }
}
