//! Live table metadata as reported by a [`ColumnMetadata`](crate::driver::ColumnMetadata)
//! provider.

mod column;
pub use column::Column;

mod table_ref;
pub use table_ref::TableRef;

mod ty;
pub use ty::Type;
