//! Interfaces a database driver implements.
//!
//! The engine never opens connections or runs SQL itself. It asks a
//! [`ColumnMetadata`] provider for live table columns when building a
//! mapping, and hands generated SQL to an [`Executor`] that streams back
//! [`Row`]s.

use crate::{
    schema::db::{Column, TableRef},
    stmt::{Params, Type, Value},
    Result,
};

use std::sync::Arc;

/// Reports the live columns of a table.
pub trait ColumnMetadata: Send + Sync {
    /// Returns the columns of `table` in table order. A table that does not
    /// exist yields an empty list rather than an error.
    fn columns(&self, table: &TableRef) -> Result<Vec<Column>>;
}

impl<T: ColumnMetadata + ?Sized> ColumnMetadata for Arc<T> {
    fn columns(&self, table: &TableRef) -> Result<Vec<Column>> {
        (**self).columns(table)
    }
}

impl<T: ColumnMetadata + ?Sized> ColumnMetadata for &T {
    fn columns(&self, table: &TableRef) -> Result<Vec<Column>> {
        (**self).columns(table)
    }
}

/// A single result row, addressed by column index.
pub trait Row {
    /// Number of columns in the row
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The label (`AS` name) of the column at `index`.
    fn label(&self, index: usize) -> &str;

    fn is_null(&self, index: usize) -> bool;

    /// Reads the column at `index` as a value of type `ty`. Null columns
    /// read as [`Value::Null`].
    fn get(&self, index: usize, ty: &Type) -> Result<Value>;

    /// Index of the column labelled `label`, compared case-insensitively.
    fn index_of(&self, label: &str) -> Option<usize> {
        (0..self.len()).find(|i| self.label(*i).eq_ignore_ascii_case(label))
    }
}

/// Runs SQL with named parameters.
pub trait Executor {
    /// Runs `sql`, calling `each` once per result row in stream order. An
    /// error returned by `each` stops the query and is returned as is.
    fn query(
        &self,
        sql: &str,
        params: &Params,
        each: &mut dyn FnMut(&dyn Row) -> Result<()>,
    ) -> Result<()>;
}

impl<T: Executor + ?Sized> Executor for &T {
    fn query(
        &self,
        sql: &str,
        params: &Params,
        each: &mut dyn FnMut(&dyn Row) -> Result<()>,
    ) -> Result<()> {
        (**self).query(sql, params, each)
    }
}

impl<T: Executor + ?Sized> Executor for Arc<T> {
    fn query(
        &self,
        sql: &str,
        params: &Params,
        each: &mut dyn FnMut(&dyn Row) -> Result<()>,
    ) -> Result<()> {
        (**self).query(sql, params, each)
    }
}
