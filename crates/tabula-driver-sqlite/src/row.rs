use crate::value;

use tabula_core::{
    driver::Row,
    stmt::{Type, Value},
    Result,
};

/// A result row copied out of the SQLite cursor.
pub(crate) struct SqliteRow<'a> {
    labels: &'a [String],
    values: Vec<Value>,
}

impl<'a> SqliteRow<'a> {
    pub(crate) fn read(labels: &'a [String], row: &rusqlite::Row<'_>) -> Result<SqliteRow<'a>> {
        let values = (0..labels.len())
            .map(|index| value::read(row, index))
            .collect::<Result<_>>()?;

        Ok(SqliteRow { labels, values })
    }
}

impl Row for SqliteRow<'_> {
    fn len(&self) -> usize {
        self.values.len()
    }

    fn label(&self, index: usize) -> &str {
        &self.labels[index]
    }

    fn is_null(&self, index: usize) -> bool {
        self.values[index].is_null()
    }

    fn get(&self, index: usize, ty: &Type) -> Result<Value> {
        ty.cast(self.values[index].clone())
    }
}
