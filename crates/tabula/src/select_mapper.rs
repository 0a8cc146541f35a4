use tabula_core::{
    driver::Row,
    schema::mapping::{PropertyMapping, TableMapping},
    stmt::Value,
    Record, Result,
};
use tabula_sql::stmt::{ColumnRef, SelectItem};

use std::{collections::HashMap, marker::PhantomData, sync::Arc};

/// Projection of a record's columns under a table alias.
///
/// Every mapped property is selected as `<alias>.<column> AS
/// <prefix>_<alias suffix>`, where the label prefix defaults to the alias.
/// Materializing reads back exactly the columns whose labels belong to this
/// projection, so several projections can share one result row as long as
/// their label prefixes differ.
pub struct SelectMapper<T> {
    mapping: Arc<TableMapping>,
    alias: String,

    /// Prefix of every result label of this projection
    prefix: String,

    /// Lower-cased result label to property index
    labels: HashMap<String, usize>,

    /// Lower-cased label of the id column
    id_label: String,

    _record: PhantomData<fn() -> T>,
}

impl<T: Record> SelectMapper<T> {
    pub(crate) fn new(mapping: Arc<TableMapping>, alias: impl Into<String>) -> SelectMapper<T> {
        let alias = alias.into();
        let prefix = alias.clone();
        SelectMapper::labelled(mapping, alias, prefix)
    }

    /// A projection whose labels start with `prefix` instead of the alias.
    ///
    /// Generated statements give each projection its own prefix. Labels
    /// derived from table aliases can collide, e.g. table `a` with column
    /// `b_id` and table `a_b` with column `id` both give `a_b_id`.
    pub(crate) fn labelled(
        mapping: Arc<TableMapping>,
        alias: impl Into<String>,
        prefix: impl Into<String>,
    ) -> SelectMapper<T> {
        let alias = alias.into();
        let prefix = prefix.into();

        let labels = mapping
            .properties
            .iter()
            .enumerate()
            .map(|(i, property)| (property.label(&prefix).to_lowercase(), i))
            .collect();

        let id_label = mapping.id().label(&prefix).to_lowercase();

        SelectMapper {
            mapping,
            alias,
            prefix,
            labels,
            id_label,
            _record: PhantomData,
        }
    }

    pub fn mapping(&self) -> &TableMapping {
        &self.mapping
    }

    pub fn alias(&self) -> &str {
        &self.alias
    }

    /// The projection as statement items.
    pub fn select_items(&self) -> Vec<SelectItem> {
        self.mapping
            .properties
            .iter()
            .map(|property| SelectItem {
                column: self.column_ref(property),
                label: property.label(&self.prefix),
            })
            .collect()
    }

    /// The projection as a SQL fragment, e.g.
    /// `orders.order_id AS orders_order_id, orders.status AS orders_status`.
    pub fn columns_sql(&self) -> String {
        self.mapping
            .properties
            .iter()
            .map(|property| {
                format!(
                    "{}.{} AS {}",
                    self.alias,
                    property.column,
                    property.label(&self.prefix)
                )
            })
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Label of the id column in a result row.
    pub fn id_column_label(&self) -> String {
        self.mapping.id().label(&self.prefix)
    }

    /// `<alias>.<column>` of `property`.
    pub(crate) fn column_ref(&self, property: &PropertyMapping) -> ColumnRef {
        ColumnRef::new(&self.alias, &property.column)
    }

    /// Index of the id column in `row`, if the row carries it.
    fn id_index(&self, row: &dyn Row) -> Option<usize> {
        (0..row.len()).find(|i| row.label(*i).eq_ignore_ascii_case(&self.id_label))
    }

    /// Reads the id value from `row`. Returns [`Value::Null`] when the id
    /// column is absent or null.
    pub fn id_value(&self, row: &dyn Row) -> Result<Value> {
        match self.id_index(row) {
            Some(index) => row.get(index, &self.mapping.id().ty),
            None => Ok(Value::Null),
        }
    }

    /// Reads the value of the column labelled for `property`.
    pub(crate) fn property_value(&self, row: &dyn Row, property: &PropertyMapping) -> Result<Value> {
        let label = property.label(&self.prefix);

        match row.index_of(&label) {
            Some(index) => row.get(index, &property.ty),
            None => Ok(Value::Null),
        }
    }

    /// Builds a record from the columns of `row` that belong to this
    /// projection.
    ///
    /// Returns `None` when the id column is missing or null, even if other
    /// columns carry values. This is how an unmatched outer join row reads.
    pub fn materialize(&self, row: &dyn Row) -> Result<Option<T>> {
        let Some(id_index) = self.id_index(row) else {
            return Ok(None);
        };

        if row.is_null(id_index) {
            return Ok(None);
        }

        let mut record = T::default();

        for index in 0..row.len() {
            let Some(&property) = self.labels.get(&row.label(index).to_lowercase()) else {
                continue;
            };

            let property = &self.mapping.properties[property];
            let value = row.get(index, &property.ty)?;
            record.set(&property.name, value)?;
        }

        Ok(Some(record))
    }
}

impl<T> Clone for SelectMapper<T> {
    fn clone(&self) -> Self {
        SelectMapper {
            mapping: self.mapping.clone(),
            alias: self.alias.clone(),
            prefix: self.prefix.clone(),
            labels: self.labels.clone(),
            id_label: self.id_label.clone(),
            _record: PhantomData,
        }
    }
}

impl<T> std::fmt::Debug for SelectMapper<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectMapper")
            .field("table", &self.mapping.table)
            .field("alias", &self.alias)
            .finish()
    }
}
