use super::PropertyMapping;
use crate::schema::app::Role;
use crate::schema::db::TableRef;

use std::collections::HashMap;

/// The resolved mapping of a record type onto a table.
///
/// Built once per record type by [`Builder`](crate::schema::Builder) and
/// immutable afterwards. Exactly one property carries the id role.
#[derive(Debug, Clone)]
pub struct TableMapping {
    /// Name of the record type
    pub record: String,

    /// The resolved table. The name has the case under which the database
    /// reported columns.
    pub table: TableRef,

    /// Mapped properties, in declaration order.
    pub properties: Vec<PropertyMapping>,

    /// Index of the id property in `properties`
    id: usize,

    /// Lower-cased column name to property index
    by_column: HashMap<String, usize>,

    /// Property name to property index
    by_property: HashMap<String, usize>,
}

impl TableMapping {
    pub(crate) fn new(
        record: String,
        table: TableRef,
        properties: Vec<PropertyMapping>,
        id: usize,
    ) -> TableMapping {
        let by_column = properties
            .iter()
            .enumerate()
            .map(|(i, property)| (property.column.to_lowercase(), i))
            .collect();

        let by_property = properties
            .iter()
            .enumerate()
            .map(|(i, property)| (property.name.clone(), i))
            .collect();

        TableMapping {
            record,
            table,
            properties,
            id,
            by_column,
            by_property,
        }
    }

    /// The table name used in generated SQL.
    pub fn table_name(&self) -> &str {
        &self.table.name
    }

    /// The id property
    pub fn id(&self) -> &PropertyMapping {
        &self.properties[self.id]
    }

    /// Looks up a property by column name, ignoring case.
    pub fn property_by_column(&self, column: &str) -> Option<&PropertyMapping> {
        self.by_column
            .get(&column.to_lowercase())
            .map(|i| &self.properties[*i])
    }

    /// Looks up a property by name.
    pub fn property(&self, name: &str) -> Option<&PropertyMapping> {
        self.by_property.get(name).map(|i| &self.properties[*i])
    }

    /// The property carrying `role`, if any.
    pub fn property_with_role(&self, role: Role) -> Option<&PropertyMapping> {
        self.properties.iter().find(|property| property.has_role(role))
    }

    pub fn version(&self) -> Option<&PropertyMapping> {
        self.property_with_role(Role::Version)
    }

    pub fn created_on(&self) -> Option<&PropertyMapping> {
        self.property_with_role(Role::CreatedOn)
    }

    pub fn created_by(&self) -> Option<&PropertyMapping> {
        self.property_with_role(Role::CreatedBy)
    }

    pub fn updated_on(&self) -> Option<&PropertyMapping> {
        self.property_with_role(Role::UpdatedOn)
    }

    pub fn updated_by(&self) -> Option<&PropertyMapping> {
        self.property_with_role(Role::UpdatedBy)
    }
}
