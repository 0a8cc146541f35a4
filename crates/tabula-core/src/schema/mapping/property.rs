use crate::schema::app::{Role, Roles};
use crate::schema::db;
use crate::stmt;

/// Correspondence between one record property and one table column.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertyMapping {
    /// The property name
    pub name: String,

    /// The property's semantic type
    pub ty: stmt::Type,

    /// The column name, with the case the database reports.
    pub column: String,

    /// The column's storage type
    pub column_ty: db::Type,

    /// Suffix used to build the property's result column label. The full
    /// label is `<prefix>_<alias_suffix>`.
    pub alias_suffix: String,

    /// Role flags. At most one is set on a verified mapping.
    pub roles: Roles,
}

impl PropertyMapping {
    pub fn is_id(&self) -> bool {
        self.roles.id
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(role)
    }

    /// The result column label of this property under `prefix`.
    pub fn label(&self, prefix: &str) -> String {
        format!("{prefix}_{}", self.alias_suffix)
    }
}
