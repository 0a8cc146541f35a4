use super::Type;

/// A column as it exists in the database.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// The column name, with the case the database reports.
    pub name: String,

    /// The column's storage type
    pub ty: Type,
}

impl Column {
    pub fn new(name: impl Into<String>, ty: Type) -> Column {
        Column {
            name: name.into(),
            ty,
        }
    }
}
