use tabula_core::schema::db::TableRef;

/// A table name, optionally qualified by schema and catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableName {
    pub catalog: Option<String>,
    pub schema: Option<String>,
    pub name: String,
}

impl TableName {
    pub fn new(name: impl Into<String>) -> TableName {
        TableName {
            catalog: None,
            schema: None,
            name: name.into(),
        }
    }

    pub(crate) fn parts(&self) -> impl Iterator<Item = &str> {
        self.catalog
            .as_deref()
            .into_iter()
            .chain(self.schema.as_deref())
            .chain(Some(self.name.as_str()))
    }
}

impl From<&TableRef> for TableName {
    fn from(value: &TableRef) -> Self {
        TableName {
            catalog: value.catalog.clone(),
            schema: value.schema.clone(),
            name: value.name.clone(),
        }
    }
}

/// A table in a `FROM` or `JOIN` clause together with its alias.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableFactor {
    pub name: TableName,
    pub alias: String,
}

impl TableFactor {
    pub fn new(name: impl Into<TableName>, alias: impl Into<String>) -> TableFactor {
        TableFactor {
            name: name.into(),
            alias: alias.into(),
        }
    }
}

impl From<&str> for TableName {
    fn from(value: &str) -> Self {
        TableName::new(value)
    }
}
