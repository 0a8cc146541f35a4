use std::fmt;

/// Reference to a table, optionally qualified by schema and catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TableRef {
    pub catalog: Option<String>,
    pub schema: Option<String>,
    pub name: String,
}

impl TableRef {
    pub fn new(name: impl Into<String>) -> TableRef {
        TableRef {
            catalog: None,
            schema: None,
            name: name.into(),
        }
    }

    /// Returns a copy of this reference with a different table name.
    pub fn with_name(&self, name: impl Into<String>) -> TableRef {
        TableRef {
            name: name.into(),
            ..self.clone()
        }
    }
}

impl fmt::Display for TableRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(catalog) = &self.catalog {
            write!(f, "{catalog}.")?;
        }

        if let Some(schema) = &self.schema {
            write!(f, "{schema}.")?;
        }

        f.write_str(&self.name)
    }
}
