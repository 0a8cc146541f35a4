use super::Field;

/// Declared metadata of a record type.
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    /// Name of the Rust type, used in error messages.
    pub name: String,

    /// Table the record maps to.
    pub table: TableAttr,

    /// Mapped fields, in declaration order. Relationship properties are not
    /// listed here.
    pub fields: Vec<Field>,
}

/// The `#[table(..)]` declaration of a record type.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TableAttr {
    pub name: Option<String>,
    pub schema: Option<String>,
    pub catalog: Option<String>,
}

impl Model {
    pub fn new(name: impl Into<String>) -> Model {
        Model {
            name: name.into(),
            table: TableAttr::default(),
            fields: vec![],
        }
    }

    pub fn table(mut self, name: impl Into<String>) -> Model {
        self.table.name = Some(name.into());
        self
    }

    pub fn schema(mut self, schema: impl Into<String>) -> Model {
        self.table.schema = Some(schema.into());
        self
    }

    pub fn catalog(mut self, catalog: impl Into<String>) -> Model {
        self.table.catalog = Some(catalog.into());
        self
    }

    pub fn field(mut self, field: Field) -> Model {
        self.fields.push(field);
        self
    }

    pub fn field_by_name(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }
}
