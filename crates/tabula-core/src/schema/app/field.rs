use super::{Role, Roles};
use crate::stmt::{Primitive, Type};

/// A declared record field that maps to a column.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    /// The property name
    pub name: String,

    /// The property's semantic type
    pub ty: Type,

    /// True if the field can hold null (`Option` in Rust).
    pub nullable: bool,

    /// Column named by `#[column("..")]`. When unset the column name is the
    /// snake_case form of the property name.
    pub column: Option<String>,

    /// Role markers declared on the field.
    pub roles: Roles,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: Type) -> Field {
        Field {
            name: name.into(),
            ty,
            nullable: false,
            column: None,
            roles: Roles::default(),
        }
    }

    /// Builds a field whose type and nullability come from `T`.
    pub fn of<T: Primitive>(name: impl Into<String>) -> Field {
        Field {
            nullable: T::NULLABLE,
            ..Field::new(name, T::TYPE)
        }
    }

    pub fn column(mut self, column: impl Into<String>) -> Field {
        self.column = Some(column.into());
        self
    }

    pub fn role(mut self, role: Role) -> Field {
        self.roles.insert(role);
        self
    }

    pub fn id(self) -> Field {
        self.role(Role::Id)
    }

    pub fn nullable(mut self) -> Field {
        self.nullable = true;
        self
    }
}
