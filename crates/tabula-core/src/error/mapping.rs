use super::Error;
use crate::schema::app::Role;
use crate::stmt::Type;

/// Error when a record type cannot be mapped onto its table.
///
/// Every violation found while reconciling the record's declared fields with
/// the live table columns is collected, so a single error reports all of
/// them.
#[derive(Debug)]
pub(super) struct MappingError {
    record: Box<str>,
    violations: Vec<MappingViolation>,
}

/// A single reason a record type cannot be mapped.
#[derive(Debug, Clone, PartialEq)]
pub enum MappingViolation {
    /// The record does not declare a table name, or declares a blank one.
    MissingTableName,

    /// No columns were found for the table, after retrying the name
    /// upper-cased and lower-cased.
    TableNotFound { table: String },

    /// A property names a column explicitly and the table has no such column.
    ColumnNotFound { property: String, column: String },

    /// No mapped property carries the id role.
    MissingId,

    /// More than one property carries a role that must be unique.
    DuplicateRole { role: Role, properties: Vec<String> },

    /// A property carries more than one role.
    ConflictingRoles { property: String, roles: Vec<Role> },

    /// A property's type cannot hold the role it carries.
    InvalidRoleType {
        property: String,
        role: Role,
        ty: Type,
    },
}

impl std::error::Error for MappingError {}

impl core::fmt::Display for MappingError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "invalid mapping for `{}`: ", self.record)?;

        let mut s = "";
        for violation in &self.violations {
            write!(f, "{s}{violation}")?;
            s = "; ";
        }

        Ok(())
    }
}

impl core::fmt::Display for MappingViolation {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self {
            MappingViolation::MissingTableName => f.write_str("no table name is declared"),
            MappingViolation::TableNotFound { table } => {
                write!(f, "table `{table}` not found")
            }
            MappingViolation::ColumnNotFound { property, column } => write!(
                f,
                "property `{property}` references column `{column}` which does not exist"
            ),
            MappingViolation::MissingId => f.write_str("no property is marked as the id"),
            MappingViolation::DuplicateRole { role, properties } => write!(
                f,
                "{role} role is declared on more than one property ({})",
                properties.join(", ")
            ),
            MappingViolation::ConflictingRoles { property, roles } => {
                write!(f, "property `{property}` has conflicting roles (")?;
                let mut s = "";
                for role in roles {
                    write!(f, "{s}{role}")?;
                    s = ", ";
                }
                f.write_str(")")
            }
            MappingViolation::InvalidRoleType { property, role, ty } => write!(
                f,
                "property `{property}` has type {ty:?} which cannot hold the {role} role"
            ),
        }
    }
}

impl Error {
    /// Creates a mapping error for the named record.
    pub fn mapping(record: impl Into<String>, violations: Vec<MappingViolation>) -> Error {
        debug_assert!(!violations.is_empty());

        Error::from(super::ErrorKind::Mapping(MappingError {
            record: record.into().into(),
            violations,
        }))
    }

    /// Returns `true` if this error is a mapping error.
    pub fn is_mapping(&self) -> bool {
        self.mapping_violations().is_some()
    }

    /// Returns every violation carried by a mapping error.
    pub fn mapping_violations(&self) -> Option<&[MappingViolation]> {
        self.find(|kind| match kind {
            super::ErrorKind::Mapping(err) => Some(&err.violations),
            _ => None,
        })
        .map(Vec::as_slice)
    }
}
