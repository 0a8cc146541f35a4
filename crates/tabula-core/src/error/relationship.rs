use super::Error;
use crate::stmt::Type;

/// Error when a declared relationship does not fit the mappings of the two
/// record types it connects.
#[derive(Debug)]
pub(super) struct RelationshipError {
    owner: Box<str>,
    related: Box<str>,
    violations: Vec<RelationshipViolation>,
}

/// A single reason a relationship declaration is rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum RelationshipViolation {
    /// The owner has no property with the populate-property name.
    PropertyNotFound { property: String },

    /// The populate-property is a mapped column, not a relationship property.
    NotARelationship { property: String },

    /// The populate-property does not hold the expected type.
    PropertyTypeMismatch { property: String, expected: String },

    /// A to-many populate-property has no collection instance to fill.
    CollectionNotInitialized { property: String },

    /// The relationship kind requires a join column and none was given.
    MissingJoinColumn,

    /// A join column name is blank or qualified with a table prefix.
    InvalidJoinColumn { column: String },

    /// The join column is not a mapped column of the table it belongs to.
    JoinColumnNotFound { column: String, table: String },

    /// The join column's property type differs from the referenced id type.
    JoinColumnTypeMismatch {
        column: String,
        column_ty: Type,
        id_ty: Type,
    },

    /// A many-to-many relationship was given no join table.
    MissingThroughTable,

    /// The join table name is blank or qualified.
    InvalidThroughTable { table: String },

    /// A join table column is blank or qualified.
    InvalidThroughColumn { column: String },

    /// A limit/offset clause was combined with a to-many relationship.
    LimitOnPlural,
}

impl std::error::Error for RelationshipError {}

impl core::fmt::Display for RelationshipError {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "invalid relationship from `{}` to `{}`: ",
            self.owner, self.related
        )?;

        let mut s = "";
        for violation in &self.violations {
            write!(f, "{s}{violation}")?;
            s = "; ";
        }

        Ok(())
    }
}

impl core::fmt::Display for RelationshipViolation {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use RelationshipViolation::*;

        match self {
            PropertyNotFound { property } => write!(f, "property `{property}` not found"),
            NotARelationship { property } => {
                write!(f, "property `{property}` is not a relationship property")
            }
            PropertyTypeMismatch { property, expected } => {
                write!(f, "property `{property}` must have type `{expected}`")
            }
            CollectionNotInitialized { property } => write!(
                f,
                "property `{property}` must hold an initialized collection"
            ),
            MissingJoinColumn => f.write_str("no join column was specified"),
            InvalidJoinColumn { column } => write!(
                f,
                "join column `{column}` must be a non-blank, unqualified column name"
            ),
            JoinColumnNotFound { column, table } => {
                write!(f, "join column `{column}` is not a mapped column of `{table}`")
            }
            JoinColumnTypeMismatch {
                column,
                column_ty,
                id_ty,
            } => write!(
                f,
                "join column `{column}` has type {column_ty:?} but the id it references has type {id_ty:?}"
            ),
            MissingThroughTable => f.write_str("no join table was specified"),
            InvalidThroughTable { table } => write!(
                f,
                "join table `{table}` must be a non-blank, unqualified table name"
            ),
            InvalidThroughColumn { column } => write!(
                f,
                "join table column `{column}` must be a non-blank, unqualified column name"
            ),
            LimitOnPlural => f.write_str(
                "a limit/offset clause is only supported for one-to-one relationships",
            ),
        }
    }
}

impl Error {
    /// Creates a relationship error between the named owner and related records.
    pub fn relationship(
        owner: impl Into<String>,
        related: impl Into<String>,
        violations: Vec<RelationshipViolation>,
    ) -> Error {
        debug_assert!(!violations.is_empty());

        Error::from(super::ErrorKind::Relationship(RelationshipError {
            owner: owner.into().into(),
            related: related.into().into(),
            violations,
        }))
    }

    /// Returns `true` if this error is a relationship error.
    pub fn is_relationship(&self) -> bool {
        self.relationship_violations().is_some()
    }

    /// Returns every violation carried by a relationship error.
    pub fn relationship_violations(&self) -> Option<&[RelationshipViolation]> {
        self.find(|kind| match kind {
            super::ErrorKind::Relationship(err) => Some(&err.violations),
            _ => None,
        })
        .map(Vec::as_slice)
    }
}
