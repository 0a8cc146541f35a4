//! Relationship declarations and their validation.

mod verify;
pub use verify::verify;

use tabula_core::{Error, Record, RelationshipViolation, Result};

use std::fmt;

/// How owner and related records are connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// The owner table holds a join column referencing the related id. The
    /// populate-property holds `Option<Related>`.
    OneToOne,

    /// The related table holds a join column referencing the owner id. The
    /// populate-property holds `Vec<Related>`.
    OneToMany,

    /// A join table holds one column referencing the owner id and one
    /// referencing the related id. The populate-property holds
    /// `Vec<Related>`.
    ManyToMany,
}

impl Kind {
    pub fn is_plural(self) -> bool {
        !matches!(self, Kind::OneToOne)
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Kind::OneToOne => "one-to-one",
            Kind::OneToMany => "one-to-many",
            Kind::ManyToMany => "many-to-many",
        })
    }
}

/// A declared relationship between an owner and a related record type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Relationship {
    pub kind: Kind,

    /// Owner property the related records are assigned to
    pub property: String,

    /// Owner-side column for [`Kind::OneToOne`], related-side column for
    /// [`Kind::OneToMany`].
    pub join_column: Option<String>,

    /// Join table of a [`Kind::ManyToMany`] relationship
    pub through_table: Option<String>,

    /// Join table columns referencing the owner id and the related id, in
    /// that order.
    pub through_columns: Option<(String, String)>,
}

impl Relationship {
    pub fn new(kind: Kind, property: impl Into<String>) -> Relationship {
        Relationship {
            kind,
            property: property.into(),
            join_column: None,
            through_table: None,
            through_columns: None,
        }
    }

    pub fn join_column(mut self, column: impl Into<String>) -> Relationship {
        self.join_column = Some(column.into());
        self
    }

    pub fn through(
        mut self,
        table: impl Into<String>,
        owner_column: impl Into<String>,
        related_column: impl Into<String>,
    ) -> Relationship {
        self.through_table = Some(table.into());
        self.through_columns = Some((owner_column.into(), related_column.into()));
        self
    }
}

/// The `Option<R>` slot of a to-one populate-property.
pub(crate) fn one_slot<'a, O: Record, R: Record>(
    owner: &'a mut O,
    property: &str,
) -> Result<&'a mut Option<R>> {
    owner
        .relation(property)
        .and_then(|slot| slot.one::<R>())
        .ok_or_else(|| {
            type_mismatch::<O, R>(property, std::any::type_name::<Option<R>>())
        })
}

/// The `Vec<R>` slot of a to-many populate-property.
pub(crate) fn many_slot<'a, O: Record, R: Record>(
    owner: &'a mut O,
    property: &str,
) -> Result<&'a mut Vec<R>> {
    let Some(slot) = owner.relation(property) else {
        return Err(type_mismatch::<O, R>(
            property,
            std::any::type_name::<Vec<R>>(),
        ));
    };

    if !slot.is_initialized() {
        return Err(Error::relationship(
            std::any::type_name::<O>(),
            std::any::type_name::<R>(),
            vec![RelationshipViolation::CollectionNotInitialized {
                property: property.to_string(),
            }],
        ));
    }

    slot.many::<R>()
        .ok_or_else(|| type_mismatch::<O, R>(property, std::any::type_name::<Vec<R>>()))
}

fn type_mismatch<O, R>(property: &str, expected: &str) -> Error {
    Error::relationship(
        std::any::type_name::<O>(),
        std::any::type_name::<R>(),
        vec![RelationshipViolation::PropertyTypeMismatch {
            property: property.to_string(),
            expected: expected.to_string(),
        }],
    )
}
