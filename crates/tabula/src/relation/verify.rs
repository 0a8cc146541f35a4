use super::{Kind, Relationship};

use tabula_core::{
    schema::mapping::{PropertyMapping, TableMapping},
    Record, RelationshipViolation,
};

use std::any::type_name;

/// Checks `relationship` against the mappings of its owner `O` and related
/// record `R`, returning every violation found.
///
/// Performs no I/O. The populate-property is inspected on a default owner
/// instance.
pub fn verify<O: Record, R: Record>(
    owner: &TableMapping,
    related: &TableMapping,
    relationship: &Relationship,
) -> Vec<RelationshipViolation> {
    let mut verify = Verify {
        owner,
        relationship,
        violations: vec![],
    };

    verify.verify_property::<O, R>();

    match relationship.kind {
        Kind::OneToOne => verify.verify_join_column(owner, related),
        Kind::OneToMany => verify.verify_join_column(related, owner),
        Kind::ManyToMany => verify.verify_through(),
    }

    verify.violations
}

struct Verify<'a> {
    owner: &'a TableMapping,
    relationship: &'a Relationship,
    violations: Vec<RelationshipViolation>,
}

impl Verify<'_> {
    fn verify_property<O: Record, R: Record>(&mut self) {
        let relationship = self.relationship;
        let property = &relationship.property;
        let mut probe = O::default();

        let Some(slot) = probe.relation(property) else {
            let violation = if self.owner.property(property).is_some() {
                RelationshipViolation::NotARelationship {
                    property: property.clone(),
                }
            } else {
                RelationshipViolation::PropertyNotFound {
                    property: property.clone(),
                }
            };
            self.violations.push(violation);
            return;
        };

        if relationship.kind.is_plural() {
            if !slot.is_initialized() {
                self.violations
                    .push(RelationshipViolation::CollectionNotInitialized {
                        property: property.clone(),
                    });
            } else if slot.many::<R>().is_none() {
                self.violations
                    .push(RelationshipViolation::PropertyTypeMismatch {
                        property: property.clone(),
                        expected: type_name::<Vec<R>>().to_string(),
                    });
            }
        } else if slot.one::<R>().is_none() {
            self.violations
                .push(RelationshipViolation::PropertyTypeMismatch {
                    property: property.clone(),
                    expected: type_name::<Option<R>>().to_string(),
                });
        }
    }

    /// The join column lives on `holder` and references the id of
    /// `referenced`.
    fn verify_join_column(&mut self, holder: &TableMapping, referenced: &TableMapping) {
        let relationship = self.relationship;

        let Some(column) = &relationship.join_column else {
            self.violations.push(RelationshipViolation::MissingJoinColumn);
            return;
        };

        if !is_simple_name(column) {
            self.violations
                .push(RelationshipViolation::InvalidJoinColumn {
                    column: column.clone(),
                });
            return;
        }

        let Some(property) = holder.property_by_column(column) else {
            self.violations
                .push(RelationshipViolation::JoinColumnNotFound {
                    column: column.clone(),
                    table: holder.table_name().to_string(),
                });
            return;
        };

        self.verify_types_match(column, property, referenced.id());
    }

    fn verify_types_match(&mut self, column: &str, property: &PropertyMapping, id: &PropertyMapping) {
        if property.ty != id.ty {
            self.violations
                .push(RelationshipViolation::JoinColumnTypeMismatch {
                    column: column.to_string(),
                    column_ty: property.ty.clone(),
                    id_ty: id.ty.clone(),
                });
        }
    }

    fn verify_through(&mut self) {
        let relationship = self.relationship;

        match &relationship.through_table {
            None => self
                .violations
                .push(RelationshipViolation::MissingThroughTable),
            Some(table) if !is_simple_name(table) => {
                self.violations
                    .push(RelationshipViolation::InvalidThroughTable {
                        table: table.clone(),
                    })
            }
            Some(_) => {}
        }

        let Some((owner_column, related_column)) = &relationship.through_columns else {
            self.violations.push(RelationshipViolation::MissingJoinColumn);
            return;
        };

        for column in [owner_column, related_column] {
            if !is_simple_name(column) {
                self.violations
                    .push(RelationshipViolation::InvalidThroughColumn {
                        column: column.clone(),
                    });
            }
        }
    }
}

/// Non-blank and unqualified
fn is_simple_name(name: &str) -> bool {
    !name.trim().is_empty() && !name.contains('.')
}
