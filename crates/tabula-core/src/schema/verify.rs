use super::{app::Role, mapping::PropertyMapping};
use crate::{stmt::Type, MappingViolation};

pub(super) struct Verify<'a> {
    properties: &'a [PropertyMapping],
    violations: Vec<MappingViolation>,
}

impl<'a> Verify<'a> {
    pub(super) fn new(properties: &'a [PropertyMapping]) -> Self {
        Verify {
            properties,
            violations: vec![],
        }
    }

    pub(super) fn verify(mut self) -> Vec<MappingViolation> {
        self.verify_one_id();
        self.verify_roles_are_unique();
        self.verify_one_role_per_property();
        self.verify_role_types();
        self.violations
    }

    fn with_role(&self, role: Role) -> Vec<String> {
        self.properties
            .iter()
            .filter(|property| property.has_role(role))
            .map(|property| property.name.clone())
            .collect()
    }

    fn verify_one_id(&mut self) {
        if self.with_role(Role::Id).is_empty() {
            self.violations.push(MappingViolation::MissingId);
        }
    }

    fn verify_roles_are_unique(&mut self) {
        for role in Role::ALL {
            let properties = self.with_role(role);

            if properties.len() > 1 {
                self.violations
                    .push(MappingViolation::DuplicateRole { role, properties });
            }
        }
    }

    fn verify_one_role_per_property(&mut self) {
        for property in self.properties {
            let roles: Vec<_> = property.roles.iter().collect();

            if roles.len() > 1 {
                self.violations.push(MappingViolation::ConflictingRoles {
                    property: property.name.clone(),
                    roles,
                });
            }
        }
    }

    fn verify_role_types(&mut self) {
        for property in self.properties {
            for role in property.roles.iter() {
                let ok = match role {
                    Role::Version => property.ty.is_integer(),
                    Role::CreatedOn | Role::UpdatedOn => property.ty.is_temporal(),
                    Role::Id | Role::CreatedBy | Role::UpdatedBy => true,
                };

                if !ok {
                    self.violations.push(MappingViolation::InvalidRoleType {
                        property: property.name.clone(),
                        role,
                        ty: property.ty.clone(),
                    });
                }
            }
        }
    }
}
