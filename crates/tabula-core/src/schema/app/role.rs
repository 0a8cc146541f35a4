use std::fmt;

/// A special meaning a field can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Role {
    Id,
    Version,
    CreatedOn,
    CreatedBy,
    UpdatedOn,
    UpdatedBy,
}

impl Role {
    pub const ALL: [Role; 6] = [
        Role::Id,
        Role::Version,
        Role::CreatedOn,
        Role::CreatedBy,
        Role::UpdatedOn,
        Role::UpdatedBy,
    ];

    /// Attribute name used to declare the role on a field.
    pub fn attr_name(self) -> &'static str {
        match self {
            Role::Id => "key",
            Role::Version => "version",
            Role::CreatedOn => "created_on",
            Role::CreatedBy => "created_by",
            Role::UpdatedOn => "updated_on",
            Role::UpdatedBy => "updated_by",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Role::Id => "id",
            Role::Version => "version",
            Role::CreatedOn => "created-on",
            Role::CreatedBy => "created-by",
            Role::UpdatedOn => "updated-on",
            Role::UpdatedBy => "updated-by",
        })
    }
}

/// Role flags of a single field or property.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Roles {
    pub id: bool,
    pub version: bool,
    pub created_on: bool,
    pub created_by: bool,
    pub updated_on: bool,
    pub updated_by: bool,
}

impl Roles {
    pub fn contains(&self, role: Role) -> bool {
        match role {
            Role::Id => self.id,
            Role::Version => self.version,
            Role::CreatedOn => self.created_on,
            Role::CreatedBy => self.created_by,
            Role::UpdatedOn => self.updated_on,
            Role::UpdatedBy => self.updated_by,
        }
    }

    pub fn insert(&mut self, role: Role) {
        *match role {
            Role::Id => &mut self.id,
            Role::Version => &mut self.version,
            Role::CreatedOn => &mut self.created_on,
            Role::CreatedBy => &mut self.created_by,
            Role::UpdatedOn => &mut self.updated_on,
            Role::UpdatedBy => &mut self.updated_by,
        } = true;
    }

    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none()
    }

    pub fn iter(&self) -> impl Iterator<Item = Role> + '_ {
        Role::ALL.into_iter().filter(|role| self.contains(*role))
    }
}

impl FromIterator<Role> for Roles {
    fn from_iter<I: IntoIterator<Item = Role>>(iter: I) -> Self {
        let mut roles = Roles::default();
        for role in iter {
            roles.insert(role);
        }
        roles
    }
}
