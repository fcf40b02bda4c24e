use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::{errors::ConversionError, id::EntityId};

use super::AppPermission;

/// Named permission bundle, zero-or-one per principal
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Role {
    pub id: EntityId,
    pub name: RoleName,
    #[serde(default)]
    pub description: RoleDescription,
    #[serde(default)]
    pub permissions: Vec<AppPermission>,
}

/// Create/update payload for a role. Permissions are referenced by id, the
/// backend resolves and embeds them on the way back out.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RoleDraft {
    pub name: RoleName,
    pub description: RoleDescription,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permission_ids: Vec<EntityId>,
}

/// A principal's role arrives either as a bare id or embedded, depending on
/// which serializer the backend used for the enclosing payload
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum RoleRef {
    Embedded(Role),
    Id(EntityId),
}

impl RoleRef {
    pub fn id(&self) -> &EntityId {
        match self {
            RoleRef::Embedded(role) => &role.id,
            RoleRef::Id(id) => id,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct RoleName(String);

impl RoleName {
    pub const MAX_LENGTH: usize = 50;
}

#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
#[serde(try_from = "String", into = "String")]
pub struct RoleDescription(String);

impl RoleDescription {
    pub const MAX_LENGTH: usize = 255;
}

impl TryFrom<String> for RoleName {
    type Error = ConversionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            return Err(ConversionError::Empty);
        }
        if value.len() > Self::MAX_LENGTH {
            return Err(ConversionError::MaxExceeded {
                max: Self::MAX_LENGTH,
                actual: value.len(),
            });
        }
        Ok(Self(value))
    }
}

impl TryFrom<String> for RoleDescription {
    type Error = ConversionError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.len() > Self::MAX_LENGTH {
            return Err(ConversionError::MaxExceeded {
                max: Self::MAX_LENGTH,
                actual: value.len(),
            });
        }
        Ok(Self(value))
    }
}

impl From<RoleName> for String {
    fn from(value: RoleName) -> Self {
        value.0
    }
}

impl From<RoleDescription> for String {
    fn from(value: RoleDescription) -> Self {
        value.0
    }
}

impl Deref for RoleName {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0[..]
    }
}

impl Deref for RoleDescription {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0[..]
    }
}
