use std::fmt::Display;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{branch::BranchRef, errors::ConversionError, id::EntityId};

use super::{PermissionCode, Permissions, RoleRef};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    pub const MAX_LENGTH: usize = 254;
}

impl TryFrom<String> for Email {
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
        if !value.contains('@') {
            return Err(ConversionError::InvalidFormat("expected an email address"));
        }
        Ok(Self(value))
    }
}

impl TryFrom<&str> for Email {
    type Error = ConversionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.to_string().try_into()
    }
}

impl From<Email> for String {
    fn from(value: Email) -> Self {
        value.0
    }
}

impl AsRef<str> for Email {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The signed-in actor as returned on login and by the "who am I" endpoint.
/// Also the row shape of the user management list.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Principal {
    pub id: EntityId,
    pub email: Email,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    #[serde(default)]
    pub role: Option<RoleRef>,
    #[serde(default)]
    pub branch: Option<BranchRef>,
    #[serde(default)]
    pub permissions: Permissions,
    pub date_joined: DateTime<Utc>,
    #[serde(default)]
    pub last_login: Option<DateTime<Utc>>,
}

impl Principal {
    /// True iff the principal holds `code`. A superuser is implicitly granted
    /// every permission regardless of the explicit list.
    pub fn has_permission(&self, code: &PermissionCode) -> bool {
        self.is_superuser || self.permissions.includes(std::slice::from_ref(code))
    }

    /// True iff the principal holds at least one of `codes` (superusers hold
    /// all of them by definition)
    pub fn has_any_permission(&self, codes: &[PermissionCode]) -> bool {
        self.is_superuser || self.permissions.includes_any(codes)
    }

    pub fn full_name(&self) -> String {
        match (self.first_name.is_empty(), self.last_name.is_empty()) {
            (true, true) => self.email.to_string(),
            (false, true) => self.first_name.clone(),
            (true, false) => self.last_name.clone(),
            (false, false) => format!("{} {}", self.first_name, self.last_name),
        }
    }
}

/// Abbreviated principal embedded inside other entities (e.g. a branch's
/// manager) when the backend expands the reference
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct PrincipalSummary {
    pub id: EntityId,
    pub email: Email,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

/// A principal reference arrives either as a bare id or expanded
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum PrincipalRef {
    Embedded(PrincipalSummary),
    Id(EntityId),
}

impl PrincipalRef {
    pub fn id(&self) -> &EntityId {
        match self {
            PrincipalRef::Embedded(summary) => &summary.id,
            PrincipalRef::Id(id) => id,
        }
    }
}
