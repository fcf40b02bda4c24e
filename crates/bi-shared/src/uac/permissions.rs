use std::{
    collections::BTreeSet,
    fmt::{Debug, Display},
};

use chrono::{DateTime, Utc};

use crate::{errors::ConversionError, id::EntityId};

/// Machine code for an atomic capability grant in the form `module.action`,
/// e.g. `userManagement.view_role`. The backend treats these as reference
/// data; the client only ever tests membership.
#[derive(
    Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(try_from = "String", into = "String")]
pub struct PermissionCode(String);

impl PermissionCode {
    pub const MAX_LENGTH: usize = 100;
}

impl TryFrom<String> for PermissionCode {
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
        let segments: Vec<&str> = value.split('.').collect();
        if segments.len() < 2 {
            return Err(ConversionError::InvalidFormat(
                "expected a dot-namespaced code like `module.action`",
            ));
        }
        for segment in segments {
            if segment.is_empty() {
                return Err(ConversionError::InvalidFormat(
                    "empty segment in permission code",
                ));
            }
            if !segment.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
                return Err(ConversionError::InvalidFormat(
                    "segments are restricted to ascii alphanumerics and underscores",
                ));
            }
        }
        Ok(Self(value))
    }
}

impl TryFrom<&str> for PermissionCode {
    type Error = ConversionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.to_string().try_into()
    }
}

impl From<PermissionCode> for String {
    fn from(value: PermissionCode) -> Self {
        value.0
    }
}

impl AsRef<str> for PermissionCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Display for PermissionCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A principal's flattened set of permission codes.
///
/// Superuser bypass is NOT handled here, that is session level behaviour, see
/// the principal's accessors for checks that take the flag into account.
#[derive(serde::Serialize, serde::Deserialize, Clone, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Permissions(pub BTreeSet<PermissionCode>);

impl Permissions {
    /// True iff every code in `codes` is contained
    pub fn includes(&self, codes: &[PermissionCode]) -> bool {
        codes.iter().all(|x| self.0.contains(x))
    }

    /// True iff at least one code in `codes` is contained
    pub fn includes_any(&self, codes: &[PermissionCode]) -> bool {
        codes.iter().any(|x| self.0.contains(x))
    }
}

impl From<Vec<PermissionCode>> for Permissions {
    fn from(value: Vec<PermissionCode>) -> Self {
        let mut result: Self = Default::default();
        for code in value.into_iter() {
            result.0.insert(code);
        }
        result
    }
}

impl Debug for Permissions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_set().entries(self.0.iter()).finish()
    }
}

/// Permission reference data as listed by the backend for role management
/// screens. Immutable from the client's perspective.
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone, PartialEq, Eq)]
pub struct AppPermission {
    pub id: EntityId,
    pub name: String,
    pub codename: PermissionCode,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
