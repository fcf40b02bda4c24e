use serde::{Deserialize, Serialize};

use crate::{errors::ConversionError, id::EntityId, uac::PrincipalRef};

/// Organizational unit. The code is the identity, there is no surrogate id.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Branch {
    #[serde(rename = "branchCode")]
    pub code: BranchCode,
    #[serde(rename = "branchName")]
    pub name: BranchName,
    /// Managing principal, expanded or by id depending on the endpoint
    #[serde(rename = "user", default)]
    pub manager: Option<PrincipalRef>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct BranchDraft {
    #[serde(rename = "branchCode")]
    pub code: BranchCode,
    #[serde(rename = "branchName")]
    pub name: BranchName,
    #[serde(rename = "user", default, skip_serializing_if = "Option::is_none")]
    pub manager: Option<EntityId>,
}

/// A branch reference arrives either as the bare code or embedded, callers
/// that only need the identity should go through [`BranchRef::code`]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum BranchRef {
    Embedded(Branch),
    Code(BranchCode),
}

impl BranchRef {
    pub fn code(&self) -> &BranchCode {
        match self {
            BranchRef::Embedded(branch) => &branch.code,
            BranchRef::Code(code) => code,
        }
    }

    /// Display name when the reference was expanded
    pub fn name(&self) -> Option<&BranchName> {
        match self {
            BranchRef::Embedded(branch) => Some(&branch.name),
            BranchRef::Code(_) => None,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct BranchCode(String);

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub struct BranchName(String);

impl BranchCode {
    pub const MAX_LENGTH: usize = 20;
}

impl TryFrom<String> for BranchCode {
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

impl TryFrom<&str> for BranchCode {
    type Error = ConversionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.to_string().try_into()
    }
}

impl From<BranchCode> for String {
    fn from(value: BranchCode) -> Self {
        value.0
    }
}

impl AsRef<str> for BranchCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl BranchName {
    pub const MAX_LENGTH: usize = 100;
}

impl TryFrom<String> for BranchName {
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

impl From<BranchName> for String {
    fn from(value: BranchName) -> Self {
        value.0
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
