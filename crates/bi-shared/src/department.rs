use serde::{Deserialize, Serialize};

use crate::{
    branch::{BranchCode, BranchRef},
    errors::ConversionError,
};

/// Organizational sub-unit owned by a branch
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Department {
    #[serde(rename = "departmentCode")]
    pub code: DepartmentCode,
    #[serde(rename = "departmentName")]
    pub name: DepartmentName,
    /// Owning branch, normalized from the backend's dual representation
    pub branch: BranchRef,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DepartmentDraft {
    #[serde(rename = "departmentCode")]
    pub code: DepartmentCode,
    #[serde(rename = "departmentName")]
    pub name: DepartmentName,
    pub branch: BranchCode,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(try_from = "String", into = "String")]
pub struct DepartmentCode(String);

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(try_from = "String", into = "String")]
pub struct DepartmentName(String);

impl DepartmentCode {
    pub const MAX_LENGTH: usize = 20;
}

impl TryFrom<String> for DepartmentCode {
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

impl TryFrom<&str> for DepartmentCode {
    type Error = ConversionError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.to_string().try_into()
    }
}

impl From<DepartmentCode> for String {
    fn from(value: DepartmentCode) -> Self {
        value.0
    }
}

impl AsRef<str> for DepartmentCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for DepartmentCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl DepartmentName {
    pub const MAX_LENGTH: usize = 100;
}

impl TryFrom<String> for DepartmentName {
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

impl From<DepartmentName> for String {
    fn from(value: DepartmentName) -> Self {
        value.0
    }
}

impl AsRef<str> for DepartmentName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
