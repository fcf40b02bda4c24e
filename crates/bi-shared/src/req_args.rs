//! This module stores the expected format of the arguments for the requests.
//! Some structs are deliberately not serializable because they carry secrets,
//! the client assembles the JSON at the call site so the secret is only
//! exposed at the last moment.

use std::fmt::Debug;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::{branch::BranchCode, id::EntityId};

#[derive(serde::Deserialize, Clone)]
pub struct LoginReqArgs {
    pub email: String,
    pub password: SecretString,
}

impl LoginReqArgs {
    pub fn new<S: Into<String>>(email: S, password: SecretString) -> Self {
        Self {
            email: email.into(),
            password,
        }
    }
}

impl Debug for LoginReqArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginReqArgs")
            .field("email", &self.email)
            .field("has_password", &!self.password.expose_secret().is_empty())
            .finish()
    }
}

/// Payload for creating a user
#[derive(Clone)]
pub struct NewUserReqArgs {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: SecretString,
    pub role: Option<EntityId>,
    pub branch: Option<BranchCode>,
}

impl Debug for NewUserReqArgs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUserReqArgs")
            .field("email", &self.email)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("has_password", &!self.password.expose_secret().is_empty())
            .field("role", &self.role)
            .field("branch", &self.branch)
            .finish()
    }
}

/// Partial update for a user, unset fields are left unchanged by the backend
#[derive(Debug, Serialize, Clone, Default)]
pub struct UserUpdateReqArgs {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<EntityId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub branch: Option<BranchCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

impl UserUpdateReqArgs {
    /// An update that changes nothing is almost always a caller bug
    pub fn is_empty(&self) -> bool {
        self.email.is_none()
            && self.first_name.is_none()
            && self.last_name.is_none()
            && self.role.is_none()
            && self.branch.is_none()
            && self.is_active.is_none()
    }
}
