use crate::token::{AccessToken, RefreshToken};

use super::Principal;

/// Body of a successful login
#[derive(Debug, serde::Serialize, serde::Deserialize, Clone)]
pub struct LoginResponse {
    pub access: AccessToken,
    pub refresh: RefreshToken,
    pub user: Principal,
}
