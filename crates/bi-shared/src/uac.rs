//! Shared items related to user account control

mod permissions;
mod responses;
mod role;
mod user;

pub use permissions::{AppPermission, PermissionCode, Permissions};
pub use responses::LoginResponse;
pub use role::{Role, RoleDescription, RoleDraft, RoleName, RoleRef};
pub use user::{Email, Principal, PrincipalRef, PrincipalSummary};
