//! Stores settings that are not expected to need to change but grouped together
//! for discoverability and reuse. Each constant should be prefixed by the module
//! name to allow importing the constant only and still be readable

use crate::time::Seconds;

pub mod client {
    use super::*;

    /// How long a cached resource list is served without going back to the
    /// backend. Mutations invalidate the affected list regardless of age.
    pub const CLIENT_DEFAULT_LIST_CACHE_TTL: Seconds = Seconds::new(30);
}

pub mod path {
    mod path_spec;
    pub use path_spec::PathSpec;

    pub const PATH_AUTH_LOGIN: PathSpec = PathSpec::post("/user-management/auth/login/");
    pub const PATH_AUTH_LOGOUT: PathSpec = PathSpec::post("/user-management/auth/logout/");
    pub const PATH_AUTH_ME: PathSpec = PathSpec::get("/user-management/auth/me/");

    pub const PATH_USERS_LIST: PathSpec = PathSpec::get("/user-management/users/");
    pub const PATH_USERS_CREATE: PathSpec = PathSpec::post("/user-management/users/");
    pub const PATH_USER_UPDATE: PathSpec = PathSpec::put("/user-management/users/");
    pub const PATH_USER_DELETE: PathSpec = PathSpec::delete("/user-management/users/");

    pub const PATH_PERMISSIONS_LIST: PathSpec = PathSpec::get("/user-management/permissions/");

    pub const PATH_ROLES_LIST: PathSpec = PathSpec::get("/user-management/roles/");
    pub const PATH_ROLES_CREATE: PathSpec = PathSpec::post("/user-management/roles/");
    pub const PATH_ROLE_UPDATE: PathSpec = PathSpec::put("/user-management/roles/");
    pub const PATH_ROLE_DELETE: PathSpec = PathSpec::delete("/user-management/roles/");

    pub const PATH_BRANCHES_LIST: PathSpec = PathSpec::get("/auth/branches/");
    pub const PATH_BRANCHES_CREATE: PathSpec = PathSpec::post("/auth/branches/");
    pub const PATH_BRANCH_UPDATE: PathSpec = PathSpec::put("/auth/branches/");
    pub const PATH_BRANCH_DELETE: PathSpec = PathSpec::delete("/auth/branches/");

    pub const PATH_DEPARTMENTS_LIST: PathSpec = PathSpec::get("/auth/departments/");
    pub const PATH_DEPARTMENTS_CREATE: PathSpec = PathSpec::post("/auth/departments/");
    pub const PATH_DEPARTMENT_UPDATE: PathSpec = PathSpec::put("/auth/departments/");
    pub const PATH_DEPARTMENT_DELETE: PathSpec = PathSpec::delete("/auth/departments/");

    pub const PATH_REPORTS_ACCOUNT_BASE: PathSpec = PathSpec::get("/reports/account-base/");
    pub const PATH_REPORTS_ACCOUNT_BASE_STATS: PathSpec =
        PathSpec::get("/reports/account-base/stats/");
    pub const PATH_REPORTS_ACCOUNT_BASE_EXPORT: PathSpec =
        PathSpec::get("/reports/account-base/export/");
}
