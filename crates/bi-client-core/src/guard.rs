//! Declarative protection for views: given the permission sets a screen
//! demands, decide between rendering, waiting and redirecting

use std::sync::LazyLock;

use bi_shared::uac::PermissionCode;

use crate::{Client, SessionState};

/// Permission requirements of one protected view. `required` must all be
/// held, `any_of` needs at least one (when non-empty).
#[derive(Debug, Clone, Default)]
pub struct RouteGuard {
    required: Vec<PermissionCode>,
    any_of: Vec<PermissionCode>,
}

/// What the consumer should do with the protected view right now
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardDecision {
    /// Session is still resolving, show a neutral loading indicator and do
    /// not navigate
    Wait,
    RedirectToLogin,
    RedirectToUnauthorized,
    /// Render the protected content
    Allow,
}

impl RouteGuard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn required(mut self, codes: impl IntoIterator<Item = PermissionCode>) -> Self {
        self.required = codes.into_iter().collect();
        self
    }

    pub fn any_of(mut self, codes: impl IntoIterator<Item = PermissionCode>) -> Self {
        self.any_of = codes.into_iter().collect();
        self
    }

    /// Pure function of the current session state. This is not a one-time
    /// check: consumers must re-evaluate whenever the session state or the
    /// permission sets change.
    pub fn evaluate(&self, client: &Client) -> GuardDecision {
        let principal = match client.session_state() {
            SessionState::Loading => return GuardDecision::Wait,
            SessionState::Anonymous => return GuardDecision::RedirectToLogin,
            SessionState::Authenticated(principal) => principal,
        };
        if !self.required.is_empty()
            && !self.required.iter().all(|code| principal.has_permission(code))
        {
            return GuardDecision::RedirectToUnauthorized;
        }
        if !self.any_of.is_empty() && !principal.has_any_permission(&self.any_of) {
            return GuardDecision::RedirectToUnauthorized;
        }
        GuardDecision::Allow
    }
}

/// The dashboard's default screen protection, one entry per navigation target
pub fn guard_for_screen(screen: &str) -> Option<&'static RouteGuard> {
    static GUARDS: LazyLock<Vec<(&'static str, RouteGuard)>> = LazyLock::new(|| {
        let code = |s: &str| PermissionCode::try_from(s).expect("codes below are valid");
        vec![
            (
                "/users",
                RouteGuard::new().required([code("userManagement.view_customuser")]),
            ),
            (
                "/roles",
                RouteGuard::new().required([code("userManagement.view_role")]),
            ),
            (
                "/branches",
                RouteGuard::new().required([code("userManagement.view_branch")]),
            ),
            (
                "/departments",
                RouteGuard::new().required([code("userManagement.view_department")]),
            ),
            (
                "/reports",
                RouteGuard::new().required([
                    code("userManagement.view_accountbase"),
                    code("userManagement.view_reports"),
                ]),
            ),
        ]
    });
    GUARDS
        .iter()
        .find(|(path, _)| *path == screen)
        .map(|(_, guard)| guard)
}
