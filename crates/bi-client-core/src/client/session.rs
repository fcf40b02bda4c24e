//! Session lifecycle: restore and revalidate, login, logout and the
//! permission predicates consumed by the route guard

use futures::channel::oneshot;
use secrecy::ExposeSecret as _;
use std::sync::Arc;
use tracing::{info, warn};

use bi_shared::{
    const_config::path::{PATH_AUTH_LOGIN, PATH_AUTH_LOGOUT, PATH_AUTH_ME},
    req_args::LoginReqArgs,
    token::RefreshToken,
    uac::{LoginResponse, PermissionCode, Principal},
};

use crate::storage::PersistedSession;

use super::{process_empty, process_json_body, Client, SessionState, UiCallBack, DUMMY_ARGUMENT};

impl Client {
    /// Initializes the session from durable storage. A persisted principal is
    /// published immediately so the UI can render, then confirmed against the
    /// "who am I" endpoint; any revalidation failure clears the persisted
    /// state and demotes to anonymous. Resolves to whether a session is live.
    #[tracing::instrument(skip(ui_notify))]
    pub fn restore_session<F: UiCallBack>(
        &self,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<bool>> {
        let (tx, rx) = oneshot::channel();

        let persisted = match self.storage.load() {
            Ok(persisted) => persisted,
            Err(e) => {
                warn!("failed to read persisted session, treating as absent: {e:#}");
                None
            }
        };
        let Some(persisted) = persisted else {
            self.inner.lock().expect("mutex poisoned").session = SessionState::Anonymous;
            tx.send(Ok(false)).expect("failed to send oneshot msg");
            ui_notify();
            return rx;
        };

        let started_epoch = {
            let mut inner = self.inner.lock().expect("mutex poisoned");
            inner.access_token = Some(persisted.access_token.clone());
            inner.refresh_token = Some(persisted.refresh_token.clone());
            inner.session = SessionState::Authenticated(Arc::new(persisted.principal.clone()));
            inner.epoch
        };

        let client = self.clone();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let result = process_json_body::<Principal>(resp).await;
            let logged_in = client.apply_revalidation(started_epoch, result);
            tx.send(Ok(logged_in)).expect("failed to send oneshot msg");
            ui_notify();
        };
        self.initiate_request(PATH_AUTH_ME, None, &DUMMY_ARGUMENT, on_done);
        rx
    }

    #[tracing::instrument(skip(ui_notify))]
    pub fn login<F: UiCallBack>(
        &self,
        args: LoginReqArgs,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>> {
        let (tx, rx) = oneshot::channel();
        let body = serde_json::json!({
            "email": args.email,
            "password": args.password.expose_secret(),
        });
        let client = self.clone();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let msg = process_login(resp, client).await;
            tx.send(msg).expect("failed to send oneshot msg");
            ui_notify();
        };
        self.initiate_request(PATH_AUTH_LOGIN, None, &body, on_done);
        rx
    }

    /// Logs out. Always succeeds locally: state, storage and caches are
    /// cleared before the backend is notified, and a remote failure is only
    /// logged so the user is never left looking authenticated.
    #[tracing::instrument(skip(ui_notify))]
    pub fn logout<F: UiCallBack>(&self, ui_notify: F) -> oneshot::Receiver<anyhow::Result<()>> {
        let (tx, rx) = oneshot::channel();
        let refresh_token = self.clear_session();
        let Some(refresh_token) = refresh_token else {
            tx.send(Ok(())).expect("failed to send oneshot msg");
            ui_notify();
            return rx;
        };
        let body = serde_json::json!({ "refresh": refresh_token.as_ref() });
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            if let Err(e) = process_empty(resp).await {
                warn!("remote logout failed (session already cleared locally): {e:#}");
            }
            tx.send(Ok(())).expect("failed to send oneshot msg");
            ui_notify();
        };
        self.initiate_request(PATH_AUTH_LOGOUT, None, &body, on_done);
        rx
    }

    /// True iff a principal is present and holds `code` (superusers hold
    /// everything)
    pub fn has_permission(&self, code: &PermissionCode) -> bool {
        match self.principal() {
            Some(principal) => principal.has_permission(code),
            None => false,
        }
    }

    /// True iff a principal is present and holds at least one of `codes`
    pub fn has_any_permission(&self, codes: &[PermissionCode]) -> bool {
        match self.principal() {
            Some(principal) => principal.has_any_permission(codes),
            None => false,
        }
    }

    fn install_session(&self, login: LoginResponse) {
        let mut inner = self.inner.lock().expect("mutex poisoned");
        inner.session = SessionState::Authenticated(Arc::new(login.user.clone()));
        inner.access_token = Some(login.access.clone());
        inner.refresh_token = Some(login.refresh.clone());
        inner.epoch += 1;
        // A different principal may see different data
        self.caches.clear_all();
        let persisted = PersistedSession {
            access_token: login.access,
            refresh_token: login.refresh,
            principal: login.user,
        };
        if let Err(e) = self.storage.save(&persisted) {
            warn!("failed to persist session (kept in memory only): {e:#}");
        }
    }

    /// Clears the in-memory session, durable storage and caches. Returns the
    /// refresh token that was live, for the best-effort backend notification.
    fn clear_session(&self) -> Option<RefreshToken> {
        // Storage and caches are cleared while the lock is held so an
        // in-flight revalidation cannot slip a write in between the state
        // transition and the storage clear
        let mut inner = self.inner.lock().expect("mutex poisoned");
        inner.session = SessionState::Anonymous;
        inner.access_token = None;
        inner.epoch += 1;
        let refresh_token = inner.refresh_token.take();
        if let Err(e) = self.storage.clear() {
            warn!("failed to clear persisted session: {e:#}");
        }
        self.caches.clear_all();
        refresh_token
    }

    /// Applies the outcome of a revalidation round trip, unless a login or
    /// logout happened in the meantime, in which case the result is stale and
    /// the current session wins. Returns whether a session is live after.
    fn apply_revalidation(&self, started_epoch: u64, result: anyhow::Result<Principal>) -> bool {
        // Everything happens under one lock hold so the epoch check, the
        // state transition and the storage write cannot be interleaved by a
        // concurrent login/logout
        let mut inner = self.inner.lock().expect("mutex poisoned");
        if inner.epoch != started_epoch {
            info!("discarding stale revalidation result");
            return inner.session.is_authenticated();
        }
        match result {
            Ok(principal) => {
                inner.session = SessionState::Authenticated(Arc::new(principal.clone()));
                // Keep the persisted principal in step with the backend's copy
                if let (Some(access_token), Some(refresh_token)) =
                    (inner.access_token.clone(), inner.refresh_token.clone())
                {
                    let persisted = PersistedSession {
                        access_token,
                        refresh_token,
                        principal,
                    };
                    if let Err(e) = self.storage.save(&persisted) {
                        warn!("failed to refresh persisted session: {e:#}");
                    }
                }
                true
            }
            Err(e) => {
                info!("session revalidation failed, demoting to anonymous: {e:#}");
                inner.session = SessionState::Anonymous;
                inner.access_token = None;
                inner.refresh_token = None;
                if let Err(e) = self.storage.clear() {
                    warn!("failed to clear persisted session: {e:#}");
                }
                self.caches.clear_all();
                false
            }
        }
    }
}

#[tracing::instrument(skip(client), ret, err(Debug))]
async fn process_login(
    response: reqwest::Result<reqwest::Response>,
    client: Client,
) -> anyhow::Result<()> {
    let login_response: LoginResponse = process_json_body(response).await?;
    client.install_session(login_response);
    Ok(())
}
