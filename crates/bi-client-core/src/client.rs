use anyhow::{anyhow, Context};
use closure_traits::{ChannelCallBack, ChannelCallBackOutput};
use futures::channel::oneshot;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use std::sync::{Arc, Mutex};
use tracing::info;

use bi_shared::{
    const_config::path::PathSpec,
    token::{AccessToken, RefreshToken},
    uac::Principal,
};

use crate::{
    config::ClientConfig,
    storage::{MemorySessionStorage, SessionStorage},
};

use self::cache::{Cached, ListCaches};

pub mod api;
pub mod cache;
pub mod session;

pub const DUMMY_ARGUMENT: &[(&str, &str)] = &[("", "")];

#[derive(Debug, Clone)]
pub struct Client {
    api_client: reqwest::Client,
    inner: Arc<Mutex<ClientInner>>,
    storage: Arc<dyn SessionStorage>,
    caches: Arc<ListCaches>,
}

#[derive(Debug)]
struct ClientInner {
    api_base_url: String,
    session: SessionState,
    access_token: Option<AccessToken>,
    refresh_token: Option<RefreshToken>,
    /// Bumped by login and logout so an in-flight revalidation can tell that
    /// the session it started from is no longer the current one
    epoch: u64,
}

/// Client side authentication state. Starts out as `Loading` until
/// [`Client::restore_session`] resolves.
#[derive(Debug, Clone, Default)]
pub enum SessionState {
    #[default]
    Loading,
    Anonymous,
    Authenticated(Arc<Principal>),
}

impl SessionState {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::new(
            ClientConfig::default(),
            Arc::new(MemorySessionStorage::default()),
        )
    }
}

impl ClientInner {
    fn new(api_base_url: String) -> Self {
        Self {
            api_base_url,
            session: SessionState::default(),
            access_token: None,
            refresh_token: None,
            epoch: 0,
        }
    }
}

impl Client {
    #[tracing::instrument(name = "NEW CLIENT-CORE", skip(storage))]
    pub fn new(config: ClientConfig, storage: Arc<dyn SessionStorage>) -> Self {
        let api_client = reqwest::Client::builder()
            .build()
            .expect("Unable to create reqwest client");
        Self {
            api_client,
            inner: Arc::new(Mutex::new(ClientInner::new(config.api_base_url))),
            storage,
            caches: Arc::new(ListCaches::new(config.list_cache_ttl)),
        }
    }

    pub fn session_state(&self) -> SessionState {
        self.inner
            .lock()
            .expect("mutex poisoned")
            .session
            .clone()
    }

    pub fn principal(&self) -> Option<Arc<Principal>> {
        match self.session_state() {
            SessionState::Authenticated(principal) => Some(principal),
            SessionState::Loading | SessionState::Anonymous => None,
        }
    }

    pub fn is_logged_in(&self) -> bool {
        self.session_state().is_authenticated()
    }

    #[tracing::instrument(skip(args, on_done))]
    // WARNING: Must skip args as it may contain sensitive info and "safe"
    // versions would usually already be logged by the caller
    fn initiate_request<T, F, O>(&self, path_spec: PathSpec, id: Option<&str>, args: &T, on_done: F)
    where
        T: serde::Serialize + Debug,
        F: ChannelCallBack<O>,
        O: ChannelCallBackOutput,
    {
        let path = match id {
            Some(id) => path_spec.with_id(id),
            None => path_spec.path.to_string(),
        };
        let is_get_method = path_spec.method == Method::GET;
        let is_delete_method = path_spec.method == Method::DELETE;
        let mut request = self
            .api_client
            .request(path_spec.method, self.path_to_url(&path));
        request = if is_get_method {
            request.query(&args)
        } else if is_delete_method {
            request
        } else {
            request.json(&args)
        };
        if let Some(token) = self.access_token() {
            request = request.bearer_auth(token.as_ref());
        }
        reqwest_cross::fetch(request, on_done)
    }

    fn send_request_expect_json<F, T, U>(
        &self,
        path_spec: PathSpec,
        id: Option<&str>,
        args: &T,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<U>>
    where
        T: serde::Serialize + std::fmt::Debug,
        F: UiCallBack,
        U: Send + std::fmt::Debug + DeserializeOwned + 'static,
    {
        let (tx, rx) = oneshot::channel();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async {
            let msg = process_json_body(resp).await;
            tx.send(msg).expect("failed to send oneshot msg");
            ui_notify();
        };
        self.initiate_request(path_spec, id, args, on_done);
        rx
    }

    fn send_request_expect_empty<F, T>(
        &self,
        path_spec: PathSpec,
        id: Option<&str>,
        args: &T,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>>
    where
        T: serde::Serialize + std::fmt::Debug,
        F: UiCallBack,
    {
        let (tx, rx) = oneshot::channel();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async {
            let msg = process_empty(resp).await;
            tx.send(msg).expect("failed to send oneshot msg");
            ui_notify();
        };
        self.initiate_request(path_spec, id, args, on_done);
        rx
    }

    fn send_request_expect_bytes<F, T>(
        &self,
        path_spec: PathSpec,
        args: &T,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Vec<u8>>>
    where
        T: serde::Serialize + std::fmt::Debug,
        F: UiCallBack,
    {
        let (tx, rx) = oneshot::channel();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async {
            let msg = process_bytes(resp).await;
            tx.send(msg).expect("failed to send oneshot msg");
            ui_notify();
        };
        self.initiate_request(path_spec, None, args, on_done);
        rx
    }

    /// List fetch with the explicit cache in front: a fresh entry resolves
    /// immediately without touching the network, otherwise the response is
    /// stored on the way through
    fn send_cached_list_request<F, U>(
        &self,
        path_spec: PathSpec,
        select: fn(&ListCaches) -> &Cached<Vec<U>>,
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<Vec<U>>>
    where
        F: UiCallBack,
        U: Clone + Send + std::fmt::Debug + DeserializeOwned + 'static,
    {
        if let Some(cached) = select(&self.caches).fresh() {
            let (tx, rx) = oneshot::channel();
            tx.send(Ok(cached)).expect("failed to send oneshot msg");
            ui_notify();
            return rx;
        }
        let caches = Arc::clone(&self.caches);
        let (tx, rx) = oneshot::channel();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let msg = process_json_body::<Vec<U>>(resp).await;
            if let Ok(value) = &msg {
                select(&caches).store(value.clone());
            }
            tx.send(msg).expect("failed to send oneshot msg");
            ui_notify();
        };
        self.initiate_request(path_spec, None, &DUMMY_ARGUMENT, on_done);
        rx
    }

    /// Mutation returning the affected entity. The invalidation runs only
    /// after the network call resolved successfully.
    fn send_mutation_expect_json<F, T, U>(
        &self,
        path_spec: PathSpec,
        id: Option<&str>,
        args: &T,
        invalidate: fn(&ListCaches),
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<U>>
    where
        T: serde::Serialize + std::fmt::Debug,
        F: UiCallBack,
        U: Send + std::fmt::Debug + DeserializeOwned + 'static,
    {
        let caches = Arc::clone(&self.caches);
        let (tx, rx) = oneshot::channel();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let msg = process_json_body(resp).await;
            if msg.is_ok() {
                invalidate(&caches);
            }
            tx.send(msg).expect("failed to send oneshot msg");
            ui_notify();
        };
        self.initiate_request(path_spec, id, args, on_done);
        rx
    }

    /// Mutation with an empty success body (deletes)
    fn send_mutation_expect_empty<F, T>(
        &self,
        path_spec: PathSpec,
        id: Option<&str>,
        args: &T,
        invalidate: fn(&ListCaches),
        ui_notify: F,
    ) -> oneshot::Receiver<anyhow::Result<()>>
    where
        T: serde::Serialize + std::fmt::Debug,
        F: UiCallBack,
    {
        let caches = Arc::clone(&self.caches);
        let (tx, rx) = oneshot::channel();
        let on_done = move |resp: reqwest::Result<reqwest::Response>| async move {
            let msg = process_empty(resp).await;
            if msg.is_ok() {
                invalidate(&caches);
            }
            tx.send(msg).expect("failed to send oneshot msg");
            ui_notify();
        };
        self.initiate_request(path_spec, id, args, on_done);
        rx
    }

    #[tracing::instrument(ret)]
    fn path_to_url(&self, path: &str) -> String {
        format!(
            "{}{path}",
            &self
                .inner
                .lock()
                .expect("failed to unlock client mutex")
                .api_base_url
        )
    }

    fn access_token(&self) -> Option<AccessToken> {
        self.inner
            .lock()
            .expect("mutex poisoned")
            .access_token
            .clone()
    }

    #[cfg(test)]
    pub(crate) fn set_session_state_for_test(&self, state: SessionState) {
        self.inner.lock().expect("mutex poisoned").session = state;
    }
}

#[tracing::instrument(ret, err(Debug))]
async fn process_empty(response: reqwest::Result<reqwest::Response>) -> anyhow::Result<()> {
    let (response, status) = extract_response(response)?;
    if status.is_success() {
        Ok(())
    } else {
        Err(handle_error(response).await)
    }
}

#[tracing::instrument(ret, err(Debug))]
async fn process_json_body<T>(response: reqwest::Result<reqwest::Response>) -> anyhow::Result<T>
where
    T: Debug + DeserializeOwned,
{
    let (response, status) = extract_response(response)?;
    if status.is_success() {
        response
            .json()
            .await
            .context("failed to parse result as json")
    } else {
        Err(handle_error(response).await)
    }
}

#[tracing::instrument(skip_all, err(Debug))]
async fn process_bytes(response: reqwest::Result<reqwest::Response>) -> anyhow::Result<Vec<u8>> {
    let (response, status) = extract_response(response)?;
    if status.is_success() {
        Ok(response
            .bytes()
            .await
            .context("failed to read response body")?
            .to_vec())
    } else {
        Err(handle_error(response).await)
    }
}

/// Turns an error response into the message shown next to the triggering
/// action: the backend's `message` field when the body parses, otherwise a
/// generic status line
#[tracing::instrument(ret)]
async fn handle_error(response: reqwest::Response) -> anyhow::Error {
    #[derive(Debug, serde::Deserialize)]
    struct ErrorBody {
        message: Option<String>,
    }

    let status = response.status();
    debug_assert!(
        !status.is_success(),
        "this is supposed to be an error, right? Status code is: {status}"
    );
    let generic = anyhow!("HTTP error: {}", status.as_u16());
    let Ok(body) = response.text().await else {
        return generic;
    };
    match serde_json::from_str::<ErrorBody>(&body) {
        Ok(ErrorBody {
            message: Some(message),
        }) if !message.is_empty() => anyhow!("{message}"),
        _ => generic,
    }
}

/// Provides a way to standardize the error message
#[tracing::instrument(ret, err(Debug))]
fn extract_response(
    response: reqwest::Result<reqwest::Response>,
) -> anyhow::Result<(reqwest::Response, StatusCode)> {
    if response.is_err() {
        info!("Response is err: {:#?}", response);
    }
    let response = response.context("failed to send request")?;
    let status = response.status();
    Ok((response, status))
}

pub trait UiCallBack: 'static + Send + FnOnce() {}
impl<T> UiCallBack for T where T: 'static + Send + FnOnce() {}

#[cfg(not(target_arch = "wasm32"))]
pub mod closure_traits {
    pub trait ChannelCallBack<O>:
        'static + Send + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    impl<T, O> ChannelCallBack<O> for T where
        T: 'static + Send + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    pub trait ChannelCallBackOutput: futures::Future<Output = ()> + Send {}
    impl<T> ChannelCallBackOutput for T where T: futures::Future<Output = ()> + Send {}
}

#[cfg(target_arch = "wasm32")]
pub mod closure_traits {
    pub trait ChannelCallBack<O>:
        'static + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    impl<T, O> ChannelCallBack<O> for T where
        T: 'static + FnOnce(reqwest::Result<reqwest::Response>) -> O
    {
    }
    pub trait ChannelCallBackOutput: futures::Future<Output = ()> {}
    impl<T> ChannelCallBackOutput for T where T: futures::Future<Output = ()> {}
}
