//! Authenticated request pipeline for the REST backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every backend call from the console goes through one [`ApiClient`]. The
//! client owns the base URL and the cross-cutting behavior around each
//! exchange:
//!
//! - request phase: attach `Authorization: Bearer <token>` when the session
//!   store holds a token, and nothing at all when it does not;
//! - response phase: a 401 clears the session store, notifies expiry
//!   listeners, and forces a full-page navigation to `/login`; every other
//!   failure propagates unchanged, with no retry. The credential exchange
//!   itself opts out, so a refused login surfaces as a plain status error.
//!
//! Callers may pass a [`CancelSignal`]. An aborted call resolves to
//! [`ApiError::Cancelled`] and skips the response phase entirely.
//!
//! DESIGN
//! ======
//! Transport, storage, and navigation are trait objects so the same pipeline
//! runs against `fetch`/`localStorage`/`window.location` in the browser and
//! against scripted fakes in tests.

#[cfg(test)]
#[path = "client_test.rs"]
mod client_test;

use std::sync::{Arc, Mutex, PoisonError};

use futures::future::{AbortHandle, AbortRegistration, Abortable};
use serde::Serialize;

use super::error::ApiError;
use super::session::{LocalStorageSession, SessionStore};
use super::transport::{ApiRequest, ApiResponse, FetchTransport, Method, Transport};
use crate::config::{ApiConfig, LOGIN_PATH};

const UNAUTHORIZED: u16 = 401;

/// Full-page navigation, bypassing the in-app router.
pub trait Redirect: Send + Sync {
    fn hard_redirect(&self, path: &str);
}

/// Assigns `window.location.href`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserRedirect;

impl Redirect for BrowserRedirect {
    fn hard_redirect(&self, path: &str) {
        #[cfg(feature = "csr")]
        {
            if let Some(window) = web_sys::window() {
                let _ = window.location().set_href(path);
            }
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = path;
        }
    }
}

/// Caller-held half of a cancellation pair.
#[derive(Clone, Debug)]
pub struct Canceller(AbortHandle);

impl Canceller {
    pub fn cancel(&self) {
        self.0.abort();
    }

}

/// Request-held half of a cancellation pair.
#[derive(Debug)]
pub struct CancelSignal(AbortRegistration);

/// Create a linked canceller/signal pair for one request.
pub fn cancel_pair() -> (Canceller, CancelSignal) {
    let (handle, registration) = AbortHandle::new_pair();
    (Canceller(handle), CancelSignal(registration))
}

/// Per-call options.
#[derive(Debug, Default)]
pub struct RequestOptions {
    pub query: Vec<(String, String)>,
    pub cancel: Option<CancelSignal>,
    /// Report a 401 as [`ApiError::Status`] instead of expiring the session.
    /// Only the credential exchange sets this: no session exists yet.
    pub credential_exchange: bool,
}

impl RequestOptions {
    #[must_use]
    pub fn query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_owned(), value.into()));
        self
    }

    #[must_use]
    pub fn cancel_with(mut self, signal: CancelSignal) -> Self {
        self.cancel = Some(signal);
        self
    }

    #[must_use]
    pub fn credential_exchange(mut self) -> Self {
        self.credential_exchange = true;
        self
    }
}

type ExpiryListener = Arc<dyn Fn() + Send + Sync>;

struct ClientInner {
    base_url: String,
    transport: Arc<dyn Transport>,
    session: Arc<dyn SessionStore>,
    redirect: Arc<dyn Redirect>,
    expiry_listeners: Mutex<Vec<ExpiryListener>>,
}

/// Cheap-to-clone handle to the shared request pipeline.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ClientInner>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").field("base_url", &self.inner.base_url).finish_non_exhaustive()
    }
}

impl ApiClient {
    pub fn new(
        config: ApiConfig,
        transport: Arc<dyn Transport>,
        session: Arc<dyn SessionStore>,
        redirect: Arc<dyn Redirect>,
    ) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                base_url: config.base_url,
                transport,
                session,
                redirect,
                expiry_listeners: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Client wired to `fetch`, `localStorage`, and `window.location`.
    pub fn browser(config: ApiConfig) -> Self {
        Self::new(
            config,
            Arc::new(FetchTransport),
            Arc::new(LocalStorageSession),
            Arc::new(BrowserRedirect),
        )
    }

    pub fn session(&self) -> &dyn SessionStore {
        self.inner.session.as_ref()
    }

    /// Register a callback run whenever the backend rejects the session.
    ///
    /// Listeners run after the session store is cleared and before the hard
    /// redirect is issued.
    pub fn on_session_expired<F>(&self, listener: F)
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.inner
            .expiry_listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(listener));
    }

    /// Send one request through the pipeline.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Cancelled`] if the caller aborted the call;
    /// - [`ApiError::SessionExpired`] on a 401 (already handled globally),
    ///   unless the call is a credential exchange;
    /// - [`ApiError::Status`] for any other non-2xx status;
    /// - [`ApiError::Transport`] if the backend could not be reached.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<String>,
        options: RequestOptions,
    ) -> Result<ApiResponse, ApiError> {
        let RequestOptions { query, cancel, credential_exchange } = options;
        let request = self.prepare(method, path, query, body);
        log::debug!("{} {}", request.method.as_str(), request.url);

        let pending = self.inner.transport.send(request);
        let outcome = match cancel {
            Some(CancelSignal(registration)) => match Abortable::new(pending, registration).await {
                Ok(outcome) => outcome,
                Err(_aborted) => {
                    log::debug!("request cancelled: {path}");
                    return Err(ApiError::Cancelled);
                }
            },
            None => pending.await,
        };
        self.intercept(outcome, credential_exchange)
    }

    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn get(&self, path: &str, options: RequestOptions) -> Result<ApiResponse, ApiError> {
        self.request(Method::Get, path, None, options).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] if `body` cannot be serialized, otherwise
    /// see [`ApiClient::request`].
    pub async fn post<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<ApiResponse, ApiError> {
        self.request(Method::Post, path, Some(encode(body)?), options).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] if `body` cannot be serialized, otherwise
    /// see [`ApiClient::request`].
    pub async fn put<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<ApiResponse, ApiError> {
        self.request(Method::Put, path, Some(encode(body)?), options).await
    }

    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] if `body` cannot be serialized, otherwise
    /// see [`ApiClient::request`].
    pub async fn patch<B: Serialize>(
        &self,
        path: &str,
        body: &B,
        options: RequestOptions,
    ) -> Result<ApiResponse, ApiError> {
        self.request(Method::Patch, path, Some(encode(body)?), options).await
    }

    /// # Errors
    ///
    /// See [`ApiClient::request`].
    pub async fn delete(&self, path: &str, options: RequestOptions) -> Result<ApiResponse, ApiError> {
        self.request(Method::Delete, path, None, options).await
    }

    fn prepare(&self, method: Method, path: &str, query: Vec<(String, String)>, body: Option<String>) -> ApiRequest {
        let mut request = ApiRequest::new(method, join_url(&self.inner.base_url, path));
        request.query = query;
        request.body = body;
        if let Some(token) = self.inner.session.read() {
            request.headers.push(("Authorization".to_owned(), format!("Bearer {token}")));
        }
        request
    }

    fn intercept(
        &self,
        outcome: Result<ApiResponse, ApiError>,
        credential_exchange: bool,
    ) -> Result<ApiResponse, ApiError> {
        let response = outcome?;
        if response.status == UNAUTHORIZED && !credential_exchange {
            self.expire_session();
            return Err(ApiError::SessionExpired);
        }
        if !response.is_success() {
            return Err(ApiError::Status { status: response.status, message: response.error_message() });
        }
        Ok(response)
    }

    fn expire_session(&self) {
        log::warn!("backend rejected session; signing out");
        self.inner.session.clear();
        let listeners = self
            .inner
            .expiry_listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for listener in listeners {
            listener();
        }
        self.inner.redirect.hard_redirect(LOGIN_PATH);
    }
}

fn encode<B: Serialize>(body: &B) -> Result<String, ApiError> {
    serde_json::to_string(body).map_err(|e| ApiError::Encode(e.to_string()))
}

/// Join the base URL and an endpoint path with exactly one `/` between them.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_owned();
    }
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
