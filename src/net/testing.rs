//! Scripted fakes shared by the unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use super::client::{ApiClient, Redirect};
use super::error::ApiError;
use super::session::MemorySession;
use super::transport::{ApiRequest, ApiResponse, Transport};
use crate::config::ApiConfig;

pub(crate) const TEST_BASE_URL: &str = "http://api.test/api/v1";

/// Replays queued outcomes in order and records every request it sees.
#[derive(Default)]
pub(crate) struct ScriptedTransport {
    outcomes: Mutex<VecDeque<Result<ApiResponse, ApiError>>>,
    sent: Mutex<Vec<ApiRequest>>,
}

impl ScriptedTransport {
    pub(crate) fn reply(self, status: u16, body: serde_json::Value) -> Self {
        self.push(Ok(ApiResponse { status, body: body.to_string() }))
    }

    pub(crate) fn reply_empty(self, status: u16) -> Self {
        self.push(Ok(ApiResponse { status, body: String::new() }))
    }

    pub(crate) fn network_error(self) -> Self {
        self.push(Err(ApiError::Transport("Network Error".to_owned())))
    }

    fn push(self, outcome: Result<ApiResponse, ApiError>) -> Self {
        self.outcomes.lock().unwrap_or_else(PoisonError::into_inner).push_back(outcome);
        self
    }

    pub(crate) fn sent(&self) -> Vec<ApiRequest> {
        self.sent.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.sent.lock().unwrap_or_else(PoisonError::into_inner).push(request);
        self.outcomes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("no scripted response".to_owned())))
    }
}

/// Never completes; used to exercise cancellation.
pub(crate) struct StalledTransport;

#[async_trait(?Send)]
impl Transport for StalledTransport {
    async fn send(&self, _request: ApiRequest) -> Result<ApiResponse, ApiError> {
        futures::future::pending().await
    }
}

#[derive(Default)]
pub(crate) struct RecordingRedirect {
    paths: Mutex<Vec<String>>,
}

impl RecordingRedirect {
    pub(crate) fn paths(&self) -> Vec<String> {
        self.paths.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }
}

impl Redirect for RecordingRedirect {
    fn hard_redirect(&self, path: &str) {
        self.paths.lock().unwrap_or_else(PoisonError::into_inner).push(path.to_owned());
    }
}

/// A client plus handles on each of its collaborators.
pub(crate) struct Harness {
    pub(crate) client: ApiClient,
    pub(crate) transport: Arc<ScriptedTransport>,
    pub(crate) session: Arc<MemorySession>,
    pub(crate) redirect: Arc<RecordingRedirect>,
}

pub(crate) fn harness(transport: ScriptedTransport, session: MemorySession) -> Harness {
    let transport = Arc::new(transport);
    let session = Arc::new(session);
    let redirect = Arc::new(RecordingRedirect::default());
    let client = ApiClient::new(
        ApiConfig::from_override(Some(TEST_BASE_URL)),
        transport.clone(),
        session.clone(),
        redirect.clone(),
    );
    Harness { client, transport, session, redirect }
}
