use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use futures::executor::block_on;

use super::*;
use crate::net::session::MemorySession;
use crate::net::testing::{RecordingRedirect, ScriptedTransport, StalledTransport, TEST_BASE_URL, harness};

// =============================================================
// Request phase
// =============================================================

#[test]
fn attaches_bearer_token_when_stored() {
    let h = harness(ScriptedTransport::default().reply(200, serde_json::json!({})), MemorySession::with_token("test-token"));

    block_on(h.client.get("/test", RequestOptions::default())).expect("request succeeds");

    let sent = h.transport.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].header("Authorization"), Some("Bearer test-token"));
}

#[test]
fn omits_authorization_header_without_token() {
    let h = harness(ScriptedTransport::default().reply(200, serde_json::json!({})), MemorySession::default());

    block_on(h.client.get("/test", RequestOptions::default())).expect("request succeeds");

    assert_eq!(h.transport.sent()[0].header("Authorization"), None);
    assert!(h.transport.sent()[0].headers.is_empty());
}

#[test]
fn omits_authorization_header_for_blank_token() {
    let h = harness(ScriptedTransport::default().reply(200, serde_json::json!({})), MemorySession::with_token(""));

    block_on(h.client.get("/test", RequestOptions::default())).expect("request succeeds");

    assert_eq!(h.transport.sent()[0].header("Authorization"), None);
}

#[test]
fn reads_token_per_request() {
    let h = harness(
        ScriptedTransport::default()
            .reply(200, serde_json::json!({}))
            .reply(200, serde_json::json!({})),
        MemorySession::default(),
    );

    block_on(h.client.get("/a", RequestOptions::default())).expect("first");
    h.session.write("fresh");
    block_on(h.client.get("/b", RequestOptions::default())).expect("second");

    let sent = h.transport.sent();
    assert_eq!(sent[0].header("Authorization"), None);
    assert_eq!(sent[1].header("Authorization"), Some("Bearer fresh"));
}

#[test]
fn joins_base_url_and_forwards_query() {
    let h = harness(ScriptedTransport::default().reply(200, serde_json::json!({ "data": "test" })), MemorySession::default());

    block_on(h.client.get("/test", RequestOptions::default().query("id", "1"))).expect("request succeeds");

    let sent = h.transport.sent();
    assert_eq!(sent[0].url, format!("{TEST_BASE_URL}/test"));
    assert_eq!(sent[0].method, Method::Get);
    assert_eq!(sent[0].query, vec![("id".to_owned(), "1".to_owned())]);
}

#[test]
fn post_serializes_json_body() {
    let h = harness(
        ScriptedTransport::default().reply(201, serde_json::json!({ "id": 1, "name": "test" })),
        MemorySession::default(),
    );

    let resp = block_on(h.client.post("/test", &serde_json::json!({ "name": "test" }), RequestOptions::default()))
        .expect("post succeeds");

    assert_eq!(resp.status, 201);
    let sent = h.transport.sent();
    assert_eq!(sent[0].method, Method::Post);
    assert_eq!(sent[0].body.as_deref(), Some(r#"{"name":"test"}"#));
}

#[test]
fn put_patch_delete_use_their_verbs() {
    let h = harness(
        ScriptedTransport::default().reply_empty(200).reply_empty(200).reply_empty(204),
        MemorySession::default(),
    );

    block_on(h.client.put("/r/1", &serde_json::json!({}), RequestOptions::default())).expect("put");
    block_on(h.client.patch("/r/1", &serde_json::json!({}), RequestOptions::default())).expect("patch");
    block_on(h.client.delete("/r/1", RequestOptions::default())).expect("delete");

    let verbs: Vec<Method> = h.transport.sent().iter().map(|r| r.method).collect();
    assert_eq!(verbs, vec![Method::Put, Method::Patch, Method::Delete]);
}

// =============================================================
// Response phase
// =============================================================

#[test]
fn passes_successful_response_through() {
    let h = harness(ScriptedTransport::default().reply(200, serde_json::json!({ "data": "test" })), MemorySession::default());

    let resp = block_on(h.client.get("/test", RequestOptions::default())).expect("request succeeds");

    assert_eq!(resp.json::<serde_json::Value>().expect("json"), serde_json::json!({ "data": "test" }));
    assert!(h.redirect.paths().is_empty());
}

#[test]
fn unauthorized_clears_session_and_hard_redirects() {
    let h = harness(ScriptedTransport::default().reply_empty(401), MemorySession::with_token("stale"));

    let err = block_on(h.client.get("/test", RequestOptions::default())).expect_err("401 must fail");

    assert_eq!(err, ApiError::SessionExpired);
    assert_eq!(h.session.read(), None);
    assert_eq!(h.redirect.paths(), vec!["/login".to_owned()]);
}

#[test]
fn unauthorized_on_any_endpoint_expires_session() {
    let h = harness(ScriptedTransport::default().reply_empty(401), MemorySession::with_token("stale"));

    let _ = block_on(h.client.post("/work-orders/", &serde_json::json!({}), RequestOptions::default()));

    assert_eq!(h.session.read(), None);
    assert_eq!(h.redirect.paths(), vec!["/login".to_owned()]);
}

#[test]
fn credential_exchange_reports_unauthorized_as_status() {
    let h = harness(
        ScriptedTransport::default().reply(401, serde_json::json!({ "message": "Invalid credentials" })),
        MemorySession::with_token("T"),
    );

    let err = block_on(h.client.post(
        "/auth/login/",
        &serde_json::json!({}),
        RequestOptions::default().credential_exchange(),
    ))
    .expect_err("401 must fail");

    assert_eq!(err, ApiError::Status { status: 401, message: Some("Invalid credentials".to_owned()) });
    assert_eq!(h.session.read().as_deref(), Some("T"));
    assert!(h.redirect.paths().is_empty());
}

#[test]
fn expiry_listeners_run_after_store_is_cleared() {
    let h = harness(ScriptedTransport::default().reply_empty(401), MemorySession::with_token("stale"));
    let seen_empty = Arc::new(AtomicUsize::new(0));
    let session = h.session.clone();
    let counter = seen_empty.clone();
    h.client.on_session_expired(move || {
        if session.read().is_none() {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    });

    let _ = block_on(h.client.get("/test", RequestOptions::default()));

    assert_eq!(seen_empty.load(Ordering::SeqCst), 1);
}

#[test]
fn other_statuses_propagate_with_backend_message() {
    let h = harness(
        ScriptedTransport::default().reply(500, serde_json::json!({ "message": "Internal Server Error" })),
        MemorySession::with_token("T"),
    );

    let err = block_on(h.client.get("/dashboard", RequestOptions::default())).expect_err("500 must fail");

    assert_eq!(err, ApiError::Status { status: 500, message: Some("Internal Server Error".to_owned()) });
    assert_eq!(h.session.read().as_deref(), Some("T"));
    assert!(h.redirect.paths().is_empty());
}

#[test]
fn forbidden_is_not_treated_as_session_expiry() {
    let h = harness(ScriptedTransport::default().reply_empty(403), MemorySession::with_token("T"));

    let err = block_on(h.client.get("/admin-only", RequestOptions::default())).expect_err("403 must fail");

    assert_eq!(err, ApiError::Status { status: 403, message: None });
    assert_eq!(h.session.read().as_deref(), Some("T"));
}

#[test]
fn network_errors_propagate_unchanged_without_retry() {
    let h = harness(ScriptedTransport::default().network_error(), MemorySession::with_token("T"));

    let err = block_on(h.client.get("/test", RequestOptions::default())).expect_err("network failure");

    assert_eq!(err, ApiError::Transport("Network Error".to_owned()));
    assert_eq!(h.transport.sent().len(), 1);
    assert_eq!(h.session.read().as_deref(), Some("T"));
}

// =============================================================
// Cancellation
// =============================================================

#[test]
fn cancelled_request_rejects_with_cancelled() {
    let client = ApiClient::new(
        ApiConfig::from_override(Some(TEST_BASE_URL)),
        Arc::new(StalledTransport),
        Arc::new(MemorySession::default()),
        Arc::new(RecordingRedirect::default()),
    );
    let (canceller, signal) = cancel_pair();

    canceller.cancel();
    let err = block_on(client.get("/test", RequestOptions::default().cancel_with(signal))).expect_err("aborted");

    assert_eq!(err, ApiError::Cancelled);
}

#[test]
fn cancellation_skips_session_expiry_handling() {
    let h = harness(ScriptedTransport::default().reply_empty(401), MemorySession::with_token("T"));
    let (canceller, signal) = cancel_pair();

    canceller.cancel();
    let err = block_on(h.client.get("/test", RequestOptions::default().cancel_with(signal))).expect_err("aborted");

    assert!(err.is_cancelled());
    assert_eq!(h.session.read().as_deref(), Some("T"));
    assert!(h.redirect.paths().is_empty());
}

#[test]
fn uncancelled_signal_lets_request_complete() {
    let h = harness(ScriptedTransport::default().reply(200, serde_json::json!({})), MemorySession::default());
    let (_canceller, signal) = cancel_pair();

    let resp = block_on(h.client.get("/test", RequestOptions::default().cancel_with(signal))).expect("completes");

    assert_eq!(resp.status, 200);
}

// =============================================================
// URL joining
// =============================================================

#[test]
fn join_url_normalizes_slashes() {
    assert_eq!(join_url("http://x/api/v1", "/auth/me/"), "http://x/api/v1/auth/me/");
    assert_eq!(join_url("http://x/api/v1/", "dashboard"), "http://x/api/v1/dashboard");
}

#[test]
fn join_url_keeps_absolute_paths() {
    assert_eq!(join_url("http://x/api/v1", "https://other/y"), "https://other/y");
}
