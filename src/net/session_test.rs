use super::*;

#[test]
fn memory_session_starts_empty() {
    assert_eq!(MemorySession::default().read(), None);
}

#[test]
fn memory_session_write_then_read() {
    let store = MemorySession::default();
    store.write("T");
    assert_eq!(store.read().as_deref(), Some("T"));
}

#[test]
fn memory_session_clear_discards_token() {
    let store = MemorySession::with_token("stale");
    store.clear();
    assert_eq!(store.read(), None);
}

#[test]
fn blank_tokens_read_as_absent() {
    let store = MemorySession::with_token("   ");
    assert_eq!(store.read(), None);
}

#[cfg(not(feature = "csr"))]
#[test]
fn local_storage_session_is_inert_outside_browser() {
    let store = LocalStorageSession;
    store.write("T");
    assert_eq!(store.read(), None);
    store.clear();
}
