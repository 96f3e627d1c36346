use super::*;

// =============================================================
// MemoryTokenStore
// =============================================================

#[test]
fn memory_store_starts_empty() {
    assert!(MemoryTokenStore::new().read().is_none());
}

#[test]
fn memory_store_save_replaces_prior_value() {
    let store = MemoryTokenStore::new();
    store.save("first");
    store.save("second");
    assert_eq!(store.read().as_deref(), Some("second"));
}

#[test]
fn memory_store_clear_removes_token() {
    let store = MemoryTokenStore::with_token("abc");
    store.clear();
    assert!(store.read().is_none());
}

#[test]
fn memory_store_clones_share_slot() {
    let store = MemoryTokenStore::new();
    let observer = store.clone();
    store.save("shared");
    assert_eq!(observer.read().as_deref(), Some("shared"));
    observer.clear();
    assert!(store.read().is_none());
}

#[test]
fn memory_store_treats_empty_token_as_absent() {
    let store = MemoryTokenStore::with_token("");
    assert!(store.read().is_none());
}

// =============================================================
// LocalStorageTokenStore (native build)
// =============================================================

#[cfg(not(feature = "csr"))]
#[test]
fn local_storage_store_is_inert_outside_browser() {
    let store = LocalStorageTokenStore;
    store.save("abc");
    assert!(store.read().is_none());
    store.clear();
}

#[test]
fn storage_write_failures_are_reported() {
    assert!(storage_write_ok(Ok::<(), &str>(()), "clear"));
    assert!(!storage_write_ok(Err("quota"), "clear"));
    assert!(!storage_write_ok(Err("denied"), "persist"));
}

#[test]
fn storage_key_matches_backend_convention() {
    assert_eq!(STORAGE_KEY, "token");
}
