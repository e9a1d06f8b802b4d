//! Integration tests for the bulk transfer engine against the in-memory store.

use std::sync::Arc;

use serde_json::json;

use cookie_transfer::{
    BulkTransfer, ExportPolicy, ExportScope, ImportError, MemoryStore, SameSite,
};

fn engine() -> (BulkTransfer, Arc<MemoryStore>) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
    let store = Arc::new(MemoryStore::new());
    (BulkTransfer::new(store.clone()), store)
}

// ---- Import: per-record isolation and aggregation ----

#[tokio::test]
async fn test_import_batch_counts_add_up_and_preserve_order() {
    let (transfer, store) = engine();

    let records = vec![
        json!({"name": "ok1", "value": "v", "domain": "x.com"}),
        json!({"value": "missing-name", "domain": "x.com"}),
        json!({"name": "ok2", "value": "v", "domain": "x.com"}),
        json!({"name": "no-value", "domain": "x.com"}),
        json!("not even an object"),
    ];

    let result = transfer.import_batch(&records, None).await;

    assert_eq!(result.success_count + result.error_count, records.len());
    assert_eq!(result.success_count, 2);
    assert_eq!(result.error_count, 3);
    assert_eq!(result.errors.len(), 3);

    // Errors preserve input order with the best-available identifiers.
    assert_eq!(result.errors[0].identifier, "unknown");
    assert_eq!(result.errors[1].identifier, "no-value");
    assert_eq!(result.errors[2].identifier, "unknown");

    assert_eq!(store.len(), 2);
    assert!(store.get("ok1", "x.com", "/").is_some());
    assert!(store.get("ok2", "x.com", "/").is_some());
}

#[tokio::test]
async fn test_import_batch_same_identity_last_write_wins() {
    let (transfer, store) = engine();

    let records = vec![
        json!({"name": "sid", "value": "first", "domain": "x.com"}),
        json!({"name": "sid", "value": "second", "domain": "x.com"}),
    ];

    let result = transfer.import_batch(&records, None).await;
    assert!(result.is_complete_success());
    assert_eq!(store.len(), 1);
    assert_eq!(store.get("sid", "x.com", "/").unwrap().value(), "second");
}

#[tokio::test]
async fn test_import_batch_threads_fallback_domain() {
    let (transfer, store) = engine();

    let records = vec![json!({"name": "sid", "value": "v"})];
    let result = transfer
        .import_batch(&records, Some("tab.example.com"))
        .await;

    assert!(result.is_complete_success());
    assert!(store.get("sid", "tab.example.com", "/").is_some());
}

#[tokio::test]
async fn test_import_applies_secure_same_site_coupling() {
    let (transfer, store) = engine();

    let records = vec![json!({
        "name": "a", "value": "b", "domain": "x.com",
        "sameSite": "None", "secure": false,
    })];

    let result = transfer.import_batch(&records, None).await;
    assert!(result.is_complete_success(), "errors: {:?}", result.errors);

    let stored = store.get("a", "x.com", "/").unwrap();
    assert_eq!(stored.same_site, SameSite::NoRestriction);
    assert!(stored.secure, "coupling rule must force the secure flag");
}

// ---- Import: structural tier ----

#[tokio::test]
async fn test_import_json_structural_failure_touches_nothing() {
    let (transfer, store) = engine();

    for payload in ["42", "\"cookies\"", "{\"data\": []}", "not json at all"] {
        let err = transfer.import_json(payload, None).await.unwrap_err();
        assert!(
            matches!(err, ImportError::Json(_) | ImportError::InvalidShape { .. }),
            "unexpected error for payload {payload}: {err}"
        );
    }
    assert!(store.is_empty(), "structural failures must not touch the store");
}

#[tokio::test]
async fn test_import_json_accepts_both_payload_shapes() {
    let (transfer, store) = engine();

    let bare = r#"[{"name": "a", "value": "1", "domain": "x.com"}]"#;
    let wrapped = r#"{"cookies": [{"name": "b", "value": "2", "domain": "x.com"}]}"#;

    assert!(transfer.import_json(bare, None).await.unwrap().is_complete_success());
    assert!(transfer.import_json(wrapped, None).await.unwrap().is_complete_success());
    assert_eq!(store.len(), 2);
}

// ---- Export ----

#[tokio::test]
async fn test_export_filtering_drops_secure_and_http_only() {
    let (transfer, _store) = engine();

    let records = vec![
        json!({"name": "secure-one", "value": "v", "domain": "x.com", "secure": true}),
        json!({"name": "plain-one", "value": "v", "domain": "x.com"}),
        json!({"name": "hidden-one", "value": "v", "domain": "x.com", "httpOnly": true}),
    ];
    assert!(transfer.import_batch(&records, None).await.is_complete_success());

    let doc = transfer
        .export_batch(
            &ExportScope::AllDomains,
            ExportPolicy {
                include_secure: false,
                include_http_only: false,
            },
        )
        .await
        .unwrap();

    assert_eq!(doc.count, 1);
    assert_eq!(doc.cookies.len(), 1);
    assert_eq!(doc.cookies[0].name, "plain-one");
    assert_eq!(doc.scope, ExportScope::AllDomains);
}

#[tokio::test]
async fn test_export_domain_scope_covers_subdomains_only() {
    let (transfer, _store) = engine();

    let records = vec![
        json!({"name": "a", "value": "v", "domain": "x.com"}),
        json!({"name": "b", "value": "v", "domain": "api.x.com"}),
        json!({"name": "c", "value": "v", "domain": "other.com"}),
    ];
    assert!(transfer.import_batch(&records, None).await.is_complete_success());

    let doc = transfer
        .export_batch(
            &ExportScope::Domain("x.com".to_string()),
            ExportPolicy::default(),
        )
        .await
        .unwrap();

    assert_eq!(doc.count, 2);
    assert_eq!(doc.scope.label(), "x.com");
    assert!(doc.cookies.iter().all(|c| c.domain.ends_with("x.com")));
}

#[tokio::test]
async fn test_export_has_no_store_side_effects() {
    let (transfer, store) = engine();

    let records = vec![json!({"name": "a", "value": "v", "domain": "x.com"})];
    transfer.import_batch(&records, None).await;
    let before = store.len();

    transfer
        .export_batch(&ExportScope::AllDomains, ExportPolicy::default())
        .await
        .unwrap();

    assert_eq!(store.len(), before);
}

// ---- Round-trip ----

#[tokio::test]
async fn test_export_import_round_trip_is_field_for_field_equal() {
    let (transfer, _store) = engine();

    let records = vec![
        json!({"name": "plain", "value": "1", "domain": "x.com", "path": "/app",
               "sameSite": "lax", "expirationDate": 1_900_000_000.0}),
        json!({"name": "locked", "value": "2", "domain": "x.com",
               "secure": true, "httpOnly": true, "sameSite": "strict"}),
        // Originally insecure no_restriction cookie: documented lossy transform.
        json!({"name": "open", "value": "3", "domain": "x.com",
               "sameSite": "None", "secure": false}),
    ];
    assert!(transfer.import_batch(&records, None).await.is_complete_success());

    let doc = transfer
        .export_batch(&ExportScope::AllDomains, ExportPolicy::default())
        .await
        .unwrap();
    let payload = serde_json::to_string(&doc).unwrap();

    // Re-import the document into an empty store.
    let (second_transfer, second_store) = engine();
    let result = second_transfer.import_json(&payload, None).await.unwrap();
    assert!(result.is_complete_success(), "errors: {:?}", result.errors);

    let original = doc.cookies;
    let replayed = second_transfer
        .export_batch(&ExportScope::AllDomains, ExportPolicy::default())
        .await
        .unwrap()
        .cookies;
    assert_eq!(replayed, original);
    assert_eq!(second_store.len(), 3);

    // The no_restriction cookie came back secure; that is the documented
    // lossy transform, not data loss.
    let open = second_store.get("open", "x.com", "/").unwrap();
    assert_eq!(open.same_site, SameSite::NoRestriction);
    assert!(open.secure);
}

// ---- Single-record supplements ----

#[tokio::test]
async fn test_set_cookie_single_record() {
    let (transfer, store) = engine();

    let stored = transfer
        .set_cookie(
            &json!({"name": "sid", "value": "abc", "domain": ".x.com"}),
            None,
        )
        .await
        .unwrap();

    assert_eq!(stored.domain, "x.com");
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn test_set_cookie_surfaces_normalization_failure() {
    let (transfer, store) = engine();

    let err = transfer
        .set_cookie(&json!({"value": "no-name", "domain": "x.com"}), None)
        .await
        .unwrap_err();

    assert!(err.to_string().contains("name"));
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_remove_cookie_requires_matching_secure_flag() {
    let (transfer, store) = engine();

    let records = vec![json!({
        "name": "sid", "value": "v", "domain": "x.com", "secure": true,
    })];
    assert!(transfer.import_batch(&records, None).await.is_complete_success());

    // Addressed as non-secure: silent non-match at the store layer.
    assert!(!transfer.remove_cookie("sid", "x.com", None, false).await.unwrap());
    assert_eq!(store.len(), 1);

    // Addressed with the flag the write used: removed.
    assert!(transfer.remove_cookie("sid", "x.com", None, true).await.unwrap());
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_remove_cookie_strips_wildcard_domain_marker() {
    let (transfer, store) = engine();

    let records = vec![json!({"name": "sid", "value": "v", "domain": "x.com"})];
    transfer.import_batch(&records, None).await;

    assert!(transfer.remove_cookie("sid", ".x.com", None, false).await.unwrap());
    assert!(store.is_empty());
}
