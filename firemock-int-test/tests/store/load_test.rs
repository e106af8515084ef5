use chrono::{TimeZone, Utc};
use firemock::common::Value;
use firemock::errors::ErrorKind;
use firemock_int_test::test_util::{cleanup, create_empty_context, create_test_context, run_test, FIXTURE};
use serde_json::json;

#[test]
fn test_load_fixture() {
    run_test(
        create_empty_context,
        |ctx| {
            let count = ctx.store().load_json_str(FIXTURE)?;
            assert_eq!(count, 5);
            Ok(())
        },
        cleanup,
    );
}

#[test]
fn test_load_coerces_strings() {
    run_test(
        create_empty_context,
        |ctx| {
            let store = ctx.store();
            store.load_json(&json!({
                "c": {
                    "d": {
                        "when": "2023-05-01T10:00:00Z",
                        "blob": "data:image/png;base64,AAEC",
                        "broken": "data:image/png;base64,%%%",
                        "plain": "hello",
                        "list": ["2023-05-01T10:00:00Z", "x"],
                    }
                }
            }))?;
            let snapshot = store.get_document("c/d")?;
            let expected = Utc.with_ymd_and_hms(2023, 5, 1, 10, 0, 0).unwrap();
            assert_eq!(snapshot.get("when")?, Some(&Value::Timestamp(expected)));
            assert_eq!(snapshot.get("blob")?, Some(&Value::bytes(vec![0u8, 1, 2])));
            assert_eq!(
                snapshot.get("broken")?,
                Some(&Value::from("data:image/png;base64,%%%"))
            );
            assert_eq!(snapshot.get("plain")?, Some(&Value::from("hello")));
            assert_eq!(
                snapshot.get("list")?,
                Some(&Value::from(vec![Value::Timestamp(expected), Value::from("x")]))
            );
            Ok(())
        },
        cleanup,
    );
}

#[test]
fn test_load_replaces_only_named_collections() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            store.load_json(&json!({ "collection-1": { "fresh": { "a": 1 } } }))?;
            assert!(store.get_document("collection-1/document-1-1").is_err());
            assert!(store.get_document("collection-1/fresh").is_ok());
            assert!(store.get_document("collection-2/document-2-4").is_ok());
            Ok(())
        },
        cleanup,
    );
}

#[test]
fn test_malformed_source_changes_nothing() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            let err = store
                .load_json(&json!({ "collection-1": { "d": "not a document" } }))
                .unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::LoadError);
            assert!(store.get_document("collection-1/document-1-1").is_ok());

            let err = store.load_json_str("[1, 2").unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::LoadError);
            Ok(())
        },
        cleanup,
    );
}

#[test]
fn test_reset() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            store.reset();
            assert!(store.collection_ids("")?.is_empty());
            assert!(store.get_document("collection-1/document-1-1").is_err());
            Ok(())
        },
        cleanup,
    );
}
