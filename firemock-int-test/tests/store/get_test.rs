use firemock::common::Value;
use firemock::errors::ErrorKind;
use firemock_int_test::test_util::{cleanup, create_test_context, run_test};

#[test]
fn test_get_document() {
    run_test(
        create_test_context,
        |ctx| {
            let snapshot = ctx.store().get_document("collection-1/document-1-1")?;
            assert_eq!(snapshot.id(), "document-1-1");
            assert_eq!(snapshot.get("field1")?, Some(&Value::from("value-1-1-1")));
            assert_eq!(snapshot.get("field2")?, Some(&Value::from("value-1-1-2")));
            assert_eq!(
                snapshot.get("field6")?,
                Some(&Value::from(vec![1.0, 2.0, 3.0]))
            );
            assert_eq!(
                snapshot.get("field7.subfield2")?.and_then(|v| v.as_string()),
                Some("subvalue-1-1-1-2")
            );
            assert_eq!(
                snapshot.get("field9")?.and_then(|v| v.as_bytes()),
                Some(&b"1234567890"[..])
            );
            assert!(snapshot.get("field8")?.and_then(|v| v.as_timestamp()).is_some());
            Ok(())
        },
        cleanup,
    );
}

#[test]
fn test_get_subdocument() {
    run_test(
        create_test_context,
        |ctx| {
            let snapshot = ctx
                .store()
                .get_document("collection-2/document-2-4/subcollection-2-4/subdocument-2-4-2")?;
            assert_eq!(snapshot.data().len(), 2);
            assert_eq!(snapshot.get("field2")?, Some(&Value::from("value-2-4-2-2")));
            Ok(())
        },
        cleanup,
    );
}

#[test]
fn test_get_by_resource_name() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            let name = "projects/projectID/databases/(default)/documents/collection-1/document-1-2";
            let snapshot = store.get_document(name)?;
            assert_eq!(snapshot.name(store.config()), name);
            Ok(())
        },
        cleanup,
    );
}

#[test]
fn test_get_missing_document() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            let err = store.get_document("missing/doc").unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::CollectionNotFound);
            let err = store.get_document("collection-1/missing").unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::DocumentNotFound);
            let err = store
                .get_document("collection-2/document-2-4/subcollection-2-4/missing")
                .unwrap_err();
            assert!(err.is_not_found());
            Ok(())
        },
        cleanup,
    );
}

#[test]
fn test_get_invalid_path() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            for path in ["collection-1", "collection-1//document-1-1", ""] {
                let err = store.get_document(path).unwrap_err();
                assert_eq!(err.kind(), &ErrorKind::InvalidPath, "{}", path);
            }
            Ok(())
        },
        cleanup,
    );
}

#[test]
fn test_collection_ids() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            assert_eq!(store.collection_ids("")?, vec!["collection-1", "collection-2"]);
            assert_eq!(
                store.collection_ids("collection-2/document-2-4")?,
                vec!["subcollection-2-4"]
            );
            Ok(())
        },
        cleanup,
    );
}
