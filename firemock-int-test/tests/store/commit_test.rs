use firemock::common::Value;
use firemock::errors::ErrorKind;
use firemock::fields;
use firemock::write::Write;
use firemock_int_test::test_util::{cleanup, create_empty_context, create_test_context, run_test};

#[test]
fn test_set_round_trip() {
    run_test(
        create_empty_context,
        |ctx| {
            let store = ctx.store();
            let data = fields! {
                "name" => "Alice",
                "age" => 30,
                "score" => 9.5,
                "tags" => vec!["a", "b"],
                "address" => fields! { "city" => "Utrecht" },
                "nickname" => Value::Null,
            };
            store.set("users/alice", data.clone())?;
            assert_eq!(store.get_document("users/alice")?.data(), data);

            store.set("users/alice", fields! { "name" => "Alice" })?;
            let snapshot = store.get_document("users/alice")?;
            assert!(!snapshot.contains("age"));
            assert_eq!(snapshot.data().len(), 1);
            Ok(())
        },
        cleanup,
    );
}

#[test]
fn test_update_changes_only_masked_fields() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            let before = store.get_document("collection-1/document-1-1")?;
            store.update(
                "collection-1/document-1-1",
                fields! { "field1" => "changed", "field2" => "ignored" },
                &["field1"],
            )?;
            let after = store.get_document("collection-1/document-1-1")?;

            assert_eq!(after.get("field1")?, Some(&Value::from("changed")));
            for (key, value) in before.data() {
                if key != "field1" {
                    assert_eq!(after.get(&key)?, Some(&value), "{}", key);
                }
            }
            assert!(after.update_time() >= before.update_time());
            assert_eq!(after.create_time(), before.create_time());
            Ok(())
        },
        cleanup,
    );
}

#[test]
fn test_update_nested_field() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            store.update(
                "collection-1/document-1-1",
                fields! { "field7" => fields! { "subfield2" => "v" } },
                &["field7.subfield2"],
            )?;
            let snapshot = store.get_document("collection-1/document-1-1")?;
            assert_eq!(snapshot.get("field7.subfield2")?, Some(&Value::from("v")));
            assert_eq!(
                snapshot.get("field7.subfield1")?,
                Some(&Value::from("subvalue-1-1-1-1"))
            );
            Ok(())
        },
        cleanup,
    );
}

#[test]
fn test_update_missing_document_fails() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            let err = store
                .update("missing/doc", fields! { "a" => 1 }, &["a"])
                .unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::PreconditionFailed);
            assert!(err.cause().map(|c| c.is_not_found()).unwrap_or(false));
            assert!(store.get_document("missing/doc").is_err());
            assert_eq!(store.collection_ids("")?.len(), 2);
            Ok(())
        },
        cleanup,
    );
}

#[test]
fn test_commit_is_atomic() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            let err = store
                .commit(&[
                    Write::set("collection-1/document-1-1", fields! { "field1" => "lost" }),
                    Write::set("collection-3/new", fields! { "a" => 1 }),
                    Write::update("collection-1/missing", fields! { "a" => 1 }, &["a"]),
                ])
                .unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::PreconditionFailed);

            let snapshot = store.get_document("collection-1/document-1-1")?;
            assert_eq!(snapshot.get("field1")?, Some(&Value::from("value-1-1-1")));
            assert!(store.get_document("collection-3/new").is_err());
            Ok(())
        },
        cleanup,
    );
}

#[test]
fn test_commit_results_follow_batch_order() {
    run_test(
        create_empty_context,
        |ctx| {
            let store = ctx.store();
            let results = store.commit(&[
                Write::set("c/a", fields! { "n" => 1 }),
                Write::merge("c/b", fields! { "n" => 2 }, &["n"]),
                Write::update("c/a", fields! { "m" => 3 }, &["m"]),
            ])?;
            assert_eq!(results.len(), 3);
            let snapshot = store.get_document("c/a")?;
            assert_eq!(snapshot.data(), fields! { "n" => 1, "m" => 3 });
            assert_eq!(snapshot.update_time(), results[2].update_time());
            Ok(())
        },
        cleanup,
    );
}

#[test]
fn test_set_deep_path_creates_empty_ancestors() {
    run_test(
        create_empty_context,
        |ctx| {
            let store = ctx.store();
            store.set("a/b/c/d", fields! { "x" => 1 })?;
            let shell = store.get_document("a/b")?;
            assert!(shell.is_empty());
            assert_eq!(store.collection_ids("a/b")?, vec!["c"]);
            Ok(())
        },
        cleanup,
    );
}
