use firemock::collection::BatchGetResponse;
use firemock::errors::ErrorKind;
use firemock_int_test::test_util::{cleanup, create_test_context, run_test};

#[test]
fn test_batch_get_all_found() {
    run_test(
        create_test_context,
        |ctx| {
            let responses = ctx.store().batch_get_documents(&[
                "collection-1/document-1-2",
                "collection-1/document-1-1",
            ])?;
            let ids: Vec<_> = responses
                .iter()
                .filter_map(|r| r.snapshot().map(|s| s.id().to_string()))
                .collect();
            assert_eq!(ids, vec!["document-1-2", "document-1-1"]);
            Ok(())
        },
        cleanup,
    );
}

#[test]
fn test_batch_get_reports_every_missing_document() {
    run_test(
        create_test_context,
        |ctx| {
            let responses = ctx.store().batch_get_documents(&[
                "collection-1/missing-a",
                "collection-1/document-1-1",
                "nowhere/missing-b",
                "collection-2/document-2-4",
            ])?;
            assert_eq!(responses.len(), 4);
            assert!(matches!(&responses[0], BatchGetResponse::Missing(p) if p == "collection-1/missing-a"));
            assert!(responses[1].is_found());
            assert_eq!(responses[2].path(), "nowhere/missing-b");
            assert!(!responses[2].is_found());
            assert!(responses[3].is_found());
            Ok(())
        },
        cleanup,
    );
}

#[test]
fn test_batch_get_invalid_path_fails_call() {
    run_test(
        create_test_context,
        |ctx| {
            let err = ctx
                .store()
                .batch_get_documents(&["collection-1/document-1-1", "collection-1"])
                .unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::InvalidPath);
            Ok(())
        },
        cleanup,
    );
}

#[test]
fn test_batch_get_empty() {
    run_test(
        create_test_context,
        |ctx| {
            assert!(ctx.store().batch_get_documents(&[])?.is_empty());
            Ok(())
        },
        cleanup,
    );
}
