use firemock::common::SortOrder;
use firemock::errors::ErrorKind;
use firemock::fields;
use firemock::filter::{and, field, or, FieldOperator, Filter};
use firemock::query::StructuredQuery;
use firemock::Firemock;
use firemock_int_test::test_util::{cleanup, create_empty_context, create_test_context, run_test};

fn query() -> StructuredQuery {
    StructuredQuery::from("", "collection-1")
}

fn ids(store: &Firemock, query: &StructuredQuery) -> Vec<String> {
    match store.run_query(query) {
        Ok(cursor) => cursor.ids(),
        Err(e) => panic!("query failed: {:?}", e),
    }
}

#[test]
fn test_list_all_documents() {
    run_test(
        create_test_context,
        |ctx| {
            let cursor = ctx.store().run_query(&query())?;
            assert_eq!(cursor.len(), 2);
            assert_eq!(cursor.ids(), vec!["document-1-1", "document-1-2"]);
            Ok(())
        },
        cleanup,
    );
}

#[test]
fn test_order_by_every_value_type() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            for name in ["field1", "field2", "field3", "field6", "field7", "field8", "field9"] {
                assert_eq!(
                    ids(&store, &query().order_by(name, SortOrder::Descending)),
                    vec!["document-1-2", "document-1-1"],
                    "{} desc",
                    name
                );
                assert_eq!(
                    ids(&store, &query().order_by(name, SortOrder::Ascending)),
                    vec!["document-1-1", "document-1-2"],
                    "{} asc",
                    name
                );
            }
            Ok(())
        },
        cleanup,
    );
}

#[test]
fn test_order_by_multiple_keys() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            let q = query()
                .order_by("field4", SortOrder::Descending)
                .order_by("field1", SortOrder::Descending);
            assert_eq!(ids(&store, &q), vec!["document-1-2", "document-1-1"]);

            let q = query()
                .order_by("field4", SortOrder::Descending)
                .order_by("field1", SortOrder::Ascending);
            assert_eq!(ids(&store, &q), vec!["document-1-1", "document-1-2"]);
            Ok(())
        },
        cleanup,
    );
}

#[test]
fn test_order_by_document_id() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            let q = query().order_by("__name__", SortOrder::Descending);
            assert_eq!(ids(&store, &q), vec!["document-1-2", "document-1-1"]);
            let q = query().order_by_document_id(SortOrder::Descending);
            assert_eq!(ids(&store, &q), vec!["document-1-2", "document-1-1"]);
            Ok(())
        },
        cleanup,
    );
}

#[test]
fn test_limit_and_offset() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            assert_eq!(ids(&store, &query().limit(1)), vec!["document-1-1"]);
            assert_eq!(ids(&store, &query().offset(1)), vec!["document-1-2"]);
            assert!(ids(&store, &query().offset(5)).is_empty());
            assert_eq!(ids(&store, &query().limit(0)).len(), 2);
            Ok(())
        },
        cleanup,
    );
}

#[test]
fn test_equality_and_range_filters() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            let run = |filter: Filter| ids(&store, &query().filter(filter));

            assert_eq!(run(field("field1").eq("value-1-2-1")), vec!["document-1-2"]);
            assert_eq!(run(field("field4").eq("equal")).len(), 2);
            assert!(run(field("field4").eq("non-existent")).is_empty());
            assert_eq!(run(field("field1").lt("value-1-2-1")), vec!["document-1-1"]);
            assert_eq!(run(field("field1").lte("value-1-2-1")).len(), 2);
            assert_eq!(run(field("field1").gt("value-1-2-1")).len(), 0);
            assert_eq!(run(field("field1").gte("value-1-2-1")), vec!["document-1-2"]);
            assert_eq!(run(field("field1").ne("value-1-1-1")), vec!["document-1-2"]);
            assert_eq!(run(field("field3").gt(1)), vec!["document-1-2"]);
            assert_eq!(run(field("field5").eq(true)), vec!["document-1-1"]);
            Ok(())
        },
        cleanup,
    );
}

#[test]
fn test_membership_filters() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            let run = |filter: Filter| ids(&store, &query().filter(filter));

            assert_eq!(run(field("field1").in_array(vec!["value-1-1-1", "value-1-2-1"])).len(), 2);
            assert_eq!(run(field("field1").in_array(vec!["value-1-1-1", "xxxx"])), vec!["document-1-1"]);
            assert!(run(field("field1").in_array(vec!["xxxx", "yyyy"])).is_empty());
            assert!(run(field("field1").not_in_array(vec!["value-1-1-1", "value-1-2-1"])).is_empty());
            assert_eq!(run(field("field1").not_in_array(vec!["value-1-1-1", "xxxx"])), vec!["document-1-2"]);
            assert_eq!(run(field("field6").array_contains(3.0)), vec!["document-1-1"]);
            assert!(run(field("field6").array_contains(5.0)).is_empty());
            assert_eq!(run(field("field6").array_contains_any(vec![4.0, 5.0])), vec!["document-1-2"]);
            assert!(run(Filter::field("field1", FieldOperator::In, "value-1-1-1")).is_empty());
            Ok(())
        },
        cleanup,
    );
}

#[test]
fn test_nested_field_filter() {
    run_test(
        create_empty_context,
        |ctx| {
            let store = ctx.store();
            store.set("c/match", fields! { "field7" => fields! { "subfield2" => "v" } })?;
            store.set("c/other", fields! { "field7" => fields! { "subfield2" => "w" } })?;
            store.set("c/scalar", fields! { "field7" => "v" })?;
            store.set("c/absent", fields! { "x" => 1 })?;

            let q = StructuredQuery::from("", "c").filter(field("field7.subfield2").eq("v"));
            assert_eq!(ids(&store, &q), vec!["match"]);
            Ok(())
        },
        cleanup,
    );
}

#[test]
fn test_composite_filters() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            let run = |filter: Filter| ids(&store, &query().filter(filter));

            let both = and(vec![field("field4").eq("equal"), field("field3").eq(2)]);
            assert_eq!(run(both), vec!["document-1-2"]);

            let either = or(vec![field("field3").eq(1), field("field1").eq("value-1-2-1")]);
            assert_eq!(run(either).len(), 2);

            let nested = field("field4")
                .eq("equal")
                .and(or(vec![field("field5").eq(false), field("field3").gt(5)]));
            assert_eq!(run(nested), vec!["document-1-2"]);
            Ok(())
        },
        cleanup,
    );
}

#[test]
fn test_query_subcollection() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            let q = StructuredQuery::from("collection-2/document-2-4", "subcollection-2-4")
                .order_by("field1", SortOrder::Descending);
            assert_eq!(ids(&store, &q), vec!["subdocument-2-4-2", "subdocument-2-4-1"]);

            let q = StructuredQuery::collection("collection-2/document-2-4/subcollection-2-4")
                .limit(1);
            assert_eq!(ids(&store, &q), vec!["subdocument-2-4-1"]);
            Ok(())
        },
        cleanup,
    );
}

#[test]
fn test_missing_collection_yields_empty_result() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            assert!(store.run_query(&StructuredQuery::from("", "nothing"))?.is_empty());
            let q = StructuredQuery::from("collection-1/missing", "sub");
            assert!(store.run_query(&q)?.is_empty());
            Ok(())
        },
        cleanup,
    );
}

#[test]
fn test_malformed_query_is_an_error() {
    run_test(
        create_test_context,
        |ctx| {
            let store = ctx.store();
            let err = store
                .run_query(&query().filter(field("field7..subfield2").eq("v")))
                .unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::InvalidFieldPath);

            let err = store
                .run_query(&StructuredQuery::from("collection-1", "sub"))
                .unwrap_err();
            assert_eq!(err.kind(), &ErrorKind::InvalidPath);
            Ok(())
        },
        cleanup,
    );
}

#[test]
fn test_pagination_keeps_relative_order() {
    run_test(
        create_empty_context,
        |ctx| {
            let store = ctx.store();
            for (id, rank) in [("e", 2), ("a", 1), ("d", 2), ("b", 3), ("c", 1)] {
                store.set(&format!("c/{}", id), fields! { "rank" => rank })?;
            }
            let base = StructuredQuery::from("", "c").order_by("rank", SortOrder::Ascending);
            let all = ids(&store, &base);
            assert_eq!(all, vec!["a", "c", "d", "e", "b"]);

            for offset in 0..5 {
                for limit in 1..4 {
                    let page = ids(&store, &base.clone().offset(offset).limit(limit));
                    let end = (offset + limit).min(all.len());
                    assert_eq!(page, all[offset..end].to_vec());
                }
            }
            Ok(())
        },
        cleanup,
    );
}
