use firemock::common::SortOrder;
use firemock::fields;
use firemock::filter::field;
use firemock::query::StructuredQuery;
use firemock::write::Write;
use firemock_int_test::test_util::{cleanup, create_empty_context, run_test};
use std::thread;

#[test]
fn test_concurrent_writes_and_queries() {
    run_test(
        create_empty_context,
        |ctx| {
            let writers: Vec<_> = (0..4)
                .map(|w| {
                    let store = ctx.store();
                    thread::spawn(move || {
                        for i in 0..50 {
                            let path = format!("items/w{}-{:02}", w, i);
                            store.set(&path, fields! { "writer" => w, "seq" => i })?;
                        }
                        Ok::<_, firemock::errors::FiremockError>(())
                    })
                })
                .collect();

            let readers: Vec<_> = (0..4)
                .map(|_| {
                    let store = ctx.store();
                    thread::spawn(move || {
                        let query = StructuredQuery::from("", "items")
                            .filter(field("seq").gte(0))
                            .order_by("seq", SortOrder::Descending);
                        for _ in 0..20 {
                            let cursor = store.run_query(&query)?;
                            let seqs: Vec<i64> = cursor
                                .filter_map(|s| s.get("seq").ok().flatten().and_then(|v| v.as_integer()))
                                .collect();
                            assert!(seqs.windows(2).all(|w| w[0] >= w[1]));
                        }
                        Ok::<_, firemock::errors::FiremockError>(())
                    })
                })
                .collect();

            for handle in writers.into_iter().chain(readers) {
                match handle.join() {
                    Ok(result) => result?,
                    Err(_) => panic!("worker thread panicked"),
                }
            }

            let all = ctx.store().run_query(&StructuredQuery::from("", "items"))?;
            assert_eq!(all.len(), 200);
            Ok(())
        },
        cleanup,
    );
}

#[test]
fn test_concurrent_batches_are_all_or_nothing() {
    run_test(
        create_empty_context,
        |ctx| {
            let handles: Vec<_> = (0..8)
                .map(|t| {
                    let store = ctx.store();
                    thread::spawn(move || {
                        let writes = vec![
                            Write::set(&format!("pairs/{}-a", t), fields! { "t" => t }),
                            Write::set(&format!("pairs/{}-b", t), fields! { "t" => t }),
                        ];
                        store.commit(&writes).map(|results| results.len())
                    })
                })
                .collect();
            for handle in handles {
                match handle.join() {
                    Ok(result) => assert_eq!(result?, 2),
                    Err(_) => panic!("worker thread panicked"),
                }
            }

            let store = ctx.store();
            for t in 0..8 {
                let a = store.get_document(&format!("pairs/{}-a", t))?;
                let b = store.get_document(&format!("pairs/{}-b", t))?;
                assert_eq!(a.update_time(), b.update_time());
            }
            Ok(())
        },
        cleanup,
    );
}
