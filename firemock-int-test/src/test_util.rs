use firemock::errors::FiremockResult;
use firemock::Firemock;
use std::time::Instant;

/// Two top-level collections; `collection-2/document-2-4` carries a
/// subcollection. `field8` holds timestamps and `field9` bytes once loaded.
pub const FIXTURE: &str = r#"{
  "collection-1": {
    "document-1-1": {
      "field1": "value-1-1-1",
      "field2": "value-1-1-2",
      "field3": 1,
      "field4": "equal",
      "field5": true,
      "field6": [1.0, 2.0, 3.0],
      "field7": { "subfield1": "subvalue-1-1-1-1", "subfield2": "subvalue-1-1-1-2" },
      "field8": "2021-01-01T00:00:00Z",
      "field9": "data:application/octet-stream;base64,MTIzNDU2Nzg5MA=="
    },
    "document-1-2": {
      "field1": "value-1-2-1",
      "field2": "value-1-2-2",
      "field3": 2,
      "field4": "equal",
      "field5": false,
      "field6": [1.0, 2.0, 4.0],
      "field7": { "subfield1": "subvalue-1-2-1-1", "subfield2": "subvalue-1-2-1-2" },
      "field8": "2022-01-01T00:00:00Z",
      "field9": "data:application/octet-stream;base64,MTIzNDU2Nzg5MQ=="
    }
  },
  "collection-2": {
    "document-2-4": {
      "field1": "value-2-4-1",
      "__collections__": {
        "subcollection-2-4": {
          "subdocument-2-4-1": { "field1": "value-2-4-1-1" },
          "subdocument-2-4-2": { "field1": "value-2-4-2-1", "field2": "value-2-4-2-2" }
        }
      }
    }
  }
}"#;

/// Runs `test` against the context produced by `before`, then hands the
/// context to `after`. Panics with the first error encountered.
pub fn run_test<T, B, A>(before: B, test: T, after: A)
where
    T: Fn(TestContext) -> FiremockResult<()>,
    B: Fn() -> FiremockResult<TestContext>,
    A: Fn(TestContext) -> FiremockResult<()>,
{
    let start_time = Instant::now();
    let ctx = match before() {
        Ok(ctx) => ctx,
        Err(e) => panic!("Before run failed: {:?}", e),
    };

    let test_result = test(ctx.clone());
    let after_result = after(ctx);
    log::debug!("Test finished in {:?}", start_time.elapsed());

    if let Err(e) = test_result {
        panic!("Test failed: {:?}", e);
    }
    if let Err(e) = after_result {
        panic!("After run failed: {:?}", e);
    }
}

#[derive(Clone)]
pub struct TestContext {
    store: Firemock,
}

impl TestContext {
    pub fn new(store: Firemock) -> Self {
        Self { store }
    }

    pub fn store(&self) -> Firemock {
        self.store.clone()
    }
}

/// A store with default settings and [FIXTURE] loaded.
pub fn create_test_context() -> FiremockResult<TestContext> {
    let store = Firemock::builder().open()?;
    store.load_json_str(FIXTURE)?;
    Ok(TestContext::new(store))
}

/// A store with default settings and no documents.
pub fn create_empty_context() -> FiremockResult<TestContext> {
    Ok(TestContext::new(Firemock::builder().open()?))
}

pub fn cleanup(ctx: TestContext) -> FiremockResult<()> {
    ctx.store().reset();
    Ok(())
}
