use crate::collection::{BatchGetResponse, DocumentSnapshot, DocumentTree, QueryCursor};
use crate::common::{now, Fields};
use crate::errors::FiremockResult;
use crate::firemock_builder::FiremockBuilder;
use crate::firemock_config::FiremockConfig;
use crate::loader;
use crate::path::{DocumentPath, ResourcePath};
use crate::query::{execute, StructuredQuery};
use crate::write::{self, Write, WriteResult};
use parking_lot::RwLock;
use std::sync::Arc;

/// An in-memory document store emulating the Firestore data plane.
///
/// `Firemock` uses the PIMPL design pattern: clones share the same document
/// tree through `Arc<FiremockInner>`, so one store can be handed to any number
/// of threads.
///
/// A single reader/writer lock guards the whole tree. Reads (get, batch get,
/// query, collection listing) hold it shared for their entire scan; writes
/// (commit, reset, load) hold it exclusively. Every read returns owned
/// snapshots, so nothing borrowed from the tree outlives the lock.
///
/// # Examples
///
/// ```rust
/// use firemock::{fields, Firemock};
/// use firemock::filter::field;
/// use firemock::query::StructuredQuery;
///
/// let store = Firemock::builder().open().unwrap();
/// store.set("cities/ams", fields! { "population" => 900_000 }).unwrap();
/// store.set("cities/utr", fields! { "population" => 360_000 }).unwrap();
///
/// let query = StructuredQuery::from("", "cities").filter(field("population").gt(500_000));
/// let cursor = store.run_query(&query).unwrap();
/// assert_eq!(cursor.ids(), vec!["ams"]);
/// ```
#[derive(Clone, Debug)]
pub struct Firemock {
    inner: Arc<FiremockInner>,
}

impl Firemock {
    pub(crate) fn new(config: FiremockConfig) -> Self {
        Firemock {
            inner: Arc::new(FiremockInner {
                config,
                tree: RwLock::new(DocumentTree::new()),
            }),
        }
    }

    /// Creates a builder for configuring and opening a store.
    pub fn builder() -> FiremockBuilder {
        FiremockBuilder::new()
    }

    pub fn config(&self) -> &FiremockConfig {
        &self.inner.config
    }

    /// Reads one document.
    ///
    /// # Errors
    ///
    /// `InvalidPath` for a malformed path, `CollectionNotFound` or
    /// `DocumentNotFound` when the document does not exist.
    pub fn get_document(&self, path: &str) -> FiremockResult<DocumentSnapshot> {
        log::debug!("Getting document {}", path);
        let path = DocumentPath::parse(path)?;
        let tree = self.inner.tree.read();
        let document = tree.resolve_strict(&path).map_err(|err| {
            log::debug!("Document {} not found: {}", path, err);
            err
        })?;
        Ok(document.snapshot(now()))
    }

    /// Reads several documents under one shared lock.
    ///
    /// The responses follow the order of `paths`; a document that does not
    /// exist is reported as [BatchGetResponse::Missing] and does not stop the
    /// remaining lookups.
    ///
    /// # Errors
    ///
    /// `InvalidPath` if any path is malformed; nothing is read in that case.
    pub fn batch_get_documents(&self, paths: &[&str]) -> FiremockResult<Vec<BatchGetResponse>> {
        log::debug!("Batch getting {} documents", paths.len());
        let paths = paths
            .iter()
            .map(|path| DocumentPath::parse(path))
            .collect::<FiremockResult<Vec<_>>>()?;

        let tree = self.inner.tree.read();
        let read_time = now();
        Ok(paths
            .into_iter()
            .map(|path| match tree.resolve_strict(&path) {
                Ok(document) => BatchGetResponse::Found(document.snapshot(read_time)),
                Err(_) => BatchGetResponse::Missing(path.to_string()),
            })
            .collect())
    }

    /// Applies an ordered batch of writes atomically.
    ///
    /// All writes share one update time. If any write fails validation or its
    /// existence precondition, no write is applied and the first error in
    /// batch order is returned.
    pub fn commit(&self, writes: &[Write]) -> FiremockResult<Vec<WriteResult>> {
        log::debug!("Committing {} writes", writes.len());
        let mut tree = self.inner.tree.write();
        write::commit(&mut tree, writes, now())
    }

    /// Replaces all fields of the document at `path`, creating it if needed.
    pub fn set(&self, path: &str, fields: Fields) -> FiremockResult<WriteResult> {
        self.commit_one(Write::set(path, fields))
    }

    /// Writes the fields named by `mask` into an existing document.
    ///
    /// # Errors
    ///
    /// `PreconditionFailed` if the document does not exist.
    pub fn update(&self, path: &str, fields: Fields, mask: &[&str]) -> FiremockResult<WriteResult> {
        self.commit_one(Write::update(path, fields, mask))
    }

    /// Writes the fields named by `mask`, creating the document if needed.
    /// An empty mask replaces every field.
    pub fn create_or_merge(
        &self,
        path: &str,
        fields: Fields,
        mask: &[&str],
    ) -> FiremockResult<WriteResult> {
        self.commit_one(Write::merge(path, fields, mask))
    }

    fn commit_one(&self, write: Write) -> FiremockResult<WriteResult> {
        let mut results = self.commit(std::slice::from_ref(&write))?;
        Ok(results.remove(0))
    }

    /// Runs a structured query and returns its fully materialized result.
    ///
    /// A query against a collection that does not exist returns an empty
    /// cursor.
    ///
    /// # Errors
    ///
    /// `InvalidPath` for a malformed parent or collection id,
    /// `InvalidFieldPath` for a malformed filter or order-by field path.
    pub fn run_query(&self, query: &StructuredQuery) -> FiremockResult<QueryCursor> {
        log::debug!(
            "Running query on {}/{}",
            query.parent(),
            query.collection_id()
        );
        let tree = self.inner.tree.read();
        let read_time = now();
        let documents = execute(&tree, query, &self.inner.config, read_time)?;
        log::debug!("Query matched {} documents", documents.len());
        Ok(QueryCursor::new(documents, read_time))
    }

    /// Lists the ids of the collections directly under `parent`, sorted.
    /// An empty `parent` (or the documents root) lists the top-level
    /// collections.
    ///
    /// # Errors
    ///
    /// `InvalidPath` if `parent` is not a document path, NotFound if the
    /// parent document does not exist.
    pub fn collection_ids(&self, parent: &str) -> FiremockResult<Vec<String>> {
        log::debug!("Listing collections under {:?}", parent);
        let parent = ResourcePath::parse(parent)?;
        let parent = if parent.is_root() {
            None
        } else {
            Some(DocumentPath::try_from(parent)?)
        };

        let tree = self.inner.tree.read();
        Ok(tree.subcollections(parent.as_ref())?.keys().cloned().collect())
    }

    /// Removes every document and collection.
    pub fn reset(&self) {
        log::debug!("Resetting store");
        self.inner.tree.write().clear();
    }

    /// Bulk-loads documents, replacing top-level collections of the same
    /// name. Returns the number of documents loaded.
    ///
    /// # Errors
    ///
    /// `LoadError` if the source is not shaped as nested collections and
    /// documents. The store is unchanged in that case.
    pub fn load_json(&self, source: &serde_json::Value) -> FiremockResult<usize> {
        let mut tree = self.inner.tree.write();
        let count = loader::load(&mut tree, source, now())?;
        log::debug!("Loaded {} documents", count);
        Ok(count)
    }

    /// Parses `source` as JSON and loads it with [Firemock::load_json].
    pub fn load_json_str(&self, source: &str) -> FiremockResult<usize> {
        let value: serde_json::Value = serde_json::from_str(source).map_err(|err| {
            log::error!("Load source is not valid JSON: {}", err);
            err
        })?;
        self.load_json(&value)
    }
}

/// Private implementation of the store.
#[derive(Debug)]
struct FiremockInner {
    config: FiremockConfig,
    tree: RwLock<DocumentTree>,
}
