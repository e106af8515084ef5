use crate::common::{FieldPath, Fields, Value};
use crate::errors::FiremockResult;
use crate::firemock_config::FiremockConfig;
use crate::path::DocumentPath;
use chrono::{DateTime, Utc};
use im::OrdMap;

/// A detached, read-only copy of a document as it was at `read_time`.
///
/// Snapshots never borrow from the store, so they stay valid after the lock
/// guarding the store is released and are unaffected by later writes.
///
/// # Examples
///
/// ```rust
/// use firemock::{fields, Firemock};
///
/// let store = Firemock::builder().open().unwrap();
/// store.set("users/alice", fields! { "age" => 30 }).unwrap();
///
/// let snapshot = store.get_document("users/alice").unwrap();
/// assert_eq!(snapshot.id(), "alice");
/// assert_eq!(snapshot.get("age").unwrap().and_then(|v| v.as_integer()), Some(30));
/// ```
#[derive(Clone, Debug)]
pub struct DocumentSnapshot {
    path: DocumentPath,
    fields: OrdMap<String, Value>,
    create_time: DateTime<Utc>,
    update_time: DateTime<Utc>,
    read_time: DateTime<Utc>,
}

impl DocumentSnapshot {
    pub(crate) fn new(
        path: DocumentPath,
        fields: OrdMap<String, Value>,
        create_time: DateTime<Utc>,
        update_time: DateTime<Utc>,
        read_time: DateTime<Utc>,
    ) -> Self {
        DocumentSnapshot {
            path,
            fields,
            create_time,
            update_time,
            read_time,
        }
    }

    pub fn id(&self) -> &str {
        self.path.id()
    }

    pub fn path(&self) -> &DocumentPath {
        &self.path
    }

    /// Full resource name, `projects/{p}/databases/{d}/documents/{path}`.
    pub fn name(&self, config: &FiremockConfig) -> String {
        format!("{}/{}", config.documents_root(), self.path)
    }

    /// Top-level fields of the document.
    pub fn fields(&self) -> &OrdMap<String, Value> {
        &self.fields
    }

    /// Top-level fields copied into a plain map.
    pub fn data(&self) -> Fields {
        self.fields
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Looks up a dotted field path, descending through nested maps.
    ///
    /// An absent field is `Ok(None)`; a malformed path is an error.
    pub fn get(&self, field: &str) -> FiremockResult<Option<&Value>> {
        let path = FieldPath::parse(field)?;
        Ok(self.get_path(&path))
    }

    pub fn get_path(&self, path: &FieldPath) -> Option<&Value> {
        path.descend(self.fields.get(path.first()))
    }

    pub fn contains(&self, field: &str) -> bool {
        matches!(self.get(field), Ok(Some(_)))
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn create_time(&self) -> DateTime<Utc> {
        self.create_time
    }

    pub fn update_time(&self) -> DateTime<Utc> {
        self.update_time
    }

    pub fn read_time(&self) -> DateTime<Utc> {
        self.read_time
    }
}

/// One entry of a batch get, in request order.
#[derive(Clone, Debug)]
pub enum BatchGetResponse {
    /// The document exists.
    Found(DocumentSnapshot),
    /// Nothing exists at the requested path; carries the path as requested.
    Missing(String),
}

impl BatchGetResponse {
    pub fn is_found(&self) -> bool {
        matches!(self, BatchGetResponse::Found(_))
    }

    pub fn snapshot(&self) -> Option<&DocumentSnapshot> {
        match self {
            BatchGetResponse::Found(snapshot) => Some(snapshot),
            BatchGetResponse::Missing(_) => None,
        }
    }

    /// The path of this entry, relative to the documents root.
    pub fn path(&self) -> String {
        match self {
            BatchGetResponse::Found(snapshot) => snapshot.path().to_string(),
            BatchGetResponse::Missing(path) => path.clone(),
        }
    }
}
