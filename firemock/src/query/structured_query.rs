use crate::common::SortOrder;
use crate::errors::FiremockResult;
use crate::filter::Filter;
use crate::path::CollectionPath;

/// One order-by key of a query: a dotted field path (or one of the configured
/// document-id keys) and a direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderBy {
    field: FieldReference,
    direction: SortOrder,
}

/// What an order-by key sorts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldReference {
    /// A field path as written in the request. Paths equal to a configured
    /// document-id key sort by document id instead.
    Field(String),
    /// The document id.
    DocumentId,
}

impl OrderBy {
    pub fn new(field: FieldReference, direction: SortOrder) -> Self {
        OrderBy { field, direction }
    }

    pub fn field(&self) -> &FieldReference {
        &self.field
    }

    pub fn direction(&self) -> SortOrder {
        self.direction
    }
}

/// A query over the documents of one collection.
///
/// The collection is named by its parent (the root, written as `""` or as the
/// bare `projects/{p}/databases/{d}/documents` name, or a document path) and
/// its collection id.
///
/// # Examples
///
/// ```rust
/// use firemock::common::SortOrder;
/// use firemock::filter::field;
/// use firemock::query::StructuredQuery;
///
/// let query = StructuredQuery::from("users/alice", "posts")
///     .filter(field("published").eq(true))
///     .order_by("created", SortOrder::Descending)
///     .limit(10)
///     .offset(20);
/// assert_eq!(query.collection_path().unwrap().to_string(), "users/alice/posts");
/// ```
#[derive(Debug, Clone)]
pub struct StructuredQuery {
    parent: String,
    collection_id: String,
    filter: Option<Filter>,
    order_by: Vec<OrderBy>,
    limit: Option<usize>,
    offset: usize,
}

impl StructuredQuery {
    /// A query over collection `collection_id` under `parent`.
    pub fn from(parent: &str, collection_id: &str) -> Self {
        StructuredQuery {
            parent: parent.to_string(),
            collection_id: collection_id.to_string(),
            filter: None,
            order_by: Vec::new(),
            limit: None,
            offset: 0,
        }
    }

    /// A query over the collection at `collection_path`
    /// (e.g. `users/alice/posts`).
    pub fn collection(collection_path: &str) -> Self {
        let trimmed = collection_path.trim_matches('/');
        match trimmed.rsplit_once('/') {
            Some((parent, collection_id)) => StructuredQuery::from(parent, collection_id),
            None => StructuredQuery::from("", trimmed),
        }
    }

    /// Restricts the result to documents matching `filter`.
    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Appends an order-by key on a dotted field path.
    pub fn order_by(mut self, field: &str, direction: SortOrder) -> Self {
        self.order_by.push(OrderBy::new(
            FieldReference::Field(field.to_string()),
            direction,
        ));
        self
    }

    /// Appends an order-by key on the document id.
    pub fn order_by_document_id(mut self, direction: SortOrder) -> Self {
        self.order_by
            .push(OrderBy::new(FieldReference::DocumentId, direction));
        self
    }

    /// Keeps at most `limit` documents; `0` means no limit.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = if limit == 0 { None } else { Some(limit) };
        self
    }

    /// Skips the first `offset` documents of the sorted result.
    pub fn offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn parent(&self) -> &str {
        &self.parent
    }

    pub fn collection_id(&self) -> &str {
        &self.collection_id
    }

    /// The path of the queried collection.
    ///
    /// # Errors
    ///
    /// `InvalidPath` when the parent is not the root or a document, or the
    /// collection id is empty or contains a `/`.
    pub fn collection_path(&self) -> FiremockResult<CollectionPath> {
        CollectionPath::under(&self.parent, &self.collection_id)
    }

    pub fn get_filter(&self) -> Option<&Filter> {
        self.filter.as_ref()
    }

    pub fn get_order_by(&self) -> &[OrderBy] {
        &self.order_by
    }

    pub fn get_limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn get_offset(&self) -> usize {
        self.offset
    }
}
