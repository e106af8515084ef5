use crate::collection::DocumentSnapshot;
use chrono::{DateTime, Utc};

/// Sequential delivery of a fully materialized query result.
///
/// The result is computed (filtered, sorted and paginated) before the cursor
/// is created, so iteration order is exactly the query order. The cursor can
/// be rewound with [QueryCursor::reset].
#[derive(Clone, Debug)]
pub struct QueryCursor {
    documents: Vec<DocumentSnapshot>,
    current_index: usize,
    read_time: DateTime<Utc>,
}

impl QueryCursor {
    pub(crate) fn new(documents: Vec<DocumentSnapshot>, read_time: DateTime<Utc>) -> Self {
        QueryCursor {
            documents,
            current_index: 0,
            read_time,
        }
    }

    /// Total number of documents in the result, delivered or not.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// The instant at which the store was read.
    pub fn read_time(&self) -> DateTime<Utc> {
        self.read_time
    }

    /// Resets the cursor so that it can be iterated from the beginning.
    pub fn reset(&mut self) {
        self.current_index = 0;
    }

    pub fn first(&mut self) -> Option<DocumentSnapshot> {
        self.reset();
        self.next()
    }

    /// Ids of the documents in result order.
    pub fn ids(&self) -> Vec<String> {
        self.documents.iter().map(|d| d.id().to_string()).collect()
    }

    pub fn into_vec(self) -> Vec<DocumentSnapshot> {
        self.documents
    }
}

impl Iterator for QueryCursor {
    type Item = DocumentSnapshot;

    fn next(&mut self) -> Option<Self::Item> {
        let document = self.documents.get(self.current_index).cloned();
        if document.is_some() {
            self.current_index += 1;
        }
        document
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.documents.len().saturating_sub(self.current_index);
        (remaining, Some(remaining))
    }
}
