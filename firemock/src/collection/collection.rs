use crate::collection::Document;
use std::collections::BTreeMap;

/// A named set of documents, keyed by document id.
///
/// Collections are never stored on their own: they only exist as entries of
/// the root or of a parent document's subcollection map.
#[derive(Clone, Debug, Default)]
pub(crate) struct Collection {
    documents: BTreeMap<String, Document>,
}

impl Collection {
    pub(crate) fn get(&self, document_id: &str) -> Option<&Document> {
        self.documents.get(document_id)
    }

    pub(crate) fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }

    pub(crate) fn documents_mut(&mut self) -> &mut BTreeMap<String, Document> {
        &mut self.documents
    }

    pub(crate) fn len(&self) -> usize {
        self.documents.len()
    }
}
