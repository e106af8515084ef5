use crate::collection::{Collection, Document, DocumentTree};
use crate::errors::{ErrorKind, FiremockError, FiremockResult};
use crate::path::{CollectionPath, DocumentPath};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

/// Path resolution against the document tree.
///
/// Reads use the strict walks, which never modify the tree. Writes use
/// [DocumentTree::resolve_or_create], which fills in every missing collection
/// and document along the path.
impl DocumentTree {
    /// Finds the document at `path`.
    ///
    /// # Errors
    ///
    /// `CollectionNotFound` or `DocumentNotFound` for the first missing
    /// segment along the path.
    pub(crate) fn resolve_strict(&self, path: &DocumentPath) -> FiremockResult<&Document> {
        let mut collections = self.collections();
        let mut current = None;

        for (collection_id, document_id) in path.pairs() {
            let collection = lookup_collection(collections, collection_id, path)?;
            let document = match collection.get(document_id) {
                Some(document) => document,
                None => {
                    log::debug!("Document {:?} not found while resolving {}", document_id, path);
                    return Err(FiremockError::new(
                        &format!("Document not found: {}", path),
                        ErrorKind::DocumentNotFound,
                    ));
                }
            };
            collections = document.collections();
            current = Some(document);
        }

        current.ok_or_else(|| {
            log::error!("Document path {} has no segments", path);
            FiremockError::new(
                &format!("Document path {} has no segments", path),
                ErrorKind::InternalError,
            )
        })
    }

    /// Finds the document at `path`, creating it and every missing ancestor
    /// collection and document. Repeated calls return the same node.
    pub(crate) fn resolve_or_create(
        &mut self,
        path: &DocumentPath,
        now: DateTime<Utc>,
    ) -> &mut Document {
        descend_or_create(self.collections_mut(), path, 0, now)
    }

    /// Finds the collection at `path`.
    ///
    /// # Errors
    ///
    /// `CollectionNotFound` or `DocumentNotFound` for the first missing
    /// segment along the path, including the final collection.
    pub(crate) fn resolve_collection(&self, path: &CollectionPath) -> FiremockResult<&Collection> {
        let collections = self.subcollections(path.parent().as_ref())?;
        lookup_collection(collections, path.id(), path)
    }

    /// The collections directly under `parent`, or the top-level collections
    /// when `parent` is `None`.
    pub(crate) fn subcollections(
        &self,
        parent: Option<&DocumentPath>,
    ) -> FiremockResult<&BTreeMap<String, Collection>> {
        match parent {
            Some(document_path) => Ok(self.resolve_strict(document_path)?.collections()),
            None => Ok(self.collections()),
        }
    }

    #[cfg(test)]
    pub(crate) fn contains(&self, path: &DocumentPath) -> bool {
        self.resolve_strict(path).is_ok()
    }
}

fn lookup_collection<'a>(
    collections: &'a BTreeMap<String, Collection>,
    collection_id: &str,
    path: &dyn std::fmt::Display,
) -> FiremockResult<&'a Collection> {
    match collections.get(collection_id) {
        Some(collection) => Ok(collection),
        None => {
            log::debug!("Collection {:?} not found while resolving {}", collection_id, path);
            Err(FiremockError::new(
                &format!("Collection not found: {} (resolving {})", collection_id, path),
                ErrorKind::CollectionNotFound,
            ))
        }
    }
}

fn descend_or_create<'a>(
    collections: &'a mut BTreeMap<String, Collection>,
    path: &DocumentPath,
    depth: usize,
    now: DateTime<Utc>,
) -> &'a mut Document {
    let segments = path.as_resource_path().segments();
    let collection_id = &segments[depth];
    let document_id = &segments[depth + 1];

    let document = collections
        .entry(collection_id.clone())
        .or_default()
        .documents_mut()
        .entry(document_id.clone())
        .or_insert_with(|| {
            let created = path.ancestor(depth + 2);
            log::debug!("Creating document {}", created);
            Document::new(created, now)
        });

    if depth + 2 >= segments.len() {
        document
    } else {
        descend_or_create(document.collections_mut(), path, depth + 2, now)
    }
}
