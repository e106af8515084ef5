use crate::errors::{ErrorKind, FiremockError, FiremockResult};
use std::fmt::{Display, Formatter};

pub(crate) const PATH_SEPARATOR: char = '/';

/// Slash-delimited path of alternating collection and document ids.
///
/// Accepts either a relative path (`users/alice/posts/p1`) or a full resource
/// name (`projects/{project}/databases/{database}/documents/users/alice`), whose
/// `projects/../documents` prefix is dropped. Surrounding slashes are ignored;
/// an empty inner segment is rejected.
///
/// The root has no segments, a document path has an even, non-zero number of
/// segments and a collection path an odd number.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ResourcePath {
    segments: Vec<String>,
}

impl ResourcePath {
    pub fn root() -> ResourcePath {
        ResourcePath { segments: Vec::new() }
    }

    pub fn parse(path: &str) -> FiremockResult<ResourcePath> {
        let trimmed = path.trim_matches(PATH_SEPARATOR);
        if trimmed.is_empty() {
            return Ok(ResourcePath::root());
        }

        let segments: Vec<&str> = trimmed.split(PATH_SEPARATOR).collect();
        if segments.iter().any(|s| s.is_empty()) {
            log::error!("Invalid path {:?}: empty segment", path);
            return Err(FiremockError::new(
                &format!("Invalid path {:?}: empty segment", path),
                ErrorKind::InvalidPath,
            ));
        }

        let relative = strip_resource_prefix(&segments);
        Ok(ResourcePath {
            segments: relative.iter().map(|s| s.to_string()).collect(),
        })
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn is_document(&self) -> bool {
        !self.segments.is_empty() && self.segments.len() % 2 == 0
    }

    pub fn is_collection(&self) -> bool {
        self.segments.len() % 2 == 1
    }

    /// Last segment, `None` for the root.
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    pub fn child(&self, segment: &str) -> ResourcePath {
        let mut segments = self.segments.clone();
        segments.push(segment.to_string());
        ResourcePath { segments }
    }

    pub fn parent(&self) -> Option<ResourcePath> {
        if self.segments.is_empty() {
            return None;
        }
        Some(ResourcePath {
            segments: self.segments[..self.segments.len() - 1].to_vec(),
        })
    }
}

/// Drops a leading `projects/{p}/databases/{d}/documents` prefix.
fn strip_resource_prefix<'a, 'b>(segments: &'b [&'a str]) -> &'b [&'a str] {
    if segments.len() >= 5
        && segments[0] == "projects"
        && segments[2] == "databases"
        && segments[4] == "documents"
    {
        &segments[5..]
    } else {
        segments
    }
}

impl Display for ResourcePath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.segments.join("/"))
    }
}

/// A validated path to a document: `collection/document(/collection/document)*`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentPath {
    inner: ResourcePath,
}

impl DocumentPath {
    pub fn parse(path: &str) -> FiremockResult<DocumentPath> {
        DocumentPath::try_from(ResourcePath::parse(path)?)
    }

    /// The document id, i.e. the last segment.
    pub fn id(&self) -> &str {
        self.inner.last().unwrap_or_default()
    }

    /// The collection holding this document.
    pub fn parent(&self) -> CollectionPath {
        CollectionPath {
            inner: self.inner.parent().unwrap_or_default(),
        }
    }

    pub fn collection(&self, collection_id: &str) -> CollectionPath {
        CollectionPath {
            inner: self.inner.child(collection_id),
        }
    }

    /// `(collection id, document id)` pairs from the root down.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.inner
            .segments()
            .chunks_exact(2)
            .map(|pair| (pair[0].as_str(), pair[1].as_str()))
    }

    /// The ancestor document made of the first `len` segments.
    ///
    /// `len` must be even and at most the length of this path.
    pub(crate) fn ancestor(&self, len: usize) -> DocumentPath {
        DocumentPath {
            inner: ResourcePath {
                segments: self.inner.segments[..len].to_vec(),
            },
        }
    }

    /// This document and every ancestor document, from the top down.
    pub(crate) fn lineage(&self) -> impl Iterator<Item = DocumentPath> + '_ {
        (2..=self.inner.len()).step_by(2).map(|len| self.ancestor(len))
    }

    pub fn as_resource_path(&self) -> &ResourcePath {
        &self.inner
    }
}

impl TryFrom<ResourcePath> for DocumentPath {
    type Error = FiremockError;

    fn try_from(path: ResourcePath) -> FiremockResult<DocumentPath> {
        if !path.is_document() {
            log::error!("Invalid document path {:?}: expected an even number of segments", path.to_string());
            return Err(FiremockError::new(
                &format!("Invalid document path: {}", path),
                ErrorKind::InvalidPath,
            ));
        }
        Ok(DocumentPath { inner: path })
    }
}

impl Display for DocumentPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

/// A validated path to a collection: `(collection/document/)*collection`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CollectionPath {
    inner: ResourcePath,
}

impl CollectionPath {
    pub fn parse(path: &str) -> FiremockResult<CollectionPath> {
        CollectionPath::try_from(ResourcePath::parse(path)?)
    }

    /// Collection `collection_id` under `parent`, where `parent` is either the
    /// root (empty, or the bare `projects/../documents` name) or a document.
    pub fn under(parent: &str, collection_id: &str) -> FiremockResult<CollectionPath> {
        let parent = ResourcePath::parse(parent)?;
        if !parent.is_root() && !parent.is_document() {
            log::error!("Invalid query parent {:?}: not a document", parent.to_string());
            return Err(FiremockError::new(
                &format!("Invalid query parent: {}", parent),
                ErrorKind::InvalidPath,
            ));
        }
        if collection_id.is_empty() || collection_id.contains(PATH_SEPARATOR) {
            log::error!("Invalid collection id {:?}", collection_id);
            return Err(FiremockError::new(
                &format!("Invalid collection id: {:?}", collection_id),
                ErrorKind::InvalidPath,
            ));
        }
        CollectionPath::try_from(parent.child(collection_id))
    }

    /// The collection id, i.e. the last segment.
    pub fn id(&self) -> &str {
        self.inner.last().unwrap_or_default()
    }

    /// The document holding this collection, `None` for a top-level collection.
    pub fn parent(&self) -> Option<DocumentPath> {
        self.inner
            .parent()
            .filter(|p| !p.is_root())
            .map(|inner| DocumentPath { inner })
    }

    pub fn document(&self, document_id: &str) -> DocumentPath {
        DocumentPath {
            inner: self.inner.child(document_id),
        }
    }

    pub fn as_resource_path(&self) -> &ResourcePath {
        &self.inner
    }
}

impl TryFrom<ResourcePath> for CollectionPath {
    type Error = FiremockError;

    fn try_from(path: ResourcePath) -> FiremockResult<CollectionPath> {
        if !path.is_collection() {
            log::error!("Invalid collection path {:?}: expected an odd number of segments", path.to_string());
            return Err(FiremockError::new(
                &format!("Invalid collection path: {}", path),
                ErrorKind::InvalidPath,
            ));
        }
        Ok(CollectionPath { inner: path })
    }
}

impl Display for CollectionPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}
