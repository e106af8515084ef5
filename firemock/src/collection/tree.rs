use crate::collection::Collection;
use std::collections::BTreeMap;

/// The whole document graph: top-level collections keyed by collection id.
///
/// Path resolution over the tree lives in [crate::path]; this type only owns
/// the nodes.
#[derive(Clone, Debug, Default)]
pub(crate) struct DocumentTree {
    collections: BTreeMap<String, Collection>,
}

impl DocumentTree {
    pub(crate) fn new() -> Self {
        DocumentTree::default()
    }

    pub(crate) fn collections(&self) -> &BTreeMap<String, Collection> {
        &self.collections
    }

    pub(crate) fn collections_mut(&mut self) -> &mut BTreeMap<String, Collection> {
        &mut self.collections
    }

    pub(crate) fn clear(&mut self) {
        self.collections.clear();
    }

    #[cfg(test)]
    pub(crate) fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}
