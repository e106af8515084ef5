use crate::collection::{Document, DocumentSnapshot, DocumentTree};
use crate::common::FieldPath;
use crate::errors::FiremockResult;
use crate::firemock_config::FiremockConfig;
use crate::query::sort::{sort_documents, SortKey};
use crate::query::{FieldReference, OrderBy, StructuredQuery};
use chrono::{DateTime, Utc};

/// Runs `query` against `tree`.
///
/// The pipeline is strictly: resolve the collection, filter every document,
/// sort the matches, skip `offset`, keep `limit`. Sorting needs the whole
/// match set, so the result is fully materialized.
///
/// A missing collection (or a missing document on the way to it) yields an
/// empty result. Malformed input is reported before anything is scanned.
pub(crate) fn execute(
    tree: &DocumentTree,
    query: &StructuredQuery,
    config: &FiremockConfig,
    read_time: DateTime<Utc>,
) -> FiremockResult<Vec<DocumentSnapshot>> {
    let collection_path = query.collection_path()?;
    if let Some(filter) = query.get_filter() {
        filter.validate()?;
    }
    let keys = sort_keys(query.get_order_by(), config)?;

    let collection = match tree.resolve_collection(&collection_path) {
        Ok(collection) => collection,
        Err(err) if err.is_not_found() => {
            log::warn!("Query against missing collection {}: {}", collection_path, err);
            return Ok(Vec::new());
        }
        Err(err) => return Err(err),
    };

    let mut matches: Vec<&Document> = Vec::with_capacity(collection.len());
    for document in collection.documents() {
        let matched = match query.get_filter() {
            Some(filter) => filter.apply(document)?,
            None => true,
        };
        if matched {
            matches.push(document);
        }
    }

    sort_documents(&mut matches, &keys);

    let limit = query.get_limit().unwrap_or(usize::MAX);
    let result: Vec<DocumentSnapshot> = matches
        .into_iter()
        .skip(query.get_offset())
        .take(limit)
        .map(|document| document.snapshot(read_time))
        .collect();

    log::debug!(
        "Query on {} returned {} of {} documents",
        collection_path,
        result.len(),
        collection.len()
    );
    Ok(result)
}

fn sort_keys(order_by: &[OrderBy], config: &FiremockConfig) -> FiremockResult<Vec<SortKey>> {
    order_by
        .iter()
        .map(|order| match order.field() {
            FieldReference::DocumentId => Ok(SortKey::DocumentId(order.direction())),
            FieldReference::Field(field) if config.is_document_id_key(field) => {
                Ok(SortKey::DocumentId(order.direction()))
            }
            FieldReference::Field(field) => {
                Ok(SortKey::Field(FieldPath::parse(field)?, order.direction()))
            }
        })
        .collect()
}
