//! Bulk loading of documents from JSON.
//!
//! The source is an object of top-level collections:
//!
//! ```json
//! {
//!   "users": {
//!     "alice": {
//!       "age": 30,
//!       "joined": "2023-01-01T00:00:00Z",
//!       "avatar": "data:image/png;base64,iVBORw0KGgo=",
//!       "__collections__": {
//!         "posts": { "p1": { "title": "hello" } }
//!       }
//!     }
//!   }
//! }
//! ```
//!
//! Strings holding an RFC 3339 timestamp become timestamps and base64 data
//! URIs become bytes, at any depth. Integers stay integers, every other number
//! becomes a double.

use crate::collection::DocumentTree;
use crate::common::{parse_timestamp, Fields, Value};
use crate::errors::{ErrorKind, FiremockError, FiremockResult};
use crate::path::{CollectionPath, DocumentPath};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde_json::Map;
use std::collections::BTreeMap;
use std::mem;
use std::sync::OnceLock;

/// Key of the subcollection map inside a document object.
pub const COLLECTIONS_KEY: &str = "__collections__";

const DATA_URI_PATTERN: &str = r"(?s)^data:([^,;]*)(?:;[^,;]+=[^,;]*)*;base64,(.*)$";

fn data_uri() -> Option<&'static Regex> {
    static DATA_URI: OnceLock<Option<Regex>> = OnceLock::new();
    DATA_URI
        .get_or_init(|| Regex::new(DATA_URI_PATTERN).ok())
        .as_ref()
}

/// Loads `source` into `tree`, returning the number of documents read.
///
/// Top-level collections named in `source` replace the collections of the
/// same name; other collections are left alone. The source is fully parsed
/// before the tree is touched, so a malformed source changes nothing.
pub(crate) fn load(
    tree: &mut DocumentTree,
    source: &serde_json::Value,
    now: DateTime<Utc>,
) -> FiremockResult<usize> {
    let collections = as_object(source, "load source")?;

    let mut staged = DocumentTree::new();
    let mut count = 0;
    for (collection_id, data) in collections {
        check_segment(collection_id, "collection")?;
        let path = CollectionPath::under("", collection_id)?;
        staged.collections_mut().entry(collection_id.clone()).or_default();
        load_collection(&mut staged, &path, data, now, &mut count)?;
    }

    for (collection_id, collection) in mem::take(staged.collections_mut()) {
        tree.collections_mut().insert(collection_id, collection);
    }
    Ok(count)
}

fn load_collection(
    staged: &mut DocumentTree,
    path: &CollectionPath,
    data: &serde_json::Value,
    now: DateTime<Utc>,
    count: &mut usize,
) -> FiremockResult<()> {
    let documents = as_object(data, &format!("collection {}", path))?;
    for (document_id, document_data) in documents {
        check_segment(document_id, "document")?;
        load_document(staged, &path.document(document_id), document_data, now, count)?;
    }
    Ok(())
}

fn load_document(
    staged: &mut DocumentTree,
    path: &DocumentPath,
    data: &serde_json::Value,
    now: DateTime<Utc>,
    count: &mut usize,
) -> FiremockResult<()> {
    let object = as_object(data, &format!("document {}", path))?;

    let mut fields = Fields::new();
    let mut subcollections = None;
    for (key, value) in object {
        if key == COLLECTIONS_KEY {
            subcollections = Some(as_object(value, &format!("subcollections of {}", path))?);
        } else {
            fields.insert(key.clone(), convert(value));
        }
    }

    staged.resolve_or_create(path, now).replace_fields(fields);
    *count += 1;

    for (collection_id, collection_data) in subcollections.into_iter().flatten() {
        check_segment(collection_id, "collection")?;
        staged
            .resolve_or_create(path, now)
            .collections_mut()
            .entry(collection_id.clone())
            .or_default();
        load_collection(staged, &path.collection(collection_id), collection_data, now, count)?;
    }
    Ok(())
}

/// Converts one JSON value, coercing timestamp and data URI strings.
pub(crate) fn convert(value: &serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::Null,
        serde_json::Value::Bool(b) => Value::Boolean(*b),
        serde_json::Value::Number(n) => match n.as_i64() {
            Some(i) => Value::Integer(i),
            None => Value::Double(n.as_f64().unwrap_or(f64::NAN)),
        },
        serde_json::Value::String(s) => convert_string(s),
        serde_json::Value::Array(items) => Value::Array(items.iter().map(convert).collect()),
        serde_json::Value::Object(map) => Value::Map(
            map.iter()
                .map(|(k, v)| (k.clone(), convert(v)))
                .collect::<BTreeMap<_, _>>(),
        ),
    }
}

fn convert_string(text: &str) -> Value {
    if let Some(instant) = parse_timestamp(text) {
        return Value::Timestamp(instant);
    }

    if let Some(captures) = data_uri().and_then(|re| re.captures(text)) {
        let payload = captures.get(2).map(|m| m.as_str()).unwrap_or_default();
        match BASE64.decode(payload) {
            Ok(bytes) => return Value::Bytes(bytes),
            Err(err) => {
                log::warn!("Keeping data URI as a string, payload is not base64: {}", err);
            }
        }
    }
    Value::String(text.to_string())
}

fn as_object<'a>(
    value: &'a serde_json::Value,
    what: &str,
) -> FiremockResult<&'a Map<String, serde_json::Value>> {
    match value {
        serde_json::Value::Object(map) => Ok(map),
        other => {
            log::error!("Data of {} is not an object: {}", what, other);
            Err(FiremockError::new(
                &format!("Data of {} is not an object", what),
                ErrorKind::LoadError,
            ))
        }
    }
}

fn check_segment(id: &str, what: &str) -> FiremockResult<()> {
    if id.is_empty() || id.contains('/') {
        log::error!("Invalid {} id {:?} in load source", what, id);
        return Err(FiremockError::new(
            &format!("Invalid {} id {:?}", what, id),
            ErrorKind::LoadError,
        ));
    }
    Ok(())
}
