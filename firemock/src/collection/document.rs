use crate::collection::{Collection, DocumentSnapshot};
use crate::common::{FieldPath, Fields, Value};
use crate::path::DocumentPath;
use chrono::{DateTime, Utc};
use im::OrdMap;
use std::collections::BTreeMap;

/// A stored document node.
///
/// Holds the top-level fields of the document and the subcollections rooted at
/// it. A document can exist without fields, as a shell on the path to its
/// subcollections.
#[derive(Clone, Debug)]
pub(crate) struct Document {
    path: DocumentPath,
    fields: OrdMap<String, Value>,
    collections: BTreeMap<String, Collection>,
    create_time: DateTime<Utc>,
    update_time: DateTime<Utc>,
}

impl Document {
    pub(crate) fn new(path: DocumentPath, now: DateTime<Utc>) -> Self {
        Document {
            path,
            fields: OrdMap::new(),
            collections: BTreeMap::new(),
            create_time: now,
            update_time: now,
        }
    }

    pub(crate) fn id(&self) -> &str {
        self.path.id()
    }

    #[cfg(test)]
    pub(crate) fn path(&self) -> &DocumentPath {
        &self.path
    }

    #[cfg(test)]
    pub(crate) fn fields(&self) -> &OrdMap<String, Value> {
        &self.fields
    }

    #[cfg(test)]
    pub(crate) fn create_time(&self) -> DateTime<Utc> {
        self.create_time
    }

    #[cfg(test)]
    pub(crate) fn update_time(&self) -> DateTime<Utc> {
        self.update_time
    }

    /// Resolves a (possibly nested) field, `None` when absent.
    pub(crate) fn field(&self, path: &FieldPath) -> Option<&Value> {
        path.descend(self.fields.get(path.first()))
    }

    pub(crate) fn collections(&self) -> &BTreeMap<String, Collection> {
        &self.collections
    }

    pub(crate) fn collections_mut(&mut self) -> &mut BTreeMap<String, Collection> {
        &mut self.collections
    }

    /// Drops every top-level field and writes `fields` in their place.
    pub(crate) fn replace_fields(&mut self, fields: Fields) {
        self.fields = fields.into_iter().collect();
    }

    /// Writes `value` at `path`, creating intermediate maps as needed.
    ///
    /// An intermediate value that is not a map is replaced by one.
    pub(crate) fn set_field(&mut self, path: &FieldPath, value: Value) {
        let segments = path.segments();
        if !path.is_nested() {
            self.fields = self.fields.update(segments[0].clone(), value);
            return;
        }

        let mut top = self
            .fields
            .get(&segments[0])
            .cloned()
            .unwrap_or_else(|| Value::Map(BTreeMap::new()));
        put_nested(&mut top, &segments[1..], value);
        self.fields = self.fields.update(segments[0].clone(), top);
    }

    /// Removes the field at `path`. Removing an absent field is a no-op.
    pub(crate) fn remove_field(&mut self, path: &FieldPath) {
        let segments = path.segments();
        if !path.is_nested() {
            self.fields = self.fields.without(&segments[0]);
            return;
        }

        if let Some(mut top) = self.fields.get(&segments[0]).cloned() {
            if remove_nested(&mut top, &segments[1..]) {
                self.fields = self.fields.update(segments[0].clone(), top);
            }
        }
    }

    pub(crate) fn touch(&mut self, now: DateTime<Utc>) {
        self.update_time = now;
    }

    pub(crate) fn snapshot(&self, read_time: DateTime<Utc>) -> DocumentSnapshot {
        DocumentSnapshot::new(
            self.path.clone(),
            self.fields.clone(),
            self.create_time,
            self.update_time,
            read_time,
        )
    }
}

fn put_nested(target: &mut Value, segments: &[String], value: Value) {
    if !target.is_map() {
        *target = Value::Map(BTreeMap::new());
    }
    let Some(map) = target.as_map_mut() else {
        return;
    };

    match segments {
        [] => {}
        [last] => {
            map.insert(last.clone(), value);
        }
        [head, rest @ ..] => {
            let child = map
                .entry(head.clone())
                .or_insert_with(|| Value::Map(BTreeMap::new()));
            put_nested(child, rest, value);
        }
    }
}

/// Returns `true` when something was removed.
fn remove_nested(target: &mut Value, segments: &[String]) -> bool {
    let Some(map) = target.as_map_mut() else {
        return false;
    };

    match segments {
        [] => false,
        [last] => map.remove(last).is_some(),
        [head, rest @ ..] => match map.get_mut(head) {
            Some(child) => remove_nested(child, rest),
            None => false,
        },
    }
}
