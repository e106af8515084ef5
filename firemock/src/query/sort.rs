use crate::collection::Document;
use crate::common::{FieldPath, SortOrder};
use std::cmp::Ordering;

/// A resolved order-by key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SortKey {
    Field(FieldPath, SortOrder),
    DocumentId(SortOrder),
}

/// Sorts `documents` by `keys`, then by document id ascending.
///
/// Field values compare under the total [crate::common::Value] order, and an
/// absent field sorts before any present value (after it when descending).
/// The document-id fallback makes the order total, so pagination over the
/// sorted result is deterministic.
pub(crate) fn sort_documents(documents: &mut [&Document], keys: &[SortKey]) {
    documents.sort_by(|a, b| compare(a, b, keys));
}

fn compare(a: &Document, b: &Document, keys: &[SortKey]) -> Ordering {
    for key in keys {
        let ordering = match key {
            SortKey::Field(path, order) => order.apply(a.field(path).cmp(&b.field(path))),
            SortKey::DocumentId(order) => order.apply(compare_ids(a, b)),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    compare_ids(a, b)
}

fn compare_ids(a: &Document, b: &Document) -> Ordering {
    a.id().as_bytes().cmp(b.id().as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{now, Fields, Value};
    use crate::fields;
    use crate::path::DocumentPath;

    fn document(id: &str, data: Fields) -> Document {
        let mut doc = Document::new(DocumentPath::parse(&format!("c/{}", id)).unwrap(), now());
        doc.replace_fields(data);
        doc
    }

    fn field_key(path: &str, order: SortOrder) -> SortKey {
        SortKey::Field(FieldPath::parse(path).unwrap(), order)
    }

    fn sorted_ids(documents: &[Document], keys: &[SortKey]) -> Vec<String> {
        let mut refs: Vec<&Document> = documents.iter().collect();
        sort_documents(&mut refs, keys);
        refs.iter().map(|d| d.id().to_string()).collect()
    }

    #[test]
    fn test_no_keys_sorts_by_id() {
        let docs = vec![
            document("b", fields! {}),
            document("a", fields! {}),
            document("c", fields! {}),
        ];
        assert_eq!(sorted_ids(&docs, &[]), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_field_ascending_and_descending() {
        let docs = vec![
            document("a", fields! { "x" => 1 }),
            document("b", fields! { "x" => 2 }),
        ];
        assert_eq!(sorted_ids(&docs, &[field_key("x", SortOrder::Ascending)]), vec!["a", "b"]);
        assert_eq!(sorted_ids(&docs, &[field_key("x", SortOrder::Descending)]), vec!["b", "a"]);
    }

    #[test]
    fn test_ties_fall_back_to_ascending_id() {
        let docs = vec![
            document("c", fields! { "x" => 1 }),
            document("a", fields! { "x" => 1 }),
            document("b", fields! { "x" => 0 }),
        ];
        assert_eq!(
            sorted_ids(&docs, &[field_key("x", SortOrder::Descending)]),
            vec!["a", "c", "b"]
        );
    }

    #[test]
    fn test_multiple_keys() {
        let docs = vec![
            document("a", fields! { "x" => 1, "y" => "b" }),
            document("b", fields! { "x" => 1, "y" => "a" }),
            document("c", fields! { "x" => 0, "y" => "z" }),
        ];
        let keys = [
            field_key("x", SortOrder::Ascending),
            field_key("y", SortOrder::Ascending),
        ];
        assert_eq!(sorted_ids(&docs, &keys), vec!["c", "b", "a"]);
    }

    #[test]
    fn test_absent_field_sorts_first() {
        let docs = vec![
            document("a", fields! { "x" => 1 }),
            document("b", fields! {}),
            document("c", fields! { "x" => Value::Null }),
        ];
        assert_eq!(
            sorted_ids(&docs, &[field_key("x", SortOrder::Ascending)]),
            vec!["b", "c", "a"]
        );
        assert_eq!(
            sorted_ids(&docs, &[field_key("x", SortOrder::Descending)]),
            vec!["a", "c", "b"]
        );
    }

    #[test]
    fn test_nested_field_and_mixed_types() {
        let docs = vec![
            document("a", fields! { "m" => fields! { "k" => "s" } }),
            document("b", fields! { "m" => fields! { "k" => 5 } }),
            document("c", fields! { "m" => fields! { "k" => true } }),
        ];
        assert_eq!(
            sorted_ids(&docs, &[field_key("m.k", SortOrder::Ascending)]),
            vec!["c", "b", "a"]
        );
    }

    #[test]
    fn test_document_id_key() {
        let docs = vec![document("a", fields! {}), document("b", fields! {})];
        assert_eq!(
            sorted_ids(&docs, &[SortKey::DocumentId(SortOrder::Descending)]),
            vec!["b", "a"]
        );
    }
}
