use crate::collection::DocumentTree;
use crate::common::FieldPath;
use crate::errors::{ErrorKind, FiremockError, FiremockResult};
use crate::path::DocumentPath;
use crate::write::{Write, WriteResult};
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// A write whose path and mask have been parsed.
struct PreparedWrite<'a> {
    write: &'a Write,
    path: DocumentPath,
    mask: Option<Vec<FieldPath>>,
}

/// Applies `writes` in order, all or nothing.
///
/// Every write is checked first against the state the batch would produce:
/// its path, its mask and its existence precondition, where a document created
/// by an earlier write of the batch counts as existing. The first failing
/// write aborts the commit before anything is applied. Applying a checked
/// batch cannot fail.
pub(crate) fn commit(
    tree: &mut DocumentTree,
    writes: &[Write],
    now: DateTime<Utc>,
) -> FiremockResult<Vec<WriteResult>> {
    let prepared = prepare(tree, writes)?;

    let mut results = Vec::with_capacity(prepared.len());
    for write in prepared {
        apply(tree, &write, now);
        results.push(WriteResult::new(now));
    }
    Ok(results)
}

fn prepare<'a>(tree: &DocumentTree, writes: &'a [Write]) -> FiremockResult<Vec<PreparedWrite<'a>>> {
    let mut created: HashSet<DocumentPath> = HashSet::new();
    let mut prepared = Vec::with_capacity(writes.len());

    for (index, write) in writes.iter().enumerate() {
        let path = DocumentPath::parse(write.path())?;
        let mask = match write.update_mask() {
            Some(mask) if !mask.is_empty() => Some(
                mask.iter()
                    .map(|field| FieldPath::parse(field))
                    .collect::<FiremockResult<Vec<_>>>()?,
            ),
            _ => None,
        };

        if write.requires_exists() && !created.contains(&path) {
            if let Err(err) = tree.resolve_strict(&path) {
                log::error!("Write {} to {} requires an existing document: {}", index, path, err);
                return Err(FiremockError::new_with_cause(
                    &format!("Document {} must exist", path),
                    ErrorKind::PreconditionFailed,
                    err,
                ));
            }
        }

        created.extend(path.lineage());
        prepared.push(PreparedWrite { write, path, mask });
    }
    Ok(prepared)
}

fn apply(tree: &mut DocumentTree, prepared: &PreparedWrite<'_>, now: DateTime<Utc>) {
    let document = tree.resolve_or_create(&prepared.path, now);
    let fields = prepared.write.fields();

    match &prepared.mask {
        None => document.replace_fields(fields.clone()),
        Some(mask) => {
            for field in mask {
                match field.get_in(fields) {
                    Some(value) => document.set_field(field, value.clone()),
                    None => document.remove_field(field),
                }
            }
        }
    }
    document.touch(now);
    log::debug!("Applied write to {}", prepared.path);
}
