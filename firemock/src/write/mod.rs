//! Writes and their application to the document tree.

mod applier;
#[allow(clippy::module_inception)]
mod write;

pub(crate) use applier::commit;
pub use write::*;
