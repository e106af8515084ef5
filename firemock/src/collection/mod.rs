//! Stored documents and what reads hand back to callers.
//!
//! The store owns a [DocumentTree] of [Collection]s and [Document]s. None of
//! these nodes leave the store: reads return [DocumentSnapshot]s (owned copies
//! taken under the read lock), batch gets return [BatchGetResponse]s and
//! queries a [QueryCursor] over snapshots.
//!
//! ```rust
//! use firemock::{fields, Firemock};
//!
//! let store = Firemock::builder().open().unwrap();
//! store.set("users/alice/posts/p1", fields! { "title" => "hello" }).unwrap();
//!
//! // the ancestor document exists as an empty shell
//! let alice = store.get_document("users/alice").unwrap();
//! assert!(alice.is_empty());
//! ```

#[allow(clippy::module_inception)]
mod collection;
mod cursor;
mod document;
mod snapshot;
mod tree;

pub(crate) use collection::*;
pub use cursor::*;
pub(crate) use document::*;
pub use snapshot::*;
pub(crate) use tree::*;
