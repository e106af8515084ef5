//! Resource paths and their resolution against the document tree.
//!
//! A path alternates collection ids and document ids:
//!
//! ```text
//! users/alice/posts/p1
//! ^^^^^ ^^^^^ ^^^^^ ^^
//! coll  doc   coll  doc
//! ```
//!
//! Full resource names (`projects/{p}/databases/{d}/documents/...`) are
//! accepted anywhere a path is, with the prefix dropped.

mod resolver;
mod resource_path;

pub use resource_path::*;
