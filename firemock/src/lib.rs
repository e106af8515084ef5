//! # Firemock - In-Memory Firestore Emulator
//!
//! Firemock keeps a hierarchical tree of collections and documents in memory
//! and answers the data-plane operations of Firestore against it: reading
//! documents, batch reads, atomic write batches and structured queries with
//! filters, ordering, offset and limit. It is meant to stand in for a real
//! database in tests; wire encoding is left to whatever transport wraps it.
//!
//! ## Quick Start
//!
//! ```rust
//! use firemock::{fields, Firemock};
//! use firemock::common::SortOrder;
//! use firemock::filter::field;
//! use firemock::query::StructuredQuery;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Firemock::builder().project_id("demo").open()?;
//!
//! store.set("users/alice", fields! { "age" => 30, "city" => "Utrecht" })?;
//! store.set("users/bob", fields! { "age" => 17, "city" => "Utrecht" })?;
//! store.set("users/carol", fields! { "age" => 42, "city" => "Delft" })?;
//!
//! let adults = StructuredQuery::from("", "users")
//!     .filter(field("age").gte(18))
//!     .order_by("age", SortOrder::Descending);
//! assert_eq!(store.run_query(&adults)?.ids(), vec!["carol", "alice"]);
//!
//! store.update("users/bob", fields! { "age" => 18 }, &["age"])?;
//! let bob = store.get_document("projects/demo/databases/(default)/documents/users/bob")?;
//! assert_eq!(bob.get("city")?.and_then(|v| v.as_string()), Some("Utrecht"));
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`collection`] - Document snapshots and query cursors
//! - [`common`] - Value model, field paths and sort order
//! - [`errors`] - Error types and result definitions
//! - [`filter`] - Query filters and the fluent filter API
//! - [`loader`] - Bulk loading of documents from JSON
//! - [`path`] - Resource, document and collection paths
//! - [`query`] - Structured queries
//! - [`write`] - Write requests and results

pub mod collection;
pub mod common;
pub mod errors;
pub mod filter;
pub mod firemock;
pub mod firemock_builder;
pub mod firemock_config;
pub mod loader;
pub mod path;
pub mod query;
pub mod write;

pub use crate::firemock::Firemock;
pub use firemock_builder::FiremockBuilder;
pub use firemock_config::FiremockConfig;
