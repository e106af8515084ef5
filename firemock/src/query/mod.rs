//! Structured queries over a single collection.
//!
//! A query filters every document of its collection, orders the matches by
//! its order-by keys with the document id as final ascending tie-break, then
//! applies offset and limit. With no order-by keys the result is in document
//! id order.

mod executor;
mod sort;
mod structured_query;

pub(crate) use executor::execute;
pub use structured_query::*;
