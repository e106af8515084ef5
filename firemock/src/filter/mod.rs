//! Query filters.
//!
//! A filter is a tree of composite nodes (AND, OR) over field predicates.
//! Predicates read a dotted field path from the document, descending through
//! nested maps; a field that cannot be reached is absent, and an absent field
//! never matches.
//!
//! Filters can be built from decoded request data with [Filter::field] and
//! [Filter::composite], or fluently:
//!
//! ```rust
//! use firemock::filter::{and, field, or};
//!
//! let filter = and(vec![
//!     field("age").gte(18),
//!     or(vec![field("country").eq("NL"), field("tags").array_contains("eu")]),
//! ]);
//! assert_eq!(
//!     filter.to_string(),
//!     "((age >= 18) && ((country == \"NL\") || (tags contains \"eu\")))"
//! );
//! ```
//!
//! # Matching rules
//!
//! - values of different types never compare, not even for `NOT_EQUAL`;
//!   numeric operands are coerced to the field's integer or double form
//! - `IN`, `NOT_IN` and `ARRAY_CONTAINS_ANY` need an array operand and
//!   match nothing otherwise
//! - `ARRAY_CONTAINS` and `ARRAY_CONTAINS_ANY` need an array field

#[allow(clippy::module_inception)]
mod filter;
mod fluent;

mod array_filters;
mod basic_filters;
mod logical_filters;
mod range_filters;

pub(crate) use array_filters::*;
pub(crate) use basic_filters::*;
pub use filter::*;
pub use fluent::*;
pub(crate) use logical_filters::*;
pub(crate) use range_filters::*;
