//! Shared building blocks: the value model, field paths, sort directions and
//! time helpers.

mod field_path;
mod sort_order;
mod time_utils;
mod value;

pub use field_path::*;
pub use sort_order::*;
pub use time_utils::*;
pub use value::*;
