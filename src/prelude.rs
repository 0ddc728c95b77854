//! Assorted imports for assembling grammars
//!
//! `use janus::prelude::*;` brings every combinator constructor, the
//! primitive terminals, the drivers and the value types into scope.

pub use crate::conv::{parse, render, Codec};
pub use crate::either::either;
pub use crate::named::nameable;
pub use crate::prim::{
    big_integer, identifier, integer, maybe_whitespace, string_literal, whitespace,
};
pub use crate::schema::maybe;
pub use crate::seq::{non_empty_sequence, sequence};
pub use crate::template::template;
pub use crate::terminal::{token, Terminal};
pub use crate::value::{Record, Tagged, Value};
