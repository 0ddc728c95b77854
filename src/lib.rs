//! Bidirectional grammar combinators
//!
//! # Overview
//!
//! This library provides composable *codecs*: values that can both decode a
//! prefix of a text into a structured value, and render such a value back
//! into text, such that the two directions remain inverses of one another.
//! Grammars for small textual languages (assignments, declarations, lists of
//! statements) are assembled by nesting a handful of combinators around a
//! handful of primitive terminals, and the same grammar object then serves as
//! both parser and printer.
//!
//! The trait [`Codec`] is the keystone of the library. Its implementors are:
//!
//!   - [`Terminal<T>`], a leaf pairing a recognition [`Pattern`] with
//!     conversion functions between matched text and `T`. Common terminals
//!     (integers, string literals, identifiers, whitespace) live in [`prim`];
//!   - [`Named<C>`], a codec with a field label attached, via [`Codec::named`];
//!   - [`Template`], which interleaves literal text with child codecs and
//!     collects the values of named children into a [`Record`];
//!   - [`Either`], an ordered choice between named codecs, producing a
//!     [`Tagged`] value;
//!   - [`Maybe<C>`], zero or one occurrence of `C`;
//!   - [`Repeat<C>`], zero-or-more ([`sequence`]) or one-or-more
//!     ([`non_empty_sequence`]) consecutive occurrences of `C`.
//!
//! The drivers [`parse`] and [`render`] decode a complete text, and encode a
//! value with a check that the rendered text decodes back to it.
//!
//! # Example
//!
//! ```
//! use janus::prelude::*;
//!
//! let declaration = template()
//!     .literal("let")
//!     .skip(whitespace())
//!     .field(identifier().named("name"))
//!     .skip(maybe_whitespace())
//!     .literal("=")
//!     .skip(maybe_whitespace())
//!     .field(string_literal().named("value"))
//!     .skip(maybe_whitespace())
//!     .literal(";")
//!     .build()
//!     .unwrap();
//!
//! let record = parse(&declaration, r#"let x = "hi";"#).unwrap();
//! assert_eq!(record, Record::new().with("name", "x").with("value", "hi"));
//! assert_eq!(render(&declaration, &record).unwrap(), r#"let x="hi";"#);
//! ```
//!
//! # Errors
//!
//! Failures are reported in three phases, each with its own type:
//! [`GrammarError`] while a grammar is being assembled, [`DecodeError`] while
//! decoding, and [`EncodeError`] while encoding. The crate-level [`Error`]
//! unifies the three.
//!
//! # Features
//!
//!   - `check_round_trip` (default): [`render`] decodes its own output and
//!     compares it with the original value.
//!   - `serde_impls`: `Serialize` and `Deserialize` for [`Value`], [`Record`]
//!     and [`Tagged`].

pub mod conv;
pub mod cursor;
pub mod either;
pub mod error;
pub mod grammars;
pub mod named;
pub mod parse;
pub mod pattern;
pub mod prelude;
pub mod prim;
pub mod schema;
pub mod seq;
pub mod template;
pub mod terminal;
pub mod value;

pub use crate::conv::{parse, render, Codec, DynCodec, EncodeError, EncodeResult};
pub use crate::cursor::Cursor;
pub use crate::either::{either, Either, EitherBuilder};
pub use crate::error::{Error, GrammarError, Result};
pub use crate::named::{nameable, Named};
pub use crate::parse::{DecodeError, DecodeResult, Decoded};
pub use crate::pattern::Pattern;
pub use crate::schema::{maybe, Maybe};
pub use crate::seq::{non_empty_sequence, sequence, Repeat};
pub use crate::template::{template, Element, Template, TemplateBuilder};
pub use crate::terminal::{token, Terminal};
pub use crate::value::{FromValue, Record, Tagged, Value};
