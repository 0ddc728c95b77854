//! Decode-side vocabulary
//!
//! A decode operation takes a [`Cursor`] and either fails with a
//! [`DecodeError`](error::DecodeError), or succeeds with a [`Decoded`] value:
//! the typed result, together with the cursor just past the consumed prefix.
//!
//! The driver-level entry point that additionally requires the entire input
//! to be consumed is [`crate::conv::parse`].

use crate::cursor::Cursor;

pub mod error;

pub use error::{DecodeError, DecodeResult};

/// Successful outcome of a decode operation
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decoded<'a, T> {
    /// The decoded value
    pub value: T,
    /// Position immediately after the consumed input
    pub cursor: Cursor<'a>,
}

impl<'a, T> Decoded<'a, T> {
    #[inline]
    #[must_use]
    pub fn new(value: T, cursor: Cursor<'a>) -> Self {
        Self { value, cursor }
    }

    /// Applies `f` to the decoded value, keeping the cursor
    #[inline]
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Decoded<'a, U> {
        Decoded {
            value: f(self.value),
            cursor: self.cursor,
        }
    }

    /// Destructs `self` into its value
    #[inline]
    pub fn into_value(self) -> T {
        self.value
    }
}

/// Requires `literal` to appear verbatim at `cursor`, returning the cursor
/// just past it.
pub(crate) fn expect_literal<'a>(
    cursor: Cursor<'a>,
    literal: &str,
) -> Result<Cursor<'a>, DecodeError> {
    if cursor.starts_with(literal) {
        Ok(cursor.advance(literal.len()))
    } else {
        Err(DecodeError::LiteralMismatch {
            literal: literal.to_owned(),
            offset: cursor.offset(),
        })
    }
}
