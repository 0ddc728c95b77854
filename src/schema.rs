//! Optional occurrence
//!
//! [`Maybe<C>`] decodes zero or one occurrence of `C`. It never fails on
//! input: when the inner codec does not match, the result is `None` and the
//! cursor is returned exactly as it was received. An absent value renders as
//! the empty string, and a present one as the inner codec renders it.
//!
//! The one error `Maybe` does not absorb is a fatal one (see
//! [`DecodeError::is_fatal`](crate::parse::DecodeError::is_fatal)), which
//! points at a defect in the grammar rather than at the input.

use crate::conv::{Codec, EncodeResult};
use crate::cursor::Cursor;
use crate::parse::{DecodeResult, Decoded};

/// Zero-or-one occurrence of a codec
#[derive(Clone, Debug)]
pub struct Maybe<C> {
    inner: C,
}

impl<C> Maybe<C> {
    #[must_use]
    pub const fn new(inner: C) -> Self {
        Self { inner }
    }
}

/// Zero-or-one occurrence of `codec`
pub fn maybe<C: Codec>(codec: C) -> Maybe<C> {
    Maybe::new(codec)
}

impl<C: Codec> Codec for Maybe<C> {
    type Value = Option<C::Value>;

    fn decode<'a>(&self, cursor: Cursor<'a>) -> DecodeResult<'a, Self::Value> {
        match self.inner.decode(cursor) {
            Ok(decoded) => Ok(decoded.map(Some)),
            Err(err) if err.is_fatal() => Err(err),
            Err(err) => {
                tracing::trace!(offset = cursor.offset(), %err, "optional element absent");
                Ok(Decoded::new(None, cursor))
            }
        }
    }

    fn write_to(&self, value: &Self::Value, buf: &mut String) -> EncodeResult<usize> {
        match value {
            Some(inner) => self.inner.write_to(inner, buf),
            None => Ok(0),
        }
    }

    fn describe(&self) -> String {
        format!("maybe({})", self.inner.describe())
    }

    fn normalize(&self, value: Self::Value) -> EncodeResult<Self::Value> {
        value.map(|inner| self.inner.normalize(inner)).transpose()
    }

    /// An unnamed optional element renders as absent
    fn canonical(&self) -> Option<String> {
        Some(String::new())
    }
}
