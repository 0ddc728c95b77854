//! Field labels for codecs
//!
//! [`Named<C>`] attaches a name to a codec without altering its behavior.
//! The name only matters to an enclosing template, which stores the child's
//! value under it, or to an alternation, which uses it as the tag of the
//! matching branch.

use crate::conv::{Codec, EncodeResult};
use crate::cursor::Cursor;
use crate::parse::DecodeResult;

/// Codec `C` together with a field label
///
/// Decoding and encoding are delegated to the inner codec unchanged.
#[derive(Clone, Debug)]
pub struct Named<C> {
    name: String,
    inner: C,
}

impl<C> Named<C> {
    /// Labels `codec` with `name`
    #[must_use]
    pub fn new(codec: C, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inner: codec,
        }
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replaces the label of an already-named codec
    ///
    /// This shadows [`Codec::named`], so that naming a `Named<C>` yields
    /// another `Named<C>` rather than a doubly-wrapped codec.
    #[must_use]
    pub fn named(self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            inner: self.inner,
        }
    }

    /// Destructs `self` into its label and inner codec
    #[must_use]
    pub fn into_parts(self) -> (String, C) {
        (self.name, self.inner)
    }
}

impl<C: Codec> Codec for Named<C> {
    type Value = C::Value;

    fn decode<'a>(&self, cursor: Cursor<'a>) -> DecodeResult<'a, Self::Value> {
        self.inner.decode(cursor)
    }

    fn write_to(&self, value: &Self::Value, buf: &mut String) -> EncodeResult<usize> {
        self.inner.write_to(value, buf)
    }

    fn describe(&self) -> String {
        format!("{}({})", self.inner.describe(), self.name)
    }

    fn canonical(&self) -> Option<String> {
        self.inner.canonical()
    }

    fn normalize(&self, value: Self::Value) -> EncodeResult<Self::Value> {
        self.inner.normalize(value)
    }
}

/// Labels `codec` with `name`
///
/// Equivalent to `codec.named(name)`.
pub fn nameable<C: Codec>(codec: C, name: impl Into<String>) -> Named<C> {
    Named::new(codec, name)
}
