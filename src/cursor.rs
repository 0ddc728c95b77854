//! Immutable position marker into an input text
//!
//! This module defines [`Cursor`], the only piece of state threaded through
//! a decode operation. A `Cursor` pairs a borrowed source text with a byte
//! offset into it, and is `Copy`: advancing a cursor yields a new value and
//! leaves the original untouched, so that combinators which need to retry
//! (alternation, optional occurrence, repetition) can simply hold on to the
//! cursor they started from.
//!
//! The invariant `0 <= offset <= source.len()` is upheld by every constructor
//! and by [`Cursor::advance`], which additionally requires that the new offset
//! land on a `char` boundary.

use std::fmt::{Display, Formatter};

/// Byte-offset view of the remaining input of a borrowed text
///
/// Two cursors compare equal when they point at the same offset of equal
/// source texts.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Cursor<'a> {
    source: &'a str,
    offset: usize,
}

impl<'a> Cursor<'a> {
    /// Constructs a cursor pointing at the very beginning of `source`
    #[inline]
    #[must_use]
    pub const fn new(source: &'a str) -> Self {
        Self { source, offset: 0 }
    }

    /// Constructs a cursor at an arbitrary `offset` into `source`
    ///
    /// Returns `None` if `offset` is past the end of `source` or does not
    /// fall on a `char` boundary.
    #[must_use]
    pub fn at(source: &'a str, offset: usize) -> Option<Self> {
        if source.is_char_boundary(offset) {
            Some(Self { source, offset })
        } else {
            None
        }
    }

    /// Returns the full text this cursor points into
    #[inline]
    #[must_use]
    pub const fn source(&self) -> &'a str {
        self.source
    }

    /// Returns the byte offset of this cursor
    #[inline]
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Returns the text that has not yet been consumed
    #[inline]
    #[must_use]
    pub fn remaining(&self) -> &'a str {
        &self.source[self.offset..]
    }

    /// Returns `true` if every byte of the source has been consumed
    #[inline]
    #[must_use]
    pub fn is_at_end(&self) -> bool {
        self.offset == self.source.len()
    }

    /// Returns `true` if the remaining input begins with `literal`
    #[inline]
    #[must_use]
    pub fn starts_with(&self, literal: &str) -> bool {
        self.remaining().starts_with(literal)
    }

    /// Returns a new cursor advanced `n` bytes past `self`
    ///
    /// # Panics
    ///
    /// Panics if the resulting offset would exceed the length of the source,
    /// or would split a multi-byte character. Both indicate a bug in the
    /// matcher that computed `n`, rather than a property of the input.
    #[must_use]
    pub fn advance(self, n: usize) -> Self {
        let offset = self.offset + n;
        assert!(
            self.source.is_char_boundary(offset),
            "cannot advance cursor by {n} bytes from offset {} (source length {})",
            self.offset,
            self.source.len()
        );
        Self {
            source: self.source,
            offset,
        }
    }

    /// Returns the text between `earlier` and `self`
    ///
    /// Both cursors are expected to share the same source, with `earlier`
    /// not past `self`.
    #[must_use]
    pub fn consumed_since(&self, earlier: &Cursor<'a>) -> &'a str {
        debug_assert!(earlier.offset <= self.offset);
        &self.source[earlier.offset..self.offset]
    }
}

impl Display for Cursor<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "offset {} of {}", self.offset, self.source.len())
    }
}
