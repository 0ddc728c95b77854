//! Repetition
//!
//! This module defines [`Repeat<C>`], which decodes consecutive occurrences
//! of a codec into a `Vec`, and its two constructors:
//!
//!   - [`sequence`] accepts zero or more occurrences;
//!   - [`non_empty_sequence`] accepts one or more, failing with
//!     [`DecodeError::RepetitionTooFew`] otherwise.
//!
//! Repetition stops at the first occurrence that fails to decode. An
//! occurrence that decodes without consuming any input would repeat forever,
//! and is reported as [`DecodeError::ZeroWidthRepetition`], a fatal error
//! that no enclosing combinator absorbs. This holds for every occurrence,
//! including those that follow a separator.
//!
//! Encoding a `Vec` shorter than the minimum fails with
//! [`EncodeError::TooFewElements`].
//!
//! # Separators
//!
//! By default, occurrences are adjacent, and are rendered back to back with
//! nothing in between. [`Repeat::separated_by`] installs a separator codec
//! that must decode between consecutive occurrences. Its decoded value is
//! discarded, and its canonical rendering is emitted between encoded
//! occurrences. A separator that is not followed by another occurrence is
//! not consumed.

use std::sync::Arc;

use crate::conv::{Codec, DynCodec, EncodeError, EncodeResult};
use crate::cursor::Cursor;
use crate::error::GrammarError;
use crate::parse::{DecodeError, DecodeResult, Decoded};

#[derive(Clone)]
struct Separator {
    codec: Arc<dyn DynCodec>,
    rendering: String,
}

/// Consecutive occurrences of a codec
#[derive(Clone)]
pub struct Repeat<C> {
    inner: C,
    min: usize,
    separator: Option<Separator>,
}

/// Zero or more consecutive occurrences of `codec`
pub fn sequence<C: Codec>(codec: C) -> Repeat<C> {
    Repeat {
        inner: codec,
        min: 0,
        separator: None,
    }
}

/// One or more consecutive occurrences of `codec`
pub fn non_empty_sequence<C: Codec>(codec: C) -> Repeat<C> {
    Repeat {
        inner: codec,
        min: 1,
        separator: None,
    }
}

impl<C> Repeat<C> {
    /// Requires `separator` between consecutive occurrences
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::UnrenderableSeparator`] if `separator` has no
    /// canonical rendering.
    pub fn separated_by<S: DynCodec + 'static>(mut self, separator: S) -> Result<Self, GrammarError> {
        let rendering = separator
            .dyn_canonical()
            .ok_or_else(|| GrammarError::UnrenderableSeparator {
                description: separator.dyn_describe(),
            })?;
        self.separator = Some(Separator {
            codec: Arc::new(separator),
            rendering,
        });
        Ok(self)
    }
}

impl<C: Codec> Codec for Repeat<C> {
    type Value = Vec<C::Value>;

    fn decode<'a>(&self, cursor: Cursor<'a>) -> DecodeResult<'a, Self::Value> {
        let mut items = Vec::new();
        let mut current = cursor;
        loop {
            let start = match (&self.separator, items.is_empty()) {
                (Some(sep), false) => match sep.codec.decode_value(current) {
                    Ok(decoded) => decoded.cursor,
                    Err(err) if err.is_fatal() => return Err(err),
                    Err(_) => break,
                },
                _ => current,
            };
            match self.inner.decode(start) {
                Ok(decoded) => {
                    if decoded.cursor.offset() == start.offset() {
                        tracing::debug!(
                            codec = %self.inner.describe(),
                            offset = start.offset(),
                            "repeated element matched empty input"
                        );
                        return Err(DecodeError::ZeroWidthRepetition {
                            offset: start.offset(),
                        });
                    }
                    items.push(decoded.value);
                    current = decoded.cursor;
                }
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) if items.len() < self.min => {
                    return Err(DecodeError::RepetitionTooFew {
                        offset: cursor.offset(),
                        source: Box::new(err),
                    });
                }
                Err(err) => {
                    tracing::trace!(count = items.len(), %err, "repetition ended");
                    break;
                }
            }
        }
        Ok(Decoded::new(items, current))
    }

    fn write_to(&self, value: &Self::Value, buf: &mut String) -> EncodeResult<usize> {
        if value.len() < self.min {
            return Err(EncodeError::TooFewElements {
                min: self.min,
                count: value.len(),
            });
        }
        let start = buf.len();
        let mut written = 0;
        for (i, item) in value.iter().enumerate() {
            if let (Some(sep), true) = (&self.separator, i > 0) {
                buf.push_str(&sep.rendering);
                written += sep.rendering.len();
            }
            match self.inner.write_to(item, buf) {
                Ok(n) => written += n,
                Err(err) => {
                    buf.truncate(start);
                    return Err(err);
                }
            }
        }
        Ok(written)
    }

    fn normalize(&self, value: Self::Value) -> EncodeResult<Self::Value> {
        value
            .into_iter()
            .map(|item| self.inner.normalize(item))
            .collect()
    }

    fn describe(&self) -> String {
        let kind = if self.min == 0 {
            "sequence"
        } else {
            "non_empty_sequence"
        };
        format!("{kind}({})", self.inner.describe())
    }

    /// Zero occurrences for [`sequence`], one canonical occurrence for
    /// [`non_empty_sequence`]
    fn canonical(&self) -> Option<String> {
        if self.min == 0 {
            Some(String::new())
        } else {
            self.inner.canonical()
        }
    }
}
