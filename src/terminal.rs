//! Leaf codecs
//!
//! A [`Terminal<T>`] pairs a recognition [`Pattern`] with two conversion
//! functions: one from the matched text to a `T`, and one from a `T` back to
//! text. It is the only kind of codec that inspects input directly; every
//! combinator ultimately delegates to terminals.
//!
//! The forward conversion may fail (an integer literal that overflows its
//! target type, for example), in which case the terminal fails as a whole and
//! no input is consumed. The backward conversion is infallible, and is
//! expected to produce text that the pattern matches again; this is not
//! checked here, but by [`render`](crate::conv::render).

use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::conv::{Codec, EncodeResult};
use crate::cursor::Cursor;
use crate::error::GrammarError;
use crate::parse::{DecodeError, DecodeResult, Decoded};
use crate::pattern::{self, Pattern};

type DecodeFn<T> = dyn Fn(&str) -> Result<T, String> + Send + Sync;
type EncodeFn<T> = dyn Fn(&T) -> String + Send + Sync;

/// Leaf codec defined by a pattern and a pair of conversion functions
///
/// Terminals are cheap to clone: all three components are shared.
pub struct Terminal<T> {
    pattern: Arc<dyn Pattern>,
    decode: Arc<DecodeFn<T>>,
    encode: Arc<EncodeFn<T>>,
    label: Option<String>,
    canonical: Option<String>,
}

impl<T> Terminal<T> {
    /// Constructs a terminal from a pattern and its conversion functions
    pub fn new<P, D, E>(pattern: P, decode: D, encode: E) -> Self
    where
        P: Pattern + 'static,
        D: Fn(&str) -> Result<T, String> + Send + Sync + 'static,
        E: Fn(&T) -> String + Send + Sync + 'static,
    {
        Self {
            pattern: Arc::new(pattern),
            decode: Arc::new(decode),
            encode: Arc::new(encode),
            label: None,
            canonical: None,
        }
    }

    /// Constructs a terminal whose pattern is the regular expression
    /// `source`, anchored at the decoding position
    ///
    /// # Errors
    ///
    /// Returns [`GrammarError::InvalidPattern`] if `source` does not compile.
    pub fn regex<D, E>(source: &str, decode: D, encode: E) -> Result<Self, GrammarError>
    where
        D: Fn(&str) -> Result<T, String> + Send + Sync + 'static,
        E: Fn(&T) -> String + Send + Sync + 'static,
    {
        Ok(Self::new(pattern::anchored(source)?, decode, encode))
    }

    /// Sets the label reported by [`Codec::describe`]
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Sets the text rendered when this terminal appears unnamed in a
    /// template
    ///
    /// The text should itself be matched by the terminal's pattern.
    #[must_use]
    pub fn with_canonical(mut self, text: impl Into<String>) -> Self {
        self.canonical = Some(text.into());
        self
    }
}

impl<T> Clone for Terminal<T> {
    fn clone(&self) -> Self {
        Self {
            pattern: Arc::clone(&self.pattern),
            decode: Arc::clone(&self.decode),
            encode: Arc::clone(&self.encode),
            label: self.label.clone(),
            canonical: self.canonical.clone(),
        }
    }
}

impl<T> Debug for Terminal<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Terminal")
            .field("pattern", &self.pattern.describe())
            .field("label", &self.label)
            .field("canonical", &self.canonical)
            .finish_non_exhaustive()
    }
}

/// String terminal whose value is exactly the matched text
///
/// # Errors
///
/// Returns [`GrammarError::InvalidPattern`] if `source` does not compile.
pub fn token(source: &str) -> Result<Terminal<String>, GrammarError> {
    Terminal::regex(source, |s: &str| Ok(s.to_owned()), String::clone)
}

impl<T> Codec for Terminal<T> {
    type Value = T;

    fn decode<'a>(&self, cursor: Cursor<'a>) -> DecodeResult<'a, T> {
        let len = self
            .pattern
            .match_len(cursor.source(), cursor.offset())
            .ok_or_else(|| DecodeError::PatternMismatch {
                offset: cursor.offset(),
                expected: self.describe(),
            })?;
        let next = cursor.advance(len);
        let text = next.consumed_since(&cursor);
        match (self.decode)(text) {
            Ok(value) => Ok(Decoded::new(value, next)),
            Err(message) => Err(DecodeError::Conversion {
                offset: cursor.offset(),
                text: text.to_owned(),
                message,
            }),
        }
    }

    fn write_to(&self, value: &T, buf: &mut String) -> EncodeResult<usize> {
        let text = (self.encode)(value);
        buf.push_str(&text);
        Ok(text.len())
    }

    fn describe(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => self.pattern.describe(),
        }
    }

    fn canonical(&self) -> Option<String> {
        self.canonical.clone()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn byte() -> Terminal<u8> {
        Terminal::regex(
            "[0-9]+",
            |s: &str| s.parse::<u8>().map_err(|e| e.to_string()),
            u8::to_string,
        )
        .unwrap()
        .with_label("byte")
    }

    #[test]
    fn decode_advances_past_match() {
        let d = byte().decode(Cursor::new("42;")).unwrap();
        assert_eq!(d.value, 42);
        assert_eq!(d.cursor.offset(), 2);
    }

    #[test]
    fn mismatch_reports_offset() {
        let c = Cursor::new("x;42").advance(2);
        assert_eq!(
            byte().decode(Cursor::new("x;42")),
            Err(DecodeError::PatternMismatch {
                offset: 0,
                expected: "byte".into()
            })
        );
        assert_eq!(byte().decode(c).map(|d| d.value), Ok(42));
    }

    #[test]
    fn conversion_failure_consumes_nothing() {
        let err = byte().decode(Cursor::new("a 300").advance(2)).unwrap_err();
        match err {
            DecodeError::Conversion { offset, text, .. } => {
                assert_eq!(offset, 2);
                assert_eq!(text, "300");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn encode_uses_inverse() {
        assert_eq!(byte().encode(&7), Ok("7".to_owned()));
        let mut buf = String::from("x=");
        assert_eq!(byte().write_to(&255, &mut buf), Ok(3));
        assert_eq!(buf, "x=255");
    }

    #[test]
    fn token_keeps_text() {
        let kw = token("let|var").unwrap();
        assert_eq!(kw.decode(Cursor::new("var x")).map(|d| d.value), Ok("var".into()));
        assert_eq!(kw.describe(), r"/\A(?:let|var)/");
        assert_eq!(kw.canonical(), None);
    }
}
