//! Error types used to report failure in decoding
//!
//! This module contains [`DecodeError`], the failure half of every decode
//! operation, and the alias [`DecodeResult`]. Every variant records the
//! byte offset it refers to, which for composite codecs is the furthest
//! point reached by any child, so that a caller can point at the most
//! plausible culprit in the input.
//!
//! Decode errors are ordinary values: combinators such as `maybe` and
//! `either` routinely observe and discard them. The one exception is
//! [`DecodeError::ZeroWidthRepetition`], which signals an ill-formed grammar
//! rather than ill-formed input, and is never swallowed by a combinator
//! (see [`DecodeError::is_fatal`]).

use thiserror::Error;

use super::Decoded;

/// Enumeration over all failure conditions that may be encountered when
/// decoding text against a codec.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// A terminal's recognition pattern did not match at `offset`
    #[error("pattern mismatch at offset {offset}")]
    PatternMismatch {
        offset: usize,
        /// Description of the pattern that was expected
        expected: String,
    },
    /// A terminal's pattern matched, but the matched text could not be
    /// converted into a value. `offset` is the position before the match.
    #[error("cannot convert {text:?} at offset {offset}: {message}")]
    Conversion {
        offset: usize,
        text: String,
        message: String,
    },
    /// A literal segment of a template was absent
    #[error("expected literal '{literal}' at offset {offset}")]
    LiteralMismatch { literal: String, offset: usize },
    /// Every branch of an alternation failed
    #[error("no alternative of [{}] matched at offset {offset} (furthest offset reached: {furthest})", .tried.join(", "))]
    AlternativesExhausted {
        offset: usize,
        furthest: usize,
        /// Names of the alternatives, in the order they were tried
        tried: Vec<String>,
    },
    /// A one-or-more repetition did not match even once
    #[error("expected at least one repetition at offset {offset}: {source}")]
    RepetitionTooFew {
        offset: usize,
        /// Failure of the first attempt
        source: Box<DecodeError>,
    },
    /// An element of a repetition matched without consuming input
    #[error("zero-width repetition at offset {offset}")]
    ZeroWidthRepetition { offset: usize },
    /// Decoding succeeded but did not consume the entire input
    #[error("trailing input at offset {offset}: {remaining} unconsumed bytes")]
    TrailingInput { offset: usize, remaining: usize },
}

impl DecodeError {
    /// Returns the furthest byte offset this error refers to
    #[must_use]
    pub fn offset(&self) -> usize {
        match self {
            DecodeError::PatternMismatch { offset, .. }
            | DecodeError::Conversion { offset, .. }
            | DecodeError::LiteralMismatch { offset, .. }
            | DecodeError::ZeroWidthRepetition { offset }
            | DecodeError::TrailingInput { offset, .. } => *offset,
            DecodeError::AlternativesExhausted { furthest, .. } => *furthest,
            DecodeError::RepetitionTooFew { source, .. } => source.offset(),
        }
    }

    /// Returns `true` if this error indicates a defect in the grammar
    /// itself, as opposed to input the grammar does not accept.
    ///
    /// Fatal errors are propagated unchanged through every combinator.
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, DecodeError::ZeroWidthRepetition { .. })
    }
}

/// Type alias for the outcome of decoding a value of type `T`
pub type DecodeResult<'a, T> = std::result::Result<Decoded<'a, T>, DecodeError>;

#[cfg(test)]
mod test {
    use super::*;

    fn dummy<T: Send + Sync>() {}

    #[test]
    fn decode_error_threadsafe() {
        dummy::<DecodeError>()
    }

    #[test]
    fn messages() {
        let err = DecodeError::PatternMismatch {
            offset: 4,
            expected: "identifier".into(),
        };
        assert_eq!(err.to_string(), "pattern mismatch at offset 4");
        let err = DecodeError::LiteralMismatch {
            literal: "=".into(),
            offset: 6,
        };
        assert_eq!(err.to_string(), "expected literal '=' at offset 6");
    }

    #[test]
    fn nested_offsets() {
        let inner = DecodeError::LiteralMismatch {
            literal: ";".into(),
            offset: 9,
        };
        let err = DecodeError::RepetitionTooFew {
            offset: 0,
            source: Box::new(inner),
        };
        assert_eq!(err.offset(), 9);
        assert!(!err.is_fatal());
        assert!(DecodeError::ZeroWidthRepetition { offset: 2 }.is_fatal());
    }
}
