//! Grammar-assembly errors
//!
//! This module contains [`GrammarError`], reported once while a grammar is
//! being assembled (duplicate field names, elements that cannot be rendered,
//! malformed patterns), and the crate-level [`Error`] that unifies it with
//! the decode- and encode-time error types for callers that do not care
//! which phase failed.

use thiserror::Error;

use crate::conv::error::EncodeError;
use crate::parse::error::DecodeError;

/// Error type for grammars that cannot be constructed
///
/// A combinator whose construction fails is never produced, so an ill-formed
/// grammar is unusable rather than failing later on particular inputs.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GrammarError {
    /// Two children of one template or alternation share a name
    #[error("duplicate field name `{name}`")]
    DuplicateFieldName { name: String },
    /// A child was given an empty name
    #[error("field names must be non-empty")]
    EmptyFieldName,
    /// An unnamed child has no constant rendering, so the value it decoded
    /// could not be reproduced when encoding
    #[error("element {index} ({description}) is unnamed and has no canonical rendering")]
    UnrenderableElement { index: usize, description: String },
    /// A repetition separator has no canonical rendering, so it could not
    /// be emitted between encoded elements
    #[error("separator {description} has no canonical rendering")]
    UnrenderableSeparator { description: String },
    /// An alternation was given no alternatives
    #[error("alternation requires at least one alternative")]
    EmptyAlternation,
    /// A terminal's recognition pattern failed to compile
    #[error("invalid recognition pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Union of every error this crate reports
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Grammar(#[from] GrammarError),
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error(transparent)]
    Encode(#[from] EncodeError),
}

pub type Result<T> = std::result::Result<T, Error>;
