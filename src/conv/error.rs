use thiserror::Error;

use crate::parse::error::DecodeError;

/// Failure conditions encountered while rendering a value back into text
///
/// Unlike [`DecodeError`], these never describe the input text: they
/// indicate that the value handed to an encoder does not have the shape
/// the codec expects.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum EncodeError {
    /// A named field of a template was absent from the record
    #[error("record has no field `{name}`")]
    MissingField { name: String },
    /// The record contained a field that the template does not declare
    #[error("record field `{name}` is not declared by the template")]
    UnknownField { name: String },
    /// An alternation value named none of the alternatives
    #[error("value selects none of the alternatives [{}]", .alternatives.join(", "))]
    TagMissing { alternatives: Vec<String> },
    /// An alternation value named more than one alternative
    #[error("value selects more than one alternative: [{}]", .tags.join(", "))]
    TagAmbiguous { tags: Vec<String> },
    /// A repetition value held fewer elements than the repetition requires
    #[error("expected at least {min} repeated elements, found {count}")]
    TooFewElements { min: usize, count: usize },
    /// The value was of a different kind than the codec produces
    #[error("expected {expected} value, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },
    /// The rendered text could not be decoded by the same codec
    #[error("rendered text {text:?} does not decode: {source}")]
    RoundTrip { text: String, source: DecodeError },
    /// The rendered text decoded to a value different from the original
    #[error("rendered text {text:?} decodes to a different value")]
    RoundTripMismatch { text: String },
}

pub type EncodeResult<T> = std::result::Result<T, EncodeError>;

#[cfg(test)]
mod test {
    use super::*;

    fn dummy<T: Send + Sync>() {}

    #[test]
    fn encode_error_threadsafe() {
        dummy::<EncodeError>()
    }

    #[test]
    fn tag_messages() {
        let err = EncodeError::TagAmbiguous {
            tags: vec!["int".into(), "str".into()],
        };
        assert_eq!(
            err.to_string(),
            "value selects more than one alternative: [int, str]"
        );
    }
}
