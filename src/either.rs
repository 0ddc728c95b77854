//! Ordered alternation
//!
//! [`Either`] tries each of its named alternatives, in declaration order, at
//! the same cursor, and succeeds with the first one that matches. The result
//! is a [`Tagged`] value naming that alternative. Later alternatives are not
//! attempted once one succeeds, even if they would match more input.
//!
//! Encoding dispatches on the tag: the value is rendered by the alternative
//! whose name it carries. A value that names none of the alternatives fails
//! with [`EncodeError::TagMissing`]; a record naming several fails with
//! [`EncodeError::TagAmbiguous`] (see [`FromValue for Tagged`](Tagged)).

use std::collections::HashSet;
use std::sync::Arc;

use crate::conv::{Codec, DynCodec, EncodeError, EncodeResult};
use crate::cursor::Cursor;
use crate::error::GrammarError;
use crate::named::Named;
use crate::parse::{DecodeError, DecodeResult, Decoded};
use crate::value::Tagged;

#[derive(Clone)]
struct Alternative {
    name: String,
    codec: Arc<dyn DynCodec>,
}

/// Ordered choice between named codecs
#[derive(Clone)]
pub struct Either {
    alternatives: Vec<Alternative>,
}

/// Builder for [`Either`]
///
/// Alternatives are tried in the order they are added.
#[derive(Clone, Default)]
pub struct EitherBuilder {
    alternatives: Vec<Alternative>,
}

impl EitherBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an alternative, tagged with the name of `named`
    #[must_use]
    pub fn or<C>(mut self, named: Named<C>) -> Self
    where
        Named<C>: DynCodec + 'static,
    {
        let name = named.name().to_owned();
        self.alternatives.push(Alternative {
            name,
            codec: Arc::new(named),
        });
        self
    }

    /// Validates the alternatives and constructs the alternation
    ///
    /// # Errors
    ///
    /// Fails with [`GrammarError::EmptyAlternation`] if no alternatives were
    /// added, [`GrammarError::EmptyFieldName`] if any alternative has an empty
    /// name, and [`GrammarError::DuplicateFieldName`] if two alternatives
    /// share a name.
    pub fn build(self) -> Result<Either, GrammarError> {
        if self.alternatives.is_empty() {
            return Err(GrammarError::EmptyAlternation);
        }
        let mut seen = HashSet::new();
        for alt in &self.alternatives {
            if alt.name.is_empty() {
                return Err(GrammarError::EmptyFieldName);
            }
            if !seen.insert(alt.name.as_str()) {
                return Err(GrammarError::DuplicateFieldName {
                    name: alt.name.clone(),
                });
            }
        }
        tracing::debug!(
            alternatives = ?self.alternatives.iter().map(|a| a.name.as_str()).collect::<Vec<_>>(),
            "assembled alternation"
        );
        Ok(Either {
            alternatives: self.alternatives,
        })
    }
}

/// Starts an alternation with no alternatives
#[must_use]
pub fn either() -> EitherBuilder {
    EitherBuilder::new()
}

impl Either {
    /// Names of the alternatives, in the order they are tried
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.alternatives.iter().map(|a| a.name.as_str())
    }

    fn names_owned(&self) -> Vec<String> {
        self.names().map(str::to_owned).collect()
    }
}

impl Codec for Either {
    type Value = Tagged;

    fn decode<'a>(&self, cursor: Cursor<'a>) -> DecodeResult<'a, Tagged> {
        let mut furthest = cursor.offset();
        for alt in &self.alternatives {
            match alt.codec.decode_value(cursor) {
                Ok(Decoded { value, cursor: next }) => {
                    return Ok(Decoded::new(Tagged::new(alt.name.as_str(), value), next));
                }
                Err(err) if err.is_fatal() => return Err(err),
                Err(err) => {
                    tracing::trace!(alternative = %alt.name, %err, "alternative failed");
                    furthest = furthest.max(err.offset());
                }
            }
        }
        Err(DecodeError::AlternativesExhausted {
            offset: cursor.offset(),
            furthest,
            tried: self.names_owned(),
        })
    }

    fn write_to(&self, value: &Tagged, buf: &mut String) -> EncodeResult<usize> {
        match self.alternatives.iter().find(|a| a.name == value.tag) {
            Some(alt) => alt.codec.write_value(&value.value, buf),
            None => Err(EncodeError::TagMissing {
                alternatives: self.names_owned(),
            }),
        }
    }

    /// Normalizes the inner value with the alternative named by the tag
    fn normalize(&self, value: Tagged) -> EncodeResult<Tagged> {
        match self.alternatives.iter().find(|a| a.name == value.tag) {
            Some(alt) => {
                let inner = alt.codec.normalize_value(&value.value)?;
                Ok(Tagged::new(value.tag, inner))
            }
            None => Err(EncodeError::TagMissing {
                alternatives: self.names_owned(),
            }),
        }
    }

    fn describe(&self) -> String {
        let inner: Vec<String> = self
            .alternatives
            .iter()
            .map(|a| a.codec.dyn_describe())
            .collect();
        format!("either({})", inner.join(" | "))
    }

    /// Canonical rendering of the first alternative
    fn canonical(&self) -> Option<String> {
        self.alternatives.first()?.codec.dyn_canonical()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::conv::{parse, render};
    use crate::prim::{big_integer, identifier, integer, string_literal};
    use crate::value::{FromValue, Record, Value};

    fn int_or_str() -> Either {
        either()
            .or(integer().named("int"))
            .or(string_literal().named("str"))
            .build()
            .unwrap()
    }

    #[test]
    fn first_success_wins() {
        assert_eq!(parse(&int_or_str(), "5"), Ok(Tagged::new("int", 5i64)));
        assert_eq!(
            parse(&int_or_str(), "\"5\""),
            Ok(Tagged::new("str", "5"))
        );

        // both alternatives match; declaration order decides
        let ambiguous = either()
            .or(identifier().named("first"))
            .or(identifier().named("second"))
            .build()
            .unwrap();
        assert_eq!(parse(&ambiguous, "x"), Ok(Tagged::new("first", "x")));
    }

    #[test]
    fn exhausted() {
        let err = parse(&int_or_str(), "x").unwrap_err();
        assert_eq!(
            err,
            DecodeError::AlternativesExhausted {
                offset: 0,
                furthest: 0,
                tried: vec!["int".into(), "str".into()],
            }
        );
    }

    #[test]
    fn encode_dispatches_on_tag() {
        let e = int_or_str();
        assert_eq!(render(&e, &Tagged::new("int", 0i64)), Ok("0".to_owned()));
        assert_eq!(render(&e, &Tagged::new("str", "a")), Ok("\"a\"".to_owned()));
        assert_eq!(
            e.encode(&Tagged::new("float", 1i64)),
            Err(EncodeError::TagMissing {
                alternatives: vec!["int".into(), "str".into()]
            })
        );
        assert!(matches!(
            e.encode(&Tagged::new("int", "a")),
            Err(EncodeError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn record_shaped_values() {
        let e = int_or_str();
        let both = Value::Record(Record::new().with("int", 1i64).with("str", "1"));
        assert!(matches!(
            Tagged::from_value(&both),
            Err(EncodeError::TagAmbiguous { .. })
        ));
        let one = Value::Record(Record::new().with("str", "1"));
        let tagged = Tagged::from_value(&one).unwrap();
        assert_eq!(e.encode(&tagged), Ok("\"1\"".to_owned()));
    }

    #[test]
    fn normalize_follows_the_tag() {
        let e = either()
            .or(big_integer().named("big"))
            .or(string_literal().named("str"))
            .build()
            .unwrap();
        assert_eq!(
            e.normalize(Tagged::new("big", 5i64)),
            Ok(Tagged::new("big", num_bigint::BigInt::from(5i64)))
        );
        assert_eq!(render(&e, &Tagged::new("big", 5i64)), Ok("5".to_owned()));
        assert!(matches!(
            e.normalize(Tagged::new("float", 5i64)),
            Err(EncodeError::TagMissing { .. })
        ));
    }

    #[test]
    fn construction_errors() {
        assert!(matches!(either().build(), Err(GrammarError::EmptyAlternation)));
        assert!(matches!(
            either().or(integer().named("a")).or(identifier().named("a")).build(),
            Err(GrammarError::DuplicateFieldName { name }) if name == "a"
        ));
        assert!(matches!(
            either().or(integer().named("")).build(),
            Err(GrammarError::EmptyFieldName)
        ));
    }
}
