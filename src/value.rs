//! Dynamic value model
//!
//! Terminals and the `maybe`/repetition combinators produce statically typed
//! values (`i64`, `String`, `Option<T>`, `Vec<T>`, ...). Templates and
//! alternations, whose children are heterogeneous, instead route their
//! children's values through the dynamic [`Value`] type:
//!
//!   - a template produces a [`Record`], an ordered mapping from the names of
//!     its named children to their values;
//!   - an alternation produces a [`Tagged`] value, naming the single
//!     alternative that matched.
//!
//! Typed values enter the dynamic model through `From<T> for Value`, and are
//! recovered for encoding through [`FromValue`].

use num_bigint::BigInt;
#[cfg(feature = "serde_impls")]
use serde::{Deserialize, Serialize};

use crate::conv::error::{EncodeError, EncodeResult};

/// Dynamically-shaped decoded value
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde_impls", derive(Serialize, Deserialize))]
pub enum Value {
    Int(i64),
    BigInt(BigInt),
    Str(String),
    List(Vec<Value>),
    Optional(Option<Box<Value>>),
    Record(Record),
    Tagged(Tagged),
}

impl Value {
    /// Name of the kind of value held, used in diagnostics
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) => "integer",
            Value::BigInt(_) => "big integer",
            Value::Str(_) => "string",
            Value::List(_) => "list",
            Value::Optional(_) => "optional",
            Value::Record(_) => "record",
            Value::Tagged(_) => "tagged",
        }
    }

    #[must_use]
    pub fn as_record(&self) -> Option<&Record> {
        match self {
            Value::Record(rec) => Some(rec),
            _ => None,
        }
    }
}

/// Ordered mapping from field names to values
///
/// Fields keep the order in which they were inserted, which for decoded
/// records is the declaration order of the template's named children.
/// Equality is field-wise and ignores order, as names are unique within a
/// record.
#[derive(Clone, Debug, Default, Eq)]
#[cfg_attr(feature = "serde_impls", derive(Serialize, Deserialize))]
pub struct Record {
    fields: Vec<(String, Value)>,
}

impl Record {
    /// Constructs an empty record
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `name` to `value`, replacing and returning any previous value
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let name = name.into();
        let value = value.into();
        match self.fields.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.fields.push((name, value));
                None
            }
        }
    }

    /// Builder-style variant of [`insert`](Record::insert)
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let _ = self.insert(name, value);
        self
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find_map(|(n, v)| if n == name { Some(v) } else { None })
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over the field names, in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(n, _)| n.as_str())
    }

    /// Iterates over `(name, value)` pairs, in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v))
    }
}

impl PartialEq for Record {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(name, value)| other.get(name) == Some(value))
    }
}

impl<N: Into<String>, V: Into<Value>> FromIterator<(N, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut rec = Record::new();
        for (n, v) in iter {
            let _ = rec.insert(n, v);
        }
        rec
    }
}

/// Value produced by an alternation: the name of the matching alternative
/// together with the value it decoded
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde_impls", derive(Serialize, Deserialize))]
pub struct Tagged {
    pub tag: String,
    pub value: Box<Value>,
}

impl Tagged {
    #[must_use]
    pub fn new(tag: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            tag: tag.into(),
            value: Box::new(value.into()),
        }
    }

    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }
}

macro_rules! value_from {
    ( $( $t:ty => $variant:ident ),+ $(,)? ) => {
        $( impl From<$t> for Value {
            fn from(x: $t) -> Self {
                Value::$variant(x)
            }
        }
        )+
    };
}

value_from![
    i64 => Int,
    BigInt => BigInt,
    String => Str,
    Record => Record,
    Tagged => Tagged,
];

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_owned())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(xs: Vec<T>) -> Self {
        Value::List(xs.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(x: Option<T>) -> Self {
        Value::Optional(x.map(|v| Box::new(v.into())))
    }
}

/// Recovers a typed value from a borrowed [`Value`] for encoding
///
/// This is the inverse of `From<Self> for Value`, failing with
/// [`EncodeError::TypeMismatch`] when the dynamic value is of the wrong kind.
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> EncodeResult<Self>;
}

fn mismatch<T>(expected: &'static str, found: &Value) -> EncodeResult<T> {
    Err(EncodeError::TypeMismatch {
        expected,
        found: found.kind(),
    })
}

impl FromValue for Value {
    fn from_value(value: &Value) -> EncodeResult<Self> {
        Ok(value.clone())
    }
}

impl FromValue for i64 {
    fn from_value(value: &Value) -> EncodeResult<Self> {
        match value {
            Value::Int(i) => Ok(*i),
            other => mismatch("integer", other),
        }
    }
}

impl FromValue for BigInt {
    fn from_value(value: &Value) -> EncodeResult<Self> {
        match value {
            Value::BigInt(n) => Ok(n.clone()),
            Value::Int(i) => Ok(BigInt::from(*i)),
            other => mismatch("big integer", other),
        }
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> EncodeResult<Self> {
        match value {
            Value::Str(s) => Ok(s.clone()),
            other => mismatch("string", other),
        }
    }
}

impl FromValue for Record {
    fn from_value(value: &Value) -> EncodeResult<Self> {
        match value {
            Value::Record(rec) => Ok(rec.clone()),
            other => mismatch("record", other),
        }
    }
}

impl FromValue for Tagged {
    /// Accepts either a [`Tagged`] value, or a [`Record`] with exactly one
    /// field, whose name is taken as the tag.
    fn from_value(value: &Value) -> EncodeResult<Self> {
        match value {
            Value::Tagged(t) => Ok(t.clone()),
            Value::Record(rec) => {
                let mut fields = rec.iter();
                match (fields.next(), fields.next()) {
                    (Some((tag, inner)), None) => Ok(Tagged::new(tag, inner.clone())),
                    (None, _) => Err(EncodeError::TagMissing {
                        alternatives: Vec::new(),
                    }),
                    (Some(_), Some(_)) => Err(EncodeError::TagAmbiguous {
                        tags: rec.names().map(str::to_owned).collect(),
                    }),
                }
            }
            other => mismatch("tagged", other),
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> EncodeResult<Self> {
        match value {
            Value::List(xs) => xs.iter().map(T::from_value).collect(),
            other => mismatch("list", other),
        }
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> EncodeResult<Self> {
        match value {
            Value::Optional(None) => Ok(None),
            Value::Optional(Some(inner)) => T::from_value(inner).map(Some),
            other => mismatch("optional", other),
        }
    }
}
