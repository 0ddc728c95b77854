//! Template composition
//!
//! A [`Template`] interleaves literal text with child codecs, in a fixed
//! order. Decoding processes the elements left to right, requiring each
//! literal verbatim and delegating to each child codec in turn; the values of
//! *named* children are collected into a [`Record`] under their names, while
//! the values of unnamed children are consumed and discarded. Decoding stops
//! at the first element that fails, and that failure is the template's.
//!
//! Encoding walks the same elements: literals are emitted verbatim, named
//! children render the record field of the same name, and unnamed children
//! render their [canonical](crate::conv::Codec::canonical) text. An unnamed
//! child without canonical text could not be rendered at all, and is rejected
//! when the template is built, as are duplicate field names.
//!
//! ```ignore
//! let declaration = template()
//!     .literal("let")
//!     .skip(whitespace())
//!     .field(identifier().named("name"))
//!     .skip(maybe_whitespace())
//!     .literal("=")
//!     .skip(maybe_whitespace())
//!     .field(string_literal().named("value"))
//!     .skip(maybe_whitespace())
//!     .literal(";")
//!     .build()?;
//! ```

use std::collections::HashSet;
use std::sync::Arc;

use crate::conv::{Codec, DynCodec, EncodeError, EncodeResult};
use crate::cursor::Cursor;
use crate::error::GrammarError;
use crate::named::Named;
use crate::parse::{expect_literal, DecodeResult, Decoded};
use crate::value::Record;

/// Single element of a template
#[derive(Clone)]
pub enum Element {
    /// Text that must appear verbatim
    Literal(String),
    /// Child codec whose value is stored under `name`
    Field {
        name: String,
        codec: Arc<dyn DynCodec>,
    },
    /// Child codec whose value is discarded
    Skip(Arc<dyn DynCodec>),
}

impl Element {
    fn describe(&self) -> String {
        match self {
            Element::Literal(text) => format!("{text:?}"),
            Element::Field { name, codec } => format!("{}({name})", codec.dyn_describe()),
            Element::Skip(codec) => codec.dyn_describe(),
        }
    }
}

/// Literal-interleaved sequence of codecs producing a [`Record`]
#[derive(Clone)]
pub struct Template {
    elements: Vec<Element>,
    fields: Vec<String>,
}

/// Builder for [`Template`]
#[derive(Clone, Default)]
pub struct TemplateBuilder {
    elements: Vec<Element>,
}

/// Starts a template with no elements
#[must_use]
pub fn template() -> TemplateBuilder {
    TemplateBuilder::default()
}

impl TemplateBuilder {
    /// Appends literal text
    #[must_use]
    pub fn literal(mut self, text: impl Into<String>) -> Self {
        self.elements.push(Element::Literal(text.into()));
        self
    }

    /// Appends a named child, whose value becomes a field of the record
    #[must_use]
    pub fn field<C>(mut self, named: Named<C>) -> Self
    where
        C: Codec + 'static,
        C::Value: Into<crate::value::Value> + crate::value::FromValue,
    {
        let (name, codec) = named.into_parts();
        self.elements.push(Element::Field {
            name,
            codec: Arc::new(codec),
        });
        self
    }

    /// Appends an unnamed child, whose value is discarded
    #[must_use]
    pub fn skip<C: DynCodec + 'static>(mut self, codec: C) -> Self {
        self.elements.push(Element::Skip(Arc::new(codec)));
        self
    }

    /// Appends an arbitrary element
    #[must_use]
    pub fn element(mut self, element: Element) -> Self {
        self.elements.push(element);
        self
    }

    /// Validates the elements and constructs the template
    ///
    /// # Errors
    ///
    /// Fails with [`GrammarError::DuplicateFieldName`] if two named children
    /// share a name, [`GrammarError::EmptyFieldName`] if a name is empty, and
    /// [`GrammarError::UnrenderableElement`] if an unnamed child has no
    /// canonical rendering.
    pub fn build(self) -> Result<Template, GrammarError> {
        let mut seen = HashSet::new();
        let mut fields = Vec::new();
        for (index, element) in self.elements.iter().enumerate() {
            match element {
                Element::Literal(_) => {}
                Element::Field { name, .. } => {
                    if name.is_empty() {
                        return Err(GrammarError::EmptyFieldName);
                    }
                    if !seen.insert(name.as_str()) {
                        return Err(GrammarError::DuplicateFieldName { name: name.clone() });
                    }
                    fields.push(name.clone());
                }
                Element::Skip(codec) => {
                    if codec.dyn_canonical().is_none() {
                        return Err(GrammarError::UnrenderableElement {
                            index,
                            description: codec.dyn_describe(),
                        });
                    }
                }
            }
        }
        tracing::debug!(?fields, elements = self.elements.len(), "assembled template");
        Ok(Template {
            elements: self.elements,
            fields,
        })
    }
}

impl Template {
    /// Names of the fields of decoded records, in declaration order
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }
}

impl Codec for Template {
    type Value = Record;

    fn decode<'a>(&self, cursor: Cursor<'a>) -> DecodeResult<'a, Record> {
        let mut record = Record::new();
        let mut current = cursor;
        for element in &self.elements {
            current = match element {
                Element::Literal(text) => expect_literal(current, text)?,
                Element::Field { name, codec } => {
                    let Decoded { value, cursor } = codec.decode_value(current)?;
                    let _ = record.insert(name.as_str(), value);
                    cursor
                }
                Element::Skip(codec) => codec.decode_value(current)?.cursor,
            };
        }
        Ok(Decoded::new(record, current))
    }

    fn write_to(&self, value: &Record, buf: &mut String) -> EncodeResult<usize> {
        let start = buf.len();
        self.write_elements(value, buf).map_err(|err| {
            buf.truncate(start);
            err
        })
    }

    /// Rebuilds each declared field with its own codec's normalization
    fn normalize(&self, value: Record) -> EncodeResult<Record> {
        let mut normal = Record::new();
        for element in &self.elements {
            if let Element::Field { name, codec } = element {
                let field = value
                    .get(name)
                    .ok_or_else(|| EncodeError::MissingField { name: name.clone() })?;
                let _ = normal.insert(name.as_str(), codec.normalize_value(field)?);
            }
        }
        Ok(normal)
    }

    fn describe(&self) -> String {
        let inner: Vec<String> = self.elements.iter().map(Element::describe).collect();
        format!("template({})", inner.join(" "))
    }

    /// Concatenation of every element's canonical text, if all have one
    fn canonical(&self) -> Option<String> {
        self.elements
            .iter()
            .map(|element| match element {
                Element::Literal(text) => Some(text.clone()),
                Element::Field { codec, .. } | Element::Skip(codec) => codec.dyn_canonical(),
            })
            .collect()
    }
}

impl Template {
    fn write_elements(&self, value: &Record, buf: &mut String) -> EncodeResult<usize> {
        if let Some(unknown) = value
            .names()
            .find(|n| !self.fields.iter().any(|f| f.as_str() == *n))
        {
            return Err(EncodeError::UnknownField {
                name: unknown.to_owned(),
            });
        }
        let mut written = 0;
        for element in &self.elements {
            written += match element {
                Element::Literal(text) => {
                    buf.push_str(text);
                    text.len()
                }
                Element::Field { name, codec } => {
                    let field = value
                        .get(name)
                        .ok_or_else(|| EncodeError::MissingField { name: name.clone() })?;
                    codec.write_value(field, buf)?
                }
                Element::Skip(codec) => {
                    // presence checked in `build`
                    let text = codec.dyn_canonical().unwrap_or_default();
                    buf.push_str(&text);
                    text.len()
                }
            };
        }
        Ok(written)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::conv::{parse, render};
    use crate::parse::DecodeError;
    use crate::prim::{
        big_integer, identifier, integer, maybe_whitespace, string_literal, whitespace,
    };
    use num_bigint::BigInt;

    fn pair() -> Template {
        template()
            .literal("(")
            .field(integer().named("x"))
            .literal(",")
            .skip(maybe_whitespace())
            .field(integer().named("y"))
            .literal(")")
            .build()
            .unwrap()
    }

    #[test]
    fn decode_builds_record() {
        let rec = parse(&pair(), "(1,  -2)").unwrap();
        assert_eq!(rec, Record::new().with("x", 1i64).with("y", -2i64));
        assert_eq!(rec.names().collect::<Vec<_>>(), ["x", "y"]);
        assert_eq!(pair().fields(), ["x", "y"]);
    }

    #[test]
    fn literal_failure() {
        assert_eq!(
            parse(&pair(), "(1;2)"),
            Err(DecodeError::LiteralMismatch {
                literal: ",".into(),
                offset: 2
            })
        );
    }

    #[test]
    fn child_failure_short_circuits() {
        assert!(matches!(
            parse(&pair(), "(1,y)"),
            Err(DecodeError::PatternMismatch { offset: 3, .. })
        ));
    }

    #[test]
    fn encode_uses_canonical_for_unnamed() {
        let rec = Record::new().with("x", 3i64).with("y", 4i64);
        assert_eq!(render(&pair(), &rec), Ok("(3,4)".to_owned()));
    }

    #[test]
    fn encode_errors() {
        assert_eq!(
            pair().encode(&Record::new().with("x", 3i64)),
            Err(EncodeError::MissingField { name: "y".into() })
        );
        assert_eq!(
            pair().encode(&Record::new().with("x", 3i64).with("y", 4i64).with("z", 5i64)),
            Err(EncodeError::UnknownField { name: "z".into() })
        );
    }

    #[test]
    fn failed_write_restores_buffer() {
        let mut buf = "prefix".to_owned();
        let bad = Record::new().with("x", 3i64).with("y", "four");
        assert!(matches!(
            pair().write_to(&bad, &mut buf),
            Err(EncodeError::TypeMismatch { .. })
        ));
        assert_eq!(buf, "prefix");
    }

    #[test]
    fn small_integer_renders_in_big_field() {
        let t = template().field(big_integer().named("n")).build().unwrap();
        let rec = Record::new().with("n", 5i64);
        assert_eq!(
            t.normalize(rec.clone()),
            Ok(Record::new().with("n", BigInt::from(5i64)))
        );
        assert_eq!(render(&t, &rec), Ok("5".to_owned()));
    }

    #[test]
    fn duplicate_names_rejected() {
        let built = template()
            .field(identifier().named("a"))
            .skip(whitespace())
            .field(string_literal().named("a"))
            .build();
        assert!(matches!(
            built,
            Err(GrammarError::DuplicateFieldName { name }) if name == "a"
        ));
    }

    #[test]
    fn unnamed_without_canonical_rejected() {
        let built = template().skip(identifier()).literal("=").build();
        assert!(matches!(
            built,
            Err(GrammarError::UnrenderableElement { index: 0, .. })
        ));
    }

    #[test]
    fn nested_templates() {
        let inner = pair();
        let outer = template()
            .field(identifier().named("name"))
            .literal("=")
            .field(inner.named("point"))
            .build()
            .unwrap();
        let rec = parse(&outer, "p=(1,2)").unwrap();
        assert_eq!(
            rec.get("point").and_then(|v| v.as_record()),
            Some(&Record::new().with("x", 1i64).with("y", 2i64))
        );
        assert_eq!(render(&outer, &rec), Ok("p=(1,2)".to_owned()));
    }
}
