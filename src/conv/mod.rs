//! Core of the bidirectional conversion API
//!
//! This module provides the primary abstraction of the crate, the [`Codec`]
//! trait, which pairs a decoder (text to value) with an encoder (value to
//! text) that is expected to be its inverse. Every terminal and combinator in
//! this crate is a `Codec`, and grammars are assembled by nesting them.
//!
//! Two driver functions sit on top of the trait:
//!
//!   - [`parse`] decodes a complete text, failing with
//!     [`DecodeError::TrailingInput`] if any suffix is left unconsumed;
//!   - [`render`] encodes a value and, with the `check_round_trip` feature
//!     (enabled by default), decodes the rendered text again to confirm that
//!     it yields the original value.
//!
//! Codecs whose children have differing value types (templates and
//! alternations) store their children as [`DynCodec`] trait objects, which
//! exchange values through the dynamic [`Value`] model. Every `Codec` whose
//! value type converts to and from [`Value`] is automatically a `DynCodec`.

use std::sync::Arc;

use crate::cursor::Cursor;
use crate::named::Named;
use crate::parse::{DecodeError, DecodeResult};
use crate::value::{FromValue, Value};

pub mod error;

pub use error::{EncodeError, EncodeResult};

/// Trait for values that can both decode a prefix of a text and render
/// their decoded values back into text
///
/// Implementations are defined by three required methods:
///   * [`decode`] consumes a prefix of the input at the given cursor and
///     returns the decoded value together with the cursor just past it. On
///     failure, no input is considered consumed.
///   * [`write_to`] appends the rendering of a value to a string buffer,
///     returning the number of bytes written.
///   * [`describe`] returns a short label for diagnostics.
///
/// The two directions must agree: for every value `v` produced by `decode`,
/// decoding the output of `encode(&v)` must again produce `v`. This is a
/// contract between the implementor and its callers, and is checked by
/// [`render`] rather than enforced by the type system.
///
/// [`decode`]: Codec::decode
/// [`write_to`]: Codec::write_to
/// [`describe`]: Codec::describe
pub trait Codec: Send + Sync {
    /// Type of the values this codec decodes into and encodes from
    type Value;

    /// Attempts to decode a value from the input at `cursor`
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] if the input at `cursor` is not recognized.
    fn decode<'a>(&self, cursor: Cursor<'a>) -> DecodeResult<'a, Self::Value>;

    /// Appends the rendering of `value` to `buf`, returning the number of
    /// bytes written
    ///
    /// On error, `buf` is left as it was before the call.
    ///
    /// # Errors
    ///
    /// Returns an [`EncodeError`] if `value` does not have the shape that
    /// this codec produces.
    fn write_to(&self, value: &Self::Value, buf: &mut String) -> EncodeResult<usize>;

    /// Short human-readable label for this codec
    fn describe(&self) -> String;

    /// Constant text this codec renders when its value is not available,
    /// which is the case for unnamed children of a template
    ///
    /// The default implementation returns `None`, indicating that the codec
    /// cannot be rendered without a value.
    fn canonical(&self) -> Option<String> {
        None
    }

    /// Converts `value` into the shape that decoding its rendering yields
    ///
    /// Values passing through the dynamic model may be written from more
    /// than one shape: a one-field [`Record`](crate::value::Record) stands
    /// for a [`Tagged`](crate::value::Tagged), and [`Value::Int`] for a big
    /// integer. Combinators rebuild their children's values here so that
    /// [`render`] can compare like with like. The default returns `value`
    /// unchanged.
    ///
    /// # Errors
    ///
    /// Fails as [`write_to`](Codec::write_to) would on a malformed value.
    fn normalize(&self, value: Self::Value) -> EncodeResult<Self::Value> {
        Ok(value)
    }

    /// Returns the rendering of `value` as a fresh string
    fn encode(&self, value: &Self::Value) -> EncodeResult<String> {
        let mut buf = String::new();
        let _ = self.write_to(value, &mut buf)?;
        Ok(buf)
    }

    /// Attaches a field label to this codec
    ///
    /// See [`Named`] for details.
    fn named(self, name: impl Into<String>) -> Named<Self>
    where
        Self: Sized,
    {
        Named::new(self, name)
    }
}

impl<C: Codec + ?Sized> Codec for Arc<C> {
    type Value = C::Value;

    fn decode<'a>(&self, cursor: Cursor<'a>) -> DecodeResult<'a, Self::Value> {
        (**self).decode(cursor)
    }

    fn write_to(&self, value: &Self::Value, buf: &mut String) -> EncodeResult<usize> {
        (**self).write_to(value, buf)
    }

    fn describe(&self) -> String {
        (**self).describe()
    }

    fn canonical(&self) -> Option<String> {
        (**self).canonical()
    }

    fn normalize(&self, value: Self::Value) -> EncodeResult<Self::Value> {
        (**self).normalize(value)
    }
}

/// Object-safe variant of [`Codec`] over the dynamic [`Value`] model
pub trait DynCodec: Send + Sync {
    fn decode_value<'a>(&self, cursor: Cursor<'a>) -> DecodeResult<'a, Value>;

    fn write_value(&self, value: &Value, buf: &mut String) -> EncodeResult<usize>;

    fn normalize_value(&self, value: &Value) -> EncodeResult<Value>;

    fn dyn_describe(&self) -> String;

    fn dyn_canonical(&self) -> Option<String>;
}

impl<C> DynCodec for C
where
    C: Codec,
    C::Value: Into<Value> + FromValue,
{
    fn decode_value<'a>(&self, cursor: Cursor<'a>) -> DecodeResult<'a, Value> {
        Ok(self.decode(cursor)?.map(Into::into))
    }

    fn write_value(&self, value: &Value, buf: &mut String) -> EncodeResult<usize> {
        let typed = C::Value::from_value(value)?;
        self.write_to(&typed, buf)
    }

    fn normalize_value(&self, value: &Value) -> EncodeResult<Value> {
        let typed = C::Value::from_value(value)?;
        Ok(self.normalize(typed)?.into())
    }

    fn dyn_describe(&self) -> String {
        self.describe()
    }

    fn dyn_canonical(&self) -> Option<String> {
        self.canonical()
    }
}

/// Decodes the entirety of `text` with `codec`
///
/// # Errors
///
/// Propagates any error returned by [`Codec::decode`], and returns
/// [`DecodeError::TrailingInput`] if decoding succeeded without consuming
/// all of `text`.
pub fn parse<C: Codec + ?Sized>(codec: &C, text: &str) -> Result<C::Value, DecodeError> {
    let decoded = codec.decode(Cursor::new(text))?;
    if decoded.cursor.is_at_end() {
        Ok(decoded.value)
    } else {
        let offset = decoded.cursor.offset();
        let remaining = text.len() - offset;
        tracing::debug!(
            codec = %codec.describe(),
            offset,
            remaining,
            "decode stopped before end of input"
        );
        Err(DecodeError::TrailingInput { offset, remaining })
    }
}

/// Encodes `value` with `codec`
///
/// When the `check_round_trip` feature is enabled, the rendered text is
/// decoded again with [`parse`], and must yield a value equal to `value`
/// once [normalized](Codec::normalize).
///
/// # Errors
///
/// Propagates any error returned by [`Codec::encode`]. With
/// `check_round_trip`, returns [`EncodeError::RoundTrip`] if the rendering
/// cannot be decoded, and [`EncodeError::RoundTripMismatch`] if it decodes
/// to a different value.
pub fn render<C>(codec: &C, value: &C::Value) -> EncodeResult<String>
where
    C: Codec + ?Sized,
    C::Value: PartialEq + Clone,
{
    let text = codec.encode(value)?;
    #[cfg(feature = "check_round_trip")]
    {
        let expected = codec.normalize(value.clone())?;
        match parse(codec, &text) {
            Ok(ref decoded) if *decoded == expected => {}
            Ok(_) => {
                tracing::debug!(codec = %codec.describe(), %text, "rendering decodes to a different value");
                return Err(EncodeError::RoundTripMismatch { text });
            }
            Err(source) => {
                tracing::debug!(codec = %codec.describe(), %text, %source, "rendering does not decode");
                return Err(EncodeError::RoundTrip { text, source });
            }
        }
    }
    Ok(text)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::prim::{big_integer, identifier, integer};

    #[test]
    fn parse_requires_full_consumption() {
        assert_eq!(parse(&integer(), "42"), Ok(42));
        assert_eq!(
            parse(&integer(), "42abc"),
            Err(DecodeError::TrailingInput {
                offset: 2,
                remaining: 3
            })
        );
    }

    #[test]
    fn arc_shares_codec() {
        let id = Arc::new(identifier());
        let other = Arc::clone(&id);
        assert_eq!(parse(&id, "abc"), Ok("abc".to_owned()));
        assert_eq!(parse(&other, "xyz"), Ok("xyz".to_owned()));
    }

    #[test]
    fn dyn_codec_routes_values() {
        let codec: Box<dyn DynCodec> = Box::new(integer());
        let decoded = codec.decode_value(Cursor::new("-7")).unwrap();
        assert_eq!(decoded.value, Value::Int(-7));
        let mut buf = String::new();
        assert_eq!(codec.write_value(&Value::Int(12), &mut buf), Ok(2));
        assert_eq!(buf, "12");
        assert!(matches!(
            codec.write_value(&Value::from("12"), &mut buf),
            Err(EncodeError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn dyn_codec_normalizes_values() {
        let big: Box<dyn DynCodec> = Box::new(big_integer());
        assert_eq!(
            big.normalize_value(&Value::Int(5)),
            Ok(Value::BigInt(num_bigint::BigInt::from(5i64)))
        );
        assert!(matches!(
            big.normalize_value(&Value::from("5")),
            Err(EncodeError::TypeMismatch { .. })
        ));
    }

    #[cfg(feature = "check_round_trip")]
    #[test]
    fn render_checks_round_trip() {
        use crate::terminal::Terminal;

        // Renders every value as "0", which decodes back to 0 only.
        let lossy = Terminal::new(
            crate::pattern::anchored("[0-9]+").unwrap(),
            |s: &str| s.parse::<i64>().map_err(|e| e.to_string()),
            |_: &i64| "0".to_owned(),
        );
        assert_eq!(render(&lossy, &0), Ok("0".to_owned()));
        assert_eq!(
            render(&lossy, &5),
            Err(EncodeError::RoundTripMismatch { text: "0".into() })
        );

        let broken = Terminal::new(
            crate::pattern::anchored("[0-9]+").unwrap(),
            |s: &str| s.parse::<i64>().map_err(|e| e.to_string()),
            |n: &i64| format!("#{n}"),
        );
        assert!(matches!(
            render(&broken, &5),
            Err(EncodeError::RoundTrip { .. })
        ));
    }
}
