//! Primitive terminals
//!
//! This module provides constructors for the terminals most small textual
//! languages are built from:
//!
//! | Constructor          | Value     | Recognizes                       |
//! |----------------------|-----------|----------------------------------|
//! | [`integer`]          | `i64`     | `-?(?:[1-9][0-9]*\|0)`           |
//! | [`big_integer`]      | `BigInt`  | same, without range limit        |
//! | [`string_literal`]   | `String`  | double-quoted, backslash escapes |
//! | [`identifier`]       | `String`  | `[A-Za-z_][A-Za-z0-9_]*`         |
//! | [`whitespace`]       | `String`  | `[ \t\r\n]+`                     |
//! | [`maybe_whitespace`] | `Option`  | optional [`whitespace`]          |
//!
//! The regular expressions backing these terminals are compiled once per
//! process and shared by every terminal constructed from them.

use num_bigint::BigInt;
use regex::Regex;

use crate::schema::{maybe, Maybe};
use crate::terminal::Terminal;

lazy_static::lazy_static! {
    static ref INTEGER: Regex = compile(r"-?(?:[1-9][0-9]*|0)");
    static ref STRING_LITERAL: Regex = compile(r#""(?:[^"\\]|\\.)*""#);
    static ref IDENTIFIER: Regex = compile(r"[A-Za-z_][A-Za-z0-9_]*");
    static ref WHITESPACE: Regex = compile(r"[ \t\r\n]+");
}

/// Compiles one of the fixed patterns of this module
fn compile(source: &str) -> Regex {
    match crate::pattern::anchored(source) {
        Ok(re) => re,
        Err(err) => unreachable!("built-in pattern {source:?} is invalid: {err}"),
    }
}

/// Signed decimal integer fitting in an `i64`
///
/// Leading zeros are not recognized. Values outside the range of `i64` fail
/// to decode with a conversion error.
pub fn integer() -> Terminal<i64> {
    Terminal::new(
        INTEGER.clone(),
        |s: &str| s.parse::<i64>().map_err(|e| e.to_string()),
        i64::to_string,
    )
    .with_label("integer")
}

/// Signed decimal integer of arbitrary size
pub fn big_integer() -> Terminal<BigInt> {
    Terminal::new(
        INTEGER.clone(),
        |s: &str| s.parse::<BigInt>().map_err(|e| e.to_string()),
        BigInt::to_string,
    )
    .with_label("big integer")
}

/// Double-quoted string literal
///
/// The decoded value is the unescaped contents between the quotes. The
/// escapes `\"`, `\\`, `\n`, `\t` and `\r` are recognized; any other escaped
/// character fails to decode.
pub fn string_literal() -> Terminal<String> {
    Terminal::new(STRING_LITERAL.clone(), unescape, |s: &String| escape(s))
        .with_label("string literal")
}

/// Identifier in the style of C
pub fn identifier() -> Terminal<String> {
    Terminal::new(IDENTIFIER.clone(), |s: &str| Ok(s.to_owned()), String::clone)
        .with_label("identifier")
}

/// Non-empty run of whitespace
///
/// When used unnamed in a template, renders as a single space.
pub fn whitespace() -> Terminal<String> {
    Terminal::new(WHITESPACE.clone(), |s: &str| Ok(s.to_owned()), String::clone)
        .with_label("whitespace")
        .with_canonical(" ")
}

/// Optional run of whitespace
///
/// When used unnamed in a template, renders as nothing.
pub fn maybe_whitespace() -> Maybe<Terminal<String>> {
    maybe(whitespace())
}

fn unescape(quoted: &str) -> Result<String, String> {
    let body = quoted
        .strip_prefix('"')
        .and_then(|s| s.strip_suffix('"'))
        .ok_or_else(|| format!("{quoted} is not enclosed in double quotes"))?;
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('"') => out.push('"'),
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => return Err(format!("unknown escape sequence \\{other}")),
            None => return Err("dangling backslash".to_owned()),
        }
    }
    Ok(out)
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 2);
    out.push('"');
    for c in raw.chars() {
        match c {
            '"' => out.push_str(r#"\""#),
            '\\' => out.push_str(r"\\"),
            '\n' => out.push_str(r"\n"),
            '\t' => out.push_str(r"\t"),
            '\r' => out.push_str(r"\r"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::conv::{parse, Codec};
    use crate::cursor::Cursor;
    use crate::parse::DecodeError;

    #[test]
    fn integers() {
        assert_eq!(parse(&integer(), "0"), Ok(0));
        assert_eq!(parse(&integer(), "-15"), Ok(-15));
        assert_eq!(parse(&integer(), "120"), Ok(120));
        // leading zeros stop after the first digit
        assert!(matches!(
            parse(&integer(), "007"),
            Err(DecodeError::TrailingInput { offset: 1, .. })
        ));
        assert!(matches!(
            parse(&integer(), "-x"),
            Err(DecodeError::PatternMismatch { offset: 0, .. })
        ));
    }

    #[test]
    fn integer_overflow_is_conversion_error() {
        assert!(matches!(
            parse(&integer(), "99999999999999999999"),
            Err(DecodeError::Conversion { offset: 0, .. })
        ));
        let big = parse(&big_integer(), "99999999999999999999").unwrap();
        assert_eq!(big.to_string(), "99999999999999999999");
        assert_eq!(big_integer().encode(&big), Ok("99999999999999999999".into()));
    }

    #[test]
    fn string_literals() {
        assert_eq!(parse(&string_literal(), r#""hi""#), Ok("hi".to_owned()));
        assert_eq!(
            parse(&string_literal(), r#""a\"b\\c\n""#),
            Ok("a\"b\\c\n".to_owned())
        );
        assert_eq!(
            string_literal().encode(&"say \"hi\"\n".to_owned()),
            Ok(r#""say \"hi\"\n""#.to_owned())
        );
        assert!(matches!(
            parse(&string_literal(), r#""\q""#),
            Err(DecodeError::Conversion { .. })
        ));
    }

    #[test]
    fn string_literal_stops_at_closing_quote() {
        let d = string_literal().decode(Cursor::new(r#""a";"b""#)).unwrap();
        assert_eq!(d.value, "a");
        assert_eq!(d.cursor.offset(), 3);
    }

    #[test]
    fn identifiers_and_whitespace() {
        assert_eq!(parse(&identifier(), "_x1"), Ok("_x1".to_owned()));
        assert!(parse(&identifier(), "1x").is_err());
        assert_eq!(parse(&whitespace(), " \t\n"), Ok(" \t\n".to_owned()));
        assert!(parse(&whitespace(), "").is_err());
        assert_eq!(whitespace().canonical(), Some(" ".to_owned()));
    }

    #[test]
    fn optional_whitespace() {
        assert_eq!(parse(&maybe_whitespace(), ""), Ok(None));
        assert_eq!(parse(&maybe_whitespace(), "  "), Ok(Some("  ".to_owned())));
        assert_eq!(maybe_whitespace().canonical(), Some(String::new()));
    }
}
