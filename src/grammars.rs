//! Example grammars for a tiny statement language
//!
//! These grammars double as documentation of how the combinators fit
//! together, and are used by the demo binary and the benchmarks.
//!
//! ```text
//! declaration = "let" ws identifier(name) ws? "=" ws? string(value) ws? ";"
//! assignment  = identifier(target) ws? "=" ws? (integer(int) | string(str))(value) ws? ";"
//! statements  = (declaration(let) | assignment(set))*   separated by ws?
//! ```

use crate::conv::Codec;
use crate::either::{either, Either};
use crate::error::GrammarError;
use crate::prim::{identifier, integer, maybe_whitespace, string_literal, whitespace};
use crate::seq::{sequence, Repeat};
use crate::template::{template, Template};

/// `let <name> = "<value>";`
///
/// # Errors
///
/// Never fails in practice; the result is propagated from [`Template`]
/// construction.
pub fn declaration() -> Result<Template, GrammarError> {
    template()
        .literal("let")
        .skip(whitespace())
        .field(identifier().named("name"))
        .skip(maybe_whitespace())
        .literal("=")
        .skip(maybe_whitespace())
        .field(string_literal().named("value"))
        .skip(maybe_whitespace())
        .literal(";")
        .build()
}

/// `<target> = <integer or string>;`
///
/// # Errors
///
/// Never fails in practice; the result is propagated from [`Template`] and
/// [`Either`] construction.
pub fn assignment() -> Result<Template, GrammarError> {
    let value: Either = either()
        .or(integer().named("int"))
        .or(string_literal().named("str"))
        .build()?;
    template()
        .field(identifier().named("target"))
        .skip(maybe_whitespace())
        .literal("=")
        .skip(maybe_whitespace())
        .field(value.named("value"))
        .skip(maybe_whitespace())
        .literal(";")
        .build()
}

/// Any number of declarations and assignments, optionally separated by
/// whitespace
///
/// Each statement is tagged `let` or `set`.
///
/// # Errors
///
/// Never fails in practice; the result is propagated from combinator
/// construction.
pub fn statements() -> Result<Repeat<Either>, GrammarError> {
    let statement = either()
        .or(declaration()?.named("let"))
        .or(assignment()?.named("set"))
        .build()?;
    sequence(statement).separated_by(maybe_whitespace())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::conv::{parse, render};
    use crate::parse::DecodeError;
    use crate::value::{Record, Tagged, Value};

    #[test]
    fn declaration_scenario() {
        let g = declaration().unwrap();
        let rec = parse(&g, "let x = \"hi\";").unwrap();
        assert_eq!(rec, Record::new().with("name", "x").with("value", "hi"));
        let text = render(&g, &rec).unwrap();
        assert_eq!(text, "let x=\"hi\";");
        assert_eq!(parse(&g, &text), Ok(rec));
    }

    #[test]
    fn declaration_failure_offset() {
        let g = declaration().unwrap();
        assert!(matches!(
            parse(&g, "let 5 = \"hi\";"),
            Err(DecodeError::PatternMismatch { offset: 4, .. })
        ));
    }

    #[test]
    fn declaration_trailing_input() {
        let g = declaration().unwrap();
        assert_eq!(
            parse(&g, "let x = \"a\";extra"),
            Err(DecodeError::TrailingInput {
                offset: 12,
                remaining: 5
            })
        );
    }

    #[test]
    fn assignment_tags_value() {
        let g = assignment().unwrap();
        let rec = parse(&g, "n=0;").unwrap();
        assert_eq!(
            rec,
            Record::new()
                .with("target", "n")
                .with("value", Tagged::new("int", 0i64))
        );
        let rec = parse(&g, "s = \"0\" ;").unwrap();
        assert_eq!(rec.get("value"), Some(&Value::Tagged(Tagged::new("str", "0"))));
        assert_eq!(render(&g, &rec), Ok("s=\"0\";".to_owned()));
    }

    #[test]
    fn statement_list() {
        let g = statements().unwrap();
        let parsed = parse(&g, "let a = \"x\"; b = 2;\nc=\"y\";").unwrap();
        let tags: Vec<&str> = parsed.iter().map(Tagged::tag).collect();
        assert_eq!(tags, ["let", "set", "set"]);
        let text = render(&g, &parsed).unwrap();
        assert_eq!(text, "let a=\"x\";b=2;c=\"y\";");
    }
}
