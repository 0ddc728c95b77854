//! Recognition patterns for terminals
//!
//! The combinator engine only ever asks one question of a pattern: "how many
//! bytes of this text, starting exactly at this offset, do you match?".
//! [`Pattern`] captures that contract, so that terminals can be backed by a
//! compiled [`regex::Regex`] or by a hand-written scanning function alike.
//!
//! No merging of patterns ever takes place: composite codecs recognize input
//! by delegating to their children, one terminal at a time.

use regex::Regex;

use crate::error::GrammarError;

/// Anchored prefix matcher
pub trait Pattern: Send + Sync {
    /// Returns the length in bytes of the match beginning at `offset` of
    /// `text`, or `None` if there is no match at that position.
    ///
    /// A returned length must land on a `char` boundary of `text`.
    fn match_len(&self, text: &str, offset: usize) -> Option<usize>;

    /// Short human-readable description of what the pattern recognizes
    fn describe(&self) -> String;
}

impl Pattern for Regex {
    /// Searches the text following `offset`, accepting only a match that
    /// begins exactly at `offset`.
    ///
    /// Since the search is leftmost-first, a match at `offset` is always
    /// found when one exists; anchoring the expression with `\A` (as
    /// [`anchored`] does) only avoids scanning ahead for later matches.
    fn match_len(&self, text: &str, offset: usize) -> Option<usize> {
        let rest = text.get(offset..)?;
        self.find(rest).filter(|m| m.start() == 0).map(|m| m.end())
    }

    fn describe(&self) -> String {
        format!("/{}/", self.as_str())
    }
}

/// Compiles `source` into a regular expression that only matches at the
/// beginning of the text it is applied to.
pub fn anchored(source: &str) -> Result<Regex, GrammarError> {
    Ok(Regex::new(&format!(r"\A(?:{source})"))?)
}

/// Pattern backed by a scanning function over the remaining input
#[derive(Clone)]
pub struct FnPattern<F> {
    scan: F,
    label: String,
}

impl<F> Pattern for FnPattern<F>
where
    F: Fn(&str) -> Option<usize> + Send + Sync,
{
    fn match_len(&self, text: &str, offset: usize) -> Option<usize> {
        let rest = text.get(offset..)?;
        (self.scan)(rest).filter(|&n| rest.is_char_boundary(n))
    }

    fn describe(&self) -> String {
        self.label.clone()
    }
}

/// Constructs a [`Pattern`] from a function that receives the remaining
/// input and returns the length of its matching prefix, if any.
pub fn from_fn<F>(label: impl Into<String>, scan: F) -> FnPattern<F>
where
    F: Fn(&str) -> Option<usize> + Send + Sync,
{
    FnPattern {
        scan,
        label: label.into(),
    }
}
