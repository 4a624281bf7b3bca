//! SQL `LIKE` pattern matching.
//!
//! A pattern is compiled once into an anchored regular expression:
//! `%` becomes `.*`, `_` becomes `.`, and every other character, regex
//! metacharacters included, is matched literally. The escape character
//! (`\` by default) makes the next character literal.

use log::trace;
use regex::{Regex, RegexBuilder};

/// Case sensitivity of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Case {
    /// `LIKE`: characters must match exactly.
    #[default]
    Sensitive,
    /// `ILIKE`: letters match regardless of case.
    Insensitive,
}

/// How letters are folded for case-insensitive matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CaseFold {
    /// Only ASCII letters fold.
    #[default]
    Ascii,
    /// Simple Unicode case folding.
    Unicode,
}

/// The default escape character.
pub const DEFAULT_ESCAPE: char = '\\';

/// A compiled `LIKE` pattern.
///
/// # Example
///
/// ```
/// use sift::{Case, LikePattern};
///
/// let pattern = LikePattern::compile("%\\%%", Case::Sensitive).unwrap();
/// assert!(pattern.is_match("ab%qwe"));
/// assert!(!pattern.is_match("abc"));
/// ```
#[derive(Debug, Clone)]
pub struct LikePattern {
    source: String,
    case: Case,
    regex: Regex,
}

impl LikePattern {
    /// Compiles `pattern` with the default escape and ASCII folding.
    pub fn compile(pattern: &str, case: Case) -> Result<Self, regex::Error> {
        Self::compile_with(pattern, case, DEFAULT_ESCAPE, CaseFold::Ascii)
    }

    /// Compiles `pattern` with an explicit escape character and fold mode.
    ///
    /// Choosing `%` or `_` as the escape turns that wildcard into an escape,
    /// so it no longer matches anything on its own. Filters reject such
    /// escapes with [`SiftError::InvalidEscape`](crate::SiftError::InvalidEscape).
    pub fn compile_with(
        pattern: &str,
        case: Case,
        escape: char,
        fold: CaseFold,
    ) -> Result<Self, regex::Error> {
        let ascii_fold = case == Case::Insensitive && fold == CaseFold::Ascii;
        let expr = translate(pattern, escape, ascii_fold);
        trace!("compiled LIKE pattern {:?} into {:?}", pattern, expr);

        let regex = RegexBuilder::new(&expr)
            .dot_matches_new_line(true)
            .case_insensitive(case == Case::Insensitive && fold == CaseFold::Unicode)
            .build()?;

        Ok(LikePattern {
            source: pattern.to_string(),
            case,
            regex,
        })
    }

    /// Returns `true` if the whole of `text` matches the pattern.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Returns the pattern as written.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Returns the case sensitivity the pattern was compiled with.
    pub fn case(&self) -> Case {
        self.case
    }
}

/// Matches `text` against a `LIKE` pattern in one call.
///
/// A pattern that fails to compile matches nothing.
pub fn like(text: &str, pattern: &str, case: Case) -> bool {
    LikePattern::compile(pattern, case)
        .map(|p| p.is_match(text))
        .unwrap_or(false)
}

fn translate(pattern: &str, escape: char, ascii_fold: bool) -> String {
    let mut expr = String::with_capacity(pattern.len() * 2 + 4);
    expr.push_str(r"\A");

    let mut chars = pattern.chars();
    while let Some(c) = chars.next() {
        if c == escape {
            // A trailing escape stands for itself.
            let literal = chars.next().unwrap_or(escape);
            push_literal(&mut expr, literal, ascii_fold);
            continue;
        }
        match c {
            '%' => expr.push_str(".*"),
            '_' => expr.push('.'),
            _ => push_literal(&mut expr, c, ascii_fold),
        }
    }

    expr.push_str(r"\z");
    expr
}

fn push_literal(expr: &mut String, c: char, ascii_fold: bool) {
    if ascii_fold && c.is_ascii_alphabetic() {
        expr.push('[');
        expr.push(c.to_ascii_lowercase());
        expr.push(c.to_ascii_uppercase());
        expr.push(']');
    } else {
        let mut buf = [0u8; 4];
        expr.push_str(&regex::escape(c.encode_utf8(&mut buf)));
    }
}
