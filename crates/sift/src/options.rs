//! Options applied while sanitizing a predicate.

use crate::like::{CaseFold, DEFAULT_ESCAPE};

/// Sanitization options.
///
/// # Example
///
/// ```
/// use sift::{CaseFold, FilterOptions};
///
/// let options = FilterOptions::new().escape('!').case_fold(CaseFold::Unicode);
/// assert_eq!(options.escape_char(), '!');
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterOptions {
    escape: char,
    case_fold: CaseFold,
}

impl Default for FilterOptions {
    fn default() -> Self {
        FilterOptions {
            escape: DEFAULT_ESCAPE,
            case_fold: CaseFold::Ascii,
        }
    }
}

impl FilterOptions {
    /// Creates the default options: `\` escape, ASCII folding.
    pub fn new() -> Self {
        FilterOptions::default()
    }

    /// Sets the `LIKE` escape character.
    ///
    /// `%` and `_` are rejected when a `LIKE` predicate is sanitized.
    pub fn escape(mut self, escape: char) -> Self {
        self.escape = escape;
        self
    }

    /// Sets how `ILike`/`NotILike` fold letters.
    pub fn case_fold(mut self, fold: CaseFold) -> Self {
        self.case_fold = fold;
        self
    }

    /// Returns the `LIKE` escape character.
    pub fn escape_char(&self) -> char {
        self.escape
    }

    /// Returns the fold mode.
    pub fn fold(&self) -> CaseFold {
        self.case_fold
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = FilterOptions::default();
        assert_eq!(options.escape_char(), '\\');
        assert_eq!(options.fold(), CaseFold::Ascii);
    }
}
