// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors of resolving step text against a [`Collection`].
//!
//! [`Collection`]: super::Collection

use std::fmt;

use derive_more::with_trait::{Display, Error, From};

use super::regex::HashableRegex;

/// Failure to resolve step text to exactly one binding.
#[derive(Clone, Debug, Display, Error, From)]
pub enum MatchError {
    /// No registered pattern matches the step text.
    #[display("Matched 0 functions [{text}]")]
    #[from(ignore)]
    Unmatched {
        /// Text of the unmatched step.
        text: String,
    },

    /// More than one registered pattern matches the step text.
    #[display("{_0}")]
    Ambiguous(AmbiguousMatchError),
}

impl MatchError {
    /// Returns the step text that failed to resolve.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Unmatched { text } => text,
            Self::Ambiguous(e) => &e.text,
        }
    }
}

/// Error of step text matching multiple [`Regex`]es inside a [`Collection`].
///
/// [`Collection`]: super::Collection
/// [`Regex`]: regex::Regex
#[derive(Clone, Debug, Error)]
pub struct AmbiguousMatchError {
    /// Text of the ambiguous step.
    #[error(not(source))]
    pub text: String,

    /// Patterns the step text matches, sorted by their source.
    pub possible_matches: Vec<HashableRegex>,
}

impl AmbiguousMatchError {
    /// Returns the matched patterns as strings.
    pub fn patterns(&self) -> impl Iterator<Item = &str> + '_ {
        self.possible_matches.iter().map(HashableRegex::as_str)
    }
}

impl fmt::Display for AmbiguousMatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Matched {} functions [{}], possible matches:",
            self.possible_matches.len(),
            self.text,
        )?;
        for re in &self.possible_matches {
            write!(f, "\n{re}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use regex::Regex;

    use super::*;

    #[test]
    fn unmatched_names_the_step() {
        let err = MatchError::Unmatched { text: "Oh Hello World".into() };
        assert_eq!(err.to_string(), "Matched 0 functions [Oh Hello World]");
        assert_eq!(err.text(), "Oh Hello World");
    }

    #[test]
    fn ambiguous_lists_every_pattern() {
        let err = MatchError::from(AmbiguousMatchError {
            text: "Name: x".into(),
            possible_matches: vec![
                Regex::new("^Name(.*)$").unwrap().into(),
                Regex::new("^Name: (.*)$").unwrap().into(),
            ],
        });

        let shown = err.to_string();
        assert!(shown.starts_with("Matched 2 functions [Name: x]"), "{shown}");
        assert!(shown.contains("\n^Name(.*)$"));
        assert!(shown.contains("\n^Name: (.*)$"));
        assert_eq!(err.text(), "Name: x");
    }
}
