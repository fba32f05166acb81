// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Regex`] wrapper usable as a key of step bindings.

use std::{
    cmp::Ordering,
    hash::{Hash, Hasher},
};

use derive_more::with_trait::{Debug, Deref, Display};
use regex::Regex;

/// [`Regex`] wrapper implementing [`Eq`], [`Ord`] and [`Hash`] by its source
/// pattern.
///
/// Two [`HashableRegex`]es compiled from the same pattern string are equal, so
/// registering an identical pattern twice replaces the earlier binding.
#[derive(Clone, Debug, Deref, Display)]
pub struct HashableRegex(Regex);

impl HashableRegex {
    /// Returns the pattern this [`HashableRegex`] was compiled from.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns the number of explicit capture groups (the whole match
    /// excluded).
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.0.captures_len().saturating_sub(1)
    }
}

impl From<Regex> for HashableRegex {
    fn from(re: Regex) -> Self {
        Self(re)
    }
}

impl Hash for HashableRegex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.as_str().hash(state);
    }
}

impl PartialEq for HashableRegex {
    fn eq(&self, other: &Self) -> bool {
        self.0.as_str() == other.0.as_str()
    }
}

impl Eq for HashableRegex {}

impl PartialOrd for HashableRegex {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for HashableRegex {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.as_str().cmp(other.0.as_str())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn re(pattern: &str) -> HashableRegex {
        Regex::new(pattern).unwrap().into()
    }

    #[test]
    fn equal_by_pattern_text() {
        assert_eq!(re("^a$"), re("^a$"));
        assert_ne!(re("^a$"), re("^a"));

        let set: HashSet<_> = [re("x"), re("y"), re("x")].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn ordered_by_pattern_text() {
        let mut all = vec![re("b"), re("c"), re("a")];
        all.sort();
        let patterns: Vec<_> = all.iter().map(HashableRegex::as_str).collect();
        assert_eq!(patterns, ["a", "b", "c"]);
    }

    #[test]
    fn counts_explicit_groups_only() {
        assert_eq!(re("^Hello$").group_count(), 0);
        assert_eq!(re("^(.+)'s name:(.+)$").group_count(), 2);
        assert_eq!(re("^(?:x)(y)?$").group_count(), 1);
    }

    #[test]
    fn derefs_to_regex() {
        let hashable = re(r"test (\d+)");
        assert!(hashable.is_match("test 123"));
        assert_eq!(format!("{hashable}"), r"test (\d+)");
    }
}
