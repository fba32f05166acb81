// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Selecting features and scenarios by their tags.

use gherkin::tagexpr::TagOperation;
use sealed::sealed;

/// Active list of tags to select features and scenarios by.
///
/// Tags are compared without their leading `@`, so `@smoke` and `smoke` are
/// the same tag. The list is evaluated as a [`TagOperation`] joining every
/// tag with `or`.
#[derive(Clone, Debug, Default)]
pub struct TagFilter {
    tags: Vec<String>,
    expr: Option<TagOperation>,
}

impl TagFilter {
    /// Creates a new [`TagFilter`] out of the given `tags`.
    ///
    /// Empty tags are dropped.
    #[must_use]
    pub fn new<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let tags = tags
            .into_iter()
            .map(|t| normalize(t.as_ref()).to_owned())
            .filter(|t| !t.is_empty())
            .collect::<Vec<_>>();
        let expr = tags
            .iter()
            .map(|t| TagOperation::Tag(t.clone()))
            .reduce(|l, r| TagOperation::Or(Box::new(l), Box::new(r)));
        Self { tags, expr }
    }

    /// Indicates whether this [`TagFilter`] filters anything at all.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.expr.is_some()
    }

    /// Returns the normalized tags of this [`TagFilter`].
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns the [`TagOperation`] this [`TagFilter`] evaluates, if active.
    #[must_use]
    pub const fn expr(&self) -> Option<&TagOperation> {
        self.expr.as_ref()
    }

    /// Checks whether something declaring the given `tags` is selected.
    ///
    /// Everything is selected by an inactive [`TagFilter`]. An active one
    /// selects only what declares at least one of its tags, so untagged
    /// things are never selected by it.
    #[must_use]
    pub fn admits<I, S>(&self, tags: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let Some(expr) = &self.expr else {
            return true;
        };
        let tags = tags
            .into_iter()
            .map(|t| normalize(t.as_ref()).to_owned())
            .collect::<Vec<_>>();
        expr.eval(&tags)
    }
}

/// Extension of a [`TagOperation`] allowing to evaluate it.
#[sealed]
pub trait Ext {
    /// Evaluates this [`TagOperation`] for the given normalized `tags`.
    #[must_use]
    fn eval<I, S>(&self, tags: I) -> bool
    where
        S: AsRef<str>,
        I: IntoIterator<Item = S> + Clone;
}

#[sealed]
impl Ext for TagOperation {
    fn eval<I, S>(&self, tags: I) -> bool
    where
        S: AsRef<str>,
        I: IntoIterator<Item = S> + Clone,
    {
        match self {
            Self::And(l, r) => l.eval(tags.clone()) & r.eval(tags),
            Self::Or(l, r) => l.eval(tags.clone()) | r.eval(tags),
            Self::Not(t) => !t.eval(tags),
            Self::Tag(t) => {
                tags.into_iter().any(|tag| tag.as_ref() == normalize(t))
            }
        }
    }
}

/// Strips surrounding whitespace and the leading `@` of a `tag`.
fn normalize(tag: &str) -> &str {
    let tag = tag.trim();
    tag.strip_prefix('@').unwrap_or(tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inactive_admits_everything() {
        let filter = TagFilter::new(Vec::<String>::new());
        assert!(!filter.is_active());
        assert!(filter.admits(["anything"]));
        assert!(filter.admits(Vec::<&str>::new()));

        assert!(!TagFilter::new(["", " "]).is_active());
    }

    #[test]
    fn requires_intersection() {
        let filter = TagFilter::new(["@smoke"]);
        assert!(filter.admits(["smoke"]));
        assert!(filter.admits(["@wip", "@smoke"]));
        assert!(!filter.admits(["wip"]));
        assert!(!filter.admits(Vec::<&str>::new()));

        assert!(!TagFilter::new(["@wip"]).admits(["@smoke"]));
    }

    #[test]
    fn evaluates_as_disjunction() {
        let filter = TagFilter::new(["@smoke", "fast"]);
        let Some(TagOperation::Or(l, r)) = filter.expr() else {
            panic!("expected `or` of two tags");
        };
        assert!(matches!(l.as_ref(), TagOperation::Tag(t) if t == "smoke"));
        assert!(matches!(r.as_ref(), TagOperation::Tag(t) if t == "fast"));

        assert!(filter.admits(["@fast"]));
        assert!(!filter.admits(["slow"]));
        assert!(TagFilter::default().expr().is_none());
    }

    #[test]
    fn normalizes_tags() {
        assert_eq!(TagFilter::new(["@a", " b "]).tags(), ["a", "b"]);
    }
}
