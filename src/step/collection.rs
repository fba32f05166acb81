// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Collection`] of step callbacks bound to [`Regex`] patterns.

use std::{collections::HashMap, fmt, rc::Rc};

use derive_more::with_trait::Debug;
use itertools::Itertools as _;
use regex::Regex;

use crate::{error::BuildError, Handle};

use super::{
    error::{AmbiguousMatchError, MatchError},
    params::{Params, Signature},
    regex::HashableRegex,
};

/// Step callback.
///
/// Receives the execution [`Handle`] first and then the positional [`Params`]
/// (capture groups followed by the structural argument, if any). Returning an
/// [`Err`] fails the step.
pub type StepFn = Rc<dyn Fn(&mut Handle, &Params) -> anyhow::Result<()>>;

/// [`StepFn`] along with the [`Signature`] it was registered with.
#[derive(Clone, Debug)]
pub struct Binding {
    /// Pattern this [`Binding`] is registered under.
    pub regex: HashableRegex,

    /// Declared shape of the [`Params`] the callback expects.
    pub signature: Signature,

    /// Callback itself.
    #[debug("{:p}", Rc::as_ptr(callback))]
    pub callback: StepFn,
}

/// [`Binding`] resolved for some step text, returned by
/// [`Collection::resolve()`].
#[derive(Clone, Debug)]
pub struct Resolved<'me> {
    /// Matched [`Binding`].
    pub binding: &'me Binding,

    /// Capture groups in left-to-right order, the whole match excluded.
    ///
    /// Groups not participating in the match are empty [`String`]s.
    pub captures: Vec<String>,
}

/// Collection of [`Binding`]s.
///
/// Every step text has to match exactly one [`Regex`]: matching none or
/// several is an error, there is no tie-breaking.
#[derive(Clone, Default)]
pub struct Collection {
    bindings: HashMap<HashableRegex, Binding>,
}

impl fmt::Debug for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(self.bindings.keys().sorted().map(HashableRegex::as_str))
            .finish()
    }
}

impl Collection {
    /// Creates a new empty [`Collection`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of registered [`Binding`]s.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Indicates whether nothing is registered yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Registers a `callback` for steps matching `pattern`, expecting no
    /// structural argument.
    ///
    /// # Errors
    ///
    /// If `pattern` is not a valid [`Regex`].
    pub fn register<F>(
        &mut self,
        pattern: &str,
        callback: F,
    ) -> Result<(), BuildError>
    where
        F: Fn(&mut Handle, &Params) -> anyhow::Result<()> + 'static,
    {
        self.register_with(pattern, Signature::default(), callback)
    }

    /// Registers a `callback` for steps matching `pattern`, expecting the
    /// given [`Signature`].
    ///
    /// Registering the very same `pattern` again replaces the previous
    /// [`Binding`], logging a warning.
    ///
    /// # Errors
    ///
    /// - If `pattern` is not a valid [`Regex`].
    /// - If the [`Signature`] requires a number of captures the `pattern`
    ///   doesn't declare.
    pub fn register_with<F>(
        &mut self,
        pattern: &str,
        signature: Signature,
        callback: F,
    ) -> Result<(), BuildError>
    where
        F: Fn(&mut Handle, &Params) -> anyhow::Result<()> + 'static,
    {
        let regex: HashableRegex = Regex::new(pattern)
            .map_err(|source| BuildError::Pattern {
                pattern: pattern.to_owned(),
                source,
            })?
            .into();

        if let Some(expected) = signature.captures {
            let found = regex.group_count();
            if expected != found {
                return Err(BuildError::Signature {
                    pattern: pattern.to_owned(),
                    expected,
                    found,
                });
            }
        }

        let binding = Binding {
            regex: regex.clone(),
            signature,
            callback: Rc::new(callback),
        };
        if self.bindings.insert(regex, binding).is_some() {
            tracing::warn!(pattern, "step pattern registered twice, replaced");
        }
        Ok(())
    }

    /// Resolves the given step `text` to the only [`Binding`] matching it.
    ///
    /// # Errors
    ///
    /// - [`MatchError::Unmatched`] if no pattern matches.
    /// - [`MatchError::Ambiguous`] if several patterns match.
    pub fn resolve(&self, text: &str) -> Result<Resolved<'_>, MatchError> {
        let mut matched = self
            .bindings
            .values()
            .filter_map(|b| b.regex.captures(text).map(|caps| (b, caps)))
            .collect::<Vec<_>>();

        if matched.len() > 1 {
            return Err(AmbiguousMatchError {
                text: text.to_owned(),
                possible_matches: matched
                    .into_iter()
                    .map(|(b, _)| b.regex.clone())
                    .sorted()
                    .collect(),
            }
            .into());
        }
        let Some((binding, caps)) = matched.pop() else {
            return Err(MatchError::Unmatched { text: text.to_owned() });
        };

        let captures = caps
            .iter()
            .skip(1)
            .map(|m| m.map_or_else(String::new, |m| m.as_str().to_owned()))
            .collect();

        Ok(Resolved { binding, captures })
    }
}
