// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Hooks: scenarios titled `@before/<regex>` or `@after(<priority>)/<regex>`,
//! whose steps are injected into every other scenario of the same feature
//! with a matching name.

use derive_more::with_trait::Display;
use lazy_regex::regex_captures;
use regex::Regex;

use crate::error::BuildError;

/// Position of a [`Hook`]'s steps relative to the scenario ones.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum HookKey {
    /// Injected before the scenario's own steps.
    #[display("before")]
    Before,

    /// Injected after the scenario's own steps, in reverse order.
    #[display("after")]
    After,
}

/// Hook parsed out of a specially titled [`gherkin::Scenario`].
#[derive(Clone, Debug)]
pub struct Hook {
    /// Whether this [`Hook`] runs before or after.
    pub key: HookKey,

    /// Priority, lower runs first. Defaults to `0`.
    pub priority: i32,

    /// Pattern the names of affected scenarios must match.
    pub regex: Regex,

    /// Steps to inject.
    pub steps: Vec<gherkin::Step>,
}

impl Hook {
    /// Parses the title of the given [`gherkin::Scenario`] as a [`Hook`].
    ///
    /// Returns [`None`] if the title is not a hook one, so the scenario is an
    /// ordinary one.
    ///
    /// # Errors
    ///
    /// If the title is a hook one, but:
    /// - its priority head is malformed or not an integer;
    /// - its key is neither `before` nor `after`;
    /// - its body is not a valid [`Regex`].
    pub fn parse(
        scenario: &gherkin::Scenario,
    ) -> Result<Option<Self>, BuildError> {
        let title = scenario.name.trim();
        let Some((_, head, body)) = regex_captures!(r"^@([^/]+)/(.+)$", title)
        else {
            return Ok(None);
        };
        let err_title = || title.to_owned();

        let (key, priority) = if head.contains(['(', ')']) {
            let (_, key, priority) =
                regex_captures!(r"^([^()]+)\(([^()]*)\)$", head.trim())
                    .ok_or_else(|| BuildError::HookTitle {
                        title: err_title(),
                    })?;
            let priority = priority.trim().parse::<i32>().map_err(|source| {
                BuildError::HookPriority { title: err_title(), source }
            })?;
            (key, priority)
        } else {
            (head, 0)
        };

        let key = match key.trim().to_lowercase().as_str() {
            "before" => HookKey::Before,
            "after" => HookKey::After,
            other => {
                return Err(BuildError::HookKey {
                    title: err_title(),
                    key: other.to_owned(),
                });
            }
        };

        let regex = Regex::new(body.trim()).map_err(|source| {
            BuildError::HookPattern { title: err_title(), source }
        })?;

        Ok(Some(Self {
            key,
            priority,
            regex,
            steps: scenario.steps.clone(),
        }))
    }
}

/// List of [`Hook`]s ordered by ascending priority, equal priorities keeping
/// their declaration order.
#[derive(Clone, Debug, Default)]
pub struct HookList(Vec<Hook>);

impl HookList {
    /// Adds a [`Hook`], keeping the order.
    pub fn push(&mut self, hook: Hook) {
        self.0.push(hook);
        // Stable, so ties keep their discovery order.
        self.0.sort_by_key(|h| h.priority);
    }

    /// Returns the [`Hook`]s in priority order.
    #[must_use]
    pub fn as_slice(&self) -> &[Hook] {
        &self.0
    }

    /// Collects the steps of every [`Hook`] matching the given scenario
    /// `name`: hooks in priority order, then steps in declaration order.
    #[must_use]
    pub fn select_steps(&self, name: &str) -> Vec<&gherkin::Step> {
        self.matching(name)
            .into_iter()
            .flat_map(|h| &h.steps)
            .collect()
    }

    /// Same as [`HookList::select_steps()`], but with hooks in reverse
    /// priority order. Steps of each hook keep their declaration order.
    #[must_use]
    pub fn select_steps_rev(&self, name: &str) -> Vec<&gherkin::Step> {
        self.matching(name)
            .into_iter()
            .rev()
            .flat_map(|h| &h.steps)
            .collect()
    }

    fn matching(&self, name: &str) -> Vec<&Hook> {
        let name = name.trim();
        self.0.iter().filter(|h| h.regex.is_match(name)).collect()
    }
}

/// [`HookList`]s of a single feature.
#[derive(Clone, Debug, Default)]
pub struct Hooks {
    /// Hooks injected before scenario steps.
    pub before: HookList,

    /// Hooks injected after scenario steps.
    pub after: HookList,
}

impl Hooks {
    /// Splits the given scenarios into [`Hooks`] and the ordinary scenarios.
    ///
    /// Scenario outlines are never hooks.
    ///
    /// # Errors
    ///
    /// If any hook title is malformed. See [`Hook::parse()`] for details.
    pub fn partition<'s>(
        scenarios: impl IntoIterator<Item = &'s gherkin::Scenario>,
    ) -> Result<(Self, Vec<&'s gherkin::Scenario>), BuildError> {
        let mut hooks = Self::default();
        let mut ordinary = Vec::new();
        for sc in scenarios {
            if !hooks.absorb(sc)? {
                ordinary.push(sc);
            }
        }
        Ok((hooks, ordinary))
    }

    /// Adds the given scenario to these [`Hooks`] if it's titled as one.
    ///
    /// Returns whether it was.
    ///
    /// # Errors
    ///
    /// If the hook title is malformed. See [`Hook::parse()`] for details.
    pub fn absorb(
        &mut self,
        scenario: &gherkin::Scenario,
    ) -> Result<bool, BuildError> {
        if !scenario.examples.is_empty() {
            return Ok(false);
        }
        let Some(hook) = Hook::parse(scenario)? else {
            return Ok(false);
        };

        tracing::debug!(
            key = %hook.key,
            priority = hook.priority,
            pattern = hook.regex.as_str(),
            "found hook"
        );
        match hook.key {
            HookKey::Before => self.before.push(hook),
            HookKey::After => self.after.push(hook),
        }
        Ok(true)
    }
}
