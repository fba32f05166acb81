// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Execution [`Handle`] threaded through every step callback of a run.

use std::{any::Any, collections::HashMap, fmt};

use itertools::Itertools as _;

use crate::error::{Exception, ScenarioRef, StepRef};

/// Mutable bag of named values shared by all the steps of a run, passed as
/// the first argument to every step callback.
///
/// It also knows the feature, scenario and step in progress, so the
/// [`Exception`]s it mints point at them.
///
/// Values survive across scenarios and features, and are cleared only when a
/// new run starts.
#[derive(Default)]
pub struct Handle {
    values: HashMap<String, Box<dyn Any>>,
    feature: Option<String>,
    scenario: Option<ScenarioRef>,
    step: Option<StepRef>,
}

impl fmt::Debug for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Handle")
            .field("values", &self.values.keys().sorted().collect::<Vec<_>>())
            .field("feature", &self.feature)
            .field("scenario", &self.scenario)
            .field("step", &self.step)
            .finish()
    }
}

impl Handle {
    /// Stores a `value` under the given `key`.
    ///
    /// Returns `true` if some value was replaced.
    pub fn insert<T: Any>(&mut self, key: impl Into<String>, value: T) -> bool {
        self.values.insert(key.into(), Box::new(value)).is_some()
    }

    /// Returns the value stored under the given `key`, if it's a `T`.
    #[must_use]
    pub fn get<T: Any>(&self, key: &str) -> Option<&T> {
        self.values.get(key)?.downcast_ref()
    }

    /// Returns the value stored under the given `key` mutably, if it's a `T`.
    pub fn get_mut<T: Any>(&mut self, key: &str) -> Option<&mut T> {
        self.values.get_mut(key)?.downcast_mut()
    }

    /// Removes and returns the value stored under the given `key`, if it's a
    /// `T`.
    ///
    /// A value of another type is left in place.
    pub fn remove<T: Any>(&mut self, key: &str) -> Option<T> {
        if !self.values.get(key)?.is::<T>() {
            return None;
        }
        self.values.remove(key)?.downcast().ok().map(|b| *b)
    }

    /// Indicates whether any value is stored under the given `key`.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Returns the name of the feature in progress.
    #[must_use]
    pub fn feature(&self) -> Option<&str> {
        self.feature.as_deref()
    }

    /// Returns the scenario in progress.
    #[must_use]
    pub fn scenario(&self) -> Option<&ScenarioRef> {
        self.scenario.as_ref()
    }

    /// Returns the step in progress.
    #[must_use]
    pub fn step(&self) -> Option<&StepRef> {
        self.step.as_ref()
    }

    /// Creates a runtime [`Exception`] pointing at the feature, scenario and
    /// step in progress.
    ///
    /// Return it from a step callback to fail the step.
    #[must_use]
    pub fn exception(&self, message: impl Into<String>) -> Exception {
        self.locate(Exception::runtime(message))
    }

    /// Drops every stored value and forgets the progress.
    pub fn clear(&mut self) {
        self.values.clear();
        self.feature = None;
        self.scenario = None;
        self.step = None;
    }

    /// Fills the identity of the given [`Exception`] with the progress, keeping
    /// whatever it already has.
    pub(crate) fn locate(&self, e: Exception) -> Exception {
        e.or_identity(
            self.feature.as_ref(),
            self.scenario.as_ref(),
            self.step.as_ref(),
        )
    }

    pub(crate) fn enter_feature(&mut self, name: &str) {
        self.feature = Some(name.to_owned());
        self.scenario = None;
        self.step = None;
    }

    pub(crate) fn enter_scenario(&mut self, scenario: ScenarioRef) {
        self.scenario = Some(scenario);
        self.step = None;
    }

    pub(crate) fn enter_step(&mut self, step: StepRef) {
        self.step = Some(step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stores_typed_values() {
        let mut handle = Handle::default();

        assert!(!handle.insert("count", 1_u32));
        assert!(handle.insert("count", 2_u32));
        assert_eq!(handle.get::<u32>("count"), Some(&2));
        assert_eq!(handle.get::<i64>("count"), None);

        *handle.get_mut::<u32>("count").unwrap() += 1;
        assert_eq!(handle.get::<u32>("count"), Some(&3));
    }

    #[test]
    fn remove_respects_type() {
        let mut handle = Handle::default();
        _ = handle.insert("name", String::from("Go"));

        assert_eq!(handle.remove::<u32>("name"), None);
        assert!(handle.contains("name"));
        assert_eq!(handle.remove::<String>("name").as_deref(), Some("Go"));
        assert!(!handle.contains("name"));
    }

    #[test]
    fn exceptions_point_at_progress() {
        let mut handle = Handle::default();
        handle.enter_feature("F");
        handle.enter_scenario(ScenarioRef { id: 3, name: "S".into() });
        handle.enter_step(StepRef { id: 1, text: "do it".into() });

        let e = handle.exception("nope");
        assert_eq!(e.feature(), Some("F"));
        assert_eq!(e.scenario().map(|s| s.id), Some(3));
        assert_eq!(e.step().map(|s| s.text.as_str()), Some("do it"));
        assert_eq!(e.message(), "nope");
    }

    #[test]
    fn clear_resets_everything() {
        let mut handle = Handle::default();
        _ = handle.insert("k", ());
        handle.enter_feature("F");

        handle.clear();
        assert!(!handle.contains("k"));
        assert!(handle.feature().is_none());
    }
}
