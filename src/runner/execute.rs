// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Running built [`Feature`]s.
//!
//! A failing [`Step`] fails its [`Scenario`] and skips every step after it,
//! but never stops other scenarios or features from running.

use crate::{error::Exception, panic_trap, Handle};

use super::{Feature, Scenario, Status, Step};

impl Step {
    /// Runs this [`Step`] against the given [`Handle`], settling its
    /// [`Status`].
    ///
    /// Panics are caught if `catch_panics` is `true`.
    ///
    /// # Errors
    ///
    /// If the callback returns an error or panics. The error is coerced into
    /// an [`Exception`] pointing at the step in progress, unless it already
    /// is one.
    pub fn run(
        &mut self,
        handle: &mut Handle,
        catch_panics: bool,
    ) -> Result<(), Exception> {
        handle.enter_step(self.identity());
        tracing::info!(id = self.id, "Step: {}", self.text);

        let callback = &self.binding.callback;
        let params = &self.params;
        let res = panic_trap::trap(catch_panics, || callback(handle, params))
            .map_err(Exception::panicked)
            .and_then(|r| r.map_err(Exception::coerce))
            .map_err(|e| handle.locate(e));

        match res {
            Ok(()) => {
                self.settle(Status::Pass);
                Ok(())
            }
            Err(e) => {
                self.settle(Status::Fail);
                tracing::error!(
                    step = %self.text,
                    pattern = self.binding.regex.as_str(),
                    "{}\n{}",
                    e.message(),
                    e.trace(),
                );
                Err(e)
            }
        }
    }

    fn skip(&mut self) {
        self.settle(Status::Skip);
        tracing::info!(id = self.id, "Skip: {}", self.text);
    }
}

impl Scenario {
    /// Runs the [`Step`]s of this [`Scenario`] in order, stopping at the first
    /// failing one and skipping the rest.
    ///
    /// Returns the failure, if any.
    pub fn run(
        &mut self,
        handle: &mut Handle,
        catch_panics: bool,
    ) -> Option<Exception> {
        handle.enter_scenario(self.identity());
        tracing::info!(
            "{}.{}",
            handle.feature().unwrap_or_default(),
            self.name,
        );

        let mut failure = None;
        for step in &mut self.steps {
            if failure.is_some() {
                step.skip();
            } else if let Err(e) = step.run(handle, catch_panics) {
                failure = Some(e);
            }
        }

        self.status =
            if failure.is_some() { Status::Fail } else { Status::Pass };
        failure
    }
}

impl Feature {
    /// Runs every [`Scenario`] of this [`Feature`] in order.
    ///
    /// Returns the failures of the scenarios, in order.
    pub fn run(
        &mut self,
        handle: &mut Handle,
        catch_panics: bool,
    ) -> Vec<Exception> {
        handle.enter_feature(&self.name);
        tracing::info!(
            scenarios = self.scenarios.len(),
            "Feature: {}",
            self.name,
        );

        let failures = self
            .scenarios
            .iter_mut()
            .filter_map(|sc| sc.run(handle, catch_panics))
            .collect::<Vec<_>>();

        self.status =
            if failures.is_empty() { Status::Pass } else { Status::Fail };
        failures
    }
}

#[cfg(test)]
mod tests {
    use std::{cell::RefCell, rc::Rc};

    use crate::{
        error::ErrorKind,
        runner::{build_feature, Status},
        step::{Collection, Params},
        tag::TagFilter,
        test_utils::parse,
        Handle,
    };

    const FEATURE: &str = "\
Feature: kitchen

  Scenario: cook
    Given an oven
    When it burns
    Then dinner is served

  Scenario: serve
    Given an oven
    Then dinner is served
";

    fn collection(log: &Rc<RefCell<Vec<String>>>) -> Collection {
        let mut steps = Collection::new();
        let oven = Rc::clone(log);
        steps
            .register("^an oven$", move |h: &mut Handle, _: &Params| {
                oven.borrow_mut().push("oven".into());
                _ = h.insert("oven", 180_u32);
                Ok(())
            })
            .unwrap();
        steps
            .register("^it burns$", |h: &mut Handle, _: &Params| {
                Err(h.exception("smoke everywhere").into())
            })
            .unwrap();
        let served = Rc::clone(log);
        steps
            .register("^dinner is served$", move |h: &mut Handle, _: &Params| {
                assert_eq!(h.get::<u32>("oven"), Some(&180));
                served.borrow_mut().push("served".into());
                Ok(())
            })
            .unwrap();
        steps
    }

    #[test]
    fn failure_skips_the_rest_of_its_scenario_only() {
        let log = Rc::default();
        let feature = parse(FEATURE);
        let mut built =
            build_feature(&feature, &collection(&log), &TagFilter::default())
                .unwrap()
                .unwrap();

        let mut handle = Handle::default();
        let failures = built.run(&mut handle, true);

        assert_eq!(built.status(), Status::Fail);
        let statuses = |i: usize| {
            built.scenarios[i]
                .steps
                .iter()
                .map(|s| s.status())
                .collect::<Vec<_>>()
        };
        assert_eq!(statuses(0), [Status::Pass, Status::Fail, Status::Skip]);
        assert_eq!(statuses(1), [Status::Pass, Status::Pass]);
        assert_eq!(built.scenarios[0].status(), Status::Fail);
        assert_eq!(built.scenarios[1].status(), Status::Pass);
        assert_eq!(*log.borrow(), ["oven", "oven", "served"]);

        assert_eq!(failures.len(), 1);
        let failure = &failures[0];
        assert_eq!(failure.message(), "smoke everywhere");
        assert_eq!(failure.feature(), Some("kitchen"));
        assert_eq!(failure.scenario().map(|s| s.id), Some(0));
        assert_eq!(
            failure.step().map(|s| s.text.as_str()),
            Some("it burns"),
        );
    }

    #[test]
    fn foreign_errors_and_panics_are_coerced() {
        let mut steps = Collection::new();
        steps
            .register("^broken$", |_: &mut Handle, _: &Params| {
                Err(anyhow::anyhow!("disk full").context("writing report"))
            })
            .unwrap();
        steps
            .register("^panicking$", |_: &mut Handle, _: &Params| {
                panic!("boom")
            })
            .unwrap();
        let feature = parse(
            "Feature: f\n\n  Scenario: a\n    Given broken\n\n  \
             Scenario: b\n    Given panicking\n",
        );
        let mut built = build_feature(&feature, &steps, &TagFilter::default())
            .unwrap()
            .unwrap();

        let failures = built.run(&mut Handle::default(), true);

        let messages: Vec<_> = failures.iter().map(|e| e.message()).collect();
        assert_eq!(messages, ["writing report: disk full", "boom"]);
        for e in &failures {
            assert!(matches!(e.kind(), ErrorKind::Runtime { .. }));
            assert_eq!(e.step().map(|s| s.id), Some(0));
        }
        assert_eq!(failures[1].scenario().map(|s| s.name.as_str()), Some("b"));
        assert!(
            failures[1]
                .trace()
                .starts_with(&format!("panicked at {}:", file!())),
            "trace misses panic site: {}",
            failures[1].trace(),
        );
    }

    #[test]
    fn empty_feature_passes() {
        let feature = parse("Feature: nothing\n");
        let mut built =
            build_feature(&feature, &Collection::new(), &TagFilter::default())
                .unwrap()
                .unwrap();

        assert!(built.run(&mut Handle::default(), true).is_empty());
        assert_eq!(built.status(), Status::Pass);
    }
}
