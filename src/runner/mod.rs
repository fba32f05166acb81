// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Runnable tree of bound [`Feature`]s, [`Scenario`]s and [`Step`]s.
//!
//! - [`build`]: turns parsed [`gherkin::Feature`]s into runnable ones,
//!   applying the tag filter, hooks and outline expansion.
//! - [`execute`]: runs them in order, containing step failures to their
//!   scenario.
//! - [`report`]: outcome of a run.

pub mod build;
pub mod execute;
pub mod report;

use std::path::PathBuf;

use derive_more::with_trait::Display;

use crate::{
    error::{ScenarioRef, StepRef},
    feature::Example,
    step::{Binding, Params},
};

#[doc(inline)]
pub use self::{
    build::build_feature,
    report::{Report, Stats, Summary},
};

/// Status of a [`Step`], [`Scenario`] or [`Feature`].
///
/// Everything starts as [`Status::Wait`] and settles exactly once.
#[derive(Clone, Copy, Debug, Default, Display, Eq, Hash, PartialEq)]
pub enum Status {
    /// Not run yet.
    #[default]
    #[display("WAIT")]
    Wait,

    /// Passed.
    #[display("PASS")]
    Pass,

    /// Failed.
    #[display("FAIL")]
    Fail,

    /// Not run because an earlier step of the same scenario failed.
    ///
    /// Applies to [`Step`]s only.
    #[display("SKIP")]
    Skip,
}

/// [`gherkin::Step`] bound to its callback and parameters.
#[derive(Clone, Debug)]
pub struct Step {
    /// Position inside its [`Scenario`], contiguous from `0` in execution
    /// order.
    pub id: usize,

    /// Text with outline placeholders substituted.
    pub text: String,

    /// Callback resolved for the [`Step::text`].
    pub binding: Binding,

    /// Parameters passed to the callback after the execution [`Handle`].
    ///
    /// [`Handle`]: crate::Handle
    pub params: Params,

    status: Status,
}

impl Step {
    /// Creates a new [`Status::Wait`]ing [`Step`].
    #[must_use]
    pub fn new(
        id: usize,
        text: String,
        binding: Binding,
        params: Params,
    ) -> Self {
        Self { id, text, binding, params, status: Status::Wait }
    }

    /// Returns the [`Status`] of this [`Step`].
    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Returns the identity of this [`Step`] for [`Exception`]s.
    ///
    /// [`Exception`]: crate::Exception
    #[must_use]
    pub fn identity(&self) -> StepRef {
        StepRef { id: self.id, text: self.text.clone() }
    }

    fn settle(&mut self, status: Status) {
        debug_assert_eq!(self.status, Status::Wait, "step settled twice");
        self.status = status;
    }
}

/// Concrete scenario ready to run.
#[derive(Clone, Debug)]
pub struct Scenario {
    /// Position inside its [`Feature`], among the scenarios selected to run.
    pub id: usize,

    /// Name, with the [`Example`] appended for outline-derived scenarios.
    pub name: String,

    /// Description.
    pub description: Option<String>,

    /// [`Example`] row this [`Scenario`] was derived from, if any.
    pub example: Option<Example>,

    /// Steps in execution order: background, before hooks, own steps, after
    /// hooks.
    pub steps: Vec<Step>,

    status: Status,
}

impl Scenario {
    /// Returns the [`Status`] of this [`Scenario`].
    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }

    /// Returns the identity of this [`Scenario`] for [`Exception`]s.
    ///
    /// [`Exception`]: crate::Exception
    #[must_use]
    pub fn identity(&self) -> ScenarioRef {
        ScenarioRef { id: self.id, name: self.name.clone() }
    }
}

/// Feature ready to run.
#[derive(Clone, Debug)]
pub struct Feature {
    /// Name.
    pub name: String,

    /// Description.
    pub description: Option<String>,

    /// Path of the `.feature` file, if it was read from one.
    pub path: Option<PathBuf>,

    /// Scenarios selected to run, in declaration order.
    pub scenarios: Vec<Scenario>,

    status: Status,
}

impl Feature {
    /// Returns the [`Status`] of this [`Feature`].
    #[must_use]
    pub fn status(&self) -> Status {
        self.status
    }
}
