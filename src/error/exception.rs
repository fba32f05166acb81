// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Structured [`Exception`] reported for any failure of a run.

use std::{backtrace::Backtrace, error::Error as StdError, fmt};

use derive_more::with_trait::{Display, Error, From};

use crate::{panic_trap::PanicDetails, step::MatchError};

use super::{BuildError, SourceError};

/// Kind of an [`Exception`].
#[derive(Debug, Display, Error, From)]
pub enum ErrorKind {
    /// See [`BuildError`].
    #[display("{_0}")]
    Build(BuildError),

    /// See [`MatchError`].
    #[display("{_0}")]
    Match(MatchError),

    /// See [`SourceError`].
    #[display("{_0}")]
    Source(SourceError),

    /// Step callback failed.
    #[display("{message}")]
    #[from(ignore)]
    Runtime {
        /// Failure message.
        message: String,
    },
}

/// Identity of a [`Scenario`] in progress.
///
/// [`Scenario`]: crate::runner::Scenario
#[derive(Clone, Debug, Display, Eq, PartialEq)]
#[display("#{id} {name}")]
pub struct ScenarioRef {
    /// Position of the scenario inside its feature.
    pub id: usize,

    /// Name of the scenario.
    pub name: String,
}

/// Identity of a [`Step`] in progress.
///
/// [`Step`]: crate::runner::Step
#[derive(Clone, Debug, Display, Eq, PartialEq)]
#[display("#{id} {text}")]
pub struct StepRef {
    /// Position of the step inside its scenario.
    pub id: usize,

    /// Resolved step text.
    pub text: String,
}

/// Failure captured while building or running features.
///
/// Retains the feature, scenario and step in progress at the moment of
/// failure, and a trace usable for postmortem reporting.
#[derive(Debug)]
pub struct Exception {
    kind: ErrorKind,
    feature: Option<String>,
    scenario: Option<ScenarioRef>,
    step: Option<StepRef>,
    trace: String,
}

impl Exception {
    /// Creates a new [`Exception`] of the given `kind` without any identity,
    /// capturing the current trace.
    #[must_use]
    pub fn new(kind: impl Into<ErrorKind>) -> Self {
        Self {
            kind: kind.into(),
            feature: None,
            scenario: None,
            step: None,
            trace: Backtrace::force_capture().to_string(),
        }
    }

    /// Creates a new [`ErrorKind::Runtime`] [`Exception`].
    #[must_use]
    pub fn runtime(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Runtime { message: message.into() })
    }

    /// Creates a new [`ErrorKind::Runtime`] [`Exception`] out of a panic
    /// caught in a step callback.
    ///
    /// The trace is the one recorded at the panic site, prefixed with its
    /// location.
    #[must_use]
    pub fn panicked(details: PanicDetails) -> Self {
        let PanicDetails { payload, location, trace } = details;
        let mut exception = Self::runtime(payload);
        exception.trace = match location {
            Some(at) => format!("panicked at {at}\n{trace}"),
            None => trace,
        };
        exception
    }

    /// Coerces an arbitrary step callback error into an [`Exception`].
    ///
    /// An [`Exception`] is passed through as is, anything else becomes an
    /// [`ErrorKind::Runtime`] keeping the whole context chain as its message.
    #[must_use]
    pub fn coerce(err: anyhow::Error) -> Self {
        match err.downcast::<Self>() {
            Ok(e) => e,
            Err(other) => Self::runtime(format!("{other:#}")),
        }
    }

    /// Sets the feature in progress.
    #[must_use]
    pub fn in_feature(mut self, name: impl Into<String>) -> Self {
        self.feature = Some(name.into());
        self
    }

    /// Sets the scenario in progress.
    #[must_use]
    pub fn in_scenario(mut self, scenario: ScenarioRef) -> Self {
        self.scenario = Some(scenario);
        self
    }

    /// Sets the step in progress.
    #[must_use]
    pub fn in_step(mut self, step: StepRef) -> Self {
        self.step = Some(step);
        self
    }

    /// Fills in the identity parts not set yet.
    pub(crate) fn or_identity(
        mut self,
        feature: Option<&String>,
        scenario: Option<&ScenarioRef>,
        step: Option<&StepRef>,
    ) -> Self {
        self.feature = self.feature.or_else(|| feature.cloned());
        self.scenario = self.scenario.or_else(|| scenario.cloned());
        self.step = self.step.or_else(|| step.cloned());
        self
    }

    /// Returns the [`ErrorKind`] of this [`Exception`].
    #[must_use]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Returns the failure message.
    #[must_use]
    pub fn message(&self) -> String {
        self.kind.to_string()
    }

    /// Returns the name of the feature in progress, if any.
    #[must_use]
    pub fn feature(&self) -> Option<&str> {
        self.feature.as_deref()
    }

    /// Returns the scenario in progress, if any.
    #[must_use]
    pub fn scenario(&self) -> Option<&ScenarioRef> {
        self.scenario.as_ref()
    }

    /// Returns the step in progress, if any.
    #[must_use]
    pub fn step(&self) -> Option<&StepRef> {
        self.step.as_ref()
    }

    /// Returns the trace captured on creation, or at the panic site for
    /// [`Exception::panicked()`].
    #[must_use]
    pub fn trace(&self) -> &str {
        &self.trace
    }
}

impl fmt::Display for Exception {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(feature) = &self.feature {
            write!(f, "\n  feature: {feature}")?;
        }
        if let Some(scenario) = &self.scenario {
            write!(f, "\n  scenario: {scenario}")?;
        }
        if let Some(step) = &self.step {
            write!(f, "\n  step: {step}")?;
        }
        Ok(())
    }
}

impl StdError for Exception {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        Some(&self.kind)
    }
}

impl From<BuildError> for Exception {
    fn from(e: BuildError) -> Self {
        Self::new(e)
    }
}

impl From<MatchError> for Exception {
    fn from(e: MatchError) -> Self {
        Self::new(e)
    }
}

impl From<SourceError> for Exception {
    fn from(e: SourceError) -> Self {
        Self::new(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn displays_identity() {
        let e = Exception::runtime("boom")
            .in_feature("Greeting")
            .in_scenario(ScenarioRef { id: 1, name: "hello".into() })
            .in_step(StepRef { id: 2, text: "Hello World".into() });

        assert_eq!(
            e.to_string(),
            "boom\n  feature: Greeting\n  scenario: #1 hello\n  step: #2 Hello World",
        );
        assert_eq!(e.message(), "boom");
        assert!(!e.trace().is_empty());
    }

    #[test]
    fn identity_set_first_wins() {
        let e = Exception::runtime("x").in_feature("own").or_identity(
            Some(&"other".to_owned()),
            Some(&ScenarioRef { id: 0, name: "s".into() }),
            None,
        );

        assert_eq!(e.feature(), Some("own"));
        assert_eq!(e.scenario().map(|s| s.name.as_str()), Some("s"));
        assert!(e.step().is_none());
    }

    #[test]
    fn coerces_foreign_errors() {
        let err = anyhow::anyhow!("root").context("outer");
        let e = Exception::coerce(err);
        assert!(matches!(e.kind(), ErrorKind::Runtime { .. }));
        assert_eq!(e.message(), "outer: root");
    }

    #[test]
    fn passes_exceptions_through() {
        let original = Exception::runtime("mine").in_feature("F");
        let e = Exception::coerce(original.into());
        assert_eq!(e.message(), "mine");
        assert_eq!(e.feature(), Some("F"));
    }
}
