// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Outcome of a run.

use derive_more::with_trait::Display;

use crate::error::Exception;

use super::{Feature, Status};

/// Outcome of running a set of [`Feature`]s.
#[derive(Debug, Default)]
pub struct Report {
    features: Vec<Feature>,
    failures: Vec<Exception>,
}

impl Report {
    /// Creates a new [`Report`] out of the run [`Feature`]s and the failures
    /// captured along the way, in order.
    #[must_use]
    pub fn new(features: Vec<Feature>, failures: Vec<Exception>) -> Self {
        Self { features, failures }
    }

    /// Indicates whether nothing failed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }

    /// Returns the run [`Feature`]s, in order.
    #[must_use]
    pub fn features(&self) -> &[Feature] {
        &self.features
    }

    /// Returns every captured failure, in order.
    #[must_use]
    pub fn failures(&self) -> &[Exception] {
        &self.failures
    }

    /// Returns the first captured failure, if any.
    #[must_use]
    pub fn first_failure(&self) -> Option<&Exception> {
        self.failures.first()
    }

    /// Consumes this [`Report`] returning its first failure, if any.
    #[must_use]
    pub fn into_first_failure(self) -> Option<Exception> {
        self.failures.into_iter().next()
    }

    /// Counts the run features, scenarios and steps by their [`Status`].
    #[must_use]
    pub fn stats(&self) -> Summary {
        let mut summary = Summary::default();
        for f in &self.features {
            summary.features.record(f.status());
            for sc in &f.scenarios {
                summary.scenarios.record(sc.status());
                for step in &sc.steps {
                    summary.steps.record(step.status());
                }
            }
        }
        summary
    }
}

/// [`Stats`] of each level of a [`Report`].
#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq)]
#[display("{features} features\n{scenarios} scenarios\n{steps} steps")]
pub struct Summary {
    /// [`Stats`] of features.
    pub features: Stats,

    /// [`Stats`] of scenarios.
    pub scenarios: Stats,

    /// [`Stats`] of steps.
    pub steps: Stats,
}

/// Counters of [`Status`]es.
#[derive(Clone, Copy, Debug, Default, Display, Eq, PartialEq)]
#[display(
    "{} ({passed} passed, {skipped} skipped, {failed} failed)",
    passed + skipped + failed
)]
pub struct Stats {
    /// Number of passed items.
    pub passed: usize,

    /// Number of skipped items.
    pub skipped: usize,

    /// Number of failed items.
    pub failed: usize,
}

impl Stats {
    /// Returns the total number of counted items.
    #[must_use]
    pub fn total(&self) -> usize {
        self.passed + self.skipped + self.failed
    }

    fn record(&mut self, status: Status) {
        match status {
            Status::Pass => self.passed += 1,
            Status::Skip => self.skipped += 1,
            Status::Fail => self.failed += 1,
            Status::Wait => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Stats;

    #[test]
    fn stats_display() {
        let stats = Stats { passed: 3, skipped: 1, failed: 1 };

        assert_eq!(stats.total(), 5);
        assert_eq!(
            stats.to_string(),
            "5 (3 passed, 1 skipped, 1 failed)",
        );
    }
}
