// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Helpers shared by unit tests.

/// Parses the given Gherkin `source` as a [`gherkin::Feature`].
///
/// # Panics
///
/// On malformed `source`.
pub(crate) fn parse(source: &str) -> gherkin::Feature {
    gherkin::Feature::parse(source, gherkin::GherkinEnv::default())
        .expect("failed to parse feature")
}
