// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors of building runnable features out of parsed ones.

use std::num::ParseIntError;

use derive_more::with_trait::{Display, Error};

use crate::step::ArgKind;

/// Error of compiling patterns, resolving hooks or binding steps.
///
/// Not recoverable: aborts the whole run.
#[derive(Clone, Debug, Display, Error)]
pub enum BuildError {
    /// Step pattern is not a valid [`Regex`].
    ///
    /// [`Regex`]: regex::Regex
    #[display("Invalid step pattern `{pattern}`: {source}")]
    Pattern {
        /// Pattern failed to compile.
        pattern: String,

        /// Compilation error.
        source: regex::Error,
    },

    /// Step pattern declares a number of capture groups different from the one
    /// its callback [`Signature`] expects.
    ///
    /// [`Signature`]: crate::step::Signature
    #[display(
        "Step pattern `{pattern}` declares {found} capture groups, but its \
         callback expects {expected}"
    )]
    Signature {
        /// Registered pattern.
        pattern: String,

        /// Capture groups count the callback expects.
        expected: usize,

        /// Capture groups count the pattern declares.
        found: usize,
    },

    /// Hook title has a malformed head.
    #[display("Invalid hook title [{title}]")]
    HookTitle {
        /// Scenario title.
        title: String,
    },

    /// Hook title names a key other than `before` or `after`.
    #[display("Find unsupported hook key [{key}] in [{title}]")]
    HookKey {
        /// Scenario title.
        title: String,

        /// Lowercased key.
        key: String,
    },

    /// Hook priority is not an integer.
    #[display("Invalid hook title [{title}]: {source}")]
    HookPriority {
        /// Scenario title.
        title: String,

        /// Integer parsing error.
        source: ParseIntError,
    },

    /// Hook body is not a valid [`Regex`].
    ///
    /// [`Regex`]: regex::Regex
    #[display("Invalid hook title [{title}]: {source}")]
    HookPattern {
        /// Scenario title.
        title: String,

        /// Compilation error.
        source: regex::Error,
    },

    /// Step's structural argument doesn't fit its callback [`Signature`].
    ///
    /// [`Signature`]: crate::step::Signature
    #[display(
        "Step [{text}] carries {found}, but callback `{pattern}` expects \
         {expected}"
    )]
    Argument {
        /// Step text.
        text: String,

        /// Pattern of the resolved callback.
        pattern: String,

        /// Declared argument kind.
        expected: ArgKind,

        /// Argument kind the step carries.
        found: ArgKind,
    },
}
