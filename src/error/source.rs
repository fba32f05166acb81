// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors of the collaborators locating and parsing `.feature` files.

use derive_more::with_trait::{Display, Error};

/// Failure to locate or parse specification files.
///
/// Aborts the whole run.
#[derive(Debug, Display, Error)]
pub enum SourceError {
    /// Location is not a valid glob.
    #[display("Invalid spec location `{pattern}`: {reason}")]
    Glob {
        /// Location as given.
        pattern: String,

        /// Why the glob was rejected.
        reason: String,
    },

    /// Walking the file system failed.
    #[display("Failed to search spec location `{pattern}`: {reason}")]
    Walk {
        /// Location as given.
        pattern: String,

        /// Underlying failure.
        reason: String,
    },

    /// `.feature` file is unreadable or malformed.
    #[display("Failed to parse feature: {_0}")]
    Parse(gherkin::ParseFileError),
}
