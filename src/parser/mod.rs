// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Tools for locating and parsing [Gherkin] files.
//!
//! [Gherkin]: https://cucumber.io/docs/gherkin/reference

pub mod basic;

use std::path::{Path, PathBuf};

use crate::error::SourceError;

#[doc(inline)]
pub use self::basic::Basic;

/// Source of parsed [`Feature`]s.
///
/// [`Feature`]: gherkin::Feature
pub trait Parser {
    /// Resolves the given spec `location` into concrete `.feature` files.
    ///
    /// # Errors
    ///
    /// If the `location` can't be searched.
    fn locate(&self, location: &str) -> Result<Vec<PathBuf>, SourceError>;

    /// Parses a single `.feature` file.
    ///
    /// # Errors
    ///
    /// If the file is unreadable or isn't valid Gherkin.
    fn parse(&self, path: &Path) -> Result<gherkin::Feature, SourceError>;
}
