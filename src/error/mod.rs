// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Error taxonomy of building and running features.
//!
//! - [`BuildError`]: malformed patterns, hook titles or argument shapes.
//! - [`MatchError`]: step text resolving to zero or several callbacks.
//! - [`SourceError`]: failures locating or parsing `.feature` files.
//! - [`ErrorKind::Runtime`]: a step callback failed.
//!
//! Each of them reaches the caller wrapped into an [`Exception`], carrying the
//! feature, scenario and step in progress along with a trace.
//!
//! [`MatchError`]: crate::step::MatchError

mod build;
mod exception;
mod source;

pub use self::{
    build::BuildError,
    exception::{ErrorKind, Exception, ScenarioRef, StepRef},
    source::SourceError,
};
