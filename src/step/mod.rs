// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Registry of step callbacks and the parameters they receive.
//!
//! - [`collection`]: [`Collection`] of callbacks bound to [`Regex`] patterns,
//!   resolving step text to exactly one of them.
//! - [`params`]: positional [`Params`] envelope and the [`Signature`] a
//!   callback declares on registration.
//! - [`error`]: [`MatchError`]s of resolution.
//! - [`regex`]: [`HashableRegex`] keying the [`Collection`].
//!
//! [`Regex`]: ::regex::Regex

pub mod collection;
pub mod error;
pub mod params;
pub mod regex;

pub use self::{
    collection::{Binding, Collection, Resolved, StepFn},
    error::{AmbiguousMatchError, MatchError},
    params::{ArgKind, Param, Params, Record, Signature},
    regex::HashableRegex,
};
