// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Synchronous [Gherkin] step runner.
//!
//! Step callbacks are registered against regex patterns on an [`Engine`],
//! which then:
//! 1. locates and parses `.feature` files;
//! 2. selects features and scenarios by their tags;
//! 3. promotes scenarios titled `@before/<regex>`, `@after(<priority>)/<regex>`
//!    and alike into hooks, injecting their steps into every scenario whose
//!    name matches;
//! 4. expands scenario outlines into one scenario per examples row;
//! 5. binds every step text to exactly one callback, failing fast before
//!    anything runs;
//! 6. runs features, scenarios and steps strictly in order. A failing step
//!    fails its scenario and skips the rest of it, while other scenarios keep
//!    running.
//!
//! Every callback receives the shared execution [`Handle`] and the positional
//! [`Params`] of its step: capture groups followed by the data table or doc
//! string, if any.
//!
//! ```rust,no_run
//! # use stepwise::Engine;
//! #
//! let mut engine = Engine::new();
//! engine
//!     .register_step("^Hello (.*)$", |h, params| {
//!         let name = params.capture(0).unwrap_or_default().to_owned();
//!         _ = h.insert("greeted", name);
//!         Ok(())
//!     })
//!     .unwrap();
//! engine.set_spec_location("tests/features/**/*.feature").unwrap();
//!
//! let report = engine.execute().unwrap();
//! assert!(report.passed(), "{}", report.stats());
//! ```
//!
//! [Gherkin]: https://cucumber.io/docs/gherkin/reference
#![deny(nonstandard_style, trivial_casts, trivial_numeric_casts)]
#![forbid(non_ascii_idents, unsafe_code)]
#![warn(
    clippy::clone_on_ref_ptr,
    clippy::dbg_macro,
    clippy::expect_used,
    clippy::get_unwrap,
    clippy::pedantic,
    clippy::print_stderr,
    clippy::print_stdout,
    clippy::str_to_string,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_results
)]
#![cfg_attr(test, allow(clippy::unwrap_used, unused_results))]

pub mod binder;
pub mod cli;
pub mod config;
pub mod engine;
pub mod error;
pub mod feature;
pub mod handle;
pub mod hook;
pub mod panic_trap;
pub mod parser;
pub mod runner;
pub mod step;
pub mod tag;
#[cfg(test)]
mod test_utils;

pub use gherkin;

#[doc(inline)]
pub use self::{
    config::Config,
    engine::Engine,
    error::{ErrorKind, Exception},
    handle::Handle,
    parser::Parser,
    runner::{Report, Status},
    step::{ArgKind, Param, Params, Signature},
    tag::TagFilter,
};
