// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! CLI (command line interface) layer.
//!
//! # Example
//!
//! ```rust,no_run
//! # use stepwise::{cli, Engine};
//! #
//! #[derive(cli::Args)] // re-export of `clap::Args`
//! struct CustomOpts {
//!     /// Number of cucumbers in the basket.
//!     #[arg(long, default_value_t = 12)]
//!     cucumbers: u32,
//! }
//!
//! let opts = cli::Opts::<CustomOpts>::parsed();
//! let cucumbers = opts.custom.cucumbers;
//!
//! let mut engine = Engine::with_cli(opts);
//! engine
//!     .register_step("^a basket$", move |h, _| {
//!         _ = h.insert("cucumbers", cucumbers);
//!         Ok(())
//!     })
//!     .unwrap();
//! ```

pub use clap::{Args, Parser};

/// Root CLI of an [`Engine`], which may be extended with custom CLI options.
///
/// [`Engine`]: crate::Engine
#[derive(clap::Parser, Clone, Debug, Default)]
#[command(
    name = "stepwise",
    about = "Run Gherkin features against registered steps."
)]
pub struct Opts<Custom = Empty>
where
    Custom: Args,
{
    /// Glob, file or directory to look for `.feature` files in.
    #[arg(long, short, value_name = "glob")]
    pub input: Option<String>,

    /// Tags selecting features and scenarios to run.
    ///
    /// Something is run if it declares at least one of them.
    #[arg(long, short, value_name = "tag", value_delimiter = ',')]
    pub tags: Vec<String>,

    /// Lets panics raised inside steps propagate instead of failing the step.
    #[arg(long)]
    pub no_catch_panics: bool,

    /// Additional custom CLI options.
    #[command(flatten)]
    pub custom: Custom,
}

impl<Custom: Args> Opts<Custom> {
    /// Shortcut for [`clap::Parser::parse()`], which doesn't require the trait
    /// being imported.
    #[must_use]
    pub fn parsed() -> Self {
        <Self as clap::Parser>::parse()
    }
}

/// Empty CLI options.
#[derive(Args, Clone, Copy, Debug, Default)]
#[group(skip)]
pub struct Empty;
