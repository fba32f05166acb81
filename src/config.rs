// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Engine`] configuration.
//!
//! [`Engine`]: crate::Engine

use smart_default::SmartDefault;

use crate::cli;

/// Configuration of an [`Engine`].
///
/// [`Engine`]: crate::Engine
#[derive(Clone, Debug, SmartDefault)]
pub struct Config {
    /// Glob, file or directory to look for `.feature` files in.
    ///
    /// Nothing is run while it's [`None`], except features added directly.
    pub spec_location: Option<String>,

    /// Tags selecting features and scenarios to run.
    ///
    /// Everything is run while it's empty.
    pub tags: Vec<String>,

    /// Whether panics raised inside step callbacks fail the step instead of
    /// unwinding out of the run.
    #[default(true)]
    pub catch_panics: bool,
}

impl<Custom: cli::Args> From<cli::Opts<Custom>> for Config {
    fn from(opts: cli::Opts<Custom>) -> Self {
        Self {
            spec_location: opts.input,
            tags: opts.tags,
            catch_panics: !opts.no_catch_panics,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::cli;

    use super::Config;

    #[test]
    fn catches_panics_by_default() {
        let config = Config::default();

        assert!(config.catch_panics);
        assert!(config.tags.is_empty());
        assert!(config.spec_location.is_none());
    }

    #[test]
    fn takes_cli_options() {
        let opts = cli::Opts::<cli::Empty> {
            input: Some("features".into()),
            tags: vec!["smoke".into()],
            no_catch_panics: true,
            custom: cli::Empty,
        };
        let config = Config::from(opts);

        assert_eq!(config.spec_location.as_deref(), Some("features"));
        assert_eq!(config.tags, ["smoke"]);
        assert!(!config.catch_panics);
    }
}
