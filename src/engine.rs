// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Top-level [`Engine`] running [Gherkin] features against registered steps.
//!
//! [Gherkin]: https://cucumber.io/docs/gherkin/reference

use std::path::PathBuf;

use crate::{
    cli,
    error::Exception,
    parser::{self, Parser},
    runner::{build_feature, Report},
    step::{Collection, Params, Signature},
    tag::TagFilter,
    Config, Handle,
};

/// Top-level executor of [Gherkin] features.
///
/// Owns the registered steps, the [`Config`] and the execution [`Handle`]
/// shared by every step callback.
///
/// # Example
///
/// ```rust,no_run
/// # use stepwise::Engine;
/// #
/// let mut engine = Engine::new();
/// engine
///     .register_step(r"^I have (\d+) cucumbers$", |h, params| {
///         let count: u32 = params.parse(0)?;
///         _ = h.insert("cucumbers", count);
///         Ok(())
///     })
///     .unwrap();
/// engine.set_spec_location("tests/features").unwrap();
///
/// if let Err(e) = engine.run() {
///     eprintln!("{e}");
/// }
/// ```
///
/// [Gherkin]: https://cucumber.io/docs/gherkin/reference
#[derive(Debug)]
pub struct Engine<P = parser::Basic> {
    steps: Collection,
    config: Config,
    parser: P,
    files: Option<Vec<PathBuf>>,
    features: Vec<gherkin::Feature>,
    handle: Handle,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates a new [`Engine`] with the default [`Config`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Creates a new [`Engine`] with the given [`Config`].
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self {
            steps: Collection::new(),
            config,
            parser: parser::Basic,
            files: None,
            features: Vec::new(),
            handle: Handle::default(),
        }
    }

    /// Creates a new [`Engine`] configured with the given [`cli::Opts`].
    #[must_use]
    pub fn with_cli<Custom: cli::Args>(opts: cli::Opts<Custom>) -> Self {
        Self::with_config(opts.into())
    }
}

impl<P> Engine<P> {
    /// Replaces the [`Parser`] locating and parsing `.feature` files.
    #[must_use]
    pub fn with_parser<NewP: Parser>(self, parser: NewP) -> Engine<NewP> {
        let Self { steps, config, files, features, handle, .. } = self;
        Engine { steps, config, parser, files, features, handle }
    }

    /// Registers a step `callback` for step texts matching the given regex
    /// `pattern`, expecting no structural argument.
    ///
    /// # Errors
    ///
    /// If the `pattern` is not a valid regex.
    pub fn register_step<F>(
        &mut self,
        pattern: &str,
        callback: F,
    ) -> Result<(), Exception>
    where
        F: Fn(&mut Handle, &Params) -> anyhow::Result<()> + 'static,
    {
        self.steps.register(pattern, callback).map_err(Exception::new)
    }

    /// Registers a step `callback` for step texts matching the given regex
    /// `pattern`, declaring the [`Signature`] it expects.
    ///
    /// # Errors
    ///
    /// If the `pattern` is not a valid regex, or doesn't fit the
    /// [`Signature`].
    pub fn register_step_with<F>(
        &mut self,
        pattern: &str,
        signature: Signature,
        callback: F,
    ) -> Result<(), Exception>
    where
        F: Fn(&mut Handle, &Params) -> anyhow::Result<()> + 'static,
    {
        self.steps
            .register_with(pattern, signature, callback)
            .map_err(Exception::new)
    }

    /// Returns the registered steps.
    #[must_use]
    pub fn steps(&self) -> &Collection {
        &self.steps
    }

    /// Returns the current [`Config`].
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the execution [`Handle`], as left by the last run.
    #[must_use]
    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    /// Adds an already parsed [`gherkin::Feature`] to be run after the ones
    /// found at the spec location.
    pub fn add_feature(&mut self, feature: gherkin::Feature) {
        self.features.push(feature);
    }

    /// Replaces the tags selecting features and scenarios to run.
    ///
    /// An empty list selects everything.
    pub fn set_tag_filter<I, S>(&mut self, tags: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.config.tags = tags.into_iter().map(Into::into).collect();
    }
}

impl<P: Parser> Engine<P> {
    /// Sets the glob, file or directory to look for `.feature` files in, and
    /// resolves it right away.
    ///
    /// Returns the files found, sorted. Finding none is not an error.
    ///
    /// # Errors
    ///
    /// If the `location` can't be searched.
    pub fn set_spec_location(
        &mut self,
        location: impl Into<String>,
    ) -> Result<Vec<PathBuf>, Exception> {
        let location = location.into();
        let files = self.locate(&location)?;
        self.config.spec_location = Some(location);
        self.files = Some(files.clone());
        Ok(files)
    }

    /// Runs every selected feature, collecting failures instead of stopping
    /// at them.
    ///
    /// The [`Handle`] is cleared first. Every feature is built before any of
    /// them runs, so a build error runs nothing.
    ///
    /// # Errors
    ///
    /// If `.feature` files can't be located or parsed, a hook title is
    /// malformed, or a step can't be bound.
    pub fn execute(&mut self) -> Result<Report, Exception> {
        self.handle.clear();

        let files = match (&self.files, &self.config.spec_location) {
            (Some(files), _) => files.clone(),
            (None, Some(location)) => self.locate(location)?,
            (None, None) => Vec::new(),
        };
        let parsed = files
            .iter()
            .map(|path| self.parser.parse(path))
            .collect::<Result<Vec<_>, _>>()?;

        let filter = TagFilter::new(&self.config.tags);
        let mut built = Vec::new();
        for feature in parsed.iter().chain(&self.features) {
            if let Some(f) = build_feature(feature, &self.steps, &filter)? {
                built.push(f);
            }
        }

        let mut failures = Vec::new();
        for feature in &mut built {
            failures.extend(
                feature.run(&mut self.handle, self.config.catch_panics),
            );
        }

        let report = Report::new(built, failures);
        tracing::info!("{}", report.stats());
        Ok(report)
    }

    /// Runs every selected feature, like [`Engine::execute()`] does.
    ///
    /// # Errors
    ///
    /// With the first captured failure if anything failed, or if the run
    /// couldn't start at all. See [`Engine::execute()`] for details.
    pub fn run(&mut self) -> Result<(), Exception> {
        self.execute()?.into_first_failure().map_or(Ok(()), Err)
    }

    fn locate(&self, location: &str) -> Result<Vec<PathBuf>, Exception> {
        tracing::info!(location, "locating feature files");
        Ok(self.parser.locate(location)?)
    }
}
