// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Positional parameters handed to step callbacks and their declared shape.

use std::{fmt, str::FromStr};

use anyhow::{anyhow, Context as _};
use derive_more::with_trait::{Deref, Display};
use linked_hash_map::LinkedHashMap;

/// Single record of a multi-column data table, keyed by the header row.
///
/// Iteration follows the column order of the table.
pub type Record = LinkedHashMap<String, String>;

/// Kind of the structural argument (data table or doc string) attached to a
/// step.
#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum ArgKind {
    /// No structural argument.
    #[display("no argument")]
    None,

    /// One-column data table, bound as a flat list of every row.
    #[display("single-column table")]
    List,

    /// Multi-column data table, bound as records keyed by the header row.
    #[display("multi-column table")]
    Records,

    /// Doc string block.
    #[display("doc string")]
    Doc,

    /// Anything, including nothing.
    ///
    /// Only meaningful in a [`Signature`].
    #[display("any argument")]
    Any,
}

impl ArgKind {
    /// Checks whether a step carrying `found` satisfies this declared kind.
    #[must_use]
    pub fn accepts(self, found: Self) -> bool {
        self == Self::Any || self == found
    }
}

/// Shape of the [`Params`] a step callback expects, declared when the
/// callback is registered.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Signature {
    /// Expected number of capture groups in the pattern.
    ///
    /// [`None`] accepts whatever the pattern declares.
    pub captures: Option<usize>,

    /// Expected structural argument.
    pub argument: ArgKind,
}

impl Default for Signature {
    fn default() -> Self {
        Self { captures: None, argument: ArgKind::None }
    }
}

impl Signature {
    /// Creates a [`Signature`] accepting any number of captures and no
    /// structural argument.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires the pattern to declare exactly `count` capture groups.
    #[must_use]
    pub const fn captures(mut self, count: usize) -> Self {
        self.captures = Some(count);
        self
    }

    /// Requires the given structural argument.
    #[must_use]
    pub const fn argument(mut self, kind: ArgKind) -> Self {
        self.argument = kind;
        self
    }
}

/// Single positional parameter of a step callback.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Param {
    /// Regex capture group.
    Capture(String),

    /// Flat list of cells of a one-column data table.
    List(Vec<String>),

    /// Records of a multi-column data table.
    Records(Vec<Record>),

    /// Doc string block.
    Doc(String),
}

impl Param {
    /// Returns the [`ArgKind`] this parameter stands for, if it's a structural
    /// one.
    #[must_use]
    pub fn kind(&self) -> ArgKind {
        match self {
            Self::Capture(_) => ArgKind::None,
            Self::List(_) => ArgKind::List,
            Self::Records(_) => ArgKind::Records,
            Self::Doc(_) => ArgKind::Doc,
        }
    }
}

/// Ordered parameters of a bound step: capture groups in capture order,
/// followed by the structural argument, if any.
///
/// The execution [`Handle`] is not part of it, being always passed first and
/// separately.
///
/// [`Handle`]: crate::Handle
#[derive(Clone, Debug, Default, Deref, Eq, PartialEq)]
pub struct Params(Vec<Param>);

impl Params {
    /// Assembles [`Params`] from `captures` and an optional structural
    /// `argument`, appended last.
    #[must_use]
    pub fn new(captures: Vec<String>, argument: Option<Param>) -> Self {
        Self(
            captures
                .into_iter()
                .map(Param::Capture)
                .chain(argument)
                .collect(),
        )
    }

    /// Returns the `n`-th capture group (0-based, whole match excluded).
    #[must_use]
    pub fn capture(&self, n: usize) -> Option<&str> {
        self.captures().nth(n)
    }

    /// Iterates over capture groups only.
    pub fn captures(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().filter_map(|p| match p {
            Param::Capture(s) => Some(s.as_str()),
            Param::List(_) | Param::Records(_) | Param::Doc(_) => None,
        })
    }

    /// Parses the `n`-th capture group into a `T`.
    ///
    /// # Errors
    ///
    /// If there is no such capture or it fails to parse.
    pub fn parse<T>(&self, n: usize) -> anyhow::Result<T>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let raw = self
            .capture(n)
            .ok_or_else(|| anyhow!("no capture group #{n}"))?;
        raw.parse::<T>()
            .map_err(|e| anyhow!("{e}"))
            .with_context(|| {
                format!(
                    "failed to parse capture #{n} `{raw}` as `{}`",
                    std::any::type_name::<T>(),
                )
            })
    }

    /// Returns the list bound from a one-column data table.
    #[must_use]
    pub fn list(&self) -> Option<&[String]> {
        self.0.iter().find_map(|p| match p {
            Param::List(l) => Some(l.as_slice()),
            Param::Capture(_) | Param::Records(_) | Param::Doc(_) => None,
        })
    }

    /// Returns the records bound from a multi-column data table.
    #[must_use]
    pub fn records(&self) -> Option<&[Record]> {
        self.0.iter().find_map(|p| match p {
            Param::Records(r) => Some(r.as_slice()),
            Param::Capture(_) | Param::List(_) | Param::Doc(_) => None,
        })
    }

    /// Returns the bound doc string.
    #[must_use]
    pub fn doc(&self) -> Option<&str> {
        self.0.iter().find_map(|p| match p {
            Param::Doc(d) => Some(d.as_str()),
            Param::Capture(_) | Param::List(_) | Param::Records(_) => None,
        })
    }
}
