// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! [`Scenario Outline`][1] expansion into concrete scenarios.
//!
//! [1]: https://cucumber.io/docs/gherkin/reference#scenario-outline

use derive_more::with_trait::Display;
use sealed::sealed;

/// `(column, cell)` pairs of a single [`Examples`] row, in column order.
///
/// [`Examples`]: gherkin::Examples
pub type Placeholders = Vec<(String, String)>;

/// Origin of an outline-derived scenario.
#[derive(Clone, Debug, Display, Eq, PartialEq)]
#[display("{name} | {index}")]
pub struct Example {
    /// Name of the [`Examples`] table, empty if unnamed.
    ///
    /// [`Examples`]: gherkin::Examples
    pub name: String,

    /// Position of the row inside its table, header excluded.
    pub index: usize,
}

/// Concrete scenario materialized out of a [`gherkin::Scenario`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Expansion {
    /// Name of the concrete scenario.
    pub name: String,

    /// [`Example`] row it was derived from, if it comes from an outline.
    pub example: Option<Example>,

    /// Values to substitute into `<column>` placeholders.
    pub placeholders: Placeholders,

    /// Tags of the [`Examples`] table the row belongs to.
    ///
    /// [`Examples`]: gherkin::Examples
    pub tags: Vec<String>,
}

/// Helper methods to operate on [`gherkin::Scenario`]s.
#[sealed]
pub trait ScenarioExt {
    /// Indicates whether this is a [`Scenario Outline`][1].
    ///
    /// [1]: https://cucumber.io/docs/gherkin/reference#scenario-outline
    #[must_use]
    fn is_outline(&self) -> bool;

    /// Expands this scenario into concrete [`Expansion`]s.
    ///
    /// A plain scenario yields exactly one [`Expansion`] with no
    /// placeholders. An outline yields one per row of each of its
    /// [`Examples`] tables, tables in declaration order, so:
    /// ```gherkin
    /// Scenario Outline: eating
    ///   Given there are <start> cucumbers
    ///
    ///   Examples: few
    ///     | start |
    ///     |    12 |
    ///     |    20 |
    /// ```
    /// yields `eating | few | 0` with `start = 12` and `eating | few | 1` with
    /// `start = 20`.
    ///
    /// [`Examples`]: gherkin::Examples
    #[must_use]
    fn expand(&self) -> Vec<Expansion>;
}

#[sealed]
impl ScenarioExt for gherkin::Scenario {
    fn is_outline(&self) -> bool {
        !self.examples.is_empty()
    }

    fn expand(&self) -> Vec<Expansion> {
        if !self.is_outline() {
            return vec![Expansion {
                name: self.name.clone(),
                example: None,
                placeholders: Placeholders::new(),
                tags: Vec::new(),
            }];
        }

        self.examples
            .iter()
            .filter_map(|ex| {
                let (header, rows) = ex.table.as_ref()?.rows.split_first()?;
                let name = ex.name.as_deref().map_or("", str::trim).to_owned();
                Some((name, &ex.tags, header, rows))
            })
            .flat_map(|(table_name, tags, header, rows)| {
                rows.iter().enumerate().map(move |(index, row)| {
                    let example = Example { name: table_name.clone(), index };
                    Expansion {
                        name: format!("{} | {example}", self.name),
                        example: Some(example),
                        placeholders: header
                            .iter()
                            .cloned()
                            .zip(row.iter().cloned())
                            .collect(),
                        tags: tags.clone(),
                    }
                })
            })
            .collect()
    }
}

/// Replaces every `<column>` occurrence in the given `text` with its cell
/// value.
///
/// Placeholders naming no column are left untouched.
#[must_use]
pub fn substitute(text: &str, placeholders: &Placeholders) -> String {
    placeholders
        .iter()
        .fold(text.to_owned(), |acc, (column, value)| {
            acc.replace(&format!("<{column}>"), value)
        })
}
