// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Binding parsed [`gherkin::Step`]s to registered callbacks.

use crate::{
    error::{BuildError, ErrorKind},
    feature::{substitute, Placeholders},
    runner::Step,
    step::{ArgKind, Collection, Param, Params, Record},
};

/// Builds a runnable [`Step`] out of a parsed one.
///
/// 1. Trims the text and substitutes outline `placeholders` into it.
/// 2. Extracts the structural argument, if any (see [`argument()`]).
/// 3. Resolves the callback in the given [`Collection`].
/// 4. Assembles [`Params`]: capture groups, then the structural argument.
///
/// # Errors
///
/// - [`ErrorKind::Match`] if the text resolves to zero or several callbacks.
/// - [`ErrorKind::Build`] if the structural argument doesn't fit the
///   [`Signature`] of the resolved callback.
///
/// [`Signature`]: crate::step::Signature
pub fn bind_step(
    step: &gherkin::Step,
    placeholders: &Placeholders,
    steps: &Collection,
    id: usize,
) -> Result<Step, ErrorKind> {
    let text = substitute(step.value.trim(), placeholders);
    let argument = argument(step, placeholders);

    let resolved = steps.resolve(&text)?;
    let binding = resolved.binding;

    let found = argument.as_ref().map_or(ArgKind::None, Param::kind);
    if !binding.signature.argument.accepts(found) {
        return Err(BuildError::Argument {
            text,
            pattern: binding.regex.as_str().to_owned(),
            expected: binding.signature.argument,
            found,
        }
        .into());
    }

    tracing::debug!(
        step = %text,
        pattern = binding.regex.as_str(),
        "bound step"
    );

    Ok(Step::new(
        id,
        text,
        binding.clone(),
        Params::new(resolved.captures, argument),
    ))
}

/// Extracts the structural argument of a [`gherkin::Step`], substituting
/// outline `placeholders` into it.
///
/// - A data table with more than one column becomes [`Param::Records`]: its
///   first row names the fields of the following ones.
/// - A single-column data table becomes [`Param::List`] of every row, no
///   header assumed.
/// - Otherwise, a doc string becomes [`Param::Doc`].
#[must_use]
pub fn argument(
    step: &gherkin::Step,
    placeholders: &Placeholders,
) -> Option<Param> {
    if let Some(table) = &step.table {
        let cell = |c: &String| substitute(c, placeholders);
        let (header, rows) = table.rows.split_first()?;

        return Some(if header.len() > 1 {
            Param::Records(
                rows.iter()
                    .map(|row| {
                        header
                            .iter()
                            .map(cell)
                            .zip(row.iter().map(cell))
                            .collect::<Record>()
                    })
                    .collect(),
            )
        } else {
            Param::List(
                table
                    .rows
                    .iter()
                    .filter_map(|row| row.first().map(cell))
                    .collect(),
            )
        });
    }

    step.docstring
        .as_deref()
        .map(|doc| Param::Doc(substitute(doc, placeholders)))
}

#[cfg(test)]
mod tests {
    use crate::{
        feature::ScenarioExt as _,
        step::{MatchError, Signature},
        test_utils::parse,
        Handle,
    };

    use super::*;

    fn noop(_: &mut Handle, _: &Params) -> anyhow::Result<()> {
        Ok(())
    }

    const FEATURE: &str = r#"Feature: binding
  Scenario: tables
    Given people:
      | name  | age |
      | Alice | 30  |
      | Bob   | 25  |
    And names:
      | Alice |
      | Bob   |
    And a note:
      """
      hello
      """
    And plain

  Scenario Outline: outlined
    Given   <who>'s name:<name>
    And names:
      | <name> |

    Examples:
      | who | name   |
      | Bob | Robert |
"#;

    fn collection() -> Collection {
        let mut steps = Collection::new();
        for (pattern, kind) in [
            ("^people:$", ArgKind::Records),
            ("^names:$", ArgKind::List),
            ("^a note:$", ArgKind::Doc),
        ] {
            steps
                .register_with(pattern, Signature::new().argument(kind), noop)
                .unwrap();
        }
        steps.register("^plain$", noop).unwrap();
        steps.register("^(.+)'s name:(.+)$", noop).unwrap();
        steps
    }

    #[test]
    fn multi_column_table_becomes_records() {
        let feature = parse(FEATURE);
        let step = &feature.scenarios[0].steps[0];

        let bound =
            bind_step(step, &Placeholders::new(), &collection(), 0).unwrap();
        let records = bound.params.records().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["name"], "Alice");
        assert_eq!(records[1]["age"], "25");
        assert_eq!(
            records[0].keys().map(String::as_str).collect::<Vec<_>>(),
            ["name", "age"],
        );
    }

    #[test]
    fn single_column_table_becomes_list() {
        let feature = parse(FEATURE);
        let step = &feature.scenarios[0].steps[1];

        let bound =
            bind_step(step, &Placeholders::new(), &collection(), 1).unwrap();
        assert_eq!(bound.id, 1);
        assert_eq!(bound.params.list().unwrap(), ["Alice", "Bob"]);
        assert_eq!(bound.params.len(), 1);
    }

    #[test]
    fn doc_string_becomes_doc() {
        let feature = parse(FEATURE);
        let step = &feature.scenarios[0].steps[2];

        let bound =
            bind_step(step, &Placeholders::new(), &collection(), 2).unwrap();
        assert_eq!(bound.params.doc().map(str::trim), Some("hello"));
    }

    #[test]
    fn substitutes_placeholders_everywhere() {
        let feature = parse(FEATURE);
        let outline = &feature.scenarios[1];
        let expansions = outline.expand();
        let placeholders = &expansions[0].placeholders;
        let steps = collection();

        let bound =
            bind_step(&outline.steps[0], placeholders, &steps, 0).unwrap();
        assert_eq!(bound.text, "Bob's name:Robert");
        assert_eq!(
            bound.params.captures().collect::<Vec<_>>(),
            ["Bob", "Robert"],
        );

        let bound =
            bind_step(&outline.steps[1], placeholders, &steps, 1).unwrap();
        assert_eq!(bound.params.list().unwrap(), ["Robert"]);
    }

    #[test]
    fn rejects_unexpected_argument() {
        let feature = parse(FEATURE);
        let mut steps = Collection::new();
        steps.register("^people:$", noop).unwrap();

        let step = &feature.scenarios[0].steps[0];

        let err =
            bind_step(step, &Placeholders::new(), &steps, 0).unwrap_err();
        assert!(matches!(
            err,
            ErrorKind::Build(BuildError::Argument {
                expected: ArgKind::None,
                found: ArgKind::Records,
                ..
            }),
        ));
    }

    #[test]
    fn propagates_match_errors() {
        let feature = parse(FEATURE);

        let err = bind_step(
            &feature.scenarios[0].steps[3],
            &Placeholders::new(),
            &Collection::new(),
            0,
        )
        .unwrap_err();
        assert!(matches!(err, ErrorKind::Match(MatchError::Unmatched { .. })));
    }
}
