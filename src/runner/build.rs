// Copyright (c) 2018-2025  Brendan Molloy <brendan@bbqsrc.net>,
//                          Ilya Solovyiov <ilya.solovyiov@gmail.com>,
//                          Kai Ren <tyranron@gmail.com>
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Building runnable [`Feature`]s out of parsed ones.

use itertools::Itertools as _;

use crate::{
    binder::bind_step,
    error::{Exception, ScenarioRef, StepRef},
    feature::{Expansion, Placeholders, ScenarioExt as _},
    hook::Hooks,
    step::Collection,
    tag::TagFilter,
};

use super::{Feature, Scenario, Status};

/// Builds a runnable [`Feature`] out of a parsed [`gherkin::Feature`].
///
/// Returns [`None`] if the `filter` doesn't select the feature. Otherwise:
/// 1. Scenarios titled as hooks become [`Hooks`] of this feature, rules
///    included.
/// 2. Every other scenario is expanded (see [`ScenarioExt::expand()`]), and
///    each expansion not selected by the `filter` is dropped.
/// 3. Steps of each surviving scenario are bound in execution order:
///    backgrounds, before hooks, own steps, after hooks in reverse order.
///
/// A scenario is selected by the tags of its rule, its own ones and the ones
/// of the examples table it was expanded from. So, under an active
/// [`TagFilter`], a scenario declaring none of those isn't selected, even in a
/// selected feature.
///
/// # Errors
///
/// If a hook title is malformed, or any step can't be bound. The returned
/// [`Exception`] points at the feature, scenario and step being built.
///
/// [`ScenarioExt::expand()`]: crate::feature::ScenarioExt::expand
pub fn build_feature(
    feature: &gherkin::Feature,
    steps: &Collection,
    filter: &TagFilter,
) -> Result<Option<Feature>, Exception> {
    if !filter.admits(&feature.tags) {
        tracing::info!(
            feature = %feature.name,
            tags = ?feature.tags,
            "feature not selected",
        );
        return Ok(None);
    }

    let mut hooks = Hooks::default();
    let mut ordinary = Vec::new();
    let units = feature
        .scenarios
        .iter()
        .map(|sc| (None, sc))
        .chain(feature.rules.iter().flat_map(|r| {
            r.scenarios.iter().map(move |sc| (Some(r), sc))
        }));
    for (rule, sc) in units {
        if !hooks
            .absorb(sc)
            .map_err(|e| Exception::new(e).in_feature(&feature.name))?
        {
            ordinary.push((rule, sc));
        }
    }

    let mut scenarios = Vec::new();
    for (rule, sc) in ordinary {
        for expansion in sc.expand() {
            let own = rule
                .into_iter()
                .flat_map(|r| &r.tags)
                .chain(&sc.tags)
                .chain(&expansion.tags)
                .unique()
                .collect::<Vec<_>>();
            if !filter.admits(own) {
                tracing::debug!(
                    feature = %feature.name,
                    scenario = %expansion.name,
                    "scenario not selected",
                );
                continue;
            }

            let id = scenarios.len();
            let built = build_scenario(
                ScenarioParts { feature, rule, scenario: sc, expansion },
                &hooks,
                steps,
                id,
            )
            .map_err(|e| e.in_feature(&feature.name))?;
            scenarios.push(built);
        }
    }

    Ok(Some(Feature {
        name: feature.name.clone(),
        description: feature.description.clone(),
        path: feature.path.clone(),
        scenarios,
        status: Status::Wait,
    }))
}

/// Everything a single concrete [`Scenario`] is built from.
struct ScenarioParts<'f> {
    feature: &'f gherkin::Feature,
    rule: Option<&'f gherkin::Rule>,
    scenario: &'f gherkin::Scenario,
    expansion: Expansion,
}

fn build_scenario(
    parts: ScenarioParts<'_>,
    hooks: &Hooks,
    steps: &Collection,
    id: usize,
) -> Result<Scenario, Exception> {
    let ScenarioParts { feature, rule, scenario, expansion } = parts;
    let no_placeholders = Placeholders::new();

    let background = feature
        .background
        .iter()
        .chain(rule.and_then(|r| r.background.as_ref()))
        .flat_map(|bg| &bg.steps);
    let before = hooks.before.select_steps(&scenario.name);
    let after = hooks.after.select_steps_rev(&scenario.name);

    let sequence = background
        .map(|s| (s, &no_placeholders))
        .chain(before.into_iter().map(|s| (s, &no_placeholders)))
        .chain(scenario.steps.iter().map(|s| (s, &expansion.placeholders)))
        .chain(after.into_iter().map(|s| (s, &no_placeholders)));

    let bound = sequence
        .enumerate()
        .map(|(step_id, (step, placeholders))| {
            bind_step(step, placeholders, steps, step_id).map_err(|kind| {
                Exception::new(kind)
                    .in_scenario(ScenarioRef {
                        id,
                        name: expansion.name.clone(),
                    })
                    .in_step(StepRef {
                        id: step_id,
                        text: step.value.trim().to_owned(),
                    })
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Scenario {
        id,
        name: expansion.name,
        description: scenario.description.clone(),
        example: expansion.example,
        steps: bound,
        status: Status::Wait,
    })
}
