//! CB-003: Timeline scheduling: step groups to synchronized time frames.
//!
//! Every group that ends in a normal step is a root track. Groups that `goto`
//! a track are its children and must match the `from` list of the track's
//! first step. Tracks are walked backward from the tick where they culminate;
//! children are offset so they finish exactly where the parent track starts.
//! Each normal step occupies `minutes + 1` ticks.

use super::types::*;
use std::collections::BTreeMap;
use tracing::{debug, error, warn};

/// Tick (counted backward from the culmination) → entries at that tick.
pub(crate) type ReversedFrames = BTreeMap<usize, TimeFrame>;

/// Compute the time frames of a recipe, earliest first.
pub fn create_time_frames(recipe: &Recipe) -> Vec<TimeFrame> {
    schedule(recipe).frames
}

/// Compute the time frames and report the groups that had to be dropped.
pub fn schedule(recipe: &Recipe) -> Schedule {
    let (trees, diagnostics) = build_trees(recipe);
    let reversed = walk_trees(&trees);
    let ticks = reversed.len();

    let frames: Vec<TimeFrame> = reversed
        .into_values()
        .rev()
        .filter(|frame| frame.iter().any(|entry| !entry.is_placeholder()))
        .collect();

    debug!(
        recipe = %recipe.info.name,
        tracks = trees.len(),
        ticks,
        frames = frames.len(),
        dropped = diagnostics.len(),
        "scheduled recipe"
    );

    Schedule {
        frames,
        diagnostics,
    }
}

/// Build one tree per root track (document order).
///
/// Trees that fail validation are left out and reported as diagnostics.
pub fn build_trees(recipe: &Recipe) -> (Vec<TimeFrameTree<'_>>, Vec<ScheduleDiagnostic>) {
    let mut diagnostics = Vec::new();
    let trees = recipe
        .steps
        .iter()
        .filter(|(_, steps)| steps.last().is_some_and(Step::is_normal))
        .filter_map(|(name, steps)| build_tree(recipe, name, steps, &mut diagnostics))
        .collect();
    (trees, diagnostics)
}

fn build_tree<'a>(
    recipe: &'a Recipe,
    name: &'a str,
    steps: &'a [Step],
    diagnostics: &mut Vec<ScheduleDiagnostic>,
) -> Option<TimeFrameTree<'a>> {
    let Some(first) = steps.first().and_then(Step::as_normal) else {
        report(diagnostics, name, DiagnosticKind::NotStartingWithNormalStep);
        return None;
    };

    let goto_refs: Vec<(&'a str, &'a [Step])> = recipe
        .steps
        .iter()
        .filter(|(_, group)| group.last().and_then(Step::goto_target) == Some(name))
        .map(|(key, group)| (key.as_str(), group.as_slice()))
        .collect();

    let mut from: Vec<String> = first.from.clone().unwrap_or_default();
    from.sort();
    let mut goto: Vec<String> = goto_refs.iter().map(|(key, _)| key.to_string()).collect();
    goto.sort();
    if from != goto {
        report(
            diagnostics,
            name,
            DiagnosticKind::MismatchedReferences { from, goto },
        );
        return None;
    }

    let children = goto_refs
        .into_iter()
        .filter_map(|(child, group)| build_tree(recipe, child, group, diagnostics))
        .collect();

    Some(TimeFrameTree {
        name,
        root: steps,
        children,
    })
}

fn report(diagnostics: &mut Vec<ScheduleDiagnostic>, group: &str, kind: DiagnosticKind) {
    let diagnostic = ScheduleDiagnostic {
        group: group.to_string(),
        kind,
    };
    error!(group, "{}", diagnostic);
    diagnostics.push(diagnostic);
}

/// Walk trees that share one time origin (tick 0 = where they culminate).
pub(crate) fn walk_trees(trees: &[TimeFrameTree<'_>]) -> ReversedFrames {
    let mut reversed = ReversedFrames::new();
    reversed.insert(0, Vec::new());

    for tree in trees {
        let mut current_time = 0;
        for step in tree.root.iter().rev().filter_map(Step::as_normal) {
            if step.exceeds_max_minutes() {
                warn!(
                    group = tree.name,
                    minutes = step.minutes,
                    max = MAX_STEP_MINUTES,
                    "step duration clamped"
                );
            }
            let old_time = current_time;
            current_time += step.ticks();
            for tick in old_time + 1..current_time {
                reversed.entry(tick).or_default().push(TimeFrameStep {
                    time_line: tree.name.to_string(),
                    step: None,
                });
            }
            reversed.entry(current_time).or_default().push(TimeFrameStep {
                time_line: tree.name.to_string(),
                step: Some(step.clone()),
            });
        }

        // Children culminate where this track starts.
        for (tick, entries) in walk_trees(&tree.children) {
            reversed
                .entry(current_time + tick)
                .or_default()
                .extend(entries);
        }
    }

    reversed
}
