//! CB-002: Recipe YAML parsing and structural validation.
//!
//! Parses recipe documents and validates the step-group graph:
//! - goto steps may only close a group
//! - groups must not be empty
//! - goto and from references must name existing groups
//! - every group must end up in the schedule
//! - step durations stay within `MAX_STEP_MINUTES`

use super::scheduler;
use super::types::*;
use std::collections::HashSet;
use std::path::Path;

/// Validation error.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Parse a recipe file from disk.
pub fn parse_recipe_file(path: &Path) -> Result<Recipe, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("failed to read {}: {}", path.display(), e))?;
    parse_recipe(&content)
}

/// Parse a recipe from a YAML string.
pub fn parse_recipe(yaml: &str) -> Result<Recipe, String> {
    serde_yaml_ng::from_str(yaml).map_err(|e| format!("YAML parse error: {}", e))
}

/// Validate a parsed recipe. Returns a list of errors (empty = valid).
pub fn validate_recipe(recipe: &Recipe) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if recipe.info.name.trim().is_empty() {
        errors.push(ValidationError {
            message: "info.name must not be empty".to_string(),
        });
    }

    for (group, steps) in &recipe.steps {
        if steps.is_empty() {
            errors.push(ValidationError {
                message: format!("step group '{}' has no steps", group),
            });
            continue;
        }

        let last = steps.len() - 1;
        for (i, step) in steps.iter().enumerate() {
            match step {
                Step::Goto(goto) => {
                    if i != last {
                        errors.push(ValidationError {
                            message: format!(
                                "step group '{}' has a goto at position {} (only the last step may be a goto)",
                                group,
                                i + 1
                            ),
                        });
                    }
                    if !recipe.steps.contains_key(&goto.goto) {
                        errors.push(ValidationError {
                            message: format!(
                                "step group '{}' goes to unknown group '{}'",
                                group, goto.goto
                            ),
                        });
                    }
                    if &goto.goto == group {
                        errors.push(ValidationError {
                            message: format!("step group '{}' goes to itself", group),
                        });
                    }
                }
                Step::Normal(normal) => {
                    if normal.exceeds_max_minutes() {
                        errors.push(ValidationError {
                            message: format!(
                                "step group '{}' step {} takes {} minutes (at most {} are scheduled)",
                                group,
                                i + 1,
                                normal.minutes.unwrap_or_default(),
                                MAX_STEP_MINUTES
                            ),
                        });
                    }
                    for from in normal.from.iter().flatten() {
                        if !recipe.steps.contains_key(from) {
                            errors.push(ValidationError {
                                message: format!(
                                    "step group '{}' takes from unknown group '{}'",
                                    group, from
                                ),
                            });
                        }
                    }
                }
            }
        }
    }

    let (trees, diagnostics) = scheduler::build_trees(recipe);
    for diagnostic in &diagnostics {
        errors.push(ValidationError {
            message: diagnostic.to_string(),
        });
    }

    let scheduled: HashSet<&str> = trees.iter().flat_map(tree_names).collect();
    for group in recipe.steps.keys() {
        if !scheduled.contains(group.as_str()) {
            errors.push(ValidationError {
                message: format!("step group '{}' is not part of any timeline", group),
            });
        }
    }

    errors
}

fn tree_names<'a>(tree: &TimeFrameTree<'a>) -> Vec<&'a str> {
    let mut names = vec![tree.name];
    for child in &tree.children {
        names.extend(tree_names(child));
    }
    names
}
