//! CB-001: Recipe document types and scheduler output types.
//!
//! Defines the YAML schema for recipe documents (info, ingredients, step
//! groups) and the derived time-frame types produced by the scheduler.
//! Document types derive Serialize/Deserialize/JsonSchema.

use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Recipe document
// ============================================================================

/// Root of a recipe document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Recipe {
    /// Title block shown on the cover page
    pub info: Info,

    /// Tools and equipment
    #[serde(default)]
    pub materials: Vec<String>,

    /// Ingredient name → amount (order-preserving)
    #[serde(default)]
    pub ingredients: IndexMap<String, Quantity>,

    /// Salt, pepper and friends, without amounts
    #[serde(default)]
    pub seasonings: Vec<String>,

    /// Step groups (order-preserving). Each group is one track.
    pub steps: IndexMap<String, Vec<Step>>,
}

/// Recipe title block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Info {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub author: String,

    /// Image URL
    #[serde(default)]
    pub image: Option<String>,
}

/// Ingredient amount: a number or freeform text ("a pinch").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Quantity {
    Number(f64),
    Text(String),
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Text(s) => write!(f, "{}", s),
        }
    }
}

// ============================================================================
// Steps
// ============================================================================

/// A single entry of a step group.
///
/// A mapping with `text` is a normal step, otherwise one with `goto` is a
/// merge into another group. Serialized untagged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
#[serde(untagged)]
pub enum Step {
    Normal(NormalStep),
    Goto(GotoStep),
}

/// Every field a step mapping may carry. Field errors (`minutes: 1.5`)
/// surface as-is.
#[derive(Deserialize)]
struct RawStep {
    text: Option<String>,
    goto: Option<String>,
    from: Option<Vec<String>>,
    ingredients: Option<Vec<String>>,
    minutes: Option<u32>,
}

impl<'de> Deserialize<'de> for Step {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = RawStep::deserialize(deserializer)?;
        match (raw.text, raw.goto) {
            (Some(text), _) => Ok(Self::Normal(NormalStep {
                text,
                from: raw.from,
                ingredients: raw.ingredients,
                minutes: raw.minutes,
            })),
            (None, Some(goto)) => Ok(Self::Goto(GotoStep { goto })),
            (None, None) => Err(serde::de::Error::custom(
                "step needs either `text` or `goto`",
            )),
        }
    }
}

impl Step {
    pub fn as_normal(&self) -> Option<&NormalStep> {
        match self {
            Self::Normal(step) => Some(step),
            Self::Goto(_) => None,
        }
    }

    /// Target group when this is a goto step.
    pub fn goto_target(&self) -> Option<&str> {
        match self {
            Self::Normal(_) => None,
            Self::Goto(step) => Some(step.goto.as_str()),
        }
    }

    pub fn is_normal(&self) -> bool {
        matches!(self, Self::Normal(_))
    }
}

/// An actual cooking instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct NormalStep {
    pub text: String,

    /// Groups merging into this step
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingredients: Option<Vec<String>>,

    /// Duration in whole minutes (absent = instantaneous). Fractional
    /// values are a parse error.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes: Option<u32>,
}

/// Longest duration the scheduler lays out for one step: a week.
pub const MAX_STEP_MINUTES: u32 = 7 * 24 * 60;

impl NormalStep {
    /// Ticks this step occupies on its track: duration plus one. Durations
    /// above `MAX_STEP_MINUTES` are clamped.
    pub fn ticks(&self) -> usize {
        self.minutes.unwrap_or(0).min(MAX_STEP_MINUTES) as usize + 1
    }

    /// Whether the duration exceeds what the scheduler lays out.
    pub fn exceeds_max_minutes(&self) -> bool {
        self.minutes.is_some_and(|m| m > MAX_STEP_MINUTES)
    }
}

/// Continue this group's track in another group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GotoStep {
    pub goto: String,
}

// ============================================================================
// Listing
// ============================================================================

/// A recipe document available from a source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeEntry {
    /// File name including extension
    pub name: String,

    /// Where to fetch the document (URL or local path)
    pub download_url: String,
}

// ============================================================================
// Scheduling
// ============================================================================

/// One step group plus the groups that merge into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeFrameTree<'a> {
    pub name: &'a str,
    pub root: &'a [Step],
    pub children: Vec<TimeFrameTree<'a>>,
}

/// A track's activity at one tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeFrameStep {
    /// Step group the entry belongs to
    pub time_line: String,

    /// `None` while the track is still busy with an earlier step
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<NormalStep>,
}

impl TimeFrameStep {
    pub fn is_placeholder(&self) -> bool {
        self.step.is_none()
    }
}

/// Everything happening across all tracks at one tick.
pub type TimeFrame = Vec<TimeFrameStep>;

/// Why a step group was left out of the schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticKind {
    NotStartingWithNormalStep,
    MismatchedReferences { from: Vec<String>, goto: Vec<String> },
}

/// A data-integrity problem found while building the schedule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleDiagnostic {
    pub group: String,
    pub kind: DiagnosticKind,
}

impl fmt::Display for ScheduleDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DiagnosticKind::NotStartingWithNormalStep => {
                write!(f, "step {} does not start with a normal step", self.group)
            }
            DiagnosticKind::MismatchedReferences { from, goto } => write!(
                f,
                "step {} has mismatching goto and from references (from: [{}], goto: [{}])",
                self.group,
                from.join(", "),
                goto.join(", ")
            ),
        }
    }
}

/// Scheduler output: the pages plus what had to be dropped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Schedule {
    pub frames: Vec<TimeFrame>,
    pub diagnostics: Vec<ScheduleDiagnostic>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cb001_step_untagged_normal() {
        let step: Step = serde_yaml_ng::from_str("text: knead\nminutes: 10").unwrap();
        let normal = step.as_normal().unwrap();
        assert_eq!(normal.text, "knead");
        assert_eq!(normal.minutes, Some(10));
        assert_eq!(normal.ticks(), 11);
    }

    #[test]
    fn test_cb001_step_untagged_goto() {
        let step: Step = serde_yaml_ng::from_str("goto: assemble").unwrap();
        assert_eq!(step.goto_target(), Some("assemble"));
        assert!(!step.is_normal());
    }

    #[test]
    fn test_cb001_step_text_wins_over_goto() {
        let step: Step = serde_yaml_ng::from_str("text: stir\ngoto: pot").unwrap();
        assert!(step.is_normal());
    }

    #[test]
    fn test_cb001_step_neither_is_error() {
        let err = serde_yaml_ng::from_str::<Step>("minutes: 3").unwrap_err();
        assert!(err.to_string().contains("either `text` or `goto`"));
    }

    #[test]
    fn test_cb001_step_fractional_minutes_named() {
        let err = serde_yaml_ng::from_str::<Step>("text: simmer\nminutes: 1.5").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("floating point `1.5`"), "{msg}");
        assert!(msg.contains("u32"), "{msg}");
        assert!(!msg.contains("untagged"), "{msg}");
    }

    #[test]
    fn test_cb001_step_keeps_from_and_ingredients() {
        let step: Step =
            serde_yaml_ng::from_str("text: fill\nfrom: [dough]\ningredients: [apples]").unwrap();
        let normal = step.as_normal().unwrap();
        assert_eq!(normal.from.as_deref(), Some(&["dough".to_string()][..]));
        assert_eq!(normal.ingredients.as_deref(), Some(&["apples".to_string()][..]));
        assert_eq!(normal.minutes, None);
    }

    #[test]
    fn test_cb001_step_serializes_untagged() {
        let step: Step = serde_yaml_ng::from_str("goto: assemble").unwrap();
        let json = serde_json::to_value(&step).unwrap();
        assert_eq!(json, serde_json::json!({ "goto": "assemble" }));
    }

    #[test]
    fn test_cb001_ticks_clamped() {
        let step = NormalStep {
            text: "age".into(),
            from: None,
            ingredients: None,
            minutes: Some(4_000_000_000),
        };
        assert!(step.exceeds_max_minutes());
        assert_eq!(step.ticks(), MAX_STEP_MINUTES as usize + 1);
    }

    #[test]
    fn test_cb001_info_name_optional() {
        let info: Info = serde_yaml_ng::from_str("description: d").unwrap();
        assert_eq!(info.name, "");
        assert_eq!(info.description, "d");
    }

    #[test]
    fn test_cb001_quantity_display() {
        assert_eq!(Quantity::Number(2.0).to_string(), "2");
        assert_eq!(Quantity::Number(0.5).to_string(), "0.5");
        assert_eq!(
            Quantity::Number(1e20).to_string(),
            "100000000000000000000"
        );
        assert_eq!(Quantity::Text("a pinch".into()).to_string(), "a pinch");
    }

    #[test]
    fn test_cb001_quantity_untagged() {
        let map: IndexMap<String, Quantity> =
            serde_yaml_ng::from_str("flour: 500\nsalt: a pinch").unwrap();
        assert_eq!(map["flour"], Quantity::Number(500.0));
        assert_eq!(map["salt"], Quantity::Text("a pinch".into()));
    }

    #[test]
    fn test_cb001_zero_duration_still_one_tick() {
        let step = NormalStep {
            text: "serve".into(),
            from: None,
            ingredients: None,
            minutes: None,
        };
        assert_eq!(step.ticks(), 1);
    }

    #[test]
    fn test_cb001_diagnostic_display() {
        let d = ScheduleDiagnostic {
            group: "assemble".into(),
            kind: DiagnosticKind::MismatchedReferences {
                from: vec!["dough".into()],
                goto: vec![],
            },
        };
        let msg = d.to_string();
        assert!(msg.contains("assemble"));
        assert!(msg.contains("mismatching"));
        assert!(msg.contains("from: [dough]"));
    }
}
