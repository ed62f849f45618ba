//! Preparation timeline
//!
//! Estimates a duration for each instruction step and lays the steps out
//! back to back. The estimate is a keyword heuristic: an explicit
//! `"<n> min"` / `"<n> hr"` / `"<n> hour"` wins, otherwise every step takes
//! the default duration. Steps mentioning waiting verbs (bake, chill, rest,
//! ...) are passive.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(\d+)\s*(min|hr|hour)").expect("duration pattern is valid")
});

pub const DEFAULT_PASSIVE_KEYWORDS: &[&str] = &[
    "bake", "cool", "chill", "simmer", "rise", "wait", "roast", "marinate", "rest",
];

/// Whether a step needs the cook's attention
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    Active,
    Passive,
}

/// One step of a recipe timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineStep {
    /// 1-based position in the recipe
    pub step_number: usize,
    /// Short label for display
    pub task: String,
    /// Full instruction text
    pub task_text: String,
    #[serde(rename = "type")]
    pub kind: TaskKind,
    /// Minutes from the start of the recipe
    pub start_time: u32,
    /// Estimated minutes
    pub duration: u32,
}

/// All steps of a recipe plus the total time
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timeline {
    pub steps: Vec<TimelineStep>,
    pub total_time: u32,
}

/// Configuration for duration estimation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimelineConfig {
    /// Minutes assumed when a step states no duration
    pub default_duration: u32,
    /// Words marking a step as passive
    pub passive_keywords: Vec<String>,
    /// Characters kept in the short task label
    pub summary_len: usize,
    /// Fields not recognized by the schema
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl Default for TimelineConfig {
    fn default() -> Self {
        Self {
            default_duration: 10,
            passive_keywords: DEFAULT_PASSIVE_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            summary_len: 60,
            unknown_fields: HashMap::new(),
        }
    }
}

/// Step duration estimator
#[derive(Debug, Clone, Default)]
pub struct TimelineEstimator {
    config: TimelineConfig,
}

impl TimelineEstimator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TimelineConfig) -> Self {
        Self { config }
    }

    /// Estimate minutes and kind for a single step
    pub fn estimate(&self, step: &str) -> (u32, TaskKind) {
        let text = step.to_lowercase();

        let duration = DURATION
            .captures(&text)
            .map(|caps| {
                // All digits, so parsing only fails on overflow.
                let amount: u32 = caps[1].parse().unwrap_or(u32::MAX);
                if caps[2].contains('h') {
                    amount.saturating_mul(60)
                } else {
                    amount
                }
            })
            .unwrap_or(self.config.default_duration);

        let passive = self
            .config
            .passive_keywords
            .iter()
            .any(|k| text.contains(k.as_str()));
        let kind = if passive { TaskKind::Passive } else { TaskKind::Active };

        (duration, kind)
    }

    /// Lay out all steps of a recipe
    pub fn build<S: AsRef<str>>(&self, steps: &[S]) -> Timeline {
        let mut clock: u32 = 0;
        let steps = steps
            .iter()
            .enumerate()
            .map(|(i, step)| {
                let text = step.as_ref();
                let (duration, kind) = self.estimate(text);
                let entry = TimelineStep {
                    step_number: i + 1,
                    task: self.summarize(text),
                    task_text: text.to_string(),
                    kind,
                    start_time: clock,
                    duration,
                };
                clock = clock.saturating_add(duration);
                entry
            })
            .collect();

        Timeline {
            steps,
            total_time: clock,
        }
    }

    fn summarize(&self, text: &str) -> String {
        let mut label: String = text.chars().take(self.config.summary_len).collect();
        label.push_str("...");
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_duration_is_active() {
        let est = TimelineEstimator::new();
        assert_eq!(est.estimate("Whisk the eggs."), (10, TaskKind::Active));
    }

    #[test]
    fn test_explicit_minutes_and_hours() {
        let est = TimelineEstimator::new();
        assert_eq!(est.estimate("Stir for 5 minutes.").0, 5);
        assert_eq!(est.estimate("Let stand 2 hr.").0, 120);
        assert_eq!(est.estimate("Refrigerate 1 hour or overnight.").0, 60);
        assert_eq!(est.estimate("Cook 3min per side").0, 3);
    }

    #[test]
    fn test_first_duration_wins() {
        let est = TimelineEstimator::new();
        assert_eq!(est.estimate("Bake 25 minutes, then rest 10 minutes.").0, 25);
    }

    #[test]
    fn test_oversized_duration_saturates() {
        let est = TimelineEstimator::new();
        assert_eq!(
            est.estimate("Bake 99999999999 minutes."),
            (u32::MAX, TaskKind::Passive)
        );
        assert_eq!(est.estimate("Rest 99999999 hours.").0, u32::MAX);

        let timeline = est.build(&["Bake 99999999999 minutes.", "Serve."]);
        assert_eq!(timeline.steps[1].start_time, u32::MAX);
        assert_eq!(timeline.total_time, u32::MAX);
    }

    #[test]
    fn test_passive_keywords() {
        let est = TimelineEstimator::new();
        assert_eq!(est.estimate("Bake 30 minutes.").1, TaskKind::Passive);
        assert_eq!(est.estimate("Let the dough RISE.").1, TaskKind::Passive);
        assert_eq!(est.estimate("Chop the onion.").1, TaskKind::Active);
    }

    #[test]
    fn test_timeline_is_cumulative() {
        let est = TimelineEstimator::new();
        let timeline = est.build(&["Mix.", "Bake for 45 minutes.", "Serve."]);

        let starts: Vec<_> = timeline.steps.iter().map(|s| s.start_time).collect();
        assert_eq!(starts, vec![0, 10, 55]);
        assert_eq!(timeline.total_time, 65);
        assert_eq!(timeline.steps[1].step_number, 2);
        assert_eq!(timeline.steps[1].kind, TaskKind::Passive);
    }

    #[test]
    fn test_summary_truncates_at_sixty_chars() {
        let est = TimelineEstimator::new();
        let long = "a".repeat(80);
        let timeline = est.build(&[long.as_str()]);
        assert_eq!(timeline.steps[0].task.len(), 63);
        assert!(timeline.steps[0].task.ends_with("..."));
        assert_eq!(timeline.steps[0].task_text, long);
    }

    #[test]
    fn test_empty_steps() {
        let timeline = TimelineEstimator::new().build::<&str>(&[]);
        assert!(timeline.steps.is_empty());
        assert_eq!(timeline.total_time, 0);
    }

    #[test]
    fn test_step_json_uses_type_field() {
        let timeline = TimelineEstimator::new().build(&["Chill."]);
        let json = serde_json::to_value(&timeline.steps[0]).unwrap();
        assert_eq!(json["type"], "passive");
        assert_eq!(json["start_time"], 0);
    }
}
