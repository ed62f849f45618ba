//! Job specification types.
//!
//! A [`JobSpec`] describes where the recipe table lives, how to narrow it,
//! the network thresholds, lexicon overrides and the output shape. These
//! types are the input to the [`super::validation::ValidationEngine`].
//!
//! Every section is optional; omitted values fall back to the defaults of
//! the batch job (`;`-separated table, network mode, seed 42, thresholds 2).
//!
//! # JSON shape
//!
//! ```json
//! {
//!   "v": 1,
//!   "input": { "delimiter": ";", "columns": { "title": "recipe_title" } },
//!   "filter": { "category": "Breakfast And Brunch", "max_recipes": 100, "seed": 42 },
//!   "network": { "min_node_popularity": 2, "min_pairing_strength": 2 },
//!   "lexicon": {
//!     "extra_stopwords": ["heaping"],
//!     "overrides": [{ "contains": "flour", "label": "flour" }]
//!   },
//!   "output": { "mode": "network", "pretty": true },
//!   "strict": false
//! }
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dataset::ColumnNames;
use crate::error::{Error, Result};
use crate::nlp::canonicalizer::OverrideRule;
use crate::timeline::TimelineConfig;
use crate::types::NetworkConfig;

/// Spec version understood by this crate.
pub const SPEC_VERSION: u32 = 1;

/// Top-level job specification (v1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSpec {
    /// Spec version (currently `1`).
    pub v: u32,

    #[serde(default)]
    pub input: InputSpec,

    #[serde(default)]
    pub filter: FilterSpec,

    #[serde(default)]
    pub network: NetworkSpec,

    #[serde(default)]
    pub lexicon: LexiconSpec,

    #[serde(default)]
    pub timeline: TimelineConfig,

    #[serde(default)]
    pub output: OutputSpec,

    /// If `true`, unrecognized fields are errors; if `false`, warnings.
    #[serde(default)]
    pub strict: bool,

    /// Captures any fields not recognized by the schema.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl Default for JobSpec {
    fn default() -> Self {
        Self {
            v: SPEC_VERSION,
            input: InputSpec::default(),
            filter: FilterSpec::default(),
            network: NetworkSpec::default(),
            lexicon: LexiconSpec::default(),
            timeline: TimelineConfig::default(),
            output: OutputSpec::default(),
            strict: false,
            unknown_fields: HashMap::new(),
        }
    }
}

impl JobSpec {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json(&json)
    }
}

fn default_delimiter() -> String {
    ";".to_string()
}

/// Source table location and shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputSpec {
    /// CSV path; the command line may supply or override it.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Single-character field delimiter.
    #[serde(default = "default_delimiter")]
    pub delimiter: String,

    #[serde(default)]
    pub columns: ColumnNames,

    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl Default for InputSpec {
    fn default() -> Self {
        Self {
            path: None,
            delimiter: default_delimiter(),
            columns: ColumnNames::default(),
            unknown_fields: HashMap::new(),
        }
    }
}

fn default_seed() -> u64 {
    42
}

/// Dataset narrowing applied before processing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterSpec {
    /// Keep only recipes of this category.
    #[serde(default)]
    pub category: Option<String>,

    /// Sample down to this many recipes. Defaults depend on the output mode.
    #[serde(default)]
    pub max_recipes: Option<usize>,

    #[serde(default = "default_seed")]
    pub seed: u64,

    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            category: None,
            max_recipes: None,
            seed: default_seed(),
            unknown_fields: HashMap::new(),
        }
    }
}

/// Network thresholds. Omitted values inherit [`NetworkConfig::default`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NetworkSpec {
    #[serde(default)]
    pub min_node_popularity: Option<u32>,

    #[serde(default)]
    pub min_pairing_strength: Option<u32>,

    #[serde(default)]
    pub parallel_threshold: Option<usize>,

    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl NetworkSpec {
    pub fn to_config(&self) -> NetworkConfig {
        let defaults = NetworkConfig::default();
        NetworkConfig {
            min_node_popularity: self
                .min_node_popularity
                .unwrap_or(defaults.min_node_popularity),
            min_pairing_strength: self
                .min_pairing_strength
                .unwrap_or(defaults.min_pairing_strength),
            parallel_threshold: self
                .parallel_threshold
                .unwrap_or(defaults.parallel_threshold),
        }
    }
}

/// Adjustments to the canonicalization and grouping vocabularies.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LexiconSpec {
    /// Added to the culinary stopword list.
    #[serde(default)]
    pub extra_stopwords: Vec<String>,

    /// Removed from the culinary stopword list.
    #[serde(default)]
    pub keep_words: Vec<String>,

    /// Replaces the default override table when present.
    #[serde(default)]
    pub overrides: Option<Vec<OverrideRule>>,

    /// Replaces the default pantry keywords when present.
    #[serde(default)]
    pub pantry: Option<Vec<String>>,

    /// Replaces the default produce keywords when present.
    #[serde(default)]
    pub produce: Option<Vec<String>>,

    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

/// Which document the job writes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// Ingredient network plus the timeline of one recipe.
    #[default]
    Network,
    /// Per-recipe canonical ingredients and timelines.
    Recipes,
}

impl OutputMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Recipes => "recipes",
        }
    }

    /// Sample size used when the spec does not set one.
    pub fn default_max_recipes(&self) -> usize {
        match self {
            Self::Network => 100,
            Self::Recipes => 300,
        }
    }
}

impl std::str::FromStr for OutputMode {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.to_lowercase().as_str() {
            "network" | "graph" => Ok(Self::Network),
            "recipes" | "recipe" => Ok(Self::Recipes),
            other => Err(Error::InvalidInput(format!(
                "unknown output mode \"{other}\" (expected network or recipes)"
            ))),
        }
    }
}

fn default_pretty() -> bool {
    true
}

/// Output document settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSpec {
    #[serde(default)]
    pub mode: OutputMode,

    /// Output path; the command line may supply or override it.
    #[serde(default)]
    pub path: Option<PathBuf>,

    #[serde(default = "default_pretty")]
    pub pretty: bool,

    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl Default for OutputSpec {
    fn default() -> Self {
        Self {
            mode: OutputMode::default(),
            path: None,
            pretty: default_pretty(),
            unknown_fields: HashMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_spec() {
        let spec = JobSpec::from_json(r#"{ "v": 1 }"#).unwrap();
        assert_eq!(spec.v, 1);
        assert_eq!(spec.input.delimiter, ";");
        assert_eq!(spec.filter.seed, 42);
        assert_eq!(spec.output.mode, OutputMode::Network);
        assert!(spec.output.pretty);
        assert!(!spec.strict);
        assert_eq!(spec.network.to_config(), NetworkConfig::default());
    }

    #[test]
    fn test_deserialize_full_spec() {
        let json = r#"{
            "v": 1,
            "input": { "path": "breakfast.csv", "delimiter": ",", "columns": { "title": "name" } },
            "filter": { "category": "Breakfast And Brunch", "max_recipes": 50, "seed": 7 },
            "network": { "min_pairing_strength": 3 },
            "lexicon": {
                "extra_stopwords": ["heaping"],
                "overrides": [{ "contains": "oat", "excludes": ["goat"], "label": "oats" }]
            },
            "timeline": { "default_duration": 5 },
            "output": { "mode": "recipes", "pretty": false },
            "strict": true
        }"#;
        let spec = JobSpec::from_json(json).unwrap();
        assert_eq!(spec.input.path.as_deref(), Some(Path::new("breakfast.csv")));
        assert_eq!(spec.input.columns.title, "name");
        assert_eq!(spec.input.columns.ingredients, "ingredients");
        assert_eq!(spec.filter.max_recipes, Some(50));
        assert_eq!(spec.network.to_config().min_pairing_strength, 3);
        assert_eq!(spec.network.to_config().min_node_popularity, 2);
        let overrides = spec.lexicon.overrides.unwrap();
        assert_eq!(overrides[0], OverrideRule::new("oat", &["goat"], "oats"));
        assert_eq!(spec.timeline.default_duration, 5);
        assert_eq!(spec.timeline.summary_len, 60);
        assert_eq!(spec.output.mode, OutputMode::Recipes);
        assert!(!spec.output.pretty);
        assert!(spec.strict);
    }

    #[test]
    fn test_unknown_fields_captured() {
        let json = r#"{
            "v": 1,
            "bogus_top_level": 42,
            "network": { "min_strength": 3 }
        }"#;
        let spec = JobSpec::from_json(json).unwrap();
        assert!(spec.unknown_fields.contains_key("bogus_top_level"));
        assert!(spec.network.unknown_fields.contains_key("min_strength"));
    }

    #[test]
    fn test_output_mode_from_str() {
        assert_eq!("Recipes".parse::<OutputMode>().unwrap(), OutputMode::Recipes);
        assert_eq!("graph".parse::<OutputMode>().unwrap(), OutputMode::Network);
        assert!("timeline".parse::<OutputMode>().is_err());
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(matches!(JobSpec::from_json("{ v: 1 }"), Err(Error::Json(_))));
    }
}
