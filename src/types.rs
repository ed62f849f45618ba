//! Core data types shared across the pipeline stages

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One row of the recipe table after ingestion
///
/// Ingredient and direction lists are still raw text; canonicalization
/// happens later in the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecipeRecord {
    /// Zero-based row index in the source table
    pub id: usize,
    /// Recipe title
    pub title: String,
    /// Raw ingredient lines ("2 cups all-purpose flour, sifted")
    pub ingredients: Vec<String>,
    /// Raw instruction steps
    pub directions: Vec<String>,
    /// Optional top-level category
    pub category: Option<String>,
    /// Optional subcategory, already relabelled
    pub subcategory: Option<String>,
}

impl RecipeRecord {
    /// Create a record with just a title and raw ingredient lines
    pub fn new(id: usize, title: impl Into<String>, ingredients: Vec<String>) -> Self {
        Self {
            id,
            title: title.into(),
            ingredients,
            ..Self::default()
        }
    }

    /// Attach raw instruction steps
    pub fn with_directions(mut self, directions: Vec<String>) -> Self {
        self.directions = directions;
        self
    }
}

/// Display group of an ingredient node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IngredientGroup {
    Pantry,
    Produce,
    Other,
}

impl IngredientGroup {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pantry => "pantry",
            Self::Produce => "produce",
            Self::Other => "other",
        }
    }
}

/// Thresholds applied when turning counts into a network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// Minimum number of recipes an ingredient must appear in to become a node
    pub min_node_popularity: u32,
    /// Minimum number of recipes a pair must share to become a link
    pub min_pairing_strength: u32,
    /// Recipe count above which aggregation runs in parallel
    pub parallel_threshold: usize,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            min_node_popularity: 2,
            min_pairing_strength: 2,
            parallel_threshold: 2048,
        }
    }
}

impl NetworkConfig {
    /// Set the node popularity threshold
    pub fn with_min_node_popularity(mut self, value: u32) -> Self {
        self.min_node_popularity = value;
        self
    }

    /// Set the link strength threshold
    pub fn with_min_pairing_strength(mut self, value: u32) -> Self {
        self.min_pairing_strength = value;
        self
    }

    /// Reject thresholds that would admit ingredients seen in zero recipes
    pub fn validate(&self) -> Result<()> {
        if self.min_node_popularity == 0 {
            return Err(Error::InvalidInput(
                "min_node_popularity must be at least 1".to_string(),
            ));
        }
        if self.min_pairing_strength == 0 {
            return Err(Error::InvalidInput(
                "min_pairing_strength must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_thresholds() {
        let cfg = NetworkConfig::default();
        assert_eq!(cfg.min_node_popularity, 2);
        assert_eq!(cfg.min_pairing_strength, 2);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn test_zero_threshold_is_invalid_input() {
        let cfg = NetworkConfig::default().with_min_pairing_strength(0);
        assert!(matches!(cfg.validate(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_group_serializes_snake_case() {
        let json = serde_json::to_string(&IngredientGroup::Produce).unwrap();
        assert_eq!(json, "\"produce\"");
        assert_eq!(IngredientGroup::Pantry.as_str(), "pantry");
    }
}
