//! Thresholded ingredient network
//!
//! Turns [`CooccurrenceCounts`] into the node/link structure consumed by the
//! force-directed visualization. Links are always subordinate to nodes: a
//! pair whose endpoints did not both make the popularity cut is dropped no
//! matter how strong it is.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use super::cooccurrence::CooccurrenceCounts;
use crate::error::Result;
use crate::types::{IngredientGroup, NetworkConfig};

pub const DEFAULT_PANTRY: &[&str] = &[
    "flour",
    "sugar",
    "salt",
    "oil",
    "butter",
    "baking powder",
    "egg",
    "milk",
];

pub const DEFAULT_PRODUCE: &[&str] = &[
    "apple", "banana", "spinach", "carrot", "onion", "fruit", "berry",
];

/// Keyword-based group assignment
///
/// A name belongs to the first group with a keyword it contains; pantry is
/// checked before produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupClassifier {
    pub pantry: Vec<String>,
    pub produce: Vec<String>,
}

impl Default for GroupClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_PANTRY, DEFAULT_PRODUCE)
    }
}

impl GroupClassifier {
    pub fn new<S: AsRef<str>>(pantry: &[S], produce: &[S]) -> Self {
        Self {
            pantry: pantry.iter().map(|s| s.as_ref().to_string()).collect(),
            produce: produce.iter().map(|s| s.as_ref().to_string()).collect(),
        }
    }

    pub fn classify(&self, name: &str) -> IngredientGroup {
        if self.pantry.iter().any(|k| name.contains(k.as_str())) {
            IngredientGroup::Pantry
        } else if self.produce.iter().any(|k| name.contains(k.as_str())) {
            IngredientGroup::Produce
        } else {
            IngredientGroup::Other
        }
    }
}

/// A node in the ingredient network
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Canonical ingredient name
    pub id: String,
    /// Title-cased display name
    pub name: String,
    pub group: IngredientGroup,
    /// Number of recipes containing the ingredient
    pub popularity: u32,
}

/// A link between two ingredient nodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub source: String,
    pub target: String,
    /// Number of recipes containing both ends
    pub strength: u32,
}

/// Nodes and links of the ingredient network
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientNetwork {
    pub nodes: Vec<GraphNode>,
    pub links: Vec<GraphEdge>,
}

impl IngredientNetwork {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Builds an [`IngredientNetwork`] from co-occurrence counts
#[derive(Debug, Clone, Default)]
pub struct NetworkBuilder {
    classifier: GroupClassifier,
}

impl NetworkBuilder {
    pub fn new(classifier: GroupClassifier) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &GroupClassifier {
        &self.classifier
    }

    /// Apply the popularity and strength thresholds
    ///
    /// Nodes follow the ingredient order of `counts`, links the pair order.
    pub fn build(
        &self,
        counts: &CooccurrenceCounts,
        cfg: &NetworkConfig,
    ) -> Result<IngredientNetwork> {
        cfg.validate()?;

        let nodes: Vec<GraphNode> = counts
            .ingredients()
            .filter(|c| c.popularity >= cfg.min_node_popularity)
            .map(|c| GraphNode {
                id: c.name.clone(),
                name: title_case(&c.name),
                group: self.classifier.classify(&c.name),
                popularity: c.popularity,
            })
            .collect();

        let valid_ids: FxHashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();

        let links: Vec<GraphEdge> = counts
            .pairings()
            .filter(|(source, target, strength)| {
                *strength >= cfg.min_pairing_strength
                    && valid_ids.contains(source)
                    && valid_ids.contains(target)
            })
            .map(|(source, target, strength)| GraphEdge {
                source: source.to_string(),
                target: target.to_string(),
                strength,
            })
            .collect();

        Ok(IngredientNetwork { nodes, links })
    }
}

/// Capitalize the first letter of every alphabetic run
///
/// `"all-purpose flour"` becomes `"All-Purpose Flour"`.
pub fn title_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut prev_alpha = false;
    for c in name.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    fn counts(raw: &[&[&str]]) -> CooccurrenceCounts {
        let recipes: Vec<Vec<&str>> = raw.iter().map(|r| r.to_vec()).collect();
        CooccurrenceCounts::from_recipes(&recipes)
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("flour"), "Flour");
        assert_eq!(title_case("peanut butter"), "Peanut Butter");
        assert_eq!(title_case("cream-style corn"), "Cream-Style Corn");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_classifier_priority() {
        let c = GroupClassifier::default();
        assert_eq!(c.classify("flour"), IngredientGroup::Pantry);
        assert_eq!(c.classify("baking powder"), IngredientGroup::Pantry);
        assert_eq!(c.classify("banana"), IngredientGroup::Produce);
        assert_eq!(c.classify("blueberry"), IngredientGroup::Produce);
        assert_eq!(c.classify("bacon"), IngredientGroup::Other);
        // "onion" is produce, but "oil" is pantry and checked first.
        assert_eq!(c.classify("onion oil"), IngredientGroup::Pantry);
    }

    #[test]
    fn test_nodes_below_popularity_are_dropped() {
        let counts = counts(&[&["egg", "flour"], &["egg", "flour", "salt"]]);
        let net = NetworkBuilder::default()
            .build(&counts, &NetworkConfig::default())
            .unwrap();

        let ids: Vec<_> = net.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["egg", "flour"]);
        assert_eq!(net.links.len(), 1);
        assert_eq!(net.links[0].strength, 2);
    }

    #[test]
    fn test_edges_subordinate_to_nodes() {
        // "salt"/"egg" co-occur twice, but "salt" only passes a node
        // threshold of 2, not 3.
        let counts = counts(&[
            &["egg", "salt"],
            &["egg", "salt"],
            &["egg", "milk"],
            &["milk"],
            &["milk", "egg"],
        ]);
        let cfg = NetworkConfig::default()
            .with_min_node_popularity(3)
            .with_min_pairing_strength(2);
        let net = NetworkBuilder::default().build(&counts, &cfg).unwrap();

        let ids: Vec<_> = net.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["egg", "milk"]);
        assert_eq!(
            net.links,
            vec![GraphEdge {
                source: "egg".to_string(),
                target: "milk".to_string(),
                strength: 2,
            }]
        );
    }

    #[test]
    fn test_node_fields() {
        let counts = counts(&[&["peanut butter"], &["peanut butter"]]);
        let net = NetworkBuilder::default()
            .build(&counts, &NetworkConfig::default())
            .unwrap();

        assert_eq!(
            net.nodes[0],
            GraphNode {
                id: "peanut butter".to_string(),
                name: "Peanut Butter".to_string(),
                group: IngredientGroup::Pantry,
                popularity: 2,
            }
        );
    }

    #[test]
    fn test_empty_counts_give_empty_network() {
        let net = NetworkBuilder::default()
            .build(&CooccurrenceCounts::new(), &NetworkConfig::default())
            .unwrap();
        assert!(net.is_empty());
        assert_eq!(net.link_count(), 0);
    }

    #[test]
    fn test_zero_threshold_rejected() {
        let cfg = NetworkConfig::default().with_min_node_popularity(0);
        let result = NetworkBuilder::default().build(&CooccurrenceCounts::new(), &cfg);
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_edge_json_shape() {
        let edge = GraphEdge {
            source: "egg".to_string(),
            target: "flour".to_string(),
            strength: 2,
        };
        let json = serde_json::to_value(&edge).unwrap();
        assert_eq!(json["source"], "egg");
        assert_eq!(json["strength"], 2);
    }
}
