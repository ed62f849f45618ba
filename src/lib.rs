//! # recipe-graph
//!
//! Turns a tabular recipe dataset into the JSON consumed by an ingredient
//! co-occurrence network and a preparation timeline visualization.
//!
//! The core is a three-stage pass over an in-memory collection of recipes:
//!
//! 1. [`nlp::canonicalizer`] maps raw ingredient lines to canonical names
//! 2. [`graph::cooccurrence`] counts ingredient popularity and pairings
//! 3. [`graph::network`] thresholds the counts into nodes and links
//!
//! Ingestion ([`dataset`]), the step timeline ([`timeline`]) and JSON output
//! ([`export`]) sit around that core and are wired together by
//! [`pipeline::runner::Pipeline`].
//!
//! ```
//! use recipe_graph::pipeline::runner::Pipeline;
//! use recipe_graph::types::NetworkConfig;
//!
//! let recipes = vec![
//!     vec!["2 cups all-purpose flour".to_string(), "1 egg".to_string()],
//!     vec!["egg".to_string(), "flour".to_string()],
//! ];
//! let pipeline = Pipeline::default();
//! let network = pipeline.build_network(&recipes, &NetworkConfig::default()).unwrap();
//! assert_eq!(network.nodes.len(), 2);
//! assert_eq!(network.links.len(), 1);
//! ```

pub mod dataset;
pub mod error;
pub mod export;
pub mod graph;
pub mod nlp;
pub mod pipeline;
pub mod timeline;
pub mod types;

pub use error::{Error, Result};
pub use graph::cooccurrence::CooccurrenceCounts;
pub use graph::network::{GraphEdge, GraphNode, IngredientNetwork, NetworkBuilder};
pub use nlp::canonicalizer::{Canonicalizer, OverrideRule};
pub use types::{IngredientGroup, NetworkConfig, RecipeRecord};
