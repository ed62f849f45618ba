//! Output documents
//!
//! The JSON shapes read by the front-end, and helpers to write them.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::network::{GraphEdge, GraphNode};
use crate::timeline::TimelineStep;

/// Ingredient network plus the timeline of one featured recipe
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkDocument {
    pub recipe_title: String,
    pub ingredients: Vec<GraphNode>,
    pub links: Vec<GraphEdge>,
    pub timeline: Vec<TimelineStep>,
}

/// One recipe with canonical ingredients and a timeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeDocument {
    pub id: usize,
    pub title: String,
    pub subcategory: Option<String>,
    pub ingredients: Vec<String>,
    pub timeline: Vec<TimelineStep>,
    pub total_time: u32,
}

/// Whatever a job produced
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Document {
    Network(NetworkDocument),
    Recipes(Vec<RecipeDocument>),
}

impl Document {
    /// Short human summary for logs
    pub fn summary(&self) -> String {
        match self {
            Document::Network(doc) => format!(
                "{} ingredients and {} links",
                doc.ingredients.len(),
                doc.links.len()
            ),
            Document::Recipes(docs) => format!("{} recipes", docs.len()),
        }
    }
}

/// Serialize to a JSON string, two-space indented when `pretty`
pub fn to_json_string<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}

/// Write a value as JSON, creating parent directories
pub fn write_json<T: Serialize>(path: impl AsRef<Path>, value: &T, pretty: bool) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    let json = to_json_string(value, pretty)?;
    fs::write(path, json).map_err(|e| Error::io(path, e))
}
