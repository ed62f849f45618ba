//! Recipe table ingestion
//!
//! Reads the recipe CSV into [`RecipeRecord`]s, then narrows the collection
//! with an optional category filter and a seeded random sample.

pub mod list_literal;
pub mod subcategory;

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::RecipeRecord;
use list_literal::parse_list_cell;

/// Column names in the source table
///
/// Header cells are trimmed and lowercased before lookup, so these are
/// matched case-insensitively.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnNames {
    pub title: String,
    pub ingredients: String,
    pub directions: String,
    /// Optional column; absent values are `None`
    pub category: String,
    /// Optional column; absent values are `None`
    pub subcategory: String,
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_json::Value>,
}

impl Default for ColumnNames {
    fn default() -> Self {
        Self {
            title: "recipe_title".to_string(),
            ingredients: "ingredients".to_string(),
            directions: "directions".to_string(),
            category: "category".to_string(),
            subcategory: "subcategory".to_string(),
            unknown_fields: HashMap::new(),
        }
    }
}

/// CSV reading options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvOptions {
    pub delimiter: u8,
    pub columns: ColumnNames,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            delimiter: b';',
            columns: ColumnNames::default(),
        }
    }
}

struct ColumnIndex {
    title: usize,
    ingredients: usize,
    directions: usize,
    category: Option<usize>,
    subcategory: Option<usize>,
}

impl ColumnIndex {
    fn resolve(headers: &[String], columns: &ColumnNames) -> Result<Self> {
        let find = |name: &str| {
            let wanted = name.trim().to_lowercase();
            headers.iter().position(|h| *h == wanted)
        };
        let require = |name: &str| {
            find(name).ok_or_else(|| Error::MissingColumn {
                column: name.to_string(),
                found: headers.join(", "),
            })
        };

        Ok(Self {
            title: require(&columns.title)?,
            ingredients: require(&columns.ingredients)?,
            directions: require(&columns.directions)?,
            category: find(&columns.category),
            subcategory: find(&columns.subcategory),
        })
    }
}

/// Read recipes from a CSV file
pub fn read_recipes_from_path(
    path: impl AsRef<Path>,
    options: &CsvOptions,
) -> Result<Vec<RecipeRecord>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::io(path, e))?;
    read_recipes(file, options)
}

/// Read recipes from any CSV source
///
/// Records that fail to parse are skipped. Row ids count accepted records
/// only.
pub fn read_recipes<R: Read>(reader: R, options: &CsvOptions) -> Result<Vec<RecipeRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(options.delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| h.trim().to_lowercase())
        .collect();
    let idx = ColumnIndex::resolve(&headers, &options.columns)?;

    let mut recipes = Vec::new();
    let mut skipped = 0usize;
    for result in rdr.records() {
        let record = match result {
            Ok(record) => record,
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(error = %_err, "skipping malformed CSV record");
                skipped += 1;
                continue;
            }
        };

        let field = |i: usize| record.get(i).unwrap_or("");
        let optional = |i: Option<usize>| {
            i.map(|i| field(i).trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };

        recipes.push(RecipeRecord {
            id: recipes.len(),
            title: field(idx.title).trim().to_string(),
            ingredients: parse_list_cell(field(idx.ingredients)),
            directions: parse_list_cell(field(idx.directions)),
            category: optional(idx.category),
            subcategory: optional(idx.subcategory).map(|s| subcategory::relabel(&s)),
        });
    }

    #[cfg(feature = "tracing")]
    tracing::info!(records = recipes.len(), skipped, "read recipe table");
    #[cfg(not(feature = "tracing"))]
    let _ = skipped;

    Ok(recipes)
}

/// Keep recipes whose trimmed category equals `category`
pub fn filter_by_category(recipes: Vec<RecipeRecord>, category: &str) -> Vec<RecipeRecord> {
    let wanted = category.trim();
    recipes
        .into_iter()
        .filter(|r| r.category.as_deref().map(str::trim) == Some(wanted))
        .collect()
}

/// Draw at most `max` recipes without replacement
///
/// Collections at or under `max` are returned untouched. Otherwise the
/// result is in draw order and fully determined by `seed`.
pub fn sample(recipes: Vec<RecipeRecord>, max: usize, seed: u64) -> Vec<RecipeRecord> {
    if recipes.len() <= max {
        return recipes;
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let picks = rand::seq::index::sample(&mut rng, recipes.len(), max);

    let mut slots: Vec<Option<RecipeRecord>> = recipes.into_iter().map(Some).collect();
    picks
        .into_iter()
        .filter_map(|i| slots[i].take())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TABLE: &str = "\
Recipe_Title ; Category ; Subcategory ; Ingredients ; Directions
Pancakes;Breakfast And Brunch;Breakfast Bread;\"['1 cup flour', '1 egg']\";\"['Mix.', 'Fry 5 minutes.']\"
Omelet;Breakfast And Brunch;Breakfast Eggs;\"['2 eggs', '1 tbsp butter']\";Whisk.
Soup;Dinner;;\"['1 onion']\";\"[]\"
";

    #[test]
    fn test_read_recipes() {
        let recipes = read_recipes(TABLE.as_bytes(), &CsvOptions::default()).unwrap();

        assert_eq!(recipes.len(), 3);
        assert_eq!(recipes[0].title, "Pancakes");
        assert_eq!(recipes[0].ingredients, vec!["1 cup flour", "1 egg"]);
        assert_eq!(recipes[0].directions, vec!["Mix.", "Fry 5 minutes."]);
        assert_eq!(recipes[0].subcategory.as_deref(), Some("Bread"));
        assert_eq!(recipes[1].directions, vec!["Whisk."]);
        assert_eq!(recipes[1].subcategory.as_deref(), Some("Eggs"));
        assert_eq!(recipes[2].subcategory, None);
        assert!(recipes[2].directions.is_empty());
        assert_eq!(recipes[2].id, 2);
    }

    #[test]
    fn test_missing_column() {
        let table = "recipe_title;ingredients\nPancakes;['flour']\n";
        let err = read_recipes(table.as_bytes(), &CsvOptions::default()).unwrap_err();
        match err {
            Error::MissingColumn { column, .. } => assert_eq!(column, "directions"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_optional_columns_may_be_absent() {
        let table = "recipe_title;ingredients;directions\nToast;['bread'];Toast it.\n";
        let recipes = read_recipes(table.as_bytes(), &CsvOptions::default()).unwrap();
        assert_eq!(recipes[0].category, None);
        assert_eq!(recipes[0].subcategory, None);
    }

    #[test]
    fn test_custom_delimiter_and_columns() {
        let table = "name,items,steps\nToast,\"['bread']\",Toast it.\n";
        let options = CsvOptions {
            delimiter: b',',
            columns: ColumnNames {
                title: "Name".to_string(),
                ingredients: "items".to_string(),
                directions: "steps".to_string(),
                ..ColumnNames::default()
            },
        };
        let recipes = read_recipes(table.as_bytes(), &options).unwrap();
        assert_eq!(recipes[0].title, "Toast");
        assert_eq!(recipes[0].ingredients, vec!["bread"]);
    }

    #[test]
    fn test_filter_by_category() {
        let recipes = read_recipes(TABLE.as_bytes(), &CsvOptions::default()).unwrap();
        let kept = filter_by_category(recipes, "Breakfast And Brunch");
        let titles: Vec<_> = kept.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles, vec!["Pancakes", "Omelet"]);
    }

    #[test]
    fn test_sample_is_seeded_and_distinct() {
        let recipes: Vec<RecipeRecord> = (0..50)
            .map(|i| RecipeRecord::new(i, format!("r{i}"), Vec::new()))
            .collect();

        let a = sample(recipes.clone(), 10, 42);
        let b = sample(recipes.clone(), 10, 42);
        assert_eq!(a, b);
        assert_eq!(a.len(), 10);

        let mut ids: Vec<_> = a.iter().map(|r| r.id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 10);
    }

    #[test]
    fn test_sample_small_collection_untouched() {
        let recipes = vec![RecipeRecord::new(0, "only", Vec::new())];
        assert_eq!(sample(recipes.clone(), 5, 42), recipes);
    }
}
