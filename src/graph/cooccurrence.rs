//! Ingredient co-occurrence counting
//!
//! This module counts, across a collection of recipes, how many recipes
//! contain each canonical ingredient and how many contain each unordered
//! pair. Both counts are per recipe: repeated mentions inside one recipe
//! contribute a single increment.
//!
//! Ingredients and pairs are interned into insertion-ordered vectors with
//! FxHashMap indexes, so iteration follows first-encounter order and the
//! output is deterministic.

use rayon::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::types::NetworkConfig;

/// Recipes per rayon work item when aggregating in parallel
const PARALLEL_CHUNK: usize = 256;

/// Popularity entry for one ingredient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngredientCount {
    /// Canonical ingredient name
    pub name: String,
    /// Number of recipes containing it
    pub popularity: u32,
}

/// Co-occurrence entry for one unordered pair
///
/// `source` sorts strictly before `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PairCount {
    source: u32,
    target: u32,
    strength: u32,
}

/// Ingredient frequency and pairing counters
#[derive(Debug, Clone, Default)]
pub struct CooccurrenceCounts {
    /// Maps ingredient name -> ingredient ID
    name_to_id: FxHashMap<String, u32>,
    /// Ingredient storage, in first-encounter order
    ingredients: Vec<IngredientCount>,
    /// Maps (source ID, target ID) -> index into `pairs`
    pair_to_idx: FxHashMap<(u32, u32), usize>,
    /// Pair storage, in first-encounter order
    pairs: Vec<PairCount>,
    /// Number of recipes folded in
    recipes: usize,
}

impl CooccurrenceCounts {
    /// Create empty counters
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a collection of recipes sequentially
    pub fn from_recipes<S: AsRef<str>>(recipes: &[Vec<S>]) -> Self {
        let mut counts = Self::new();
        for recipe in recipes {
            counts.add_recipe(recipe);
        }
        counts
    }

    /// Count a collection of recipes, in parallel once it is large enough
    pub fn aggregate<S: AsRef<str> + Sync>(recipes: &[Vec<S>], cfg: &NetworkConfig) -> Self {
        if recipes.len() < cfg.parallel_threshold {
            return Self::from_recipes(recipes);
        }
        aggregate_parallel(recipes)
    }

    fn get_or_create_ingredient(&mut self, name: &str) -> u32 {
        if let Some(&id) = self.name_to_id.get(name) {
            return id;
        }

        let id = self.ingredients.len() as u32;
        self.name_to_id.insert(name.to_string(), id);
        self.ingredients.push(IngredientCount {
            name: name.to_string(),
            popularity: 0,
        });
        id
    }

    fn increment_pair(&mut self, source: u32, target: u32, by: u32) {
        match self.pair_to_idx.get(&(source, target)) {
            Some(&idx) => self.pairs[idx].strength += by,
            None => {
                self.pair_to_idx.insert((source, target), self.pairs.len());
                self.pairs.push(PairCount {
                    source,
                    target,
                    strength: by,
                });
            }
        }
    }

    /// Fold one recipe's canonical ingredients into the counters
    ///
    /// Duplicates are ignored. Popularity is incremented in mention order;
    /// pairs are drawn from the sorted unique set.
    pub fn add_recipe<S: AsRef<str>>(&mut self, ingredients: &[S]) {
        self.recipes += 1;

        let mut seen: FxHashSet<&str> = FxHashSet::default();
        let mut unique: Vec<(&str, u32)> = Vec::with_capacity(ingredients.len());
        for name in ingredients {
            let name = name.as_ref();
            if seen.insert(name) {
                let id = self.get_or_create_ingredient(name);
                self.ingredients[id as usize].popularity += 1;
                unique.push((name, id));
            }
        }

        unique.sort_unstable_by(|a, b| a.0.cmp(b.0));
        for i in 0..unique.len() {
            for j in (i + 1)..unique.len() {
                self.increment_pair(unique[i].1, unique[j].1, 1);
            }
        }
    }

    /// Add another set of counters into this one
    ///
    /// Entries new to `self` are appended in `other`'s order, so merging
    /// partial counts in input order reproduces the sequential result.
    pub fn merge(&mut self, other: CooccurrenceCounts) {
        self.recipes += other.recipes;

        let mut remap = Vec::with_capacity(other.ingredients.len());
        for entry in &other.ingredients {
            let id = self.get_or_create_ingredient(&entry.name);
            self.ingredients[id as usize].popularity += entry.popularity;
            remap.push(id);
        }

        for pair in &other.pairs {
            let source = remap[pair.source as usize];
            let target = remap[pair.target as usize];
            self.increment_pair(source, target, pair.strength);
        }
    }

    /// Number of recipes containing `name`
    pub fn popularity(&self, name: &str) -> u32 {
        self.name_to_id
            .get(name)
            .map(|&id| self.ingredients[id as usize].popularity)
            .unwrap_or(0)
    }

    /// Number of recipes containing both `a` and `b`, in either order
    pub fn pairing(&self, a: &str, b: &str) -> u32 {
        let (source, target) = if a <= b { (a, b) } else { (b, a) };
        let (Some(&s), Some(&t)) = (self.name_to_id.get(source), self.name_to_id.get(target))
        else {
            return 0;
        };
        self.pair_to_idx
            .get(&(s, t))
            .map(|&idx| self.pairs[idx].strength)
            .unwrap_or(0)
    }

    /// Iterate ingredient counts in first-encounter order
    pub fn ingredients(&self) -> impl Iterator<Item = &IngredientCount> {
        self.ingredients.iter()
    }

    /// Iterate `(source, target, strength)` in first-encounter order
    pub fn pairings(&self) -> impl Iterator<Item = (&str, &str, u32)> {
        self.pairs.iter().map(|p| {
            (
                self.ingredients[p.source as usize].name.as_str(),
                self.ingredients[p.target as usize].name.as_str(),
                p.strength,
            )
        })
    }

    /// Number of distinct ingredients
    pub fn ingredient_count(&self) -> usize {
        self.ingredients.len()
    }

    /// Number of distinct pairs
    pub fn pair_count(&self) -> usize {
        self.pairs.len()
    }

    /// Number of recipes folded in
    pub fn recipe_count(&self) -> usize {
        self.recipes
    }

    /// Check if no ingredient has been counted
    pub fn is_empty(&self) -> bool {
        self.ingredients.is_empty()
    }
}

/// Count recipes in parallel
///
/// Chunks are counted independently and merged in input order, which keeps
/// counts and iteration order identical to [`CooccurrenceCounts::from_recipes`].
pub fn aggregate_parallel<S: AsRef<str> + Sync>(recipes: &[Vec<S>]) -> CooccurrenceCounts {
    let partials: Vec<CooccurrenceCounts> = recipes
        .par_chunks(PARALLEL_CHUNK)
        .map(|chunk| CooccurrenceCounts::from_recipes(chunk))
        .collect();

    let mut counts = CooccurrenceCounts::new();
    for partial in partials {
        counts.merge(partial);
    }
    counts
}
