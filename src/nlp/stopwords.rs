//! Stopword filtering
//!
//! Recipe ingredient lines are dominated by measurement and preparation
//! noise ("2 cups finely chopped fresh ..."). This module holds the word list
//! that strips that noise, with support for custom lists.

use rustc_hash::FxHashSet;

/// Units, containers, preparation states, colours, sizes and connectives
/// that never name an ingredient on their own.
///
/// Does not contain "brown": the sugar override excludes on it.
pub const CULINARY_STOPWORDS: &[&str] = &[
    // units
    "cup", "cups", "tsp", "tbsp", "teaspoon", "tablespoon", "oz", "ounce", "gram", "g", "lb",
    "pound", "liter", "quart", "pint", "gallon",
    // containers and portions
    "can", "cans", "package", "packages", "pack", "container", "box", "bag", "bottle", "jar",
    "envelope", "stick", "sticks", "bar", "bars", "link", "links", "slice", "slices", "clove",
    "cloves", "pinch", "dash", "drop", "drops", "head", "bunch", "stalk", "sprig", "fillet",
    "filet", "piece", "pieces",
    // preparation state
    "chopped", "diced", "minced", "sliced", "peeled", "crushed", "beaten", "softened", "melted",
    "thawed", "frozen", "shredded", "grated", "toasted", "roasted", "baked", "cooked",
    "uncooked", "boiled", "fried", "grilled", "steamed", "smoked", "cured", "dried", "fresh",
    "warm", "cold", "hot", "room", "temperature", "cut", "into", "cubes", "chunks", "wedges",
    "rings", "halved", "quartered", "cored", "sifted", "divided", "separated", "drained",
    "rinsed", "pitted", "trimmed", "cleaned", "rubbed", "crumbled", "mash", "mashed",
    // size and grade
    "large", "small", "medium", "jumbo", "whole", "lean", "extra", "virgin", "all-purpose",
    "purpose", "self-rising", "rising", "active", "dry", "instant",
    // colour
    "white", "red", "green", "yellow", "blue", "black", "orange",
    // taste and texture
    "sweet", "sour", "spicy", "unsalted", "salted", "kosher", "sea", "coarse", "fine",
    "granulated", "powdered", "confectioners", "packed", "firm", "soft", "ripe", "boneless",
    "skinless", "fat-free", "low-fat", "condensed", "evaporated", "heavy", "whipping", "double",
    "single", "distilled", "boiling",
    // connectives and quantities
    "and", "or", "of", "to", "for", "with", "in", "as", "needed", "taste", "optional",
    "garnish", "about", "more", "less", "plus",
];

/// A filter for removing stopwords from ingredient text
#[derive(Debug, Clone)]
pub struct StopwordFilter {
    /// Set of stopwords (lowercase)
    stopwords: FxHashSet<String>,
}

impl Default for StopwordFilter {
    fn default() -> Self {
        Self::culinary()
    }
}

impl StopwordFilter {
    /// Create the default culinary stopword filter
    pub fn culinary() -> Self {
        Self::from_list(CULINARY_STOPWORDS)
    }

    /// Create an empty stopword filter (no filtering)
    pub fn empty() -> Self {
        Self {
            stopwords: FxHashSet::default(),
        }
    }

    /// Create a stopword filter from a custom list
    pub fn from_list<S: AsRef<str>>(words: &[S]) -> Self {
        let stopwords: FxHashSet<String> =
            words.iter().map(|w| w.as_ref().to_lowercase()).collect();
        Self { stopwords }
    }

    /// Add additional stopwords to the filter
    pub fn add_stopwords<S: AsRef<str>>(&mut self, words: &[S]) {
        for word in words {
            self.stopwords.insert(word.as_ref().to_lowercase());
        }
    }

    /// Remove stopwords from the filter
    pub fn remove_stopwords<S: AsRef<str>>(&mut self, words: &[S]) {
        for word in words {
            self.stopwords.remove(&word.as_ref().to_lowercase());
        }
    }

    /// Check if a word is a stopword
    ///
    /// Callers pass already-lowercased tokens.
    pub fn is_stopword(&self, word: &str) -> bool {
        self.stopwords.contains(word)
    }

    /// Get the number of stopwords in the filter
    pub fn len(&self) -> usize {
        self.stopwords.len()
    }

    /// Check if the filter is empty
    pub fn is_empty(&self) -> bool {
        self.stopwords.is_empty()
    }
}
