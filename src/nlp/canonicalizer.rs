//! Ingredient name canonicalization
//!
//! Maps a free-text ingredient line such as `"2 cups all-purpose flour
//! (sifted)"` to a short canonical name (`"flour"`), or to an empty string
//! when nothing survives cleaning.
//!
//! Steps, in order:
//! 1. lowercase and trim
//! 2. drop parenthetical notes
//! 3. keep only `a-z`, whitespace and `-`
//! 4. drop stopwords and tokens of two characters or fewer
//! 5. join survivors with single spaces
//! 6. apply the first matching [`OverrideRule`]
//!
//! Override matching is plain substring containment, so `"eggplant"` would
//! match `"egg"` were it not for the explicit `"plant"` exclusion. Other
//! collisions of that kind are not guarded.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::stopwords::StopwordFilter;

static PARENTHETICAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\([^)]*\)").expect("parenthetical pattern is valid")
});

/// Shortest canonical name that is kept by [`Canonicalizer::canonical`]
const MIN_CANONICAL_LEN: usize = 2;

/// A single canonicalization override
///
/// If the cleaned name contains `contains` and none of `excludes`, the whole
/// name is replaced by `label`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverrideRule {
    pub contains: String,
    #[serde(default)]
    pub excludes: Vec<String>,
    pub label: String,
}

impl OverrideRule {
    pub fn new(contains: &str, excludes: &[&str], label: &str) -> Self {
        Self {
            contains: contains.to_string(),
            excludes: excludes.iter().map(|s| s.to_string()).collect(),
            label: label.to_string(),
        }
    }

    /// Check whether this rule fires for an already-cleaned name
    pub fn matches(&self, cleaned: &str) -> bool {
        cleaned.contains(self.contains.as_str())
            && !self.excludes.iter().any(|e| cleaned.contains(e.as_str()))
    }

    /// The default priority-ordered table; first match wins
    pub fn default_table() -> Vec<OverrideRule> {
        vec![
            OverrideRule::new("flour", &[], "flour"),
            OverrideRule::new("sugar", &["brown"], "sugar"),
            OverrideRule::new("butter", &["peanut"], "butter"),
            OverrideRule::new("egg", &["plant"], "egg"),
            OverrideRule::new("milk", &["coconut", "almond"], "milk"),
            OverrideRule::new("sausage", &[], "sausage"),
            OverrideRule::new("bacon", &[], "bacon"),
            OverrideRule::new("cheese", &[], "cheese"),
        ]
    }
}

/// Ingredient canonicalizer
#[derive(Debug, Clone)]
pub struct Canonicalizer {
    stopwords: StopwordFilter,
    overrides: Vec<OverrideRule>,
    min_token_len: usize,
}

impl Default for Canonicalizer {
    fn default() -> Self {
        Self::new(StopwordFilter::culinary(), OverrideRule::default_table())
    }
}

impl Canonicalizer {
    /// Create a canonicalizer from a stopword filter and an ordered override table
    pub fn new(stopwords: StopwordFilter, overrides: Vec<OverrideRule>) -> Self {
        Self {
            stopwords,
            overrides,
            min_token_len: 3,
        }
    }

    /// Set the minimum token length kept after stopword removal
    pub fn with_min_token_len(mut self, min_token_len: usize) -> Self {
        self.min_token_len = min_token_len;
        self
    }

    pub fn stopwords(&self) -> &StopwordFilter {
        &self.stopwords
    }

    pub fn overrides(&self) -> &[OverrideRule] {
        &self.overrides
    }

    /// Clean a raw ingredient line without applying overrides
    pub fn clean(&self, raw: &str) -> String {
        let lowered = raw.trim().to_lowercase();
        let without_notes = PARENTHETICAL.replace_all(&lowered, "");
        let letters: String = without_notes
            .chars()
            .filter(|c| c.is_ascii_lowercase() || c.is_whitespace() || *c == '-')
            .collect();

        letters
            .split_whitespace()
            .filter(|w| !self.stopwords.is_stopword(w) && w.len() >= self.min_token_len)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Canonicalize a raw ingredient line
    ///
    /// Total over arbitrary text: the result may be empty, in which case the
    /// caller is expected to discard the entry.
    pub fn canonicalize(&self, raw: &str) -> String {
        let cleaned = self.clean(raw);
        match self.overrides.iter().find(|rule| rule.matches(&cleaned)) {
            Some(rule) => rule.label.clone(),
            None => cleaned,
        }
    }

    /// Canonicalize, returning `None` for entries that should be discarded
    pub fn canonical(&self, raw: &str) -> Option<String> {
        let name = self.canonicalize(raw);
        (name.len() >= MIN_CANONICAL_LEN).then_some(name)
    }

    /// Canonicalize a recipe's ingredient lines
    ///
    /// Discarded entries are dropped and duplicates collapsed, keeping the
    /// order in which each canonical name is first mentioned.
    pub fn canonicalize_all<S: AsRef<str>>(&self, raw: &[S]) -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(raw.len());
        for line in raw {
            if let Some(name) = self.canonical(line.as_ref()) {
                if !out.contains(&name) {
                    out.push(name);
                }
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canon(raw: &str) -> String {
        Canonicalizer::default().canonicalize(raw)
    }

    #[test]
    fn test_flour_variants_collapse() {
        assert_eq!(canon("2 cups all-purpose flour"), "flour");
        assert_eq!(canon("1 1/2 cups self-rising flour, sifted"), "flour");
        assert_eq!(canon("whole wheat flour"), "flour");
    }

    #[test]
    fn test_exclusions_block_overrides() {
        assert_eq!(canon("1/2 cup creamy peanut butter"), "creamy peanut butter");
        assert_eq!(canon("1 cup packed brown sugar"), "brown sugar");
        assert_eq!(canon("1 eggplant, peeled"), "eggplant");
        assert_eq!(canon("1 can coconut milk"), "coconut milk");
        assert_eq!(canon("2 cups almond milk"), "almond milk");
    }

    #[test]
    fn test_overrides_fire() {
        assert_eq!(canon("1 cup white sugar"), "sugar");
        assert_eq!(canon("3 tablespoons unsalted butter, melted"), "butter");
        assert_eq!(canon("4 large eggs, beaten"), "egg");
        assert_eq!(canon("1 cup whole milk"), "milk");
        assert_eq!(canon("1 pound ground pork sausage"), "sausage");
        assert_eq!(canon("6 slices thick-cut bacon"), "bacon");
        assert_eq!(canon("1 cup shredded cheddar cheese"), "cheese");
    }

    #[test]
    fn test_override_order_matters() {
        // Both "flour" and "sugar" appear; flour is checked first.
        assert_eq!(canon("sugar cookie flour blend"), "flour");
        // "buttermilk" contains "butter" before "milk" is considered.
        assert_eq!(canon("1 cup buttermilk"), "butter");
    }

    #[test]
    fn test_parentheticals_and_symbols_removed() {
        assert_eq!(canon("1 (8 ounce) package cream-style corn"), "cream-style corn");
        assert_eq!(canon("Salt & Pepper!"), "salt pepper");
        assert_eq!(canon("3 Green Onions (scallions), thinly sliced"), "onions thinly");
    }

    #[test]
    fn test_short_tokens_dropped() {
        assert_eq!(canon("1 oz of ham"), "ham");
        assert_eq!(canon("an ox"), "");
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        let c = Canonicalizer::default();
        assert_eq!(c.canonicalize("   "), "");
        assert_eq!(c.canonical("   "), None);
        assert_eq!(c.canonical("2 cups"), None);
    }

    #[test]
    fn test_canonical_is_idempotent() {
        let c = Canonicalizer::default();
        for raw in [
            "2 cups all-purpose flour",
            "1/2 cup creamy peanut butter",
            "salt and pepper to taste",
            "1 (8 ounce) package cream cheese, softened",
        ] {
            let once = c.canonicalize(raw);
            assert_eq!(c.canonicalize(&once), once);
        }
    }

    #[test]
    fn test_canonicalize_all_dedups_in_mention_order() {
        let c = Canonicalizer::default();
        let raw = vec![
            "2 eggs",
            "1 cup milk",
            "1 egg yolk",
            "   ",
            "salt",
            "1 tsp",
        ];
        assert_eq!(c.canonicalize_all(&raw), vec!["egg", "milk", "salt"]);
    }

    #[test]
    fn test_custom_rule_table() {
        let rules = vec![OverrideRule::new("onion", &["powder"], "onion")];
        let c = Canonicalizer::new(StopwordFilter::culinary(), rules);
        assert_eq!(c.canonicalize("1 medium sweet onion"), "onion");
        assert_eq!(c.canonicalize("1 tsp onion powder"), "onion powder");
        // Default overrides no longer apply.
        assert_eq!(c.canonicalize("all-purpose flour"), "flour");
        assert_eq!(c.canonicalize("bread flour"), "bread flour");
    }

    #[test]
    fn test_rule_matches_in_isolation() {
        let rule = OverrideRule::new("milk", &["coconut", "almond"], "milk");
        assert!(rule.matches("skim milk"));
        assert!(!rule.matches("coconut milk"));
        assert!(!rule.matches("almond milk"));
        assert!(!rule.matches("cream"));
    }
}
