//! Stage trait definitions for the pipeline.
//!
//! The ingredient normalizer is the one stage with more than one sensible
//! implementation, so it sits behind a trait. Implementations are
//! statically dispatched by [`super::runner::Pipeline`]; the trait is also
//! object safe.

use crate::nlp::canonicalizer::Canonicalizer;

/// Reduces a recipe's raw ingredient lines to ingredient names.
///
/// # Contract
///
/// - The output holds no duplicates and no empty names.
/// - Output order follows first mention in the input.
/// - **Idempotent**: normalizing an already-normalized list returns it
///   unchanged.
pub trait IngredientNormalizer {
    fn normalize(&self, raw: &[String]) -> Vec<String>;
}

impl IngredientNormalizer for Canonicalizer {
    fn normalize(&self, raw: &[String]) -> Vec<String> {
        self.canonicalize_all(raw)
    }
}

/// Normalizer that only trims and lowercases.
///
/// Useful to inspect the network of raw ingredient lines before any
/// canonicalization.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowercaseNormalizer;

impl IngredientNormalizer for LowercaseNormalizer {
    fn normalize(&self, raw: &[String]) -> Vec<String> {
        let mut out: Vec<String> = Vec::with_capacity(raw.len());
        for line in raw {
            let name = line.trim().to_lowercase();
            if !name.is_empty() && !out.contains(&name) {
                out.push(name);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_canonicalizer_as_normalizer() {
        let raw = lines(&["2 cups all-purpose flour", "1 cup flour", "  "]);
        assert_eq!(Canonicalizer::default().normalize(&raw), vec!["flour"]);
    }

    #[test]
    fn test_lowercase_normalizer() {
        let raw = lines(&[" 2 Eggs", "2 eggs", "", "Milk"]);
        assert_eq!(LowercaseNormalizer.normalize(&raw), vec!["2 eggs", "milk"]);
    }

    #[test]
    fn test_normalizers_are_idempotent() {
        let raw = lines(&["1 cup Brown Sugar", "3 EGGS", "pinch of salt"]);

        let c = Canonicalizer::default();
        let once = c.normalize(&raw);
        assert_eq!(c.normalize(&once), once);

        let once = LowercaseNormalizer.normalize(&raw);
        assert_eq!(LowercaseNormalizer.normalize(&once), once);
    }

    #[test]
    fn test_normalizer_as_trait_object() {
        let normalizers: Vec<Box<dyn IngredientNormalizer>> =
            vec![Box::new(Canonicalizer::default()), Box::new(LowercaseNormalizer)];
        let raw = lines(&["2 Eggs"]);
        let out: Vec<_> = normalizers.iter().map(|n| n.normalize(&raw)).collect();
        assert_eq!(out, vec![vec!["egg".to_string()], vec!["2 eggs".to_string()]]);
    }
}
