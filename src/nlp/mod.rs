//! Ingredient text processing
//!
//! This module provides stop-word filtering and ingredient canonicalization.

pub mod canonicalizer;
pub mod stopwords;
