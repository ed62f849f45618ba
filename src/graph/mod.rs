//! Co-occurrence counting and network construction
//!
//! This module counts ingredient popularity and pairings across recipes
//! and thresholds the counts into the visualization network.

pub mod cooccurrence;
pub mod network;
