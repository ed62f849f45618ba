//! Job configuration and stage orchestration
//!
//! - [`spec`]: the JSON job description
//! - [`validation`]: rule-based checks over a spec
//! - [`traits`]: the pluggable ingredient normalizer
//! - [`observer`]: stage hooks and timing
//! - [`runner`]: the pipeline and the batch job

pub mod observer;
pub mod runner;
pub mod spec;
pub mod traits;
pub mod validation;
