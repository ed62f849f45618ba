//! Pipeline runner: orchestrates stage execution and artifact flow.
//!
//! [`Pipeline`] holds the three core stages (normalizer, network builder,
//! timeline estimator) and threads artifacts between them:
//!
//! ```text
//! raw ingredient lines ─▶ canonical lists ─▶ counts ─▶ thresholded network
//! ```
//!
//! [`Job`] wraps a pipeline with the dataset settings of a validated
//! [`JobSpec`]: it loads the table, narrows it, and produces the output
//! [`Document`].

use std::path::Path;

use crate::dataset::{self, CsvOptions};
use crate::error::{Error, Result};
use crate::export::{Document, NetworkDocument, RecipeDocument};
use crate::graph::cooccurrence::CooccurrenceCounts;
use crate::graph::network::{GroupClassifier, IngredientNetwork, NetworkBuilder};
use crate::nlp::canonicalizer::{Canonicalizer, OverrideRule};
use crate::nlp::stopwords::StopwordFilter;
use crate::pipeline::observer::{
    NoopObserver, PipelineObserver, StageClock, StageReport, StageReportBuilder, STAGE_AGGREGATE,
    STAGE_CANONICALIZE, STAGE_NETWORK, STAGE_TIMELINE,
};
use crate::pipeline::spec::{JobSpec, OutputMode};
use crate::pipeline::traits::IngredientNormalizer;
use crate::pipeline::validation::ValidationEngine;
use crate::timeline::TimelineEstimator;
use crate::types::{NetworkConfig, RecipeRecord};

// ---------------------------------------------------------------------------
// Conditional tracing support
// ---------------------------------------------------------------------------

/// Enter a tracing span for a pipeline stage (when the `tracing` feature is
/// enabled). When disabled, this is a no-op and the compiler eliminates it.
macro_rules! trace_stage {
    ($name:expr) => {
        #[cfg(feature = "tracing")]
        let _span = tracing::info_span!("pipeline_stage", stage = $name).entered();
    };
}

// ============================================================================
// Pipeline
// ============================================================================

/// The core stages, statically composed.
#[derive(Debug, Clone)]
pub struct Pipeline<N = Canonicalizer> {
    pub normalizer: N,
    pub network_builder: NetworkBuilder,
    pub timeline: TimelineEstimator,
}

impl Default for Pipeline<Canonicalizer> {
    fn default() -> Self {
        Self::new(
            Canonicalizer::default(),
            NetworkBuilder::default(),
            TimelineEstimator::default(),
        )
    }
}

impl<N: IngredientNormalizer> Pipeline<N> {
    pub fn new(
        normalizer: N,
        network_builder: NetworkBuilder,
        timeline: TimelineEstimator,
    ) -> Self {
        Self {
            normalizer,
            network_builder,
            timeline,
        }
    }

    /// Normalize every recipe's ingredient lines.
    pub fn canonicalize_recipes(
        &self,
        raw: &[Vec<String>],
        observer: &mut impl PipelineObserver,
    ) -> Vec<Vec<String>> {
        trace_stage!(STAGE_CANONICALIZE);
        observer.on_stage_start(STAGE_CANONICALIZE);
        let clock = StageClock::start();

        let lists: Vec<Vec<String>> = raw.iter().map(|r| self.normalizer.normalize(r)).collect();

        let lines_in: usize = raw.iter().map(Vec::len).sum();
        let names_out: usize = lists.iter().map(Vec::len).sum();
        let report = StageReportBuilder::new(clock.elapsed())
            .items_in(lines_in)
            .items_out(names_out)
            .build();
        observer.on_stage_end(STAGE_CANONICALIZE, &report);
        lists
    }

    /// Count popularity and pairings of already-normalized recipes.
    pub fn aggregate(
        &self,
        recipes: &[Vec<String>],
        cfg: &NetworkConfig,
        observer: &mut impl PipelineObserver,
    ) -> CooccurrenceCounts {
        trace_stage!(STAGE_AGGREGATE);
        observer.on_stage_start(STAGE_AGGREGATE);
        let clock = StageClock::start();

        let counts = CooccurrenceCounts::aggregate(recipes, cfg);

        let report = StageReportBuilder::new(clock.elapsed())
            .items_in(recipes.len())
            .nodes(counts.ingredient_count())
            .edges(counts.pair_count())
            .build();
        observer.on_stage_end(STAGE_AGGREGATE, &report);
        observer.on_counts(&counts);
        counts
    }

    /// Threshold counts into the network.
    pub fn threshold(
        &self,
        counts: &CooccurrenceCounts,
        cfg: &NetworkConfig,
        observer: &mut impl PipelineObserver,
    ) -> Result<IngredientNetwork> {
        trace_stage!(STAGE_NETWORK);
        observer.on_stage_start(STAGE_NETWORK);
        let clock = StageClock::start();

        let network = self.network_builder.build(counts, cfg)?;

        let report = StageReportBuilder::new(clock.elapsed())
            .nodes(network.node_count())
            .edges(network.link_count())
            .build();
        observer.on_stage_end(STAGE_NETWORK, &report);
        observer.on_network(&network);
        Ok(network)
    }

    /// Run all three core stages over raw ingredient lists.
    pub fn build_network(
        &self,
        raw: &[Vec<String>],
        cfg: &NetworkConfig,
    ) -> Result<IngredientNetwork> {
        self.build_network_observed(raw, cfg, &mut NoopObserver)
    }

    /// Like [`Pipeline::build_network`], notifying `observer` at each stage.
    pub fn build_network_observed(
        &self,
        raw: &[Vec<String>],
        cfg: &NetworkConfig,
        observer: &mut impl PipelineObserver,
    ) -> Result<IngredientNetwork> {
        cfg.validate()?;
        let lists = self.canonicalize_recipes(raw, observer);
        let counts = self.aggregate(&lists, cfg, observer);
        self.threshold(&counts, cfg, observer)
    }

    /// Network over all recipes plus the timeline of the first one.
    ///
    /// An empty collection is an [`Error::EmptyDataset`]: there is no recipe
    /// to feature.
    pub fn network_document(
        &self,
        recipes: &[RecipeRecord],
        cfg: &NetworkConfig,
        observer: &mut impl PipelineObserver,
    ) -> Result<NetworkDocument> {
        let featured = recipes
            .first()
            .ok_or_else(|| Error::EmptyDataset("for the network document".to_string()))?;

        let raw: Vec<Vec<String>> = recipes.iter().map(|r| r.ingredients.clone()).collect();
        let network = self.build_network_observed(&raw, cfg, observer)?;

        trace_stage!(STAGE_TIMELINE);
        observer.on_stage_start(STAGE_TIMELINE);
        let clock = StageClock::start();
        let timeline = self.timeline.build(&featured.directions);
        observer.on_stage_end(STAGE_TIMELINE, &StageReport::new(clock.elapsed()));

        Ok(NetworkDocument {
            recipe_title: featured.title.clone(),
            ingredients: network.nodes,
            links: network.links,
            timeline: timeline.steps,
        })
    }

    /// Canonical ingredients and timeline for every recipe.
    pub fn recipe_documents(
        &self,
        recipes: &[RecipeRecord],
        observer: &mut impl PipelineObserver,
    ) -> Vec<RecipeDocument> {
        let raw: Vec<Vec<String>> = recipes.iter().map(|r| r.ingredients.clone()).collect();
        let lists = self.canonicalize_recipes(&raw, observer);

        trace_stage!(STAGE_TIMELINE);
        observer.on_stage_start(STAGE_TIMELINE);
        let clock = StageClock::start();
        let docs: Vec<RecipeDocument> = recipes
            .iter()
            .zip(lists)
            .map(|(recipe, ingredients)| {
                let timeline = self.timeline.build(&recipe.directions);
                RecipeDocument {
                    id: recipe.id,
                    title: recipe.title.clone(),
                    subcategory: recipe.subcategory.clone(),
                    ingredients,
                    timeline: timeline.steps,
                    total_time: timeline.total_time,
                }
            })
            .collect();
        let report = StageReportBuilder::new(clock.elapsed())
            .items_in(recipes.len())
            .items_out(docs.len())
            .build();
        observer.on_stage_end(STAGE_TIMELINE, &report);
        docs
    }
}

// ============================================================================
// Job: a pipeline plus dataset settings
// ============================================================================

/// A runnable batch job built from a validated [`JobSpec`].
#[derive(Debug, Clone)]
pub struct Job {
    pub pipeline: Pipeline<Canonicalizer>,
    pub csv: CsvOptions,
    pub category: Option<String>,
    pub max_recipes: usize,
    pub seed: u64,
    pub network: NetworkConfig,
    pub mode: OutputMode,
}

impl Default for Job {
    fn default() -> Self {
        // The default spec always validates.
        Self::assemble(&JobSpec::default())
    }
}

impl Job {
    /// Validate `spec` and assemble the job.
    ///
    /// Warnings are logged; any error fails with [`Error::InvalidSpec`]
    /// listing every problem.
    pub fn from_spec(spec: &JobSpec) -> Result<Self> {
        let report = ValidationEngine::with_defaults().validate(spec);

        #[cfg(feature = "tracing")]
        for warning in report.warnings() {
            tracing::warn!("{warning}");
        }

        if report.has_errors() {
            let messages: Vec<String> = report.errors().map(|e| e.to_string()).collect();
            return Err(Error::InvalidSpec(messages.join("; ")));
        }
        Ok(Self::assemble(spec))
    }

    fn assemble(spec: &JobSpec) -> Self {
        let mut stopwords = StopwordFilter::culinary();
        stopwords.add_stopwords(&spec.lexicon.extra_stopwords);
        stopwords.remove_stopwords(&spec.lexicon.keep_words);

        let overrides = spec
            .lexicon
            .overrides
            .clone()
            .unwrap_or_else(OverrideRule::default_table);

        let defaults = GroupClassifier::default();
        let classifier = GroupClassifier {
            pantry: spec.lexicon.pantry.clone().unwrap_or(defaults.pantry),
            produce: spec.lexicon.produce.clone().unwrap_or(defaults.produce),
        };

        let pipeline = Pipeline::new(
            Canonicalizer::new(stopwords, overrides),
            NetworkBuilder::new(classifier),
            TimelineEstimator::with_config(spec.timeline.clone()),
        );

        let mode = spec.output.mode;
        Self {
            pipeline,
            csv: CsvOptions {
                delimiter: spec.input.delimiter.as_bytes().first().copied().unwrap_or(b';'),
                columns: spec.input.columns.clone(),
            },
            category: spec.filter.category.clone(),
            max_recipes: spec
                .filter
                .max_recipes
                .unwrap_or_else(|| mode.default_max_recipes()),
            seed: spec.filter.seed,
            network: spec.network.to_config(),
            mode,
        }
    }

    /// Apply the category filter and sampling to an in-memory table.
    pub fn select(&self, recipes: Vec<RecipeRecord>) -> Vec<RecipeRecord> {
        let total = recipes.len();
        let recipes = match &self.category {
            Some(category) => dataset::filter_by_category(recipes, category),
            None => recipes,
        };
        let matched = recipes.len();
        let selected = dataset::sample(recipes, self.max_recipes, self.seed);

        #[cfg(feature = "tracing")]
        tracing::info!(
            total,
            matched,
            selected = selected.len(),
            category = self.category.as_deref().unwrap_or("*"),
            "selected recipes"
        );
        #[cfg(not(feature = "tracing"))]
        let _ = (total, matched);

        selected
    }

    /// Read, filter and sample the recipe table at `path`.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<Vec<RecipeRecord>> {
        let recipes = dataset::read_recipes_from_path(path, &self.csv)?;
        Ok(self.select(recipes))
    }

    /// Produce the output document for already-selected recipes.
    pub fn run(
        &self,
        recipes: &[RecipeRecord],
        observer: &mut impl PipelineObserver,
    ) -> Result<Document> {
        match self.mode {
            OutputMode::Network => {
                if recipes.is_empty() {
                    let scope = match &self.category {
                        Some(c) => format!("by category \"{c}\""),
                        None => "the input table".to_string(),
                    };
                    return Err(Error::EmptyDataset(scope));
                }
                let doc = self
                    .pipeline
                    .network_document(recipes, &self.network, observer)?;
                Ok(Document::Network(doc))
            }
            OutputMode::Recipes => Ok(Document::Recipes(
                self.pipeline.recipe_documents(recipes, observer),
            )),
        }
    }
}
