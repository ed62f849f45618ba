//! `recipe-graph`: build visualization JSON from a recipe CSV.
//!
//! ```bash
//! recipe-graph [--config job.json] [--mode network|recipes] [input.csv] [output.json]
//! ```
//!
//! Positional paths override the ones in the job spec. Logging honours
//! `RUST_LOG` (default `info`).

use std::env;
use std::path::PathBuf;
use std::process;

use anyhow::{anyhow, bail, Context, Result};
use recipe_graph::export::write_json;
use recipe_graph::pipeline::observer::TracingObserver;
use recipe_graph::pipeline::runner::Job;
use recipe_graph::pipeline::spec::{JobSpec, OutputMode};
use tracing::info;
use tracing_subscriber::EnvFilter;

const USAGE: &str =
    "Usage: recipe-graph [--config <job.json>] [--mode network|recipes] [input.csv] [output.json]";

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    mode: Option<OutputMode>,
    input: Option<PathBuf>,
    output: Option<PathBuf>,
}

fn parse_args(mut raw: impl Iterator<Item = String>) -> Result<Args> {
    let mut args = Args::default();
    let mut positional = Vec::new();

    while let Some(arg) = raw.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                println!("{USAGE}");
                process::exit(0);
            }
            "-c" | "--config" => {
                let value = raw.next().ok_or_else(|| anyhow!("--config needs a path"))?;
                args.config = Some(PathBuf::from(value));
            }
            "-m" | "--mode" => {
                let value = raw.next().ok_or_else(|| anyhow!("--mode needs a value"))?;
                args.mode = Some(value.parse()?);
            }
            flag if flag.starts_with('-') => bail!("unknown flag {flag}\n{USAGE}"),
            _ => positional.push(PathBuf::from(&arg)),
        }
    }

    let mut positional = positional.into_iter();
    args.input = positional.next();
    args.output = positional.next();
    if positional.next().is_some() {
        bail!("too many arguments\n{USAGE}");
    }
    Ok(args)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    if let Err(err) = run() {
        eprintln!("Error: {err:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args = parse_args(env::args().skip(1))?;

    let mut spec = match &args.config {
        Some(path) => JobSpec::from_path(path)
            .with_context(|| format!("loading job spec {}", path.display()))?,
        None => JobSpec::default(),
    };
    if let Some(mode) = args.mode {
        spec.output.mode = mode;
    }

    let input = args
        .input
        .or_else(|| spec.input.path.clone())
        .ok_or_else(|| anyhow!("no input CSV given\n{USAGE}"))?;
    let output = args
        .output
        .or_else(|| spec.output.path.clone())
        .unwrap_or_else(|| match spec.output.mode {
            OutputMode::Network => PathBuf::from("data.json"),
            OutputMode::Recipes => PathBuf::from("parsed_data.json"),
        });

    let job = Job::from_spec(&spec).context("invalid job spec")?;

    info!(path = %input.display(), mode = spec.output.mode.as_str(), "reading recipes");
    let recipes = job
        .load(&input)
        .with_context(|| format!("reading {}", input.display()))?;

    let document = job.run(&recipes, &mut TracingObserver)?;
    write_json(&output, &document, spec.output.pretty)
        .with_context(|| format!("writing {}", output.display()))?;

    info!(
        recipes = recipes.len(),
        output = %output.display(),
        "saved {}",
        document.summary()
    );
    Ok(())
}
