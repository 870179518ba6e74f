//! Batch command implementation
//!
//! Runs independent sampling requests over one population in parallel.
//! Each request owns its RNG, so results match sequential runs.

use rayon::prelude::*;
use sampling_engine::{generate_sample, SamplingResult};
use tracing::{info, warn};

use crate::config::CliConfig;
use crate::loader::{load_params, load_population};
use crate::{CliError, Result};

/// Run the batch command
pub fn run(config: &CliConfig, population_path: &str, params_paths: &[String]) -> Result<()> {
    if params_paths.is_empty() {
        return Err(CliError::invalid_argument("batch needs at least one --params file"));
    }

    let population = load_population(population_path)?;
    info!(
        requests = params_paths.len(),
        transactions = population.len(),
        "Running batch"
    );

    let outcomes: Vec<(&String, Result<SamplingResult>)> = params_paths
        .par_iter()
        .map(|path| (path, run_one(config, &population, path)))
        .collect();

    let mut failures = Vec::new();
    for (path, outcome) in outcomes {
        match outcome {
            Ok(result) => println!("{}", summary_line(path, &result)),
            Err(err) => {
                warn!(params = %path, error = %err, "Request failed");
                println!("{}: FAILED {}", path, err);
                failures.push(format!("{}: {}", path, err));
            }
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(CliError::Validation(failures))
    }
}

fn run_one(
    config: &CliConfig,
    population: &[sampling_engine::Transaction],
    params_path: &str,
) -> Result<SamplingResult> {
    let params = load_params(Some(params_path), config, None)?;
    let errors = sampling_engine::validate(&params);
    if !errors.is_empty() {
        return Err(CliError::Validation(errors));
    }
    Ok(generate_sample(population, &params)?)
}

fn summary_line(path: &str, result: &SamplingResult) -> String {
    let summary = result.summary();
    format!(
        "{}: method={} seed={} recommended={} selected={} (targeted={}, residual={}) coverage={:.2}% hash={}",
        path,
        result.plan.method,
        result.plan.seed,
        result.plan.recommended_sample_size,
        summary.total,
        summary.targeted,
        summary.residual,
        result.plan.coverage_percentage,
        &result.plan.param_hash[..12.min(result.plan.param_hash.len())]
    )
}
