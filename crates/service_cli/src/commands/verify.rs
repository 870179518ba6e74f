//! Verify command implementation
//!
//! Re-runs a stored plan and reports whether it reproduces.

use sampling_engine::verify_reproducibility;
use tracing::info;

use crate::config::CliConfig;
use crate::loader::{load_params, load_population, load_result};
use crate::{CliError, Result};

/// Run the verify command
pub fn run(
    config: &CliConfig,
    population_path: &str,
    params_path: Option<&str>,
    result_path: &str,
) -> Result<()> {
    let population = load_population(population_path)?;
    let params = load_params(params_path, config, None)?;
    let stored = load_result(result_path)?;

    info!(result = result_path, seed = stored.plan.seed, "Verifying stored plan");
    let report = verify_reproducibility(&stored, &population, &params)?;
    println!("{}", serde_json::to_string_pretty(&report)?);

    if report.is_reproducible() {
        println!("Stored plan reproduces");
        return Ok(());
    }

    let mut mismatches = Vec::new();
    if !report.param_hash_matches {
        mismatches.push("parameter hash differs".to_string());
    }
    if !report.seed_matches {
        mismatches.push(format!(
            "seed differs: stored {}, current {}",
            stored.plan.seed, params.seed
        ));
    }
    if let Some(position) = report.first_divergence {
        mismatches.push(format!("samples diverge at position {}", position));
    }
    Err(CliError::Validation(mismatches))
}
