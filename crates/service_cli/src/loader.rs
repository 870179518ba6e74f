//! Population, parameter and result file loading.
//!
//! Populations are read from a JSON array of transactions or from CSV with
//! the header `id,date,accountNumber,accountName,description,amount,riskScore,voucherRef`.
//! Parameter files are JSON, or TOML when the extension is `.toml`.

use std::path::Path;

use sampling_engine::{SamplingParams, SamplingResult, Transaction};
use tracing::debug;

use crate::config::CliConfig;
use crate::{CliError, Result};

fn read_existing(path: &str) -> Result<String> {
    if !Path::new(path).exists() {
        return Err(CliError::FileNotFound(path.to_string()));
    }
    Ok(std::fs::read_to_string(path)?)
}

fn has_extension(path: &str, ext: &str) -> bool {
    Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(ext))
}

/// Load a transaction population from JSON or CSV
pub fn load_population(path: &str) -> Result<Vec<Transaction>> {
    let content = read_existing(path)?;
    let population = if has_extension(path, "csv") {
        parse_population_csv(&content)?
    } else {
        serde_json::from_str(&content)?
    };
    debug!(path, transactions = population.len(), "population loaded");
    Ok(population)
}

/// Parse CSV rows into transactions
pub fn parse_population_csv(content: &str) -> Result<Vec<Transaction>> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());
    let population = reader
        .deserialize::<Transaction>()
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(population)
}

/// Load sampling parameters, falling back to the `[params]` table.
///
/// A seed given on the command line wins over `AUDITRIX_SEED`, which wins
/// over the seed in the file.
pub fn load_params(
    path: Option<&str>,
    config: &CliConfig,
    seed: Option<u64>,
) -> Result<SamplingParams> {
    let mut params = match path {
        Some(path) => {
            let content = read_existing(path)?;
            if has_extension(path, "toml") {
                toml::from_str(&content)?
            } else {
                serde_json::from_str(&content)?
            }
        }
        None => config.params.clone().ok_or_else(|| {
            CliError::invalid_argument("No --params file given and no [params] table configured")
        })?,
    };

    if let Some(seed) = seed.or(config.seed_override) {
        params.seed = seed;
    }
    Ok(params)
}

/// Load a stored sampling result
pub fn load_result(path: &str) -> Result<SamplingResult> {
    let content = read_existing(path)?;
    Ok(serde_json::from_str(&content)?)
}
