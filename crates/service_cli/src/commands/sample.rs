//! Sample command implementation
//!
//! Loads a population and parameters, runs the engine and writes the result.

use std::fmt::Write as _;

use sampling_engine::{generate_sample, SamplingParams, SamplingResult};
use tracing::{info, warn};

use crate::config::{CliConfig, OutputFormat};
use crate::loader::{load_params, load_population};
use crate::{CliError, Result};

/// Arguments of the sample command
#[derive(Debug, Clone, Default)]
pub struct SampleArgs {
    /// Population file (JSON or CSV)
    pub population: String,
    /// Parameter file; the `[params]` table is used when absent
    pub params: Option<String>,
    /// Seed override
    pub seed: Option<u64>,
    /// Output file; stdout when absent
    pub output: Option<String>,
    /// Output format override
    pub format: Option<String>,
    /// Run despite validation errors
    pub force: bool,
}

/// Run the sample command
pub fn run(config: &CliConfig, args: &SampleArgs) -> Result<()> {
    let format = match &args.format {
        Some(format) => format.parse::<OutputFormat>()?,
        None => config.output_format()?,
    };

    let population = load_population(&args.population)?;
    let params = load_params(args.params.as_deref(), config, args.seed)?;

    for warning in sampling_engine::advisory_warnings(&params)
        .into_iter()
        .chain(sampling_engine::population_warnings(&population, &params))
    {
        warn!("{}", warning);
    }

    check_params(&params, args.force)?;

    info!(
        transactions = population.len(),
        method = %params.method,
        seed = params.seed,
        "Generating sample"
    );
    let result = generate_sample(&population, &params)?;
    for warning in &result.warnings {
        warn!("{}", warning);
    }

    let rendered = match format {
        OutputFormat::Json if config.cli.pretty => serde_json::to_string_pretty(&result)?,
        OutputFormat::Json => serde_json::to_string(&result)?,
        OutputFormat::Table => render_table(&result),
    };

    match &args.output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            info!(path = %path, "Result written");
        }
        None => println!("{}", rendered),
    }
    Ok(())
}

/// Validate parameters, letting `force` override violations
pub fn check_params(params: &SamplingParams, force: bool) -> Result<()> {
    let errors = sampling_engine::validate(params);
    if errors.is_empty() {
        return Ok(());
    }
    if !force {
        return Err(CliError::Validation(errors));
    }
    for error in &errors {
        warn!("{}", error);
    }
    warn!(violations = errors.len(), "Proceeding despite validation errors (--force)");
    Ok(())
}

/// Render a result as a human-readable table
pub fn render_table(result: &SamplingResult) -> String {
    let plan = &result.plan;
    let calc = &result.metadata.calculation;
    let mut out = String::new();

    let _ = writeln!(out, "Method: {}  Test: {}  Seed: {}", plan.method, plan.test_type, plan.seed);
    let _ = writeln!(
        out,
        "Sample size: {} recommended, {} selected  (base {} x risk {:.2})",
        plan.recommended_sample_size, plan.actual_sample_size, calc.base_n, calc.risk_factor
    );
    let _ = writeln!(out, "Coverage: {:.2}%", plan.coverage_percentage);
    if let Some(threshold) = result.metadata.threshold {
        let _ = writeln!(out, "Threshold: {:.2}", threshold);
    }
    let _ = writeln!(out, "Param hash: {}", plan.param_hash);

    let _ = writeln!(out, "┌──────┬──────────────────────┬──────────────┬─────────────────┐");
    let _ = writeln!(out, "│ Rank │ ID                   │ Method       │          Amount │");
    let _ = writeln!(out, "├──────┼──────────────────────┼──────────────┼─────────────────┤");
    for item in &result.samples.total {
        let rank = item
            .selection_rank
            .map(|r| r.to_string())
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "│ {:>4} │ {:<20} │ {:<12} │ {:>15.2} │",
            rank,
            item.id(),
            item.selection_method,
            item.transaction.amount
        );
    }
    let _ = writeln!(out, "└──────┴──────────────────────┴──────────────┴─────────────────┘");

    let summary = result.summary();
    let _ = writeln!(
        out,
        "Targeted: {}  Residual: {}  Total: {}",
        summary.targeted, summary.residual, summary.total
    );
    for (index, drawn) in summary.per_stratum {
        let _ = writeln!(out, "  Stratum {}: {} items", index, drawn);
    }
    for warning in &result.warnings {
        let _ = writeln!(out, "warning: {}", warning);
    }
    out
}
