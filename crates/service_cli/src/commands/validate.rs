//! Validate command implementation
//!
//! Checks sampling parameters against the business rules and prints
//! advisory warnings.

use tracing::{info, warn};

use crate::config::CliConfig;
use crate::loader::load_params;
use crate::{CliError, Result};

/// Run the validate command
pub fn run(config: &CliConfig, params_path: Option<&str>) -> Result<()> {
    let params = load_params(params_path, config, None)?;
    info!(method = %params.method, test_type = %params.test_type, "Validating parameters");

    for advisory in sampling_engine::advisory_warnings(&params) {
        warn!("{}", advisory);
        println!("warning: {}", advisory);
    }

    let errors = sampling_engine::validate(&params);
    if errors.is_empty() {
        println!("Parameters are valid");
        return Ok(());
    }

    for error in &errors {
        println!("error: {}", error);
    }
    Err(CliError::Validation(errors))
}
