//! Validate command implementation

use anyhow::Result;
use std::path::PathBuf;
use tracing::{info, warn};

use super::{load_config, read_input};

pub fn run(input: PathBuf) -> Result<()> {
    let config = load_config(&read_input(&input)?)?;
    let errors = config.validation_errors();

    if errors.is_empty() {
        info!("Strategy in {} is valid", input.display());
        println!("OK");
        return Ok(());
    }

    for error in &errors {
        warn!("{}", error);
        println!("- {}", error);
    }
    anyhow::bail!("{} validation error(s) in {}", errors.len(), input.display());
}
