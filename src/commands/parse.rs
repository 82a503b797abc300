//! Parse command implementation

use anyhow::{Context, Result};
use std::path::PathBuf;
use strategy_builder::deserialize;
use tracing::info;

use super::read_input;

/// Config text to wire JSON
pub fn run(input: PathBuf, compact: bool) -> Result<()> {
    let text = read_input(&input)?;
    let config = deserialize(&text)
        .with_context(|| format!("Failed to parse config text in {}", input.display()))?;
    info!(
        "Parsed strategy: {} symbols, {} entry / {} exit conditions, {} indicators",
        config.symbols.len(),
        config.entry_conditions.len(),
        config.exit_conditions.len(),
        config.indicators.len()
    );

    let json = if compact {
        serde_json::to_string(&config)?
    } else {
        serde_json::to_string_pretty(&config)?
    };
    println!("{}", json);
    Ok(())
}
