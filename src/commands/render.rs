//! Render command implementation

use anyhow::{Context, Result};
use std::path::PathBuf;
use strategy_builder::{serialize, StrategyConfig};
use tracing::{debug, info};

use super::read_input;

/// Wire JSON to config text
pub fn run(input: PathBuf) -> Result<()> {
    let json = read_input(&input)?;
    let config: StrategyConfig =
        serde_json::from_str(&json).context("Failed to parse strategy JSON")?;
    info!("Rendering strategy from: {}", input.display());
    debug!("Symbols: {:?}", config.symbols.iter().collect::<Vec<_>>());

    print!("{}", serialize(&config));
    Ok(())
}

/// Config text of a new strategy
pub fn run_default() -> Result<()> {
    info!("Rendering default strategy");
    print!("{}", serialize(&StrategyConfig::default()));
    Ok(())
}
