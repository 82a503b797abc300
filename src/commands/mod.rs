//! Subcommand implementations

pub mod edit;
pub mod parse;
pub mod presets;
pub mod render;
pub mod validate;

use anyhow::{Context, Result};
use std::io::Read;
use std::path::Path;
use strategy_builder::StrategyConfig;

/// Read a file, or stdin when the path is `-`
pub fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))
}

/// Strategy from wire JSON or config text, picked by the first character
pub fn load_config(input: &str) -> Result<StrategyConfig> {
    if input.trim_start().starts_with('{') {
        serde_json::from_str(input).context("Failed to parse strategy JSON")
    } else {
        StrategyConfig::from_text(input).context("Failed to parse config text")
    }
}
