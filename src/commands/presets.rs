//! Presets command implementation

use anyhow::Result;
use itertools::Itertools;
use strategy_builder::presets;
use strategy_builder::serialize;
use tracing::info;

pub fn run(key: Option<String>) -> Result<()> {
    match key {
        Some(key) => {
            let Some(preset) = presets::find(&key) else {
                anyhow::bail!(
                    "Unknown preset: {}. Available: {}",
                    key,
                    presets::PRESET_KEYS.join(", ")
                );
            };
            info!("Rendering preset: {}", preset.name);
            println!("# {}", preset.name);
            println!("# {}", preset.description);
            println!(
                "# Indicators: {}",
                preset.config.indicators.iter().map(|i| i.name.label()).join(", ")
            );
            print!("{}", serialize(&preset.config));
        }
        None => {
            println!("\n{}", "=".repeat(60));
            println!("DEFAULT STRATEGIES");
            println!("{}", "=".repeat(60));
            for preset in presets::presets() {
                println!("{:<20} {}", preset.key, preset.name);
                println!("{:<20} {}", "", preset.description);
                println!("{:<20} sha256 {}", "", preset.checksum()?);
            }
            println!("{}", "=".repeat(60));
        }
    }
    Ok(())
}
