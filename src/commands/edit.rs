//! Edit command implementation

use anyhow::{Context, Result};
use std::path::PathBuf;
use strategy_builder::indicators::CatalogueMode;
use strategy_builder::{Edit, StrategyEditor, Timeframe};
use tracing::{debug, info};

use super::{load_config, read_input};

/// Edits requested on the command line, applied in this order
#[derive(Debug, Default)]
pub struct EditArgs {
    pub add_symbols: Vec<String>,
    pub remove_symbols: Vec<String>,
    pub timeframe: Option<String>,
    pub add_indicators: Vec<String>,
}

impl EditArgs {
    fn into_edits(self) -> Result<Vec<Edit>> {
        let mut edits = Vec::new();
        edits.extend(self.add_symbols.into_iter().map(Edit::AddSymbol));
        edits.extend(self.remove_symbols.into_iter().map(Edit::RemoveSymbol));
        if let Some(tf) = self.timeframe {
            let timeframe: Timeframe = tf.parse().context("Invalid --timeframe")?;
            edits.push(Edit::SetTimeframe(timeframe));
        }
        edits.extend(self.add_indicators.into_iter().map(Edit::AddIndicator));
        Ok(edits)
    }
}

/// Apply edits to a strategy and print the resulting config text
pub fn run(input: PathBuf, args: EditArgs, mode: CatalogueMode) -> Result<()> {
    let config = load_config(&read_input(&input)?)?;
    let mut editor = StrategyEditor::new(config, mode);
    debug!("Editing with {:?} catalogue", editor.mode());

    let mut changed = 0;
    for edit in args.into_edits()? {
        if editor.apply(edit)? {
            changed += 1;
        }
    }
    info!("Applied {} edit(s) to {}", changed, input.display());

    print!("{}", editor.text());
    Ok(())
}
