//! Strategy editor session
//!
//! Owns the strategy being built and keeps its rendered text in step with
//! it. Every edit either succeeds and re-renders, or fails and leaves both
//! untouched.

use tracing::{debug, warn};

use crate::error::StrategyResult;
use crate::indicators::CatalogueMode;
use crate::model::{Edit, StrategyConfig};
use crate::serializer;

#[derive(Debug, Clone)]
pub struct StrategyEditor {
    config: StrategyConfig,
    text: String,
    mode: CatalogueMode,
}

impl StrategyEditor {
    pub fn new(config: StrategyConfig, mode: CatalogueMode) -> Self {
        let text = serializer::serialize(&config);
        StrategyEditor { config, text, mode }
    }

    /// Editor seeded from stored config text
    pub fn from_text(text: &str, mode: CatalogueMode) -> StrategyResult<Self> {
        let config = serializer::deserialize(text)?;
        Ok(Self::new(config, mode))
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    /// Current config text
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn mode(&self) -> CatalogueMode {
        self.mode
    }

    /// Apply one edit. Returns whether the strategy changed.
    pub fn apply(&mut self, edit: Edit) -> StrategyResult<bool> {
        let label = format!("{:?}", edit);
        match self.config.apply_mut(edit, self.mode) {
            Ok(true) => {
                self.text = serializer::serialize(&self.config);
                debug!(edit = %label, "Strategy updated");
                Ok(true)
            }
            Ok(false) => {
                debug!(edit = %label, "Edit left strategy unchanged");
                Ok(false)
            }
            Err(e) => {
                warn!(edit = %label, error = %e, "Edit rejected");
                Err(e)
            }
        }
    }

    /// Replace the strategy with one parsed from text. On error the current
    /// strategy is kept.
    pub fn load_text(&mut self, text: &str) -> StrategyResult<()> {
        let config = serializer::deserialize(text)?;
        self.text = serializer::serialize(&config);
        self.config = config;
        debug!("Strategy loaded from text");
        Ok(())
    }

    pub fn into_config(self) -> StrategyConfig {
        self.config
    }
}

impl Default for StrategyEditor {
    fn default() -> Self {
        Self::new(StrategyConfig::default(), CatalogueMode::default())
    }
}
