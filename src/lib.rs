//! Strategy Builder
//!
//! Strategy configuration model for a retail algo-trading front-end:
//! symbols, schedule, entry/exit conditions, risk management and declared
//! indicators, together with the human-readable config text shown while
//! building a strategy and the payloads sent to the backend.

pub mod config;
pub mod editor;
pub mod error;
pub mod indicators;
pub mod model;
pub mod payload;
pub mod presets;
pub mod risk;
pub mod serializer;
pub mod types;

pub use config::Settings;
pub use editor::StrategyEditor;
pub use error::{StrategyError, StrategyResult};
pub use model::{Condition, Edit, Indicator, StrategyConfig};
pub use serializer::{deserialize, serialize};
pub use types::*;
