//! Built-in default strategies
//!
//! Read-only templates offered to every user. Each carries a stable key;
//! the checksum of its config lets a stored copy be compared against the
//! current definition.

use chrono::NaiveDate;
use rust_decimal_macros::dec;
use sha2::{Digest, Sha256};

use crate::indicators::IndicatorKind;
use crate::model::{Condition, Indicator, StrategyConfig};
use crate::risk::RiskManagement;
use crate::types::{Comparison, PositionSizingMethod, Timeframe};

#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub config: StrategyConfig,
}

impl Preset {
    pub fn checksum(&self) -> Result<String, serde_json::Error> {
        checksum(&self.config)
    }

    /// Whether a stored copy differs from this definition
    pub fn differs_from(&self, stored: &StrategyConfig) -> Result<bool, serde_json::Error> {
        Ok(checksum(stored)? != self.checksum()?)
    }
}

/// SHA-256 hex digest of the config's JSON wire form with keys sorted
pub fn checksum(config: &StrategyConfig) -> Result<String, serde_json::Error> {
    // serde_json::Value objects are key-ordered maps
    let canonical = serde_json::to_value(config)?;
    let bytes = serde_json::to_vec(&canonical)?;
    Ok(hex::encode(Sha256::digest(&bytes)))
}

pub const PRESET_KEYS: [&str; 3] = ["ema_crossover_v1", "bollinger_bands_v1", "rsi_reversal_v1"];

/// All presets, in display order
pub fn presets() -> Vec<Preset> {
    vec![ema_crossover(), bollinger_bands(), rsi_reversal()]
}

pub fn find(key: &str) -> Option<Preset> {
    presets().into_iter().find(|p| p.key == key)
}

fn year_2024() -> (NaiveDate, NaiveDate) {
    (
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or(NaiveDate::MIN),
        NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or(NaiveDate::MIN),
    )
}

fn preset_config(symbols: &[&str], timeframe: Timeframe) -> StrategyConfig {
    let (start, end) = year_2024();
    let mut config = StrategyConfig::empty(timeframe, start, end);
    for symbol in symbols {
        config.add_symbol(symbol);
    }
    config
}

fn ema_crossover() -> Preset {
    let mut config = preset_config(&["AAPL", "MSFT", "GOOG"], Timeframe::Day1);
    config.entry_conditions = vec![Condition::new("ema_5", Comparison::CrossesAbove, "ema_20")];
    config.exit_conditions = vec![Condition::new("ema_5", Comparison::CrossesBelow, "ema_20")];
    config.risk_management = RiskManagement {
        position_sizing_method: PositionSizingMethod::RiskBased,
        risk_per_trade: 0.02,
        stop_loss: 0.05,
        take_profit: 0.15,
        max_position_size: dec!(10000),
        atr_multiplier: 2.0,
    };
    config.indicators = vec![
        Indicator::with_params(IndicatorKind::Ema, [("period", 5.0)]),
        Indicator::with_params(IndicatorKind::Ema, [("period", 20.0)]),
        Indicator::with_params(IndicatorKind::Rsi, [("period", 14.0)]),
    ];

    Preset {
        key: "ema_crossover_v1",
        name: "EMA Crossover Strategy",
        description: "Basic EMA crossover with RSI filter - a trend-following strategy",
        config,
    }
}

fn bollinger_bands() -> Preset {
    let mut config = preset_config(&["SPY", "QQQ"], Timeframe::Hour1);
    config.entry_conditions = vec![Condition::new("close", Comparison::Below, "lowerband")];
    config.exit_conditions = vec![Condition::new("close", Comparison::Above, "middleband")];
    config.risk_management = RiskManagement {
        position_sizing_method: PositionSizingMethod::RiskBased,
        risk_per_trade: 0.015,
        stop_loss: 0.03,
        take_profit: 0.06,
        max_position_size: dec!(15000),
        atr_multiplier: 1.5,
    };
    config.indicators = vec![
        Indicator::with_params(IndicatorKind::BollingerBands, [("period", 20.0), ("std", 2.0)]),
        Indicator::with_params(IndicatorKind::Rsi, [("period", 14.0)]),
    ];

    Preset {
        key: "bollinger_bands_v1",
        name: "Bollinger Bands Strategy",
        description: "Mean reversion strategy using Bollinger Bands",
        config,
    }
}

fn rsi_reversal() -> Preset {
    let mut config = preset_config(&["TSLA", "NVDA", "AMD"], Timeframe::Hour4);
    config.entry_conditions = vec![Condition::new("rsi", Comparison::Below, "30")];
    config.exit_conditions = vec![Condition::new("rsi", Comparison::Above, "70")];
    config.risk_management = RiskManagement {
        position_sizing_method: PositionSizingMethod::RiskBased,
        risk_per_trade: 0.025,
        stop_loss: 0.04,
        take_profit: 0.12,
        max_position_size: dec!(20000),
        atr_multiplier: 2.5,
    };
    config.indicators = vec![
        Indicator::with_params(IndicatorKind::Rsi, [("period", 14.0)]),
        Indicator::with_params(IndicatorKind::Sma, [("period", 50.0)]),
    ];

    Preset {
        key: "rsi_reversal_v1",
        name: "RSI Reversal Strategy",
        description: "Momentum reversal strategy based on RSI oversold/overbought conditions",
        config,
    }
}
