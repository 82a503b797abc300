//! Indicator catalogue
//!
//! The fixed set of technical indicators a strategy may declare, with the
//! default parameters each one starts from when added in the builder.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::StrategyError;

/// Raw price/volume columns usable as condition operands
pub const OHLCV_COLUMNS: [&str; 5] = ["open", "high", "low", "close", "volume"];

/// Indicator parameters keyed by name, in declaration order
pub type IndicatorParams = IndexMap<String, f64>;

/// Catalogue entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IndicatorKind {
    #[serde(rename = "SMA")]
    Sma,
    #[serde(rename = "EMA")]
    Ema,
    #[serde(rename = "RSI")]
    Rsi,
    #[serde(rename = "MACD")]
    Macd,
    #[serde(rename = "Bollinger_Bands")]
    BollingerBands,
    #[serde(rename = "ATR")]
    Atr,
    #[serde(rename = "Stochastic")]
    Stochastic,
}

impl IndicatorKind {
    pub const ALL: [IndicatorKind; 7] = [
        IndicatorKind::Sma,
        IndicatorKind::Ema,
        IndicatorKind::Rsi,
        IndicatorKind::Macd,
        IndicatorKind::BollingerBands,
        IndicatorKind::Atr,
        IndicatorKind::Stochastic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IndicatorKind::Sma => "SMA",
            IndicatorKind::Ema => "EMA",
            IndicatorKind::Rsi => "RSI",
            IndicatorKind::Macd => "MACD",
            IndicatorKind::BollingerBands => "Bollinger_Bands",
            IndicatorKind::Atr => "ATR",
            IndicatorKind::Stochastic => "Stochastic",
        }
    }

    /// Human readable label shown in the indicator picker
    pub fn label(&self) -> &'static str {
        match self {
            IndicatorKind::Sma => "Simple Moving Average",
            IndicatorKind::Ema => "Exponential Moving Average",
            IndicatorKind::Rsi => "Relative Strength Index",
            IndicatorKind::Macd => "MACD",
            IndicatorKind::BollingerBands => "Bollinger Bands",
            IndicatorKind::Atr => "Average True Range",
            IndicatorKind::Stochastic => "Stochastic Oscillator",
        }
    }

    fn default_param_table(&self) -> &'static [(&'static str, f64)] {
        match self {
            IndicatorKind::Sma => &[("period", 20.0)],
            IndicatorKind::Ema => &[("period", 12.0)],
            IndicatorKind::Rsi => &[("period", 14.0)],
            IndicatorKind::Macd => &[("fast", 12.0), ("slow", 26.0), ("signal", 9.0)],
            IndicatorKind::BollingerBands => &[("period", 20.0), ("std", 2.0)],
            IndicatorKind::Atr => &[("period", 14.0)],
            IndicatorKind::Stochastic => &[("k_period", 14.0), ("d_period", 3.0)],
        }
    }

    /// Fresh copy of the default parameters. Each call allocates a new map,
    /// so edits to one indicator never reach the catalogue or its siblings.
    pub fn default_params(&self) -> IndicatorParams {
        self.default_param_table()
            .iter()
            .map(|(name, value)| (name.to_string(), *value))
            .collect()
    }

    /// Look up a catalogue entry by its exact name
    pub fn lookup(name: &str) -> Option<IndicatorKind> {
        IndicatorKind::ALL.iter().copied().find(|k| k.as_str() == name)
    }
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IndicatorKind {
    type Err = StrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        IndicatorKind::lookup(s).ok_or_else(|| StrategyError::UnknownIndicator(s.to_string()))
    }
}

/// What `add_indicator` does with a name missing from the catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogueMode {
    /// Ignore the request and leave the strategy unchanged
    #[default]
    Lenient,
    /// Reject with `StrategyError::UnknownIndicator`
    Strict,
}

impl FromStr for CatalogueMode {
    type Err = StrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lenient" => Ok(CatalogueMode::Lenient),
            "strict" => Ok(CatalogueMode::Strict),
            other => Err(StrategyError::InvalidRequest(format!(
                "catalogue mode must be `strict` or `lenient`, got `{}`",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_defaults() {
        let macd = IndicatorKind::Macd.default_params();
        let keys: Vec<_> = macd.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["fast", "slow", "signal"]);
        assert_eq!(macd["signal"], 9.0);

        let stoch = IndicatorKind::Stochastic.default_params();
        assert_eq!(stoch.get_index(0), Some((&"k_period".to_string(), &14.0)));
    }

    #[test]
    fn test_default_params_are_independent() {
        let mut a = IndicatorKind::Sma.default_params();
        a.insert("period".to_string(), 50.0);
        assert_eq!(IndicatorKind::Sma.default_params()["period"], 20.0);
    }

    #[test]
    fn test_lookup_is_exact() {
        assert_eq!(IndicatorKind::lookup("Bollinger_Bands"), Some(IndicatorKind::BollingerBands));
        assert_eq!(IndicatorKind::lookup("sma"), None);
        assert_eq!(IndicatorKind::lookup("BBANDS"), None);
    }

    #[test]
    fn test_labels() {
        assert_eq!(IndicatorKind::Rsi.label(), "Relative Strength Index");
        assert_eq!(IndicatorKind::BollingerBands.label(), "Bollinger Bands");
        for kind in IndicatorKind::ALL {
            assert!(!kind.label().is_empty());
        }
    }

    #[test]
    fn test_catalogue_mode_parse() {
        assert_eq!("STRICT".parse::<CatalogueMode>().unwrap(), CatalogueMode::Strict);
        assert!("loose".parse::<CatalogueMode>().is_err());
    }
}
