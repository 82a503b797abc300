//! Human-readable config text
//!
//! `serialize` renders a strategy as the YAML-like block shown in the
//! builder's preview pane; `deserialize` reads that block back. Rendering is
//! deterministic, and any config with finite numbers survives the round trip
//! unchanged.

mod parser;
mod writer;

use std::str::FromStr;

pub use writer::ConfigText;

use crate::error::{StrategyError, StrategyResult};
use crate::model::StrategyConfig;

/// Render a strategy as config text
pub fn serialize(config: &StrategyConfig) -> String {
    ConfigText(config).to_string()
}

/// Parse config text produced by [`serialize`]
pub fn deserialize(text: &str) -> StrategyResult<StrategyConfig> {
    parser::parse_config(text)
}

impl StrategyConfig {
    pub fn to_text(&self) -> String {
        serialize(self)
    }

    pub fn from_text(text: &str) -> StrategyResult<Self> {
        deserialize(text)
    }
}

impl FromStr for StrategyConfig {
    type Err = StrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        deserialize(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::IndicatorKind;
    use crate::model::{Condition, Indicator};
    use crate::risk::RiskParam;
    use crate::types::{Comparison, PositionSizingMethod};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    const DEFAULT_TEXT: &str = r#"symbols: ["AAPL", "MSFT", "GOOG"]
timeframe: "1d"
start_date: "2024-01-01"
end_date: "2024-12-31"

# Entry conditions
entry_conditions:
  - indicator: "ema_5"
    comparison: "crosses_above"
    value: "sma_20"

# Exit conditions
exit_conditions:
  - indicator: "rsi"
    comparison: "crosses_above"
    value: 70

# Risk management parameters
risk_management:
  position_sizing_method: "risk_based"
  risk_per_trade: 0.25
  stop_loss: 0.1
  take_profit: 0.2
  max_position_size: 1000
  atr_multiplier: 2

# Required indicators
indicators:
  - name: "SMA"
    params:
      period: 20
  - name: "EMA"
    params:
      period: 5
  - name: "RSI"
    params:
      period: 14
"#;

    #[test]
    fn test_default_text_layout() {
        assert_eq!(serialize(&StrategyConfig::default()), DEFAULT_TEXT);
    }

    #[test]
    fn test_default_text_parses_back() {
        assert_eq!(deserialize(DEFAULT_TEXT).unwrap(), StrategyConfig::default());
    }

    #[test]
    fn test_serialize_is_deterministic() {
        let config = StrategyConfig::default();
        assert_eq!(serialize(&config), serialize(&config.clone()));
    }

    #[test]
    fn test_between_condition_has_no_value_line() {
        let mut config = StrategyConfig::default();
        config.exit_conditions = vec![Condition::between("rsi", "30", "70")];

        let text = serialize(&config);
        assert!(text.contains(
            "  - indicator: \"rsi\"\n    comparison: \"between\"\n    low_value: \"30\"\n    high_value: \"70\"\n"
        ));
        assert!(!text.contains("    value: 70"));
        assert_eq!(deserialize(&text).unwrap(), config);
    }

    #[test]
    fn test_round_trip_awkward_values() {
        let mut config = StrategyConfig::empty(
            crate::types::Timeframe::Minute15,
            NaiveDate::from_ymd_opt(2023, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2023, 6, 30).unwrap(),
        );
        config.add_symbol("brk.b");
        config.entry_conditions.push(Condition::new("close", Comparison::Above, "sma_20"));
        config.entry_conditions.push(Condition::new("volume", Comparison::GreaterThan, "1.5e6"));
        config.entry_conditions.push(Condition::new("note \"x\"", Comparison::Equals, " 70"));
        config.exit_conditions.push(Condition::new("", Comparison::LessThan, ""));
        config.update_risk_param(RiskParam::PositionSizingMethod(PositionSizingMethod::AtrBased)).unwrap();
        config.update_risk_param(RiskParam::MaxPositionSize(dec!(2500.75))).unwrap();
        config.update_risk_param(RiskParam::RiskPerTrade(0.015)).unwrap();
        config.indicators.push(Indicator::with_params(
            IndicatorKind::Stochastic,
            [("k_period", 14.0), ("d period", 3.5)],
        ));
        config.indicators.push(Indicator {
            name: IndicatorKind::Atr,
            params: Default::default(),
        });

        let text = serialize(&config);
        assert!(text.contains("      \"d period\": 3.5\n"));
        assert!(text.contains("    value: 1.5e6\n"));
        assert!(text.contains("    value: \" 70\"\n"));
        assert_eq!(deserialize(&text).unwrap(), config);
    }

    #[test]
    fn test_empty_lists_round_trip() {
        let config = StrategyConfig::empty(
            crate::types::Timeframe::Week1,
            NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2020, 12, 31).unwrap(),
        );
        let text = serialize(&config);
        assert!(text.starts_with("symbols: []\n"));
        assert_eq!(text.parse::<StrategyConfig>().unwrap(), config);
    }

    #[test]
    fn test_malformed_text_names_line() {
        let text = DEFAULT_TEXT.replace("  stop_loss: 0.1", "  stop_loss 0.1");
        match deserialize(&text) {
            Err(StrategyError::MalformedConfigText { line, content, .. }) => {
                assert_eq!(line, 22);
                assert_eq!(content, "  stop_loss 0.1");
            }
            other => panic!("expected malformed text error, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_indicator_in_text() {
        let text = DEFAULT_TEXT.replace("name: \"SMA\"", "name: \"VWAP\"");
        assert!(matches!(
            deserialize(&text),
            Err(StrategyError::MalformedConfigText { line: 29, .. })
        ));
    }
}
