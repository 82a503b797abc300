//! Request bodies sent to the strategy backend

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{StrategyError, StrategyResult};
use crate::model::StrategyConfig;
use crate::types::Timeframe;

pub const MAX_NAME_LEN: usize = 100;
pub const MAX_DESCRIPTION_LEN: usize = 500;
pub const DEFAULT_INITIAL_CAPITAL: Decimal = dec!(100000);
pub const DEFAULT_DATA_PROVIDER: &str = "alpaca";

/// Body of a "save strategy" call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveStrategyRequest {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub config: StrategyConfig,
}

impl SaveStrategyRequest {
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        config: StrategyConfig,
    ) -> StrategyResult<Self> {
        let request = SaveStrategyRequest {
            name: name.into().trim().to_string(),
            description: description
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            config,
        };
        request.check()?;
        Ok(request)
    }

    /// Length limits enforced by the backend
    pub fn check(&self) -> StrategyResult<()> {
        let name_len = self.name.chars().count();
        if name_len == 0 || name_len > MAX_NAME_LEN {
            return Err(StrategyError::InvalidRequest(format!(
                "strategy name must be 1 to {} characters",
                MAX_NAME_LEN
            )));
        }
        if let Some(description) = &self.description {
            if description.chars().count() > MAX_DESCRIPTION_LEN {
                return Err(StrategyError::InvalidRequest(format!(
                    "description must be at most {} characters",
                    MAX_DESCRIPTION_LEN
                )));
            }
        }
        Ok(())
    }
}

/// Whether a backtest targets a built-in preset or a user's saved strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategySource {
    Default,
    #[default]
    User,
}

/// Body of a "run backtest" call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestRequest {
    pub strategy_id: String,
    #[serde(default)]
    pub strategy_type: StrategySource,
    #[serde(with = "rust_decimal::serde::float")]
    pub initial_capital: Decimal,
    pub timeframe: Timeframe,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub data_provider: String,
}

impl BacktestRequest {
    /// Request for a saved strategy, taking the schedule from its config
    pub fn for_strategy(strategy_id: impl Into<String>, config: &StrategyConfig) -> StrategyResult<Self> {
        let strategy_id = strategy_id.into();
        if strategy_id.trim().is_empty() {
            return Err(StrategyError::InvalidRequest("strategy id is empty".to_string()));
        }
        Ok(BacktestRequest {
            strategy_id,
            strategy_type: StrategySource::User,
            initial_capital: DEFAULT_INITIAL_CAPITAL,
            timeframe: config.timeframe,
            start_date: config.start_date,
            end_date: config.end_date,
            data_provider: DEFAULT_DATA_PROVIDER.to_string(),
        })
    }

    pub fn with_capital(mut self, capital: Decimal) -> StrategyResult<Self> {
        if capital <= Decimal::ZERO {
            return Err(StrategyError::InvalidRequest(format!(
                "initial capital must be positive, got {}",
                capital
            )));
        }
        self.initial_capital = capital;
        Ok(self)
    }

    pub fn with_source(mut self, source: StrategySource) -> Self {
        self.strategy_type = source;
        self
    }

    pub fn with_provider(mut self, provider: impl Into<String>) -> Self {
        self.data_provider = provider.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_save_request_limits() {
        let config = StrategyConfig::default();
        assert!(SaveStrategyRequest::new("  ", None, config.clone()).is_err());
        assert!(SaveStrategyRequest::new("x".repeat(101), None, config.clone()).is_err());
        assert!(SaveStrategyRequest::new("ok", Some("d".repeat(501)), config.clone()).is_err());

        let request = SaveStrategyRequest::new(" Trend ", Some(String::new()), config).unwrap();
        assert_eq!(request.name, "Trend");
        assert_eq!(request.description, None);
    }

    #[test]
    fn test_save_request_json_shape() {
        let request = SaveStrategyRequest::new("Trend", None, StrategyConfig::default()).unwrap();
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["name"], json!("Trend"));
        assert!(value.get("description").is_none());
        assert_eq!(value["config"]["timeframe"], json!("1d"));
        assert_eq!(value["config"]["risk_management"]["max_position_size"], json!(1000.0));
    }

    #[test]
    fn test_backtest_request_defaults() {
        let config = StrategyConfig::default();
        let request = BacktestRequest::for_strategy("abc123", &config).unwrap();
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["initial_capital"], json!(100000.0));
        assert_eq!(value["data_provider"], json!("alpaca"));
        assert_eq!(value["strategy_type"], json!("user"));
        assert_eq!(value["start_date"], json!("2024-01-01"));
    }

    #[test]
    fn test_backtest_request_for_preset() {
        let config = StrategyConfig::default();
        let request = BacktestRequest::for_strategy("golden_cross", &config)
            .unwrap()
            .with_source(StrategySource::Default)
            .with_provider("yahoo");
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["strategy_type"], json!("default"));
        assert_eq!(value["data_provider"], json!("yahoo"));
        assert_eq!(value["strategy_id"], json!("golden_cross"));
    }

    #[test]
    fn test_backtest_request_rejects_bad_input() {
        let config = StrategyConfig::default();
        assert!(BacktestRequest::for_strategy("", &config).is_err());
        let request = BacktestRequest::for_strategy("abc", &config).unwrap();
        assert!(request.with_capital(Decimal::ZERO).is_err());
    }
}
