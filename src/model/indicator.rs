//! Indicators declared by a strategy

use serde::{Deserialize, Serialize};

use crate::error::{StrategyError, StrategyResult};
use crate::indicators::{IndicatorKind, IndicatorParams};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Indicator {
    pub name: IndicatorKind,
    #[serde(default)]
    pub params: IndicatorParams,
}

impl Indicator {
    /// New indicator holding its own copy of the catalogue defaults
    pub fn from_catalogue(kind: IndicatorKind) -> Self {
        Self {
            name: kind,
            params: kind.default_params(),
        }
    }

    pub fn with_params<'a>(kind: IndicatorKind, params: impl IntoIterator<Item = (&'a str, f64)>) -> Self {
        Self {
            name: kind,
            params: params.into_iter().map(|(k, v)| (k.to_string(), v)).collect(),
        }
    }

    /// The parameter that names this indicator: `period` when present,
    /// otherwise the first declared parameter
    pub fn primary_param(&self) -> Option<f64> {
        self.params
            .get("period")
            .or_else(|| self.params.values().next())
            .copied()
    }

    /// Key conditions use to reference this indicator, e.g. `SMA_20`
    pub fn display_key(&self) -> String {
        match self.primary_param() {
            Some(value) => format!("{}_{}", self.name, value),
            None => self.name.to_string(),
        }
    }

    /// Insert or replace a parameter. Non-finite values are rejected.
    pub fn set_param(&mut self, param: &str, value: f64) -> StrategyResult<()> {
        if !value.is_finite() {
            return Err(StrategyError::InvalidNumber {
                field: param.to_string(),
                value: value.to_string(),
            });
        }
        self.params.insert(param.to_string(), value);
        Ok(())
    }
}

/// Parse a numeric form input for an indicator parameter
pub fn parse_param_value(param: &str, raw: &str) -> StrategyResult<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| StrategyError::InvalidNumber {
            field: param.to_string(),
            value: raw.to_string(),
        })
}
