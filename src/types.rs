//! Enumerated value types shared by the strategy model and its serializer

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::StrategyError;

/// Supported bar intervals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1m")]
    Minute1,
    #[serde(rename = "5m")]
    Minute5,
    #[serde(rename = "15m")]
    Minute15,
    #[serde(rename = "30m")]
    Minute30,
    #[serde(rename = "1h")]
    Hour1,
    #[serde(rename = "4h")]
    Hour4,
    #[serde(rename = "1d")]
    Day1,
    #[serde(rename = "1w")]
    Week1,
}

impl Timeframe {
    pub const ALL: [Timeframe; 8] = [
        Timeframe::Minute1,
        Timeframe::Minute5,
        Timeframe::Minute15,
        Timeframe::Minute30,
        Timeframe::Hour1,
        Timeframe::Hour4,
        Timeframe::Day1,
        Timeframe::Week1,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Timeframe::Minute1 => "1m",
            Timeframe::Minute5 => "5m",
            Timeframe::Minute15 => "15m",
            Timeframe::Minute30 => "30m",
            Timeframe::Hour1 => "1h",
            Timeframe::Hour4 => "4h",
            Timeframe::Day1 => "1d",
            Timeframe::Week1 => "1w",
        }
    }
}

impl Default for Timeframe {
    fn default() -> Self {
        Timeframe::Day1
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = StrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Timeframe::ALL
            .iter()
            .copied()
            .find(|tf| tf.as_str() == s)
            .ok_or_else(|| StrategyError::UnknownTimeframe(s.to_string()))
    }
}

/// How a condition compares its indicator against its operand(s)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Comparison {
    CrossesAbove,
    CrossesBelow,
    GreaterThan,
    LessThan,
    Equals,
    Between,
    Above,
    Below,
}

impl Comparison {
    pub const ALL: [Comparison; 8] = [
        Comparison::CrossesAbove,
        Comparison::CrossesBelow,
        Comparison::GreaterThan,
        Comparison::LessThan,
        Comparison::Equals,
        Comparison::Between,
        Comparison::Above,
        Comparison::Below,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Comparison::CrossesAbove => "crosses_above",
            Comparison::CrossesBelow => "crosses_below",
            Comparison::GreaterThan => "greater_than",
            Comparison::LessThan => "less_than",
            Comparison::Equals => "equals",
            Comparison::Between => "between",
            Comparison::Above => "above",
            Comparison::Below => "below",
        }
    }

    /// `between` is the only comparison taking a low/high range
    pub fn is_range(&self) -> bool {
        matches!(self, Comparison::Between)
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Comparison {
    type Err = StrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Comparison::ALL
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| StrategyError::UnknownComparison(s.to_string()))
    }
}

/// Position sizing methods offered by the risk panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionSizingMethod {
    RiskBased,
    Percentage,
    Fixed,
    AtrBased,
}

impl PositionSizingMethod {
    pub const ALL: [PositionSizingMethod; 4] = [
        PositionSizingMethod::RiskBased,
        PositionSizingMethod::Percentage,
        PositionSizingMethod::Fixed,
        PositionSizingMethod::AtrBased,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PositionSizingMethod::RiskBased => "risk_based",
            PositionSizingMethod::Percentage => "percentage",
            PositionSizingMethod::Fixed => "fixed",
            PositionSizingMethod::AtrBased => "atr_based",
        }
    }
}

impl Default for PositionSizingMethod {
    fn default() -> Self {
        PositionSizingMethod::RiskBased
    }
}

impl fmt::Display for PositionSizingMethod {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PositionSizingMethod {
    type Err = StrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PositionSizingMethod::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| StrategyError::UnknownSizingMethod(s.to_string()))
    }
}

/// Entry or exit side of a strategy's condition lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConditionSide {
    Entry,
    Exit,
}

impl fmt::Display for ConditionSide {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConditionSide::Entry => write!(f, "entry"),
            ConditionSide::Exit => write!(f, "exit"),
        }
    }
}

impl FromStr for ConditionSide {
    type Err = StrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "entry" | "entry_conditions" => Ok(ConditionSide::Entry),
            "exit" | "exit_conditions" => Ok(ConditionSide::Exit),
            other => Err(StrategyError::UnknownField(other.to_string())),
        }
    }
}
