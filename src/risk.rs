//! Risk management parameters
//!
//! Fractions (`risk_per_trade`, `stop_loss`, `take_profit`) are stored in
//! [0, 1]; the builder shows them as percentages. `max_position_size` is a
//! currency amount and uses precise decimal arithmetic.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{StrategyError, StrategyResult};
use crate::types::PositionSizingMethod;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskManagement {
    #[serde(default)]
    pub position_sizing_method: PositionSizingMethod,
    pub risk_per_trade: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    /// Currency amount, same unit as the account
    #[serde(with = "rust_decimal::serde::float")]
    pub max_position_size: Decimal,
    /// Only used with `PositionSizingMethod::AtrBased`
    pub atr_multiplier: f64,
}

impl Default for RiskManagement {
    fn default() -> Self {
        RiskManagement {
            position_sizing_method: PositionSizingMethod::RiskBased,
            risk_per_trade: 0.25,
            stop_loss: 0.10,
            take_profit: 0.20,
            max_position_size: dec!(1000.0),
            atr_multiplier: 2.0,
        }
    }
}

impl RiskManagement {
    /// Set a single field. Non-finite numbers are rejected and leave the
    /// field unchanged. No cross-field checks are made here: a stop loss
    /// wider than the take profit is accepted as entered.
    pub fn update(&mut self, param: RiskParam) -> StrategyResult<()> {
        let slot = match param {
            RiskParam::PositionSizingMethod(method) => {
                self.position_sizing_method = method;
                return Ok(());
            }
            RiskParam::MaxPositionSize(v) => {
                self.max_position_size = v;
                return Ok(());
            }
            RiskParam::RiskPerTrade(_) => &mut self.risk_per_trade,
            RiskParam::StopLoss(_) => &mut self.stop_loss,
            RiskParam::TakeProfit(_) => &mut self.take_profit,
            RiskParam::AtrMultiplier(_) => &mut self.atr_multiplier,
        };
        match param.number() {
            Some(v) if v.is_finite() => {
                *slot = v;
                Ok(())
            }
            other => Err(StrategyError::InvalidNumber {
                field: param.field().to_string(),
                value: other.map(|v| v.to_string()).unwrap_or_default(),
            }),
        }
    }

    /// Whether `atr_multiplier` affects sizing
    pub fn uses_atr(&self) -> bool {
        self.position_sizing_method == PositionSizingMethod::AtrBased
    }

    /// Fraction fields as (name, value) pairs, in serialization order
    pub fn fractions(&self) -> [(&'static str, f64); 3] {
        [
            ("risk_per_trade", self.risk_per_trade),
            ("stop_loss", self.stop_loss),
            ("take_profit", self.take_profit),
        ]
    }
}

/// A single risk field edit
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RiskParam {
    PositionSizingMethod(PositionSizingMethod),
    RiskPerTrade(f64),
    StopLoss(f64),
    TakeProfit(f64),
    MaxPositionSize(Decimal),
    AtrMultiplier(f64),
}

impl RiskParam {
    pub const FIELDS: [&'static str; 6] = [
        "position_sizing_method",
        "risk_per_trade",
        "stop_loss",
        "take_profit",
        "max_position_size",
        "atr_multiplier",
    ];

    /// Build an edit from a field name and raw form input. Fraction fields take
    /// the stored fraction, not the percentage shown in the form.
    pub fn parse(field: &str, raw: &str) -> StrategyResult<Self> {
        let raw = raw.trim();
        match field {
            "position_sizing_method" => Ok(Self::PositionSizingMethod(raw.parse()?)),
            "risk_per_trade" => Ok(Self::RiskPerTrade(parse_number(field, raw)?)),
            "stop_loss" => Ok(Self::StopLoss(parse_number(field, raw)?)),
            "take_profit" => Ok(Self::TakeProfit(parse_number(field, raw)?)),
            "max_position_size" => raw
                .parse::<Decimal>()
                .map(Self::MaxPositionSize)
                .map_err(|_| StrategyError::InvalidNumber {
                    field: field.to_string(),
                    value: raw.to_string(),
                }),
            "atr_multiplier" => Ok(Self::AtrMultiplier(parse_number(field, raw)?)),
            other => Err(StrategyError::UnknownRiskParam(other.to_string())),
        }
    }

    /// Float carried by the fraction and multiplier variants
    fn number(&self) -> Option<f64> {
        match self {
            Self::RiskPerTrade(v) | Self::StopLoss(v) | Self::TakeProfit(v) | Self::AtrMultiplier(v) => {
                Some(*v)
            }
            Self::PositionSizingMethod(_) | Self::MaxPositionSize(_) => None,
        }
    }

    pub fn field(&self) -> &'static str {
        match self {
            Self::PositionSizingMethod(_) => "position_sizing_method",
            Self::RiskPerTrade(_) => "risk_per_trade",
            Self::StopLoss(_) => "stop_loss",
            Self::TakeProfit(_) => "take_profit",
            Self::MaxPositionSize(_) => "max_position_size",
            Self::AtrMultiplier(_) => "atr_multiplier",
        }
    }
}

fn parse_number(field: &str, raw: &str) -> StrategyResult<f64> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| StrategyError::InvalidNumber {
            field: field.to_string(),
            value: raw.to_string(),
        })
}

/// Stored fraction to the percentage shown in the builder (0.25 -> 25.0)
pub fn fraction_to_percent(fraction: f64) -> f64 {
    fraction * 100.0
}

/// Percentage typed in the builder to the stored fraction (25.0 -> 0.25)
pub fn percent_to_fraction(percent: f64) -> f64 {
    percent / 100.0
}
