//! Structural validation of a strategy
//!
//! Edits never run these checks; callers validate before save or backtest.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use super::StrategyConfig;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("strategy has no symbols")]
    NoSymbols,

    #[error("symbol `{0}` is blank or not uppercase")]
    BadSymbol(String),

    #[error("{field} ({value}) must be a fraction between 0 and 1")]
    FractionOutOfRange { field: &'static str, value: f64 },

    #[error("max_position_size ({0}) must be positive")]
    NonPositivePositionSize(Decimal),

    #[error("atr_multiplier ({0}) must be positive")]
    NonPositiveAtrMultiplier(f64),

    #[error("start_date ({start}) is after end_date ({end})")]
    DatesOutOfOrder { start: NaiveDate, end: NaiveDate },

    #[error("{side} condition {index} has no indicator")]
    BlankConditionIndicator { side: &'static str, index: usize },

    #[error("indicator {index} ({name}) has no parameters")]
    EmptyIndicatorParams { index: usize, name: String },
}

impl StrategyConfig {
    /// Every structural problem, in field order
    pub fn validation_errors(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.symbols.is_empty() {
            errors.push(ValidationError::NoSymbols);
        }
        for symbol in self.symbols.iter() {
            if symbol.trim().is_empty() || symbol != symbol.to_uppercase() {
                errors.push(ValidationError::BadSymbol(symbol.to_string()));
            }
        }

        if self.start_date > self.end_date {
            errors.push(ValidationError::DatesOutOfOrder {
                start: self.start_date,
                end: self.end_date,
            });
        }

        for (side, conditions) in [
            ("entry", &self.entry_conditions),
            ("exit", &self.exit_conditions),
        ] {
            for (index, condition) in conditions.iter().enumerate() {
                if condition.indicator().trim().is_empty() {
                    errors.push(ValidationError::BlankConditionIndicator { side, index });
                }
            }
        }

        let risk = &self.risk_management;
        for (field, value) in risk.fractions() {
            if !(0.0..=1.0).contains(&value) {
                errors.push(ValidationError::FractionOutOfRange { field, value });
            }
        }
        if risk.max_position_size <= Decimal::ZERO {
            errors.push(ValidationError::NonPositivePositionSize(risk.max_position_size));
        }
        if !risk.atr_multiplier.is_finite() || risk.atr_multiplier <= 0.0 {
            errors.push(ValidationError::NonPositiveAtrMultiplier(risk.atr_multiplier));
        }

        for (index, indicator) in self.indicators.iter().enumerate() {
            if indicator.params.is_empty() {
                errors.push(ValidationError::EmptyIndicatorParams {
                    index,
                    name: indicator.name.to_string(),
                });
            }
        }

        errors
    }

    /// First structural problem, if any
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.validation_errors().into_iter().next() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validation_errors().is_empty()
    }
}
