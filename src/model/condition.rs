//! Entry/exit conditions
//!
//! A condition compares an indicator reference against either one operand or,
//! for `between`, a low/high range. The operand shape is carried by
//! [`Operand`] so a condition can never hold a `value` next to a range.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{StrategyError, StrategyResult};
use crate::types::Comparison;

/// Operand(s) of a condition, keyed by comparison kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// Any comparison other than `between`
    Single { comparison: Comparison, value: String },
    /// `between low_value and high_value`
    Range { low_value: String, high_value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ConditionRecord", into = "ConditionRecord")]
pub struct Condition {
    indicator: String,
    operand: Operand,
}

impl Condition {
    /// Build a condition. A `between` comparison starts with `value` as its
    /// low bound and an empty high bound.
    pub fn new(indicator: impl Into<String>, comparison: Comparison, value: impl Into<String>) -> Self {
        let value = value.into();
        let operand = if comparison.is_range() {
            Operand::Range {
                low_value: value,
                high_value: String::new(),
            }
        } else {
            Operand::Single { comparison, value }
        };
        Self {
            indicator: indicator.into(),
            operand,
        }
    }

    pub fn between(
        indicator: impl Into<String>,
        low_value: impl Into<String>,
        high_value: impl Into<String>,
    ) -> Self {
        Self {
            indicator: indicator.into(),
            operand: Operand::Range {
                low_value: low_value.into(),
                high_value: high_value.into(),
            },
        }
    }

    /// Condition appended by "add entry condition"
    pub fn entry_default() -> Self {
        Self::new("close", Comparison::Above, "sma_20")
    }

    /// Condition appended by "add exit condition"
    pub fn exit_default() -> Self {
        Self::new("close", Comparison::Below, "sma_20")
    }

    pub fn indicator(&self) -> &str {
        &self.indicator
    }

    pub fn operand(&self) -> &Operand {
        &self.operand
    }

    pub fn comparison(&self) -> Comparison {
        match &self.operand {
            Operand::Single { comparison, .. } => *comparison,
            Operand::Range { .. } => Comparison::Between,
        }
    }

    pub fn value(&self) -> Option<&str> {
        match &self.operand {
            Operand::Single { value, .. } => Some(value),
            Operand::Range { .. } => None,
        }
    }

    pub fn low_value(&self) -> Option<&str> {
        match &self.operand {
            Operand::Range { low_value, .. } => Some(low_value),
            Operand::Single { .. } => None,
        }
    }

    pub fn high_value(&self) -> Option<&str> {
        match &self.operand {
            Operand::Range { high_value, .. } => Some(high_value),
            Operand::Single { .. } => None,
        }
    }

    pub fn set_indicator(&mut self, indicator: impl Into<String>) {
        self.indicator = indicator.into();
    }

    /// Switch the comparison, migrating operands between the single and range
    /// shapes. Switching to the comparison already in effect is a no-op.
    pub fn set_comparison(&mut self, comparison: Comparison) {
        let operand = std::mem::replace(
            &mut self.operand,
            Operand::Range {
                low_value: String::new(),
                high_value: String::new(),
            },
        );
        self.operand = match (operand, comparison.is_range()) {
            (Operand::Single { value, .. }, true) => Operand::Range {
                low_value: value,
                high_value: String::new(),
            },
            (Operand::Single { value, .. }, false) => Operand::Single { comparison, value },
            (range @ Operand::Range { .. }, true) => range,
            (Operand::Range { low_value, .. }, false) => Operand::Single {
                comparison,
                value: low_value,
            },
        };
    }

    pub fn set_value(&mut self, new_value: impl Into<String>) -> StrategyResult<()> {
        match &mut self.operand {
            Operand::Single { value, .. } => {
                *value = new_value.into();
                Ok(())
            }
            Operand::Range { .. } => Err(StrategyError::OperandMismatch {
                field: "value",
                comparison: Comparison::Between.as_str(),
            }),
        }
    }

    pub fn set_low_value(&mut self, new_value: impl Into<String>) -> StrategyResult<()> {
        match &mut self.operand {
            Operand::Range { low_value, .. } => {
                *low_value = new_value.into();
                Ok(())
            }
            Operand::Single { comparison, .. } => Err(StrategyError::OperandMismatch {
                field: "low_value",
                comparison: comparison.as_str(),
            }),
        }
    }

    pub fn set_high_value(&mut self, new_value: impl Into<String>) -> StrategyResult<()> {
        match &mut self.operand {
            Operand::Range { high_value, .. } => {
                *high_value = new_value.into();
                Ok(())
            }
            Operand::Single { comparison, .. } => Err(StrategyError::OperandMismatch {
                field: "high_value",
                comparison: comparison.as_str(),
            }),
        }
    }

    /// Apply a single-field edit. A rejected edit leaves the condition unchanged.
    pub fn apply(&mut self, update: ConditionUpdate) -> StrategyResult<()> {
        match update {
            ConditionUpdate::Indicator(indicator) => {
                self.set_indicator(indicator);
                Ok(())
            }
            ConditionUpdate::Comparison(comparison) => {
                self.set_comparison(comparison);
                Ok(())
            }
            ConditionUpdate::Value(value) => self.set_value(value),
            ConditionUpdate::LowValue(value) => self.set_low_value(value),
            ConditionUpdate::HighValue(value) => self.set_high_value(value),
        }
    }
}

/// A single-field edit to a condition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConditionUpdate {
    Indicator(String),
    Comparison(Comparison),
    Value(String),
    LowValue(String),
    HighValue(String),
}

impl ConditionUpdate {
    /// Build an update from a field name and raw input, as sent by form widgets
    pub fn parse(field: &str, value: &str) -> StrategyResult<Self> {
        match field {
            "indicator" => Ok(Self::Indicator(value.to_string())),
            "comparison" => Ok(Self::Comparison(value.parse()?)),
            "value" => Ok(Self::Value(value.to_string())),
            "low_value" => Ok(Self::LowValue(value.to_string())),
            "high_value" => Ok(Self::HighValue(value.to_string())),
            other => Err(StrategyError::UnknownField(other.to_string())),
        }
    }
}

/// Flat wire shape: `value` or `low_value`/`high_value` next to `comparison`
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ConditionRecord {
    indicator: String,
    comparison: Comparison,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "operand_text")]
    value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "operand_text")]
    low_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "operand_text")]
    high_value: Option<String>,
}

/// Operands arrive as strings from the builder but as bare numbers from some
/// stored strategies; both are kept in textual form.
fn operand_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    }))
}

impl From<ConditionRecord> for Condition {
    fn from(record: ConditionRecord) -> Self {
        let operand = if record.comparison.is_range() {
            Operand::Range {
                low_value: record.low_value.unwrap_or_default(),
                high_value: record.high_value.unwrap_or_default(),
            }
        } else {
            Operand::Single {
                comparison: record.comparison,
                value: record.value.unwrap_or_default(),
            }
        };
        Condition {
            indicator: record.indicator,
            operand,
        }
    }
}

impl From<Condition> for ConditionRecord {
    fn from(condition: Condition) -> Self {
        match condition.operand {
            Operand::Single { comparison, value } => ConditionRecord {
                indicator: condition.indicator,
                comparison,
                value: Some(value),
                low_value: None,
                high_value: None,
            },
            Operand::Range {
                low_value,
                high_value,
            } => ConditionRecord {
                indicator: condition.indicator,
                comparison: Comparison::Between,
                value: None,
                low_value: Some(low_value),
                high_value: Some(high_value),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_switch_to_between_moves_value_to_low() {
        let mut c = Condition::new("ema_5", Comparison::CrossesAbove, "sma_20");
        c.set_comparison(Comparison::Between);
        assert_eq!(c.comparison(), Comparison::Between);
        assert_eq!(c.low_value(), Some("sma_20"));
        assert_eq!(c.high_value(), Some(""));
        assert_eq!(c.value(), None);
    }

    #[test]
    fn test_between_and_back_is_lossless() {
        let original = Condition::new("ema_5", Comparison::CrossesAbove, "sma_20");
        let mut c = original.clone();
        c.set_comparison(Comparison::Between);
        c.set_comparison(Comparison::CrossesAbove);
        assert_eq!(c, original);
    }

    #[test]
    fn test_migration_is_idempotent() {
        let mut c = Condition::between("rsi", "30", "70");
        c.set_comparison(Comparison::Between);
        assert_eq!(c, Condition::between("rsi", "30", "70"));

        let mut s = Condition::new("rsi", Comparison::Above, "50");
        s.set_comparison(Comparison::Below);
        s.set_comparison(Comparison::Below);
        assert_eq!(s, Condition::new("rsi", Comparison::Below, "50"));
    }

    #[test]
    fn test_leaving_between_drops_high() {
        let mut c = Condition::between("rsi", "30", "70");
        c.set_comparison(Comparison::GreaterThan);
        assert_eq!(c.value(), Some("30"));
        assert_eq!(c.high_value(), None);
    }

    #[test]
    fn test_operand_mismatch() {
        let mut c = Condition::between("rsi", "30", "70");
        assert!(matches!(
            c.set_value("50"),
            Err(StrategyError::OperandMismatch { field: "value", .. })
        ));
        let mut s = Condition::exit_default();
        assert!(s.apply(ConditionUpdate::HighValue("1".into())).is_err());
        assert_eq!(s, Condition::exit_default());
    }

    #[test]
    fn test_update_parse() {
        assert_eq!(
            ConditionUpdate::parse("comparison", "between").unwrap(),
            ConditionUpdate::Comparison(Comparison::Between)
        );
        assert!(matches!(
            ConditionUpdate::parse("comparison", "outside"),
            Err(StrategyError::UnknownComparison(_))
        ));
        assert!(matches!(
            ConditionUpdate::parse("threshold", "1"),
            Err(StrategyError::UnknownField(_))
        ));
    }

    #[test]
    fn test_wire_shape() {
        let single = serde_json::to_value(Condition::new("rsi", Comparison::Above, "70")).unwrap();
        assert_eq!(
            single,
            serde_json::json!({"indicator": "rsi", "comparison": "above", "value": "70"})
        );

        let range = serde_json::to_value(Condition::between("rsi", "30", "70")).unwrap();
        assert_eq!(
            range,
            serde_json::json!({
                "indicator": "rsi",
                "comparison": "between",
                "low_value": "30",
                "high_value": "70"
            })
        );
    }

    #[test]
    fn test_wire_accepts_numbers_and_missing_fields() {
        let c: Condition = serde_json::from_str(
            r#"{"indicator": "rsi", "comparison": "below", "value": 30}"#,
        )
        .unwrap();
        assert_eq!(c.value(), Some("30"));

        let r: Condition = serde_json::from_str(
            r#"{"indicator": "rsi", "comparison": "between", "value": "stale", "low_value": 30}"#,
        )
        .unwrap();
        assert_eq!(r, Condition::between("rsi", "30", ""));
    }
}
