//! Strategy configuration model
//!
//! `StrategyConfig` is the in-memory strategy edited in the builder and
//! handed to the backend on save and backtest. Its serde shape is the wire
//! contract: `symbols`, `timeframe`, `start_date`, `end_date`,
//! `entry_conditions`, `exit_conditions`, `risk_management`, `indicators`.
//!
//! Every edit checks its inputs before touching the config, so a rejected
//! edit leaves it unchanged.

mod condition;
mod edit;
mod indicator;
mod symbols;
mod validate;

pub use condition::{Condition, ConditionUpdate, Operand};
pub use edit::Edit;
pub use indicator::{parse_param_value, Indicator};
pub use symbols::{normalize_symbol, Symbols};
pub use validate::ValidationError;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{ListKind, StrategyError, StrategyResult};
use crate::indicators::{CatalogueMode, IndicatorKind, OHLCV_COLUMNS};
use crate::risk::{RiskManagement, RiskParam};
use crate::types::{Comparison, ConditionSide, Timeframe};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    pub symbols: Symbols,
    pub timeframe: Timeframe,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub entry_conditions: Vec<Condition>,
    #[serde(default)]
    pub exit_conditions: Vec<Condition>,
    #[serde(default)]
    pub risk_management: RiskManagement,
    #[serde(default)]
    pub indicators: Vec<Indicator>,
}

impl Default for StrategyConfig {
    /// Starting point of a new strategy in the builder
    fn default() -> Self {
        StrategyConfig {
            symbols: ["AAPL", "MSFT", "GOOG"].into_iter().collect(),
            timeframe: Timeframe::Day1,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or(NaiveDate::MIN),
            end_date: NaiveDate::from_ymd_opt(2024, 12, 31).unwrap_or(NaiveDate::MIN),
            entry_conditions: vec![Condition::new("ema_5", Comparison::CrossesAbove, "sma_20")],
            exit_conditions: vec![Condition::new("rsi", Comparison::CrossesAbove, "70")],
            risk_management: RiskManagement::default(),
            indicators: vec![
                Indicator::with_params(IndicatorKind::Sma, [("period", 20.0)]),
                Indicator::with_params(IndicatorKind::Ema, [("period", 5.0)]),
                Indicator::with_params(IndicatorKind::Rsi, [("period", 14.0)]),
            ],
        }
    }
}

impl StrategyConfig {
    /// Empty strategy: no symbols, conditions or indicators
    pub fn empty(timeframe: Timeframe, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        StrategyConfig {
            symbols: Symbols::new(),
            timeframe,
            start_date,
            end_date,
            entry_conditions: Vec::new(),
            exit_conditions: Vec::new(),
            risk_management: RiskManagement::default(),
            indicators: Vec::new(),
        }
    }

    // Symbols

    /// Add a ticker (trimmed, uppercased). Blank or duplicate input is a no-op.
    pub fn add_symbol(&mut self, symbol: &str) -> bool {
        self.symbols.add(symbol)
    }

    /// Remove a ticker; absent tickers are a no-op
    pub fn remove_symbol(&mut self, symbol: &str) -> bool {
        self.symbols.remove(symbol)
    }

    // Schedule

    pub fn set_timeframe(&mut self, timeframe: Timeframe) {
        self.timeframe = timeframe;
    }

    pub fn set_start_date(&mut self, date: NaiveDate) {
        self.start_date = date;
    }

    pub fn set_end_date(&mut self, date: NaiveDate) {
        self.end_date = date;
    }

    // Indicators

    /// Append a catalogue indicator by name with its own copy of the default
    /// parameters. Returns whether one was added; a name outside the
    /// catalogue is ignored in lenient mode and rejected in strict mode.
    pub fn add_indicator(&mut self, name: &str, mode: CatalogueMode) -> StrategyResult<bool> {
        match (IndicatorKind::lookup(name), mode) {
            (Some(kind), _) => {
                self.push_indicator(kind);
                Ok(true)
            }
            (None, CatalogueMode::Lenient) => Ok(false),
            (None, CatalogueMode::Strict) => Err(StrategyError::UnknownIndicator(name.to_string())),
        }
    }

    pub fn push_indicator(&mut self, kind: IndicatorKind) {
        self.indicators.push(Indicator::from_catalogue(kind));
    }

    pub fn remove_indicator(&mut self, index: usize) -> StrategyResult<Indicator> {
        check_index(ListKind::Indicators, index, self.indicators.len())?;
        Ok(self.indicators.remove(index))
    }

    pub fn update_indicator_param(&mut self, index: usize, param: &str, value: f64) -> StrategyResult<()> {
        let len = self.indicators.len();
        let indicator = self.indicators.get_mut(index).ok_or(StrategyError::IndexOutOfRange {
            list: ListKind::Indicators,
            index,
            len,
        })?;
        indicator.set_param(param, value)
    }

    /// Options offered for condition operands: raw columns, then each
    /// indicator's display key
    pub fn available_references(&self) -> Vec<String> {
        OHLCV_COLUMNS
            .iter()
            .map(|c| c.to_string())
            .chain(self.indicators.iter().map(Indicator::display_key))
            .collect()
    }

    // Conditions

    pub fn conditions(&self, side: ConditionSide) -> &[Condition] {
        match side {
            ConditionSide::Entry => &self.entry_conditions,
            ConditionSide::Exit => &self.exit_conditions,
        }
    }

    fn conditions_mut(&mut self, side: ConditionSide) -> &mut Vec<Condition> {
        match side {
            ConditionSide::Entry => &mut self.entry_conditions,
            ConditionSide::Exit => &mut self.exit_conditions,
        }
    }

    pub fn add_entry_condition(&mut self) {
        self.entry_conditions.push(Condition::entry_default());
    }

    pub fn add_exit_condition(&mut self) {
        self.exit_conditions.push(Condition::exit_default());
    }

    pub fn add_condition(&mut self, side: ConditionSide) {
        match side {
            ConditionSide::Entry => self.add_entry_condition(),
            ConditionSide::Exit => self.add_exit_condition(),
        }
    }

    /// Edit one field of a condition. Changing `comparison` to or from
    /// `between` migrates the operands (see [`Condition::set_comparison`]).
    pub fn update_condition(
        &mut self,
        side: ConditionSide,
        index: usize,
        update: ConditionUpdate,
    ) -> StrategyResult<()> {
        let conditions = self.conditions_mut(side);
        let len = conditions.len();
        let condition = conditions.get_mut(index).ok_or(StrategyError::IndexOutOfRange {
            list: list_kind(side),
            index,
            len,
        })?;
        condition.apply(update)
    }

    pub fn remove_condition(&mut self, side: ConditionSide, index: usize) -> StrategyResult<Condition> {
        let conditions = self.conditions_mut(side);
        check_index(list_kind(side), index, conditions.len())?;
        Ok(conditions.remove(index))
    }

    pub fn remove_entry_condition(&mut self, index: usize) -> StrategyResult<Condition> {
        self.remove_condition(ConditionSide::Entry, index)
    }

    pub fn remove_exit_condition(&mut self, index: usize) -> StrategyResult<Condition> {
        self.remove_condition(ConditionSide::Exit, index)
    }

    // Risk

    pub fn update_risk_param(&mut self, param: RiskParam) -> StrategyResult<()> {
        self.risk_management.update(param)
    }
}

fn list_kind(side: ConditionSide) -> ListKind {
    match side {
        ConditionSide::Entry => ListKind::EntryConditions,
        ConditionSide::Exit => ListKind::ExitConditions,
    }
}

fn check_index(list: ListKind, index: usize, len: usize) -> StrategyResult<()> {
    if index < len {
        Ok(())
    } else {
        Err(StrategyError::IndexOutOfRange { list, index, len })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_symbol_uppercases_and_appends() {
        let mut config = StrategyConfig::default();
        assert!(config.add_symbol("tsla"));
        assert_eq!(
            config.symbols.iter().collect::<Vec<_>>(),
            vec!["AAPL", "MSFT", "GOOG", "TSLA"]
        );
    }

    #[test]
    fn test_add_symbol_idempotent() {
        let mut once = StrategyConfig::default();
        once.add_symbol("AAPL");
        let mut twice = once.clone();
        twice.add_symbol("AAPL");
        assert_eq!(once, twice);

        let mut blank = StrategyConfig::default();
        assert!(!blank.add_symbol("  "));
        assert_eq!(blank, StrategyConfig::default());
    }

    #[test]
    fn test_remove_absent_symbol_is_noop() {
        let mut config = StrategyConfig::default();
        assert!(!config.remove_symbol("NVDA"));
        assert_eq!(config, StrategyConfig::default());
    }

    #[test]
    fn test_add_indicator_copies_defaults() {
        let mut config = StrategyConfig::empty(
            Timeframe::Hour1,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
        );
        assert!(config.add_indicator("RSI", CatalogueMode::Lenient).unwrap());
        assert!(config.add_indicator("RSI", CatalogueMode::Lenient).unwrap());
        assert_eq!(config.indicators.len(), 2);
        assert_eq!(config.indicators[0], config.indicators[1]);

        config.update_indicator_param(0, "period", 7.0).unwrap();
        assert_eq!(config.indicators[0].params["period"], 7.0);
        assert_eq!(config.indicators[1].params["period"], 14.0);
    }

    #[test]
    fn test_add_unknown_indicator() {
        let mut config = StrategyConfig::default();
        assert!(!config.add_indicator("VWAP", CatalogueMode::Lenient).unwrap());
        assert_eq!(config, StrategyConfig::default());
        assert_eq!(
            config.add_indicator("VWAP", CatalogueMode::Strict),
            Err(StrategyError::UnknownIndicator("VWAP".to_string()))
        );
    }

    #[test]
    fn test_remove_indicator_out_of_range() {
        let mut config = StrategyConfig::default();
        assert_eq!(
            config.remove_indicator(5),
            Err(StrategyError::IndexOutOfRange {
                list: ListKind::Indicators,
                index: 5,
                len: 3
            })
        );
        assert_eq!(config.indicators.len(), 3);
        assert_eq!(config.remove_indicator(1).unwrap().name, IndicatorKind::Ema);
    }

    #[test]
    fn test_update_condition_to_between() {
        let mut config = StrategyConfig::default();
        config
            .update_condition(
                ConditionSide::Entry,
                0,
                ConditionUpdate::Comparison(Comparison::Between),
            )
            .unwrap();
        assert_eq!(config.entry_conditions[0], Condition::between("ema_5", "sma_20", ""));
    }

    #[test]
    fn test_condition_index_errors() {
        let mut config = StrategyConfig::default();
        assert!(matches!(
            config.remove_entry_condition(1),
            Err(StrategyError::IndexOutOfRange {
                list: ListKind::EntryConditions,
                ..
            })
        ));
        assert!(matches!(
            config.update_condition(ConditionSide::Exit, 3, ConditionUpdate::Value("1".into())),
            Err(StrategyError::IndexOutOfRange {
                list: ListKind::ExitConditions,
                ..
            })
        ));
    }

    #[test]
    fn test_add_conditions_use_defaults() {
        let mut config = StrategyConfig::default();
        config.add_condition(ConditionSide::Entry);
        config.add_condition(ConditionSide::Exit);
        assert_eq!(config.entry_conditions[1], Condition::entry_default());
        assert_eq!(config.exit_conditions[1], Condition::exit_default());
    }

    #[test]
    fn test_available_references() {
        let config = StrategyConfig::default();
        assert_eq!(
            config.available_references(),
            vec!["open", "high", "low", "close", "volume", "SMA_20", "EMA_5", "RSI_14"]
        );
    }

    #[test]
    fn test_wire_field_names() {
        let json = serde_json::to_value(StrategyConfig::default()).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();
        for field in [
            "symbols",
            "timeframe",
            "start_date",
            "end_date",
            "entry_conditions",
            "exit_conditions",
            "risk_management",
            "indicators",
        ] {
            assert!(keys.contains(&field.to_string()), "missing {}", field);
        }
        assert_eq!(keys.len(), 8);
        assert_eq!(json["start_date"], "2024-01-01");
        assert_eq!(json["timeframe"], "1d");
    }

    #[test]
    fn test_wire_round_trip() {
        let config = StrategyConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: StrategyConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, config);
    }
}
