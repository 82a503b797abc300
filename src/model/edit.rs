//! Discrete builder edits
//!
//! Each user action in the builder maps to one `Edit`. `apply` is a pure
//! transformation returning the edited copy; `apply_mut` edits in place.

use chrono::NaiveDate;

use super::{ConditionUpdate, StrategyConfig};
use crate::error::StrategyResult;
use crate::indicators::CatalogueMode;
use crate::risk::RiskParam;
use crate::types::{ConditionSide, Timeframe};

#[derive(Debug, Clone, PartialEq)]
pub enum Edit {
    AddSymbol(String),
    RemoveSymbol(String),
    SetTimeframe(Timeframe),
    SetStartDate(NaiveDate),
    SetEndDate(NaiveDate),
    AddIndicator(String),
    RemoveIndicator(usize),
    UpdateIndicatorParam {
        index: usize,
        param: String,
        value: f64,
    },
    AddCondition(ConditionSide),
    UpdateCondition {
        side: ConditionSide,
        index: usize,
        update: ConditionUpdate,
    },
    RemoveCondition {
        side: ConditionSide,
        index: usize,
    },
    UpdateRisk(RiskParam),
}

impl StrategyConfig {
    /// Return the config with `edit` applied, leaving `self` untouched
    pub fn apply(&self, edit: Edit, mode: CatalogueMode) -> StrategyResult<StrategyConfig> {
        let mut next = self.clone();
        next.apply_mut(edit, mode)?;
        Ok(next)
    }

    /// Apply `edit` in place. Returns whether the config changed; silent
    /// no-ops (duplicate symbol, unknown indicator in lenient mode) report
    /// `false`.
    pub fn apply_mut(&mut self, edit: Edit, mode: CatalogueMode) -> StrategyResult<bool> {
        match edit {
            Edit::AddSymbol(symbol) => Ok(self.add_symbol(&symbol)),
            Edit::RemoveSymbol(symbol) => Ok(self.remove_symbol(&symbol)),
            Edit::SetTimeframe(timeframe) => {
                self.set_timeframe(timeframe);
                Ok(true)
            }
            Edit::SetStartDate(date) => {
                self.set_start_date(date);
                Ok(true)
            }
            Edit::SetEndDate(date) => {
                self.set_end_date(date);
                Ok(true)
            }
            Edit::AddIndicator(name) => self.add_indicator(&name, mode),
            Edit::RemoveIndicator(index) => self.remove_indicator(index).map(|_| true),
            Edit::UpdateIndicatorParam { index, param, value } => self
                .update_indicator_param(index, &param, value)
                .map(|_| true),
            Edit::AddCondition(side) => {
                self.add_condition(side);
                Ok(true)
            }
            Edit::UpdateCondition {
                side,
                index,
                update,
            } => self.update_condition(side, index, update).map(|_| true),
            Edit::RemoveCondition { side, index } => self.remove_condition(side, index).map(|_| true),
            Edit::UpdateRisk(param) => self.update_risk_param(param).map(|_| true),
        }
    }
}
