//! Error types for strategy editing and config text parsing

use std::fmt;

use thiserror::Error;

/// Which ordered list of a strategy an index refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    EntryConditions,
    ExitConditions,
    Indicators,
}

impl fmt::Display for ListKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::EntryConditions => write!(f, "entry_conditions"),
            Self::ExitConditions => write!(f, "exit_conditions"),
            Self::Indicators => write!(f, "indicators"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum StrategyError {
    #[error("index {index} out of range for {list} (len {len})")]
    IndexOutOfRange {
        list: ListKind,
        index: usize,
        len: usize,
    },

    #[error("malformed config text at line {line}: {reason} (`{content}`)")]
    MalformedConfigText {
        line: usize,
        content: String,
        reason: String,
    },

    #[error("unknown indicator: {0}")]
    UnknownIndicator(String),

    #[error("unknown condition field: {0}")]
    UnknownField(String),

    #[error("unknown comparison: {0}")]
    UnknownComparison(String),

    #[error("unknown timeframe: {0}")]
    UnknownTimeframe(String),

    #[error("unknown position sizing method: {0}")]
    UnknownSizingMethod(String),

    #[error("unknown risk parameter: {0}")]
    UnknownRiskParam(String),

    #[error("invalid number for {field}: {value}")]
    InvalidNumber { field: String, value: String },

    #[error("invalid date: {0} (expected YYYY-MM-DD)")]
    InvalidDate(String),

    #[error("field {field} does not apply to a `{comparison}` condition")]
    OperandMismatch {
        field: &'static str,
        comparison: &'static str,
    },

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl StrategyError {
    pub(crate) fn malformed(line: usize, content: &str, reason: impl Into<String>) -> Self {
        Self::MalformedConfigText {
            line,
            content: content.to_string(),
            reason: reason.into(),
        }
    }
}

pub type StrategyResult<T> = Result<T, StrategyError>;
