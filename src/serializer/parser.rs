//! Config text parser
//!
//! Accepts the grammar produced by the writer. Blank lines and `#` comments
//! are skipped; every other line must fit the section it appears in, in the
//! order and spelling the writer uses, or the parse stops with
//! `MalformedConfigText` naming that line.

use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;

use itertools::Itertools;

use super::writer::{is_number_literal, is_plain_key, quote};
use crate::error::{StrategyError, StrategyResult};
use crate::indicators::{IndicatorKind, IndicatorParams};
use crate::model::{Condition, Indicator, StrategyConfig, Symbols};
use crate::risk::{RiskManagement, RiskParam};
use crate::types::{Comparison, ConditionSide, PositionSizingMethod, Timeframe};

/// Top-level keys in the order they are written
const SECTIONS: [&str; 8] = [
    "symbols",
    "timeframe",
    "start_date",
    "end_date",
    "entry_conditions",
    "exit_conditions",
    "risk_management",
    "indicators",
];

/// One significant (non-blank, non-comment) line
struct Line<'a> {
    number: usize,
    indent: usize,
    content: &'a str,
    raw: &'a str,
}

impl<'a> Line<'a> {
    fn read(number: usize, raw: &'a str) -> StrategyResult<Option<Self>> {
        let content = raw.trim();
        if content.is_empty() || content.starts_with('#') {
            return Ok(None);
        }
        let leading = &raw[..raw.len() - raw.trim_start().len()];
        if leading.chars().any(|c| c != ' ') {
            return Err(StrategyError::malformed(number, raw, "indentation must use spaces"));
        }
        Ok(Some(Line {
            number,
            indent: leading.len(),
            content,
            raw,
        }))
    }

    fn error(&self, reason: impl Into<String>) -> StrategyError {
        StrategyError::malformed(self.number, self.raw, reason)
    }

    /// Split `key: value` or `key:`. Keys are bare identifiers or, when not
    /// plain, quoted strings.
    fn split_key(&self, content: &'a str) -> StrategyResult<(String, &'a str)> {
        if content.starts_with('"') {
            let end = closing_quote(content).ok_or_else(|| self.error("unterminated quoted key"))?;
            let key = self.quoted(&content[..=end])?;
            if is_plain_key(&key) {
                return Err(self.error(format!("key `{}` must not be quoted", key)));
            }
            let rest = content[end + 1..]
                .strip_prefix(':')
                .ok_or_else(|| self.error("expected `:` after key"))?;
            Ok((key, self.value_part(rest)?))
        } else {
            let (key, rest) = content
                .split_once(':')
                .ok_or_else(|| self.error("expected `key: value`"))?;
            if !is_plain_key(key) {
                return Err(self.error(format!("invalid key `{}`", key)));
            }
            Ok((key.to_string(), self.value_part(rest)?))
        }
    }

    /// Text after `:`: nothing, or one space then the value
    fn value_part(&self, rest: &'a str) -> StrategyResult<&'a str> {
        if rest.is_empty() {
            return Ok(rest);
        }
        match rest.strip_prefix(' ') {
            Some(value) if !value.is_empty() && !value.starts_with(' ') => Ok(value),
            _ => Err(self.error("expected exactly one space after `:`")),
        }
    }

    /// Body of a `- key: ...` list item
    fn list_item(&self, expected: &str) -> StrategyResult<&'a str> {
        self.content
            .strip_prefix("- ")
            .filter(|item| !item.starts_with(' '))
            .ok_or_else(|| self.error(format!("expected `- {}: ...`", expected)))
    }

    fn quoted(&self, token: &str) -> StrategyResult<String> {
        if !token.starts_with('"') {
            return Err(self.error("expected a quoted string"));
        }
        let text: String =
            serde_json::from_str(token).map_err(|_| self.error("invalid quoted string"))?;
        if quote(&text) != token {
            return Err(self.error("string is not in canonical quoted form"));
        }
        Ok(text)
    }

    fn parsed<T: FromStr<Err = StrategyError>>(&self, token: &str) -> StrategyResult<T> {
        self.quoted(token)?
            .parse()
            .map_err(|e: StrategyError| self.error(e.to_string()))
    }

    fn date(&self, token: &str) -> StrategyResult<NaiveDate> {
        let text = self.quoted(token)?;
        NaiveDate::parse_from_str(&text, "%Y-%m-%d")
            .map_err(|_| self.error(StrategyError::InvalidDate(text).to_string()))
    }

    fn number(&self, token: &str) -> StrategyResult<f64> {
        if !is_number_literal(token) {
            return Err(self.error("expected a number"));
        }
        let value: f64 = token.parse().map_err(|_| self.error("expected a number"))?;
        if value.to_string() != token {
            return Err(self.error(format!("number should be written `{}`", value)));
        }
        Ok(value)
    }

    fn decimal(&self, token: &str) -> StrategyResult<Decimal> {
        if !is_number_literal(token) {
            return Err(self.error("expected a number"));
        }
        let value = Decimal::from_str(token).map_err(|_| self.error("expected a decimal amount"))?;
        if value.normalize().to_string() != token {
            return Err(self.error(format!("amount should be written `{}`", value.normalize())));
        }
        Ok(value)
    }

    /// Condition operand: quoted text or a bare number kept as written
    fn operand(&self, token: &str) -> StrategyResult<String> {
        if token.starts_with('"') {
            self.quoted(token)
        } else if is_number_literal(token) {
            Ok(token.to_string())
        } else {
            Err(self.error("expected a number or a quoted string"))
        }
    }

    fn expect_empty(&self, rest: &str) -> StrategyResult<()> {
        if rest.is_empty() {
            Ok(())
        } else {
            Err(self.error("section header takes no inline value"))
        }
    }
}

/// Byte index of the quote closing the string opened at index 0
fn closing_quote(s: &str) -> Option<usize> {
    let bytes = s.as_bytes();
    let mut i = 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'"' => return Some(i),
            _ => i += 1,
        }
    }
    None
}

fn set_once<T>(slot: &mut Option<T>, value: T, line: &Line<'_>, key: &str) -> StrategyResult<()> {
    if slot.is_some() {
        return Err(line.error(format!("duplicate `{}`", key)));
    }
    *slot = Some(value);
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Section {
    Top,
    Conditions(ConditionSide),
    Risk,
    Indicators,
}

struct ConditionDraft {
    number: usize,
    raw: String,
    side: ConditionSide,
    indicator: String,
    comparison: Option<Comparison>,
    value: Option<String>,
    low_value: Option<String>,
    high_value: Option<String>,
}

impl ConditionDraft {
    fn build(self) -> StrategyResult<Condition> {
        let fail = |reason: &str| StrategyError::malformed(self.number, &self.raw, reason);
        let comparison = self.comparison.ok_or_else(|| fail("condition has no comparison"))?;
        if comparison.is_range() {
            if self.value.is_some() {
                return Err(fail("`between` condition takes low_value/high_value, not value"));
            }
            match (self.low_value, self.high_value) {
                (Some(low), Some(high)) => Ok(Condition::between(self.indicator, low, high)),
                _ => Err(fail("`between` condition needs low_value and high_value")),
            }
        } else {
            if self.low_value.is_some() || self.high_value.is_some() {
                return Err(fail("only `between` conditions take low_value/high_value"));
            }
            match self.value {
                Some(value) => Ok(Condition::new(self.indicator, comparison, value)),
                None => Err(fail("condition has no value")),
            }
        }
    }
}

struct IndicatorDraft {
    number: usize,
    raw: String,
    kind: IndicatorKind,
    params: Option<IndicatorParams>,
}

impl IndicatorDraft {
    fn build(self) -> StrategyResult<Indicator> {
        match self.params {
            Some(params) => Ok(Indicator {
                name: self.kind,
                params,
            }),
            None => Err(StrategyError::malformed(
                self.number,
                &self.raw,
                "indicator has no params block",
            )),
        }
    }
}

enum Pending {
    Condition(ConditionDraft),
    Indicator(IndicatorDraft),
}

#[derive(Default)]
struct RiskDraft {
    /// Index into `RiskParam::FIELDS` of the next expected field
    next: usize,
    position_sizing_method: Option<PositionSizingMethod>,
    risk_per_trade: Option<f64>,
    stop_loss: Option<f64>,
    take_profit: Option<f64>,
    max_position_size: Option<Decimal>,
    atr_multiplier: Option<f64>,
}

struct Parser {
    section: Section,
    /// Index into `SECTIONS` of the next expected top-level key
    next: usize,
    pending: Option<Pending>,
    symbols: Option<Symbols>,
    timeframe: Option<Timeframe>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
    entry_conditions: Option<Vec<Condition>>,
    exit_conditions: Option<Vec<Condition>>,
    risk: Option<(usize, String, RiskDraft)>,
    indicators: Option<Vec<Indicator>>,
}

impl Parser {
    fn new() -> Self {
        Parser {
            section: Section::Top,
            next: 0,
            pending: None,
            symbols: None,
            timeframe: None,
            start_date: None,
            end_date: None,
            entry_conditions: None,
            exit_conditions: None,
            risk: None,
            indicators: None,
        }
    }

    fn feed(&mut self, line: Line<'_>) -> StrategyResult<()> {
        if line.indent == 0 {
            self.flush()?;
            return self.top_level(&line);
        }
        match self.section {
            Section::Top => Err(line.error("unexpected indented line")),
            Section::Conditions(side) => self.condition_line(side, &line),
            Section::Risk => self.risk_line(&line),
            Section::Indicators => self.indicator_line(&line),
        }
    }

    fn top_level(&mut self, line: &Line<'_>) -> StrategyResult<()> {
        let (key, rest) = line.split_key(line.content)?;
        self.section = Section::Top;
        if let Some(position) = SECTIONS.iter().position(|s| *s == key) {
            if position != self.next {
                let reason = match SECTIONS.get(self.next) {
                    Some(expected) => format!("expected `{}`, found `{}`", expected, key),
                    None => format!("unexpected `{}` after `indicators`", key),
                };
                return Err(line.error(reason));
            }
            self.next += 1;
        }
        match key.as_str() {
            "symbols" => {
                let list: Vec<String> = serde_json::from_str(rest)
                    .map_err(|_| line.error("expected a bracketed list of quoted symbols"))?;
                if format!("[{}]", list.iter().map(|s| quote(s)).join(", ")) != rest {
                    return Err(line.error("symbol list is not in canonical form"));
                }
                let mut symbols = Symbols::new();
                for symbol in list {
                    if !symbols.insert_raw(symbol) {
                        return Err(line.error("duplicate symbol"));
                    }
                }
                set_once(&mut self.symbols, symbols, line, "symbols")
            }
            "timeframe" => {
                let timeframe = line.parsed(rest)?;
                set_once(&mut self.timeframe, timeframe, line, "timeframe")
            }
            "start_date" => {
                let date = line.date(rest)?;
                set_once(&mut self.start_date, date, line, "start_date")
            }
            "end_date" => {
                let date = line.date(rest)?;
                set_once(&mut self.end_date, date, line, "end_date")
            }
            "entry_conditions" => {
                line.expect_empty(rest)?;
                set_once(&mut self.entry_conditions, Vec::new(), line, "entry_conditions")?;
                self.section = Section::Conditions(ConditionSide::Entry);
                Ok(())
            }
            "exit_conditions" => {
                line.expect_empty(rest)?;
                set_once(&mut self.exit_conditions, Vec::new(), line, "exit_conditions")?;
                self.section = Section::Conditions(ConditionSide::Exit);
                Ok(())
            }
            "risk_management" => {
                line.expect_empty(rest)?;
                let draft = (line.number, line.raw.to_string(), RiskDraft::default());
                set_once(&mut self.risk, draft, line, "risk_management")?;
                self.section = Section::Risk;
                Ok(())
            }
            "indicators" => {
                line.expect_empty(rest)?;
                set_once(&mut self.indicators, Vec::new(), line, "indicators")?;
                self.section = Section::Indicators;
                Ok(())
            }
            other => Err(line.error(format!("unknown key `{}`", other))),
        }
    }

    fn condition_line(&mut self, side: ConditionSide, line: &Line<'_>) -> StrategyResult<()> {
        match line.indent {
            2 => {
                let item = line.list_item("indicator")?;
                self.flush()?;
                let (key, rest) = line.split_key(item)?;
                if key != "indicator" {
                    return Err(line.error("condition must start with `indicator`"));
                }
                self.pending = Some(Pending::Condition(ConditionDraft {
                    number: line.number,
                    raw: line.raw.to_string(),
                    side,
                    indicator: line.quoted(rest)?,
                    comparison: None,
                    value: None,
                    low_value: None,
                    high_value: None,
                }));
                Ok(())
            }
            4 => {
                let draft = match self.pending.as_mut() {
                    Some(Pending::Condition(draft)) => draft,
                    _ => return Err(line.error("condition field outside a condition")),
                };
                let (key, rest) = line.split_key(line.content)?;
                match key.as_str() {
                    "comparison" => {
                        let comparison = line.parsed(rest)?;
                        set_once(&mut draft.comparison, comparison, line, "comparison")
                    }
                    "value" | "low_value" if draft.comparison.is_none() => {
                        Err(line.error(format!("`{}` must follow `comparison`", key)))
                    }
                    "high_value" if draft.low_value.is_none() => {
                        Err(line.error("`high_value` must follow `low_value`"))
                    }
                    "value" => {
                        let value = line.operand(rest)?;
                        set_once(&mut draft.value, value, line, "value")
                    }
                    "low_value" => {
                        let value = line.quoted(rest)?;
                        set_once(&mut draft.low_value, value, line, "low_value")
                    }
                    "high_value" => {
                        let value = line.quoted(rest)?;
                        set_once(&mut draft.high_value, value, line, "high_value")
                    }
                    other => Err(line.error(format!("unknown condition field `{}`", other))),
                }
            }
            _ => Err(line.error("unexpected indentation in condition list")),
        }
    }

    fn risk_line(&mut self, line: &Line<'_>) -> StrategyResult<()> {
        if line.indent != 2 {
            return Err(line.error("unexpected indentation in risk_management"));
        }
        let draft = match self.risk.as_mut() {
            Some((_, _, draft)) => draft,
            None => return Err(line.error("risk field outside risk_management")),
        };
        let (key, rest) = line.split_key(line.content)?;
        if let Some(position) = RiskParam::FIELDS.iter().position(|f| *f == key) {
            if position != draft.next {
                let reason = match RiskParam::FIELDS.get(draft.next) {
                    Some(expected) => format!("expected `{}`, found `{}`", expected, key),
                    None => format!("duplicate `{}`", key),
                };
                return Err(line.error(reason));
            }
            draft.next += 1;
        }
        match key.as_str() {
            "position_sizing_method" => {
                let method = line.parsed(rest)?;
                set_once(&mut draft.position_sizing_method, method, line, "position_sizing_method")
            }
            "risk_per_trade" => set_once(&mut draft.risk_per_trade, line.number(rest)?, line, "risk_per_trade"),
            "stop_loss" => set_once(&mut draft.stop_loss, line.number(rest)?, line, "stop_loss"),
            "take_profit" => set_once(&mut draft.take_profit, line.number(rest)?, line, "take_profit"),
            "max_position_size" => {
                set_once(&mut draft.max_position_size, line.decimal(rest)?, line, "max_position_size")
            }
            "atr_multiplier" => set_once(&mut draft.atr_multiplier, line.number(rest)?, line, "atr_multiplier"),
            other => Err(line.error(format!("unknown risk parameter `{}`", other))),
        }
    }

    fn indicator_line(&mut self, line: &Line<'_>) -> StrategyResult<()> {
        match line.indent {
            2 => {
                let item = line.list_item("name")?;
                self.flush()?;
                let (key, rest) = line.split_key(item)?;
                if key != "name" {
                    return Err(line.error("indicator must start with `name`"));
                }
                let kind = line.parsed(rest)?;
                self.pending = Some(Pending::Indicator(IndicatorDraft {
                    number: line.number,
                    raw: line.raw.to_string(),
                    kind,
                    params: None,
                }));
                Ok(())
            }
            4 => {
                let draft = match self.pending.as_mut() {
                    Some(Pending::Indicator(draft)) => draft,
                    _ => return Err(line.error("indicator field outside an indicator")),
                };
                let (key, rest) = line.split_key(line.content)?;
                if key != "params" {
                    return Err(line.error(format!("unknown indicator field `{}`", key)));
                }
                line.expect_empty(rest)?;
                set_once(&mut draft.params, IndicatorParams::new(), line, "params")
            }
            6 => {
                let params = match self.pending.as_mut() {
                    Some(Pending::Indicator(IndicatorDraft {
                        params: Some(params),
                        ..
                    })) => params,
                    _ => return Err(line.error("parameter outside a params block")),
                };
                let (key, rest) = line.split_key(line.content)?;
                let value = line.number(rest)?;
                if params.insert(key.clone(), value).is_some() {
                    return Err(line.error(format!("duplicate parameter `{}`", key)));
                }
                Ok(())
            }
            _ => Err(line.error("unexpected indentation in indicator list")),
        }
    }

    /// Close the item currently being read, if any
    fn flush(&mut self) -> StrategyResult<()> {
        match self.pending.take() {
            Some(Pending::Condition(draft)) => {
                let side = draft.side;
                let condition = draft.build()?;
                let list = match side {
                    ConditionSide::Entry => self.entry_conditions.as_mut(),
                    ConditionSide::Exit => self.exit_conditions.as_mut(),
                };
                if let Some(list) = list {
                    list.push(condition);
                }
            }
            Some(Pending::Indicator(draft)) => {
                let indicator = draft.build()?;
                if let Some(list) = self.indicators.as_mut() {
                    list.push(indicator);
                }
            }
            None => {}
        }
        Ok(())
    }

    fn finish(mut self, end_line: usize) -> StrategyResult<StrategyConfig> {
        self.flush()?;
        let missing = |key: &str| StrategyError::malformed(end_line, "", format!("missing `{}`", key));
        if let Some(key) = SECTIONS.get(self.next) {
            return Err(missing(key));
        }

        let (risk_line, risk_raw, risk) = self.risk.ok_or_else(|| missing("risk_management"))?;
        let incomplete = |key: &str| {
            StrategyError::malformed(risk_line, &risk_raw, format!("risk_management is missing `{}`", key))
        };
        let risk_management = RiskManagement {
            position_sizing_method: risk
                .position_sizing_method
                .ok_or_else(|| incomplete("position_sizing_method"))?,
            risk_per_trade: risk.risk_per_trade.ok_or_else(|| incomplete("risk_per_trade"))?,
            stop_loss: risk.stop_loss.ok_or_else(|| incomplete("stop_loss"))?,
            take_profit: risk.take_profit.ok_or_else(|| incomplete("take_profit"))?,
            max_position_size: risk
                .max_position_size
                .ok_or_else(|| incomplete("max_position_size"))?,
            atr_multiplier: risk.atr_multiplier.ok_or_else(|| incomplete("atr_multiplier"))?,
        };

        Ok(StrategyConfig {
            symbols: self.symbols.ok_or_else(|| missing("symbols"))?,
            timeframe: self.timeframe.ok_or_else(|| missing("timeframe"))?,
            start_date: self.start_date.ok_or_else(|| missing("start_date"))?,
            end_date: self.end_date.ok_or_else(|| missing("end_date"))?,
            entry_conditions: self
                .entry_conditions
                .ok_or_else(|| missing("entry_conditions"))?,
            exit_conditions: self.exit_conditions.ok_or_else(|| missing("exit_conditions"))?,
            risk_management,
            indicators: self.indicators.ok_or_else(|| missing("indicators"))?,
        })
    }
}

/// Parse config text back into a strategy
pub fn parse_config(text: &str) -> StrategyResult<StrategyConfig> {
    let mut parser = Parser::new();
    let mut last = 0;
    for (index, raw) in text.lines().enumerate() {
        last = index + 1;
        if let Some(line) = Line::read(last, raw)? {
            parser.feed(line)?;
        }
    }
    parser.finish(last + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn malformed_line(text: &str) -> usize {
        match parse_config(text) {
            Err(StrategyError::MalformedConfigText { line, .. }) => line,
            other => panic!("expected malformed text error, got {:?}", other),
        }
    }

    const MINIMAL: &str = r#"symbols: ["SPY"]
timeframe: "1h"
start_date: "2024-01-01"
end_date: "2024-03-31"
entry_conditions:
exit_conditions:
risk_management:
  position_sizing_method: "fixed"
  risk_per_trade: 0.02
  stop_loss: 0.05
  take_profit: 0.1
  max_position_size: 5000
  atr_multiplier: 1.5
indicators:
"#;

    #[test]
    fn test_parses_minimal_config() {
        let config = parse_config(MINIMAL).unwrap();
        assert_eq!(config.symbols.iter().collect::<Vec<_>>(), vec!["SPY"]);
        assert_eq!(config.timeframe, Timeframe::Hour1);
        assert!(config.entry_conditions.is_empty());
        assert!(config.indicators.is_empty());
        assert_eq!(config.risk_management.max_position_size, Decimal::from(5000));
    }

    #[test]
    fn test_unknown_top_level_key() {
        let text = MINIMAL.replace("timeframe: \"1h\"", "interval: \"1h\"");
        assert_eq!(malformed_line(&text), 2);
    }

    #[test]
    fn test_missing_section_points_past_end() {
        let text = MINIMAL.replace("indicators:\n", "");
        assert_eq!(malformed_line(&text), 14);
    }

    #[test]
    fn test_bad_risk_number() {
        let text = MINIMAL.replace("stop_loss: 0.05", "stop_loss: five");
        assert_eq!(malformed_line(&text), 10);
    }

    #[test]
    fn test_condition_shape_must_match_comparison() {
        let text = MINIMAL.replace(
            "entry_conditions:\n",
            "entry_conditions:\n  - indicator: \"rsi\"\n    comparison: \"between\"\n    value: 30\n",
        );
        assert_eq!(malformed_line(&text), 6);
    }

    #[test]
    fn test_duplicate_symbol_rejected() {
        let text = MINIMAL.replace(r#"["SPY"]"#, r#"["SPY", "SPY"]"#);
        assert_eq!(malformed_line(&text), 1);
    }

    #[test]
    fn test_tabs_rejected() {
        let text = MINIMAL.replace("  stop_loss", "\tstop_loss");
        assert_eq!(malformed_line(&text), 10);
    }

    #[test]
    fn test_unquoted_reference_rejected() {
        let text = MINIMAL.replace(
            "exit_conditions:\n",
            "exit_conditions:\n  - indicator: \"close\"\n    comparison: \"below\"\n    value: sma_20\n",
        );
        assert_eq!(malformed_line(&text), 9);
    }

    #[test]
    fn test_sections_must_follow_written_order() {
        let text = MINIMAL.replace(
            "symbols: [\"SPY\"]\ntimeframe: \"1h\"\n",
            "timeframe: \"1h\"\nsymbols: [\"SPY\"]\n",
        );
        assert_eq!(malformed_line(&text), 1);

        let text = format!("{}symbols: [\"QQQ\"]\n", MINIMAL);
        assert_eq!(malformed_line(&text), 15);
    }

    #[test]
    fn test_risk_fields_must_follow_written_order() {
        let text = MINIMAL.replace(
            "  stop_loss: 0.05\n  take_profit: 0.1\n",
            "  take_profit: 0.1\n  stop_loss: 0.05\n",
        );
        assert_eq!(malformed_line(&text), 10);
    }

    #[test]
    fn test_value_needs_single_space_after_colon() {
        let text = MINIMAL.replace("timeframe: \"1h\"", "timeframe:\"1h\"");
        assert_eq!(malformed_line(&text), 2);

        let text = MINIMAL.replace("stop_loss: 0.05", "stop_loss:  0.05");
        assert_eq!(malformed_line(&text), 10);
    }

    #[test]
    fn test_list_item_spacing_is_exact() {
        let text = MINIMAL.replace(
            "indicators:\n",
            "indicators:\n  -   name: \"RSI\"\n    params:\n      period: 14\n",
        );
        assert_eq!(malformed_line(&text), 15);

        let text = MINIMAL.replace(
            "exit_conditions:\n",
            "exit_conditions:\n  -  indicator: \"rsi\"\n    comparison: \"above\"\n    value: 70\n",
        );
        assert_eq!(malformed_line(&text), 7);
    }

    #[test]
    fn test_condition_fields_must_follow_written_order() {
        let text = MINIMAL.replace(
            "exit_conditions:\n",
            "exit_conditions:\n  - indicator: \"rsi\"\n    value: 70\n    comparison: \"above\"\n",
        );
        assert_eq!(malformed_line(&text), 8);

        let text = MINIMAL.replace(
            "exit_conditions:\n",
            "exit_conditions:\n  - indicator: \"rsi\"\n    comparison: \"between\"\n    high_value: \"70\"\n    low_value: \"30\"\n",
        );
        assert_eq!(malformed_line(&text), 9);
    }

    #[test]
    fn test_non_canonical_spellings_rejected() {
        let text = MINIMAL.replace(r#"["SPY"]"#, r#"["SPY" ]"#);
        assert_eq!(malformed_line(&text), 1);

        let text = MINIMAL.replace("stop_loss: 0.05", "stop_loss: 0.050");
        assert_eq!(malformed_line(&text), 10);

        let text = MINIMAL.replace("max_position_size: 5000", "max_position_size: 5000.0");
        assert_eq!(malformed_line(&text), 12);

        let text = MINIMAL.replace("timeframe: \"1h\"", "timeframe: \"\\u0031h\"");
        assert_eq!(malformed_line(&text), 2);

        let text = MINIMAL.replace("  stop_loss:", "  \"stop_loss\":");
        assert_eq!(malformed_line(&text), 10);
    }

    #[test]
    fn test_closing_quote() {
        assert_eq!(closing_quote(r#""abc": 1"#), Some(4));
        assert_eq!(closing_quote(r#""a\"b": 1"#), Some(5));
        assert_eq!(closing_quote(r#""open"#), None);
    }
}
