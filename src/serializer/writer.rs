//! Config text writer

use std::fmt::{self, Write};

use itertools::Itertools;

use crate::model::{Condition, Indicator, Operand, StrategyConfig};

/// Display adapter rendering a config as its text block
pub struct ConfigText<'a>(pub &'a StrategyConfig);

impl fmt::Display for ConfigText<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let config = self.0;

        writeln!(
            f,
            "symbols: [{}]",
            config.symbols.iter().map(quote).join(", ")
        )?;
        writeln!(f, "timeframe: {}", quote(config.timeframe.as_str()))?;
        writeln!(f, "start_date: {}", quote(&config.start_date.to_string()))?;
        writeln!(f, "end_date: {}", quote(&config.end_date.to_string()))?;
        writeln!(f)?;

        writeln!(f, "# Entry conditions")?;
        writeln!(f, "entry_conditions:")?;
        for condition in &config.entry_conditions {
            write_condition(f, condition)?;
        }
        writeln!(f)?;

        writeln!(f, "# Exit conditions")?;
        writeln!(f, "exit_conditions:")?;
        for condition in &config.exit_conditions {
            write_condition(f, condition)?;
        }
        writeln!(f)?;

        let risk = &config.risk_management;
        writeln!(f, "# Risk management parameters")?;
        writeln!(f, "risk_management:")?;
        writeln!(
            f,
            "  position_sizing_method: {}",
            quote(risk.position_sizing_method.as_str())
        )?;
        writeln!(f, "  risk_per_trade: {}", risk.risk_per_trade)?;
        writeln!(f, "  stop_loss: {}", risk.stop_loss)?;
        writeln!(f, "  take_profit: {}", risk.take_profit)?;
        // Equal amounts render the same regardless of scale
        writeln!(f, "  max_position_size: {}", risk.max_position_size.normalize())?;
        writeln!(f, "  atr_multiplier: {}", risk.atr_multiplier)?;
        writeln!(f)?;

        writeln!(f, "# Required indicators")?;
        writeln!(f, "indicators:")?;
        for indicator in &config.indicators {
            write_indicator(f, indicator)?;
        }

        Ok(())
    }
}

fn write_condition(f: &mut fmt::Formatter, condition: &Condition) -> fmt::Result {
    writeln!(f, "  - indicator: {}", quote(condition.indicator()))?;
    writeln!(f, "    comparison: {}", quote(condition.comparison().as_str()))?;
    match condition.operand() {
        Operand::Single { value, .. } => {
            if is_number_literal(value) {
                writeln!(f, "    value: {}", value)
            } else {
                writeln!(f, "    value: {}", quote(value))
            }
        }
        Operand::Range {
            low_value,
            high_value,
        } => {
            writeln!(f, "    low_value: {}", quote(low_value))?;
            writeln!(f, "    high_value: {}", quote(high_value))
        }
    }
}

fn write_indicator(f: &mut fmt::Formatter, indicator: &Indicator) -> fmt::Result {
    writeln!(f, "  - name: {}", quote(indicator.name.as_str()))?;
    writeln!(f, "    params:")?;
    for (param, value) in &indicator.params {
        if is_plain_key(param) {
            writeln!(f, "      {}: {}", param, value)?;
        } else {
            writeln!(f, "      {}: {}", quote(param), value)?;
        }
    }
    Ok(())
}

/// Double-quoted string with JSON escapes
pub(crate) fn quote(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Operand text written unquoted: a finite number with no surrounding space
pub(crate) fn is_number_literal(s: &str) -> bool {
    !s.is_empty()
        && s.trim() == s
        && s.parse::<f64>().map(f64::is_finite).unwrap_or(false)
}

/// Parameter names written bare: ASCII letters, digits and underscores
pub(crate) fn is_plain_key(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("sma_20"), "\"sma_20\"");
        assert_eq!(quote("a\"b\\c"), "\"a\\\"b\\\\c\"");
        assert_eq!(quote("line\nbreak"), "\"line\\nbreak\"");
        assert_eq!(quote("\u{1}"), "\"\\u0001\"");
    }

    #[test]
    fn test_number_literal() {
        assert!(is_number_literal("70"));
        assert!(is_number_literal("-0.5"));
        assert!(!is_number_literal(""));
        assert!(!is_number_literal(" 70"));
        assert!(!is_number_literal("sma_20"));
        assert!(!is_number_literal("inf"));
        assert!(!is_number_literal("NaN"));
    }

    #[test]
    fn test_plain_key() {
        assert!(is_plain_key("k_period"));
        assert!(!is_plain_key("k period"));
        assert!(!is_plain_key(""));
    }
}
