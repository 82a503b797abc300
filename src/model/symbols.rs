//! Ordered, de-duplicated ticker list

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Normalize user input into a ticker: trimmed and uppercased.
/// Returns `None` for blank input.
pub fn normalize_symbol(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_uppercase())
    }
}

/// Tradable symbols of a strategy.
///
/// Behaves as a set for membership but keeps insertion order, which is also
/// the display and serialization order. Two lists are equal only when they
/// hold the same tickers in the same order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Symbols(IndexSet<String>);

impl Symbols {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a ticker after normalizing it. Blank or already present input is
    /// ignored; returns whether the list changed.
    pub fn add(&mut self, input: &str) -> bool {
        match normalize_symbol(input) {
            Some(symbol) => self.0.insert(symbol),
            None => false,
        }
    }

    /// Remove a ticker if present; returns whether the list changed
    pub fn remove(&mut self, input: &str) -> bool {
        match normalize_symbol(input) {
            Some(symbol) => self.0.shift_remove(&symbol),
            None => false,
        }
    }

    /// Insert a ticker exactly as given. Used when rebuilding from stored text.
    pub(crate) fn insert_raw(&mut self, symbol: String) -> bool {
        self.0.insert(symbol)
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.0.contains(symbol)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl PartialEq for Symbols {
    fn eq(&self, other: &Self) -> bool {
        self.0.len() == other.0.len() && self.0.iter().eq(other.0.iter())
    }
}

impl Eq for Symbols {}

impl<S: AsRef<str>> FromIterator<S> for Symbols {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut symbols = Symbols::new();
        for s in iter {
            symbols.add(s.as_ref());
        }
        symbols
    }
}

impl<'a> IntoIterator for &'a Symbols {
    type Item = &'a String;
    type IntoIter = indexmap::set::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_normalizes_and_dedups() {
        let mut symbols: Symbols = ["AAPL", "MSFT"].into_iter().collect();
        assert!(symbols.add("  tsla "));
        assert!(!symbols.add("TSLA"));
        assert!(!symbols.add("   "));
        assert_eq!(symbols.iter().collect::<Vec<_>>(), vec!["AAPL", "MSFT", "TSLA"]);
    }

    #[test]
    fn test_remove_keeps_order() {
        let mut symbols: Symbols = ["AAPL", "MSFT", "GOOG"].into_iter().collect();
        assert!(symbols.remove("msft"));
        assert!(!symbols.remove("NVDA"));
        assert_eq!(symbols.iter().collect::<Vec<_>>(), vec!["AAPL", "GOOG"]);
    }

    #[test]
    fn test_equality_is_order_sensitive() {
        let a: Symbols = ["AAPL", "MSFT"].into_iter().collect();
        let b: Symbols = ["MSFT", "AAPL"].into_iter().collect();
        assert_ne!(a, b);
    }

    #[test]
    fn test_serializes_as_plain_list() {
        let symbols: Symbols = ["SPY", "QQQ"].into_iter().collect();
        assert_eq!(serde_json::to_string(&symbols).unwrap(), r#"["SPY","QQQ"]"#);
    }
}
