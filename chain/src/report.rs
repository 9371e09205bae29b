use crate::errors::SignalError;
use crate::types::{ContractKey, SignalRow};

/// A row that could not be evaluated, with the typed reason.
#[derive(Debug, Clone, PartialEq)]
pub struct RowFailure {
    pub key: ContractKey,
    pub error: SignalError,
}

/// Partial-success result of one evaluation cycle.
///
/// Rows that evaluated cleanly land in `rows`; rows that failed (missing
/// current price, zero baseline) land in `failures` with their typed error.
/// A failing row never poisons the rest of the batch, and an empty input
/// simply yields an empty report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignalReport {
    pub rows: Vec<SignalRow>,
    pub failures: Vec<RowFailure>,
}

impl SignalReport {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.failures.is_empty()
    }

    /// Only the rows flagged as buy signals, in row order.
    pub fn buy_signals(&self) -> impl Iterator<Item = &SignalRow> {
        self.rows.iter().filter(|r| r.is_buy_signal)
    }

    pub fn has_buy_signal(&self) -> bool {
        self.rows.iter().any(|r| r.is_buy_signal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OptionType;

    fn row(symbol: &str, signal: bool) -> SignalRow {
        SignalRow {
            symbol: symbol.to_string(),
            option_type: OptionType::Call,
            strike_price: 100,
            base_price: 100.0,
            current_price: if signal { 112.0 } else { 101.0 },
            change_percent: if signal { 12.0 } else { 1.0 },
            is_buy_signal: signal,
        }
    }

    #[test]
    fn empty_report_is_empty() {
        let report = SignalReport::default();
        assert!(report.is_empty());
        assert!(!report.has_buy_signal());
    }

    #[test]
    fn buy_signals_filters_and_preserves_order() {
        let report = SignalReport {
            rows: vec![row("A", false), row("B", true), row("C", true)],
            failures: vec![],
        };

        let symbols: Vec<&str> = report.buy_signals().map(|r| r.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["B", "C"]);
        assert!(report.has_buy_signal());
    }
}
