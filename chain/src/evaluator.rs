//! Signal evaluation against a baseline table.
//!
//! For each baseline row, join on the caller-supplied current-price map,
//! compute the percentage move from baseline, and flag rows at or above
//! the threshold as buy signals.
//!
//! ## Partial success
//! Evaluation never aborts the batch. A row with no current price, or a
//! zero baseline (percentage change undefined), becomes a typed
//! [`RowFailure`] next to the rows that evaluated cleanly.
//!
//! ## Rounding
//! `change_percent` is rounded to 2 decimal places with `f64::round`
//! semantics (round-half-away-from-zero). The threshold comparison runs on
//! the *rounded* value, so a move that rounds to exactly the threshold is
//! still a signal (inclusive boundary).

use std::collections::HashMap;

use crate::errors::SignalError;
use crate::report::{RowFailure, SignalReport};
use crate::types::{BaselineRow, ContractKey, SignalRow};

/// Default buy-signal threshold: +10% from baseline.
pub const DEFAULT_SIGNAL_THRESHOLD_PCT: f64 = 10.0;

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Evaluate every baseline row against `current_prices`.
///
/// Pure: no retries, no caching, no side effects. Row order in the report
/// follows baseline order; failures keep the order they were hit in.
pub fn evaluate(
    baseline: &[BaselineRow],
    current_prices: &HashMap<ContractKey, f64>,
    threshold_pct: f64,
) -> SignalReport {
    let mut report = SignalReport::default();

    for row in baseline {
        let key = row.key();

        let Some(&current_price) = current_prices.get(&key) else {
            report.failures.push(RowFailure {
                key: key.clone(),
                error: SignalError::MissingPrice { key },
            });
            continue;
        };

        if row.base_price == 0.0 {
            report.failures.push(RowFailure {
                key: key.clone(),
                error: SignalError::DivisionByZero { key },
            });
            continue;
        }

        let change_percent = round2((current_price - row.base_price) / row.base_price * 100.0);

        report.rows.push(SignalRow {
            symbol: row.symbol.clone(),
            option_type: row.option_type,
            strike_price: row.strike_price,
            base_price: row.base_price,
            current_price,
            change_percent,
            is_buy_signal: change_percent >= threshold_pct,
        });
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OptionType;

    fn base(symbol: &str, option_type: OptionType, price: f64) -> BaselineRow {
        BaselineRow {
            symbol: symbol.to_string(),
            option_type,
            strike_price: 23500,
            base_price: price,
        }
    }

    fn prices(entries: &[(&str, OptionType, f64)]) -> HashMap<ContractKey, f64> {
        entries
            .iter()
            .map(|(s, t, p)| (ContractKey::new(*s, *t), *p))
            .collect()
    }

    #[test]
    fn fifteen_percent_rise_is_a_signal() {
        let baseline = vec![base("NIFTY", OptionType::Call, 100.0)];
        let current = prices(&[("NIFTY", OptionType::Call, 115.0)]);

        let report = evaluate(&baseline, &current, DEFAULT_SIGNAL_THRESHOLD_PCT);

        assert_eq!(report.rows.len(), 1);
        assert!(report.failures.is_empty());
        assert_eq!(report.rows[0].change_percent, 15.0);
        assert!(report.rows[0].is_buy_signal);
    }

    #[test]
    fn five_percent_rise_is_not_a_signal() {
        let baseline = vec![base("NIFTY", OptionType::Call, 100.0)];
        let current = prices(&[("NIFTY", OptionType::Call, 105.0)]);

        let report = evaluate(&baseline, &current, DEFAULT_SIGNAL_THRESHOLD_PCT);

        assert_eq!(report.rows[0].change_percent, 5.0);
        assert!(!report.rows[0].is_buy_signal);
    }

    #[test]
    fn threshold_boundary_is_inclusive() {
        let baseline = vec![base("NIFTY", OptionType::Call, 100.0)];
        let current = prices(&[("NIFTY", OptionType::Call, 110.0)]);

        let report = evaluate(&baseline, &current, DEFAULT_SIGNAL_THRESHOLD_PCT);

        assert_eq!(report.rows[0].change_percent, 10.0);
        assert!(report.rows[0].is_buy_signal);
    }

    #[test]
    fn rounded_change_is_consistent_with_inputs() {
        let baseline = vec![base("NIFTY", OptionType::Put, 91.0)];
        let current = prices(&[("NIFTY", OptionType::Put, 97.3)]);

        let report = evaluate(&baseline, &current, DEFAULT_SIGNAL_THRESHOLD_PCT);

        let row = &report.rows[0];
        // base * (1 + change/100) ~= current, within rounding tolerance
        let reconstructed = row.base_price * (1.0 + row.change_percent / 100.0);
        assert!((reconstructed - row.current_price).abs() < row.base_price * 0.005 / 100.0 + 1e-9);
    }

    #[test]
    fn change_percent_is_rounded_to_two_places() {
        let baseline = vec![base("NIFTY", OptionType::Call, 3.0)];
        let current = prices(&[("NIFTY", OptionType::Call, 4.0)]);

        let report = evaluate(&baseline, &current, DEFAULT_SIGNAL_THRESHOLD_PCT);

        // 1/3 * 100 = 33.333... -> 33.33
        assert_eq!(report.rows[0].change_percent, 33.33);
    }

    #[test]
    fn missing_price_fails_that_row_only() {
        let baseline = vec![
            base("NIFTY", OptionType::Call, 100.0),
            base("NIFTY", OptionType::Put, 100.0),
        ];
        let current = prices(&[("NIFTY", OptionType::Call, 112.0)]);

        let report = evaluate(&baseline, &current, DEFAULT_SIGNAL_THRESHOLD_PCT);

        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].key.id(), "NIFTY/PE");
        assert!(matches!(
            report.failures[0].error,
            SignalError::MissingPrice { .. }
        ));
    }

    #[test]
    fn zero_baseline_reports_division_by_zero_without_aborting() {
        let baseline = vec![
            base("NIFTY", OptionType::Call, 0.0),
            base("BANKNIFTY", OptionType::Call, 100.0),
        ];
        let current = prices(&[
            ("NIFTY", OptionType::Call, 10.0),
            ("BANKNIFTY", OptionType::Call, 111.0),
        ]);

        let report = evaluate(&baseline, &current, DEFAULT_SIGNAL_THRESHOLD_PCT);

        assert_eq!(report.failures.len(), 1);
        assert!(matches!(
            report.failures[0].error,
            SignalError::DivisionByZero { .. }
        ));

        // the healthy row still evaluated
        assert_eq!(report.rows.len(), 1);
        assert_eq!(report.rows[0].symbol, "BANKNIFTY");
        assert!(report.rows[0].is_buy_signal);
    }

    #[test]
    fn falling_price_yields_negative_change_and_no_signal() {
        let baseline = vec![base("NIFTY", OptionType::Call, 100.0)];
        let current = prices(&[("NIFTY", OptionType::Call, 88.5)]);

        let report = evaluate(&baseline, &current, DEFAULT_SIGNAL_THRESHOLD_PCT);

        assert_eq!(report.rows[0].change_percent, -11.5);
        assert!(!report.rows[0].is_buy_signal);
    }

    #[test]
    fn empty_baseline_yields_empty_report() {
        let report = evaluate(&[], &HashMap::new(), DEFAULT_SIGNAL_THRESHOLD_PCT);
        assert!(report.is_empty());
    }

    #[test]
    fn custom_threshold_is_honored() {
        let baseline = vec![base("NIFTY", OptionType::Call, 100.0)];
        let current = prices(&[("NIFTY", OptionType::Call, 105.0)]);

        let report = evaluate(&baseline, &current, 5.0);
        assert!(report.rows[0].is_buy_signal);

        let report = evaluate(&baseline, &current, 5.01);
        assert!(!report.rows[0].is_buy_signal);
    }
}
