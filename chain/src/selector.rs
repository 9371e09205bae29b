//! Baseline selection over raw option-chain quotes.
//!
//! Given the morning chain snapshot, pick for each (symbol, option type)
//! slot the single contract whose premium sits closest to a fixed target
//! (100 by default, roughly "the ~100-rupee contract"). That contract's
//! price becomes the reference point that the signal evaluator measures
//! later moves against.
//!
//! ## Determinism
//! Selection is a pure function of the input slice:
//! - Output keys appear in first-occurrence order of the input.
//! - When two contracts are equally close to the target, the one seen
//!   first in the input wins (strict `<` improvement test).
//!
//! ## Missing combinations
//! A (symbol, option type) pair with no quotes in the input simply produces
//! no baseline row. Callers expecting a specific combination must check for
//! its absence themselves.

use std::collections::HashMap;

use crate::types::{BaselineRow, ContractKey, Quote};

/// Default premium target the selector aims for.
pub const DEFAULT_BASELINE_TARGET: f64 = 100.0;

/// Select one baseline row per distinct (symbol, option type) in `quotes`.
///
/// Per slot, the quote minimizing `|price - target|` is chosen; ties keep
/// the first occurrence. Never fabricates a slot absent from the input.
pub fn select_baseline(quotes: &[Quote], target: f64) -> Vec<BaselineRow> {
    // Index into `order` per key, so output order matches first occurrence.
    let mut slots: HashMap<ContractKey, usize> = HashMap::new();
    let mut order: Vec<(ContractKey, &Quote)> = Vec::new();

    for quote in quotes {
        let key = quote.key();

        match slots.get(&key) {
            None => {
                slots.insert(key.clone(), order.len());
                order.push((key, quote));
            }
            Some(&idx) => {
                let incumbent = order[idx].1;
                if (quote.price - target).abs() < (incumbent.price - target).abs() {
                    order[idx].1 = quote;
                }
            }
        }
    }

    order
        .into_iter()
        .map(|(key, quote)| BaselineRow {
            symbol: key.symbol,
            option_type: key.option_type,
            strike_price: quote.strike_price,
            base_price: quote.price,
        })
        .collect()
}
