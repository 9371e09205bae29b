//! Simulated quote source for demo runs and tests.
//!
//! Mimics a morning chain snapshot: a handful of strikes per symbol and
//! option type with premiums drawn uniformly from [90, 110), then intraday
//! prices drifting 0–15% above the reference. No transport, no sessions,
//! no retries; it exists so the tracker can be run end to end offline.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{Value, json};

use chain::types::{ContractKey, OptionType};

use crate::QuoteSource;

/// Strikes emitted per (symbol, option type), centred on the symbol's
/// at-the-money strike.
const STRIKES_PER_SIDE: i64 = 3;

pub struct SimulatedFeed {
    rng: Mutex<StdRng>,
    /// Reference premium per contract, recorded when the chain is emitted
    /// and perturbed when current prices are asked for.
    reference: Mutex<HashMap<ContractKey, f64>>,
}

impl SimulatedFeed {
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Seeded constructor for reproducible runs.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
            reference: Mutex::new(HashMap::new()),
        }
    }

    /// At-the-money strike and strike interval for known symbols; unknown
    /// symbols fall back to a flat 100-point chain.
    fn chain_shape(symbol: &str) -> (i64, i64) {
        match symbol {
            "NIFTY" => (23_500, 100),
            "BANKNIFTY" => (51_000, 100),
            "FINNIFTY" => (22_000, 50),
            "RELIANCE" => (2_900, 50),
            "HDFCBANK" => (1_650, 20),
            "CRUDEOILM" => (6_200, 50),
            _ => (100, 100),
        }
    }

    fn round2(x: f64) -> f64 {
        (x * 100.0).round() / 100.0
    }
}

impl Default for SimulatedFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl QuoteSource for SimulatedFeed {
    async fn option_chain(&self, symbols: &[String]) -> anyhow::Result<Vec<Value>> {
        let mut rng = self.rng.lock().expect("sim rng lock poisoned");
        let mut reference = self.reference.lock().expect("sim reference lock poisoned");

        let mut records = Vec::new();

        for symbol in symbols {
            let (atm, step) = Self::chain_shape(symbol);

            for option_type in [OptionType::Call, OptionType::Put] {
                let key = ContractKey::new(symbol.clone(), option_type);
                let mut closest_to_100: Option<f64> = None;

                for i in -(STRIKES_PER_SIDE / 2)..=(STRIKES_PER_SIDE / 2) {
                    let price = Self::round2(rng.gen_range(90.0..110.0));

                    // Track the premium the selector will pick by default,
                    // so current prices drift off the same reference.
                    let better = match closest_to_100 {
                        None => true,
                        Some(best) => (price - 100.0).abs() < (best - 100.0).abs(),
                    };
                    if better {
                        closest_to_100 = Some(price);
                    }

                    records.push(json!({
                        "symbol": symbol,
                        "optionType": option_type.to_string(),
                        "strikePrice": atm + i * step,
                        "price": price,
                    }));
                }

                if let Some(price) = closest_to_100 {
                    reference.insert(key, price);
                }
            }
        }

        Ok(records)
    }

    async fn last_traded_prices(
        &self,
        keys: &[ContractKey],
    ) -> anyhow::Result<HashMap<ContractKey, f64>> {
        let mut rng = self.rng.lock().expect("sim rng lock poisoned");
        let reference = self.reference.lock().expect("sim reference lock poisoned");

        let mut prices = HashMap::with_capacity(keys.len());

        for key in keys {
            // A contract the sim never quoted stays absent, exactly like a
            // real source that cannot price it.
            if let Some(&base) = reference.get(key) {
                let drift: f64 = rng.gen_range(1.00..1.15);
                prices.insert(key.clone(), Self::round2(base * drift));
            }
        }

        Ok(prices)
    }
}
