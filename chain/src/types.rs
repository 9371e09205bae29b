use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::SignalError;

/// The two option contract types.
///
/// Indian exchanges tag these `CE` / `PE` in chain data; the longer
/// `CALL` / `PUT` tags are accepted on input for other sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, std::hash::Hash, Serialize, Deserialize)]
pub enum OptionType {
    #[serde(rename = "CE", alias = "CALL")]
    Call,

    #[serde(rename = "PE", alias = "PUT")]
    Put,
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OptionType::Call => "CE",
            OptionType::Put => "PE",
        };
        f.write_str(s)
    }
}

impl FromStr for OptionType {
    type Err = SignalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "CE" | "CALL" => Ok(OptionType::Call),
            "PE" | "PUT" => Ok(OptionType::Put),
            other => Err(SignalError::MalformedQuote(format!(
                "unknown option type tag: {other}"
            ))),
        }
    }
}

/// Key identifying one tracked contract slot: a symbol on one side of the chain.
///
/// Baseline selection produces exactly one row per distinct key present in
/// the input, and current prices are looked up by the same key.
#[derive(Debug, Clone, PartialEq, Eq, std::hash::Hash)]
pub struct ContractKey {
    pub symbol: String,
    pub option_type: OptionType,
}

impl ContractKey {
    pub fn new(symbol: impl Into<String>, option_type: OptionType) -> Self {
        Self {
            symbol: symbol.into(),
            option_type,
        }
    }

    pub fn id(&self) -> String {
        format!("{}/{}", self.symbol, self.option_type)
    }
}

/// One market data point from the quote source.
///
/// Transient: consumed by baseline selection and never mutated. Whether
/// `strike_price` sits on the market's strike interval is the source's
/// problem, not validated here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    #[serde(rename = "optionType")]
    pub option_type: OptionType,
    #[serde(rename = "strikePrice")]
    pub strike_price: i64,
    pub price: f64,
}

impl Quote {
    pub fn key(&self) -> ContractKey {
        ContractKey::new(self.symbol.clone(), self.option_type)
    }
}

/// Selected reference point for one (symbol, option type) slot.
///
/// Created once per evaluation cycle and immutable within it; later price
/// changes are measured against `base_price`.
#[derive(Debug, Clone, PartialEq)]
pub struct BaselineRow {
    pub symbol: String,
    pub option_type: OptionType,
    pub strike_price: i64,
    pub base_price: f64,
}

impl BaselineRow {
    pub fn key(&self) -> ContractKey {
        ContractKey::new(self.symbol.clone(), self.option_type)
    }
}

/// A baseline row joined with its current price and the derived signal fields.
///
/// Built explicitly from a [`BaselineRow`] plus a current price; the baseline
/// row itself is never touched. Recomputed every cycle, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalRow {
    pub symbol: String,
    pub option_type: OptionType,
    pub strike_price: i64,
    pub base_price: f64,
    pub current_price: f64,
    /// Percentage change from baseline, rounded to 2 decimal places.
    pub change_percent: f64,
    /// True when `change_percent` reached the threshold (inclusive).
    pub is_buy_signal: bool,
}

impl SignalRow {
    pub fn key(&self) -> ContractKey {
        ContractKey::new(self.symbol.clone(), self.option_type)
    }
}
