pub mod cache;
pub mod parser;
pub mod sim;

use std::collections::HashMap;

use async_trait::async_trait;

use chain::types::ContractKey;

/// Collaborator boundary for market data.
///
/// Implementations own their transport, session handling and scheduling;
/// the signal core only ever sees the record shapes defined here.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Fetch the raw option-chain records for a watchlist.
    ///
    /// Records are returned untyped on purpose: real chain endpoints emit
    /// the occasional garbage row, and per-record rejection is the parser's
    /// job ([`parser::parse_chain`]), not the transport's.
    async fn option_chain(&self, symbols: &[String]) -> anyhow::Result<Vec<serde_json::Value>>;

    /// Fetch the last traded price for each requested contract.
    ///
    /// A contract the source cannot price is simply absent from the map;
    /// the evaluator turns that absence into a typed per-row failure.
    async fn last_traded_prices(
        &self,
        keys: &[ContractKey],
    ) -> anyhow::Result<HashMap<ContractKey, f64>>;
}
