//! SignalTracker
//!
//! This module runs the evaluation cycle over a quote source.
//! Responsibilities:
//!   • Fetch and parse the raw option chain for the watchlist
//!   • Build (or reuse, within TTL) the baseline table
//!   • Refresh current prices for the baseline contracts
//!   • Evaluate buy signals and log per-row failures
//!   • Broadcast the resulting snapshot to all subscribers
//!
//! SignalTracker is designed as an Arc-managed async service, so the
//! polling loop may safely capture `self` without lifetime issues. All
//! signal math lives in `chain`; this service only orchestrates.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, mpsc};
use tracing::{Instrument, info, warn};

use chain::report::SignalReport;
use chain::types::{BaselineRow, ContractKey};
use chain::{evaluator, selector};
use common::CycleId;
use common::logger::spans::cycle_span;
use feed::QuoteSource;
use feed::cache::TtlCache;
use feed::parser::parse_chain;

use crate::config::TrackerConfig;

/// One broadcast unit: the evaluated report plus cycle metadata.
#[derive(Debug, Clone)]
pub struct CycleSnapshot {
    pub cycle_id: CycleId,
    pub generated_at: DateTime<Utc>,
    pub report: SignalReport,
}

/// Orchestrates chain fetching, TTL-cached baseline selection, signal
/// evaluation and snapshot broadcasting.
pub struct SignalTracker<S> {
    cfg: TrackerConfig,

    /// Quote source collaborator (real endpoint or simulation).
    source: Arc<S>,

    /// Baseline tables keyed by watchlist id, valid for `baseline_ttl`.
    baselines: Mutex<TtlCache<String, Vec<BaselineRow>>>,

    /// Components interested in receiving cycle snapshots.
    subscribers: Mutex<Vec<mpsc::Sender<CycleSnapshot>>>,
}

impl<S: QuoteSource> SignalTracker<S> {
    /// Create a new SignalTracker wrapped in Arc<Self> for multi-task ownership.
    pub fn new(cfg: TrackerConfig, source: Arc<S>) -> Arc<Self> {
        let baselines = Mutex::new(TtlCache::new(cfg.baseline_ttl));

        Arc::new(Self {
            cfg,
            source,
            baselines,
            subscribers: Mutex::new(Vec::new()),
        })
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.cfg
    }

    /// Register a subscriber and hand back the receiving end.
    ///
    /// Snapshots are delivered with `try_send`: a subscriber that stops
    /// draining its channel loses snapshots instead of stalling the cycle.
    pub async fn subscribe(&self) -> mpsc::Receiver<CycleSnapshot> {
        let (tx, rx) = mpsc::channel(self.cfg.subscriber_channel_capacity);
        self.subscribers.lock().await.push(tx);
        rx
    }

    /// Run one evaluation cycle and return the snapshot it broadcast.
    pub async fn run_cycle(&self) -> anyhow::Result<CycleSnapshot> {
        let cycle_id = CycleId::new();
        let span = cycle_span(cycle_id);

        async move {
            let baseline = self.baseline_for_watchlist().await?;

            let report = if baseline.is_empty() {
                info!("no baseline rows, nothing to evaluate");
                SignalReport::default()
            } else {
                let keys: Vec<ContractKey> = baseline.iter().map(|r| r.key()).collect();
                let current_prices = self.source.last_traded_prices(&keys).await?;

                let report =
                    evaluator::evaluate(&baseline, &current_prices, self.cfg.signal_threshold_pct);

                for failure in &report.failures {
                    warn!(contract = %failure.key.id(), error = %failure.error, "row skipped");
                }

                info!(
                    rows = report.rows.len(),
                    failures = report.failures.len(),
                    buy_signals = report.buy_signals().count(),
                    "cycle evaluated"
                );

                report
            };

            let snapshot = CycleSnapshot {
                cycle_id,
                generated_at: Utc::now(),
                report,
            };

            self.broadcast(&snapshot).await;
            Ok(snapshot)
        }
        .instrument(span)
        .await
    }

    /// Polling loop: one cycle per `poll_interval` tick until the optional
    /// cycle budget runs out. The loop owns scheduling only; a failed cycle
    /// is logged and the next tick proceeds.
    pub async fn run(self: Arc<Self>, max_cycles: Option<u64>) {
        let mut ticker = tokio::time::interval(self.cfg.poll_interval);
        let mut completed: u64 = 0;

        loop {
            ticker.tick().await;

            if let Err(e) = self.run_cycle().await {
                warn!(error = %e, "evaluation cycle failed");
            }

            completed += 1;
            if let Some(max) = max_cycles {
                if completed >= max {
                    info!(cycles = completed, "cycle budget reached, stopping");
                    return;
                }
            }
        }
    }

    /// Serve the baseline from cache, or rebuild it from a fresh chain
    /// snapshot when missing or expired.
    ///
    /// The cache lock is held across the rebuild: when concurrent cycles
    /// miss at the same time, one fetches and selects while the others
    /// wait and then hit the freshly inserted entry.
    async fn baseline_for_watchlist(&self) -> anyhow::Result<Vec<BaselineRow>> {
        let key = self.cfg.watchlist.join(",");

        let mut cache = self.baselines.lock().await;
        if let Some(baseline) = cache.get(&key) {
            return Ok(baseline.clone());
        }

        let raw = self.source.option_chain(&self.cfg.watchlist).await?;
        let (quotes, rejected) = parse_chain(&raw);

        for error in &rejected {
            warn!(%error, "chain record rejected");
        }

        let baseline = selector::select_baseline(&quotes, self.cfg.baseline_target);

        info!(
            records = raw.len(),
            rejected = rejected.len(),
            baseline_rows = baseline.len(),
            "baseline rebuilt"
        );

        cache.insert(key, baseline.clone());

        Ok(baseline)
    }

    /// Invalidate the cached baseline so the next cycle rebuilds it.
    pub async fn reset_baseline(&self) {
        self.baselines.lock().await.clear();
    }

    async fn broadcast(&self, snapshot: &CycleSnapshot) {
        let mut subscribers = self.subscribers.lock().await;

        // Drop subscribers whose receiving end is gone.
        subscribers.retain(|tx| !tx.is_closed());

        for tx in subscribers.iter() {
            if tx.try_send(snapshot.clone()).is_err() {
                warn!("subscriber channel full, snapshot dropped");
            }
        }
    }
}
