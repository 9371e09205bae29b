use std::time::Duration;

/// Configuration knobs for the signal tracker.
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Symbols whose option chains are watched.
    pub watchlist: Vec<String>,

    /// Premium the baseline selector aims for when picking the reference
    /// contract per (symbol, option type).
    pub baseline_target: f64,

    /// Percentage rise from baseline (inclusive) that flags a buy signal.
    pub signal_threshold_pct: f64,

    /// How long a selected baseline stays valid before the next cycle
    /// rebuilds it from a fresh chain snapshot.
    ///
    /// The original workflow pins the baseline to the 9:30 AM snapshot for
    /// an hour; one hour is kept as the default.
    pub baseline_ttl: Duration,

    /// Delay between evaluation cycles when running the polling loop.
    pub poll_interval: Duration,

    /// Capacity of each subscriber's report channel. A slow subscriber
    /// drops reports rather than stalling the cycle.
    pub subscriber_channel_capacity: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            watchlist: vec![
                "NIFTY".to_string(),
                "BANKNIFTY".to_string(),
                "FINNIFTY".to_string(),
                "RELIANCE".to_string(),
                "HDFCBANK".to_string(),
                "CRUDEOILM".to_string(),
            ],
            baseline_target: chain::selector::DEFAULT_BASELINE_TARGET,
            signal_threshold_pct: chain::evaluator::DEFAULT_SIGNAL_THRESHOLD_PCT,
            baseline_ttl: Duration::from_secs(60 * 60),
            poll_interval: Duration::from_secs(30),
            subscriber_channel_capacity: 16,
        }
    }
}
