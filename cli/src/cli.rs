use std::time::Duration;

use clap::Parser;

use tracker::TrackerConfig;

#[derive(Debug, Parser)]
#[clap(name = "optiontracker", version)]
pub struct Cli {
    /// Symbols to watch (comma-separated)
    #[clap(
        long,
        value_delimiter = ',',
        default_values_t = [
            "NIFTY".to_string(),
            "BANKNIFTY".to_string(),
            "FINNIFTY".to_string(),
            "RELIANCE".to_string(),
            "HDFCBANK".to_string(),
            "CRUDEOILM".to_string(),
        ]
    )]
    pub symbols: Vec<String>,

    /// Buy-signal threshold: percentage rise from baseline (inclusive)
    #[clap(long, default_value = "10.0")]
    pub threshold_pct: f64,

    /// Premium target for baseline contract selection
    #[clap(long, default_value = "100.0")]
    pub target: f64,

    /// Seconds between evaluation cycles
    #[clap(long, default_value = "30")]
    pub interval_secs: u64,

    /// Seconds the selected baseline stays valid before being rebuilt
    #[clap(long, default_value = "3600")]
    pub baseline_ttl_secs: u64,

    /// Stop after this many cycles (runs forever when omitted)
    #[clap(long)]
    pub cycles: Option<u64>,

    /// Seed for the simulated feed, for reproducible demo runs
    #[clap(long)]
    pub seed: Option<u64>,
}

// Environment overrides, applied on top of the parsed flags.
const ENV_SYMBOLS: &str = "OPTIONTRACKER_SYMBOLS";
const ENV_THRESHOLD_PCT: &str = "OPTIONTRACKER_THRESHOLD_PCT";
const ENV_TARGET: &str = "OPTIONTRACKER_TARGET";
const ENV_INTERVAL_SECS: &str = "OPTIONTRACKER_INTERVAL_SECS";
const ENV_BASELINE_TTL_SECS: &str = "OPTIONTRACKER_BASELINE_TTL_SECS";

/// Build a TrackerConfig from CLI flags, letting `OPTIONTRACKER_*`
/// environment variables override individual knobs.
pub(crate) fn tracker_config_from_cli(cli: &Cli) -> TrackerConfig {
    apply_env_overrides(flags_config(cli), |key| std::env::var(key).ok())
}

fn flags_config(cli: &Cli) -> TrackerConfig {
    TrackerConfig {
        watchlist: cli.symbols.clone(),
        baseline_target: cli.target,
        signal_threshold_pct: cli.threshold_pct,
        baseline_ttl: Duration::from_secs(cli.baseline_ttl_secs),
        poll_interval: Duration::from_secs(cli.interval_secs),
        ..TrackerConfig::default()
    }
}

/// Apply environment overrides on top of a flag-built config.
///
/// The variable lookup is injected so tests can script it. A variable that
/// is unset or fails to parse leaves the flag value untouched.
fn apply_env_overrides(
    mut cfg: TrackerConfig,
    var: impl Fn(&str) -> Option<String>,
) -> TrackerConfig {
    if let Some(raw) = var(ENV_SYMBOLS) {
        let symbols: Vec<String> = raw
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        if !symbols.is_empty() {
            cfg.watchlist = symbols;
        }
    }

    if let Some(v) = var(ENV_THRESHOLD_PCT).and_then(|s| s.parse().ok()) {
        cfg.signal_threshold_pct = v;
    }

    if let Some(v) = var(ENV_TARGET).and_then(|s| s.parse().ok()) {
        cfg.baseline_target = v;
    }

    if let Some(v) = var(ENV_INTERVAL_SECS).and_then(|s| s.parse().ok()) {
        cfg.poll_interval = Duration::from_secs(v);
    }

    if let Some(v) = var(ENV_BASELINE_TTL_SECS).and_then(|s| s.parse().ok()) {
        cfg.baseline_ttl = Duration::from_secs(v);
    }

    cfg
}
