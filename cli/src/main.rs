pub mod cli;

use std::sync::Arc;

use clap::Parser;
use tracing::info;

use cli::{Cli, tracker_config_from_cli};
use common::init_logger;
use feed::sim::SimulatedFeed;
use tracker::SignalTracker;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logger("optiontracker");

    let cli = Cli::parse();
    let cfg = tracker_config_from_cli(&cli);

    let feed = match cli.seed {
        Some(seed) => SimulatedFeed::with_seed(seed),
        None => SimulatedFeed::new(),
    };

    let tracker = SignalTracker::new(cfg, Arc::new(feed));
    let mut snapshots = tracker.subscribe().await;

    // Presentation: log every row, highlight buy alerts.
    tokio::spawn(async move {
        while let Some(snapshot) = snapshots.recv().await {
            for row in &snapshot.report.rows {
                info!(
                    contract = %row.key().id(),
                    strike = row.strike_price,
                    base = row.base_price,
                    current = row.current_price,
                    change_pct = row.change_percent,
                    "row"
                );
            }

            for row in snapshot.report.buy_signals() {
                info!(
                    contract = %row.key().id(),
                    change_pct = row.change_percent,
                    "BUY signal"
                );
            }

            if !snapshot.report.has_buy_signal() {
                info!(at = %snapshot.generated_at, "no signals yet");
            }
        }
    });

    tracker.run(cli.cycles).await;

    Ok(())
}
