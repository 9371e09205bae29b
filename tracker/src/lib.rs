pub mod config;
pub mod tracker;

pub use config::TrackerConfig;
pub use tracker::{CycleSnapshot, SignalTracker};
