use tracing::{Level, Span};

use super::cycle_id::CycleId;

/// Root span for one evaluation cycle; every event logged inside it
/// carries the cycle id.
pub fn cycle_span(cycle_id: CycleId) -> Span {
    tracing::span!(Level::INFO, "cycle", cycle_id = %cycle_id)
}
