pub mod errors;
pub mod evaluator;
pub mod report;
pub mod selector;
pub mod types;

pub use errors::SignalError;
pub use evaluator::{DEFAULT_SIGNAL_THRESHOLD_PCT, evaluate};
pub use report::{RowFailure, SignalReport};
pub use selector::{DEFAULT_BASELINE_TARGET, select_baseline};
pub use types::{BaselineRow, ContractKey, OptionType, Quote, SignalRow};
