pub mod logger;

pub use logger::cycle_id::CycleId;
pub use logger::init::init_logger;
