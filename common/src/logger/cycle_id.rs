use std::fmt;

use uuid::Uuid;

/// Correlation ID stamped on every log line of one evaluation cycle.
///
/// A fresh ID is minted per cycle so the chain fetch, baseline build,
/// price refresh and broadcast of the same pass can be grepped together.
#[derive(Clone, Copy, Debug)]
pub struct CycleId(Uuid);

impl CycleId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CycleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CycleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.as_hyphenated().fmt(f)
    }
}
