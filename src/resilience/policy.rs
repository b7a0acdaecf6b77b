use serde::{Deserialize, Serialize};

/// What to do with a block whose sample interval cannot be used for mixing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultPolicy {
    /// Discard the block and report the fault
    #[default]
    Drop,

    /// Forward the samples unmixed (widened to complex) and report the fault
    PassThrough,
}
