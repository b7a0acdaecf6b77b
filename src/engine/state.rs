use serde::{Deserialize, Serialize};

/// Lifecycle of a single stream identifier as seen by the tracker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StreamLifecycle {
    /// Never observed, or state no longer held
    #[default]
    Unseen,
    /// Phase tracked and metadata announced
    Active,
    /// Most recent stream to reach end-of-stream; state discarded
    Closed,
}

impl StreamLifecycle {
    /// Check if transition from current state to target state is valid
    pub fn can_transition_to(&self, target: &StreamLifecycle) -> bool {
        use StreamLifecycle::*;

        matches!(
            (self, target),
            // First valid block
            (Unseen, Active) |

            // Subsequent blocks, or end-of-stream
            (Active, Active) |
            (Active, Closed) |

            // Reused identifier starts clean
            (Closed, Active)
        )
    }

    /// Get human-readable state name
    pub fn name(&self) -> &str {
        match self {
            Self::Unseen => "Unseen",
            Self::Active => "Active",
            Self::Closed => "Closed",
        }
    }
}
