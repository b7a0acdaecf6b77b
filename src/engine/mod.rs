pub mod process_thread;
pub mod state;
pub mod tracker;

pub use process_thread::ProcessThread;
pub use state::StreamLifecycle;
pub use tracker::{BlockPlan, StreamTracker};
