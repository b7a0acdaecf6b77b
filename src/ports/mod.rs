pub mod input;
pub mod output;
pub mod wait;

pub use input::{InPort, StreamSender};
pub use output::{OutPort, StreamMessage};
pub use wait::WaitMode;
