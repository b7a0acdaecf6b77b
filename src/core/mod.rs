pub mod block;
pub mod node;
pub mod property;

pub use block::{ComplexBlock, DataBlock, SampleMode, Samples, StreamSri, Timestamp};
pub use node::{ProcessingNode, ServiceStatus};
pub use property::Property;
