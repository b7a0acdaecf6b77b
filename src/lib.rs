pub mod buffers;
pub mod config;
pub mod core;
pub mod dsp;
pub mod engine;
pub mod error;
pub mod nodes;
pub mod observability;
pub mod ports;
pub mod resilience;

pub use config::ComponentConfig;
pub use error::Error;
