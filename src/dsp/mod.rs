pub mod exponential;
pub mod mixer;

pub use exponential::{generate, Exponential};
pub use mixer::mix;
