pub mod freq_shift;

pub use freq_shift::FreqShift;
