use crate::buffers::PooledBuffer;
use crate::error::{Error, Result};
use num_complex::Complex;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

/// Whether a stream carries real scalars or interleaved (re, im) pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SampleMode {
    #[default]
    Real = 0,
    Complex = 1,
}

/// Stream metadata record shared by every block of a stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamSri {
    /// Stable identifier for the stream's lifetime
    pub stream_id: String,

    /// Time of the first sample relative to the stream origin
    pub xstart: f64,

    /// Seconds between consecutive samples
    pub xdelta: f64,

    pub mode: SampleMode,

    /// Whether upstream should block when downstream queues are full
    pub blocking: bool,
}

impl StreamSri {
    /// Default descriptor: unit sample interval, real samples
    pub fn new(stream_id: impl Into<String>) -> Self {
        Self {
            stream_id: stream_id.into(),
            xstart: 0.0,
            xdelta: 1.0,
            mode: SampleMode::Real,
            blocking: false,
        }
    }

    pub fn with_xdelta(mut self, xdelta: f64) -> Self {
        self.xdelta = xdelta;
        self
    }

    pub fn with_mode(mut self, mode: SampleMode) -> Self {
        self.mode = mode;
        self
    }

    /// The declared sample interval, rejected unless positive and finite
    pub fn sample_interval(&self) -> Result<f64> {
        if self.xdelta.is_finite() && self.xdelta > 0.0 {
            Ok(self.xdelta)
        } else {
            Err(Error::InvalidSampleInterval {
                stream_id: self.stream_id.clone(),
                xdelta: self.xdelta,
            })
        }
    }
}

/// Absolute time of a block's first sample, split to keep sub-nanosecond precision
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Timestamp {
    pub whole_secs: f64,
    pub frac_secs: f64,
}

impl Timestamp {
    pub fn new(whole_secs: f64, frac_secs: f64) -> Self {
        Self { whole_secs, frac_secs }
    }

    pub fn now() -> Self {
        let elapsed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Self {
            whole_secs: elapsed.as_secs() as f64,
            frac_secs: elapsed.subsec_nanos() as f64 * 1e-9,
        }
    }

    pub fn as_secs_f64(&self) -> f64 {
        self.whole_secs + self.frac_secs
    }
}

/// Checked view of a block's samples according to its declared mode.
///
/// Real buffers are borrowed as-is; complex buffers are parsed from
/// interleaved (re, im) pairs.
#[derive(Debug, Clone, PartialEq)]
pub enum Samples<'a> {
    Real(&'a [f32]),
    Complex(Vec<Complex<f32>>),
}

impl<'a> Samples<'a> {
    pub fn from_interleaved(data: &'a [f32], mode: SampleMode, stream_id: &str) -> Result<Self> {
        match mode {
            SampleMode::Real => Ok(Samples::Real(data)),
            SampleMode::Complex => {
                if data.len() % 2 != 0 {
                    return Err(Error::MalformedBlock {
                        stream_id: stream_id.to_string(),
                        len: data.len(),
                    });
                }
                Ok(Samples::Complex(
                    data.chunks_exact(2)
                        .map(|pair| Complex::new(pair[0], pair[1]))
                        .collect(),
                ))
            }
        }
    }

    /// Number of samples (complex pairs count once)
    pub fn len(&self) -> usize {
        match self {
            Samples::Real(values) => values.len(),
            Samples::Complex(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Widen to complex without mixing (real samples get a zero imaginary part)
    pub fn to_complex(&self) -> Vec<Complex<f32>> {
        match self {
            Samples::Real(values) => values.iter().map(|&re| Complex::new(re, 0.0)).collect(),
            Samples::Complex(values) => values.clone(),
        }
    }
}

/// One acquired input block; its storage is released when the block is dropped
#[derive(Debug)]
pub struct DataBlock {
    /// Raw values, interleaved when `sri.mode` is complex
    pub data: PooledBuffer,
    pub sri: StreamSri,
    /// Descriptor differs from the one last delivered for this stream
    pub sri_changed: bool,
    pub timestamp: Timestamp,
    pub eos: bool,
    pub stream_id: String,
}

impl DataBlock {
    pub fn samples(&self) -> Result<Samples<'_>> {
        Samples::from_interleaved(self.data.as_slice(), self.sri.mode, &self.stream_id)
    }
}

/// One emitted output block
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexBlock {
    pub data: Vec<Complex<f32>>,
    pub timestamp: Timestamp,
    pub eos: bool,
    pub stream_id: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complex_mode_parses_pairs() {
        let data = [1.0, 2.0, 3.0, 4.0];
        let samples = Samples::from_interleaved(&data, SampleMode::Complex, "s").unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples.to_complex(), vec![Complex::new(1.0, 2.0), Complex::new(3.0, 4.0)]);
    }

    #[test]
    fn test_complex_mode_rejects_odd_length() {
        let data = [1.0, 2.0, 3.0];
        let err = Samples::from_interleaved(&data, SampleMode::Complex, "s").unwrap_err();
        assert_eq!(err, Error::MalformedBlock { stream_id: "s".to_string(), len: 3 });
    }

    #[test]
    fn test_real_mode_widens_with_zero_imag() {
        let data = [1.5, -2.0];
        let samples = Samples::from_interleaved(&data, SampleMode::Real, "s").unwrap();
        assert_eq!(samples.len(), 2);
        assert_eq!(samples.to_complex(), vec![Complex::new(1.5, 0.0), Complex::new(-2.0, 0.0)]);
    }

    #[test]
    fn test_sample_interval_validation() {
        assert_eq!(StreamSri::new("s").with_xdelta(0.25).sample_interval(), Ok(0.25));
        assert!(StreamSri::new("s").with_xdelta(0.0).sample_interval().is_err());
        assert!(StreamSri::new("s").with_xdelta(-1.0).sample_interval().is_err());
        assert!(StreamSri::new("s").with_xdelta(f64::NAN).sample_interval().is_err());
        assert!(StreamSri::new("s").with_xdelta(f64::INFINITY).sample_interval().is_err());
    }

    #[test]
    fn test_sample_mode_serializes_lowercase() {
        let json = serde_json::to_value(SampleMode::Complex).unwrap();
        assert_eq!(json, serde_json::json!("complex"));
    }
}
