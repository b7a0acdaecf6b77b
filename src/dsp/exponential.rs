//! Complex exponential generator for quadrature mixing.
//!
//! Produces `exp(j * (phase + 2*pi*f*k*dt))` for `k = 0..n` and the phase at
//! which the next block should continue. Angles are evaluated in f64 directly
//! from the sample index rather than by repeated rotation, so there is no
//! magnitude drift within a block.

use num_complex::Complex;
use std::f64::consts::TAU;

/// One block's worth of carrier samples
#[derive(Debug, Clone, PartialEq)]
pub struct Exponential {
    pub samples: Vec<Complex<f32>>,
    /// Phase of sample `n`, reduced to `[0, 2*pi)`
    pub next_phase: f64,
}

/// Generate `n` samples of a complex exponential at `frequency` Hz.
///
/// `dt` is the sample interval in seconds and `phase` the starting angle in
/// radians. A zero frequency yields `n` copies of `exp(j*phase)`.
pub fn generate(dt: f64, frequency: f64, phase: f64, n: usize) -> Exponential {
    let step = TAU * frequency * dt;

    let samples = (0..n)
        .map(|k| {
            let theta = phase + step * k as f64;
            Complex::new(theta.cos() as f32, theta.sin() as f32)
        })
        .collect();

    Exponential {
        samples,
        next_phase: (phase + step * n as f64).rem_euclid(TAU),
    }
}
