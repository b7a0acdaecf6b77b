use crate::core::Samples;
use num_complex::Complex;

/// Multiply each input sample by the matching carrier sample.
///
/// Real inputs are treated as complex values with a zero imaginary part.
///
/// # Panics
///
/// Panics if `carrier` and `input` differ in length; callers size the carrier
/// from the input, so a mismatch is a bug rather than bad data.
pub fn mix(input: &Samples<'_>, carrier: &[Complex<f32>]) -> Vec<Complex<f32>> {
    assert_eq!(
        input.len(),
        carrier.len(),
        "mixer input and carrier lengths differ"
    );

    match input {
        Samples::Real(values) => values
            .iter()
            .zip(carrier)
            .map(|(&x, &c)| c * x)
            .collect(),
        Samples::Complex(values) => values
            .iter()
            .zip(carrier)
            .map(|(&x, &c)| x * c)
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dsp::exponential;

    #[test]
    fn test_real_block_quarter_turn() {
        let data = [1.0, 0.0, -1.0, 0.0];
        let carrier = exponential::generate(0.25, 1.0, 0.0, 4).samples;
        let out = mix(&Samples::Real(&data), &carrier);

        let expected = [(1.0, 0.0), (0.0, 0.0), (1.0, 0.0), (0.0, 0.0)];
        for (o, (re, im)) in out.iter().zip(expected) {
            assert!((o.re - re).abs() < 1e-6, "{:?}", out);
            assert!((o.im - im).abs() < 1e-6, "{:?}", out);
        }
    }

    #[test]
    fn test_complex_multiplication() {
        let input = Samples::Complex(vec![Complex::new(1.0, 1.0), Complex::new(0.0, 2.0)]);
        let carrier = [Complex::new(0.0, 1.0), Complex::new(-1.0, 0.0)];
        let out = mix(&input, &carrier);
        assert_eq!(out, vec![Complex::new(-1.0, 1.0), Complex::new(0.0, -2.0)]);
    }

    #[test]
    #[should_panic(expected = "lengths differ")]
    fn test_length_mismatch_panics() {
        let data = [1.0, 2.0, 3.0];
        let carrier = [Complex::new(1.0, 0.0); 2];
        mix(&Samples::Real(&data), &carrier);
    }
}
