use rustfft::{num_complex::Complex, FftPlanner};
use serde::Serialize;

/// Forward DFT of a real sequence, one complex bin per input sample.
pub fn forward(samples: &[f64]) -> Vec<Complex<f64>> {
    let mut buffer: Vec<Complex<f64>> = samples.iter().map(|&s| Complex::new(s, 0.0)).collect();
    if buffer.is_empty() {
        return buffer;
    }
    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(buffer.len());
    fft.process(&mut buffer);
    buffer
}

/// Inverse DFT, scaled by `1 / N`, keeping the real part.
pub fn inverse(spectrum: &[Complex<f64>]) -> Vec<f64> {
    if spectrum.is_empty() {
        return Vec::new();
    }
    let n = spectrum.len();
    let mut buffer = spectrum.to_vec();
    let mut planner = FftPlanner::<f64>::new();
    let ifft = planner.plan_fft_inverse(n);
    ifft.process(&mut buffer);

    let scale = 1.0 / n as f64;
    buffer.iter().map(|c| c.re * scale).collect()
}

/// Signed frequency of bin `k` of an `n`-point DFT. Bins above `n / 2`
/// wrap around to negative frequencies.
pub fn bin_frequency(k: usize, n: usize, sample_rate: u32) -> f64 {
    let resolution = sample_rate as f64 / n as f64;
    if k > n / 2 {
        -((n - k) as f64) * resolution
    } else {
        k as f64 * resolution
    }
}

/// Single-sided magnitude spectrum for display.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct DisplaySpectrum {
    pub frequencies: Vec<f64>,
    pub magnitudes: Vec<f64>,
}

impl DisplaySpectrum {
    /// Fold the negative half of a full spectrum onto the positive one.
    ///
    /// Keeps `N/2 + 1` bins for even `N` and `(N + 1) / 2` for odd `N`, and
    /// doubles every kept bin except DC and (for even `N`) Nyquist.
    pub fn from_spectrum(spectrum: &[Complex<f64>], sample_rate: u32) -> Self {
        let n = spectrum.len();
        let kept = if n % 2 == 0 { n / 2 + 1 } else { n.div_ceil(2) };
        let nyquist = (n % 2 == 0).then_some(n / 2);

        let magnitudes = spectrum
            .iter()
            .take(kept)
            .enumerate()
            .map(|(k, c)| {
                let mag = c.norm();
                if k == 0 || Some(k) == nyquist {
                    mag
                } else {
                    2.0 * mag
                }
            })
            .collect();
        let frequencies = (0..kept.min(n))
            .map(|k| bin_frequency(k, n, sample_rate))
            .collect();

        Self {
            frequencies,
            magnitudes,
        }
    }

    /// `(frequency, magnitude)` of the strongest bin.
    pub fn peak(&self) -> Option<(f64, f64)> {
        self.frequencies
            .iter()
            .zip(&self.magnitudes)
            .map(|(&f, &m)| (f, m))
            .max_by(|a, b| a.1.total_cmp(&b.1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn cosine(n: usize, k: usize, amplitude: f64) -> Vec<f64> {
        (0..n)
            .map(|i| amplitude * (2.0 * PI * k as f64 * i as f64 / n as f64).cos())
            .collect()
    }

    #[test]
    fn forward_then_inverse_round_trips() {
        let samples: Vec<f64> = (0..97).map(|i| ((i * 37) % 101) as f64 - 50.0).collect();
        let back = inverse(&forward(&samples));
        assert_eq!(back.len(), samples.len());
        for (a, b) in back.iter().zip(&samples) {
            assert!((a - b).abs() < 1e-9, "{a} vs {b}");
        }
    }

    #[test]
    fn empty_input_is_passed_through() {
        assert!(forward(&[]).is_empty());
        assert!(inverse(&[]).is_empty());
    }

    #[test]
    fn bin_frequencies_wrap_negative() {
        assert_eq!(bin_frequency(0, 8, 800), 0.0);
        assert_eq!(bin_frequency(4, 8, 800), 400.0);
        assert_eq!(bin_frequency(5, 8, 800), -300.0);
        assert_eq!(bin_frequency(7, 8, 800), -100.0);
        assert_eq!(bin_frequency(4, 9, 900), 400.0);
        assert_eq!(bin_frequency(5, 9, 900), -400.0);
    }

    #[test]
    fn display_keeps_the_non_negative_half() {
        let even = DisplaySpectrum::from_spectrum(&forward(&[0.0; 8]), 8000);
        assert_eq!(even.magnitudes.len(), 5);
        assert_eq!(even.frequencies, vec![0.0, 1000.0, 2000.0, 3000.0, 4000.0]);

        let odd = DisplaySpectrum::from_spectrum(&forward(&[0.0; 7]), 7000);
        assert_eq!(odd.magnitudes.len(), 4);
        assert_eq!(odd.frequencies.last(), Some(&3000.0));
    }

    #[test]
    fn display_doubles_all_but_dc_and_nyquist() {
        let n = 16;
        let mut samples = cosine(n, 3, 1.0);
        for (s, dc) in samples.iter_mut().zip(cosine(n, 0, 0.5)) {
            *s += dc;
        }
        for (s, nyq) in samples.iter_mut().zip(cosine(n, 8, 0.25)) {
            *s += nyq;
        }
        let display = DisplaySpectrum::from_spectrum(&forward(&samples), 16);

        // a cosine of amplitude A puts A*N/2 in each of its two bins
        assert!((display.magnitudes[3] - 16.0).abs() < 1e-9);
        assert!((display.magnitudes[0] - 8.0).abs() < 1e-9);
        assert!((display.magnitudes[8] - 4.0).abs() < 1e-9);
        assert_eq!(display.peak().map(|p| p.0), Some(3.0));
    }
}
