use rustfft::num_complex::Complex;

use super::transform::bin_frequency;
use crate::error::{DspError, DspResult};

/// Frequency-domain modifications, applied to the full complex spectrum.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SpectralEdit {
    /// Zero every bin whose absolute frequency exceeds `cutoff_hz`.
    RemoveAbove { cutoff_hz: f64 },
    /// Add a cosine of `amplitude` (in sample units) at the bin nearest `frequency_hz`.
    AddTone { frequency_hz: f64, amplitude: f64 },
    /// Frequency shifting. Not supported.
    Move,
}

impl SpectralEdit {
    pub fn apply(&self, spectrum: &mut [Complex<f64>], sample_rate: u32) -> DspResult<()> {
        match *self {
            SpectralEdit::RemoveAbove { cutoff_hz } => {
                remove_above(spectrum, sample_rate, cutoff_hz);
                Ok(())
            }
            SpectralEdit::AddTone {
                frequency_hz,
                amplitude,
            } => {
                add_tone(spectrum, sample_rate, frequency_hz, amplitude);
                Ok(())
            }
            SpectralEdit::Move => Err(DspError::NotImplemented("move-frequencies")),
        }
    }
}

fn remove_above(spectrum: &mut [Complex<f64>], sample_rate: u32, cutoff_hz: f64) {
    let n = spectrum.len();
    let mut removed = 0;
    for (k, bin) in spectrum.iter_mut().enumerate() {
        if bin_frequency(k, n, sample_rate).abs() > cutoff_hz {
            *bin = Complex::new(0.0, 0.0);
            removed += 1;
        }
    }
    log::debug!("Zeroed {} of {} bins above {} Hz", removed, n, cutoff_hz);
}

fn add_tone(spectrum: &mut [Complex<f64>], sample_rate: u32, frequency_hz: f64, amplitude: f64) {
    let n = spectrum.len();
    if n == 0 {
        return;
    }
    let k = ((frequency_hz.abs() * n as f64 / sample_rate as f64).round() as usize).min(n / 2);

    // The mirrored bin keeps the reconstructed signal real.
    if k == 0 || (n % 2 == 0 && k == n / 2) {
        spectrum[k] += Complex::new(amplitude * n as f64, 0.0);
    } else {
        let half = Complex::new(amplitude * n as f64 / 2.0, 0.0);
        spectrum[k] += half;
        spectrum[n - k] += half;
    }
    log::debug!(
        "Added tone at bin {} ({:.1} Hz)",
        k,
        bin_frequency(k, n, sample_rate)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spectral::transform::{forward, inverse};
    use std::f64::consts::PI;

    #[test]
    fn remove_above_acts_as_low_pass() {
        let sample_rate = 8000;
        let n = 800;
        let samples: Vec<f64> = (0..n)
            .map(|i| {
                let t = i as f64 / sample_rate as f64;
                (2.0 * PI * 500.0 * t).sin() + (2.0 * PI * 3000.0 * t).sin()
            })
            .collect();

        let mut spectrum = forward(&samples);
        SpectralEdit::RemoveAbove { cutoff_hz: 2000.0 }
            .apply(&mut spectrum, sample_rate)
            .unwrap();
        let filtered = inverse(&spectrum);

        let check = forward(&filtered);
        let high_energy: f64 = check
            .iter()
            .enumerate()
            .filter(|(k, _)| bin_frequency(*k, n, sample_rate).abs() > 2000.0)
            .map(|(_, c)| c.norm_sqr())
            .sum();
        assert!(high_energy < 1e-12, "residual {high_energy}");

        for (i, y) in filtered.iter().enumerate() {
            let t = i as f64 / sample_rate as f64;
            assert!((y - (2.0 * PI * 500.0 * t).sin()).abs() < 1e-9);
        }
    }

    #[test]
    fn add_tone_injects_a_real_cosine() {
        let n = 100;
        let mut spectrum = vec![Complex::new(0.0, 0.0); n];
        SpectralEdit::AddTone {
            frequency_hz: 100.0,
            amplitude: 10.0,
        }
        .apply(&mut spectrum, 1000)
        .unwrap();

        let out = inverse(&spectrum);
        for (i, y) in out.iter().enumerate() {
            let expected = 10.0 * (2.0 * PI * 100.0 * i as f64 / 1000.0).cos();
            assert!((y - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn add_tone_above_nyquist_lands_on_nyquist() {
        let n = 8;
        let mut spectrum = vec![Complex::new(0.0, 0.0); n];
        SpectralEdit::AddTone {
            frequency_hz: 10_000.0,
            amplitude: 1.0,
        }
        .apply(&mut spectrum, 8)
        .unwrap();
        assert_eq!(spectrum[4], Complex::new(8.0, 0.0));
        let out = inverse(&spectrum);
        assert!((out[1] + 1.0).abs() < 1e-12);
    }

    #[test]
    fn move_is_not_implemented() {
        let mut spectrum = vec![Complex::new(1.0, 0.0); 4];
        assert_eq!(
            SpectralEdit::Move.apply(&mut spectrum, 8000),
            Err(DspError::NotImplemented("move-frequencies"))
        );
        assert!(spectrum.iter().all(|c| *c == Complex::new(1.0, 0.0)));
    }
}
