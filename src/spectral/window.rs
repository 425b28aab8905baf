use serde::Deserialize;
use std::f64::consts::PI;

/// Smallest window gain divided out when removing a window. Samples under
/// a lower gain are scaled by `1 / UNWINDOW_FLOOR` instead of blowing up.
pub const UNWINDOW_FLOOR: f64 = 1e-2;

/// Window function types
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Window {
    /// Hann window (raised cosine, zero at both ends)
    #[default]
    Hann,
    /// Hamming window
    Hamming,
}

impl Window {
    /// Symmetric window coefficients of the given length.
    pub fn coefficients(&self, size: usize) -> Vec<f64> {
        match size {
            0 => return Vec::new(),
            1 => return vec![1.0],
            _ => {}
        }
        let denom = (size - 1) as f64;
        (0..size)
            .map(|i| {
                let c = (2.0 * PI * i as f64 / denom).cos();
                match self {
                    Window::Hann => 0.5 - 0.5 * c,
                    Window::Hamming => 0.54 - 0.46 * c,
                }
            })
            .collect()
    }

    /// Apply window to a buffer
    pub fn apply(&self, buffer: &mut [f64]) {
        let coeffs = self.coefficients(buffer.len());
        for (sample, w) in buffer.iter_mut().zip(coeffs) {
            *sample *= w;
        }
    }

    /// Undo [`Window::apply`] by multiplying with the reciprocal gain.
    ///
    /// Near the edges of a Hann window the gain approaches zero, so the
    /// divisor is clamped to [`UNWINDOW_FLOOR`] and those samples are only
    /// approximately restored.
    pub fn remove(&self, buffer: &mut [f64]) {
        let coeffs = self.coefficients(buffer.len());
        for (sample, w) in buffer.iter_mut().zip(coeffs) {
            *sample /= w.max(UNWINDOW_FLOOR);
        }
    }
}
