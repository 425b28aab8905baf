//! Windowed DFT analysis, frequency-domain editing and reconstruction of
//! a time interval of one channel.
//!
//! ```text
//! channel ─ extract ─ window ─ forward ─┬─ display (magnitudes, folded)
//!                                       └─ edit ─ inverse ─ unwindow ─ interval
//! ```
//!
//! Every stage works on its own copy; the source channel is never written.

pub mod edit;
pub mod interval;
pub mod transform;
pub mod window;

use rustfft::num_complex::Complex;

use crate::error::DspResult;
use edit::SpectralEdit;
use interval::SpectralInterval;
use transform::DisplaySpectrum;
use window::Window;

pub struct SpectralEngine {
    window: Window,
}

impl SpectralEngine {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    /// Extract, window and transform `[start, end)` seconds of `channel`.
    pub fn transform(
        &self,
        channel: &[i32],
        sample_rate: u32,
        start: f64,
        end: f64,
    ) -> DspResult<(SpectralInterval, Vec<Complex<f64>>)> {
        let mut interval = SpectralInterval::extract(channel, sample_rate, start, end)?;
        self.window.apply(&mut interval.samples);
        let spectrum = transform::forward(&interval.samples);
        Ok((interval, spectrum))
    }

    /// Magnitude spectrum of an interval, ready for plotting.
    pub fn analyze(
        &self,
        channel: &[i32],
        sample_rate: u32,
        start: f64,
        end: f64,
    ) -> DspResult<DisplaySpectrum> {
        let (interval, spectrum) = self.transform(channel, sample_rate, start, end)?;
        let display = DisplaySpectrum::from_spectrum(&spectrum, sample_rate);
        if let Some((freq, mag)) = display.peak() {
            log::debug!(
                "Spectrum of {} samples: peak {:.1} Hz (magnitude {:.1})",
                interval.len(),
                freq,
                mag
            );
        }
        Ok(display)
    }

    /// Run the full edit path and return the reconstructed interval.
    ///
    /// Sample count, sample rate and offset match the extracted interval.
    pub fn modify(
        &self,
        channel: &[i32],
        sample_rate: u32,
        start: f64,
        end: f64,
        edit: &SpectralEdit,
    ) -> DspResult<SpectralInterval> {
        let (mut interval, mut spectrum) = self.transform(channel, sample_rate, start, end)?;
        edit.apply(&mut spectrum, sample_rate)?;
        interval.samples = transform::inverse(&spectrum);
        self.window.remove(&mut interval.samples);
        Ok(interval)
    }
}
