use crate::audio::signal::clamp_i16;
use crate::error::{DspError, DspResult};

/// A `[start, end)` slice of one channel, copied out of the source signal.
#[derive(Clone, Debug, PartialEq)]
pub struct SpectralInterval {
    pub samples: Vec<f64>,
    pub sample_rate: u32,
    /// Index of the first sample within the source channel
    pub offset: usize,
}

impl SpectralInterval {
    /// Copy the samples between `start` and `end` seconds out of `channel`.
    pub fn extract(channel: &[i32], sample_rate: u32, start: f64, end: f64) -> DspResult<Self> {
        let len = channel.len();
        if !(start.is_finite() && end.is_finite()) || start < 0.0 || start >= end {
            return Err(DspError::IntervalOutOfBounds {
                start: seconds_to_index(start.max(0.0), sample_rate),
                end: seconds_to_index(end.max(0.0), sample_rate),
                len,
            });
        }

        let start_idx = seconds_to_index(start, sample_rate);
        let end_idx = seconds_to_index(end, sample_rate);
        if end_idx > len || start_idx >= end_idx {
            return Err(DspError::IntervalOutOfBounds {
                start: start_idx,
                end: end_idx,
                len,
            });
        }

        log::debug!(
            "Extracted interval {:.3}s-{:.3}s ({} samples)",
            start,
            end,
            end_idx - start_idx
        );
        Ok(Self {
            samples: channel[start_idx..end_idx].iter().map(|&s| s as f64).collect(),
            sample_rate,
            offset: start_idx,
        })
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Samples rounded and clamped to the 16-bit range.
    pub fn to_pcm(&self) -> Vec<i32> {
        self.samples.iter().map(|&s| clamp_i16(s) as i32).collect()
    }

    /// A full-length copy of `channel` with this interval written over its range.
    pub fn splice_into(&self, channel: &[i32]) -> DspResult<Vec<i32>> {
        let end = self.offset + self.len();
        if end > channel.len() {
            return Err(DspError::IntervalOutOfBounds {
                start: self.offset,
                end,
                len: channel.len(),
            });
        }
        let mut out = channel.to_vec();
        out[self.offset..end].copy_from_slice(&self.to_pcm());
        Ok(out)
    }
}

/// Floor of `seconds * sample_rate`, snapping products within float error of
/// an integer so that `len / rate` seconds maps back to `len`.
fn seconds_to_index(seconds: f64, sample_rate: u32) -> usize {
    let exact = seconds * sample_rate as f64;
    let nearest = exact.round();
    if (exact - nearest).abs() < 1e-6 {
        nearest as usize
    } else {
        exact.floor() as usize
    }
}
