use serde::Deserialize;

use crate::audio::signal::Signal;
use crate::error::{DspError, DspResult};

/// Amplitude ramp shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum FadeShape {
    Linear,
    #[serde(alias = "logarithmic")]
    #[value(alias = "logarithmic")]
    Log,
}

impl FadeShape {
    /// Gain for the `i`-th sample (0-based) of a fade-in of `count` samples.
    fn fade_in_gain(self, i: usize, count: usize) -> f64 {
        let pos = (i + 1) as f64;
        let count = count as f64;
        match self {
            FadeShape::Linear => pos / count,
            FadeShape::Log => 1.0 - (-log_rate(count) * pos).exp(),
        }
    }

    /// Gain for the `i`-th sample of the fade-out region, counted from its start.
    fn fade_out_gain(self, i: usize, count: usize) -> f64 {
        let pos = (i + 1) as f64;
        let count = count as f64;
        match self {
            FadeShape::Linear => 1.0 - pos / count,
            FadeShape::Log => 1.0 - (-log_rate(count) * (count - pos)).exp(),
        }
    }
}

fn log_rate(count: f64) -> f64 {
    std::f64::consts::E.powi(2) / count
}

/// Faded head and tail of a channel; the caller splices them around the
/// untouched middle.
#[derive(Clone, Debug, PartialEq)]
pub struct FadeSegments {
    pub fade_in: Vec<i32>,
    pub fade_out: Vec<i32>,
}

/// Number of samples covered by a fade of `duration_ms`.
pub fn fade_sample_count(sample_rate: u32, duration_ms: u32) -> usize {
    (sample_rate as f64 * duration_ms as f64 / 1000.0).round_ties_even() as usize
}

/// Ramp the first `count` samples up from silence.
pub fn fade_in(samples: &[i32], count: usize, shape: FadeShape) -> DspResult<Vec<i32>> {
    check_ramp(samples.len(), count)?;
    Ok(samples[..count]
        .iter()
        .enumerate()
        .map(|(i, &s)| scale(s, shape.fade_in_gain(i, count)))
        .collect())
}

/// Ramp the last `count` samples down to silence.
pub fn fade_out(samples: &[i32], count: usize, shape: FadeShape) -> DspResult<Vec<i32>> {
    check_ramp(samples.len(), count)?;
    Ok(samples[samples.len() - count..]
        .iter()
        .enumerate()
        .map(|(i, &s)| scale(s, shape.fade_out_gain(i, count)))
        .collect())
}

/// Compute both ramps of a channel. The two regions may not overlap.
pub fn fade(samples: &[i32], count: usize, shape: FadeShape) -> DspResult<FadeSegments> {
    if count == 0 || count > samples.len() / 2 {
        return Err(DspError::InvalidFadeLength { count, len: samples.len() });
    }
    Ok(FadeSegments {
        fade_in: fade_in(samples, count, shape)?,
        fade_out: fade_out(samples, count, shape)?,
    })
}

/// Fade every channel of `signal` in and out, returning a new signal.
pub fn apply_fade(signal: &Signal, count: usize, shape: FadeShape) -> DspResult<Signal> {
    let channels = signal
        .channels()
        .iter()
        .map(|ch| {
            let FadeSegments { fade_in, fade_out } = fade(ch, count, shape)?;
            let mut out = Vec::with_capacity(ch.len());
            out.extend(fade_in);
            out.extend_from_slice(&ch[count..ch.len() - count]);
            out.extend(fade_out);
            Ok(out)
        })
        .collect::<DspResult<Vec<_>>>()?;

    log::info!(
        "Applied {:?} fade of {} samples to {} channel(s)",
        shape,
        count,
        channels.len()
    );
    signal.with_channels(channels)
}

fn check_ramp(len: usize, count: usize) -> DspResult<()> {
    if count == 0 || count > len {
        return Err(DspError::InvalidFadeLength { count, len });
    }
    Ok(())
}

fn scale(sample: i32, gain: f64) -> i32 {
    (sample as f64 * gain).round_ties_even() as i32
}
