//! Per-frame scalar features and the per-channel series built from them.

use super::framing::Framer;
use super::normalize::normalize;
use crate::error::DspResult;

/// Sum of squared samples. Not normalized.
pub fn energy<T: Copy + Into<f64>>(frame: &[T]) -> f64 {
    frame
        .iter()
        .map(|&x| {
            let x: f64 = x.into();
            x * x
        })
        .sum()
}

/// Zero-crossing rate of one frame.
///
/// Formula: ZCR = (1 / (2N)) × Σ|sign(x[n]) - sign(x[n-1])|, with
/// `sign(0) = 1`. A frame of constant sign gives 0; a frame alternating sign
/// on every sample gives (N - 1) / N.
pub fn zero_crossing_rate<T: Copy + Into<f64>>(frame: &[T]) -> f64 {
    if frame.is_empty() {
        return 0.0;
    }

    let sign = |x: T| -> f64 { if Into::<f64>::into(x) >= 0.0 { 1.0 } else { -1.0 } };
    let total: f64 = frame
        .windows(2)
        .map(|pair| (sign(pair[1]) - sign(pair[0])).abs())
        .sum();

    total / (2 * frame.len()) as f64
}

/// Normalized energy series of one channel.
///
/// The raw samples are normalized before framing, and the resulting energy
/// series is normalized again.
pub fn energy_series(channel: &[i32], framer: &Framer) -> DspResult<Vec<f64>> {
    let normalized = normalize(channel)?;
    let frames = framer.frames(&normalized)?;
    let raw: Vec<f64> = frames.iter().map(|&frame| energy(frame)).collect();
    normalize(&raw)
}

/// Normalized zero-crossing rate series of one channel, framed from raw samples.
pub fn zcr_series(channel: &[i32], framer: &Framer) -> DspResult<Vec<f64>> {
    let frames = framer.frames(channel)?;
    let raw: Vec<f64> = frames.iter().map(|&frame| zero_crossing_rate(frame)).collect();
    normalize(&raw)
}

/// Evenly spaced time stamps from 0 to `duration` inclusive, one per frame.
pub fn frame_times(duration: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![0.0],
        _ => {
            let step = duration / (count - 1) as f64;
            (0..count).map(|i| i as f64 * step).collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DspError;

    #[test]
    fn energy_is_sum_of_squares() {
        assert_eq!(energy(&[1i32, -2, 3]), 14.0);
        assert_eq!(energy::<f64>(&[]), 0.0);
    }

    #[test]
    fn zcr_of_constant_sign_is_zero() {
        assert_eq!(zero_crossing_rate(&[1i32, 5, 0, 7, 2]), 0.0);
        assert_eq!(zero_crossing_rate(&[-1i32, -5, -3]), 0.0);
    }

    #[test]
    fn zcr_of_alternating_frame_is_maximal() {
        let short = [1i32, -1, 1, -1];
        assert!((zero_crossing_rate(&short) - 0.75).abs() < 1e-12);

        let long: Vec<i32> = (0..1000).map(|i| if i % 2 == 0 { 3 } else { -3 }).collect();
        let zcr = zero_crossing_rate(&long);
        assert!((zcr - 0.999).abs() < 1e-12);
        assert!(zcr < 1.0);
    }

    #[test]
    fn zcr_of_float_frame() {
        assert!((zero_crossing_rate(&[0.5f64, -0.5, 0.25, 0.1]) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn zcr_counts_single_crossing() {
        // one crossing contributes |1 - (-1)| = 2, over 2 * 4
        assert!((zero_crossing_rate(&[2i32, 1, -1, -2]) - 0.25).abs() < 1e-12);
    }

    #[test]
    fn energy_series_is_normalized() {
        let mut channel = vec![0i32; 40];
        for (i, s) in channel.iter_mut().enumerate().skip(20) {
            *s = if i % 2 == 0 { 1000 } else { -1000 };
        }
        let framer = Framer::new(8, 0.5).unwrap();
        let series = energy_series(&channel, &framer).unwrap();

        assert_eq!(series.len(), 40 / 4);
        let max = series.iter().copied().fold(f64::MIN, f64::max);
        let min = series.iter().copied().fold(f64::MAX, f64::min);
        assert_eq!(max, 1.0);
        assert_eq!(min, 0.0);
    }

    #[test]
    fn zcr_series_rises_with_noise() {
        let mut channel = vec![100i32; 32];
        for (i, s) in channel.iter_mut().enumerate().skip(16) {
            *s = if i % 2 == 0 { 100 } else { -100 };
        }
        let framer = Framer::new(8, 0.5).unwrap();
        let series = zcr_series(&channel, &framer).unwrap();
        assert_eq!(series[0], 0.0);
        assert_eq!(*series.last().unwrap(), 1.0);
    }

    #[test]
    fn silent_channel_is_degenerate() {
        let framer = Framer::new(4, 0.5).unwrap();
        assert_eq!(energy_series(&[0; 16], &framer), Err(DspError::DegenerateRange));
    }

    #[test]
    fn frame_times_span_duration() {
        assert_eq!(frame_times(2.0, 5), vec![0.0, 0.5, 1.0, 1.5, 2.0]);
        assert_eq!(frame_times(2.0, 1), vec![0.0]);
        assert!(frame_times(2.0, 0).is_empty());
    }
}
