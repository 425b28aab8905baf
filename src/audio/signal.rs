use crate::error::{DspError, DspResult};

/// Multi-channel integer PCM signal.
///
/// Channels are stored de-interleaved and always have equal length.
#[derive(Clone, Debug, PartialEq)]
pub struct Signal {
    channels: Vec<Vec<i32>>,
    sample_rate: u32,
    /// Bit depth of the source container, informational only
    pub bit_depth: u16,
}

impl Signal {
    pub fn new(channels: Vec<Vec<i32>>, sample_rate: u32) -> DspResult<Self> {
        if sample_rate == 0 {
            return Err(DspError::InvalidSignal("sample rate must be positive".into()));
        }
        let Some(first) = channels.first() else {
            return Err(DspError::InvalidSignal("at least one channel is required".into()));
        };
        let len = first.len();
        if let Some((idx, ch)) = channels.iter().enumerate().find(|(_, ch)| ch.len() != len) {
            return Err(DspError::InvalidSignal(format!(
                "channel {} has {} samples, expected {}",
                idx,
                ch.len(),
                len
            )));
        }
        Ok(Self {
            channels,
            sample_rate,
            bit_depth: 16,
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Samples per channel
    pub fn len(&self) -> usize {
        self.channels[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Duration in seconds.
    pub fn duration(&self) -> f64 {
        self.len() as f64 / self.sample_rate as f64
    }

    pub fn channels(&self) -> &[Vec<i32>] {
        &self.channels
    }

    /// Build a new signal with the same rate and bit depth but different data.
    pub fn with_channels(&self, channels: Vec<Vec<i32>>) -> DspResult<Self> {
        let mut out = Signal::new(channels, self.sample_rate)?;
        out.bit_depth = self.bit_depth;
        Ok(out)
    }

    /// Interleaved samples clamped to the 16-bit range, ready for writing.
    pub fn to_i16_interleaved(&self) -> Vec<i16> {
        let mut out = Vec::with_capacity(self.len() * self.channel_count());
        for i in 0..self.len() {
            for ch in &self.channels {
                out.push(clamp_i16(ch[i] as f64));
            }
        }
        out
    }
}

/// Round and clamp a sample to the 16-bit PCM range.
pub fn clamp_i16(sample: f64) -> i16 {
    if sample.is_nan() {
        return 0;
    }
    sample.round().clamp(i16::MIN as f64, i16::MAX as f64) as i16
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_ragged_channels() {
        let err = Signal::new(vec![vec![1, 2, 3], vec![1, 2]], 44100).unwrap_err();
        assert!(matches!(err, DspError::InvalidSignal(_)));
    }

    #[test]
    fn rejects_zero_rate_and_no_channels() {
        assert!(Signal::new(vec![vec![0; 4]], 0).is_err());
        assert!(Signal::new(vec![], 8000).is_err());
    }

    #[test]
    fn duration_from_rate() {
        let sig = Signal::new(vec![vec![0; 22050], vec![0; 22050]], 44100).unwrap();
        assert_eq!(sig.channel_count(), 2);
        assert!((sig.duration() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn interleaves_and_clamps() {
        let sig = Signal::new(vec![vec![1, 40000], vec![-2, -40000]], 8000).unwrap();
        assert_eq!(sig.to_i16_interleaved(), vec![1, -2, i16::MAX, i16::MIN]);
    }

    #[test]
    fn clamp_rounds_and_handles_nan() {
        assert_eq!(clamp_i16(12.6), 13);
        assert_eq!(clamp_i16(-12.6), -13);
        assert_eq!(clamp_i16(f64::NAN), 0);
    }
}
