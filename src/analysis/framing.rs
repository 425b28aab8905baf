use crate::error::{DspError, DspResult};

pub const DEFAULT_OVERLAP: f64 = 0.5;

/// Splits a sample sequence into overlapping fixed-size analysis frames.
///
/// Frames start every `hop` samples. One extra frame holding the last
/// `frame_size` samples is always appended so the tail is never dropped,
/// even when it overlaps its predecessor by more than the nominal amount.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Framer {
    frame_size: usize,
    hop: usize,
}

impl Framer {
    /// Frame size is `floor(sample_rate / 1000 * frame_ms)`, hop is
    /// `floor(frame_size * overlap)`.
    pub fn from_ms(sample_rate: u32, frame_ms: u32, overlap: f64) -> DspResult<Self> {
        let frame_size = (sample_rate as f64 / 1000.0 * frame_ms as f64) as usize;
        if frame_ms == 0 || frame_size < 2 {
            return Err(DspError::InvalidFrameLength { frame_ms, frame_size });
        }
        Self::new(frame_size, overlap)
    }

    pub fn new(frame_size: usize, overlap: f64) -> DspResult<Self> {
        if frame_size < 2 {
            return Err(DspError::InvalidFrameLength { frame_ms: 0, frame_size });
        }
        if !(overlap > 0.0 && overlap <= 1.0) {
            return Err(DspError::InvalidOverlap(overlap));
        }
        let hop = (frame_size as f64 * overlap) as usize;
        if hop == 0 {
            return Err(DspError::InvalidOverlap(overlap));
        }
        Ok(Self { frame_size, hop })
    }

    pub fn frame_size(&self) -> usize {
        self.frame_size
    }

    pub fn hop(&self) -> usize {
        self.hop
    }

    /// Borrow `data` as a list of frames.
    pub fn frames<'a, T>(&self, data: &'a [T]) -> DspResult<Vec<&'a [T]>> {
        let n = data.len();
        if n < self.frame_size {
            return Err(DspError::InsufficientSamples {
                frame_size: self.frame_size,
                available: n,
            });
        }

        let regular = (n / self.hop).saturating_sub(1);
        let mut frames = Vec::with_capacity(regular + 1);
        let tail = &data[n - self.frame_size..];
        for start in (0..regular).map(|k| k * self.hop) {
            // an overrunning frame is replaced by the tail so the count holds
            if start + self.frame_size > n {
                frames.push(tail);
            } else {
                frames.push(&data[start..start + self.frame_size]);
            }
        }
        frames.push(tail);

        log::debug!(
            "Framed {} samples into {} frames (size={}, hop={})",
            n,
            frames.len(),
            self.frame_size,
            self.hop
        );
        Ok(frames)
    }
}
