use thiserror::Error;

/// Errors raised by the signal-processing core.
///
/// Everything except [`DspError::InvalidUserInput`] aborts the current
/// operation; user input errors are recovered by prompting again.
#[derive(Debug, Error, PartialEq)]
pub enum DspError {
    #[error("frame size {frame_size} exceeds the {available} available samples")]
    InsufficientSamples { frame_size: usize, available: usize },

    #[error("frame length of {frame_ms} ms gives a frame of {frame_size} samples (need at least 2)")]
    InvalidFrameLength { frame_ms: u32, frame_size: usize },

    #[error("overlap fraction {0} must be in (0, 1] and yield a non-zero hop")]
    InvalidOverlap(f64),

    #[error("fade of {count} samples does not fit twice into a signal of {len} samples")]
    InvalidFadeLength { count: usize, len: usize },

    #[error("interval [{start}, {end}) is empty or outside a signal of {len} samples")]
    IntervalOutOfBounds { start: usize, end: usize, len: usize },

    #[error("cannot normalize a constant or empty sequence")]
    DegenerateRange,

    #[error("{0}")]
    InvalidUserInput(String),

    #[error("{0} is not implemented")]
    NotImplemented(&'static str),

    #[error("invalid signal: {0}")]
    InvalidSignal(String),
}

pub type DspResult<T> = std::result::Result<T, DspError>;
