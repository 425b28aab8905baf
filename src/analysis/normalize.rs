use crate::error::{DspError, DspResult};

/// Min-max normalize a sequence into `[0, 1]`.
///
/// Fails with [`DspError::DegenerateRange`] when the sequence is empty or
/// constant, instead of producing NaN.
pub fn normalize<T: Copy + Into<f64>>(data: &[T]) -> DspResult<Vec<f64>> {
    let (min, max) = data
        .iter()
        .map(|&x| Into::<f64>::into(x))
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| (lo.min(x), hi.max(x)));

    // f64::min/max skip NaN, so an all-NaN input leaves the fold at (inf, -inf)
    if max <= min {
        return Err(DspError::DegenerateRange);
    }

    let range = max - min;
    Ok(data
        .iter()
        .map(|&x| (Into::<f64>::into(x) - min) / range)
        .collect())
}
