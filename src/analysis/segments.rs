/// Find alternating threshold crossings in a feature series.
///
/// Scanning left to right, index `i` is recorded when
/// `multiplier * series[i] >= multiplier * step`; the multiplier starts at
/// +1 and flips sign after every hit, so hits alternate between rising to
/// `step` and falling back to it.
pub fn find_segments(series: &[f64], step: f64) -> Vec<usize> {
    let mut boundaries = Vec::new();
    let mut multiplier = 1.0;
    for (i, &value) in series.iter().enumerate() {
        if multiplier * value >= multiplier * step {
            boundaries.push(i);
            multiplier = -multiplier;
        }
    }
    boundaries
}
