//! Numeric helpers shared by the pipeline stages

/// Seeded Mersenne Twister random source
pub mod random;

/// Arithmetic mean, or 0 for an empty slice
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sorts `values` and returns the element at `len / 2`
///
/// For an even count this is the upper of the two middle elements, not their
/// average, so grid steps stay whole numbers.
pub fn upper_median(values: &mut [f64]) -> Option<f64> {
    values.sort_by(f64::total_cmp);
    values.get(values.len() / 2).copied()
}
