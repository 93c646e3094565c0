//! Grid step estimation from profile peak spacing

use crate::io::configuration::SnapConfig;
use crate::math::upper_median;
use log::{debug, warn};

/// Local maxima strictly above both neighbors and above `threshold`
pub fn find_peaks(profile: &[f64], threshold: f64) -> Vec<usize> {
    profile
        .windows(3)
        .enumerate()
        .filter_map(|(i, w)| {
            let &[left, value, right] = w else {
                return None;
            };
            (value > threshold && value > left && value > right).then_some(i + 1)
        })
        .collect()
}

/// Drop peaks closer than `min_distance` to the previously kept peak
pub fn merge_close_peaks(peaks: &[usize], min_distance: usize) -> Vec<usize> {
    let mut kept: Vec<usize> = Vec::with_capacity(peaks.len());
    for &peak in peaks {
        match kept.last() {
            Some(&last) if peak - last < min_distance => {}
            _ => kept.push(peak),
        }
    }
    kept
}

/// Estimate the dominant grid spacing of a profile
///
/// Returns the upper median of the gaps between significant peaks, or `None`
/// when the profile is flat or has fewer than two peaks after merging.
pub fn estimate_step(profile: &[f64], config: &SnapConfig) -> Option<f64> {
    let max_value = profile.iter().copied().fold(0.0, f64::max);
    if max_value == 0.0 {
        return None;
    }

    let threshold = max_value * config.peak_threshold_multiplier;
    let peaks = find_peaks(profile, threshold);
    if peaks.len() < 2 {
        return None;
    }

    let kept = merge_close_peaks(&peaks, config.peak_distance_filter);
    if kept.len() < 2 {
        return None;
    }

    let mut gaps: Vec<f64> = kept
        .iter()
        .zip(kept.iter().skip(1))
        .map(|(previous, next)| (next - previous) as f64)
        .collect();
    upper_median(&mut gaps)
}

/// Pick the step both axes are walked with
///
/// One step is shared by the two axes: the column estimate when present,
/// otherwise the row estimate. When neither axis has one, both use
/// `max(min(width, height) / fallback_target_segments, 1)`.
pub fn resolve_steps(
    step_x: Option<f64>,
    step_y: Option<f64>,
    width: u32,
    height: u32,
    config: &SnapConfig,
) -> (f64, f64) {
    match (step_x, step_y) {
        (Some(step), _) | (None, Some(step)) => (step, step),
        (None, None) => {
            let step = fallback_step(width, height, config);
            warn!("No grid step detected on either axis, using uniform step {step:.2}");
            (step, step)
        }
    }
}

/// Uniform step that splits the shorter side into `fallback_target_segments`
pub fn fallback_step(width: u32, height: u32, config: &SnapConfig) -> f64 {
    let step = f64::from(width.min(height)) / config.fallback_target_segments as f64;
    let step = step.max(1.0);
    debug!("Fallback step for {width}x{height}: {step}");
    step
}
