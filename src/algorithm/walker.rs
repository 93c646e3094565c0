//! Cut placement along one axis, snapped to nearby strong edges

use crate::io::configuration::SnapConfig;
use crate::io::error::{Result, invalid_cuts};
use crate::math::mean;

/// Walk an axis in `step` increments and place a cut at every grid line
///
/// Each cut lands on the strongest profile position within the search window
/// around the expected position, provided that position is stronger than
/// `mean * walker_strength_threshold`; otherwise the uniform estimate is used.
/// When the window is empty the walker advances without placing a cut, so
/// the resulting cell absorbs the next step.
///
/// The returned list starts at 0, ends at `limit` and is strictly increasing.
///
/// # Errors
///
/// Returns `InvalidCuts` if the profile is empty, `limit` is 0, or `step`
/// is not a finite number of at least one pixel
pub fn walk(profile: &[f64], step: f64, limit: usize, config: &SnapConfig) -> Result<Vec<usize>> {
    if profile.is_empty() || limit == 0 {
        return Err(invalid_cuts("axis", &"cannot walk an empty profile"));
    }
    if !step.is_finite() || step < 1.0 {
        return Err(invalid_cuts(
            "axis",
            &format!("step must be finite and at least 1, got {step}"),
        ));
    }

    let mean_strength = mean(profile);
    let strength_threshold = mean_strength * config.walker_strength_threshold;
    let window = (step * config.walker_search_window_ratio).max(config.walker_min_search_window);
    let end = limit as f64;

    let mut cuts = vec![0];
    let mut position = 0.0;

    while position < end {
        let target = position + step;
        if target >= end {
            cuts.push(limit);
            break;
        }

        let lo = floor_index(target - window).max(position.floor() as usize + 1);
        let hi = floor_index(target + window).min(limit);
        if hi <= lo {
            position = target;
            continue;
        }

        match strongest_in(profile, lo, hi) {
            Some((index, value)) if value > strength_threshold => {
                cuts.push(index);
                position = index as f64;
            }
            _ => {
                cuts.push(target.floor() as usize);
                position = target;
            }
        }
    }

    cuts.sort_unstable();
    cuts.dedup();
    Ok(cuts)
}

// Negative offsets clamp to 0; the lower bound is raised past `position` anyway
fn floor_index(value: f64) -> usize {
    value.floor().max(0.0) as usize
}

/// First position of the maximum profile value in `[lo, hi)`
fn strongest_in(profile: &[f64], lo: usize, hi: usize) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (index, &value) in profile.iter().enumerate().take(hi).skip(lo) {
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((index, value)),
        }
    }
    best
}
