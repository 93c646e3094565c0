//! Pipeline constants and the runtime configuration with its defaults

use crate::io::error::{Result, invalid_parameter};

// Safety limit to prevent excessive memory allocation
/// Maximum allowed raster side length
pub const MAX_DIMENSION: u32 = 10_000;

/// Smallest side length for which gradient profiles are defined
pub const MIN_PROFILE_DIMENSION: u32 = 3;

/// Largest palette the quantizer accepts
pub const MAX_K_COLORS: usize = 256;

// Lloyd refinement stops once no centroid moves further than this (squared)
/// Squared centroid displacement below which clustering has converged
pub const CONVERGENCE_THRESHOLD: f64 = 0.01;

// Default values for configurable parameters
/// Default palette size
pub const DEFAULT_K_COLORS: usize = 16;
/// Fixed seed for reproducible quantization
pub const DEFAULT_SEED: u32 = 42;
/// Default cap on Lloyd refinement rounds
pub const DEFAULT_MAX_KMEANS_ITERATIONS: usize = 15;
/// Fraction of the profile maximum a peak must exceed
pub const DEFAULT_PEAK_THRESHOLD_MULTIPLIER: f64 = 0.2;
/// Minimum spacing between kept peaks
pub const DEFAULT_PEAK_DISTANCE_FILTER: usize = 4;
/// Walker search window as a fraction of the step
pub const DEFAULT_WALKER_SEARCH_WINDOW_RATIO: f64 = 0.35;
/// Smallest walker search window in pixels
pub const DEFAULT_WALKER_MIN_SEARCH_WINDOW: f64 = 2.0;
/// Fraction of the profile mean an edge must exceed to attract a cut
pub const DEFAULT_WALKER_STRENGTH_THRESHOLD: f64 = 0.5;
/// Segments along the shorter side when no step can be estimated
pub const DEFAULT_FALLBACK_TARGET_SEGMENTS: usize = 64;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_snapped";
/// Extension of every written output
pub const OUTPUT_EXTENSION: &str = "png";
/// Input extensions picked up when scanning a directory
pub const INPUT_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "bmp", "gif", "webp"];

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

/// Tunable parameters of the snapping pipeline
///
/// Every field has a default; override a subset with struct update syntax:
///
/// ```
/// use pixelsnap::SnapConfig;
///
/// let config = SnapConfig {
///     k_colors: 8,
///     ..SnapConfig::default()
/// };
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SnapConfig {
    /// Maximum number of palette colors (1..=256)
    pub k_colors: usize,
    /// Seed for the k-means++ initialization
    pub k_seed: u32,
    /// Upper bound on Lloyd refinement rounds (>= 1)
    pub max_kmeans_iterations: usize,
    /// Peak threshold relative to the profile maximum (> 0)
    pub peak_threshold_multiplier: f64,
    /// Peaks closer than this to the previous kept peak are merged (>= 1)
    pub peak_distance_filter: usize,
    /// Search window relative to the step (> 0)
    pub walker_search_window_ratio: f64,
    /// Minimum search window in pixels (> 0)
    pub walker_min_search_window: f64,
    /// Edge strength relative to the profile mean (> 0)
    pub walker_strength_threshold: f64,
    /// Segments along the shorter side for the fallback step (> 0)
    pub fallback_target_segments: usize,
}

impl Default for SnapConfig {
    fn default() -> Self {
        Self {
            k_colors: DEFAULT_K_COLORS,
            k_seed: DEFAULT_SEED,
            max_kmeans_iterations: DEFAULT_MAX_KMEANS_ITERATIONS,
            peak_threshold_multiplier: DEFAULT_PEAK_THRESHOLD_MULTIPLIER,
            peak_distance_filter: DEFAULT_PEAK_DISTANCE_FILTER,
            walker_search_window_ratio: DEFAULT_WALKER_SEARCH_WINDOW_RATIO,
            walker_min_search_window: DEFAULT_WALKER_MIN_SEARCH_WINDOW,
            walker_strength_threshold: DEFAULT_WALKER_STRENGTH_THRESHOLD,
            fallback_target_segments: DEFAULT_FALLBACK_TARGET_SEGMENTS,
        }
    }
}

impl SnapConfig {
    /// Check every parameter against its allowed range
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` naming the first field outside its range
    pub fn validate(&self) -> Result<()> {
        if self.k_colors == 0 || self.k_colors > MAX_K_COLORS {
            return Err(invalid_parameter(
                "k_colors",
                &self.k_colors,
                &format!("must be between 1 and {MAX_K_COLORS}"),
            ));
        }
        if self.max_kmeans_iterations == 0 {
            return Err(invalid_parameter(
                "max_kmeans_iterations",
                &self.max_kmeans_iterations,
                &"must be at least 1",
            ));
        }
        if self.peak_distance_filter == 0 {
            return Err(invalid_parameter(
                "peak_distance_filter",
                &self.peak_distance_filter,
                &"must be at least 1",
            ));
        }
        if self.fallback_target_segments == 0 {
            return Err(invalid_parameter(
                "fallback_target_segments",
                &self.fallback_target_segments,
                &"must be greater than 0",
            ));
        }

        let ratios = [
            ("peak_threshold_multiplier", self.peak_threshold_multiplier),
            ("walker_search_window_ratio", self.walker_search_window_ratio),
            ("walker_min_search_window", self.walker_min_search_window),
            ("walker_strength_threshold", self.walker_strength_threshold),
        ];
        for (parameter, value) in ratios {
            if !value.is_finite() || value <= 0.0 {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &"must be a finite number greater than 0",
                ));
            }
        }

        Ok(())
    }
}
