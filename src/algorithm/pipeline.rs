//! End-to-end snapping: quantize, profile, estimate, walk, resample

use crate::algorithm::resample::resample;
use crate::algorithm::step::{estimate_step, resolve_steps};
use crate::algorithm::walker::walk;
use crate::analysis::palette::quantize;
use crate::analysis::profile::compute_profiles;
use crate::io::configuration::SnapConfig;
use crate::io::error::Result;
use crate::io::image::{decode_bytes, encode_png};
use crate::spatial::raster::{Raster, validate_dimensions};
use log::debug;

/// Grid detected while snapping one raster
#[derive(Debug, Clone, PartialEq)]
pub struct GridReport {
    /// Step estimated from the column profile
    pub estimated_step_x: Option<f64>,
    /// Step estimated from the row profile
    pub estimated_step_y: Option<f64>,
    /// Step the column walker used
    pub step_x: f64,
    /// Step the row walker used
    pub step_y: f64,
    /// Column cut list, from 0 to the input width
    pub col_cuts: Vec<usize>,
    /// Row cut list, from 0 to the input height
    pub row_cuts: Vec<usize>,
}

impl GridReport {
    /// True when neither axis produced a step estimate
    pub const fn used_fallback(&self) -> bool {
        self.estimated_step_x.is_none() && self.estimated_step_y.is_none()
    }

    /// Output `(width, height)` implied by the cut lists
    pub fn output_dimensions(&self) -> (usize, usize) {
        (
            self.col_cuts.len().saturating_sub(1),
            self.row_cuts.len().saturating_sub(1),
        )
    }
}

/// Snap a raster onto its detected pixel grid
///
/// Identical input and configuration always give an identical output.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the raster has an empty
/// or oversized side, or it is smaller than 3x3
pub fn transform(raster: &Raster, config: &SnapConfig) -> Result<Raster> {
    transform_with_report(raster, config).map(|(output, _)| output)
}

/// Snap a raster and also return the grid that was used
///
/// # Errors
///
/// Same conditions as [`transform`]
pub fn transform_with_report(raster: &Raster, config: &SnapConfig) -> Result<(Raster, GridReport)> {
    config.validate()?;
    let (width, height) = raster.dimensions();
    validate_dimensions(width, height)?;

    let quantized = quantize(raster, config)?;
    let profiles = compute_profiles(&quantized)?;

    let estimated_step_x = estimate_step(&profiles.columns, config);
    let estimated_step_y = estimate_step(&profiles.rows, config);
    debug!("Estimated steps: x={estimated_step_x:?} y={estimated_step_y:?}");

    let (step_x, step_y) = resolve_steps(estimated_step_x, estimated_step_y, width, height, config);

    let col_cuts = walk(&profiles.columns, step_x, width as usize, config)?;
    let row_cuts = walk(&profiles.rows, step_y, height as usize, config)?;

    let output = resample(&quantized, &col_cuts, &row_cuts)?;
    debug!(
        "Snapped {width}x{height} to {}x{}",
        output.width(),
        output.height()
    );

    let report = GridReport {
        estimated_step_x,
        estimated_step_y,
        step_x,
        step_y,
        col_cuts,
        row_cuts,
    };
    Ok((output, report))
}

/// Decode image bytes, snap them, and encode the result as PNG
///
/// # Errors
///
/// Propagates decode and encode failures unchanged, plus every
/// [`transform`] error
pub fn transform_encoded_bytes(bytes: &[u8], config: &SnapConfig) -> Result<Vec<u8>> {
    let raster = decode_bytes(bytes)?;
    let output = transform(&raster, config)?;
    encode_png(output)
}
