//! Gradient-energy profiles along both image axes

use crate::io::configuration::MIN_PROFILE_DIMENSION;
use crate::io::error::{Result, SnapError};
use crate::spatial::raster::Raster;
use ndarray::{Array2, Axis, Zip};

const LUMA_RED: f64 = 0.299;
const LUMA_GREEN: f64 = 0.587;
const LUMA_BLUE: f64 = 0.114;

/// Column and row gradient profiles of one raster
///
/// Entries are summed in `f64` and stored at `f32` precision, so sums closer
/// than one `f32` step compare equal during peak detection.
#[derive(Debug, Clone, PartialEq)]
pub struct Profiles {
    /// One entry per column, length `width`
    pub columns: Vec<f64>,
    /// One entry per row, length `height`
    pub rows: Vec<f64>,
}

/// Luma of an RGBA pixel; fully transparent pixels count as black
#[allow(clippy::suboptimal_flops)]
pub fn luma(pixel: [u8; 4]) -> f32 {
    let [red, green, blue, alpha] = pixel;
    if alpha == 0 {
        return 0.0;
    }
    (LUMA_RED * f64::from(red) + LUMA_GREEN * f64::from(green) + LUMA_BLUE * f64::from(blue))
        as f32
}

/// Grayscale image indexed `[row, column]`
pub fn grayscale(raster: &Raster) -> Array2<f32> {
    let (width, height) = raster.dimensions();
    let values: Vec<f32> = raster.pixels().map(luma).collect();
    Array2::from_shape_vec((height as usize, width as usize), values)
        .unwrap_or_else(|_| Array2::zeros((height as usize, width as usize)))
}

/// Build the column and row profiles of a quantized raster
///
/// `columns[x]` sums `|gray(x + 1, y) - gray(x - 1, y)|` over all rows and
/// `rows[y]` is the transposed counterpart. The first and last entry of each
/// profile stay 0.
///
/// # Errors
///
/// Returns `ImageTooSmall` if either side is shorter than three pixels
pub fn compute_profiles(raster: &Raster) -> Result<Profiles> {
    let (width, height) = raster.dimensions();
    if width < MIN_PROFILE_DIMENSION || height < MIN_PROFILE_DIMENSION {
        return Err(SnapError::ImageTooSmall {
            width,
            height,
            minimum: MIN_PROFILE_DIMENSION,
        });
    }

    let gray = grayscale(raster);
    Ok(Profiles {
        columns: axis_profile(&gray, Axis(1)),
        rows: axis_profile(&gray, Axis(0)),
    })
}

// Central differences across `axis`, summed along the other axis
fn axis_profile(gray: &Array2<f32>, axis: Axis) -> Vec<f64> {
    let len = gray.len_of(axis);
    let mut profile = vec![0.0; len];
    for center in 1..len.saturating_sub(1) {
        let before = gray.index_axis(axis, center - 1);
        let after = gray.index_axis(axis, center + 1);
        if let Some(slot) = profile.get_mut(center) {
            let sum = Zip::from(&before)
                .and(&after)
                .fold(0.0, |acc, &a, &b| acc + (f64::from(b) - f64::from(a)).abs());
            *slot = f64::from(sum as f32);
        }
    }
    profile
}
