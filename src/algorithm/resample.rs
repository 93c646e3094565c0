//! Block-mode resampling of a raster onto a cut grid

use crate::io::error::{Result, invalid_cuts};
use crate::spatial::raster::{CHANNELS, Raster};
use std::collections::HashMap;
use std::ops::Range;

/// Most frequent exact RGBA value in a rectangular block
///
/// Counting runs in row-major order and the leader only changes when a color
/// becomes strictly more frequent, so ties go to the color that reached the
/// winning count first. Returns `None` for an empty block.
pub fn block_mode(raster: &Raster, xs: Range<usize>, ys: Range<usize>) -> Option<[u8; 4]> {
    let width = raster.width() as usize;
    let samples = raster.as_raw();
    let mut counts: HashMap<[u8; 4], u32> = HashMap::with_capacity(16);
    let mut best: Option<([u8; 4], u32)> = None;

    for y in ys {
        let row_start = (y * width + xs.start) * CHANNELS;
        let row_end = (y * width + xs.end) * CHANNELS;
        let Some(row) = samples.get(row_start..row_end) else {
            continue;
        };
        for p in row.chunks_exact(CHANNELS) {
            let Ok(key) = <[u8; 4]>::try_from(p) else {
                continue;
            };
            let count = counts.entry(key).or_insert(0);
            *count += 1;
            if best.is_none_or(|(_, best_count)| *count > best_count) {
                best = Some((key, *count));
            }
        }
    }

    best.map(|(color, _)| color)
}

/// Reduce every grid cell to its dominant color
///
/// The output is `(cols.len() - 1) x (rows.len() - 1)` pixels. Cells whose
/// span is empty keep the transparent black default.
///
/// # Errors
///
/// Returns `InvalidCuts` if an axis has fewer than two cuts or a cut lies
/// beyond the raster
pub fn resample(raster: &Raster, cols: &[usize], rows: &[usize]) -> Result<Raster> {
    check_cuts("column", cols, raster.width() as usize)?;
    check_cuts("row", rows, raster.height() as usize)?;

    let out_width = cols.len() - 1;
    let out_height = rows.len() - 1;
    let mut output = Raster::blank(out_width as u32, out_height as u32)?;

    let cells = spans(rows).flat_map(|ys| spans(cols).map(move |xs| (xs, ys.clone())));

    for (pixel, (xs, ys)) in output.pixels_mut().zip(cells) {
        if xs.is_empty() || ys.is_empty() {
            continue;
        }
        if let Some(color) = block_mode(raster, xs, ys) {
            pixel.copy_from_slice(&color);
        }
    }

    Ok(output)
}

// Half-open spans between consecutive cuts
fn spans(cuts: &[usize]) -> impl Iterator<Item = Range<usize>> + '_ {
    cuts.iter().zip(cuts.iter().skip(1)).map(|(&start, &end)| start..end)
}

fn check_cuts(axis: &'static str, cuts: &[usize], limit: usize) -> Result<()> {
    if cuts.len() < 2 {
        return Err(invalid_cuts(
            axis,
            &format!("need at least 2 cuts, got {}", cuts.len()),
        ));
    }
    if let Some(&cut) = cuts.iter().find(|&&cut| cut > limit) {
        return Err(invalid_cuts(
            axis,
            &format!("cut {cut} lies beyond the axis length {limit}"),
        ));
    }
    Ok(())
}
