//! Tests for block-mode resampling onto cut grids

#[cfg(test)]
mod tests {
    use pixelsnap::SnapError;
    use pixelsnap::algorithm::resample::{block_mode, resample};
    use pixelsnap::spatial::raster::Raster;

    const A: [u8; 4] = [10, 20, 30, 255];
    const B: [u8; 4] = [200, 100, 0, 255];
    const CLEAR: [u8; 4] = [0, 0, 0, 0];

    fn from_pixels(width: u32, height: u32, pixels: &[[u8; 4]]) -> Raster {
        Raster::new(width, height, pixels.concat()).unwrap()
    }

    // Tests ties go to the color that reached the top count first
    // Verified by switching the leader on equal counts
    #[test]
    fn test_block_mode_tie_break() {
        let raster = from_pixels(4, 1, &[A, B, B, A]);
        assert_eq!(block_mode(&raster, 0..4, 0..1), Some(B));

        let raster = from_pixels(4, 1, &[A, A, B, B]);
        assert_eq!(block_mode(&raster, 0..4, 0..1), Some(A));
    }

    // Tests counting follows row-major order across rows
    // Verified by scanning columns first
    #[test]
    fn test_block_mode_row_major() {
        // Row-major reaches A=3 first; column-major would reach B=3 first
        let raster = from_pixels(3, 2, &[A, B, B, A, A, B]);
        assert_eq!(block_mode(&raster, 0..3, 0..2), Some(A));
    }

    // Tests transparent pixels count toward the mode
    // Verified by skipping zero-alpha pixels
    #[test]
    fn test_block_mode_counts_transparent() {
        let raster = from_pixels(3, 1, &[CLEAR, A, CLEAR]);
        assert_eq!(block_mode(&raster, 0..3, 0..1), Some(CLEAR));
    }

    // Tests empty blocks have no mode
    // Verified by returning the first pixel for empty ranges
    #[test]
    fn test_block_mode_empty() {
        let raster = from_pixels(2, 1, &[A, B]);
        assert_eq!(block_mode(&raster, 1..1, 0..1), None);
    }

    // Tests output dimensions and per-cell colors
    // Verified by swapping cell coordinates
    #[test]
    fn test_resample_cells() {
        let mut pixels = Vec::new();
        for y in 0..4 {
            for x in 0..6 {
                pixels.push(if (x < 2) == (y < 3) { A } else { B });
            }
        }
        let raster = from_pixels(6, 4, &pixels);

        let output = resample(&raster, &[0, 2, 6], &[0, 3, 4]).unwrap();
        assert_eq!(output.dimensions(), (2, 2));
        assert_eq!(output.pixel(0, 0), Some(A));
        assert_eq!(output.pixel(1, 0), Some(B));
        assert_eq!(output.pixel(0, 1), Some(B));
        assert_eq!(output.pixel(1, 1), Some(A));
    }

    // Tests a single cell covering the whole raster
    // Verified by resampling only the first row
    #[test]
    fn test_resample_single_cell() {
        let raster = from_pixels(3, 3, &[A, B, B, A, B, A, A, A, B]);
        let output = resample(&raster, &[0, 3], &[0, 3]).unwrap();
        assert_eq!(output.dimensions(), (1, 1));
        assert_eq!(output.pixel(0, 0), Some(A));
    }

    // Tests degenerate cells stay transparent
    // Verified by reading the block at the repeated cut
    #[test]
    fn test_resample_degenerate_cell() {
        let raster = from_pixels(2, 1, &[A, A]);
        let output = resample(&raster, &[0, 0, 2], &[0, 1]).unwrap();
        assert_eq!(output.dimensions(), (2, 1));
        assert_eq!(output.pixel(0, 0), Some(CLEAR));
        assert_eq!(output.pixel(1, 0), Some(A));
    }

    // Tests malformed cut lists are rejected
    // Verified by removing the bounds check
    #[test]
    fn test_resample_invalid_cuts() {
        let raster = from_pixels(2, 2, &[A, A, A, A]);

        assert!(matches!(
            resample(&raster, &[0], &[0, 2]),
            Err(SnapError::InvalidCuts { axis: "column", .. })
        ));
        assert!(matches!(
            resample(&raster, &[0, 2], &[0, 3]),
            Err(SnapError::InvalidCuts { axis: "row", .. })
        ));
    }

    // Tests every source pixel lands in exactly one cell
    // Verified by using inclusive cell ranges
    #[test]
    fn test_resample_identity_grid() {
        let pixels: Vec<[u8; 4]> = (0..12u8).map(|i| [i, i, i, 255]).collect();
        let raster = from_pixels(4, 3, &pixels);

        let output = resample(&raster, &[0, 1, 2, 3, 4], &[0, 1, 2, 3]).unwrap();
        assert_eq!(output, raster);
    }
}
