//! Owned RGBA raster passed between pipeline stages

use crate::io::configuration::MAX_DIMENSION;
use crate::io::error::{Result, SnapError};
use image::RgbaImage;

/// Bytes per RGBA pixel
pub const CHANNELS: usize = 4;

/// Row-major RGBA8 pixel buffer with its dimensions
///
/// The buffer length always equals `width * height * 4`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Raster {
    /// Wrap an existing RGBA buffer
    ///
    /// Dimensions are not range-checked here so that callers can hand any
    /// decoded raster to the pipeline, which performs the check itself.
    ///
    /// # Errors
    ///
    /// Returns `MalformedRaster` if the buffer length does not match the dimensions
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = buffer_len(width, height).unwrap_or(usize::MAX);
        if data.len() != expected {
            return Err(SnapError::MalformedRaster {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Create a fully transparent black raster
    ///
    /// # Errors
    ///
    /// Returns `InvalidDimensions` if the buffer size overflows `usize`
    pub fn blank(width: u32, height: u32) -> Result<Self> {
        let len = buffer_len(width, height).ok_or(SnapError::InvalidDimensions { width, height })?;
        Ok(Self {
            width,
            height,
            data: vec![0; len],
        })
    }

    /// Raster width in pixels
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Raster height in pixels
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)` pair
    pub const fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels
    pub fn pixel_count(&self) -> usize {
        self.data.len() / CHANNELS
    }

    /// Borrow the raw RGBA samples
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Take ownership of the raw RGBA samples
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// RGBA value at `(x, y)`, or `None` outside the raster
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let base = (y as usize * self.width as usize + x as usize) * CHANNELS;
        self.data
            .get(base..base + CHANNELS)
            .and_then(|p| p.try_into().ok())
    }

    /// Iterate over pixels in row-major order
    pub fn pixels(&self) -> impl Iterator<Item = [u8; 4]> + '_ {
        self.data
            .chunks_exact(CHANNELS)
            .filter_map(|p| p.try_into().ok())
    }

    /// Mutable RGBA chunks in row-major order
    pub fn pixels_mut(&mut self) -> std::slice::ChunksExactMut<'_, u8> {
        self.data.chunks_exact_mut(CHANNELS)
    }

    /// Convert into an `image` buffer for encoding
    ///
    /// # Errors
    ///
    /// Returns `MalformedRaster` if the buffer no longer matches the dimensions
    pub fn into_image(self) -> Result<RgbaImage> {
        let expected = buffer_len(self.width, self.height).unwrap_or(usize::MAX);
        let actual = self.data.len();
        RgbaImage::from_raw(self.width, self.height, self.data)
            .ok_or(SnapError::MalformedRaster { expected, actual })
    }
}

impl From<RgbaImage> for Raster {
    fn from(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            data: img.into_raw(),
        }
    }
}

fn buffer_len(width: u32, height: u32) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(CHANNELS))
}

/// Reject rasters with an empty or oversized side
///
/// # Errors
///
/// Returns `InvalidDimensions` if either side is 0 or exceeds `MAX_DIMENSION`
pub fn validate_dimensions(width: u32, height: u32) -> Result<()> {
    if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(SnapError::InvalidDimensions { width, height });
    }
    Ok(())
}
