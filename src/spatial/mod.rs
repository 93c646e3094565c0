//! Pixel storage shared by the pipeline stages

/// Owned RGBA raster and dimension checks
pub mod raster;

pub use raster::Raster;
