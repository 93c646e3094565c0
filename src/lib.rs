//! Grid snapping for noisy pixel art
//!
//! Takes a raster whose pixel grid is slightly off (typical of generated
//! "pixel art"), reduces it to a bounded palette with seeded k-means,
//! detects the grid from gradient profiles and resamples every grid cell to
//! its dominant color. The same input and configuration always produce the
//! same output.
//!
//! ```no_run
//! use pixelsnap::{SnapConfig, transform_encoded_bytes};
//!
//! let input = std::fs::read("sprite.png")?;
//! let config = SnapConfig {
//!     k_colors: 8,
//!     ..SnapConfig::default()
//! };
//! let png = transform_encoded_bytes(&input, &config)?;
//! std::fs::write("sprite_snapped.png", png)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![forbid(unsafe_code)]

/// Grid estimation, cut placement, resampling and the end-to-end pipeline
pub mod algorithm;
/// Color quantization and gradient profiles of the source raster
pub mod analysis;
/// Configuration, errors, codecs and the command-line front end
pub mod io;
/// Random source and numeric helpers
pub mod math;
/// Raster storage
pub mod spatial;

pub use algorithm::pipeline::{GridReport, transform, transform_encoded_bytes, transform_with_report};
pub use io::configuration::SnapConfig;
pub use io::error::{Result, SnapError};
pub use spatial::raster::Raster;
