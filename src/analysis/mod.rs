//! Source raster analysis ahead of grid detection

/// Seeded k-means palette reduction
pub mod palette;
/// Column and row gradient profiles
pub mod profile;
