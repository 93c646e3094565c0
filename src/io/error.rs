//! Error types for the snapping pipeline and its file-level wrappers

use std::fmt;
use std::path::PathBuf;

/// Main error type for all pipeline operations
#[derive(Debug)]
pub enum SnapError {
    /// Raster width or height is zero or exceeds the supported maximum
    InvalidDimensions {
        /// Raster width in pixels
        width: u32,
        /// Raster height in pixels
        height: u32,
    },

    /// Raster is too small to build gradient profiles
    ///
    /// Each axis needs at least one interior position, so both sides
    /// must be at least three pixels long.
    ImageTooSmall {
        /// Raster width in pixels
        width: u32,
        /// Raster height in pixels
        height: u32,
        /// Smallest accepted side length
        minimum: u32,
    },

    /// Random range requested with a non-positive or non-finite bound
    InvalidRandomRange {
        /// The rejected upper bound
        stop: f64,
    },

    /// Configuration parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Pixel buffer length does not match `width * height * 4`
    MalformedRaster {
        /// Length implied by the declared dimensions
        expected: usize,
        /// Length of the supplied buffer
        actual: usize,
    },

    /// Cut list cannot describe a grid along an axis
    InvalidCuts {
        /// Axis the cuts belong to
        axis: &'static str,
        /// Description of the problem
        reason: String,
    },

    /// Input bytes could not be decoded into a raster
    Decode {
        /// Underlying codec error
        source: image::ImageError,
    },

    /// Output raster could not be encoded
    Encode {
        /// Underlying codec error
        source: image::ImageError,
    },

    /// Failed to load a source image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a snapped image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for SnapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions { width, height } => {
                write!(
                    f,
                    "Invalid image dimensions {width}x{height} (each side must be 1..={})",
                    crate::io::configuration::MAX_DIMENSION
                )
            }
            Self::ImageTooSmall {
                width,
                height,
                minimum,
            } => {
                write!(
                    f,
                    "Image too small: {width}x{height} (minimum {minimum}x{minimum})"
                )
            }
            Self::InvalidRandomRange { stop } => {
                write!(f, "Random range stop must be finite and > 0, got {stop}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::MalformedRaster { expected, actual } => {
                write!(
                    f,
                    "Raster buffer holds {actual} bytes but its dimensions require {expected}"
                )
            }
            Self::InvalidCuts { axis, reason } => {
                write!(f, "Invalid {axis} cuts: {reason}")
            }
            Self::Decode { source } => write!(f, "Failed to decode image: {source}"),
            Self::Encode { source } => write!(f, "Failed to encode image: {source}"),
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for SnapError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Decode { source }
            | Self::Encode { source }
            | Self::ImageLoad { source, .. }
            | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for pipeline results
pub type Result<T> = std::result::Result<T, SnapError>;

impl From<image::ImageError> for SnapError {
    fn from(err: image::ImageError) -> Self {
        Self::Decode { source: err }
    }
}

impl From<std::io::Error> for SnapError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> SnapError {
    SnapError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an invalid cut list error
pub fn invalid_cuts(axis: &'static str, reason: &impl ToString) -> SnapError {
    SnapError::InvalidCuts {
        axis,
        reason: reason.to_string(),
    }
}
