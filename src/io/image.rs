//! Conversion between encoded image bytes or files and RGBA rasters

use crate::io::error::{Result, SnapError};
use crate::spatial::raster::Raster;
use image::{ImageFormat, RgbaImage};
use std::io::Cursor;
use std::path::Path;

/// Decode any supported image format into an RGBA raster
///
/// # Errors
///
/// Returns `Decode` if the format is unknown or the data is corrupt
pub fn decode_bytes(bytes: &[u8]) -> Result<Raster> {
    let img = image::load_from_memory(bytes).map_err(|e| SnapError::Decode { source: e })?;
    Ok(Raster::from(img.to_rgba8()))
}

/// Encode a raster as an RGBA8 PNG
///
/// # Errors
///
/// Returns `Encode` if the PNG writer fails
pub fn encode_png(raster: Raster) -> Result<Vec<u8>> {
    let img: RgbaImage = raster.into_image()?;
    let mut bytes = Vec::new();
    img.write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|e| SnapError::Encode { source: e })?;
    Ok(bytes)
}

/// Load an image file as an RGBA raster
///
/// # Errors
///
/// Returns `ImageLoad` if the file cannot be opened or decoded
pub fn load_raster<P: AsRef<Path>>(path: P) -> Result<Raster> {
    let path_buf = path.as_ref().to_path_buf();
    let img = image::open(&path_buf).map_err(|e| SnapError::ImageLoad {
        path: path_buf,
        source: e,
    })?;
    Ok(Raster::from(img.to_rgba8()))
}

/// Save a raster as a PNG file, creating parent directories as needed
///
/// # Errors
///
/// Returns `FileSystem` if the parent directory cannot be created and
/// `ImageExport` if the file cannot be written
pub fn save_raster<P: AsRef<Path>>(raster: Raster, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| SnapError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    raster
        .into_image()?
        .save_with_format(path, ImageFormat::Png)
        .map_err(|e| SnapError::ImageExport {
            path: path.to_path_buf(),
            source: e,
        })
}
