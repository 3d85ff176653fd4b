//! Image preparation for upload.
//!
//! Decoding and JPEG encoding are delegated to an `ImageCodec`; this module
//! decides the sizing. Images are scaled to a fixed height with the aspect
//! ratio kept, then re-encoded at a fixed quality.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::error::CodecError;

/// Reference to a local image chosen by the player (content URI, file path, ...).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageHandle(pub String);

impl ImageHandle {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ImageHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A decoded image. The pixel layout is the codec's business.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RasterImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

/// Image codec collaborator.
pub trait ImageCodec: Send + Sync {
    /// Decode the image behind `handle`.
    fn decode(&self, handle: &ImageHandle) -> Result<RasterImage, CodecError>;

    /// Resample `image` to `target_height`, keeping the aspect ratio.
    fn scale_to_height(&self, image: &RasterImage, target_height: u32) -> RasterImage;

    /// Encode `image` as JPEG.
    fn encode_jpeg(&self, image: &RasterImage, quality: u8) -> Result<Vec<u8>, CodecError>;
}

/// Dimensions of a `width`×`height` image scaled to `target_height`.
///
/// The width is truncated, not rounded.
#[must_use]
pub fn scaled_dimensions(width: u32, height: u32, target_height: u32) -> (u32, u32) {
    if height == 0 {
        return (0, target_height);
    }
    let factor = f64::from(target_height) / f64::from(height);
    ((f64::from(width) * factor) as u32, target_height)
}

/// Decode, scale and JPEG-encode one image for upload.
pub fn encode_for_upload(
    codec: &dyn ImageCodec,
    handle: &ImageHandle,
    target_height: u32,
    quality: u8,
) -> Result<Vec<u8>, CodecError> {
    let original = codec.decode(handle)?;
    debug!(handle = %handle, width = original.width, height = original.height, "decoded image");

    let scaled = codec.scale_to_height(&original, target_height);
    debug!(handle = %handle, width = scaled.width, height = scaled.height, "scaled image");

    codec.encode_jpeg(&scaled, quality)
}
