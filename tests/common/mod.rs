//! Shared helpers for integration tests.

#![allow(dead_code)]

use std::sync::OnceLock;

use memory_match::{CodecError, ImageCodec, ImageHandle, RasterImage};
use tracing_subscriber::{fmt, EnvFilter};

static INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize test logging once. Level comes from `TEST_LOG`, then
/// `RUST_LOG`, then `warn`.
pub fn init_logging() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

/// Codec that "encodes" an image as its handle text, so each uploaded blob
/// can be traced back to the photo it came from.
pub struct HandleCodec;

impl ImageCodec for HandleCodec {
    fn decode(&self, handle: &ImageHandle) -> Result<RasterImage, CodecError> {
        if handle.as_str().contains("corrupt") {
            return Err(CodecError::Decode(handle.to_string()));
        }
        Ok(RasterImage {
            width: 800,
            height: 600,
            pixels: handle.as_str().as_bytes().to_vec(),
        })
    }

    fn scale_to_height(&self, image: &RasterImage, target_height: u32) -> RasterImage {
        let (width, height) = memory_match::publish::scaled_dimensions(image.width, image.height, target_height);
        RasterImage { width, height, pixels: image.pixels.clone() }
    }

    fn encode_jpeg(&self, image: &RasterImage, _quality: u8) -> Result<Vec<u8>, CodecError> {
        Ok(image.pixels.clone())
    }
}

/// `n` distinct photo handles.
pub fn photos(n: usize) -> Vec<ImageHandle> {
    (0..n).map(|i| ImageHandle::new(format!("content://photos/{}", i))).collect()
}
