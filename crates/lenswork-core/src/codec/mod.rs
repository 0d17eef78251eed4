//! Image codec capability.
//!
//! The orientation corrector never touches encoded bytes itself; it goes
//! through the [`ImageCodec`] trait to decode a capture into a
//! [`PixelBuffer`] and to re-encode the corrected buffer. The default
//! implementation, [`JpegCodec`], is backed by the `image` crate. Hosts
//! with their own decoder (hardware JPEG blocks, test doubles) implement
//! the trait instead.

mod jpeg;

pub use jpeg::{decode_image, encode_jpeg, JpegCodec};

use thiserror::Error;

/// Errors shared by codec implementations.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The bytes are not a recognized image format.
    #[error("invalid or unsupported image format")]
    InvalidFormat,

    /// The data looked like an image but could not be decoded.
    #[error("corrupted or incomplete image data: {0}")]
    Corrupted(String),

    /// Width or height is zero.
    #[error("invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// Pixel data length does not match the stated dimensions.
    #[error("invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// The encoder itself failed.
    #[error("encoding failed: {0}")]
    EncodingFailed(String),
}

/// A decoded image: RGB8 pixel data in row-major order, 3 bytes per pixel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel data; `pixels.len() == width * height * 3`.
    pub pixels: Vec<u8>,
}

impl PixelBuffer {
    /// Create a buffer from raw RGB8 data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * 3,
            "pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Wrap an `image` crate RGB image without copying.
    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Convert into an `image` crate RGB image for pixel operations.
    ///
    /// Returns `None` when the buffer violates the size invariant.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Byte length of the pixel data.
    pub fn byte_len(&self) -> usize {
        self.pixels.len()
    }
}

/// Decode/encode capability consumed by the orientation corrector.
///
/// A failed decode or encode is fatal to the single correction call that
/// triggered it and must leave the codec usable for later, independent
/// calls.
pub trait ImageCodec {
    /// Decode encoded image bytes into an RGB8 buffer.
    fn decode(&self, data: &[u8]) -> Result<PixelBuffer, CodecError>;

    /// Encode an RGB8 buffer; `quality` is in 1..=100.
    fn encode(&self, buffer: &PixelBuffer, quality: u8) -> Result<Vec<u8>, CodecError>;
}
