//! JPEG decode and encode over the `image` crate.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageReader};

use super::{CodecError, ImageCodec, PixelBuffer};

/// Decode encoded image bytes into an RGB8 buffer.
///
/// The container format is sniffed from the bytes, so PNG captures from
/// hosts that post-process previews decode the same way JPEG captures do.
/// EXIF orientation is deliberately not applied here; the corrector owns
/// orientation.
///
/// # Errors
///
/// `CodecError::InvalidFormat` when the bytes match no known container,
/// `CodecError::Corrupted` when decoding fails partway.
pub fn decode_image(data: &[u8]) -> Result<PixelBuffer, CodecError> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| CodecError::Corrupted(e.to_string()))?;

    if reader.format().is_none() {
        return Err(CodecError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| CodecError::Corrupted(e.to_string()))?;

    Ok(PixelBuffer::from_rgb_image(img.into_rgb8()))
}

/// Encode an RGB8 buffer to JPEG bytes.
///
/// `quality` is clamped to 1..=100. The buffer is validated against its
/// stated dimensions before any encoder work happens.
pub fn encode_jpeg(buffer: &PixelBuffer, quality: u8) -> Result<Vec<u8>, CodecError> {
    if buffer.width == 0 || buffer.height == 0 {
        return Err(CodecError::InvalidDimensions {
            width: buffer.width,
            height: buffer.height,
        });
    }

    let expected = buffer.width as usize * buffer.height as usize * 3;
    if buffer.pixels.len() != expected {
        return Err(CodecError::InvalidPixelData {
            expected,
            actual: buffer.pixels.len(),
        });
    }

    let quality = quality.clamp(1, 100);
    let mut out = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut out, quality)
        .write_image(
            &buffer.pixels,
            buffer.width,
            buffer.height,
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| CodecError::EncodingFailed(e.to_string()))?;

    Ok(out.into_inner())
}

/// The default codec: sniffing decode, JPEG encode.
#[derive(Debug, Clone, Copy, Default)]
pub struct JpegCodec;

impl ImageCodec for JpegCodec {
    fn decode(&self, data: &[u8]) -> Result<PixelBuffer, CodecError> {
        decode_image(data)
    }

    fn encode(&self, buffer: &PixelBuffer, quality: u8) -> Result<Vec<u8>, CodecError> {
        encode_jpeg(buffer, quality)
    }
}
