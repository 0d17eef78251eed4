//! Capture orientation correction.
//!
//! A captured image arrives with up to three independent orientation
//! signals: the display rotation the host was showing, the EXIF rotation
//! the hardware embedded in the bytes, and the lens-facing mirroring
//! policy. [`OrientationCorrector`] reconciles them into one composed
//! [`Transform`], applies it atomically, and hands back the requested
//! artifacts. The stage order is fixed: front-camera mirror/flip, then
//! device-angle rotation, then EXIF-angle rotation, then the
//! device-specific post-process.

use std::borrow::Cow;

use thiserror::Error;
use tracing::debug;

use crate::codec::{CodecError, ImageCodec, JpegCodec, PixelBuffer};
use crate::profile::DeviceProfile;

use super::{exif_rotation, Rotation, Transform};

/// Re-encode quality for corrected captures. Fixed at the maximum so the
/// correction pass does not visibly degrade the image.
const CORRECTED_JPEG_QUALITY: u8 = 100;

/// Which side of the device the capturing lens is on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LensFacing {
    /// Same side as the display; subject sees the preview.
    Front,
    /// Opposite side from the display.
    Back,
}

/// Everything the corrector needs to know about one capture.
///
/// Assembled once per capture from the resolved [`DeviceProfile`] and the
/// per-transaction flags; read-only during correction.
#[derive(Debug, Clone, Copy)]
pub struct OrientationContext {
    /// Which camera produced the capture.
    pub lens_facing: LensFacing,
    /// Rotation the host applies to the live preview.
    pub display_orientation: Rotation,
    /// Mirror front-camera captures so they match the on-screen preview.
    pub mirror_front_camera: bool,
    /// This device's front camera delivers sideways captures flipped on
    /// both axes.
    pub flip_portrait_front_camera: bool,
    /// Rotate captures by the display orientation (hardware that does not
    /// bake orientation into the pixels).
    pub use_device_orientation: bool,
    /// Trust the EXIF orientation tag embedded in the capture.
    pub use_exif_orientation: bool,
    /// Memory headroom for the degrade policy; `None` never degrades.
    pub memory_budget: Option<MemoryBudget>,
}

impl OrientationContext {
    /// Assemble a context from the resolved profile and per-capture flags.
    pub fn new(
        profile: &DeviceProfile,
        lens_facing: LensFacing,
        display_orientation: Rotation,
        mirror_front_camera: bool,
    ) -> Self {
        Self {
            lens_facing,
            display_orientation,
            mirror_front_camera,
            flip_portrait_front_camera: profile.portrait_front_camera_flipped,
            use_device_orientation: profile.use_device_orientation,
            use_exif_orientation: profile.use_exif_orientation,
            memory_budget: None,
        }
    }

    /// Attach a memory budget, enabling the degrade-under-pressure policy.
    pub fn with_memory_budget(mut self, budget: MemoryBudget) -> Self {
        self.memory_budget = Some(budget);
        self
    }
}

/// Which artifacts the caller wants back. Producing an unrequested
/// artifact is wasted work, so the corrector produces exactly what is
/// asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputRequest {
    /// Decoded, corrected pixel data.
    pub pixel_buffer: bool,
    /// Corrected encoded bytes.
    pub encoded: bool,
}

/// Host-supplied memory headroom for the degrade policy.
///
/// Decoding a full-resolution capture takes a large multiple of its
/// encoded size. When the encoded bytes alone already occupy more than
/// `max_fraction` of what the process can spare, the transform is skipped
/// outright rather than risking an allocation failure mid-capture. The
/// threshold is policy, not a hard rule; hosts tune it per platform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MemoryBudget {
    /// Bytes the process can still comfortably allocate.
    pub available_bytes: u64,
    /// Largest fraction of `available_bytes` a capture may occupy and
    /// still be transformed.
    pub max_fraction: f32,
}

impl MemoryBudget {
    /// True when a capture of `data_len` encoded bytes is small enough to
    /// transform.
    pub fn permits(&self, data_len: usize) -> bool {
        if self.available_bytes == 0 {
            return false;
        }
        (data_len as f64 / self.available_bytes as f64) < f64::from(self.max_fraction)
    }
}

/// Device-specific extra transform, resolved from the two computed angles.
///
/// Consulted once per correction, after the standard stages; returning
/// `None` means no extra work.
pub trait PostProcess {
    /// `device_angle` is the applied device rotation (`Deg0` when the
    /// profile disables device orientation); `exif_angle` is the resolved
    /// EXIF rotation, `None` when unused or unknown.
    fn transform(&self, device_angle: Rotation, exif_angle: Option<Rotation>) -> Option<Transform>;
}

/// Outcome of one correction.
#[derive(Debug)]
pub struct Correction<'a> {
    /// Decoded, corrected pixels; present iff requested.
    pub pixel_buffer: Option<PixelBuffer>,
    /// Encoded bytes; borrows the input untouched when no transform was
    /// applied, so an uncorrected capture is never recompressed.
    pub encoded: Option<Cow<'a, [u8]>>,
    /// True when memory pressure caused the transform to be skipped.
    pub transform_skipped: bool,
}

/// Errors fatal to a single correction call.
///
/// A failed call must not affect later, independent corrections; the
/// corrector holds no per-call state.
#[derive(Debug, Error)]
pub enum CorrectError {
    /// The capture bytes could not be decoded.
    #[error("failed to decode capture")]
    Decode(#[source] CodecError),
    /// The corrected buffer could not be re-encoded.
    #[error("failed to re-encode corrected capture")]
    Encode(#[source] CodecError),
}

/// Applies orientation corrections to captured images.
///
/// Stateless apart from the codec it delegates pixel work to; one
/// instance can serve any number of concurrent corrections.
#[derive(Debug, Clone)]
pub struct OrientationCorrector<C = JpegCodec> {
    codec: C,
}

impl Default for OrientationCorrector<JpegCodec> {
    fn default() -> Self {
        Self { codec: JpegCodec }
    }
}

impl<C: ImageCodec> OrientationCorrector<C> {
    /// Build a corrector over the given codec.
    pub fn new(codec: C) -> Self {
        Self { codec }
    }

    /// Correct one capture.
    ///
    /// Composes the transform from the context, applies it if it is not
    /// the identity, and produces exactly the artifacts `outputs` asks
    /// for. `post` is the optional device-specific post-process hook.
    ///
    /// # Errors
    ///
    /// Codec failures only. EXIF problems and memory-pressure skips are
    /// policy outcomes, not errors.
    pub fn correct<'a>(
        &self,
        data: &'a [u8],
        context: &OrientationContext,
        outputs: OutputRequest,
        post: Option<&dyn PostProcess>,
    ) -> Result<Correction<'a>, CorrectError> {
        let apply_transform = context
            .memory_budget
            .map_or(true, |budget| budget.permits(data.len()));
        if !apply_transform {
            debug!(
                len = data.len(),
                "capture too large for available memory, passing through untransformed"
            );
        }

        let mut transform = Transform::IDENTITY;
        if apply_transform {
            transform = self.compose_transform(data, context, post);
        }

        let mut corrected = None;
        if !transform.is_identity() {
            let source = self.codec.decode(data).map_err(CorrectError::Decode)?;
            corrected = Some(transform.apply(&source));
        }

        let encoded = if outputs.encoded {
            match &corrected {
                Some(buffer) => {
                    let bytes = self
                        .codec
                        .encode(buffer, CORRECTED_JPEG_QUALITY)
                        .map_err(CorrectError::Encode)?;
                    Some(Cow::Owned(bytes))
                }
                // Nothing changed: hand the original bytes back untouched
                None => Some(Cow::Borrowed(data)),
            }
        } else {
            None
        };

        let pixel_buffer = if outputs.pixel_buffer {
            match corrected.take() {
                Some(buffer) => Some(buffer),
                None => Some(self.codec.decode(data).map_err(CorrectError::Decode)?),
            }
        } else {
            None
        };

        Ok(Correction {
            pixel_buffer,
            encoded,
            transform_skipped: !apply_transform,
        })
    }

    fn compose_transform(
        &self,
        data: &[u8],
        context: &OrientationContext,
        post: Option<&dyn PostProcess>,
    ) -> Transform {
        let mut transform = Transform::IDENTITY;

        if context.lens_facing == LensFacing::Front {
            if context.flip_portrait_front_camera && context.display_orientation.is_sideways() {
                transform = transform.post_scale(-1, -1);
            } else if context.mirror_front_camera {
                transform = transform.post_scale(-1, 1);
            }
        }

        let mut device_angle = Rotation::Deg0;
        if context.use_device_orientation {
            device_angle = context.display_orientation;
            transform = transform.pre_rotate(device_angle);
        }

        let mut exif_angle = None;
        if context.use_exif_orientation {
            exif_angle = exif_rotation(data);
            if let Some(angle) = exif_angle {
                transform = transform.pre_rotate(angle);
            }
        }

        if let Some(hook) = post {
            if let Some(extra) = hook.transform(device_angle, exif_angle) {
                transform = transform.post_concat(extra);
            }
        }

        transform
    }
}
