//! Lenswork Core - capability selection and capture orientation correction
//!
//! The decision-making half of a camera-control library. Two components,
//! no shared mutable state between them:
//!
//! - [`select`] ranks the discrete resolutions hardware reports against a
//!   target aspect ratio, display orientation and use-case, and returns
//!   the best candidate.
//! - [`orient`] reconciles display rotation, EXIF rotation and lens-facing
//!   mirroring into one composed transform and applies it to captured
//!   bytes.
//!
//! Supporting both: [`codec`] (the decode/encode capability the corrector
//! consumes) and [`profile`] (per-device policy, resolved once and shared
//! by reference).
//!
//! Acquiring the camera, driving its state machine, persisting profiles
//! and showing previews are host concerns; nothing here does I/O beyond
//! the bytes it is handed.

pub mod codec;
pub mod orient;
pub mod profile;
pub mod select;

#[cfg(test)]
pub(crate) mod testutil;

pub use codec::{CodecError, ImageCodec, JpegCodec, PixelBuffer};
pub use orient::{
    CorrectError, Correction, LensFacing, MemoryBudget, OrientationContext, OrientationCorrector,
    OutputRequest, PostProcess, Rotation, Transform,
};
pub use profile::{DeviceProfile, ProfileEntry, ProfileTable};
pub use select::{
    largest_picture_size, select_best, select_best_aspect, smallest_picture_size, SelectError,
    SelectionMode, SelectionRequest, Size,
};
