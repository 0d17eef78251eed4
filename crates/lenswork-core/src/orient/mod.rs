//! Capture orientation: angles, composed transforms, EXIF extraction,
//! and the correction algorithm.
//!
//! # Stage order
//!
//! A correction composes up to four stages, always in this order:
//!
//! 1. Front-camera mirror or flip (lens-facing policy)
//! 2. Device-angle rotation (display orientation)
//! 3. EXIF-angle rotation (embedded metadata)
//! 4. Device-specific post-process
//!
//! The order is part of the contract: reordering changes the output.
//! Composition is exact integer math (see [`Transform`]); the composed
//! result is applied to pixels in one atomic step, or not at all when it
//! turns out to be the identity.

mod correct;
mod exif;
mod rotation;
mod transform;

pub use correct::{
    CorrectError, Correction, LensFacing, MemoryBudget, OrientationContext, OrientationCorrector,
    OutputRequest, PostProcess,
};
pub use exif::exif_rotation;
pub use rotation::Rotation;
pub use transform::{PixelOp, Transform};
