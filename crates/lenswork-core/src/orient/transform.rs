//! Composed 2D transforms for capture correction.
//!
//! Every correction a capture can need (front-camera mirroring, device
//! rotation, EXIF rotation, device post-processing) is a quarter-turn
//! rotation or an axis flip. Their compositions form the eight axis-aligned
//! symmetries of a rectangle, so a [`Transform`] is a 2x2 integer matrix
//! with entries in {-1, 0, 1}: exact arithmetic, an exact identity test,
//! and a lossless pixel application (no resampling, ever).
//!
//! Transforms are built immutably, one stage at a time, and applied in a
//! single atomic step. The stage order is fixed by the correction
//! algorithm: mirror/flip first ([`Transform::post_scale`]), then device
//! and EXIF rotations ([`Transform::pre_rotate`]), then the device
//! post-process ([`Transform::post_concat`]).

use image::imageops;

use crate::codec::PixelBuffer;

use super::Rotation;

/// The single pixel operation a [`Transform`] decomposes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelOp {
    /// No pixel work.
    Identity,
    /// 90 degrees clockwise.
    Rotate90,
    /// 180 degrees.
    Rotate180,
    /// 270 degrees clockwise.
    Rotate270,
    /// Mirror across the vertical axis.
    FlipHorizontal,
    /// Mirror across the horizontal axis.
    FlipVertical,
    /// Mirror across the main diagonal (rotate 90 then flip horizontal).
    Transpose,
    /// Mirror across the anti-diagonal (rotate 270 then flip horizontal).
    Transverse,
}

/// A composed 2D transform over pixel coordinates.
///
/// Row-major 2x2 matrix `[a, b, c, d]` mapping column vectors, with the
/// y axis pointing down the image as usual for pixel coordinates. Positive
/// rotations are clockwise on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transform {
    m: [i8; 4],
}

impl Transform {
    /// The do-nothing transform.
    pub const IDENTITY: Transform = Transform { m: [1, 0, 0, 1] };

    /// A pure rotation.
    pub fn rotation(angle: Rotation) -> Transform {
        let m = match angle {
            Rotation::Deg0 => [1, 0, 0, 1],
            Rotation::Deg90 => [0, -1, 1, 0],
            Rotation::Deg180 => [-1, 0, 0, -1],
            Rotation::Deg270 => [0, 1, -1, 0],
        };
        Transform { m }
    }

    /// Append a rotation before this transform: points rotate first, then
    /// the existing transform applies.
    pub fn pre_rotate(self, angle: Rotation) -> Transform {
        mul(self, Transform::rotation(angle))
    }

    /// Prepend an axis scale after this transform. Only the signs of `sx`
    /// and `sy` are significant: `(-1, 1)` mirrors horizontally, `(-1, -1)`
    /// flips both axes. The transform stays lossless.
    pub fn post_scale(self, sx: i8, sy: i8) -> Transform {
        let scale = Transform {
            m: [if sx < 0 { -1 } else { 1 }, 0, 0, if sy < 0 { -1 } else { 1 }],
        };
        mul(scale, self)
    }

    /// Concatenate `other` after this transform.
    pub fn post_concat(self, other: Transform) -> Transform {
        mul(other, self)
    }

    /// True when applying this transform would change nothing.
    pub fn is_identity(&self) -> bool {
        self.m == Self::IDENTITY.m
    }

    /// True when the transform trades the x and y axes (output dimensions
    /// are the input dimensions swapped).
    pub fn swaps_axes(&self) -> bool {
        self.m[0] == 0
    }

    /// Decompose into the single pixel operation this matrix represents.
    pub fn op(&self) -> PixelOp {
        match self.m {
            [1, 0, 0, 1] => PixelOp::Identity,
            [0, -1, 1, 0] => PixelOp::Rotate90,
            [-1, 0, 0, -1] => PixelOp::Rotate180,
            [0, 1, -1, 0] => PixelOp::Rotate270,
            [-1, 0, 0, 1] => PixelOp::FlipHorizontal,
            [1, 0, 0, -1] => PixelOp::FlipVertical,
            [0, 1, 1, 0] => PixelOp::Transpose,
            [0, -1, -1, 0] => PixelOp::Transverse,
            // Constructors clamp scales to ±1 and rotations are quarter
            // turns, so every reachable matrix is one of the eight above.
            _ => PixelOp::Identity,
        }
    }

    /// Apply the transform to a pixel buffer, producing a new buffer.
    ///
    /// Application is atomic: the composed matrix maps to exactly one pixel
    /// operation, so there is no intermediate partially-transformed state.
    /// A buffer that violates its own size invariant is handed back
    /// unchanged.
    pub fn apply(&self, src: &PixelBuffer) -> PixelBuffer {
        let Some(img) = src.to_rgb_image() else {
            return src.clone();
        };

        let out = match self.op() {
            PixelOp::Identity => img,
            PixelOp::Rotate90 => imageops::rotate90(&img),
            PixelOp::Rotate180 => imageops::rotate180(&img),
            PixelOp::Rotate270 => imageops::rotate270(&img),
            PixelOp::FlipHorizontal => imageops::flip_horizontal(&img),
            PixelOp::FlipVertical => imageops::flip_vertical(&img),
            PixelOp::Transpose => imageops::flip_horizontal(&imageops::rotate90(&img)),
            PixelOp::Transverse => imageops::flip_horizontal(&imageops::rotate270(&img)),
        };

        PixelBuffer::from_rgb_image(out)
    }
}

/// Standard 2x2 matrix product `a * b`.
fn mul(a: Transform, b: Transform) -> Transform {
    let [a0, a1, a2, a3] = a.m;
    let [b0, b1, b2, b3] = b.m;
    Transform {
        m: [
            a0 * b0 + a1 * b2,
            a0 * b1 + a1 * b3,
            a2 * b0 + a3 * b2,
            a2 * b1 + a3 * b3,
        ],
    }
}
