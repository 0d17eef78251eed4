//! Per-capture request parameters.

use lenswork_core::{OutputRequest, Rotation};

/// Parameters for a single capture, set by the host at shutter time.
///
/// Defaults to an upright, unmirrored capture delivering encoded bytes
/// only. Setters chain, so hosts build transactions inline:
///
/// `Transaction::new().display_orientation(Rotation::Deg90).need_pixel_buffer(true)`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transaction {
    /// Rotation the host was applying to the preview at shutter time.
    pub display_orientation: Rotation,
    /// Mirror this capture if it came from the front camera.
    pub mirror_front_camera: bool,
    /// Deliver decoded, corrected pixels.
    pub need_pixel_buffer: bool,
    /// Deliver corrected encoded bytes.
    pub need_encoded: bool,
}

impl Default for Transaction {
    fn default() -> Self {
        Self {
            display_orientation: Rotation::Deg0,
            mirror_front_camera: false,
            need_pixel_buffer: false,
            need_encoded: true,
        }
    }
}

impl Transaction {
    /// A default transaction: upright, unmirrored, encoded bytes only.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the display orientation at shutter time.
    pub fn display_orientation(mut self, orientation: Rotation) -> Self {
        self.display_orientation = orientation;
        self
    }

    /// Request front-camera mirroring.
    pub fn mirror_front_camera(mut self, mirror: bool) -> Self {
        self.mirror_front_camera = mirror;
        self
    }

    /// Request the decoded pixel artifact.
    pub fn need_pixel_buffer(mut self, need: bool) -> Self {
        self.need_pixel_buffer = need;
        self
    }

    /// Request the encoded bytes artifact.
    pub fn need_encoded(mut self, need: bool) -> Self {
        self.need_encoded = need;
        self
    }

    /// The artifacts this transaction asks the corrector for.
    pub fn outputs(&self) -> OutputRequest {
        OutputRequest {
            pixel_buffer: self.need_pixel_buffer,
            encoded: self.need_encoded,
        }
    }
}
