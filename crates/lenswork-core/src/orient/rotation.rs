//! Quarter-turn rotation angles.

use serde::{Deserialize, Serialize};

/// A display or image rotation, constrained to quarter turns.
///
/// Camera hardware and EXIF metadata only ever describe orientation in
/// multiples of 90 degrees, so the angle is an enum rather than a number
/// that would need revalidating at every use site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Rotation {
    /// No rotation.
    #[default]
    Deg0,
    /// 90 degrees clockwise.
    Deg90,
    /// 180 degrees.
    Deg180,
    /// 270 degrees clockwise (90 counter-clockwise).
    Deg270,
}

impl Rotation {
    /// Parse an angle in degrees.
    ///
    /// Angles are normalized modulo 360 first, so `-90` parses as `Deg270`
    /// and `450` as `Deg90`. Returns `None` for anything that is not a
    /// quarter turn.
    pub fn from_degrees(degrees: i32) -> Option<Self> {
        match degrees.rem_euclid(360) {
            0 => Some(Rotation::Deg0),
            90 => Some(Rotation::Deg90),
            180 => Some(Rotation::Deg180),
            270 => Some(Rotation::Deg270),
            _ => None,
        }
    }

    /// Map an EXIF orientation tag value to the rotation it calls for.
    ///
    /// Only the four rotation-without-flip values are meaningful here
    /// (1 upright, 6 rotate 90, 3 rotate 180, 8 rotate 270); anything else,
    /// including the mirrored variants, maps to `None` and callers apply no
    /// EXIF rotation at all.
    pub fn from_exif_tag(value: u32) -> Option<Self> {
        match value {
            1 => Some(Rotation::Deg0),
            6 => Some(Rotation::Deg90),
            3 => Some(Rotation::Deg180),
            8 => Some(Rotation::Deg270),
            _ => None,
        }
    }

    /// The angle in degrees, clockwise, in `[0, 360)`.
    pub fn degrees(self) -> u32 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// True for 90 and 270 degrees, where width and height trade places.
    #[inline]
    pub fn is_sideways(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }

    /// Compose two rotations; angles add modulo 360.
    pub fn then(self, other: Rotation) -> Rotation {
        match (self.degrees() + other.degrees()) % 360 {
            90 => Rotation::Deg90,
            180 => Rotation::Deg180,
            270 => Rotation::Deg270,
            _ => Rotation::Deg0,
        }
    }
}
