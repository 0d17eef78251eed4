//! EXIF orientation extraction.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use tracing::warn;

use super::Rotation;

/// Read the EXIF orientation tag from encoded capture bytes.
///
/// Returns `None` when the capture carries no EXIF data, when the
/// orientation tag is absent or holds a value outside the four plain
/// rotations, and when the EXIF segment is malformed. Metadata must never
/// cost a capture: parse failures are logged and degrade to "no EXIF
/// rotation" instead of surfacing as errors.
pub fn exif_rotation(data: &[u8]) -> Option<Rotation> {
    let mut cursor = Cursor::new(data);
    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .and_then(Rotation::from_exif_tag),
        // Captures without an EXIF segment are routine, not noteworthy
        Err(exif::Error::NotFound(_)) => None,
        Err(err) => {
            warn!(error = %err, "malformed EXIF segment, skipping EXIF rotation");
            None
        }
    }
}
