//! Resolved per-device policy.
//!
//! Heterogeneous hardware disagrees about orientation: some devices bake
//! the rotation into pixels, some only record it in EXIF, some front
//! cameras deliver sideways captures flipped outright. None of that is
//! queryable at runtime, so policy is looked up by device identity in a
//! data-driven quirk table and resolved once, at startup, into an
//! immutable [`DeviceProfile`] the host shares by reference (`Arc`) with
//! everything that needs it. There is no hidden global; construction is
//! explicit and synthetic profiles drop straight into tests.
//!
//! Loading the table from disk (and its file format) belongs to the host;
//! this module only defines the data and the match rules.

use serde::{Deserialize, Serialize};

use crate::orient::Rotation;

/// Policy flags and limits for one device model.
///
/// Fields are immutable once resolved; concurrent readers need no
/// synchronization beyond the shared pointer they hold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeviceProfile {
    /// Smallest capture height the device produces reliably.
    pub min_picture_height: u32,
    /// Largest capture height the device produces reliably.
    pub max_picture_height: u32,
    /// Rotate captures by the display orientation; set for hardware that
    /// does not bake orientation into the pixels.
    pub use_device_orientation: bool,
    /// Trust the EXIF orientation tag embedded in captures.
    pub use_exif_orientation: bool,
    /// The front camera delivers sideways captures flipped on both axes.
    pub portrait_front_camera_flipped: bool,
    /// Fixed orientation override for hardware that reports none.
    pub default_orientation: Option<Rotation>,
    /// Delay between shutter and usable capture data, in milliseconds.
    pub picture_delay_ms: u32,
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self {
            min_picture_height: 0,
            max_picture_height: u32::MAX,
            use_device_orientation: false,
            use_exif_orientation: true,
            portrait_front_camera_flipped: false,
            default_orientation: None,
            picture_delay_ms: 0,
        }
    }
}

impl DeviceProfile {
    /// True when a capture height is inside this device's usable range.
    pub fn allows_picture_height(&self, height: u32) -> bool {
        height >= self.min_picture_height && height <= self.max_picture_height
    }
}

/// One quirk-table row: which hardware it applies to, and the profile to
/// use for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileEntry {
    /// Manufacturer string as the device reports it.
    pub manufacturer: String,
    /// Product identifier; `None` matches every product of the
    /// manufacturer.
    #[serde(default)]
    pub product: Option<String>,
    /// Marketing model identifier, the alternative key some vendors
    /// report more consistently than the product string.
    #[serde(default)]
    pub model: Option<String>,
    /// Profile to apply when this row matches.
    pub profile: DeviceProfile,
}

/// Data-driven device-quirk lookup.
///
/// Rows are checked in order. A row naming a product or model wins as soon
/// as it matches; a manufacturer-wide row (no product, no model) is
/// remembered as a fallback. Unknown hardware resolves to
/// [`DeviceProfile::default`]. All string matching is ASCII
/// case-insensitive, because vendors are not consistent about casing
/// either.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileTable {
    /// Rows in match order.
    pub entries: Vec<ProfileEntry>,
}

impl ProfileTable {
    /// Build a table from rows.
    pub fn new(entries: Vec<ProfileEntry>) -> Self {
        Self { entries }
    }

    /// Resolve the profile for a device identity.
    pub fn resolve(&self, manufacturer: &str, product: &str, model: &str) -> DeviceProfile {
        let mut manufacturer_wide: Option<&DeviceProfile> = None;

        for entry in &self.entries {
            if !entry.manufacturer.eq_ignore_ascii_case(manufacturer) {
                continue;
            }
            match (&entry.product, &entry.model) {
                (None, None) => {
                    if manufacturer_wide.is_none() {
                        manufacturer_wide = Some(&entry.profile);
                    }
                }
                (entry_product, entry_model) => {
                    let product_match = entry_product
                        .as_deref()
                        .is_some_and(|p| p.eq_ignore_ascii_case(product));
                    let model_match = entry_model
                        .as_deref()
                        .is_some_and(|m| m.eq_ignore_ascii_case(model));
                    if product_match || model_match {
                        return entry.profile.clone();
                    }
                }
            }
        }

        manufacturer_wide.cloned().unwrap_or_default()
    }
}
