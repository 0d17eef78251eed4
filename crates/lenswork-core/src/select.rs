//! Capability selection: picking the best of the sizes hardware reports.
//!
//! Capture devices enumerate a finite list of supported resolutions; the
//! host wants "the right one" for a preview surface or a still capture.
//! There is no single right answer, so selection is a family of ranking
//! functions over the same candidate list, chosen by [`SelectionMode`]:
//!
//! - [`SelectionMode::Largest`]: biggest area among sizes matching the
//!   target aspect ratio.
//! - [`SelectionMode::PreviewFit`]: like `Largest`, but sizes that fit
//!   inside the requested bounding box win first.
//! - [`SelectionMode::Closest`]: smallest weighted distance from the
//!   requested dimensions.
//!
//! All entry points are pure: they rank a private copy and never mutate
//! the caller's list.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::orient::Rotation;
use crate::profile::DeviceProfile;

/// Absolute aspect-ratio difference below which two ratios count as a
/// match.
pub const ASPECT_TOLERANCE: f64 = 0.1;

/// Selection failures.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SelectError {
    /// The hardware reported no candidate sizes; the caller cannot set up
    /// a preview or capture at all.
    #[error("no candidate sizes to select from")]
    EmptyCandidateSet,
}

/// A discrete capture or preview resolution reported by hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Construct a size.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Pixel count.
    pub fn area(self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Width over height.
    pub fn aspect_ratio(self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

/// Ranking strategy for [`select_best`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// Biggest area among aspect-matching sizes.
    Largest,
    /// Sizes inside the target bounding box first, then the `Largest`
    /// rule.
    PreviewFit,
    /// Smallest weighted distance from the target dimensions.
    Closest,
}

/// Target parameters for one selection call.
#[derive(Debug, Clone, Copy)]
pub struct SelectionRequest {
    /// Rotation the host applies to the live preview.
    pub display_orientation: Rotation,
    /// Requested dimensions, in display coordinates.
    pub target: Size,
    /// Ranking strategy.
    pub mode: SelectionMode,
}

impl SelectionRequest {
    /// Target size in the sensor frame. Hardware reports sizes in its own
    /// landscape frame, so a sideways display orientation swaps the
    /// requested width and height before any comparison. Every ratio in
    /// this module is computed against this normalized target.
    fn normalized_target(&self) -> Size {
        if self.display_orientation.is_sideways() {
            Size::new(self.target.height, self.target.width)
        } else {
            self.target
        }
    }
}

/// Pick the best candidate under the request's ranking mode.
///
/// The candidates are stably sorted (a private copy; the input is never
/// mutated) by the mode's full comparator and the first element wins, so
/// multi-key tie-breaking follows the comparator exactly rather than a
/// one-pass minimum.
pub fn select_best(sizes: &[Size], request: &SelectionRequest) -> Result<Size, SelectError> {
    let target = request.normalized_target();
    let mut ranked = sizes.to_vec();
    match request.mode {
        SelectionMode::Largest => ranked.sort_by(|a, b| rank_largest(target, *a, *b)),
        SelectionMode::PreviewFit => ranked.sort_by(|a, b| rank_preview_fit(target, *a, *b)),
        SelectionMode::Closest => ranked.sort_by(|a, b| rank_closest(target, *a, *b)),
    }
    ranked.first().copied().ok_or(SelectError::EmptyCandidateSet)
}

/// Pick the candidate whose aspect ratio is closest to the target's.
///
/// The list is pre-sorted by the reverse of the `Largest` ordering, then
/// scanned keeping the first strictly-smaller ratio difference. On exact
/// ties the earlier-scanned entry wins. Hosts have shipped against that
/// tie-break for years; do not substitute a different one.
pub fn select_best_aspect(
    sizes: &[Size],
    display_orientation: Rotation,
    target: Size,
) -> Result<Size, SelectError> {
    let request = SelectionRequest {
        display_orientation,
        target,
        mode: SelectionMode::Largest,
    };
    let normalized = request.normalized_target();
    let target_ratio = normalized.aspect_ratio();

    let mut ranked = sizes.to_vec();
    ranked.sort_by(|a, b| rank_largest(normalized, *a, *b).reverse());

    let mut best: Option<(Size, f64)> = None;
    for size in ranked {
        let diff = (size.aspect_ratio() - target_ratio).abs();
        match best {
            Some((_, smallest)) if diff >= smallest => {}
            _ => best = Some((size, diff)),
        }
    }
    best.map(|(size, _)| size).ok_or(SelectError::EmptyCandidateSet)
}

/// Largest-area size whose height falls inside the profile's picture
/// bounds. When no size qualifies the bounds are waived and the plain
/// largest wins: the profile limit is advisory, and returning nothing
/// would lose the capture entirely.
pub fn largest_picture_size(profile: &DeviceProfile, sizes: &[Size]) -> Option<Size> {
    largest_where(sizes, |size| profile.allows_picture_height(size.height))
        .or_else(|| largest_where(sizes, |_| true))
}

/// Minimum-area size. Useful for probing and for hosts that want the
/// cheapest possible capture.
pub fn smallest_picture_size(sizes: &[Size]) -> Option<Size> {
    let mut result: Option<Size> = None;
    for &size in sizes {
        match result {
            Some(best) if size.area() >= best.area() => {}
            _ => result = Some(size),
        }
    }
    result
}

/// First entry of an ordered preference list that the hardware reports as
/// supported. Mode strings are hardware-defined tokens ("auto", "on",
/// "torch", ...); returns `None` when nothing matches.
pub fn preferred_mode<'a, S: AsRef<str>>(supported: &[S], preference: &[&'a str]) -> Option<&'a str> {
    preference
        .iter()
        .copied()
        .find(|want| supported.iter().any(|have| have.as_ref() == *want))
}

fn largest_where(sizes: &[Size], keep: impl Fn(&Size) -> bool) -> Option<Size> {
    let mut result: Option<Size> = None;
    for &size in sizes {
        if !keep(&size) {
            continue;
        }
        match result {
            Some(best) if size.area() <= best.area() => {}
            _ => result = Some(size),
        }
    }
    result
}

fn fits_ratio(target_ratio: f64, size: Size) -> bool {
    (size.aspect_ratio() - target_ratio).abs() <= ASPECT_TOLERANCE
}

/// `Largest` ordering: aspect-matching sizes before the rest, then by
/// descending area. Equal keys keep their existing order.
fn rank_largest(target: Size, a: Size, b: Size) -> Ordering {
    let target_ratio = target.aspect_ratio();
    match (fits_ratio(target_ratio, a), fits_ratio(target_ratio, b)) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => b.area().cmp(&a.area()),
    }
}

/// `PreviewFit` ordering: sizes inside the target bounding box first,
/// then the `Largest` rule within each group.
fn rank_preview_fit(target: Size, a: Size, b: Size) -> Ordering {
    let inside_a = a.width <= target.width && a.height <= target.height;
    let inside_b = b.width <= target.width && b.height <= target.height;
    match (inside_a, inside_b) {
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        _ => rank_largest(target, a, b),
    }
}

/// `Closest` ordering: ascending cross-weighted Manhattan distance. The
/// width gap is weighted by the target height and vice versa, which
/// approximates an area-proportional distance without floating point.
fn rank_closest(target: Size, a: Size, b: Size) -> Ordering {
    distance(target, a).cmp(&distance(target, b))
}

fn distance(target: Size, size: Size) -> u64 {
    let width_gap = u64::from(target.width.abs_diff(size.width));
    let height_gap = u64::from(target.height.abs_diff(size.height));
    u64::from(target.height) * width_gap + u64::from(target.width) * height_gap
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn size_strategy() -> impl Strategy<Value = Size> {
        (1u32..=4096, 1u32..=4096).prop_map(|(w, h)| Size::new(w, h))
    }

    fn candidates_strategy() -> impl Strategy<Value = Vec<Size>> {
        prop::collection::vec(size_strategy(), 1..16)
    }

    fn mode_strategy() -> impl Strategy<Value = SelectionMode> {
        prop::sample::select(vec![
            SelectionMode::Largest,
            SelectionMode::PreviewFit,
            SelectionMode::Closest,
        ])
    }

    proptest! {
        /// The selector only ever returns a size from the input list.
        #[test]
        fn prop_selection_is_a_member(
            candidates in candidates_strategy(),
            target in size_strategy(),
            mode in mode_strategy(),
        ) {
            let req = SelectionRequest {
                display_orientation: Rotation::Deg0,
                target,
                mode,
            };
            let best = select_best(&candidates, &req).unwrap();
            prop_assert!(candidates.contains(&best));
        }

        /// Largest mode never returns a non-fitting size while a fitting
        /// one exists, whatever the areas involved.
        #[test]
        fn prop_largest_prefers_fitting_aspect(
            candidates in candidates_strategy(),
            target in size_strategy(),
        ) {
            let req = SelectionRequest {
                display_orientation: Rotation::Deg0,
                target,
                mode: SelectionMode::Largest,
            };
            let ratio = target.aspect_ratio();
            let best = select_best(&candidates, &req).unwrap();
            let any_fits = candidates
                .iter()
                .any(|s| (s.aspect_ratio() - ratio).abs() <= ASPECT_TOLERANCE);
            if any_fits {
                prop_assert!((best.aspect_ratio() - ratio).abs() <= ASPECT_TOLERANCE);
            }
        }

        /// PreviewFit never overflows the box while an in-box candidate
        /// exists.
        #[test]
        fn prop_preview_fit_stays_in_box_when_possible(
            candidates in candidates_strategy(),
            target in size_strategy(),
        ) {
            let req = SelectionRequest {
                display_orientation: Rotation::Deg0,
                target,
                mode: SelectionMode::PreviewFit,
            };
            let best = select_best(&candidates, &req).unwrap();
            let any_inside = candidates
                .iter()
                .any(|s| s.width <= target.width && s.height <= target.height);
            if any_inside {
                prop_assert!(best.width <= target.width && best.height <= target.height);
            }
        }

        /// The aspect pick's ratio difference is minimal over the list.
        #[test]
        fn prop_best_aspect_is_pointwise_minimal(
            candidates in candidates_strategy(),
            target in size_strategy(),
        ) {
            let ratio = target.aspect_ratio();
            let best = select_best_aspect(&candidates, Rotation::Deg0, target).unwrap();
            let best_diff = (best.aspect_ratio() - ratio).abs();
            for size in &candidates {
                prop_assert!(best_diff <= (size.aspect_ratio() - ratio).abs() + 1e-12);
            }
        }

        /// Closest mode minimizes the weighted distance over the list.
        #[test]
        fn prop_closest_is_pointwise_minimal(
            candidates in candidates_strategy(),
            target in size_strategy(),
        ) {
            let req = SelectionRequest {
                display_orientation: Rotation::Deg0,
                target,
                mode: SelectionMode::Closest,
            };
            let best = select_best(&candidates, &req).unwrap();
            for size in &candidates {
                prop_assert!(distance(target, best) <= distance(target, *size));
            }
        }
    }
}
