// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::ops::{BitOr, BitOrAssign};

use kurbo::{Point, Size, Vec2};

use crate::clamp::{clamp_offset, offset_limits};

/// Whether a mutation changed anything the render pass can observe.
///
/// Every [`ViewportState`] mutator returns one of these instead of redrawing
/// directly; the owner coalesces them into a single redraw request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[must_use]
pub enum Repaint {
    /// Nothing visible changed.
    #[default]
    Clean,
    /// The next render pass will produce a different frame.
    Dirty,
}

impl Repaint {
    /// Returns `true` for [`Repaint::Dirty`].
    #[must_use]
    pub fn is_dirty(self) -> bool {
        self == Self::Dirty
    }

    fn from_changed(changed: bool) -> Self {
        if changed { Self::Dirty } else { Self::Clean }
    }
}

impl BitOr for Repaint {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self::from_changed(self.is_dirty() || rhs.is_dirty())
    }
}

impl BitOrAssign for Repaint {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = *self | rhs;
    }
}

/// Outcome of one frame tick of an animation or fling.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameTick {
    /// Whether the tick changed the viewport state.
    pub repaint: Repaint,
    /// Whether the ticked task wants to run again on the next frame.
    pub scheduled: bool,
}

impl FrameTick {
    /// A tick that did nothing and wants no further frames.
    pub const IDLE: Self = Self {
        repaint: Repaint::Clean,
        scheduled: false,
    };
}

/// Viewport and displayed-image dimensions that drive the scale bounds.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Bounds {
    /// Viewport size in device pixels.
    pub viewport: Size,
    /// Displayed image size in device pixels, as reported by the image loader.
    pub image: Size,
}

impl Bounds {
    /// Returns `true` when both sizes are finite and strictly positive.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        is_positive_size(self.viewport) && is_positive_size(self.image)
    }

    /// Center of the viewport.
    #[must_use]
    pub fn viewport_center(&self) -> Point {
        Point::new(self.viewport.width / 2.0, self.viewport.height / 2.0)
    }

    /// Computes `(small_scale, big_scale)` for these bounds.
    ///
    /// The fitted scale fits the constraining axis. The expanded scale fills
    /// the complementary axis and is then multiplied by `magnification`, so
    /// the image overflows the viewport on at least one axis.
    ///
    /// Returns `None` when the bounds are degenerate.
    #[must_use]
    pub fn scales(&self, magnification: f64) -> Option<(f64, f64)> {
        if !self.is_valid() {
            return None;
        }
        let fit_x = self.viewport.width / self.image.width;
        let fit_y = self.viewport.height / self.image.height;
        let image_aspect = self.image.width / self.image.height;
        let viewport_aspect = self.viewport.width / self.viewport.height;
        let scales = if image_aspect > viewport_aspect {
            (fit_x, fit_y * magnification)
        } else {
            (fit_y, fit_x * magnification)
        };
        Some(scales)
    }
}

fn is_positive_size(size: Size) -> bool {
    size.width.is_finite() && size.height.is_finite() && size.width > 0.0 && size.height > 0.0
}

/// Current scale and pan of the viewport, with its derived scale bounds.
///
/// The invariant `small_scale <= scale <= big_scale` holds after every
/// mutation. The offset is only meaningful while expanded; it is not reset when
/// leaving the expanded state and simply becomes inert as the scale returns to
/// `small_scale`.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct ViewportState {
    bounds: Bounds,
    scale: f64,
    small_scale: f64,
    big_scale: f64,
    offset: Vec2,
    expanded: bool,
}

impl ViewportState {
    /// Creates an empty state for an image of the given displayed size.
    ///
    /// All scales stay zero until [`ViewportState::resize`] supplies a valid
    /// viewport size.
    #[must_use]
    pub fn new(image: Size) -> Self {
        Self {
            bounds: Bounds {
                viewport: Size::ZERO,
                image,
            },
            ..Self::default()
        }
    }

    /// Recomputes the scale bounds for a new viewport size.
    ///
    /// Resets `scale` to the fitted scale and leaves the expanded state.
    /// Degenerate sizes are ignored and the last valid bounds are retained.
    pub fn resize(&mut self, viewport: Size, magnification: f64) -> Repaint {
        let candidate = Bounds {
            viewport,
            image: self.bounds.image,
        };
        self.rederive(candidate, magnification)
    }

    /// Replaces the displayed image size and recomputes the scale bounds.
    ///
    /// Degenerate sizes are ignored and the last valid bounds are retained.
    pub fn set_image_size(&mut self, image: Size, magnification: f64) -> Repaint {
        if !is_positive_size(image) {
            return Repaint::Clean;
        }
        let candidate = Bounds {
            viewport: self.bounds.viewport,
            image,
        };
        if !candidate.is_valid() {
            // No viewport yet: remember the image size for the first resize.
            self.bounds.image = image;
            return Repaint::Clean;
        }
        self.rederive(candidate, magnification)
    }

    fn rederive(&mut self, candidate: Bounds, magnification: f64) -> Repaint {
        let Some((small, big)) = candidate.scales(magnification) else {
            log::debug!("ignoring degenerate bounds {candidate:?}");
            return Repaint::Clean;
        };
        log::debug!(
            "viewport {:?} image {:?}: small_scale={small} big_scale={big}",
            candidate.viewport,
            candidate.image
        );
        self.bounds = candidate;
        self.small_scale = small;
        self.big_scale = big;
        self.scale = small;
        self.expanded = false;
        self.offset = self.clamped(self.offset);
        Repaint::Dirty
    }

    /// Returns the current bounds.
    #[must_use]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Returns `true` once a valid viewport and image size have been applied.
    #[must_use]
    pub fn has_bounds(&self) -> bool {
        self.big_scale > 0.0
    }

    /// Returns the current scale.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Returns the fitted scale.
    #[must_use]
    pub fn small_scale(&self) -> f64 {
        self.small_scale
    }

    /// Returns the expanded scale.
    #[must_use]
    pub fn big_scale(&self) -> f64 {
        self.big_scale
    }

    /// Returns the pan offset.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Returns whether the toggle is in the expanded state.
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// How far the current scale has progressed from fitted to expanded, in `0..=1`.
    #[must_use]
    pub fn scale_fraction(&self) -> f64 {
        let span = self.big_scale - self.small_scale;
        if span <= 0.0 {
            return 0.0;
        }
        ((self.scale - self.small_scale) / span).clamp(0.0, 1.0)
    }

    /// Returns `true` if `scale` lies within `[small_scale, big_scale]`.
    #[must_use]
    pub fn accepts_scale(&self, scale: f64) -> bool {
        scale.is_finite() && scale >= self.small_scale && scale <= self.big_scale
    }

    /// Sets the scale, clamped into `[small_scale, big_scale]`.
    pub fn set_scale(&mut self, scale: f64) -> Repaint {
        if !scale.is_finite() || !self.has_bounds() {
            return Repaint::Clean;
        }
        let clamped = scale.clamp(self.small_scale, self.big_scale);
        let changed = clamped != self.scale;
        self.scale = clamped;
        Repaint::from_changed(changed)
    }

    /// Sets the pan offset without clamping.
    ///
    /// Used by the fling simulator, which enforces its own hard bounds.
    pub fn set_offset(&mut self, offset: Vec2) -> Repaint {
        if !offset.is_finite() {
            return Repaint::Clean;
        }
        let changed = offset != self.offset;
        self.offset = offset;
        Repaint::from_changed(changed)
    }

    /// Sets the pan offset after passing it through [`clamp_offset`].
    pub fn set_offset_clamped(&mut self, offset: Vec2) -> Repaint {
        let clamped = self.clamped(offset);
        self.set_offset(clamped)
    }

    /// Sets the expanded flag.
    pub fn set_expanded(&mut self, expanded: bool) -> Repaint {
        // The flag alone does not change the rendered frame.
        self.expanded = expanded;
        Repaint::Clean
    }

    /// Per-axis limits of the clamped offset at the expanded scale.
    #[must_use]
    pub fn offset_limits(&self) -> Vec2 {
        offset_limits(self.bounds.image, self.bounds.viewport, self.big_scale)
    }

    /// Offset that keeps `focus` (in viewport coordinates) anchored while
    /// zooming from the fitted to the expanded scale, already clamped.
    #[must_use]
    pub fn focus_offset(&self, focus: Point) -> Vec2 {
        if !self.has_bounds() {
            return Vec2::ZERO;
        }
        let from_center = focus - self.bounds.viewport_center();
        let factor = 1.0 - self.big_scale / self.small_scale;
        self.clamped(from_center * factor)
    }

    fn clamped(&self, offset: Vec2) -> Vec2 {
        clamp_offset(
            self.bounds.image,
            self.bounds.viewport,
            self.big_scale,
            offset,
        )
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size, Vec2};

    use super::{Bounds, Repaint, ViewportState};

    fn landscape() -> ViewportState {
        let mut state = ViewportState::new(Size::new(2000.0, 1000.0));
        let _ = state.resize(Size::new(1000.0, 1000.0), 1.5);
        state
    }

    #[test]
    fn wide_image_fits_width_and_expands_to_fill_height() {
        let state = landscape();
        assert_eq!(state.small_scale(), 0.5);
        assert_eq!(state.big_scale(), 1.5);
        assert_eq!(state.scale(), 0.5);
        assert!(!state.is_expanded());
    }

    #[test]
    fn tall_image_fits_height_and_expands_to_fill_width() {
        let bounds = Bounds {
            viewport: Size::new(1000.0, 1000.0),
            image: Size::new(500.0, 2000.0),
        };
        assert_eq!(bounds.scales(1.5), Some((0.5, 3.0)));
    }

    #[test]
    fn equal_aspect_expands_by_magnification() {
        let bounds = Bounds {
            viewport: Size::new(400.0, 300.0),
            image: Size::new(800.0, 600.0),
        };
        assert_eq!(bounds.scales(2.0), Some((0.5, 1.0)));
    }

    #[test]
    fn degenerate_resize_keeps_previous_bounds() {
        let mut state = landscape();
        let before = state.clone();

        assert_eq!(state.resize(Size::new(0.0, 1000.0), 1.5), Repaint::Clean);
        assert_eq!(state.resize(Size::new(-5.0, -5.0), 1.5), Repaint::Clean);
        assert_eq!(state.resize(Size::new(f64::NAN, 10.0), 1.5), Repaint::Clean);
        assert_eq!(state, before);
    }

    #[test]
    fn image_size_before_viewport_is_remembered() {
        let mut state = ViewportState::new(Size::ZERO);
        assert_eq!(
            state.set_image_size(Size::new(2000.0, 1000.0), 1.5),
            Repaint::Clean
        );
        assert!(!state.has_bounds());

        assert!(state.resize(Size::new(1000.0, 1000.0), 1.5).is_dirty());
        assert_eq!(state.small_scale(), 0.5);
    }

    #[test]
    fn set_scale_clamps_into_bounds() {
        let mut state = landscape();
        assert!(state.set_scale(10.0).is_dirty());
        assert_eq!(state.scale(), 1.5);
        assert_eq!(state.set_scale(10.0), Repaint::Clean);
        let _ = state.set_scale(0.01);
        assert_eq!(state.scale(), 0.5);
    }

    #[test]
    fn set_scale_without_bounds_is_ignored() {
        let mut state = ViewportState::new(Size::new(10.0, 10.0));
        assert_eq!(state.set_scale(1.0), Repaint::Clean);
        assert_eq!(state.scale(), 0.0);
    }

    #[test]
    fn focus_at_center_gives_zero_offset() {
        let state = landscape();
        assert_eq!(state.focus_offset(Point::new(500.0, 500.0)), Vec2::ZERO);
    }

    #[test]
    fn focus_offset_is_clamped() {
        let state = landscape();
        // (0 - 500) * (1 - 3) = 1000 on x; (0 - 500) * -2 = 1000 on y, clamped to 250.
        assert_eq!(
            state.focus_offset(Point::new(0.0, 0.0)),
            Vec2::new(1000.0, 250.0)
        );
    }

    #[test]
    fn scale_fraction_tracks_progress() {
        let mut state = landscape();
        assert_eq!(state.scale_fraction(), 0.0);
        let _ = state.set_scale(1.0);
        assert_eq!(state.scale_fraction(), 0.5);
        let _ = state.set_scale(1.5);
        assert_eq!(state.scale_fraction(), 1.0);
    }

    #[test]
    fn repaint_merges() {
        assert_eq!(Repaint::Clean | Repaint::Clean, Repaint::Clean);
        assert_eq!(Repaint::Clean | Repaint::Dirty, Repaint::Dirty);
        let mut r = Repaint::Dirty;
        r |= Repaint::Clean;
        assert!(r.is_dirty());
    }
}
