// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Vec2};

use crate::state::ViewportState;

/// Read-only snapshot of how the render pass should draw the image.
///
/// The render pass translates by [`RenderTransform::translation`], scales by
/// [`RenderTransform::scale`] about [`RenderTransform::center`], and draws the
/// image into [`RenderTransform::image_rect`] (its unscaled, centered bounds).
/// [`RenderTransform::to_affine`] composes the first two steps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderTransform {
    /// Offset scaled by the fitted → expanded progress.
    pub translation: Vec2,
    /// Uniform scale factor.
    pub scale: f64,
    /// Viewport center, the pivot of the scale.
    pub center: Point,
    /// Image bounds at scale `1.0`, centered in the viewport.
    pub image_rect: Rect,
}

impl RenderTransform {
    /// Builds the snapshot for `state`.
    ///
    /// The offset is multiplied by the scale fraction, so it has no effect at
    /// the fitted scale and full effect at the expanded scale.
    #[must_use]
    pub fn from_state(state: &ViewportState) -> Self {
        let bounds = state.bounds();
        let center = bounds.viewport_center();
        let half = Vec2::new(bounds.image.width / 2.0, bounds.image.height / 2.0);
        Self {
            translation: state.offset() * state.scale_fraction(),
            scale: state.scale(),
            center,
            image_rect: Rect::from_points(center - half, center + half),
        }
    }

    /// Image-to-view transform: `translate(translation) * scale_about(scale, center)`.
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        Affine::translate(self.translation) * Affine::scale_about(self.scale, self.center)
    }

    /// Where the image lands in view coordinates.
    #[must_use]
    pub fn image_view_rect(&self) -> Rect {
        self.to_affine().transform_rect_bbox(self.image_rect)
    }
}
