// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Offset clamping for the expanded image.
//!
//! The offset is the displacement of the image center from the viewport
//! center. At the expanded scale, an offset of magnitude up to
//! `(image_dim * big_scale - viewport_dim) / 2` per axis keeps the image edge
//! at or beyond the viewport edge, so no empty space is revealed.

use kurbo::{Size, Vec2};

/// Returns the per-axis maximum offset magnitude for the expanded image.
///
/// Each component is `(image_dim * big_scale - viewport_dim) / 2`, floored at
/// zero when the scaled image does not overflow the viewport on that axis.
#[must_use]
pub fn offset_limits(image: Size, viewport: Size, big_scale: f64) -> Vec2 {
    Vec2::new(
        axis_limit(image.width, viewport.width, big_scale),
        axis_limit(image.height, viewport.height, big_scale),
    )
}

/// Clamps `offset` so the expanded image never reveals empty space.
///
/// This function is idempotent: clamping an already clamped offset returns it
/// unchanged.
#[must_use]
pub fn clamp_offset(image: Size, viewport: Size, big_scale: f64, offset: Vec2) -> Vec2 {
    let limits = offset_limits(image, viewport, big_scale);
    Vec2::new(
        clamp_axis(offset.x, limits.x),
        clamp_axis(offset.y, limits.y),
    )
}

fn axis_limit(image_dim: f64, viewport_dim: f64, big_scale: f64) -> f64 {
    let overflow = (image_dim * big_scale - viewport_dim) / 2.0;
    if overflow.is_finite() && overflow > 0.0 {
        overflow
    } else {
        0.0
    }
}

fn clamp_axis(value: f64, limit: f64) -> f64 {
    if limit <= 0.0 || !value.is_finite() {
        // Collapsed axis; also scrubs NaN so it cannot leak into rendering.
        return 0.0;
    }
    value.clamp(-limit, limit)
}
