// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fitted ↔ expanded toggle and live pinch scaling.
//!
//! Double tap flips the expanded flag and animates toward the matching end of
//! the scale range, anchoring the zoom on the tapped point. Pinch updates scale
//! incrementally and are rejected, not clamped, when they would leave
//! `[small_scale, big_scale]`.
//!
//! A pinch never touches the expanded flag. After pinching to any scale, the
//! next double tap toggles the flag and animates from wherever the pinch left
//! the scale.

use core::time::Duration;

use kurbo::Point;

use crate::animation::{Easing, ScaleAnimation};
use crate::config::PhotoViewConfig;
use crate::gesture::Handled;
use crate::state::{FrameTick, Repaint, ViewportState};

/// Owns the toggle animation and applies pinch scale updates.
#[derive(Clone, Debug, Default)]
pub struct ScaleController {
    duration: Duration,
    easing: Easing,
    animation: Option<ScaleAnimation>,
}

impl ScaleController {
    /// Creates a controller using the animation settings from `config`.
    #[must_use]
    pub fn new(config: &PhotoViewConfig) -> Self {
        Self {
            duration: config.animation_duration(),
            easing: config.easing(),
            animation: None,
        }
    }

    /// The running toggle animation, if any.
    #[must_use]
    pub fn animation(&self) -> Option<&ScaleAnimation> {
        self.animation.as_ref()
    }

    /// Returns `true` while a toggle animation is scheduled.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animation.is_some()
    }

    /// Drops the running toggle animation, leaving the scale where it is.
    pub fn cancel(&mut self) {
        if self.animation.take().is_some() {
            log::debug!("scale animation canceled");
        }
    }

    /// Toggles between the fitted and expanded state.
    ///
    /// Entering the expanded state re-anchors the offset on `position`. A toggle
    /// that interrupts a running animation reverses it in place when that
    /// animation started at the new target; otherwise a fresh animation runs
    /// from the current scale.
    pub fn on_double_tap(&mut self, state: &mut ViewportState, position: Point) -> Handled {
        if !state.has_bounds() {
            return Handled::unconsumed();
        }
        let expanded = !state.is_expanded();
        let mut repaint = state.set_expanded(expanded);
        if expanded {
            repaint |= state.set_offset(state.focus_offset(position));
        }
        let target = if expanded {
            state.big_scale()
        } else {
            state.small_scale()
        };
        // Reversal only lands on `target` when the running animation started there.
        let animation = match self.animation.take() {
            Some(running) if running.to() != target && running.from() == target => {
                running.reversed()
            }
            _ => ScaleAnimation::new(state.scale(), target, self.duration, self.easing),
        };
        log::debug!(
            "double tap at {position:?}: expanded={expanded}, scale {} -> {target}",
            state.scale()
        );
        self.animation = Some(animation);
        Handled::consumed(repaint)
    }

    /// Starts a pinch: cancels the toggle animation and anchors the offset on `focus`.
    pub fn on_pinch_begin(&mut self, state: &mut ViewportState, focus: Point) -> Handled {
        self.cancel();
        if !state.has_bounds() {
            return Handled::consumed(Repaint::Clean);
        }
        Handled::consumed(state.set_offset(state.focus_offset(focus)))
    }

    /// Applies an incremental pinch `factor` to the current scale.
    ///
    /// The update is rejected (unconsumed, scale unchanged) when the resulting
    /// scale would fall outside `[small_scale, big_scale]`.
    pub fn on_pinch_update(&mut self, state: &mut ViewportState, factor: f64) -> Handled {
        if !factor.is_finite() || factor <= 0.0 || !state.has_bounds() {
            return Handled::unconsumed();
        }
        let tentative = state.scale() * factor;
        if !state.accepts_scale(tentative) {
            log::trace!("pinch factor {factor} rejected at scale {}", state.scale());
            return Handled::unconsumed();
        }
        Handled::consumed(state.set_scale(tentative))
    }

    /// Ends a pinch. The last scale becomes the resting scale.
    pub fn on_pinch_end(&mut self, state: &ViewportState) -> Handled {
        log::debug!(
            "pinch ended at scale {} (expanded={})",
            state.scale(),
            state.is_expanded()
        );
        Handled::consumed(Repaint::Clean)
    }

    /// Advances the toggle animation to `now`, writing the scale into `state`.
    pub fn tick(&mut self, now: Duration, state: &mut ViewportState) -> FrameTick {
        let Some(animation) = self.animation.as_mut() else {
            return FrameTick::IDLE;
        };
        let sample = animation.tick(now);
        let repaint = state.set_scale(sample.value);
        log::trace!("scale animation value={}", sample.value);
        if sample.finished {
            self.animation = None;
        }
        FrameTick {
            repaint,
            scheduled: !sample.finished,
        }
    }
}
