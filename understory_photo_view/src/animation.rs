// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame-driven scalar animation used for the fitted ↔ expanded toggle.
//!
//! A [`ScaleAnimation`] holds `{from, to, duration, easing}` and is advanced by
//! the host's frame timer through [`ScaleAnimation::tick`]. The start time is
//! latched on the first tick, so the animation can be created from an input
//! event that carries no timestamp.
//!
//! ```
//! use core::time::Duration;
//! use understory_photo_view::animation::{Easing, ScaleAnimation};
//!
//! let mut anim = ScaleAnimation::new(0.5, 1.5, Duration::from_millis(100), Easing::Linear);
//! assert_eq!(anim.tick(Duration::from_millis(1_000)).value, 0.5);
//! let halfway = anim.tick(Duration::from_millis(1_050));
//! assert!((halfway.value - 1.0).abs() < 1e-9);
//! assert!(anim.tick(Duration::from_millis(1_100)).finished);
//! ```

use core::f64::consts::PI;
use core::time::Duration;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `cos`

/// Monotonic interpolation curve mapping linear progress in `0..=1` to eased progress.
///
/// Every curve is point-symmetric around `(0.5, 0.5)`, which is what lets
/// [`ScaleAnimation::reversed`] continue from the current value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Easing {
    /// Constant speed.
    Linear,
    /// Cosine ease-in/ease-out: starts and ends slowly.
    #[default]
    AccelerateDecelerate,
    /// Cubic Hermite `3t² − 2t³`.
    SmoothStep,
}

impl Easing {
    /// Maps linear progress `t` (clamped to `0..=1`) through the curve.
    #[must_use]
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Self::Linear => t,
            Self::AccelerateDecelerate => 0.5 - (PI * t).cos() / 2.0,
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
        }
    }
}

/// One step of a [`ScaleAnimation`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnimationSample {
    /// Interpolated value for this frame.
    pub value: f64,
    /// `true` once the animation has reached `to`; it should not be ticked again.
    pub finished: bool,
}

/// Animation task from one scale to another.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaleAnimation {
    from: f64,
    to: f64,
    duration: Duration,
    easing: Easing,
    /// Linear progress to resume from when the start time is latched.
    resume_progress: f64,
    started_at: Option<Duration>,
    progress: f64,
}

impl ScaleAnimation {
    /// Creates an animation from `from` to `to`. The clock starts at the first tick.
    #[must_use]
    pub fn new(from: f64, to: f64, duration: Duration, easing: Easing) -> Self {
        Self {
            from,
            to,
            duration,
            easing,
            resume_progress: 0.0,
            started_at: None,
            progress: 0.0,
        }
    }

    /// Start value.
    #[must_use]
    pub fn from(&self) -> f64 {
        self.from
    }

    /// Target value.
    #[must_use]
    pub fn to(&self) -> f64 {
        self.to
    }

    /// Linear time progress in `0..=1` as of the last tick.
    #[must_use]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Value at the last tick (or at the start, before the first one).
    #[must_use]
    pub fn current_value(&self) -> f64 {
        self.value_at(self.progress)
    }

    /// Returns the same animation played backwards from its current position.
    ///
    /// `from` and `to` are swapped and progress is mirrored, so the value keeps
    /// going from where it was. The clock is re-latched on the next tick.
    #[must_use]
    pub fn reversed(self) -> Self {
        let mirrored = 1.0 - self.progress;
        Self {
            from: self.to,
            to: self.from,
            duration: self.duration,
            easing: self.easing,
            resume_progress: mirrored,
            started_at: None,
            progress: mirrored,
        }
    }

    /// Advances the animation to the frame timestamp `now`.
    ///
    /// `now` must come from a monotonic clock; a timestamp earlier than the
    /// latched start is treated as the start.
    pub fn tick(&mut self, now: Duration) -> AnimationSample {
        let started_at = *self.started_at.get_or_insert(now);
        self.progress = if self.duration.is_zero() {
            1.0
        } else {
            let elapsed = now.saturating_sub(started_at);
            (self.resume_progress + elapsed.as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
        };
        let finished = self.progress >= 1.0;
        AnimationSample {
            value: if finished {
                self.to
            } else {
                self.value_at(self.progress)
            },
            finished,
        }
    }

    fn value_at(&self, progress: f64) -> f64 {
        self.from + (self.to - self.from) * self.easing.apply(progress)
    }
}
