// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use crate::animation::Easing;

/// Default ratio between the expanded and the fitted scale.
pub const DEFAULT_MAGNIFICATION: f64 = 1.5;

/// Default duration of the fitted ↔ expanded toggle animation.
pub const DEFAULT_ANIMATION_DURATION: Duration = Duration::from_millis(300);

/// Tunables for a [`crate::PhotoView`].
///
/// Setters ignore values that would break the scale invariants (for example a
/// magnification that is not strictly greater than `1.0`), keeping the
/// previous value instead.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PhotoViewConfig {
    magnification: f64,
    animation_duration: Duration,
    easing: Easing,
    fling: FlingConfig,
}

impl Default for PhotoViewConfig {
    fn default() -> Self {
        Self {
            magnification: DEFAULT_MAGNIFICATION,
            animation_duration: DEFAULT_ANIMATION_DURATION,
            easing: Easing::default(),
            fling: FlingConfig::default(),
        }
    }
}

impl PhotoViewConfig {
    /// Sets the expanded/fitted magnification factor.
    ///
    /// The expanded scale is computed on the axis complementary to the one that
    /// constrains the fitted scale, then multiplied by this factor. Values that
    /// are not finite or not greater than `1.0` are ignored.
    #[must_use]
    pub fn with_magnification(mut self, magnification: f64) -> Self {
        if magnification.is_finite() && magnification > 1.0 {
            self.magnification = magnification;
        }
        self
    }

    /// Sets the duration of the toggle animation.
    ///
    /// A zero duration makes the toggle jump to its target on the next frame.
    #[must_use]
    pub fn with_animation_duration(mut self, duration: Duration) -> Self {
        self.animation_duration = duration;
        self
    }

    /// Sets the easing curve used by the toggle animation.
    #[must_use]
    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Replaces the fling physics parameters.
    #[must_use]
    pub fn with_fling(mut self, fling: FlingConfig) -> Self {
        self.fling = fling;
        self
    }

    /// Returns the magnification factor.
    #[must_use]
    pub fn magnification(&self) -> f64 {
        self.magnification
    }

    /// Returns the toggle animation duration.
    #[must_use]
    pub fn animation_duration(&self) -> Duration {
        self.animation_duration
    }

    /// Returns the toggle animation easing curve.
    #[must_use]
    pub fn easing(&self) -> Easing {
        self.easing
    }

    /// Returns the fling physics parameters.
    #[must_use]
    pub fn fling(&self) -> FlingConfig {
        self.fling
    }
}

/// Physics parameters for [`crate::fling::FlingSimulator`].
///
/// Velocity decays as `v(t) = v0 * exp(-t / time_constant)`; an axis stops once
/// its speed drops below `stop_velocity` (in pixels per second).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlingConfig {
    time_constant: f64,
    stop_velocity: f64,
}

impl Default for FlingConfig {
    fn default() -> Self {
        Self {
            time_constant: 0.325,
            stop_velocity: 5.0,
        }
    }
}

impl FlingConfig {
    /// Sets the decay time constant in seconds. Non-positive values are ignored.
    #[must_use]
    pub fn with_time_constant(mut self, seconds: f64) -> Self {
        if seconds.is_finite() && seconds > 0.0 {
            self.time_constant = seconds;
        }
        self
    }

    /// Sets the stopping threshold in pixels per second. Non-positive values are ignored.
    #[must_use]
    pub fn with_stop_velocity(mut self, velocity: f64) -> Self {
        if velocity.is_finite() && velocity > 0.0 {
            self.stop_velocity = velocity;
        }
        self
    }

    /// Returns the decay time constant in seconds.
    #[must_use]
    pub fn time_constant(&self) -> f64 {
        self.time_constant
    }

    /// Returns the stopping threshold in pixels per second.
    #[must_use]
    pub fn stop_velocity(&self) -> f64 {
        self.stop_velocity
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use super::{FlingConfig, PhotoViewConfig};

    #[test]
    fn invalid_magnification_is_ignored() {
        let config = PhotoViewConfig::default()
            .with_magnification(1.0)
            .with_magnification(-3.0)
            .with_magnification(f64::NAN);
        assert_eq!(config.magnification(), 1.5);

        let config = config.with_magnification(2.0);
        assert_eq!(config.magnification(), 2.0);
    }

    #[test]
    fn fling_setters_keep_positive_values() {
        let fling = FlingConfig::default()
            .with_time_constant(0.0)
            .with_stop_velocity(-1.0);
        assert_eq!(fling, FlingConfig::default());

        let fling = fling.with_time_constant(0.5).with_stop_velocity(20.0);
        assert_eq!(fling.time_constant(), 0.5);
        assert_eq!(fling.stop_velocity(), 20.0);
    }

    #[test]
    fn zero_duration_is_allowed() {
        let config = PhotoViewConfig::default().with_animation_duration(Duration::ZERO);
        assert_eq!(config.animation_duration(), Duration::ZERO);
    }
}
