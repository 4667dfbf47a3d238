// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fling deceleration after a release with velocity.
//!
//! ## Model
//!
//! Each axis decays exponentially: `v(t) = v0 * exp(-t / τ)`, which integrates
//! to `x(t) = x0 + v0 * τ * (1 - exp(-t / τ))`. An axis stops when its speed
//! drops below the configured stop velocity, at
//! `t_stop = τ * ln(|v0| / v_stop)`, or when it reaches one of its hard bounds,
//! where it stays pinned. The trajectory is evaluated in closed form at each
//! frame timestamp, so the result does not depend on the frame rate.
//!
//! ## Scheduling
//!
//! [`FlingSimulator`] owns a single continuation flag. [`FlingSimulator::tick`]
//! reports whether another frame is wanted; [`FlingSimulator::cancel`] clears
//! the flag so a pending tick does nothing. Starting a new fling replaces the
//! previous trajectory rather than adding a second continuation.

use core::f64::consts::E;
use core::time::Duration;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `ln` and `powf`
use kurbo::Vec2;

use crate::config::FlingConfig;
use crate::state::{FrameTick, ViewportState};

#[derive(Clone, Copy, Debug, PartialEq)]
struct AxisTrajectory {
    start: f64,
    velocity: f64,
    min: f64,
    max: f64,
    /// Seconds until the velocity decays below the stop threshold.
    stop_time: f64,
}

impl AxisTrajectory {
    fn new(start: f64, velocity: f64, limit: f64, config: &FlingConfig) -> Self {
        let speed = velocity.abs();
        let stop_time = if speed > config.stop_velocity() {
            config.time_constant() * (speed / config.stop_velocity()).ln()
        } else {
            0.0
        };
        Self {
            start: start.clamp(-limit, limit),
            velocity,
            min: -limit,
            max: limit,
            stop_time,
        }
    }

    /// Position at `t` seconds, and whether the axis has come to rest.
    fn sample(&self, t: f64, time_constant: f64) -> (f64, bool) {
        let t = t.min(self.stop_time);
        let travel = self.velocity * time_constant * (1.0 - E.powf(-t / time_constant));
        let raw = self.start + travel;
        let pos = raw.clamp(self.min, self.max);
        let pinned = raw != pos;
        (pos, pinned || t >= self.stop_time)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Trajectory {
    x: AxisTrajectory,
    y: AxisTrajectory,
    started_at: Option<Duration>,
}

/// Cancelable, bounded deceleration simulation for the pan offset.
#[derive(Clone, Debug, Default)]
pub struct FlingSimulator {
    config: FlingConfig,
    trajectory: Option<Trajectory>,
    scheduled: bool,
}

impl FlingSimulator {
    /// Creates an idle simulator using the given physics parameters.
    #[must_use]
    pub fn new(config: FlingConfig) -> Self {
        Self {
            config,
            trajectory: None,
            scheduled: false,
        }
    }

    /// Starts a fling from `position` with `velocity` (pixels per second).
    ///
    /// `limits` are the per-axis hard bounds: the offset stays within
    /// `[-limits, limits]` for the whole trajectory. Returns `false` and stays
    /// idle for a zero or non-finite velocity.
    pub fn start(&mut self, position: Vec2, velocity: Vec2, limits: Vec2) -> bool {
        if !velocity.is_finite() || !position.is_finite() || velocity == Vec2::ZERO {
            return false;
        }
        let limits = Vec2::new(limits.x.max(0.0), limits.y.max(0.0));
        log::debug!("fling from {position:?} at {velocity:?} px/s within ±{limits:?}");
        self.trajectory = Some(Trajectory {
            x: AxisTrajectory::new(position.x, velocity.x, limits.x, &self.config),
            y: AxisTrajectory::new(position.y, velocity.y, limits.y, &self.config),
            started_at: None,
        });
        self.scheduled = true;
        true
    }

    /// Clears the continuation flag; the next tick becomes a no-op.
    pub fn cancel(&mut self) {
        if self.scheduled {
            log::debug!("fling canceled");
        }
        self.scheduled = false;
        self.trajectory = None;
    }

    /// Returns `true` while a trajectory is scheduled to run on the next frame.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.scheduled
    }

    /// Offset at which the running fling will come to rest.
    #[must_use]
    pub fn final_position(&self) -> Option<Vec2> {
        let trajectory = self.trajectory.as_ref().filter(|_| self.scheduled)?;
        let tau = self.config.time_constant();
        let (x, _) = trajectory.x.sample(trajectory.x.stop_time, tau);
        let (y, _) = trajectory.y.sample(trajectory.y.stop_time, tau);
        Some(Vec2::new(x, y))
    }

    /// Advances the fling to frame timestamp `now`, writing the offset into `state`.
    ///
    /// The clock is latched on the first tick after [`FlingSimulator::start`].
    pub fn tick(&mut self, now: Duration, state: &mut ViewportState) -> FrameTick {
        if !self.scheduled {
            return FrameTick::IDLE;
        }
        let Some(trajectory) = self.trajectory.as_mut() else {
            self.scheduled = false;
            return FrameTick::IDLE;
        };
        let started_at = *trajectory.started_at.get_or_insert(now);
        let t = now.saturating_sub(started_at).as_secs_f64();
        let tau = self.config.time_constant();
        let (x, x_done) = trajectory.x.sample(t, tau);
        let (y, y_done) = trajectory.y.sample(t, tau);
        let repaint = state.set_offset(Vec2::new(x, y));
        log::trace!("fling t={t:.3}s offset=({x:.1}, {y:.1})");

        if x_done && y_done {
            log::debug!("fling settled at ({x:.1}, {y:.1}) after {t:.3}s");
            self.scheduled = false;
            self.trajectory = None;
        }
        FrameTick {
            repaint,
            scheduled: self.scheduled,
        }
    }
}

#[cfg(test)]
mod tests {
    use core::time::Duration;

    use kurbo::{Size, Vec2};

    use super::FlingSimulator;
    use crate::config::FlingConfig;
    use crate::state::ViewportState;

    const FRAME: Duration = Duration::from_micros(16_667);

    fn expanded_state() -> ViewportState {
        let mut state = ViewportState::new(Size::new(2000.0, 1000.0));
        let _ = state.resize(Size::new(1000.0, 1000.0), 1.5);
        let _ = state.set_scale(1.5);
        let _ = state.set_expanded(true);
        state
    }

    /// Runs the simulator frame by frame and returns the number of frames.
    fn run_to_rest(fling: &mut FlingSimulator, state: &mut ViewportState) -> u32 {
        let mut now = Duration::from_secs(10);
        let mut frames = 0;
        while fling.tick(now, state).scheduled {
            now += FRAME;
            frames += 1;
            assert!(frames < 10_000, "fling did not terminate");
        }
        frames
    }

    #[test]
    fn zero_velocity_does_not_start() {
        let mut fling = FlingSimulator::default();
        assert!(!fling.start(Vec2::ZERO, Vec2::ZERO, Vec2::new(100.0, 100.0)));
        assert!(!fling.is_running());
        assert!(!fling.start(Vec2::ZERO, Vec2::new(f64::NAN, 1.0), Vec2::new(100.0, 100.0)));
    }

    #[test]
    fn decelerates_and_stops_inside_bounds() {
        let mut state = expanded_state();
        let limits = state.offset_limits();
        let mut fling = FlingSimulator::default();
        assert!(fling.start(state.offset(), Vec2::new(800.0, -100.0), limits));

        let frames = run_to_rest(&mut fling, &mut state);
        assert!(frames > 1);
        let offset = state.offset();
        assert!(offset.x > 0.0, "moved along the velocity: {offset:?}");
        assert!(offset.y < 0.0, "moved along the velocity: {offset:?}");
        assert!(offset.x.abs() <= limits.x);
        assert!(offset.y.abs() <= limits.y);
        // Total travel is bounded by v0 * τ.
        assert!(offset.x <= 800.0 * FlingConfig::default().time_constant());
    }

    #[test]
    fn huge_velocity_pins_to_bounds() {
        let mut state = expanded_state();
        let limits = state.offset_limits();
        let mut fling = FlingSimulator::default();
        fling.start(Vec2::ZERO, Vec2::new(-1e7, 1e7), limits);

        let frames = run_to_rest(&mut fling, &mut state);
        assert_eq!(state.offset(), Vec2::new(-limits.x, limits.y));
        // Hitting both bounds ends the simulation well before the velocity decays.
        assert!(frames < 30, "took {frames} frames");
    }

    #[test]
    fn final_position_matches_resting_offset() {
        let mut state = expanded_state();
        let mut fling = FlingSimulator::default();
        fling.start(Vec2::new(10.0, 0.0), Vec2::new(-1500.0, 300.0), state.offset_limits());
        let expected = fling.final_position().unwrap();

        run_to_rest(&mut fling, &mut state);
        assert!((state.offset() - expected).hypot() < 1e-9);
        assert_eq!(fling.final_position(), None);
    }

    #[test]
    fn cancel_prevents_the_next_tick() {
        let mut state = expanded_state();
        let mut fling = FlingSimulator::default();
        fling.start(Vec2::ZERO, Vec2::new(2000.0, 0.0), state.offset_limits());
        let first = fling.tick(Duration::from_secs(1), &mut state);
        assert!(first.scheduled);
        let moved = fling.tick(Duration::from_secs(1) + FRAME, &mut state);
        assert!(moved.repaint.is_dirty());
        let offset = state.offset();

        fling.cancel();
        assert!(!fling.is_running());
        let after = fling.tick(Duration::from_secs(2), &mut state);
        assert!(!after.scheduled);
        assert!(!after.repaint.is_dirty());
        assert_eq!(state.offset(), offset);
    }

    #[test]
    fn restart_replaces_the_trajectory() {
        let mut state = expanded_state();
        let limits = state.offset_limits();
        let mut fling = FlingSimulator::default();
        fling.start(Vec2::ZERO, Vec2::new(2000.0, 0.0), limits);
        let _ = fling.tick(Duration::from_secs(1), &mut state);

        fling.start(state.offset(), Vec2::new(-2000.0, 0.0), limits);
        assert!(fling.is_running());
        run_to_rest(&mut fling, &mut state);
        assert!(state.offset().x < 0.0);
    }

    #[test]
    fn start_outside_bounds_is_pulled_in() {
        let mut state = expanded_state();
        let limits = state.offset_limits();
        let mut fling = FlingSimulator::default();
        fling.start(Vec2::new(5000.0, 0.0), Vec2::new(0.0, 10.0), limits);
        run_to_rest(&mut fling, &mut state);
        assert_eq!(state.offset().x, limits.x);
    }
}
