// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture events and the pinch-versus-single-pointer arbiter.
//!
//! Single-pointer gestures (tap, drag, fling) are ambiguous until they
//! complete, while a pinch is unambiguous as soon as a second contact lands.
//! [`GestureArbiter`] therefore lets a pinch take over exclusively: from
//! [`GestureEvent::PinchBegin`] until [`GestureEvent::PinchEnd`], single-pointer
//! events are swallowed instead of being routed.
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use understory_photo_view::gesture::{ArbiterState, GestureArbiter, GestureEvent, Route};
//!
//! let mut arbiter = GestureArbiter::default();
//! assert_eq!(arbiter.route(&GestureEvent::PointerDown), Route::SinglePointer);
//!
//! let begin = GestureEvent::PinchBegin { focus: Point::new(10.0, 10.0) };
//! assert_eq!(arbiter.route(&begin), Route::Pinch);
//! assert_eq!(arbiter.state(), ArbiterState::PinchActive);
//!
//! let drag = GestureEvent::Drag { delta: Vec2::new(3.0, 0.0) };
//! assert_eq!(arbiter.route(&drag), Route::Swallowed);
//!
//! assert_eq!(arbiter.route(&GestureEvent::PinchEnd), Route::Pinch);
//! assert_eq!(arbiter.route(&drag), Route::SinglePointer);
//! ```

use kurbo::{Point, Vec2};

use crate::state::Repaint;

/// Result of handing one event to a controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Handled {
    /// Whether the event was consumed. Unconsumed events may be intercepted
    /// by an outer container (for example swipe-to-dismiss).
    pub consumed: bool,
    /// Whether handling the event changed the viewport state.
    pub repaint: Repaint,
}

impl Handled {
    /// The event was consumed, with the given repaint signal.
    pub fn consumed(repaint: Repaint) -> Self {
        Self {
            consumed: true,
            repaint,
        }
    }

    /// The event was left for someone else; nothing changed.
    #[must_use]
    pub fn unconsumed() -> Self {
        Self::default()
    }
}

/// A recognized gesture, already disambiguated from raw touch samples by the platform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    /// A pointer went down; interrupts any running fling.
    PointerDown,
    /// Single-pointer scroll. `delta` is the distance scrolled since the last
    /// event, i.e. previous minus current pointer position.
    Drag {
        /// Scroll distance in view pixels.
        delta: Vec2,
    },
    /// Single-pointer release with velocity, in view pixels per second.
    FlingStart {
        /// Release velocity.
        velocity: Vec2,
    },
    /// A second contact was detected; `focus` is the midpoint between contacts.
    PinchBegin {
        /// Pinch focus in view coordinates.
        focus: Point,
    },
    /// Pinch span changed by `factor` relative to the previous update.
    PinchUpdate {
        /// Incremental scale ratio versus the previous frame.
        factor: f64,
    },
    /// All but one contact was released.
    PinchEnd,
    /// Double tap at `position`.
    DoubleTap {
        /// Tap position in view coordinates.
        position: Point,
    },
}

impl GestureEvent {
    /// Returns `true` for the pinch family of events.
    #[must_use]
    pub fn is_pinch(&self) -> bool {
        matches!(
            self,
            Self::PinchBegin { .. } | Self::PinchUpdate { .. } | Self::PinchEnd
        )
    }
}

/// Which recognizer currently owns event dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ArbiterState {
    /// Tap, drag and fling events are routed.
    #[default]
    SinglePointerActive,
    /// A pinch owns dispatch; single-pointer events are swallowed.
    PinchActive,
}

/// Routing decision for one event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    /// Hand the event to the pinch handlers.
    Pinch,
    /// Hand the event to the tap/drag/fling handlers.
    SinglePointer,
    /// A single-pointer event arrived mid-pinch; it is consumed without effect.
    Swallowed,
    /// A pinch continuation arrived without a pinch in progress; it is dropped unconsumed.
    Ignored,
}

/// Two-state dispatcher resolving pinch versus single-pointer ownership.
#[derive(Clone, Copy, Debug, Default)]
pub struct GestureArbiter {
    state: ArbiterState,
}

impl GestureArbiter {
    /// Creates an arbiter in [`ArbiterState::SinglePointerActive`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current owner of dispatch.
    #[must_use]
    pub fn state(&self) -> ArbiterState {
        self.state
    }

    /// Returns `true` while a pinch owns dispatch.
    #[must_use]
    pub fn is_pinching(&self) -> bool {
        self.state == ArbiterState::PinchActive
    }

    /// Decides where `event` goes, updating the state on pinch begin/end.
    pub fn route(&mut self, event: &GestureEvent) -> Route {
        match (self.state, event) {
            (_, GestureEvent::PinchBegin { .. }) => {
                self.transition(ArbiterState::PinchActive);
                Route::Pinch
            }
            (ArbiterState::PinchActive, GestureEvent::PinchUpdate { .. }) => Route::Pinch,
            (ArbiterState::PinchActive, GestureEvent::PinchEnd) => {
                self.transition(ArbiterState::SinglePointerActive);
                Route::Pinch
            }
            (ArbiterState::SinglePointerActive, e) if e.is_pinch() => Route::Ignored,
            (ArbiterState::PinchActive, _) => Route::Swallowed,
            (ArbiterState::SinglePointerActive, _) => Route::SinglePointer,
        }
    }

    /// Forces single-pointer dispatch, e.g. when the host cancels the touch stream.
    pub fn reset(&mut self) {
        self.transition(ArbiterState::SinglePointerActive);
    }

    fn transition(&mut self, next: ArbiterState) {
        if self.state != next {
            log::debug!("gesture arbiter {:?} -> {next:?}", self.state);
            self.state = next;
        }
    }
}
