// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use kurbo::{Size, Vec2};

use crate::config::PhotoViewConfig;
use crate::fling::FlingSimulator;
use crate::gesture::{ArbiterState, GestureArbiter, GestureEvent, Handled, Route};
use crate::pan::PanController;
use crate::scale::ScaleController;
use crate::state::{Repaint, ViewportState};
use crate::transform::RenderTransform;

/// Capabilities a host view system drives on a viewport widget.
///
/// This stands in for platform view lifecycle callbacks: the host forwards
/// size changes and recognized gestures, and asks for a transform when it
/// draws.
pub trait ViewportWidget {
    /// The viewport was resized.
    fn on_resize(&mut self, size: Size) -> Repaint;

    /// Transform to draw the current frame with.
    fn on_draw(&self) -> RenderTransform;

    /// Handles one gesture. Returns whether it was consumed; unconsumed events
    /// may be handed to an outer container.
    fn on_gesture_event(&mut self, event: GestureEvent) -> bool;
}

/// Result of one [`PhotoView::on_frame`] call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameStatus {
    /// The state changed since the last frame and should be redrawn.
    pub redraw: bool,
    /// An animation or fling wants another frame.
    pub wants_frame: bool,
}

/// Zoomable single-image viewport.
///
/// `PhotoView` owns the [`ViewportState`] and the controllers that mutate it.
/// Controllers never hold on to the state; each call hands them `&mut` access.
///
/// Redraw requests are coalesced: mutations set a dirty flag which the host
/// reads (and clears) with [`PhotoView::take_redraw`] or through
/// [`PhotoView::on_frame`].
#[derive(Clone, Debug)]
pub struct PhotoView {
    config: PhotoViewConfig,
    state: ViewportState,
    arbiter: GestureArbiter,
    scale: ScaleController,
    pan: PanController,
    fling: FlingSimulator,
    needs_redraw: bool,
}

impl PhotoView {
    /// Creates a view for an image with the given displayed size.
    ///
    /// The view is inert until the first [`ViewportWidget::on_resize`] with a
    /// valid size.
    #[must_use]
    pub fn new(image_size: Size, config: PhotoViewConfig) -> Self {
        Self {
            config,
            state: ViewportState::new(image_size),
            arbiter: GestureArbiter::new(),
            scale: ScaleController::new(&config),
            pan: PanController,
            fling: FlingSimulator::new(config.fling()),
            needs_redraw: false,
        }
    }

    /// Replaces the displayed image size, e.g. after the loader downsampled it.
    ///
    /// Running animations and flings are canceled when the bounds change.
    pub fn set_image_size(&mut self, size: Size) -> Repaint {
        let repaint = self.state.set_image_size(size, self.config.magnification());
        if repaint.is_dirty() {
            self.interrupt();
        }
        self.mark(repaint)
    }

    /// The viewport state.
    #[must_use]
    pub fn state(&self) -> &ViewportState {
        &self.state
    }

    /// The configuration the view was created with.
    #[must_use]
    pub fn config(&self) -> &PhotoViewConfig {
        &self.config
    }

    /// Returns whether the toggle is in the expanded state.
    #[must_use]
    pub fn is_expanded(&self) -> bool {
        self.state.is_expanded()
    }

    /// Returns `true` while the toggle animation runs.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.scale.is_animating()
    }

    /// Returns `true` while a fling runs.
    #[must_use]
    pub fn is_flinging(&self) -> bool {
        self.fling.is_running()
    }

    /// Current dispatch owner.
    #[must_use]
    pub fn arbiter_state(&self) -> ArbiterState {
        self.arbiter.state()
    }

    /// Returns `true` if the host should call [`PhotoView::on_frame`] on the next refresh.
    #[must_use]
    pub fn wants_frame(&self) -> bool {
        self.is_animating() || self.is_flinging()
    }

    /// Returns `true` if a redraw was requested since the last [`PhotoView::take_redraw`].
    #[must_use]
    pub fn needs_redraw(&self) -> bool {
        self.needs_redraw
    }

    /// Returns and clears the coalesced redraw request.
    pub fn take_redraw(&mut self) -> bool {
        core::mem::take(&mut self.needs_redraw)
    }

    /// Advances animation and fling to the frame timestamp `now`.
    ///
    /// `now` must come from a monotonic clock. The returned
    /// [`FrameStatus::redraw`] also clears the pending redraw request.
    pub fn on_frame(&mut self, now: Duration) -> FrameStatus {
        let scale = self.scale.tick(now, &mut self.state);
        let fling = self.fling.tick(now, &mut self.state);
        let _ = self.mark(scale.repaint | fling.repaint);
        FrameStatus {
            redraw: self.take_redraw(),
            wants_frame: scale.scheduled || fling.scheduled,
        }
    }

    /// Snapshot of the current state for debugging and inspection.
    #[must_use]
    pub fn debug_info(&self) -> PhotoViewDebugInfo {
        PhotoViewDebugInfo {
            viewport: self.state.bounds().viewport,
            image: self.state.bounds().image,
            scale: self.state.scale(),
            small_scale: self.state.small_scale(),
            big_scale: self.state.big_scale(),
            offset: self.state.offset(),
            offset_limits: self.state.offset_limits(),
            expanded: self.state.is_expanded(),
            arbiter: self.arbiter.state(),
            animating: self.is_animating(),
            flinging: self.is_flinging(),
        }
    }

    fn dispatch(&mut self, event: GestureEvent) -> Handled {
        match self.arbiter.route(&event) {
            Route::Swallowed => return Handled::consumed(Repaint::Clean),
            Route::Ignored => return Handled::unconsumed(),
            Route::Pinch | Route::SinglePointer => {}
        }
        match event {
            GestureEvent::PointerDown => {
                self.fling.cancel();
                Handled::consumed(Repaint::Clean)
            }
            GestureEvent::Drag { delta } => {
                self.fling.cancel();
                self.pan.on_drag(&mut self.state, delta)
            }
            GestureEvent::FlingStart { velocity } => self.start_fling(velocity),
            GestureEvent::DoubleTap { position } => {
                self.fling.cancel();
                self.scale.on_double_tap(&mut self.state, position)
            }
            GestureEvent::PinchBegin { focus } => {
                self.fling.cancel();
                self.scale.on_pinch_begin(&mut self.state, focus)
            }
            GestureEvent::PinchUpdate { factor } => {
                self.scale.on_pinch_update(&mut self.state, factor)
            }
            GestureEvent::PinchEnd => self.scale.on_pinch_end(&self.state),
        }
    }

    fn start_fling(&mut self, velocity: Vec2) -> Handled {
        if !self.state.is_expanded() {
            return Handled::unconsumed();
        }
        let started = self
            .fling
            .start(self.state.offset(), velocity, self.state.offset_limits());
        Handled {
            consumed: started,
            repaint: Repaint::Clean,
        }
    }

    fn interrupt(&mut self) {
        self.scale.cancel();
        self.fling.cancel();
    }

    fn mark(&mut self, repaint: Repaint) -> Repaint {
        self.needs_redraw |= repaint.is_dirty();
        repaint
    }
}

impl ViewportWidget for PhotoView {
    fn on_resize(&mut self, size: Size) -> Repaint {
        let repaint = self.state.resize(size, self.config.magnification());
        if repaint.is_dirty() {
            self.interrupt();
        }
        self.mark(repaint)
    }

    fn on_draw(&self) -> RenderTransform {
        RenderTransform::from_state(&self.state)
    }

    fn on_gesture_event(&mut self, event: GestureEvent) -> bool {
        let handled = self.dispatch(event);
        let _ = self.mark(handled.repaint);
        handled.consumed
    }
}

/// Debug snapshot of a [`PhotoView`] state.
#[derive(Clone, Copy, Debug)]
pub struct PhotoViewDebugInfo {
    /// Viewport size.
    pub viewport: Size,
    /// Displayed image size.
    pub image: Size,
    /// Current scale.
    pub scale: f64,
    /// Fitted scale.
    pub small_scale: f64,
    /// Expanded scale.
    pub big_scale: f64,
    /// Pan offset.
    pub offset: Vec2,
    /// Per-axis offset clamp limits.
    pub offset_limits: Vec2,
    /// Toggle state.
    pub expanded: bool,
    /// Dispatch owner.
    pub arbiter: ArbiterState,
    /// Whether the toggle animation runs.
    pub animating: bool,
    /// Whether a fling runs.
    pub flinging: bool,
}
