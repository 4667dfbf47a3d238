// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_photo_view --heading-base-level=0

//! Understory Photo View: a headless zoomable image viewport.
//!
//! This crate models a single image shown inside a bounded view that the user
//! can pinch-zoom, double-tap-zoom, pan and fling. It focuses on:
//! - Fitted and expanded scale bounds derived from the view and image sizes.
//! - Arbitration between single-pointer gestures and an exclusive pinch.
//! - A frame-driven toggle animation between the fitted and expanded scale.
//! - Drag-to-pan and fling deceleration, clamped so the expanded image never
//!   reveals empty space.
//!
//! It does **not** decode images, recognize raw touch samples, or render.
//! Callers are expected to:
//! - Report the displayed image size (after any downsampling) and the view
//!   size through [`PhotoView::new`] and [`ViewportWidget::on_resize`].
//! - Feed recognized gestures ([`gesture::GestureEvent`]) into
//!   [`ViewportWidget::on_gesture_event`], and hand unconsumed ones to outer
//!   containers.
//! - Call [`PhotoView::on_frame`] on every display refresh while
//!   [`PhotoView::wants_frame`] is true, and redraw when asked.
//! - Draw the image with the [`RenderTransform`] from
//!   [`ViewportWidget::on_draw`].
//!
//! ## Minimal example
//!
//! ```rust
//! use core::time::Duration;
//! use kurbo::{Point, Size, Vec2};
//! use understory_photo_view::gesture::GestureEvent;
//! use understory_photo_view::{PhotoView, PhotoViewConfig, ViewportWidget};
//!
//! // A 2:1 image in a square view fits the width and expands to fill the height.
//! let mut view = PhotoView::new(Size::new(2000.0, 1000.0), PhotoViewConfig::default());
//! let _ = view.on_resize(Size::new(1000.0, 1000.0));
//! assert_eq!(view.state().small_scale(), 0.5);
//! assert_eq!(view.state().big_scale(), 1.5);
//!
//! // Double tap in the center and run the animation to completion.
//! assert!(view.on_gesture_event(GestureEvent::DoubleTap { position: Point::new(500.0, 500.0) }));
//! let mut now = Duration::ZERO;
//! while view.wants_frame() {
//!     let _ = view.on_frame(now);
//!     now += Duration::from_millis(16);
//! }
//! assert_eq!(view.state().scale(), 1.5);
//!
//! // Scrolling right by 50 pixels moves the image left.
//! assert!(view.on_gesture_event(GestureEvent::Drag { delta: Vec2::new(50.0, 0.0) }));
//! assert_eq!(view.on_draw().translation, Vec2::new(-50.0, 0.0));
//! ```
//!
//! ## Design notes
//!
//! - All mutation goes through [`ViewportState`], whose mutators return a
//!   [`Repaint`] signal instead of redrawing; [`PhotoView`] coalesces them into
//!   a single redraw flag.
//! - Controllers are plain structs that receive `&mut ViewportState` per call.
//! - A pinch never changes the expanded flag. A double tap after a pinch
//!   toggles the flag and animates from the pinch-set scale.
//! - Rotation is intentionally left out.
//!
//! ## Logging
//!
//! State transitions are reported through the [`log`] facade at `debug`
//! level and per-frame ticks at `trace` level. No logger is installed.
//!
//! This crate is `no_std`. Build with the `libm` feature when `std` is off.

#![no_std]

pub mod animation;
pub mod clamp;
pub mod fling;
pub mod gesture;
pub mod pan;
pub mod scale;

mod config;
mod state;
mod transform;
mod view;

pub use config::{DEFAULT_ANIMATION_DURATION, DEFAULT_MAGNIFICATION, FlingConfig, PhotoViewConfig};
pub use state::{Bounds, FrameTick, Repaint, ViewportState};
pub use transform::RenderTransform;
pub use view::{FrameStatus, PhotoView, PhotoViewDebugInfo, ViewportWidget};
