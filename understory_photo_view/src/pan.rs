// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag-to-pan in the expanded state.

use kurbo::Vec2;

use crate::gesture::Handled;
use crate::state::{Repaint, ViewportState};

/// Converts drag deltas into clamped offset updates.
///
/// Panning only applies while expanded. In the fitted state drags are left
/// unconsumed so an outer container can claim them.
#[derive(Clone, Copy, Debug, Default)]
pub struct PanController;

impl PanController {
    /// Applies a drag. `delta` is the scroll distance (previous minus current
    /// pointer position), so the offset moves by `-delta`.
    pub fn on_drag(&self, state: &mut ViewportState, delta: Vec2) -> Handled {
        if !state.is_expanded() {
            return Handled::unconsumed();
        }
        if delta == Vec2::ZERO || !delta.is_finite() {
            return Handled::consumed(Repaint::Clean);
        }
        Handled::consumed(state.set_offset_clamped(state.offset() - delta))
    }
}
