// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture interpretation: pinch, twist, drag, and tap.
//!
//! The input thread feeds detector callbacks into a [`GestureInterpreter`],
//! which mutates the active placement's transform record (pinch, twist,
//! drag) or produces tap events for the frame loop (tap). Every gesture
//! except tap is a no-op until the active placement has been drawn once and
//! its record exists.
//!
//! Drag is the interesting one: a screen-space finger delta has to move the
//! object in a world direction that *feels* fixed even as the user walks
//! around it. The interpreter resolves the camera's heading change since
//! the object was placed ([`relative_heading`]), picks the quadrant that
//! heading falls in, and blends the screen delta between axis-aligned and
//! diagonal components with a per-quadrant sign flip (negative in quadrants
//! 1 and 3, positive in 2 and 4). The blend and sign table are tuned
//! product behavior: change them and drag direction stops matching what
//! users see. They are reproduced here exactly rather than reduced to a
//! rotation matrix.

use alloc::sync::Arc;

use crate::heading::relative_heading;
use crate::notify::Notifier;
use crate::placement::{MAX_SCALE, MIN_SCALE};
use crate::queue::{TapEvent, TapQueue};
use crate::scene::Scene;

/// Multiplier applied to twist-gesture angle deltas (radians per reported
/// degree, with the sign flip that makes twist direction match the finger).
const TWIST_FACTOR: f32 = -0.001;

/// World units per screen pixel of drag.
const DRAG_SPEED: f64 = 0.001;

/// Translates touch-detector callbacks into transform mutations and tap
/// events.
#[derive(Debug)]
pub struct GestureInterpreter {
    taps: Arc<TapQueue>,
}

impl GestureInterpreter {
    /// Creates an interpreter producing into `taps`.
    #[must_use]
    pub fn new(taps: Arc<TapQueue>) -> Self {
        Self { taps }
    }

    /// Pinch update: scales the active record by the detector's factor,
    /// clamped to `[MIN_SCALE, MAX_SCALE]`.
    ///
    /// Returns whether the gesture was consumed (false when no active
    /// record exists yet).
    pub fn on_pinch(&self, scene: &mut Scene, scale_factor: f32) -> bool {
        let Some(id) = scene.active_placement() else {
            return false;
        };
        let Some(record) = scene.placements.record_existing_mut(id) else {
            return false;
        };
        record.scale = (scale_factor * record.scale).clamp(MIN_SCALE, MAX_SCALE);
        true
    }

    /// Twist update: accumulates Y-axis rotation on the active record.
    ///
    /// The accumulated angle is unbounded; it only ever feeds `sin`/`cos`.
    pub fn on_twist(&self, scene: &mut Scene, angle_delta: f32) -> bool {
        let Some(id) = scene.active_placement() else {
            return false;
        };
        let Some(record) = scene.placements.record_existing_mut(id) else {
            return false;
        };
        record.rotation_theta += angle_delta * TWIST_FACTOR;
        true
    }

    /// Single-pointer scroll: translates the active record in the anchor's
    /// local X/Z plane, steering the screen delta by the camera's heading
    /// change since placement.
    ///
    /// Ignored for multi-pointer scrolls (those belong to pinch/twist) and
    /// when no active record exists.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "heading math runs in f64; world translation state is f32"
    )]
    pub fn on_drag(
        &self,
        scene: &mut Scene,
        pointer_count: u32,
        distance_x: f64,
        distance_y: f64,
    ) -> bool {
        if pointer_count != 1 {
            return false;
        }
        let Some(id) = scene.active_placement() else {
            return false;
        };
        let angle = relative_heading(scene.current_camera, scene.origin_camera);
        let Some(record) = scene.placements.record_existing_mut(id) else {
            return false;
        };

        let (dx, dy) = (distance_x, distance_y);
        // Per-quadrant blend between axis-aligned and diagonal components,
        // with the alternating −/+/−/+ sign table. Preserved verbatim; see
        // module docs.
        let (trans_x, trans_y, speed) = if angle / 90.0 < 1.0 {
            // Quadrant 1.
            let a = angle;
            (
                -(dy * (a / 90.0)) + (dx * ((90.0 - a) / 90.0)),
                (dy * ((90.0 - a) / 90.0)) + (dx * (a / 90.0)),
                -DRAG_SPEED,
            )
        } else if angle / 90.0 < 2.0 {
            // Quadrant 2.
            let a = angle - 90.0;
            (
                (dx * (a / 90.0)) + (dy * ((90.0 - a) / 90.0)),
                (-dx * ((90.0 - a) / 90.0)) + (dy * (a / 90.0)),
                DRAG_SPEED,
            )
        } else if angle / 90.0 < 3.0 {
            // Quadrant 3.
            let a = angle - 180.0;
            (
                (dy * (a / 90.0)) + (-dx * ((90.0 - a) / 90.0)),
                (-dy * ((90.0 - a) / 90.0)) + (-dx * (a / 90.0)),
                -DRAG_SPEED,
            )
        } else {
            // Quadrant 4.
            let a = angle - 270.0;
            (
                (-dx * (a / 90.0)) + (-dy * ((90.0 - a) / 90.0)),
                (dx * ((90.0 - a) / 90.0)) + (-dy * (a / 90.0)),
                DRAG_SPEED,
            )
        };

        record.translation_x += (trans_x * speed) as f32;
        record.translation_z += (trans_y * speed) as f32;
        true
    }

    /// Single tap on touch-up: queues the tap for the frame loop, or prompts
    /// the user when no model is selected.
    ///
    /// Returns whether the tap was queued. A full queue drops the tap
    /// silently; taps are low-frequency relative to frame rate.
    pub fn on_tap<N: Notifier>(&self, scene: &Scene, notifier: &mut N, tap: TapEvent) -> bool {
        if scene.selected_object().is_none() {
            notifier.show_message("Please select a model from the menu", false);
            return false;
        }
        self.taps.offer(tap)
    }
}
