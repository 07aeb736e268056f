// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared session state mutated by gestures and the frame loop.
//!
//! A [`Scene`] holds everything both threads touch besides the tap queue:
//! the placement arena, the current model selection, the explicitly-tracked
//! active placement, and the origin/current camera snapshots the drag
//! gesture steers by. The engine's types are plain data; the embedding app
//! guards the `Scene` with whatever lock its two threads share and keeps
//! critical sections to single gesture callbacks or single frames.

use crate::heading::CameraSnapshot;
use crate::placement::{ObjectTypeId, PlacementId, PlacementStore};

/// Mutable session state shared between the gesture side and the frame
/// side.
#[derive(Debug, Default)]
pub struct Scene {
    pub(crate) placements: PlacementStore,
    selected_object: Option<ObjectTypeId>,
    active: Option<PlacementId>,
    pub(crate) origin_camera: CameraSnapshot,
    pub(crate) current_camera: CameraSnapshot,
}

impl Scene {
    /// Creates an empty scene with no selection and no placements.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets which object prototype future taps will place. `None` disables
    /// placement (taps are dropped with a prompt to pick a model).
    pub fn select_object(&mut self, object_type: Option<ObjectTypeId>) {
        self.selected_object = object_type;
    }

    /// The object prototype future taps will place.
    #[must_use]
    pub fn selected_object(&self) -> Option<ObjectTypeId> {
        self.selected_object
    }

    /// The placement gestures currently act on: the most recently created
    /// one, tracked explicitly rather than inferred from creation order.
    #[must_use]
    pub fn active_placement(&self) -> Option<PlacementId> {
        self.active
    }

    pub(crate) fn set_active_placement(&mut self, id: PlacementId) {
        self.active = Some(id);
    }

    /// Read access to the placement arena.
    #[must_use]
    pub fn placements(&self) -> &PlacementStore {
        &self.placements
    }

    /// The camera snapshot captured when the active placement was created.
    #[must_use]
    pub fn origin_camera(&self) -> CameraSnapshot {
        self.origin_camera
    }

    /// The camera snapshot refreshed on the most recent confident frame.
    #[must_use]
    pub fn current_camera(&self) -> CameraSnapshot {
        self.current_camera
    }
}
