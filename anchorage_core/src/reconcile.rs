// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame reconciliation between tracker, scene, and renderer.
//!
//! [`FrameReconciler`] owns the session lifecycle (resume/pause ordering
//! relative to the tracker) and the once-per-frame pass that every other
//! module feeds into: pull a tracker frame, consume at most one queued tap,
//! create an anchor from the first acceptable hit, and sequence draw calls
//! in placement order. Nothing in the pass is allowed to kill the loop; a
//! failed frame pull is logged and skipped, and the next frame starts clean.
//!
//! The pass is generic over the [`WorldTracker`], [`SceneRenderer`], and
//! [`Notifier`] seams, so scripted doubles can drive it deterministically in
//! tests.

use alloc::sync::Arc;

use crate::heading::CameraSnapshot;
use crate::notify::Notifier;
use crate::placement::PlacementId;
use crate::queue::TapQueue;
use crate::render::SceneRenderer;
use crate::scene::Scene;
use crate::tracker::{
    PlaneKind, SessionError, TrackerFrame, TrackingState, WorldTracker,
};

/// What a single [`FrameReconciler::run_frame`] pass did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// The session is not running; nothing was drawn.
    NoSession,
    /// The tracker failed to produce a frame; the pass was abandoned.
    Skipped,
    /// The camera is not tracking confidently. The background and point
    /// cloud were drawn; planes and objects were not.
    Paused,
    /// A full pass completed.
    Rendered {
        /// How many placements were drawn (placements whose anchors the
        /// tracker has lost are skipped and not counted).
        placements_drawn: usize,
        /// The placement created from this frame's tap, if any.
        placement_created: Option<PlacementId>,
    },
}

/// Session lifecycle and per-frame reconciliation driver.
#[derive(Debug)]
pub struct FrameReconciler {
    taps: Arc<TapQueue>,
    /// Still waiting for the first confidently-tracked upward-facing plane.
    searching: bool,
    running: bool,
    frame_index: u64,
}

impl FrameReconciler {
    /// Creates a reconciler consuming taps from `taps`.
    #[must_use]
    pub fn new(taps: Arc<TapQueue>) -> Self {
        Self {
            taps,
            searching: false,
            running: false,
            frame_index: 0,
        }
    }

    /// Whether the session is currently running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Starts or resumes the tracking session.
    ///
    /// On success the frame loop may run and the user is told the tracker is
    /// searching for surfaces. On failure the session never starts and the
    /// user gets a dismissible notice.
    ///
    /// # Errors
    ///
    /// Propagates the tracker's [`SessionError`] so the embedder can tear
    /// the session down.
    pub fn resume<T: WorldTracker, N: Notifier>(
        &mut self,
        tracker: &mut T,
        notifier: &mut N,
    ) -> Result<(), SessionError> {
        if let Err(err) = tracker.resume() {
            log::error!("session resume failed: {err}");
            notifier.show_message("This device does not support AR", true);
            return Err(err);
        }
        self.running = true;
        self.searching = true;
        notifier.show_message("Searching for surfaces...", false);
        log::info!("session resumed");
        Ok(())
    }

    /// Pauses the session.
    ///
    /// The frame loop is stopped *before* the tracker pauses, so no pass can
    /// observe a pausing tracker.
    pub fn pause<T: WorldTracker>(&mut self, tracker: &mut T) {
        self.running = false;
        tracker.pause();
        log::info!("session paused");
    }

    /// Runs one reconciliation pass.
    ///
    /// The pass never panics the loop on tracker failure; it reports what it
    /// did through the returned [`FrameOutcome`].
    pub fn run_frame<T, R, N>(
        &mut self,
        scene: &mut Scene,
        tracker: &mut T,
        renderer: &mut R,
        notifier: &mut N,
    ) -> FrameOutcome
    where
        T: WorldTracker,
        R: SceneRenderer,
        N: Notifier,
    {
        if !self.running {
            return FrameOutcome::NoSession;
        }
        self.frame_index += 1;

        let frame = match tracker.update() {
            Ok(frame) => frame,
            Err(err) => {
                log::warn!("frame {} abandoned: {err}", self.frame_index);
                return FrameOutcome::Skipped;
            }
        };

        // Taps are only actionable against a confident camera pose.
        let placement_created = if frame.tracking_state == TrackingState::Tracking {
            self.handle_tap(scene, tracker, notifier, &frame)
        } else {
            None
        };

        // The camera feed and the tracked-point cloud are drawn even while
        // tracking confidence is lost; they are the user's only feedback
        // that the tracker is still alive.
        renderer.draw_background(&frame);
        renderer.draw_point_cloud(&frame.point_cloud, frame.view, frame.projection);

        if frame.tracking_state == TrackingState::Paused {
            return FrameOutcome::Paused;
        }

        scene.current_camera = CameraSnapshot::from_pose(frame.display_pose);

        if self.searching && has_usable_surface(&frame) {
            self.searching = false;
            notifier.hide_message();
            log::info!("first upward-facing surface acquired");
        }

        renderer.draw_planes(&frame.planes, frame.display_pose, frame.projection);

        let mut placements_drawn = 0;
        for id in scene.placements.ids() {
            let anchor = scene.placements.anchor(id);
            if tracker.anchor_state(anchor) != TrackingState::Tracking {
                continue;
            }
            let record = *scene
                .placements
                .record_or_init_mut(id, (frame.view.elem(3), frame.view.elem(11)));

            // The anchor pose is re-read every frame; the tracker refines it
            // continuously. Gesture translation rides on top in the anchor's
            // local frame, then the rotation columns are overwritten.
            let mut model = tracker.anchor_pose(anchor);
            model.translate_in_place(record.translation_x, 0.0, record.translation_z);
            model.overwrite_y_rotation(record.rotation_theta);

            renderer.draw_object(
                scene.placements.object_type(id),
                frame.view,
                frame.projection,
                model,
                record.scale,
                frame.light_intensity,
            );
            placements_drawn += 1;
        }

        FrameOutcome::Rendered {
            placements_drawn,
            placement_created,
        }
    }

    /// Consumes at most one queued tap, anchoring it at the first
    /// acceptable hit.
    fn handle_tap<T: WorldTracker, N: Notifier>(
        &mut self,
        scene: &mut Scene,
        tracker: &mut T,
        notifier: &mut N,
        frame: &TrackerFrame,
    ) -> Option<PlacementId> {
        let tap = self.taps.poll()?;
        // The selection is re-checked here: it may have been cleared between
        // the tap landing on the input thread and this frame.
        let object_type = scene.selected_object()?;

        for hit in tracker.hit_test(tap.position) {
            if !hit.is_anchor_site() {
                continue;
            }
            if scene.placements.is_full() {
                log::debug!("placement cap reached; tap at {:?} ignored", tap.position);
                notifier.anchor_cap_reached();
                return None;
            }
            let anchor = tracker.create_anchor(hit.pose);
            let id = match scene.placements.bind(anchor, object_type) {
                Ok(id) => id,
                Err(err) => {
                    // Unreachable after the is_full check, but the bind API
                    // reports capacity and this path must stay total.
                    log::warn!("bind rejected: {err}");
                    notifier.anchor_cap_reached();
                    return None;
                }
            };
            scene.set_active_placement(id);
            scene.origin_camera = CameraSnapshot::from_pose(frame.display_pose);
            log::debug!(
                "frame {}: placed {:?} as {:?} on {:?}",
                self.frame_index,
                object_type,
                id,
                anchor,
            );
            return Some(id);
        }
        None
    }
}

fn has_usable_surface(frame: &TrackerFrame) -> bool {
    frame.planes.iter().any(|plane| {
        plane.kind == PlaneKind::HorizontalUpward && plane.state == TrackingState::Tracking
    })
}
