// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted doubles for driving the engine without a device.
//!
//! [`ScriptedTracker`] replays a queued script of frames and hit-test
//! results; [`RecordingRenderer`] and [`RecordingNotifier`] capture every
//! call the reconciler makes so tests (and the headless demo) can assert on
//! exact draw sequences rather than side effects.

#![no_std]

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use anchorage_core::notify::Notifier;
use anchorage_core::placement::{AnchorId, ObjectTypeId};
use anchorage_core::render::SceneRenderer;
use anchorage_core::tracker::{
    FrameError, HitResult, PlaneKind, PlaneSummary, PointCloud, SessionError, TrackerFrame,
    TrackingState, WorldTracker,
};
use anchorage_core::transform::Mat4;
use kurbo::Point;

/// Builds a tracking-confident frame with no planes and an empty cloud.
#[must_use]
pub fn tracking_frame() -> TrackerFrame {
    TrackerFrame {
        tracking_state: TrackingState::Tracking,
        view: Mat4::IDENTITY,
        projection: Mat4::IDENTITY,
        display_pose: Mat4::IDENTITY,
        light_intensity: 1.0,
        point_cloud: PointCloud { points: Vec::new() },
        planes: Vec::new(),
        timestamp_ns: 0,
    }
}

/// Builds a frame whose camera has lost tracking confidence.
#[must_use]
pub fn paused_frame() -> TrackerFrame {
    TrackerFrame {
        tracking_state: TrackingState::Paused,
        ..tracking_frame()
    }
}

/// Adds one confidently-tracked plane of `kind` to a frame.
#[must_use]
pub fn with_plane(mut frame: TrackerFrame, kind: PlaneKind) -> TrackerFrame {
    frame.planes.push(PlaneSummary {
        kind,
        state: TrackingState::Tracking,
        center: Mat4::IDENTITY,
        polygon: Vec::new(),
    });
    frame
}

/// One scripted anchor: its current pose and tracking state, both settable
/// mid-test.
#[derive(Clone, Copy, Debug)]
struct ScriptedAnchor {
    pose: Mat4,
    state: TrackingState,
}

/// A [`WorldTracker`] that replays queued frames and hit results.
///
/// Frames are consumed in push order; when the script runs dry, `update`
/// fails with [`FrameError::CameraUnavailable`]. Hit results are scripted as
/// one batch per `hit_test` call.
#[derive(Debug, Default)]
pub struct ScriptedTracker {
    frames: Vec<Result<TrackerFrame, FrameError>>,
    hits: Vec<Vec<HitResult>>,
    anchors: Vec<ScriptedAnchor>,
    /// Makes the next `resume` fail.
    pub fail_resume: bool,
    /// Calls observed, newest last: `"resume"`, `"pause"`, `"update"`,
    /// `"hit_test"`, `"create_anchor"`.
    pub calls: Vec<&'static str>,
}

impl ScriptedTracker {
    /// Creates a tracker with an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a frame for a future `update` call.
    pub fn push_frame(&mut self, frame: TrackerFrame) {
        self.frames.push(Ok(frame));
    }

    /// Queues a frame failure for a future `update` call.
    pub fn push_frame_error(&mut self, err: FrameError) {
        self.frames.push(Err(err));
    }

    /// Queues the result batch for a future `hit_test` call.
    pub fn push_hits(&mut self, hits: Vec<HitResult>) {
        self.hits.push(hits);
    }

    /// Moves an existing anchor's scripted state.
    ///
    /// # Panics
    ///
    /// Panics if `anchor` was never created by this tracker.
    pub fn set_anchor_state(&mut self, anchor: AnchorId, state: TrackingState) {
        self.scripted_anchor_mut(anchor).state = state;
    }

    /// Moves an existing anchor's scripted pose, emulating tracker
    /// refinement.
    ///
    /// # Panics
    ///
    /// Panics if `anchor` was never created by this tracker.
    pub fn set_anchor_pose(&mut self, anchor: AnchorId, pose: Mat4) {
        self.scripted_anchor_mut(anchor).pose = pose;
    }

    /// Number of anchors created so far.
    #[must_use]
    pub fn anchor_count(&self) -> usize {
        self.anchors.len()
    }

    fn scripted_anchor_mut(&mut self, anchor: AnchorId) -> &mut ScriptedAnchor {
        let idx = anchor_index(anchor);
        assert!(idx < self.anchors.len(), "unknown {anchor:?}");
        &mut self.anchors[idx]
    }
}

fn anchor_index(anchor: AnchorId) -> usize {
    usize::try_from(anchor.0).expect("scripted anchor ids stay small")
}

impl WorldTracker for ScriptedTracker {
    fn resume(&mut self) -> Result<(), SessionError> {
        self.calls.push("resume");
        if self.fail_resume {
            return Err(SessionError::TrackerUnavailable);
        }
        Ok(())
    }

    fn pause(&mut self) {
        self.calls.push("pause");
    }

    fn update(&mut self) -> Result<TrackerFrame, FrameError> {
        self.calls.push("update");
        if self.frames.is_empty() {
            return Err(FrameError::CameraUnavailable);
        }
        self.frames.remove(0)
    }

    fn hit_test(&mut self, _point: Point) -> Vec<HitResult> {
        self.calls.push("hit_test");
        if self.hits.is_empty() {
            Vec::new()
        } else {
            self.hits.remove(0)
        }
    }

    fn create_anchor(&mut self, pose: Mat4) -> AnchorId {
        self.calls.push("create_anchor");
        let id = AnchorId(self.anchors.len() as u64);
        self.anchors.push(ScriptedAnchor {
            pose,
            state: TrackingState::Tracking,
        });
        id
    }

    fn anchor_state(&self, anchor: AnchorId) -> TrackingState {
        self.anchors[anchor_index(anchor)].state
    }

    fn anchor_pose(&self, anchor: AnchorId) -> Mat4 {
        self.anchors[anchor_index(anchor)].pose
    }
}

/// One captured renderer call.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    /// `draw_background` with the frame's timestamp.
    Background {
        /// Frame capture timestamp.
        timestamp_ns: u64,
    },
    /// `draw_point_cloud` with the number of points.
    PointCloud {
        /// Points in the cloud.
        points: usize,
    },
    /// `draw_planes` with the number of planes.
    Planes {
        /// Planes handed to the renderer.
        planes: usize,
    },
    /// `draw_object` with the payload tests assert on.
    Object {
        /// Which prototype was drawn.
        object_type: ObjectTypeId,
        /// Composed model matrix.
        model: Mat4,
        /// Uniform scale.
        scale: f32,
    },
}

/// A [`SceneRenderer`] that records every call in order.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    /// Calls observed, oldest first.
    pub calls: Vec<DrawCall>,
}

impl RecordingRenderer {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The `Object` calls only, in draw order.
    #[must_use]
    pub fn objects(&self) -> Vec<&DrawCall> {
        self.calls
            .iter()
            .filter(|call| matches!(call, DrawCall::Object { .. }))
            .collect()
    }
}

impl SceneRenderer for RecordingRenderer {
    fn draw_background(&mut self, frame: &TrackerFrame) {
        self.calls.push(DrawCall::Background {
            timestamp_ns: frame.timestamp_ns,
        });
    }

    fn draw_point_cloud(&mut self, cloud: &PointCloud, _view: Mat4, _projection: Mat4) {
        self.calls.push(DrawCall::PointCloud {
            points: cloud.points.len(),
        });
    }

    fn draw_planes(&mut self, planes: &[PlaneSummary], _camera_pose: Mat4, _projection: Mat4) {
        self.calls.push(DrawCall::Planes {
            planes: planes.len(),
        });
    }

    fn draw_object(
        &mut self,
        object_type: ObjectTypeId,
        _view: Mat4,
        _projection: Mat4,
        model: Mat4,
        scale: f32,
        _light_intensity: f32,
    ) {
        self.calls.push(DrawCall::Object {
            object_type,
            model,
            scale,
        });
    }
}

/// A [`Notifier`] that records everything it is told.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    /// `(text, dismissible)` pairs in show order.
    pub messages: Vec<(String, bool)>,
    /// Number of `hide_message` calls.
    pub hides: u32,
    /// Number of `anchor_cap_reached` calls.
    pub cap_notices: u32,
}

impl RecordingNotifier {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Notifier for RecordingNotifier {
    fn show_message(&mut self, text: &str, dismissible: bool) {
        self.messages.push((String::from(text), dismissible));
    }

    fn hide_message(&mut self) {
        self.hides += 1;
    }

    fn anchor_cap_reached(&mut self) {
        self.cap_notices += 1;
    }
}
