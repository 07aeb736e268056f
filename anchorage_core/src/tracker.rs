// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! World-tracker contract.
//!
//! Anchorage does not implement SLAM. A platform integration supplies a
//! [`WorldTracker`]: the camera-pose/plane-tracking subsystem that owns the
//! session, the trackables, and every anchor. The engine consumes it
//! per frame and never holds tracker state beyond opaque [`AnchorId`]
//! handles.
//!
//! A tracker integration provides the following pieces:
//!
//! - **Session control** — [`resume`](WorldTracker::resume) /
//!   [`pause`](WorldTracker::pause). The frame loop is stopped *before*
//!   `pause` is called and restarted *after* `resume`, so `update` is never
//!   invoked on a paused session.
//!
//! - **Frame pull** — [`update`](WorldTracker::update) produces the
//!   [`TrackerFrame`] for this render pass. It may block until a new camera
//!   frame is available; callers treat that as the natural frame-rate
//!   throttle, not an error.
//!
//! - **Hit testing** — [`hit_test`](WorldTracker::hit_test) maps a 2-D
//!   screen point to depth-ordered intersections with trackables.
//!
//! - **Anchors** — [`create_anchor`](WorldTracker::create_anchor) fixes a
//!   pose in physical space; the tracker refines anchor poses as its world
//!   estimate improves, which is why [`anchor_pose`](WorldTracker::anchor_pose)
//!   is re-read every frame.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use kurbo::Point;

use crate::placement::AnchorId;
use crate::transform::Mat4;

/// Tracker-reported quality signal for a pose.
///
/// Gates whether the pose is trustworthy to render from. Planes and objects
/// are only drawn while the relevant state is `Tracking`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TrackingState {
    /// The pose is current and trustworthy.
    Tracking,
    /// Tracking is temporarily degraded; the pose must not be rendered from.
    Paused,
}

/// Orientation class of a tracked plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlaneKind {
    /// A floor- or table-like surface facing up.
    HorizontalUpward,
    /// A ceiling-like surface facing down.
    HorizontalDownward,
    /// A wall-like surface.
    Vertical,
}

/// How a tracked feature point's orientation was obtained.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointOrientation {
    /// The tracker estimated a surface normal at the point; the hit pose is
    /// a plausible attachment orientation.
    EstimatedSurfaceNormal,
    /// Orientation is a gravity-aligned default; not a placement target.
    InitializedToGravity,
}

/// The trackable a hit-test ray intersected.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TrackableHit {
    /// The ray hit a tracked plane.
    Plane {
        /// Orientation class of the plane.
        kind: PlaneKind,
        /// Whether the hit pose lies inside the plane's detected polygon
        /// (hits on the infinite plane outside the polygon are rejected).
        in_polygon: bool,
    },
    /// The ray hit a tracked feature point.
    Point {
        /// How the point's orientation was obtained.
        orientation: PointOrientation,
    },
}

/// One hit-test intersection, as supplied by the tracker in depth order.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitResult {
    /// What was hit.
    pub trackable: TrackableHit,
    /// World-space pose of the intersection.
    pub pose: Mat4,
}

impl HitResult {
    /// Whether this hit is an acceptable anchor site: a plane hit inside the
    /// plane polygon, or a point hit with an estimated surface normal.
    #[must_use]
    pub fn is_anchor_site(&self) -> bool {
        match self.trackable {
            TrackableHit::Plane { in_polygon, .. } => in_polygon,
            TrackableHit::Point { orientation } => {
                orientation == PointOrientation::EstimatedSurfaceNormal
            }
        }
    }
}

/// Renderable summary of one tracked plane.
#[derive(Clone, Debug, PartialEq)]
pub struct PlaneSummary {
    /// Orientation class.
    pub kind: PlaneKind,
    /// The plane's own tracking state.
    pub state: TrackingState,
    /// Center pose of the plane in world space.
    pub center: Mat4,
    /// Detected boundary polygon, as X/Z vertices in the plane's local
    /// frame.
    pub polygon: Vec<Point>,
}

/// Snapshot of the tracked feature points visible this frame.
///
/// Each point is `[x, y, z, confidence]` in world space. The cloud is cheap
/// visual feedback while the tracker is still searching for surfaces, so it
/// is drawn regardless of tracking confidence.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointCloud {
    /// World-space points with per-point confidence in `[0, 1]`.
    pub points: Vec<[f32; 4]>,
}

/// Everything the engine pulls from the tracker for one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackerFrame {
    /// The camera's tracking confidence this frame.
    pub tracking_state: TrackingState,
    /// Camera view matrix.
    pub view: Mat4,
    /// Camera projection matrix.
    pub projection: Mat4,
    /// Display-oriented camera pose (the heading source; see
    /// [`CameraSnapshot`](crate::heading::CameraSnapshot)).
    pub display_pose: Mat4,
    /// Average pixel intensity of the camera image, for lighting.
    pub light_intensity: f32,
    /// Feature points visible this frame.
    pub point_cloud: PointCloud,
    /// All planes the tracker currently knows about.
    pub planes: Vec<PlaneSummary>,
    /// Capture timestamp, in nanoseconds of the tracker's monotonic clock.
    pub timestamp_ns: u64,
}

/// The tracker could not start a session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SessionError {
    /// AR tracking is not available on this device (not installed, too old,
    /// or unsupported). Surfaced to the user once; the session never starts.
    TrackerUnavailable,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TrackerUnavailable => write!(f, "AR tracking is unavailable on this device"),
        }
    }
}

impl core::error::Error for SessionError {}

/// A single frame pull failed.
///
/// Never propagates past the per-frame boundary: the reconciler logs it,
/// abandons the frame, and continues on the next one.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FrameError {
    /// No camera image was available.
    CameraUnavailable,
    /// The session was paused underneath the frame loop.
    SessionPaused,
    /// Any other tracker-internal failure.
    Internal(String),
}

impl fmt::Display for FrameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CameraUnavailable => write!(f, "no camera image available"),
            Self::SessionPaused => write!(f, "tracker session is paused"),
            Self::Internal(msg) => write!(f, "tracker failure: {msg}"),
        }
    }
}

impl core::error::Error for FrameError {}

/// The camera-pose/plane-tracking subsystem.
///
/// Implemented by platform integrations and by scripted test doubles; the
/// reconciler's frame loop is generic over this trait.
pub trait WorldTracker {
    /// Starts or resumes the tracking session.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError`] if tracking cannot start on this device.
    fn resume(&mut self) -> Result<(), SessionError>;

    /// Pauses the tracking session. The frame loop has already been stopped
    /// when this is called.
    fn pause(&mut self);

    /// Pulls the next frame. May block until a camera frame is available.
    ///
    /// # Errors
    ///
    /// Returns [`FrameError`] when this frame cannot be produced; the caller
    /// abandons the frame and tries again next pass.
    fn update(&mut self) -> Result<TrackerFrame, FrameError>;

    /// Hit-tests a screen point against all trackables, returning
    /// intersections sorted by depth (closest first).
    fn hit_test(&mut self, point: Point) -> Vec<HitResult>;

    /// Creates an anchor fixed at `pose`. Bounded by the engine's placement
    /// cap; the engine never creates more than
    /// [`MAX_PLACEMENTS`](crate::placement::MAX_PLACEMENTS) live anchors.
    fn create_anchor(&mut self, pose: Mat4) -> AnchorId;

    /// The current tracking state of an anchor.
    fn anchor_state(&self, anchor: AnchorId) -> TrackingState;

    /// The current world-space pose of an anchor. Refined by the tracker
    /// between frames, so re-read every frame.
    fn anchor_pose(&self, anchor: AnchorId) -> Mat4;
}
