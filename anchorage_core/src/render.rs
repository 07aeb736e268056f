// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Renderer contract.
//!
//! The rasterizer lives outside this crate. The reconciler sequences calls
//! on a [`SceneRenderer`] each frame: background first, then the point
//! cloud, then (only while camera tracking is confident) planes and placed
//! objects in placement order. GL-style integrations and recording test
//! doubles both implement this trait, enabling a generic frame loop.

use crate::placement::ObjectTypeId;
use crate::tracker::{PlaneSummary, PointCloud, TrackerFrame};
use crate::transform::Mat4;

/// Draw capability consumed per frame by the reconciler.
///
/// Calls are infallible; a renderer that loses its surface should render
/// nothing rather than fail the frame.
pub trait SceneRenderer {
    /// Draws the camera feed behind everything else. Called every frame
    /// that produced a tracker pull, regardless of tracking confidence.
    fn draw_background(&mut self, frame: &TrackerFrame);

    /// Draws the tracked-point visualization. Also called regardless of
    /// tracking confidence, as feedback while the tracker searches.
    fn draw_point_cloud(&mut self, cloud: &PointCloud, view: Mat4, projection: Mat4);

    /// Draws all detected planes. Only called while camera tracking is
    /// confident.
    fn draw_planes(&mut self, planes: &[PlaneSummary], camera_pose: Mat4, projection: Mat4);

    /// Draws one placed object with its composed model matrix and uniform
    /// scale. Called once per tracking-confident placement, in placement
    /// order.
    fn draw_object(
        &mut self,
        object_type: ObjectTypeId,
        view: Mat4,
        projection: Mat4,
        model: Mat4,
        scale: f32,
        light_intensity: f32,
    );
}
