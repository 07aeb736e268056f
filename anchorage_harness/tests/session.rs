// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end session scenarios driven through scripted doubles.

use std::sync::Arc;

use anchorage_core::gesture::GestureInterpreter;
use anchorage_core::heading::CameraSnapshot;
use anchorage_core::placement::{AnchorId, ObjectTypeId, MAX_PLACEMENTS};
use anchorage_core::queue::{TapEvent, TapQueue};
use anchorage_core::reconcile::{FrameOutcome, FrameReconciler};
use anchorage_core::scene::Scene;
use anchorage_core::tracker::{
    FrameError, HitResult, PlaneKind, PointOrientation, TrackableHit, TrackingState,
};
use anchorage_core::transform::Mat4;
use anchorage_harness::{
    DrawCall, RecordingNotifier, RecordingRenderer, ScriptedTracker, paused_frame, tracking_frame,
    with_plane,
};
use kurbo::Point;

/// Everything one scripted session needs, wired to a shared tap queue.
struct Rig {
    scene: Scene,
    gestures: GestureInterpreter,
    frame_loop: FrameReconciler,
    tracker: ScriptedTracker,
    renderer: RecordingRenderer,
    notifier: RecordingNotifier,
}

impl Rig {
    fn resumed() -> Self {
        let taps = Arc::new(TapQueue::new());
        let mut rig = Self {
            scene: Scene::new(),
            gestures: GestureInterpreter::new(Arc::clone(&taps)),
            frame_loop: FrameReconciler::new(taps),
            tracker: ScriptedTracker::new(),
            renderer: RecordingRenderer::new(),
            notifier: RecordingNotifier::default(),
        };
        rig.frame_loop
            .resume(&mut rig.tracker, &mut rig.notifier)
            .expect("scripted resume succeeds");
        rig
    }

    fn run_frame(&mut self) -> FrameOutcome {
        self.frame_loop.run_frame(
            &mut self.scene,
            &mut self.tracker,
            &mut self.renderer,
            &mut self.notifier,
        )
    }

    fn tap(&mut self, x: f64, y: f64) -> bool {
        self.gestures.on_tap(
            &self.scene,
            &mut self.notifier,
            TapEvent {
                position: Point::new(x, y),
                timestamp_ns: 0,
            },
        )
    }
}

fn plane_hit() -> HitResult {
    HitResult {
        trackable: TrackableHit::Plane {
            kind: PlaneKind::HorizontalUpward,
            in_polygon: true,
        },
        pose: Mat4::IDENTITY,
    }
}

/// A display pose whose heading-relevant elements are set directly.
fn pose_with_heading_scalars(elem2: f32, elem0: f32) -> Mat4 {
    let mut pose = Mat4::IDENTITY;
    pose.cols[0][2] = elem2;
    pose.cols[0][0] = elem0;
    pose
}

#[test]
fn tap_on_plane_places_selected_object() {
    let mut rig = Rig::resumed();
    rig.scene.select_object(Some(ObjectTypeId(3)));
    assert!(rig.tap(200.0, 300.0));

    // Place while the camera faces mid first quadrant, so a captured origin
    // snapshot is distinguishable from a default-initialized one.
    let mut placing = tracking_frame();
    placing.display_pose = pose_with_heading_scalars(0.5, 0.5);
    rig.tracker.push_frame(placing);
    rig.tracker.push_hits(vec![
        // A rejected point hit in front of the accepted plane hit.
        HitResult {
            trackable: TrackableHit::Point {
                orientation: PointOrientation::InitializedToGravity,
            },
            pose: Mat4::IDENTITY,
        },
        plane_hit(),
    ]);

    let outcome = rig.run_frame();
    let FrameOutcome::Rendered {
        placements_drawn,
        placement_created,
    } = outcome
    else {
        panic!("expected a rendered frame, got {outcome:?}");
    };
    assert_eq!(placements_drawn, 1);
    let id = placement_created.expect("the tap created a placement");

    assert_eq!(rig.tracker.anchor_count(), 1);
    assert_eq!(rig.scene.placements().object_type(id), ObjectTypeId(3));
    assert_eq!(rig.scene.active_placement(), Some(id));
    // The origin snapshot comes from the placing frame's display pose; the
    // drag gesture steers by it.
    assert_eq!(
        rig.scene.origin_camera(),
        CameraSnapshot {
            value1: 0.5,
            value2: 0.5,
        }
    );
    // First draw initialized the transform record with defaults.
    let record = rig.scene.placements().record(id).expect("record created");
    assert_eq!(record.scale, 1.0);
    assert_eq!(record.rotation_theta, 0.0);
}

#[test]
fn tap_with_no_acceptable_hit_places_nothing() {
    let mut rig = Rig::resumed();
    rig.scene.select_object(Some(ObjectTypeId(0)));
    assert!(rig.tap(10.0, 10.0));

    rig.tracker.push_frame(tracking_frame());
    rig.tracker.push_hits(vec![
        HitResult {
            trackable: TrackableHit::Plane {
                kind: PlaneKind::HorizontalUpward,
                in_polygon: false,
            },
            pose: Mat4::IDENTITY,
        },
        HitResult {
            trackable: TrackableHit::Point {
                orientation: PointOrientation::InitializedToGravity,
            },
            pose: Mat4::IDENTITY,
        },
    ]);

    assert_eq!(
        rig.run_frame(),
        FrameOutcome::Rendered {
            placements_drawn: 0,
            placement_created: None,
        }
    );
    assert_eq!(rig.tracker.anchor_count(), 0);
}

#[test]
fn search_banner_hides_on_first_upward_plane() {
    let mut rig = Rig::resumed();
    assert_eq!(
        rig.notifier.messages,
        vec![(String::from("Searching for surfaces..."), false)]
    );

    // A vertical plane alone does not satisfy the search.
    rig.tracker
        .push_frame(with_plane(tracking_frame(), PlaneKind::Vertical));
    rig.run_frame();
    assert_eq!(rig.notifier.hides, 0);

    rig.tracker
        .push_frame(with_plane(tracking_frame(), PlaneKind::HorizontalUpward));
    rig.run_frame();
    assert_eq!(rig.notifier.hides, 1);

    // The banner only hides once.
    rig.tracker
        .push_frame(with_plane(tracking_frame(), PlaneKind::HorizontalUpward));
    rig.run_frame();
    assert_eq!(rig.notifier.hides, 1);
}

#[test]
fn paused_camera_draws_feedback_only() {
    let mut rig = Rig::resumed();
    rig.scene.select_object(Some(ObjectTypeId(0)));

    // A confident frame first, so a placement exists and would be drawn.
    assert!(rig.tap(100.0, 100.0));
    rig.tracker
        .push_frame(with_plane(tracking_frame(), PlaneKind::HorizontalUpward));
    rig.tracker.push_hits(vec![plane_hit()]);
    rig.run_frame();
    assert_eq!(rig.renderer.objects().len(), 1);

    // Losing confidence stops plane and object draws that frame; the
    // background and point cloud keep going.
    rig.renderer.calls.clear();
    rig.tracker.push_frame(paused_frame());
    assert_eq!(rig.run_frame(), FrameOutcome::Paused);
    assert_eq!(
        rig.renderer.calls,
        vec![
            DrawCall::Background { timestamp_ns: 0 },
            DrawCall::PointCloud { points: 0 },
        ]
    );
}

#[test]
fn frame_failure_skips_and_recovers() {
    let mut rig = Rig::resumed();
    rig.tracker
        .push_frame_error(FrameError::Internal(String::from("scripted")));
    rig.tracker.push_frame(tracking_frame());

    assert_eq!(rig.run_frame(), FrameOutcome::Skipped);
    assert!(rig.renderer.calls.is_empty(), "skipped frame draws nothing");

    assert_eq!(
        rig.run_frame(),
        FrameOutcome::Rendered {
            placements_drawn: 0,
            placement_created: None,
        }
    );
}

#[test]
fn placement_cap_notifies_per_attempt() {
    let mut rig = Rig::resumed();
    rig.scene.select_object(Some(ObjectTypeId(0)));

    for _ in 0..MAX_PLACEMENTS {
        assert!(rig.tap(100.0, 100.0));
        rig.tracker.push_frame(tracking_frame());
        rig.tracker.push_hits(vec![plane_hit()]);
        rig.run_frame();
    }
    assert_eq!(rig.scene.placements().len(), MAX_PLACEMENTS);
    assert_eq!(rig.notifier.cap_notices, 0);

    // Two more attempts: each notifies, neither creates an anchor.
    for attempt in 1..=2 {
        assert!(rig.tap(100.0, 100.0));
        rig.tracker.push_frame(tracking_frame());
        rig.tracker.push_hits(vec![plane_hit()]);
        rig.run_frame();
        assert_eq!(rig.notifier.cap_notices, attempt);
    }
    assert_eq!(rig.tracker.anchor_count(), MAX_PLACEMENTS);
    assert_eq!(rig.scene.placements().len(), MAX_PLACEMENTS);
}

#[test]
fn lost_anchor_is_skipped_until_it_recovers() {
    let mut rig = Rig::resumed();
    rig.scene.select_object(Some(ObjectTypeId(0)));

    // Place two objects over two frames.
    for _ in 0..2 {
        assert!(rig.tap(100.0, 100.0));
        rig.tracker.push_frame(tracking_frame());
        rig.tracker.push_hits(vec![plane_hit()]);
        rig.run_frame();
    }

    rig.tracker
        .set_anchor_state(AnchorId(0), TrackingState::Paused);
    rig.tracker.push_frame(tracking_frame());
    assert_eq!(
        rig.run_frame(),
        FrameOutcome::Rendered {
            placements_drawn: 1,
            placement_created: None,
        }
    );

    rig.tracker
        .set_anchor_state(AnchorId(0), TrackingState::Tracking);
    rig.tracker.push_frame(tracking_frame());
    assert_eq!(
        rig.run_frame(),
        FrameOutcome::Rendered {
            placements_drawn: 2,
            placement_created: None,
        }
    );
}

#[test]
fn drag_after_camera_swing_moves_the_model() {
    let mut rig = Rig::resumed();
    rig.scene.select_object(Some(ObjectTypeId(0)));

    // Frame 1: place at heading 0° (identity pose: elem 2 = 0, elem 0 = 1).
    assert!(rig.tap(100.0, 100.0));
    rig.tracker.push_frame(tracking_frame());
    rig.tracker.push_hits(vec![plane_hit()]);
    rig.run_frame();
    let id = rig.scene.active_placement().expect("placed");

    // Frame 2: the camera has swung to 45° (mid first quadrant).
    let mut swung = tracking_frame();
    swung.display_pose = pose_with_heading_scalars(0.5, 0.5);
    rig.tracker.push_frame(swung);
    rig.run_frame();

    // A +X screen drag at 45° splits evenly across both world axes, with
    // the first-quadrant negative sign and speed 0.001.
    assert!(rig.gestures.on_drag(&mut rig.scene, 1, 10.0, 0.0));
    let record = *rig.scene.placements().record(id).expect("record exists");
    assert!((record.translation_x - (-0.005)).abs() < 1e-7);
    assert!((record.translation_z - (-0.005)).abs() < 1e-7);

    // Frame 3: the drawn model matrix carries the translation.
    rig.tracker.push_frame(tracking_frame());
    rig.renderer.calls.clear();
    rig.run_frame();
    let objects = rig.renderer.objects();
    assert_eq!(objects.len(), 1);
    let DrawCall::Object { model, .. } = objects[0] else {
        unreachable!("objects() only returns Object calls");
    };
    assert!((model.cols[3][0] - (-0.005)).abs() < 1e-6);
    assert!((model.cols[3][2] - (-0.005)).abs() < 1e-6);
}

#[test]
fn rotated_model_matrix_overwrites_rotation_columns() {
    let mut rig = Rig::resumed();
    rig.scene.select_object(Some(ObjectTypeId(0)));

    assert!(rig.tap(100.0, 100.0));
    rig.tracker.push_frame(tracking_frame());
    rig.tracker.push_hits(vec![plane_hit()]);
    rig.run_frame();

    // 1000 detector degrees accumulate to -1 radian of model yaw.
    assert!(rig.gestures.on_twist(&mut rig.scene, 1000.0));

    rig.tracker.push_frame(tracking_frame());
    rig.renderer.calls.clear();
    rig.run_frame();
    let objects = rig.renderer.objects();
    let DrawCall::Object { model, .. } = objects[0] else {
        unreachable!("objects() only returns Object calls");
    };
    let (sin, cos) = (-1.0_f32).sin_cos();
    assert!((model.cols[0][0] - cos).abs() < 1e-6);
    assert!((model.cols[0][2] - sin).abs() < 1e-6);
    assert!((model.cols[2][0] + sin).abs() < 1e-6);
    assert!((model.cols[2][2] - cos).abs() < 1e-6);
}

#[test]
fn pinch_scale_flows_into_draw_call() {
    let mut rig = Rig::resumed();
    rig.scene.select_object(Some(ObjectTypeId(0)));

    assert!(rig.tap(100.0, 100.0));
    rig.tracker.push_frame(tracking_frame());
    rig.tracker.push_hits(vec![plane_hit()]);
    rig.run_frame();

    // 100x pinch clamps to the 5.0 ceiling.
    assert!(rig.gestures.on_pinch(&mut rig.scene, 100.0));

    rig.tracker.push_frame(tracking_frame());
    rig.renderer.calls.clear();
    rig.run_frame();
    let objects = rig.renderer.objects();
    let DrawCall::Object { scale, .. } = objects[0] else {
        unreachable!("objects() only returns Object calls");
    };
    assert_eq!(*scale, 5.0);
}

#[test]
fn draw_order_is_background_cloud_planes_objects() {
    let mut rig = Rig::resumed();
    rig.scene.select_object(Some(ObjectTypeId(0)));
    assert!(rig.tap(100.0, 100.0));
    rig.tracker
        .push_frame(with_plane(tracking_frame(), PlaneKind::HorizontalUpward));
    rig.tracker.push_hits(vec![plane_hit()]);
    rig.run_frame();

    assert_eq!(rig.renderer.calls.len(), 4);
    assert!(matches!(rig.renderer.calls[0], DrawCall::Background { .. }));
    assert!(matches!(rig.renderer.calls[1], DrawCall::PointCloud { .. }));
    assert!(matches!(rig.renderer.calls[2], DrawCall::Planes { planes: 1 }));
    assert!(matches!(rig.renderer.calls[3], DrawCall::Object { .. }));
}
