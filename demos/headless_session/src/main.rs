// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted AR session that exercises the whole engine without a device.
//!
//! Replays a short story through the scripted tracker: the tracker searches
//! for surfaces, finds a floor plane, the user places an object with a tap,
//! then pinches, twists, and drags it while the camera swings a quarter turn.
//! Every frame outcome and notification is logged; run with
//! `RUST_LOG=debug` for the engine's own tracing.

use std::sync::Arc;

use anchorage_core::gesture::GestureInterpreter;
use anchorage_core::placement::ObjectTypeId;
use anchorage_core::queue::{TapEvent, TapQueue};
use anchorage_core::reconcile::{FrameOutcome, FrameReconciler};
use anchorage_core::scene::Scene;
use anchorage_core::tracker::{HitResult, PlaneKind, TrackableHit, TrackingState};
use anchorage_core::transform::Mat4;
use anchorage_harness::{
    RecordingNotifier, RecordingRenderer, ScriptedTracker, paused_frame, tracking_frame,
    with_plane,
};
use kurbo::Point;

const FRAME_COUNT: u64 = 60;
/// Frame on which the tracker first reports a floor plane.
const PLANE_FOUND_AT: u64 = 10;
/// Frame on which the scripted user taps to place.
const TAP_AT: u64 = 12;
/// Frames over which camera confidence is scripted to drop out.
const BLACKOUT: std::ops::Range<u64> = 30..34;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let taps = Arc::new(TapQueue::new());
    let gestures = GestureInterpreter::new(Arc::clone(&taps));
    let mut frame_loop = FrameReconciler::new(taps);
    let mut scene = Scene::new();
    let mut tracker = ScriptedTracker::new();
    let mut renderer = RecordingRenderer::new();
    let mut notifier = RecordingNotifier::new();

    scene.select_object(Some(ObjectTypeId(0)));
    frame_loop
        .resume(&mut tracker, &mut notifier)
        .expect("scripted tracker always resumes");

    for frame_index in 0..FRAME_COUNT {
        script_frame(&mut tracker, frame_index);
        script_input(&gestures, &mut scene, &mut notifier, frame_index);

        let outcome = frame_loop.run_frame(&mut scene, &mut tracker, &mut renderer, &mut notifier);
        log::info!("frame {frame_index:2}: {outcome:?}");
        if let FrameOutcome::Rendered {
            placement_created: Some(id),
            ..
        } = outcome
        {
            log::info!("frame {frame_index:2}: placed {id:?}");
        }
        drain_notifications(&mut notifier);
    }

    frame_loop.pause(&mut tracker);

    println!("---");
    println!("placements: {}", scene.placements().len());
    println!("draw calls: {}", renderer.calls.len());
    if let Some(id) = scene.active_placement() {
        let record = scene.placements().record(id).expect("drawn at least once");
        println!(
            "active {:?}: scale {:.2}, theta {:.3} rad, translation ({:.4}, {:.4})",
            id, record.scale, record.rotation_theta, record.translation_x, record.translation_z,
        );
    }
}

/// Queues the tracker frame for `frame_index` per the script.
fn script_frame(tracker: &mut ScriptedTracker, frame_index: u64) {
    if BLACKOUT.contains(&frame_index) {
        tracker.push_frame(paused_frame());
        return;
    }
    let mut frame = if frame_index >= PLANE_FOUND_AT {
        with_plane(tracking_frame(), PlaneKind::HorizontalUpward)
    } else {
        tracking_frame()
    };
    frame.timestamp_ns = frame_index * 16_666_667;
    // The camera swings from heading 0° toward 90° over the session.
    let progress = frame_index as f32 / FRAME_COUNT as f32;
    frame.display_pose.cols[0][2] = progress;
    frame.display_pose.cols[0][0] = 1.0 - progress;
    tracker.push_frame(frame);

    if frame_index == TAP_AT {
        tracker.push_hits(vec![HitResult {
            trackable: TrackableHit::Plane {
                kind: PlaneKind::HorizontalUpward,
                in_polygon: true,
            },
            pose: Mat4::from_translation(0.0, 0.0, -1.5),
        }]);
    }
    if frame_index == 40 {
        // The tracker briefly loses the anchor after the blackout.
        tracker.set_anchor_state(anchorage_core::placement::AnchorId(0), TrackingState::Paused);
    }
    if frame_index == 44 {
        tracker.set_anchor_state(
            anchorage_core::placement::AnchorId(0),
            TrackingState::Tracking,
        );
    }
}

/// Feeds the scripted user input for `frame_index`.
fn script_input(
    gestures: &GestureInterpreter,
    scene: &mut Scene,
    notifier: &mut RecordingNotifier,
    frame_index: u64,
) {
    match frame_index {
        TAP_AT => {
            let queued = gestures.on_tap(
                scene,
                notifier,
                TapEvent {
                    position: Point::new(240.0, 400.0),
                    timestamp_ns: frame_index * 16_666_667,
                },
            );
            log::info!("tap queued: {queued}");
        }
        16..=19 => {
            // Pinch out over four frames.
            gestures.on_pinch(scene, 1.2);
        }
        22..=25 => {
            // Twist a quarter turn's worth of detector degrees.
            gestures.on_twist(scene, 400.0);
        }
        48..=55 => {
            // Drag right and slightly down.
            gestures.on_drag(scene, 1, 8.0, 2.0);
        }
        _ => {}
    }
}

/// Logs and clears anything the engine told the user this frame.
fn drain_notifications(notifier: &mut RecordingNotifier) {
    for (text, dismissible) in notifier.messages.drain(..) {
        log::info!("notice (dismissible: {dismissible}): {text}");
    }
    if notifier.hides > 0 {
        log::info!("notice hidden");
        notifier.hides = 0;
    }
    for _ in 0..notifier.cap_notices {
        log::info!("placement cap reached");
    }
    notifier.cap_notices = 0;
}
