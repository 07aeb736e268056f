// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture-to-world-transform engine and frame reconciliation for AR object
//! placement.
//!
//! `anchorage_core` turns raw multi-touch gestures into per-object 3-D
//! transform state that stays visually stable relative to a moving camera,
//! and runs the once-per-frame reconciliation that maps a bounded pool of
//! spatial anchors to renderable objects, gated on tracking quality. It is
//! `no_std` compatible (with `alloc`). The camera-pose/plane-tracking
//! subsystem and the rasterizer are external collaborators behind traits.
//!
//! # Architecture
//!
//! Touch input and rendering run on different threads; the tap queue is the
//! only structure that crosses between them:
//!
//! ```text
//!   input thread                           render thread
//!   ────────────                           ─────────────
//!   GestureInterpreter                     FrameReconciler::run_frame()
//!     │ pinch/twist/drag                       │
//!     ▼                                        ▼
//!   Scene + PlacementStore  ◄─(lock)─►   WorldTracker::update()
//!     │ tap                                    │ hit test, anchors
//!     ▼                                        ▼
//!   TapQueue ──────────(poll, 1/frame)──► SceneRenderer draw calls
//! ```
//!
//! **[`heading`]** — Quadrant-aware compass heading from two camera
//! orientation scalars, and the relative heading between the current frame
//! and the moment the active object was placed.
//!
//! **[`gesture`]** — Classifies detector callbacks (pinch, twist,
//! single-pointer drag, tap) into mutations of the active
//! [`TransformRecord`](placement::TransformRecord) and tap-queue entries.
//! Drag deltas are rotated from screen space into world space using the
//! relative camera heading.
//!
//! **[`placement`]** — Bounded arena binding each tracker anchor to an
//! object type and a lazily-initialized transform record. Hard cap of
//! [`MAX_PLACEMENTS`](placement::MAX_PLACEMENTS) live placements; indices
//! are stable for the whole session.
//!
//! **[`reconcile`]** — The per-frame loop: pull a tracker frame, consume at
//! most one queued tap, create anchors from accepted hits, and sequence
//! draw calls in placement order, skipping anchors the tracker has lost.
//!
//! **[`queue`]** — Bounded single-producer/single-consumer tap buffer with
//! non-blocking offer (drop on full) and poll.
//!
//! **[`tracker`]** / **[`render`]** / **[`notify`]** — The trait seams to
//! the world tracker, the rasterizer, and the UI notification surface.
//!
//! **[`transform`]** — Minimal column-major 4×4 matrix covering exactly the
//! operations the engine composes model matrices from.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod gesture;
pub mod heading;
pub mod notify;
pub mod placement;
pub mod queue;
pub mod reconcile;
pub mod render;
pub mod scene;
pub mod tracker;
pub mod transform;
