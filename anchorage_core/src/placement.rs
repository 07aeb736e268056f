// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounded arena binding tracker anchors to object types and transforms.
//!
//! Each successful hit-test produces one [`Placement`]: the tracker-owned
//! anchor handle, the object type that was selected when the user tapped,
//! and a lazily-created [`TransformRecord`] holding the gesture-driven
//! scale, rotation, and translation. Placements are addressed by
//! [`PlacementId`]; slots are never destroyed, reused, or compacted within a
//! session, so an id stays valid for the session's lifetime and iteration
//! order is anchor-creation order.
//!
//! The arena enforces a hard cap of [`MAX_PLACEMENTS`] live placements.
//! A rejected bind mutates nothing; the caller surfaces the rejection to the
//! user once per attempt.

use alloc::vec::Vec;
use core::fmt;

/// Hard cap on live placements per session.
///
/// Keeps both the rasterizer and the tracker's anchor pool bounded. The
/// 21st accepted hit-test is a no-op that only notifies the user.
pub const MAX_PLACEMENTS: usize = 20;

/// Lower clamp bound for the pinch-to-scale gesture.
pub const MIN_SCALE: f32 = 0.1;

/// Upper clamp bound for the pinch-to-scale gesture.
pub const MAX_SCALE: f32 = 5.0;

/// A tracker-owned handle to a fixed point in physical space.
///
/// Anchors are created and refined by the world tracker; this crate stores
/// the handle without interpreting the value. An anchor persists until
/// explicitly released (which the base design never does).
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnchorId(pub u64);

impl fmt::Debug for AnchorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AnchorId({})", self.0)
    }
}

/// Index into the externally-owned list of renderable object prototypes.
///
/// The mesh and shader state behind it belong to the renderer side; this
/// crate only carries the index through to draw calls.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectTypeId(pub u32);

impl fmt::Debug for ObjectTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectTypeId({})", self.0)
    }
}

/// A handle to a placement in a [`PlacementStore`].
///
/// Ids are assigned in anchor-creation order and are stable for the whole
/// session.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlacementId {
    idx: u32,
}

impl PlacementId {
    /// Returns the raw slot index (for diagnostics only).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }
}

impl fmt::Debug for PlacementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PlacementId({})", self.idx)
    }
}

/// Per-placement gesture-driven transform state, in the anchor's local frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransformRecord {
    /// Uniform scale, clamped to `[MIN_SCALE, MAX_SCALE]` by the pinch
    /// gesture.
    pub scale: f32,
    /// Accumulated Y-axis rotation in radians. Grows without bound; it only
    /// ever feeds a trigonometric rotation, so no wraparound is applied.
    pub rotation_theta: f32,
    /// Translation along the anchor's local X axis.
    pub translation_x: f32,
    /// Translation along the anchor's local Z axis.
    pub translation_z: f32,
}

impl TransformRecord {
    /// The default record for a freshly-drawn placement: unit scale, no
    /// rotation, translation seeded from the camera's view-matrix X/Z offset
    /// at first-draw time.
    #[must_use]
    pub const fn with_translation(x: f32, z: f32) -> Self {
        Self {
            scale: 1.0,
            rotation_theta: 0.0,
            translation_x: x,
            translation_z: z,
        }
    }
}

/// One anchor→object binding plus its transform state.
#[derive(Clone, Copy, Debug)]
struct Placement {
    anchor: AnchorId,
    object_type: ObjectTypeId,
    /// Created lazily the first frame the placement is drawn.
    record: Option<TransformRecord>,
}

/// The bind was rejected because [`MAX_PLACEMENTS`] placements are live.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CapacityError;

impl fmt::Display for CapacityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "placement cap ({MAX_PLACEMENTS}) reached")
    }
}

impl core::error::Error for CapacityError {}

/// Bounded arena of placements, in anchor-creation order.
#[derive(Debug, Default)]
pub struct PlacementStore {
    entries: Vec<Placement>,
}

impl PlacementStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Binds a freshly-created anchor to an object type.
    ///
    /// The transform record is *not* created here; it appears the first time
    /// the placement is drawn (see [`record_or_init_mut`]).
    ///
    /// # Errors
    ///
    /// Returns [`CapacityError`] when [`MAX_PLACEMENTS`] placements are
    /// already live. A rejected bind leaves the store unchanged.
    ///
    /// [`record_or_init_mut`]: Self::record_or_init_mut
    #[expect(
        clippy::cast_possible_truncation,
        reason = "the live count is capped at MAX_PLACEMENTS"
    )]
    pub fn bind(
        &mut self,
        anchor: AnchorId,
        object_type: ObjectTypeId,
    ) -> Result<PlacementId, CapacityError> {
        if self.entries.len() >= MAX_PLACEMENTS {
            return Err(CapacityError);
        }
        let idx = self.entries.len() as u32;
        self.entries.push(Placement {
            anchor,
            object_type,
            record: None,
        });
        Ok(PlacementId { idx })
    }

    /// Number of live placements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no placements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether the store is at [`MAX_PLACEMENTS`].
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.entries.len() >= MAX_PLACEMENTS
    }

    /// Iterates placement ids in anchor-creation order.
    #[expect(
        clippy::cast_possible_truncation,
        reason = "the live count is capped at MAX_PLACEMENTS"
    )]
    pub fn ids(&self) -> impl Iterator<Item = PlacementId> + use<> {
        (0..self.entries.len() as u32).map(|idx| PlacementId { idx })
    }

    /// Returns the anchor bound at `id`.
    #[must_use]
    pub fn anchor(&self, id: PlacementId) -> AnchorId {
        self.entry(id).anchor
    }

    /// Returns the object type bound at `id`.
    #[must_use]
    pub fn object_type(&self, id: PlacementId) -> ObjectTypeId {
        self.entry(id).object_type
    }

    /// Returns the transform record at `id`, if it has been created.
    #[must_use]
    pub fn record(&self, id: PlacementId) -> Option<&TransformRecord> {
        self.entry(id).record.as_ref()
    }

    /// Returns the transform record at `id` if it already exists.
    ///
    /// Gesture handlers use this: gestures are a no-op until the placement
    /// has been drawn once and its record exists.
    #[must_use]
    pub fn record_existing_mut(&mut self, id: PlacementId) -> Option<&mut TransformRecord> {
        self.entry_mut(id).record.as_mut()
    }

    /// Returns the transform record at `id`, creating it with defaults on
    /// first access.
    ///
    /// `default_translation` is the camera's view-matrix-derived X/Z offset
    /// at first-draw time; it is ignored on every later call, so repeated
    /// access is idempotent.
    pub fn record_or_init_mut(
        &mut self,
        id: PlacementId,
        default_translation: (f32, f32),
    ) -> &mut TransformRecord {
        let (x, z) = default_translation;
        self.entry_mut(id)
            .record
            .get_or_insert_with(|| TransformRecord::with_translation(x, z))
    }

    fn entry(&self, id: PlacementId) -> &Placement {
        assert!(
            (id.idx as usize) < self.entries.len(),
            "unknown PlacementId({}) (len {})",
            id.idx,
            self.entries.len()
        );
        &self.entries[id.idx as usize]
    }

    fn entry_mut(&mut self, id: PlacementId) -> &mut Placement {
        assert!(
            (id.idx as usize) < self.entries.len(),
            "unknown PlacementId({}) (len {})",
            id.idx,
            self.entries.len()
        );
        &mut self.entries[id.idx as usize]
    }
}
