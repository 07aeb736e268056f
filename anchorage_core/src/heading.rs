// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadrant-aware camera heading resolution.
//!
//! The drag gesture needs to know how far the camera has swung around the
//! placed object since the moment it was placed. The tracker does not hand
//! us a compass heading directly; instead we derive one from two components
//! of the camera pose's first basis column (flat matrix elements 2 and 0),
//! each scaled to `[-1, 1]`. Since those components are a function of sine
//! and cosine of the yaw angle, the quadrant must be determined from their
//! signs before a heading can be read off.
//!
//! All functions here are pure and side-effect free.

use crate::transform::Mat4;

/// The two camera-orientation scalars a heading is derived from.
///
/// Captured from the display-oriented camera pose at two moments: when the
/// most recent anchor was created (the *origin*) and on the current frame.
/// Both snapshots are overwritten routinely; neither is long-lived state.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraSnapshot {
    /// Flat element 2 of the pose matrix (first column's Z component).
    pub value1: f64,
    /// Flat element 0 of the pose matrix (first column's X component).
    pub value2: f64,
}

impl CameraSnapshot {
    /// Captures the orientation scalars from a display-oriented camera pose.
    #[must_use]
    pub fn from_pose(pose: Mat4) -> Self {
        Self {
            value1: f64::from(pose.elem(2)),
            value2: f64::from(pose.elem(0)),
        }
    }

    /// The compass heading of this snapshot, in degrees `[0, 360)`.
    #[must_use]
    pub fn heading(self) -> f64 {
        heading(self.value1, self.value2)
    }
}

/// Resolves two orientation scalars in `[-1, 1]` into a heading in degrees
/// `[0, 360)`.
///
/// `value1` and `value2` are treated as scaled sine/cosine components:
/// `first = value1 * 90`, `second = value2 * 90`, and the signs of the pair
/// select one of four quadrant formulas. This mirrors the four-quadrant
/// inverse-trig decomposition of a 2-D basis vector into a compass heading.
#[must_use]
pub fn heading(value1: f64, value2: f64) -> f64 {
    let first_angle = value1 * 90.0;
    let second_angle = value2 * 90.0;
    if second_angle >= 0.0 && first_angle >= 0.0 {
        // First quadrant.
        first_angle
    } else if second_angle < 0.0 && first_angle >= 0.0 {
        // Second quadrant.
        90.0 + (90.0 - first_angle)
    } else if second_angle < 0.0 && first_angle < 0.0 {
        // Third quadrant.
        180.0 - first_angle
    } else {
        // Fourth quadrant.
        270.0 + (90.0 + first_angle)
    }
}

/// The camera's heading change since `origin`, normalized to `[0, 360)`.
///
/// Equivalent to `(current.heading() - origin.heading() + 360) mod 360`.
#[must_use]
pub fn relative_heading(current: CameraSnapshot, origin: CameraSnapshot) -> f64 {
    relative_degrees(current.heading(), origin.heading())
}

/// Normalizes the difference of two headings (in degrees) to `[0, 360)`.
///
/// Invariant under adding any multiple of 360° to either input.
#[must_use]
pub fn relative_degrees(current: f64, origin: f64) -> f64 {
    ((current - origin) % 360.0 + 360.0) % 360.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quadrant_boundaries() {
        // Q1: both scalars non-negative; heading is first_angle directly.
        assert_eq!(heading(0.0, 1.0), 0.0);
        assert_eq!(heading(0.5, 0.5), 45.0);
        assert_eq!(heading(1.0, 1.0), 90.0);
        // Q2: second negative, first non-negative.
        assert_eq!(heading(1.0, -1.0), 90.0);
        assert_eq!(heading(0.5, -0.5), 135.0);
        assert_eq!(heading(0.0, -1.0), 180.0);
        // Q3: both negative.
        assert_eq!(heading(-0.5, -0.5), 225.0);
        assert_eq!(heading(-1.0, -1.0), 270.0);
        // Q4: second non-negative, first negative.
        assert_eq!(heading(-1.0, 0.0), 270.0);
        assert_eq!(heading(-0.5, 0.5), 315.0);
    }

    #[test]
    fn heading_stays_in_range() {
        let mut v1 = -1.0_f64;
        while v1 <= 1.0 {
            let mut v2 = -1.0_f64;
            while v2 <= 1.0 {
                let h = heading(v1, v2);
                assert!((0.0..360.0).contains(&h), "heading({v1}, {v2}) = {h}");
                v2 += 0.125;
            }
            v1 += 0.125;
        }
    }

    #[test]
    fn relative_degrees_normalizes() {
        assert_eq!(relative_degrees(45.0, 0.0), 45.0);
        assert_eq!(relative_degrees(0.0, 45.0), 315.0);
        assert_eq!(relative_degrees(350.0, 10.0), 340.0);
    }

    #[test]
    fn relative_degrees_invariant_under_full_turns() {
        for k in [-2.0_f64, -1.0, 1.0, 3.0] {
            let base = relative_degrees(123.0, 47.0);
            assert_eq!(relative_degrees(123.0 + 360.0 * k, 47.0), base);
            assert_eq!(relative_degrees(123.0, 47.0 + 360.0 * k), base);
        }
    }

    #[test]
    fn snapshot_captures_flat_elements_two_and_zero() {
        let mut pose = Mat4::IDENTITY;
        pose.cols[0][2] = 0.5; // flat element 2
        pose.cols[0][0] = -0.25; // flat element 0
        let snap = CameraSnapshot::from_pose(pose);
        assert_eq!(snap.value1, 0.5);
        assert_eq!(snap.value2, -0.25);
    }

    #[test]
    fn relative_heading_between_snapshots() {
        // Origin facing Q1 at 0°, current swung to mid-Q1 at 45°.
        let origin = CameraSnapshot {
            value1: 0.0,
            value2: 1.0,
        };
        let current = CameraSnapshot {
            value1: 0.5,
            value2: 0.5,
        };
        assert_eq!(relative_heading(current, origin), 45.0);
        // Swinging the other way wraps.
        assert_eq!(relative_heading(origin, current), 315.0);
    }
}
