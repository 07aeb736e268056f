// Copyright 2026 the Anchorage Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal column-major 4×4 transform.
//!
//! This type covers the subset of matrix operations the engine actually
//! performs on anchor poses and camera matrices (identity, multiply,
//! in-place translation, the Y-rotation overwrite, flat element access)
//! without pulling in a full linear-algebra crate. Storage is `f32` to match
//! what trackers and GL-style renderers exchange.
//!
//! The in-place operations are deliberate: the model matrix for a placed
//! object is built by taking the anchor pose and then mutating it
//! (translation first, then the Y-rotation overwrite) rather than by
//! composing fresh matrices. See [`Mat4::overwrite_y_rotation`] for why the
//! order matters.

use core::ops::Mul;
#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

/// A column-major 4×4 affine transform stored as `[[f32; 4]; 4]`.
///
/// Each inner array is one *column* of the matrix, matching the flat
/// 16-element layout used by GL-style APIs: flat element `i` is
/// `cols[i / 4][i % 4]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat4 {
    /// Four columns, each a 4-element array `[x, y, z, w]`.
    pub cols: [[f32; 4]; 4],
}

impl Mat4 {
    /// The 4×4 identity matrix.
    pub const IDENTITY: Self = Self {
        cols: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Creates a transform from four column arrays.
    #[inline]
    #[must_use]
    pub const fn from_cols(col0: [f32; 4], col1: [f32; 4], col2: [f32; 4], col3: [f32; 4]) -> Self {
        Self {
            cols: [col0, col1, col2, col3],
        }
    }

    /// Creates a transform from a flat column-major 16-element array.
    #[inline]
    #[must_use]
    pub const fn from_cols_array(m: [f32; 16]) -> Self {
        Self {
            cols: [
                [m[0], m[1], m[2], m[3]],
                [m[4], m[5], m[6], m[7]],
                [m[8], m[9], m[10], m[11]],
                [m[12], m[13], m[14], m[15]],
            ],
        }
    }

    /// Returns the matrix as a flat column-major 16-element array.
    #[inline]
    #[must_use]
    pub const fn to_cols_array(self) -> [f32; 16] {
        let c = &self.cols;
        [
            c[0][0], c[0][1], c[0][2], c[0][3], c[1][0], c[1][1], c[1][2], c[1][3], c[2][0],
            c[2][1], c[2][2], c[2][3], c[3][0], c[3][1], c[3][2], c[3][3],
        ]
    }

    /// Returns column `i` (0-based).
    ///
    /// # Panics
    ///
    /// Panics if `i >= 4`.
    #[inline]
    #[must_use]
    pub const fn col(self, i: usize) -> [f32; 4] {
        self.cols[i]
    }

    /// Returns flat column-major element `i`, as indexed by GL-style APIs.
    ///
    /// # Panics
    ///
    /// Panics if `i >= 16`.
    #[inline]
    #[must_use]
    pub const fn elem(self, i: usize) -> f32 {
        self.cols[i / 4][i % 4]
    }

    /// Creates a pure translation transform.
    #[inline]
    #[must_use]
    pub const fn from_translation(x: f32, y: f32, z: f32) -> Self {
        Self {
            cols: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [x, y, z, 1.0],
            ],
        }
    }

    /// Creates a uniform scale transform.
    #[inline]
    #[must_use]
    pub const fn from_scale(s: f32) -> Self {
        Self {
            cols: [
                [s, 0.0, 0.0, 0.0],
                [0.0, s, 0.0, 0.0],
                [0.0, 0.0, s, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    /// Post-multiplies this matrix by a translation, in place:
    /// `self = self * T(x, y, z)`.
    ///
    /// Only the translation column is rewritten; the basis columns are left
    /// untouched. This is the distance-along-local-axes translation used
    /// when offsetting an object from its anchor pose.
    #[inline]
    pub fn translate_in_place(&mut self, x: f32, y: f32, z: f32) {
        let mut i = 0;
        while i < 4 {
            self.cols[3][i] += self.cols[0][i] * x + self.cols[1][i] * y + self.cols[2][i] * z;
            i += 1;
        }
    }

    /// Overwrites the X/Z basis entries with a Y-axis rotation by `theta`
    /// radians, leaving the translation column untouched.
    ///
    /// Flat elements 0, 2, 5, 8, 10, and 15 are replaced with the rotation's
    /// `cos`/`sin` entries. Because the rotation is injected into an
    /// already-translated matrix instead of recomposed from identity, the
    /// result differs from a canonical translate-then-rotate composition;
    /// the placed object's on-screen behavior depends on this exact
    /// overwrite happening *after* [`translate_in_place`]. A `theta` of
    /// exactly `0.0` leaves the matrix unmodified.
    ///
    /// [`translate_in_place`]: Self::translate_in_place
    pub fn overwrite_y_rotation(&mut self, theta: f32) {
        if theta != 0.0 {
            let (s, c) = sin_cos(theta);
            self.cols[0][0] = c;
            self.cols[0][2] = s;
            self.cols[1][1] = 1.0;
            self.cols[2][0] = -s;
            self.cols[2][2] = c;
            self.cols[3][3] = 1.0;
        }
    }

    /// Is every element of this transform [finite]?
    ///
    /// [finite]: f32::is_finite
    #[inline]
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        let c = &self.cols;
        c[0][0].is_finite()
            && c[0][1].is_finite()
            && c[0][2].is_finite()
            && c[0][3].is_finite()
            && c[1][0].is_finite()
            && c[1][1].is_finite()
            && c[1][2].is_finite()
            && c[1][3].is_finite()
            && c[2][0].is_finite()
            && c[2][1].is_finite()
            && c[2][2].is_finite()
            && c[2][3].is_finite()
            && c[3][0].is_finite()
            && c[3][1].is_finite()
            && c[3][2].is_finite()
            && c[3][3].is_finite()
    }
}

#[cfg(feature = "std")]
#[inline]
fn sin_cos(theta: f32) -> (f32, f32) {
    theta.sin_cos()
}

#[cfg(not(feature = "std"))]
#[inline]
fn sin_cos(theta: f32) -> (f32, f32) {
    (theta.sin(), theta.cos())
}

impl Default for Mat4 {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Mat4 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let a = &self.cols;
        let b = &rhs.cols;
        let mut out = [[0.0_f32; 4]; 4];
        let mut j = 0;
        while j < 4 {
            let mut i = 0;
            while i < 4 {
                out[j][i] =
                    a[0][i] * b[j][0] + a[1][i] * b[j][1] + a[2][i] * b[j][2] + a[3][i] * b[j][3];
                i += 1;
            }
            j += 1;
        }
        Self { cols: out }
    }
}
