// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 itsakeyfut
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Matrix types
//!
//! # Convention
//!
//! All matrices act on **row vectors**: a point is transformed as `v' = v · M`.
//! Consequences that the rest of the crate relies on:
//!
//! - The translation of an affine matrix lives in the W row (`m[3][0..3]`).
//! - `A * B` applies `A` first, then `B`. A world matrix is therefore
//!   `S * Rx * Ry * Rz * T`.
//! - Rows double as basis axes: row 0 is the X axis, row 1 the Y axis,
//!   row 2 the Z axis and row 3 the position.

use std::ops::Mul;

use super::{degrees_to_radians, Vec3, Vec4};

/// 3×3 matrix (row-major, row-vector convention)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat3 {
    pub m: [[f32; 3]; 3],
}

impl Mat3 {
    /// Determinants smaller than this are treated as singular
    pub const SINGULAR_EPSILON: f32 = 1e-8;

    pub const fn identity() -> Self {
        Self {
            m: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
        }
    }

    pub const fn from_rows(m: [[f32; 3]; 3]) -> Self {
        Self { m }
    }

    pub fn transpose(&self) -> Mat3 {
        let m = &self.m;
        Mat3::from_rows([
            [m[0][0], m[1][0], m[2][0]],
            [m[0][1], m[1][1], m[2][1]],
            [m[0][2], m[1][2], m[2][2]],
        ])
    }

    pub fn determinant(&self) -> f32 {
        let m = &self.m;
        m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
            - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
            + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
    }

    /// General inverse via the adjugate
    ///
    /// Returns `None` when the matrix is singular.
    pub fn inverse(&self) -> Option<Mat3> {
        let det = self.determinant();
        if det.abs() < Self::SINGULAR_EPSILON {
            return None;
        }
        let m = &self.m;
        let inv = 1.0 / det;
        Some(Mat3::from_rows([
            [
                (m[1][1] * m[2][2] - m[1][2] * m[2][1]) * inv,
                (m[0][2] * m[2][1] - m[0][1] * m[2][2]) * inv,
                (m[0][1] * m[1][2] - m[0][2] * m[1][1]) * inv,
            ],
            [
                (m[1][2] * m[2][0] - m[1][0] * m[2][2]) * inv,
                (m[0][0] * m[2][2] - m[0][2] * m[2][0]) * inv,
                (m[0][2] * m[1][0] - m[0][0] * m[1][2]) * inv,
            ],
            [
                (m[1][0] * m[2][1] - m[1][1] * m[2][0]) * inv,
                (m[0][1] * m[2][0] - m[0][0] * m[2][1]) * inv,
                (m[0][0] * m[1][1] - m[0][1] * m[1][0]) * inv,
            ],
        ]))
    }

    /// Row-vector product `v · M`
    pub fn transform(&self, v: Vec3) -> Vec3 {
        let m = &self.m;
        Vec3::new(
            v.x * m[0][0] + v.y * m[1][0] + v.z * m[2][0],
            v.x * m[0][1] + v.y * m[1][1] + v.z * m[2][1],
            v.x * m[0][2] + v.y * m[1][2] + v.z * m[2][2],
        )
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Mat3 {
    type Output = Mat3;

    fn mul(self, rhs: Mat3) -> Mat3 {
        let mut out = [[0.0f32; 3]; 3];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| self.m[i][k] * rhs.m[k][j]).sum();
            }
        }
        Mat3::from_rows(out)
    }
}

/// 4×4 matrix (row-major, row-vector convention)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4 {
    pub m: [[f32; 4]; 4],
}

impl Mat4 {
    pub const fn identity() -> Self {
        Self {
            m: [
                [1.0, 0.0, 0.0, 0.0],
                [0.0, 1.0, 0.0, 0.0],
                [0.0, 0.0, 1.0, 0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        }
    }

    pub const fn from_rows(m: [[f32; 4]; 4]) -> Self {
        Self { m }
    }

    /// Row `index` as a vector (0 = X axis, 1 = Y axis, 2 = Z axis, 3 = W/position)
    #[inline(always)]
    pub fn row(&self, index: usize) -> Vec4 {
        let r = self.m[index];
        Vec4::new(r[0], r[1], r[2], r[3])
    }

    /// Column `index` as a vector
    #[inline(always)]
    pub fn column(&self, index: usize) -> Vec4 {
        Vec4::new(
            self.m[0][index],
            self.m[1][index],
            self.m[2][index],
            self.m[3][index],
        )
    }

    /// Translation part (the W row)
    #[inline(always)]
    pub fn translation_part(&self) -> Vec3 {
        self.row(3).xyz()
    }

    /// Upper-left 3×3 block
    pub fn rotation_part(&self) -> Mat3 {
        let m = &self.m;
        Mat3::from_rows([
            [m[0][0], m[0][1], m[0][2]],
            [m[1][0], m[1][1], m[1][2]],
            [m[2][0], m[2][1], m[2][2]],
        ])
    }

    pub fn transpose(&self) -> Mat4 {
        let mut out = [[0.0f32; 4]; 4];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = self.m[j][i];
            }
        }
        Mat4::from_rows(out)
    }

    /// Row-vector product `v · M`, W included
    #[inline]
    pub fn transform(&self, v: Vec4) -> Vec4 {
        let m = &self.m;
        Vec4::new(
            v.x * m[0][0] + v.y * m[1][0] + v.z * m[2][0] + v.w * m[3][0],
            v.x * m[0][1] + v.y * m[1][1] + v.z * m[2][1] + v.w * m[3][1],
            v.x * m[0][2] + v.y * m[1][2] + v.z * m[2][2] + v.w * m[3][2],
            v.x * m[0][3] + v.y * m[1][3] + v.z * m[2][3] + v.w * m[3][3],
        )
    }

    /// Transform a point (w = 1), dropping the resulting W
    #[inline]
    pub fn transform_point(&self, p: Vec3) -> Vec3 {
        self.transform(p.to_point()).xyz()
    }

    /// Transform a direction (w = 0)
    #[inline]
    pub fn transform_vector(&self, v: Vec3) -> Vec3 {
        self.transform(Vec4::new(v.x, v.y, v.z, 0.0)).xyz()
    }

    /// Inverse of a rigid transform
    ///
    /// Transposes the rotation block and maps the translation to `-t · Rᵀ`.
    /// The matrix must contain only rotation and translation; scale or shear
    /// produce a wrong result.
    pub fn rigid_inverse(&self) -> Mat4 {
        let rt = self.rotation_part().transpose();
        let t = -rt.transform(self.translation_part());
        let r = &rt.m;
        Mat4::from_rows([
            [r[0][0], r[0][1], r[0][2], 0.0],
            [r[1][0], r[1][1], r[1][2], 0.0],
            [r[2][0], r[2][1], r[2][2], 0.0],
            [t.x, t.y, t.z, 1.0],
        ])
    }

    pub fn translation(t: Vec3) -> Mat4 {
        let mut m = Mat4::identity();
        m.m[3][0] = t.x;
        m.m[3][1] = t.y;
        m.m[3][2] = t.z;
        m
    }

    pub fn scale(s: Vec3) -> Mat4 {
        let mut m = Mat4::identity();
        m.m[0][0] = s.x;
        m.m[1][1] = s.y;
        m.m[2][2] = s.z;
        m
    }

    pub fn rotation_x(degrees: f32) -> Mat4 {
        let (s, c) = degrees_to_radians(degrees).sin_cos();
        Mat4::from_rows([
            [1.0, 0.0, 0.0, 0.0],
            [0.0, c, -s, 0.0],
            [0.0, s, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotation_y(degrees: f32) -> Mat4 {
        let (s, c) = degrees_to_radians(degrees).sin_cos();
        Mat4::from_rows([
            [c, 0.0, s, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [-s, 0.0, c, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    pub fn rotation_z(degrees: f32) -> Mat4 {
        let (s, c) = degrees_to_radians(degrees).sin_cos();
        Mat4::from_rows([
            [c, -s, 0.0, 0.0],
            [s, c, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// World matrix from position, Euler rotation (degrees) and scale
    ///
    /// Composed as `S * Rx * Ry * Rz * T`.
    pub fn from_transform(position: Vec3, rotation: Vec3, scale: Vec3) -> Mat4 {
        Mat4::scale(scale)
            * Mat4::rotation_x(rotation.x)
            * Mat4::rotation_y(rotation.y)
            * Mat4::rotation_z(rotation.z)
            * Mat4::translation(position)
    }

    /// Perspective projection
    ///
    /// `aspect` is height / width and scales the X axis. The output W equals
    /// the view-space Z, and view-space Z in `[near, far]` lands in `[0, 1]`
    /// after the divide.
    pub fn perspective(fov_y_degrees: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        let y_scale = 1.0 / degrees_to_radians(fov_y_degrees * 0.5).tan();
        let x_scale = y_scale * aspect;
        let depth = far / (far - near);
        Mat4::from_rows([
            [x_scale, 0.0, 0.0, 0.0],
            [0.0, y_scale, 0.0, 0.0],
            [0.0, 0.0, depth, 1.0],
            [0.0, 0.0, -near * depth, 0.0],
        ])
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::identity()
    }
}

impl Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        let mut out = [[0.0f32; 4]; 4];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..4).map(|k| self.m[i][k] * rhs.m[k][j]).sum();
            }
        }
        Mat4::from_rows(out)
    }
}
