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

//! Vertex and pixel records passed between pipeline stages

use super::color::{lerp_color, WHITE};
use crate::core::math::{lerp, Mat4, Vec3, Vec4};

/// Pipeline vertex
///
/// The position is homogeneous. Its meaning depends on the stage: model
/// space on input, view space after [`VertexShader::to_view`], and screen
/// space (pixels, with NDC depth in `z`) after projection.
///
/// [`VertexShader::to_view`]: super::shader::VertexShader::to_view
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec4,
    /// Packed `0xAARRGGBB`
    pub color: u32,
    pub u: f32,
    pub v: f32,
}

impl Vertex {
    /// Vertex at `(x, y, z, 1)`, white, UV `(0, 0)`
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self {
            position: Vec4::new(x, y, z, 1.0),
            color: WHITE,
            u: 0.0,
            v: 0.0,
        }
    }

    pub fn from_point(p: Vec3) -> Self {
        Self::new(p.x, p.y, p.z)
    }

    pub const fn with_uv(mut self, u: f32, v: f32) -> Self {
        self.u = u;
        self.v = v;
        self
    }

    pub const fn with_color(mut self, color: u32) -> Self {
        self.color = color;
        self
    }

    #[inline(always)]
    pub fn point(&self) -> Vec3 {
        self.position.xyz()
    }

    /// Copy with the position multiplied by `m` (row-vector product)
    #[inline]
    pub fn transformed(&self, m: &Mat4) -> Vertex {
        Vertex {
            position: m.transform(self.position),
            ..*self
        }
    }

    /// Interpolate every attribute with the same parameter
    pub fn lerp(&self, other: &Vertex, t: f32) -> Vertex {
        Vertex {
            position: self.position.lerp(other.position, t),
            color: lerp_color(self.color, other.color, t),
            u: lerp(self.u, other.u, t),
            v: lerp(self.v, other.v, t),
        }
    }
}

impl Default for Vertex {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

/// A screen pixel handed to the pixel stage
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pixel {
    pub x: i32,
    pub y: i32,
    pub color: u32,
}

impl Pixel {
    pub const fn new(x: i32, y: i32, color: u32) -> Self {
        Self { x, y, color }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lerp_interpolates_all_attributes() {
        let a = Vertex::new(0.0, 0.0, 1.0)
            .with_uv(0.0, 0.0)
            .with_color(0xFF00_0000);
        let b = Vertex::new(2.0, 4.0, 3.0)
            .with_uv(1.0, 0.5)
            .with_color(0xFFFF_FFFF);
        let m = a.lerp(&b, 0.5);
        assert_eq!(m.position, Vec4::new(1.0, 2.0, 2.0, 1.0));
        assert_eq!((m.u, m.v), (0.5, 0.25));
        assert_eq!(m.color, 0xFF80_8080);
    }

    #[test]
    fn test_transformed_keeps_attributes() {
        let v = Vertex::new(1.0, 0.0, 0.0).with_uv(0.3, 0.7).with_color(0xFF12_3456);
        let t = v.transformed(&Mat4::translation(Vec3::new(0.0, 1.0, 0.0)));
        assert_eq!(t.point(), Vec3::new(1.0, 1.0, 0.0));
        assert_eq!((t.u, t.v, t.color), (0.3, 0.7, 0xFF12_3456));
    }
}
