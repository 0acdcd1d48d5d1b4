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

//! Near-plane clipping
//!
//! Runs in view space, after [`VertexShader::to_view`] and before any division
//! by W. A vertex is in front of the plane when `z >= near`.
//!
//! # Triangle cases
//!
//! | Vertices in front | Output |
//! |-------------------|--------|
//! | 0 | nothing |
//! | 1 | one triangle: the front vertex and the two edge intersections |
//! | 2 | a quad, split into two triangles |
//! | 3 | the input triangle |
//!
//! The polygon is walked edge by edge (Sutherland–Hodgman against a single
//! plane) and fanned from its first vertex, so the winding of every output
//! triangle matches the input and back-face culling still works after
//! clipping.
//!
//! Intersections interpolate position, colour and UV with the same parameter
//! `t = (near - z_behind) / (z_front - z_behind)`, measured from the vertex
//! behind the plane.
//!
//! [`VertexShader::to_view`]: super::shader::VertexShader::to_view

use super::vertex::Vertex;

/// Up to two triangles produced by clipping one triangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClippedTriangles {
    triangles: [[Vertex; 3]; 2],
    len: usize,
}

impl ClippedTriangles {
    fn empty() -> Self {
        Self {
            triangles: [[Vertex::default(); 3]; 2],
            len: 0,
        }
    }

    fn push(&mut self, triangle: [Vertex; 3]) {
        debug_assert!(self.len < 2);
        self.triangles[self.len] = triangle;
        self.len += 1;
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[[Vertex; 3]] {
        &self.triangles[..self.len]
    }

    pub fn iter(&self) -> impl Iterator<Item = &[Vertex; 3]> {
        self.as_slice().iter()
    }
}

#[inline(always)]
fn in_front(v: &Vertex, near: f32) -> bool {
    v.position.z >= near
}

/// Point where the edge `behind → front` crosses the plane
#[inline]
fn intersect(behind: &Vertex, front: &Vertex, near: f32) -> Vertex {
    let t = (near - behind.position.z) / (front.position.z - behind.position.z);
    let mut v = behind.lerp(front, t);
    // Land exactly on the plane regardless of rounding
    v.position.z = near;
    v
}

/// Clip a view-space triangle against the near plane
///
/// # Examples
///
/// ```
/// use twinraster::core::raster::{clip_triangle, Vertex};
///
/// let tri = [
///     Vertex::new(0.0, 0.0, 1.0),
///     Vertex::new(1.0, 0.0, 1.0),
///     Vertex::new(0.0, 1.0, -1.0), // behind
/// ];
/// let out = clip_triangle(&tri, 0.1);
/// assert_eq!(out.len(), 2);
/// assert!(out.iter().flatten().all(|v| v.position.z >= 0.1));
/// ```
pub fn clip_triangle(triangle: &[Vertex; 3], near: f32) -> ClippedTriangles {
    let mut out = ClippedTriangles::empty();
    let front = triangle.iter().filter(|v| in_front(v, near)).count();

    match front {
        0 => out,
        3 => {
            out.push(*triangle);
            out
        }
        _ => {
            // At most 4 vertices survive clipping against one plane
            let mut polygon = [Vertex::default(); 4];
            let mut count = 0;
            for i in 0..3 {
                let current = &triangle[i];
                let next = &triangle[(i + 1) % 3];
                let current_in = in_front(current, near);
                let next_in = in_front(next, near);

                if current_in {
                    polygon[count] = *current;
                    count += 1;
                }
                if current_in != next_in {
                    polygon[count] = if current_in {
                        intersect(next, current, near)
                    } else {
                        intersect(current, next, near)
                    };
                    count += 1;
                }
            }

            for i in 1..count - 1 {
                out.push([polygon[0], polygon[i], polygon[i + 1]]);
            }
            log::trace!(
                "Clipped triangle with {} vertices in front into {}",
                front,
                out.len()
            );
            out
        }
    }
}

/// Clip a view-space line against the near plane
///
/// Returns `None` when both endpoints are behind the plane. A single endpoint
/// behind the plane is moved onto it.
pub fn clip_line(start: &Vertex, end: &Vertex, near: f32) -> Option<(Vertex, Vertex)> {
    match (in_front(start, near), in_front(end, near)) {
        (false, false) => None,
        (true, true) => Some((*start, *end)),
        (true, false) => Some((*start, intersect(end, start, near))),
        (false, true) => Some((intersect(start, end, near), *end)),
    }
}
