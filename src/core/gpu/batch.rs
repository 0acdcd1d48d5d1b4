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

//! Per-frame primitive batches for the compute rasterizer
//!
//! Screen-space primitives are packed into `#[repr(C)]` records whose layout
//! matches the WGSL structs in `shaders/rasterize.wgsl` field for field.
//! Triangles are grouped by texture so that each dispatch binds exactly one
//! texel buffer; untextured triangles and all lines share the solid batch.

use std::collections::BTreeMap;

use bytemuck::{Pod, Zeroable};

use crate::core::math::Vec3;
use crate::core::raster::{ScreenLine, ScreenTriangle, Vertex};
use crate::core::texture::TextureHandle;

/// Screen vertex as seen by the kernel (24 bytes)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GpuVertex {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub color: u32,
    pub u: f32,
    pub v: f32,
}

impl From<&Vertex> for GpuVertex {
    fn from(v: &Vertex) -> Self {
        Self {
            x: v.position.x,
            y: v.position.y,
            z: v.position.z,
            color: v.color,
            u: v.u,
            v: v.v,
        }
    }
}

/// Screen triangle with its flat lighting factor (80 bytes)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GpuTriangle {
    pub v0: GpuVertex,
    pub v1: GpuVertex,
    pub v2: GpuVertex,
    pub lighting: f32,
    pub _pad: u32,
}

impl From<&ScreenTriangle> for GpuTriangle {
    fn from(tri: &ScreenTriangle) -> Self {
        let [v0, v1, v2] = &tri.vertices;
        Self {
            v0: v0.into(),
            v1: v1.into(),
            v2: v2.into(),
            lighting: tri.lighting,
            _pad: 0,
        }
    }
}

/// Screen line (32 bytes)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GpuLine {
    pub x0: f32,
    pub y0: f32,
    pub z0: f32,
    pub x1: f32,
    pub y1: f32,
    pub z1: f32,
    pub color: u32,
    pub _pad: u32,
}

impl From<&ScreenLine> for GpuLine {
    fn from(line: &ScreenLine) -> Self {
        Self {
            x0: line.start.position.x,
            y0: line.start.position.y,
            z0: line.start.position.z,
            x1: line.end.position.x,
            y1: line.end.position.y,
            z1: line.end.position.z,
            color: line.color,
            _pad: 0,
        }
    }
}

/// Uniform block for one dispatch (48 bytes)
///
/// The trailing `vec4<f32>` keeps the block a multiple of 16 bytes as the
/// uniform address space requires.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct DispatchParams {
    pub width: u32,
    pub height: u32,
    pub triangle_count: u32,
    pub line_count: u32,
    pub texture_width: u32,
    pub texture_height: u32,
    pub use_texture: u32,
    pub _pad: u32,
    pub light_color: [f32; 4],
}

impl DispatchParams {
    pub fn new(width: u32, height: u32, light_color: Vec3) -> Self {
        Self {
            width,
            height,
            triangle_count: 0,
            line_count: 0,
            texture_width: 1,
            texture_height: 1,
            use_texture: 0,
            _pad: 0,
            light_color: [light_color.x, light_color.y, light_color.z, 1.0],
        }
    }
}

/// Primitives collected during one frame
#[derive(Debug, Default, Clone)]
pub struct BatchQueue {
    solid: Vec<GpuTriangle>,
    lines: Vec<GpuLine>,
    textured: BTreeMap<TextureHandle, Vec<GpuTriangle>>,
}

impl BatchQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything queued, keeping allocations
    pub fn clear(&mut self) {
        self.solid.clear();
        self.lines.clear();
        for triangles in self.textured.values_mut() {
            triangles.clear();
        }
    }

    pub fn push_triangle(&mut self, triangle: &ScreenTriangle, texture: Option<TextureHandle>) {
        let packed = GpuTriangle::from(triangle);
        match texture {
            Some(handle) => self.textured.entry(handle).or_default().push(packed),
            None => self.solid.push(packed),
        }
    }

    pub fn push_line(&mut self, line: &ScreenLine) {
        self.lines.push(GpuLine::from(line));
    }

    /// Untextured triangles
    pub fn solid(&self) -> &[GpuTriangle] {
        &self.solid
    }

    pub fn lines(&self) -> &[GpuLine] {
        &self.lines
    }

    /// Non-empty texture batches, in handle order
    pub fn textured(&self) -> impl Iterator<Item = (TextureHandle, &[GpuTriangle])> {
        self.textured
            .iter()
            .filter(|(_, triangles)| !triangles.is_empty())
            .map(|(&handle, triangles)| (handle, triangles.as_slice()))
    }

    /// Number of dispatches needed to draw the queue
    pub fn batch_count(&self) -> usize {
        let solid = usize::from(!self.solid.is_empty() || !self.lines.is_empty());
        solid + self.textured().count()
    }

    pub fn triangle_count(&self) -> usize {
        self.solid.len() + self.textured.values().map(Vec::len).sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.batch_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::texture::{Texture, TextureStore};

    fn tri(z: f32) -> ScreenTriangle {
        ScreenTriangle {
            vertices: [
                Vertex::new(0.0, 0.0, z),
                Vertex::new(0.0, 4.0, z),
                Vertex::new(4.0, 0.0, z),
            ],
            lighting: 0.5,
        }
    }

    fn handles() -> (TextureHandle, TextureHandle) {
        let mut store = TextureStore::new();
        let a = store.insert(Texture::checkerboard(2, 1, 0, 0).expect("valid"));
        let b = store.insert(Texture::checkerboard(2, 1, 0, 0).expect("valid"));
        (a, b)
    }

    #[test]
    fn test_record_sizes_match_kernel_layout() {
        assert_eq!(std::mem::size_of::<GpuVertex>(), 24);
        assert_eq!(std::mem::size_of::<GpuTriangle>(), 80);
        assert_eq!(std::mem::size_of::<GpuLine>(), 32);
        assert_eq!(std::mem::size_of::<DispatchParams>(), 48);
    }

    #[test]
    fn test_triangles_grouped_by_texture() {
        let (a, b) = handles();
        let mut queue = BatchQueue::new();
        queue.push_triangle(&tri(0.1), Some(b));
        queue.push_triangle(&tri(0.2), None);
        queue.push_triangle(&tri(0.3), Some(a));
        queue.push_triangle(&tri(0.4), Some(b));

        assert_eq!(queue.solid().len(), 1);
        let batches: Vec<_> = queue.textured().collect();
        assert_eq!(batches.len(), 2);
        assert_eq!(batches[0].0, a);
        assert_eq!(batches[1].0, b);
        // Submission order is kept inside a batch
        assert_eq!(batches[1].1[0].v0.z, 0.1);
        assert_eq!(batches[1].1[1].v0.z, 0.4);
        assert_eq!(queue.batch_count(), 3);
        assert_eq!(queue.triangle_count(), 4);
    }

    #[test]
    fn test_lines_alone_need_a_solid_dispatch() {
        let mut queue = BatchQueue::new();
        assert!(queue.is_empty());
        queue.push_line(&ScreenLine {
            start: Vertex::new(0.0, 0.0, 0.5),
            end: Vertex::new(3.0, 0.0, 0.5),
            color: 0xFFFF_FFFF,
        });
        assert_eq!(queue.batch_count(), 1);
        assert_eq!(queue.lines()[0].x1, 3.0);
    }

    #[test]
    fn test_clear_empties_every_batch() {
        let (a, _) = handles();
        let mut queue = BatchQueue::new();
        queue.push_triangle(&tri(0.5), Some(a));
        queue.push_triangle(&tri(0.5), None);
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.textured().count(), 0);
        assert_eq!(queue.triangle_count(), 0);
    }

    #[test]
    fn test_packing_keeps_attributes() {
        let mut t = tri(0.25);
        t.vertices[1] = t.vertices[1].with_uv(0.5, 0.75).with_color(0xFF12_3456);
        let packed = GpuTriangle::from(&t);
        assert_eq!(packed.v1.color, 0xFF12_3456);
        assert_eq!((packed.v1.u, packed.v1.v), (0.5, 0.75));
        assert_eq!(packed.lighting, 0.5);
    }
}
