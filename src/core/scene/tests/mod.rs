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

//! Scene graph tests against a recording backend

mod manager;

use crate::core::math::Mat4;
use crate::core::raster::Vertex;
use crate::core::scene::{BackendKind, RenderBackend};
use crate::core::texture::TextureHandle;

/// Triangle as it reached the backend
#[derive(Debug, Clone, Copy)]
pub(super) struct Submitted {
    pub world: Mat4,
    pub vertices: [Vertex; 3],
    pub texture: Option<TextureHandle>,
}

/// Backend that stores everything it is given
#[derive(Debug, Default)]
pub(super) struct RecordingBackend {
    pub triangles: Vec<Submitted>,
    pub lines: Vec<(Vertex, Vertex, u32)>,
}

impl RenderBackend for RecordingBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Cpu
    }

    fn submit_triangle(
        &mut self,
        world: &Mat4,
        vertices: [Vertex; 3],
        texture: Option<TextureHandle>,
    ) {
        self.triangles.push(Submitted {
            world: *world,
            vertices,
            texture,
        });
    }

    fn submit_line(&mut self, _world: &Mat4, start: Vertex, end: Vertex, color: u32) {
        self.lines.push((start, end, color));
    }
}
