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

//! Indexed triangle meshes

use crate::core::raster::Vertex;

/// Model-space vertices plus index triples
///
/// Indices are read three at a time. A trailing partial triple is ignored,
/// and a triple that points past the vertex list is skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        Self { vertices, indices }
    }

    /// Unit cube centred on the origin
    ///
    /// 24 vertices so every face carries its own UVs, 36 indices.
    pub fn cube() -> Self {
        Self::new(cube_vertices(), cube_indices())
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn is_empty(&self) -> bool {
        self.indices.len() < 3
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Vertex triples in index order
    pub fn triangles(&self) -> impl Iterator<Item = [Vertex; 3]> + '_ {
        self.indices.chunks_exact(3).filter_map(|tri| {
            let fetch = |i: u32| self.vertices.get(i as usize).copied();
            match (fetch(tri[0]), fetch(tri[1]), fetch(tri[2])) {
                (Some(a), Some(b), Some(c)) => Some([a, b, c]),
                _ => {
                    log::trace!("Skipping out-of-range index triple {:?}", tri);
                    None
                }
            }
        })
    }
}

/// Corners of each face as TL, TR, BR, BL
const CUBE_FACES: [[[f32; 3]; 4]; 6] = [
    // Front (z = +0.5)
    [[-0.5, 0.5, 0.5], [0.5, 0.5, 0.5], [0.5, -0.5, 0.5], [-0.5, -0.5, 0.5]],
    // Back (z = -0.5)
    [[0.5, 0.5, -0.5], [-0.5, 0.5, -0.5], [-0.5, -0.5, -0.5], [0.5, -0.5, -0.5]],
    // Top (y = +0.5)
    [[-0.5, 0.5, -0.5], [0.5, 0.5, -0.5], [0.5, 0.5, 0.5], [-0.5, 0.5, 0.5]],
    // Bottom (y = -0.5)
    [[-0.5, -0.5, 0.5], [0.5, -0.5, 0.5], [0.5, -0.5, -0.5], [-0.5, -0.5, -0.5]],
    // Left (x = -0.5)
    [[-0.5, 0.5, -0.5], [-0.5, 0.5, 0.5], [-0.5, -0.5, 0.5], [-0.5, -0.5, -0.5]],
    // Right (x = +0.5)
    [[0.5, 0.5, 0.5], [0.5, 0.5, -0.5], [0.5, -0.5, -0.5], [0.5, -0.5, 0.5]],
];

const CORNER_UVS: [(f32, f32); 4] = [(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)];

pub fn cube_vertices() -> Vec<Vertex> {
    CUBE_FACES
        .iter()
        .flat_map(|face| {
            face.iter()
                .zip(CORNER_UVS)
                .map(|(&[x, y, z], (u, v))| Vertex::new(x, y, z).with_uv(u, v))
        })
        .collect()
}

/// Two triangles per face: TL, TR, BR and TL, BR, BL
pub fn cube_indices() -> Vec<u32> {
    (0..6u32)
        .flat_map(|face| {
            let base = face * 4;
            [base, base + 1, base + 2, base, base + 2, base + 3]
        })
        .collect()
}
