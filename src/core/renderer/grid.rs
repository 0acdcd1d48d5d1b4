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

//! Reference grid on the y = 0 plane

use crate::core::math::Mat4;
use crate::core::raster::Vertex;
use crate::core::scene::RenderBackend;

pub const GRID_COLOR: u32 = 0xFF00_FFFF;
pub const GRID_COLOR_DIM: u32 = 0xFF00_AAAA;

/// Square grid centred on the origin
///
/// `divisions + 1` lines run along each axis, alternating between
/// [`GRID_COLOR`] and [`GRID_COLOR_DIM`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    pub half_extent: f32,
    pub divisions: u32,
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            half_extent: 5.0,
            divisions: 20,
        }
    }
}

impl Grid {
    /// `(start, end, colour)` for every line, X-parallel lines first
    pub fn lines(&self) -> Vec<(Vertex, Vertex, u32)> {
        let n = self.divisions.max(1);
        let e = self.half_extent;
        let step = 2.0 * e / n as f32;
        let color = |i: u32| if i % 2 == 0 { GRID_COLOR } else { GRID_COLOR_DIM };

        let along_x = (0..=n).map(|i| {
            let z = -e + step * i as f32;
            (Vertex::new(-e, 0.0, z), Vertex::new(e, 0.0, z), color(i))
        });
        let along_z = (0..=n).map(|i| {
            let x = -e + step * i as f32;
            (Vertex::new(x, 0.0, -e), Vertex::new(x, 0.0, e), color(i))
        });
        along_x.chain(along_z).collect()
    }

    pub fn submit(&self, backend: &mut dyn RenderBackend) {
        let world = Mat4::identity();
        for (start, end, color) in self.lines() {
            backend.submit_line(&world, start.with_color(color), end.with_color(color), color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_grid_layout() {
        let lines = Grid::default().lines();
        assert_eq!(lines.len(), 42);
        assert_eq!(lines[0].2, GRID_COLOR);
        assert_eq!(lines[1].2, GRID_COLOR_DIM);
        assert_eq!(lines[20].0.position.z, 5.0);
        assert!(lines.iter().all(|(a, b, _)| a.position.y == 0.0 && b.position.y == 0.0));
    }
}
