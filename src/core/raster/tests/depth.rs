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

//! Depth test properties

use proptest::prelude::*;

use crate::core::math::Vec3;
use crate::core::raster::{FrameBuffer, Rasterizer, ScreenTriangle, Vertex, DEPTH_FAR};

fn covering(color: u32, z: f32) -> ScreenTriangle {
    ScreenTriangle {
        vertices: [
            Vertex::new(0.0, 0.0, z).with_color(color),
            Vertex::new(0.0, 30.0, z),
            Vertex::new(30.0, 0.0, z),
        ],
        lighting: 1.0,
    }
}

#[test]
fn test_equal_depth_keeps_first_writer() {
    let mut fb = FrameBuffer::new(4, 4);
    assert!(fb.write_pixel(1, 1, 0.5, 0xFF11_1111));
    assert!(!fb.write_pixel(1, 1, 0.5, 0xFF22_2222));
    assert_eq!(fb.color_at(1, 1), Some(0xFF11_1111));
}

#[test]
fn test_far_plane_never_lands() {
    let mut fb = FrameBuffer::new(4, 4);
    assert!(!fb.write_pixel(0, 0, DEPTH_FAR, 0xFFFF_FFFF));
    assert!(fb.is_uncovered(0, 0));
}

proptest! {
    #[test]
    fn test_nearest_write_wins(writes in prop::collection::vec((0.0f32..1.0, any::<u32>()), 1..32)) {
        let mut fb = FrameBuffer::new(2, 2);
        for &(z, color) in &writes {
            fb.write_pixel(1, 1, z, color);
        }

        let nearest = writes.iter().map(|&(z, _)| z).fold(DEPTH_FAR, f32::min);
        // Strict comparison: among equal depths the first one sticks
        let expected = writes.iter().find(|&&(z, _)| z == nearest).map(|&(_, c)| c);
        prop_assert_eq!(fb.depth_at(1, 1), Some(nearest));
        prop_assert_eq!(fb.color_at(1, 1), expected);
    }

    #[test]
    fn test_draw_order_does_not_matter(z_a in 0.0f32..0.99, dz in 0.001f32..0.5) {
        let z_b = (z_a + dz).min(0.999);
        prop_assume!(z_b > z_a);
        let near = covering(0xFFFF_0000, z_a);
        let far = covering(0xFF00_00FF, z_b);

        let mut first = FrameBuffer::new(16, 16);
        let mut second = FrameBuffer::new(16, 16);
        let mut rasterizer = Rasterizer::new();
        rasterizer.fill_triangle(&mut first, &near, None, Vec3::ONE);
        rasterizer.fill_triangle(&mut first, &far, None, Vec3::ONE);
        rasterizer.fill_triangle(&mut second, &far, None, Vec3::ONE);
        rasterizer.fill_triangle(&mut second, &near, None, Vec3::ONE);

        prop_assert_eq!(first.pixels(), second.pixels());
        prop_assert_eq!(first.color_at(5, 5), Some(0xFFFF_0000));
    }
}
