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

//! Unit tests for the CPU fill

use crate::core::math::Vec3;
use crate::core::raster::pipeline::{is_back_facing, signed_area};
use crate::core::raster::rasterizer::{barycentric, bounding_box};
use crate::core::raster::{FrameBuffer, Rasterizer, ScreenLine, ScreenTriangle, Vertex};
use crate::core::texture::Texture;

const CLEAR: u32 = 0xFF00_0008;

fn screen_tri(color: u32, z: f32) -> ScreenTriangle {
    ScreenTriangle {
        vertices: [
            Vertex::new(2.0, 2.0, z).with_color(color),
            Vertex::new(2.0, 12.0, z),
            Vertex::new(12.0, 2.0, z),
        ],
        lighting: 1.0,
    }
}

fn cleared(size: u32) -> FrameBuffer {
    let mut fb = FrameBuffer::new(size, size);
    fb.clear(CLEAR);
    fb
}

#[test]
fn test_fill_covers_inside_only() {
    let mut fb = cleared(16);
    let mut rasterizer = Rasterizer::new();
    rasterizer.fill_triangle(&mut fb, &screen_tri(0xFFFF_0000, 0.5), None, Vec3::ONE);

    assert_eq!(fb.color_at(3, 3), Some(0xFFFF_0000));
    // Vertices and edges are inclusive
    assert_eq!(fb.color_at(2, 2), Some(0xFFFF_0000));
    assert_eq!(fb.color_at(7, 7), Some(0xFFFF_0000));
    // Beyond the hypotenuse
    assert_eq!(fb.color_at(10, 10), Some(CLEAR));
    assert_eq!(fb.color_at(1, 1), Some(CLEAR));
    assert_eq!(fb.depth_at(3, 3), Some(0.5));
    assert!(rasterizer.pixels_written() > 0);
}

#[test]
fn test_fill_ignores_winding() {
    let mut a = cleared(16);
    let mut b = cleared(16);
    let tri = screen_tri(0xFF00_FF00, 0.5);
    let mut reversed = tri;
    reversed.vertices.swap(1, 2);

    Rasterizer::new().fill_triangle(&mut a, &tri, None, Vec3::ONE);
    Rasterizer::new().fill_triangle(&mut b, &reversed, None, Vec3::ONE);
    // Swapping two vertices leaves v0 (the colour source) in place
    assert_eq!(a.pixels(), b.pixels());
}

#[test]
fn test_degenerate_triangle_writes_nothing() {
    let mut fb = cleared(16);
    let mut rasterizer = Rasterizer::new();
    let tri = ScreenTriangle {
        vertices: [
            Vertex::new(1.0, 1.0, 0.5),
            Vertex::new(5.0, 5.0, 0.5),
            Vertex::new(9.0, 9.0, 0.5),
        ],
        lighting: 1.0,
    };
    rasterizer.fill_triangle(&mut fb, &tri, None, Vec3::ONE);
    assert_eq!(rasterizer.pixels_written(), 0);
    assert!(barycentric(&tri.vertices, 3.0, 3.0).is_none());
}

#[test]
fn test_offscreen_triangle_is_skipped() {
    let v = [
        Vertex::new(-20.0, -20.0, 0.5),
        Vertex::new(-10.0, -20.0, 0.5),
        Vertex::new(-20.0, -10.0, 0.5),
    ];
    assert!(bounding_box(&v, 16, 16).is_none());

    let mut fb = cleared(16);
    let tri = ScreenTriangle {
        vertices: v,
        lighting: 1.0,
    };
    Rasterizer::new().fill_triangle(&mut fb, &tri, None, Vec3::ONE);
    assert!(fb.pixels().iter().all(|&p| p == CLEAR));
}

#[test]
fn test_partially_offscreen_triangle_is_clamped() {
    let v = [
        Vertex::new(-5.0, -5.0, 0.5),
        Vertex::new(-5.0, 40.0, 0.5),
        Vertex::new(40.0, -5.0, 0.5),
    ];
    assert_eq!(bounding_box(&v, 16, 16), Some((0, 0, 15, 15)));
}

#[test]
fn test_lighting_and_tint_modulate_colour() {
    let mut fb = cleared(16);
    let mut tri = screen_tri(0xFFFF_FFFF, 0.5);
    tri.lighting = 0.5;
    Rasterizer::new().fill_triangle(&mut fb, &tri, None, Vec3::new(1.0, 1.0, 0.0));
    assert_eq!(fb.color_at(3, 3), Some(0xFF7F_7F00));
}

#[test]
fn test_texture_replaces_vertex_colour() {
    // Left half red, right half blue
    let texture = Texture::from_fn("halves", 2, 1, |x, _| {
        if x == 0 {
            0xFFFF_0000
        } else {
            0xFF00_00FF
        }
    })
    .expect("valid");

    let tri = ScreenTriangle {
        vertices: [
            Vertex::new(0.0, 0.0, 0.5).with_uv(0.0, 0.0),
            Vertex::new(0.0, 15.0, 0.5).with_uv(0.0, 1.0),
            Vertex::new(15.0, 0.0, 0.5).with_uv(1.0, 0.0),
        ],
        lighting: 1.0,
    };
    let mut fb = cleared(16);
    Rasterizer::new().fill_triangle(&mut fb, &tri, Some(&texture), Vec3::ONE);

    assert_eq!(fb.color_at(1, 1), Some(0xFFFF_0000));
    assert_eq!(fb.color_at(15, 0), Some(0xFF00_00FF));
}

#[test]
fn test_barycentric_weights_sum_to_one() {
    let v = screen_tri(0, 0.0).vertices;
    let w = barycentric(&v, 4.0, 5.0).expect("non-degenerate");
    assert!((w.iter().sum::<f32>() - 1.0).abs() < 1e-5);
    let at_v1 = barycentric(&v, 2.0, 12.0).expect("non-degenerate");
    assert!((at_v1[1] - 1.0).abs() < 1e-6);
}

#[test]
fn test_line_dda_hits_every_column() {
    let mut fb = cleared(8);
    let mut rasterizer = Rasterizer::new();
    let line = ScreenLine {
        start: Vertex::new(1.0, 3.0, 0.5),
        end: Vertex::new(5.0, 3.0, 0.5),
        color: 0xFF00_FFFF,
    };
    rasterizer.draw_line(&mut fb, &line);

    assert_eq!(rasterizer.pixels_written(), 5);
    for x in 1..=5 {
        assert_eq!(fb.color_at(x, 3), Some(0xFF00_FFFF));
    }
    assert_eq!(fb.color_at(0, 3), Some(CLEAR));
    assert_eq!(fb.color_at(6, 3), Some(CLEAR));
}

#[test]
fn test_line_steep_and_single_point() {
    let mut fb = cleared(8);
    let mut rasterizer = Rasterizer::new();
    rasterizer.draw_line(
        &mut fb,
        &ScreenLine {
            start: Vertex::new(2.0, 0.0, 0.5),
            end: Vertex::new(3.0, 6.0, 0.5),
            color: 0xFFFF_FFFF,
        },
    );
    // One pixel per row along the major axis
    assert_eq!(rasterizer.pixels_written(), 7);

    rasterizer.reset_stats();
    let point = Vertex::new(7.0, 7.0, 0.5);
    rasterizer.draw_line(
        &mut fb,
        &ScreenLine {
            start: point,
            end: point,
            color: 0xFFFF_FFFF,
        },
    );
    // Zero-length line is clamped to one step and still plots its endpoint
    assert_eq!(rasterizer.pixels_written(), 1);
}

#[test]
fn test_line_respects_depth() {
    let mut fb = cleared(8);
    let mut rasterizer = Rasterizer::new();
    assert!(fb.write_pixel(3, 3, 0.2, 0xFFAA_AAAA));
    rasterizer.draw_line(
        &mut fb,
        &ScreenLine {
            start: Vertex::new(0.0, 3.0, 0.5),
            end: Vertex::new(7.0, 3.0, 0.5),
            color: 0xFF00_FF00,
        },
    );
    assert_eq!(fb.color_at(3, 3), Some(0xFFAA_AAAA));
    assert_eq!(fb.color_at(4, 3), Some(0xFF00_FF00));
}

#[test]
fn test_back_face_rule() {
    // Counter-clockwise on screen (y down) has negative area and is kept
    let a = Vertex::new(0.0, 10.0, 0.0);
    let b = Vertex::new(10.0, 10.0, 0.0);
    let c = Vertex::new(5.0, 0.0, 0.0);
    assert!(signed_area(&a, &b, &c) < 0.0);
    assert!(!is_back_facing(&a, &b, &c));
    assert!(is_back_facing(&a, &c, &b));
    // Degenerate counts as back-facing
    assert!(is_back_facing(&a, &a, &c));
}
