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

//! CPU and GPU rasterizers must agree on the same input

use crate::core::gpu::GpuRasterizer;
use crate::core::math::{Mat4, Vec3};
use crate::core::raster::{
    FrameBuffer, FrameContext, FrameStats, Pipeline, Rasterizer, ScreenLine, ScreenTriangle,
    StarField, Vertex,
};
use crate::core::texture::{Texture, TextureHandle, TextureStore};

const WIDTH: u32 = 96;
const HEIGHT: u32 = 72;

fn gpu_or_skip() -> Option<GpuRasterizer> {
    match GpuRasterizer::new() {
        Ok(gpu) => Some(gpu),
        Err(e) => {
            eprintln!("Skipping GPU test: {}", e);
            None
        }
    }
}

fn camera_frame() -> FrameContext {
    FrameContext {
        projection: Mat4::perspective(70.0, HEIGHT as f32 / WIDTH as f32, 0.1, 10.0),
        ..FrameContext::identity(WIDTH, HEIGHT)
    }
}

/// Two overlapping quads, one textured, plus a few lines
fn scene(textures: &mut TextureStore) -> (Vec<(ScreenTriangle, Option<TextureHandle>)>, Vec<ScreenLine>) {
    let checker = textures.insert(
        Texture::checkerboard(8, 4, 0xFFE0_4040, 0xFF30_30C0).expect("valid texture"),
    );
    let pipeline = Pipeline::default();
    let frame = camera_frame();
    let mut stats = FrameStats::default();
    let mut triangles = Vec::new();

    let quad = |x: f32, z: f32, color: u32| {
        let a = Vertex::new(x - 1.0, -1.0, z).with_uv(0.0, 1.0).with_color(color);
        let b = Vertex::new(x + 1.0, -1.0, z).with_uv(1.0, 1.0).with_color(color);
        let c = Vertex::new(x + 1.0, 1.0, z).with_uv(1.0, 0.0).with_color(color);
        let d = Vertex::new(x - 1.0, 1.0, z).with_uv(0.0, 0.0).with_color(color);
        [[a, b, c], [a, c, d]]
    };

    for (tri, texture) in quad(-0.5, 3.0, 0xFF40_C040)
        .into_iter()
        .map(|t| (t, None))
        .chain(quad(0.6, 4.0, 0xFFFF_FFFF).into_iter().map(|t| (t, Some(checker))))
    {
        pipeline.process_triangle(&frame, &Mat4::rotation_y(15.0), &tri, &mut stats, |s| {
            triangles.push((s, texture))
        });
    }

    let lines = (0..5)
        .filter_map(|i| {
            let x = -2.0 + i as f32;
            pipeline.process_line(
                &frame,
                &Mat4::identity(),
                &Vertex::new(x, -1.2, 1.0),
                &Vertex::new(x + 0.5, -1.2, 6.0),
                0xFF00_FFFF,
                &mut stats,
            )
        })
        .collect();

    (triangles, lines)
}

fn background() -> Vec<u32> {
    StarField { count: 40, seed: 7 }.render(WIDTH, HEIGHT)
}

#[test]
fn test_gpu_matches_cpu() {
    let Some(mut gpu) = gpu_or_skip() else {
        return;
    };
    let mut textures = TextureStore::new();
    let (triangles, lines) = scene(&mut textures);
    assert!(!triangles.is_empty());
    let light = Vec3::new(1.0, 0.95, 0.8);

    let mut cpu_fb = FrameBuffer::new(WIDTH, HEIGHT);
    cpu_fb.clear_with(&background());
    let mut rasterizer = Rasterizer::new();
    for (tri, texture) in &triangles {
        let texture = texture.and_then(|h| textures.get(h));
        rasterizer.fill_triangle(&mut cpu_fb, tri, texture, light);
    }
    for line in &lines {
        rasterizer.draw_line(&mut cpu_fb, line);
    }

    let mut gpu_fb = FrameBuffer::new(WIDTH, HEIGHT);
    gpu_fb.clear_with(&background());
    let mut stats = FrameStats::default();
    gpu.begin_frame();
    for (tri, texture) in &triangles {
        gpu.submit_triangle(tri, *texture);
    }
    for line in &lines {
        gpu.submit_line(line);
    }
    gpu.render(&mut gpu_fb, &textures, light, &mut stats)
        .expect("GPU render");

    assert_eq!(stats.gpu_batches, 2);

    // Edge pixels may round differently under fused multiply-add
    let differing = cpu_fb
        .pixels()
        .iter()
        .zip(gpu_fb.pixels())
        .filter(|(a, b)| a != b)
        .count();
    let total = (WIDTH * HEIGHT) as usize;
    assert!(
        differing * 100 <= total,
        "{} of {} pixels differ",
        differing,
        total
    );
}

#[test]
fn test_gpu_keeps_background_when_idle() {
    let Some(mut gpu) = gpu_or_skip() else {
        return;
    };
    let mut fb = FrameBuffer::new(WIDTH, HEIGHT);
    fb.clear_with(&background());
    let before = fb.pixels().to_vec();

    gpu.begin_frame();
    let mut stats = FrameStats::default();
    gpu.render(&mut fb, &TextureStore::new(), Vec3::ONE, &mut stats)
        .expect("GPU render");

    assert_eq!(fb.pixels(), before.as_slice());
    assert_eq!(stats.gpu_dispatches, 0);
}

#[test]
fn test_gpu_depth_order_across_batches() {
    let Some(mut gpu) = gpu_or_skip() else {
        return;
    };
    let mut textures = TextureStore::new();
    let red = textures.insert(Texture::from_pixels("red", 1, 1, vec![0xFFFF_0000]).expect("valid"));

    let covering = |z: f32, color: u32| ScreenTriangle {
        vertices: [
            Vertex::new(0.0, 0.0, z).with_color(color),
            Vertex::new(0.0, 200.0, z),
            Vertex::new(200.0, 0.0, z),
        ],
        lighting: 1.0,
    };

    let mut fb = FrameBuffer::new(32, 32);
    fb.clear(0xFF00_0000);
    let mut stats = FrameStats::default();
    gpu.begin_frame();
    // The solid batch runs after the textured one and must lose the depth test
    gpu.submit_triangle(&covering(0.3, 0xFFFF_FFFF), Some(red));
    gpu.submit_triangle(&covering(0.6, 0xFF00_FF00), None);
    gpu.render(&mut fb, &textures, Vec3::ONE, &mut stats)
        .expect("GPU render");

    assert_eq!(fb.color_at(4, 4), Some(0xFFFF_0000));
    assert!((fb.depth_at(4, 4).unwrap_or(1.0) - 0.3).abs() < 1e-6);
}
