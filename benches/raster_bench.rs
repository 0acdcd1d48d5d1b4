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

//! Rasterizer benchmarks
//!
//! Run with `cargo bench`. Covers the CPU triangle fill, near-plane clipping
//! and a full CPU frame of the demo scene.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use twinraster::core::camera::Camera;
use twinraster::core::config::RenderConfig;
use twinraster::core::math::Vec3;
use twinraster::core::raster::{
    clip_triangle, FrameBuffer, Rasterizer, ScreenTriangle, Vertex,
};
use twinraster::core::renderer::Renderer;
use twinraster::core::scene::ObjectManager;
use twinraster::core::texture::Texture;
use twinraster::frontend::demo::populate_demo_scene;

fn screen_triangle(size: f32) -> ScreenTriangle {
    ScreenTriangle {
        vertices: [
            Vertex::new(1.0, 1.0, 0.5)
                .with_uv(0.0, 0.0)
                .with_color(0xFFFF_0000),
            Vertex::new(1.0, 1.0 + size, 0.5).with_uv(0.0, 1.0),
            Vertex::new(1.0 + size, 1.0, 0.5).with_uv(1.0, 0.0),
        ],
        lighting: 0.8,
    }
}

fn bench_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill_triangle");
    let texture = Texture::checkerboard(64, 8, 0xFFFF_FFFF, 0xFF00_0000).expect("checkerboard");

    for size in [16.0f32, 128.0, 480.0] {
        let tri = screen_triangle(size);
        group.bench_with_input(BenchmarkId::new("solid", size as u32), &tri, |b, tri| {
            let mut fb = FrameBuffer::new(640, 480);
            let mut rasterizer = Rasterizer::new();
            b.iter(|| {
                fb.clear(0xFF00_0000);
                rasterizer.fill_triangle(&mut fb, black_box(tri), None, Vec3::ONE);
            });
        });
        group.bench_with_input(BenchmarkId::new("textured", size as u32), &tri, |b, tri| {
            let mut fb = FrameBuffer::new(640, 480);
            let mut rasterizer = Rasterizer::new();
            b.iter(|| {
                fb.clear(0xFF00_0000);
                rasterizer.fill_triangle(&mut fb, black_box(tri), Some(&texture), Vec3::ONE);
            });
        });
    }
    group.finish();
}

fn bench_clip(c: &mut Criterion) {
    let near = 0.1;
    let cases = [
        (
            "inside",
            [
                Vertex::new(0.0, 0.0, 1.0),
                Vertex::new(1.0, 0.0, 2.0),
                Vertex::new(0.0, 1.0, 3.0),
            ],
        ),
        (
            "one_in_front",
            [
                Vertex::new(0.0, 0.0, 1.0),
                Vertex::new(1.0, 0.0, -1.0),
                Vertex::new(0.0, 1.0, -2.0),
            ],
        ),
        (
            "two_in_front",
            [
                Vertex::new(0.0, 0.0, 1.0),
                Vertex::new(1.0, 0.0, 2.0),
                Vertex::new(0.0, 1.0, -1.0),
            ],
        ),
    ];

    let mut group = c.benchmark_group("clip_triangle");
    for (name, tri) in cases {
        group.bench_function(name, |b| b.iter(|| clip_triangle(black_box(&tri), near)));
    }
    group.finish();
}

fn bench_frame(c: &mut Criterion) {
    let mut config = RenderConfig::default();
    config.window.width = 320;
    config.window.height = 240;
    let mut renderer = Renderer::new(&config);
    let mut objects = ObjectManager::new();
    populate_demo_scene(&mut renderer, &mut objects).expect("demo scene");
    let camera = Camera::default();

    c.bench_function("cpu_frame_320x240", |b| {
        b.iter(|| {
            objects.update_all(1.0 / 60.0);
            renderer
                .render(black_box(&camera), &mut objects)
                .expect("cpu frame")
        })
    });
}

criterion_group!(benches, bench_fill, bench_clip, bench_frame);
criterion_main!(benches);
