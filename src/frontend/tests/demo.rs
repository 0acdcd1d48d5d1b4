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

//! Start-up scene tests

use crate::core::camera::Camera;
use crate::core::config::RenderConfig;
use crate::core::error::RenderError;
use crate::core::raster::SPACE_COLOR;
use crate::core::renderer::Renderer;
use crate::core::scene::ObjectManager;
use crate::frontend::demo::{load_model, populate_demo_scene};

fn small_renderer() -> Renderer {
    let mut config = RenderConfig::default();
    config.window.width = 96;
    config.window.height = 72;
    config.render.show_stars = false;
    Renderer::new(&config)
}

#[test]
fn test_demo_scene_has_three_cubes() {
    let mut renderer = small_renderer();
    let mut objects = ObjectManager::new();
    let textures_before = renderer.textures().len();

    let handles = populate_demo_scene(&mut renderer, &mut objects).expect("demo scene");
    assert_eq!(handles.len(), 3);
    assert_eq!(objects.len(), 3);
    assert_eq!(objects.triangle_count(), 36);
    assert_eq!(renderer.textures().len(), textures_before + 1);

    let names: Vec<_> = objects.iter().map(|(_, o)| o.name().to_string()).collect();
    assert_eq!(names, ["Textured Cube", "Mirror Cube", "Glass Cube"]);
}

#[test]
fn test_demo_scene_renders_and_animates() {
    let mut renderer = small_renderer();
    let mut objects = ObjectManager::new();
    let handles = populate_demo_scene(&mut renderer, &mut objects).expect("demo scene");

    let stats = renderer
        .render(&Camera::default(), &mut objects)
        .expect("cpu frame");
    assert_eq!(stats.triangles_submitted, 36);
    assert!(stats.triangles_drawn > 0);
    assert!(renderer
        .framebuffer()
        .pixels()
        .iter()
        .any(|&p| p != SPACE_COLOR));

    let before = objects.get(handles[0]).expect("live").transform().rotation();
    objects.update_all(1.0);
    let after = objects.get(handles[0]).expect("live").transform().rotation();
    assert!((after.y - before.y - 45.0).abs() < 1e-4);
}

#[test]
fn test_missing_model_reports_error() {
    let mut renderer = small_renderer();
    let mut objects = ObjectManager::new();
    let dir = tempfile::tempdir().expect("tempdir");

    let result = load_model(&mut renderer, &mut objects, dir.path().join("absent.obj"));
    assert!(matches!(result, Err(RenderError::ModelLoad { .. })));
    assert!(objects.is_empty());
}

#[test]
fn test_model_is_added_to_scene() {
    let mut renderer = small_renderer();
    let mut objects = ObjectManager::new();
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("tri.obj");
    std::fs::write(&path, "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n").expect("write obj");

    let handle = load_model(&mut renderer, &mut objects, &path).expect("load obj");
    let model = objects.get(handle).expect("live");
    assert_eq!(model.name(), "tri");
    assert_eq!(model.triangle_count(), 1);
}
