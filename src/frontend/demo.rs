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

//! Start-up scene
//!
//! Three cubes on the grid: one checker-textured, one mirrored and one glass,
//! plus an optional OBJ model. The mirrored and glass cubes take their colour
//! from the skybox through reflection and refraction.

use std::path::Path;

use crate::core::error::Result;
use crate::core::math::Vec3;
use crate::core::renderer::Renderer;
use crate::core::scene::{MaterialMesh, Model, ObjectHandle, ObjectManager, SceneObject};
use crate::core::texture::Texture;

const CHECKER_LIGHT: u32 = 0xFFE8_E8E8;
const CHECKER_DARK: u32 = 0xFF30_3848;

/// Fill `objects` with the demo cubes
///
/// Returns the handles in insertion order.
pub fn populate_demo_scene(
    renderer: &mut Renderer,
    objects: &mut ObjectManager,
) -> Result<Vec<ObjectHandle>> {
    let checker = Texture::checkerboard(64, 8, CHECKER_LIGHT, CHECKER_DARK)?;
    let checker = renderer.textures_mut().insert(checker);

    let mut textured = MaterialMesh::cube("Textured Cube");
    textured.set_texture(Some(checker));
    textured.set_rotation_speed(45.0);
    textured.transform_mut().set_position(Vec3::new(-1.5, 0.5, 0.0));

    let mut mirror = MaterialMesh::cube("Mirror Cube");
    mirror.set_use_texture(false);
    mirror.set_reflectivity(0.85);
    mirror.set_rotation_speed(-30.0);
    mirror.transform_mut().set_tint(Vec3::new(0.8, 0.85, 0.9));
    mirror.transform_mut().set_position(Vec3::new(1.5, 0.5, 0.0));

    let mut glass = MaterialMesh::cube("Glass Cube");
    glass.set_use_texture(false);
    glass.set_reflectivity(0.6);
    glass.set_refractive_index(1.5);
    glass.set_rotation_speed(20.0);
    glass.transform_mut().set_tint(Vec3::new(0.6, 0.9, 0.8));
    glass.transform_mut().set_position(Vec3::new(0.0, 0.5, 2.0));

    let handles = vec![
        objects.add(Box::new(textured)),
        objects.add(Box::new(mirror)),
        objects.add(Box::new(glass)),
    ];
    log::info!("Demo scene: {} objects", handles.len());
    Ok(handles)
}

/// Import an OBJ model into the scene
///
/// Its textures go into the renderer's store.
pub fn load_model<P: AsRef<Path>>(
    renderer: &mut Renderer,
    objects: &mut ObjectManager,
    path: P,
) -> Result<ObjectHandle> {
    let model = Model::load_obj(path, renderer.textures_mut())?;
    log::info!(
        "Added model '{}' ({} triangles)",
        model.name(),
        model.triangle_count()
    );
    Ok(objects.add(Box::new(model)))
}
