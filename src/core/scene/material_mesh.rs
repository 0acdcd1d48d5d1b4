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

//! Renderable mesh with material settings

use super::backend::RenderBackend;
use super::mesh::Mesh;
use super::transform::Transform;
use super::{SceneContext, SceneObject};
use crate::core::math::{Mat4, Vec3};
use crate::core::raster::color::{from_rgb_f32, lerp_color};
use crate::core::raster::{face_normal, Vertex};
use crate::core::texture::{reflect, refract, Cubemap, TextureHandle, TextureStore};

/// A mesh plus tint, texture, environment response and spin
///
/// # Texture selection
///
/// With `use_texture` on, the mesh's own texture wins, then the store's
/// fallback. With it off, triangles are always flat.
///
/// # Environment mapping
///
/// When `reflectivity > 0` and the context carries a complete cube map, each
/// face samples the environment along the view ray at its centroid, bent by
/// [`reflect`] (index 1.0) or [`refract`] (any other index), and blends the
/// sample into the tint. Textured faces take their colour from the texture,
/// so the blend only shows on flat faces.
#[derive(Debug, Clone)]
pub struct MaterialMesh {
    name: String,
    mesh: Mesh,
    transform: Transform,
    texture: Option<TextureHandle>,
    use_texture: bool,
    reflectivity: f32,
    refractive_index: f32,
    /// Degrees per second around Y
    rotation_speed: f32,
}

impl MaterialMesh {
    pub fn new(name: impl Into<String>, mesh: Mesh) -> Self {
        Self {
            name: name.into(),
            mesh,
            transform: Transform::new(),
            texture: None,
            use_texture: true,
            reflectivity: 0.0,
            refractive_index: 1.0,
            rotation_speed: 0.0,
        }
    }

    /// Unit cube named `name`
    pub fn cube(name: impl Into<String>) -> Self {
        Self::new(name, Mesh::cube())
    }

    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    pub fn texture(&self) -> Option<TextureHandle> {
        self.texture
    }

    pub fn set_texture(&mut self, texture: Option<TextureHandle>) {
        self.texture = texture;
    }

    pub fn use_texture(&self) -> bool {
        self.use_texture
    }

    pub fn set_use_texture(&mut self, use_texture: bool) {
        self.use_texture = use_texture;
    }

    pub fn reflectivity(&self) -> f32 {
        self.reflectivity
    }

    /// Clamped to `[0, 1]`
    pub fn set_reflectivity(&mut self, reflectivity: f32) {
        self.reflectivity = reflectivity.clamp(0.0, 1.0);
    }

    pub fn refractive_index(&self) -> f32 {
        self.refractive_index
    }

    pub fn set_refractive_index(&mut self, index: f32) {
        self.refractive_index = index;
    }

    pub fn rotation_speed(&self) -> f32 {
        self.rotation_speed
    }

    pub fn set_rotation_speed(&mut self, degrees_per_second: f32) {
        self.rotation_speed = degrees_per_second;
    }

    /// Texture the triangles will be bound to
    pub fn resolve_texture(&self, store: &TextureStore) -> Option<TextureHandle> {
        if !self.use_texture {
            return None;
        }
        self.texture.or(store.fallback())
    }

    fn environment_color(
        &self,
        environment: &Cubemap,
        world: &Mat4,
        triangle: &[Vertex; 3],
        camera: Vec3,
        base: u32,
    ) -> u32 {
        let [w0, w1, w2] = triangle.map(|v| world.transform_point(v.point()));
        let centroid = (w0 + w1 + w2) * (1.0 / 3.0);
        let incident = (centroid - camera).normalize();

        // Bend against the side the camera sees
        let mut normal = face_normal(w0, w1, w2);
        if normal.dot(incident) > 0.0 {
            normal = -normal;
        }

        let dir = if (self.refractive_index - 1.0).abs() > f32::EPSILON {
            refract(incident, normal, 1.0 / self.refractive_index)
        } else {
            reflect(incident, normal)
        };
        lerp_color(base, environment.sample(dir), self.reflectivity)
    }
}

impl SceneObject for MaterialMesh {
    fn name(&self) -> &str {
        &self.name
    }

    fn transform(&self) -> &Transform {
        &self.transform
    }

    fn transform_mut(&mut self) -> &mut Transform {
        &mut self.transform
    }

    fn update(&mut self, dt: f32) {
        if self.rotation_speed != 0.0 {
            self.transform
                .rotate(Vec3::new(0.0, self.rotation_speed * dt, 0.0));
        }
    }

    fn render(&mut self, ctx: &SceneContext<'_>, backend: &mut dyn RenderBackend) {
        if !self.transform.is_visible() || self.mesh.is_empty() {
            return;
        }

        let world = self.transform.world_matrix() * ctx.parent_world;
        let tint = from_rgb_f32(self.transform.tint());
        let texture = self.resolve_texture(ctx.textures);
        let environment = ctx
            .environment
            .filter(|env| self.reflectivity > 0.0 && env.is_loaded());

        for mut triangle in self.mesh.triangles() {
            let color = match environment {
                Some(env) => self.environment_color(
                    env,
                    &world,
                    &triangle,
                    ctx.frame.camera_position,
                    tint,
                ),
                None => tint,
            };
            for v in &mut triangle {
                v.color = color;
            }
            backend.submit_triangle(&world, triangle, texture);
        }
    }

    fn triangle_count(&self) -> usize {
        self.mesh.triangle_count()
    }
}
