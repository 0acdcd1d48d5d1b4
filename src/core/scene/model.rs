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

//! Multi-mesh models imported from Wavefront OBJ files

use std::path::Path;

use super::backend::RenderBackend;
use super::material_mesh::MaterialMesh;
use super::mesh::Mesh;
use super::transform::Transform;
use super::{SceneContext, SceneObject};
use crate::core::error::{RenderError, Result};
use crate::core::math::Vec3;
use crate::core::raster::Vertex;
use crate::core::texture::{TextureHandle, TextureStore};

/// A group of material meshes sharing one transform
///
/// Children keep their own transforms. A child is drawn with
/// `child_local * model_world`.
#[derive(Debug, Clone)]
pub struct Model {
    name: String,
    transform: Transform,
    meshes: Vec<MaterialMesh>,
    textures: Vec<TextureHandle>,
}

impl Model {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            transform: Transform::new(),
            meshes: Vec::new(),
            textures: Vec::new(),
        }
    }

    /// Import an OBJ file and its materials
    ///
    /// Faces are triangulated and UVs flipped vertically. Each material's
    /// diffuse colour becomes the tint of its mesh, and its diffuse map is
    /// loaded into `store` relative to the OBJ's directory. A texture that
    /// fails to load is skipped with a warning.
    ///
    /// # Errors
    ///
    /// [`RenderError::ModelLoad`] when the OBJ itself cannot be read.
    pub fn load_obj<P: AsRef<Path>>(path: P, store: &mut TextureStore) -> Result<Self> {
        let path = path.as_ref();
        let options = tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        };
        let (objects, materials) =
            tobj::load_obj(path, &options).map_err(|e| RenderError::ModelLoad {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        let materials = materials.unwrap_or_else(|e| {
            log::warn!("No materials for '{}': {}", path.display(), e);
            Vec::new()
        });

        let directory = path.parent().unwrap_or_else(|| Path::new(""));
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "model".to_string());
        let mut model = Model::new(name);

        for object in objects {
            let data = object.mesh;
            let vertices = data
                .positions
                .chunks_exact(3)
                .enumerate()
                .map(|(i, p)| {
                    let vertex = Vertex::new(p[0], p[1], p[2]);
                    match data.texcoords.get(2 * i..2 * i + 2) {
                        Some(uv) => vertex.with_uv(uv[0], 1.0 - uv[1]),
                        None => vertex,
                    }
                })
                .collect();
            let mut part = MaterialMesh::new(object.name, Mesh::new(vertices, data.indices));

            let material = data.material_id.and_then(|id| materials.get(id));
            if let Some(material) = material {
                if let Some([r, g, b]) = material.diffuse {
                    part.transform_mut().set_tint(Vec3::new(r, g, b));
                }
                if let Some(file) = material.diffuse_texture.as_deref().filter(|f| !f.is_empty()) {
                    match store.load(directory.join(file)) {
                        Ok(handle) => {
                            part.set_texture(Some(handle));
                            part.set_use_texture(true);
                            if !model.textures.contains(&handle) {
                                model.textures.push(handle);
                            }
                        }
                        Err(e) => log::warn!("{}", e),
                    }
                }
            }
            model.push_mesh(part);
        }

        log::info!(
            "Model loaded: {} ({} meshes, {} triangles)",
            model.name,
            model.mesh_count(),
            model.triangle_count()
        );
        Ok(model)
    }

    pub fn push_mesh(&mut self, mesh: MaterialMesh) {
        self.meshes.push(mesh);
    }

    pub fn meshes(&self) -> &[MaterialMesh] {
        &self.meshes
    }

    pub fn meshes_mut(&mut self) -> &mut [MaterialMesh] {
        &mut self.meshes
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Textures this model imported into the store
    pub fn textures(&self) -> &[TextureHandle] {
        &self.textures
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }
}

impl SceneObject for Model {
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
        for mesh in &mut self.meshes {
            mesh.update(dt);
        }
    }

    fn render(&mut self, ctx: &SceneContext<'_>, backend: &mut dyn RenderBackend) {
        if !self.transform.is_visible() {
            return;
        }
        let world = self.transform.world_matrix() * ctx.parent_world;
        let child_ctx = ctx.with_parent(world);
        for mesh in &mut self.meshes {
            mesh.render(&child_ctx, backend);
        }
    }

    fn triangle_count(&self) -> usize {
        self.meshes.iter().map(SceneObject::triangle_count).sum()
    }
}
