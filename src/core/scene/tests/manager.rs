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

use super::RecordingBackend;
use crate::core::raster::FrameContext;
use crate::core::scene::{MaterialMesh, ObjectManager, SceneContext};
use crate::core::texture::TextureStore;

#[test]
fn test_add_get_remove() {
    let mut objects = ObjectManager::new();
    let a = objects.add(Box::new(MaterialMesh::cube("a")));
    let b = objects.add(Box::new(MaterialMesh::cube("b")));
    assert_eq!(objects.len(), 2);
    assert_eq!(objects.get(a).map(|o| o.name()), Some("a"));

    let removed = objects.remove(a).expect("live handle");
    assert_eq!(removed.name(), "a");
    assert_eq!(objects.len(), 1);
    assert!(objects.get(a).is_none());
    assert!(objects.remove(a).is_none());
    assert!(objects.contains(b));
}

#[test]
fn test_reused_slot_rejects_stale_handle() {
    let mut objects = ObjectManager::new();
    let old = objects.add(Box::new(MaterialMesh::cube("old")));
    objects.remove(old);
    let new = objects.add(Box::new(MaterialMesh::cube("new")));

    assert_ne!(old, new);
    assert!(objects.get(old).is_none());
    assert_eq!(objects.get(new).map(|o| o.name()), Some("new"));
}

#[test]
fn test_clear_invalidates_everything() {
    let mut objects = ObjectManager::new();
    let handles: Vec<_> = (0..3)
        .map(|i| objects.add(Box::new(MaterialMesh::cube(format!("cube{}", i)))))
        .collect();
    objects.clear();
    assert!(objects.is_empty());
    assert!(handles.iter().all(|&h| !objects.contains(h)));
    assert_eq!(objects.iter().count(), 0);
}

#[test]
fn test_render_all_skips_hidden_and_update_all_reaches_everyone() {
    let frame = FrameContext::identity(8, 8);
    let store = TextureStore::new();
    let mut objects = ObjectManager::new();

    let mut spinning = MaterialMesh::cube("spinning");
    spinning.set_rotation_speed(30.0);
    let visible = objects.add(Box::new(spinning));
    let hidden = objects.add(Box::new(MaterialMesh::cube("hidden")));
    if let Some(object) = objects.get_mut(hidden) {
        object.transform_mut().set_visible(false);
    }

    objects.update_all(1.0);
    let rotation = objects.get(visible).map(|o| o.transform().rotation().y);
    assert_eq!(rotation, Some(30.0));

    let mut backend = RecordingBackend::default();
    objects.render_all(&SceneContext::new(&frame, &store), &mut backend);
    assert_eq!(backend.triangles.len(), 12);
    assert_eq!(objects.triangle_count(), 24);
}

#[test]
fn test_iteration_follows_slot_order() {
    let mut objects = ObjectManager::new();
    for name in ["x", "y", "z"] {
        objects.add(Box::new(MaterialMesh::cube(name)));
    }
    let names: Vec<_> = objects.iter().map(|(_, o)| o.name().to_string()).collect();
    assert_eq!(names, ["x", "y", "z"]);
}
