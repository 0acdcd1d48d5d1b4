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

//! Owner of all top-level scene objects
//!
//! Objects live in a slot arena. Each slot carries a generation counter that
//! is bumped when its object is removed, so a handle taken before the removal
//! no longer resolves, even after the slot is reused.

use std::fmt;

use super::backend::RenderBackend;
use super::{SceneContext, SceneObject};

/// Stable reference to an object in an [`ObjectManager`]
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectHandle {
    index: u32,
    generation: u32,
}

impl fmt::Debug for ObjectHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectHandle({}v{})", self.index, self.generation)
    }
}

struct Slot {
    generation: u32,
    object: Option<Box<dyn SceneObject>>,
}

/// Generational arena of boxed [`SceneObject`]s
///
/// Iteration, update and render run in slot order.
#[derive(Default)]
pub struct ObjectManager {
    slots: Vec<Slot>,
    free: Vec<u32>,
    len: usize,
}

impl ObjectManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of `object`
    pub fn add(&mut self, object: Box<dyn SceneObject>) -> ObjectHandle {
        log::debug!("Adding object '{}'", object.name());
        self.len += 1;
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.object = Some(object);
            return ObjectHandle {
                index,
                generation: slot.generation,
            };
        }
        let index = self.slots.len() as u32;
        self.slots.push(Slot {
            generation: 0,
            object: Some(object),
        });
        ObjectHandle {
            index,
            generation: 0,
        }
    }

    /// Remove and return the object, or `None` for a stale handle
    pub fn remove(&mut self, handle: ObjectHandle) -> Option<Box<dyn SceneObject>> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        let object = slot.object.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        self.len -= 1;
        Some(object)
    }

    pub fn clear(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.object.take().is_some() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(index as u32);
            }
        }
        self.len = 0;
    }

    pub fn contains(&self, handle: ObjectHandle) -> bool {
        self.get(handle).is_some()
    }

    pub fn get(&self, handle: ObjectHandle) -> Option<&dyn SceneObject> {
        let slot = self.slots.get(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.object.as_deref()
    }

    pub fn get_mut(&mut self, handle: ObjectHandle) -> Option<&mut (dyn SceneObject + 'static)> {
        let slot = self.slots.get_mut(handle.index as usize)?;
        if slot.generation != handle.generation {
            return None;
        }
        slot.object.as_deref_mut()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Live objects with their handles
    pub fn iter(&self) -> impl Iterator<Item = (ObjectHandle, &dyn SceneObject)> {
        self.slots.iter().enumerate().filter_map(|(index, slot)| {
            let handle = ObjectHandle {
                index: index as u32,
                generation: slot.generation,
            };
            slot.object.as_deref().map(|object| (handle, object))
        })
    }

    pub fn iter_mut(
        &mut self,
    ) -> impl Iterator<Item = (ObjectHandle, &mut (dyn SceneObject + 'static))> {
        self.slots.iter_mut().enumerate().filter_map(|(index, slot)| {
            let handle = ObjectHandle {
                index: index as u32,
                generation: slot.generation,
            };
            slot.object.as_deref_mut().map(|object| (handle, object))
        })
    }

    pub fn update_all(&mut self, dt: f32) {
        for (_, object) in self.iter_mut() {
            object.update(dt);
        }
    }

    /// Render every visible object
    pub fn render_all(&mut self, ctx: &SceneContext<'_>, backend: &mut dyn RenderBackend) {
        for (_, object) in self.iter_mut() {
            if object.transform().is_visible() {
                object.render(ctx, backend);
            }
        }
    }

    /// Sum of [`SceneObject::triangle_count`] over live objects
    pub fn triangle_count(&self) -> usize {
        self.iter().map(|(_, object)| object.triangle_count()).sum()
    }
}

impl fmt::Debug for ObjectManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.iter().map(|(handle, object)| (handle, object.name())))
            .finish()
    }
}
