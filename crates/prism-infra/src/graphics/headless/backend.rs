// Copyright 2025 eraflo
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

//! The headless backend and its settings.

use super::material::{HeadlessMaterial, MaterialId};
use super::textures::{TextureRecord, TextureRegistry};
use prism_core::asset::{AssetHandle, Image};
use prism_core::math::Extent2D;
use prism_core::renderer::{ImageFormat, MaterialBackend, MaterialPeer, ResourceError, TextureId};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Settings for a [`HeadlessBackend`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadlessSettings {
    /// A name used in logs.
    pub label: String,
    /// The number of materials that may be alive at the same time.
    pub max_materials: usize,
    /// The number of textures that may be registered.
    pub max_textures: usize,
}

impl Default for HeadlessSettings {
    fn default() -> Self {
        Self {
            label: "headless".to_string(),
            max_materials: 1024,
            max_textures: 4096,
        }
    }
}

/// A [`MaterialBackend`] that keeps renderer state in memory.
#[derive(Debug)]
pub struct HeadlessBackend {
    settings: HeadlessSettings,
    textures: TextureRegistry,
    next_material: usize,
    live_materials: Arc<AtomicUsize>,
}

impl HeadlessBackend {
    /// Creates a backend with the given settings.
    pub fn new(settings: HeadlessSettings) -> Self {
        log::info!(
            "Headless backend '{}' initialized (materials: {}, textures: {}).",
            settings.label,
            settings.max_materials,
            settings.max_textures
        );
        Self {
            textures: TextureRegistry::new(settings.max_textures),
            settings,
            next_material: 0,
            live_materials: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// The settings this backend was created with.
    pub fn settings(&self) -> &HeadlessSettings {
        &self.settings
    }

    /// Registers an image so materials can reference it.
    /// ## Errors
    /// * `ResourceError` - If the image is empty or the texture limit is reached.
    pub fn register_image(
        &mut self,
        label: &str,
        extent: Extent2D,
        format: ImageFormat,
    ) -> Result<AssetHandle<Image>, ResourceError> {
        self.textures.register(label, extent, format)
    }

    /// Looks up a registered texture.
    pub fn texture(&self, id: TextureId) -> Option<&TextureRecord> {
        self.textures.get(id)
    }

    /// Bytes occupied by all registered textures.
    pub fn texture_memory(&self) -> u64 {
        self.textures.memory_bytes()
    }

    /// Number of registered textures.
    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Number of material peers currently alive.
    pub fn live_materials(&self) -> usize {
        self.live_materials.load(Ordering::Relaxed)
    }

    /// Number of material peers created over the backend's lifetime.
    pub fn created_materials(&self) -> usize {
        self.next_material
    }
}

impl Default for HeadlessBackend {
    fn default() -> Self {
        Self::new(HeadlessSettings::default())
    }
}

impl MaterialBackend for HeadlessBackend {
    fn create_material_peer(&mut self) -> Result<Box<dyn MaterialPeer>, ResourceError> {
        let limit = self.settings.max_materials;
        if self.live_materials() >= limit {
            log::warn!(
                "Backend '{}': material limit of {limit} reached.",
                self.settings.label
            );
            return Err(ResourceError::LimitExceeded {
                resource: "material",
                limit,
            });
        }

        let id = MaterialId(self.next_material);
        self.next_material += 1;
        log::debug!("Backend '{}': created material {id:?}.", self.settings.label);
        Ok(Box::new(HeadlessMaterial::new(id, self.live_materials.clone())))
    }
}
