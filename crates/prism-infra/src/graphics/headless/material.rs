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

//! The headless renderer-side material.

use super::uniforms::{feature, PhongUniforms};
use prism_core::material::MaterialProperty;
use prism_core::renderer::{MaterialPeer, PlatformImage, PlatformPaint, TextureId};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Identifies a material created by a [`HeadlessBackend`](super::HeadlessBackend).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialId(pub usize);

/// Textures bound to a material, one slot per map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MaterialBindings {
    /// Diffuse map slot.
    pub diffuse: Option<TextureId>,
    /// Specular map slot.
    pub specular: Option<TextureId>,
    /// Bump map slot.
    pub bump: Option<TextureId>,
    /// Self-illumination map slot.
    pub self_illumination: Option<TextureId>,
}

/// Renderer-side state of one material.
///
/// Also counts how often each property was pushed, which makes the
/// synchronization traffic observable.
#[derive(Debug)]
pub struct HeadlessMaterial {
    id: MaterialId,
    uniforms: PhongUniforms,
    bindings: MaterialBindings,
    updates: [u64; MaterialProperty::ALL.len()],
    live: Arc<AtomicUsize>,
}

impl HeadlessMaterial {
    pub(crate) fn new(id: MaterialId, live: Arc<AtomicUsize>) -> Self {
        live.fetch_add(1, Ordering::Relaxed);
        Self {
            id,
            uniforms: PhongUniforms::default(),
            bindings: MaterialBindings::default(),
            updates: [0; MaterialProperty::ALL.len()],
            live,
        }
    }

    /// The backend-assigned identifier.
    pub fn id(&self) -> MaterialId {
        self.id
    }

    /// The current uniform block.
    pub fn uniforms(&self) -> &PhongUniforms {
        &self.uniforms
    }

    /// The uniform block as raw bytes, ready for upload.
    pub fn uniform_bytes(&self) -> &[u8] {
        bytemuck::bytes_of(&self.uniforms)
    }

    /// The currently bound textures.
    pub fn bindings(&self) -> &MaterialBindings {
        &self.bindings
    }

    /// How many times `property` was pushed to this material.
    pub fn update_count(&self, property: MaterialProperty) -> u64 {
        self.updates[property as usize]
    }

    /// How many pushes this material received in total.
    pub fn total_updates(&self) -> u64 {
        self.updates.iter().fold(0u64, |total, n| total.wrapping_add(*n))
    }

    fn record(&mut self, property: MaterialProperty) {
        let count = &mut self.updates[property as usize];
        *count = count.wrapping_add(1);
        log::trace!("Material {:?}: {property} updated.", self.id);
    }

    fn bind(
        &mut self,
        property: MaterialProperty,
        bit: u32,
        image: Option<PlatformImage>,
    ) -> Option<TextureId> {
        self.record(property);
        self.uniforms.set_feature(bit, image.is_some());
        image.map(|image| image.texture)
    }
}

impl MaterialPeer for HeadlessMaterial {
    fn set_diffuse_color(&mut self, paint: Option<PlatformPaint>) {
        self.record(MaterialProperty::DiffuseColor);
        let present = PhongUniforms::write_color(&mut self.uniforms.diffuse, paint);
        self.uniforms.set_feature(feature::DIFFUSE_COLOR, present);
    }

    fn set_specular_color(&mut self, paint: Option<PlatformPaint>) {
        self.record(MaterialProperty::SpecularColor);
        let present = PhongUniforms::write_color(&mut self.uniforms.specular, paint);
        self.uniforms.set_feature(feature::SPECULAR_COLOR, present);
    }

    fn set_specular_power(&mut self, power: f32) {
        self.record(MaterialProperty::SpecularPower);
        self.uniforms.specular_power = power;
    }

    fn set_diffuse_map(&mut self, image: Option<PlatformImage>) {
        self.bindings.diffuse = self.bind(MaterialProperty::DiffuseMap, feature::DIFFUSE_MAP, image);
    }

    fn set_specular_map(&mut self, image: Option<PlatformImage>) {
        self.bindings.specular =
            self.bind(MaterialProperty::SpecularMap, feature::SPECULAR_MAP, image);
    }

    fn set_bump_map(&mut self, image: Option<PlatformImage>) {
        self.bindings.bump = self.bind(MaterialProperty::BumpMap, feature::BUMP_MAP, image);
    }

    fn set_self_illumination_map(&mut self, image: Option<PlatformImage>) {
        self.bindings.self_illumination = self.bind(
            MaterialProperty::SelfIlluminationMap,
            feature::SELF_ILLUMINATION_MAP,
            image,
        );
    }
}

impl Drop for HeadlessMaterial {
    fn drop(&mut self) {
        self.live.fetch_sub(1, Ordering::Relaxed);
        log::debug!("Released headless material {:?}.", self.id);
    }
}
