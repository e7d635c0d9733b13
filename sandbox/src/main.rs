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

// Prism sandbox
// Loads a material scene and drives it against the headless backend.

use std::collections::HashMap;

use anyhow::{Context, Result};
use prism_core::asset::{AssetHandle, Image};
use prism_core::material::MaterialDefinition;
use prism_core::math::{Color, Extent2D};
use prism_core::renderer::{ImageFormat, TextureId};
use prism_core::PhongMaterial;
use prism_infra::{HeadlessBackend, HeadlessMaterial, HeadlessSettings};
use serde::Deserialize;

const DEFAULT_SCENE: &str = include_str!("../assets/scene.ron");

#[derive(Debug, Deserialize)]
struct ImageEntry {
    name: String,
    width: u32,
    height: u32,
    #[serde(default)]
    format: ImageFormat,
}

#[derive(Debug, Deserialize)]
struct SceneConfig {
    #[serde(default)]
    backend: HeadlessSettings,
    #[serde(default)]
    images: Vec<ImageEntry>,
    materials: Vec<MaterialDefinition>,
}

fn load_config() -> Result<SceneConfig> {
    match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading scene from '{path}'.");
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read scene file '{path}'"))?;
            ron::from_str(&text).with_context(|| format!("Invalid scene file '{path}'"))
        }
        None => {
            log::info!("No scene given, using the built-in one.");
            ron::from_str(DEFAULT_SCENE).context("Invalid built-in scene")
        }
    }
}

fn texture_label(backend: &HeadlessBackend, id: Option<TextureId>) -> &str {
    id.and_then(|id| backend.texture(id))
        .map_or("-", |record| record.label.as_str())
}

fn log_peer(backend: &HeadlessBackend, name: &str, material: &PhongMaterial) {
    let Some(peer) = material.peer_as::<HeadlessMaterial>() else {
        log::warn!("'{name}' has no peer yet.");
        return;
    };
    let uniforms = peer.uniforms();
    let bindings = peer.bindings();
    log::info!(
        "'{name}' -> {:?}: diffuse {:?}, specular {:?}, power {}, mask {:#08b}, {} push(es)",
        peer.id(),
        uniforms.diffuse,
        uniforms.specular,
        uniforms.specular_power,
        uniforms.feature_mask,
        peer.total_updates(),
    );
    log::info!(
        "'{name}' maps: diffuse {}, specular {}, bump {}, self-illumination {}",
        texture_label(backend, bindings.diffuse),
        texture_label(backend, bindings.specular),
        texture_label(backend, bindings.bump),
        texture_label(backend, bindings.self_illumination),
    );
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = load_config()?;
    let mut backend = HeadlessBackend::new(config.backend);

    let mut images: HashMap<String, AssetHandle<Image>> = HashMap::new();
    for entry in &config.images {
        let image = backend.register_image(
            &entry.name,
            Extent2D::new(entry.width, entry.height),
            entry.format,
        )?;
        images.insert(entry.name.clone(), image);
    }

    let mut materials = Vec::with_capacity(config.materials.len());
    for definition in &config.materials {
        let material =
            PhongMaterial::from_definition(definition, |name| images.get(name).cloned())?;
        log::info!("Loaded '{}': {material}", definition.name);
        materials.push((definition.name.clone(), material));
    }

    for (name, material) in &mut materials {
        material.synchronize(&mut backend)?;
        log_peer(&backend, name, material);
    }

    // Edit one material and show that only the touched properties travel.
    if let Some((name, material)) = materials.first_mut() {
        let changes = material.subscribe();
        material.set_specular_color(Some(Color::WHITE));
        material.set_specular_power(48.0);
        material.set_bump_map(None);

        for change in changes.try_iter() {
            log::info!("'{name}': {} changed.", change.property);
        }
        log::info!("'{name}' dirty: {:?}", material.dirty_flags());
        material.synchronize(&mut backend)?;
        log_peer(&backend, name, material);
    }

    let idle = materials
        .iter_mut()
        .map(|(_, material)| material.synchronize(&mut backend))
        .collect::<Result<Vec<_>, _>>()?;
    log::info!(
        "Idle pass pushed to {} material(s).",
        idle.iter().filter(|pushed| **pushed).count()
    );

    log::info!(
        "Backend '{}': {} material peer(s) alive, {} texture(s) registered ({} bytes).",
        backend.settings().label,
        backend.live_materials(),
        backend.texture_count(),
        backend.texture_memory()
    );
    drop(materials);
    log::info!("{} material peer(s) alive after release.", backend.live_materials());

    Ok(())
}
