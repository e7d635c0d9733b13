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

//! A serializable, plain-data description of a Phong material.

use super::{MaterialProperty, PhongMaterial, DEFAULT_SPECULAR_POWER};
use crate::asset::{AssetHandle, Image};
use crate::math::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The stable, human-editable form of a [`PhongMaterial`].
///
/// Maps are referenced by name; turning a name into an image is left to the
/// caller of [`PhongMaterial::from_definition`]. Missing fields take the values
/// of a new material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialDefinition {
    /// A name used in logs and errors.
    pub name: String,
    /// The diffuse color.
    pub diffuse_color: Option<Color>,
    /// The specular color.
    pub specular_color: Option<Color>,
    /// The specular power.
    pub specular_power: f32,
    /// The name of the diffuse map.
    pub diffuse_map: Option<String>,
    /// The name of the specular map.
    pub specular_map: Option<String>,
    /// The name of the bump map.
    pub bump_map: Option<String>,
    /// The name of the self-illumination map.
    pub self_illumination_map: Option<String>,
}

impl Default for MaterialDefinition {
    fn default() -> Self {
        Self {
            name: String::new(),
            diffuse_color: Some(Color::LIGHT_GRAY),
            specular_color: None,
            specular_power: DEFAULT_SPECULAR_POWER,
            diffuse_map: None,
            specular_map: None,
            bump_map: None,
            self_illumination_map: None,
        }
    }
}

/// An error raised while building a material from a [`MaterialDefinition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DefinitionError {
    /// A map references an image the resolver does not know.
    UnknownImage {
        /// The material being built.
        material: String,
        /// The map that references the image.
        property: MaterialProperty,
        /// The unresolved image name.
        image: String,
    },
}

impl fmt::Display for DefinitionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefinitionError::UnknownImage {
                material,
                property,
                image,
            } => write!(
                f,
                "Material '{material}' references unknown image '{image}' as {property}"
            ),
        }
    }
}

impl std::error::Error for DefinitionError {}

impl PhongMaterial {
    /// Builds a material from its definition, resolving map names with
    /// `resolve`.
    ///
    /// The returned material is fully dirty, like any new material.
    ///
    /// ## Errors
    /// * `DefinitionError::UnknownImage` - If `resolve` returns `None` for a
    ///   referenced map.
    pub fn from_definition<F>(
        definition: &MaterialDefinition,
        mut resolve: F,
    ) -> Result<Self, DefinitionError>
    where
        F: FnMut(&str) -> Option<AssetHandle<Image>>,
    {
        let mut lookup = |property: MaterialProperty, name: &Option<String>| {
            name.as_deref()
                .map(|image| {
                    resolve(image).ok_or_else(|| DefinitionError::UnknownImage {
                        material: definition.name.clone(),
                        property,
                        image: image.to_string(),
                    })
                })
                .transpose()
        };

        let diffuse_map = lookup(MaterialProperty::DiffuseMap, &definition.diffuse_map)?;
        let specular_map = lookup(MaterialProperty::SpecularMap, &definition.specular_map)?;
        let bump_map = lookup(MaterialProperty::BumpMap, &definition.bump_map)?;
        let self_illumination_map = lookup(
            MaterialProperty::SelfIlluminationMap,
            &definition.self_illumination_map,
        )?;

        let mut material = PhongMaterial::with_maps(
            definition.diffuse_color,
            diffuse_map,
            specular_map,
            bump_map,
            self_illumination_map,
        );
        material.set_specular_color(definition.specular_color);
        material.set_specular_power(definition.specular_power);
        Ok(material)
    }

    /// Captures the current values as a definition. Maps are named by their
    /// image labels.
    pub fn to_definition(&self, name: impl Into<String>) -> MaterialDefinition {
        let label = |map: Option<&AssetHandle<Image>>| map.map(|image| image.label().to_string());
        MaterialDefinition {
            name: name.into(),
            diffuse_color: self.diffuse_color(),
            specular_color: self.specular_color(),
            specular_power: self.specular_power(),
            diffuse_map: label(self.diffuse_map()),
            specular_map: label(self.specular_map()),
            bump_map: label(self.bump_map()),
            self_illumination_map: label(self.self_illumination_map()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Extent2D;
    use crate::material::DirtyFlags;
    use crate::renderer::{ImageFormat, TextureId};
    use std::collections::HashMap;

    fn library() -> HashMap<String, AssetHandle<Image>> {
        ["bricks.png", "bricks_bump.png"]
            .into_iter()
            .enumerate()
            .map(|(i, name)| {
                let image = Image::new(
                    name,
                    Extent2D::new(32, 32),
                    ImageFormat::Rgba8Unorm,
                    TextureId(i),
                );
                (name.to_string(), AssetHandle::new(image))
            })
            .collect()
    }

    #[test]
    fn missing_fields_take_new_material_values() {
        let definition: MaterialDefinition = ron::from_str("(name: \"plain\")").unwrap();
        let material = PhongMaterial::from_definition(&definition, |_| None).unwrap();

        assert_eq!(material.diffuse_color(), Some(Color::LIGHT_GRAY));
        assert_eq!(material.specular_power(), 1.0);
        assert!(material.diffuse_map().is_none());
        assert_eq!(material.dirty_flags(), DirtyFlags::ALL);
    }

    #[test]
    fn builds_material_with_resolved_maps() {
        let images = library();
        let definition: MaterialDefinition = ron::from_str(
            r##"(
                name: "wall",
                diffuse_color: Some("#FFFFFF"),
                specular_color: Some("#808080"),
                specular_power: 24.0,
                diffuse_map: Some("bricks.png"),
                bump_map: Some("bricks_bump.png"),
            )"##,
        )
        .unwrap();

        let material =
            PhongMaterial::from_definition(&definition, |name| images.get(name).cloned()).unwrap();

        assert_eq!(material.diffuse_color(), Some(Color::WHITE));
        assert_eq!(material.specular_color(), Some(Color::from_rgb8(0x80, 0x80, 0x80)));
        assert_eq!(material.specular_power(), 24.0);
        assert_eq!(material.diffuse_map(), images.get("bricks.png"));
        assert_eq!(material.bump_map(), images.get("bricks_bump.png"));
        assert!(material.specular_map().is_none());
    }

    #[test]
    fn unknown_image_is_reported() {
        let definition = MaterialDefinition {
            name: "broken".to_string(),
            specular_map: Some("missing.png".to_string()),
            ..Default::default()
        };

        let err = PhongMaterial::from_definition(&definition, |_| None).unwrap_err();

        assert_eq!(
            err,
            DefinitionError::UnknownImage {
                material: "broken".to_string(),
                property: MaterialProperty::SpecularMap,
                image: "missing.png".to_string(),
            }
        );
        assert_eq!(
            err.to_string(),
            "Material 'broken' references unknown image 'missing.png' as specular_map"
        );
    }

    #[test]
    fn definition_captures_current_values() {
        let images = library();
        let mut material = PhongMaterial::with_diffuse_color(None);
        material.set_specular_power(12.0);
        material.set_bump_map(images.get("bricks_bump.png").cloned());

        let definition = material.to_definition("captured");

        assert_eq!(definition.name, "captured");
        assert_eq!(definition.diffuse_color, None);
        assert_eq!(definition.specular_power, 12.0);
        assert_eq!(definition.bump_map.as_deref(), Some("bricks_bump.png"));
        assert_eq!(definition.diffuse_map, None);
    }
}
