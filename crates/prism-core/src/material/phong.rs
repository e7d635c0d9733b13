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

//! Defines the Phong material descriptor.

use super::event::ChangeSubscribers;
use super::{DirtyFlags, MaterialChange, MaterialProperty};
use crate::asset::{AssetHandle, Image};
use crate::math::Color;
use crate::renderer::{MaterialBackend, MaterialPeer, ResourceError};
use std::fmt;

/// The specular power of a material that never had one set.
pub const DEFAULT_SPECULAR_POWER: f32 = 1.0;

/// A Phong-shaded material: diffuse and specular colors, a specular power and
/// four image maps.
///
/// The descriptor is a cache in front of a renderer-side peer. Setters only
/// store the value and mark the property dirty. [`PhongMaterial::synchronize`]
/// creates the peer on first use and pushes the dirty properties to it.
///
/// # Dirty tracking
///
/// - Every setter call marks its property dirty, even when the new value equals
///   the old one.
/// - The material is dirty while any property is dirty, or after
///   [`PhongMaterial::mark_dirty`].
/// - A new material starts with every property dirty, so the first
///   synchronization always creates the peer and pushes the full state.
/// - Only a successful synchronization clears the flags. Since nothing else
///   clears them, a clean material always has a peer.
///
/// The type is meant to be mutated and synchronized from one thread; it is
/// `Send` but provides no interior synchronization.
///
/// # Examples
///
/// ```
/// use prism_core::math::Color;
/// use prism_core::PhongMaterial;
///
/// let mut material = PhongMaterial::new();
/// material.set_specular_color(Some(Color::WHITE));
/// material.set_specular_power(32.0);
///
/// assert!(material.is_dirty());
/// assert_eq!(material.diffuse_color(), Some(Color::LIGHT_GRAY));
/// assert_eq!(material.specular_power(), 32.0);
/// ```
#[derive(Debug)]
pub struct PhongMaterial {
    diffuse_color: Option<Color>,
    specular_color: Option<Color>,
    specular_power: f32,
    diffuse_map: Option<AssetHandle<Image>>,
    specular_map: Option<AssetHandle<Image>>,
    bump_map: Option<AssetHandle<Image>>,
    self_illumination_map: Option<AssetHandle<Image>>,

    dirty_flags: DirtyFlags,
    dirty: bool,
    peer: Option<Box<dyn MaterialPeer>>,
    subscribers: ChangeSubscribers,
}

impl PhongMaterial {
    /// Creates a light gray material with no specular color and no maps.
    pub fn new() -> Self {
        Self::with_diffuse_color(Some(Color::LIGHT_GRAY))
    }

    /// Creates a material with the given diffuse color.
    pub fn with_diffuse_color(diffuse_color: Option<Color>) -> Self {
        Self {
            diffuse_color,
            ..Self::blank()
        }
    }

    /// Creates a material with a diffuse color and all four maps.
    pub fn with_maps(
        diffuse_color: Option<Color>,
        diffuse_map: Option<AssetHandle<Image>>,
        specular_map: Option<AssetHandle<Image>>,
        bump_map: Option<AssetHandle<Image>>,
        self_illumination_map: Option<AssetHandle<Image>>,
    ) -> Self {
        Self {
            diffuse_color,
            diffuse_map,
            specular_map,
            bump_map,
            self_illumination_map,
            ..Self::blank()
        }
    }

    fn blank() -> Self {
        Self {
            diffuse_color: None,
            specular_color: None,
            specular_power: DEFAULT_SPECULAR_POWER,
            diffuse_map: None,
            specular_map: None,
            bump_map: None,
            self_illumination_map: None,
            dirty_flags: DirtyFlags::ALL,
            dirty: true,
            peer: None,
            subscribers: ChangeSubscribers::default(),
        }
    }

    // --- Accessors ---

    /// The diffuse color, if any.
    pub fn diffuse_color(&self) -> Option<Color> {
        self.diffuse_color
    }

    /// The specular color, if any.
    pub fn specular_color(&self) -> Option<Color> {
        self.specular_color
    }

    /// The specular power. [`DEFAULT_SPECULAR_POWER`] until set.
    pub fn specular_power(&self) -> f32 {
        self.specular_power
    }

    /// The diffuse map, if any.
    pub fn diffuse_map(&self) -> Option<&AssetHandle<Image>> {
        self.diffuse_map.as_ref()
    }

    /// The specular map, if any.
    pub fn specular_map(&self) -> Option<&AssetHandle<Image>> {
        self.specular_map.as_ref()
    }

    /// The bump map, if any.
    pub fn bump_map(&self) -> Option<&AssetHandle<Image>> {
        self.bump_map.as_ref()
    }

    /// The self-illumination map, if any.
    pub fn self_illumination_map(&self) -> Option<&AssetHandle<Image>> {
        self.self_illumination_map.as_ref()
    }

    // --- Setters ---

    /// Sets or clears the diffuse color.
    pub fn set_diffuse_color(&mut self, color: Option<Color>) {
        self.diffuse_color = color;
        self.touch(MaterialProperty::DiffuseColor);
    }

    /// Sets or clears the specular color.
    pub fn set_specular_color(&mut self, color: Option<Color>) {
        self.specular_color = color;
        self.touch(MaterialProperty::SpecularColor);
    }

    /// Sets the specular power. Any value is accepted.
    pub fn set_specular_power(&mut self, power: f32) {
        self.specular_power = power;
        self.touch(MaterialProperty::SpecularPower);
    }

    /// Sets or clears the diffuse map.
    pub fn set_diffuse_map(&mut self, image: Option<AssetHandle<Image>>) {
        self.diffuse_map = image;
        self.touch(MaterialProperty::DiffuseMap);
    }

    /// Sets or clears the specular map.
    pub fn set_specular_map(&mut self, image: Option<AssetHandle<Image>>) {
        self.specular_map = image;
        self.touch(MaterialProperty::SpecularMap);
    }

    /// Sets or clears the bump map.
    pub fn set_bump_map(&mut self, image: Option<AssetHandle<Image>>) {
        self.bump_map = image;
        self.touch(MaterialProperty::BumpMap);
    }

    /// Sets or clears the self-illumination map.
    pub fn set_self_illumination_map(&mut self, image: Option<AssetHandle<Image>>) {
        self.self_illumination_map = image;
        self.touch(MaterialProperty::SelfIlluminationMap);
    }

    fn touch(&mut self, property: MaterialProperty) {
        log::trace!("Material property '{property}' set.");
        self.dirty_flags.insert(property);
        self.dirty = true;
        self.subscribers.publish(MaterialChange { property });
    }

    // --- Dirty state ---

    /// Returns `true` if the next [`synchronize`](Self::synchronize) will do work.
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The properties that will be pushed on the next synchronization.
    pub fn dirty_flags(&self) -> DirtyFlags {
        self.dirty_flags
    }

    /// Returns `true` if `property` changed since the last synchronization.
    pub fn is_property_dirty(&self, property: MaterialProperty) -> bool {
        self.dirty_flags.contains(property)
    }

    /// Forces the next synchronization to run without marking any property.
    ///
    /// Owners call this when the material is attached to a new scene node, so
    /// the peer is guaranteed to exist afterwards.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    // --- Peer ---

    /// Pushes every dirty property to the renderer-side peer.
    ///
    /// Does nothing and returns `Ok(false)` when the material is clean. This
    /// includes not creating a peer. Otherwise the peer is created through
    /// `backend` if this is the first synchronization, each dirty property is
    /// converted to its platform representation and pushed in
    /// [`MaterialProperty::ALL`] order, and all flags are cleared.
    ///
    /// Absent colors and maps are pushed as `None`.
    ///
    /// ## Errors
    /// * `ResourceError` - If the peer had to be created and the backend
    ///   refused. The material stays dirty and nothing was pushed.
    pub fn synchronize<B>(&mut self, backend: &mut B) -> Result<bool, ResourceError>
    where
        B: MaterialBackend + ?Sized,
    {
        if !self.dirty {
            return Ok(false);
        }

        let peer = match self.peer.take() {
            Some(peer) => peer,
            None => {
                let peer = backend.create_material_peer()?;
                log::debug!("Created renderer peer for material.");
                peer
            }
        };
        let peer = self.peer.insert(peer);

        let flags = self.dirty_flags;
        for property in flags.iter() {
            match property {
                MaterialProperty::DiffuseColor => {
                    peer.set_diffuse_color(self.diffuse_color.map(|c| c.to_platform_paint()))
                }
                MaterialProperty::SpecularColor => {
                    peer.set_specular_color(self.specular_color.map(|c| c.to_platform_paint()))
                }
                MaterialProperty::SpecularPower => peer.set_specular_power(self.specular_power),
                MaterialProperty::DiffuseMap => {
                    peer.set_diffuse_map(self.diffuse_map.as_ref().map(|i| i.platform_image()))
                }
                MaterialProperty::SpecularMap => {
                    peer.set_specular_map(self.specular_map.as_ref().map(|i| i.platform_image()))
                }
                MaterialProperty::BumpMap => {
                    peer.set_bump_map(self.bump_map.as_ref().map(|i| i.platform_image()))
                }
                MaterialProperty::SelfIlluminationMap => peer.set_self_illumination_map(
                    self.self_illumination_map
                        .as_ref()
                        .map(|i| i.platform_image()),
                ),
            }
        }

        log::debug!(
            "Synchronized material: {} propert(ies) pushed.",
            flags.iter().count()
        );
        self.dirty_flags = DirtyFlags::NONE;
        self.dirty = false;
        Ok(true)
    }

    /// Returns `true` once a peer was created.
    pub fn has_peer(&self) -> bool {
        self.peer.is_some()
    }

    /// The renderer-side peer, if one was created.
    pub fn peer(&self) -> Option<&dyn MaterialPeer> {
        self.peer.as_deref()
    }

    /// The renderer-side peer, if one was created.
    pub fn peer_mut(&mut self) -> Option<&mut (dyn MaterialPeer + 'static)> {
        self.peer.as_deref_mut()
    }

    /// The peer downcast to a concrete backend type.
    pub fn peer_as<T: MaterialPeer + 'static>(&self) -> Option<&T> {
        self.peer().and_then(|peer| peer.as_any().downcast_ref::<T>())
    }

    // --- Observers ---

    /// Subscribes to property changes. One [`MaterialChange`] is sent per
    /// setter call until the receiver is dropped.
    pub fn subscribe(&mut self) -> flume::Receiver<MaterialChange> {
        self.subscribers.subscribe()
    }
}

impl Default for PhongMaterial {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PhongMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn color(c: Option<Color>) -> String {
            c.map_or_else(|| "none".to_string(), |c| c.to_hex())
        }
        fn map(m: Option<&AssetHandle<Image>>) -> &str {
            m.map_or("none", |m| m.label())
        }

        write!(
            f,
            "PhongMaterial {{ diffuse_color: {}, specular_color: {}, specular_power: {}, \
             diffuse_map: {}, specular_map: {}, bump_map: {}, self_illumination_map: {} }}",
            color(self.diffuse_color),
            color(self.specular_color),
            self.specular_power,
            map(self.diffuse_map()),
            map(self.specular_map()),
            map(self.bump_map()),
            map(self.self_illumination_map()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Extent2D;
    use crate::renderer::{ImageFormat, PlatformImage, PlatformPaint, TextureId};
    use approx::assert_relative_eq;

    #[derive(Debug, Clone, PartialEq)]
    enum Push {
        DiffuseColor(Option<PlatformPaint>),
        SpecularColor(Option<PlatformPaint>),
        SpecularPower(f32),
        DiffuseMap(Option<PlatformImage>),
        SpecularMap(Option<PlatformImage>),
        BumpMap(Option<PlatformImage>),
        SelfIlluminationMap(Option<PlatformImage>),
    }

    #[derive(Debug, Default)]
    struct RecordingPeer {
        pushes: Vec<Push>,
    }

    impl MaterialPeer for RecordingPeer {
        fn set_diffuse_color(&mut self, paint: Option<PlatformPaint>) {
            self.pushes.push(Push::DiffuseColor(paint));
        }
        fn set_specular_color(&mut self, paint: Option<PlatformPaint>) {
            self.pushes.push(Push::SpecularColor(paint));
        }
        fn set_specular_power(&mut self, power: f32) {
            self.pushes.push(Push::SpecularPower(power));
        }
        fn set_diffuse_map(&mut self, image: Option<PlatformImage>) {
            self.pushes.push(Push::DiffuseMap(image));
        }
        fn set_specular_map(&mut self, image: Option<PlatformImage>) {
            self.pushes.push(Push::SpecularMap(image));
        }
        fn set_bump_map(&mut self, image: Option<PlatformImage>) {
            self.pushes.push(Push::BumpMap(image));
        }
        fn set_self_illumination_map(&mut self, image: Option<PlatformImage>) {
            self.pushes.push(Push::SelfIlluminationMap(image));
        }
    }

    #[derive(Default)]
    struct RecordingBackend {
        created: usize,
        refuse: bool,
    }

    impl MaterialBackend for RecordingBackend {
        fn create_material_peer(&mut self) -> Result<Box<dyn MaterialPeer>, ResourceError> {
            if self.refuse {
                return Err(ResourceError::BackendError("out of memory".to_string()));
            }
            self.created += 1;
            Ok(Box::new(RecordingPeer::default()))
        }
    }

    fn image(label: &str, id: usize) -> AssetHandle<Image> {
        AssetHandle::new(Image::new(
            label,
            Extent2D::new(64, 64),
            ImageFormat::Rgba8UnormSrgb,
            TextureId(id),
        ))
    }

    fn pushes(material: &PhongMaterial) -> &[Push] {
        &material
            .peer_as::<RecordingPeer>()
            .expect("peer should be a RecordingPeer")
            .pushes
    }

    fn synced() -> (PhongMaterial, RecordingBackend) {
        let mut material = PhongMaterial::new();
        let mut backend = RecordingBackend::default();
        material.synchronize(&mut backend).unwrap();
        (material, backend)
    }

    #[test]
    fn new_material_defaults() {
        let material = PhongMaterial::new();
        assert_eq!(material.diffuse_color(), Some(Color::LIGHT_GRAY));
        assert_eq!(material.specular_color(), None);
        assert_eq!(material.specular_power(), 1.0);
        assert!(material.diffuse_map().is_none());
        assert!(material.specular_map().is_none());
        assert!(material.bump_map().is_none());
        assert!(material.self_illumination_map().is_none());
        assert!(!material.has_peer());
    }

    #[test]
    fn new_material_is_fully_dirty() {
        let material = PhongMaterial::with_diffuse_color(None);
        assert!(material.is_dirty());
        assert_eq!(material.dirty_flags(), DirtyFlags::ALL);
        assert_eq!(material.diffuse_color(), None);
    }

    #[test]
    fn every_setter_stores_its_value_and_marks_dirty() {
        let (mut material, _) = synced();
        let bricks = image("bricks.png", 1);

        material.set_diffuse_color(Some(Color::RED));
        assert_eq!(material.diffuse_color(), Some(Color::RED));
        material.set_specular_color(Some(Color::WHITE));
        assert_eq!(material.specular_color(), Some(Color::WHITE));
        material.set_specular_power(64.0);
        assert_eq!(material.specular_power(), 64.0);
        material.set_diffuse_map(Some(bricks.clone()));
        assert_eq!(material.diffuse_map(), Some(&bricks));
        material.set_specular_map(Some(bricks.clone()));
        assert_eq!(material.specular_map(), Some(&bricks));
        material.set_bump_map(Some(bricks.clone()));
        assert_eq!(material.bump_map(), Some(&bricks));
        material.set_self_illumination_map(Some(bricks.clone()));
        assert_eq!(material.self_illumination_map(), Some(&bricks));

        assert!(material.is_dirty());
        assert_eq!(material.dirty_flags(), DirtyFlags::ALL);
    }

    #[test]
    fn each_setter_marks_only_its_own_property() {
        let (mut material, _) = synced();

        material.set_specular_map(Some(image("spec.png", 2)));

        assert!(material.is_property_dirty(MaterialProperty::SpecularMap));
        assert!(!material.is_property_dirty(MaterialProperty::DiffuseMap));
        assert!(material.diffuse_map().is_none());
        assert_eq!(material.dirty_flags().iter().count(), 1);
    }

    #[test]
    fn first_synchronize_creates_peer_and_pushes_everything() {
        let mut material = PhongMaterial::new();
        let mut backend = RecordingBackend::default();

        assert_eq!(material.synchronize(&mut backend), Ok(true));

        assert_eq!(backend.created, 1);
        assert_eq!(
            pushes(&material),
            &[
                Push::DiffuseColor(Some(Color::LIGHT_GRAY.to_platform_paint())),
                Push::SpecularColor(None),
                Push::SpecularPower(1.0),
                Push::DiffuseMap(None),
                Push::SpecularMap(None),
                Push::BumpMap(None),
                Push::SelfIlluminationMap(None),
            ]
        );
    }

    #[test]
    fn synchronize_clears_all_flags() {
        let (mut material, mut backend) = synced();
        material.set_bump_map(Some(image("bump.png", 3)));
        material.set_specular_power(8.0);

        material.synchronize(&mut backend).unwrap();

        assert!(!material.is_dirty());
        assert!(material.dirty_flags().is_empty());
        for property in MaterialProperty::ALL {
            assert!(!material.is_property_dirty(property));
        }
    }

    #[test]
    fn clean_synchronize_pushes_nothing() {
        let (mut material, mut backend) = synced();
        let before = pushes(&material).len();

        assert_eq!(material.synchronize(&mut backend), Ok(false));
        assert_eq!(material.synchronize(&mut backend), Ok(false));

        assert_eq!(pushes(&material).len(), before);
        assert_eq!(backend.created, 1);
    }

    #[test]
    fn only_dirty_properties_are_pushed() {
        let (mut material, mut backend) = synced();
        let before = pushes(&material).len();

        material.set_specular_power(16.0);
        material.synchronize(&mut backend).unwrap();

        assert_eq!(&pushes(&material)[before..], &[Push::SpecularPower(16.0)]);
    }

    #[test]
    fn setting_the_same_value_still_pushes() {
        let (mut material, mut backend) = synced();
        material.set_diffuse_color(Some(Color::BLUE));
        material.synchronize(&mut backend).unwrap();
        let before = pushes(&material).len();

        material.set_diffuse_color(Some(Color::BLUE));
        assert!(material.is_dirty());
        assert!(material.is_property_dirty(MaterialProperty::DiffuseColor));
        material.synchronize(&mut backend).unwrap();

        assert_eq!(
            &pushes(&material)[before..],
            &[Push::DiffuseColor(Some(Color::BLUE.to_platform_paint()))]
        );
    }

    #[test]
    fn clearing_a_map_pushes_absence() {
        let (mut material, mut backend) = synced();
        let glow = image("glow.png", 9);
        material.set_self_illumination_map(Some(glow.clone()));
        material.synchronize(&mut backend).unwrap();
        assert_eq!(
            pushes(&material).last(),
            Some(&Push::SelfIlluminationMap(Some(glow.platform_image())))
        );

        material.set_self_illumination_map(None);
        material.synchronize(&mut backend).unwrap();

        assert_eq!(pushes(&material).last(), Some(&Push::SelfIlluminationMap(None)));
    }

    #[test]
    fn clearing_a_color_pushes_absence() {
        let (mut material, mut backend) = synced();
        material.set_diffuse_color(None);
        material.synchronize(&mut backend).unwrap();
        assert_eq!(pushes(&material).last(), Some(&Push::DiffuseColor(None)));
    }

    #[test]
    fn colors_are_converted_at_push_time() {
        let (mut material, mut backend) = synced();
        let color = Color::rgb(0.5, 0.25, 1.0).with_alpha(0.5);
        material.set_specular_color(Some(color));
        material.synchronize(&mut backend).unwrap();

        let Some(Push::SpecularColor(Some(paint))) = pushes(&material).last().cloned() else {
            panic!("expected a specular color push");
        };
        assert_relative_eq!(paint.a, 0.5);
        assert_relative_eq!(paint.b, 0.5, epsilon = 1e-5);
        assert_eq!(paint, color.to_platform_paint());
    }

    #[test]
    fn peer_is_created_once() {
        let (mut material, mut backend) = synced();
        for power in [2.0, 4.0, 8.0] {
            material.set_specular_power(power);
            material.synchronize(&mut backend).unwrap();
        }
        assert_eq!(backend.created, 1);
    }

    #[test]
    fn mark_dirty_forces_a_pass_without_pushes() {
        let (mut material, mut backend) = synced();
        let before = pushes(&material).len();

        material.mark_dirty();
        assert!(material.is_dirty());
        assert!(material.dirty_flags().is_empty());

        assert_eq!(material.synchronize(&mut backend), Ok(true));
        assert_eq!(pushes(&material).len(), before);
        assert!(!material.is_dirty());
    }

    #[test]
    fn failed_peer_creation_keeps_material_dirty() {
        let mut material = PhongMaterial::new();
        let mut backend = RecordingBackend {
            refuse: true,
            ..Default::default()
        };

        let err = material.synchronize(&mut backend).unwrap_err();
        assert_eq!(err, ResourceError::BackendError("out of memory".to_string()));
        assert!(material.is_dirty());
        assert_eq!(material.dirty_flags(), DirtyFlags::ALL);
        assert!(!material.has_peer());

        backend.refuse = false;
        assert_eq!(material.synchronize(&mut backend), Ok(true));
        assert_eq!(pushes(&material).len(), 7);
    }

    #[test]
    fn works_through_a_backend_trait_object() {
        let mut material = PhongMaterial::new();
        let mut backend = RecordingBackend::default();
        let dyn_backend: &mut dyn MaterialBackend = &mut backend;

        assert_eq!(material.synchronize(dyn_backend), Ok(true));
        assert!(material.peer().is_some());
    }

    #[test]
    fn maps_are_shared_not_owned() {
        let bricks = image("bricks.png", 1);
        let mut material = PhongMaterial::with_maps(
            Some(Color::WHITE),
            Some(bricks.clone()),
            None,
            Some(bricks.clone()),
            None,
        );
        assert_eq!(AssetHandle::strong_count(&bricks), 3);

        material.set_bump_map(None);
        assert_eq!(AssetHandle::strong_count(&bricks), 2);
        drop(material);
        assert_eq!(AssetHandle::strong_count(&bricks), 1);
    }

    #[test]
    fn subscribers_see_every_setter_call() {
        let (mut material, mut backend) = synced();
        let changes = material.subscribe();

        material.set_bump_map(None);
        material.set_bump_map(None);
        material.set_specular_power(3.0);
        material.synchronize(&mut backend).unwrap();

        let received: Vec<_> = changes.try_iter().map(|c| c.property).collect();
        assert_eq!(
            received,
            vec![
                MaterialProperty::BumpMap,
                MaterialProperty::BumpMap,
                MaterialProperty::SpecularPower,
            ]
        );
    }

    #[test]
    fn display_lists_every_property() {
        let mut material = PhongMaterial::new();
        material.set_diffuse_map(Some(image("bricks.png", 1)));

        assert_eq!(
            material.to_string(),
            "PhongMaterial { diffuse_color: #D3D3D3FF, specular_color: none, specular_power: 1, \
             diffuse_map: bricks.png, specular_map: none, bump_map: none, self_illumination_map: none }"
        );
    }
}
