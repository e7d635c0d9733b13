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

//! Per-property change tracking for materials.

use std::fmt;

/// One of the seven synchronized properties of a [`PhongMaterial`](super::PhongMaterial).
///
/// The declaration order is the order in which dirty properties are pushed to
/// a peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialProperty {
    /// The diffuse color.
    DiffuseColor,
    /// The specular color.
    SpecularColor,
    /// The specular exponent.
    SpecularPower,
    /// The diffuse map.
    DiffuseMap,
    /// The specular map.
    SpecularMap,
    /// The bump map.
    BumpMap,
    /// The self-illumination map.
    SelfIlluminationMap,
}

impl MaterialProperty {
    /// All properties, in push order.
    pub const ALL: [MaterialProperty; 7] = [
        MaterialProperty::DiffuseColor,
        MaterialProperty::SpecularColor,
        MaterialProperty::SpecularPower,
        MaterialProperty::DiffuseMap,
        MaterialProperty::SpecularMap,
        MaterialProperty::BumpMap,
        MaterialProperty::SelfIlluminationMap,
    ];

    /// The property name as it appears in definitions and logs.
    pub const fn name(&self) -> &'static str {
        match self {
            MaterialProperty::DiffuseColor => "diffuse_color",
            MaterialProperty::SpecularColor => "specular_color",
            MaterialProperty::SpecularPower => "specular_power",
            MaterialProperty::DiffuseMap => "diffuse_map",
            MaterialProperty::SpecularMap => "specular_map",
            MaterialProperty::BumpMap => "bump_map",
            MaterialProperty::SelfIlluminationMap => "self_illumination_map",
        }
    }
}

impl fmt::Display for MaterialProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A set of material properties whose CPU-side value changed since the last
/// synchronization.
///
/// Multiple properties can be combined using bitwise operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DirtyFlags {
    bits: u8,
}

impl DirtyFlags {
    /// No property is dirty.
    pub const NONE: Self = Self { bits: 0 };
    /// The diffuse color changed.
    pub const DIFFUSE_COLOR: Self = Self { bits: 1 << 0 };
    /// The specular color changed.
    pub const SPECULAR_COLOR: Self = Self { bits: 1 << 1 };
    /// The specular power changed.
    pub const SPECULAR_POWER: Self = Self { bits: 1 << 2 };
    /// The diffuse map changed.
    pub const DIFFUSE_MAP: Self = Self { bits: 1 << 3 };
    /// The specular map changed.
    pub const SPECULAR_MAP: Self = Self { bits: 1 << 4 };
    /// The bump map changed.
    pub const BUMP_MAP: Self = Self { bits: 1 << 5 };
    /// The self-illumination map changed.
    pub const SELF_ILLUMINATION_MAP: Self = Self { bits: 1 << 6 };
    /// Every property.
    pub const ALL: Self = Self { bits: 0b0111_1111 };

    /// Returns the flag for a single property.
    pub const fn from_property(property: MaterialProperty) -> Self {
        match property {
            MaterialProperty::DiffuseColor => Self::DIFFUSE_COLOR,
            MaterialProperty::SpecularColor => Self::SPECULAR_COLOR,
            MaterialProperty::SpecularPower => Self::SPECULAR_POWER,
            MaterialProperty::DiffuseMap => Self::DIFFUSE_MAP,
            MaterialProperty::SpecularMap => Self::SPECULAR_MAP,
            MaterialProperty::BumpMap => Self::BUMP_MAP,
            MaterialProperty::SelfIlluminationMap => Self::SELF_ILLUMINATION_MAP,
        }
    }

    /// Returns the raw bits.
    pub const fn bits(&self) -> u8 {
        self.bits
    }

    /// Combines two sets of flags.
    pub const fn union(self, other: Self) -> Self {
        Self {
            bits: self.bits | other.bits,
        }
    }

    /// Checks if a property is marked.
    pub const fn contains(&self, property: MaterialProperty) -> bool {
        let bits = Self::from_property(property).bits;
        (self.bits & bits) == bits
    }

    /// Marks a property.
    pub fn insert(&mut self, property: MaterialProperty) {
        *self = self.union(Self::from_property(property));
    }

    /// Checks if no property is marked.
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Iterates over the marked properties in push order.
    pub fn iter(&self) -> impl Iterator<Item = MaterialProperty> {
        let flags = *self;
        MaterialProperty::ALL
            .into_iter()
            .filter(move |property| flags.contains(*property))
    }
}

impl std::ops::BitOr for DirtyFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self::Output {
        self.union(rhs)
    }
}

impl std::ops::BitOrAssign for DirtyFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        *self = self.union(rhs);
    }
}
