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

//! Defines the authored `Color` type and its conversion to a platform paint.

use crate::renderer::PlatformPaint;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A color as authored by users: **sRGB** components with straight
/// (non-premultiplied) alpha, each in `[0.0, 1.0]`.
///
/// Renderers never see this type directly. At synchronization time it is turned
/// into a [`PlatformPaint`] through [`Color::to_platform_paint`], which applies
/// the sRGB transfer function and premultiplies alpha.
///
/// In serialized form a color is a hex string (`#RRGGBB` or `#RRGGBBAA`).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// The red component in sRGB space.
    pub r: f32,
    /// The green component in sRGB space.
    pub g: f32,
    /// The blue component in sRGB space.
    pub b: f32,
    /// The straight alpha component.
    pub a: f32,
}

impl Color {
    /// Opaque white (`#FFFFFF`).
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);
    /// Opaque black (`#000000`).
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    /// Opaque light gray (`#D3D3D3`), the diffuse color of a new material.
    pub const LIGHT_GRAY: Self = Self::rgb(211.0 / 255.0, 211.0 / 255.0, 211.0 / 255.0);
    /// Opaque red (`#FF0000`).
    pub const RED: Self = Self::rgb(1.0, 0.0, 0.0);
    /// Opaque green (`#00FF00`).
    pub const GREEN: Self = Self::rgb(0.0, 1.0, 0.0);
    /// Opaque blue (`#0000FF`).
    pub const BLUE: Self = Self::rgb(0.0, 0.0, 1.0);
    /// Fully transparent black.
    pub const TRANSPARENT: Self = Self::new(0.0, 0.0, 0.0, 0.0);

    /// Creates a color with explicit RGBA values.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color (alpha = 1.0).
    #[inline]
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Creates an opaque color from 8-bit sRGB channels.
    #[inline]
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Returns a copy with a different alpha.
    #[inline]
    pub fn with_alpha(&self, a: f32) -> Self {
        Self { a, ..*self }
    }

    /// Parses `#RRGGBB` or `#RRGGBBAA` (the leading `#` is optional).
    pub fn from_hex(hex: &str) -> Result<Self, ParseColorError> {
        let digits = hex.trim().trim_start_matches('#');
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParseColorError::InvalidDigit(hex.to_string()));
        }
        if !matches!(digits.len(), 6 | 8) {
            return Err(ParseColorError::InvalidLength(hex.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map(|v| v as f32 / 255.0)
                .map_err(|_| ParseColorError::InvalidDigit(hex.to_string()))
        };

        let a = if digits.len() == 8 { channel(6..8)? } else { 1.0 };
        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?, a))
    }

    /// Formats the color as `#RRGGBBAA`, clamping each channel.
    pub fn to_hex(&self) -> String {
        let byte = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02X}{:02X}{:02X}{:02X}",
            byte(self.r),
            byte(self.g),
            byte(self.b),
            byte(self.a)
        )
    }

    /// Converts this color to the representation handed to renderer peers:
    /// linear RGB, premultiplied by alpha.
    #[inline]
    pub fn to_platform_paint(&self) -> PlatformPaint {
        let a = self.a;
        PlatformPaint {
            r: srgb_to_linear(self.r) * a,
            g: srgb_to_linear(self.g) * a,
            b: srgb_to_linear(self.b) * a,
            a,
        }
    }
}

/// Converts an sRGB component to linear space.
#[inline]
fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl TryFrom<String> for Color {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

/// An error returned when a hex color string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseColorError {
    /// The string does not contain 6 or 8 hex digits.
    InvalidLength(String),
    /// The string contains a character that is not a hex digit.
    InvalidDigit(String),
}

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseColorError::InvalidLength(s) => {
                write!(f, "Color '{s}' must be #RRGGBB or #RRGGBBAA")
            }
            ParseColorError::InvalidDigit(s) => {
                write!(f, "Color '{s}' contains a non-hex digit")
            }
        }
    }
}

impl std::error::Error for ParseColorError {}
