//! Color handling for Zoetrope scenes
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor`
//! type from the color crate, adding the conversions the scene model and the
//! raster encoder need.

use std::{
    hash::{Hash, Hasher},
    str::FromStr,
};

use color::{DynamicColor, Srgb};

/// Wrapper around the `DynamicColor` type from the color crate.
///
/// Accepts any CSS color syntax on construction and exposes the handful of
/// operations Zoetrope needs: alpha adjustment, sRGB byte conversion for the
/// raster encoder, and string conversion for SVG attributes.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Color {
    color: DynamicColor,
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_string().hash(state);
    }
}

impl Color {
    /// Create a new `Color` from a CSS color string such as `"#1a1a1a"`,
    /// `"rgb(100, 190, 224)"`, or `"black"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use zoetrope_core::color::Color;
    ///
    /// let line = Color::new("#64bee0").unwrap();
    /// let base = Color::new("black").unwrap();
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Creates a new color with the specified alpha (transparency) value.
    ///
    /// # Examples
    ///
    /// ```
    /// use zoetrope_core::color::Color;
    ///
    /// let faded = Color::new("#64bee0").unwrap().with_alpha(0.4);
    /// assert!((faded.alpha() - 0.4).abs() < 0.001);
    /// ```
    pub fn with_alpha(self, alpha: f32) -> Self {
        Color {
            color: self.color.with_alpha(alpha),
        }
    }

    /// Returns the alpha component, between 0.0 (transparent) and 1.0
    /// (opaque).
    pub fn alpha(&self) -> f32 {
        self.color.components[3]
    }

    /// Converts this color to 8-bit sRGB components `[r, g, b, a]`.
    ///
    /// Used by the raster encoder to fill pixmap backgrounds.
    ///
    /// # Examples
    ///
    /// ```
    /// use zoetrope_core::color::Color;
    ///
    /// let white = Color::new("#ffffff").unwrap();
    /// assert_eq!(white.to_rgba8(), [255, 255, 255, 255]);
    /// ```
    pub fn to_rgba8(&self) -> [u8; 4] {
        let srgb = self.color.to_alpha_color::<Srgb>();
        let [r, g, b, a] = srgb.components;
        [
            (r.clamp(0.0, 1.0) * 255.0).round() as u8,
            (g.clamp(0.0, 1.0) * 255.0).round() as u8,
            (b.clamp(0.0, 1.0) * 255.0).round() as u8,
            (a.clamp(0.0, 1.0) * 255.0).round() as u8,
        ]
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new("black").expect("'black' is a valid CSS color")
    }
}

// SVG attributes take colors as strings.
impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.color)
    }
}

impl From<&Color> for svg::node::Value {
    fn from(color: &Color) -> Self {
        Self::from(color.to_string())
    }
}
