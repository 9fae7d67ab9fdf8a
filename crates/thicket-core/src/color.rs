//! Color handling for Thicket mind maps
//!
//! This module provides the [`Color`] type which wraps the `DynamicColor` type
//! from the color crate. Colors are accepted in any CSS syntax and always
//! written back out as hex strings, which is the form Graphviz understands.

use std::str::FromStr;

use color::{DynamicColor, Rgba8, Srgb};
use serde::Deserialize;

/// Wrapper around the `DynamicColor` type from the color crate
///
/// Deserializes from any CSS color string and displays as `#rrggbb`
/// (or `#rrggbbaa` when not fully opaque).
#[derive(Clone, Copy, PartialEq, Debug, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    color: DynamicColor,
}

impl Color {
    /// Create a new `Color` from a string
    /// This will parse CSS color strings such as "#ff0000", "rgb(255, 0, 0)", "red", etc.
    ///
    /// # Examples
    ///
    /// ```
    /// use thicket_core::color::Color;
    ///
    /// let red = Color::new("#ff0000").unwrap();
    /// let blue = Color::new("blue").unwrap();
    /// assert_eq!(blue.to_string(), "#0000ff");
    /// ```
    pub fn new(color_str: &str) -> Result<Self, String> {
        match DynamicColor::from_str(color_str) {
            Ok(color) => Ok(Self { color }),
            Err(err) => Err(format!("invalid color `{color_str}`: {err}")),
        }
    }

    /// Returns the color as 8-bit sRGB channels.
    pub fn to_rgba8(self) -> Rgba8 {
        self.color.to_alpha_color::<Srgb>().to_rgba8()
    }

    /// Returns the hex notation used by Graphviz color attributes.
    ///
    /// The alpha channel is only appended when the color is not fully opaque.
    ///
    /// # Examples
    ///
    /// ```
    /// use thicket_core::color::Color;
    ///
    /// let color = Color::new("#2E86C1").unwrap();
    /// assert_eq!(color.to_hex(), "#2e86c1");
    /// ```
    pub fn to_hex(self) -> String {
        let Rgba8 { r, g, b, a } = self.to_rgba8();
        if a == u8::MAX {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}
