// src/color.rs

//! RGBA color value type.
//!
//! Used for the placeholder background painted on the surface container
//! until the compositor swaps its first real frame. Serde support allows
//! the background to be chosen from a configuration file.

use serde::{Deserialize, Serialize};

/// A 32-bit RGBA color.
///
/// Alpha is straight (not premultiplied); `0xFF` is fully opaque. The
/// texture-backed strategy derives its opacity hint from the alpha
/// channel of the configured background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xFF, 0xFF, 0xFF);
    pub const BLACK: Color = Color::rgb(0x00, 0x00, 0x00);
    pub const TRANSPARENT: Color = Color::rgba(0x00, 0x00, 0x00, 0x00);

    /// Creates a fully opaque color from its RGB components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 0xFF }
    }

    /// Creates a color from RGBA components.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// Whether the color has a fully opaque alpha channel.
    pub const fn is_opaque(&self) -> bool {
        self.a == 0xFF
    }
}

impl Default for Color {
    fn default() -> Self {
        // Surface containers are painted white until the first frame lands.
        Color::WHITE
    }
}
