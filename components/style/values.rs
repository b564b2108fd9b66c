/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

//! Value parsing: lengths and colors.

/// An sRGB color with alpha.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    #[inline]
    pub fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color { r, g, b, a: 255 }
    }

    #[inline]
    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Color {
        Color { r, g, b, a }
    }

    #[inline]
    pub fn black() -> Color {
        Color::rgb(0, 0, 0)
    }

    #[inline]
    pub fn white() -> Color {
        Color::rgb(255, 255, 255)
    }

    #[inline]
    pub fn transparent() -> Color {
        Color::rgba(0, 0, 0, 0)
    }
}

/// Parse a color value: `#rgb`, `#rrggbb`, or a named keyword.
pub fn parse_color(value: &str) -> Option<Color> {
    let value = value.trim();
    if let Some(hex) = value.strip_prefix('#') {
        return parse_hex_color(hex);
    }
    named_color(&value.to_ascii_lowercase())
}

fn parse_hex_color(hex: &str) -> Option<Color> {
    if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    match hex.len() {
        3 => {
            let component = |i: usize| {
                u8::from_str_radix(&hex[i..i + 1], 16)
                    .ok()
                    .map(|v| v * 17)
            };
            Some(Color::rgb(component(0)?, component(1)?, component(2)?))
        },
        6 => {
            let component = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
            Some(Color::rgb(component(0)?, component(2)?, component(4)?))
        },
        _ => None,
    }
}

fn named_color(name: &str) -> Option<Color> {
    let color = match name {
        "black" => Color::rgb(0, 0, 0),
        "silver" => Color::rgb(192, 192, 192),
        "gray" | "grey" => Color::rgb(128, 128, 128),
        "white" => Color::rgb(255, 255, 255),
        "maroon" => Color::rgb(128, 0, 0),
        "red" => Color::rgb(255, 0, 0),
        "purple" => Color::rgb(128, 0, 128),
        "fuchsia" | "magenta" => Color::rgb(255, 0, 255),
        "green" => Color::rgb(0, 128, 0),
        "lime" => Color::rgb(0, 255, 0),
        "olive" => Color::rgb(128, 128, 0),
        "yellow" => Color::rgb(255, 255, 0),
        "navy" => Color::rgb(0, 0, 128),
        "blue" => Color::rgb(0, 0, 255),
        "teal" => Color::rgb(0, 128, 128),
        "aqua" | "cyan" => Color::rgb(0, 255, 255),
        "orange" => Color::rgb(255, 165, 0),
        "transparent" => Color::transparent(),
        _ => return None,
    };
    Some(color)
}

/// Parse a pixel length: `12px` or a bare `0`.
pub fn parse_px_length(value: &str) -> Option<f32> {
    let value = value.trim();
    if value == "0" {
        return Some(0.0);
    }
    let number = value.strip_suffix("px")?.trim();
    let parsed: f32 = number.parse().ok()?;
    if parsed.is_finite() {
        Some(parsed)
    } else {
        None
    }
}

/// Parse a unitless number (for line-height factors).
pub fn parse_number(value: &str) -> Option<f32> {
    let parsed: f32 = value.trim().parse().ok()?;
    if parsed.is_finite() {
        Some(parsed)
    } else {
        None
    }
}
