//! CSS colors
//!
//! Parses the color syntaxes the style system accepts and serializes them in
//! computed form: `rgb(r, g, b)` when opaque, `rgba(r, g, b, a)` otherwise.

use std::fmt;

/// sRGB color with float alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl Color {
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0.0 };
    pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 1.0 };
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 1.0 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub fn rgba(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a: a.clamp(0.0, 1.0) }
    }

    /// Parse any supported color syntax
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim().to_ascii_lowercase();
        if value.starts_with('#') {
            return Self::from_hex(&value);
        }
        if let Some(args) = value.strip_prefix("rgba(").or_else(|| value.strip_prefix("rgb(")) {
            return Self::from_functional(args.strip_suffix(')')?);
        }
        Self::from_name(&value)
    }

    /// Parse #rgb, #rgba, #rrggbb or #rrggbbaa
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            3 => Some(Self::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
            4 => Some(Self::rgba(nibble(0)?, nibble(1)?, nibble(2)?, alpha_from_byte(nibble(3)?))),
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::rgba(byte(0)?, byte(2)?, byte(4)?, alpha_from_byte(byte(6)?))),
            _ => None,
        }
    }

    /// Parse the inside of `rgb(...)` / `rgba(...)`, comma or space separated
    fn from_functional(args: &str) -> Option<Self> {
        let args = args.replace('/', " ");
        let parts: Vec<&str> = args
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect();
        if !(3..=4).contains(&parts.len()) {
            return None;
        }
        let channel = |s: &str| -> Option<u8> {
            let v = match s.strip_suffix('%') {
                Some(pct) => pct.parse::<f32>().ok()? * 2.55,
                None => s.parse::<f32>().ok()?,
            };
            Some(v.round().clamp(0.0, 255.0) as u8)
        };
        let alpha = match parts.get(3) {
            Some(s) => match s.strip_suffix('%') {
                Some(pct) => pct.parse::<f32>().ok()? / 100.0,
                None => s.parse::<f32>().ok()?,
            },
            None => 1.0,
        };
        Some(Self::rgba(channel(parts[0])?, channel(parts[1])?, channel(parts[2])?, alpha))
    }

    /// Parse a named color
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "transparent" => Self::TRANSPARENT,
            "black" => Self::BLACK,
            "white" => Self::WHITE,
            "red" => Self::rgb(255, 0, 0),
            "green" => Self::rgb(0, 128, 0),
            "blue" => Self::rgb(0, 0, 255),
            "yellow" => Self::rgb(255, 255, 0),
            "cyan" | "aqua" => Self::rgb(0, 255, 255),
            "magenta" | "fuchsia" => Self::rgb(255, 0, 255),
            "gray" | "grey" => Self::rgb(128, 128, 128),
            "silver" => Self::rgb(192, 192, 192),
            "maroon" => Self::rgb(128, 0, 0),
            "olive" => Self::rgb(128, 128, 0),
            "lime" => Self::rgb(0, 255, 0),
            "navy" => Self::rgb(0, 0, 128),
            "purple" => Self::rgb(128, 0, 128),
            "teal" => Self::rgb(0, 128, 128),
            "orange" => Self::rgb(255, 165, 0),
            "pink" => Self::rgb(255, 192, 203),
            "brown" => Self::rgb(165, 42, 42),
            "gold" => Self::rgb(255, 215, 0),
            "indigo" => Self::rgb(75, 0, 130),
            "violet" => Self::rgb(238, 130, 238),
            "coral" => Self::rgb(255, 127, 80),
            "salmon" => Self::rgb(250, 128, 114),
            "tomato" => Self::rgb(255, 99, 71),
            "crimson" => Self::rgb(220, 20, 60),
            "khaki" => Self::rgb(240, 230, 140),
            "beige" => Self::rgb(245, 245, 220),
            "ivory" => Self::rgb(255, 255, 240),
            "lavender" => Self::rgb(230, 230, 250),
            "skyblue" => Self::rgb(135, 206, 235),
            "steelblue" => Self::rgb(70, 130, 180),
            "royalblue" => Self::rgb(65, 105, 225),
            "darkblue" => Self::rgb(0, 0, 139),
            "darkgreen" => Self::rgb(0, 100, 0),
            "darkred" => Self::rgb(139, 0, 0),
            "darkgray" | "darkgrey" => Self::rgb(169, 169, 169),
            "lightgray" | "lightgrey" => Self::rgb(211, 211, 211),
            "whitesmoke" => Self::rgb(245, 245, 245),
            "rebeccapurple" => Self::rgb(102, 51, 153),
            _ => return None,
        })
    }
}

/// 8-bit alpha to float, preferring two decimals when they round-trip
fn alpha_from_byte(byte: u8) -> f32 {
    let exact = byte as f32 / 255.0;
    let short = (exact * 100.0).round() / 100.0;
    if (short * 255.0).round() as u8 == byte {
        short
    } else {
        (exact * 1000.0).round() / 1000.0
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a >= 1.0 {
            write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
        } else {
            let alpha = (self.a * 1000.0).round() / 1000.0;
            write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, alpha)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn computed(value: &str) -> Option<String> {
        Color::parse(value).map(|c| c.to_string())
    }

    #[test]
    fn test_named() {
        assert_eq!(computed("red").as_deref(), Some("rgb(255, 0, 0)"));
        assert_eq!(computed("  RED ").as_deref(), Some("rgb(255, 0, 0)"));
        assert_eq!(computed("transparent").as_deref(), Some("rgba(0, 0, 0, 0)"));
        assert_eq!(computed("notacolor"), None);
    }

    #[test]
    fn test_hex() {
        assert_eq!(computed("#f00").as_deref(), Some("rgb(255, 0, 0)"));
        assert_eq!(computed("#00ff7f").as_deref(), Some("rgb(0, 255, 127)"));
        assert_eq!(computed("#ff000080").as_deref(), Some("rgba(255, 0, 0, 0.5)"));
        assert_eq!(computed("#f008").as_deref(), Some("rgba(255, 0, 0, 0.533)"));
        assert_eq!(computed("#ff0000f"), None);
        assert_eq!(computed("#ggg"), None);
    }

    #[test]
    fn test_functional() {
        assert_eq!(computed("rgb(1, 2, 3)").as_deref(), Some("rgb(1, 2, 3)"));
        assert_eq!(computed("rgba(1,2,3,0.25)").as_deref(), Some("rgba(1, 2, 3, 0.25)"));
        assert_eq!(computed("rgb(100% 0% 0% / 50%)").as_deref(), Some("rgba(255, 0, 0, 0.5)"));
        assert_eq!(computed("rgba(0, 0, 0, 1)").as_deref(), Some("rgb(0, 0, 0)"));
        assert_eq!(computed("rgb(1, 2)"), None);
    }
}
