//! Color values and the default color parser.
//!
//! [CSS Color Level 4](https://www.w3.org/TR/css-color-4/)
//!
//! A [`ChoiceSet`](crate::ChoiceSet) that accepts colors hands textual
//! candidates to a [`ColorParser`]. [`parse_color`] is the default one: hex
//! notation, the `rgb()`/`rgba()`/`hsl()`/`hsla()` functions, and the basic
//! named colors. Hosts with a full named-color table supply their own parser.

use std::fmt;

use serde::Serialize;

/// Parses the textual form of a color, or returns `None` if it isn't one.
pub type ColorParser = fn(&str) -> Option<ColorValue>;

/// [§ 4 Color syntax](https://www.w3.org/TR/css-color-4/#color-syntax)
/// sRGB color represented as RGBA components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ColorValue {
    /// "the red color channel" (0-255)
    pub r: u8,
    /// "the green color channel" (0-255)
    pub g: u8,
    /// "the blue color channel" (0-255)
    pub b: u8,
    /// "the alpha channel" (0-255, 255 = fully opaque)
    pub a: u8,
}

impl ColorValue {
    /// Black (#000000)
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// White (#ffffff)
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    /// An opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// A color with an explicit alpha channel.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// [§ 4.2 The RGB hexadecimal notations](https://www.w3.org/TR/css-color-4/#hex-notation)
    /// "The syntax of a <hex-color> is a <hash-token> token whose value consists of
    /// 3, 4, 6, or 8 hexadecimal digits."
    #[must_use]
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let short = |i: usize| u8::from_str_radix(&hex[i..=i].repeat(2), 16).ok();
        let long = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            // [§ 4.2.1]
            // "The three-digit RGB notation (#RGB) is converted into six-digit form (#RRGGBB)
            // by replicating digits, not by adding zeros."
            3 => Some(Self::rgb(short(0)?, short(1)?, short(2)?)),
            // Four-digit RGBA notation (#RGBA)
            4 => Some(Self::rgba(short(0)?, short(1)?, short(2)?, short(3)?)),
            // Six-digit RGB notation (#RRGGBB)
            6 => Some(Self::rgb(long(0)?, long(2)?, long(4)?)),
            // Eight-digit RGBA notation (#RRGGBBAA)
            8 => Some(Self::rgba(long(0)?, long(2)?, long(4)?, long(6)?)),
            _ => None,
        }
    }

    /// [§ 6.1 Named Colors](https://www.w3.org/TR/css-color-4/#named-colors)
    ///
    /// Only the 16 basic HTML colors (plus a few aliases and `transparent`).
    #[must_use]
    pub fn from_named(name: &str) -> Option<Self> {
        let color = match name.to_ascii_lowercase().as_str() {
            "white" => Self::WHITE,
            "black" => Self::BLACK,
            "red" => Self::rgb(255, 0, 0),
            "green" => Self::rgb(0, 128, 0),
            "blue" => Self::rgb(0, 0, 255),
            "yellow" => Self::rgb(255, 255, 0),
            "gray" | "grey" => Self::rgb(128, 128, 128),
            "transparent" => Self::rgba(0, 0, 0, 0),
            "aqua" | "cyan" => Self::rgb(0, 255, 255),
            "fuchsia" | "magenta" => Self::rgb(255, 0, 255),
            "lime" => Self::rgb(0, 255, 0),
            "maroon" => Self::rgb(128, 0, 0),
            "navy" => Self::rgb(0, 0, 128),
            "olive" => Self::rgb(128, 128, 0),
            "purple" => Self::rgb(128, 0, 128),
            "silver" => Self::rgb(192, 192, 192),
            "teal" => Self::rgb(0, 128, 128),
            _ => return None,
        };
        Some(color)
    }

    /// Convert to hex string notation (#RRGGBB or #RRGGBBAA if alpha != 255)
    ///
    /// [§ 4.2 The RGB hexadecimal notations](https://www.w3.org/TR/css-color-4/#hex-notation)
    #[must_use]
    pub fn to_hex_string(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

impl fmt::Display for ColorValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex_string())
    }
}

/// Parse the textual form of a color.
///
/// Accepts `#`-prefixed hex notation, the legacy and modern forms of the
/// RGB and HSL functions, and the basic named colors. Hex notation requires
/// the leading `#` so that words like `bad` are not read as colors.
#[must_use]
pub fn parse_color(text: &str) -> Option<ColorValue> {
    let text = text.trim();
    if let Some(hex) = text.strip_prefix('#') {
        return ColorValue::from_hex(hex);
    }
    if let Some((name, rest)) = text.split_once('(') {
        let args = rest.strip_suffix(')')?;
        return parse_color_function(name.trim(), args);
    }
    ColorValue::from_named(text)
}

/// [§ 4.1 The RGB Functions: rgb() and rgba()](https://www.w3.org/TR/css-color-4/#rgb-functions)
/// [§ 4.1 The HSL Functions: hsl() and hsla()](https://www.w3.org/TR/css-color-4/#the-hsl-notation)
///
/// Per CSS Color 4, rgb()/rgba() and hsl()/hsla() are aliases.
fn parse_color_function(name: &str, args: &str) -> Option<ColorValue> {
    let vals = extract_color_args(args)?;
    match name.to_ascii_lowercase().as_str() {
        "rgb" | "rgba" => parse_rgb_function(&vals),
        "hsl" | "hsla" => parse_hsl_function(&vals),
        _ => None,
    }
}

/// A numeric value extracted from a color function argument.
///
/// Color function arguments can be either plain numbers (0-255 for RGB)
/// or percentages (0%-100%).
#[derive(Debug, Clone, Copy)]
enum ColorArg {
    Number(f64),
    Percentage(f64),
}

/// Extract numeric arguments from a color function's argument text.
///
/// Handles both modern syntax (space-separated with optional `/ alpha`)
/// and legacy syntax (comma-separated). Any argument that is not a number
/// or percentage makes the whole function invalid.
fn extract_color_args(args: &str) -> Option<Vec<ColorArg>> {
    args.split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| match part.strip_suffix('%') {
            Some(pct) => pct.parse().ok().map(ColorArg::Percentage),
            None => part.parse().ok().map(ColorArg::Number),
        })
        .collect()
}

/// [§ 4.1 The RGB Functions](https://www.w3.org/TR/css-color-4/#rgb-functions)
///
/// "Values outside these ranges are not invalid, but are clamped to the
/// ranges defined here at parsed-value time."
fn parse_rgb_function(vals: &[ColorArg]) -> Option<ColorValue> {
    if !(3..=4).contains(&vals.len()) {
        return None;
    }

    let r = scaled_byte(vals[0], 255.0);
    let g = scaled_byte(vals[1], 255.0);
    let b = scaled_byte(vals[2], 255.0);

    // "If omitted, it defaults to 100%."
    let a = vals.get(3).map_or(255, |&alpha| scaled_byte(alpha, 1.0));

    Some(ColorValue { r, g, b, a })
}

/// [§ 4.1 The HSL Functions](https://www.w3.org/TR/css-color-4/#the-hsl-notation)
///
/// "hsl() = hsl( <hue> <percentage> <percentage> [ / <alpha-value> ]? )"
fn parse_hsl_function(vals: &[ColorArg]) -> Option<ColorValue> {
    if !(3..=4).contains(&vals.len()) {
        return None;
    }

    let hue = match vals[0] {
        ColorArg::Number(v) => v,
        ColorArg::Percentage(v) => v * 3.6, // 100% = 360 degrees
    };
    let saturation = match vals[1] {
        ColorArg::Percentage(v) | ColorArg::Number(v) => v / 100.0,
    };
    let lightness = match vals[2] {
        ColorArg::Percentage(v) | ColorArg::Number(v) => v / 100.0,
    };

    let a = vals.get(3).map_or(255, |&alpha| scaled_byte(alpha, 1.0));

    let (r, g, b) = hsl_to_rgb(hue, saturation, lightness);
    Some(ColorValue { r, g, b, a })
}

/// Map a color argument onto a byte. A number is read against `full`
/// (255 for channels, 1 for alpha); a percentage against 100%.
fn scaled_byte(arg: ColorArg, full: f64) -> u8 {
    let fraction = match arg {
        ColorArg::Number(n) => n / full,
        ColorArg::Percentage(p) => p / 100.0,
    };
    unit_to_byte(fraction)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn unit_to_byte(fraction: f64) -> u8 {
    (fraction * 255.0).round().clamp(0.0, 255.0) as u8
}

/// [§ 4.2.4 HSL-to-RGB](https://www.w3.org/TR/css-color-4/#hsl-to-rgb),
/// using the per-channel offset form: red at 0, green at 8, blue at 4.
fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (u8, u8, u8) {
    let sector = hue.rem_euclid(360.0) / 30.0;
    let lightness = lightness.clamp(0.0, 1.0);
    let spread = saturation.clamp(0.0, 1.0) * lightness.min(1.0 - lightness);

    let channel = |offset: f64| {
        let k = (offset + sector) % 12.0;
        unit_to_byte(lightness - spread * (k - 3.0).min(9.0 - k).clamp(-1.0, 1.0))
    };
    (channel(0.0), channel(8.0), channel(4.0))
}
