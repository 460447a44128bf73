//! Validated color literals
//!
//! A [`Color`] keeps the literal exactly as written (so documents round-trip
//! unchanged) together with its parsed RGBA components. Accepted forms are the
//! sRGB forms a browser canvas understands:
//!
//! - hex: `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa` (case-insensitive)
//! - `rgb()`/`rgba()` and `hsl()`/`hsla()`, either comma-separated
//!   (`rgb(48, 179, 45)`) or space-separated with an optional alpha after a
//!   slash (`rgb(48 179 45 / 50%)`)
//! - the CSS named colors, including `transparent`
//!
//! Out-of-range numbers are clamped the way CSS clamps them; components that
//! are not numbers are rejected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Reasons a color literal is rejected
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorError {
    #[error("color literal is empty")]
    Empty,

    #[error("hex color must have 3, 4, 6 or 8 digits, found {0}")]
    HexLength(usize),

    #[error("invalid hex digit '{0}'")]
    HexDigit(char),

    #[error("expected {expected} components plus an optional alpha in {function}(), found {found}")]
    Arity {
        function: String,
        expected: usize,
        found: usize,
    },

    #[error("channel '{0}' is not a number or percentage")]
    Channel(String),

    #[error("hue '{0}' is not an angle")]
    Hue(String),

    #[error("alpha '{0}' is not a number or percentage")]
    Alpha(String),

    #[error("unknown color function '{0}()'")]
    UnknownFunction(String),

    #[error("unknown color name '{0}'")]
    UnknownName(String),
}

/// Parsed 8-bit RGBA components
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Lowercase `#rrggbb` (or `#rrggbbaa` when not fully opaque)
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }
}

/// A validated color literal
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    literal: String,
    rgba: Rgba,
}

impl Color {
    /// Parse a color literal
    pub fn parse(literal: &str) -> Result<Self, ColorError> {
        let trimmed = literal.trim();
        if trimmed.is_empty() {
            return Err(ColorError::Empty);
        }

        let rgba = if let Some(hex) = trimmed.strip_prefix('#') {
            parse_hex(hex)?
        } else if let Some((function, args)) = split_function(trimmed) {
            match function.as_str() {
                "rgb" | "rgba" => parse_rgb(&function, args)?,
                "hsl" | "hsla" => parse_hsl(&function, args)?,
                _ => return Err(ColorError::UnknownFunction(function)),
            }
        } else {
            lookup_named(trimmed)?
        };

        Ok(Self {
            literal: literal.to_string(),
            rgba,
        })
    }

    /// Build a color from components; the literal is the hex form
    pub fn from_rgba(rgba: Rgba) -> Self {
        Self {
            literal: rgba.to_hex(),
            rgba,
        }
    }

    /// The literal as originally written
    pub fn as_str(&self) -> &str {
        &self.literal
    }

    pub fn rgba(&self) -> Rgba {
        self.rgba
    }

    pub fn is_opaque(&self) -> bool {
        self.rgba.a == 255
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.literal)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::parse(s)
    }
}

impl TryFrom<String> for Color {
    type Error = ColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::parse(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.literal
    }
}

fn hex_digit(c: char) -> Result<u8, ColorError> {
    c.to_digit(16)
        .map(|d| d as u8)
        .ok_or(ColorError::HexDigit(c))
}

fn parse_hex(hex: &str) -> Result<Rgba, ColorError> {
    let digits = hex
        .chars()
        .map(hex_digit)
        .collect::<Result<Vec<u8>, _>>()?;

    match digits.len() {
        3 | 4 => {
            let expand = |d: u8| d * 17;
            let a = digits.get(3).copied().map(expand).unwrap_or(255);
            Ok(Rgba::new(
                expand(digits[0]),
                expand(digits[1]),
                expand(digits[2]),
                a,
            ))
        }
        6 | 8 => {
            let byte = |i: usize| digits[i] * 16 + digits[i + 1];
            let a = if digits.len() == 8 { byte(6) } else { 255 };
            Ok(Rgba::new(byte(0), byte(2), byte(4), a))
        }
        n => Err(ColorError::HexLength(n)),
    }
}

fn split_function(literal: &str) -> Option<(String, &str)> {
    let open = literal.find('(')?;
    let inner = literal.strip_suffix(')')?;
    let name = literal[..open].trim().to_ascii_lowercase();
    Some((name, &inner[open + 1..]))
}

/// Split function arguments into the three color components and an alpha
fn components<'a>(function: &str, args: &'a str) -> Result<([&'a str; 3], Option<&'a str>), ColorError> {
    let arity = |found: usize| ColorError::Arity {
        function: function.to_string(),
        expected: 3,
        found,
    };

    if args.contains(',') {
        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        return match parts.as_slice() {
            [a, b, c] => Ok(([*a, *b, *c], None)),
            [a, b, c, alpha] => Ok(([*a, *b, *c], Some(*alpha))),
            _ => Err(arity(parts.len())),
        };
    }

    let (main, alpha) = match args.split_once('/') {
        Some((main, alpha)) => (main, Some(alpha.trim())),
        None => (args, None),
    };
    let parts: Vec<&str> = main.split_whitespace().collect();
    match parts.as_slice() {
        [a, b, c] => Ok(([*a, *b, *c], alpha)),
        _ => Err(arity(parts.len())),
    }
}

fn number(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn channel(s: &str) -> Result<u8, ColorError> {
    let value = match s.strip_suffix('%') {
        Some(percent) => number(percent).map(|p| p.clamp(0.0, 100.0) * 2.55),
        None => number(s).map(|v| v.clamp(0.0, 255.0)),
    };
    value
        .map(|v| v.round() as u8)
        .ok_or_else(|| ColorError::Channel(s.to_string()))
}

/// Saturation or lightness as a fraction in 0..=1
fn fraction(s: &str) -> Result<f64, ColorError> {
    number(s.strip_suffix('%').unwrap_or(s))
        .map(|v| v.clamp(0.0, 100.0) / 100.0)
        .ok_or_else(|| ColorError::Channel(s.to_string()))
}

/// Hue in degrees
fn hue(s: &str) -> Result<f64, ColorError> {
    let lower = s.to_ascii_lowercase();
    let (value, scale) = if let Some(v) = lower.strip_suffix("grad") {
        (v, 0.9)
    } else if let Some(v) = lower.strip_suffix("turn") {
        (v, 360.0)
    } else if let Some(v) = lower.strip_suffix("rad") {
        (v, 180.0 / std::f64::consts::PI)
    } else if let Some(v) = lower.strip_suffix("deg") {
        (v, 1.0)
    } else {
        (lower.as_str(), 1.0)
    };
    number(value)
        .map(|v| v * scale)
        .ok_or_else(|| ColorError::Hue(s.to_string()))
}

fn alpha(s: Option<&str>) -> Result<u8, ColorError> {
    let Some(s) = s else {
        return Ok(255);
    };
    let value = match s.strip_suffix('%') {
        Some(percent) => number(percent).map(|p| p / 100.0),
        None => number(s),
    };
    value
        .map(|v| (v.clamp(0.0, 1.0) * 255.0).round() as u8)
        .ok_or_else(|| ColorError::Alpha(s.to_string()))
}

fn parse_rgb(function: &str, args: &str) -> Result<Rgba, ColorError> {
    let ([r, g, b], a) = components(function, args)?;
    Ok(Rgba::new(channel(r)?, channel(g)?, channel(b)?, alpha(a)?))
}

fn parse_hsl(function: &str, args: &str) -> Result<Rgba, ColorError> {
    let ([h, s, l], a) = components(function, args)?;
    let degrees = hue(h)?.rem_euclid(360.0);
    let saturation = fraction(s)?;
    let lightness = fraction(l)?;

    let chroma = saturation * lightness.min(1.0 - lightness);
    let component = |n: f64| {
        let k = (n + degrees / 30.0) % 12.0;
        let value = lightness - chroma * (k - 3.0).min(9.0 - k).clamp(-1.0, 1.0);
        (value * 255.0).round() as u8
    };
    Ok(Rgba::new(component(0.0), component(8.0), component(4.0), alpha(a)?))
}

const fn hex_rgb(value: u32) -> Rgba {
    Rgba::opaque((value >> 16) as u8, (value >> 8) as u8, value as u8)
}

const NAMED_COLORS: &[(&str, Rgba)] = &[
    ("aliceblue", hex_rgb(0xF0F8FF)),
    ("antiquewhite", hex_rgb(0xFAEBD7)),
    ("aqua", hex_rgb(0x00FFFF)),
    ("aquamarine", hex_rgb(0x7FFFD4)),
    ("azure", hex_rgb(0xF0FFFF)),
    ("beige", hex_rgb(0xF5F5DC)),
    ("bisque", hex_rgb(0xFFE4C4)),
    ("black", hex_rgb(0x000000)),
    ("blanchedalmond", hex_rgb(0xFFEBCD)),
    ("blue", hex_rgb(0x0000FF)),
    ("blueviolet", hex_rgb(0x8A2BE2)),
    ("brown", hex_rgb(0xA52A2A)),
    ("burlywood", hex_rgb(0xDEB887)),
    ("cadetblue", hex_rgb(0x5F9EA0)),
    ("chartreuse", hex_rgb(0x7FFF00)),
    ("chocolate", hex_rgb(0xD2691E)),
    ("coral", hex_rgb(0xFF7F50)),
    ("cornflowerblue", hex_rgb(0x6495ED)),
    ("cornsilk", hex_rgb(0xFFF8DC)),
    ("crimson", hex_rgb(0xDC143C)),
    ("cyan", hex_rgb(0x00FFFF)),
    ("darkblue", hex_rgb(0x00008B)),
    ("darkcyan", hex_rgb(0x008B8B)),
    ("darkgoldenrod", hex_rgb(0xB8860B)),
    ("darkgray", hex_rgb(0xA9A9A9)),
    ("darkgreen", hex_rgb(0x006400)),
    ("darkgrey", hex_rgb(0xA9A9A9)),
    ("darkkhaki", hex_rgb(0xBDB76B)),
    ("darkmagenta", hex_rgb(0x8B008B)),
    ("darkolivegreen", hex_rgb(0x556B2F)),
    ("darkorange", hex_rgb(0xFF8C00)),
    ("darkorchid", hex_rgb(0x9932CC)),
    ("darkred", hex_rgb(0x8B0000)),
    ("darksalmon", hex_rgb(0xE9967A)),
    ("darkseagreen", hex_rgb(0x8FBC8F)),
    ("darkslateblue", hex_rgb(0x483D8B)),
    ("darkslategray", hex_rgb(0x2F4F4F)),
    ("darkslategrey", hex_rgb(0x2F4F4F)),
    ("darkturquoise", hex_rgb(0x00CED1)),
    ("darkviolet", hex_rgb(0x9400D3)),
    ("deeppink", hex_rgb(0xFF1493)),
    ("deepskyblue", hex_rgb(0x00BFFF)),
    ("dimgray", hex_rgb(0x696969)),
    ("dimgrey", hex_rgb(0x696969)),
    ("dodgerblue", hex_rgb(0x1E90FF)),
    ("firebrick", hex_rgb(0xB22222)),
    ("floralwhite", hex_rgb(0xFFFAF0)),
    ("forestgreen", hex_rgb(0x228B22)),
    ("fuchsia", hex_rgb(0xFF00FF)),
    ("gainsboro", hex_rgb(0xDCDCDC)),
    ("ghostwhite", hex_rgb(0xF8F8FF)),
    ("gold", hex_rgb(0xFFD700)),
    ("goldenrod", hex_rgb(0xDAA520)),
    ("gray", hex_rgb(0x808080)),
    ("green", hex_rgb(0x008000)),
    ("greenyellow", hex_rgb(0xADFF2F)),
    ("grey", hex_rgb(0x808080)),
    ("honeydew", hex_rgb(0xF0FFF0)),
    ("hotpink", hex_rgb(0xFF69B4)),
    ("indianred", hex_rgb(0xCD5C5C)),
    ("indigo", hex_rgb(0x4B0082)),
    ("ivory", hex_rgb(0xFFFFF0)),
    ("khaki", hex_rgb(0xF0E68C)),
    ("lavender", hex_rgb(0xE6E6FA)),
    ("lavenderblush", hex_rgb(0xFFF0F5)),
    ("lawngreen", hex_rgb(0x7CFC00)),
    ("lemonchiffon", hex_rgb(0xFFFACD)),
    ("lightblue", hex_rgb(0xADD8E6)),
    ("lightcoral", hex_rgb(0xF08080)),
    ("lightcyan", hex_rgb(0xE0FFFF)),
    ("lightgoldenrodyellow", hex_rgb(0xFAFAD2)),
    ("lightgray", hex_rgb(0xD3D3D3)),
    ("lightgreen", hex_rgb(0x90EE90)),
    ("lightgrey", hex_rgb(0xD3D3D3)),
    ("lightpink", hex_rgb(0xFFB6C1)),
    ("lightsalmon", hex_rgb(0xFFA07A)),
    ("lightseagreen", hex_rgb(0x20B2AA)),
    ("lightskyblue", hex_rgb(0x87CEFA)),
    ("lightslategray", hex_rgb(0x778899)),
    ("lightslategrey", hex_rgb(0x778899)),
    ("lightsteelblue", hex_rgb(0xB0C4DE)),
    ("lightyellow", hex_rgb(0xFFFFE0)),
    ("lime", hex_rgb(0x00FF00)),
    ("limegreen", hex_rgb(0x32CD32)),
    ("linen", hex_rgb(0xFAF0E6)),
    ("magenta", hex_rgb(0xFF00FF)),
    ("maroon", hex_rgb(0x800000)),
    ("mediumaquamarine", hex_rgb(0x66CDAA)),
    ("mediumblue", hex_rgb(0x0000CD)),
    ("mediumorchid", hex_rgb(0xBA55D3)),
    ("mediumpurple", hex_rgb(0x9370DB)),
    ("mediumseagreen", hex_rgb(0x3CB371)),
    ("mediumslateblue", hex_rgb(0x7B68EE)),
    ("mediumspringgreen", hex_rgb(0x00FA9A)),
    ("mediumturquoise", hex_rgb(0x48D1CC)),
    ("mediumvioletred", hex_rgb(0xC71585)),
    ("midnightblue", hex_rgb(0x191970)),
    ("mintcream", hex_rgb(0xF5FFFA)),
    ("mistyrose", hex_rgb(0xFFE4E1)),
    ("moccasin", hex_rgb(0xFFE4B5)),
    ("navajowhite", hex_rgb(0xFFDEAD)),
    ("navy", hex_rgb(0x000080)),
    ("oldlace", hex_rgb(0xFDF5E6)),
    ("olive", hex_rgb(0x808000)),
    ("olivedrab", hex_rgb(0x6B8E23)),
    ("orange", hex_rgb(0xFFA500)),
    ("orangered", hex_rgb(0xFF4500)),
    ("orchid", hex_rgb(0xDA70D6)),
    ("palegoldenrod", hex_rgb(0xEEE8AA)),
    ("palegreen", hex_rgb(0x98FB98)),
    ("paleturquoise", hex_rgb(0xAFEEEE)),
    ("palevioletred", hex_rgb(0xDB7093)),
    ("papayawhip", hex_rgb(0xFFEFD5)),
    ("peachpuff", hex_rgb(0xFFDAB9)),
    ("peru", hex_rgb(0xCD853F)),
    ("pink", hex_rgb(0xFFC0CB)),
    ("plum", hex_rgb(0xDDA0DD)),
    ("powderblue", hex_rgb(0xB0E0E6)),
    ("purple", hex_rgb(0x800080)),
    ("rebeccapurple", hex_rgb(0x663399)),
    ("red", hex_rgb(0xFF0000)),
    ("rosybrown", hex_rgb(0xBC8F8F)),
    ("royalblue", hex_rgb(0x4169E1)),
    ("saddlebrown", hex_rgb(0x8B4513)),
    ("salmon", hex_rgb(0xFA8072)),
    ("sandybrown", hex_rgb(0xF4A460)),
    ("seagreen", hex_rgb(0x2E8B57)),
    ("seashell", hex_rgb(0xFFF5EE)),
    ("sienna", hex_rgb(0xA0522D)),
    ("silver", hex_rgb(0xC0C0C0)),
    ("skyblue", hex_rgb(0x87CEEB)),
    ("slateblue", hex_rgb(0x6A5ACD)),
    ("slategray", hex_rgb(0x708090)),
    ("slategrey", hex_rgb(0x708090)),
    ("snow", hex_rgb(0xFFFAFA)),
    ("springgreen", hex_rgb(0x00FF7F)),
    ("steelblue", hex_rgb(0x4682B4)),
    ("tan", hex_rgb(0xD2B48C)),
    ("teal", hex_rgb(0x008080)),
    ("thistle", hex_rgb(0xD8BFD8)),
    ("tomato", hex_rgb(0xFF6347)),
    ("transparent", Rgba::new(0, 0, 0, 0)),
    ("turquoise", hex_rgb(0x40E0D0)),
    ("violet", hex_rgb(0xEE82EE)),
    ("wheat", hex_rgb(0xF5DEB3)),
    ("white", hex_rgb(0xFFFFFF)),
    ("whitesmoke", hex_rgb(0xF5F5F5)),
    ("yellow", hex_rgb(0xFFFF00)),
    ("yellowgreen", hex_rgb(0x9ACD32)),
];

fn lookup_named(name: &str) -> Result<Rgba, ColorError> {
    let lower = name.to_ascii_lowercase();
    NAMED_COLORS
        .binary_search_by(|(n, _)| (*n).cmp(lower.as_str()))
        .map(|i| NAMED_COLORS[i].1)
        .map_err(|_| ColorError::UnknownName(name.to_string()))
}
