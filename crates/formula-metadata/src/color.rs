use core::fmt;
use std::sync::Arc;

/// An ARGB color.
///
/// Written as `#RRGGBB` when fully opaque and `#AARRGGBB` otherwise.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Color {
    pub argb: u32,
}

impl Color {
    pub const fn new_argb(argb: u32) -> Self {
        Self { argb }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self {
            argb: 0xFF00_0000 | (r as u32) << 16 | (g as u32) << 8 | b as u32,
        }
    }

    pub const fn black() -> Self {
        Self { argb: 0xFF00_0000 }
    }

    pub const fn white() -> Self {
        Self { argb: 0xFFFF_FFFF }
    }

    pub const fn alpha(self) -> u8 {
        (self.argb >> 24) as u8
    }

    pub fn to_hex(self) -> String {
        if self.alpha() == 0xFF {
            format!("#{:06X}", self.argb & 0x00FF_FFFF)
        } else {
            format!("#{:08X}", self.argb)
        }
    }

    /// Parse `#RRGGBB` or `#AARRGGBB`.
    pub fn parse(text: &str) -> Result<Self, &'static str> {
        let hex = text
            .trim()
            .strip_prefix('#')
            .ok_or("color must start with '#'")?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err("color contains non-hex digits");
        }
        let value = u32::from_str_radix(hex, 16).map_err(|_| "invalid hex")?;
        match hex.len() {
            6 => Ok(Self::new_argb(0xFF00_0000 | value)),
            8 => Ok(Self::new_argb(value)),
            _ => Err("color must have 6 or 8 hex digits"),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// The name half of a named color property such as `color-Red`.
///
/// Names start with an ASCII letter and continue with ASCII letters or digits. Comparisons are
/// case-sensitive, matching the property name they are embedded in.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ColorName(Arc<str>);

impl ColorName {
    pub fn new(name: &str) -> Result<Self, &'static str> {
        let mut chars = name.chars();
        match chars.next() {
            None => return Err("color name is empty"),
            Some(c) if !c.is_ascii_alphabetic() => {
                return Err("color name must start with a letter")
            }
            Some(_) => {}
        }
        if !chars.all(|c| c.is_ascii_alphanumeric()) {
            return Err("color name must contain only letters and digits");
        }
        Ok(Self(Arc::from(name)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ColorName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The first eight entries of Excel's legacy indexed palette, numbered from 1, with their names.
pub const DEFAULT_PALETTE: [(u32, &str, Color); 8] = [
    (1, "Black", Color::rgb(0x00, 0x00, 0x00)),
    (2, "White", Color::rgb(0xFF, 0xFF, 0xFF)),
    (3, "Red", Color::rgb(0xFF, 0x00, 0x00)),
    (4, "Green", Color::rgb(0x00, 0xFF, 0x00)),
    (5, "Blue", Color::rgb(0x00, 0x00, 0xFF)),
    (6, "Yellow", Color::rgb(0xFF, 0xFF, 0x00)),
    (7, "Magenta", Color::rgb(0xFF, 0x00, 0xFF)),
    (8, "Cyan", Color::rgb(0x00, 0xFF, 0xFF)),
];
