/// An 8-bit RGBA color value as stored in an atlas.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Pixel {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
    /// Alpha: coverage for glyph cells, watermark bytes for marker columns
    pub a: u8,
}

impl Pixel {
    /// Opaque white, the neutral tint.
    pub const WHITE: Pixel = Pixel::rgb(0xff, 0xff, 0xff);
    /// Fully transparent black.
    pub const TRANSPARENT: Pixel = Pixel::rgba(0, 0, 0, 0);

    /// A color from all four channels.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// An opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 0xff)
    }

    /// Compares the color channels only; alpha carries watermarks and coverage
    /// and never participates in border detection.
    #[must_use]
    pub const fn same_rgb(&self, other: &Pixel) -> bool {
        self.r == other.r && self.g == other.g && self.b == other.b
    }

    /// Parses `RRGGBB` or `RRGGBBAA`, with or without a leading `#`.
    #[must_use]
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#').unwrap_or(s);
        if !hex.is_ascii() {
            return None;
        }

        let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            6 => Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?)),
            8 => Some(Self::rgba(channel(0)?, channel(2)?, channel(4)?, channel(6)?)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_is_ignored_by_rgb_comparison() {
        let a = Pixel::rgba(10, 20, 30, 0);
        let b = Pixel::rgba(10, 20, 30, 255);
        assert!(a.same_rgb(&b));
        assert!(!a.same_rgb(&Pixel::rgba(10, 20, 31, 0)));
    }

    #[test]
    fn hex_colors() {
        assert_eq!(Pixel::from_hex("#ff8000"), Some(Pixel::rgb(0xff, 0x80, 0x00)));
        assert_eq!(Pixel::from_hex("10203040"), Some(Pixel::rgba(0x10, 0x20, 0x30, 0x40)));
        assert_eq!(Pixel::from_hex("fff"), None);
        assert_eq!(Pixel::from_hex("zzzzzz"), None);
    }
}
