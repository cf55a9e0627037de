/// Glyph metadata smuggled into the alpha channel of an atlas.
///
/// A watermark occupies seven vertically consecutive pixels; each pixel's
/// alpha holds one byte:
///
/// | Byte | Content                                   |
/// |------|-------------------------------------------|
/// | 0    | magic header `0xAA` (`0b1010_1010`)       |
/// | 1-4  | 32-bit value, little-endian               |
/// | 5    | 8-bit value                               |
/// | 6    | magic footer `0x55` (`0b0101_0101`)       |
///
/// The atlas header watermark at (0, 0) stores the glyph count and row
/// height; per-glyph watermarks store the code point and the glyph width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Watermark {
    /// Code point, or glyph count for the atlas header
    pub code: u32,
    /// Glyph width, or row height for the atlas header
    pub value: u8,
}

impl Watermark {
    /// Sentinel in the first byte.
    pub const MAGIC_HEADER: u8 = 0xAA;
    /// Sentinel in the last byte.
    pub const MAGIC_FOOTER: u8 = 0x55;
    /// Number of pixels a watermark spans vertically.
    pub const LEN: usize = 7;

    /// A watermark carrying `code` and `value`.
    #[must_use]
    pub const fn new(code: u32, value: u8) -> Self {
        Self { code, value }
    }

    /// The seven alpha bytes, top to bottom.
    #[must_use]
    pub fn encode(&self) -> [u8; Self::LEN] {
        let [b0, b1, b2, b3] = self.code.to_le_bytes();
        [Self::MAGIC_HEADER, b0, b1, b2, b3, self.value, Self::MAGIC_FOOTER]
    }

    /// Returns `None` unless both sentinels are present.
    #[must_use]
    pub fn decode(bytes: &[u8; Self::LEN]) -> Option<Self> {
        if bytes[0] != Self::MAGIC_HEADER || bytes[6] != Self::MAGIC_FOOTER {
            return None;
        }

        let code = u32::from_le_bytes([bytes[1], bytes[2], bytes[3], bytes[4]]);
        Some(Self { code, value: bytes[5] })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_layout() {
        let bytes = Watermark::new(0x0001_F680, 9).encode();
        assert_eq!(bytes, [0xAA, 0x80, 0xF6, 0x01, 0x00, 9, 0x55]);
    }

    #[test]
    fn roundtrip_extremes() {
        for code in [0, 1, 0x41, 0xFFFD, 0x10FFFF, u32::MAX] {
            for value in [0, 7, 128, 255] {
                let mark = Watermark::new(code, value);
                assert_eq!(Watermark::decode(&mark.encode()), Some(mark));
            }
        }
    }

    #[test]
    fn sentinels_are_required() {
        let mut bytes = Watermark::new(65, 8).encode();
        bytes[0] = 0xAB;
        assert_eq!(Watermark::decode(&bytes), None);

        let mut bytes = Watermark::new(65, 8).encode();
        bytes[6] = 0;
        assert_eq!(Watermark::decode(&bytes), None);

        assert_eq!(Watermark::decode(&[0; 7]), None);
    }
}
