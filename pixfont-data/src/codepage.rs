use std::{fmt, str::FromStr};

use crate::AtlasDecodeError;

/// Windows-1252 bytes `0x80..=0xFF` mapped to Unicode.
///
/// The five bytes that 1252 leaves undefined (0x81, 0x8D, 0x8F, 0x90, 0x9D)
/// map to U+FFFD REPLACEMENT CHARACTER.
#[rustfmt::skip]
pub const CP1252_UPPER: [u32; 128] = [
    0x20ac, 0xfffd, 0x201a, 0x0192, 0x201e, 0x2026, 0x2020, 0x2021, // 0x80
    0x02c6, 0x2030, 0x0160, 0x2039, 0x0152, 0xfffd, 0x017d, 0xfffd, // 0x88
    0xfffd, 0x2018, 0x2019, 0x201c, 0x201d, 0x2022, 0x2013, 0x2014, // 0x90
    0x02dc, 0x2122, 0x0161, 0x203a, 0x0153, 0xfffd, 0x017e, 0x0178, // 0x98
    0x00a0, 0x00a1, 0x00a2, 0x00a3, 0x00a4, 0x00a5, 0x00a6, 0x00a7, // 0xa0
    0x00a8, 0x00a9, 0x00aa, 0x00ab, 0x00ac, 0x00ad, 0x00ae, 0x00af, // 0xa8
    0x00b0, 0x00b1, 0x00b2, 0x00b3, 0x00b4, 0x00b5, 0x00b6, 0x00b7, // 0xb0
    0x00b8, 0x00b9, 0x00ba, 0x00bb, 0x00bc, 0x00bd, 0x00be, 0x00bf, // 0xb8
    0x00c0, 0x00c1, 0x00c2, 0x00c3, 0x00c4, 0x00c5, 0x00c6, 0x00c7, // 0xc0
    0x00c8, 0x00c9, 0x00ca, 0x00cb, 0x00cc, 0x00cd, 0x00ce, 0x00cf, // 0xc8
    0x00d0, 0x00d1, 0x00d2, 0x00d3, 0x00d4, 0x00d5, 0x00d6, 0x00d7, // 0xd0
    0x00d8, 0x00d9, 0x00da, 0x00db, 0x00dc, 0x00dd, 0x00de, 0x00df, // 0xd8
    0x00e0, 0x00e1, 0x00e2, 0x00e3, 0x00e4, 0x00e5, 0x00e6, 0x00e7, // 0xe0
    0x00e8, 0x00e9, 0x00ea, 0x00eb, 0x00ec, 0x00ed, 0x00ee, 0x00ef, // 0xe8
    0x00f0, 0x00f1, 0x00f2, 0x00f3, 0x00f4, 0x00f5, 0x00f6, 0x00f7, // 0xf0
    0x00f8, 0x00f9, 0x00fa, 0x00fb, 0x00fc, 0x00fd, 0x00fe, 0x00ff, // 0xf8
];

/// How atlas cells are mapped to code points.
///
/// | Mode          | Id    | Glyphs | Cell discovery                       |
/// |---------------|-------|--------|--------------------------------------|
/// | `Ascii`       | 0     | 96     | border scanning, code = index + 32   |
/// | `Windows1252` | 1252  | 224    | border scanning, upper half via 1252 |
/// | `Embedded`    | 12001 | header | per-glyph alpha watermarks           |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Codepage {
    /// Printable ASCII, `0x20..=0x7F`
    Ascii,
    /// ASCII plus the Windows-1252 upper half
    Windows1252,
    /// Code points and widths read from per-glyph watermarks
    Embedded,
}

impl Codepage {
    /// First code point of the fixed codepages.
    pub const FIRST_CODE: u32 = 0x20;

    /// Every supported codepage.
    pub const ALL: [Codepage; 3] = [Codepage::Ascii, Codepage::Windows1252, Codepage::Embedded];

    /// The numeric identifier of this codepage.
    #[must_use]
    pub const fn id(self) -> u32 {
        match self {
            Codepage::Ascii => 0,
            Codepage::Windows1252 => 1252,
            Codepage::Embedded => 12001,
        }
    }

    /// Number of glyphs a fixed codepage atlas must contain; `None` when the
    /// count is declared by the atlas itself.
    #[must_use]
    pub const fn glyph_count(self) -> Option<usize> {
        match self {
            Codepage::Ascii => Some(128 - 32),
            Codepage::Windows1252 => Some(256 - 32),
            Codepage::Embedded => None,
        }
    }

    /// Code point of the cell at `index` in scan order.
    ///
    /// Only meaningful for the fixed codepages; embedded atlases carry their
    /// code points in watermarks, so `None` is returned for them and for
    /// indices past the end of the codepage.
    #[must_use]
    pub fn code_point(self, index: usize) -> Option<u32> {
        let count = self.glyph_count()?;
        match index {
            i if i >= count => None,
            i if i < 96 => Some(i as u32 + Self::FIRST_CODE),
            i => Some(CP1252_UPPER[i - 96]),
        }
    }
}

impl TryFrom<u32> for Codepage {
    type Error = AtlasDecodeError;

    fn try_from(id: u32) -> Result<Self, Self::Error> {
        Codepage::ALL
            .into_iter()
            .find(|cp| cp.id() == id)
            .ok_or(AtlasDecodeError::UnsupportedCodepage(id))
    }
}

impl FromStr for Codepage {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ascii" | "0" => Ok(Codepage::Ascii),
            "1252" | "cp1252" | "windows-1252" => Ok(Codepage::Windows1252),
            "embedded" | "utf32" | "12001" => Ok(Codepage::Embedded),
            _ => Err(format!(
                "Invalid codepage '{s}'. Use 'ascii', '1252' or 'embedded'"
            )),
        }
    }
}

impl fmt::Display for Codepage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Codepage::Ascii => "ascii",
            Codepage::Windows1252 => "1252",
            Codepage::Embedded => "embedded",
        };
        f.write_str(name)
    }
}
