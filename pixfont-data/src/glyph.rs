/// A single glyph cell inside a font atlas.
///
/// A `Glyph` maps one Unicode code point to the rectangle of atlas pixels that
/// draws it. Records are created once while the glyph table is built and are
/// immutable afterwards.
///
/// # Invariants
/// - every glyph of one font has the same height `h` (the font's row height)
/// - the owning table is sorted ascending by `code`
///
/// | Field | Meaning                                       |
/// |-------|-----------------------------------------------|
/// | code  | Unicode scalar value (or U+FFFD for holes)     |
/// | x, y  | top-left corner of the cell within the atlas   |
/// | w, h  | cell extent in pixels; `w` is also the advance |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Glyph {
    /// The Unicode code point rendered by this cell
    pub code: u32,
    /// Left edge of the cell in atlas pixels
    pub x: u32,
    /// Top edge of the cell in atlas pixels
    pub y: u32,
    /// Cell width, used as the horizontal advance
    pub w: u32,
    /// Cell height; identical for all glyphs of a font
    pub h: u32,
}

impl Glyph {
    /// A glyph for `code` whose cell is `w` x `h` pixels at `(x, y)`.
    #[must_use]
    pub const fn new(code: u32, x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { code, x, y, w, h }
    }

    /// The code point as a `char`, if it is a valid Unicode scalar value.
    #[must_use]
    pub fn symbol(&self) -> Option<char> {
        char::from_u32(self.code)
    }

    /// The source rectangle to copy when drawing this glyph.
    #[must_use]
    pub const fn rect(&self) -> GlyphRect {
        GlyphRect { x: self.x, y: self.y, w: self.w, h: self.h }
    }
}

/// A rectangle of atlas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphRect {
    /// Left edge
    pub x: u32,
    /// Top edge
    pub y: u32,
    /// Width in pixels
    pub w: u32,
    /// Height in pixels
    pub h: u32,
}
