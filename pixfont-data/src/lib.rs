//! Plain data and codecs for pixfont bitmap font atlases.
//!
//! This crate holds everything that is independent of a concrete pixel surface:
//! the [`Glyph`] record, the [`Codepage`] index mappings, the alpha-channel
//! [`Watermark`] codec, the [`RawAtlas`] container used for the built-in stock
//! atlas, and the single [`AtlasDecodeError`] kind.

mod atlas;
mod codepage;
mod glyph;
mod pixel;
mod watermark;

pub use atlas::RawAtlas;
pub use codepage::{CP1252_UPPER, Codepage};
pub use glyph::{Glyph, GlyphRect};
pub use pixel::Pixel;
pub use watermark::Watermark;

/// Failure to turn an atlas image into a glyph table.
///
/// Every variant is fatal to the load operation; no partially built font is
/// ever handed out.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AtlasDecodeError {
    /// The codepage identifier is not one of ASCII (0), 1252 or embedded (12001).
    #[error("unsupported codepage: {0}")]
    UnsupportedCodepage(u32),

    /// The scanner ran off the bottom of the atlas before finding every glyph.
    #[error("atlas exhausted after {found} of {expected} glyphs")]
    Exhausted {
        /// Glyphs found before the scan ran out
        found: usize,
        /// Glyphs the codepage requires
        expected: usize,
    },

    /// A glyph does not share the row height established by the first glyph.
    #[error("glyph #{index} (U+{code:04X}) is {height}px tall, expected {expected}px")]
    HeightMismatch {
        /// Position of the glyph in scan order
        index: usize,
        /// Its code point
        code: u32,
        /// Measured height
        height: u32,
        /// Row height set by the first glyph
        expected: u32,
    },

    /// The embedded atlas has no header watermark at (0, 0).
    #[error("no header watermark at (0, 0)")]
    MissingHeader,

    /// No valid watermark at the expected position, even after wrapping to the next row.
    #[error("glyph #{index}: no watermark at ({x}, {y})")]
    MissingWatermark {
        /// Position of the glyph in the atlas
        index: usize,
        /// Column of the failed read after wrapping
        x: u32,
        /// Row of the failed read after wrapping
        y: u32,
    },

    /// An embedded atlas declares the same code point twice.
    #[error("duplicate code point U+{0:04X}")]
    DuplicateCodePoint(u32),

    /// The atlas declares zero glyphs, leaving nothing to fall back to.
    #[error("atlas declares no glyphs")]
    Empty,

    /// Container or geometry is unusable.
    #[error("malformed atlas: {0}")]
    Malformed(String),
}
