//! Bitmap font atlases without external metadata.
//!
//! A font atlas is a single image holding many glyph cells. This crate infers
//! the glyph table from pixel content alone, then measures and renders
//! multi-line text with it.
//!
//! Three encodings are supported, selected with a [`Codepage`]:
//! - [`Codepage::Ascii`] and [`Codepage::Windows1252`]: cells are solid
//!   rectangles separated by the background color found at the atlas origin,
//!   assigned to code points in scan order.
//! - [`Codepage::Embedded`]: every cell is preceded by an alpha-channel
//!   [`Watermark`] holding its code point and width, so any set of code points
//!   can be represented.
//!
//! ```
//! use pixfont_core::{Bitmap, Pixel, render_text, stock_font};
//!
//! let font = stock_font();
//! assert_eq!(font.text_size("Hi\nthere"), (40, 32));
//!
//! let mut screen = Bitmap::new(64, 32, Pixel::rgb(0, 0, 0));
//! render_text(&mut screen, font, 0, 0, Pixel::WHITE, "Hi\nthere");
//! ```

pub mod authoring;
mod font;
mod glyph_table;
mod scan;
mod surface;
mod text;
mod watermark;

#[cfg(test)]
mod test_atlas;

pub use ::pixfont_data::{AtlasDecodeError, CP1252_UPPER, Codepage, Glyph, GlyphRect, Pixel, RawAtlas, Watermark};
pub use authoring::compose_embedded;
pub use font::{Font, stock_font};
pub use surface::{BlitTarget, Bitmap, PixelSurface};
pub use text::{TEXT_BUFFER_LEN, format_bounded, render_fmt, render_text};
pub use watermark::{read_watermark, write_watermark};

/// Decodes `surface` into a font. See [`Font::load`].
///
/// # Errors
/// Any [`AtlasDecodeError`].
pub fn load_font<S: PixelSurface>(surface: S, codepage: Codepage) -> Result<Font<S>, AtlasDecodeError> {
    Font::load(surface, codepage)
}

/// Width in pixels of the longest line of `text`.
#[must_use]
pub fn text_width<S>(font: &Font<S>, text: &str) -> u32 {
    font.text_width(text)
}

/// Height in pixels of `text`.
#[must_use]
pub fn text_height<S>(font: &Font<S>, text: &str) -> u32 {
    font.text_height(text)
}
