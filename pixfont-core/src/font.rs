use std::{fmt::Debug, sync::LazyLock};

use pixfont_data::{AtlasDecodeError, Codepage, Glyph, RawAtlas};
use tracing::{debug, info, trace};

use crate::{Bitmap, PixelSurface, glyph_table::build_glyph_table};

/// A bitmap font: an atlas surface plus the glyph table decoded from it.
///
/// The font owns its atlas for its whole lifetime; dropping the font
/// releases both. The glyph table is immutable once built, so a `Font` can be
/// shared across threads for concurrent lookups whenever its surface can.
pub struct Font<S = Bitmap> {
    surface: S,
    codepage: Codepage,
    /// Sorted ascending by code point
    glyphs: Vec<Glyph>,
    /// Index of the glyph substituted for missing code points
    placeholder: usize,
}

impl<S> Debug for Font<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("codepage", &self.codepage)
            .field("glyph_count", &self.glyphs.len())
            .field("placeholder", &self.glyphs.get(self.placeholder).map(|g| g.code))
            .finish_non_exhaustive()
    }
}

impl<S: PixelSurface> Font<S> {
    /// The code point substituted for characters the atlas lacks.
    pub const PLACEHOLDER: char = '?';

    /// Decodes the glyph table of `surface` according to `codepage`.
    ///
    /// # Errors
    /// Any [`AtlasDecodeError`]. On failure the surface is dropped along with
    /// everything decoded so far.
    pub fn load(surface: S, codepage: Codepage) -> Result<Self, AtlasDecodeError> {
        let glyphs = build_glyph_table(&surface, codepage)?;

        let placeholder = glyphs
            .binary_search_by_key(&u32::from(Self::PLACEHOLDER), |g| g.code)
            .unwrap_or(0);
        debug!(placeholder = glyphs[placeholder].code, "Resolved placeholder glyph");

        Ok(Self { surface, codepage, glyphs, placeholder })
    }
}

impl<S> Font<S> {
    /// The atlas the glyphs are drawn from.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Releases the font, handing its atlas back.
    #[must_use]
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// The codepage the glyph table was decoded with.
    #[must_use]
    pub fn codepage(&self) -> Codepage {
        self.codepage
    }

    /// All glyphs, sorted ascending by code point.
    #[must_use]
    pub fn glyphs(&self) -> &[Glyph] {
        &self.glyphs
    }

    /// Number of entries in the glyph table.
    #[must_use]
    pub fn num_glyphs(&self) -> usize {
        self.glyphs.len()
    }

    /// Exact lookup of `code`.
    ///
    /// With duplicate codes (the undefined slots of codepage 1252) the last
    /// glyph in table order wins.
    #[must_use]
    pub fn find(&self, code: u32) -> Option<&Glyph> {
        let upper = self.glyphs.partition_point(|g| g.code <= code);
        upper
            .checked_sub(1)
            .map(|i| &self.glyphs[i])
            .filter(|g| g.code == code)
    }

    /// Total lookup: the glyph for `code`, or the placeholder glyph if the
    /// atlas has none.
    #[must_use]
    pub fn glyph(&self, code: u32) -> &Glyph {
        self.find(code).unwrap_or_else(|| {
            trace!(code, "Missing glyph, using placeholder");
            &self.glyphs[self.placeholder]
        })
    }

    /// The glyph drawn for code points the atlas lacks: `'?'` when present,
    /// otherwise the lowest code point in the table.
    #[must_use]
    pub fn placeholder(&self) -> &Glyph {
        &self.glyphs[self.placeholder]
    }

    /// Height of one line of text.
    #[must_use]
    pub fn row_height(&self) -> u32 {
        self.glyph(0).h
    }

    /// Width in pixels of the longest line of `text`.
    #[must_use]
    pub fn text_width(&self, text: &str) -> u32 {
        let mut x = 0u32;
        let mut widest = 0u32;

        for c in text.chars() {
            match c {
                '\n' | '\r' => x = 0,
                c => {
                    x = x.saturating_add(self.glyph(u32::from(c)).w);
                    widest = widest.max(x);
                },
            }
        }

        widest
    }

    /// Height in pixels of `text`: one row, plus one per line break that is
    /// not the final character.
    #[must_use]
    pub fn text_height(&self, text: &str) -> u32 {
        let row_height = self.row_height();
        let mut chars = text.chars().peekable();
        let mut height = row_height;

        while let Some(c) = chars.next() {
            if c == '\n' && chars.peek().is_some() {
                height = height.saturating_add(row_height);
            }
        }

        height
    }

    /// `(text_width, text_height)` of `text`.
    #[must_use]
    pub fn text_size(&self, text: &str) -> (u32, u32) {
        (self.text_width(text), self.text_height(text))
    }
}

static STOCK_FONT: LazyLock<Font> = LazyLock::new(|| {
    info!("Decoding built-in stock font");
    RawAtlas::stock()
        .and_then(Bitmap::try_from)
        .and_then(|atlas| Font::load(atlas, Codepage::Windows1252))
        .expect("built-in stock atlas is a valid codepage 1252 atlas")
});

/// The built-in 8x16 codepage 1252 font.
///
/// Decoded on first use; concurrent first callers block until the single
/// initialization finishes and then all observe the same instance.
#[must_use]
pub fn stock_font() -> &'static Font {
    &STOCK_FONT
}
