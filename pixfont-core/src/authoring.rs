//! Producing embedded-metadata atlases.
//!
//! [`compose_embedded`] re-packs the glyphs of any loaded font into an atlas
//! that can be decoded with [`Codepage::Embedded`], which lifts the fixed
//! codepage limits: any code point set, any glyph order.

use pixfont_data::{AtlasDecodeError, Codepage, Glyph, GlyphRect, Pixel, Watermark};
use tracing::debug;

use crate::{Bitmap, Font, PixelSurface, watermark::write_watermark};

/// Default width of composed atlases, in pixels.
pub const DEFAULT_ROW_WIDTH: u32 = 256;

/// Lays out every glyph of `font` in rows of at most `row_width` pixels,
/// each glyph preceded by a one pixel wide watermark column.
///
/// Duplicate code points keep only the glyph [`Font::find`] resolves to.
/// Pixels outside glyph cells are fully transparent.
///
/// # Errors
/// [`AtlasDecodeError::Malformed`] when the font cannot be represented: row
/// height below the seven pixel watermark or above 255, a glyph wider than
/// 255 pixels, or a glyph that does not fit `row_width`.
pub fn compose_embedded<S: PixelSurface>(
    font: &Font<S>,
    row_width: u32,
) -> Result<Bitmap, AtlasDecodeError> {
    let malformed = |msg: String| Err(AtlasDecodeError::Malformed(msg));

    let row_height = font.row_height();
    if row_height < Watermark::LEN as u32 || row_height > u32::from(u8::MAX) {
        return malformed(format!(
            "row height {row_height}px must be between {} and 255",
            Watermark::LEN
        ));
    }

    let glyphs: Vec<&Glyph> = font
        .glyphs()
        .iter()
        .filter(|g| font.find(g.code) == Some(*g))
        .collect();

    // first pass: positions of every marker column
    let mut placements = Vec::with_capacity(glyphs.len());
    let (mut x, mut y) = (1u32, 0u32);
    for glyph in &glyphs {
        let Ok(width) = u8::try_from(glyph.w) else {
            return malformed(format!("glyph U+{:04X} is {}px wide", glyph.code, glyph.w));
        };

        let span = 1 + glyph.w;
        if x + span > row_width {
            x = 0;
            y += row_height;
            if span > row_width {
                return malformed(format!(
                    "glyph U+{:04X} needs {span}px, rows are {row_width}px wide",
                    glyph.code
                ));
            }
        }

        placements.push((x, y, Watermark::new(glyph.code, width), glyph.rect()));
        x += span;
    }

    let height = y + row_height;
    let mut atlas = Bitmap::new(row_width, height, Pixel::TRANSPARENT);
    let Ok(count) = u32::try_from(glyphs.len()) else {
        return malformed(format!("{} glyphs do not fit a header", glyphs.len()));
    };
    write_watermark(&mut atlas, 0, 0, Watermark::new(count, row_height as u8))?;

    for (x, y, mark, src) in placements {
        write_watermark(&mut atlas, x, y, mark)?;
        copy_cell(font.surface(), src, &mut atlas, x + 1, y);
    }

    debug!(
        glyph_count = count,
        width = row_width,
        height,
        source = %font.codepage(),
        target = %Codepage::Embedded,
        "Composed embedded atlas"
    );

    Ok(atlas)
}

/// Copies a cell verbatim, alpha included.
fn copy_cell<S: PixelSurface>(source: &S, src: GlyphRect, dest: &mut Bitmap, dx: u32, dy: u32) {
    for row in 0..src.h {
        for col in 0..src.w {
            if let Some(p) = source.pixel(src.x + col, src.y + row) {
                dest.set_pixel(dx + col, dy + row, p);
            }
        }
    }
}
