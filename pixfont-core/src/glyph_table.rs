//! Builds the sorted glyph table of a font from its atlas.
//!
//! Fixed codepages discover cells by scanning for background borders; the
//! embedded codepage reads a watermark in front of every cell instead.

use pixfont_data::{AtlasDecodeError, Codepage, Glyph};
use tracing::{debug, trace};

use crate::{PixelSurface, scan::CellScanner, watermark::read_watermark};

/// Decodes every glyph of `surface` and returns them sorted by code point.
///
/// # Errors
/// Any [`AtlasDecodeError`]; nothing is returned for a partially decoded atlas.
pub(crate) fn build_glyph_table<S: PixelSurface + ?Sized>(
    surface: &S,
    codepage: Codepage,
) -> Result<Vec<Glyph>, AtlasDecodeError> {
    debug!(
        codepage = %codepage,
        width = surface.width(),
        height = surface.height(),
        "Building glyph table"
    );

    let mut glyphs = match codepage {
        Codepage::Ascii | Codepage::Windows1252 => scan_cells(surface, codepage)?,
        Codepage::Embedded => read_embedded_cells(surface)?,
    };

    if glyphs.is_empty() {
        return Err(AtlasDecodeError::Empty);
    }

    // stable: equal codes (the 1252 holes) keep their atlas order
    glyphs.sort_by_key(|g| g.code);

    if codepage == Codepage::Embedded
        && let Some(dup) = glyphs.windows(2).find(|pair| pair[0].code == pair[1].code)
    {
        return Err(AtlasDecodeError::DuplicateCodePoint(dup[0].code));
    }

    debug!(
        glyph_count = glyphs.len(),
        row_height = glyphs[0].h,
        "Glyph table built"
    );

    Ok(glyphs)
}

fn scan_cells<S: PixelSurface + ?Sized>(
    surface: &S,
    codepage: Codepage,
) -> Result<Vec<Glyph>, AtlasDecodeError> {
    let expected = codepage.glyph_count().unwrap_or_default();
    let mut glyphs: Vec<Glyph> = Vec::with_capacity(expected);
    let mut scanner = CellScanner::new(surface);

    let codes = (0..).map_while(|index| codepage.code_point(index));
    for (index, code) in codes.enumerate() {
        let (x, y) = scanner
            .next_cell()
            .ok_or(AtlasDecodeError::Exhausted { found: index, expected })?;

        let (w, h) = scanner.measure(x, y);

        // the first glyph sets the row height for the whole font
        let row_height = glyphs.first().map_or(h, |first| first.h);
        if h != row_height {
            return Err(AtlasDecodeError::HeightMismatch {
                index,
                code,
                height: h,
                expected: row_height,
            });
        }

        trace!(index, code, x, y, w, h, "Found cell");
        glyphs.push(Glyph::new(code, x, y, w, h));
        scanner.consume(w, h);
    }

    Ok(glyphs)
}

fn read_embedded_cells<S: PixelSurface + ?Sized>(
    surface: &S,
) -> Result<Vec<Glyph>, AtlasDecodeError> {
    let header = read_watermark(surface, 0, 0).ok_or(AtlasDecodeError::MissingHeader)?;
    let count = header.code as usize;
    let row_height = u32::from(header.value);

    debug!(count, row_height, "Read embedded atlas header");
    if row_height == 0 {
        return Err(AtlasDecodeError::Malformed("header declares a zero row height".into()));
    }

    // count comes from the atlas; don't trust it for preallocation
    let mut glyphs = Vec::with_capacity(count.min(surface.width() as usize));
    let (mut x, mut y) = (1u32, 0u32);

    for index in 0..count {
        let mark = match read_watermark(surface, x, y) {
            Some(mark) => mark,
            None => {
                // probably the end of a row
                x = 0;
                y = y.saturating_add(row_height);
                read_watermark(surface, x, y)
                    .ok_or(AtlasDecodeError::MissingWatermark { index, x, y })?
            },
        };

        // skip the marker column
        x = x.saturating_add(1);

        let w = u32::from(mark.value);
        trace!(index, code = mark.code, x, y, w, "Read watermarked cell");
        glyphs.push(Glyph::new(mark.code, x, y, w, row_height));
        x = x.saturating_add(w);
    }

    Ok(glyphs)
}
