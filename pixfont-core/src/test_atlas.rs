//! Synthetic atlases for unit tests.

use pixfont_data::{Pixel, Watermark};

use crate::{Bitmap, watermark::write_watermark};

pub(crate) const BACKGROUND: Pixel = Pixel::rgb(255, 0, 255);
pub(crate) const INK: Pixel = Pixel::rgba(255, 255, 255, 255);

/// A border-separated atlas of `count` cells, `per_row` cells per band, each
/// `width(index)` x `h` pixels, with a one pixel background gutter around
/// every cell.
pub(crate) fn grid_atlas(count: usize, per_row: usize, h: u32, width: impl Fn(usize) -> u32) -> Bitmap {
    let rows = count.div_ceil(per_row) as u32;
    let row_width = (0..count)
        .collect::<Vec<_>>()
        .chunks(per_row)
        .map(|row| row.iter().map(|&i| width(i) + 1).sum::<u32>())
        .max()
        .unwrap_or(0);

    let mut bitmap = Bitmap::new(1 + row_width, 1 + rows * (h + 1), BACKGROUND);
    let mut x = 1;
    for index in 0..count {
        if index % per_row == 0 {
            x = 1;
        }
        let y = 1 + (index / per_row) as u32 * (h + 1);
        bitmap.fill_rect(x, y, width(index), h, INK);
        x += width(index) + 1;
    }

    bitmap
}

/// Uniform-width variant of [`grid_atlas`].
pub(crate) fn uniform_atlas(count: usize, per_row: usize, w: u32, h: u32) -> Bitmap {
    grid_atlas(count, per_row, h, |_| w)
}

/// An embedded-metadata atlas with the given rows of `(code, width)` glyphs.
///
/// The header watermark sits in column 0 of the first row; every glyph is
/// preceded by its marker column.
pub(crate) fn embedded_atlas(rows: &[&[(u32, u8)]], row_height: u32, atlas_width: u32) -> Bitmap {
    let count: usize = rows.iter().map(|r| r.len()).sum();
    let mut bitmap = Bitmap::new(atlas_width, row_height * rows.len() as u32, Pixel::TRANSPARENT);
    write_watermark(&mut bitmap, 0, 0, Watermark::new(count as u32, row_height as u8)).unwrap();

    for (row, glyphs) in rows.iter().enumerate() {
        let y = row as u32 * row_height;
        let mut x = if row == 0 { 1 } else { 0 };
        for &(code, w) in *glyphs {
            write_watermark(&mut bitmap, x, y, Watermark::new(code, w)).unwrap();
            bitmap.fill_rect(x + 1, y, u32::from(w), row_height, INK);
            x += 1 + u32::from(w);
        }
    }

    bitmap
}
