//! Border detection and cell scanning for atlases without embedded metadata.
//!
//! The pixel at the atlas origin defines the background ("border") color.
//! Glyph cells are solid rectangles of any other color, separated from each
//! other by background pixels.

use pixfont_data::Pixel;
use tracing::trace;

use crate::PixelSurface;

/// Walks an atlas left-to-right, top-to-bottom in row bands.
pub(crate) struct CellScanner<'a, S: ?Sized> {
    surface: &'a S,
    background: Option<Pixel>,
    x: u32,
    y: u32,
    /// Height of the tallest cell seen in the current band
    row_height: u32,
}

impl<'a, S: PixelSurface + ?Sized> CellScanner<'a, S> {
    pub(crate) fn new(surface: &'a S) -> Self {
        Self {
            surface,
            background: surface.pixel(0, 0),
            x: 0,
            y: 0,
            row_height: 1,
        }
    }

    /// True when `(x, y)` is outside the atlas or shares the origin's color.
    pub(crate) fn is_border(&self, x: u32, y: u32) -> bool {
        if x >= self.surface.width() || y >= self.surface.height() {
            return true;
        }

        match (self.surface.pixel(x, y), self.background) {
            (Some(p), Some(bg)) => p.same_rgb(&bg),
            _ => true,
        }
    }

    /// Advances to the next foreground pixel and returns its position, or
    /// `None` once the scan has run off the bottom of the atlas.
    pub(crate) fn next_cell(&mut self) -> Option<(u32, u32)> {
        let (width, height) = (self.surface.width(), self.surface.height());

        while self.y < height {
            if self.x >= width {
                self.x = 0;
                self.y = self.y.saturating_add(self.row_height);
                self.row_height = 1;
                trace!(y = self.y, "Scanning next row band");
                continue;
            }

            if !self.is_border(self.x, self.y) {
                return Some((self.x, self.y));
            }
            self.x += 1;
        }

        None
    }

    /// Width and height of the cell whose top-left corner is `(x, y)`, each
    /// measured as a run of foreground pixels along the top row and left column.
    pub(crate) fn measure(&self, x: u32, y: u32) -> (u32, u32) {
        let w = (x..).take_while(|&px| !self.is_border(px, y)).count() as u32;
        let h = (y..).take_while(|&py| !self.is_border(x, py)).count() as u32;
        (w, h)
    }

    /// Moves the cursor past a cell of width `w` and records its height.
    pub(crate) fn consume(&mut self, w: u32, h: u32) {
        self.x = self.x.saturating_add(w);
        self.row_height = self.row_height.max(h);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Bitmap;

    const BG: Pixel = Pixel::rgb(255, 0, 255);

    fn atlas(w: u32, h: u32, cells: &[(u32, u32, u32, u32)]) -> Bitmap {
        let mut bitmap = Bitmap::new(w, h, BG);
        for &(x, y, cw, ch) in cells {
            bitmap.fill_rect(x, y, cw, ch, Pixel::rgba(255, 255, 255, 0));
        }
        bitmap
    }

    #[test]
    fn border_is_origin_color_or_out_of_bounds() {
        let mut bitmap = atlas(4, 4, &[(1, 1, 2, 2)]);
        // same rgb, different alpha: still background
        bitmap.set_pixel(3, 3, Pixel::rgba(255, 0, 255, 7));

        let scanner = CellScanner::new(&bitmap);
        assert!(scanner.is_border(0, 0));
        assert!(scanner.is_border(3, 3));
        assert!(!scanner.is_border(1, 1));
        assert!(scanner.is_border(4, 1));
        assert!(scanner.is_border(1, 4));
    }

    #[test]
    fn measures_runs_from_origin() {
        let bitmap = atlas(10, 10, &[(2, 3, 4, 5)]);
        let scanner = CellScanner::new(&bitmap);
        assert_eq!(scanner.measure(2, 3), (4, 5));
    }

    #[test]
    fn runs_stop_at_atlas_edge() {
        let bitmap = atlas(6, 6, &[(3, 2, 3, 4)]);
        let scanner = CellScanner::new(&bitmap);
        assert_eq!(scanner.measure(3, 2), (3, 4));
    }

    #[test]
    fn scans_rows_then_bands() {
        let bitmap = atlas(12, 12, &[(1, 1, 3, 4), (6, 1, 3, 4), (1, 6, 3, 4)]);
        let mut scanner = CellScanner::new(&bitmap);

        let mut found = vec![];
        while let Some((x, y)) = scanner.next_cell() {
            let (w, h) = scanner.measure(x, y);
            found.push((x, y));
            scanner.consume(w, h);
        }

        assert_eq!(found, vec![(1, 1), (6, 1), (1, 6)]);
    }

    #[test]
    fn empty_atlas_is_exhausted_immediately() {
        let bitmap = atlas(5, 5, &[]);
        assert_eq!(CellScanner::new(&bitmap).next_cell(), None);

        let empty = Bitmap::new(0, 0, BG);
        assert_eq!(CellScanner::new(&empty).next_cell(), None);
    }
}
