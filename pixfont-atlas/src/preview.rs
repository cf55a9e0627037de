use std::fmt::Write;

use pixfont_core::{Bitmap, PixelSurface};

/// Renders a bitmap as text, two pixel rows per line of half-block characters.
///
/// A pixel is lit when its alpha is at least `threshold`.
pub fn half_blocks(bitmap: &Bitmap, threshold: u8) -> String {
    let lit = |x: u32, y: u32| {
        bitmap
            .pixel(x, y)
            .is_some_and(|p| p.a > 0 && p.a >= threshold)
    };

    let mut output = String::new();
    for y in (0..bitmap.height()).step_by(2) {
        for x in 0..bitmap.width() {
            let block = match (lit(x, y), lit(x, y + 1)) {
                (true, true) => '█',
                (true, false) => '▀',
                (false, true) => '▄',
                (false, false) => ' ',
            };
            output.push(block);
        }
        writeln!(&mut output).ok();
    }

    output
}
