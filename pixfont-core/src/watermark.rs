//! Reading and writing [`Watermark`]s in the alpha channel of a surface.

use pixfont_data::{AtlasDecodeError, Watermark};

use crate::{Bitmap, PixelSurface};

/// Decodes the watermark whose first byte sits at `(x, y)`.
///
/// Returns `None` if any of the seven pixels is outside the surface or the
/// sentinels do not match.
#[must_use]
pub fn read_watermark<S: PixelSurface + ?Sized>(surface: &S, x: u32, y: u32) -> Option<Watermark> {
    let mut bytes = [0u8; Watermark::LEN];
    for (dy, byte) in (0u32..).zip(bytes.iter_mut()) {
        *byte = surface.pixel(x, y.checked_add(dy)?)?.a;
    }

    Watermark::decode(&bytes)
}

/// Stores `mark` in the alpha channel of the seven pixels starting at
/// `(x, y)`, leaving their color channels untouched.
///
/// # Errors
/// [`AtlasDecodeError::Malformed`] if the watermark does not fit; the bitmap
/// is left unmodified in that case.
pub fn write_watermark(
    bitmap: &mut Bitmap,
    x: u32,
    y: u32,
    mark: Watermark,
) -> Result<(), AtlasDecodeError> {
    let fits = x < bitmap.width()
        && y.checked_add(Watermark::LEN as u32)
            .is_some_and(|end| end <= bitmap.height());
    if !fits {
        return Err(AtlasDecodeError::Malformed(format!(
            "watermark at ({x}, {y}) does not fit a {}x{} atlas",
            bitmap.width(),
            bitmap.height()
        )));
    }

    for (dy, byte) in (0u32..).zip(mark.encode()) {
        if let Some(p) = bitmap.pixel_mut(x, y + dy) {
            p.a = byte;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use pixfont_data::Pixel;

    use super::*;

    #[test]
    fn roundtrip_through_alpha_channel() {
        let mut bitmap = Bitmap::new(3, 9, Pixel::rgb(1, 2, 3));
        let mark = Watermark::new(0x1F680, 200);

        write_watermark(&mut bitmap, 2, 1, mark).unwrap();
        assert_eq!(read_watermark(&bitmap, 2, 1), Some(mark));

        // color is preserved
        assert_eq!(bitmap.pixel(2, 1), Some(Pixel::rgba(1, 2, 3, 0xAA)));
        // a different column holds no watermark
        assert_eq!(read_watermark(&bitmap, 1, 1), None);
    }

    #[test]
    fn reads_past_the_edge_fail() {
        let mut bitmap = Bitmap::new(1, 7, Pixel::WHITE);
        write_watermark(&mut bitmap, 0, 0, Watermark::new(5, 5)).unwrap();
        assert!(read_watermark(&bitmap, 0, 0).is_some());
        assert_eq!(read_watermark(&bitmap, 0, 1), None);
        assert_eq!(read_watermark(&bitmap, 1, 0), None);
    }

    #[test]
    fn writes_that_do_not_fit_are_rejected() {
        let mut bitmap = Bitmap::new(2, 6, Pixel::WHITE);
        let before = bitmap.clone();
        assert!(write_watermark(&mut bitmap, 0, 0, Watermark::new(1, 1)).is_err());
        assert!(write_watermark(&mut bitmap, 2, 0, Watermark::new(1, 1)).is_err());
        assert_eq!(bitmap, before);
    }

    #[test]
    fn roundtrip_code_and_value_ranges() {
        let mut bitmap = Bitmap::new(1, 7, Pixel::TRANSPARENT);
        for code in [0, 0x7f, 0x80, 0xffff, 0x10_ffff, 0x8000_0000, u32::MAX] {
            for value in [0, 1, 127, 255] {
                let mark = Watermark::new(code, value);
                write_watermark(&mut bitmap, 0, 0, mark).unwrap();
                assert_eq!(read_watermark(&bitmap, 0, 0), Some(mark));
            }
        }
    }
}
