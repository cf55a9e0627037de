//! Pixel surface and blit seams, plus the owned RGBA [`Bitmap`] implementing both.

use std::fmt::Debug;

use pixfont_data::{AtlasDecodeError, GlyphRect, Pixel, RawAtlas};

/// Read access to a rectangular grid of pixels.
///
/// Image decoding is not part of this crate; anything that can answer these
/// three questions can back a font.
pub trait PixelSurface {
    /// Width in pixels.
    fn width(&self) -> u32;
    /// Height in pixels.
    fn height(&self) -> u32;

    /// The pixel at `(x, y)`, or `None` when the coordinate is out of bounds.
    fn pixel(&self, x: u32, y: u32) -> Option<Pixel>;
}

impl<T: PixelSurface + ?Sized> PixelSurface for &T {
    fn width(&self) -> u32 {
        (**self).width()
    }

    fn height(&self) -> u32 {
        (**self).height()
    }

    fn pixel(&self, x: u32, y: u32) -> Option<Pixel> {
        (**self).pixel(x, y)
    }
}

/// A destination that glyphs can be copied onto.
pub trait BlitTarget<S: PixelSurface + ?Sized> {
    /// Copies `src` from `source` to `(dx, dy)`, multiplying every texel by
    /// `tint`. Implementations clip against their own bounds.
    fn blit_tint(&mut self, source: &S, dx: i32, dy: i32, src: GlyphRect, tint: Pixel);
}

/// An owned, row-major RGBA8 image.
#[derive(Clone, PartialEq, Eq)]
pub struct Bitmap {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl Debug for Bitmap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bitmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Bitmap {
    /// Creates a `width` x `height` bitmap filled with `fill`.
    #[must_use]
    pub fn new(width: u32, height: u32, fill: Pixel) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
        }
    }

    /// Wraps raw RGBA8 bytes.
    ///
    /// # Errors
    /// [`AtlasDecodeError::Malformed`] when `rgba` does not hold exactly
    /// `width * height * 4` bytes.
    pub fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Result<Self, AtlasDecodeError> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(AtlasDecodeError::Malformed(format!(
                "{width}x{height} bitmap needs {expected} bytes, got {}",
                rgba.len()
            )));
        }

        let pixels = rgba
            .chunks_exact(4)
            .map(|c| Pixel::rgba(c[0], c[1], c[2], c[3]))
            .collect();

        Ok(Self { width, height, pixels })
    }

    /// Row-major RGBA8 bytes.
    #[must_use]
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|p| [p.r, p.g, p.b, p.a])
            .collect()
    }

    /// Mutable access to the pixel at `(x, y)`, if it is in bounds.
    pub fn pixel_mut(&mut self, x: u32, y: u32) -> Option<&mut Pixel> {
        let idx = self.index(x, y)?;
        self.pixels.get_mut(idx)
    }

    /// Sets a pixel; out-of-bounds writes are ignored and reported as `false`.
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Pixel) -> bool {
        match self.pixel_mut(x, y) {
            Some(p) => {
                *p = color;
                true
            },
            None => false,
        }
    }

    /// Fills a rectangle, clipped to the bitmap.
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Pixel) {
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        for py in y..y_end {
            for px in x..x_end {
                self.set_pixel(px, py, color);
            }
        }
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| y as usize * self.width as usize + x as usize)
    }
}

impl PixelSurface for Bitmap {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel(&self, x: u32, y: u32) -> Option<Pixel> {
        self.index(x, y).map(|idx| self.pixels[idx])
    }
}

impl TryFrom<RawAtlas> for Bitmap {
    type Error = AtlasDecodeError;

    fn try_from(atlas: RawAtlas) -> Result<Self, Self::Error> {
        Bitmap::from_rgba(atlas.width, atlas.height, &atlas.rgba)
    }
}

impl From<&Bitmap> for RawAtlas {
    fn from(bitmap: &Bitmap) -> Self {
        RawAtlas {
            width: bitmap.width,
            height: bitmap.height,
            rgba: bitmap.to_rgba(),
        }
    }
}

impl<S: PixelSurface + ?Sized> BlitTarget<S> for Bitmap {
    fn blit_tint(&mut self, source: &S, dx: i32, dy: i32, src: GlyphRect, tint: Pixel) {
        for row in 0..src.h {
            let Some(ty) = offset(dy, row) else { continue };
            for col in 0..src.w {
                let Some(tx) = offset(dx, col) else { continue };
                let Some(texel) = source.pixel(src.x.saturating_add(col), src.y.saturating_add(row))
                else {
                    continue;
                };
                let Some(target) = self.pixel_mut(tx, ty) else { continue };

                let color = Pixel::rgba(
                    mul(texel.r, tint.r),
                    mul(texel.g, tint.g),
                    mul(texel.b, tint.b),
                    mul(texel.a, tint.a),
                );
                if color.a > 0 {
                    *target = blend(*target, color);
                }
            }
        }
    }
}

/// Destination coordinate for `origin + step`, if it is non-negative.
fn offset(origin: i32, step: u32) -> Option<u32> {
    u32::try_from(i64::from(origin) + i64::from(step)).ok()
}

fn mul(a: u8, b: u8) -> u8 {
    ((u32::from(a) * u32::from(b) + 127) / 255) as u8
}

/// Source-over compositing of `src` onto `dst`.
fn blend(dst: Pixel, src: Pixel) -> Pixel {
    let a = u32::from(src.a);
    let mix = |s: u8, d: u8| ((u32::from(s) * a + u32::from(d) * (255 - a) + 127) / 255) as u8;

    Pixel::rgba(
        mix(src.r, dst.r),
        mix(src.g, dst.g),
        mix(src.b, dst.b),
        (a + (u32::from(dst.a) * (255 - a) + 127) / 255).min(255) as u8,
    )
}
