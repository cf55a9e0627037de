use std::{
    fs::File,
    io::{BufReader, BufWriter},
    path::Path,
};

use color_eyre::{
    Report,
    eyre::{WrapErr, eyre},
};
use pixfont_core::{Bitmap, PixelSurface};
use png::{BitDepth, ColorType, Decoder, Transformations};
use tracing::debug;

/// Decodes a PNG file into an RGBA bitmap.
///
/// Grayscale, RGB and palette images are expanded to RGBA8; images without
/// an alpha channel become fully opaque.
pub fn load_png(path: &Path) -> Result<Bitmap, Report> {
    let file = File::open(path).wrap_err_with(|| format!("Failed to open '{}'", path.display()))?;

    let mut decoder = Decoder::new(BufReader::new(file));
    decoder.set_transformations(Transformations::normalize_to_color8());
    let mut reader = decoder
        .read_info()
        .wrap_err_with(|| format!("Failed to read PNG header of '{}'", path.display()))?;

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| eyre!("PNG decoder did not report an output size"))?;
    let mut data = vec![0; buf_size];
    let info = reader.next_frame(&mut data)?;

    if info.bit_depth != BitDepth::Eight {
        return Err(eyre!("Unsupported PNG bit depth: {:?}", info.bit_depth));
    }

    let channels = match info.color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        ColorType::Indexed => return Err(eyre!("Indexed PNG was not expanded")),
    };

    let mut rgba = Vec::with_capacity(info.width as usize * info.height as usize * 4);
    for line in data.chunks(info.line_size).take(info.height as usize) {
        for px in line.chunks_exact(channels).take(info.width as usize) {
            let texel = match *px {
                [v] => [v, v, v, 0xff],
                [v, a] => [v, v, v, a],
                [r, g, b] => [r, g, b, 0xff],
                [r, g, b, a] => [r, g, b, a],
                _ => unreachable!("chunks_exact yields {channels} bytes"),
            };
            rgba.extend_from_slice(&texel);
        }
    }

    debug!(path = %path.display(), width = info.width, height = info.height, "Loaded PNG");
    Ok(Bitmap::from_rgba(info.width, info.height, &rgba)?)
}

/// Writes an RGBA8 PNG.
pub fn save_png(path: &Path, bitmap: &Bitmap) -> Result<(), Report> {
    let file =
        File::create(path).wrap_err_with(|| format!("Failed to create '{}'", path.display()))?;

    let mut encoder = png::Encoder::new(BufWriter::new(file), bitmap.width(), bitmap.height());
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(&bitmap.to_rgba())?;
    writer.finish()?;

    debug!(path = %path.display(), width = bitmap.width(), height = bitmap.height(), "Wrote PNG");
    Ok(())
}
