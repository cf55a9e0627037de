//! Command line tool for pixfont atlases: inspect their glyph tables, measure
//! and render text with them, and convert them to the embedded format.

mod cli;
mod image_io;
mod logging;
mod preview;

use std::path::Path;

use clap::Parser;
use color_eyre::eyre::{Context, OptionExt, Result};
use pixfont_core::{
    Bitmap, Codepage, Font, Glyph, Pixel, PixelSurface, RawAtlas, compose_embedded, render_text,
    stock_font,
};
use serde::Serialize;

use crate::{
    cli::{Cli, Command, FontArgs},
    image_io::{load_png, save_png},
    logging::{LoggingConfig, init_logging},
    preview::half_blocks,
};

/// Alpha at which a pixel counts as ink in terminal previews.
const PREVIEW_THRESHOLD: u8 = 0x80;

fn main() -> Result<()> {
    // panic hook
    color_eyre::install()?;

    // Initialize structured logging
    let logging_config = LoggingConfig::from_env();
    let _guard = init_logging(&logging_config).wrap_err("Failed to initialize logging")?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        "pixfont-atlas starting up"
    );

    let cli = Cli::parse();
    match cli.command {
        Command::Inspect { atlas, codepage, json } => inspect(&atlas, codepage, json),
        Command::Measure { text, font } => with_font(&font, |font| {
            let (width, height) = font.text_size(&text);
            println!("{width}x{height}");
            Ok(())
        }),
        Command::Preview { text, font } => with_font(&font, |font| {
            let bitmap = render(font, &text, Pixel::WHITE, Pixel::TRANSPARENT, 0)?;
            print!("{}", half_blocks(&bitmap, PREVIEW_THRESHOLD));
            Ok(())
        }),
        Command::Render { text, font, output, color, background, padding } => {
            let bitmap = with_font(&font, |font| render(font, &text, color, background, padding))?;
            save_png(&output, &bitmap)?;
            println!(
                "Rendered {}x{} image to {}",
                bitmap.width(),
                bitmap.height(),
                output.display()
            );
            Ok(())
        },
        Command::Embed { atlas, codepage, output, row_width } => {
            let font = Font::load(load_atlas(&atlas)?, codepage)
                .wrap_err_with(|| format!("Failed to decode '{}'", atlas.display()))?;
            let embedded = compose_embedded(&font, row_width)?;
            save_png(&output, &embedded)?;
            println!(
                "Embedded {} glyphs ({}x{}) into {}",
                font.num_glyphs(),
                embedded.width(),
                embedded.height(),
                output.display()
            );
            Ok(())
        },
        Command::Pack { png, output } => {
            let bitmap = load_png(&png)?;
            let packed = RawAtlas::from(&bitmap).to_binary();
            std::fs::write(&output, &packed)
                .wrap_err_with(|| format!("Failed to write '{}'", output.display()))?;
            println!(
                "Packed {}x{} atlas into {} ({} bytes)",
                bitmap.width(),
                bitmap.height(),
                output.display(),
                packed.len()
            );
            Ok(())
        },
    }
}

/// Loads a PNG, or a packed container when the file has an `.atlas` extension.
fn load_atlas(path: &Path) -> Result<Bitmap> {
    if path.extension().is_some_and(|ext| ext == "atlas") {
        let bytes = std::fs::read(path)
            .wrap_err_with(|| format!("Failed to read '{}'", path.display()))?;
        let raw = RawAtlas::from_binary(&bytes)
            .wrap_err_with(|| format!("Invalid atlas container '{}'", path.display()))?;
        Ok(Bitmap::try_from(raw)?)
    } else {
        load_png(path)
    }
}

/// Runs `f` with the font selected on the command line, or the built-in font.
fn with_font<R>(args: &FontArgs, f: impl FnOnce(&Font) -> Result<R>) -> Result<R> {
    match &args.atlas {
        Some(path) => {
            let font = Font::load(load_atlas(path)?, args.codepage)
                .wrap_err_with(|| format!("Failed to decode '{}'", path.display()))?;
            f(&font)
        },
        None => f(stock_font()),
    }
}

fn render(
    font: &Font,
    text: &str,
    color: Pixel,
    background: Pixel,
    padding: u32,
) -> Result<Bitmap> {
    let (width, height) = padded_size(font.text_size(text), padding)?;
    let origin = i32::try_from(padding)?;

    let mut bitmap = Bitmap::new(width, height, background);
    render_text(&mut bitmap, font, origin, origin, color, text);
    Ok(bitmap)
}

/// Image size for a text block of `size` with `padding` on every side.
fn padded_size((width, height): (u32, u32), padding: u32) -> Result<(u32, u32)> {
    let pad = |extent: u32| {
        padding
            .checked_mul(2)
            .and_then(|border| extent.checked_add(border))
            .ok_or_eyre("Padding makes the image too large")
    };

    Ok((pad(width)?, pad(height)?))
}

#[derive(Serialize)]
struct AtlasReport<'a> {
    codepage: String,
    width: u32,
    height: u32,
    row_height: u32,
    glyphs: &'a [Glyph],
}

fn inspect(path: &Path, codepage: Codepage, json: bool) -> Result<()> {
    let font = Font::load(load_atlas(path)?, codepage)
        .wrap_err_with(|| format!("Failed to decode '{}'", path.display()))?;

    if json {
        let report = AtlasReport {
            codepage: codepage.to_string(),
            width: font.surface().width(),
            height: font.surface().height(),
            row_height: font.row_height(),
            glyphs: font.glyphs(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Atlas: {}", path.display());
    println!("Codepage: {codepage}");
    println!("Size: {}x{}", font.surface().width(), font.surface().height());
    println!("Glyphs: {} (row height {}px)", font.num_glyphs(), font.row_height());
    println!("\n{:<8} {:<4} {:>5} {:>5} {:>4} {:>4}", "CODE", "CHAR", "X", "Y", "W", "H");
    println!("{}", "-".repeat(36));

    for glyph in font.glyphs() {
        let symbol = glyph
            .symbol()
            .filter(|c| !c.is_control())
            .unwrap_or(' ');
        println!(
            "U+{:04X}   {:<4} {:>5} {:>5} {:>4} {:>4}",
            glyph.code, symbol, glyph.x, glyph.y, glyph.w, glyph.h
        );
    }

    Ok(())
}
