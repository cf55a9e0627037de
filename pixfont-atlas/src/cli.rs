use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use pixfont_core::{Codepage, Pixel, authoring::DEFAULT_ROW_WIDTH};

#[derive(Parser, Debug)]
#[command(
    name = "pixfont-atlas",
    version,
    about = "Inspect, measure and render bitmap font atlases",
    long_about = "Decodes bitmap font atlases whose glyph layout is encoded in the pixels themselves, \
                  renders text with them, and converts atlases into the embedded-metadata format"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print the glyph table decoded from an atlas
    Inspect {
        /// Atlas image (.png) or packed atlas container (.atlas)
        #[arg(value_name = "ATLAS", value_parser = validate_file_exists)]
        atlas: PathBuf,

        /// Codepage the atlas is laid out in: ascii, 1252 or embedded
        #[arg(short, long, default_value = "1252")]
        codepage: Codepage,

        /// Emit the glyph table as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the pixel size of a text block
    Measure {
        /// Text to measure; `\n`, `\r` and `\\` escapes are expanded
        #[arg(value_parser = parse_text)]
        text: String,

        #[command(flatten)]
        font: FontArgs,
    },

    /// Render text to the terminal using half-block characters
    Preview {
        /// Text to render; `\n`, `\r` and `\\` escapes are expanded
        #[arg(value_parser = parse_text)]
        text: String,

        #[command(flatten)]
        font: FontArgs,
    },

    /// Render text into a PNG image
    Render {
        /// Text to render; `\n`, `\r` and `\\` escapes are expanded
        #[arg(value_parser = parse_text)]
        text: String,

        #[command(flatten)]
        font: FontArgs,

        /// Output file path
        #[arg(short, long, default_value = "./text.png", value_name = "PATH")]
        output: PathBuf,

        /// Text color as RRGGBB or RRGGBBAA
        #[arg(long, default_value = "ffffff", value_parser = parse_color)]
        color: Pixel,

        /// Background color as RRGGBB or RRGGBBAA
        #[arg(long, default_value = "00000000", value_parser = parse_color)]
        background: Pixel,

        /// Empty border around the text, in pixels
        #[arg(long, default_value = "0", value_name = "PIXELS")]
        padding: u32,
    },

    /// Convert an atlas into the embedded-metadata format
    Embed {
        /// Atlas image (.png) or packed atlas container (.atlas)
        #[arg(value_name = "ATLAS", value_parser = validate_file_exists)]
        atlas: PathBuf,

        /// Codepage the source atlas is laid out in
        #[arg(short, long, default_value = "1252")]
        codepage: Codepage,

        /// Output PNG path
        #[arg(short, long, default_value = "./embedded.png", value_name = "PATH")]
        output: PathBuf,

        /// Width of the produced atlas, in pixels
        #[arg(long, default_value_t = DEFAULT_ROW_WIDTH, value_name = "PIXELS")]
        row_width: u32,
    },

    /// Compress a PNG atlas into the container format used for built-in fonts
    Pack {
        /// Atlas image to pack
        #[arg(value_name = "PNG", value_parser = validate_file_exists)]
        png: PathBuf,

        /// Output file path
        #[arg(short, long, default_value = "./font.atlas", value_name = "PATH")]
        output: PathBuf,
    },
}

/// Font selection shared by the text commands; the built-in font is used when
/// no atlas is given.
#[derive(Args, Debug, Clone)]
pub struct FontArgs {
    /// Atlas image (.png) or packed atlas container (.atlas)
    #[arg(short, long, value_parser = validate_file_exists)]
    pub atlas: Option<PathBuf>,

    /// Codepage the atlas is laid out in: ascii, 1252 or embedded
    #[arg(short, long, default_value = "1252", requires = "atlas")]
    pub codepage: Codepage,
}

fn parse_color(s: &str) -> Result<Pixel, String> {
    Pixel::from_hex(s).ok_or_else(|| format!("Invalid color '{s}'. Expected RRGGBB or RRGGBBAA"))
}

/// Expands backslash escapes so multi-line text can be passed as one argument.
fn parse_text(s: &str) -> Result<String, String> {
    let mut text = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            text.push(c);
            continue;
        }

        match chars.next() {
            Some('n') => text.push('\n'),
            Some('r') => text.push('\r'),
            Some('t') => text.push('\t'),
            Some('\\') => text.push('\\'),
            Some(other) => return Err(format!("Unknown escape sequence '\\{other}'")),
            None => return Err("Trailing backslash".to_string()),
        }
    }

    Ok(text)
}

fn validate_file_exists(s: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(s);

    match () {
        _ if !path.exists() => Err(format!("Input file does not exist: {s}")),
        _ if !path.is_file() => Err(format!("Path is not a file: {s}")),
        _ => Ok(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measure_defaults_to_the_stock_font() {
        let cli = Cli::try_parse_from(["pixfont-atlas", "measure", "Hi\\nthere"]).unwrap();
        match cli.command {
            Command::Measure { text, font } => {
                assert_eq!(text, "Hi\nthere");
                assert_eq!(font.atlas, None);
                assert_eq!(font.codepage, Codepage::Windows1252);
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn codepage_requires_an_atlas() {
        assert!(Cli::try_parse_from(["pixfont-atlas", "measure", "x", "-c", "ascii"]).is_err());
    }

    #[test]
    fn render_parses_colors() {
        let cli = Cli::try_parse_from([
            "pixfont-atlas",
            "render",
            "x",
            "-o",
            "out.png",
            "--color",
            "#ff800040",
        ])
        .unwrap();

        match cli.command {
            Command::Render { color, background, output, .. } => {
                assert_eq!(color, Pixel::rgba(0xff, 0x80, 0x00, 0x40));
                assert_eq!(background, Pixel::TRANSPARENT);
                assert_eq!(output, PathBuf::from("out.png"));
            },
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn invalid_colors_and_missing_files_are_rejected() {
        assert!(Cli::try_parse_from(["pixfont-atlas", "render", "x", "--color", "red"]).is_err());
        assert!(Cli::try_parse_from(["pixfont-atlas", "pack", "/no/such/atlas.png"]).is_err());
    }

    #[test]
    fn escapes() {
        assert_eq!(parse_text(r"a\r\nb\\c").unwrap(), "a\r\nb\\c");
        assert!(parse_text(r"a\q").is_err());
        assert!(parse_text("a\\").is_err());
    }
}
