//! Drawing text with a [`Font`].

use std::fmt::{self, Write};

use pixfont_data::Pixel;
use tracing::warn;

use crate::{BlitTarget, Font, PixelSurface};

/// Capacity of the buffer formatted text is expanded into, in bytes,
/// including one byte of reserve.
pub const TEXT_BUFFER_LEN: usize = 1024;

/// Draws `text` with its top-left corner at `(x, y)`, tinting every glyph with
/// `color`.
///
/// `\n` returns to `x` and moves down one row; `\r` is ignored. Characters
/// missing from the font are drawn with the placeholder glyph.
pub fn render_text<S, D>(dest: &mut D, font: &Font<S>, x: i32, y: i32, color: Pixel, text: &str)
where
    S: PixelSurface,
    D: BlitTarget<S> + ?Sized,
{
    let line_height = i32::try_from(font.text_height("")).unwrap_or(i32::MAX);
    let (mut cx, mut cy) = (x, y);

    for c in text.chars() {
        match c {
            '\r' => {},
            '\n' => {
                cx = x;
                cy = cy.saturating_add(line_height);
            },
            c => {
                let glyph = font.glyph(u32::from(c));
                dest.blit_tint(font.surface(), cx, cy, glyph.rect(), color);
                cx = cx.saturating_add_unsigned(glyph.w);
            },
        }
    }
}

/// Formats `args` into a bounded buffer and draws the result with
/// [`render_text`]. Output beyond [`TEXT_BUFFER_LEN`] is dropped.
pub fn render_fmt<S, D>(
    dest: &mut D,
    font: &Font<S>,
    x: i32,
    y: i32,
    color: Pixel,
    args: fmt::Arguments<'_>,
) where
    S: PixelSurface,
    D: BlitTarget<S> + ?Sized,
{
    let text = format_bounded(args);
    render_text(dest, font, x, y, color, &text);
}

/// Expands `args`, silently truncating on a character boundary once the
/// result would not fit [`TEXT_BUFFER_LEN`].
#[must_use]
pub fn format_bounded(args: fmt::Arguments<'_>) -> String {
    let mut buffer = TextBuffer::default();
    // only a failing Display impl can error; keep whatever was written
    let _ = buffer.write_fmt(args);

    if buffer.truncated {
        warn!(limit = TEXT_BUFFER_LEN, "Formatted text truncated");
    }
    buffer.text
}

/// Formats and draws text, `printf` style.
///
/// ```
/// use pixfont_core::{Bitmap, Pixel, draw_text, stock_font};
///
/// let mut screen = Bitmap::new(200, 40, Pixel::rgb(0, 0, 0));
/// draw_text!(&mut screen, stock_font(), 4, 4, Pixel::WHITE, "score: {}", 42);
/// ```
#[macro_export]
macro_rules! draw_text {
    ($dest:expr, $font:expr, $x:expr, $y:expr, $color:expr, $($arg:tt)+) => {
        $crate::render_fmt($dest, $font, $x, $y, $color, format_args!($($arg)+))
    };
}

#[derive(Default)]
struct TextBuffer {
    text: String,
    truncated: bool,
}

impl Write for TextBuffer {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        if self.truncated {
            return Ok(());
        }

        let room = TEXT_BUFFER_LEN - 1 - self.text.len();
        if s.len() <= room {
            self.text.push_str(s);
        } else {
            let cut = (0..=room)
                .rev()
                .find(|&i| s.is_char_boundary(i))
                .unwrap_or(0);
            self.text.push_str(&s[..cut]);
            self.truncated = true;
        }

        Ok(())
    }
}
