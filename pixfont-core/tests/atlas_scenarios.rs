use pixfont_core::{
    AtlasDecodeError, BlitTarget, Bitmap, Codepage, GlyphRect, Pixel, PixelSurface, Watermark,
    compose_embedded, draw_text, load_font, read_watermark, render_text, text_height, text_width,
    write_watermark,
};

const BACKGROUND: Pixel = Pixel::rgb(0, 0, 0);
const CELL: Pixel = Pixel::rgba(255, 255, 255, 0);

/// `count` cells of `w` x `h`, `per_row` per band, one pixel of background
/// between cells and around the edge.
fn grid(count: usize, per_row: usize, w: u32, h: u32) -> Bitmap {
    let bands = count.div_ceil(per_row) as u32;
    let mut atlas = Bitmap::new(1 + per_row as u32 * (w + 1), 1 + bands * (h + 1), BACKGROUND);
    for i in 0..count {
        let x = 1 + (i % per_row) as u32 * (w + 1);
        let y = 1 + (i / per_row) as u32 * (h + 1);
        atlas.fill_rect(x, y, w, h, CELL);
    }
    atlas
}

#[derive(Default)]
struct Recorder {
    calls: Vec<(i32, i32, GlyphRect)>,
}

impl<S: PixelSurface + ?Sized> BlitTarget<S> for Recorder {
    fn blit_tint(&mut self, _: &S, dx: i32, dy: i32, src: GlyphRect, _: Pixel) {
        self.calls.push((dx, dy, src));
    }
}

#[test]
fn ascii_atlas_with_two_rows_of_48() {
    let font = load_font(grid(96, 48, 8, 10), Codepage::Ascii).unwrap();

    assert_eq!(font.num_glyphs(), 96);
    assert!(font.glyphs().iter().map(|g| g.code).eq(32..128));

    let a = font.glyph(65);
    assert_eq!((a.w, a.h), (8, 10));
}

#[test]
fn cp1252_atlas_missing_a_cell_fails() {
    let err = load_font(grid(223, 32, 8, 10), Codepage::Windows1252).unwrap_err();
    assert_eq!(err, AtlasDecodeError::Exhausted { found: 223, expected: 224 });
}

#[test]
fn unknown_codepage_ids_are_rejected() {
    assert_eq!(Codepage::try_from(65001), Err(AtlasDecodeError::UnsupportedCodepage(65001)));
}

#[test]
fn hi_you_issues_five_blits() {
    let font = load_font(grid(96, 48, 8, 10), Codepage::Ascii).unwrap();
    let (x0, y0) = (3, 4);

    let mut recorder = Recorder::default();
    render_text(&mut recorder, &font, x0, y0, Pixel::WHITE, "Hi\nYou");

    assert_eq!(recorder.calls.len(), 5);
    let (yx, yy, rect) = recorder.calls[2];
    assert_eq!((yx, yy), (x0, y0 + 10));
    assert_eq!(rect, font.glyph(u32::from('Y')).rect());
}

#[test]
fn empty_text_metrics() {
    let font = load_font(grid(96, 48, 8, 10), Codepage::Ascii).unwrap();
    assert_eq!(text_width(&font, ""), 0);
    assert_eq!(text_height(&font, ""), font.glyph(0).h);
}

#[test]
fn lookup_of_absent_codes_matches_question_mark() {
    let font = load_font(grid(224, 32, 6, 9), Codepage::Windows1252).unwrap();
    let question = font.glyph(u32::from('?'));
    for code in [0, 7, 0x7f + 1, 0x2603, 0xE000, 0x10FFFF] {
        assert_eq!(font.glyph(code), question);
    }
    assert_eq!(font.glyph(0x20ac).code, 0x20ac);
}

#[test]
fn embedded_atlas_authored_by_hand() {
    // header: 3 glyphs, 8px rows
    let mut atlas = Bitmap::new(12, 16, Pixel::TRANSPARENT);
    write_watermark(&mut atlas, 0, 0, Watermark::new(3, 8)).unwrap();
    write_watermark(&mut atlas, 1, 0, Watermark::new(0x3B1, 4)).unwrap(); // α
    write_watermark(&mut atlas, 6, 0, Watermark::new(0x3B2, 5)).unwrap(); // β
    write_watermark(&mut atlas, 0, 8, Watermark::new(u32::from('?'), 6)).unwrap();

    let font = load_font(atlas, Codepage::Embedded).unwrap();
    assert_eq!(font.num_glyphs(), 3);
    assert!(font.glyphs().iter().all(|g| g.h == 8));
    assert_eq!(font.text_width("αβ"), 9);
    assert_eq!(font.text_width("ω"), 6);
    assert_eq!(read_watermark(font.surface(), 6, 0), Some(Watermark::new(0x3B2, 5)));
}

#[test]
fn cp1252_font_recomposed_as_embedded() {
    let source = load_font(grid(224, 32, 7, 12), Codepage::Windows1252).unwrap();
    let embedded = load_font(compose_embedded(&source, 128).unwrap(), Codepage::Embedded).unwrap();

    // five U+FFFD holes collapse into one
    assert_eq!(embedded.num_glyphs(), 220);
    assert!(embedded.glyphs().iter().all(|g| g.h == 12));
    assert_eq!(embedded.text_size("€uro\n¿?"), (28, 24));
}

#[test]
fn printf_style_rendering_is_bounded() {
    let font = load_font(grid(96, 48, 8, 10), Codepage::Ascii).unwrap();
    let mut recorder = Recorder::default();
    let filler = "x".repeat(5000);
    draw_text!(&mut recorder, &font, 0, 0, Pixel::WHITE, "{filler}");
    assert_eq!(recorder.calls.len(), pixfont_core::TEXT_BUFFER_LEN - 1);
}
