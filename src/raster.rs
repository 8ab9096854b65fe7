// ABOUTME: Image rendering module for the big-apple application
// ABOUTME: Draws a slide layout onto a 280x192 canvas with a bitmap or TrueType font

use crate::errors::{DeckError, Result};
use crate::layout::{SlideLayout, BODY_MARGIN, CANVAS_HEIGHT, CANVAS_WIDTH, GLYPH_ADVANCE};
use crate::utils::validate_file_exists;
use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{Rgb, RgbImage};
use log::info;
use rusttype::{point, Font, Scale};
use std::fs;
use std::path::Path;

pub const BACKGROUND: Rgb<u8> = Rgb([0, 0, 0]);
pub const HEADING_COLOR: Rgb<u8> = Rgb([255, 0, 0]);
pub const BODY_COLOR: Rgb<u8> = Rgb([255, 255, 255]);

/// Pixel size TrueType fonts are rasterized at.
pub const FONT_SIZE: f32 = 8.0;

/// Something that can draw a line of text onto a canvas.
pub trait GlyphFont {
    /// Draw `text` with its top-left corner at (`x`, `y`). Pixels falling
    /// outside the canvas are skipped.
    fn draw_text(&self, canvas: &mut RgbImage, x: i32, y: i32, text: &str, color: Rgb<u8>);
}

/// The built-in 8x8 bitmap font, laid out on a 7 pixel advance.
#[derive(Debug, Default, Clone, Copy)]
pub struct BitmapFont;

impl GlyphFont for BitmapFont {
    fn draw_text(&self, canvas: &mut RgbImage, x: i32, y: i32, text: &str, color: Rgb<u8>) {
        for (column, ch) in text.chars().enumerate() {
            let Some(glyph) = BASIC_FONTS.get(ch).or_else(|| BASIC_FONTS.get('?')) else {
                continue;
            };
            let origin_x = x + column as i32 * GLYPH_ADVANCE;
            for (row, bits) in glyph.into_iter().enumerate() {
                for bit in 0..8 {
                    if bits & (1u8 << bit) != 0 {
                        put_pixel(canvas, origin_x + bit, y + row as i32, color);
                    }
                }
            }
        }
    }
}

/// A TrueType font loaded from disk, such as an Apple II screen font.
pub struct TrueTypeFont {
    font: Font<'static>,
    scale: Scale,
}

impl TrueTypeFont {
    pub fn from_file(path: &Path) -> Result<Self> {
        info!("Loading font: {:?}", path);
        validate_file_exists(path)?;
        let data = fs::read(path).map_err(DeckError::FileReadError)?;
        let font = Font::try_from_vec(data)
            .ok_or_else(|| DeckError::FontError(format!("Unsupported font file: {:?}", path)))?;
        Ok(Self {
            font,
            scale: Scale::uniform(FONT_SIZE),
        })
    }
}

impl GlyphFont for TrueTypeFont {
    fn draw_text(&self, canvas: &mut RgbImage, x: i32, y: i32, text: &str, color: Rgb<u8>) {
        let ascent = self.font.v_metrics(self.scale).ascent;
        let start = point(x as f32, y as f32 + ascent);
        for glyph in self.font.layout(text, self.scale, start) {
            let Some(bounds) = glyph.pixel_bounding_box() else {
                continue;
            };
            // Screen fonts are drawn without anti-aliasing.
            glyph.draw(|gx, gy, coverage| {
                if coverage >= 0.5 {
                    put_pixel(
                        canvas,
                        bounds.min.x + gx as i32,
                        bounds.min.y + gy as i32,
                        color,
                    );
                }
            });
        }
    }
}

/// Load the TrueType font at `path`, or fall back to the built-in bitmap font.
pub fn load_font(path: Option<&Path>) -> Result<Box<dyn GlyphFont>> {
    match path {
        Some(path) => Ok(Box::new(TrueTypeFont::from_file(path)?)),
        None => Ok(Box::new(BitmapFont)),
    }
}

/// Render a laid-out slide to an image.
pub fn render_image(layout: &SlideLayout, font: &dyn GlyphFont) -> RgbImage {
    let mut canvas = RgbImage::from_pixel(CANVAS_WIDTH, CANVAS_HEIGHT, BACKGROUND);
    for heading in &layout.headings {
        font.draw_text(&mut canvas, heading.x, heading.y, &heading.text, HEADING_COLOR);
    }

    let mut text_layer = RgbImage::from_pixel(CANVAS_WIDTH, CANVAS_HEIGHT, BACKGROUND);
    for (index, line) in layout.body.iter().enumerate() {
        if line.is_empty() {
            continue;
        }
        let y = SlideLayout::body_line_y(index);
        font.draw_text(&mut text_layer, BODY_MARGIN, y, line, BODY_COLOR);
    }

    composite(&mut canvas, &text_layer, layout.body_offset());
    canvas
}

/// Copy the lit pixels of `layer` onto `canvas`, shifted down by `offset`.
fn composite(canvas: &mut RgbImage, layer: &RgbImage, offset: i32) {
    for (x, y, pixel) in layer.enumerate_pixels() {
        if *pixel != BACKGROUND {
            put_pixel(canvas, x as i32, y as i32 + offset, *pixel);
        }
    }
}

fn put_pixel(canvas: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    if x < canvas.width() && y < canvas.height() {
        canvas.put_pixel(x, y, color);
    }
}
