//! Compositing primitives over an RGBA buffer: blank canvas, alpha overlay,
//! rounded-corner masking, horizontal rules and text.

use image::{imageops, Rgba, RgbaImage};
use rusttype::point;

use crate::render::fonts::Face;

pub fn blank(width: u32, height: u32, color: Rgba<u8>) -> RgbaImage {
    RgbaImage::from_pixel(width, height, color)
}

/// Alpha-composites `top` onto `canvas`; anything outside the canvas is clipped.
pub fn overlay(canvas: &mut RgbaImage, top: &RgbaImage, x: i64, y: i64) {
    imageops::overlay(canvas, top, x, y);
}

/// Makes every pixel outside a rounded rectangle of `radius` fully transparent.
pub fn round_corners(img: &mut RgbaImage, radius: u32) {
    let (w, h) = (img.width() as i32, img.height() as i32);
    let r = (radius as i32).min(w / 2).min(h / 2);
    if r <= 0 {
        return;
    }
    for y in 0..h {
        for x in 0..w {
            if !rounded_rect_contains(x, y, w, h, r) {
                img.get_pixel_mut(x as u32, y as u32).0[3] = 0;
            }
        }
    }
}

fn rounded_rect_contains(x: i32, y: i32, w: i32, h: i32, r: i32) -> bool {
    if (x >= r && x < w - r) || (y >= r && y < h - r) {
        return true;
    }
    let cx = if x < r { r - 1 } else { w - r };
    let cy = if y < r { r - 1 } else { h - r };
    let (dx, dy) = (x - cx, y - cy);
    dx * dx + dy * dy <= r * r
}

/// Solid horizontal rule from `x0` to `x1` inclusive, `thickness` px tall.
pub fn draw_hline(canvas: &mut RgbaImage, x0: i32, x1: i32, y: i32, thickness: u32, color: Rgba<u8>) {
    for dy in 0..thickness as i32 {
        for x in x0..=x1 {
            blend_pixel(canvas, x, y + dy, color, 1.0);
        }
    }
}

/// Draws `text` with its top-left corner at (`x`, `y`); the baseline sits one
/// ascent below `y`.
pub fn draw_text(canvas: &mut RgbaImage, face: &Face, x: f32, y: f32, text: &str, color: Rgba<u8>) {
    let baseline = y + face.ascent();
    match face {
        Face::TrueType { font, scale } => {
            for glyph in font.layout(text, *scale, point(x, baseline)) {
                if let Some(bb) = glyph.pixel_bounding_box() {
                    glyph.draw(|gx, gy, coverage| {
                        blend_pixel(
                            canvas,
                            gx as i32 + bb.min.x,
                            gy as i32 + bb.min.y,
                            color,
                            coverage,
                        );
                    });
                }
            }
        }
        Face::Approximate { table, px } => {
            // Placeholder glyphs: one x-height block per visible character.
            let top = (baseline - table.ascent * px * 0.7).round() as i32;
            let bottom = baseline.round() as i32;
            let mut caret = x;
            for ch in text.chars() {
                let advance = table.char_width(ch) * px;
                if !ch.is_whitespace() {
                    let left = (caret + advance * 0.1).round() as i32;
                    let right = (caret + advance * 0.9).round() as i32;
                    for py in top..bottom {
                        for px_x in left..right {
                            blend_pixel(canvas, px_x, py, color, 1.0);
                        }
                    }
                }
                caret += advance;
            }
        }
    }
}

fn blend_pixel(canvas: &mut RgbaImage, x: i32, y: i32, color: Rgba<u8>, coverage: f32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as u32, y as u32);
    if x >= canvas.width() || y >= canvas.height() {
        return;
    }
    let alpha = coverage.clamp(0.0, 1.0) * (color.0[3] as f32 / 255.0);
    if alpha <= 0.0 {
        return;
    }
    let dst = canvas.get_pixel_mut(x, y);
    let inv = 1.0 - alpha;
    for c in 0..3 {
        dst.0[c] = (color.0[c] as f32 * alpha + dst.0[c] as f32 * inv).round() as u8;
    }
    dst.0[3] = 255;
}

/// `#rrggbb` to an opaque colour, used for the palette constants.
pub const fn rgb(hex: u32) -> Rgba<u8> {
    Rgba([(hex >> 16) as u8, (hex >> 8) as u8, hex as u8, 255])
}
