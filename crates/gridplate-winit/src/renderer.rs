//! Rasterizes a [`Scene`] into a CPU pixel buffer.
//!
//! Sprites are sampled nearest-neighbour from [`Texture`]s, text is
//! rasterized with fontdue, and everything is alpha-blended onto an opaque
//! canvas of fixed logical size.

use std::collections::HashMap;
use std::fmt;

use fontdue::{Font, FontSettings};
use gridplate_core::{
    geom::Rect,
    scene::{DrawCmd, Scene, TextAlign, TextureId},
    style::Color,
};

use crate::texture::Texture;

/// Built-in monospace font (DejaVu Sans Mono), used unless
/// [`WinitConfig::font_data`](crate::WinitConfig::font_data) is set.
const FALLBACK_FONT: &[u8] = include_bytes!("builtin_font.ttf");

/// Error type for renderer construction.
#[derive(Debug)]
pub enum RendererError {
    /// The font data could not be parsed.
    InvalidFont(&'static str),
}

impl fmt::Display for RendererError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RendererError::InvalidFont(why) => write!(f, "invalid font data: {why}"),
        }
    }
}

impl std::error::Error for RendererError {}

/// Cached rasterized glyph.
struct GlyphCache {
    bitmap: Vec<u8>, // coverage, width*height
    width: usize,
    height: usize,
    x_offset: i32,
    y_offset: i32,
    advance: f32,
}

pub(crate) struct SceneRenderer {
    font: Font,
    width: usize,
    height: usize,
    /// 0x00RRGGBB pixels, `width * height`.
    pixels: Vec<u32>,
    textures: HashMap<TextureId, Texture>,
    /// Keyed by character and the bit pattern of the pixel size.
    glyph_cache: HashMap<(char, u32), GlyphCache>,
}

impl SceneRenderer {
    pub fn new(
        font_data: Option<&[u8]>,
        width: usize,
        height: usize,
        textures: impl IntoIterator<Item = (TextureId, Texture)>,
    ) -> Result<Self, RendererError> {
        let data = font_data.unwrap_or(FALLBACK_FONT);
        let font =
            Font::from_bytes(data, FontSettings::default()).map_err(RendererError::InvalidFont)?;
        Ok(Self {
            font,
            width,
            height,
            pixels: vec![0; width * height],
            textures: textures.into_iter().collect(),
            glyph_cache: HashMap::new(),
        })
    }

    /// Canvas width in logical pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Canvas height in logical pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Rasterize every command of `scene`, in order.
    pub fn render(&mut self, scene: &Scene) {
        for cmd in scene {
            match cmd {
                DrawCmd::Clear(color) => self.pixels.fill(opaque(*color)),
                DrawCmd::Texture {
                    texture,
                    src,
                    dest,
                    tint,
                } => self.draw_texture(*texture, *src, *dest, *tint),
                DrawCmd::FillRect { rect, color } => self.fill_rect(*rect, *color),
                DrawCmd::Text {
                    text,
                    pos,
                    size,
                    color,
                    align,
                } => {
                    let x = match align {
                        TextAlign::Left => pos.x as i32,
                        TextAlign::Center => pos.x as i32 - self.measure_text(text, *size) / 2,
                    };
                    self.draw_text(text, x, pos.y as i32, *size, *color);
                }
            }
        }
    }

    /// Pixel columns/rows whose centres fall inside `[lo, hi)`, clipped to
    /// `0..limit`.
    fn span(lo: f32, hi: f32, limit: usize) -> (usize, usize) {
        let a = (lo - 0.5).ceil().max(0.0) as usize;
        let b = ((hi - 0.5).ceil().max(0.0) as usize).min(limit);
        (a.min(b), b)
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        let (x0, x1) = Self::span(rect.x, rect.right(), self.width);
        let (y0, y1) = Self::span(rect.y, rect.bottom(), self.height);
        let rgba = [color.r(), color.g(), color.b(), color.a()];
        for y in y0..y1 {
            let row = y * self.width;
            for px in &mut self.pixels[row + x0..row + x1] {
                *px = blend(*px, rgba);
            }
        }
    }

    fn draw_texture(&mut self, id: TextureId, src: Rect, dest: Rect, tint: Color) {
        let Some(tex) = self.textures.get(&id) else {
            log::warn!("draw of unknown texture {id:?} skipped");
            return;
        };
        if dest.width <= 0.0 || dest.height <= 0.0 {
            return;
        }
        let (x0, x1) = Self::span(dest.x, dest.right(), self.width);
        let (y0, y1) = Self::span(dest.y, dest.bottom(), self.height);
        let sx = src.width / dest.width;
        let sy = src.height / dest.height;
        let src_x_max = (src.right() - 1.0) as i64;
        let src_y_max = (src.bottom() - 1.0) as i64;

        for y in y0..y1 {
            let v = (src.y + (y as f32 + 0.5 - dest.y) * sy).floor() as i64;
            let v = v.clamp(src.y as i64, src_y_max.max(src.y as i64));
            let row = y * self.width;
            for x in x0..x1 {
                let u = (src.x + (x as f32 + 0.5 - dest.x) * sx).floor() as i64;
                let u = u.clamp(src.x as i64, src_x_max.max(src.x as i64));
                let t = tex.texel(u, v);
                let texel = [
                    mul(t[0], tint.r()),
                    mul(t[1], tint.g()),
                    mul(t[2], tint.b()),
                    mul(t[3], tint.a()),
                ];
                let idx = row + x;
                self.pixels[idx] = blend(self.pixels[idx], texel);
            }
        }
    }

    /// Ensure a glyph is cached, rasterizing it if needed.
    fn cache_glyph(&mut self, ch: char, size: f32) {
        let key = (ch, size.to_bits());
        if self.glyph_cache.contains_key(&key) {
            return;
        }
        let (metrics, bitmap) = self.font.rasterize(ch, size);
        self.glyph_cache.insert(
            key,
            GlyphCache {
                bitmap,
                width: metrics.width,
                height: metrics.height,
                x_offset: metrics.xmin,
                y_offset: metrics.ymin,
                advance: metrics.advance_width,
            },
        );
    }

    /// Width in pixels of `text` at `size`, truncated to an integer.
    pub fn measure_text(&mut self, text: &str, size: f32) -> i32 {
        let mut w = 0.0;
        for ch in text.chars() {
            self.cache_glyph(ch, size);
            w += self.glyph_cache[&(ch, size.to_bits())].advance;
        }
        w as i32
    }

    /// Draw `text` with its top-left corner at `(x, y)`.
    fn draw_text(&mut self, text: &str, x: i32, y: i32, size: f32, color: Color) {
        let ascent = self
            .font
            .horizontal_line_metrics(size)
            .map(|m| m.ascent.ceil() as i32)
            .unwrap_or(size as i32);
        let baseline = y + ascent;
        let mut pen_x = x as f32;

        for ch in text.chars() {
            self.cache_glyph(ch, size);
            let glyph = &self.glyph_cache[&(ch, size.to_bits())];
            let gx0 = pen_x as i32 + glyph.x_offset;
            // y_offset is the bottom of the bitmap relative to the baseline.
            let gy0 = baseline - glyph.y_offset - glyph.height as i32;

            for gy in 0..glyph.height {
                let py = gy0 + gy as i32;
                if py < 0 || py as usize >= self.height {
                    continue;
                }
                for gx in 0..glyph.width {
                    let coverage = glyph.bitmap[gy * glyph.width + gx];
                    if coverage == 0 {
                        continue;
                    }
                    let px = gx0 + gx as i32;
                    if px < 0 || px as usize >= self.width {
                        continue;
                    }
                    let a = mul(coverage, color.a());
                    let idx = py as usize * self.width + px as usize;
                    self.pixels[idx] =
                        blend(self.pixels[idx], [color.r(), color.g(), color.b(), a]);
                }
            }
            pen_x += glyph.advance;
        }
    }

    /// Canvas pixel at `(x, y)` as 0x00RRGGBB.
    #[cfg(test)]
    pub fn pixel(&self, x: usize, y: usize) -> u32 {
        self.pixels[y * self.width + x]
    }

    /// Scale the canvas (nearest neighbour) into a surface buffer of
    /// `buf_width` × `buf_height`.
    pub fn blit_to_buffer(&self, buf: &mut [u32], buf_width: usize, buf_height: usize) {
        if buf_width == 0 || buf_height == 0 || self.width == 0 || self.height == 0 {
            return;
        }
        for y in 0..buf_height {
            let sy = y * self.height / buf_height;
            let src_row = sy * self.width;
            let dst_row = y * buf_width;
            if dst_row + buf_width > buf.len() {
                break;
            }
            if buf_width == self.width {
                buf[dst_row..dst_row + buf_width]
                    .copy_from_slice(&self.pixels[src_row..src_row + self.width]);
                continue;
            }
            for x in 0..buf_width {
                let sx = x * self.width / buf_width;
                buf[dst_row + x] = self.pixels[src_row + sx];
            }
        }
    }
}

#[inline]
fn opaque(c: Color) -> u32 {
    c.0 & 0x00FF_FFFF
}

/// `a * b / 255` for 8-bit channels.
#[inline]
fn mul(a: u8, b: u8) -> u8 {
    ((a as u32 * b as u32 + 127) / 255) as u8
}

/// Alpha-blend an RGBA source over an opaque 0x00RRGGBB destination.
#[inline]
fn blend(dst: u32, src: [u8; 4]) -> u32 {
    let a = src[3] as u32;
    if a == 255 {
        return ((src[0] as u32) << 16) | ((src[1] as u32) << 8) | src[2] as u32;
    }
    if a == 0 {
        return dst;
    }
    let inv = 255 - a;
    let dr = (dst >> 16) & 0xFF;
    let dg = (dst >> 8) & 0xFF;
    let db = dst & 0xFF;
    let r = (src[0] as u32 * a + dr * inv) / 255;
    let g = (src[1] as u32 * a + dg * inv) / 255;
    let b = (src[2] as u32 * a + db * inv) / 255;
    (r << 16) | (g << 8) | b
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridplate_core::geom::Vec2;

    const TILE: TextureId = TextureId(0);

    /// 2x1 atlas: red texel, then a half-transparent blue texel.
    fn renderer() -> SceneRenderer {
        let atlas = Texture::from_rgba(2, 1, vec![255, 0, 0, 255, 0, 0, 255, 128])
            .expect("atlas size");
        SceneRenderer::new(None, 40, 30, [(TILE, atlas)]).expect("builtin font parses")
    }

    #[test]
    fn clear_fills_canvas() {
        let mut r = renderer();
        let mut scene = Scene::new();
        scene.clear_background(Color::RAYWHITE);
        r.render(&scene);
        assert_eq!(r.pixel(0, 0), 0x00F5F5F5);
        assert_eq!(r.pixel(39, 29), 0x00F5F5F5);
    }

    #[test]
    fn texture_is_stretched_into_dest_only() {
        let mut r = renderer();
        let mut scene = Scene::new();
        scene.clear_background(Color::WHITE);
        scene.texture(
            TILE,
            Rect::new(0.0, 0.0, 1.0, 1.0),
            Rect::new(10.0, 5.0, 8.0, 4.0),
            Color::WHITE,
        );
        r.render(&scene);
        assert_eq!(r.pixel(10, 5), 0x00FF0000);
        assert_eq!(r.pixel(17, 8), 0x00FF0000);
        assert_eq!(r.pixel(18, 8), 0x00FFFFFF);
        assert_eq!(r.pixel(9, 5), 0x00FFFFFF);
        assert_eq!(r.pixel(10, 9), 0x00FFFFFF);
    }

    #[test]
    fn texture_alpha_and_tint_blend() {
        let mut r = renderer();
        let mut scene = Scene::new();
        scene.clear_background(Color::WHITE);
        // Second texel is blue at ~50% alpha.
        scene.texture(
            TILE,
            Rect::new(1.0, 0.0, 1.0, 1.0),
            Rect::new(0.0, 0.0, 2.0, 2.0),
            Color::WHITE,
        );
        // Tint the red texel to black.
        scene.texture(
            TILE,
            Rect::new(0.0, 0.0, 1.0, 1.0),
            Rect::new(2.0, 0.0, 2.0, 2.0),
            Color::BLACK,
        );
        r.render(&scene);
        let p = r.pixel(0, 0);
        let (red, blue) = ((p >> 16) & 0xFF, p & 0xFF);
        assert_eq!(blue, 255);
        assert!(red > 120 && red < 135, "red = {red}");
        assert_eq!(r.pixel(2, 0), 0x00000000);
    }

    #[test]
    fn fill_rect_blends_and_clips() {
        let mut r = renderer();
        let mut scene = Scene::new();
        scene.clear_background(Color::BLACK);
        scene.fill_rect(Rect::new(-10.0, -10.0, 100.0, 100.0), Color::WHITE.fade(0.8));
        r.render(&scene);
        assert_eq!(r.pixel(0, 0), 0x00CCCCCC);
        assert_eq!(r.pixel(39, 29), 0x00CCCCCC);
    }

    #[test]
    fn unknown_texture_is_ignored() {
        let mut r = renderer();
        let mut scene = Scene::new();
        scene.clear_background(Color::WHITE);
        scene.texture(
            TextureId(9),
            Rect::new(0.0, 0.0, 1.0, 1.0),
            Rect::new(0.0, 0.0, 10.0, 10.0),
            Color::WHITE,
        );
        r.render(&scene);
        assert_eq!(r.pixel(5, 5), 0x00FFFFFF);
    }

    #[test]
    fn text_marks_pixels_inside_its_box() {
        let mut r = renderer();
        let mut scene = Scene::new();
        scene.clear_background(Color::WHITE);
        scene.text("W", Vec2::new(15.0, 2.0), 20.0, Color::BLACK);
        r.render(&scene);
        let width = r.measure_text("W", 20.0) as usize;
        assert!(width > 0);
        let mut inked = 0;
        for y in 0..30 {
            for x in 0..40 {
                if r.pixel(x, y) != 0x00FFFFFF {
                    assert!(x >= 13 && x < 15 + width + 2, "stray ink at ({x}, {y})");
                    inked += 1;
                }
            }
        }
        assert!(inked > 0);
    }

    #[test]
    fn measure_scales_with_length() {
        let mut r = renderer();
        let one = r.measure_text("A", 20.0);
        let four = r.measure_text("AAAA", 20.0);
        assert!(one > 0);
        // Monospace: the sum of four advances, truncated once.
        assert!((four - 4 * one).abs() <= 3);
        assert_eq!(r.measure_text("", 20.0), 0);
    }

    #[test]
    fn blit_scales_nearest() {
        let mut r = renderer();
        let mut scene = Scene::new();
        scene.clear_background(Color::BLACK);
        scene.fill_rect(Rect::new(0.0, 0.0, 20.0, 30.0), Color::WHITE);
        r.render(&scene);

        let mut buf = vec![0u32; 80 * 60];
        r.blit_to_buffer(&mut buf, 80, 60);
        assert_eq!(buf[0], 0x00FFFFFF);
        assert_eq!(buf[39], 0x00FFFFFF);
        assert_eq!(buf[40], 0x00000000);
        assert_eq!(buf[59 * 80 + 79], 0x00000000);

        let mut same = vec![0u32; 40 * 30];
        r.blit_to_buffer(&mut same, 40, 30);
        assert_eq!(same[19], 0x00FFFFFF);
        assert_eq!(same[20], 0x00000000);
    }
}
