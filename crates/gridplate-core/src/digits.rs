//! Numeric display from a digit sprite atlas.
//!
//! The atlas is a horizontal strip of ten square glyphs, `0` through `9`,
//! each as wide as the atlas is tall.
//!
//! Layout policy for [`layout_number`]:
//! - every glyph is square, with side equal to the destination height;
//! - digits are emitted most-significant first, left to right;
//! - if the glyphs fit, they are aligned inside the destination according to
//!   [`DigitAlign`];
//! - if they do not fit, each glyph is compressed to `dest.width / count`
//!   and the run fills the destination from its left edge.

use crate::geom::Rect;
use crate::scene::{Scene, TextureId};
use crate::style::Color;

/// Where a number sits inside its destination rectangle when it fits.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum DigitAlign {
    Left,
    #[default]
    Right,
}

/// Source rectangle of glyph `digit` in a digit atlas of height
/// `atlas_height`. Digits above 9 are clamped to 9.
pub fn digit_source(digit: u8, atlas_height: f32) -> Rect {
    let d = digit.min(9) as f32;
    Rect::new(d * atlas_height, 0.0, atlas_height, atlas_height)
}

/// Decimal digits of `number`, most significant first.
pub fn digits_of(number: u32) -> Vec<u8> {
    if number == 0 {
        return vec![0];
    }
    let mut n = number;
    let mut out = Vec::new();
    while n > 0 {
        out.push((n % 10) as u8);
        n /= 10;
    }
    out.reverse();
    out
}

/// Place each digit of `number` inside `dest`.
///
/// Returns `(digit, glyph rectangle)` pairs in reading order.
pub fn layout_number(number: u32, dest: Rect, align: DigitAlign) -> Vec<(u8, Rect)> {
    let digits = digits_of(number);
    let count = digits.len() as f32;
    let side = dest.height;

    let (glyph_w, start_x) = if side * count > dest.width {
        (dest.width / count, dest.x)
    } else {
        let start = match align {
            DigitAlign::Left => dest.x,
            DigitAlign::Right => dest.right() - side * count,
        };
        (side, start)
    };

    digits
        .into_iter()
        .enumerate()
        .map(|(k, d)| {
            let r = Rect::new(start_x + glyph_w * k as f32, dest.y, glyph_w, dest.height);
            (d, r)
        })
        .collect()
}

/// A digit atlas bound to a backend texture.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DigitAtlas {
    pub texture: TextureId,
    /// Atlas height in pixels; also the width of one glyph.
    pub glyph_size: f32,
}

impl DigitAtlas {
    pub fn new(texture: TextureId, glyph_size: f32) -> Self {
        Self {
            texture,
            glyph_size,
        }
    }

    /// Draw a single glyph into `dest`.
    pub fn draw_digit(&self, scene: &mut Scene, digit: u8, dest: Rect, tint: Color) {
        scene.texture(
            self.texture,
            digit_source(digit, self.glyph_size),
            dest,
            tint,
        );
    }

    /// Draw every digit of `number` inside `dest` following the layout
    /// policy of [`layout_number`].
    pub fn draw_number(
        &self,
        scene: &mut Scene,
        number: u32,
        dest: Rect,
        align: DigitAlign,
        tint: Color,
    ) {
        for (digit, rect) in layout_number(number, dest, align) {
            self.draw_digit(scene, digit, rect, tint);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::DrawCmd;

    #[test]
    fn digits_most_significant_first() {
        assert_eq!(digits_of(0), vec![0]);
        assert_eq!(digits_of(7), vec![7]);
        assert_eq!(digits_of(1905), vec![1, 9, 0, 5]);
    }

    #[test]
    fn source_rect_indexes_strip() {
        assert_eq!(digit_source(0, 16.0), Rect::new(0.0, 0.0, 16.0, 16.0));
        assert_eq!(digit_source(3, 16.0), Rect::new(48.0, 0.0, 16.0, 16.0));
        assert_eq!(digit_source(42, 16.0), Rect::new(144.0, 0.0, 16.0, 16.0));
    }

    #[test]
    fn fitting_number_right_aligned() {
        let dest = Rect::new(100.0, 10.0, 200.0, 30.0);
        let placed = layout_number(42, dest, DigitAlign::Right);
        assert_eq!(placed.len(), 2);
        assert_eq!(placed[0], (4, Rect::new(240.0, 10.0, 30.0, 30.0)));
        assert_eq!(placed[1], (2, Rect::new(270.0, 10.0, 30.0, 30.0)));
    }

    #[test]
    fn fitting_number_left_aligned() {
        let dest = Rect::new(100.0, 10.0, 200.0, 30.0);
        let placed = layout_number(42, dest, DigitAlign::Left);
        assert_eq!(placed[0].1.x, 100.0);
        assert_eq!(placed[1].1.x, 130.0);
    }

    #[test]
    fn overflowing_number_is_compressed() {
        let dest = Rect::new(0.0, 0.0, 60.0, 30.0);
        let placed = layout_number(12345, dest, DigitAlign::Right);
        assert_eq!(placed.len(), 5);
        for (k, (_, r)) in placed.iter().enumerate() {
            assert_eq!(r.width, 12.0);
            assert_eq!(r.height, 30.0);
            assert_eq!(r.x, 12.0 * k as f32);
        }
        let last = placed.last().map(|(_, r)| r.right());
        assert_eq!(last, Some(60.0));
    }

    #[test]
    fn draw_number_emits_one_texture_per_digit() {
        let atlas = DigitAtlas::new(TextureId(1), 16.0);
        let mut scene = Scene::new();
        atlas.draw_number(
            &mut scene,
            305,
            Rect::new(0.0, 0.0, 300.0, 20.0),
            DigitAlign::Left,
            Color::DARKGRAY,
        );
        let srcs: Vec<_> = scene
            .iter()
            .map(|c| match c {
                DrawCmd::Texture { texture, src, tint, .. } => {
                    assert_eq!(*texture, TextureId(1));
                    assert_eq!(*tint, Color::DARKGRAY);
                    src.x
                }
                other => panic!("unexpected {other:?}"),
            })
            .collect();
        assert_eq!(srcs, vec![48.0, 0.0, 80.0]);
    }
}
