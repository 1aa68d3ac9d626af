//! The [`Scene`] type: an ordered display list of [`DrawCmd`]s.
//!
//! A model renders one frame by pushing commands into a `Scene`; the
//! graphical backend then rasterizes them in order. Keeping the frame as
//! plain data lets frame composition be tested without a window.

use crate::geom::{Rect, Vec2};
use crate::style::Color;

/// Handle to a texture owned by the backend.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextureId(pub u16);

/// Horizontal anchoring of a text command.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
pub enum TextAlign {
    /// `pos.x` is the left edge of the text.
    #[default]
    Left,
    /// `pos.x` is the horizontal centre; the backend subtracts half the
    /// measured width (integer division).
    Center,
}

/// A single draw operation.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCmd {
    /// Fill the whole canvas.
    Clear(Color),
    /// Sample `src` from a texture and stretch it into `dest`, multiplying by
    /// `tint`.
    Texture {
        texture: TextureId,
        src: Rect,
        dest: Rect,
        tint: Color,
    },
    /// Alpha-blend a solid rectangle.
    FillRect { rect: Rect, color: Color },
    /// Draw a line of text whose top edge is at `pos.y`.
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        color: Color,
        align: TextAlign,
    },
}

/// One frame's worth of draw commands.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    cmds: Vec<DrawCmd>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop all commands, keeping the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.cmds.clear();
    }

    #[inline]
    pub fn push(&mut self, cmd: DrawCmd) {
        self.cmds.push(cmd);
    }

    /// Fill the canvas with `color`.
    pub fn clear_background(&mut self, color: Color) {
        self.push(DrawCmd::Clear(color));
    }

    /// Draw the `src` region of `texture` into `dest`.
    pub fn texture(&mut self, texture: TextureId, src: Rect, dest: Rect, tint: Color) {
        self.push(DrawCmd::Texture {
            texture,
            src,
            dest,
            tint,
        });
    }

    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.push(DrawCmd::FillRect { rect, color });
    }

    pub fn text(&mut self, text: impl Into<String>, pos: Vec2, size: f32, color: Color) {
        self.push(DrawCmd::Text {
            text: text.into(),
            pos,
            size,
            color,
            align: TextAlign::Left,
        });
    }

    /// Text horizontally centred on `center_x`.
    pub fn text_centered(
        &mut self,
        text: impl Into<String>,
        center_x: f32,
        y: f32,
        size: f32,
        color: Color,
    ) {
        self.push(DrawCmd::Text {
            text: text.into(),
            pos: Vec2::new(center_x, y),
            size,
            color,
            align: TextAlign::Center,
        });
    }

    #[inline]
    pub fn cmds(&self) -> &[DrawCmd] {
        &self.cmds
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cmds.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cmds.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, DrawCmd> {
        self.cmds.iter()
    }

    /// All text strings in the scene, in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.cmds.iter().filter_map(|c| match c {
            DrawCmd::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl<'a> IntoIterator for &'a Scene {
    type Item = &'a DrawCmd;
    type IntoIter = std::slice::Iter<'a, DrawCmd>;
    fn into_iter(self) -> Self::IntoIter {
        self.cmds.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_keep_order() {
        let mut s = Scene::new();
        s.clear_background(Color::RAYWHITE);
        s.fill_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::BLACK);
        s.text_centered("hi", 300.0, 10.0, 20.0, Color::DARKGRAY);
        assert_eq!(s.len(), 3);
        assert_eq!(s.cmds()[0], DrawCmd::Clear(Color::RAYWHITE));
        match &s.cmds()[2] {
            DrawCmd::Text { align, pos, .. } => {
                assert_eq!(*align, TextAlign::Center);
                assert_eq!(*pos, Vec2::new(300.0, 10.0));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn clear_resets() {
        let mut s = Scene::new();
        s.text("a", Vec2::ZERO, 10.0, Color::BLACK);
        s.text("b", Vec2::ZERO, 10.0, Color::BLACK);
        assert_eq!(s.texts().collect::<Vec<_>>(), vec!["a", "b"]);
        s.clear();
        assert!(s.is_empty());
    }
}
