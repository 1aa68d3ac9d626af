//! Colours: [`Color`] and the named palette used by the template.

// ---------------------------------------------------------------------------
// Color
// ---------------------------------------------------------------------------

/// An RGBA colour packed into a `u32` (0xAARRGGBB).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Color(pub u32);

impl Color {
    pub const WHITE: Self = Self::from_rgb(255, 255, 255);
    pub const BLACK: Self = Self::from_rgb(0, 0, 0);
    /// Off-white canvas background.
    pub const RAYWHITE: Self = Self::from_rgb(245, 245, 245);
    pub const DARKGRAY: Self = Self::from_rgb(80, 80, 80);

    /// Construct an opaque colour from RGB components.
    #[inline]
    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self::from_rgba(r, g, b, 255)
    }

    /// Construct from RGBA components.
    #[inline]
    pub const fn from_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self(((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    /// Red component.
    #[inline]
    pub const fn r(self) -> u8 {
        ((self.0 >> 16) & 0xFF) as u8
    }

    /// Green component.
    #[inline]
    pub const fn g(self) -> u8 {
        ((self.0 >> 8) & 0xFF) as u8
    }

    /// Blue component.
    #[inline]
    pub const fn b(self) -> u8 {
        (self.0 & 0xFF) as u8
    }

    /// Alpha component.
    #[inline]
    pub const fn a(self) -> u8 {
        ((self.0 >> 24) & 0xFF) as u8
    }

    /// The same colour with its alpha replaced by `alpha` in `[0, 1]`.
    pub fn fade(self, alpha: f32) -> Self {
        let a = (alpha.clamp(0.0, 1.0) * 255.0) as u8;
        Self::from_rgba(self.r(), self.g(), self.b(), a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn components() {
        let c = Color::from_rgba(0xAB, 0xCD, 0xEF, 0x12);
        assert_eq!(c.r(), 0xAB);
        assert_eq!(c.g(), 0xCD);
        assert_eq!(c.b(), 0xEF);
        assert_eq!(c.a(), 0x12);
        assert_eq!(Color::DARKGRAY.a(), 255);
    }

    #[test]
    fn fade_keeps_rgb() {
        let c = Color::WHITE.fade(0.8);
        assert_eq!(c.a(), 204);
        assert_eq!((c.r(), c.g(), c.b()), (255, 255, 255));
        assert_eq!(Color::WHITE.fade(3.0).a(), 255);
        assert_eq!(Color::WHITE.fade(-1.0).a(), 0);
    }
}
