//! Sprite atlases: loading, validation, and source rectangles.

use std::fmt;

use gridplate_core::{DigitAtlas, Rect, TextureId};
use gridplate_winit::{Texture, TextureError};

use crate::config::GameConfig;

pub const TILE_ATLAS: TextureId = TextureId(0);
pub const DIGIT_ATLAS: TextureId = TextureId(1);

/// Startup asset failures. All of them are fatal.
#[derive(Debug)]
pub enum AssetError {
    Texture(TextureError),
    /// The configured tile variant lies past the end of the tile atlas.
    VariantOutOfRange { variant: u32, available: u32 },
    /// The digit atlas cannot hold ten square glyphs.
    DigitAtlasTooNarrow { width: u32, height: u32 },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssetError::Texture(e) => write!(f, "{e}"),
            AssetError::VariantOutOfRange { variant, available } => write!(
                f,
                "tile variant {variant} out of range: the tile atlas holds {available}"
            ),
            AssetError::DigitAtlasTooNarrow { width, height } => write!(
                f,
                "digit atlas {width}x{height} is too narrow for ten {height}px glyphs"
            ),
        }
    }
}

impl std::error::Error for AssetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AssetError::Texture(e) => Some(e),
            _ => None,
        }
    }
}

impl From<TextureError> for AssetError {
    fn from(e: TextureError) -> Self {
        AssetError::Texture(e)
    }
}

/// Atlas geometry needed to build draw commands.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Atlases {
    tile_source: Rect,
    digits: DigitAtlas,
}

impl Atlases {
    /// Check atlas dimensions against the configured tile variant.
    ///
    /// Both atlases are horizontal strips of square sprites as tall as the
    /// image.
    pub fn new(
        tile_size: (u32, u32),
        digit_size: (u32, u32),
        variant: u32,
    ) -> Result<Self, AssetError> {
        let (tw, th) = tile_size;
        let available = if th == 0 { 0 } else { tw / th };
        if variant >= available {
            return Err(AssetError::VariantOutOfRange { variant, available });
        }

        let (dw, dh) = digit_size;
        if dh == 0 || dw / dh < 10 {
            return Err(AssetError::DigitAtlasTooNarrow {
                width: dw,
                height: dh,
            });
        }

        let h = th as f32;
        Ok(Self {
            tile_source: Rect::new(variant as f32 * h, 0.0, h, h),
            digits: DigitAtlas::new(DIGIT_ATLAS, dh as f32),
        })
    }

    /// Source rectangle of the configured tile variant.
    #[inline]
    pub fn tile_source(&self) -> Rect {
        self.tile_source
    }

    #[inline]
    pub fn digits(&self) -> &DigitAtlas {
        &self.digits
    }
}

/// Load both atlases named by `config` and validate them.
pub fn load(config: &GameConfig) -> Result<(Atlases, Vec<(TextureId, Texture)>), AssetError> {
    let tile = Texture::load(&config.tile_atlas)?;
    let digits = Texture::load(&config.digit_atlas)?;
    log::info!(
        "tile atlas {}x{}, digit atlas {}x{}",
        tile.width(),
        tile.height(),
        digits.width(),
        digits.height()
    );
    let atlases = Atlases::new(
        (tile.width(), tile.height()),
        (digits.width(), digits.height()),
        config.cell_variant,
    )?;
    Ok((atlases, vec![(TILE_ATLAS, tile), (DIGIT_ATLAS, digits)]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tile_source_selects_variant() {
        let a = Atlases::new((128, 16), (160, 16), 3).expect("valid");
        assert_eq!(a.tile_source(), Rect::new(48.0, 0.0, 16.0, 16.0));
        assert_eq!(a.digits().glyph_size, 16.0);
        assert_eq!(a.digits().texture, DIGIT_ATLAS);
    }

    #[test]
    fn variant_past_atlas_is_rejected() {
        let err = Atlases::new((128, 16), (160, 16), 8).unwrap_err();
        assert!(matches!(
            err,
            AssetError::VariantOutOfRange {
                variant: 8,
                available: 8
            }
        ));
        assert!(Atlases::new((0, 0), (160, 16), 0).is_err());
    }

    #[test]
    fn narrow_digit_atlas_is_rejected() {
        let err = Atlases::new((16, 16), (144, 16), 0).unwrap_err();
        assert!(matches!(err, AssetError::DigitAtlasTooNarrow { .. }));
        assert!(err.to_string().contains("144x16"));
    }

    #[test]
    fn missing_files_surface_texture_error() {
        let config = GameConfig {
            tile_atlas: "no/such/dir/tile.png".into(),
            ..GameConfig::default()
        };
        let err = load(&config).unwrap_err();
        assert!(matches!(err, AssetError::Texture(_)));
        assert!(err.to_string().contains("tile.png"));
    }

    #[test]
    fn shipped_resources_are_valid() {
        let root = std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("..");
        let config = GameConfig {
            tile_atlas: root.join(crate::config::TILE_ATLAS_PATH),
            digit_atlas: root.join(crate::config::DIGIT_ATLAS_PATH),
            ..GameConfig::default()
        };
        let (atlases, textures) = load(&config).expect("resources load");
        assert_eq!(textures.len(), 2);
        assert_eq!(atlases.tile_source().y, 0.0);
    }
}
