//! CPU-side textures decoded from PNG sprite atlases.

use std::fmt;
use std::path::{Path, PathBuf};

use image::ImageError;

/// Error type for texture loading.
#[derive(Debug)]
pub enum TextureError {
    /// The file could not be read.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The file was read but is not a decodable image.
    Decode { path: PathBuf, source: ImageError },
}

impl fmt::Display for TextureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextureError::Io { path, source } => {
                write!(f, "cannot read texture {}: {source}", path.display())
            }
            TextureError::Decode { path, source } => {
                write!(f, "cannot decode texture {}: {source}", path.display())
            }
        }
    }
}

impl std::error::Error for TextureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TextureError::Io { source, .. } => Some(source),
            TextureError::Decode { source, .. } => Some(source),
        }
    }
}

/// An RGBA8 image held in memory for the lifetime of the driver.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Texture {
    width: u32,
    height: u32,
    /// Row-major RGBA bytes, `width * height * 4` long.
    rgba: Vec<u8>,
}

impl Texture {
    /// Load and decode an image file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, TextureError> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|e| match e {
            ImageError::IoError(source) => TextureError::Io {
                path: path.to_path_buf(),
                source,
            },
            source => TextureError::Decode {
                path: path.to_path_buf(),
                source,
            },
        })?;
        let rgba = img.to_rgba8();
        let (width, height) = rgba.dimensions();
        log::debug!("loaded texture {} ({width}x{height})", path.display());
        Ok(Self {
            width,
            height,
            rgba: rgba.into_raw(),
        })
    }

    /// Wrap raw RGBA bytes. Returns `None` if the length does not match.
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Option<Self> {
        if rgba.len() != (width as usize) * (height as usize) * 4 {
            return None;
        }
        Some(Self {
            width,
            height,
            rgba,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA value at `(x, y)`, clamped to the image edges.
    #[inline]
    pub fn texel(&self, x: i64, y: i64) -> [u8; 4] {
        if self.width == 0 || self.height == 0 {
            return [0, 0, 0, 0];
        }
        let x = x.clamp(0, self.width as i64 - 1) as usize;
        let y = y.clamp(0, self.height as i64 - 1) as usize;
        let i = (y * self.width as usize + x) * 4;
        [
            self.rgba[i],
            self.rgba[i + 1],
            self.rgba[i + 2],
            self.rgba[i + 3],
        ]
    }
}
