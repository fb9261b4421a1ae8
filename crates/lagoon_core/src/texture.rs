//! Texture loading and caching for materials.
//!
//! Decodes the texture files a scene references (TGA and any other format
//! the `image` crate reads) into 8-bit RGBA pixels ready for upload.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::scene::Scene;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },
}

pub type TextureResult<T> = Result<T, TextureError>;

/// A decoded texture.
#[derive(Clone, Debug, PartialEq)]
pub struct TextureImage {
    /// Texture width in pixels
    pub width: u32,

    /// Texture height in pixels
    pub height: u32,

    /// Pixel data, 4 bytes per pixel, row-major from the top row
    pub rgba: Vec<u8>,

    /// Resolved file path (for debugging)
    pub path: String,
}

impl TextureImage {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>, path: impl Into<String>) -> Self {
        debug_assert_eq!(rgba.len(), width as usize * height as usize * 4);
        Self {
            width,
            height,
            rgba,
            path: path.into(),
        }
    }

    /// Pixel at integer coordinates, `None` when out of range.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = (y as usize * self.width as usize + x as usize) * 4;
        let p = &self.rgba[idx..idx + 4];
        Some([p[0], p[1], p[2], p[3]])
    }

    pub fn size_bytes(&self) -> usize {
        self.rgba.len()
    }
}

/// Cache for decoded textures, keyed by the name used in the scene.
pub struct TextureCache {
    textures: HashMap<String, Arc<TextureImage>>,

    /// Base directory for resolving relative paths
    base_dir: Option<PathBuf>,
}

impl TextureCache {
    /// Create a new empty texture cache.
    pub fn new() -> Self {
        Self {
            textures: HashMap::new(),
            base_dir: None,
        }
    }

    /// Create a texture cache with a base directory for relative paths.
    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            textures: HashMap::new(),
            base_dir: Some(base_dir.into()),
        }
    }

    /// Load a texture from file, using cache if available.
    pub fn load(&mut self, name: &str) -> TextureResult<Arc<TextureImage>> {
        if let Some(texture) = self.textures.get(name) {
            return Ok(texture.clone());
        }

        let full_path = self.resolve_path(name);
        let texture = Arc::new(load_texture_file(&full_path)?);
        self.textures.insert(name.to_string(), texture.clone());

        log::debug!(
            "Loaded texture: {} ({}x{}, {:.1} KB)",
            name,
            texture.width,
            texture.height,
            texture.size_bytes() as f32 / 1024.0
        );

        Ok(texture)
    }

    /// Decode every texture the scene references, in first-seen order.
    ///
    /// Stops at the first texture that cannot be decoded.
    pub fn load_scene(&mut self, scene: &Scene) -> TextureResult<Vec<Arc<TextureImage>>> {
        scene
            .textures
            .iter()
            .map(|texture| self.load(&texture.name))
            .collect()
    }

    /// Get a cached texture without loading.
    pub fn get(&self, name: &str) -> Option<Arc<TextureImage>> {
        self.textures.get(name).cloned()
    }

    pub fn is_cached(&self, name: &str) -> bool {
        self.textures.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.textures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }

    /// Get total memory usage of cached textures.
    pub fn total_size_bytes(&self) -> usize {
        self.textures.values().map(|t| t.size_bytes()).sum()
    }

    /// Resolve a path relative to the base directory.
    pub fn resolve_path(&self, name: &str) -> PathBuf {
        let path = Path::new(name);

        match &self.base_dir {
            Some(base) if !path.is_absolute() => base.join(path),
            _ => path.to_path_buf(),
        }
    }
}

impl Default for TextureCache {
    fn default() -> Self {
        Self::new()
    }
}

fn load_texture_file(path: &Path) -> TextureResult<TextureImage> {
    let img = image::open(path).map_err(|source| TextureError::Decode {
        path: path.display().to_string(),
        source,
    })?;

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(TextureImage::new(
        width,
        height,
        rgba.into_raw(),
        path.to_string_lossy(),
    ))
}
