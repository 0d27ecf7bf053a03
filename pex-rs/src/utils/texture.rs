//! Texture introspection for blend resolution

use anyhow::{Context, Result};
use image::{DynamicImage, ImageReader};
use pex_emitter::TextureInfo;
use std::path::Path;

/// Derive the blend-relevant flags of a decoded texture
///
/// A texture is treated as premultiplied when it carries alpha, at least one
/// pixel is partially transparent, and no color channel ever exceeds its
/// pixel's alpha. Fully opaque images are ambiguous and count as straight.
pub fn inspect(image: &DynamicImage) -> TextureInfo {
    let has_alpha = image.color().has_alpha();
    if !has_alpha {
        return TextureInfo::new(false, false);
    }

    let rgba = image.to_rgba8();
    let mut translucent = false;
    for pixel in rgba.pixels() {
        let [r, g, b, a] = pixel.0;
        if r > a || g > a || b > a {
            return TextureInfo::new(true, false);
        }
        if a < u8::MAX {
            translucent = true;
        }
    }

    TextureInfo::new(true, translucent)
}

/// Open an image file and inspect it
pub fn load_texture_info(path: &Path) -> Result<TextureInfo> {
    let image = ImageReader::open(path)
        .with_context(|| format!("Failed to open texture: {}", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("Failed to read texture: {}", path.display()))?
        .decode()
        .with_context(|| format!("Failed to decode texture: {}", path.display()))?;

    let info = inspect(&image);
    log::info!(
        "Texture {} ({}x{}): alpha={}, premultiplied={}",
        path.display(),
        image.width(),
        image.height(),
        info.has_alpha,
        info.premultiplied
    );
    Ok(info)
}
