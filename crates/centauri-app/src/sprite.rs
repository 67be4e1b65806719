//! PNG export of the generated star sprite.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use centauri_config::TwinStarConfig;
use centauri_scene::{StarTexture, TextureError};
use tracing::info;

/// Errors while writing a sprite to disk.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to generate sprite: {0}")]
    Texture(#[from] TextureError),
    #[error("failed to write sprite: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode sprite: {0}")]
    Encode(#[from] png::EncodingError),
}

/// Generate the twin star sprite described by `config` and save it as an RGBA PNG.
pub fn export_sprite(config: &TwinStarConfig, path: &Path) -> Result<(), ExportError> {
    let texture =
        StarTexture::generate(config.sprite_size, config.sprite_seed, config.temperature_k)?;
    write_png(&texture, path)?;
    info!(
        "Exported {}x{} star sprite to {}",
        texture.size(),
        texture.size(),
        path.display()
    );
    Ok(())
}

/// Write `texture` as an 8-bit RGBA PNG.
pub fn write_png(texture: &StarTexture, path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), texture.size(), texture.size());
    encoder.set_color(png::ColorType::Rgba);
    encoder.set_depth(png::BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(texture.as_rgba8())?;
    writer.finish()?;
    Ok(())
}
