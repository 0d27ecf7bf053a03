//! Loading effect descriptions from disk

use anyhow::{Context, Result, bail};
use clap::ValueEnum;
use pex_emitter::EmitterConfig;
use std::fs;
use std::path::Path;

/// Serialization format of an effect description
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum EffectFormat {
    /// JSON object with camelCase keys
    Json,
    /// YAML mapping with camelCase keys
    Yaml,
}

impl EffectFormat {
    /// Guess the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "json" => Some(Self::Json),
            "yaml" | "yml" => Some(Self::Yaml),
            _ => None,
        }
    }
}

/// Decode an effect description without validating it
pub fn parse_effect(text: &str, format: EffectFormat) -> Result<EmitterConfig> {
    let config = match format {
        EffectFormat::Json => {
            serde_json::from_str(text).context("Failed to parse JSON effect description")?
        }
        EffectFormat::Yaml => {
            serde_yaml_ng::from_str(text).context("Failed to parse YAML effect description")?
        }
    };
    Ok(config)
}

/// Read, decode and validate an effect description
///
/// The format is taken from `format` when given, otherwise from the
/// file extension.
pub fn load_effect(path: &Path, format: Option<EffectFormat>) -> Result<EmitterConfig> {
    let format = match format.or_else(|| EffectFormat::from_path(path)) {
        Some(format) => format,
        None => bail!(
            "Cannot determine effect format of {}, use --format",
            path.display()
        ),
    };

    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read effect file: {}", path.display()))?;
    let config = parse_effect(&text, format)
        .with_context(|| format!("Invalid effect file: {}", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid effect configuration: {}", path.display()))?;

    log::debug!(
        "Loaded {:?} effect from {} ({} particles max)",
        config.emitter_type,
        path.display(),
        config.max_particles
    );
    Ok(config)
}
