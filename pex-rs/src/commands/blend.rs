//! Blend resolution command

use anyhow::{Result, anyhow};
use clap::Args;
use pex_emitter::{BlendFactor, BlendState, TextureInfo};

use crate::utils::property_table;

/// Every GL code a blend factor may carry
const GL_CODES: [u32; 10] = [
    0, 1, 0x0300, 0x0301, 0x0302, 0x0303, 0x0304, 0x0305, 0x0306, 0x0307,
];

#[derive(Args)]
pub struct BlendArgs {
    /// Source factor: GL code (770, 0x302) or name (SRC_ALPHA)
    #[arg(value_parser = parse_blend_factor)]
    pub source: BlendFactor,

    /// Destination factor: GL code (771, 0x303) or name (ONE_MINUS_SRC_ALPHA)
    #[arg(value_parser = parse_blend_factor)]
    pub destination: BlendFactor,

    /// The texture has premultiplied color channels
    #[arg(long)]
    pub premultiplied: bool,

    /// The texture has no alpha channel
    #[arg(long)]
    pub no_alpha: bool,
}

/// Parse a blend factor from a decimal or hex GL code, or its GL name
pub fn parse_blend_factor(s: &str) -> Result<BlendFactor> {
    let s = s.trim();
    let code = if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).ok()
    } else {
        s.parse::<u32>().ok()
    };

    if let Some(code) = code {
        return Ok(BlendFactor::from_gl(code)?);
    }

    let upper = s.to_ascii_uppercase();
    let name = upper.trim_start_matches("GL_");
    GL_CODES
        .iter()
        .filter_map(|&code| BlendFactor::from_gl(code).ok())
        .find(|factor| factor.name() == name)
        .ok_or_else(|| anyhow!("Unknown blend factor: {s}"))
}

pub fn execute(args: BlendArgs) -> Result<()> {
    let texture = TextureInfo::new(!args.no_alpha, args.premultiplied);
    let state = BlendState::resolve(args.source, args.destination, texture);

    println!(
        "Blend Resolution: {} / {}",
        args.source, args.destination
    );
    println!("=====================================");
    property_table(&[
        (
            "Source",
            format!("{} ({:#06x})", state.source, state.source.gl_code()),
        ),
        (
            "Destination",
            format!(
                "{} ({:#06x})",
                state.destination,
                state.destination.gl_code()
            ),
        ),
        ("Mode", state.mode.to_string()),
        (
            "Opacity Modifies RGB",
            state.opacity_modifies_color.to_string(),
        ),
        (
            "Corrected",
            (state.source != args.source || state.destination != args.destination).to_string(),
        ),
    ])
    .printstd();

    Ok(())
}
