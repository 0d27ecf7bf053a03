//! Effect description info and validation commands

use anyhow::Result;
use clap::Args;
use pex_emitter::{BlendMode, EmitterConfig, EmitterType};
use std::path::PathBuf;

use crate::utils::{
    EffectFormat, format_color, format_duration, format_varied, format_vec2, load_effect,
    property_table,
};

#[derive(Args)]
pub struct InfoArgs {
    /// Path to the effect description
    pub file: PathBuf,

    /// Effect format (guessed from the extension when omitted)
    #[arg(short, long, value_enum)]
    pub format: Option<EffectFormat>,

    /// Also show color and rotation settings
    #[arg(long)]
    pub all: bool,
}

#[derive(Args)]
pub struct ValidateArgs {
    /// Path to the effect description
    pub file: PathBuf,

    /// Effect format (guessed from the extension when omitted)
    #[arg(short, long, value_enum)]
    pub format: Option<EffectFormat>,
}

pub fn execute_info(args: InfoArgs) -> Result<()> {
    let config = load_effect(&args.file, args.format)?;

    println!("Effect Information: {}", args.file.display());
    println!("=====================================");
    property_table(&summary_rows(&config)).printstd();

    match config.emitter_type {
        EmitterType::Gravity => {
            println!("\nGravity Emitter:");
            println!("----------------");
            property_table(&gravity_rows(&config)).printstd();
        }
        EmitterType::Radial => {
            println!("\nRadial Emitter:");
            println!("---------------");
            property_table(&radial_rows(&config)).printstd();
        }
    }

    if args.all {
        println!("\nAppearance:");
        println!("-----------");
        property_table(&appearance_rows(&config)).printstd();
    }

    Ok(())
}

pub fn execute_validate(args: ValidateArgs) -> Result<()> {
    let config = load_effect(&args.file, args.format)?;
    println!(
        "✓ {} is a valid {} effect",
        args.file.display(),
        emitter_type_name(config.emitter_type)
    );
    Ok(())
}

fn emitter_type_name(emitter_type: EmitterType) -> &'static str {
    match emitter_type {
        EmitterType::Gravity => "gravity",
        EmitterType::Radial => "radial",
    }
}

fn summary_rows(config: &EmitterConfig) -> Vec<(&'static str, String)> {
    let blend = BlendMode::from_factors(config.blend_func_source, config.blend_func_destination);
    vec![
        ("Type", emitter_type_name(config.emitter_type).to_string()),
        ("Max Particles", config.max_particles.to_string()),
        ("Emission Rate", format!("{:.2}/s", config.emission_rate())),
        ("Duration", format_duration(config.duration)),
        (
            "Lifespan",
            format_varied(config.particle_lifespan, config.particle_lifespan_variance),
        ),
        ("Source", format_vec2(config.source_position)),
        ("Source Variance", format_vec2(config.source_position_variance)),
        (
            "Blend Factors",
            format!(
                "{} / {}",
                config.blend_func_source, config.blend_func_destination
            ),
        ),
        ("Blend Mode", blend.to_string()),
    ]
}

fn gravity_rows(config: &EmitterConfig) -> Vec<(&'static str, String)> {
    vec![
        ("Angle", format_varied(config.angle, config.angle_variance)),
        ("Speed", format_varied(config.speed, config.speed_variance)),
        ("Gravity", format_vec2(config.gravity)),
        (
            "Radial Accel",
            format_varied(config.radial_acceleration, config.radial_accel_variance),
        ),
        (
            "Tangential Accel",
            format_varied(
                config.tangential_acceleration,
                config.tangential_accel_variance,
            ),
        ),
    ]
}

fn radial_rows(config: &EmitterConfig) -> Vec<(&'static str, String)> {
    vec![
        ("Angle", format_varied(config.angle, config.angle_variance)),
        (
            "Max Radius",
            format_varied(config.max_radius, config.max_radius_variance),
        ),
        ("Min Radius", format!("{:.2}", config.min_radius)),
        (
            "Rotate/s",
            format_varied(config.rotate_per_second, config.rotate_per_second_variance),
        ),
    ]
}

fn appearance_rows(config: &EmitterConfig) -> Vec<(&'static str, String)> {
    vec![
        ("Start Color", format_color(config.start_color)),
        ("Start Color Var", format_color(config.start_color_variance)),
        ("Finish Color", format_color(config.finish_color)),
        ("Finish Color Var", format_color(config.finish_color_variance)),
        (
            "Start Size",
            format_varied(
                config.start_particle_size,
                config.start_particle_size_variance,
            ),
        ),
        (
            "Finish Size",
            format_varied(
                config.finish_particle_size,
                config.finish_particle_size_variance,
            ),
        ),
        (
            "Rotation Start",
            format_varied(config.rotation_start, config.rotation_start_variance),
        ),
        (
            "Rotation End",
            format_varied(config.rotation_end, config.rotation_end_variance),
        ),
    ]
}
