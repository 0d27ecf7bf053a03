//! Headless simulation command

use anyhow::{Context, Result, bail};
use clap::Args;
use pex_emitter::{EmitterConfig, EmitterEvent, EventQueue, ParticleEmitter, TextureInfo};
use std::path::PathBuf;

use crate::utils::{
    EffectFormat, add_table_row, create_table, format_occupancy, load_effect, load_texture_info,
};

#[derive(Args)]
pub struct SimulateArgs {
    /// Path to the effect description
    pub file: PathBuf,

    /// Effect format (guessed from the extension when omitted)
    #[arg(short, long, value_enum)]
    pub format: Option<EffectFormat>,

    /// Number of ticks to run
    #[arg(short = 'n', long, default_value_t = 120)]
    pub ticks: u32,

    /// Seconds per tick
    #[arg(long, default_value_t = 1.0 / 60.0)]
    pub dt: f32,

    /// Particle texture to derive blend flags from
    #[arg(short, long, conflicts_with = "premultiplied")]
    pub texture: Option<PathBuf>,

    /// Treat the texture as premultiplied alpha
    #[arg(long)]
    pub premultiplied: bool,

    /// Seed for a reproducible run
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Print a row every N ticks
    #[arg(short, long, default_value_t = 10)]
    pub every: u32,
}

/// Pool activity gathered from observer events
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Activity {
    pub spawned: usize,
    pub retired: usize,
}

impl Activity {
    /// Fold queued events into the running totals
    pub fn record(&mut self, events: impl IntoIterator<Item = EmitterEvent>) {
        for event in events {
            match event {
                EmitterEvent::Spawned(_) => self.spawned += 1,
                EmitterEvent::Retired(_) => self.retired += 1,
            }
        }
    }
}

/// Build an emitter that reports into an event queue
pub fn build_emitter(
    config: EmitterConfig,
    texture: TextureInfo,
    seed: Option<u64>,
) -> Result<ParticleEmitter<EventQueue>> {
    let queue = EventQueue::for_capacity(config.max_particles);
    let emitter = match seed {
        Some(seed) => ParticleEmitter::with_seed(config, texture, queue, seed),
        None => ParticleEmitter::new(config, texture, queue),
    }
    .context("Failed to create emitter")?;
    Ok(emitter)
}

pub fn execute(args: SimulateArgs) -> Result<()> {
    if !args.dt.is_finite() || args.dt <= 0.0 {
        bail!("Time step must be a positive number of seconds, got {}", args.dt);
    }
    let every = args.every.max(1);

    let config = load_effect(&args.file, args.format)?;
    let texture = match &args.texture {
        Some(path) => load_texture_info(path)?,
        None => TextureInfo::new(true, args.premultiplied),
    };

    let mut emitter = build_emitter(config, texture, args.seed)?;
    let blend = *emitter.blend();

    println!("Simulating: {}", args.file.display());
    println!("=====================================");
    println!(
        "Blend: {} / {} ({}){}",
        blend.source,
        blend.destination,
        blend.mode,
        if blend.opacity_modifies_color {
            ", opacity modifies RGB"
        } else {
            ""
        }
    );
    println!(
        "Capacity: {}, rate: {:.2}/s, dt: {:.4}s\n",
        emitter.capacity(),
        emitter.emission_rate(),
        args.dt
    );

    let mut table = create_table(&[
        "Tick", "Time", "Live", "Occupancy", "Spawned", "Retired", "Active",
    ]);
    let mut activity = Activity::default();
    let mut peak = 0;

    for tick in 1..=args.ticks {
        emitter.advance(args.dt);
        activity.record(emitter.observer_mut().drain());
        peak = peak.max(emitter.particle_count());

        if tick % every == 0 || tick == args.ticks {
            add_table_row(
                &mut table,
                &[
                    tick.to_string(),
                    format!("{:.3}", f64::from(tick) * f64::from(args.dt)),
                    emitter.particle_count().to_string(),
                    format_occupancy(emitter.particle_count(), emitter.capacity()),
                    activity.spawned.to_string(),
                    activity.retired.to_string(),
                    if emitter.is_active() { "yes" } else { "no" }.to_string(),
                ],
            );
        }
    }

    table.printstd();

    if activity.spawned.checked_sub(activity.retired) != Some(emitter.particle_count()) {
        log::warn!(
            "Event totals disagree with the pool: {} spawned, {} retired, {} live",
            activity.spawned,
            activity.retired,
            emitter.particle_count()
        );
    }

    println!("\nSummary:");
    println!("--------");
    println!("Peak live particles: {peak}");
    println!("Total spawned: {}", activity.spawned);
    println!("Total retired: {}", activity.retired);

    Ok(())
}
