//! Root CLI structure for pex-rs

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "pex-rs")]
#[command(about = "Command-line tools for particle designer effects", long_about = None)]
#[command(version)]
#[command(author)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbosity level (can be repeated for more detail)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Display information about an effect description
    Info(crate::commands::info::InfoArgs),

    /// Validate an effect description
    Validate(crate::commands::info::ValidateArgs),

    /// Resolve a blend factor pair into a blend mode
    Blend(crate::commands::blend::BlendArgs),

    /// Run an effect headless and report pool activity
    Simulate(crate::commands::simulate::SimulateArgs),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}
