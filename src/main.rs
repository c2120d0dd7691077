//! Resona CLI - Symbolic Wave Toolbox
//!
//! Command-line interface for wave synthesis, analysis, rendering, and
//! playback.

use clap::Parser;
use env_logger::Env;
use log::info;

use resona::cli::{commands, Cli, Commands};
use resona::{Config, Result};

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Seed the process-wide defaults from the command line once
    let mut config = Config::default();
    if let Some(tolerance) = cli.tolerance {
        config.tolerance = tolerance;
    }
    if let Some(sample_rate) = cli.sample_rate {
        config.sample_rate = sample_rate;
    }
    Config::set_global(config);

    info!("Resona v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(cmd) => handle_command(cmd),
        None => {
            println!("Resona v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for available commands");
            Ok(())
        }
    }
}

fn handle_command(cmd: Commands) -> Result<()> {
    match cmd {
        Commands::Synth {
            waveform,
            frequency,
            harmonics,
            duty,
            amplitude,
            phase,
            output,
        } => commands::synth(
            waveform, frequency, harmonics, duty, amplitude, phase, &output,
        ),
        Commands::Analyze {
            parallelism,
            keep_silent,
            input,
            output,
        } => commands::analyze(&input, &output, parallelism, keep_silent),
        Commands::Render {
            duration,
            wav,
            input,
            output,
        } => commands::render(&input, &output, duration, wav),
        Commands::Play {
            duration,
            total,
            input,
        } => commands::play(&input, duration, total),
    }
}
