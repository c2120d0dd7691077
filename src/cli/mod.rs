//! CLI Module
//!
//! Command-line interface over the wave algebra library.

pub mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Resona - symbolic wave synthesis and analysis
#[derive(Parser, Debug)]
#[command(name = "resona")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Numeric tolerance for near-equality tests
    #[arg(long, global = true)]
    pub tolerance: Option<f64>,

    /// Sample rate in Hz
    #[arg(long, global = true)]
    pub sample_rate: Option<f64>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Classical waveform shapes available to `synth`
#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Waveform {
    Sine,
    Cosine,
    Square,
    Triangle,
    Sawtooth,
    Pulse,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Build a classical waveform and save it as a wave table
    Synth {
        /// Waveform shape
        #[arg(short, long, value_enum)]
        waveform: Waveform,

        /// Fundamental frequency in Hz
        #[arg(short, long)]
        frequency: f64,

        /// Number of harmonics for series waveforms
        #[arg(short = 'n', long, default_value_t = 10)]
        harmonics: usize,

        /// Duty cycle for pulse waveforms
        #[arg(short, long, default_value_t = 0.5)]
        duty: f64,

        /// Amplitude for sine/cosine
        #[arg(short, long, default_value_t = 1.0)]
        amplitude: f64,

        /// Phase in radians for sine/cosine
        #[arg(short, long, default_value_t = 0.0)]
        phase: f64,

        /// Output wave table path
        output: PathBuf,
    },

    /// Recover a wave table from a Time,Signal sample table
    Analyze {
        /// Number of analysis workers
        #[arg(long, default_value_t = 1)]
        parallelism: usize,

        /// Keep zero-amplitude components
        #[arg(long)]
        keep_silent: bool,

        /// Input sample table path
        input: PathBuf,

        /// Output wave table path
        output: PathBuf,
    },

    /// Sample a wave table and save a Time,Signal table or WAV file
    Render {
        /// Duration in seconds
        #[arg(short, long)]
        duration: f64,

        /// Write a 32-bit float WAV instead of a sample table
        #[arg(long)]
        wav: bool,

        /// Input wave table path
        input: PathBuf,

        /// Output path
        output: PathBuf,
    },

    /// Play a wave table through the default output device
    Play {
        /// Rendered buffer duration in seconds
        #[arg(short, long)]
        duration: f64,

        /// Total playback time; looping the buffer when longer than it
        #[arg(long)]
        total: Option<f64>,

        /// Input wave table path
        input: PathBuf,
    },
}
