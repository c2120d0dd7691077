//! CLI command implementations

use std::path::Path;

use log::info;

use crate::audio::{audio_samples, Player, RenderOptions};
use crate::cli::Waveform;
use crate::config::Config;
use crate::error::Result;
use crate::io;
use crate::wave::Wave;

/// Build a classical waveform and save it as a wave table
#[allow(clippy::too_many_arguments)]
pub fn synth(
    waveform: Waveform,
    frequency: f64,
    harmonics: usize,
    duty: f64,
    amplitude: f64,
    phase: f64,
    output: &Path,
) -> Result<()> {
    let wave = match waveform {
        Waveform::Sine => Wave::sine(frequency, amplitude, phase),
        Waveform::Cosine => Wave::cosine(frequency, amplitude, phase),
        Waveform::Square => Wave::square(frequency, harmonics),
        Waveform::Triangle => Wave::triangle(frequency, harmonics),
        Waveform::Sawtooth => Wave::sawtooth(frequency, harmonics),
        Waveform::Pulse => Wave::pulse(frequency, duty, harmonics),
    };
    io::save_wave(output, &wave)?;
    info!(
        "wrote {} component(s) to {}",
        wave.len(),
        output.display()
    );
    Ok(())
}

/// Recover a wave table from a sample table
pub fn analyze(input: &Path, output: &Path, parallelism: usize, keep_silent: bool) -> Result<()> {
    let (_, samples) = io::load_samples(input)?;
    let tolerance = if keep_silent { Some(-1.0) } else { None };
    let wave = Wave::from_samples(&samples, None, tolerance, parallelism)?;
    io::save_wave(output, &wave)?;
    info!(
        "analyzed {} sample(s) into {} component(s)",
        samples.len(),
        wave.len()
    );
    Ok(())
}

/// Sample a wave table into a sample table or a WAV file
pub fn render(input: &Path, output: &Path, duration: f64, wav: bool) -> Result<()> {
    let wave = io::load_wave(input)?;
    if wav {
        let rate = Config::global().sample_rate;
        let samples = wave.samples_over(duration, Some(rate));
        io::export_wav(output, &samples, rate.round() as u32)?;
    } else {
        io::save_wave_samples(output, &wave, duration, Some(Config::global().sample_rate))?;
    }
    info!("rendered {}s to {}", duration, output.display());
    Ok(())
}

/// Play a wave table through the default output device
pub fn play(input: &Path, duration: f64, total: Option<f64>) -> Result<()> {
    let wave = io::load_wave(input)?;
    let rate = Config::global().sample_rate;
    let buffer: Vec<f32> = audio_samples(&wave, duration, &RenderOptions::default(), Some(rate), None)
        .iter()
        .map(|&s| s as f32)
        .collect();
    let player = Player::mono(buffer, total, rate, total.is_some())?;
    info!("playing {}s at {} Hz", total.unwrap_or(duration), rate);
    player.play()
}
