//! Wave-to-audio rendering
//!
//! Conditions a wave's time-domain samples into an audio-ready buffer
//! (alias rejection, bias removal, peak normalization) and forwards it
//! to the streaming player. The conditioning never mutates the wave;
//! it filters a copy and rescales the rendered buffer.

use log::debug;

use crate::audio::player::Player;
use crate::config::Config;
use crate::error::Result;
use crate::numeric::rescale;
use crate::wave::Wave;

/// Conditioning switches for audio rendering
#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    /// Drop components above the Nyquist frequency of the target rate
    pub reject_high_freqs: bool,
    /// Drop DC/bias components
    pub remove_bias: bool,
    /// Rescale peaks that exceed the [-1, 1] rails
    pub normalize: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            reject_high_freqs: true,
            remove_bias: true,
            normalize: true,
        }
    }
}

/// Render a wave into an audio-conditioned sample buffer
///
/// Components outside the representable band (above Nyquist, or at DC
/// when bias removal is on) are filtered before sampling. When
/// normalization is on and a peak exceeds a rail, the buffer is
/// rescaled with the rail rule: both rails exceeded maps the full
/// range onto `[-1, 1]`; a single exceeded rail is pulled onto its
/// rail while the other end stays put.
pub fn audio_samples(
    wave: &Wave,
    duration: f64,
    options: &RenderOptions,
    sample_rate: Option<f64>,
    tolerance: Option<f64>,
) -> Vec<f64> {
    let rate = Config::resolve_sample_rate(sample_rate);
    let tol = Config::resolve_tolerance(tolerance);
    let nyquist = rate / 2.0;

    let mut samples = if options.reject_high_freqs || options.remove_bias {
        let kept: Vec<_> = wave
            .components()
            .iter()
            .filter(|s| {
                let abs_freq = s.frequency.abs();
                (!options.reject_high_freqs || abs_freq <= nyquist)
                    && (!options.remove_bias || abs_freq > tol)
            })
            .copied()
            .collect();
        let dropped = wave.len() - kept.len();
        if dropped > 0 {
            debug!("conditioning dropped {dropped} component(s)");
        }
        Wave::new(kept).samples_over(duration, Some(rate))
    } else {
        wave.samples_over(duration, Some(rate))
    };

    if options.normalize && !samples.is_empty() {
        let min = samples.iter().copied().fold(f64::INFINITY, f64::min);
        let max = samples.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if min.abs() > 1.0 && max.abs() > 1.0 {
            rescale(&mut samples, -1.0, 1.0, Some(min), Some(max));
        } else if min.abs() > 1.0 {
            rescale(&mut samples, -1.0, max, Some(min), Some(max));
        } else if max.abs() > 1.0 {
            rescale(&mut samples, min, 1.0, Some(min), Some(max));
        }
    }
    samples
}

/// Condition a wave and append the result to the player's queue
pub fn queue_audio(
    player: &Player,
    wave: &Wave,
    duration: f64,
    options: &RenderOptions,
    tolerance: Option<f64>,
) -> Result<()> {
    let samples = audio_samples(
        wave,
        duration,
        options,
        Some(player.sample_rate()),
        tolerance,
    );
    let buffer: Vec<f32> = samples.iter().map(|&s| s as f32).collect();
    player.add_samples(&buffer)
}

/// Append silence of the given duration to the player's queue
pub fn queue_silence(player: &Player, duration: f64) -> Result<()> {
    let count = (player.sample_rate() * duration) as usize;
    player.add_samples(&vec![0.0; count])
}
