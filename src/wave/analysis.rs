//! Fourier analysis: sample buffers to symbolic waves
//!
//! The inverse direction of sampling. A real FFT yields the
//! non-redundant half spectrum; each conjugate bin pair becomes two
//! components at the same frequency, one cosine-phase carrying the
//! classic `a_n` coefficient and one sine-phase carrying `b_n`.
//! Analysis deliberately does not interference-reduce its output, so a
//! wave recovered from `N` samples can hold up to `N` components.

use num_complex::Complex;
use rayon::prelude::*;

use crate::error::{ResonaError, Result};
use crate::fourier;
use crate::wave::{Sinusoid, Wave, COSINE_PHASE};

/// Extract the cosine/sine component pair for one conjugate bin pair
#[inline]
fn bin_components(
    spectrum: &[Complex<f64>],
    bin: usize,
    num_samples: f64,
    nyquist: f64,
) -> (Sinusoid, Sinusoid) {
    let c = spectrum[bin];
    let cg = c.conj();
    let a_n = (c + cg).re / num_samples;
    let b_n = (Complex::i() * (c - cg)).re / num_samples;
    let frequency = (2 * bin) as f64 / num_samples * nyquist;
    (
        Sinusoid::new(frequency, a_n, COSINE_PHASE),
        Sinusoid::new(frequency, b_n, 0.0),
    )
}

impl Wave {
    /// Recover a symbolic wave from a real sample buffer
    ///
    /// The DC bin becomes a single component at frequency 0 with
    /// amplitude `Re(bin0) / N`; every non-DC, non-Nyquist bin becomes
    /// a cosine-phase and a sine-phase component at `bin * rate / N`;
    /// an even `N` contributes the Nyquist cosine component. The
    /// resulting wave resamples to the original buffer on the same
    /// timestamp grid.
    ///
    /// A `tolerance` below `-0.5` is a sentinel that skips the final
    /// zero-amplitude filtering; otherwise near-silent components are
    /// dropped at the given (or configured) tolerance.
    ///
    /// `parallelism` > 1 fans the per-bin coefficient extraction out
    /// over that many workers; the call itself remains blocking.
    pub fn from_samples(
        samples: &[f64],
        sample_rate: Option<f64>,
        tolerance: Option<f64>,
        parallelism: usize,
    ) -> Result<Wave> {
        let n = samples.len();
        if n == 0 {
            return Ok(Wave::empty());
        }
        let spectrum = fourier::real_to_complex(samples)?;
        let half_size = spectrum.len();
        let conjugate_size = n - half_size;
        let nyquist = Wave::nyquist_freq(sample_rate);
        let nf = n as f64;

        let pairs: Vec<(Sinusoid, Sinusoid)> = if parallelism > 1 && conjugate_size > 0 {
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(parallelism)
                .build()
                .map_err(|e| ResonaError::Fft {
                    reason: e.to_string(),
                })?;
            pool.install(|| {
                (1..=conjugate_size)
                    .into_par_iter()
                    .map(|bin| bin_components(&spectrum, bin, nf, nyquist))
                    .collect()
            })
        } else {
            (1..=conjugate_size)
                .map(|bin| bin_components(&spectrum, bin, nf, nyquist))
                .collect()
        };

        let mut components = Vec::with_capacity(n);
        components.push(Sinusoid::new(0.0, spectrum[0].re / nf, COSINE_PHASE));
        for (cosine, sine) in pairs {
            components.push(cosine);
            components.push(sine);
        }
        if n % 2 == 0 {
            components.push(Sinusoid::new(
                nyquist,
                spectrum[half_size - 1].re / nf,
                COSINE_PHASE,
            ));
        }
        let wave = Wave::new(components);

        if let Some(t) = tolerance {
            if t < -0.5 {
                return Ok(wave);
            }
        }
        Ok(wave.remove_zero(tolerance))
    }
}
