//! Fourier bridge
//!
//! Thin wrapper over the `realfft` planner: a real sample sequence goes
//! to its non-redundant half spectrum and back, plus a helper that
//! rebuilds the conjugate-symmetric (hermitian) full spectrum from the
//! half. All transforms are synchronous and blocking.

use num_complex::Complex;
use realfft::RealFftPlanner;

use crate::error::{ResonaError, Result};

/// Forward real-to-complex FFT
///
/// Returns the `len/2 + 1` non-redundant half-spectrum bins, unscaled
/// (bin 0 carries `sum(samples)`). An empty input yields an empty
/// spectrum.
pub fn real_to_complex(samples: &[f64]) -> Result<Vec<Complex<f64>>> {
    if samples.is_empty() {
        return Ok(Vec::new());
    }
    let mut planner = RealFftPlanner::<f64>::new();
    let r2c = planner.plan_fft_forward(samples.len());
    let mut input = samples.to_vec();
    let mut spectrum = r2c.make_output_vec();
    r2c.process(&mut input, &mut spectrum)
        .map_err(|e| ResonaError::Fft {
            reason: e.to_string(),
        })?;
    Ok(spectrum)
}

/// Inverse complex-to-real FFT
///
/// `spectrum` must hold the `len/2 + 1` half-spectrum bins for a real
/// signal of `len` samples. The output is scaled by `1/len` so that it
/// inverts [`real_to_complex`].
pub fn complex_to_real(spectrum: &[Complex<f64>], len: usize) -> Result<Vec<f64>> {
    if len == 0 && spectrum.is_empty() {
        return Ok(Vec::new());
    }
    let expected = len / 2 + 1;
    if spectrum.len() != expected {
        return Err(ResonaError::LengthMismatch {
            context: "half spectrum",
            expected,
            actual: spectrum.len(),
        });
    }
    let mut planner = RealFftPlanner::<f64>::new();
    let c2r = planner.plan_fft_inverse(len);
    let mut input = spectrum.to_vec();
    let mut output = c2r.make_output_vec();
    c2r.process(&mut input, &mut output)
        .map_err(|e| ResonaError::Fft {
            reason: e.to_string(),
        })?;
    let scale = 1.0 / len as f64;
    for v in output.iter_mut() {
        *v *= scale;
    }
    Ok(output)
}

/// Rebuild the full hermitian-symmetric spectrum from its half
///
/// The tail of the result is the reversed conjugate of bins
/// `1..=full_len - half.len()`, which is exactly the redundancy a real
/// signal's spectrum carries.
pub fn hermitian_mirror(half: &[Complex<f64>], full_len: usize) -> Result<Vec<Complex<f64>>> {
    let mirrored = full_len.checked_sub(half.len()).ok_or_else(|| {
        ResonaError::LengthMismatch {
            context: "hermitian mirror",
            expected: half.len(),
            actual: full_len,
        }
    })?;
    if mirrored >= half.len() {
        return Err(ResonaError::LengthMismatch {
            context: "hermitian mirror",
            expected: half.len().saturating_sub(1),
            actual: mirrored,
        });
    }
    let mut full = Vec::with_capacity(full_len);
    full.extend_from_slice(half);
    for bin in half[1..=mirrored].iter().rev() {
        full.push(bin.conj());
    }
    Ok(full)
}
