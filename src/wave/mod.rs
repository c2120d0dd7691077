//! Symbolic wave representation
//!
//! A [`Wave`] is an ordered list of [`Sinusoid`] components, each
//! contributing `amplitude * sin(2*pi*frequency*t - phase)` to the
//! signal. Waves are plain value types: factories and operators build
//! new waves, canonicalization (see [`canonical`](self)) brings them to
//! a comparable standard form, and sampling evaluates them over a
//! timestamp grid.

mod analysis;
mod canonical;
mod ops;

use serde::{Deserialize, Serialize};
use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::config::Config;
use crate::error::{ResonaError, Result};
use crate::numeric::{alternating_signs, sinc};

/// Phase offset that turns the sine convention into a cosine:
/// sin(x - 3*pi/2) = cos(x)
pub(crate) const COSINE_PHASE: f64 = 1.5 * PI;

/// One sinusoid component: `amplitude * sin(2*pi*frequency*t - phase)`
///
/// In canonical form (after parameter standardization) the amplitude is
/// non-negative, the frequency is non-negative, the phase lies in
/// `[0, 2*pi)`, and a silent component is exactly `(0, 0, 0)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Sinusoid {
    /// Frequency in Hz
    pub frequency: f64,
    /// Peak amplitude; may be transiently negative before standardization
    pub amplitude: f64,
    /// Phase in radians
    pub phase: f64,
}

impl Sinusoid {
    /// Create a component from its (frequency, amplitude, phase) triple
    pub fn new(frequency: f64, amplitude: f64, phase: f64) -> Self {
        Self {
            frequency,
            amplitude,
            phase,
        }
    }

    /// Evaluate this component at time `t` (seconds)
    #[inline]
    pub fn evaluate(&self, t: f64) -> f64 {
        self.amplitude * (self.frequency * (t * TAU) - self.phase).sin()
    }

    /// Column access by index: 0 = frequency, 1 = amplitude, 2 = phase
    ///
    /// Indices are taken modulo the round-robin used by sorting, so any
    /// index past 1 reads the phase column.
    #[inline]
    pub(crate) fn column(&self, index: usize) -> f64 {
        match index {
            0 => self.frequency,
            1 => self.amplitude,
            _ => self.phase,
        }
    }
}

/// A signal represented as a sum of sinusoid components
///
/// Row order is not semantically significant (the represented signal is
/// the sum over rows) except as a display order after [`Wave::sort`].
/// Operators concatenate or combine rows without reducing them; call
/// [`Wave::standardize`] or [`Wave::interfere`] explicitly when a
/// canonical form is needed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Wave {
    components: Vec<Sinusoid>,
}

impl Wave {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Create a wave from existing components
    pub fn new(components: Vec<Sinusoid>) -> Self {
        Self { components }
    }

    /// Create a wave with no components (identically zero signal)
    pub fn empty() -> Self {
        Self::default()
    }

    /// The null wave: one silent component
    pub fn zero() -> Self {
        Self::new(vec![Sinusoid::new(0.0, 0.0, 0.0)])
    }

    /// The unit wave: one DC-equivalent component of amplitude 1
    pub fn one() -> Self {
        Self::new(vec![Sinusoid::new(0.0, 1.0, COSINE_PHASE)])
    }

    /// A pure sine tone
    ///
    /// # Example
    /// ```
    /// use resona::Wave;
    /// let tone = Wave::sine(440.0, 1.0, 0.0);
    /// assert_eq!(tone.len(), 1);
    /// assert_eq!(tone.components()[0].frequency, 440.0);
    /// ```
    pub fn sine(frequency: f64, amplitude: f64, phase: f64) -> Self {
        Self::new(vec![Sinusoid::new(frequency, amplitude, phase)])
    }

    /// A pure cosine tone (sine with a 270-degree phase offset)
    pub fn cosine(frequency: f64, amplitude: f64, phase: f64) -> Self {
        Self::new(vec![Sinusoid::new(frequency, amplitude, phase + COSINE_PHASE)])
    }

    /// Square-wave approximation from `num_harmonics` odd harmonics
    ///
    /// Fourier series of the unit square wave: harmonics 1, 3, 5, ...
    /// with `(4/pi)/m` amplitude decay.
    pub fn square(frequency: f64, num_harmonics: usize) -> Self {
        let components = (0..num_harmonics)
            .map(|k| {
                let m = (2 * k + 1) as f64;
                Sinusoid::new(m * frequency, (4.0 / PI) / m, 0.0)
            })
            .collect();
        Self::new(components)
    }

    /// Triangle-wave approximation from `num_harmonics` odd harmonics
    ///
    /// Odd harmonics with alternating sign and `(8/pi^2)/m^2` decay.
    pub fn triangle(frequency: f64, num_harmonics: usize) -> Self {
        let components = alternating_signs(num_harmonics, true)
            .enumerate()
            .map(|(k, sign)| {
                let m = (2 * k + 1) as f64;
                Sinusoid::new(m * frequency, sign * 8.0 / (PI * PI * m * m), 0.0)
            })
            .collect();
        Self::new(components)
    }

    /// Sawtooth-wave approximation from `num_harmonics` harmonics
    ///
    /// Every harmonic 1..=n with alternating sign and `(2/pi)/m` decay.
    pub fn sawtooth(frequency: f64, num_harmonics: usize) -> Self {
        let components = alternating_signs(num_harmonics, true)
            .enumerate()
            .map(|(k, sign)| {
                let m = (k + 1) as f64;
                Sinusoid::new(m * frequency, sign * 2.0 / (PI * m), 0.0)
            })
            .collect();
        Self::new(components)
    }

    /// Pulse-train approximation at the given duty cycle
    ///
    /// Row 0 is the DC term `2*duty_cycle - 1`; the remaining
    /// `num_harmonics - 1` rows are sinc-weighted cosine-phase
    /// harmonics. Well-defined for every duty cycle in `[0, 1]`.
    pub fn pulse(frequency: f64, duty_cycle: f64, num_harmonics: usize) -> Self {
        if num_harmonics == 0 {
            return Self::empty();
        }
        let mut components = Vec::with_capacity(num_harmonics);
        components.push(Sinusoid::new(0.0, duty_cycle * 2.0 - 1.0, COSINE_PHASE));
        for k in 1..num_harmonics {
            let m = k as f64;
            components.push(Sinusoid::new(
                m * frequency,
                4.0 * duty_cycle * sinc(m * duty_cycle),
                COSINE_PHASE,
            ));
        }
        Self::new(components)
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// All components in row order
    pub fn components(&self) -> &[Sinusoid] {
        &self.components
    }

    /// Mutable access to the components
    pub fn components_mut(&mut self) -> &mut Vec<Sinusoid> {
        &mut self.components
    }

    /// Number of components
    pub fn len(&self) -> usize {
        self.components.len()
    }

    /// True if the wave has no components
    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Append one component
    pub fn push(&mut self, component: Sinusoid) {
        self.components.push(component);
    }

    /// Frequency column view
    pub fn frequencies(&self) -> impl Iterator<Item = f64> + '_ {
        self.components.iter().map(|s| s.frequency)
    }

    /// Amplitude column view
    pub fn amplitudes(&self) -> impl Iterator<Item = f64> + '_ {
        self.components.iter().map(|s| s.amplitude)
    }

    /// Phase column view
    pub fn phases(&self) -> impl Iterator<Item = f64> + '_ {
        self.components.iter().map(|s| s.phase)
    }

    // ========================================================================
    // Column Reductions
    // ========================================================================

    /// Smallest frequency, `None` for an empty wave
    pub fn min_freq(&self) -> Option<f64> {
        self.frequencies().reduce(f64::min)
    }

    /// Largest frequency, `None` for an empty wave
    pub fn max_freq(&self) -> Option<f64> {
        self.frequencies().reduce(f64::max)
    }

    /// Smallest amplitude, `None` for an empty wave
    pub fn min_amp(&self) -> Option<f64> {
        self.amplitudes().reduce(f64::min)
    }

    /// Largest amplitude, `None` for an empty wave
    pub fn max_amp(&self) -> Option<f64> {
        self.amplitudes().reduce(f64::max)
    }

    /// Smallest phase, `None` for an empty wave
    pub fn min_phase(&self) -> Option<f64> {
        self.phases().reduce(f64::min)
    }

    /// Largest phase, `None` for an empty wave
    pub fn max_phase(&self) -> Option<f64> {
        self.phases().reduce(f64::max)
    }

    /// Twice the highest component frequency: the sample rate needed to
    /// represent this wave without aliasing
    pub fn nyquist_rate(&self) -> Option<f64> {
        self.max_freq().map(|f| f * 2.0)
    }

    /// Half the given (or configured) sample rate
    pub fn nyquist_freq(sample_rate: Option<f64>) -> f64 {
        Config::resolve_sample_rate(sample_rate) / 2.0
    }

    // ========================================================================
    // Sampling
    // ========================================================================

    /// Evenly spaced inclusive timestamp grid over `[0, duration]`
    ///
    /// Produces `round(duration * sample_rate)` points; both endpoints
    /// are included.
    pub fn generate_timestamps(duration: f64, sample_rate: Option<f64>) -> Vec<f64> {
        let rate = Config::resolve_sample_rate(sample_rate);
        let num_samples = (duration * rate).round() as usize;
        match num_samples {
            0 => Vec::new(),
            1 => vec![0.0],
            n => {
                let last = (n - 1) as f64;
                (0..n).map(|i| duration * (i as f64 / last)).collect()
            }
        }
    }

    /// Evaluate the wave at a single time point
    pub fn sample(&self, timestamp: f64) -> f64 {
        self.components.iter().map(|s| s.evaluate(timestamp)).sum()
    }

    /// Evaluate the wave over a timestamp grid, row by row
    pub fn samples(&self, timestamps: &[f64]) -> Vec<f64> {
        let mut result = vec![0.0; timestamps.len()];
        for component in &self.components {
            for (out, &t) in result.iter_mut().zip(timestamps) {
                *out += component.evaluate(t);
            }
        }
        result
    }

    /// Evaluate the wave over a generated grid of the given duration
    pub fn samples_over(&self, duration: f64, sample_rate: Option<f64>) -> Vec<f64> {
        self.samples(&Self::generate_timestamps(duration, sample_rate))
    }

    // ========================================================================
    // Calculus
    // ========================================================================

    /// `n`-th derivative: scale amplitudes by `(2*pi*f)^n` and retard
    /// phases by `n * 90` degrees (negative `n` anti-differentiates)
    pub fn derivative(&self, n: i32) -> Wave {
        let components = self
            .components
            .iter()
            .map(|s| {
                Sinusoid::new(
                    s.frequency,
                    s.amplitude * (s.frequency * TAU).powi(n),
                    s.phase - n as f64 * FRAC_PI_2,
                )
            })
            .collect();
        Wave::new(components)
    }

    /// `n`-th antiderivative
    pub fn integral(&self, n: i32) -> Wave {
        self.derivative(-n)
    }

    // ========================================================================
    // Time Shift
    // ========================================================================

    /// Shift the wave in time by `time_shift` seconds, in place
    pub fn shift_inplace(&mut self, time_shift: f64) {
        for component in &mut self.components {
            component.phase += component.frequency * (time_shift * TAU);
        }
    }

    /// Time-shifted copy
    pub fn shift(&self, time_shift: f64) -> Wave {
        let mut result = self.clone();
        result.shift_inplace(time_shift);
        result
    }

    /// Shift each component by its own offset, in place
    ///
    /// Fails if the offset array length does not match the component
    /// count.
    pub fn shift_each_inplace(&mut self, time_shifts: &[f64]) -> Result<()> {
        if time_shifts.len() != self.components.len() {
            return Err(ResonaError::LengthMismatch {
                context: "per-component time shift",
                expected: self.components.len(),
                actual: time_shifts.len(),
            });
        }
        for (component, &dt) in self.components.iter_mut().zip(time_shifts) {
            component.phase += component.frequency * (dt * TAU);
        }
        Ok(())
    }

    /// Per-component time-shifted copy
    pub fn shift_each(&self, time_shifts: &[f64]) -> Result<Wave> {
        let mut result = self.clone();
        result.shift_each_inplace(time_shifts)?;
        Ok(result)
    }

    // ========================================================================
    // Join
    // ========================================================================

    /// Splice two waves in time with a pulse-train crossfade
    ///
    /// A `[0, 1]`-valued pulse envelope at frequency
    /// `1 / (duration_a + duration_b)` gates `self` on for the first
    /// `duration_a` seconds of each period and `other` for the rest.
    /// The envelope is harmonic-limited, so the seams show Gibbs
    /// ringing that fades as `num_harmonics` grows.
    pub fn join(&self, other: &Wave, duration_a: f64, duration_b: f64, num_harmonics: usize) -> Wave {
        let frequency = 1.0 / (duration_a + duration_b);
        let mut modulator = Wave::pulse(frequency, duration_a * frequency, num_harmonics);
        modulator /= 2.0;
        modulator += 0.5;
        modulator.shift_inplace(duration_a / 2.0);
        let a_contribution = self.clone() * modulator.clone();
        modulator *= -1.0;
        modulator += 1.0;
        let b_contribution = other.clone() * modulator;
        a_contribution + b_contribution
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_and_one() {
        let zero = Wave::zero();
        assert_eq!(zero.len(), 1);
        assert_eq!(zero.components()[0], Sinusoid::new(0.0, 0.0, 0.0));
        assert_relative_eq!(zero.sample(0.37), 0.0);

        // sin(-270 degrees) = 1, so the unit wave is constant 1
        let one = Wave::one();
        assert_relative_eq!(one.sample(0.0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(one.sample(12.9), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_cosine_is_phase_shifted_sine() {
        let cos = Wave::cosine(2.0, 1.0, 0.0);
        assert_relative_eq!(cos.sample(0.0), 1.0, epsilon = 1e-12);
        // Quarter period later the cosine crosses zero
        assert_relative_eq!(cos.sample(0.125), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_square_harmonics() {
        let square = Wave::square(100.0, 5);
        assert_eq!(square.len(), 5);
        let freqs: Vec<f64> = square.frequencies().collect();
        assert_eq!(freqs, vec![100.0, 300.0, 500.0, 700.0, 900.0]);
        assert_relative_eq!(square.components()[0].amplitude, 4.0 / PI);
        assert_relative_eq!(square.components()[2].amplitude, 4.0 / (5.0 * PI));
        // All phases zero, so the sum of sines vanishes at t = 0
        assert_relative_eq!(square.sample(0.0), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_triangle_alternates() {
        let tri = Wave::triangle(10.0, 3);
        let amps: Vec<f64> = tri.amplitudes().collect();
        assert!(amps[0] > 0.0 && amps[1] < 0.0 && amps[2] > 0.0);
        assert_relative_eq!(amps[0], 8.0 / (PI * PI));
        assert_relative_eq!(amps[1], -8.0 / (PI * PI * 9.0));
    }

    #[test]
    fn test_sawtooth_uses_every_harmonic() {
        let saw = Wave::sawtooth(10.0, 4);
        let freqs: Vec<f64> = saw.frequencies().collect();
        assert_eq!(freqs, vec![10.0, 20.0, 30.0, 40.0]);
        assert_relative_eq!(saw.components()[1].amplitude, -1.0 / PI);
    }

    #[test]
    fn test_pulse_dc_term() {
        let pulse = Wave::pulse(2.0, 0.66, 30);
        assert_eq!(pulse.len(), 30);
        assert_relative_eq!(pulse.components()[0].amplitude, 0.32, epsilon = 1e-12);
        assert_eq!(pulse.components()[0].frequency, 0.0);

        // Half duty cycle has no DC component and stays finite
        let half = Wave::pulse(2.0, 0.5, 8);
        assert_relative_eq!(half.components()[0].amplitude, 0.0);
        assert!(half.amplitudes().all(f64::is_finite));
    }

    #[test]
    fn test_generate_timestamps_inclusive() {
        let ts = Wave::generate_timestamps(1.0, Some(5.0));
        assert_eq!(ts.len(), 5);
        assert_eq!(ts[0], 0.0);
        assert_eq!(ts[4], 1.0);
        assert_relative_eq!(ts[1], 0.25);
    }

    #[test]
    fn test_generate_timestamps_degenerate() {
        assert!(Wave::generate_timestamps(0.0, Some(44100.0)).is_empty());
        assert_eq!(Wave::generate_timestamps(1.0, Some(1.0)), vec![0.0]);
    }

    #[test]
    fn test_sample_sums_components() {
        let wave = Wave::sine(1.0, 1.0, 0.0) + Wave::sine(2.0, 0.5, 0.0);
        let t = 0.1;
        let expected = (TAU * 0.1).sin() + 0.5 * (TAU * 0.2).sin();
        assert_relative_eq!(wave.sample(t), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_samples_matches_pointwise_sample() {
        let wave = Wave::square(3.0, 4);
        let ts = Wave::generate_timestamps(1.0, Some(64.0));
        let vectorized = wave.samples(&ts);
        for (i, &t) in ts.iter().enumerate() {
            assert_relative_eq!(vectorized[i], wave.sample(t), epsilon = 1e-12);
        }
    }

    #[test]
    fn test_empty_wave_is_silent() {
        let empty = Wave::empty();
        assert_eq!(empty.sample(1.0), 0.0);
        assert_eq!(empty.samples(&[0.0, 0.5]), vec![0.0, 0.0]);
        assert_eq!(empty.max_freq(), None);
    }

    #[test]
    fn test_derivative_scales_and_shifts() {
        let wave = Wave::sine(2.0, 1.0, 0.0);
        let d = wave.derivative(1);
        assert_relative_eq!(d.components()[0].amplitude, TAU * 2.0);
        assert_relative_eq!(d.components()[0].phase, -FRAC_PI_2);
        // d/dt sin(2*pi*f*t) = 2*pi*f*cos(2*pi*f*t)
        assert_relative_eq!(d.sample(0.0), TAU * 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_integral_inverts_derivative() {
        let wave = Wave::sine(3.0, 2.0, 1.0);
        let back = wave.derivative(1).integral(1);
        assert_relative_eq!(back.components()[0].amplitude, 2.0, epsilon = 1e-12);
        assert_relative_eq!(back.components()[0].phase, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_shift_moves_signal_in_time() {
        let wave = Wave::sine(1.0, 1.0, 0.0);
        let shifted = wave.shift(0.25);
        // A positive shift delays the waveform: shifted(t) = w(t - dt)
        assert_relative_eq!(shifted.sample(0.25), wave.sample(0.0), epsilon = 1e-12);
    }

    #[test]
    fn test_shift_each_validates_length() {
        let mut wave = Wave::square(1.0, 3);
        assert!(wave.shift_each_inplace(&[0.1, 0.2]).is_err());
        assert!(wave.shift_each_inplace(&[0.1, 0.2, 0.3]).is_ok());
    }

    #[test]
    fn test_join_gates_between_waves() {
        let a = Wave::cosine(0.2, 1.0, 0.0);
        let b = Wave::sine(0.4, 1.0, 0.0);
        let joined = a.join(&b, 10.0, 5.0, 100);
        // Deep inside the first segment the joined wave tracks `a`
        assert_relative_eq!(joined.sample(3.0), a.sample(3.0), epsilon = 0.05);
        // Deep inside the second segment it tracks `b`
        assert_relative_eq!(joined.sample(12.0), b.sample(12.0), epsilon = 0.05);
    }

    #[test]
    fn test_nyquist_helpers() {
        let wave = Wave::square(100.0, 5);
        assert_eq!(wave.max_freq(), Some(900.0));
        assert_eq!(wave.nyquist_rate(), Some(1800.0));
        assert_eq!(Wave::nyquist_freq(Some(44100.0)), 22050.0);
    }
}
