//! Canonicalization, interference reduction, sorting, and filtering
//!
//! Structurally different component lists can represent the same
//! signal. The operations here bring a wave to its standard form:
//! parameter standardization enforces the per-row invariants,
//! interference reduction merges physically coincident rows, and the
//! frequency sort fixes the display order. Equality testing is defined
//! over that standard form.

use std::cmp::Ordering;
use std::f64::consts::{PI, TAU};

use crate::config::Config;
use crate::error::{ResonaError, Result};
use crate::numeric::{is_close, is_zero, posmod};
use crate::wave::{Sinusoid, Wave};

impl Wave {
    // ========================================================================
    // Parameter Standardization
    // ========================================================================

    /// Enforce the per-row invariants in place
    ///
    /// Row by row: a near-zero amplitude silences the whole row to
    /// `(0, 0, 0)`; a negative amplitude flips into a `pi` phase
    /// offset; a negative frequency reflects the phase
    /// (`sin(-f*x - p) = sin(f*x - (pi - p))`); finally the phase is
    /// wrapped into `[0, 2*pi)` with near-0 and near-`2*pi` values
    /// snapped to 0.
    pub fn standardize_params_inplace(&mut self, tolerance: Option<f64>) {
        let tol = Config::resolve_tolerance(tolerance);
        for row in self.components_mut() {
            if is_zero(row.amplitude, tol) {
                *row = Sinusoid::new(0.0, 0.0, 0.0);
                continue;
            } else if row.amplitude < 0.0 {
                row.amplitude = -row.amplitude;
                row.phase += PI;
            }
            if is_zero(row.frequency, tol) {
                row.frequency = 0.0;
            } else if row.frequency < 0.0 {
                row.frequency = -row.frequency;
                row.phase = PI - row.phase;
            }
            row.phase = posmod(row.phase, TAU);
            if is_zero(row.phase, tol) || is_close(row.phase, TAU, tol) {
                row.phase = 0.0;
            }
        }
    }

    /// Standardized copy; see [`Wave::standardize_params_inplace`]
    pub fn standardize_params(&self, tolerance: Option<f64>) -> Wave {
        let mut result = self.clone();
        result.standardize_params_inplace(tolerance);
        result
    }

    // ========================================================================
    // Interference Reduction
    // ========================================================================

    /// Merge same-frequency components that are in phase or in
    /// antiphase
    ///
    /// After dropping silent rows and standardizing, every ordered pair
    /// `(i, j)` with `i > j` is tested for coincidence: equal frequency
    /// and either equal phase (constructive) or phases `pi` apart
    /// (destructive). The earliest row of each coincidence class
    /// survives, carrying its own amplitude plus/minus the amplitudes
    /// of all later coincident rows; the later rows, and any row whose
    /// merged amplitude vanishes, are dropped.
    ///
    /// Quadratic in the component count, which is acceptable at the
    /// component counts realistic waves carry.
    ///
    /// # Example
    /// ```
    /// use resona::Wave;
    /// let doubled = Wave::sine(440.0, 1.0, 0.0) + Wave::sine(440.0, 1.0, 0.0);
    /// let reduced = doubled.interfere(None);
    /// assert_eq!(reduced.len(), 1);
    /// assert_eq!(reduced.components()[0].amplitude, 2.0);
    /// ```
    pub fn interfere(&self, tolerance: Option<f64>) -> Wave {
        if self.len() <= 1 {
            return self.clone();
        }
        let tol = Config::resolve_tolerance(tolerance);
        let mut reduced = self.remove_zero(Some(tol));
        if reduced.len() <= 1 {
            return reduced;
        }
        reduced.standardize_params_inplace(Some(tol));

        let rows = reduced.components();
        let n = rows.len();
        let amplitudes: Vec<f64> = rows.iter().map(|s| s.amplitude).collect();
        let mut merged = amplitudes.clone();
        let mut matched_earlier = vec![false; n];
        for i in 1..n {
            for j in 0..i {
                if !is_close(rows[i].frequency, rows[j].frequency, tol) {
                    continue;
                }
                if is_close(rows[i].phase, rows[j].phase, tol) {
                    merged[j] += amplitudes[i];
                    matched_earlier[i] = true;
                } else if is_close(rows[i].phase, posmod(rows[j].phase - PI, TAU), tol) {
                    merged[j] -= amplitudes[i];
                    matched_earlier[i] = true;
                }
            }
        }

        let components = rows
            .iter()
            .enumerate()
            .filter(|(i, _)| !matched_earlier[*i] && !is_zero(merged[*i], tol))
            .map(|(i, s)| Sinusoid::new(s.frequency, merged[i], s.phase))
            .collect();
        Wave::new(components)
    }

    /// Full standardization: interference reduction, parameter
    /// standardization, and an ascending frequency sort
    ///
    /// The result is the standard form used by equality testing.
    pub fn standardize(&self, tolerance: Option<f64>) -> Wave {
        let mut result = self.interfere(tolerance);
        result.standardize_params_inplace(tolerance);
        result.sort_unchecked(0, true, Config::resolve_tolerance(tolerance))
    }

    // ========================================================================
    // Sorting
    // ========================================================================

    /// Stable sort keyed on one column with round-robin tie-breaking
    ///
    /// `column` selects the primary key: 0 = frequency, 1 = amplitude,
    /// 2 = phase; anything else is an error. Values within tolerance of
    /// each other count as ties and fall through to the next column
    /// (wrapping around), so near-duplicate rows keep their relative
    /// order.
    pub fn sort(&self, column: usize, ascending: bool, tolerance: Option<f64>) -> Result<Wave> {
        if column > 2 {
            return Err(ResonaError::ColumnOutOfRange { column });
        }
        Ok(self.sort_unchecked(column, ascending, Config::resolve_tolerance(tolerance)))
    }

    /// Sort ascending (or descending) by frequency
    pub fn sort_by_freq(&self, ascending: bool, tolerance: Option<f64>) -> Wave {
        self.sort_unchecked(0, ascending, Config::resolve_tolerance(tolerance))
    }

    /// Sort ascending (or descending) by amplitude
    pub fn sort_by_amp(&self, ascending: bool, tolerance: Option<f64>) -> Wave {
        self.sort_unchecked(1, ascending, Config::resolve_tolerance(tolerance))
    }

    /// Sort ascending (or descending) by phase
    pub fn sort_by_phase(&self, ascending: bool, tolerance: Option<f64>) -> Wave {
        self.sort_unchecked(2, ascending, Config::resolve_tolerance(tolerance))
    }

    fn sort_unchecked(&self, column: usize, ascending: bool, tol: f64) -> Wave {
        if self.len() <= 1 {
            return self.clone();
        }
        let mut rows = self.components().to_vec();
        rows.sort_by(|a, b| {
            for offset in 0..3 {
                let col = (column + offset) % 3;
                let (x, y) = (a.column(col), b.column(col));
                if !is_close(x, y, tol) {
                    let ord = x.partial_cmp(&y).unwrap_or(Ordering::Equal);
                    return if ascending { ord } else { ord.reverse() };
                }
            }
            Ordering::Equal
        });
        Wave::new(rows)
    }

    // ========================================================================
    // Filtering
    // ========================================================================

    /// Keep the rows selected by a boolean mask
    ///
    /// Fails if the mask length does not match the component count.
    pub fn filter(&self, keep_mask: &[bool]) -> Result<Wave> {
        if keep_mask.len() != self.len() {
            return Err(ResonaError::LengthMismatch {
                context: "filter mask",
                expected: self.len(),
                actual: keep_mask.len(),
            });
        }
        let components = self
            .components()
            .iter()
            .zip(keep_mask)
            .filter(|(_, &keep)| keep)
            .map(|(s, _)| *s)
            .collect();
        Ok(Wave::new(components))
    }

    /// Drop rows with near-zero amplitude
    pub fn remove_zero(&self, tolerance: Option<f64>) -> Wave {
        let tol = Config::resolve_tolerance(tolerance);
        Wave::new(
            self.components()
                .iter()
                .filter(|s| s.amplitude.abs() > tol)
                .copied()
                .collect(),
        )
    }

    /// Drop rows with near-zero frequency (DC/bias terms)
    pub fn remove_bias(&self, tolerance: Option<f64>) -> Wave {
        let tol = Config::resolve_tolerance(tolerance);
        Wave::new(
            self.components()
                .iter()
                .filter(|s| s.frequency.abs() > tol)
                .copied()
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_standardize_params_silences_small_amplitudes() {
        let mut wave = Wave::new(vec![Sinusoid::new(440.0, 1e-5, 2.0)]);
        wave.standardize_params_inplace(None);
        assert_eq!(wave.components()[0], Sinusoid::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn test_standardize_params_flips_negative_amplitude() {
        let mut wave = Wave::new(vec![Sinusoid::new(2.0, -1.0, 0.0)]);
        wave.standardize_params_inplace(None);
        let row = wave.components()[0];
        assert_eq!(row.amplitude, 1.0);
        assert_relative_eq!(row.phase, PI);
        // Same signal either way
        assert_relative_eq!(
            wave.sample(0.1),
            Wave::sine(2.0, -1.0, 0.0).sample(0.1),
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_standardize_params_folds_negative_frequency() {
        let original = Wave::sine(-3.0, 1.0, 0.7);
        let standardized = original.standardize_params(None);
        let row = standardized.components()[0];
        assert_eq!(row.frequency, 3.0);
        assert!(row.amplitude >= 0.0);
        assert!((0.0..TAU).contains(&row.phase));
        for &t in &[0.0, 0.13, 0.77] {
            assert_relative_eq!(standardized.sample(t), original.sample(t), epsilon = 1e-9);
        }
    }

    #[test]
    fn test_standardize_params_wraps_phase() {
        let mut wave = Wave::new(vec![Sinusoid::new(1.0, 1.0, TAU + 0.5)]);
        wave.standardize_params_inplace(None);
        assert_relative_eq!(wave.components()[0].phase, 0.5, epsilon = 1e-12);

        let mut near_tau = Wave::new(vec![Sinusoid::new(1.0, 1.0, TAU - 1e-5)]);
        near_tau.standardize_params_inplace(None);
        assert_eq!(near_tau.components()[0].phase, 0.0);
    }

    #[test]
    fn test_standardize_params_idempotent() {
        let wave = Wave::new(vec![
            Sinusoid::new(-3.0, -2.0, 9.0),
            Sinusoid::new(1.0, 1e-9, 0.3),
            Sinusoid::new(5.0, 0.5, -0.2),
        ]);
        let once = wave.standardize_params(None);
        let twice = once.standardize_params(None);
        assert_eq!(once.components(), twice.components());
    }

    #[test]
    fn test_interfere_constructive() {
        let wave = Wave::sine(440.0, 0.3, 1.0) + Wave::sine(440.0, 0.5, 1.0);
        let reduced = wave.interfere(None);
        assert_eq!(reduced.len(), 1);
        assert_relative_eq!(reduced.components()[0].amplitude, 0.8, epsilon = 1e-12);
        assert_relative_eq!(reduced.components()[0].phase, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_interfere_destructive_cancellation() {
        // Identical frequency and amplitude, phases exactly pi apart
        let wave = Wave::sine(440.0, 1.0, 0.5) + Wave::sine(440.0, 1.0, 0.5 + PI);
        let reduced = wave.interfere(None);
        assert!(reduced.is_empty());
    }

    #[test]
    fn test_interfere_partial_cancellation() {
        let wave = Wave::sine(440.0, 1.0, 0.5) + Wave::sine(440.0, 0.25, 0.5 + PI);
        let reduced = wave.interfere(None);
        assert_eq!(reduced.len(), 1);
        assert_relative_eq!(reduced.components()[0].amplitude, 0.75, epsilon = 1e-12);
    }

    #[test]
    fn test_interfere_keeps_distinct_frequencies() {
        let wave = Wave::sine(440.0, 1.0, 0.0) + Wave::sine(441.0, 1.0, 0.0);
        assert_eq!(wave.interfere(None).len(), 2);
    }

    #[test]
    fn test_interfere_merges_chains_once() {
        // Three coincident rows collapse into the earliest one
        let wave =
            Wave::sine(10.0, 1.0, 0.2) + Wave::sine(10.0, 2.0, 0.2) + Wave::sine(10.0, 4.0, 0.2);
        let reduced = wave.interfere(None);
        assert_eq!(reduced.len(), 1);
        assert_relative_eq!(reduced.components()[0].amplitude, 7.0, epsilon = 1e-12);
    }

    #[test]
    fn test_interfere_drops_silent_rows() {
        let wave = Wave::sine(10.0, 1e-9, 0.0) + Wave::sine(20.0, 1.0, 0.0);
        let reduced = wave.interfere(None);
        assert_eq!(reduced.len(), 1);
        assert_eq!(reduced.components()[0].frequency, 20.0);
    }

    #[test]
    fn test_standardize_sorts_by_frequency() {
        let wave = Wave::sine(300.0, 1.0, 0.0) + Wave::sine(100.0, 1.0, 0.0) + Wave::sine(200.0, 1.0, 0.0);
        let standard = wave.standardize(None);
        let freqs: Vec<f64> = standard.frequencies().collect();
        assert_eq!(freqs, vec![100.0, 200.0, 300.0]);
    }

    #[test]
    fn test_standardize_idempotent() {
        let wave = Wave::sine(100.0, -1.0, 3.0)
            + Wave::sine(100.0, 0.5, 3.0 + PI)
            + Wave::sine(-40.0, 2.0, 0.1);
        let once = wave.standardize(None);
        let twice = once.standardize(None);
        assert_eq!(once.len(), twice.len());
        for (a, b) in once.components().iter().zip(twice.components()) {
            assert_relative_eq!(a.frequency, b.frequency, epsilon = 1e-9);
            assert_relative_eq!(a.amplitude, b.amplitude, epsilon = 1e-9);
            assert_relative_eq!(a.phase, b.phase, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_sort_rejects_bad_column() {
        let wave = Wave::square(10.0, 3);
        assert!(matches!(
            wave.sort(3, true, None),
            Err(ResonaError::ColumnOutOfRange { column: 3 })
        ));
    }

    #[test]
    fn test_sort_descending() {
        let wave = Wave::square(10.0, 3);
        let sorted = wave.sort(0, false, None).unwrap();
        let freqs: Vec<f64> = sorted.frequencies().collect();
        assert_eq!(freqs, vec![50.0, 30.0, 10.0]);
    }

    #[test]
    fn test_sort_tie_break_round_robin() {
        // Equal frequencies within tolerance: amplitude decides
        let wave = Wave::new(vec![
            Sinusoid::new(100.0, 2.0, 0.0),
            Sinusoid::new(100.0, 1.0, 0.0),
        ]);
        let sorted = wave.sort(0, true, None).unwrap();
        assert_eq!(sorted.components()[0].amplitude, 1.0);
        assert_eq!(sorted.components()[1].amplitude, 2.0);
    }

    #[test]
    fn test_sort_is_fixed_point_and_stable() {
        let wave = Wave::new(vec![
            Sinusoid::new(100.0, 1.0, 0.2),
            Sinusoid::new(100.0001, 1.0, 0.2),
            Sinusoid::new(50.0, 1.0, 0.0),
        ]);
        let once = wave.sort(0, true, None).unwrap();
        let twice = once.sort(0, true, None).unwrap();
        assert_eq!(once.components(), twice.components());
        // The two near-equal rows keep their original relative order
        assert_eq!(once.components()[1].frequency, 100.0);
        assert_eq!(once.components()[2].frequency, 100.0001);
    }

    #[test]
    fn test_filter_mask_length_checked() {
        let wave = Wave::square(10.0, 3);
        assert!(wave.filter(&[true, false]).is_err());
        let kept = wave.filter(&[true, false, true]).unwrap();
        let freqs: Vec<f64> = kept.frequencies().collect();
        assert_eq!(freqs, vec![10.0, 50.0]);
    }

    #[test]
    fn test_remove_zero_and_bias() {
        let wave = Wave::new(vec![
            Sinusoid::new(0.0, 0.5, 0.0),
            Sinusoid::new(100.0, 1e-9, 0.0),
            Sinusoid::new(200.0, 1.0, 0.0),
        ]);
        assert_eq!(wave.remove_zero(None).len(), 2);
        let unbiased = wave.remove_bias(None);
        assert_eq!(unbiased.len(), 2);
        assert!(unbiased.frequencies().all(|f| f > 0.0));
    }
}
