//! Wave arithmetic
//!
//! Operators work on the symbolic representation, not on samples:
//! addition concatenates component rows, negation flips amplitudes,
//! and multiplication applies the product-to-sum identity
//! `sin(A) * sin(B) = (cos(A - B) - cos(A + B)) / 2` across the full
//! cartesian product of the operands' components. None of the
//! operators reduce their output; chain [`Wave::standardize`] or
//! [`Wave::interfere`] when a canonical result is needed.

use std::f64::consts::FRAC_PI_2;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::config::Config;
use crate::error::{ResonaError, Result};
use crate::numeric::is_close;
use crate::wave::{Sinusoid, Wave, COSINE_PHASE};

impl Wave {
    /// Approximate equality at the given (or configured) tolerance
    ///
    /// Both operands are brought to standard form first, so
    /// structurally different but acoustically identical
    /// representations compare equal.
    pub fn approx_eq(&self, other: &Wave, tolerance: Option<f64>) -> bool {
        let tol = Config::resolve_tolerance(tolerance);
        let lhs = self.standardize(Some(tol));
        let rhs = other.standardize(Some(tol));
        lhs.len() == rhs.len()
            && lhs
                .components()
                .iter()
                .zip(rhs.components())
                .all(|(a, b)| {
                    is_close(a.frequency, b.frequency, tol)
                        && is_close(a.amplitude, b.amplitude, tol)
                        && is_close(a.phase, b.phase, tol)
                })
    }

    /// Exponentiation is not defined for sinusoid sums
    ///
    /// Raising a sum of sinusoids to a power has no closed form in this
    /// representation; the operation fails fast instead of silently
    /// approximating.
    pub fn pow(&self, _exponent: i32) -> Result<Wave> {
        Err(ResonaError::Unsupported {
            operation: "exponentiation of a wave".to_string(),
        })
    }
}

/// Equality at the process-wide default tolerance
impl PartialEq for Wave {
    fn eq(&self, other: &Self) -> bool {
        self.approx_eq(other, None)
    }
}

// ============================================================================
// Negation
// ============================================================================

impl Neg for Wave {
    type Output = Wave;

    fn neg(mut self) -> Wave {
        for row in self.components_mut() {
            row.amplitude = -row.amplitude;
        }
        self
    }
}

// ============================================================================
// Addition
// ============================================================================

impl AddAssign<&Wave> for Wave {
    fn add_assign(&mut self, rhs: &Wave) {
        self.components_mut().extend_from_slice(rhs.components());
    }
}

impl AddAssign<Wave> for Wave {
    fn add_assign(&mut self, rhs: Wave) {
        *self += &rhs;
    }
}

/// Adding a scalar appends a DC-equivalent component
impl AddAssign<f64> for Wave {
    fn add_assign(&mut self, rhs: f64) {
        self.push(Sinusoid::new(0.0, rhs, COSINE_PHASE));
    }
}

impl Add<Wave> for Wave {
    type Output = Wave;

    fn add(mut self, rhs: Wave) -> Wave {
        self += &rhs;
        self
    }
}

impl Add<&Wave> for Wave {
    type Output = Wave;

    fn add(mut self, rhs: &Wave) -> Wave {
        self += rhs;
        self
    }
}

impl Add<f64> for Wave {
    type Output = Wave;

    fn add(mut self, rhs: f64) -> Wave {
        self += rhs;
        self
    }
}

impl Add<Wave> for f64 {
    type Output = Wave;

    fn add(self, mut rhs: Wave) -> Wave {
        rhs += self;
        rhs
    }
}

// ============================================================================
// Subtraction
// ============================================================================

impl SubAssign<&Wave> for Wave {
    fn sub_assign(&mut self, rhs: &Wave) {
        let start = self.len();
        self.components_mut().extend_from_slice(rhs.components());
        for row in &mut self.components_mut()[start..] {
            row.amplitude = -row.amplitude;
        }
    }
}

impl SubAssign<Wave> for Wave {
    fn sub_assign(&mut self, rhs: Wave) {
        *self -= &rhs;
    }
}

impl SubAssign<f64> for Wave {
    fn sub_assign(&mut self, rhs: f64) {
        self.push(Sinusoid::new(0.0, -rhs, COSINE_PHASE));
    }
}

impl Sub<Wave> for Wave {
    type Output = Wave;

    fn sub(mut self, rhs: Wave) -> Wave {
        self -= &rhs;
        self
    }
}

impl Sub<&Wave> for Wave {
    type Output = Wave;

    fn sub(mut self, rhs: &Wave) -> Wave {
        self -= rhs;
        self
    }
}

impl Sub<f64> for Wave {
    type Output = Wave;

    fn sub(mut self, rhs: f64) -> Wave {
        self -= rhs;
        self
    }
}

impl Sub<Wave> for f64 {
    type Output = Wave;

    fn sub(self, rhs: Wave) -> Wave {
        -rhs + self
    }
}

// ============================================================================
// Multiplication
// ============================================================================

/// Product-to-sum expansion over the cartesian product of components
///
/// Each component pair yields a "sum" row at `f_a + f_b` and a
/// "difference" row at `f_a - f_b`, both at half the amplitude
/// product. The cosine terms of the identity fold back into the
/// sine-based row format through a 90-degree phase offset on the rhs
/// phase.
impl Mul<&Wave> for &Wave {
    type Output = Wave;

    fn mul(self, rhs: &Wave) -> Wave {
        let pair_count = self.len() * rhs.len();
        let mut components = Vec::with_capacity(2 * pair_count);
        for b in rhs.components() {
            for a in self.components() {
                components.push(Sinusoid::new(
                    a.frequency + b.frequency,
                    0.5 * a.amplitude * b.amplitude,
                    a.phase + (b.phase + FRAC_PI_2),
                ));
            }
        }
        for b in rhs.components() {
            for a in self.components() {
                components.push(Sinusoid::new(
                    a.frequency - b.frequency,
                    0.5 * a.amplitude * b.amplitude,
                    a.phase - (b.phase + FRAC_PI_2),
                ));
            }
        }
        Wave::new(components)
    }
}

impl Mul<Wave> for Wave {
    type Output = Wave;

    fn mul(self, rhs: Wave) -> Wave {
        &self * &rhs
    }
}

impl Mul<&Wave> for Wave {
    type Output = Wave;

    fn mul(self, rhs: &Wave) -> Wave {
        &self * rhs
    }
}

impl MulAssign<&Wave> for Wave {
    fn mul_assign(&mut self, rhs: &Wave) {
        *self = &*self * rhs;
    }
}

/// Scalar multiplication scales amplitudes directly
impl MulAssign<f64> for Wave {
    fn mul_assign(&mut self, rhs: f64) {
        for row in self.components_mut() {
            row.amplitude *= rhs;
        }
    }
}

impl Mul<f64> for Wave {
    type Output = Wave;

    fn mul(mut self, rhs: f64) -> Wave {
        self *= rhs;
        self
    }
}

impl Mul<Wave> for f64 {
    type Output = Wave;

    fn mul(self, mut rhs: Wave) -> Wave {
        rhs *= self;
        rhs
    }
}

// ============================================================================
// Division
// ============================================================================

impl DivAssign<f64> for Wave {
    fn div_assign(&mut self, rhs: f64) {
        for row in self.components_mut() {
            row.amplitude /= rhs;
        }
    }
}

impl Div<f64> for Wave {
    type Output = Wave;

    fn div(mut self, rhs: f64) -> Wave {
        self /= rhs;
        self
    }
}
