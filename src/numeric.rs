//! Numeric kernel
//!
//! Elementary pointwise functions and tolerance-based comparisons the
//! wave engine is built on. Everything here is a pure function, generic
//! over single/double precision via `num_traits::Float`.

use num_traits::float::FloatConst;
use num_traits::Float;

#[inline]
fn half<T: Float>() -> T {
    T::one() / (T::one() + T::one())
}

/// Sign function: -1, 0, or 1
#[inline]
pub fn sign<T: Float>(x: T) -> T {
    if x == T::zero() {
        T::zero()
    } else if x < T::zero() {
        -T::one()
    } else {
        T::one()
    }
}

/// Heaviside step function, with step(0) = 1/2
#[inline]
pub fn step<T: Float>(x: T) -> T {
    if x == T::zero() {
        half()
    } else if x > T::zero() {
        T::one()
    } else {
        T::zero()
    }
}

/// Rectangle function: 1 inside |x| < 1/2, 1/2 on the edges, 0 outside
#[inline]
pub fn rect<T: Float>(x: T) -> T {
    let abs_x = x.abs();
    if abs_x == half() {
        half()
    } else if abs_x < half() {
        T::one()
    } else {
        T::zero()
    }
}

/// Triangle function: 1 - |x| inside |x| < 1, 0 outside
#[inline]
pub fn tri<T: Float>(x: T) -> T {
    let abs_x = x.abs();
    if abs_x < T::one() {
        T::one() - abs_x
    } else {
        T::zero()
    }
}

/// Unit-area Gaussian: exp(-pi * x^2)
#[inline]
pub fn gauss<T: Float + FloatConst>(x: T) -> T {
    (-T::PI() * x * x).exp()
}

/// Hann window on |x| < 1/2: cos^2(pi * x), 0 outside
#[inline]
pub fn hann<T: Float + FloatConst>(x: T) -> T {
    if x.abs() < half() {
        let c = (x * T::PI()).cos();
        c * c
    } else {
        T::zero()
    }
}

/// Normalized sinc: sin(pi * x) / (pi * x), with sinc(0) = 1
#[inline]
pub fn sinc<T: Float + FloatConst>(x: T) -> T {
    if x == T::zero() {
        return T::one();
    }
    let x_pi = x * T::PI();
    x_pi.sin() / x_pi
}

/// Modulus with the sign of the divisor
///
/// `posmod(a, b)` lies in `[0, b)` for positive `b`, which makes it the
/// canonical phase-wrapping primitive.
#[inline]
pub fn posmod<T: Float>(a: T, b: T) -> T {
    let mut m = a % b;
    if (m < T::zero() && b > T::zero()) || (m > T::zero() && b < T::zero()) {
        m = m + b;
    }
    m
}

/// Near-zero test: |a| < tolerance
#[inline]
pub fn is_zero<T: Float>(a: T, tolerance: T) -> bool {
    a.abs() < tolerance
}

/// Near-equality test: |a - b| < tolerance
#[inline]
pub fn is_close<T: Float>(a: T, b: T, tolerance: T) -> bool {
    (a - b).abs() < tolerance
}

/// Alternating unit signs: +1, -1, +1, ... (or -1, +1, ... )
pub fn alternating_signs(len: usize, start_positive: bool) -> impl Iterator<Item = f64> {
    let first: f64 = if start_positive { 1.0 } else { -1.0 };
    (0..len).map(move |i| if i % 2 == 0 { first } else { -first })
}

/// Linearly rescale values from `[old_min, old_max]` to `[new_min, new_max]`
///
/// When the old bounds are not given they are taken from the data
/// itself. A degenerate old range leaves the values untouched.
pub fn rescale<T: Float>(
    values: &mut [T],
    new_min: T,
    new_max: T,
    old_min: Option<T>,
    old_max: Option<T>,
) {
    if values.is_empty() {
        return;
    }
    let min_val = old_min.unwrap_or_else(|| values.iter().copied().fold(T::infinity(), T::min));
    let max_val =
        old_max.unwrap_or_else(|| values.iter().copied().fold(T::neg_infinity(), T::max));
    let old_span = max_val - min_val;
    if old_span == T::zero() {
        return;
    }
    let new_span = new_max - new_min;
    for v in values.iter_mut() {
        *v = (*v - min_val) / old_span * new_span + new_min;
    }
}
