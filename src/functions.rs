//! Built-in mathematical functions for expression evaluation.
//!
//! This module provides the implementation of every function the standard
//! registry exposes to expressions. They are plain `f64` functions with a
//! fixed number of arguments; special inputs (out of domain, infinities, NaN)
//! produce the conventional IEEE results instead of errors.
//!
//! All functions use the `libm` crate, which keeps the crate usable in
//! no_std environments. The few functions libm does not offer (`logb`,
//! `erfinv`, `erfcinv`, NaN aware `max`/`min`) are built on top of it here.

pub use libm::{
    acos, acosh, asin, asinh, atan, atan2, atanh, cbrt, ceil, copysign, cos, cosh, erf, erfc,
    exp, exp2, expm1, floor, fma, hypot, j0, j1, log, log1p, log2, log10, nextafter, pow,
    remainder, round, sin, sinh, sqrt, tan, tanh, trunc, y0, y1,
};

/// Returns a quiet NaN.
pub fn nan() -> f64 {
    f64::NAN
}

/// Absolute value.
pub fn abs(x: f64) -> f64 {
    libm::fabs(x)
}

/// The gamma function Γ(x).
pub fn gamma(x: f64) -> f64 {
    libm::tgamma(x)
}

/// Rounds to the nearest integer, ties to even.
///
/// `rint` rounds in the current rounding mode, which is always
/// round-to-nearest-even for Rust code.
pub fn roundtoeven(x: f64) -> f64 {
    libm::rint(x)
}

/// C `fmod`: the remainder of `x / y` with the sign of `x`.
pub fn fmod(x: f64, y: f64) -> f64 {
    libm::fmod(x, y)
}

/// Positive difference, `max(x - y, 0)`.
///
/// # Special cases
///
/// * `dim(+inf, +inf)` and `dim(-inf, -inf)` are NaN
/// * any NaN argument gives NaN
pub fn dim(x: f64, y: f64) -> f64 {
    let v = x - y;
    if v <= 0.0 {
        // also turns -0 into +0
        return 0.0;
    }
    v
}

/// Binary exponent of `x` as a float.
///
/// # Special cases
///
/// * `logb(±inf)` is `+inf`
/// * `logb(0)` is `-inf`
/// * `logb(NaN)` is NaN
pub fn logb(x: f64) -> f64 {
    if x == 0.0 {
        return f64::NEG_INFINITY;
    }
    if x.is_infinite() {
        return f64::INFINITY;
    }
    if x.is_nan() {
        return x;
    }
    libm::ilogb(x) as f64
}

/// Larger of two values.
///
/// Unlike `f64::max`, NaN is propagated. `+inf` wins over NaN and `+0` is
/// considered larger than `-0`.
pub fn max(x: f64, y: f64) -> f64 {
    if x == f64::INFINITY || y == f64::INFINITY {
        return f64::INFINITY;
    }
    if x.is_nan() || y.is_nan() {
        return f64::NAN;
    }
    if x == 0.0 && x == y {
        return if x.is_sign_negative() { y } else { x };
    }
    if x > y { x } else { y }
}

/// Smaller of two values.
///
/// Unlike `f64::min`, NaN is propagated. `-inf` wins over NaN and `-0` is
/// considered smaller than `+0`.
pub fn min(x: f64, y: f64) -> f64 {
    if x == f64::NEG_INFINITY || y == f64::NEG_INFINITY {
        return f64::NEG_INFINITY;
    }
    if x.is_nan() || y.is_nan() {
        return f64::NAN;
    }
    if x == 0.0 && x == y {
        return if x.is_sign_negative() { x } else { y };
    }
    if x < y { x } else { y }
}

/// Inverse error function.
///
/// # Special cases
///
/// * `erfinv(1)` is `+inf`, `erfinv(-1)` is `-inf`
/// * `erfinv(x)` is NaN if `|x| > 1` or `x` is NaN
pub fn erfinv(x: f64) -> f64 {
    if x.is_nan() || !(-1.0..=1.0).contains(&x) {
        return f64::NAN;
    }
    if x == 1.0 {
        return f64::INFINITY;
    }
    if x == -1.0 {
        return f64::NEG_INFINITY;
    }
    if x == 0.0 {
        return x;
    }

    // Giles' single precision approximation, refined with Newton steps
    // against libm's double precision erf.
    let w = -libm::log((1.0 - x) * (1.0 + x));
    let mut p;
    if w < 5.0 {
        let w = w - 2.5;
        p = 2.810_226_36e-8;
        p = 3.432_739_39e-7 + p * w;
        p = -3.523_387_7e-6 + p * w;
        p = -4.391_506_54e-6 + p * w;
        p = 2.185_808_7e-4 + p * w;
        p = -1.253_725_03e-3 + p * w;
        p = -4.177_681_64e-3 + p * w;
        p = 2.466_407_27e-1 + p * w;
        p = 1.501_409_41 + p * w;
    } else {
        let w = libm::sqrt(w) - 3.0;
        p = -2.002_142_57e-4;
        p = 1.009_505_58e-4 + p * w;
        p = 1.349_343_22e-3 + p * w;
        p = -3.673_428_44e-3 + p * w;
        p = 5.739_507_73e-3 + p * w;
        p = -7.622_461_3e-3 + p * w;
        p = 9.438_870_47e-3 + p * w;
        p = 1.001_674_06 + p * w;
        p = 2.832_976_82 + p * w;
    }
    let mut y = p * x;

    const TWO_OVER_SQRT_PI: f64 = core::f64::consts::FRAC_2_SQRT_PI;
    for _ in 0..3 {
        let slope = TWO_OVER_SQRT_PI * libm::exp(-y * y);
        if slope == 0.0 {
            break;
        }
        let step = (libm::erf(y) - x) / slope;
        y -= step;
        if libm::fabs(step) <= f64::EPSILON * libm::fabs(y) {
            break;
        }
    }
    y
}

/// Inverse complementary error function.
///
/// # Special cases
///
/// * `erfcinv(0)` is `+inf`, `erfcinv(2)` is `-inf`
/// * `erfcinv(x)` is NaN if `x < 0`, `x > 2` or `x` is NaN
pub fn erfcinv(x: f64) -> f64 {
    erfinv(1.0 - x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;

    #[test]
    fn test_logb_special_cases() {
        assert_eq!(logb(8.0), 3.0);
        assert_eq!(logb(0.5), -1.0);
        assert_eq!(logb(-10.0), 3.0);
        assert_eq!(logb(0.0), f64::NEG_INFINITY);
        assert_eq!(logb(f64::NEG_INFINITY), f64::INFINITY);
        assert!(logb(f64::NAN).is_nan());
    }

    #[test]
    fn test_max_min_nan_and_zero_handling() {
        assert!(max(1.0, f64::NAN).is_nan());
        assert!(min(f64::NAN, 1.0).is_nan());
        assert_eq!(max(f64::NAN, f64::INFINITY), f64::INFINITY);
        assert_eq!(min(f64::NEG_INFINITY, f64::NAN), f64::NEG_INFINITY);
        assert!(max(-0.0, 0.0).is_sign_positive());
        assert!(min(0.0, -0.0).is_sign_negative());
        assert_eq!(max(3.0, 7.0), 7.0);
        assert_eq!(min(3.0, 7.0), 3.0);
    }

    #[test]
    fn test_dim() {
        assert_eq!(dim(5.0, 3.0), 2.0);
        assert_eq!(dim(3.0, 5.0), 0.0);
        assert!(dim(f64::INFINITY, f64::INFINITY).is_nan());
        assert!(dim(f64::NAN, 1.0).is_nan());
    }

    #[test]
    fn test_erfinv_inverts_erf() {
        for &v in &[-0.999, -0.7, -0.25, 1e-6, 0.1, 0.5, 0.9, 0.999_999] {
            assert_approx_eq!(erf(erfinv(v)), v, 1e-12);
        }
        assert_approx_eq!(erfinv(erf(0.5)), 0.5, 1e-12);
        assert_eq!(erfinv(1.0), f64::INFINITY);
        assert_eq!(erfinv(-1.0), f64::NEG_INFINITY);
        assert!(erfinv(1.5).is_nan());
        assert!(erfinv(f64::NAN).is_nan());
    }

    #[test]
    fn test_erfcinv() {
        assert_approx_eq!(erfcinv(erfc(0.3)), 0.3, 1e-10);
        assert_eq!(erfcinv(0.0), f64::INFINITY);
        assert_eq!(erfcinv(2.0), f64::NEG_INFINITY);
        assert!(erfcinv(-0.5).is_nan());
    }

    #[test]
    fn test_rounding_family() {
        assert_eq!(round(2.5), 3.0);
        assert_eq!(round(-2.5), -3.0);
        assert_eq!(roundtoeven(2.5), 2.0);
        assert_eq!(roundtoeven(3.5), 4.0);
        assert_eq!(trunc(-2.7), -2.0);
    }

    #[test]
    fn test_gamma_and_mod() {
        assert_approx_eq!(gamma(5.0), 24.0);
        assert_approx_eq!(gamma(0.5), sqrt(core::f64::consts::PI));
        assert_eq!(fmod(7.0, 3.0), 1.0);
        assert_eq!(fmod(-7.0, 3.0), -1.0);
        assert_eq!(remainder(7.0, 4.0), -1.0);
        assert!(nan().is_nan());
    }
}
