// SPDX-License-Identifier: MIT
// Copyright (c) 2021 Marceline Cramer

//! Scalar primitives shared by every noise engine.
//!
//! All engines are written once against [`NoiseFloat`], which is implemented
//! for `f32` and `f64`. Numeric constants live as `f64` in the module that
//! uses them and are brought into the working precision with
//! [`NoiseFloat::lit`], so both precisions always see the same value.

use num_traits::Float;
use std::fmt::Debug;
use std::ops::{AddAssign, MulAssign};

pub trait NoiseFloat: Float + AddAssign + MulAssign + Debug + Default + Send + Sync + 'static {
    /// Converts an `f64` constant into this precision.
    fn lit(v: f64) -> Self;

    /// Converts a lattice coordinate into this precision.
    fn from_i32(v: i32) -> Self;

    /// Truncates toward zero. Out-of-range values saturate and NaN maps to 0.
    fn trunc_i32(self) -> i32;

    #[inline]
    fn fast_floor(self) -> i32 {
        let xi = self.trunc_i32();
        if self < Self::from_i32(xi) {
            xi.wrapping_sub(1)
        } else {
            xi
        }
    }
}

macro_rules! impl_noise_float {
    ($t:ty) => {
        impl NoiseFloat for $t {
            #[inline(always)]
            fn lit(v: f64) -> Self {
                v as $t
            }

            #[inline(always)]
            fn from_i32(v: i32) -> Self {
                v as $t
            }

            #[inline(always)]
            fn trunc_i32(self) -> i32 {
                self as i32
            }
        }
    };
}

impl_noise_float!(f32);
impl_noise_float!(f64);

/// Floor that is correct for negative inputs: `fast_floor(x) <= x < fast_floor(x) + 1`.
///
/// Coordinates beyond the `i32` range saturate; precision loss at very large
/// magnitudes is accepted.
#[inline]
pub fn fast_floor<T: NoiseFloat>(x: T) -> i32 {
    x.fast_floor()
}

/// Quintic smoothstep `6t^5 - 15t^4 + 10t^3`.
///
/// First and second derivatives vanish at `t = 0` and `t = 1`, which keeps
/// interpolated noise C2-continuous across cell boundaries.
#[inline]
pub fn fade<T: NoiseFloat>(t: T) -> T {
    t * t * t * (t * (t * T::lit(6.0) - T::lit(15.0)) + T::lit(10.0))
}

/// Unclamped linear interpolation.
#[inline]
pub fn lerp<T: NoiseFloat>(a: T, b: T, t: T) -> T {
    a + t * (b - a)
}

/// Splits a coordinate into its lattice cell and the offset inside that cell.
#[inline]
pub(crate) fn cell<T: NoiseFloat>(x: T) -> (i32, T) {
    let i = x.fast_floor();
    (i, x - T::from_i32(i))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_handles_negatives() {
        assert_eq!(fast_floor(-0.5f32), -1);
        assert_eq!(fast_floor(-1.0f32), -1);
        assert_eq!(fast_floor(-1.000_1f64), -2);
        assert_eq!(fast_floor(0.0f32), 0);
        assert_eq!(fast_floor(2.999f64), 2);
        assert_eq!(fast_floor(3.0f32), 3);
    }

    #[test]
    fn floor_brackets_input() {
        let mut x = -50.0f64;
        while x < 50.0 {
            let f = f64::from(fast_floor(x));
            assert!(f <= x && x < f + 1.0, "{} floored to {}", x, f);
            x += 0.173;
        }
    }

    #[test]
    fn floor_never_panics_on_non_finite() {
        fast_floor(f32::NAN);
        fast_floor(f32::INFINITY);
        fast_floor(f64::NEG_INFINITY);
        fast_floor(-3.0e12f64);
    }

    #[test]
    fn fade_endpoints() {
        assert_eq!(fade(0.0f32), 0.0);
        assert_eq!(fade(1.0f32), 1.0);
        assert_eq!(fade(0.0f64), 0.0);
        assert_eq!(fade(1.0f64), 1.0);
        let mid = fade(0.5f32);
        assert!((0.45..=0.55).contains(&mid));
    }

    #[test]
    fn fade_is_flat_at_the_ends() {
        let h = 1e-4f64;
        let d0 = (fade(h) - fade(0.0)) / h;
        let d1 = (fade(1.0) - fade(1.0 - h)) / h;
        assert!(d0.abs() < 1e-6);
        assert!(d1.abs() < 1e-6);
    }

    #[test]
    fn fade_is_monotonic() {
        let mut prev = fade(0.0f32);
        for i in 1..=100 {
            let v = fade(i as f32 / 100.0);
            assert!(v >= prev);
            prev = v;
        }
    }

    #[test]
    fn lerp_does_not_clamp() {
        assert_eq!(lerp(0.0f32, 10.0, 0.25), 2.5);
        assert_eq!(lerp(0.0f64, 10.0, 1.5), 15.0);
        assert_eq!(lerp(2.0f32, 4.0, -1.0), 0.0);
    }

    #[test]
    fn cell_splits_coordinate() {
        let (i, f) = cell(-2.25f32);
        assert_eq!(i, -3);
        assert!((f - 0.75).abs() < 1e-6);
    }
}
