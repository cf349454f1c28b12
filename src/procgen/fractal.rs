// SPDX-License-Identifier: MIT
// Copyright (c) 2021 Marceline Cramer

//! Multi-octave combinators over any base noise function.
//!
//! Each octave samples the base noise at the point scaled by
//! `lacunarity^i` and weights it by `gain^i`.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::scalar::NoiseFloat;

pub const MAX_OCTAVES: u32 = 16;

/// A sample point that can be moved to the next octave's frequency.
pub trait Octave<T>: Copy {
    fn scaled(self, factor: T) -> Self;
}

impl<T: NoiseFloat> Octave<T> for (T, T) {
    #[inline]
    fn scaled(self, f: T) -> Self {
        (self.0 * f, self.1 * f)
    }
}

impl<T: NoiseFloat> Octave<T> for (T, T, T) {
    #[inline]
    fn scaled(self, f: T) -> Self {
        (self.0 * f, self.1 * f, self.2 * f)
    }
}

impl<T: NoiseFloat> Octave<T> for (T, T, T, T) {
    #[inline]
    fn scaled(self, f: T) -> Self {
        (self.0 * f, self.1 * f, self.2 * f, self.3 * f)
    }
}

/// Sums `octaves` weighted octaves after shaping each one with `shape`.
#[inline]
fn accumulate<T, P, F, S>(
    noise: F,
    mut point: P,
    octaves: u32,
    lacunarity: T,
    gain: T,
    mut amplitude: T,
    shape: S,
) -> T
where
    T: NoiseFloat,
    P: Octave<T>,
    F: Fn(P) -> T,
    S: Fn(T) -> T,
{
    let mut sum = T::zero();
    for _ in 0..octaves {
        sum += shape(noise(point)) * amplitude;
        point = point.scaled(lacunarity);
        amplitude *= gain;
    }
    sum
}

/// Fractal Brownian motion at an arbitrary point.
pub fn fbm_at<T, P, F>(noise: F, point: P, octaves: u32, lacunarity: T, gain: T) -> T
where
    T: NoiseFloat,
    P: Octave<T>,
    F: Fn(P) -> T,
{
    accumulate(noise, point, octaves, lacunarity, gain, T::one(), |n| n)
}

/// Like [`fbm_at`] but sums `|n|`, so the result is never negative.
pub fn turbulence_at<T, P, F>(noise: F, point: P, octaves: u32, lacunarity: T, gain: T) -> T
where
    T: NoiseFloat,
    P: Octave<T>,
    F: Fn(P) -> T,
{
    accumulate(noise, point, octaves, lacunarity, gain, T::one(), T::abs)
}

/// Ridged multifractal: sums `(offset - |n|)^2`, starting at amplitude 0.5.
pub fn ridged_at<T, P, F>(
    noise: F,
    point: P,
    octaves: u32,
    lacunarity: T,
    gain: T,
    offset: T,
) -> T
where
    T: NoiseFloat,
    P: Octave<T>,
    F: Fn(P) -> T,
{
    let half = T::lit(0.5);
    accumulate(noise, point, octaves, lacunarity, gain, half, |n| {
        let ridge = offset - n.abs();
        ridge * ridge
    })
}

pub fn fbm<T, F>(noise: F, x: T, y: T, z: T, octaves: u32, lacunarity: T, gain: T) -> T
where
    T: NoiseFloat,
    F: Fn(T, T, T) -> T,
{
    fbm_at(|(x, y, z)| noise(x, y, z), (x, y, z), octaves, lacunarity, gain)
}

pub fn turbulence<T, F>(noise: F, x: T, y: T, z: T, octaves: u32, lacunarity: T, gain: T) -> T
where
    T: NoiseFloat,
    F: Fn(T, T, T) -> T,
{
    turbulence_at(|(x, y, z)| noise(x, y, z), (x, y, z), octaves, lacunarity, gain)
}

#[allow(clippy::too_many_arguments)]
pub fn ridged<T, F>(
    noise: F,
    x: T,
    y: T,
    z: T,
    octaves: u32,
    lacunarity: T,
    gain: T,
    offset: T,
) -> T
where
    T: NoiseFloat,
    F: Fn(T, T, T) -> T,
{
    ridged_at(
        |(x, y, z)| noise(x, y, z),
        (x, y, z),
        octaves,
        lacunarity,
        gain,
        offset,
    )
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FractalKind {
    Fbm,
    Turbulence,
    Ridged,
}

impl Default for FractalKind {
    fn default() -> Self {
        FractalKind::Fbm
    }
}

/// Octave parameters as they appear in configuration files.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FractalSettings {
    pub kind: FractalKind,
    pub octaves: u32,
    pub lacunarity: f32,
    pub gain: f32,
    /// Only used by [`FractalKind::Ridged`].
    pub offset: f32,
}

impl Default for FractalSettings {
    fn default() -> Self {
        Self {
            kind: FractalKind::Fbm,
            octaves: 4,
            lacunarity: 2.0,
            gain: 0.5,
            offset: 1.0,
        }
    }
}

impl FractalSettings {
    pub fn validate(&self) -> Result<()> {
        if self.octaves == 0 || self.octaves > MAX_OCTAVES {
            return Err(Error::OctavesOutOfRange {
                octaves: self.octaves,
                max: MAX_OCTAVES,
            });
        }
        if !self.lacunarity.is_finite() || self.lacunarity <= 0.0 {
            return Err(Error::InvalidLacunarity(self.lacunarity));
        }
        if !self.gain.is_finite() {
            return Err(Error::InvalidGain(self.gain));
        }
        if !self.offset.is_finite() {
            return Err(Error::InvalidOffset(self.offset));
        }
        Ok(())
    }

    /// Runs the configured combinator over `noise` at `point`.
    pub fn apply<P, F>(&self, noise: F, point: P) -> f32
    where
        P: Octave<f32>,
        F: Fn(P) -> f32,
    {
        let (octaves, lac, gain) = (self.octaves, self.lacunarity, self.gain);
        match self.kind {
            FractalKind::Fbm => fbm_at(noise, point, octaves, lac, gain),
            FractalKind::Turbulence => turbulence_at(noise, point, octaves, lac, gain),
            FractalKind::Ridged => ridged_at(noise, point, octaves, lac, gain, self.offset),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::procgen::perlin::perlin2d;
    use crate::procgen::simplex::opensimplex2_smooth_3d;
    use crate::procgen::value::{value_noise_3d, value_noise_4d};

    #[test]
    fn fbm_accumulates() {
        let v = fbm(value_noise_3d, 1.0f32, 2.0, 3.0, 4, 2.0, 0.5);
        assert_ne!(v, 0.0);
    }

    #[test]
    fn single_octave_is_the_base_noise() {
        let base = value_noise_3d(0.3f64, 0.6, 0.9);
        assert_eq!(fbm(value_noise_3d, 0.3f64, 0.6, 0.9, 1, 2.0, 0.5), base);
        assert_eq!(
            turbulence(value_noise_3d, 0.3f64, 0.6, 0.9, 1, 2.0, 0.5),
            base.abs()
        );
        let ridge = 1.0 - base.abs();
        assert_eq!(
            ridged(value_noise_3d, 0.3f64, 0.6, 0.9, 1, 2.0, 0.5, 1.0),
            0.5 * ridge * ridge
        );
    }

    #[test]
    fn zero_octaves_sum_to_zero() {
        assert_eq!(fbm(value_noise_3d, 0.5f32, 0.5, 0.5, 0, 2.0, 0.5), 0.0);
    }

    #[test]
    fn turbulence_and_ridged_are_non_negative() {
        for i in 0..500 {
            let t = i as f32 * 0.193 - 40.0;
            let turb = turbulence(opensimplex2_smooth_3d, t, t * 0.3, 1.0 - t, 6, 2.0, 0.5);
            assert!(turb >= 0.0);
            let ridge = ridged(value_noise_3d, t, t * 0.3, 1.0 - t, 4, 2.0, 0.5, 1.0);
            assert!(ridge >= 0.0);
        }
    }

    #[test]
    fn works_on_other_dimensions() {
        let two = fbm_at(|(x, y)| perlin2d(x, y), (0.3f32, 0.7), 3, 2.0, 0.5);
        assert!(two.is_finite());
        let four = turbulence_at(
            |(x, y, z, w)| value_noise_4d(x, y, z, w),
            (0.3f64, 0.7, 1.1, 2.3),
            3,
            2.0,
            0.5,
        );
        assert!(four >= 0.0);
    }

    #[test]
    fn settings_validate() {
        assert!(FractalSettings::default().validate().is_ok());

        let bad = FractalSettings {
            octaves: 0,
            ..Default::default()
        };
        assert!(matches!(
            bad.validate(),
            Err(Error::OctavesOutOfRange { octaves: 0, .. })
        ));

        let bad = FractalSettings {
            octaves: MAX_OCTAVES + 1,
            ..Default::default()
        };
        assert!(bad.validate().is_err());

        let bad = FractalSettings {
            lacunarity: f32::NAN,
            ..Default::default()
        };
        assert!(matches!(bad.validate(), Err(Error::InvalidLacunarity(_))));

        let bad = FractalSettings {
            gain: f32::INFINITY,
            ..Default::default()
        };
        assert!(matches!(bad.validate(), Err(Error::InvalidGain(_))));
    }

    #[test]
    fn settings_dispatch_by_kind() {
        let noise = |(x, y, z): (f32, f32, f32)| value_noise_3d(x, y, z);
        let point = (1.5f32, 2.5, 3.5);

        let settings = FractalSettings::default();
        assert_eq!(
            settings.apply(noise, point),
            fbm(value_noise_3d, 1.5f32, 2.5, 3.5, 4, 2.0, 0.5)
        );

        let settings = FractalSettings {
            kind: FractalKind::Ridged,
            offset: 0.8,
            ..Default::default()
        };
        assert_eq!(
            settings.apply(noise, point),
            ridged(value_noise_3d, 1.5f32, 2.5, 3.5, 4, 2.0, 0.5, 0.8)
        );
    }

    #[test]
    fn settings_read_from_json_with_defaults() {
        let settings: FractalSettings =
            serde_json::from_str(r#"{ "kind": "turbulence", "octaves": 6 }"#).unwrap();
        assert_eq!(settings.kind, FractalKind::Turbulence);
        assert_eq!(settings.octaves, 6);
        assert_eq!(settings.lacunarity, 2.0);
    }
}
