// SPDX-License-Identifier: MIT
// Copyright (c) 2021 Marceline Cramer

pub mod fractal;
pub mod perlin;
pub mod simplex;
pub mod value;

use crate::error::Error;
use crate::hash::{LatticeHash, PermutationTable, Tableless};
use crate::scalar::NoiseFloat;
pub use glam::Vec3A;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use fractal::{
    fbm, fbm_at, ridged, ridged_at, turbulence, turbulence_at, FractalKind, FractalSettings,
    Octave,
};
pub use perlin::{perlin2d, perlin2d_with, perlin3d, perlin3d_with, perlin4d, perlin4d_with};
pub use simplex::{
    opensimplex2_fast_2d, opensimplex2_fast_2d_with, opensimplex2_fast_3d,
    opensimplex2_fast_3d_with, opensimplex2_smooth_2d, opensimplex2_smooth_2d_with,
    opensimplex2_smooth_3d, opensimplex2_smooth_3d_cubic, opensimplex2_smooth_3d_cubic_with,
    opensimplex2_smooth_3d_with,
};
pub use value::{
    value_noise_2d, value_noise_2d_with, value_noise_3d, value_noise_3d_with, value_noise_4d,
    value_noise_4d_with,
};

/// A scalar field over 3D space.
pub trait NoiseField {
    fn sample(&self, pos: &Vec3A) -> f32;
}

impl<F> NoiseField for F
where
    F: Fn(f32, f32, f32) -> f32,
{
    fn sample(&self, pos: &Vec3A) -> f32 {
        self(pos.x, pos.y, pos.z)
    }
}

/// The base noise algorithms, selectable at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoiseKind {
    #[serde(rename = "value")]
    Value,
    #[serde(rename = "perlin")]
    Perlin,
    #[serde(rename = "opensimplex2_fast")]
    OpenSimplex2Fast,
    #[serde(rename = "opensimplex2_smooth")]
    OpenSimplex2Smooth,
    /// Eight-corner variant of the smooth 3D noise. Falls back to the smooth
    /// 2D noise in two dimensions.
    #[serde(rename = "opensimplex2_smooth_cubic")]
    OpenSimplex2SmoothCubic,
}

impl NoiseKind {
    pub const ALL: [NoiseKind; 5] = [
        NoiseKind::Value,
        NoiseKind::Perlin,
        NoiseKind::OpenSimplex2Fast,
        NoiseKind::OpenSimplex2Smooth,
        NoiseKind::OpenSimplex2SmoothCubic,
    ];

    pub fn name(self) -> &'static str {
        match self {
            NoiseKind::Value => "value",
            NoiseKind::Perlin => "perlin",
            NoiseKind::OpenSimplex2Fast => "opensimplex2_fast",
            NoiseKind::OpenSimplex2Smooth => "opensimplex2_smooth",
            NoiseKind::OpenSimplex2SmoothCubic => "opensimplex2_smooth_cubic",
        }
    }

    pub fn is_simplex(self) -> bool {
        !matches!(self, NoiseKind::Value | NoiseKind::Perlin)
    }

    /// Evaluates with the hasher each algorithm uses by default: the classic
    /// permutation table for value and Perlin noise, the tableless hash for
    /// the simplex family.
    pub fn eval2<T: NoiseFloat>(self, x: T, y: T) -> T {
        if self.is_simplex() {
            self.eval2_with(&Tableless, x, y)
        } else {
            self.eval2_with(&PermutationTable::CLASSIC, x, y)
        }
    }

    pub fn eval3<T: NoiseFloat>(self, x: T, y: T, z: T) -> T {
        if self.is_simplex() {
            self.eval3_with(&Tableless, x, y, z)
        } else {
            self.eval3_with(&PermutationTable::CLASSIC, x, y, z)
        }
    }

    pub fn eval2_with<T, H>(self, hasher: &H, x: T, y: T) -> T
    where
        T: NoiseFloat,
        H: LatticeHash + ?Sized,
    {
        match self {
            NoiseKind::Value => value_noise_2d_with(hasher, x, y),
            NoiseKind::Perlin => perlin2d_with(hasher, x, y),
            NoiseKind::OpenSimplex2Fast => opensimplex2_fast_2d_with(hasher, x, y),
            NoiseKind::OpenSimplex2Smooth | NoiseKind::OpenSimplex2SmoothCubic => {
                opensimplex2_smooth_2d_with(hasher, x, y)
            }
        }
    }

    pub fn eval3_with<T, H>(self, hasher: &H, x: T, y: T, z: T) -> T
    where
        T: NoiseFloat,
        H: LatticeHash + ?Sized,
    {
        match self {
            NoiseKind::Value => value_noise_3d_with(hasher, x, y, z),
            NoiseKind::Perlin => perlin3d_with(hasher, x, y, z),
            NoiseKind::OpenSimplex2Fast => opensimplex2_fast_3d_with(hasher, x, y, z),
            NoiseKind::OpenSimplex2Smooth => opensimplex2_smooth_3d_with(hasher, x, y, z),
            NoiseKind::OpenSimplex2SmoothCubic => {
                opensimplex2_smooth_3d_cubic_with(hasher, x, y, z)
            }
        }
    }
}

impl Default for NoiseKind {
    fn default() -> Self {
        NoiseKind::OpenSimplex2Smooth
    }
}

impl NoiseField for NoiseKind {
    fn sample(&self, pos: &Vec3A) -> f32 {
        self.eval3(pos.x, pos.y, pos.z)
    }
}

impl fmt::Display for NoiseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for NoiseKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "value" => Ok(NoiseKind::Value),
            "perlin" => Ok(NoiseKind::Perlin),
            "opensimplex2_fast" | "fast" => Ok(NoiseKind::OpenSimplex2Fast),
            "opensimplex2_smooth" | "smooth" => Ok(NoiseKind::OpenSimplex2Smooth),
            "opensimplex2_smooth_cubic" | "cubic" => Ok(NoiseKind::OpenSimplex2SmoothCubic),
            _ => Err(Error::UnknownKind(s.to_string())),
        }
    }
}
