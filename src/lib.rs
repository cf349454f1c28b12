// SPDX-License-Identifier: MIT
// Copyright (c) 2021 Marceline Cramer

//! Lattice-based procedural noise: value noise, Perlin noise, OpenSimplex2
//! and fractal combinators, generic over `f32` and `f64`.

#[macro_use]
extern crate lazy_static;

pub mod config;
pub mod error;
pub mod gradient;
pub mod hash;
pub mod procgen;
pub mod random;
pub mod scalar;

pub use config::{NoiseConfig, Sampler};
pub use error::{Error, Result};
pub use hash::{
    hash3d, hash3d_expanded, hash3d_pcg, ExpandedTable, HashMode, LatticeHash, PermutationTable,
    Tableless,
};
pub use procgen::*;
pub use random::Pcg32;
pub use scalar::{fade, fast_floor, lerp, NoiseFloat};
