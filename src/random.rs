// SPDX-License-Identifier: MIT
// Copyright (c) 2021 Marceline Cramer

//! PCG32 (XSH-RR) generator.
//!
//! Implements [`rand::RngCore`] and [`rand::SeedableRng`] so it can drive
//! `rand`'s shuffles and distributions; the helpers below cover the handful of
//! draws graphics code usually wants directly.

use glam::{Quat, Vec2, Vec3};
use rand::{Error, RngCore, SeedableRng};
use std::f32::consts::TAU;

const MULTIPLIER: u64 = 6_364_136_223_846_793_005;
const DEFAULT_STREAM: u64 = 0;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Pcg32 {
    state: u64,
    inc: u64,
}

impl Pcg32 {
    /// Seeds a generator on stream `seq`. Different streams with the same
    /// seed produce unrelated sequences.
    pub fn new(seed: u64, seq: u64) -> Self {
        let mut rng = Self {
            state: 0,
            inc: (seq << 1) | 1,
        };
        rng.step();
        rng.state = rng.state.wrapping_add(seed);
        rng.step();
        rng
    }

    #[inline]
    fn step(&mut self) -> u64 {
        let old = self.state;
        self.state = old.wrapping_mul(MULTIPLIER).wrapping_add(self.inc | 1);
        old
    }

    #[inline]
    pub fn next_u32(&mut self) -> u32 {
        let old = self.step();
        let xorshift = (((old >> 18) ^ old) >> 27) as u32;
        let rot = (old >> 59) as u32;
        xorshift.rotate_right(rot)
    }

    /// Uniform in `[0, 1)`.
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        // 24 bits so the result can never round up to 1.0.
        (self.next_u32() >> 8) as f32 * (1.0 / 16_777_216.0)
    }

    /// Uniform in `[0, 1)`.
    #[inline]
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) * (1.0 / 4_294_967_296.0)
    }

    /// Uniform in `[min, max]`. Modulo bias is accepted.
    pub fn range_u32(&mut self, min: u32, max: u32) -> u32 {
        let span = max.wrapping_sub(min).wrapping_add(1);
        if span == 0 {
            return self.next_u32();
        }
        min.wrapping_add(self.next_u32() % span)
    }

    pub fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        min + (max - min) * self.next_f32()
    }

    pub fn range_f64(&mut self, min: f64, max: f64) -> f64 {
        min + (max - min) * self.next_f64()
    }

    pub fn unit_vec2(&mut self) -> Vec2 {
        let (sin, cos) = self.range_f32(0.0, TAU).sin_cos();
        Vec2::new(cos, sin)
    }

    /// Uniform on the unit sphere.
    pub fn unit_vec3(&mut self) -> Vec3 {
        let z = self.range_f32(-1.0, 1.0);
        let (sin, cos) = self.range_f32(0.0, TAU).sin_cos();
        let r = (1.0 - z * z).max(0.0).sqrt();
        Vec3::new(r * cos, r * sin, z)
    }

    /// Uniformly distributed rotation (Shoemake).
    pub fn quat(&mut self) -> Quat {
        let u1 = self.next_f32();
        let (sin1, cos1) = (TAU * self.next_f32()).sin_cos();
        let (sin2, cos2) = (TAU * self.next_f32()).sin_cos();
        let s1 = (1.0 - u1).sqrt();
        let s2 = u1.sqrt();
        Quat::from_xyzw(sin1 * s1, cos1 * s1, sin2 * s2, cos2 * s2)
    }
}

impl RngCore for Pcg32 {
    fn next_u32(&mut self) -> u32 {
        Pcg32::next_u32(self)
    }

    fn next_u64(&mut self) -> u64 {
        let lo = u64::from(Pcg32::next_u32(self));
        let hi = u64::from(Pcg32::next_u32(self));
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = Pcg32::next_u32(self).to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Pcg32 {
    /// Little-endian `seed` followed by little-endian `seq`.
    type Seed = [u8; 16];

    fn from_seed(seed: Self::Seed) -> Self {
        let mut lo = [0u8; 8];
        let mut hi = [0u8; 8];
        lo.copy_from_slice(&seed[..8]);
        hi.copy_from_slice(&seed[8..]);
        Self::new(u64::from_le_bytes(lo), u64::from_le_bytes(hi))
    }

    fn seed_from_u64(state: u64) -> Self {
        Self::new(state, DEFAULT_STREAM)
    }
}
