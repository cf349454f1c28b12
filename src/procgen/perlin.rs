// SPDX-License-Identifier: MIT
// Copyright (c) 2021 Marceline Cramer

//! Classic (improved) Perlin gradient noise.
//!
//! Output is roughly `[-1, 1]` but deliberately unclamped.

use crate::gradient::{grad2_dot, grad3_dot, grad4_dot};
use crate::hash::{LatticeHash, PermutationTable};
use crate::scalar::{cell, fade, lerp, NoiseFloat};

pub fn perlin2d<T: NoiseFloat>(x: T, y: T) -> T {
    perlin2d_with(&PermutationTable::CLASSIC, x, y)
}

pub fn perlin3d<T: NoiseFloat>(x: T, y: T, z: T) -> T {
    perlin3d_with(&PermutationTable::CLASSIC, x, y, z)
}

pub fn perlin4d<T: NoiseFloat>(x: T, y: T, z: T, w: T) -> T {
    perlin4d_with(&PermutationTable::CLASSIC, x, y, z, w)
}

pub fn perlin2d_with<T, H>(hasher: &H, x: T, y: T) -> T
where
    T: NoiseFloat,
    H: LatticeHash + ?Sized,
{
    let (xi, fx) = cell(x);
    let (yi, fy) = cell(y);
    let (x1, y1) = (xi.wrapping_add(1), yi.wrapping_add(1));
    let one = T::one();

    let u = fade(fx);
    let v = fade(fy);

    let g00 = grad2_dot(hasher.hash2(xi, yi), fx, fy);
    let g10 = grad2_dot(hasher.hash2(x1, yi), fx - one, fy);
    let g01 = grad2_dot(hasher.hash2(xi, y1), fx, fy - one);
    let g11 = grad2_dot(hasher.hash2(x1, y1), fx - one, fy - one);

    lerp(lerp(g00, g10, u), lerp(g01, g11, u), v)
}

pub fn perlin3d_with<T, H>(hasher: &H, x: T, y: T, z: T) -> T
where
    T: NoiseFloat,
    H: LatticeHash + ?Sized,
{
    let (xi, fx) = cell(x);
    let (yi, fy) = cell(y);
    let (zi, fz) = cell(z);

    let u = fade(fx);
    let v = fade(fy);
    let w = fade(fz);

    // Gradient at corner (dx, dy, dz) dotted with the offset from that corner.
    let corner = |dx: i32, dy: i32, dz: i32| {
        let h = hasher.hash3(
            xi.wrapping_add(dx),
            yi.wrapping_add(dy),
            zi.wrapping_add(dz),
        );
        grad3_dot(
            h,
            fx - T::from_i32(dx),
            fy - T::from_i32(dy),
            fz - T::from_i32(dz),
        )
    };

    let near = lerp(
        lerp(corner(0, 0, 0), corner(1, 0, 0), u),
        lerp(corner(0, 1, 0), corner(1, 1, 0), u),
        v,
    );
    let far = lerp(
        lerp(corner(0, 0, 1), corner(1, 0, 1), u),
        lerp(corner(0, 1, 1), corner(1, 1, 1), u),
        v,
    );

    lerp(near, far, w)
}

pub fn perlin4d_with<T, H>(hasher: &H, x: T, y: T, z: T, w: T) -> T
where
    T: NoiseFloat,
    H: LatticeHash + ?Sized,
{
    let cells = [cell(x), cell(y), cell(z), cell(w)];
    let weights = [
        fade(cells[0].1),
        fade(cells[1].1),
        fade(cells[2].1),
        fade(cells[3].1),
    ];

    let mut dots = [T::zero(); 16];
    for (index, slot) in dots.iter_mut().enumerate() {
        let bit = |axis: usize| ((index >> axis) & 1) as i32;
        let at = |axis: usize| cells[axis].0.wrapping_add(bit(axis));
        let off = |axis: usize| cells[axis].1 - T::from_i32(bit(axis));
        let h = hasher.hash4(at(0), at(1), at(2), at(3));
        *slot = grad4_dot(h, off(0), off(1), off(2), off(3));
    }

    let mut len = dots.len();
    for weight in weights.iter() {
        len /= 2;
        for i in 0..len {
            dots[i] = lerp(dots[2 * i], dots[2 * i + 1], *weight);
        }
    }

    dots[0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::Tableless;

    #[test]
    fn vanishes_on_lattice_points() {
        assert_eq!(perlin2d(4.0f32, -9.0), 0.0);
        assert_eq!(perlin3d(1.0f64, 2.0, 3.0), 0.0);
        assert_eq!(perlin4d(-1.0f32, 0.0, 7.0, 2.0), 0.0);
    }

    #[test]
    fn deterministic() {
        assert_eq!(
            perlin3d(3.17f32, 2.71, 1.0),
            perlin3d(3.17f32, 2.71, 1.0)
        );
    }

    #[test]
    fn small_steps_give_small_changes() {
        let a = perlin3d(1.0f32, 1.0, 1.0);
        let b = perlin3d(1.01f32, 1.0, 1.0);
        assert!((a - b).abs() < 0.2);

        for i in 0..500 {
            let x = i as f64 * 0.0731 - 11.0;
            let (y, z) = (x * 0.37 + 0.5, -x * 0.21);
            let d = perlin3d(x + 0.01, y, z) - perlin3d(x, y, z);
            assert!(d.abs() < 0.2, "jump of {} at {}", d, x);
        }
    }

    #[test]
    fn continuous_across_cell_faces() {
        let eps = 1e-6f64;
        for i in 0..50 {
            let y = i as f64 * 0.173 + 0.05;
            let a = perlin3d(3.0 - eps, y, 0.4);
            let b = perlin3d(3.0 + eps, y, 0.4);
            assert!((a - b).abs() < 1e-4);

            let a = perlin3d(0.6, y, -1.0 - eps);
            let b = perlin3d(0.6, y, -1.0 + eps);
            assert!((a - b).abs() < 1e-4);
        }
    }

    #[test]
    fn roughly_unit_range() {
        for i in 0..4_000 {
            let t = i as f32 * 0.0917 - 180.0;
            assert!(perlin2d(t, t * 0.7 + 0.3).abs() <= 1.5);
            assert!(perlin3d(t, t * 0.41, 0.5 - t * 0.83).abs() <= 1.5);
            assert!(perlin4d(t, t * 0.41, 0.5 - t * 0.83, t * 1.3).abs() <= 2.0);
        }
    }

    #[test]
    fn varies_across_space() {
        let values: Vec<f32> = (0..64)
            .map(|i| perlin3d(i as f32 * 0.37 + 0.1, 0.3, 0.7))
            .collect();
        let min = values.iter().copied().fold(f32::INFINITY, f32::min);
        let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
        assert!(max - min > 0.1);
    }

    #[test]
    fn tableless_has_no_256_period() {
        let differs = (0..16).any(|i| {
            let x = i as f64 * 0.61 + 0.3;
            perlin3d_with(&Tableless, x, 0.2, 0.9) != perlin3d_with(&Tableless, x + 256.0, 0.2, 0.9)
        });
        assert!(differs);

        let a = perlin3d(0.3f64, 0.2, 0.9);
        let b = perlin3d(256.3f64, 0.2, 0.9);
        assert!((a - b).abs() < 1e-9);
    }
}
