// SPDX-License-Identifier: MIT
// Copyright (c) 2021 Marceline Cramer

//! Value noise: a hashed scalar per lattice corner, blended with faded weights.

use crate::hash::{LatticeHash, PermutationTable};
use crate::scalar::{cell, fade, lerp, NoiseFloat};

/// Maps the low byte of a hash linearly onto `[-1, 1]`.
#[inline]
pub fn value_from_hash<T: NoiseFloat>(hash: u32) -> T {
    T::from_i32((hash & 0xff) as i32) / T::lit(127.5) - T::one()
}

pub fn value_noise_2d<T: NoiseFloat>(x: T, y: T) -> T {
    value_noise_2d_with(&PermutationTable::CLASSIC, x, y)
}

pub fn value_noise_3d<T: NoiseFloat>(x: T, y: T, z: T) -> T {
    value_noise_3d_with(&PermutationTable::CLASSIC, x, y, z)
}

pub fn value_noise_4d<T: NoiseFloat>(x: T, y: T, z: T, w: T) -> T {
    value_noise_4d_with(&PermutationTable::CLASSIC, x, y, z, w)
}

pub fn value_noise_2d_with<T, H>(hasher: &H, x: T, y: T) -> T
where
    T: NoiseFloat,
    H: LatticeHash + ?Sized,
{
    let (xi, fx) = cell(x);
    let (yi, fy) = cell(y);
    let (x1, y1) = (xi.wrapping_add(1), yi.wrapping_add(1));

    let u = fade(fx);
    let v = fade(fy);

    let a = value_from_hash(hasher.hash2(xi, yi));
    let b = value_from_hash(hasher.hash2(x1, yi));
    let c = value_from_hash(hasher.hash2(xi, y1));
    let d = value_from_hash(hasher.hash2(x1, y1));

    lerp(lerp(a, b, u), lerp(c, d, u), v)
}

pub fn value_noise_3d_with<T, H>(hasher: &H, x: T, y: T, z: T) -> T
where
    T: NoiseFloat,
    H: LatticeHash + ?Sized,
{
    let (xi, fx) = cell(x);
    let (yi, fy) = cell(y);
    let (zi, fz) = cell(z);
    let (x1, y1, z1) = (xi.wrapping_add(1), yi.wrapping_add(1), zi.wrapping_add(1));

    let u = fade(fx);
    let v = fade(fy);
    let w = fade(fz);

    let corner = |x, y, z| value_from_hash::<T>(hasher.hash3(x, y, z));

    let near = lerp(
        lerp(corner(xi, yi, zi), corner(x1, yi, zi), u),
        lerp(corner(xi, y1, zi), corner(x1, y1, zi), u),
        v,
    );
    let far = lerp(
        lerp(corner(xi, yi, z1), corner(x1, yi, z1), u),
        lerp(corner(xi, y1, z1), corner(x1, y1, z1), u),
        v,
    );

    lerp(near, far, w)
}

pub fn value_noise_4d_with<T, H>(hasher: &H, x: T, y: T, z: T, w: T) -> T
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

    // Bit `a` of the corner index selects the +1 neighbour along axis `a`.
    let mut corners = [T::zero(); 16];
    for (index, slot) in corners.iter_mut().enumerate() {
        let at = |axis: usize| cells[axis].0.wrapping_add(((index >> axis) & 1) as i32);
        *slot = value_from_hash(hasher.hash4(at(0), at(1), at(2), at(3)));
    }

    // Collapse one axis per pass, x first.
    let mut len = corners.len();
    for weight in weights.iter() {
        len /= 2;
        for i in 0..len {
            corners[i] = lerp(corners[2 * i], corners[2 * i + 1], *weight);
        }
    }

    corners[0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::{hash2, hash3, hash4, Tableless};

    #[test]
    fn hash_mapping_spans_unit_range() {
        assert_eq!(value_from_hash::<f32>(0), -1.0);
        assert_eq!(value_from_hash::<f32>(255), 1.0);
        assert_eq!(value_from_hash::<f64>(0x1ff), 1.0);
    }

    #[test]
    fn lattice_points_return_corner_values() {
        let v = value_noise_2d(3.0f32, -4.0);
        assert_eq!(v, value_from_hash::<f32>(u32::from(hash2(3, -4))));

        let v = value_noise_3d(1.0f64, 2.0, 3.0);
        assert_eq!(v, value_from_hash::<f64>(u32::from(hash3(1, 2, 3))));

        let v = value_noise_4d(5.0f32, 6.0, 7.0, 8.0);
        assert_eq!(v, value_from_hash::<f32>(u32::from(hash4(5, 6, 7, 8))));
    }

    #[test]
    fn deterministic() {
        assert_eq!(value_noise_2d(10.1f32, 20.5), value_noise_2d(10.1f32, 20.5));
        assert_eq!(
            value_noise_3d(1.25f32, 2.75, 3.5),
            value_noise_3d(1.25f32, 2.75, 3.5)
        );
    }

    #[test]
    fn stays_in_unit_range() {
        for i in 0..2_000 {
            let t = i as f32 * 0.137 - 137.0;
            let v2 = value_noise_2d(t, t * 0.61);
            let v3 = value_noise_3d(t, t * 0.37, -t * 0.73);
            let v4 = value_noise_4d(t, t * 0.37, -t * 0.73, t * 1.9);
            for v in [v2, v3, v4].iter() {
                assert!((-1.0..=1.0).contains(v), "{} out of range", v);
            }
        }
    }

    #[test]
    fn four_d_is_continuous_across_cells() {
        let eps = 1e-5f64;
        for axis in 0..4 {
            let mut lo = [0.4f64, 1.7, -2.2, 3.3];
            let mut hi = lo;
            lo[axis] = 2.0 - eps;
            hi[axis] = 2.0 + eps;
            let a = value_noise_4d(lo[0], lo[1], lo[2], lo[3]);
            let b = value_noise_4d(hi[0], hi[1], hi[2], hi[3]);
            assert!((a - b).abs() < 1e-3, "axis {} jumped {} -> {}", axis, a, b);
        }
    }

    #[test]
    fn precisions_agree() {
        let a = value_noise_3d(0.3f32, 4.6, -7.1);
        let b = value_noise_3d(0.3f64, 4.6, -7.1);
        assert!((f64::from(a) - b).abs() < 1e-5);
    }

    #[test]
    fn hasher_changes_the_field() {
        let differs = (0..16).any(|i| {
            let x = i as f32 * 0.71 + 0.2;
            value_noise_3d(x, 0.4, 0.9) != value_noise_3d_with(&Tableless, x, 0.4, 0.9)
        });
        assert!(differs);
    }
}
