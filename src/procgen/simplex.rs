// SPDX-License-Identifier: MIT
// Copyright (c) 2021 Marceline Cramer

//! OpenSimplex2-style gradient noise on skewed simplex lattices.
//!
//! Each sample point is skewed onto an integer lattice, a small set of nearby
//! lattice vertices is chosen, and every vertex within the kernel radius adds
//! `attn^4 * (gradient . delta)` where `attn = r^2 - |delta|^2`.
//!
//! * *Fast* variants evaluate only the enclosing simplex (3 vertices in 2D,
//!   4 in 3D). The 3D version first re-orients the input so the lattice's
//!   main diagonal no longer lines up with the world axes.
//! * *Smooth* variants add the outside vertices whose kernels reach into the
//!   cell: two more in 2D, which makes the field seamless, and the one vertex
//!   across the nearest tetrahedron face in 3D, which leaves only faint seams.
//! * [`opensimplex2_smooth_3d_cubic`] evaluates all eight corners of the
//!   skewed cube instead of picking a simplex.
//!
//! Output is scaled to roughly `[-1, 1]` and is not clamped. Fast 3D shares
//! the smooth normalizer over its wider kernel, so it reaches about `±3.5`.

use crate::gradient::{grad2_dot, grad3_dot};
use crate::hash::{LatticeHash, Tableless};
use crate::scalar::{cell, NoiseFloat};

/// `(sqrt(3) - 1) / 2`
const SKEW_2D: f64 = 0.366_025_403_784_438_6;
/// `(3 - sqrt(3)) / 6`
const UNSKEW_2D: f64 = 0.211_324_865_405_187_1;
const FAST_RADIUS2_2D: f64 = 0.5;
const SMOOTH_RADIUS2_2D: f64 = 2.0 / 3.0;
const FAST_SCALE_2D: f64 = 99.836_854_463_036_47;
const SMOOTH_SCALE_2D: f64 = 18.241_961_944_860_65;

/// Coefficient of the orthonormal re-orientation used by the fast 3D variant.
/// The transform is its own inverse.
pub const R3: f64 = 2.0 / 3.0;
const SKEW_3D: f64 = 1.0 / 3.0;
const UNSKEW_3D: f64 = 1.0 / 6.0;
const FAST_RADIUS2_3D: f64 = 0.75;
const SMOOTH_RADIUS2_3D: f64 = 0.6;
const SMOOTH_SCALE_3D: f64 = 32.0;
/// Same normalizer as the smooth variant. The wider fast kernel peaks near 3.5.
const FAST_SCALE_3D: f64 = SMOOTH_SCALE_3D;

/// The four vertices of the rhombus spanned by a 2D lattice cell.
const RHOMBUS: [[i32; 2]; 4] = [[0, 0], [1, 0], [0, 1], [1, 1]];

/// One lattice vertex and the sample point's offset from it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Corner2<T> {
    pub cell: [i32; 2],
    pub delta: [T; 2],
}

impl<T: NoiseFloat> Corner2<T> {
    #[inline]
    pub fn contribution<H: LatticeHash + ?Sized>(&self, hasher: &H, radius2: T) -> T {
        let [dx, dy] = self.delta;
        let attn = radius2 - dx * dx - dy * dy;
        if attn <= T::zero() {
            return T::zero();
        }

        let attn = attn * attn;
        attn * attn * grad2_dot(hasher.hash2(self.cell[0], self.cell[1]), dx, dy)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct Corner3<T> {
    pub cell: [i32; 3],
    pub delta: [T; 3],
}

impl<T: NoiseFloat> Corner3<T> {
    #[inline]
    pub fn contribution<H: LatticeHash + ?Sized>(&self, hasher: &H, radius2: T) -> T {
        let [dx, dy, dz] = self.delta;
        let attn = radius2 - dx * dx - dy * dy - dz * dz;
        if attn <= T::zero() {
            return T::zero();
        }

        let attn = attn * attn;
        let [x, y, z] = self.cell;
        attn * attn * grad3_dot(hasher.hash3(x, y, z), dx, dy, dz)
    }
}

/// A sample point located on the skewed 2D lattice.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Skewed2<T> {
    base: [i32; 2],
    /// Fractional position inside the skewed cell.
    frac: [T; 2],
    /// Unskewed offset from the base vertex.
    origin: [T; 2],
}

impl<T: NoiseFloat> Skewed2<T> {
    pub fn locate(x: T, y: T) -> Self {
        let s = (x + y) * T::lit(SKEW_2D);
        let (i, xs) = cell(x + s);
        let (j, ys) = cell(y + s);
        let t = (xs + ys) * T::lit(UNSKEW_2D);

        Self {
            base: [i, j],
            frac: [xs, ys],
            origin: [xs - t, ys - t],
        }
    }

    /// Vertex at lattice offset `o` from the base vertex.
    pub fn corner(&self, o: [i32; 2]) -> Corner2<T> {
        let g = T::lit(UNSKEW_2D) * T::from_i32(o[0] + o[1]);
        Corner2 {
            cell: [
                self.base[0].wrapping_add(o[0]),
                self.base[1].wrapping_add(o[1]),
            ],
            delta: [
                self.origin[0] - T::from_i32(o[0]) + g,
                self.origin[1] - T::from_i32(o[1]) + g,
            ],
        }
    }

    /// Enclosing triangle: the base, one axis step, then the far vertex.
    pub fn simplex(&self) -> [[i32; 2]; 3] {
        let step = if self.origin[0] >= self.origin[1] {
            [1, 0]
        } else {
            [0, 1]
        };
        [[0, 0], step, [1, 1]]
    }

    /// The two vertices outside the rhombus whose kernels still reach it.
    pub fn outer(&self) -> [[i32; 2]; 2] {
        if self.frac[0] + self.frac[1] > T::one() {
            [[2, 1], [1, 2]]
        } else {
            [[-1, 0], [0, -1]]
        }
    }
}

/// A sample point located on the skewed 3D lattice.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Skewed3<T> {
    base: [i32; 3],
    frac: [T; 3],
    origin: [T; 3],
}

impl<T: NoiseFloat> Skewed3<T> {
    pub fn locate(x: T, y: T, z: T) -> Self {
        let s = (x + y + z) * T::lit(SKEW_3D);
        let (i, xs) = cell(x + s);
        let (j, ys) = cell(y + s);
        let (k, zs) = cell(z + s);
        let t = (xs + ys + zs) * T::lit(UNSKEW_3D);

        Self {
            base: [i, j, k],
            frac: [xs, ys, zs],
            origin: [xs - t, ys - t, zs - t],
        }
    }

    pub fn corner(&self, o: [i32; 3]) -> Corner3<T> {
        let g = T::lit(UNSKEW_3D) * T::from_i32(o[0] + o[1] + o[2]);
        let mut cell = self.base;
        let mut delta = self.origin;
        for axis in 0..3 {
            cell[axis] = cell[axis].wrapping_add(o[axis]);
            delta[axis] = delta[axis] - T::from_i32(o[axis]) + g;
        }
        Corner3 { cell, delta }
    }

    /// Rank of each axis by its offset, `2` for the largest.
    ///
    /// Ties go to the earlier axis, so the ranks are always a permutation of
    /// `0, 1, 2`.
    pub fn ranks(&self) -> [usize; 3] {
        let [x0, y0, z0] = self.origin;
        [
            (x0 >= y0) as usize + (x0 >= z0) as usize,
            (y0 > x0) as usize + (y0 >= z0) as usize,
            (z0 > x0) as usize + (z0 > y0) as usize,
        ]
    }

    /// Enclosing tetrahedron, walking from the base vertex to `(1, 1, 1)`
    /// along the axes in decreasing rank.
    pub fn simplex(&self) -> [[i32; 3]; 4] {
        let ranks = self.ranks();
        let step = |min: usize| {
            [
                (ranks[0] >= min) as i32,
                (ranks[1] >= min) as i32,
                (ranks[2] >= min) as i32,
            ]
        };
        [[0, 0, 0], step(2), step(1), [1, 1, 1]]
    }

    /// The vertex of the neighbouring tetrahedron across the face the point
    /// lies closest to.
    ///
    /// Dropping an end vertex extends the axis walk by one step into the next
    /// cell; dropping a middle vertex swaps the order of its two steps.
    pub fn pivot(&self, simplex: &[[i32; 3]; 4]) -> [i32; 3] {
        let ranks = self.ranks();
        let mut sorted = [T::zero(); 3];
        for axis in 0..3 {
            sorted[2 - ranks[axis]] = self.frac[axis];
        }
        let [a, b, c] = sorted;
        let weights = [T::one() - a, a - b, b - c, c];

        let mut nearest = 0;
        for k in 1..4 {
            if weights[k] < weights[nearest] {
                nearest = k;
            }
        }

        let [v0, v1, v2, v3] = *simplex;
        let mut pivot = [0; 3];
        for axis in 0..3 {
            pivot[axis] = match nearest {
                0 => v1[axis] + v3[axis],
                1 => v0[axis] + v2[axis] - v1[axis],
                2 => v1[axis] + v3[axis] - v2[axis],
                _ => v2[axis] - v3[axis],
            };
        }
        pivot
    }
}

/// Re-orients a point so the lattice's main diagonal is no longer the world
/// `(1, 1, 1)` direction.
#[inline]
pub fn reorient<T: NoiseFloat>(x: T, y: T, z: T) -> (T, T, T) {
    let r = (x + y + z) * T::lit(R3);
    (r - x, r - y, r - z)
}

pub fn opensimplex2_fast_2d<T: NoiseFloat>(x: T, y: T) -> T {
    opensimplex2_fast_2d_with(&Tableless, x, y)
}

pub fn opensimplex2_smooth_2d<T: NoiseFloat>(x: T, y: T) -> T {
    opensimplex2_smooth_2d_with(&Tableless, x, y)
}

pub fn opensimplex2_fast_3d<T: NoiseFloat>(x: T, y: T, z: T) -> T {
    opensimplex2_fast_3d_with(&Tableless, x, y, z)
}

pub fn opensimplex2_smooth_3d<T: NoiseFloat>(x: T, y: T, z: T) -> T {
    opensimplex2_smooth_3d_with(&Tableless, x, y, z)
}

pub fn opensimplex2_smooth_3d_cubic<T: NoiseFloat>(x: T, y: T, z: T) -> T {
    opensimplex2_smooth_3d_cubic_with(&Tableless, x, y, z)
}

pub fn opensimplex2_fast_2d_with<T, H>(hasher: &H, x: T, y: T) -> T
where
    T: NoiseFloat,
    H: LatticeHash + ?Sized,
{
    let point = Skewed2::locate(x, y);
    let radius2 = T::lit(FAST_RADIUS2_2D);

    let mut sum = T::zero();
    for offset in point.simplex().iter() {
        sum += point.corner(*offset).contribution(hasher, radius2);
    }
    sum * T::lit(FAST_SCALE_2D)
}

pub fn opensimplex2_smooth_2d_with<T, H>(hasher: &H, x: T, y: T) -> T
where
    T: NoiseFloat,
    H: LatticeHash + ?Sized,
{
    let point = Skewed2::locate(x, y);
    let radius2 = T::lit(SMOOTH_RADIUS2_2D);

    let mut sum = T::zero();
    for offset in RHOMBUS.iter().chain(point.outer().iter()) {
        sum += point.corner(*offset).contribution(hasher, radius2);
    }
    sum * T::lit(SMOOTH_SCALE_2D)
}

pub fn opensimplex2_fast_3d_with<T, H>(hasher: &H, x: T, y: T, z: T) -> T
where
    T: NoiseFloat,
    H: LatticeHash + ?Sized,
{
    let (x, y, z) = reorient(x, y, z);
    let point = Skewed3::locate(x, y, z);
    let radius2 = T::lit(FAST_RADIUS2_3D);

    let mut sum = T::zero();
    for offset in point.simplex().iter() {
        sum += point.corner(*offset).contribution(hasher, radius2);
    }
    sum * T::lit(FAST_SCALE_3D)
}

pub fn opensimplex2_smooth_3d_with<T, H>(hasher: &H, x: T, y: T, z: T) -> T
where
    T: NoiseFloat,
    H: LatticeHash + ?Sized,
{
    let point = Skewed3::locate(x, y, z);
    let simplex = point.simplex();
    let pivot = point.pivot(&simplex);
    let radius2 = T::lit(SMOOTH_RADIUS2_3D);

    let mut sum = T::zero();
    for offset in simplex.iter().chain(Some(&pivot)) {
        sum += point.corner(*offset).contribution(hasher, radius2);
    }
    sum * T::lit(SMOOTH_SCALE_3D)
}

pub fn opensimplex2_smooth_3d_cubic_with<T, H>(hasher: &H, x: T, y: T, z: T) -> T
where
    T: NoiseFloat,
    H: LatticeHash + ?Sized,
{
    let point = Skewed3::locate(x, y, z);
    let radius2 = T::lit(SMOOTH_RADIUS2_3D);

    let mut sum = T::zero();
    for index in 0..8 {
        let offset = [index & 1, (index >> 1) & 1, (index >> 2) & 1];
        sum += point.corner(offset).contribution(hasher, radius2);
    }
    sum * T::lit(SMOOTH_SCALE_3D)
}
