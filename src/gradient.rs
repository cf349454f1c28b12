// SPDX-License-Identifier: MIT
// Copyright (c) 2021 Marceline Cramer

//! Fixed gradient directions for dot-product noise.

use crate::scalar::NoiseFloat;

#[rustfmt::skip]
pub const GRAD2: [[i8; 2]; 8] = [
    [ 1,  1], [-1,  1], [ 1, -1], [-1, -1],
    [ 1,  0], [-1,  0], [ 0,  1], [ 0, -1],
];

/// Cube edge midpoints.
#[rustfmt::skip]
pub const GRAD3: [[i8; 3]; 12] = [
    [ 1,  1,  0], [-1,  1,  0], [ 1, -1,  0], [-1, -1,  0],
    [ 1,  0,  1], [-1,  0,  1], [ 1,  0, -1], [-1,  0, -1],
    [ 0,  1,  1], [ 0, -1,  1], [ 0,  1, -1], [ 0, -1, -1],
];

/// Tesseract edge midpoints.
#[rustfmt::skip]
pub const GRAD4: [[i8; 4]; 32] = [
    [ 0,  1,  1,  1], [ 0,  1,  1, -1], [ 0,  1, -1,  1], [ 0,  1, -1, -1],
    [ 0, -1,  1,  1], [ 0, -1,  1, -1], [ 0, -1, -1,  1], [ 0, -1, -1, -1],
    [ 1,  0,  1,  1], [ 1,  0,  1, -1], [ 1,  0, -1,  1], [ 1,  0, -1, -1],
    [-1,  0,  1,  1], [-1,  0,  1, -1], [-1,  0, -1,  1], [-1,  0, -1, -1],
    [ 1,  1,  0,  1], [ 1,  1,  0, -1], [ 1, -1,  0,  1], [ 1, -1,  0, -1],
    [-1,  1,  0,  1], [-1,  1,  0, -1], [-1, -1,  0,  1], [-1, -1,  0, -1],
    [ 1,  1,  1,  0], [ 1,  1, -1,  0], [ 1, -1,  1,  0], [ 1, -1, -1,  0],
    [-1,  1,  1,  0], [-1,  1, -1,  0], [-1, -1,  1,  0], [-1, -1, -1,  0],
];

#[inline(always)]
fn g<T: NoiseFloat>(v: i8) -> T {
    T::from_i32(i32::from(v))
}

#[inline]
pub fn grad2_dot<T: NoiseFloat>(hash: u32, x: T, y: T) -> T {
    let [gx, gy] = GRAD2[(hash & 7) as usize];
    g::<T>(gx) * x + g::<T>(gy) * y
}

#[inline]
pub fn grad3_dot<T: NoiseFloat>(hash: u32, x: T, y: T, z: T) -> T {
    let [gx, gy, gz] = GRAD3[(hash % 12) as usize];
    g::<T>(gx) * x + g::<T>(gy) * y + g::<T>(gz) * z
}

#[inline]
pub fn grad4_dot<T: NoiseFloat>(hash: u32, x: T, y: T, z: T, w: T) -> T {
    let [gx, gy, gz, gw] = GRAD4[(hash & 31) as usize];
    g::<T>(gx) * x + g::<T>(gy) * y + g::<T>(gz) * z + g::<T>(gw) * w
}
