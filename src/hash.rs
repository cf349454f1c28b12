// SPDX-License-Identifier: MIT
// Copyright (c) 2021 Marceline Cramer

//! Lattice hashing.
//!
//! Three hash sources are available and all of them can drive any noise
//! engine through [`LatticeHash`]:
//!
//! - [`PermutationTable`]: Ken Perlin's 256-entry table (or a seeded shuffle
//!   of it), cascaded once per axis.
//! - [`ExpandedTable`]: a 1024-entry table shuffled once at first use.
//! - [`Tableless`]: per-axis odd multipliers followed by [`pcg_mix32`].

use crate::random::Pcg32;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Instant;

#[rustfmt::skip]
pub const PERM: [u8; 256] = [
    151, 160, 137,  91,  90,  15, 131,  13, 201,  95,  96,  53, 194, 233,   7, 225,
    140,  36, 103,  30,  69, 142,   8,  99,  37, 240,  21,  10,  23, 190,   6, 148,
    247, 120, 234,  75,   0,  26, 197,  62,  94, 252, 219, 203, 117,  35,  11,  32,
     57, 177,  33,  88, 237, 149,  56,  87, 174,  20, 125, 136, 171, 168,  68, 175,
     74, 165,  71, 134, 139,  48,  27, 166,  77, 146, 158, 231,  83, 111, 229, 122,
     60, 211, 133, 230, 220, 105,  92,  41,  55,  46, 245,  40, 244, 102, 143,  54,
     65,  25,  63, 161,   1, 216,  80,  73, 209,  76, 132, 187, 208,  89,  18, 169,
    200, 196, 135, 130, 116, 188, 159,  86, 164, 100, 109, 198, 173, 186,   3,  64,
     52, 217, 226, 250, 124, 123,   5, 202,  38, 147, 118, 126, 255,  82,  85, 212,
    207, 206,  59, 227,  47,  16,  58,  17, 182, 189,  28,  42, 223, 183, 170, 213,
    119, 248, 152,   2,  44, 154, 163,  70, 221, 153, 101, 155, 167,  43, 172,   9,
    129,  22,  39, 253,  19,  98, 108, 110,  79, 113, 224, 232, 178, 185, 112, 104,
    218, 246,  97, 228, 251,  34, 242, 193, 238, 210, 144,  12, 191, 179, 162, 241,
     81,  51, 145, 235, 249,  14, 239, 107,  49, 192, 214,  31, 181, 199, 106, 157,
    184,  84, 204, 176, 115, 121,  50,  45, 127,   4, 150, 254, 138, 236, 205,  93,
    222, 114,  67,  29,  24,  72, 243, 141, 128, 195,  78,  66, 215,  61, 156, 180,
];

const TABLE_MASK: i32 = 255;

pub const EXPANDED_TABLE_SIZE: usize = 1024;
const EXPANDED_MASK: i32 = EXPANDED_TABLE_SIZE as i32 - 1;

// Spatial-hash multipliers, one per axis. All odd.
const MUL_X: u32 = 73_856_093;
const MUL_Y: u32 = 19_349_663;
const MUL_Z: u32 = 83_492_791;
const MUL_W: u32 = 0x27d4_eb2d;

#[inline(always)]
fn cascade(table: &[u8; 256], h: u8, v: i32) -> u8 {
    table[(i32::from(h).wrapping_add(v) & TABLE_MASK) as usize]
}

#[inline]
pub fn hash1(x: i32) -> u8 {
    PERM[(x & TABLE_MASK) as usize]
}

#[inline]
pub fn hash2(x: i32, y: i32) -> u8 {
    cascade(&PERM, hash1(x), y)
}

#[inline]
pub fn hash3(x: i32, y: i32, z: i32) -> u8 {
    cascade(&PERM, hash2(x, y), z)
}

#[inline]
pub fn hash4(x: i32, y: i32, z: i32, w: i32) -> u8 {
    cascade(&PERM, hash3(x, y, z), w)
}

/// Classic table hash of a 3D lattice point.
#[inline]
pub fn hash3d(x: i32, y: i32, z: i32) -> u8 {
    hash3(x, y, z)
}

#[inline]
pub fn hash3d_to_f32(x: i32, y: i32, z: i32) -> f32 {
    f32::from(hash3d(x, y, z)) * (1.0 / 255.0)
}

#[inline]
pub fn hash3d_to_f64(x: i32, y: i32, z: i32) -> f64 {
    f64::from(hash3d(x, y, z)) * (1.0 / 255.0)
}

/// Three-round xor-shift-multiply avalanche.
#[inline]
pub const fn pcg_mix32(mut x: u32) -> u32 {
    x ^= x >> 16;
    x = x.wrapping_mul(0x7feb_352d);
    x ^= x >> 15;
    x = x.wrapping_mul(0x846c_a68b);
    x ^= x >> 16;
    x
}

/// Tableless hash of a 3D lattice point. Needs no initialisation.
#[inline]
pub fn hash3d_pcg(x: i32, y: i32, z: i32) -> u32 {
    pcg_mix32(
        (x as u32).wrapping_mul(MUL_X)
            ^ (y as u32).wrapping_mul(MUL_Y)
            ^ (z as u32).wrapping_mul(MUL_Z),
    )
}

lazy_static! {
    static ref EXPANDED_PERM: [u16; EXPANDED_TABLE_SIZE] = build_expanded_perm();
}

fn build_expanded_perm() -> [u16; EXPANDED_TABLE_SIZE] {
    let timer = Instant::now();

    let mut perm = [0u16; EXPANDED_TABLE_SIZE];
    for (i, slot) in perm.iter_mut().enumerate() {
        *slot = i as u16;
    }

    // Fisher-Yates with a fixed, seed-free index sequence.
    for i in (1..EXPANDED_TABLE_SIZE).rev() {
        let r = pcg_mix32((i as u32).wrapping_mul(1_664_525));
        let j = (r % (i as u32 + 1)) as usize;
        perm.swap(i, j);
    }

    tracing::debug!(
        "built {}-entry permutation table in {:?}",
        EXPANDED_TABLE_SIZE,
        timer.elapsed()
    );

    perm
}

/// Builds the expanded table now instead of on first lookup.
pub fn warm_up() {
    lazy_static::initialize(&EXPANDED_PERM);
}

#[inline(always)]
fn expanded(v: i32) -> u32 {
    u32::from(EXPANDED_PERM[(v & EXPANDED_MASK) as usize])
}

#[inline(always)]
fn expanded_cascade(h: u32, v: i32) -> u32 {
    expanded((h as i32).wrapping_add(v))
}

/// Expanded-table hash of a 3D lattice point, in `0..1024`.
///
/// Each axis is folded into the previous lookup, `T[(T[(T[x] + y) & 1023] + z) & 1023]`,
/// rather than looking up `T[(T[x] + T[y] + T[z]) & 1023]`. Swapping two
/// axes therefore changes the result.
#[inline]
pub fn hash3d_expanded(x: i32, y: i32, z: i32) -> u32 {
    expanded_cascade(expanded_cascade(expanded(x), y), z)
}

/// Maps integer lattice points to pseudo-random codes.
///
/// Engines only rely on the low bits of the result (`& 7`, `& 31`, `& 255`)
/// and on `% 12`, so implementations may return any range.
pub trait LatticeHash {
    fn hash2(&self, x: i32, y: i32) -> u32;
    fn hash3(&self, x: i32, y: i32, z: i32) -> u32;
    fn hash4(&self, x: i32, y: i32, z: i32, w: i32) -> u32;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PermutationTable {
    perm: [u8; 256],
}

impl PermutationTable {
    pub const CLASSIC: Self = Self { perm: PERM };

    /// Shuffles the identity permutation with [`Pcg32`] seeded from `seed`.
    pub fn from_seed(seed: u64) -> Self {
        let table = Self::from_rng(&mut Pcg32::seed_from_u64(seed));
        tracing::debug!(seed, "seeded permutation table");
        table
    }

    pub fn from_rng<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut perm = [0u8; 256];
        for (i, slot) in perm.iter_mut().enumerate() {
            *slot = i as u8;
        }
        perm.shuffle(rng);
        Self { perm }
    }

    pub fn as_slice(&self) -> &[u8; 256] {
        &self.perm
    }

    #[inline(always)]
    fn lookup(&self, v: i32) -> u8 {
        self.perm[(v & TABLE_MASK) as usize]
    }
}

impl Default for PermutationTable {
    fn default() -> Self {
        Self::CLASSIC
    }
}

impl LatticeHash for PermutationTable {
    #[inline]
    fn hash2(&self, x: i32, y: i32) -> u32 {
        u32::from(cascade(&self.perm, self.lookup(x), y))
    }

    #[inline]
    fn hash3(&self, x: i32, y: i32, z: i32) -> u32 {
        let h = cascade(&self.perm, self.lookup(x), y);
        u32::from(cascade(&self.perm, h, z))
    }

    #[inline]
    fn hash4(&self, x: i32, y: i32, z: i32, w: i32) -> u32 {
        let h = cascade(&self.perm, self.lookup(x), y);
        let h = cascade(&self.perm, h, z);
        u32::from(cascade(&self.perm, h, w))
    }
}

/// Handle to the lazily built 1024-entry table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ExpandedTable;

impl LatticeHash for ExpandedTable {
    #[inline]
    fn hash2(&self, x: i32, y: i32) -> u32 {
        expanded_cascade(expanded(x), y)
    }

    #[inline]
    fn hash3(&self, x: i32, y: i32, z: i32) -> u32 {
        hash3d_expanded(x, y, z)
    }

    #[inline]
    fn hash4(&self, x: i32, y: i32, z: i32, w: i32) -> u32 {
        expanded_cascade(hash3d_expanded(x, y, z), w)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tableless;

impl LatticeHash for Tableless {
    #[inline]
    fn hash2(&self, x: i32, y: i32) -> u32 {
        pcg_mix32((x as u32).wrapping_mul(MUL_X) ^ (y as u32).wrapping_mul(MUL_Y))
    }

    #[inline]
    fn hash3(&self, x: i32, y: i32, z: i32) -> u32 {
        hash3d_pcg(x, y, z)
    }

    #[inline]
    fn hash4(&self, x: i32, y: i32, z: i32, w: i32) -> u32 {
        pcg_mix32(
            (x as u32).wrapping_mul(MUL_X)
                ^ (y as u32).wrapping_mul(MUL_Y)
                ^ (z as u32).wrapping_mul(MUL_Z)
                ^ (w as u32).wrapping_mul(MUL_W),
        )
    }
}

/// Hash source selectable from configuration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HashMode {
    Classic,
    Expanded,
    Tableless,
}

impl Default for HashMode {
    fn default() -> Self {
        HashMode::Classic
    }
}

impl LatticeHash for HashMode {
    #[inline]
    fn hash2(&self, x: i32, y: i32) -> u32 {
        match self {
            HashMode::Classic => PermutationTable::CLASSIC.hash2(x, y),
            HashMode::Expanded => ExpandedTable.hash2(x, y),
            HashMode::Tableless => Tableless.hash2(x, y),
        }
    }

    #[inline]
    fn hash3(&self, x: i32, y: i32, z: i32) -> u32 {
        match self {
            HashMode::Classic => u32::from(hash3(x, y, z)),
            HashMode::Expanded => hash3d_expanded(x, y, z),
            HashMode::Tableless => hash3d_pcg(x, y, z),
        }
    }

    #[inline]
    fn hash4(&self, x: i32, y: i32, z: i32, w: i32) -> u32 {
        match self {
            HashMode::Classic => u32::from(hash4(x, y, z, w)),
            HashMode::Expanded => ExpandedTable.hash4(x, y, z, w),
            HashMode::Tableless => Tableless.hash4(x, y, z, w),
        }
    }
}

impl FromStr for HashMode {
    type Err = crate::error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "classic" => Ok(HashMode::Classic),
            "expanded" => Ok(HashMode::Expanded),
            "tableless" => Ok(HashMode::Tableless),
            _ => Err(crate::error::Error::UnknownHashMode(s.to_string())),
        }
    }
}
