//! # Simplex Noise Implementation
//!
//! Deterministic 2D noise, the sole source of randomness for cave
//! terrain.
//!
//! ## Determinism Guarantee
//!
//! Given the same [`CaveSeed`], sampling at the same coordinates
//! produces **exactly** the same value on any platform, any time.
//! This holds for any coordinates, including positions far outside the
//! chunk currently being generated - the cross-boundary smoothing rule
//! depends on it.
//!
//! ## Precision Boundary
//!
//! World coordinates are converted to `f64` before sampling. The
//! conversion is exact up to 2^53; beyond that, distinct integer
//! coordinates may collapse to the same sample point. Documented, not
//! guarded.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// World seed for deterministic generation.
///
/// All procedural generation derives from this seed. Fixed at world
/// construction, immutable thereafter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct CaveSeed(u64);

impl CaveSeed {
    /// Creates a new seed from a raw value.
    #[inline]
    #[must_use]
    pub const fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Returns the raw seed value.
    #[inline]
    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Draws a fresh seed from OS entropy.
    ///
    /// Used exactly once, at world construction, when the
    /// configuration does not pin a seed.
    #[must_use]
    pub fn random() -> Self {
        let mut rng = StdRng::from_entropy();
        Self(rng.gen())
    }
}

/// A deterministic 2D scalar noise field.
///
/// Implementations must be pure: identical `(x, y)` always yields the
/// identical value, with no internal state beyond the seed, so that
/// sampling is safe from concurrent chunk generations.
pub trait NoiseField {
    /// Samples the field at the given coordinates.
    ///
    /// Returns a value in [-1, 1].
    fn sample(&self, x: f64, y: f64) -> f64;
}

/// Pre-computed permutation table, built once from the seed.
struct PermutationTable {
    /// 256-entry permutation, doubled to avoid index wrapping.
    perm: [u8; 512],
}

impl PermutationTable {
    fn new(seed: CaveSeed) -> Self {
        let mut perm = [0u8; 512];
        for i in 0..256 {
            perm[i] = i as u8;
        }

        // Fisher-Yates shuffle driven by xorshift64. Zero is a fixed
        // point of xorshift, so a zero seed is remapped to a constant.
        let mut state = seed.value();
        if state == 0 {
            state = 0x9E37_79B9_7F4A_7C15;
        }
        for i in (1..256).rev() {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            let j = (state as usize) % (i + 1);
            perm.swap(i, j);
        }

        for i in 0..256 {
            perm[256 + i] = perm[i];
        }

        Self { perm }
    }

    #[inline]
    fn get(&self, index: usize) -> u8 {
        self.perm[index & 511]
    }
}

/// The 8 axis and diagonal gradient directions for 2D simplex.
const GRADIENTS: [[i8; 2]; 8] = [
    [1, 0],
    [-1, 0],
    [0, 1],
    [0, -1],
    [1, 1],
    [-1, 1],
    [1, -1],
    [-1, -1],
];

/// 2D simplex noise generator.
///
/// Produces smooth, continuous values in the range [-1, 1].
///
/// # Performance
///
/// - O(1) per sample
/// - No allocations
///
/// # Example
///
/// ```rust,ignore
/// let noise = SimplexNoise::new(CaveSeed::new(42));
/// let value = noise.sample(100.5, 200.3);
/// assert!(value >= -1.0 && value <= 1.0);
/// ```
pub struct SimplexNoise {
    perm_table: PermutationTable,
}

impl SimplexNoise {
    /// Skewing factor for the 2D simplex grid: (sqrt(3) - 1) / 2.
    const F2: f64 = 0.366_025_403_784_439;
    /// Unskewing factor: (3 - sqrt(3)) / 6.
    const G2: f64 = 0.211_324_865_405_187;

    /// Creates a new generator from a seed.
    #[must_use]
    pub fn new(seed: CaveSeed) -> Self {
        Self {
            perm_table: PermutationTable::new(seed),
        }
    }

    /// Contribution from one corner of the simplex.
    #[inline]
    fn corner(&self, x: f64, y: f64, gradient_hash: u8) -> f64 {
        let t = 0.5 - x * x - y * y;
        if t < 0.0 {
            0.0
        } else {
            let grad = GRADIENTS[(gradient_hash & 7) as usize];
            let t2 = t * t;
            t2 * t2 * (x * f64::from(grad[0]) + y * f64::from(grad[1]))
        }
    }
}

impl NoiseField for SimplexNoise {
    fn sample(&self, x: f64, y: f64) -> f64 {
        // Skew input onto the simplex grid.
        let skew = (x + y) * Self::F2;
        let i = fast_floor(x + skew);
        let j = fast_floor(y + skew);

        // Unskew back to get the first corner.
        let unskew = (i + j) as f64 * Self::G2;
        let x0 = x - (i as f64 - unskew);
        let y0 = y - (j as f64 - unskew);

        // Upper or lower triangle of the simplex cell.
        let (i1, j1) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - f64::from(i1) + Self::G2;
        let y1 = y0 - f64::from(j1) + Self::G2;
        let x2 = x0 - 1.0 + 2.0 * Self::G2;
        let y2 = y0 - 1.0 + 2.0 * Self::G2;

        // Hash cell coordinates into gradient indices.
        let ii = (i & 255) as usize;
        let jj = (j & 255) as usize;
        let gi0 = self.perm_table.get(ii + self.perm_table.get(jj) as usize);
        let gi1 = self
            .perm_table
            .get(ii + i1 as usize + self.perm_table.get(jj + j1 as usize) as usize);
        let gi2 = self.perm_table.get(ii + 1 + self.perm_table.get(jj + 1) as usize);

        let n0 = self.corner(x0, y0, gi0);
        let n1 = self.corner(x1, y1, gi1);
        let n2 = self.corner(x2, y2, gi2);

        // 70.0 scales the summed contributions to [-1, 1].
        70.0 * (n0 + n1 + n2)
    }
}

/// Floor that stays exact for the integer coordinates chunks feed in.
#[inline]
fn fast_floor(x: f64) -> i64 {
    let xi = x as i64;
    if x < xi as f64 {
        xi - 1
    } else {
        xi
    }
}
