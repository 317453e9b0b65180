//! Seedable 2D simplex noise for the fluid background.
//!
//! The permutation table is derived from a cheap `sin` hash rather than a
//! shuffle, so the table may contain repeats. That skew is fine for visual
//! texture and keeps the output stable for a given seed.

use noise::{NoiseFn, OpenSimplex};

/// Skewing factor for 2D: (sqrt(3) - 1) / 2
const F2: f64 = 0.366_025_403_784_438_6;
/// Unskewing factor for 2D: (3 - sqrt(3)) / 6
const G2: f64 = 0.211_324_865_405_187_1;

/// Output scale bringing the summed corner contributions to roughly [-1, 1]
const OUTPUT_SCALE: f64 = 70.0;

/// Gradient directions (x/y of the classic 12-vector 3D set)
const GRAD2: [[f64; 2]; 12] = [
    [1.0, 1.0],
    [-1.0, 1.0],
    [1.0, -1.0],
    [-1.0, -1.0],
    [1.0, 0.0],
    [-1.0, 0.0],
    [1.0, 0.0],
    [-1.0, 0.0],
    [0.0, 1.0],
    [0.0, -1.0],
    [0.0, 1.0],
    [0.0, -1.0],
];

/// `frac(sin(x) * 10000)`, in [0, 1)
pub fn seeded_random(x: f64) -> f64 {
    let v = x.sin() * 10000.0;
    v - v.floor()
}

/// 2D simplex noise generator with a hashed permutation table.
///
/// Immutable after construction; two instances built from the same seed
/// produce identical output.
#[derive(Clone)]
pub struct SimplexNoise {
    perm: [u8; 512],
    perm_mod12: [u8; 512],
}

impl SimplexNoise {
    /// Build the permutation tables for `seed`
    pub fn new(seed: u32) -> Self {
        let mut base = [0u8; 256];
        for (i, slot) in base.iter_mut().enumerate() {
            let r = seeded_random(f64::from(seed) + i as f64);
            *slot = (r * 256.0).floor().clamp(0.0, 255.0) as u8;
        }

        let mut perm = [0u8; 512];
        let mut perm_mod12 = [0u8; 512];
        for (i, (p, m)) in perm.iter_mut().zip(perm_mod12.iter_mut()).enumerate() {
            *p = base[i & 255];
            *m = *p % 12;
        }

        Self { perm, perm_mod12 }
    }

    /// Doubled permutation table (512 entries)
    pub fn permutation(&self) -> &[u8; 512] {
        &self.perm
    }

    /// Sample noise at (x, y). Returns a value in approximately [-1, 1].
    pub fn noise_2d(&self, x: f64, y: f64) -> f64 {
        // Skew into simplex space to find the cell
        let s = (x + y) * F2;
        let i = (x + s).floor();
        let j = (y + s).floor();

        // Unskew the cell origin back to (x, y) space
        let t = (i + j) * G2;
        let x0 = x - (i - t);
        let y0 = y - (j - t);

        // Lower or upper triangle of the unit square
        let (i1, j1): (usize, usize) = if x0 > y0 { (1, 0) } else { (0, 1) };

        let x1 = x0 - i1 as f64 + G2;
        let y1 = y0 - j1 as f64 + G2;
        let x2 = x0 - 1.0 + 2.0 * G2;
        let y2 = y0 - 1.0 + 2.0 * G2;

        // Two's complement masking wraps negative cells into the table
        let ii = (i as i64 & 255) as usize;
        let jj = (j as i64 & 255) as usize;

        let gi0 = self.perm_mod12[ii + self.perm[jj] as usize] as usize;
        let gi1 = self.perm_mod12[ii + i1 + self.perm[jj + j1] as usize] as usize;
        let gi2 = self.perm_mod12[ii + 1 + self.perm[jj + 1] as usize] as usize;

        let n0 = corner(gi0, x0, y0);
        let n1 = corner(gi1, x1, y1);
        let n2 = corner(gi2, x2, y2);

        OUTPUT_SCALE * (n0 + n1 + n2)
    }
}

#[inline]
fn corner(gi: usize, x: f64, y: f64) -> f64 {
    let t = 0.5 - x * x - y * y;
    if t < 0.0 {
        return 0.0;
    }
    let t2 = t * t;
    let g = &GRAD2[gi];
    t2 * t2 * (g[0] * x + g[1] * y)
}

impl NoiseFn<f64, 2> for SimplexNoise {
    fn get(&self, point: [f64; 2]) -> f64 {
        self.noise_2d(point[0], point[1])
    }
}

/// Noise generator selection for the fluid field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NoiseKind {
    /// Hashed-permutation simplex noise (the site's own kernel)
    #[default]
    Simplex,
    /// `noise` crate OpenSimplex, for comparison
    OpenSimplex,
}

impl NoiseKind {
    /// Build a boxed generator for `seed`
    pub fn build(self, seed: u32) -> Box<dyn NoiseFn<f64, 2>> {
        match self {
            NoiseKind::Simplex => Box::new(SimplexNoise::new(seed)),
            NoiseKind::OpenSimplex => Box::new(OpenSimplex::new(seed)),
        }
    }
}
