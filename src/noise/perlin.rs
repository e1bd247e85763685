//! Classic 3D gradient ("improved Perlin") noise.
//!
//! Arithmetic is single precision throughout and the gradient table, fade
//! curve and interpolation order are fixed, so a given table state produces
//! bit-identical samples on every run.

use super::permutation::PermutationTable;

/// Quintic fade curve `6t^5 - 15t^4 + 10t^3`.
#[inline(always)]
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline(always)]
fn lerp(t: f32, a: f32, b: f32) -> f32 {
    a + t * (b - a)
}

/// Dot product of the offset with one of 12 edge gradients, picked by the low
/// four hash bits (16 cases, four of them repeated).
#[inline(always)]
fn grad(hash: usize, x: f32, y: f32, z: f32) -> f32 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    let u = if h & 1 == 0 { u } else { -u };
    let v = if h & 2 == 0 { v } else { -v };
    u + v
}

/// Gradient noise sampler. Owns its permutation table; reseeding replaces the
/// table, sampling only reads it.
#[derive(Debug, Clone, Default)]
pub struct PerlinNoise {
    table: PermutationTable,
}

impl PerlinNoise {
    /// Sampler over the unshuffled canonical table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sampler whose table is shuffled for `seed`.
    pub fn with_seed(seed: u32) -> Self {
        Self {
            table: PermutationTable::seeded(seed),
        }
    }

    /// Resets the table to canonical order and reshuffles it for `seed`.
    pub fn reseed(&mut self, seed: u32) {
        self.table.reseed(seed);
    }

    pub fn table(&self) -> &PermutationTable {
        &self.table
    }

    /// Noise at `(x, y, z)`, roughly in `[-1, 1]`. Zero on every lattice point.
    #[allow(clippy::many_single_char_names)]
    pub fn sample(&self, x: f32, y: f32, z: f32) -> f32 {
        let p = &self.table;

        let xf = x.floor();
        let yf = y.floor();
        let zf = z.floor();

        let xi = (xf as i32 & 255) as usize;
        let yi = (yf as i32 & 255) as usize;
        let zi = (zf as i32 & 255) as usize;

        let x = x - xf;
        let y = y - yf;
        let z = z - zf;

        let u = fade(x);
        let v = fade(y);
        let w = fade(z);

        let a = p.get(xi) + yi;
        let aa = p.get(a) + zi;
        let ab = p.get(a + 1) + zi;
        let b = p.get(xi + 1) + yi;
        let ba = p.get(b) + zi;
        let bb = p.get(b + 1) + zi;

        let x1 = x - 1.0;
        let y1 = y - 1.0;
        let z1 = z - 1.0;

        lerp(
            w,
            lerp(
                v,
                lerp(u, grad(p.get(aa), x, y, z), grad(p.get(ba), x1, y, z)),
                lerp(u, grad(p.get(ab), x, y1, z), grad(p.get(bb), x1, y1, z)),
            ),
            lerp(
                v,
                lerp(u, grad(p.get(aa + 1), x, y, z1), grad(p.get(ba + 1), x1, y, z1)),
                lerp(u, grad(p.get(ab + 1), x, y1, z1), grad(p.get(bb + 1), x1, y1, z1)),
            ),
        )
    }
}
