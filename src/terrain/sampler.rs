//! Deterministic 2D coherent noise primitive.

use noise::{NoiseFn, Perlin};

/// Stateless 2D coherent noise sampler with output in `[0, 1]`.
///
/// Wraps a seeded Perlin permutation. Sampling carries no history: the value
/// depends only on the coordinates and the seed, so any call order (and any
/// thread) observes the same results.
pub struct NoiseSampler {
    perlin: Perlin,
}

impl NoiseSampler {
    /// Creates a sampler for the given seed.
    pub fn new(seed: u32) -> Self {
        Self {
            perlin: Perlin::new(seed),
        }
    }

    /// Samples coherent noise at (x, y), returning a value in `[0, 1]`.
    ///
    /// The underlying gradient noise is continuous everywhere, including
    /// across integer lattice boundaries. Its native `[-1, 1]` output is
    /// remapped to `[0, 1]` and clamped.
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let raw = self.perlin.get([x, y]);
        ((raw + 1.0) * 0.5).clamp(0.0, 1.0)
    }
}

/// Remaps a raw `[0, 1]` sample to the signed `[-1, 1]` range used by every
/// downstream consumer.
///
/// Applied exactly once per raw sample inside the octave accumulation loop;
/// callers of [`NoiseSampler::sample`] must not apply it a second time.
pub fn to_signed(value: f64) -> f64 {
    value * 2.0 - 1.0
}
