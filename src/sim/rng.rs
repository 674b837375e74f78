//! Injectable randomness
//!
//! The simulation only ever asks for "a float in [0, 1)". Live scenes use a
//! PCG seeded from entropy; tests plug in a fixed sequence.

use rand::Rng;
use rand_pcg::Pcg32;

/// Source of uniform floats in [0, 1)
pub trait RandomSource {
    /// Next float in [0, 1)
    fn next_f32(&mut self) -> f32;

    /// Next float in [-0.5, 0.5)
    fn centered(&mut self) -> f32 {
        self.next_f32() - 0.5
    }

    /// Uniform index in 0..n (0 when n == 0)
    fn index(&mut self, n: usize) -> usize {
        if n == 0 {
            return 0;
        }
        ((self.next_f32() * n as f32) as usize).min(n - 1)
    }
}

impl RandomSource for Pcg32 {
    fn next_f32(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Cycles through a fixed list of values
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<f32>,
    cursor: usize,
}

impl ScriptedRandom {
    /// Values are clamped into [0, 1); an empty list behaves like `[0.5]`
    pub fn new(values: &[f32]) -> Self {
        let values = if values.is_empty() {
            vec![0.5]
        } else {
            values
                .iter()
                .map(|v| v.clamp(0.0, 1.0 - f32::EPSILON))
                .collect()
        };
        Self { values, cursor: 0 }
    }

    /// Always returns the same value
    pub fn constant(value: f32) -> Self {
        Self::new(&[value])
    }
}

impl RandomSource for ScriptedRandom {
    fn next_f32(&mut self) -> f32 {
        let v = self.values[self.cursor % self.values.len()];
        self.cursor = self.cursor.wrapping_add(1);
        v
    }
}
