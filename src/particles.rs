//! Sparkle particles
//!
//! Purely visual: nothing in the simulation reads them. Bursts are spawned
//! around a point, fall under light gravity and expire when their life runs
//! out.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::sim::{RandomSource, Rgb};

/// Light gravity applied to particles (u/s²)
pub const PARTICLE_GRAVITY: f32 = -9.81 * 0.1;

/// Default particle cap (matches the instanced mesh size on the web side)
pub const DEFAULT_MAX_PARTICLES: usize = 100;

/// A single sparkle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticleData {
    pub pos: Vec3,
    pub vel: Vec3,
    /// Seconds left; removed at or below zero
    pub life: f32,
    pub max_life: f32,
    pub size: f32,
    pub color: Rgb,
}

/// Shape of one burst
///
/// Spans are full widths centred on zero, except `lift` which is `0..lift`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BurstSpec {
    pub count: usize,
    /// Position jitter span on x/y
    pub spread: f32,
    /// Position jitter span on z
    pub depth_spread: f32,
    /// Horizontal velocity span
    pub lateral: f32,
    /// Upward velocity range
    pub lift: f32,
    /// Depth velocity span
    pub depth: f32,
    /// Lifetime = life_base + r * life_range
    pub life_base: f32,
    pub life_range: f32,
    /// Size = size_base + r * size_range
    pub size_base: f32,
    pub size_range: f32,
}

impl BurstSpec {
    /// Lava lamp: coin nudged
    pub const LAVA_HIT: BurstSpec = BurstSpec {
        count: 5,
        spread: 0.5,
        depth_spread: 0.5,
        lateral: 2.0,
        lift: 3.0,
        depth: 2.0,
        life_base: 1.0,
        life_range: 0.0,
        size_base: 0.1,
        size_range: 0.0,
    };

    /// Galton board: coin nudged
    pub const GALTON_HIT: BurstSpec = BurstSpec {
        count: 6,
        spread: 0.4,
        depth_spread: 0.0,
        lateral: 1.5,
        lift: 2.0,
        depth: 0.2,
        life_base: 0.8,
        life_range: 0.4,
        size_base: 0.06,
        size_range: 0.03,
    };

    /// Galton board: coin dropped into a bin
    pub const GALTON_CAPTURE: BurstSpec = BurstSpec {
        count: 12,
        spread: 0.0,
        depth_spread: 0.0,
        lateral: 2.0,
        lift: 2.0,
        depth: 0.0,
        life_base: 0.6,
        life_range: 0.4,
        size_base: 0.07,
        size_range: 0.03,
    };
}

/// Live particles for one scene
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<ParticleData>,
    max_particles: usize,
}

impl Default for ParticleField {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_PARTICLES)
    }
}

impl ParticleField {
    pub fn new(max_particles: usize) -> Self {
        Self {
            particles: Vec::new(),
            max_particles,
        }
    }

    pub fn max_particles(&self) -> usize {
        self.max_particles
    }

    /// Change the cap; excess oldest particles are dropped immediately
    pub fn set_max_particles(&mut self, max: usize) {
        self.max_particles = max;
        self.enforce_cap();
    }

    /// Spawn a burst centred on `origin`
    pub fn burst(&mut self, origin: Vec3, color: Rgb, spec: &BurstSpec, rng: &mut dyn RandomSource) {
        if self.max_particles == 0 {
            return;
        }
        for _ in 0..spec.count {
            let pos = origin
                + Vec3::new(
                    rng.centered() * spec.spread,
                    rng.centered() * spec.spread,
                    rng.centered() * spec.depth_spread,
                );
            let vel = Vec3::new(
                rng.centered() * spec.lateral,
                rng.next_f32() * spec.lift,
                rng.centered() * spec.depth,
            );
            let life = spec.life_base + rng.next_f32() * spec.life_range;
            let size = spec.size_base + rng.next_f32() * spec.size_range;
            self.particles.push(ParticleData {
                pos,
                vel,
                life,
                max_life: life,
                size,
                color,
            });
        }
        self.enforce_cap();
    }

    /// Integrate and expire
    pub fn update(&mut self, dt: f32) {
        for particle in self.particles.iter_mut() {
            particle.pos += particle.vel * dt;
            particle.vel.y += PARTICLE_GRAVITY * dt;
            particle.life -= dt;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    pub fn particles(&self) -> &[ParticleData] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    fn enforce_cap(&mut self) {
        if self.particles.len() > self.max_particles {
            let excess = self.particles.len() - self.max_particles;
            self.particles.drain(..excess);
        }
    }
}
