//! Coin population management
//!
//! Spawning is capped and silent when full. Retirement is two-phase: the
//! integrator only flips `active` off, and a coarser sweep drops inactive
//! coins later, so the collection does not churn every frame.

use glam::Vec3;

use super::config::{COIN_PALETTE, SpawnConfig};
use super::rng::RandomSource;
use super::state::{Coin, SimEvent, SimState};

/// Try to add one coin; `None` when the active population is at the cap
pub fn spawn(state: &mut SimState, config: &SpawnConfig, rng: &mut dyn RandomSource) -> Option<SimEvent> {
    let active = state.active_count();
    if active >= config.cap {
        log::debug!("Spawn skipped: {} active coins (cap {})", active, config.cap);
        return None;
    }

    let id = state.next_coin_id();
    let pos = config.origin + Vec3::new(rng.centered() * config.lateral_spread, 0.0, 0.0);
    let vel = Vec3::new(rng.centered() * config.lateral_speed, 0.0, 0.0);
    let color = COIN_PALETTE[rng.index(COIN_PALETTE.len())];

    let mut coin = Coin::new(id.clone(), pos, vel, color);
    coin.rotation_speed = config.spin_base + rng.next_f32() * config.spin_range;
    coin.scale = config.scale;

    log::debug!("Coin spawned: {} at ({:.2}, {:.2})", id, pos.x, pos.y);
    state.coins.push(coin);

    Some(SimEvent::Spawned { coin: id, pos, color })
}

/// Keep only active coins
///
/// Pure and stable: running it twice in a row gives the same collection.
pub fn retire_completed(coins: &[Coin]) -> Vec<Coin> {
    coins.iter().filter(|c| c.active).cloned().collect()
}

/// Repeating countdown driven by frame deltas
///
/// With jitter, each period is `period + r * jitter`, re-rolled on firing.
#[derive(Debug, Clone)]
pub struct IntervalTimer {
    period: f32,
    jitter: f32,
    remaining: f32,
}

impl IntervalTimer {
    pub fn new(period: f32, jitter: f32) -> Self {
        Self {
            period,
            jitter,
            remaining: period,
        }
    }

    /// Advance by `dt`; true when the timer fired this call
    pub fn tick(&mut self, dt: f32, rng: &mut dyn RandomSource) -> bool {
        self.remaining -= dt;
        if self.remaining > 0.0 {
            return false;
        }
        let next = self.period + rng.next_f32() * self.jitter;
        // Keep the overshoot, but never queue a backlog of firings
        self.remaining = (self.remaining + next).max(f32::EPSILON);
        true
    }

    /// Seconds until the next firing
    pub fn remaining(&self) -> f32 {
        self.remaining
    }
}
