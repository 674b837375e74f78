//! Score accounting
//!
//! The counter only ever goes up. A short "just changed" pulse is raised on
//! every increase so the HUD can animate it; the pulse never touches the
//! counter itself.

use serde::{Deserialize, Serialize};

use super::config::ScoreRule;
use super::rng::RandomSource;
use crate::consts::SCORE_PULSE_SECS;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    score: u64,
    /// Seconds left on the "score just changed" pulse
    pulse: f32,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    /// Apply one batched increment
    pub fn add(&mut self, delta: u64) {
        if delta == 0 {
            return;
        }
        self.score += delta;
        self.pulse = SCORE_PULSE_SECS;
    }

    /// Count the pulse down
    pub fn tick(&mut self, dt: f32) {
        if self.pulse > 0.0 {
            self.pulse = (self.pulse - dt).max(0.0);
        }
    }

    pub fn just_changed(&self) -> bool {
        self.pulse > 0.0
    }

    /// Session reset (driven from outside the simulation)
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Points for one capture: base plus a bonus in [0, rule.bonus)
pub fn roll_capture_points(rule: &ScoreRule, rng: &mut dyn RandomSource) -> u32 {
    if rule.bonus == 0 {
        return rule.base;
    }
    let bonus = ((rng.next_f32() * rule.bonus as f32) as u32).min(rule.bonus - 1);
    rule.base + bonus
}
