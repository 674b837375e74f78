//! Pointer interaction
//!
//! The renderer resolves the pointer ray to a world-space point; this module
//! decides what that point means. First match wins, and at most one of
//! {tilt a platform, nudge a coin, spawn a coin} happens per press.

use glam::Vec3;

use super::collision::{point_near_coin, point_on_platform};
use super::config::SceneConfig;
use super::lifecycle::spawn;
use super::rng::RandomSource;
use super::state::{Board, SimEvent, SimState};
use crate::consts::{TILT_LIMIT, TILT_STEP};

/// What a pointer press did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerOutcome {
    /// Platform at this index changed tilt
    Tilted(usize),
    /// Coin at this index got a velocity impulse
    Nudged(usize),
    /// Empty space clicked; a spawn was attempted (it may have hit the cap)
    SpawnRequested,
    /// Missing, out-of-bounds, or unmatched point
    Ignored,
}

/// Next tilt after one click: step away from zero, clamped
///
/// Zero tilt counts as positive. A platform already at the limit stays put.
pub fn next_tilt(tilt: f32) -> f32 {
    let direction = if tilt < 0.0 { -1.0 } else { 1.0 };
    (tilt + TILT_STEP * direction).clamp(-TILT_LIMIT, TILT_LIMIT)
}

/// Handle one pointer press
///
/// `first_interaction` is the session's "never clicked before" flag; the
/// caller clears it after this returns.
pub fn resolve_pointer(
    point: Option<Vec3>,
    first_interaction: bool,
    state: &mut SimState,
    board: &mut Board,
    config: &SceneConfig,
    rng: &mut dyn RandomSource,
) -> (PointerOutcome, Vec<SimEvent>) {
    let mut events = Vec::new();
    if first_interaction {
        events.push(SimEvent::BackgroundStarted);
    }

    let Some(point) = point.filter(|p| in_bounds(*p, config)) else {
        return (PointerOutcome::Ignored, events);
    };

    if let Some(index) = board
        .platforms
        .iter()
        .position(|p| p.is_tiltable() && point_on_platform(point, p, config.pointer.platform_margin))
    {
        let platform = &mut board.platforms[index];
        let tilt = next_tilt(platform.tilt());
        platform.rotation.z = tilt;
        log::debug!("Platform {} tilted to {:.2}", platform.id, tilt);
        events.push(SimEvent::PlatformTilted {
            platform: platform.id.clone(),
            tilt,
        });
        return (PointerOutcome::Tilted(index), events);
    }

    if let Some(index) = state
        .coins
        .iter()
        .position(|c| c.active && point_near_coin(point, c.pos, config.pointer.coin_margin))
    {
        let coin = &mut state.coins[index];
        coin.vel.x += rng.centered() * config.pointer.nudge_lateral;
        coin.vel.y += config.pointer.nudge_lift;
        events.push(SimEvent::Hit {
            coin: coin.id.clone(),
            pos: coin.pos,
            color: coin.color,
        });
        return (PointerOutcome::Nudged(index), events);
    }

    if config.pointer.spawn_on_miss {
        events.extend(spawn(state, &config.spawn, rng));
        return (PointerOutcome::SpawnRequested, events);
    }

    (PointerOutcome::Ignored, events)
}

fn in_bounds(point: Vec3, config: &SceneConfig) -> bool {
    let bounds = config.pointer.bounds;
    point.is_finite() && point.x.abs() <= bounds.x && point.y.abs() <= bounds.y
}
