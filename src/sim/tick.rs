//! Per-frame simulation step
//!
//! One integrator serves both scenes. The `SceneConfig` switches phases on
//! and off: the lava lamp has platforms, fading and no capture line; the
//! Galton board has side walls, dividers, pegs and bins.
//!
//! Per active coin, in order:
//! 1. gravity, candidate position, spin
//! 2. side walls, dividers, pegs (against the candidate position)
//! 3. commit position, then platforms (landing / wall bounce)
//! 4. per-frame friction, ageing, fading
//! 5. capture line (bins + score)

use glam::Vec2;

use super::collision::{
    beyond_side_walls, bin_at, coin_lands_on_platform, coin_peg_collision, coin_wall_contact,
    divider_blocks, reflect_velocity,
};
use super::config::SceneConfig;
use super::rng::RandomSource;
use super::score::roll_capture_points;
use super::state::{Bin, Board, Coin, Platform, PlatformKind, SimEvent, SimState};

/// Result of one frame
#[derive(Debug, Clone)]
pub struct StepOutcome {
    /// Replacement state for the frame
    pub state: SimState,
    pub events: Vec<SimEvent>,
    /// Sum of every capture this frame, to be applied as one update
    pub score_delta: u64,
}

/// Advance the simulation by `dt` seconds
///
/// `prev` is left untouched; the caller swaps in `outcome.state` in one go so
/// readers never see a half-updated frame.
pub fn step(
    prev: &SimState,
    board: &Board,
    config: &SceneConfig,
    dt: f32,
    rng: &mut dyn RandomSource,
) -> StepOutcome {
    let mut next = prev.clone();
    next.elapsed += dt;

    let mut events = Vec::new();
    let mut score_delta = 0u64;

    let SimState { coins, bins, .. } = &mut next;
    for coin in coins.iter_mut() {
        if !coin.active {
            continue;
        }

        integrate_coin(coin, board, config, dt, rng);

        if let Some(line) = config.capture_line {
            if coin.active && coin.pos.y <= line {
                if let Some(event) = capture(coin, bins, config, rng) {
                    if let SimEvent::Captured { points, .. } = &event {
                        score_delta += u64::from(*points);
                    }
                    events.push(event);
                }
            }
        }
    }

    StepOutcome {
        state: next,
        events,
        score_delta,
    }
}

fn integrate_coin(
    coin: &mut Coin,
    board: &Board,
    config: &SceneConfig,
    dt: f32,
    rng: &mut dyn RandomSource,
) {
    let radius = coin.radius();

    coin.vel.y += config.gravity * dt;
    let mut next = coin.pos + coin.vel * dt;
    coin.rotation += coin.rotation_speed * dt;

    // Side walls: bounce and cancel this step's horizontal move
    if let Some(half_width) = config.wall_half_width {
        if beyond_side_walls(next.x, half_width) {
            coin.vel.x *= -config.wall_restitution;
            next.x = coin.pos.x;
        }
    }

    for divider in &board.dividers {
        if divider_blocks(next.truncate(), radius, divider) {
            coin.vel.x *= -config.divider_restitution;
            // Re-apply at once so a thin divider can't be crossed in one step
            next.x = coin.pos.x + coin.vel.x * dt;
        }
    }

    // Responses are sequential: a second overlapping peg sees the velocity
    // already changed by the first
    for peg in &board.pegs {
        let contact = coin_peg_collision(next.truncate(), radius, peg);
        if !contact.hit {
            continue;
        }
        if contact.has_normal() {
            let reflected = reflect_velocity(coin.vel.truncate(), contact.normal);
            coin.vel.x = reflected.x + rng.centered() * config.peg_jitter;
            coin.vel.y = reflected.y;
            next += (contact.normal * contact.penetration).extend(0.0);
        } else {
            // Centres coincide: nothing to reflect about, just push out
            next += (Vec2::Y * contact.penetration).extend(0.0);
        }
    }

    coin.pos = next;

    for platform in &board.platforms {
        match platform.kind {
            PlatformKind::Slab => {
                if coin_lands_on_platform(coin.pos, coin.vel, radius, platform) {
                    land_on(coin, platform, config);
                }
            }
            PlatformKind::Wall => {
                if let Some((x, side)) = coin_wall_contact(coin.pos, radius, platform) {
                    coin.pos.x = x;
                    // Only flip if still heading into the wall
                    if coin.vel.x * side < 0.0 {
                        coin.vel.x *= -config.wall_restitution;
                    }
                }
            }
        }
    }

    // Arcade friction: per frame, not scaled by dt
    coin.vel.x *= config.roll_friction;
    coin.vel.z *= config.depth_friction;

    coin.age += dt;
    if let Some(max_age) = config.max_age {
        if coin.age > max_age {
            coin.deactivate();
        }
    }

    if let Some(fade_line) = config.fade_line {
        if coin.pos.y < fade_line {
            coin.opacity = (coin.opacity - config.fade_rate * dt).max(0.0);
            if coin.opacity <= 0.0 {
                coin.deactivate();
            }
        }
    }
}

/// Rest on the slab top, bounce, and pick up speed down the slope
fn land_on(coin: &mut Coin, platform: &Platform, config: &SceneConfig) {
    coin.vel.y = -coin.vel.y * config.bounce_damping;
    coin.pos.y = platform.top() + coin.radius();
    coin.vel.x += platform.tilt().sin() * config.slope_push;
    coin.rotation_speed = coin.vel.x * config.spin_factor;
}

/// Resolve a coin that reached the capture line. Always deactivates it.
fn capture(
    coin: &mut Coin,
    bins: &mut [Bin],
    config: &SceneConfig,
    rng: &mut dyn RandomSource,
) -> Option<SimEvent> {
    coin.deactivate();

    let Some(index) = bin_at(coin.pos.x, bins) else {
        log::debug!("Coin {} missed every bin at x={:.2}", coin.id, coin.pos.x);
        return None;
    };

    let bin = &mut bins[index];
    bin.count += 1;
    let points = roll_capture_points(&config.score, rng);
    log::debug!("Coin {} captured by {} (+{})", coin.id, bin.id, points);

    Some(SimEvent::Captured {
        coin: coin.id.clone(),
        bin: bin.id.clone(),
        pos: coin.pos,
        color: coin.color,
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::{COIN_RADIUS, PEG_RADIUS};
    use crate::sim::config::COIN_PALETTE;
    use crate::sim::layout::galton_bins;
    use crate::sim::rng::ScriptedRandom;
    use crate::sim::state::{Divider, Peg};
    use glam::Vec3;
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 60.0;

    fn coin_at(state: &mut SimState, pos: Vec3, vel: Vec3) -> usize {
        let id = state.next_coin_id();
        state.coins.push(Coin::new(id, pos, vel, COIN_PALETTE[0]));
        state.coins.len() - 1
    }

    fn single_peg_board(x: f32, y: f32) -> Board {
        Board {
            pegs: vec![Peg {
                id: "peg-0-0".into(),
                pos: Vec3::new(x, y, 0.0),
                radius: PEG_RADIUS,
            }],
            ..Default::default()
        }
    }

    fn slab_board(tilt: f32) -> Board {
        Board {
            platforms: vec![Platform::slab("1", Vec3::ZERO, tilt, 3.0, 0.2, 1.0)],
            ..Default::default()
        }
    }

    fn run(
        state: SimState,
        board: &Board,
        config: &SceneConfig,
        frames: usize,
        rng: &mut dyn RandomSource,
    ) -> SimState {
        (0..frames).fold(state, |s, _| step(&s, board, config, DT, rng).state)
    }

    #[test]
    fn test_step_leaves_previous_state_untouched() {
        let config = SceneConfig::lava_lamp();
        let mut state = SimState::new(Vec::new());
        coin_at(&mut state, Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO);
        let before = state.clone();

        let outcome = step(&state, &Board::default(), &config, DT, &mut ScriptedRandom::constant(0.5));
        assert_eq!(state.coins, before.coins);
        assert!(outcome.state.coins[0].pos.y < 5.0);
        assert!((outcome.state.elapsed - DT).abs() < 1e-6);
    }

    #[test]
    fn test_inactive_coins_are_frozen() {
        let config = SceneConfig::galton_board();
        let mut state = SimState::new(galton_bins());
        let i = coin_at(&mut state, Vec3::new(1.0, 3.0, 0.0), Vec3::new(0.5, -0.5, 0.0));
        state.coins[i].deactivate();
        let frozen = state.coins[i].clone();

        let board = single_peg_board(1.0, 2.8);
        let state = run(state, &board, &config, 120, &mut ScriptedRandom::constant(0.7));
        assert_eq!(state.coins[i], frozen);
    }

    #[test]
    fn test_capture_line_deactivates_same_step() {
        let config = SceneConfig::galton_board();
        let mut state = SimState::new(galton_bins());
        coin_at(&mut state, Vec3::new(0.0, -5.99, 0.0), Vec3::new(0.0, -1.0, 0.0));

        let outcome = step(&state, &Board::default(), &config, DT, &mut ScriptedRandom::constant(0.5));
        let coin = &outcome.state.coins[0];
        assert!(!coin.active);
        assert_eq!(outcome.state.bins[4].count, 1);
        assert_eq!(outcome.events.len(), 1);
        match &outcome.events[0] {
            SimEvent::Captured { bin, points, color, .. } => {
                assert_eq!(bin, "bin-4");
                assert_eq!(*points, 20);
                assert_eq!(*color, COIN_PALETTE[0]);
            }
            other => panic!("unexpected event {other:?}"),
        }
        assert_eq!(outcome.score_delta, 20);
    }

    #[test]
    fn test_capture_without_bin_still_deactivates() {
        let config = SceneConfig::galton_board();
        let mut state = SimState::new(galton_bins());
        coin_at(&mut state, Vec3::new(5.5, -5.99, 0.0), Vec3::new(0.0, -1.0, 0.0));

        let outcome = step(&state, &Board::default(), &config, DT, &mut ScriptedRandom::constant(0.5));
        assert!(!outcome.state.coins[0].active);
        assert!(outcome.events.is_empty());
        assert_eq!(outcome.score_delta, 0);
        assert!(outcome.state.bins.iter().all(|b| b.count == 0));
    }

    #[test]
    fn test_captures_in_one_frame_are_batched() {
        let config = SceneConfig::galton_board();
        let mut state = SimState::new(galton_bins());
        coin_at(&mut state, Vec3::new(0.0, -5.99, 0.0), Vec3::new(0.0, -1.0, 0.0));
        coin_at(&mut state, Vec3::new(-4.4, -5.99, 0.0), Vec3::new(0.0, -1.0, 0.0));

        let outcome = step(&state, &Board::default(), &config, DT, &mut ScriptedRandom::new(&[0.0, 0.99]));
        let total: u64 = outcome
            .events
            .iter()
            .map(|e| match e {
                SimEvent::Captured { points, .. } => u64::from(*points),
                _ => 0,
            })
            .sum();
        assert_eq!(outcome.events.len(), 2);
        assert_eq!(outcome.score_delta, total);
        assert_eq!(outcome.score_delta, 10 + 29);
    }

    #[test]
    fn test_symmetric_drop_onto_peg_drifts() {
        let config = SceneConfig::galton_board();
        let board = single_peg_board(0.0, 0.0);
        let mut state = SimState::new(galton_bins());
        coin_at(&mut state, Vec3::new(0.0, 1.0, 0.0), Vec3::ZERO);

        let state = run(state, &board, &config, 600, &mut ScriptedRandom::new(&[0.8, 0.3, 0.9]));
        assert!(state.coins[0].pos.x.abs() > 1e-3);
    }

    #[test]
    fn test_coincident_peg_pushes_out_without_nan() {
        let mut config = SceneConfig::galton_board();
        // Keep the coin exactly on the peg centre for the contact test
        config.gravity = 0.0;
        let board = single_peg_board(0.0, 0.0);
        let mut state = SimState::new(Vec::new());
        coin_at(&mut state, Vec3::ZERO, Vec3::ZERO);

        let outcome = step(&state, &board, &config, DT, &mut ScriptedRandom::constant(0.5));
        let coin = &outcome.state.coins[0];
        assert!(coin.pos.is_finite() && coin.vel.is_finite());
        // Pushed clear along +Y
        assert!(coin.pos.y >= COIN_RADIUS + PEG_RADIUS - 0.01);
    }

    #[test]
    fn test_side_wall_reflects_and_holds_x() {
        let config = SceneConfig::galton_board();
        let mut state = SimState::new(galton_bins());
        coin_at(&mut state, Vec3::new(4.79, 0.0, 0.0), Vec3::new(2.0, 0.0, 0.0));

        let outcome = step(&state, &Board::default(), &config, DT, &mut ScriptedRandom::constant(0.5));
        let coin = &outcome.state.coins[0];
        assert!((coin.pos.x - 4.79).abs() < 1e-6);
        assert!((coin.vel.x - (-2.0 * 0.8 * config.roll_friction)).abs() < 1e-4);
    }

    #[test]
    fn test_divider_bounces_back_same_step() {
        let config = SceneConfig::galton_board();
        let board = Board {
            dividers: vec![Divider {
                id: "divider-1".into(),
                pos: Vec2::new(1.0, -6.0),
                width: 0.1,
                height: 4.0,
            }],
            ..Default::default()
        };
        let mut state = SimState::new(Vec::new());
        coin_at(&mut state, Vec3::new(0.62, -5.0, 0.0), Vec3::new(3.0, 0.0, 0.0));

        let outcome = step(&state, &board, &config, DT, &mut ScriptedRandom::constant(0.5));
        let coin = &outcome.state.coins[0];
        assert!(coin.vel.x < 0.0);
        assert!(coin.pos.x < 0.62);
    }

    #[test]
    fn test_landing_on_tilted_slab() {
        let config = SceneConfig::lava_lamp();
        let board = slab_board(0.2);
        let mut state = SimState::new(Vec::new());
        coin_at(&mut state, Vec3::new(0.0, 0.41, 0.0), Vec3::new(0.0, -1.0, 0.0));

        let outcome = step(&state, &board, &config, DT, &mut ScriptedRandom::constant(0.5));
        let coin = &outcome.state.coins[0];
        assert!(coin.vel.y > 0.0);
        assert!((coin.pos.y - (0.1 + COIN_RADIUS)).abs() < 1e-5);
        assert!(coin.vel.x > 0.0);
        assert!(coin.rotation_speed > 0.0);
    }

    #[test]
    fn test_nudged_coin_rolls_with_slope_after_next_contact() {
        let config = SceneConfig::lava_lamp();
        let board = slab_board(0.2);
        let mut state = SimState::new(Vec::new());
        // Resting on the slab, nudged up with a slight leftward drift
        coin_at(&mut state, Vec3::new(0.0, 0.1 + COIN_RADIUS, 0.0), Vec3::new(-0.1, 1.5, 0.0));

        let mut rng = ScriptedRandom::constant(0.5);
        let mut landed = None;
        for _ in 0..240 {
            state = step(&state, &board, &config, DT, &mut rng).state;
            if state.coins[0].rotation_speed != 0.0 {
                landed = Some(state.coins[0].clone());
                break;
            }
        }
        let coin = landed.expect("coin should land again");
        assert!(coin.vel.x > 0.0, "sin(0.2) > 0 must push vx positive");
    }

    #[test]
    fn test_lava_wall_bounces() {
        let config = SceneConfig::lava_lamp();
        let board = Board {
            platforms: vec![Platform::wall("wall-right", Vec3::new(4.5, 2.0, 0.0), 0.2, 18.0, 1.0)],
            ..Default::default()
        };
        let mut state = SimState::new(Vec::new());
        coin_at(&mut state, Vec3::new(4.05, 0.0, 0.0), Vec3::new(5.0, 0.0, 0.0));

        let outcome = step(&state, &board, &config, DT, &mut ScriptedRandom::constant(0.5));
        let coin = &outcome.state.coins[0];
        assert!(coin.vel.x < 0.0);
        assert!(coin.pos.x <= 4.5 - 0.1 - COIN_RADIUS + 1e-5);
    }

    #[test]
    fn test_fades_out_below_line() {
        let config = SceneConfig::lava_lamp();
        let mut state = SimState::new(Vec::new());
        coin_at(&mut state, Vec3::new(0.0, -11.0, 0.0), Vec3::ZERO);

        let mut rng = ScriptedRandom::constant(0.5);
        let faded = step(&state, &Board::default(), &config, DT, &mut rng).state;
        assert!(faded.coins[0].opacity < 1.0);
        assert!(faded.coins[0].active);

        // 2.0 opacity per second: gone within ~0.5 s
        let gone = run(faded, &Board::default(), &config, 40, &mut rng);
        assert_eq!(gone.coins[0].opacity, 0.0);
        assert!(!gone.coins[0].active);
    }

    #[test]
    fn test_max_age_retires() {
        let config = SceneConfig::lava_lamp();
        let mut state = SimState::new(Vec::new());
        let i = coin_at(&mut state, Vec3::new(0.0, 5.0, 0.0), Vec3::ZERO);
        state.coins[i].age = 59.99;

        let outcome = step(&state, &Board::default(), &config, DT, &mut ScriptedRandom::constant(0.5));
        assert!(!outcome.state.coins[i].active);
    }

    #[test]
    fn test_depth_and_roll_friction_per_frame() {
        let config = SceneConfig::lava_lamp();
        let mut state = SimState::new(Vec::new());
        coin_at(&mut state, Vec3::new(0.0, 5.0, 0.0), Vec3::new(1.0, 0.0, 1.0));

        let outcome = step(&state, &Board::default(), &config, DT, &mut ScriptedRandom::constant(0.5));
        let coin = &outcome.state.coins[0];
        assert!((coin.vel.x - 0.98).abs() < 1e-6);
        assert!((coin.vel.z - 0.95).abs() < 1e-6);
    }

    proptest! {
        #[test]
        fn prop_peg_bounce_speed_bounded(
            angle in 0.0f32..std::f32::consts::TAU,
            dist in 0.05f32..0.44,
            vx in -3.0f32..3.0,
            vy in -3.0f32..3.0,
            r in 0.0f32..1.0,
        ) {
            let mut config = SceneConfig::galton_board();
            config.wall_half_width = None;
            config.capture_line = None;
            let board = single_peg_board(0.0, 0.0);

            let mut state = SimState::new(Vec::new());
            let pos = Vec3::new(angle.cos() * dist, angle.sin() * dist, 0.0);
            coin_at(&mut state, pos, Vec3::new(vx, vy, 0.0));

            // Speed right before the collision response (gravity already applied)
            let before = Vec2::new(vx, vy + config.gravity * DT).length();
            let outcome = step(&state, &board, &config, DT, &mut ScriptedRandom::constant(r));
            let after = outcome.state.coins[0].vel.truncate().length();
            prop_assert!(after <= before + config.peg_jitter / 2.0 + 1e-4);
        }
    }
}
