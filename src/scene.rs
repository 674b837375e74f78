//! Scene driver
//!
//! Owns everything one running toy needs between frames: the preset, the
//! board, the simulation state, the scoreboard, the timers and the RNG. The
//! host calls `frame(dt)` once per display refresh and `pointer_down` on
//! pointer events, always from the same thread.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::consts::MAX_FRAME_DT;
use crate::sim::{
    Bin, Board, Coin, Divider, IntervalTimer, Peg, Platform, PointerOutcome, RandomSource, SceneConfig,
    SceneKind, Scoreboard, SimEvent, SimState, build_board, resolve_pointer, retire_completed, spawn, step,
};

/// One running scene
pub struct Scene<R: RandomSource = Pcg32> {
    config: SceneConfig,
    board: Board,
    state: SimState,
    scoreboard: Scoreboard,
    spawn_timer: IntervalTimer,
    cleanup_timer: IntervalTimer,
    first_interaction: bool,
    running: bool,
    rng: R,
}

impl Scene<Pcg32> {
    /// Scene seeded from entropy (physics is not meant to be reproducible)
    pub fn new(kind: SceneKind) -> Self {
        let rng = Pcg32::seed_from_u64(rand::random());
        Self::with_rng(SceneConfig::for_kind(kind), rng)
    }

    pub fn lava_lamp() -> Self {
        Self::new(SceneKind::LavaLamp)
    }

    pub fn galton_board() -> Self {
        Self::new(SceneKind::GaltonBoard)
    }
}

impl<R: RandomSource> Scene<R> {
    /// Scene with an explicit preset and random source
    pub fn with_rng(config: SceneConfig, rng: R) -> Self {
        let (board, bins) = build_board(config.kind);
        let spawn_timer = IntervalTimer::new(config.spawn.interval, config.spawn.jitter);
        let cleanup_timer = IntervalTimer::new(config.cleanup_interval, 0.0);
        Self {
            config,
            board,
            state: SimState::new(bins),
            scoreboard: Scoreboard::new(),
            spawn_timer,
            cleanup_timer,
            first_interaction: true,
            running: false,
            rng,
        }
    }

    /// Begin stepping and drop the first coin right away
    pub fn start(&mut self) -> Vec<SimEvent> {
        if self.running {
            return Vec::new();
        }
        self.running = true;
        log::info!("Scene started: {}", self.config.kind.as_str());
        spawn(&mut self.state, &self.config.spawn, &mut self.rng)
            .into_iter()
            .collect()
    }

    /// Halt stepping and all timers
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        log::info!(
            "Scene stopped: {} (score {}, {} coins)",
            self.config.kind.as_str(),
            self.scoreboard.score(),
            self.state.coins.len()
        );
    }

    /// Advance one display frame; returns what happened during it
    pub fn frame(&mut self, dt: f32) -> Vec<SimEvent> {
        if !self.running || !dt.is_finite() || dt <= 0.0 {
            return Vec::new();
        }
        let dt = dt.min(MAX_FRAME_DT);

        let outcome = step(&self.state, &self.board, &self.config, dt, &mut self.rng);
        self.state = outcome.state;
        let mut events = outcome.events;

        self.scoreboard.tick(dt);
        self.scoreboard.add(outcome.score_delta);

        if self.spawn_timer.tick(dt, &mut self.rng) {
            events.extend(spawn(&mut self.state, &self.config.spawn, &mut self.rng));
        }

        if self.cleanup_timer.tick(dt, &mut self.rng) {
            let before = self.state.coins.len();
            self.state.coins = retire_completed(&self.state.coins);
            let removed = before - self.state.coins.len();
            if removed > 0 {
                log::debug!("Cleanup removed {} inactive coins", removed);
            }
        }

        events
    }

    /// Handle a pointer press at an already-resolved world point
    ///
    /// `None` means the pick ray hit nothing; it still counts as the first
    /// interaction for background audio.
    pub fn pointer_down(&mut self, point: Option<Vec3>) -> (PointerOutcome, Vec<SimEvent>) {
        let first = self.first_interaction;
        self.first_interaction = false;
        resolve_pointer(
            point,
            first,
            &mut self.state,
            &mut self.board,
            &self.config,
            &mut self.rng,
        )
    }

    /// Read-only view for renderers and serialisation
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            kind: self.config.kind,
            elapsed: self.state.elapsed,
            coins: &self.state.coins,
            platforms: &self.board.platforms,
            pegs: &self.board.pegs,
            dividers: &self.board.dividers,
            bins: &self.state.bins,
            score: self.scoreboard.score(),
            score_pulse: self.scoreboard.just_changed(),
        }
    }

    pub fn kind(&self) -> SceneKind {
        self.config.kind
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn score(&self) -> u64 {
        self.scoreboard.score()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub kind: SceneKind,
    pub elapsed: f32,
    pub coins: &'a [Coin],
    pub platforms: &'a [Platform],
    pub pegs: &'a [Peg],
    pub dividers: &'a [Divider],
    pub bins: &'a [Bin],
    pub score: u64,
    /// Score changed within the last pulse window
    pub score_pulse: bool,
}
