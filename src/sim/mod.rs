//! Simulation module
//!
//! All physics and bookkeeping lives here. Nothing in this module renders,
//! plays sound or touches the platform:
//! - Each frame is one `step(prev, dt) -> next` transform
//! - Side effects leave as `SimEvent` records
//! - Randomness comes from an injected `RandomSource`

pub mod collision;
pub mod config;
pub mod interaction;
pub mod layout;
pub mod lifecycle;
pub mod rng;
pub mod score;
pub mod state;
pub mod tick;

pub use collision::{CollisionResult, coin_peg_collision, reflect_velocity};
pub use config::{PointerConfig, SceneConfig, SceneKind, ScoreRule, SpawnConfig};
pub use interaction::{PointerOutcome, next_tilt, resolve_pointer};
pub use layout::build_board;
pub use lifecycle::{IntervalTimer, retire_completed, spawn};
pub use rng::{RandomSource, ScriptedRandom};
pub use score::Scoreboard;
pub use state::{
    Bin, Board, Coin, CoinId, Divider, Peg, Platform, PlatformKind, Rgb, SimEvent, SimState,
};
pub use tick::{StepOutcome, step};
