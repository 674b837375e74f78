//! Coinfall - coin physics toys (lava lamp + Galton board)
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (integration, collisions, spawning, scoring)
//! - `scene`: Owns one running scene: state, timers, RNG, pointer handling
//! - `particles`: Particle bursts requested by simulation events
//! - `audio`: Sound intents and volume handling over a pluggable backend
//! - `feedback`: Turns simulation events into audio + particle calls
//! - `settings`: Presentation preferences (volume, particle quality)

pub mod audio;
pub mod feedback;
pub mod particles;
pub mod scene;
pub mod settings;
pub mod sim;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use scene::{Scene, Snapshot};
pub use settings::{QualityPreset, Settings, SettingsError};
pub use sim::{SceneConfig, SceneKind, SimEvent};

/// Shared configuration constants
pub mod consts {
    /// Coin collision radius (both scenes)
    pub const COIN_RADIUS: f32 = 0.3;
    /// Peg radius on the Galton board
    pub const PEG_RADIUS: f32 = 0.15;

    /// Tilt change per click on a platform (radians)
    pub const TILT_STEP: f32 = 0.3;
    /// Platforms never tilt beyond ±TILT_LIMIT radians
    pub const TILT_LIMIT: f32 = 0.8;

    /// How long the "score just changed" flag stays raised (seconds)
    pub const SCORE_PULSE_SECS: f32 = 0.3;

    /// Frame deltas are clamped to this to survive tab switches and hitches
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Galton board extents
    pub const BOARD_WIDTH: f32 = 10.0;
    pub const BOARD_HEIGHT: f32 = 15.0;
}
