//! Per-scene physics and lifecycle presets
//!
//! Both scenes run the same integrator; everything that differs between them
//! is a field here. Values are fixed presets, not runtime knobs.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use super::state::Rgb;
use crate::consts::{BOARD_HEIGHT, BOARD_WIDTH};

/// Which toy a scene is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneKind {
    LavaLamp,
    GaltonBoard,
}

impl SceneKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SceneKind::LavaLamp => "lava-lamp",
            SceneKind::GaltonBoard => "galton-board",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "lava" | "lava-lamp" | "lavalamp" => Some(SceneKind::LavaLamp),
            "galton" | "galton-board" | "bean-machine" => Some(SceneKind::GaltonBoard),
            _ => None,
        }
    }
}

/// Coin palette shared by both scenes
pub const COIN_PALETTE: [Rgb; 18] = [
    Rgb(0xff6b6b),
    Rgb(0x4ecdc4),
    Rgb(0x45b7d1),
    Rgb(0xf9ca24),
    Rgb(0xf0932b),
    Rgb(0xeb4d4b),
    Rgb(0x6c5ce7),
    Rgb(0xa29bfe),
    Rgb(0xfd79a8),
    Rgb(0x00b894),
    Rgb(0x00cec9),
    Rgb(0xfdcb6e),
    Rgb(0xe17055),
    Rgb(0x81ecec),
    Rgb(0xfab1a0),
    Rgb(0xff7675),
    Rgb(0x74b9ff),
    Rgb(0x55a3ff),
];

/// Score awarded per bin capture: `base + floor(r * bonus)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreRule {
    pub base: u32,
    pub bonus: u32,
}

/// How and how often coins enter play
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnConfig {
    /// Maximum active coins; spawns at or above this are dropped
    pub cap: usize,
    /// Seconds between automatic spawns
    pub interval: f32,
    /// Extra random delay (0..jitter seconds) rolled per spawn
    pub jitter: f32,
    pub origin: Vec3,
    /// Horizontal start offset span, centred on origin
    pub lateral_spread: f32,
    /// Horizontal start velocity span, centred on 0
    pub lateral_speed: f32,
    /// Spin rate = spin_base + r * spin_range
    pub spin_base: f32,
    pub spin_range: f32,
    pub scale: f32,
}

/// Pointer interaction tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointerConfig {
    /// Half extents of the clickable area; points outside are ignored
    pub bounds: Vec2,
    /// Half-size of the box around a coin that counts as a hit
    pub coin_margin: f32,
    /// Expansion of a platform's rectangle for hit testing
    pub platform_margin: f32,
    /// Horizontal nudge span, centred on 0
    pub nudge_lateral: f32,
    /// Upward nudge impulse
    pub nudge_lift: f32,
    /// Clicking empty space spawns a coin
    pub spawn_on_miss: bool,
}

/// Complete preset for one scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    pub kind: SceneKind,
    /// Vertical acceleration (negative = down)
    pub gravity: f32,
    /// Per-frame multiplier on horizontal velocity
    pub roll_friction: f32,
    /// Per-frame multiplier on depth velocity
    pub depth_friction: f32,
    /// Vertical restitution when landing on a slab
    pub bounce_damping: f32,
    /// Horizontal kick per landing = sin(tilt) * slope_push
    pub slope_push: f32,
    /// Rolling spin = vx * spin_factor
    pub spin_factor: f32,
    /// Invisible side walls at ±half width (Galton board)
    pub wall_half_width: Option<f32>,
    /// Horizontal restitution off side walls
    pub wall_restitution: f32,
    /// Horizontal restitution off bin dividers
    pub divider_restitution: f32,
    /// Span of the random horizontal kick added on peg contact
    pub peg_jitter: f32,
    /// Coins at or below this Y are resolved into a bin or discarded
    pub capture_line: Option<f32>,
    /// Coins below this Y fade out
    pub fade_line: Option<f32>,
    /// Opacity lost per second while below the fade line
    pub fade_rate: f32,
    /// Coins older than this (seconds) are retired
    pub max_age: Option<f32>,
    pub score: ScoreRule,
    pub spawn: SpawnConfig,
    /// Seconds between sweeps that drop inactive coins
    pub cleanup_interval: f32,
    pub pointer: PointerConfig,
}

impl SceneConfig {
    pub fn for_kind(kind: SceneKind) -> Self {
        match kind {
            SceneKind::LavaLamp => Self::lava_lamp(),
            SceneKind::GaltonBoard => Self::galton_board(),
        }
    }

    /// Tilting platforms, 30% gravity, arcade friction
    pub fn lava_lamp() -> Self {
        Self {
            kind: SceneKind::LavaLamp,
            gravity: -9.81 * 0.3,
            roll_friction: 0.98,
            depth_friction: 0.95,
            bounce_damping: 0.6,
            slope_push: 2.0,
            spin_factor: 2.0,
            wall_half_width: None,
            wall_restitution: 0.8,
            divider_restitution: 0.6,
            peg_jitter: 0.0,
            capture_line: None,
            fade_line: Some(-10.0),
            fade_rate: 2.0,
            max_age: Some(60.0),
            score: ScoreRule { base: 0, bonus: 0 },
            spawn: SpawnConfig {
                cap: 15,
                interval: 8.0,
                jitter: 4.0,
                origin: Vec3::new(0.0, 9.0, 0.0),
                lateral_spread: 0.0,
                lateral_speed: 0.5,
                spin_base: 0.0,
                spin_range: 0.0,
                scale: 1.0,
            },
            cleanup_interval: 5.0,
            pointer: PointerConfig {
                bounds: Vec2::new(10.0, 10.0),
                coin_margin: 0.5,
                platform_margin: 0.2,
                nudge_lateral: 2.0,
                nudge_lift: 1.0,
                spawn_on_miss: false,
            },
        }
    }

    /// Slow, floaty bean machine
    pub fn galton_board() -> Self {
        Self {
            kind: SceneKind::GaltonBoard,
            gravity: -0.288,
            roll_friction: 0.997,
            depth_friction: 1.0,
            bounce_damping: 0.6,
            slope_push: 0.0,
            spin_factor: 0.0,
            wall_half_width: Some(4.8),
            wall_restitution: 0.8,
            divider_restitution: 0.6,
            peg_jitter: 0.6,
            capture_line: Some(-6.0),
            fade_line: None,
            fade_rate: 0.0,
            max_age: Some(120.0),
            score: ScoreRule { base: 10, bonus: 20 },
            spawn: SpawnConfig {
                cap: 10,
                interval: 8.0,
                jitter: 0.0,
                origin: Vec3::new(0.0, BOARD_HEIGHT / 2.0 + 1.0, 0.0),
                lateral_spread: 0.8,
                lateral_speed: 1.2,
                spin_base: 0.6,
                spin_range: 1.2,
                scale: 0.8,
            },
            cleanup_interval: 5.0,
            pointer: PointerConfig {
                bounds: Vec2::new(BOARD_WIDTH, BOARD_HEIGHT),
                coin_margin: 0.8,
                platform_margin: 0.0,
                nudge_lateral: 1.2,
                nudge_lift: 0.6,
                spawn_on_miss: true,
            },
        }
    }
}
