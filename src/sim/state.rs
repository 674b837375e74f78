//! Simulation state and entity types
//!
//! Everything a frame reads or writes lives here. Static geometry sits in
//! `Board`; per-frame mutable data sits in `SimState`.

use std::fmt;

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::COIN_RADIUS;

/// Packed 0xRRGGBB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb(pub u32);

impl Rgb {
    pub const GOLD: Rgb = Rgb(0xffd700);

    /// CSS-style hex string ("#rrggbb")
    pub fn hex(&self) -> String {
        format!("#{:06x}", self.0 & 0x00ff_ffff)
    }
}

/// Coin identity, time-based plus a serial
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CoinId(pub String);

impl fmt::Display for CoinId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A coin - the only moving body in either scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coin {
    pub id: CoinId,
    pub pos: Vec3,
    pub vel: Vec3,
    /// Visual spin angle (radians)
    pub rotation: f32,
    /// Spin rate (radians/sec)
    pub rotation_speed: f32,
    pub scale: f32,
    /// 0-1, drops to 0 while fading out
    pub opacity: f32,
    /// False means "awaiting removal": frozen and ignored by collisions
    pub active: bool,
    /// Seconds alive
    pub age: f32,
    pub color: Rgb,
}

impl Coin {
    pub fn new(id: CoinId, pos: Vec3, vel: Vec3, color: Rgb) -> Self {
        Self {
            id,
            pos,
            vel,
            rotation: 0.0,
            rotation_speed: 0.0,
            scale: 1.0,
            opacity: 1.0,
            active: true,
            age: 0.0,
            color,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        COIN_RADIUS
    }

    pub fn deactivate(&mut self) {
        self.active = false;
    }
}

/// What a platform does when a coin touches it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlatformKind {
    /// Landing surface, tiltable by clicks
    #[default]
    Slab,
    /// Fixed vertical side wall, reflects horizontally
    Wall,
}

/// A rectangular slab in the lava lamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Platform {
    pub id: String,
    pub kind: PlatformKind,
    pub pos: Vec3,
    /// Euler angles; only `z` (tilt) ever changes
    pub rotation: Vec3,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
}

impl Platform {
    pub fn slab(id: &str, pos: Vec3, tilt: f32, width: f32, height: f32, depth: f32) -> Self {
        Self {
            id: id.to_string(),
            kind: PlatformKind::Slab,
            pos,
            rotation: Vec3::new(0.0, 0.0, tilt),
            width,
            height,
            depth,
        }
    }

    pub fn wall(id: &str, pos: Vec3, width: f32, height: f32, depth: f32) -> Self {
        Self {
            id: id.to_string(),
            kind: PlatformKind::Wall,
            pos,
            rotation: Vec3::ZERO,
            width,
            height,
            depth,
        }
    }

    #[inline]
    pub fn tilt(&self) -> f32 {
        self.rotation.z
    }

    /// Y of the top surface (tilt ignored, as for collisions)
    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y + self.height / 2.0
    }

    #[inline]
    pub fn half_extents(&self) -> Vec3 {
        Vec3::new(self.width, self.height, self.depth) / 2.0
    }

    pub fn is_tiltable(&self) -> bool {
        self.kind == PlatformKind::Slab
    }
}

/// A fixed round obstacle on the Galton board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Peg {
    pub id: String,
    pub pos: Vec3,
    pub radius: f32,
}

/// A thin vertical wall between two bins
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Divider {
    pub id: String,
    pub pos: Vec2,
    pub width: f32,
    pub height: f32,
}

impl Divider {
    #[inline]
    pub fn top(&self) -> f32 {
        self.pos.y + self.height / 2.0
    }
}

/// Capture zone at the bottom of the Galton board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    pub id: String,
    pub pos: Vec3,
    pub width: f32,
    pub height: f32,
    pub depth: f32,
    /// Coins captured so far (the only mutable field)
    pub count: u32,
}

impl Bin {
    pub fn contains_x(&self, x: f32) -> bool {
        (x - self.pos.x).abs() < self.width / 2.0
    }
}

/// Static and semi-static geometry of a scene
///
/// Pegs and dividers never change after layout; platform tilt is only
/// written by the pointer resolver.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Board {
    pub platforms: Vec<Platform>,
    pub pegs: Vec<Peg>,
    pub dividers: Vec<Divider>,
}

/// Discrete things that happened, for audio/particle/UI consumers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SimEvent {
    /// First interaction of the session: start the background loop
    BackgroundStarted,
    /// A coin entered play
    Spawned { coin: CoinId, pos: Vec3, color: Rgb },
    /// A coin was nudged by the pointer
    Hit { coin: CoinId, pos: Vec3, color: Rgb },
    /// A coin dropped into a bin
    Captured {
        coin: CoinId,
        bin: String,
        pos: Vec3,
        color: Rgb,
        points: u32,
    },
    /// A platform was clicked and its tilt changed
    PlatformTilted { platform: String, tilt: f32 },
}

/// Per-frame mutable simulation state
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SimState {
    /// Live coins, inactive ones included until the next cleanup sweep
    pub coins: Vec<Coin>,
    pub bins: Vec<Bin>,
    /// Seconds since the scene started
    pub elapsed: f32,
    next_serial: u64,
}

impl SimState {
    pub fn new(bins: Vec<Bin>) -> Self {
        Self {
            coins: Vec::new(),
            bins,
            elapsed: 0.0,
            next_serial: 1,
        }
    }

    /// Allocate a coin id from the scene clock
    pub fn next_coin_id(&mut self) -> CoinId {
        let serial = self.next_serial;
        self.next_serial += 1;
        let millis = (self.elapsed.max(0.0) * 1000.0) as u64;
        CoinId(format!("coin-{millis}-{serial}"))
    }

    pub fn active_count(&self) -> usize {
        self.coins.iter().filter(|c| c.active).count()
    }

    pub fn coin(&self, id: &CoinId) -> Option<&Coin> {
        self.coins.iter().find(|c| &c.id == id)
    }
}
