//! Collision detection and response helpers
//!
//! Every test here is brute force against a handful of static shapes. Coins
//! are spheres of `COIN_RADIUS`; platforms and dividers are axis-aligned
//! boxes (platform tilt is visual plus a slope kick, not a rotated box).

use glam::{Vec2, Vec3};

use super::state::{Bin, Divider, Peg, Platform};

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Unit normal pointing from the obstacle toward the coin.
    /// Zero when the centres coincide and no normal is defined.
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }

    /// True when the contact has a usable normal
    #[inline]
    pub fn has_normal(&self) -> bool {
        self.normal.length_squared() > 0.5
    }
}

/// Reflect velocity off a surface
///
/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Check a coin against a round peg (XY plane)
pub fn coin_peg_collision(coin_pos: Vec2, coin_radius: f32, peg: &Peg) -> CollisionResult {
    let delta = coin_pos - peg.pos.truncate();
    let distance = delta.length();
    let reach = coin_radius + peg.radius;

    if distance >= reach {
        return CollisionResult::miss();
    }

    CollisionResult {
        hit: true,
        // Coincident centres leave this at zero
        normal: delta.normalize_or_zero(),
        penetration: reach - distance,
    }
}

/// Whether a falling coin should land on top of a slab
///
/// Box overlap expanded by the coin radius on every axis, and only while
/// the coin is not moving upward.
pub fn coin_lands_on_platform(coin_pos: Vec3, coin_vel: Vec3, coin_radius: f32, platform: &Platform) -> bool {
    if coin_vel.y > 0.0 {
        return false;
    }
    let reach = platform.half_extents() + Vec3::splat(coin_radius);
    let d = (coin_pos - platform.pos).abs();
    d.x < reach.x && d.y < reach.y && d.z < reach.z
}

/// Check a coin against a vertical wall slab
///
/// Returns the X the coin centre must be pushed to and the side it sits on
/// (-1 left of the wall, +1 right of it).
pub fn coin_wall_contact(coin_pos: Vec3, coin_radius: f32, wall: &Platform) -> Option<(f32, f32)> {
    let half = wall.half_extents();
    let d = coin_pos - wall.pos;
    if d.y.abs() >= half.y || d.z.abs() >= half.z + coin_radius {
        return None;
    }
    if d.x.abs() >= half.x + coin_radius {
        return None;
    }
    let side = if d.x < 0.0 { -1.0 } else { 1.0 };
    Some((wall.pos.x + side * (half.x + coin_radius), side))
}

/// Whether a divider blocks a coin's horizontal motion
///
/// Blocks while the coin overlaps the divider horizontally and sits below
/// its top edge; coins higher up pass over freely.
pub fn divider_blocks(coin_pos: Vec2, coin_radius: f32, divider: &Divider) -> bool {
    (coin_pos.x - divider.pos.x).abs() < coin_radius + divider.width / 2.0 && coin_pos.y < divider.top()
}

/// Whether X lies beyond the board's side walls
#[inline]
pub fn beyond_side_walls(x: f32, half_width: f32) -> bool {
    x.abs() > half_width
}

/// First bin (left to right) whose span contains X
pub fn bin_at(x: f32, bins: &[Bin]) -> Option<usize> {
    bins.iter().position(|b| b.contains_x(x))
}

/// Whether a pointer hit lands on a platform's face rectangle
pub fn point_on_platform(point: Vec3, platform: &Platform, margin: f32) -> bool {
    (point.x - platform.pos.x).abs() < platform.width / 2.0 + margin
        && (point.y - platform.pos.y).abs() < platform.height / 2.0 + margin
}

/// Whether a pointer hit lands within a fixed box around a coin
pub fn point_near_coin(point: Vec3, coin_pos: Vec3, margin: f32) -> bool {
    (coin_pos.x - point.x).abs() < margin && (coin_pos.y - point.y).abs() < margin
}
