//! Static scene layouts
//!
//! Geometry is laid out once per scene and never re-generated.

use glam::{Vec2, Vec3};

use super::config::SceneKind;
use super::state::{Bin, Board, Divider, Peg, Platform};
use crate::consts::{BOARD_HEIGHT, BOARD_WIDTH, PEG_RADIUS};

/// Peg grid
pub const PEG_ROWS: usize = 10;
pub const PEG_COLS: usize = 7;
pub const PEG_SPACING: f32 = 1.2;

/// Bins along the bottom of the board
pub const BIN_COUNT: usize = 9;
pub const DIVIDER_WIDTH: f32 = 0.1;
pub const DIVIDER_HEIGHT: f32 = 4.0;

/// Ids reserved for the lava lamp's fixed side walls
pub const WALL_IDS: [&str; 2] = ["wall-left", "wall-right"];

/// Build the board and initial bins for a scene
pub fn build_board(kind: SceneKind) -> (Board, Vec<Bin>) {
    match kind {
        SceneKind::LavaLamp => (
            Board {
                platforms: lava_lamp_platforms(),
                ..Default::default()
            },
            Vec::new(),
        ),
        SceneKind::GaltonBoard => (
            Board {
                platforms: Vec::new(),
                pegs: galton_pegs(),
                dividers: galton_dividers(),
            },
            galton_bins(),
        ),
    }
}

/// Six slabs in a zig-zag plus two side walls
pub fn lava_lamp_platforms() -> Vec<Platform> {
    let mut platforms: Vec<Platform> = (0..6)
        .map(|i| {
            // Alternate left/right, tilting towards the centre
            let side = if i % 2 == 0 { -1.0 } else { 1.0 };
            let y = 6.0 - i as f32 * 2.0;
            Platform::slab(
                &(i + 1).to_string(),
                Vec3::new(2.0 * side, y, 0.0),
                0.2 * side,
                3.0,
                0.2,
                1.0,
            )
        })
        .collect();

    platforms.push(Platform::wall(WALL_IDS[0], Vec3::new(-4.5, 2.0, 0.0), 0.2, 18.0, 1.0));
    platforms.push(Platform::wall(WALL_IDS[1], Vec3::new(4.5, 2.0, 0.0), 0.2, 18.0, 1.0));
    platforms
}

/// Triangular peg grid: even rows full, odd rows shifted half a spacing
pub fn galton_pegs() -> Vec<Peg> {
    let mut pegs = Vec::with_capacity(PEG_ROWS * PEG_COLS);
    for row in 0..PEG_ROWS {
        let (offset, count) = if row % 2 == 0 {
            (0.0, PEG_COLS)
        } else {
            (PEG_SPACING / 2.0, PEG_COLS - 1)
        };
        for col in 0..count {
            let x = -BOARD_WIDTH / 2.0 + offset + col as f32 * PEG_SPACING;
            let y = BOARD_HEIGHT / 2.0 - row as f32 * PEG_SPACING;
            pegs.push(Peg {
                id: format!("peg-{row}-{col}"),
                pos: Vec3::new(x, y, 0.0),
                radius: PEG_RADIUS,
            });
        }
    }
    pegs
}

pub fn galton_bins() -> Vec<Bin> {
    let bin_width = BOARD_WIDTH / BIN_COUNT as f32;
    (0..BIN_COUNT)
        .map(|i| Bin {
            id: format!("bin-{i}"),
            pos: Vec3::new(
                -BOARD_WIDTH / 2.0 + i as f32 * bin_width + bin_width / 2.0,
                -BOARD_HEIGHT / 2.0 + 0.5,
                0.0,
            ),
            width: bin_width,
            height: 1.0,
            depth: 1.0,
            count: 0,
        })
        .collect()
}

/// One divider on every bin edge, outer edges included
pub fn galton_dividers() -> Vec<Divider> {
    let bin_width = BOARD_WIDTH / BIN_COUNT as f32;
    let y = -BOARD_HEIGHT / 2.0 + DIVIDER_HEIGHT / 2.0 - 0.5;
    (0..=BIN_COUNT)
        .map(|i| Divider {
            id: format!("divider-{i}"),
            pos: Vec2::new(-BOARD_WIDTH / 2.0 + i as f32 * bin_width, y),
            width: DIVIDER_WIDTH,
            height: DIVIDER_HEIGHT,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::COIN_RADIUS;

    #[test]
    fn test_lava_lamp_layout() {
        let platforms = lava_lamp_platforms();
        assert!(platforms.len() <= 8);
        assert_eq!(platforms.iter().filter(|p| p.is_tiltable()).count(), 6);
        for id in WALL_IDS {
            let wall = platforms.iter().find(|p| p.id == id).unwrap();
            assert!(!wall.is_tiltable());
            assert!(wall.tilt().abs() < 1e-3);
        }
        assert!((platforms[0].tilt() + 0.2).abs() < 1e-6);
        assert!((platforms[1].tilt() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_peg_grid_alternates() {
        let pegs = galton_pegs();
        assert_eq!(pegs.len(), 5 * PEG_COLS + 5 * (PEG_COLS - 1));
        let row1_first = pegs.iter().find(|p| p.id == "peg-1-0").unwrap();
        assert!((row1_first.pos.x - (-BOARD_WIDTH / 2.0 + PEG_SPACING / 2.0)).abs() < 1e-5);
    }

    #[test]
    fn test_peg_spacing_exceeds_coin_and_peg_diameter() {
        // Sequential peg responses rely on a coin touching one peg at a time
        assert!(PEG_SPACING > 2.0 * (COIN_RADIUS + PEG_RADIUS));
    }

    #[test]
    fn test_bins_tile_board() {
        let bins = galton_bins();
        assert_eq!(bins.len(), BIN_COUNT);
        let total: f32 = bins.iter().map(|b| b.width).sum();
        assert!((total - BOARD_WIDTH).abs() < 1e-4);
        assert!(bins[0].contains_x(-BOARD_WIDTH / 2.0 + 0.01));
        assert!(bins[BIN_COUNT - 1].contains_x(BOARD_WIDTH / 2.0 - 0.01));
    }

    #[test]
    fn test_dividers_on_bin_edges() {
        let dividers = galton_dividers();
        assert_eq!(dividers.len(), BIN_COUNT + 1);
        assert!((dividers[0].pos.x + BOARD_WIDTH / 2.0).abs() < 1e-5);
        assert!((dividers[BIN_COUNT].pos.x - BOARD_WIDTH / 2.0).abs() < 1e-4);
        assert!((dividers[0].top() - (-4.0)).abs() < 1e-5);
    }
}
