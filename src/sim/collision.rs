//! Collision detection on the logical grid
//!
//! Everything is an axis-aligned box centered on its position, plus one
//! column lookup for the ledge.

use glam::Vec2;

use super::state::Block;
use crate::consts::*;

/// Axis-aligned overlap test between two boxes given by center and size
///
/// Touching edges do not count as overlap.
#[inline]
pub fn boxes_overlap(a: Vec2, a_size: Vec2, b: Vec2, b_size: Vec2) -> bool {
    let half = (a_size + b_size) / 2.0;
    let d = (a - b).abs();
    d.x < half.x && d.y < half.y
}

/// Bean hitting Pyoro's body
#[inline]
pub fn bean_hits_pyoro(pyoro: Vec2, bean: Vec2) -> bool {
    boxes_overlap(pyoro, Vec2::splat(PYORO_SIZE), bean, Vec2::splat(BEAN_SIZE))
}

/// Tongue tip touching a bean
#[inline]
pub fn tongue_hits_bean(tip: Vec2, bean: Vec2) -> bool {
    boxes_overlap(tip, Vec2::splat(TONGUE_WIDTH), bean, Vec2::splat(BEAN_SIZE))
}

/// Tongue tip has left the grid (top or either side)
#[inline]
pub fn tip_out_of_bounds(tip: Vec2) -> bool {
    tip.x < 0.0 || tip.x > GRID_W || tip.y < 0.0
}

/// Column under a horizontal position, `None` off the ledge
#[inline]
pub fn column_at(x: f32) -> Option<usize> {
    if x < 0.0 {
        return None;
    }
    let col = x as usize;
    (col < GRID_WIDTH).then_some(col)
}

/// Clamp a candidate x so Pyoro's footprint stays on the grid
#[inline]
pub fn clamp_to_stage(x: f32) -> f32 {
    x.clamp(PYORO_SIZE / 2.0, GRID_W - PYORO_SIZE / 2.0)
}

/// Whether every column under Pyoro's footprint at `x` still has a block
pub fn footprint_supported(blocks: &[Block; GRID_WIDTH], x: f32) -> bool {
    let left = (x - PYORO_SIZE / 2.0).floor() as i32;
    let right = (x + PYORO_SIZE / 2.0).floor() as i32;
    (left..=right)
        .filter(|&i| i >= 0 && (i as usize) < GRID_WIDTH)
        .all(|i| blocks[i as usize].exists)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boxes_overlap() {
        let two = Vec2::splat(2.0);
        assert!(boxes_overlap(Vec2::new(5.0, 5.0), two, Vec2::new(6.5, 5.5), two));
        // Touching edges
        assert!(!boxes_overlap(Vec2::new(5.0, 5.0), two, Vec2::new(7.0, 5.0), two));
        assert!(!boxes_overlap(Vec2::new(5.0, 5.0), two, Vec2::new(5.0, 9.0), two));
    }

    #[test]
    fn test_bean_hits_pyoro() {
        let pyoro = Vec2::new(10.0, PYORO_Y);
        assert!(bean_hits_pyoro(pyoro, Vec2::new(10.5, 16.5)));
        assert!(!bean_hits_pyoro(pyoro, Vec2::new(10.5, 15.0)));
        assert!(!bean_hits_pyoro(pyoro, Vec2::new(13.0, PYORO_Y)));
    }

    #[test]
    fn test_tip_out_of_bounds() {
        assert!(!tip_out_of_bounds(Vec2::new(10.0, 10.0)));
        assert!(tip_out_of_bounds(Vec2::new(-0.1, 10.0)));
        assert!(tip_out_of_bounds(Vec2::new(20.1, 10.0)));
        assert!(tip_out_of_bounds(Vec2::new(10.0, -0.1)));
        // Below the ledge does not count, the tongue only ever rises
        assert!(!tip_out_of_bounds(Vec2::new(10.0, 25.0)));
    }

    #[test]
    fn test_column_at() {
        assert_eq!(column_at(0.5), Some(0));
        assert_eq!(column_at(19.99), Some(19));
        assert_eq!(column_at(20.0), None);
        assert_eq!(column_at(-0.5), None);
    }

    #[test]
    fn test_clamp_to_stage() {
        assert_eq!(clamp_to_stage(0.2), 1.0);
        assert_eq!(clamp_to_stage(19.8), 19.0);
        assert_eq!(clamp_to_stage(7.0), 7.0);
    }

    #[test]
    fn test_footprint_supported() {
        let mut blocks = [Block::default(); GRID_WIDTH];
        assert!(footprint_supported(&blocks, 10.0));

        blocks[11].exists = false;
        // Footprint at 10.0 spans columns 9..=11
        assert!(!footprint_supported(&blocks, 10.0));
        // At 9.5 it spans 8..=10
        assert!(footprint_supported(&blocks, 9.5));
    }

    #[test]
    fn test_footprint_ignores_columns_past_right_edge() {
        let blocks = [Block::default(); GRID_WIDTH];
        // Right edge at 20.0 maps to column 20, which is off the ledge
        assert!(footprint_supported(&blocks, 19.0));
    }
}
