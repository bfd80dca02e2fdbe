//! Bean and angel spawning

use glam::Vec2;
use rand::Rng;

use super::state::{AngelPhase, BeanKind, GameEvent, GameState};
use crate::consts::*;

impl GameState {
    /// Drop a new bean from the top of the grid into the first free pool slot
    ///
    /// Returns the slot index, or `None` when the pool is full and the spawn
    /// is dropped.
    pub fn spawn_bean(&mut self) -> Option<usize> {
        let slot = self.beans.iter().position(|b| !b.active)?;

        let column = self.rng.random_range(0..GRID_WIDTH);
        let (min, max) = (self.tuning.bean_speed_min, self.tuning.bean_speed_max);
        // An empty range means a fixed speed factor
        let speed = if min < max { self.rng.random_range(min..max) } else { min };

        let (numerator, denominator) = self.tuning.special_odds;
        let kind = if self.find_destroyed_block().is_some()
            && self.rng.random_range(0..denominator.max(1)) < numerator
        {
            BeanKind::Special
        } else {
            BeanKind::Plain
        };

        let bean = &mut self.beans[slot];
        bean.pos = Vec2::new(column as f32 + 0.5, 0.0);
        bean.speed = speed;
        bean.active = true;
        bean.caught = false;
        bean.kind = kind;

        Some(slot)
    }

    /// Send the angel down to rebuild `column`
    ///
    /// Ignored if the column is out of range, still standing, already being
    /// repaired, or another angel is in flight. Returns whether an angel spawned.
    pub fn spawn_angel(&mut self, column: usize) -> bool {
        let Some(block) = self.blocks.get(column) else {
            return false;
        };
        if block.exists || block.is_repairing || self.angel.active {
            return false;
        }

        self.angel.active = true;
        self.angel.pos = Vec2::new(column as f32 + 0.5, 0.0);
        self.angel.target = column;
        self.angel.phase = AngelPhase::Descending;
        self.blocks[column].is_repairing = true;

        log::debug!("Angel dispatched to column {}", column);
        self.emit(GameEvent::AngelSpawned { column });
        true
    }
}
