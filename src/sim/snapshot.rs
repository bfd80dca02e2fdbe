//! Read-only view of a game for renderers
//!
//! Captured once per tick. Renderers pick sprites and scale to pixels from
//! this alone and never write back into the simulation.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{AngelPhase, BeanKind, Facing, GamePhase, GameState, TonguePhase};
use crate::consts::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PyoroView {
    pub pos: Vec2,
    pub facing: Facing,
    pub dead: bool,
    /// Mouth wide open while the tongue is out
    pub mouth_open: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TongueView {
    /// Where the tongue leaves the beak
    pub base: Vec2,
    pub tip: Vec2,
    pub direction: Facing,
    pub phase: TonguePhase,
}

impl TongueView {
    /// Approximate base-to-tip length, for laying out body segments
    pub fn length(&self) -> f32 {
        crate::approx_length(self.tip - self.base)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BeanView {
    /// Pool slot, lets renderers stagger animation frames per bean
    pub slot: usize,
    pub pos: Vec2,
    pub kind: BeanKind,
    pub caught: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AngelView {
    pub pos: Vec2,
    pub phase: AngelPhase,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub paused: bool,
    pub pyoro: PyoroView,
    pub tongue: Option<TongueView>,
    pub beans: Vec<BeanView>,
    /// One flag per column
    pub blocks: [bool; GRID_WIDTH],
    pub angel: Option<AngelView>,
    pub score: u32,
    pub last_game_score: Option<u32>,
    pub background_index: u32,
    pub frame_count: u64,
    /// Top scores, best first, empty slots as `None`
    pub high_scores: [Option<u32>; NUM_HIGH_SCORES],
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        let pyoro = &state.pyoro;
        let tongue = &pyoro.tongue;

        Self {
            phase: state.phase,
            paused: state.paused,
            pyoro: PyoroView {
                pos: pyoro.pos,
                facing: pyoro.facing,
                dead: pyoro.dead,
                mouth_open: tongue.active,
            },
            tongue: tongue.active.then(|| TongueView {
                base: pyoro.mouth(),
                tip: tongue.tip,
                direction: tongue.direction,
                phase: tongue.phase,
            }),
            beans: state
                .beans
                .iter()
                .enumerate()
                .filter(|(_, b)| b.active)
                .map(|(slot, b)| BeanView {
                    slot,
                    pos: b.pos,
                    kind: b.kind,
                    caught: b.caught,
                })
                .collect(),
            blocks: std::array::from_fn(|i| state.blocks[i].exists),
            angel: state.angel.active.then(|| AngelView {
                pos: state.angel.pos,
                phase: state.angel.phase,
            }),
            score: state.score,
            last_game_score: state.last_game_score,
            background_index: state.background_index,
            frame_count: state.frame_count,
            high_scores: state.high_scores.rows(),
        }
    }

    /// Whether a high-score row should be highlighted as the last game's
    pub fn is_last_game_row(&self, row: usize) -> bool {
        match (self.high_scores.get(row).copied().flatten(), self.last_game_score) {
            (Some(score), Some(last)) => score == last,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_menu() {
        let state = GameState::new(1);
        let snap = Snapshot::capture(&state);
        assert_eq!(snap.phase, GamePhase::Menu);
        assert!(snap.tongue.is_none());
        assert!(snap.angel.is_none());
        assert!(snap.beans.is_empty());
        assert!(snap.blocks.iter().all(|&b| b));
        assert!(snap.high_scores.iter().all(|s| s.is_none()));
    }

    #[test]
    fn test_capture_active_entities() {
        let mut state = GameState::new(1);
        state.press_select();
        state.blocks[4].exists = false;
        state.spawn_angel(4);
        state.beans[2].active = true;
        state.beans[2].pos = Vec2::new(3.5, 7.0);
        state.press_select();

        let snap = Snapshot::capture(&state);
        assert!(snap.pyoro.mouth_open);
        let tongue = snap.tongue.as_ref().unwrap();
        assert_eq!(tongue.base, tongue.tip);
        assert_eq!(tongue.length(), 0.0);
        assert_eq!(snap.beans.len(), 1);
        assert_eq!(snap.beans[0].slot, 2);
        assert!(!snap.blocks[4]);
        assert_eq!(snap.angel.as_ref().unwrap().phase, AngelPhase::Descending);
    }

    #[test]
    fn test_last_game_row_highlight() {
        let mut state = GameState::new(1);
        state.high_scores.insert(300);
        state.high_scores.insert(120);
        state.last_game_score = Some(120);
        let snap = Snapshot::capture(&state);
        assert!(!snap.is_last_game_row(0));
        assert!(snap.is_last_game_row(1));
        assert!(!snap.is_last_game_row(2));
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(1);
        let json = serde_json::to_string(&Snapshot::capture(&state)).unwrap();
        assert!(json.contains("\"phase\":\"Menu\""));
    }
}
