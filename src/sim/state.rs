//! Game state and core simulation types
//!
//! One `GameState` owns everything a running game needs. There are no
//! statics, so any number of independent games can run side by side.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::highscores::HighScores;
use crate::tuning::Tuning;

/// Top-level game phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for select
    Menu,
    /// Active gameplay (including the short death animation)
    Playing,
    /// Run ended, high-score table on screen
    GameOver,
}

/// Horizontal facing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    Right,
}

impl Facing {
    /// -1.0 for left, 1.0 for right
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }

    pub fn opposite(self) -> Self {
        match self {
            Facing::Left => Facing::Right,
            Facing::Right => Facing::Left,
        }
    }
}

/// Tongue motion phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TonguePhase {
    Extending,
    Retracting,
}

/// Pyoro's tongue
#[derive(Debug, Clone)]
pub struct Tongue {
    pub active: bool,
    pub tip: Vec2,
    pub direction: Facing,
    pub phase: TonguePhase,
    pub caught_bean: bool,
    /// Tip height at the moment of the catch
    pub catch_y: f32,
}

impl Default for Tongue {
    fn default() -> Self {
        Self {
            active: false,
            tip: Vec2::ZERO,
            direction: Facing::Right,
            phase: TonguePhase::Extending,
            caught_bean: false,
            catch_y: 0.0,
        }
    }
}

/// The player character
#[derive(Debug, Clone)]
pub struct Pyoro {
    pub pos: Vec2,
    pub facing: Facing,
    pub dead: bool,
    /// Legacy movement: walking this tick
    pub moving: bool,
    /// Legacy movement: frame of the last horizontal press
    pub last_press_frame: u64,
    pub tongue: Tongue,
}

impl Default for Pyoro {
    fn default() -> Self {
        Self {
            pos: Vec2::new(GRID_W / 2.0, PYORO_Y),
            facing: Facing::Right,
            dead: false,
            moving: false,
            last_press_frame: 0,
            tongue: Tongue::default(),
        }
    }
}

impl Pyoro {
    /// Where the tongue leaves the beak
    pub fn mouth(&self) -> Vec2 {
        let dir = self.facing.sign();
        Vec2::new(
            self.pos.x + (PYORO_VISUAL_SIZE / 2.0 + MOUTH_OFFSET) * dir,
            self.pos.y - PYORO_VISUAL_SIZE / 2.0 + MOUTH_OFFSET,
        )
    }

    /// Start extending the tongue from the beak
    pub fn extend_tongue(&mut self) {
        self.tongue = Tongue {
            active: true,
            tip: self.mouth(),
            direction: self.facing,
            phase: TonguePhase::Extending,
            caught_bean: false,
            catch_y: 0.0,
        };
    }
}

/// Bean kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BeanKind {
    /// Green bean, points only
    #[default]
    Plain,
    /// Pink bean, also summons a repair angel
    Special,
}

/// One slot of the bean pool
#[derive(Debug, Clone, Default)]
pub struct Bean {
    pub pos: Vec2,
    /// Fall speed multiplier
    pub speed: f32,
    pub active: bool,
    pub caught: bool,
    pub kind: BeanKind,
}

/// One ledge column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    pub exists: bool,
    pub is_repairing: bool,
}

impl Default for Block {
    fn default() -> Self {
        Self {
            exists: true,
            is_repairing: false,
        }
    }
}

/// Angel motion phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AngelPhase {
    Descending,
    Ascending,
}

/// The block-repair angel (at most one)
#[derive(Debug, Clone)]
pub struct Angel {
    pub active: bool,
    pub pos: Vec2,
    pub target: usize,
    pub phase: AngelPhase,
}

impl Default for Angel {
    fn default() -> Self {
        Self {
            active: false,
            pos: Vec2::ZERO,
            target: 0,
            phase: AngelPhase::Descending,
        }
    }
}

/// Pending step direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StepDir {
    #[default]
    None,
    Left,
    Right,
}

impl From<Facing> for StepDir {
    fn from(facing: Facing) -> Self {
        match facing {
            Facing::Left => StepDir::Left,
            Facing::Right => StepDir::Right,
        }
    }
}

/// Queue of pending micro-steps
///
/// Invariant: `count > 0` if and only if `dir != StepDir::None`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepQueue {
    dir: StepDir,
    count: u32,
}

impl StepQueue {
    pub fn dir(&self) -> StepDir {
        self.dir
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn clear(&mut self) {
        self.dir = StepDir::None;
        self.count = 0;
    }

    /// Queue `steps` more steps toward `facing`, capped at `max`
    pub fn push(&mut self, facing: Facing, steps: u32, max: u32) {
        let dir = StepDir::from(facing);
        if self.dir != dir {
            self.count = 0;
        }
        self.count = self.count.saturating_add(steps).min(max);
        self.dir = if self.count > 0 { dir } else { StepDir::None };
    }

    /// Take one step off the queue
    pub fn pop(&mut self) -> Option<Facing> {
        let facing = match self.dir {
            StepDir::None => return None,
            StepDir::Left => Facing::Left,
            StepDir::Right => Facing::Right,
        };
        self.count -= 1;
        if self.count == 0 {
            self.dir = StepDir::None;
        }
        Some(facing)
    }
}

/// Things that happened during a tick or input, for drivers and audio
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    NewGame,
    BeanCaught { kind: BeanKind, points: u32 },
    BlockDestroyed { column: usize },
    BlockRepaired { column: usize },
    AngelSpawned { column: usize },
    PyoroDied,
    /// `rank` is 1-based, `None` if the score missed the table
    GameOver { score: u32, rank: Option<usize> },
    ReturnedToMenu,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    pub paused: bool,
    pub pyoro: Pyoro,
    pub beans: [Bean; MAX_BEANS],
    pub blocks: [Block; GRID_WIDTH],
    pub angel: Angel,
    pub steps: StepQueue,
    pub score: u32,
    pub game_speed: f32,
    pub bean_spawn_timer: f32,
    pub death_timer: f32,
    /// Live Playing ticks since the last reset, drives sprite cycling
    pub frame_count: u64,
    /// Cosmetic background progression, derived from score
    pub background_index: u32,
    pub high_scores: HighScores,
    /// Score of the most recently finished game
    pub last_game_score: Option<u32>,
    pub tuning: Tuning,
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<GameEvent>,
}

impl GameState {
    /// Create a game sitting on the menu with the given seed
    pub fn new(seed: u64) -> Self {
        Self::with_tuning(seed, Tuning::default())
    }

    pub fn with_tuning(seed: u64, tuning: Tuning) -> Self {
        Self {
            phase: GamePhase::Menu,
            paused: false,
            pyoro: Pyoro::default(),
            beans: Default::default(),
            blocks: [Block::default(); GRID_WIDTH],
            angel: Angel::default(),
            steps: StepQueue::default(),
            score: 0,
            game_speed: 1.0,
            bean_spawn_timer: 0.0,
            death_timer: 0.0,
            frame_count: 0,
            background_index: 0,
            high_scores: HighScores::new(),
            last_game_score: None,
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Reset every entity for a fresh run and start playing
    ///
    /// The high-score table, tuning and RNG stream carry over.
    pub fn reset(&mut self) {
        self.phase = GamePhase::Playing;
        self.paused = false;
        self.pyoro = Pyoro::default();
        self.beans = Default::default();
        self.blocks = [Block::default(); GRID_WIDTH];
        self.angel = Angel::default();
        self.steps.clear();
        self.score = 0;
        self.game_speed = 1.0;
        self.bean_spawn_timer = 0.0;
        self.death_timer = 0.0;
        self.frame_count = 0;
        self.background_index = 0;
        self.events.push(GameEvent::NewGame);
    }

    /// First destroyed column not already targeted by an angel
    pub fn find_destroyed_block(&self) -> Option<usize> {
        self.blocks
            .iter()
            .position(|b| !b.exists && !b.is_repairing)
    }

    /// Number of beans currently in play
    pub fn active_beans(&self) -> usize {
        self.beans.iter().filter(|b| b.active).count()
    }

    /// Drain accumulated events
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub(crate) fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_queue_consistency() {
        let mut q = StepQueue::default();
        assert_eq!(q.dir(), StepDir::None);
        assert!(q.pop().is_none());

        q.push(Facing::Left, 4, 60);
        assert_eq!(q.dir(), StepDir::Left);
        assert_eq!(q.count(), 4);

        for _ in 0..4 {
            assert_eq!(q.pop(), Some(Facing::Left));
        }
        assert!(q.is_empty());
        assert_eq!(q.dir(), StepDir::None);
    }

    #[test]
    fn test_step_queue_caps() {
        let mut q = StepQueue::default();
        for _ in 0..20 {
            q.push(Facing::Right, 4, 60);
        }
        assert_eq!(q.count(), 60);
    }

    #[test]
    fn test_step_queue_direction_change_restarts_count() {
        let mut q = StepQueue::default();
        q.push(Facing::Right, 10, 60);
        q.push(Facing::Left, 1, 60);
        assert_eq!(q.dir(), StepDir::Left);
        assert_eq!(q.count(), 1);
    }

    #[test]
    fn test_new_state_on_menu() {
        let state = GameState::new(7);
        assert_eq!(state.phase, GamePhase::Menu);
        assert!(state.blocks.iter().all(|b| b.exists && !b.is_repairing));
        assert_eq!(state.active_beans(), 0);
        assert_eq!(state.pyoro.pos, Vec2::new(10.0, 18.0));
    }

    #[test]
    fn test_mouth_follows_facing() {
        let mut pyoro = Pyoro::default();
        assert!((pyoro.mouth().x - 13.1).abs() < 1e-5);
        pyoro.facing = Facing::Left;
        assert!((pyoro.mouth().x - 6.9).abs() < 1e-5);
        assert!((pyoro.mouth().y - 16.1).abs() < 1e-5);
    }

    #[test]
    fn test_find_destroyed_block_skips_repairing() {
        let mut state = GameState::new(1);
        state.blocks[3].exists = false;
        state.blocks[3].is_repairing = true;
        state.blocks[8].exists = false;
        assert_eq!(state.find_destroyed_block(), Some(8));
    }
}
